use crate::grid::Point;

/// Dense row-major grid of heights in [0, 1], one per integer coordinate.
///
/// Built once per generation run and never mutated afterwards; a new run
/// produces a new field.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl HeightField {
    /// Take ownership of row-major `data`.
    ///
    /// # Panics
    /// If `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Self {
        assert_eq!(
            data.len(),
            width * height,
            "height field data must be width×height"
        );
        Self {
            width,
            height,
            data,
        }
    }

    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self::from_vec(width, height, vec![value; width * height])
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self::from_vec(width, height, data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// Height at `p`, or `None` when `p` lies outside the raster.
    #[inline]
    pub fn get_point(&self, p: Point) -> Option<f32> {
        self.contains(p).then(|| self.get(p.x as usize, p.y as usize))
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.width.max(1))
    }

    /// Smallest and largest value, `None` for an empty field.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.data.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    pub fn any_at_or_above(&self, threshold: f64) -> bool {
        self.data.iter().any(|&v| f64::from(v) >= threshold)
    }

    /// Share of cells whose height is at least `threshold`.
    pub fn fraction_at_or_above(&self, threshold: f64) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let count = self
            .data
            .iter()
            .filter(|&&v| f64::from(v) >= threshold)
            .count();
        count as f64 / self.data.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::HeightField;
    use crate::grid::Point;

    #[test]
    fn row_major_layout() {
        let f = HeightField::from_fn(3, 2, |x, y| (y * 10 + x) as f32);
        assert_eq!(f.as_slice(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
        assert_eq!(f.get(2, 1), 12.0);
        let rows: Vec<&[f32]> = f.rows().collect();
        assert_eq!(rows, vec![&[0.0, 1.0, 2.0][..], &[10.0, 11.0, 12.0][..]]);
    }

    #[test]
    fn get_point_checks_bounds() {
        let f = HeightField::filled(4, 4, 0.5);
        assert_eq!(f.get_point(Point::new(3, 3)), Some(0.5));
        assert_eq!(f.get_point(Point::new(4, 0)), None);
        assert_eq!(f.get_point(Point::new(0, -1)), None);
    }

    #[test]
    fn stats() {
        let f = HeightField::from_fn(4, 1, |x, _| x as f32 * 0.25);
        assert_eq!(f.min_max(), Some((0.0, 0.75)));
        assert_eq!(f.fraction_at_or_above(0.5), 0.5);
        assert!(f.any_at_or_above(0.75));
        assert!(!f.any_at_or_above(0.8));
    }

    #[test]
    #[should_panic]
    fn from_vec_rejects_wrong_length() {
        let _ = HeightField::from_vec(3, 3, vec![0.0; 8]);
    }
}
