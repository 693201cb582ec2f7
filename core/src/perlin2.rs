use crate::NoiseGenerator;
use crate::permutation::PermutationTable;

// 2D gradient (Perlin) noise over a seeded permutation table
#[derive(Debug, Clone)]
pub struct Perlin2D {
    seed: u64,
    perm: PermutationTable,
}

// Fade function as defined by Ken Perlin: 6t^5 − 15t^4 + 10t^3
// First and second derivatives are zero at t=0 and t=1,
// which hides the lattice grid in the output
#[inline]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

// Linear interpolation
#[inline]
pub fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

// Low 2 bits of the hash pick one of the diagonal gradients (±1, ±1),
// the result is its dot product with the corner offset (x, y)
#[inline]
pub fn grad(hash: u8, x: f64, y: f64) -> f64 {
    match hash & 3 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        _ => -x - y,
    }
}

impl Perlin2D {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            perm: PermutationTable::new(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn permutation(&self) -> &PermutationTable {
        &self.perm
    }

    pub fn generate(&self, width: usize, height: usize, freq: f64) -> Vec<Vec<f32>> {
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| self.normalized(x as f64, y as f64, freq) as f32)
                    .collect()
            })
            .collect()
    }
}

impl NoiseGenerator for Perlin2D {
    // Single-octave noise at (x * freq, y * freq), roughly in [-1, 1]
    fn raw(&self, x: f64, y: f64, freq: f64) -> f64 {
        let x = x * freq;
        let y = y * freq;
        let x0 = x.floor();
        let y0 = y.floor();

        // Which lattice square (wrapped to the table size)
        let xi = (x0 as i64 & 255) as usize;
        let yi = (y0 as i64 & 255) as usize;
        // Where within the square
        let xf = x - x0;
        let yf = y - y0;

        let u = fade(xf);
        let v = fade(yf);

        let aa = self.perm.hash2(xi, yi);
        let ab = self.perm.hash2(xi, yi + 1);
        let ba = self.perm.hash2(xi + 1, yi);
        let bb = self.perm.hash2(xi + 1, yi + 1);

        let x1 = lerp(u, grad(aa, xf, yf), grad(ba, xf - 1.0, yf));
        let x2 = lerp(u, grad(ab, xf, yf - 1.0), grad(bb, xf - 1.0, yf - 1.0));
        lerp(v, x1, x2)
    }
}
