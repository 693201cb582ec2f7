use serde::{Deserialize, Serialize};

/// Integer raster coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_squared_to(self, other: Point) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.distance_squared_to(other) as f64).sqrt()
    }
}

// Acceleration grid for Bridson sampling: cells of side r/√2 hold at most one point,
// so any point closer than r to a candidate sits within 2 cells of it
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f64,
    cols: usize,
    rows: usize,
    cells: Vec<Option<Point>>,
}

// Cells on each side of the candidate's cell that a neighbourhood query inspects
pub const SEARCH_RADIUS_CELLS: i64 = 2;

impl SpatialGrid {
    // Grid covering a width×height raster for minimum distance `min_distance`
    pub fn new(width: usize, height: usize, min_distance: f64) -> Self {
        let cell_size = min_distance / std::f64::consts::SQRT_2;
        let cols = ((width as f64 / cell_size).ceil() as usize).max(1);
        let rows = ((height as f64 / cell_size).ceil() as usize).max(1);
        Self {
            cell_size,
            cols,
            rows,
            cells: vec![None; cols * rows],
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    // Cell containing `p`; `p` must be inside the raster the grid was built for
    #[inline]
    pub fn cell_of(&self, p: Point) -> (usize, usize) {
        let cx = (f64::from(p.x) / self.cell_size) as usize;
        let cy = (f64::from(p.y) / self.cell_size) as usize;
        (cx.min(self.cols - 1), cy.min(self.rows - 1))
    }

    pub fn get(&self, cx: usize, cy: usize) -> Option<Point> {
        self.cells[cy * self.cols + cx]
    }

    pub fn insert(&mut self, p: Point) {
        let (cx, cy) = self.cell_of(p);
        let slot = &mut self.cells[cy * self.cols + cx];
        debug_assert!(slot.is_none(), "cell ({}, {}) already holds a point", cx, cy);
        *slot = Some(p);
    }

    // Points stored in the 5×5 block of cells centred on the cell of `p`
    pub fn neighbours(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        let (cx, cy) = self.cell_of(p);
        let (cx, cy) = (cx as i64, cy as i64);
        (cy - SEARCH_RADIUS_CELLS..=cy + SEARCH_RADIUS_CELLS)
            .flat_map(move |y| {
                (cx - SEARCH_RADIUS_CELLS..=cx + SEARCH_RADIUS_CELLS).map(move |x| (x, y))
            })
            .filter(|&(x, y)| {
                x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows
            })
            .filter_map(|(x, y)| self.get(x as usize, y as usize))
    }

    // True when some stored point lies strictly closer than `min_distance` to `p`
    pub fn has_neighbour_within(&self, p: Point, min_distance: f64) -> bool {
        let min_sq = min_distance * min_distance;
        self.neighbours(p)
            .any(|q| (p.distance_squared_to(q) as f64) < min_sq)
    }
}
