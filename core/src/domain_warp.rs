use crate::NoiseGenerator;

// Offset between the two samples of a flow vector; keeps dx and dy decorrelated
pub const FLOW_OFFSET: f64 = 100.0;

// Signed flow vector at (x, y), each component roughly in [-1, 1]
pub fn flow<N: NoiseGenerator + ?Sized>(noise: &N, x: f64, y: f64, freq: f64) -> (f64, f64) {
    let dx = noise.raw(x, y, freq);
    let dy = noise.raw(x + FLOW_OFFSET, y + FLOW_OFFSET, freq);
    (dx, dy)
}

// Pixel-space domain warp: moves a sampling coordinate along the flow field
pub struct DomainWarp2D<'a> {
    pub warp: &'a dyn NoiseGenerator,
    pub frequency: f64,
    pub warp_strength: f64,
}

impl<'a> DomainWarp2D<'a> {
    pub fn new(warp: &'a dyn NoiseGenerator, frequency: f64, warp_strength: f64) -> Self {
        Self {
            warp,
            frequency,
            warp_strength,
        }
    }

    // Displacement in pixels at (x, y)
    pub fn offset(&self, x: f64, y: f64) -> (f64, f64) {
        let (dx, dy) = self.warp.flow(x, y, self.frequency);
        (dx * self.warp_strength, dy * self.warp_strength)
    }

    // The warped coordinate (x + dx, y + dy)
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let (dx, dy) = self.offset(x, y);
        (x + dx, y + dy)
    }
}
