use image::{Rgb, RgbImage};
use terrain_core::{HeightField, Point};

const DEEP_WATER: [u8; 3] = [25, 70, 120];
const WATER: [u8; 3] = [50, 150, 200];
const SHORE: [u8; 3] = [240, 230, 140];
const LAND: [u8; 3] = [80, 180, 80];
const HIGH_LAND: [u8; 3] = [100, 150, 100];
const MOUNTAIN: [u8; 3] = [120, 100, 80];
const PEAK: [u8; 3] = [255, 255, 255];
const POI: [u8; 3] = [255, 0, 0];

// Bands relative to sea level
pub fn height_to_rgb(h: f32, sea_level: f64) -> [u8; 3] {
    let h = f64::from(h);
    match h {
        x if x < sea_level - 0.15 => DEEP_WATER,
        x if x < sea_level => WATER,
        x if x < sea_level + 0.04 => SHORE,
        x if x < sea_level + 0.10 => LAND,
        x if x < sea_level + 0.20 => HIGH_LAND,
        x if x < sea_level + 0.30 => MOUNTAIN,
        _ => PEAK,
    }
}

// Colour-mapped height field with each POI drawn as a 3×3 marker
pub fn to_terrain_image(field: &HeightField, points: &[Point], sea_level: f64) -> RgbImage {
    let (w, h) = (field.width() as u32, field.height() as u32);
    let mut img = RgbImage::from_fn(w, h, |x, y| {
        Rgb(height_to_rgb(field.get(x as usize, y as usize), sea_level))
    });

    for p in points {
        for dy in -1..=1 {
            for dx in -1..=1 {
                let (x, y) = (p.x + dx, p.y + dy);
                if x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h {
                    img.put_pixel(x as u32, y as u32, Rgb(POI));
                }
            }
        }
    }
    img
}
