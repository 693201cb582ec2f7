mod config;
mod render;
mod worker;

use std::path::PathBuf;
use std::time::Duration;

use eframe::{App, CreationContext, Frame, NativeOptions, run_native};
use egui::{ColorImage, TextureHandle};
use image::RgbImage;
use rand::Rng;
use terrain_core::{GenerationConfig, config::land_threshold_for};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::render::to_terrain_image;
use crate::worker::{Finished, Generator};

struct TerrainApp {
    // parameters
    config: GenerationConfig,
    config_path: PathBuf,

    generator: Generator,

    // generated texture
    terrain_texture: Option<TextureHandle>,
    // Store the last rendered image for PNG export
    last_image: Option<RgbImage>,
    last_seed: u64,

    status_message: String,
}

impl TerrainApp {
    fn new(
        _cc: &CreationContext<'_>,
        config: GenerationConfig,
        config_path: PathBuf,
    ) -> std::io::Result<Self> {
        let mut generator = Generator::new()?;
        // initial render
        generator.request(config.clone());
        Ok(Self {
            last_seed: config.seed,
            config,
            config_path,
            generator,
            terrain_texture: None,
            last_image: None,
            status_message: "Generating…".into(),
        })
    }

    fn regenerate(&mut self) {
        self.generator.request(self.config.clone());
    }

    fn show_finished(&mut self, ctx: &egui::Context, finished: Finished) {
        let world = match finished.world {
            Ok(world) => world,
            Err(err) => {
                self.status_message = format!("Invalid parameters: {}", err);
                return;
            }
        };

        let img = to_terrain_image(&world.heights, world.points(), finished.config.sea_level);
        let size = [img.width() as usize, img.height() as usize];
        let color_image = ColorImage::from_rgb(size, img.as_raw());
        self.terrain_texture =
            Some(ctx.load_texture("terrain", color_image, egui::TextureOptions::NEAREST));
        self.last_image = Some(img);
        self.last_seed = finished.config.seed;

        let ms = finished.elapsed.as_secs_f32() * 1000.0;
        self.status_message = match &world.points {
            Ok(points) => format!(
                "Generated in {:.2} ms (seed {}, {} POIs)",
                ms,
                finished.config.seed,
                points.len()
            ),
            Err(err) => format!(
                "Generated in {:.2} ms (seed {}), no POIs: {}",
                ms, finished.config.seed, err
            ),
        };
    }

    fn save_png(&mut self) {
        let Some(img) = &self.last_image else {
            self.status_message = "Nothing to save yet".into();
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(format!("world_{}.png", self.last_seed))
            .save_file()
        else {
            return;
        };
        self.status_message = match img.save(&path) {
            Ok(()) => {
                info!("saved {}", path.display());
                format!("Saved {}", path.display())
            }
            Err(err) => {
                error!("png encode error: {}", err);
                format!("Save failed: {}", err)
            }
        };
    }

    fn save_config(&mut self) {
        self.status_message = match config::save(&self.config_path, &self.config) {
            Ok(()) => format!("Saved parameters to {}", self.config_path.display()),
            Err(err) => {
                error!("failed to save config: {:#}", err);
                format!("Saving parameters failed: {:#}", err)
            }
        };
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Island Generator");
        ui.label("Use the sliders below to adjust the world.");
        ui.separator();

        let c = &mut self.config;
        let mut changed = false;

        // Seed (no automatic generation while dragging)
        ui.add(egui::Slider::new(&mut c.seed, 0..=100_000).text("Seed"));
        let randomize = ui.button("Randomize Seed & Generate").clicked();
        let generate = ui.button("Generate").clicked();

        ui.separator();
        ui.label("Detail");
        changed |= ui
            .add(egui::Slider::new(&mut c.scale, 0.001..=0.02).text("Scale"))
            .changed();
        changed |= ui
            .add(egui::Slider::new(&mut c.octaves, 1..=8).text("Octaves"))
            .changed();
        changed |= ui
            .add(egui::Slider::new(&mut c.persistence, 0.1..=0.9).text("Persistence"))
            .changed();
        changed |= ui
            .add(egui::Slider::new(&mut c.lacunarity, 1.5..=3.0).text("Lacunarity"))
            .changed();

        ui.label("Continent");
        changed |= ui
            .add(egui::Slider::new(&mut c.continent_freq, 0.0005..=0.02).text("Continent Freq"))
            .changed();
        changed |= ui
            .add(egui::Slider::new(&mut c.continent_octaves, 1..=6).text("Continent Octaves"))
            .changed();
        changed |= ui
            .add(egui::Slider::new(&mut c.continent_weight, 0.0..=1.0).text("Continent Weight"))
            .changed();

        ui.label("Falloff");
        changed |= ui
            .add(egui::Slider::new(&mut c.falloff_exponent, 0.5..=4.0).text("Falloff"))
            .changed();
        changed |= ui
            .add(egui::Slider::new(&mut c.falloff_weight, 0.0..=1.0).text("Falloff Weight"))
            .changed();

        ui.label("Sea & POIs");
        if ui
            .add(egui::Slider::new(&mut c.sea_level, 0.0..=1.0).text("Sea Level"))
            .changed()
        {
            c.land_threshold = land_threshold_for(c.sea_level);
            changed = true;
        }
        changed |= ui
            .add(egui::Slider::new(&mut c.min_distance, 1..=50).text("Min. Distance"))
            .changed();

        ui.label("Flow");
        changed |= ui
            .add(egui::Slider::new(&mut c.flow_scale, 0.0..=0.02).text("Flow Scale"))
            .changed();
        changed |= ui
            .add(egui::Slider::new(&mut c.flow_strength, 0.0..=60.0).text("Flow Strength"))
            .changed();

        if randomize {
            // UI randomness only, POI placement stays tied to the seed
            c.seed = rand::thread_rng().gen_range(0..100_000);
        }
        if changed || randomize || generate {
            self.regenerate();
        }

        ui.separator();
        if ui.button("Save PNG…").clicked() {
            self.save_png();
        }
        if ui.button("Save Parameters").clicked() {
            self.save_config();
        }

        ui.separator();
        if self.generator.is_busy() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Generating…");
            });
        }
        ui.label(&self.status_message);
    }
}

impl App for TerrainApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        if let Some(finished) = self.generator.poll() {
            self.show_finished(ctx, finished);
        }

        egui::SidePanel::left("controls").show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| self.controls(ui));
        });

        // central display
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(tex) = &self.terrain_texture {
                let available = ui.available_size();
                let size = tex.size_vec2();
                let scale = (available.x / size.x).min(available.y / size.y);
                ui.centered_and_justified(|ui| {
                    ui.image((tex.id(), size * scale));
                });
            } else {
                ui.centered_and_justified(|ui| {
                    ui.label("Generating first world…");
                });
            }
        });

        if self.generator.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(30));
        }
    }
}

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = config::config_path();
    let config = config::load(&config_path);

    let opts = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    run_native(
        "Island Generator",
        opts,
        Box::new(|cc| Ok(Box::new(TerrainApp::new(cc, config, config_path)?))),
    )
}
