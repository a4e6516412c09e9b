use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eframe::egui::{self, ColorImage, RichText, ScrollArea, TextureHandle, TextureOptions, Ui};

// ---------------------------------------------------------------------------
// Pre-rendered figures with captions
// ---------------------------------------------------------------------------

struct Figure {
    title: &'static str,
    file: &'static str,
    caption: &'static str,
}

const FIGURES: &[Figure] = &[
    Figure {
        title: "Monarch Butterfly Population Trend",
        file: "download.png",
        caption: "Population count per year. The line shows long-term fluctuations \
                  in the monarch population and any sharp changes between seasons.",
    },
    Figure {
        title: "Geographical Distribution of Monarch Butterfly Sightings",
        file: "download (1).png",
        caption: "Each point is a location where monarchs were observed; point size \
                  and colour follow the number of individuals reported.",
    },
    Figure {
        title: "Seasonal Pattern of Monarch Butterfly Sightings",
        file: "download (2).png",
        caption: "Sightings per month across all years, showing the peak seasons of \
                  activity and migration.",
    },
    Figure {
        title: "Top 10 States and Monarch Population Sightings from 2017-2024",
        file: "line_slope.png",
        caption: "One panel per state for the ten states with the most individuals \
                  reported; the slopes compare how sightings changed over time.",
    },
];

const CONTEXT_NOTE: &str = "Sightings come from volunteer reports of date, town and \
state/province. Air-quality and pesticide-use indicators for the same regions were \
reviewed alongside them as possible drivers of population change.";

enum Slot {
    NotLoaded,
    Loaded(TextureHandle),
    Missing(String),
}

/// The static gallery page: figures are read from `assets_dir` the first
/// time the page is shown.
pub struct Gallery {
    assets_dir: PathBuf,
    slots: Vec<Slot>,
}

impl Gallery {
    pub fn new(assets_dir: &Path) -> Self {
        Self {
            assets_dir: assets_dir.to_path_buf(),
            slots: FIGURES.iter().map(|_| Slot::NotLoaded).collect(),
        }
    }

    fn ensure_loaded(&mut self, ctx: &egui::Context) {
        for (figure, slot) in FIGURES.iter().zip(self.slots.iter_mut()) {
            if !matches!(slot, Slot::NotLoaded) {
                continue;
            }
            let path = self.assets_dir.join(figure.file);
            *slot = match load_texture(ctx, &path) {
                Ok(texture) => Slot::Loaded(texture),
                Err(e) => {
                    log::warn!("Gallery image unavailable: {e:#}");
                    Slot::Missing(path.display().to_string())
                }
            };
        }
    }
}

fn load_texture(ctx: &egui::Context, path: &Path) -> Result<TextureHandle> {
    let img = image::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .to_rgba8();
    let size = [img.width() as usize, img.height() as usize];
    let color_image = ColorImage::from_rgba_unmultiplied(size, img.as_flat_samples().as_slice());
    Ok(ctx.load_texture(path.display().to_string(), color_image, TextureOptions::LINEAR))
}

/// Render the gallery page.
pub fn gallery_page(ui: &mut Ui, gallery: &mut Gallery) {
    gallery.ensure_loaded(ui.ctx());

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Monarch Butterfly Sightings Analysis");
            ui.label(CONTEXT_NOTE);
            ui.separator();

            for (figure, slot) in FIGURES.iter().zip(gallery.slots.iter()) {
                ui.add_space(8.0);
                ui.strong(figure.title);
                match slot {
                    Slot::Loaded(texture) => {
                        ui.add(
                            egui::Image::from_texture(egui::load::SizedTexture::from_handle(
                                texture,
                            ))
                            .max_width(ui.available_width()),
                        );
                    }
                    Slot::Missing(path) => {
                        ui.label(
                            RichText::new(format!("Image not available: {path}")).italics(),
                        );
                    }
                    Slot::NotLoaded => {}
                }
                ui.label(figure.caption);
            }
        });
}
