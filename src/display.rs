//! On-screen presentation of a rendered [`Figure`].
//!
//! The figure is rasterized once with the bitmap backend and handed to an
//! `eframe` window as a texture. Everything the window holds is dropped when
//! the window closes.

use crate::viz::Figure;
use anyhow::{Result, anyhow};
use eframe::egui;
use log::info;

/// Convert a packed RGB8 buffer into an egui image.
pub fn color_image(rgb: &[u8], width: u32, height: u32) -> Result<egui::ColorImage> {
    let expected = width as usize * height as usize * 3;
    if rgb.len() != expected {
        return Err(anyhow!(
            "RGB buffer has {} bytes, expected {} for {}x{}",
            rgb.len(),
            expected,
            width,
            height
        ));
    }
    Ok(egui::ColorImage::from_rgb(
        [width as usize, height as usize],
        rgb,
    ))
}

/// Open a window showing `figure` at `width` x `height` pixels and block until it is closed.
pub fn show(figure: &Figure, width: u32, height: u32) -> Result<()> {
    let rgb = figure.to_rgb(width, height)?;
    let image = color_image(&rgb, width, height)?;
    let title = figure.title.clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32, height as f32])
            .with_min_inner_size([320.0, 200.0])
            .with_title(title.as_str()),
        ..Default::default()
    };

    info!("opening figure window ({}x{})", width, height);
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(FigureWindow::new(image)))),
    )
    .map_err(|e| anyhow!("display window failed: {e}"))
}

struct FigureWindow {
    pending: Option<egui::ColorImage>,
    texture: Option<egui::TextureHandle>,
}

impl FigureWindow {
    fn new(image: egui::ColorImage) -> Self {
        Self {
            pending: Some(image),
            texture: None,
        }
    }
}

impl eframe::App for FigureWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(image) = self.pending.take() {
            self.texture = Some(ctx.load_texture("figure", image, egui::TextureOptions::LINEAR));
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                if let Some(texture) = &self.texture {
                    ui.centered_and_justified(|ui| {
                        ui.add(egui::Image::new(texture).shrink_to_fit());
                    });
                }
            });
    }
}
