//! Demo application composing the lumaview widgets.

use std::path::Path;

use eframe::egui;
use lumaview_core::{ImageContext, LinearMap, SoftwareContext};
use lumaview_gui::{HistogramView, ImageView, LabeledSlider, TitledPanel};

/// Side-by-side demo: an image view, its histogram, and a panel of sliders.
pub struct DemoApp {
    image_panel: TitledPanel,
    image_view: ImageView,
    histogram_panel: TitledPanel,
    histogram_view: HistogramView,
    controls: TitledPanel,
    sliders: Vec<LabeledSlider>,
    status: Option<String>,
}

impl Default for DemoApp {
    fn default() -> Self {
        let mut sliders = vec![
            LabeledSlider::new("Exposure", LinearMap::new(6.0, -3.0))
                .with_decimals(2)
                .on_change(|s| log::info!("{} changed to {:.2}", s.name(), s.value())),
            LabeledSlider::new("Contrast", LinearMap::new(2.0, 0.0))
                .with_decimals(2)
                .on_change(|s| log::info!("{} changed to {:.2}", s.name(), s.value())),
            LabeledSlider::new("Gain", LinearMap::new(10.0, 0.0))
                .on_change(|s| log::info!("{} changed to {:.1}", s.name(), s.value())),
        ];
        for slider in &mut sliders {
            let midpoint = slider.map().to_domain(0.5);
            if let Err(err) = slider.initialize(midpoint) {
                log::warn!("slider {} init failed: {err}", slider.name());
            }
        }

        Self {
            image_panel: TitledPanel::titled("Image"),
            image_view: ImageView::new(),
            histogram_panel: TitledPanel::titled("Histogram"),
            histogram_view: HistogramView::new(),
            controls: TitledPanel::titled("Adjustments"),
            sliders,
            status: None,
        }
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("controls")
            .default_width(280.0)
            .show(ctx, |ui| {
                self.controls.show(ui, |ui| {
                    for slider in &mut self.sliders {
                        slider.show(ui);
                        ui.add_space(8.0);
                    }
                });

                ui.add_space(12.0);
                if ui.button("Open image…").clicked() {
                    self.open_image();
                }
                if let Some(status) = &self.status {
                    ui.add_space(8.0);
                    ui.colored_label(ui.visuals().warn_fg_color, status.clone());
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                self.image_panel.show(ui, |ui| self.image_view.show(ui));
                ui.add_space(16.0);
                self.histogram_panel
                    .show(ui, |ui| self.histogram_view.show(ui));
            });
        });
    }
}

impl DemoApp {
    /// Pick an image file and load it into both views.
    fn open_image(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "gif", "tiff"])
            .pick_file()
        else {
            return;
        };
        self.load_image(&path);
    }

    fn load_image(&mut self, path: &Path) {
        let (Some(dir), Some(name)) = (path.parent(), path.file_name()) else {
            self.status = Some(format!("Not a loadable path: {}", path.display()));
            return;
        };

        let loader = SoftwareContext::with_resource_dir(dir);
        match loader.load_image(&name.to_string_lossy()) {
            Ok(image) => {
                // The views don't resize themselves; match the display to
                // the new natural extent here.
                self.image_view.set_display_rect(image.extent());
                self.image_view.set_source(image.clone());
                self.histogram_view.set_source(image);
                self.status = None;
            }
            Err(err) => {
                log::error!("failed to load {}: {err}", path.display());
                self.status = Some(format!("Load failed: {err}"));
            }
        }
    }
}
