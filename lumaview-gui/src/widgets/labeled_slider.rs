//! Slider control with a title label, a bordered value label, and linear
//! value conversion.

use eframe::egui;
use lumaview_core::{LinearMap, Result};

/// Change notification invoked with the control after a committed move.
pub type ChangeCallback = Box<dyn FnMut(&LabeledSlider)>;

/// A `[0, 1]` slider composed with a title and a formatted value label.
///
/// The slider position maps to a domain value through a [`LinearMap`]; the
/// value label always shows the formatted domain value. A registered change
/// callback fires synchronously on each committed move, never during
/// [`LabeledSlider::initialize`].
pub struct LabeledSlider {
    name: String,
    map: LinearMap,
    format: Box<dyn Fn(f64) -> String>,
    changed: Option<ChangeCallback>,
    position: f64,
    value: f64,
    value_text: String,
}

impl LabeledSlider {
    /// Create a slider named `name` converting positions through `map`.
    ///
    /// Starts at the midpoint position with a one-decimal value label.
    #[must_use]
    pub fn new(name: impl Into<String>, map: LinearMap) -> Self {
        let format: Box<dyn Fn(f64) -> String> = Box::new(|v| format!("{v:.1}"));
        let position = 0.5;
        let value = map.to_domain(position);
        let value_text = format(value);
        Self {
            name: name.into(),
            map,
            format,
            changed: None,
            position,
            value,
            value_text,
        }
    }

    /// Replace the value formatter.
    #[must_use]
    pub fn with_formatter(mut self, format: impl Fn(f64) -> String + 'static) -> Self {
        self.value_text = format(self.value);
        self.format = Box::new(format);
        self
    }

    /// Format the value with a fixed number of decimal places.
    #[must_use]
    pub fn with_decimals(self, decimals: usize) -> Self {
        self.with_formatter(move |v| format!("{v:.decimals$}"))
    }

    /// Register the change callback.
    #[must_use]
    pub fn on_change(mut self, callback: impl FnMut(&Self) + 'static) -> Self {
        self.changed = Some(Box::new(callback));
        self
    }

    /// Set the displayed value directly, bypassing the change callback.
    ///
    /// Recomputes the slider position through the inverse mapping and
    /// reformats the value label.
    ///
    /// # Errors
    ///
    /// Returns [`lumaview_core::Error::ZeroSlope`] when the mapping cannot
    /// be inverted.
    pub fn initialize(&mut self, value: f64) -> Result<()> {
        self.position = self.map.to_position(value)?;
        self.value = value;
        self.value_text = (self.format)(value);
        Ok(())
    }

    /// Commit a slider move: recompute the domain value, update the label,
    /// and invoke the change callback if one is registered.
    pub fn on_slider_moved(&mut self, position: f64) {
        self.position = position.clamp(0.0, 1.0);
        self.value = self.map.to_domain(self.position);
        self.value_text = (self.format)(self.value);
        if let Some(mut changed) = self.changed.take() {
            changed(self);
            self.changed = Some(changed);
        }
    }

    /// The control's name, shown as the title label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current domain value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The current normalized slider position.
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// The formatted value label text.
    #[must_use]
    pub fn value_text(&self) -> &str {
        &self.value_text
    }

    /// The position/value mapping.
    #[must_use]
    pub fn map(&self) -> LinearMap {
        self.map
    }

    /// Render the title, slider, and value label.
    ///
    /// The slider is non-continuous: the value commits (and the callback
    /// fires) when a drag ends, not on every intermediate position.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.vertical(|ui| {
            ui.label(self.name.clone());
            ui.horizontal(|ui| {
                let mut position = self.position;
                let response =
                    ui.add(egui::Slider::new(&mut position, 0.0..=1.0).show_value(false));
                if response.drag_stopped() || (response.changed() && !response.dragged()) {
                    self.on_slider_moved(position);
                } else if response.changed() {
                    // Track the thumb during a drag; the value commits on release.
                    self.position = position;
                }

                let stroke = ui.visuals().widgets.noninteractive.fg_stroke;
                egui::Frame::none()
                    .stroke(stroke)
                    .inner_margin(egui::Margin::symmetric(8.0, 2.0))
                    .show(ui, |ui| {
                        ui.set_min_width(50.0);
                        ui.centered_and_justified(|ui| {
                            ui.label(self.value_text.clone());
                        });
                    });
            });
        });
    }
}
