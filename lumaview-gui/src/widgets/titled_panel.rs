//! Container panel with an optional centered title.

use eframe::egui;

/// Wraps arbitrary child content under an optional title label.
///
/// A panel constructed without a title (or with an empty one) renders no
/// title label at all; otherwise exactly one centered, strong label.
#[derive(Debug, Clone, Default)]
pub struct TitledPanel {
    title: Option<String>,
}

impl TitledPanel {
    /// Create a panel, treating an empty title as no title.
    #[must_use]
    pub fn new(title: Option<String>) -> Self {
        Self {
            title: title.filter(|t| !t.is_empty()),
        }
    }

    /// Create a panel titled `title`.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self::new(Some(title.into()))
    }

    /// The effective title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Render the title (when present) followed by the caller's content.
    pub fn show<R>(&self, ui: &mut egui::Ui, contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
        if let Some(title) = &self.title {
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(title).size(18.0).strong());
            });
            ui.add_space(4.0);
        }
        contents(ui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_title_is_no_title() {
        assert_eq!(TitledPanel::new(None).title(), None);
        assert_eq!(TitledPanel::new(Some(String::new())).title(), None);
        assert_eq!(TitledPanel::titled("X").title(), Some("X"));
    }

    #[test]
    fn test_show_runs_contents_and_returns_value() {
        let ctx = egui::Context::default();
        let mut titled_runs = 0;
        let mut untitled_runs = 0;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let out = TitledPanel::titled("X").show(ui, |_ui| {
                    titled_runs += 1;
                    42
                });
                assert_eq!(out, 42);
                TitledPanel::new(None).show(ui, |_ui| {
                    untitled_runs += 1;
                });
            });
        });
        assert_eq!(titled_runs, 1);
        assert_eq!(untitled_runs, 1);
    }
}
