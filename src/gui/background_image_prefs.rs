use crate::background_image::{BackgroundImage, Image};
use crate::common::file_dialog::FilePicker;
use crate::keybindings::{KeyBindings, CLOSE_DIALOG};
use eframe::egui;
use std::path::PathBuf;

pub const WINDOW_TITLE: &str = "Background Image Preferences";
pub const WINDOW_ID: &str = "background_image_prefs";
pub const ERROR_POPUP_ID: &str = "background_image_prefs_error";

/// Layer the error popup is drawn on.
pub fn error_popup_layer() -> egui::LayerId {
    egui::LayerId::new(egui::Order::Middle, egui::Id::new(ERROR_POPUP_ID))
}

/// Buttons drawn by [`BackgroundImagePreferences::ui`] this frame.
#[derive(Default)]
pub struct PanelResponse {
    pub top_browse: Option<egui::Response>,
    pub bottom_browse: Option<egui::Response>,
    pub save: Option<egui::Response>,
    pub cancel: Option<egui::Response>,
    pub clear: Option<egui::Response>,
    /// "OK" of the error popup.
    pub error_ok: Option<egui::Response>,
}

/// What the user asked the panel to do this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Save,
    Cancel,
    /// Window closed with its title bar button.
    Closed,
    Clear,
}

/// Editor for the top and bottom background images.
///
/// Opening takes a snapshot of the current settings; every way of leaving
/// the panel other than Save restores it.
#[derive(Default)]
pub struct BackgroundImagePreferences {
    shown: bool,
    backup: BackgroundImage,
    errored_files: Vec<String>,
}

impl BackgroundImagePreferences {
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn errored_files(&self) -> &[String] {
        &self.errored_files
    }

    /// Show the panel, forget earlier errors and snapshot `background`.
    pub fn open(&mut self, background: &BackgroundImage) {
        self.shown = true;
        self.errored_files.clear();
        self.backup = background.clone();
    }

    pub fn acknowledge_errors(&mut self) {
        self.errored_files.clear();
    }

    pub fn menu_item(&mut self, ui: &mut egui::Ui, background: &BackgroundImage) {
        if ui.button(WINDOW_TITLE).clicked() {
            self.open(background);
            ui.close_menu();
        }
    }

    /// Point `image` at a freshly picked file and load it.
    pub fn browse(&mut self, image: &mut Image, picked: Option<PathBuf>) {
        let Some(path) = picked.filter(|p| !p.as_os_str().is_empty()) else {
            return;
        };
        image.path = path;
        if let Err(e) = image.reload() {
            tracing::warn!("failed to load background image: {e:#}");
            self.errored_files.push(format!("{e:#}"));
        }
    }

    fn restore_backup(&mut self, background: &mut BackgroundImage) {
        *background = self.backup.clone();
        for e in background.reload() {
            tracing::debug!("ignoring reload error after cancel: {e}");
        }
    }

    pub fn apply(&mut self, action: PanelAction, background: &mut BackgroundImage) {
        match action {
            PanelAction::Save => {
                self.shown = false;
                let path = background.config_filepath.clone();
                if let Err(e) = background.write_to_config(&path) {
                    tracing::error!("failed to save background image settings: {e:#}");
                }
                self.errored_files.extend(background.reload());
            }
            PanelAction::Cancel | PanelAction::Closed => {
                self.shown = false;
                self.restore_backup(background);
            }
            PanelAction::Clear => {
                background.top_image = Image::default();
                background.bottom_image = Image::default();
                for e in background.reload() {
                    tracing::debug!("reload after clear: {e}");
                }
            }
        }
    }

    /// Widgets bound to one image's fields. Returns the "Browse" button.
    pub fn image_settings(
        &mut self,
        ui: &mut egui::Ui,
        name: &str,
        image: &mut Image,
        picker: &mut dyn FilePicker,
    ) -> egui::Response {
        ui.label(format!("{name} image settings"));
        ui.push_id(name, |ui| {
            let browse = ui
                .horizontal(|ui| {
                    ui.label(format!("{name} file"));
                    let mut filename = image.path.display().to_string();
                    if ui.text_edit_singleline(&mut filename).changed() {
                        image.path = PathBuf::from(filename);
                    }
                    let browse = ui.button("Browse");
                    if browse.clicked() {
                        let picked = picker.pick_image();
                        self.browse(image, picked);
                    }
                    browse
                })
                .inner;
            ui.horizontal(|ui| {
                ui.label("X offset");
                ui.add(egui::DragValue::new(&mut image.offset_x));
                ui.label("Y offset");
                ui.add(egui::DragValue::new(&mut image.offset_y));
            });
            ui.horizontal(|ui| {
                ui.label("X scaling");
                ui.add(egui::DragValue::new(&mut image.scaling_x).speed(0.01));
                ui.label("Y scaling");
                ui.add(egui::DragValue::new(&mut image.scaling_y).speed(0.01));
            });
            ui.horizontal(|ui| {
                ui.checkbox(&mut image.mirror_x, "Flip horizontal");
                ui.checkbox(&mut image.mirror_y, "Flip vertical");
            });
            ui.add(egui::Slider::new(&mut image.transparency, 0.0..=1.0).text("Transparency"));
            browse
        })
        .inner
    }

    /// Modal listing the files that failed to load. Drawn only while there
    /// are errors; "OK" clears them. Returns the "OK" button when drawn.
    pub fn error_popup(&mut self, ctx: &egui::Context) -> Option<egui::Response> {
        if self.errored_files.is_empty() {
            return None;
        }
        let mut ok = None;
        egui::Window::new("Error")
            .id(egui::Id::new(ERROR_POPUP_ID))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("There was an error while opening the selected image file(s)");
                for filename in &self.errored_files {
                    ui.label(filename);
                }
                ok = Some(ui.button("OK"));
            });
        // Keep the popup above the preferences window even after the user
        // clicks on the (disabled) window behind it.
        ctx.move_to_top(error_popup_layer());
        if ok.as_ref().is_some_and(|r| r.clicked()) {
            self.acknowledge_errors();
        }
        ok
    }

    /// Draw the panel and the error popup for this frame.
    ///
    /// While the error popup is up the panel is disabled: its widgets, its
    /// close button and the close key binding are ignored until "OK".
    pub fn ui(
        &mut self,
        ctx: &egui::Context,
        background: &mut BackgroundImage,
        keybindings: &KeyBindings,
        picker: &mut dyn FilePicker,
    ) -> PanelResponse {
        let mut response = PanelResponse::default();
        if self.shown {
            let blocked = !self.errored_files.is_empty();
            let close_pressed =
                !blocked && ctx.input(|i| keybindings.is_pressed(i, CLOSE_DIALOG));
            let mut open = true;
            let mut action: Option<PanelAction> = None;
            let mut window = egui::Window::new(WINDOW_TITLE)
                .id(egui::Id::new(WINDOW_ID))
                .resizable(false)
                .auto_sized();
            if !blocked {
                window = window.open(&mut open);
            }
            window.show(ctx, |ui| {
                ui.add_enabled_ui(!blocked, |ui| {
                    ui.separator();
                    response.top_browse =
                        Some(self.image_settings(ui, "Top", &mut background.top_image, picker));
                    ui.separator();
                    response.bottom_browse = Some(self.image_settings(
                        ui,
                        "Bottom",
                        &mut background.bottom_image,
                        picker,
                    ));
                    ui.separator();
                    ui.label("Note: background image preferences are stored in the .conf file associated with the boardview file.");
                    ui.horizontal(|ui| {
                        let save = ui.button("Save");
                        let cancel = ui.button("Cancel");
                        let clear = ui.button("Clear");
                        if save.clicked() {
                            action = Some(PanelAction::Save);
                        } else if cancel.clicked() {
                            action = Some(PanelAction::Cancel);
                        } else if clear.clicked() {
                            action = Some(PanelAction::Clear);
                        }
                        response.save = Some(save);
                        response.cancel = Some(cancel);
                        response.clear = Some(clear);
                    });
                });
            });
            if !open {
                action = Some(PanelAction::Closed);
            } else if close_pressed && action.is_none() {
                action = Some(PanelAction::Cancel);
            }
            if let Some(a) = action {
                tracing::debug!("background image preferences: {:?}", a);
                self.apply(a, background);
            }
        }
        response.error_ok = self.error_popup(ctx);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden_without_errors() {
        let prefs = BackgroundImagePreferences::default();
        assert!(!prefs.is_shown());
        assert!(prefs.errored_files().is_empty());
    }

    #[test]
    fn clear_keeps_panel_open_and_config_path() {
        let mut bg = BackgroundImage::default();
        bg.config_filepath = PathBuf::from("board.conf");
        bg.top_image.offset_x = 3;
        bg.bottom_image.mirror_y = true;
        let mut prefs = BackgroundImagePreferences::default();
        prefs.open(&bg);
        prefs.apply(PanelAction::Clear, &mut bg);
        assert!(prefs.is_shown());
        assert_eq!(bg.top_image, Image::default());
        assert_eq!(bg.bottom_image, Image::default());
        assert_eq!(bg.config_filepath, PathBuf::from("board.conf"));
    }

    #[test]
    fn empty_pick_changes_nothing() {
        let mut prefs = BackgroundImagePreferences::default();
        let mut img = Image::new("a.png");
        prefs.browse(&mut img, None);
        prefs.browse(&mut img, Some(PathBuf::new()));
        assert_eq!(img.path, PathBuf::from("a.png"));
        assert!(prefs.errored_files().is_empty());
    }
}
