use crate::background_image::{config_path_for_board, BackgroundImage};
use crate::common::file_dialog::{FilePicker, NativeFilePicker};
use crate::gui::{BackgroundImagePreferences, OverlayTextures};
use crate::keybindings::KeyBindings;
use crate::settings::Settings;
use eframe::egui;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardSide {
    #[default]
    Top,
    Bottom,
}

impl BoardSide {
    pub fn flipped(self) -> Self {
        match self {
            BoardSide::Top => BoardSide::Bottom,
            BoardSide::Bottom => BoardSide::Top,
        }
    }
}

pub struct ViewerApp {
    pub settings: Settings,
    pub keybindings: KeyBindings,
    pub background: BackgroundImage,
    pub prefs: BackgroundImagePreferences,
    pub side: BoardSide,
    board: Option<PathBuf>,
    picker: Box<dyn FilePicker>,
    overlay: OverlayTextures,
}

impl ViewerApp {
    pub fn new(settings: Settings, board: Option<PathBuf>) -> Self {
        Self::with_picker(settings, board, Box::new(NativeFilePicker))
    }

    pub fn with_picker(settings: Settings, board: Option<PathBuf>, picker: Box<dyn FilePicker>) -> Self {
        let mut background = match &board {
            Some(b) => {
                let conf = config_path_for_board(b);
                BackgroundImage::read_from_config(&conf).unwrap_or_else(|e| {
                    tracing::error!("failed to read background settings: {e:#}");
                    BackgroundImage {
                        config_filepath: conf,
                        ..BackgroundImage::default()
                    }
                })
            }
            None => BackgroundImage::default(),
        };
        for e in background.reload() {
            tracing::warn!("failed to load background image: {e}");
        }
        Self {
            keybindings: settings.keybindings(),
            settings,
            background,
            prefs: BackgroundImagePreferences::default(),
            side: BoardSide::Top,
            board,
            picker,
            overlay: OverlayTextures::default(),
        }
    }

    pub fn board(&self) -> Option<&PathBuf> {
        self.board.as_ref()
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("Flip board").clicked() {
                        self.side = self.side.flipped();
                        ui.close_menu();
                    }
                });
                ui.menu_button("Preferences", |ui| {
                    self.prefs.menu_item(ui, &self.background);
                });
            });
        });
    }

    fn board_view(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let origin = ui.max_rect().min;
            let painter = ui.painter().clone();
            match self.side {
                BoardSide::Top => self.overlay.paint_top(&painter, &self.background.top_image, origin),
                BoardSide::Bottom => {
                    self.overlay
                        .paint_bottom(&painter, &self.background.bottom_image, origin)
                }
            }
            match &self.board {
                Some(b) => ui.label(format!("{} ({:?})", b.display(), self.side)),
                None => ui.label("No board loaded"),
            };
        });
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.menu_bar(ctx);
        self.board_view(ctx);
        self.prefs
            .ui(ctx, &mut self.background, &self.keybindings, self.picker.as_mut());
    }
}
