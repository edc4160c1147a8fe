use boardview_background::app::{BoardSide, ViewerApp};
use boardview_background::background_image::{config_path_for_board, BackgroundImage, Image};
use boardview_background::common::file_dialog::FilePicker;
use boardview_background::settings::Settings;
use std::path::PathBuf;
use tempfile::tempdir;

struct NoPicker;

impl FilePicker for NoPicker {
    fn pick_image(&mut self) -> Option<PathBuf> {
        None
    }
}

#[test]
fn loads_background_from_board_config() {
    let dir = tempdir().unwrap();
    let board = dir.path().join("main.brd");
    let png = dir.path().join("top.png");
    image::RgbaImage::new(3, 3).save(&png).unwrap();

    let mut bg = BackgroundImage::default();
    bg.top_image.path = png;
    bg.top_image.offset_y = 8;
    bg.write_to_config(&config_path_for_board(&board)).unwrap();

    let app = ViewerApp::with_picker(Settings::default(), Some(board.clone()), Box::new(NoPicker));
    assert_eq!(app.board(), Some(&board));
    assert_eq!(app.background.top_image.offset_y, 8);
    assert!(app.background.top_image.is_loaded());
    assert_eq!(app.background.config_filepath, dir.path().join("main.conf"));
    assert!(!app.prefs.is_shown());
    assert_eq!(app.side, BoardSide::Top);
}

#[test]
fn broken_config_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let board = dir.path().join("main.brd");
    std::fs::write(dir.path().join("main.conf"), "not json").unwrap();

    let app = ViewerApp::with_picker(Settings::default(), Some(board), Box::new(NoPicker));
    assert_eq!(app.background.top_image, Image::default());
    assert_eq!(app.background.config_filepath, dir.path().join("main.conf"));
}

#[test]
fn flipping_alternates_sides() {
    assert_eq!(BoardSide::Top.flipped(), BoardSide::Bottom);
    assert_eq!(BoardSide::Bottom.flipped().flipped(), BoardSide::Bottom);
}
