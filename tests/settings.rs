use boardview_background::keybindings::{KeyCombo, CLOSE_DIALOG};
use boardview_background::settings::Settings;
use eframe::egui::Key;
use tempfile::tempdir;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let settings = Settings::load(dir.path().join("settings.json")).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.keybindings[CLOSE_DIALOG], vec!["Escape".to_string()]);
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"debug_logging": true}"#).unwrap();
    let settings = Settings::load(&path).unwrap();
    assert!(settings.debug_logging);
    assert_eq!(settings.window_size, Some((1024, 768)));
    assert!(settings.keybindings.contains_key(CLOSE_DIALOG));
}

#[test]
fn saved_settings_load_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let mut settings = Settings::default();
    settings.log_file = Some("viewer.log".into());
    settings
        .keybindings
        .insert(CLOSE_DIALOG.into(), vec!["Escape".into(), "Ctrl+W".into()]);
    settings.save(&path).unwrap();
    assert_eq!(Settings::load(&path).unwrap(), settings);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "[1, 2").unwrap();
    assert!(Settings::load(&path).is_err());
}

#[test]
fn invalid_key_strings_are_skipped() {
    let mut settings = Settings::default();
    settings
        .keybindings
        .insert(CLOSE_DIALOG.into(), vec!["Hyper+Q".into(), "Alt+F4".into()]);
    let kb = settings.keybindings();
    assert_eq!(
        kb.get(CLOSE_DIALOG),
        &[KeyCombo {
            key: Key::F4,
            ctrl: false,
            shift: false,
            alt: true,
        }]
    );
}
