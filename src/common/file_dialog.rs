use std::path::PathBuf;

#[cfg(target_os = "windows")]
pub use rfd::FileDialog;

#[cfg(not(target_os = "windows"))]
pub struct FileDialog;

#[cfg(not(target_os = "windows"))]
impl FileDialog {
    pub fn new() -> Self { FileDialog }
    pub fn set_title(self, _title: &str) -> Self { self }
    pub fn add_filter(self, _name: &str, _exts: &[&str]) -> Self { self }
    pub fn pick_file(self) -> Option<PathBuf> { None }
}

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Source of file paths chosen by the user.
pub trait FilePicker {
    fn pick_image(&mut self) -> Option<PathBuf>;
}

/// Native open-file dialog.
#[derive(Default)]
pub struct NativeFilePicker;

impl FilePicker for NativeFilePicker {
    fn pick_image(&mut self) -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Select background image")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
    }
}
