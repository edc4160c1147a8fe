use anyhow::Context;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Key under which the background images are stored in a board's config file.
pub const CONFIG_KEY: &str = "background_image";

/// One overlay image drawn behind a board side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub path: PathBuf,
    pub offset_x: i32,
    pub offset_y: i32,
    pub scaling_x: f32,
    pub scaling_y: f32,
    /// Flip horizontally.
    pub mirror_x: bool,
    /// Flip vertically.
    pub mirror_y: bool,
    /// `0.0` is opaque, `1.0` is invisible.
    pub transparency: f32,
    #[serde(skip)]
    pixels: Option<Arc<RgbaImage>>,
}

impl Default for Image {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            offset_x: 0,
            offset_y: 0,
            scaling_x: 1.0,
            scaling_y: 1.0,
            mirror_x: false,
            mirror_y: false,
            transparency: 0.0,
            pixels: None,
        }
    }
}

impl Image {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Decode the file at `path` again.
    ///
    /// An empty path unloads the image and succeeds. On failure the previous
    /// pixels are dropped and the error message names the file.
    pub fn reload(&mut self) -> anyhow::Result<()> {
        self.pixels = None;
        if self.path.as_os_str().is_empty() {
            return Ok(());
        }
        let img = image::open(&self.path)
            .with_context(|| format!("{}", self.path.display()))?;
        let rgba = img.to_rgba8();
        tracing::debug!(
            "loaded background image {} ({}x{})",
            self.path.display(),
            rgba.width(),
            rgba.height()
        );
        self.pixels = Some(Arc::new(rgba));
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.pixels.is_some()
    }

    pub fn pixels(&self) -> Option<&Arc<RgbaImage>> {
        self.pixels.as_ref()
    }

    /// Pixel size of the decoded image, if any.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.pixels.as_ref().map(|p| p.dimensions())
    }
}

/// Top and bottom overlay images of a board plus the config file they are
/// persisted to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackgroundImage {
    #[serde(default)]
    pub top_image: Image,
    #[serde(default)]
    pub bottom_image: Image,
    #[serde(skip)]
    pub config_filepath: PathBuf,
}

/// Config file associated with a board file: same name with a `conf` extension.
pub fn config_path_for_board(board: &Path) -> PathBuf {
    board.with_extension("conf")
}

/// Contents of a config file; a missing file reads as empty.
fn read_config_text(path: &Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

fn format_error(err: &anyhow::Error) -> String {
    format!("{err:#}")
}

impl BackgroundImage {
    /// Reload both images, returning one message per file that failed.
    pub fn reload(&mut self) -> Vec<String> {
        let mut errors = Vec::new();
        for image in [&mut self.top_image, &mut self.bottom_image] {
            if let Err(e) = image.reload() {
                errors.push(format_error(&e));
            }
        }
        errors
    }

    /// Read the background settings stored in `path`.
    ///
    /// A missing or empty file, or one without background settings, yields
    /// defaults. Any other read failure is an error. The returned value
    /// remembers `path` as its config file. Images are not decoded; call
    /// [`BackgroundImage::reload`] afterwards.
    pub fn read_from_config(path: &Path) -> anyhow::Result<Self> {
        let content = read_config_text(path)?;
        let mut bg = if content.trim().is_empty() {
            Self::default()
        } else {
            let mut root: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?;
            match root.get_mut(CONFIG_KEY).map(serde_json::Value::take) {
                Some(value) => serde_json::from_value(value)
                    .with_context(|| format!("reading {CONFIG_KEY} from {}", path.display()))?,
                None => Self::default(),
            }
        };
        bg.config_filepath = path.to_path_buf();
        Ok(bg)
    }

    /// Store both images' settings under [`CONFIG_KEY`] in `path`, keeping
    /// every other entry already present in the file. A file that exists but
    /// cannot be read or parsed is left untouched and an error returned.
    pub fn write_to_config(&self, path: &Path) -> anyhow::Result<()> {
        let content = read_config_text(path)?;
        let mut root = if content.trim().is_empty() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?
        };
        let obj = root
            .as_object_mut()
            .ok_or_else(|| anyhow::anyhow!("{} is not a JSON object", path.display()))?;
        obj.insert(CONFIG_KEY.into(), serde_json::to_value(self)?);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(&root)?)?;
        tracing::info!("saved background image settings to {}", path.display());
        Ok(())
    }
}
