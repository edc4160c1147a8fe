mod background_image_prefs;
mod overlay;

pub use background_image_prefs::{
    error_popup_layer, BackgroundImagePreferences, PanelAction, PanelResponse, ERROR_POPUP_ID,
    WINDOW_ID, WINDOW_TITLE,
};
pub use overlay::{overlay_geometry, overlay_tint, OverlayTextures};
