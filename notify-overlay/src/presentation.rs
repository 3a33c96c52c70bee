// Layer-shell placement for the notification panel.
// The `top` layer sits above regular windows but below fullscreen/lock
// surfaces on the `overlay` layer.

use iced_layershell::reexport::{Anchor, KeyboardInteractivity, Layer};
use iced_layershell::settings::{LayerShellSettings, StartMode};

use crate::display::PrimaryDisplay;
use crate::layout::PanelGeometry;
use crate::surface::SHADOW_PADDING;

/// Namespace the compositor sees; blur rules match on it
pub const NAMESPACE: &str = "flipclip-notification";

/// Margins as (top, right, bottom, left) for a surface anchored top + right.
///
/// The window is larger than the panel by the shadow padding, so the margins
/// shrink by the same amount to keep the panel itself at its computed place.
pub fn anchored_margin(geometry: &PanelGeometry, display: &PrimaryDisplay) -> (i32, i32, i32, i32) {
    let insets = geometry.edge_insets(&display.area);
    let padding = f64::from(SHADOW_PADDING);
    ((insets.top - padding).round() as i32, (insets.right - padding).round() as i32, 0, 0)
}

/// Layer surface size: the panel plus shadow padding on every side
pub fn window_size(geometry: &PanelGeometry) -> (u32, u32) {
    let padding = f64::from(SHADOW_PADDING) * 2.0;
    ((geometry.width + padding).round() as u32, (geometry.height + padding).round() as u32)
}

pub fn layer_settings(geometry: &PanelGeometry, display: &PrimaryDisplay) -> LayerShellSettings {
    let mut settings = LayerShellSettings {
        size: Some(window_size(geometry)),
        anchor: Anchor::Top | Anchor::Right,
        layer: Layer::Top,
        exclusive_zone: 0,
        keyboard_interactivity: KeyboardInteractivity::None,
        margin: anchored_margin(geometry, display),
        ..Default::default()
    };

    if let Some(name) = &display.name {
        settings.start_mode = StartMode::TargetScreen(name.clone());
    }

    settings
}
