pub const PANEL_WIDTH: f64 = 300.0;
pub const PANEL_HEIGHT: f64 = 80.0;
pub const PANEL_MARGIN: f64 = 20.0;

/// Usable rectangle of a display.
///
/// The y axis grows upward, so `max_y` is the top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayArea {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Build from a rectangle in y-down compositor space (Wayland logical
    /// coordinates)
    pub fn from_top_left(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y: -(y + height), width, height }
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }
}

/// Distances from the panel to each display edge: top, right, bottom, left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeInsets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PanelGeometry {
    /// Fixed-size panel in the top-right corner of `area`
    pub fn anchored(area: &DisplayArea) -> Self {
        let (x, y) = compute_position(area, PANEL_WIDTH, PANEL_HEIGHT, PANEL_MARGIN);
        Self { x, y, width: PANEL_WIDTH, height: PANEL_HEIGHT }
    }

    pub fn edge_insets(&self, area: &DisplayArea) -> EdgeInsets {
        EdgeInsets {
            top: area.max_y() - (self.y + self.height),
            right: area.max_x() - (self.x + self.width),
            bottom: self.y - area.y,
            left: self.x - area.x,
        }
    }
}

/// Top-right placement of a panel inside `area`, `margin` away from the
/// right and top edges
pub fn compute_position(
    area: &DisplayArea,
    panel_width: f64,
    panel_height: f64,
    margin: f64,
) -> (f64, f64) {
    (area.max_x() - panel_width - margin, area.max_y() - panel_height - margin)
}
