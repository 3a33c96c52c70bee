use anyhow::{anyhow, Result};
use iced::font::Weight;
use iced::widget::{container, text, Column, Space};
use iced::{Background, Border, Color, Element, Font, Length, Padding, Shadow, Vector};
use notify_types::NotificationContent;

use crate::layout::PanelGeometry;
use crate::surface_layout::{Frame, PanelLayout};

const CORNER_RADIUS: f32 = 10.0;
const TITLE_FONT_SIZE: f32 = 16.0;
const MESSAGE_FONT_SIZE: f32 = 13.0;

// Dark HUD tint; the compositor blurs what shows through it
const BACKDROP_TINT: Color = Color { r: 0.11, g: 0.11, b: 0.12, a: 0.72 };
const SHADOW_COLOR: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.35 };
const SHADOW_BLUR: f32 = 12.0;
const MESSAGE_COLOR: Color = Color { r: 0.667, g: 0.667, b: 0.667, a: 1.0 };

/// Transparent border around the panel so the drop shadow is not clipped by
/// the layer surface bounds
pub const SHADOW_PADDING: f32 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backdrop {
    pub corner_radius: f32,
    pub tint: Color,
    pub shadow: Shadow,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub color: Color,
}

/// Read-only label drawn on the backdrop
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayer {
    pub text: String,
    pub frame: Frame,
    pub style: TextStyle,
}

/// Composed panel: translucent backdrop hosting a title and an optional
/// message line
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
    pub backdrop: Backdrop,
    pub title: TextLayer,
    pub message: Option<TextLayer>,
}

impl Surface {
    /// Number of text layers on the panel
    pub fn layer_count(&self) -> usize {
        1 + usize::from(self.message.is_some())
    }

    /// Size of the window hosting the panel, shadow padding included
    pub fn window_size(&self) -> (f32, f32) {
        (self.width + SHADOW_PADDING * 2.0, self.height + SHADOW_PADDING * 2.0)
    }
}

pub fn compose(content: &NotificationContent, geometry: &PanelGeometry) -> Result<Surface> {
    let mut layout = PanelLayout::new(geometry.width as f32, geometry.height as f32, content.has_message())
        .map_err(|e| anyhow!("Failed to build panel layout: {e}"))?;
    layout.compute().map_err(|e| anyhow!("Failed to compute panel layout: {e}"))?;
    let (width, height) = layout.panel_size().map_err(|e| anyhow!("Missing panel size: {e}"))?;

    let title = TextLayer {
        text: content.title.clone(),
        frame: layout.title_frame().map_err(|e| anyhow!("Missing title frame: {e}"))?,
        style: TextStyle { size: TITLE_FONT_SIZE, bold: true, color: Color::WHITE },
    };

    let message = layout
        .message_frame()
        .map_err(|e| anyhow!("Missing message frame: {e}"))?
        .map(|frame| TextLayer {
            text: content.message.clone(),
            frame,
            style: TextStyle { size: MESSAGE_FONT_SIZE, bold: false, color: MESSAGE_COLOR },
        });

    Ok(Surface {
        width,
        height,
        backdrop: Backdrop {
            corner_radius: CORNER_RADIUS,
            tint: BACKDROP_TINT,
            shadow: Shadow {
                color: SHADOW_COLOR,
                offset: Vector::new(0.0, 2.0),
                blur_radius: SHADOW_BLUR,
            },
        },
        title,
        message,
    })
}

/// Render the surface with every color scaled by `opacity`
pub fn view<'a, Message: 'a>(surface: &'a Surface, opacity: f32) -> Element<'a, Message> {
    let mut labels = Column::new().push(Space::with_height(Length::Fixed(surface.title.frame.y)));
    labels = labels.push(label(&surface.title, opacity));

    if let Some(message) = &surface.message {
        let gap = (message.frame.y - surface.title.frame.bottom()).max(0.0);
        labels = labels.push(Space::with_height(Length::Fixed(gap)));
        labels = labels.push(label(message, opacity));
    }

    let backdrop = surface.backdrop;
    let panel = container(labels)
        .width(Length::Fixed(surface.width))
        .height(Length::Fixed(surface.height))
        .padding(Padding { left: surface.title.frame.x, ..Padding::ZERO })
        .style(move |_theme: &iced::Theme| container::Style {
            background: Some(Background::Color(with_alpha(backdrop.tint, opacity))),
            border: Border { radius: backdrop.corner_radius.into(), ..Default::default() },
            shadow: Shadow { color: with_alpha(backdrop.shadow.color, opacity), ..backdrop.shadow },
            ..Default::default()
        });

    let (window_width, window_height) = surface.window_size();
    container(panel)
        .width(Length::Fixed(window_width))
        .height(Length::Fixed(window_height))
        .padding(SHADOW_PADDING)
        .into()
}

fn label<'a, Message: 'a>(layer: &'a TextLayer, opacity: f32) -> Element<'a, Message> {
    let font = if layer.style.bold { Font { weight: Weight::Bold, ..Font::DEFAULT } } else { Font::DEFAULT };

    text(&layer.text)
        .size(layer.style.size)
        .font(font)
        .color(with_alpha(layer.style.color, opacity))
        .width(Length::Fixed(layer.frame.width))
        .height(Length::Fixed(layer.frame.height))
        .into()
}

fn with_alpha(color: Color, opacity: f32) -> Color {
    Color { a: color.a * opacity.clamp(0.0, 1.0), ..color }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{DisplayArea, PanelGeometry};

    fn geometry() -> PanelGeometry {
        PanelGeometry::anchored(&DisplayArea::new(0.0, 0.0, 1920.0, 1080.0))
    }

    #[test]
    fn test_compose_with_message() {
        let content = NotificationContent::new("Success", "Transformed with tldr", 2.0);
        let surface = compose(&content, &geometry()).unwrap();

        assert_eq!(surface.layer_count(), 2);
        assert_eq!(surface.title.text, "Success");
        assert!(surface.title.style.bold);
        assert_eq!(surface.title.style.size, 16.0);
        assert_eq!(surface.title.style.color, Color::WHITE);

        let message = surface.message.unwrap();
        assert_eq!(message.text, "Transformed with tldr");
        assert!(!message.style.bold);
        assert_eq!(message.style.size, 13.0);
        assert_eq!(message.frame.width, 260.0);
        assert_eq!(message.frame.height, 20.0);
    }

    #[test]
    fn test_empty_message_has_no_layer() {
        let content = NotificationContent::new("Processing...", "", 1.0);
        let surface = compose(&content, &geometry()).unwrap();

        assert!(surface.message.is_none());
        assert_eq!(surface.layer_count(), 1);
    }

    #[test]
    fn test_panel_size_independent_of_message() {
        let with = compose(&NotificationContent::new("A", "B", 1.0), &geometry()).unwrap();
        let without = compose(&NotificationContent::new("A", "", 1.0), &geometry()).unwrap();

        assert_eq!((with.width, with.height), (300.0, 80.0));
        assert_eq!((without.width, without.height), (300.0, 80.0));
        assert_eq!(with.title.frame, without.title.frame);
    }

    #[test]
    fn test_window_leaves_room_for_shadow() {
        let surface = compose(&NotificationContent::default(), &geometry()).unwrap();
        let shadow = surface.backdrop.shadow;

        assert_eq!(surface.window_size(), (332.0, 112.0));
        // Blur plus offset must fit inside the padding on every side
        assert!(shadow.blur_radius + shadow.offset.y.abs() <= SHADOW_PADDING);
        assert!(shadow.blur_radius + shadow.offset.x.abs() <= SHADOW_PADDING);
    }

    #[test]
    fn test_backdrop_is_translucent() {
        let surface = compose(&NotificationContent::default(), &geometry()).unwrap();

        assert_eq!(surface.backdrop.corner_radius, 10.0);
        assert!(surface.backdrop.tint.a > 0.0 && surface.backdrop.tint.a < 1.0);
        assert!(surface.backdrop.shadow.blur_radius > 0.0);
    }

    #[test]
    fn test_message_color_is_muted() {
        let content = NotificationContent::new("Mode: bullets", "Return max 5 bullets.", 2.5);
        let surface = compose(&content, &geometry()).unwrap();
        let message = surface.message.unwrap();

        assert!(message.style.color.r < surface.title.style.color.r);
    }

    #[test]
    fn test_with_alpha_scales_and_clamps() {
        let scaled = with_alpha(BACKDROP_TINT, 0.5);
        assert!((scaled.a - BACKDROP_TINT.a * 0.5).abs() < 1e-6);
        assert_eq!(scaled.r, BACKDROP_TINT.r);

        assert_eq!(with_alpha(Color::WHITE, 2.0).a, 1.0);
        assert_eq!(with_alpha(Color::WHITE, 0.0).a, 0.0);
    }
}
