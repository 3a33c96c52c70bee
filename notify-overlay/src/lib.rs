use anyhow::{anyhow, Result};
use iced::{time, Color, Element, Task};
use iced_layershell::build_pattern::application;
use iced_layershell::to_layer_message;
use notify_types::NotificationContent;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

pub mod animation;
pub mod display;
pub mod layout;
pub mod presentation;
pub mod sequencer;
pub mod surface;
pub mod surface_layout;

use layout::PanelGeometry;
use sequencer::{FadeSequencer, Phase};
use surface::Surface;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Set up the stderr log subscriber from `FLIPCLIP_LOG`
pub fn init_logging() {
    let log_level = std::env::var("FLIPCLIP_LOG").unwrap_or_else(|_| "error".to_string()).to_lowercase();

    let filter = match log_level.as_str() {
        "silent" => tracing::Level::ERROR,
        "error" => tracing::Level::ERROR,
        "warning" | "warn" => tracing::Level::WARN,
        "info" => tracing::Level::INFO,
        "debug" => tracing::Level::DEBUG,
        "verbose" | "trace" => tracing::Level::TRACE,
        _ => tracing::Level::ERROR,
    };

    tracing_subscriber::fmt().with_max_level(filter).with_writer(std::io::stderr).init();
}

/// Show one notification and exit the process once it has faded out.
///
/// Only returns on startup failure or if the layer-shell event loop errors.
pub fn run(content: NotificationContent) -> Result<()> {
    let display = display::primary_display()?;
    let geometry = PanelGeometry::anchored(&display.area);
    let surface = surface::compose(&content, &geometry)?;
    let settings = presentation::layer_settings(&geometry, &display);

    info!(
        "Showing '{}' at ({:.0}, {:.0}) with {} text layer(s)",
        content.title,
        geometry.x,
        geometry.y,
        surface.layer_count()
    );

    let duration = content.duration;
    application(namespace, update, view)
        .layer_settings(settings)
        .subscription(subscription)
        .style(style)
        .run_with(move || NotificationOverlay::boot(surface, duration))
        .map_err(|e| anyhow!("Layer shell event loop failed: {e:?}"))
}

struct NotificationOverlay {
    surface: Surface,
    sequencer: FadeSequencer,
}

impl NotificationOverlay {
    fn boot(surface: Surface, duration: f64) -> (Self, Task<Message>) {
        let overlay = Self { surface, sequencer: FadeSequencer::presented(duration) };
        (overlay, Task::perform(async {}, |_| Message::Presented))
    }
}

#[to_layer_message]
#[derive(Debug, Clone)]
enum Message {
    Presented,
    DurationElapsed,
    Tick,
    Exit,
}

fn namespace(_overlay: &NotificationOverlay) -> String {
    String::from(presentation::NAMESPACE)
}

fn subscription(overlay: &NotificationOverlay) -> iced::Subscription<Message> {
    if overlay.sequencer.is_fading() {
        time::every(FRAME_INTERVAL).map(|_| Message::Tick)
    } else {
        iced::Subscription::none()
    }
}

fn update(overlay: &mut NotificationOverlay, message: Message) -> Task<Message> {
    update_at(overlay, message, Instant::now())
}

/// Apply one message with `now` as the current time
fn update_at(overlay: &mut NotificationOverlay, message: Message, now: Instant) -> Task<Message> {
    match message {
        Message::Presented => match overlay.sequencer.arm() {
            Some(delay) => Task::perform(sequencer::wait(delay), |_| Message::DurationElapsed),
            None => Task::none(),
        },

        Message::DurationElapsed => {
            if !overlay.sequencer.begin_fade(now) {
                debug!("UPDATE: Ignoring fade trigger in {:?}", overlay.sequencer.phase());
            }
            Task::none()
        }

        Message::Tick => {
            trace!("UPDATE: Tick ({:?}, opacity: {:.3})", overlay.sequencer.phase(), overlay.sequencer.opacity(now));

            match overlay.sequencer.advance(now) {
                Some(Phase::Terminated) => Task::perform(async {}, |_| Message::Exit),
                _ => Task::none(),
            }
        }

        Message::Exit => {
            info!("EXIT: Notification faded out, exiting");
            std::process::exit(0);
        }

        _ => {
            debug!("UPDATE: Unhandled message");
            Task::none()
        }
    }
}

fn view(overlay: &NotificationOverlay) -> Element<'_, Message> {
    surface::view(&overlay.surface, overlay.sequencer.opacity(Instant::now()))
}

fn style(_overlay: &NotificationOverlay, theme: &iced::Theme) -> iced_layershell::Appearance {
    iced_layershell::Appearance {
        background_color: Color::TRANSPARENT,
        text_color: theme.palette().text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::FADE_OUT_DURATION;
    use crate::layout::DisplayArea;

    fn overlay(duration: f64) -> NotificationOverlay {
        let geometry = PanelGeometry::anchored(&DisplayArea::new(0.0, 0.0, 1920.0, 1080.0));
        let content = NotificationContent::new("Success", "Transformed with tldr", duration);
        let surface = surface::compose(&content, &geometry).unwrap();

        NotificationOverlay::boot(surface, content.duration).0
    }

    #[test]
    fn test_boot_starts_visible() {
        let overlay = overlay(0.1);

        assert_eq!(overlay.sequencer.phase(), Phase::Visible);
        assert!(!overlay.sequencer.is_fading());
    }

    #[test]
    fn test_presented_arms_timer_once() {
        let mut overlay = overlay(0.1);
        let now = Instant::now();

        let _ = update_at(&mut overlay, Message::Presented, now);
        assert_eq!(overlay.sequencer.arm(), None);

        // A repeated presentation must not start a second timer
        let _ = update_at(&mut overlay, Message::Presented, now);
        assert_eq!(overlay.sequencer.phase(), Phase::Visible);
    }

    #[test]
    fn test_message_sequence_reaches_terminated() {
        let mut overlay = overlay(0.1);
        let start = Instant::now();

        let _ = update_at(&mut overlay, Message::Presented, start);
        let fade_at = start + Duration::from_millis(100);
        let _ = update_at(&mut overlay, Message::DurationElapsed, fade_at);
        assert!(overlay.sequencer.is_fading());

        let _ = update_at(&mut overlay, Message::Tick, fade_at + FADE_OUT_DURATION / 2);
        assert!(overlay.sequencer.is_fading());

        let _ = update_at(&mut overlay, Message::Tick, fade_at + FADE_OUT_DURATION);
        assert_eq!(overlay.sequencer.phase(), Phase::Terminated);
        assert_eq!(overlay.sequencer.opacity(fade_at + FADE_OUT_DURATION), 0.0);
    }

    #[test]
    fn test_duration_elapsed_before_presented_is_ignored() {
        let mut overlay = overlay(0.1);
        let now = Instant::now();

        let _ = update_at(&mut overlay, Message::DurationElapsed, now);
        assert_eq!(overlay.sequencer.phase(), Phase::Visible);
        assert_eq!(overlay.sequencer.opacity(now), 1.0);

        // The timer can still be armed by the real presentation
        let _ = update_at(&mut overlay, Message::Presented, now);
        let _ = update_at(&mut overlay, Message::DurationElapsed, now + Duration::from_millis(100));
        assert!(overlay.sequencer.is_fading());
    }

    #[test]
    fn test_tick_while_visible_keeps_panel() {
        let mut overlay = overlay(2.0);
        let now = Instant::now();

        let _ = update_at(&mut overlay, Message::Presented, now);
        let _ = update_at(&mut overlay, Message::Tick, now + Duration::from_secs(5));

        assert_eq!(overlay.sequencer.phase(), Phase::Visible);
    }
}
