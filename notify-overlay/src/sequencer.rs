use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::animation::FadeAnimation;

/// Lifecycle of the single notification shown by this process
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Visible,
    Fading(FadeAnimation),
    Terminated,
}

/// Drives Visible -> Fading -> Terminated.
///
/// A sequencer only exists for a panel that has already been presented, so
/// arming the deferred fade can never precede presentation. Each transition
/// is accepted once and only from the preceding phase.
#[derive(Debug)]
pub struct FadeSequencer {
    phase: Phase,
    delay: Duration,
    armed: bool,
}

impl FadeSequencer {
    /// Record that the panel is on screen. `duration` is the caller-supplied
    /// visible time in seconds.
    pub fn presented(duration: f64) -> Self {
        info!("Notification presented, fading in {:.3}s", duration);
        Self { phase: Phase::Visible, delay: schedule_delay(duration), armed: false }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_fading(&self) -> bool {
        matches!(self.phase, Phase::Fading(_))
    }

    /// Delay for the one-shot deferred action. Returns `None` once armed.
    pub fn arm(&mut self) -> Option<Duration> {
        if self.armed || self.phase != Phase::Visible {
            return None;
        }
        self.armed = true;
        debug!("Fade timer armed for {:?}", self.delay);
        Some(self.delay)
    }

    /// Deferred action fired. Starts the fade if the timer was armed and the
    /// panel is still fully visible.
    pub fn begin_fade(&mut self, now: Instant) -> bool {
        if !self.armed || self.phase != Phase::Visible {
            debug!("Ignoring fade trigger in {:?}", self.phase);
            return false;
        }
        self.phase = Phase::Fading(FadeAnimation::fade_out(now));
        info!("Fade started");
        true
    }

    /// Advance the animation. Returns `Some(Phase::Terminated)` exactly once,
    /// on the tick that completes the fade.
    pub fn advance(&mut self, now: Instant) -> Option<Phase> {
        match self.phase {
            Phase::Fading(fade) if fade.is_complete(now) => {
                self.phase = Phase::Terminated;
                info!("Fade complete");
                Some(Phase::Terminated)
            }
            _ => None,
        }
    }

    pub fn opacity(&self, now: Instant) -> f32 {
        match self.phase {
            Phase::Visible => 1.0,
            Phase::Fading(fade) => fade.current_alpha(now),
            Phase::Terminated => 0.0,
        }
    }
}

/// Convert the visible duration into a timer delay.
///
/// Zero, negative and NaN durations fire immediately; durations too large to
/// represent wait as long as the runtime allows.
pub fn schedule_delay(duration: f64) -> Duration {
    match Duration::try_from_secs_f64(duration) {
        Ok(delay) => delay,
        Err(_) if duration > 0.0 => Duration::MAX,
        Err(_) => Duration::ZERO,
    }
}

/// The deferred action: completes after `delay` on the event loop's runtime
pub async fn wait(delay: Duration) {
    tokio::time::sleep(delay).await;
}
