use keyframe::{ease, functions::*};
use std::time::{Duration, Instant};

/// Length of the fade-out. Independent of how long the panel stays visible.
pub const FADE_OUT_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeAnimation {
    start_time: Instant,
}

impl FadeAnimation {
    pub fn fade_out(start_time: Instant) -> Self {
        Self { start_time }
    }

    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start_time).as_secs_f32();
        (elapsed / FADE_OUT_DURATION.as_secs_f32()).min(1.0)
    }

    /// Opacity at `now`, 1.0 at the start and exactly 0.0 once complete
    pub fn current_alpha(&self, now: Instant) -> f32 {
        if self.is_complete(now) {
            return 0.0;
        }

        let eased_progress = ease(EaseInOutQuad, 0.0f32, 1.0f32, self.progress(now));

        (1.0 - eased_progress).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start_time) >= FADE_OUT_DURATION
    }
}
