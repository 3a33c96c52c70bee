/// Notification content shared between the launcher and the overlay

pub const DEFAULT_TITLE: &str = "FlipClip";
pub const DEFAULT_DURATION_SECS: f64 = 2.0;

/// What a single overlay shows and for how long.
///
/// Built once from the startup parameters and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationContent {
    /// Bold first line
    pub title: String,

    /// Secondary line, omitted from the panel when empty
    pub message: String,

    /// Seconds the panel stays fully visible before fading.
    /// Zero or negative values are accepted and fade right away.
    pub duration: f64,
}

impl Default for NotificationContent {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            message: String::new(),
            duration: DEFAULT_DURATION_SECS,
        }
    }
}

impl NotificationContent {
    pub fn new(title: impl Into<String>, message: impl Into<String>, duration: f64) -> Self {
        Self { title: title.into(), message: message.into(), duration }
    }

    /// Substitute defaults for missing positional parameters
    pub fn from_params(title: Option<String>, message: Option<String>, duration: Option<&str>) -> Self {
        Self {
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            message: message.unwrap_or_default(),
            duration: duration.map(parse_duration).unwrap_or(DEFAULT_DURATION_SECS),
        }
    }

    pub fn has_message(&self) -> bool {
        !self.message.is_empty()
    }

    /// Positional arguments that reproduce this content when passed to the
    /// overlay binary
    pub fn to_args(&self) -> [String; 3] {
        [self.title.clone(), self.message.clone(), self.duration.to_string()]
    }
}

/// Parse a duration in seconds, falling back to the default when the value
/// is not a number. Out-of-range values (zero, negative) are kept as-is.
pub fn parse_duration(raw: &str) -> f64 {
    raw.parse::<f64>().unwrap_or(DEFAULT_DURATION_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_params() {
        let content = NotificationContent::from_params(None, None, None);

        assert_eq!(content.title, "FlipClip");
        assert_eq!(content.message, "");
        assert_eq!(content.duration, 2.0);
        assert_eq!(content, NotificationContent::default());
    }

    #[test]
    fn test_title_only() {
        let content = NotificationContent::from_params(Some("Copied".to_string()), None, None);

        assert_eq!(content.title, "Copied");
        assert!(!content.has_message());
        assert_eq!(content.duration, 2.0);
    }

    #[test]
    fn test_parse_duration_valid() {
        assert_eq!(parse_duration("0.1"), 0.1);
        assert_eq!(parse_duration("3"), 3.0);
    }

    #[test]
    fn test_parse_duration_malformed_falls_back() {
        assert_eq!(parse_duration("abc"), 2.0);
        assert_eq!(parse_duration(""), 2.0);
        assert_eq!(parse_duration(" 1.5"), 2.0);
    }

    #[test]
    fn test_parse_duration_keeps_out_of_range_values() {
        assert_eq!(parse_duration("0"), 0.0);
        assert_eq!(parse_duration("-1.5"), -1.5);
    }

    #[test]
    fn test_to_args_reparses_to_same_content() {
        let content = NotificationContent::new("Mode: tldr", "Return a 2-sentence summary.", 2.5);
        let [title, message, duration] = content.to_args();

        let parsed = NotificationContent::from_params(Some(title), Some(message), Some(&duration));
        assert_eq!(parsed, content);
    }
}
