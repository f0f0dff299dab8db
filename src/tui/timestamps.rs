use chrono::{DateTime, Utc};

/// Format a conversation-pane timestamp. Exchanges happen within one
/// sitting, so entries lead with relative wording and fall back to a dated
/// wall-clock stamp once they are half a day old.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    let elapsed = Utc::now().signed_duration_since(*timestamp);
    let minutes = elapsed.num_minutes();

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if elapsed.num_hours() < 12 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        timestamp.format("%b %-d %H:%M").to_string()
    }
}
