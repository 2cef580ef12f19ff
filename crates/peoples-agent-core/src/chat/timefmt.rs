use chrono::{DateTime, Utc};

/// Coarsest-unit age of a message: days, then hours, then minutes, then
/// "just now". Largest applicable unit wins.
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - timestamp).num_seconds().max(0);
    let days = elapsed / 86_400;
    if days > 0 {
        return format!("{days}d ago");
    }
    let hours = elapsed / 3_600;
    if hours > 0 {
        return format!("{hours}h ago");
    }
    let minutes = elapsed / 60;
    if minutes > 0 {
        return format!("{minutes}m ago");
    }
    "just now".to_string()
}
