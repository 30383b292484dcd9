use chrono::Duration;

/// Format a nanosecond count with zero-padded units:
/// - Under a minute: "05sec"
/// - Under an hour: "01min 05sec"
/// - Otherwise: "02h 01min 05sec"
///
/// Sub-second remainders are dropped.
pub fn format_nanos(nanos: u64) -> String {
    let duration = Duration::nanoseconds(i64::try_from(nanos).unwrap_or(i64::MAX));
    format_duration(duration)
}

pub fn format_duration(duration: Duration) -> String {
    let hours = duration.num_hours();
    let minutes = duration.num_minutes() % 60;
    let seconds = duration.num_seconds() % 60;

    if hours > 0 {
        format!("{:02}h {:02}min {:02}sec", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{:02}min {:02}sec", minutes, seconds)
    } else {
        format!("{:02}sec", seconds)
    }
}
