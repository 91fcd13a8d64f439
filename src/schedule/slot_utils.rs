use super::types::ScheduleEntry;

/// Parses a time string (HH:MM) to minutes since midnight
pub fn parse_time_to_minutes(time_str: &str) -> Option<u32> {
    let parts: Vec<&str> = time_str.trim().split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let hours: u32 = parts[0].parse().ok()?;
    let minutes: u32 = parts[1].parse().ok()?;
    if hours >= 24 || minutes >= 60 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Formats minutes since midnight to time string (HH:MM)
pub fn minutes_to_time_string(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    format!("{:02}:{:02}", hours % 24, mins)
}

/// True for labels that already are zero-padded 24-hour "HH:MM".
/// Only such labels sort correctly under string comparison.
pub fn is_time_label(label: &str) -> bool {
    label.len() == 5
        && parse_time_to_minutes(label).is_some_and(|m| minutes_to_time_string(m) == label)
}

/// Rewrites loose input ("9:05", " 21:00 ") into the canonical label.
pub fn normalize_time_label(input: &str) -> Option<String> {
    parse_time_to_minutes(input).map(minutes_to_time_string)
}

/// Orders a day by its time labels using plain string comparison, which
/// matches clock order only for canonical "HH:MM" labels. The sort is stable,
/// so entries sharing a label keep their relative order.
pub fn sort_by_time(entries: &mut [ScheduleEntry]) {
    entries.sort_by(|a, b| a.time.cmp(&b.time));
}

/// Non-decreasing under the same comparison `sort_by_time` uses.
pub fn is_time_ordered(entries: &[ScheduleEntry]) -> bool {
    entries.windows(2).all(|w| w[0].time <= w[1].time)
}
