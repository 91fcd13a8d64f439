use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;

use crate::schedule::days::{day_info, DayInfo, DAYS};
use crate::schedule::{ScheduleCollection, ScheduleEntry};

/// Screen output carries the editing handles (slot index, id, raw link);
/// print output drops them and separates days with a page break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Screen,
    Print,
}

pub const PAGE_BREAK: char = '\u{c}';

const DESC_INDENT: &str = "           ";

/// Formats an entry title with the highlight marker
pub fn format_entry_title(entry: &ScheduleEntry) -> String {
    if entry.highlight {
        format!("★ {}", entry.title)
    } else {
        entry.title.clone()
    }
}

fn render_header(out: &mut String, key: &str, info: Option<&DayInfo>) {
    let Some(info) = info else {
        let _ = writeln!(out, "=== {} ===", key);
        return;
    };
    let _ = writeln!(out, "=== {} · {} {} ===", info.label, info.short_date, info.subtitle);
    let _ = writeln!(out, "{}", info.headline);
    let w = &info.weather;
    let _ = writeln!(
        out,
        "{}  {}  {}°/{}°C  rain {}%  {}",
        w.location, w.condition, w.temp_high, w.temp_low, w.precipitation, w.note
    );
    if !info.tags.is_empty() {
        let tags: Vec<String> = info.tags.iter().map(|t| format!("#{}", t)).collect();
        let _ = writeln!(out, "{}", tags.join(" "));
    }
    if let Some(hotel) = info.accommodation {
        let _ = writeln!(out, "Accommodation: {}", hotel);
    }
}

/// Renders one day's header and entries.
pub fn render_day(key: &str, entries: &[ScheduleEntry], mode: RenderMode) -> String {
    let mut out = String::new();
    render_header(&mut out, key, day_info(key));
    out.push('\n');

    if entries.is_empty() {
        let _ = writeln!(out, "  (nothing planned)");
    }

    for (index, entry) in entries.iter().enumerate() {
        let title = format_entry_title(entry);
        match mode {
            RenderMode::Screen => {
                let _ = writeln!(out, "  [{:>2}] {}  {}  (id: {})", index, entry.time, title, entry.id);
            }
            RenderMode::Print => {
                let _ = writeln!(out, "  {}  {}", entry.time, title);
            }
        }
        for line in entry.description.lines().filter(|l| !l.trim().is_empty()) {
            let _ = writeln!(out, "{}{}", DESC_INDENT, line);
        }
        if mode == RenderMode::Screen {
            if let Some(link) = &entry.link {
                let _ = writeln!(out, "{}map: {}", DESC_INDENT, link);
            }
        }
    }
    out
}

/// Known days in itinerary order first, then any extra day-keys.
fn ordered_days(schedule: &ScheduleCollection) -> Vec<&str> {
    let mut keys: Vec<&str> = DAYS
        .iter()
        .map(|d| d.key)
        .filter(|k| schedule.contains_key(*k))
        .collect();
    keys.extend(
        schedule
            .keys()
            .map(String::as_str)
            .filter(|k| day_info(k).is_none()),
    );
    keys
}

/// Renders the whole itinerary.
pub fn render_itinerary(schedule: &ScheduleCollection, mode: RenderMode) -> String {
    let separator = match mode {
        RenderMode::Screen => "\n".to_string(),
        RenderMode::Print => format!("\n{}", PAGE_BREAK),
    };
    ordered_days(schedule)
        .into_iter()
        .map(|key| render_day(key, &schedule[key], mode))
        .collect::<Vec<_>>()
        .join(&separator)
}

/// Writes the print version of the itinerary to a file
pub fn write_itinerary_to_file(
    schedule: &ScheduleCollection,
    filename: &str,
) -> Result<(), std::io::Error> {
    let mut file = File::create(filename)?;
    writeln!(file, "** 2025 京阪紅葉手冊 **")?;
    writeln!(file)?;
    file.write_all(render_itinerary(schedule, RenderMode::Print).as_bytes())?;
    Ok(())
}

/// Prints a day schedule in a readable format
pub fn print_day_schedule(key: &str, entries: &[ScheduleEntry], mode: RenderMode) {
    print!("{}", render_day(key, entries, mode));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::default_schedule;

    #[test]
    fn screen_shows_editing_handles() {
        let schedule = default_schedule();
        let out = render_day("day2", &schedule["day2"], RenderMode::Screen);
        assert!(out.contains("DAY 2 · 11/30"));
        assert!(out.contains("[ 0] 05:30"));
        assert!(out.contains("(id: d2-1)"));
        assert!(out.contains("map: https://www.google.com/maps/search/?api=1&query=Kiyomizu-dera"));
        assert!(out.contains("★ 📸 二三年坂 & 清水寺"));
    }

    #[test]
    fn print_hides_editing_handles() {
        let schedule = default_schedule();
        let out = render_day("day2", &schedule["day2"], RenderMode::Print);
        assert!(out.contains("  05:30  ⏰ 起床梳洗"));
        assert!(!out.contains("[ 0]"));
        assert!(!out.contains("id:"));
        assert!(!out.contains("map:"));
        assert!(out.contains("★ 📸"));
        assert!(out.contains("Accommodation: RESI STAY 五条坂"));
    }

    #[test]
    fn multi_line_descriptions_are_indented() {
        let schedule = default_schedule();
        let out = render_day("day1", &schedule["day1"], RenderMode::Print);
        assert!(out.contains(&format!("{}虎航櫃檯報到 (7號櫃檯)\n{}先去晃晃再進候機室", DESC_INDENT, DESC_INDENT)));
    }

    #[test]
    fn print_itinerary_breaks_pages_between_days() {
        let out = render_itinerary(&default_schedule(), RenderMode::Print);
        assert_eq!(out.matches(PAGE_BREAK).count(), 4);
        let screen = render_itinerary(&default_schedule(), RenderMode::Screen);
        assert!(!screen.contains(PAGE_BREAK));
    }

    #[test]
    fn extra_days_render_after_known_days() {
        let mut schedule = default_schedule();
        schedule.insert("bonus".to_string(), Vec::new());
        let out = render_itinerary(&schedule, RenderMode::Screen);
        let day5 = out.find("DAY 5").unwrap();
        let bonus = out.find("=== bonus ===").unwrap();
        assert!(day5 < bonus);
        assert!(out.contains("(nothing planned)"));
    }

    #[test]
    fn writes_print_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("itinerary.txt");
        write_itinerary_to_file(&default_schedule(), path.to_str().unwrap()).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with("** 2025 京阪紅葉手冊 **"));
        assert!(text.contains("DAY 5"));
    }
}
