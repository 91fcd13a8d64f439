use chrono::NaiveDate;
use serde::Serialize;

pub const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Historical late-November averages shown in each day's header.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Weather {
    pub location: &'static str,
    pub temp_high: i8,
    pub temp_low: i8,
    pub condition: &'static str,
    pub precipitation: u8,
    pub note: &'static str,
}

/// Static header data for one itinerary day.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DayInfo {
    pub key: &'static str,
    pub label: &'static str,
    pub short_date: &'static str,
    pub subtitle: &'static str,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub headline: &'static str,
    pub tags: &'static [&'static str],
    pub accommodation: Option<&'static str>,
    pub weather: Weather,
}

impl DayInfo {
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

pub static DAYS: [DayInfo; 5] = [
    DayInfo {
        key: "day1",
        label: "DAY 1",
        short_date: "11/29",
        subtitle: "啟程",
        year: 2025,
        month: 11,
        day: 29,
        headline: "啟程・前往京都",
        tags: &["移動日", "Haruka 特急", "清水寺住宿"],
        accommodation: Some("RESI STAY 五条坂 (清水寺山腳)"),
        weather: Weather {
            location: "Kyoto",
            temp_high: 15,
            temp_low: 7,
            condition: "Sunny",
            precipitation: 10,
            note: "早晚溫差大，建議洋蔥式穿搭",
        },
    },
    DayInfo {
        key: "day2",
        label: "DAY 2",
        short_date: "11/30",
        subtitle: "清水寺",
        year: 2025,
        month: 11,
        day: 30,
        headline: "京都：清水寺 & 祇園",
        tags: &["早起避人潮", "千年古都", "錦市場"],
        accommodation: Some("RESI STAY 五条坂"),
        weather: Weather {
            location: "Kyoto",
            temp_high: 14,
            temp_low: 5,
            condition: "Partly Cloudy",
            precipitation: 20,
            note: "清晨山區較冷，必備圍巾",
        },
    },
    DayInfo {
        key: "day3",
        label: "DAY 3",
        short_date: "12/01",
        subtitle: "嵐山",
        year: 2025,
        month: 12,
        day: 1,
        headline: "嵐山・teamLab・移動至大阪",
        tags: &["竹林小徑", "teamLab", "搬家到大阪"],
        accommodation: Some("The OneFive Osaka Namba"),
        weather: Weather {
            location: "Arashiyama",
            temp_high: 13,
            temp_low: 6,
            condition: "Cloudy",
            precipitation: 30,
            note: "嵐山風大，建議戴帽子",
        },
    },
    DayInfo {
        key: "day4",
        label: "DAY 4",
        short_date: "12/02",
        subtitle: "箕面",
        year: 2025,
        month: 12,
        day: 2,
        headline: "箕面勝尾寺・梅田購物・夜景",
        tags: &["勝尾寺達摩", "箕面瀑布", "百貨公司"],
        accommodation: Some("The OneFive Osaka Namba"),
        weather: Weather {
            location: "Minoh (Osaka)",
            temp_high: 14,
            temp_low: 6,
            condition: "Sunny",
            precipitation: 0,
            note: "適合健行的乾爽好天氣",
        },
    },
    DayInfo {
        key: "day5",
        label: "DAY 5",
        short_date: "12/03",
        subtitle: "返台",
        year: 2025,
        month: 12,
        day: 3,
        headline: "大阪城・黑門市場・返台",
        tags: &["大阪城", "黑門市場", "回家"],
        accommodation: None,
        weather: Weather {
            location: "Osaka",
            temp_high: 16,
            temp_low: 8,
            condition: "Sunny",
            precipitation: 10,
            note: "市區溫暖，舒適的移動日",
        },
    },
];

pub fn day_keys() -> impl Iterator<Item = &'static str> {
    DAYS.iter().map(|d| d.key)
}

pub fn day_info(key: &str) -> Option<&'static DayInfo> {
    DAYS.iter().find(|d| d.key == key)
}

pub fn is_known_day(key: &str) -> bool {
    day_info(key).is_some()
}

pub fn next_day(key: &str) -> Option<&'static str> {
    let pos = DAYS.iter().position(|d| d.key == key)?;
    DAYS.get(pos + 1).map(|d| d.key)
}

pub fn previous_day(key: &str) -> Option<&'static str> {
    let pos = DAYS.iter().position(|d| d.key == key)?;
    pos.checked_sub(1).map(|p| DAYS[p].key)
}

/// Whole days from `today` until departure; negative once the trip started.
pub fn days_until_departure(today: NaiveDate) -> Option<i64> {
    let departure = DAYS[0].date()?;
    Some((departure - today).num_days())
}

/// Map search URL for a place title, e.g. "🦊 Fushimi Inari" ->
/// `...&query=Fushimi+Inari`. Leading emoji and symbols are dropped; each
/// word is percent-encoded and words are joined with '+'.
pub fn maps_search_link(title: &str) -> Option<String> {
    let cleaned = title.trim_start_matches(|c: char| !c.is_alphanumeric());
    let query = cleaned
        .split_whitespace()
        .map(|word| urlencoding::encode(word).into_owned())
        .collect::<Vec<_>>()
        .join("+");
    if query.is_empty() {
        None
    } else {
        Some(format!("{}{}", MAPS_SEARCH_URL, query))
    }
}
