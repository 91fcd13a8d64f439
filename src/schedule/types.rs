use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// One line of a day's itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: String,
    /// "HH:MM", 24-hour, zero-padded. Display label and sort key.
    pub time: String,
    pub title: String,
    #[serde(default, alias = "desc")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub highlight: bool,
}

/// Day-key -> entries, kept in time order except where `move_item` reorders.
pub type ScheduleCollection = BTreeMap<String, Vec<ScheduleEntry>>;

/// An entry as submitted by the presentation layer, before it has an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub time: String,
    pub title: String,
    #[serde(default, alias = "desc")]
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub highlight: bool,
}

impl NewEntry {
    pub fn new(time: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn into_entry(self, id: String) -> ScheduleEntry {
        ScheduleEntry {
            id,
            time: self.time,
            title: self.title,
            description: self.description,
            link: self.link,
            highlight: self.highlight,
        }
    }
}

/// Partial update merged into an existing entry. `None` leaves a field alone;
/// `link: Some(None)` clears the link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPatch {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "desc")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub link: Option<Option<String>>,
    #[serde(default)]
    pub highlight: Option<bool>,
}

// Distinguishes `"link": null` (clear) from a missing `link` (keep).
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl EntryPatch {
    pub fn time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn link(mut self, link: Option<String>) -> Self {
        self.link = Some(link);
        self
    }

    pub fn highlight(mut self, highlight: bool) -> Self {
        self.highlight = Some(highlight);
        self
    }

    /// Whether applying this patch should re-sort the day.
    pub fn sets_time(&self) -> bool {
        self.time.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.link.is_none()
            && self.highlight.is_none()
    }

    /// Merges into `entry`. Blank time or title values are ignored so an
    /// entry never loses its required fields.
    pub fn apply(&self, entry: &mut ScheduleEntry) {
        if let Some(time) = self.time.as_ref().filter(|t| !t.trim().is_empty()) {
            entry.time = time.clone();
        }
        if let Some(title) = self.title.as_ref().filter(|t| !t.trim().is_empty()) {
            entry.title = title.clone();
        }
        if let Some(description) = &self.description {
            entry.description = description.clone();
        }
        if let Some(link) = &self.link {
            entry.link = link.clone();
        }
        if let Some(highlight) = self.highlight {
            entry.highlight = highlight;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Index of the neighbouring slot, or `None` when it would fall off the
    /// front or back of a list of `len` entries.
    pub fn target(self, index: usize, len: usize) -> Option<usize> {
        let target = match self {
            Direction::Up => index.checked_sub(1)?,
            Direction::Down => index.checked_add(1)?,
        };
        (target < len).then_some(target)
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(format!("Invalid direction: {} (expected up or down)", other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Explicit answer to "discard all edits?". Only `Confirmed` resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}
