use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::workout::{format_date, parse_date};
use super::{validate_name, Kind, Record};
use crate::shared::errors::CodecError;
use crate::store::codec::{optional_text, required_text, Document, MetadataBuilder, Scalar};
use crate::store::slug::{dated_slug, slugify};

pub const DEFAULT_HABIT_COLOR: &str = "#605dff";

/// A recurring habit. `days` are weekdays counted from Sunday (0) to Saturday (6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub name: String,
    #[serde(default)]
    pub days: Vec<u8>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub completions: Vec<NaiveDate>,
}

fn default_color() -> String {
    DEFAULT_HABIT_COLOR.to_string()
}

impl Habit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            days: Vec::new(),
            color: default_color(),
            completions: Vec::new(),
        }
    }

    /// Whether the habit is scheduled on the weekday of `date`.
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        let weekday = date.weekday().num_days_from_sunday() as u8;
        self.days.contains(&weekday)
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completions.contains(&date)
    }

    /// Adds `date` to the completions or removes it if present. Returns the new state.
    pub fn toggle_completion(&mut self, date: NaiveDate) -> bool {
        if let Some(pos) = self.completions.iter().position(|d| *d == date) {
            self.completions.remove(pos);
            false
        } else {
            self.completions.push(date);
            self.completions.sort_unstable();
            true
        }
    }
}

/// Something done on a particular day. The same name recurs across days, so
/// activities opt out of the duplicate-name query; see
/// `RecordStore::is_duplicate_activity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub date: NaiveDate,
}

/// A saved activity name offered as a quick pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct HabitFrontMatter {
    name: Option<Scalar>,
    days: Option<Vec<Scalar>>,
    color: Option<Scalar>,
    completions: Option<Vec<Scalar>>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ActivityFrontMatter {
    name: Option<Scalar>,
    date: Option<Scalar>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct PresetFrontMatter {
    name: Option<Scalar>,
}

fn decode_days(raw: Option<Vec<Scalar>>) -> Vec<u8> {
    let mut days: Vec<u8> = raw
        .unwrap_or_default()
        .iter()
        .filter_map(Scalar::as_u32)
        .filter(|d| *d <= 6)
        .map(|d| d as u8)
        .collect();
    days.sort_unstable();
    days.dedup();
    days
}

fn decode_completions(raw: Option<Vec<Scalar>>) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|s| NaiveDate::parse_from_str(s.into_string().trim(), "%Y-%m-%d").ok())
        .collect();
    dates.sort_unstable();
    dates.dedup();
    dates
}

impl Record for Habit {
    const KIND: Kind = Kind::Habit;

    fn id(&self) -> String {
        slugify(&self.name)
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        match self.days.iter().find(|d| **d > 6) {
            Some(day) => Err(format!("day {} is outside 0..=6", day)),
            None => Ok(()),
        }
    }

    fn from_document(doc: Document) -> Result<Self, CodecError> {
        let fm: HabitFrontMatter = doc.fields()?;
        let color = optional_text(fm.color);
        Ok(Self {
            name: required_text(fm.name, "name")?,
            days: decode_days(fm.days),
            color: if color.trim().is_empty() {
                default_color()
            } else {
                color
            },
            completions: decode_completions(fm.completions),
        })
    }

    fn to_document(&self) -> Result<Document, CodecError> {
        let completions: Vec<String> = self.completions.iter().copied().map(format_date).collect();
        Ok(MetadataBuilder::new()
            .text("name", &self.name)
            .sequence("days", &self.days)?
            .text("color", &self.color)
            .sequence("completions", &completions)?
            .finish(""))
    }
}

impl Record for Activity {
    const KIND: Kind = Kind::Activity;

    fn id(&self) -> String {
        dated_slug(self.date, &self.name)
    }

    fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)
    }

    fn from_document(doc: Document) -> Result<Self, CodecError> {
        let fm: ActivityFrontMatter = doc.fields()?;
        Ok(Self {
            name: required_text(fm.name, "name")?,
            date: parse_date(fm.date, "date")?,
        })
    }

    fn to_document(&self) -> Result<Document, CodecError> {
        Ok(MetadataBuilder::new()
            .text("name", &self.name)
            .text("date", &format_date(self.date))
            .finish(""))
    }
}

impl Record for Preset {
    const KIND: Kind = Kind::Preset;

    fn id(&self) -> String {
        slugify(&self.name)
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)
    }

    fn from_document(doc: Document) -> Result<Self, CodecError> {
        let fm: PresetFrontMatter = doc.fields()?;
        Ok(Self {
            name: required_text(fm.name, "name")?,
        })
    }

    fn to_document(&self) -> Result<Document, CodecError> {
        Ok(MetadataBuilder::new().text("name", &self.name).finish(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::codec::{decode, encode};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_habit_round_trip() {
        let habit = Habit {
            name: "Read".to_string(),
            days: vec![1, 3, 5],
            color: "#ff0000".to_string(),
            completions: vec![date(2024, 3, 1), date(2024, 3, 4)],
        };
        let text = encode(&habit).unwrap();
        let decoded: Habit = decode(text.as_bytes()).unwrap();
        assert_eq!(decoded, habit);
    }

    #[test]
    fn test_habit_defaults() {
        let habit: Habit = decode(b"---\nname: Stretch\n---\n").unwrap();
        assert!(habit.days.is_empty());
        assert_eq!(habit.color, DEFAULT_HABIT_COLOR);
        assert!(habit.completions.is_empty());
    }

    #[test]
    fn test_habit_color_always_written() {
        let text = encode(&Habit::new("Stretch")).unwrap();
        assert!(text.contains("color:"));
        assert!(text.contains("#605dff"));
        assert!(!text.contains("days"));
        assert!(!text.contains("completions"));
    }

    #[test]
    fn test_habit_decode_drops_bad_entries() {
        let doc = b"---
name: Run
days: [0, 6, 7, '2', -1, 6]
completions: ['2024-03-01', not-a-date, '2024-02-30', '2024-02-29']
---
";
        let habit: Habit = decode(doc).unwrap();
        assert_eq!(habit.days, vec![0, 2, 6]);
        assert_eq!(habit.completions, vec![date(2024, 2, 29), date(2024, 3, 1)]);
    }

    #[test]
    fn test_habit_validate_rejects_bad_day() {
        let mut habit = Habit::new("Run");
        habit.days = vec![1, 9];
        assert!(habit.validate().is_err());
    }

    #[test]
    fn test_habit_toggle_completion() {
        let mut habit = Habit::new("Read");
        assert!(habit.toggle_completion(date(2024, 3, 2)));
        assert!(habit.toggle_completion(date(2024, 3, 1)));
        assert_eq!(habit.completions, vec![date(2024, 3, 1), date(2024, 3, 2)]);
        assert!(!habit.toggle_completion(date(2024, 3, 2)));
        assert!(habit.is_completed_on(date(2024, 3, 1)));
        assert!(!habit.is_completed_on(date(2024, 3, 2)));
    }

    #[test]
    fn test_habit_is_due_on() {
        let mut habit = Habit::new("Gym");
        habit.days = vec![0, 3];
        // 2024-03-03 is a Sunday
        assert!(habit.is_due_on(date(2024, 3, 3)));
        assert!(habit.is_due_on(date(2024, 3, 6)));
        assert!(!habit.is_due_on(date(2024, 3, 4)));
    }

    #[test]
    fn test_activity_identity() {
        let activity = Activity {
            name: "Morning Run".to_string(),
            date: date(2024, 3, 1),
        };
        assert_eq!(activity.id(), "20240301-morning-run");
        assert_eq!(activity.name(), None);
        let decoded: Activity = decode(encode(&activity).unwrap().as_bytes()).unwrap();
        assert_eq!(decoded, activity);
    }

    #[test]
    fn test_activity_requires_date() {
        assert!(matches!(
            decode::<Activity>(b"---\nname: Walk\n---\n"),
            Err(CodecError::MissingField("date"))
        ));
    }

    #[test]
    fn test_preset_round_trip() {
        let preset = Preset {
            name: "Yoga".to_string(),
        };
        assert_eq!(encode(&preset).unwrap(), "---\nname: Yoga\n---\n");
        assert_eq!(preset.id(), "yoga");
    }
}
