use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::{validate_name, Kind, Record};
use crate::shared::errors::CodecError;
use crate::store::codec::{optional_text, required_text, Document, MetadataBuilder, Scalar};
use crate::store::slug::{slugify, timestamp_id};

const TIME_FORMATS: [&str; 3] = ["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkoutSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    #[serde(default)]
    pub sets: Vec<WorkoutSet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseGroup {
    pub name: String,
    #[serde(default)]
    pub rest_seconds: u32,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// A logged session, identified by when it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub date: NaiveDate,
    #[serde(with = "time_format")]
    pub time: NaiveTime,
    #[serde(default)]
    pub groups: Vec<ExerciseGroup>,
    #[serde(default)]
    pub content: String,
}

/// A named, reusable set of exercise groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    pub name: String,
    #[serde(default)]
    pub groups: Vec<ExerciseGroup>,
}

// Raw front matter. Everything below `groups` is decoded leniently so a
// hand-edited file with a stray value still loads.

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawSet {
    reps: Option<Scalar>,
    weight: Option<Scalar>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawExercise {
    name: Option<Scalar>,
    sets: Option<Vec<RawSet>>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawGroup {
    name: Option<Scalar>,
    rest_seconds: Option<Scalar>,
    exercises: Option<Vec<RawExercise>>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct WorkoutFrontMatter {
    date: Option<Scalar>,
    time: Option<Scalar>,
    groups: Option<Vec<RawGroup>>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TemplateFrontMatter {
    name: Option<Scalar>,
    groups: Option<Vec<RawGroup>>,
}

impl From<RawSet> for WorkoutSet {
    fn from(raw: RawSet) -> Self {
        Self {
            reps: raw.reps.as_ref().and_then(Scalar::as_u32),
            weight: raw.weight.as_ref().and_then(Scalar::as_f64),
        }
    }
}

impl From<RawExercise> for Exercise {
    fn from(raw: RawExercise) -> Self {
        Self {
            name: optional_text(raw.name),
            sets: raw
                .sets
                .unwrap_or_default()
                .into_iter()
                .map(WorkoutSet::from)
                .collect(),
        }
    }
}

impl From<RawGroup> for ExerciseGroup {
    fn from(raw: RawGroup) -> Self {
        Self {
            name: optional_text(raw.name),
            rest_seconds: raw.rest_seconds.as_ref().and_then(Scalar::as_u32).unwrap_or(0),
            exercises: raw
                .exercises
                .unwrap_or_default()
                .into_iter()
                .map(Exercise::from)
                .collect(),
        }
    }
}

fn decode_groups(raw: Option<Vec<RawGroup>>) -> Vec<ExerciseGroup> {
    raw.unwrap_or_default()
        .into_iter()
        .map(ExerciseGroup::from)
        .collect()
}

pub(crate) fn parse_date(value: Option<Scalar>, field: &'static str) -> Result<NaiveDate, CodecError> {
    let text = required_text(value, field)?;
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| CodecError::invalid(field, text))
}

/// Parses a time of day. Fractional seconds are dropped, since ids and files
/// only carry whole seconds.
fn parse_time_text(text: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(text.trim(), format).ok())
        .map(|time| time.with_nanosecond(0).unwrap_or(time))
}

fn parse_time(value: Option<Scalar>) -> Result<NaiveTime, CodecError> {
    let text = required_text(value, "time")?;
    parse_time_text(&text).ok_or_else(|| CodecError::invalid("time", text))
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

impl Record for Workout {
    const KIND: Kind = Kind::Workout;

    fn id(&self) -> String {
        timestamp_id(self.date, self.time)
    }

    fn validate(&self) -> Result<(), String> {
        if self.time.nanosecond() != 0 {
            return Err(format!("time {} has fractional seconds", self.time));
        }
        Ok(())
    }

    fn from_document(doc: Document) -> Result<Self, CodecError> {
        let fm: WorkoutFrontMatter = doc.fields()?;
        Ok(Self {
            date: parse_date(fm.date, "date")?,
            time: parse_time(fm.time)?,
            groups: decode_groups(fm.groups),
            content: doc.body,
        })
    }

    fn to_document(&self) -> Result<Document, CodecError> {
        Ok(MetadataBuilder::new()
            .text("date", &format_date(self.date))
            .text("time", &format_time(self.time))
            .sequence("groups", &self.groups)?
            .finish(&self.content))
    }
}

impl Record for WorkoutTemplate {
    const KIND: Kind = Kind::Template;

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
        let fm: TemplateFrontMatter = doc.fields()?;
        Ok(Self {
            name: required_text(fm.name, "name")?,
            groups: decode_groups(fm.groups),
        })
    }

    fn to_document(&self) -> Result<Document, CodecError> {
        Ok(MetadataBuilder::new()
            .text("name", &self.name)
            .sequence("groups", &self.groups)?
            .finish(""))
    }
}

mod time_format {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_time_text(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time: {}", text)))
    }
}
