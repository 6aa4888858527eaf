//! Record kinds and the trait every kind implements.

/// Declares a lowercase categorical field that falls back to a sentinel
/// variant for unknown values instead of failing the decode.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            #[fallback]
            $fallback:ident => $fallback_str:literal,
            $($variant:ident => $str:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            #[default]
            $fallback,
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$name::$fallback, $($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $name::$fallback => $fallback_str,
                    $($name::$variant => $str),+
                }
            }

            /// Case-insensitive; unknown values map to the fallback variant.
            pub fn parse_lenient(value: &str) -> Self {
                let value = value.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(value))
                    .unwrap_or_default()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub mod habit;
pub mod media;
pub mod workout;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::errors::CodecError;
use crate::store::codec::Document;

pub use habit::{Activity, Habit, Preset};
pub use media::{EnumValues, Media, MediaCountry, MediaStatus, MediaType};
pub use workout::{Exercise, ExerciseGroup, Workout, WorkoutSet, WorkoutTemplate};

/// The category of a record. Each kind has its own directory and schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Media,
    Workout,
    Template,
    Habit,
    Activity,
    Preset,
}

impl Kind {
    pub const ALL: [Kind; 6] = [
        Kind::Media,
        Kind::Workout,
        Kind::Template,
        Kind::Habit,
        Kind::Activity,
        Kind::Preset,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Media => "media",
            Kind::Workout => "workout",
            Kind::Template => "template",
            Kind::Habit => "habit",
            Kind::Activity => "activity",
            Kind::Preset => "preset",
        }
    }

    /// Key naming this kind's directory in the configuration file.
    pub fn config_key(self) -> &'static str {
        match self {
            Kind::Media => "media_dir",
            Kind::Workout => "workout_dir",
            Kind::Template => "template_dir",
            Kind::Habit => "habits_dir",
            Kind::Activity => "activities_dir",
            Kind::Preset => "presets_dir",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record persisted as one front-matter document.
///
/// `id` is derived from the identity fields and never stored in the file.
/// Decoding resolves every default, so callers only ever see fixed-shape values.
pub trait Record: Clone + Send + Sync + 'static {
    const KIND: Kind;

    fn id(&self) -> String;

    /// Display name used by the duplicate-name query. Kinds without a name, or
    /// whose names repeat across records, return `None`.
    fn name(&self) -> Option<&str> {
        None
    }

    /// Rejects records whose identity cannot be derived.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    fn from_document(doc: Document) -> Result<Self, CodecError>;

    fn to_document(&self) -> Result<Document, CodecError>;

    /// Wraps the record with its derived id for serialization.
    fn identified(&self) -> Identified<'_, Self>
    where
        Self: Serialize,
    {
        Identified {
            id: self.id(),
            record: self,
        }
    }
}

/// JSON view of a record including its derived id.
#[derive(Debug, Serialize)]
pub struct Identified<'a, R: Serialize> {
    pub id: String,
    #[serde(flatten)]
    pub record: &'a R,
}

pub(crate) fn validate_name(name: &str) -> Result<(), String> {
    if crate::store::slug::has_identity(name) {
        Ok(())
    } else {
        Err(format!("name {:?} has no usable characters", name))
    }
}
