use serde::{Deserialize, Serialize};

use super::{validate_name, Kind, Record};
use crate::shared::errors::CodecError;
use crate::store::codec::{optional_text, required_text, Document, MetadataBuilder, Scalar};
use crate::store::slug::slugify;

choice_enum! {
    pub enum MediaCountry {
        #[fallback]
        Undefined => "undefined",
        Korea => "korea",
        Japan => "japan",
        America => "america",
    }
}

choice_enum! {
    pub enum MediaType {
        #[fallback]
        Undefined => "undefined",
        Variety => "variety",
        Drama => "drama",
        Movie => "movie",
        Series => "series",
    }
}

choice_enum! {
    pub enum MediaStatus {
        #[fallback]
        Queued => "queued",
        Watching => "watching",
        Watched => "watched",
    }
}

/// One entry of the watchlist. The body of the file is the review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub name: String,
    pub country: MediaCountry,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub status: MediaStatus,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review: String,
}

impl Media {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: MediaCountry::default(),
            media_type: MediaType::default(),
            status: MediaStatus::default(),
            rating: String::new(),
            review: String::new(),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct MediaFrontMatter {
    name: Option<Scalar>,
    country: Option<Scalar>,
    #[serde(rename = "type")]
    media_type: Option<Scalar>,
    status: Option<Scalar>,
    rating: Option<Scalar>,
}

impl Record for Media {
    const KIND: Kind = Kind::Media;

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
        let fm: MediaFrontMatter = doc.fields()?;
        Ok(Self {
            name: required_text(fm.name, "name")?,
            country: MediaCountry::parse_lenient(&optional_text(fm.country)),
            media_type: MediaType::parse_lenient(&optional_text(fm.media_type)),
            status: MediaStatus::parse_lenient(&optional_text(fm.status)),
            rating: optional_text(fm.rating),
            review: doc.body,
        })
    }

    fn to_document(&self) -> Result<Document, CodecError> {
        Ok(MetadataBuilder::new()
            .text("name", &self.name)
            .text("country", self.country.as_str())
            .text("type", self.media_type.as_str())
            .text("status", self.status.as_str())
            .optional_text("rating", &self.rating)
            .finish(&self.review))
    }
}

/// Selectable values for the media editor. `undefined` is a decode fallback,
/// not something a user picks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValues {
    pub countries: Vec<&'static str>,
    pub types: Vec<&'static str>,
    pub statuses: Vec<&'static str>,
}

impl EnumValues {
    pub fn current() -> Self {
        Self {
            countries: MediaCountry::ALL
                .iter()
                .filter(|c| **c != MediaCountry::Undefined)
                .map(|c| c.as_str())
                .collect(),
            types: MediaType::ALL
                .iter()
                .filter(|t| **t != MediaType::Undefined)
                .map(|t| t.as_str())
                .collect(),
            statuses: MediaStatus::ALL.iter().map(|s| s.as_str()).collect(),
        }
    }
}
