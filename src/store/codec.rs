//! Front-matter document codec.
//!
//! A document is a `---` line, a YAML mapping, a closing `---` line, a blank
//! line and a free-text body:
//!
//! ```text
//! ---
//! name: Parasite
//! country: korea
//! ---
//!
//! Loved it.
//! ```
//!
//! Text that does not open with a delimiter is treated as a body with empty
//! metadata. Bodies are trimmed on both sides of the codec.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::records::Record;
use crate::shared::errors::CodecError;

const DELIMITER: &str = "---";

/// Parsed but untyped document: metadata mapping plus body text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub metadata: Mapping,
    pub body: String,
}

impl Document {
    pub fn parse(bytes: &[u8]) -> Result<Self, CodecError> {
        let text = std::str::from_utf8(bytes)?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut lines = text.split_inclusive('\n');
        let opens_with_delimiter = lines
            .next()
            .map_or(false, |line| line.trim_end() == DELIMITER);

        if !opens_with_delimiter {
            return Ok(Self {
                metadata: Mapping::new(),
                body: text.trim().to_string(),
            });
        }

        let yaml_start = text.find('\n').map_or(text.len(), |i| i + 1);
        let mut offset = yaml_start;

        for line in lines {
            if line.trim_end() == DELIMITER {
                let metadata = parse_metadata(&text[yaml_start..offset])?;
                let body = text[offset + line.len()..].trim().to_string();
                return Ok(Self { metadata, body });
            }
            offset += line.len();
        }

        Err(CodecError::Unterminated)
    }

    pub fn render(&self) -> Result<String, CodecError> {
        let yaml = serde_yaml::to_string(&self.metadata)?;
        let body = self.body.trim();

        let mut out = String::with_capacity(yaml.len() + body.len() + 16);
        out.push_str(DELIMITER);
        out.push('\n');
        out.push_str(&yaml);
        out.push_str(DELIMITER);
        out.push('\n');
        if !body.is_empty() {
            out.push('\n');
            out.push_str(body);
            out.push('\n');
        }
        Ok(out)
    }

    /// Deserializes the metadata block into a raw front-matter struct.
    pub fn fields<T: DeserializeOwned>(&self) -> Result<T, CodecError> {
        Ok(serde_yaml::from_value(Value::Mapping(self.metadata.clone()))?)
    }
}

fn parse_metadata(yaml: &str) -> Result<Mapping, CodecError> {
    if yaml.trim().is_empty() {
        return Ok(Mapping::new());
    }

    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        _ => Err(CodecError::NotAMapping),
    }
}

/// Decodes a record from document bytes.
pub fn decode<R: Record>(bytes: &[u8]) -> Result<R, CodecError> {
    R::from_document(Document::parse(bytes)?)
}

/// Encodes a record to canonical document text.
pub fn encode<R: Record>(record: &R) -> Result<String, CodecError> {
    record.to_document()?.render()
}

/// Builds a metadata mapping in a fixed key order.
#[derive(Debug, Default)]
pub struct MetadataBuilder {
    mapping: Mapping,
}

impl MetadataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, key: &str, value: &str) -> Self {
        self.mapping.insert(key.into(), value.into());
        self
    }

    /// Omitted when empty.
    pub fn optional_text(self, key: &str, value: &str) -> Self {
        if value.is_empty() {
            self
        } else {
            self.text(key, value)
        }
    }

    /// Omitted when the slice is empty.
    pub fn sequence<T: Serialize>(mut self, key: &str, values: &[T]) -> Result<Self, CodecError> {
        if !values.is_empty() {
            self.mapping.insert(key.into(), serde_yaml::to_value(values)?);
        }
        Ok(self)
    }

    pub fn finish(self, body: &str) -> Document {
        Document {
            metadata: self.mapping,
            body: body.trim().to_string(),
        }
    }
}

/// A loosely typed scalar as hand-edited files contain them: `rating: 10`
/// and `rating: "10"` must both decode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    pub fn into_string(self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Text(s) => s,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Scalar::Int(i) => u32::try_from(*i).ok(),
            Scalar::Float(f) if f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64 => {
                Some(*f as u32)
            }
            Scalar::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(i) => Some(*i as f64),
            Scalar::Float(f) => Some(*f),
            Scalar::Text(s) => s.trim().parse().ok(),
            Scalar::Bool(_) => None,
        }
    }
}

/// Returns the field as text, or `MissingField` when it is absent or blank.
pub fn required_text(value: Option<Scalar>, field: &'static str) -> Result<String, CodecError> {
    let text = value
        .map(Scalar::into_string)
        .ok_or(CodecError::MissingField(field))?;
    if text.trim().is_empty() {
        return Err(CodecError::MissingField(field));
    }
    Ok(text)
}

pub fn optional_text(value: Option<Scalar>) -> String {
    value.map(Scalar::into_string).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_front_matter_and_body() {
        let doc = Document::parse(b"---\nname: Parasite\nrating: 10\n---\n\nGreat film.\n").unwrap();
        assert_eq!(doc.metadata.get("name"), Some(&Value::from("Parasite")));
        assert_eq!(doc.metadata.get("rating"), Some(&Value::from(10u64)));
        assert_eq!(doc.body, "Great film.");
    }

    #[test]
    fn test_parse_without_front_matter_is_body_only() {
        let doc = Document::parse(b"just some notes\n").unwrap();
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, "just some notes");
    }

    #[test]
    fn test_parse_empty_front_matter() {
        let doc = Document::parse(b"---\n---\nbody").unwrap();
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn test_parse_crlf_delimiters() {
        let doc = Document::parse(b"---\r\nname: x\r\n---\r\n\r\nbody\r\n").unwrap();
        assert_eq!(doc.metadata.get("name"), Some(&Value::from("x")));
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn test_parse_strips_bom() {
        let doc = Document::parse("\u{feff}---\nname: x\n---\n".as_bytes()).unwrap();
        assert_eq!(doc.metadata.get("name"), Some(&Value::from("x")));
    }

    #[test]
    fn test_parse_rejects_malformed_documents() {
        assert!(matches!(
            Document::parse(b"---\nname: x\nno closing"),
            Err(CodecError::Unterminated)
        ));
        assert!(matches!(
            Document::parse(b"---\nname: [unclosed\n---\n"),
            Err(CodecError::Yaml(_))
        ));
        assert!(matches!(
            Document::parse(b"---\n- a\n- b\n---\n"),
            Err(CodecError::NotAMapping)
        ));
        assert!(matches!(
            Document::parse(&[b'-', b'-', b'-', b'\n', 0xff, 0xfe]),
            Err(CodecError::Encoding(_))
        ));
    }

    #[test]
    fn test_render_layout() {
        let doc = MetadataBuilder::new()
            .text("name", "Parasite")
            .optional_text("rating", "")
            .finish("  Great film.  ");
        assert_eq!(doc.render().unwrap(), "---\nname: Parasite\n---\n\nGreat film.\n");
    }

    #[test]
    fn test_render_without_body() {
        let doc = MetadataBuilder::new().text("name", "Stretch").finish("");
        assert_eq!(doc.render().unwrap(), "---\nname: Stretch\n---\n");
    }

    #[test]
    fn test_render_then_parse_keeps_document() {
        let doc = MetadataBuilder::new()
            .text("name", "Leg Day: heavy")
            .sequence("days", &[1u8, 3, 5])
            .unwrap()
            .finish("line one\n\nline two");
        let parsed = Document::parse(doc.render().unwrap().as_bytes()).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(Scalar::Int(10).into_string(), "10");
        assert_eq!(Scalar::Float(8.5).into_string(), "8.5");
        assert_eq!(Scalar::Text("12".into()).as_u32(), Some(12));
        assert_eq!(Scalar::Float(3.0).as_u32(), Some(3));
        assert_eq!(Scalar::Float(3.5).as_u32(), None);
        assert_eq!(Scalar::Int(-1).as_u32(), None);
        assert_eq!(Scalar::Int(60).as_f64(), Some(60.0));
        assert_eq!(Scalar::Bool(true).as_f64(), None);
    }

    #[test]
    fn test_required_text() {
        assert_eq!(required_text(Some(Scalar::Int(2046)), "name").unwrap(), "2046");
        assert!(matches!(
            required_text(None, "name"),
            Err(CodecError::MissingField("name"))
        ));
        assert!(matches!(
            required_text(Some(Scalar::Text("  ".into())), "name"),
            Err(CodecError::MissingField("name"))
        ));
    }
}
