//! Form-encoded request payloads.
//!
//! # Design
//! - Preserve field order and duplicates exactly as the form produced them.
//! - Encode as `application/x-www-form-urlencoded`.

use thiserror::Error;

/// Content type for encoded payloads.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Decoding failure for an encoded payload.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// A percent-escape did not produce UTF-8.
    #[error("form field is not valid utf-8 after decoding")]
    InvalidEncoding {
        /// Raw, still-encoded pair that failed.
        pair: String,
    },
}

/// Ordered name/value pairs sent as the request body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormPayload {
    fields: Vec<(String, String)>,
}

impl FormPayload {
    /// Payload from existing pairs.
    #[must_use]
    pub fn from_entries(entries: Vec<(String, String)>) -> Self {
        Self { fields: entries }
    }

    /// Append one field.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// All fields in order.
    #[must_use]
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// First value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the payload carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Encode as a urlencoded body.
    #[must_use]
    pub fn encode(&self) -> String {
        self.fields
            .iter()
            .map(|(name, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(name),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Parse a urlencoded body (`+` is read as a space).
    ///
    /// # Errors
    /// Returns [`PayloadError::InvalidEncoding`] when a percent-escape is not UTF-8.
    pub fn parse(encoded: &str) -> Result<Self, PayloadError> {
        let mut payload = Self::default();
        for pair in encoded.split('&').filter(|pair| !pair.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            let invalid = || PayloadError::InvalidEncoding {
                pair: pair.to_string(),
            };
            payload.push(
                decode_component(name).ok_or_else(invalid)?,
                decode_component(value).ok_or_else(invalid)?,
            );
        }
        Ok(payload)
    }
}

fn decode_component(raw: &str) -> Option<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .ok()
        .map(|value| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_escapes_reserved_characters() {
        let mut payload = FormPayload::default();
        payload.push("titel", "Software Tester & QA");
        payload.push("refnr", "10000-1=2");
        assert_eq!(
            payload.encode(),
            "titel=Software%20Tester%20%26%20QA&refnr=10000-1%3D2"
        );
    }

    #[test]
    fn parse_reads_plus_as_space_and_keeps_duplicates() -> Result<(), PayloadError> {
        let payload = FormPayload::parse("q=job+offer&tag=a&tag=b&flag")?;
        assert_eq!(
            payload.fields(),
            &[
                ("q".to_string(), "job offer".to_string()),
                ("tag".to_string(), "a".to_string()),
                ("tag".to_string(), "b".to_string()),
                ("flag".to_string(), String::new()),
            ]
        );
        assert_eq!(payload.get("tag"), Some("a"));
        Ok(())
    }

    #[test]
    fn parse_rejects_invalid_utf8() {
        assert_eq!(
            FormPayload::parse("name=%FF"),
            Err(PayloadError::InvalidEncoding {
                pair: "name=%FF".into()
            })
        );
    }

    #[test]
    fn empty_payload_encodes_to_empty_body() {
        let payload = FormPayload::default();
        assert!(payload.is_empty());
        assert_eq!(payload.encode(), "");
        assert_eq!(FormPayload::parse(""), Ok(payload));
    }
}
