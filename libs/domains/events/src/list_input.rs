//! Decoding of list-valued form fields (`tags`, `agenda`).
//!
//! Clients send lists three ways: repeated form fields, one field holding a JSON
//! array, or one field holding comma-separated values. All three decode to the same
//! ordered sequence of trimmed, non-empty strings.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListInput {
    /// Already a sequence, e.g. a repeated multipart field or a JSON array body.
    Array(Vec<String>),
    /// A string whose content is a JSON array.
    JsonString(String),
    /// Comma-separated values.
    CsvString(String),
}

impl ListInput {
    /// Classify the values collected for one form field.
    ///
    /// More than one value is a native sequence. A single value is decoded as a
    /// JSON array when it parses as one, and as CSV otherwise.
    pub fn from_form_values(values: &[String]) -> Self {
        match values {
            [] => Self::Array(Vec::new()),
            [single] => Self::from_text(single),
            many => Self::Array(many.to_vec()),
        }
    }

    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.starts_with('[')
            && serde_json::from_str::<Vec<serde_json::Value>>(trimmed).is_ok()
        {
            Self::JsonString(trimmed.to_string())
        } else {
            Self::CsvString(text.to_string())
        }
    }

    pub fn normalize(self) -> Vec<String> {
        let items = match self {
            Self::Array(items) => items,
            Self::JsonString(raw) => serde_json::from_str::<Vec<serde_json::Value>>(&raw)
                .map(|values| values.into_iter().map(json_item_to_string).collect())
                .unwrap_or_default(),
            Self::CsvString(raw) => raw.split(',').map(String::from).collect(),
        };

        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

/// Also accepted in JSON bodies: either an array or a string in one of the text forms.
impl<'de> Deserialize<'de> for ListInput {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Array(Vec<String>),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Array(items) => Self::Array(items),
            Raw::Text(text) => Self::from_text(&text),
        })
    }
}

fn json_item_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_all_three_forms_decode_identically() {
        let expected = strings(&["rust", "async", "web"]);

        let native = ListInput::from_form_values(&strings(&["rust", "async", "web"]));
        let json = ListInput::from_form_values(&strings(&[r#"["rust","async","web"]"#]));
        let csv = ListInput::from_form_values(&strings(&["rust, async ,web"]));

        assert!(matches!(json, ListInput::JsonString(_)));
        assert!(matches!(csv, ListInput::CsvString(_)));
        assert_eq!(native.normalize(), expected);
        assert_eq!(json.normalize(), expected);
        assert_eq!(csv.normalize(), expected);
    }

    #[test]
    fn test_empty_and_absent_decode_to_empty() {
        assert!(ListInput::from_form_values(&[]).normalize().is_empty());
        assert!(ListInput::from_text("").normalize().is_empty());
        assert!(ListInput::from_text("[]").normalize().is_empty());
        assert!(ListInput::from_text(" , ,").normalize().is_empty());
    }

    #[test]
    fn test_agenda_items_keep_internal_punctuation_in_json_form() {
        let raw = r#"["09:00 AM - 10:00 AM | Keynote, opening", "Lunch"]"#;
        assert_eq!(
            ListInput::from_text(raw).normalize(),
            strings(&["09:00 AM - 10:00 AM | Keynote, opening", "Lunch"])
        );
    }

    #[test]
    fn test_malformed_json_falls_back_to_csv() {
        assert_eq!(
            ListInput::from_text("[rust, web").normalize(),
            strings(&["[rust", "web"])
        );
    }

    #[test]
    fn test_non_string_json_items_are_stringified() {
        assert_eq!(
            ListInput::from_text("[2025, true, \"x\"]").normalize(),
            strings(&["2025", "true", "x"])
        );
    }

    #[test]
    fn test_deserialize_from_json_body() {
        let array: ListInput = serde_json::from_str(r#"["a","b"]"#).unwrap();
        let text: ListInput = serde_json::from_str(r#""a,b""#).unwrap();
        assert_eq!(array.normalize(), text.normalize());
    }
}
