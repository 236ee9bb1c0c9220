//! Input records and their JSON decoding.

use crate::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// One node of the word tree as delivered by the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Dot-delimited path from the root (`"ROOT.CHILD.LEAF"`).
    pub id: String,
    /// Playability of the word (percent).
    #[serde(default)]
    pub prob: f64,
    /// Definition text; may contain HTML entities.
    #[serde(default)]
    pub def: String,
    /// Letters stolen from the parent word.
    #[serde(default)]
    pub shortsteal: String,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prob: 0.0,
            def: String::new(),
            shortsteal: String::new(),
        }
    }

    /// Substring before the last dot, or `None` for a root id.
    pub fn parent_id(&self) -> Option<&str> {
        self.id.rfind('.').map(|i| &self.id[..i])
    }

    /// Last segment of the id.
    pub fn word(&self) -> &str {
        match self.id.rfind('.') {
            Some(i) => &self.id[i + 1..],
            None => &self.id,
        }
    }

    /// Number of dot separators in the id.
    pub fn depth(&self) -> usize {
        self.id.bytes().filter(|b| *b == b'.').count()
    }
}

/// Maximum depth across all record ids.
pub fn max_depth(records: &[Record]) -> usize {
    records.iter().map(Record::depth).max().unwrap_or(0)
}

/// Decodes a JSON array of records.
///
/// Payloads produced by the desktop exporter are not always valid JSON: definitions may contain
/// raw backslashes and unescaped `"quoted words"`. When strict decoding fails, the same repair the
/// exporter's viewer applied is attempted once (`\` becomes `&#92;`, ` "words"` becomes
/// ` \"words\"`); if that also fails, the original error is returned.
pub fn decode_records(json: &str) -> Result<Vec<Record>> {
    match serde_json::from_str::<Vec<Record>>(json) {
        Ok(records) => Ok(records),
        Err(strict_err) => {
            let repaired = repair_legacy_json(json);
            match serde_json::from_str::<Vec<Record>>(&repaired) {
                Ok(records) => {
                    tracing::warn!(
                        error = %strict_err,
                        "record JSON decoded only after legacy escape repair"
                    );
                    Ok(records)
                }
                Err(_) => Err(strict_err.into()),
            }
        }
    }
}

pub fn repair_legacy_json(json: &str) -> String {
    static QUOTED: OnceLock<Regex> = OnceLock::new();
    let re = QUOTED.get_or_init(|| {
        Regex::new(r#" "([A-Za-z0-9_ ]+)""#).expect("quoted-substring regex must compile")
    });
    let escaped = json.replace('\\', "&#92;");
    re.replace_all(&escaped, r#" \"${1}\""#).into_owned()
}
