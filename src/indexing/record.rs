//! Reference records and header alias resolution
//!
//! A record is one row of the lookup table. The two matched fields, code
//! and description, are resolved once when the record is built; every
//! original column is kept in an ordered pass-through map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::algorithms::normalize::normalize;

/// An original table row: header -> cell text, in column order.
pub type RawRow = IndexMap<String, String>;

/// Header used for the code column of records built with [`Record::new`].
pub const CODE_KEY: &str = "code";

/// Header used for the description column of records built with [`Record::new`].
pub const DESCRIPTION_KEY: &str = "description";

/// Prioritized header aliases for the two logical fields.
///
/// A row key matches an alias when both normalize to the same text, so
/// case, accents and spacing in headers do not matter. Earlier aliases win.
///
/// # Example
///
/// ```rust
/// use fuzzylookup::indexing::record::{FieldAliases, RawRow, Record};
///
/// let mut row = RawRow::new();
/// row.insert("Mã hiệu".into(), "M10A".into());
/// row.insert("Tên công việc".into(), "Đào đất".into());
/// row.insert("Đơn vị".into(), "m3".into());
///
/// let record = Record::from_row(row, &FieldAliases::default());
/// assert_eq!(record.code(), "M10A");
/// assert_eq!(record.description(), "Đào đất");
/// assert_eq!(record.get("Đơn vị"), Some("m3"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAliases {
    pub code: Vec<String>,
    pub description: Vec<String>,
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self {
            code: ["code", "Mã hiệu", "Mã hiệu công việc", "Mã", "Item code", "Ref"]
                .map(String::from)
                .to_vec(),
            description: [
                "description",
                "Tên công việc",
                "Nội dung công việc",
                "Tên",
                "Name",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

impl FieldAliases {
    /// Build aliases from explicit lists.
    pub fn new<C, D>(code: C, description: D) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            code: code.into_iter().map(Into::into).collect(),
            description: description.into_iter().map(Into::into).collect(),
        }
    }

    /// Find the cell for the first alias present in `row`.
    fn resolve<'a>(aliases: &[String], row: &'a RawRow) -> Option<&'a String> {
        let keys: Vec<(String, &String)> =
            row.iter().map(|(key, value)| (normalize(key), value)).collect();

        aliases.iter().find_map(|alias| {
            let alias = normalize(alias);
            keys.iter()
                .find(|(key, _)| *key == alias)
                .map(|(_, value)| *value)
        })
    }
}

/// One reference row.
///
/// Missing fields read as empty text; a record is never dropped because a
/// column is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    code: Option<String>,
    description: Option<String>,
    raw: RawRow,
}

impl Record {
    /// Create a record from its two matched fields.
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        let code = code.into();
        let description = description.into();

        let mut raw = RawRow::with_capacity(2);
        raw.insert(CODE_KEY.to_string(), code.clone());
        raw.insert(DESCRIPTION_KEY.to_string(), description.clone());

        Self {
            code: Some(code),
            description: Some(description),
            raw,
        }
    }

    /// Create a record from an original row, resolving fields through `aliases`.
    pub fn from_row(row: RawRow, aliases: &FieldAliases) -> Self {
        let code = FieldAliases::resolve(&aliases.code, &row).cloned();
        let description = FieldAliases::resolve(&aliases.description, &row).cloned();
        Self {
            code,
            description,
            raw: row,
        }
    }

    /// Code text, empty if the row had no code column
    pub fn code(&self) -> &str {
        self.code.as_deref().unwrap_or_default()
    }

    /// Description text, empty if the row had no description column
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn has_code(&self) -> bool {
        self.code.is_some()
    }

    pub fn has_description(&self) -> bool {
        self.description.is_some()
    }

    /// Original cell by header
    pub fn get(&self, header: &str) -> Option<&str> {
        self.raw.get(header).map(String::as_str)
    }

    /// The full original row
    pub fn raw(&self) -> &RawRow {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> RawRow {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_new_record() {
        let record = Record::new("M10A", "Đào đất");
        assert_eq!(record.code(), "M10A");
        assert_eq!(record.description(), "Đào đất");
        assert_eq!(record.get(CODE_KEY), Some("M10A"));
        assert_eq!(record.raw().len(), 2);
    }

    #[test]
    fn test_alias_resolution_ignores_case_and_accents() {
        let aliases = FieldAliases::default();
        let record = Record::from_row(
            row(&[("MA HIEU", "AB.1"), ("ten cong viec", "Xây")]),
            &aliases,
        );
        assert_eq!(record.code(), "AB.1");
        assert_eq!(record.description(), "Xây");
    }

    #[test]
    fn test_alias_priority() {
        let aliases = FieldAliases::new(["primary", "secondary"], ["desc"]);
        let record = Record::from_row(
            row(&[("secondary", "second"), ("Primary", "first"), ("desc", "d")]),
            &aliases,
        );
        assert_eq!(record.code(), "first");
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let record = Record::from_row(row(&[("unit", "m3")]), &FieldAliases::default());
        assert_eq!(record.code(), "");
        assert_eq!(record.description(), "");
        assert!(!record.has_code());
        assert!(!record.has_description());
        assert_eq!(record.get("unit"), Some("m3"));
    }

    #[test]
    fn test_raw_row_keeps_column_order() {
        let record = Record::from_row(
            row(&[("z", "1"), ("code", "C"), ("a", "2")]),
            &FieldAliases::default(),
        );
        let headers: Vec<&String> = record.raw().keys().collect();
        assert_eq!(headers, vec!["z", "code", "a"]);
    }
}
