//! Import and export of material cards.
//!
//! A card on disk groups properties into sections:
//!
//! ```text
//! [General]
//! Name = Steel
//! Density = 7850
//! ```
//!
//! In memory it is a flat [`MaterialRecord`] keyed by `Group_Property`
//! (`General_Name`, `General_Density`). Import builds those keys from the
//! section and option names; export splits them back apart and rejects any
//! key or value that would not read back unchanged: keys without exactly one
//! [`KEY_DELIMITER`], the reserved `DEFAULT` group, names that clash with the
//! card syntax, and values with padded lines or a trailing line break.

pub mod ini;

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use self::ini::{Document, DEFAULT_SECTION};

/// Separator between group and property in a composite key.
pub const KEY_DELIMITER: char = '_';

/// First line(s) of every exported card.
pub const PREAMBLE: &str = "# This is a FreeCAD material-card file\n\n";

/// Join a group and a property into a composite record key.
pub fn composite_key(group: &str, property: &str) -> String {
    format!("{}{}{}", group, KEY_DELIMITER, property)
}

/// Split a composite key into `(group, property)`.
///
/// Fails with [`Error::KeyFormat`] unless the key holds exactly one
/// delimiter with text on both sides.
pub fn split_key(key: &str) -> Result<(&str, &str)> {
    let mut parts = key.split(KEY_DELIMITER);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(group), Some(property), None) if !group.is_empty() && !property.is_empty() => {
            Ok((group, property))
        }
        _ => Err(key_error(key, "expected exactly one '_' between group and property")),
    }
}

/// Split `key` and check that both names survive a write/read cycle.
fn checked_key(key: &str) -> Result<(&str, &str)> {
    let (group, property) = split_key(key)?;
    if group == DEFAULT_SECTION {
        return Err(key_error(key, "group name DEFAULT is reserved"));
    }
    if !is_plain_name(group) || !is_plain_name(property) {
        return Err(key_error(
            key,
            "names must not start or end with whitespace or contain line breaks",
        ));
    }
    if property.contains(&['=', ':'][..]) || property.starts_with(&['#', ';', '['][..]) {
        return Err(key_error(key, "property name clashes with card syntax"));
    }
    Ok((group, property))
}

fn is_plain_name(name: &str) -> bool {
    name == name.trim() && !name.contains(&['\n', '\r'][..])
}

fn key_error(key: &str, reason: &'static str) -> Error {
    Error::KeyFormat {
        key: key.to_string(),
        reason,
    }
}

// ---------------------------------------------------------------------------
// Material record
// ---------------------------------------------------------------------------

/// Flat `Group_Property -> value` mapping for one material.
///
/// Iteration follows insertion order (file order after an import). Equality
/// ignores order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialRecord {
    entries: IndexMap<String, String>,
}

impl MaterialRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous one for that key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Distinct group names in first-seen order. Malformed keys are skipped.
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for (group, _) in self.keys().filter_map(|key| split_key(key).ok()) {
            if !groups.contains(&group) {
                groups.push(group);
            }
        }
        groups
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MaterialRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for MaterialRecord {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a MaterialRecord {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// Import / export
// ---------------------------------------------------------------------------

/// Parse card text into a record keyed `Section_Option`.
pub fn parse_card(text: &str) -> Result<MaterialRecord> {
    let doc = Document::parse(text)?;
    let mut record = MaterialRecord::new();
    for section in doc.sections() {
        for (option, value) in doc.options(section) {
            record.insert(composite_key(section, option), value);
        }
    }
    Ok(record)
}

/// Render a record as card text, preamble included.
///
/// Every key and value is validated before any output is produced, so the
/// text always imports back to an equal record.
pub fn render_card(record: &MaterialRecord) -> Result<String> {
    let mut doc = Document::new();

    // Create groups.
    for key in record.keys() {
        let (group, _) = checked_key(key)?;
        doc.add_section(group);
    }

    // Fill groups.
    for (key, value) in record.iter() {
        let (group, property) = checked_key(key)?;
        ini::round_trips(value).map_err(|reason| Error::ValueFormat {
            key: key.to_string(),
            reason,
        })?;
        doc.set(group, property, value);
    }

    Ok(format!("{}{}", PREAMBLE, doc))
}

/// Read a material card from `path`.
///
/// # Errors
///
/// [`Error::NotFound`] if the file does not exist, [`Error::Io`] if it
/// cannot be read, [`Error::Parse`] if its contents are malformed.
pub fn import_card(path: impl AsRef<Path>) -> Result<MaterialRecord> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| Error::from_io(path, e))?;
    let record = parse_card(&text)?;
    log::debug!(
        "Imported {} properties from {}",
        record.len(),
        path.display()
    );
    Ok(record)
}

/// Write `record` to `path` as a material card, replacing any existing file.
///
/// [`Error::KeyFormat`] and [`Error::ValueFormat`] failures are raised
/// before the file is touched. A failed write may leave a partial file
/// behind.
pub fn export_card(path: impl AsRef<Path>, record: &MaterialRecord) -> Result<()> {
    let path = path.as_ref();
    let text = render_card(record)?;
    std::fs::write(path, text).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "Exported {} properties in {} groups to {}",
        record.len(),
        record.groups().len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steel() -> MaterialRecord {
        [
            ("General_Name", "Steel"),
            ("General_Density", "7850"),
            ("Mechanical_YoungsModulus", "210 GPa"),
        ]
        .into_iter()
        .collect()
    }

    // -----------------------------------------------------------------------
    // Key tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_composite_key() {
        assert_eq!(composite_key("General", "Name"), "General_Name");
    }

    #[test]
    fn test_split_key_valid() {
        assert_eq!(split_key("General_Name").unwrap(), ("General", "Name"));
        assert_eq!(
            split_key("Vector rendering_ViewColor").unwrap(),
            ("Vector rendering", "ViewColor")
        );
    }

    #[test]
    fn test_split_key_no_delimiter() {
        assert!(split_key("NoDelimiterHere").unwrap_err().is_key_format());
    }

    #[test]
    fn test_split_key_two_delimiters() {
        assert!(split_key("a_b_c").unwrap_err().is_key_format());
    }

    #[test]
    fn test_split_key_empty_part() {
        assert!(split_key("_Name").is_err());
        assert!(split_key("General_").is_err());
    }

    // -----------------------------------------------------------------------
    // Record tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_record_insert_and_get() {
        let mut record = MaterialRecord::new();
        assert!(record.is_empty());
        assert_eq!(record.insert("General_Name", "Steel"), None);
        assert_eq!(
            record.insert("General_Name", "Iron"),
            Some("Steel".to_string())
        );
        assert_eq!(record.get("General_Name"), Some("Iron"));
        assert_eq!(record.get("General_Father"), None);
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_record_groups_first_seen() {
        let mut record = steel();
        record.insert("General_Father", "Metal");
        record.insert("bogus", "x");
        assert_eq!(record.groups(), vec!["General", "Mechanical"]);
    }

    #[test]
    fn test_record_equality_ignores_order() {
        let forward = steel();
        let reversed: MaterialRecord = steel().into_iter().rev().collect();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_record_serializes_as_flat_object() {
        let record: MaterialRecord = [("General_Name", "Steel")].into_iter().collect();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"General_Name":"Steel"}"#);
    }

    // -----------------------------------------------------------------------
    // Codec tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_card_minimal() {
        let record = parse_card("[General]\nName = Steel\nDensity = 7850\n").unwrap();
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["General_Name", "General_Density"]);
        assert_eq!(record.get("General_Name"), Some("Steel"));
        assert_eq!(record.get("General_Density"), Some("7850"));
    }

    #[test]
    fn test_parse_card_keeps_file_order() {
        let text = "[Mechanical]\nElasticity = 1\n[General]\nName = Steel\nFather = Metal\n";
        let record = parse_card(text).unwrap();
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(
            keys,
            vec!["Mechanical_Elasticity", "General_Name", "General_Father"]
        );
    }

    #[test]
    fn test_render_card_layout() {
        let text = render_card(&steel()).unwrap();
        assert_eq!(
            text,
            "# This is a FreeCAD material-card file\n\n\
             [General]\nName = Steel\nDensity = 7850\n\n\
             [Mechanical]\nYoungsModulus = 210 GPa\n\n"
        );
    }

    #[test]
    fn test_render_card_groups_interleaved_keys() {
        let record: MaterialRecord = [
            ("General_Name", "Steel"),
            ("Mechanical_Elasticity", "1"),
            ("General_Father", "Metal"),
        ]
        .into_iter()
        .collect();
        let text = render_card(&record).unwrap();
        assert!(text.contains("[General]\nName = Steel\nFather = Metal\n"));
    }

    #[test]
    fn test_render_card_rejects_bad_key() {
        let mut record = steel();
        record.insert("a_b_c", "x");
        assert!(render_card(&record).unwrap_err().is_key_format());
    }

    #[test]
    fn test_render_card_rejects_default_group() {
        let mut record = steel();
        record.insert("DEFAULT_Father", "Metal");
        let err = render_card(&record).unwrap_err();
        assert!(err.is_key_format());
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn test_render_card_rejects_syntax_in_names() {
        for key in [
            "General_Name=x",
            "General_Na:me",
            "General_#Name",
            "General_[Name",
            "General _Name",
            "General_ Name",
            "Gen\neral_Name",
        ] {
            let record: MaterialRecord = [(key, "x")].into_iter().collect();
            assert!(render_card(&record).unwrap_err().is_key_format(), "{:?}", key);
        }
    }

    #[test]
    fn test_render_card_rejects_unstorable_values() {
        for value in ["line\n", " padded", "two\n  indented"] {
            let record: MaterialRecord = [("General_Description", value)].into_iter().collect();
            assert!(
                render_card(&record).unwrap_err().is_value_format(),
                "{:?}",
                value
            );
        }
    }

    #[test]
    fn test_render_then_parse_comment_like_lines() {
        let record: MaterialRecord = [(
            "General_Description",
            "Notes:\n# not a comment\n; nor this\n[nor a section]",
        )]
        .into_iter()
        .collect();
        let parsed = parse_card(&render_card(&record).unwrap()).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_render_then_parse_round_trip() {
        let mut record = steel();
        record.insert("General_Description", "two\nlines");
        let parsed = parse_card(&render_card(&record).unwrap()).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_import_missing_file() {
        let err = import_card("/nonexistent/path/Steel.FCMat").unwrap_err();
        assert!(err.is_not_found());
    }
}
