//! Reader and writer for the sectioned `key = value` text used by material
//! cards.
//!
//! The dialect is that of a raw INI parser: `#`/`;` comment lines, `=` or
//! `:` between key and value, indented continuation lines, and a `DEFAULT`
//! section whose options every other section inherits. Keys keep their case.
//!
//! Keys, section names and each line of a value are trimmed, and trailing
//! blank lines of a value are dropped. [`round_trips`] tells whether a value
//! survives being written and read back.

use std::fmt;

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Name of the section whose options are inherited by all others.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Options of one section, in first-seen order.
pub type Section = IndexMap<String, String>;

/// A parsed card: named sections in first-seen order plus inherited defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    defaults: Section,
    sections: IndexMap<String, Section>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse sectioned text.
    ///
    /// Repeated section headers merge into the earlier section and repeated
    /// options overwrite the earlier value.
    pub fn parse(text: &str) -> Result<Self> {
        let mut doc = Self::new();
        let mut current: Option<String> = None;
        let mut last_key: Option<String> = None;
        let mut pending_blank_lines = 0usize;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                if last_key.is_some() {
                    pending_blank_lines += 1;
                }
                continue;
            }

            // Indented lines under an option belong to its value, even when
            // they start with a comment character.
            if raw.starts_with(char::is_whitespace) {
                if let (Some(section), Some(key)) = (current.as_deref(), last_key.as_deref()) {
                    if let Some(value) = doc.section_mut(section).get_mut(key) {
                        for _ in 0..pending_blank_lines {
                            value.push('\n');
                        }
                        value.push('\n');
                        value.push_str(trimmed);
                    }
                    pending_blank_lines = 0;
                    continue;
                }
            }

            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            last_key = None;
            pending_blank_lines = 0;

            if let Some(rest) = trimmed.strip_prefix('[') {
                let name = rest
                    .strip_suffix(']')
                    .ok_or_else(|| parse_error(line_no, "unterminated section header"))?
                    .trim();
                if name.is_empty() {
                    return Err(parse_error(line_no, "empty section name"));
                }
                doc.add_section(name);
                current = Some(name.to_string());
                continue;
            }

            let Some(section) = current.as_deref() else {
                return Err(parse_error(line_no, "option found before any section header"));
            };
            let (key, value) = split_option(trimmed).ok_or_else(|| {
                parse_error(line_no, format!("expected 'key = value', found {:?}", trimmed))
            })?;
            if key.is_empty() {
                return Err(parse_error(line_no, "empty option name"));
            }

            doc.set(section, key, value);
            last_key = Some(key.to_string());
        }

        Ok(doc)
    }

    /// Create `name` if it does not exist yet. Existing sections keep their
    /// position and options.
    pub fn add_section(&mut self, name: &str) {
        if name != DEFAULT_SECTION && !self.sections.contains_key(name) {
            self.sections.insert(name.to_string(), Section::new());
        }
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Set `key` in `section`, creating the section if needed.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.section_mut(section)
            .insert(key.to_string(), value.to_string());
    }

    /// Section names in first-seen order, without `DEFAULT`.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Options of `section` followed by inherited defaults it does not
    /// override. Unknown sections yield nothing.
    pub fn options<'a>(&'a self, section: &str) -> impl Iterator<Item = (&'a str, &'a str)> {
        let own = self.sections.get(section);
        let defaults = own.map(|_| &self.defaults);
        let inherited = defaults
            .into_iter()
            .flatten()
            .filter(move |&(key, _)| own.is_some_and(|opts| !opts.contains_key(key)));
        own.into_iter()
            .flatten()
            .chain(inherited)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn section_mut(&mut self, name: &str) -> &mut Section {
        if name == DEFAULT_SECTION {
            return &mut self.defaults;
        }
        self.sections.entry(name.to_string()).or_default()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.defaults.is_empty() {
            write_section(f, DEFAULT_SECTION, &self.defaults)?;
        }
        for (name, options) in &self.sections {
            write_section(f, name, options)?;
        }
        Ok(())
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, name: &str, options: &Section) -> fmt::Result {
    writeln!(f, "[{}]", name)?;
    for (key, value) in options {
        writeln!(f, "{} = {}", key, value.replace('\n', "\n\t"))?;
    }
    writeln!(f)
}

/// Check whether `value` reads back unchanged after being written as an
/// option value. Returns the reason when it does not.
pub fn round_trips(value: &str) -> std::result::Result<(), &'static str> {
    let mut lines = value.split('\n');
    if lines.any(|line| line != line.trim()) {
        return Err("lines must not start or end with whitespace");
    }
    if value.contains('\n') && value.ends_with('\n') {
        return Err("trailing line break");
    }
    Ok(())
}

/// Split at the first `=` or `:`, trimming both sides.
fn split_option(line: &str) -> Option<(&str, &str)> {
    let pos = line.find(|c: char| c == '=' || c == ':')?;
    Some((line[..pos].trim(), line[pos + 1..].trim()))
}

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::Parse {
        line,
        message: message.into(),
    }
}
