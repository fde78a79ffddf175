//! Flat `[section]` / `key=value` grade file reader.
//!
//! The whole file is parsed in a single pass into memory. Lookups are then
//! served from the in-memory sections, so the file handle never outlives
//! [`ConfigStore::open`].
//!
//! ```ignore
//! use grade_gate::config::ConfigStore;
//!
//! let store = ConfigStore::open("grade.ini")?;
//! let total_max = store.get_value("Total", "max", 100)?;
//! println!("Total max = {}", total_max.value);
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use regex::Regex;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::LazyLock;
use thiserror::Error;

/// Matches a section header anywhere on a line: `[Total]`, `  [A] ; comment`.
/// A missing closing bracket takes the rest of the line as the name.
static SECTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)").expect("Invalid section regex"));

/// Errors raised while opening a grade file or looking values up in it.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Grade file path is empty")]
    EmptyPath,

    #[error("Failed to read grade file {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Grade file {path} does not contain any [section]")]
    NoSections { path: Utf8PathBuf },

    #[error("Section [{section}] not found in {path}")]
    UnknownSection { path: Utf8PathBuf, section: String },
}

/// Why a line was left out of the parsed store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("missing '=' separator")]
    MissingSeparator,

    #[error("empty key")]
    EmptyKey,

    #[error("value '{0}' is not a base-10 integer")]
    InvalidValue(String),

    #[error("entry appears before any [section]")]
    OutsideSection,

    #[error("section header has an empty name")]
    EmptySectionName,
}

/// A non-fatal problem found while parsing. The offending line is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub line_number: usize,
    pub content: String,
    pub reason: SkipReason,
}

/// One `key=value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: i32,
}

/// One `[name]` block with its entries in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSection {
    name: String,
    entries: IndexMap<String, ConfigEntry>,
}

impl ConfigSection {
    fn new(name: String) -> Self {
        Self {
            name,
            entries: IndexMap::new(),
        }
    }

    /// Section name without the surrounding brackets.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<i32> {
        self.entries.get(key).map(|entry| entry.value)
    }

    pub fn entries(&self) -> impl Iterator<Item = &ConfigEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, entry: ConfigEntry) {
        if let Some(previous) = self.entries.get(&entry.key) {
            tracing::warn!(
                "Duplicate key '{}' in [{}]: {} replaces {}",
                entry.key,
                self.name,
                entry.value,
                previous.value
            );
        }
        self.entries.insert(entry.key.clone(), entry);
    }
}

/// Result of a lookup: the stored value, or the caller's default when the key
/// is absent from a known section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupValue {
    pub value: i32,
    pub found: bool,
}

/// Anything grade thresholds can read integer settings from.
///
/// Unknown sections are an error. Unknown keys inside a known section fall
/// back to `default`.
pub trait ValueSource {
    fn get_value(&self, section: &str, key: &str, default: i32)
    -> Result<LookupValue, ConfigError>;
}

/// In-memory view of a grade file. Immutable once built.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: Utf8PathBuf,
    sections: IndexMap<String, ConfigSection>,
    warnings: Vec<ParseWarning>,
}

impl ConfigStore {
    /// Open and parse a grade file.
    ///
    /// # Errors
    /// - [`ConfigError::EmptyPath`] if `path` is blank
    /// - [`ConfigError::Io`] if the file cannot be opened or read
    /// - [`ConfigError::NoSections`] if no `[section]` line was found
    ///
    /// Malformed entry lines never fail the parse; they are recorded in
    /// [`ConfigStore::warnings`].
    pub fn open<P: AsRef<Utf8Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.as_str().trim().is_empty() {
            return Err(ConfigError::EmptyPath);
        }

        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::from_reader(path, BufReader::new(file))?;

        tracing::info!(
            "Loaded {} sections from {}",
            store.sections.len(),
            store.path
        );
        for section in store.sections() {
            tracing::info!("Loaded section: [{}] ({} keys)", section.name(), section.len());
        }

        Ok(store)
    }

    /// Parse grade file text that is already in memory.
    ///
    /// `source` is only used to label errors and log lines.
    pub fn parse_str<P: AsRef<Utf8Path>>(source: P, text: &str) -> Result<Self, ConfigError> {
        Self::from_reader(source.as_ref(), text.as_bytes())
    }

    fn from_reader<R: BufRead>(path: &Utf8Path, reader: R) -> Result<Self, ConfigError> {
        let mut sections: IndexMap<String, ConfigSection> = IndexMap::new();
        let mut warnings = Vec::new();
        let mut current: Option<usize> = None;

        for (index, bytes) in reader.split(b'\n').enumerate() {
            let bytes = bytes.map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let line_number = index + 1;

            // Legacy-encoded bytes become U+FFFD instead of failing the file.
            let line = String::from_utf8_lossy(&bytes);
            if let Cow::Owned(_) = line {
                tracing::debug!("Line {} in {} is not valid UTF-8", line_number, path);
            }
            let trimmed = line.trim();

            // Comment markers win over section brackets: `; [A]` is a comment.
            if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
                continue;
            }

            if let Some(captures) = SECTION_PATTERN.captures(trimmed) {
                let name = captures[1].trim();
                if name.is_empty() {
                    warnings.push(skip(line_number, trimmed, SkipReason::EmptySectionName));
                    current = None;
                    continue;
                }

                let entry = sections.entry(name.to_string());
                if matches!(entry, indexmap::map::Entry::Occupied(_)) {
                    tracing::warn!(
                        "Section [{}] repeated at line {} in {}, merging",
                        name,
                        line_number,
                        path
                    );
                }
                current = Some(entry.index());
                entry.or_insert_with(|| ConfigSection::new(name.to_string()));
                continue;
            }

            let Some((_, section)) = current.and_then(|i| sections.get_index_mut(i)) else {
                warnings.push(skip(line_number, trimmed, SkipReason::OutsideSection));
                continue;
            };

            match parse_entry(trimmed) {
                Ok(entry) => section.insert(entry),
                Err(reason) => warnings.push(skip(line_number, trimmed, reason)),
            }
        }

        for warning in &warnings {
            tracing::debug!(
                "Skipped line {} in {} ({}): {}",
                warning.line_number,
                path,
                warning.reason,
                warning.content
            );
        }

        if sections.is_empty() {
            return Err(ConfigError::NoSections {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            sections,
            warnings,
        })
    }

    /// Look up `key` in `section`.
    ///
    /// The section name may be given with or without brackets.
    pub fn get_value(
        &self,
        section: &str,
        key: &str,
        default: i32,
    ) -> Result<LookupValue, ConfigError> {
        let name = normalize_section_name(section);
        let entries = self
            .sections
            .get(name)
            .ok_or_else(|| ConfigError::UnknownSection {
                path: self.path.clone(),
                section: name.to_string(),
            })?;

        match entries.get(key.trim()) {
            Some(value) => Ok(LookupValue { value, found: true }),
            None => {
                tracing::debug!(
                    "Key '{}' missing from [{}] in {}, using default {}",
                    key,
                    name,
                    self.path,
                    default
                );
                Ok(LookupValue {
                    value: default,
                    found: false,
                })
            }
        }
    }

    pub fn section(&self, name: &str) -> Option<&ConfigSection> {
        self.sections.get(normalize_section_name(name))
    }

    /// Sections in file order.
    pub fn sections(&self) -> impl Iterator<Item = &ConfigSection> {
        self.sections.values()
    }

    pub fn section_names(&self) -> Vec<&str> {
        self.sections.keys().map(String::as_str).collect()
    }

    /// Lines skipped during parsing.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Path (or label) the store was parsed from.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl ValueSource for ConfigStore {
    fn get_value(
        &self,
        section: &str,
        key: &str,
        default: i32,
    ) -> Result<LookupValue, ConfigError> {
        ConfigStore::get_value(self, section, key, default)
    }
}

fn normalize_section_name(name: &str) -> &str {
    let name = name.trim();
    let name = name.strip_prefix('[').unwrap_or(name);
    let name = name.strip_suffix(']').unwrap_or(name);
    name.trim()
}

fn parse_entry(line: &str) -> Result<ConfigEntry, SkipReason> {
    let (key, value) = line.split_once('=').ok_or(SkipReason::MissingSeparator)?;

    let key = key.trim();
    if key.is_empty() {
        return Err(SkipReason::EmptyKey);
    }

    let value = value.trim();
    let value = value
        .parse::<i32>()
        .map_err(|_| SkipReason::InvalidValue(value.to_string()))?;

    Ok(ConfigEntry {
        key: key.to_string(),
        value,
    })
}

fn skip(line_number: usize, content: &str, reason: SkipReason) -> ParseWarning {
    ParseWarning {
        line_number,
        content: content.to_string(),
        reason,
    }
}
