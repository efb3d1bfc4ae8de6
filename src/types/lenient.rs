// src/types/lenient.rs
//! `deserialize_with` helpers for hand-edited and exported profile data.
//!
//! `#[serde(default)]` only covers missing keys. Real profiles also carry
//! explicit `null`s, numbers where text is expected (`"gpa": 3.8`) and the odd
//! value of the wrong shape. These helpers fold all of that into the field's
//! empty value instead of rejecting the whole document.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Integer(i64),
    Float(f64),
    Other(IgnoredAny),
}

impl RawText {
    fn into_text(self) -> Option<String> {
        match self {
            RawText::Text(text) => Some(text),
            RawText::Integer(n) => Some(n.to_string()),
            RawText::Float(n) => Some(n.to_string()),
            RawText::Other(_) => None,
        }
    }
}

/// Optional text field. Numbers keep their written form; nulls, booleans
/// and nested values become `None`.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawText::deserialize(deserializer)?.into_text())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStrings {
    Many(Vec<RawText>),
    One(RawText),
}

/// List of text. A lone scalar becomes a one-item list; null becomes empty.
pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawStrings::deserialize(deserializer)? {
        RawStrings::Many(items) => items.into_iter().filter_map(RawText::into_text).collect(),
        RawStrings::One(item) => item.into_text().into_iter().collect(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Flag(bool),
    Integer(i64),
    Text(String),
    Other(IgnoredAny),
}

/// Boolean flag. Accepts `1`/`0` and `"true"`/`"yes"`; anything else is `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawFlag::deserialize(deserializer)? {
        RawFlag::Flag(value) => value,
        RawFlag::Integer(n) => n != 0,
        RawFlag::Text(text) => matches!(
            text.trim().to_lowercase().as_str(),
            "true" | "yes" | "1"
        ),
        RawFlag::Other(_) => false,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecord<T> {
    Record(T),
    Other(IgnoredAny),
}

impl<T> RawRecord<T> {
    fn into_option(self) -> Option<T> {
        match self {
            RawRecord::Record(value) => Some(value),
            RawRecord::Other(_) => None,
        }
    }
}

/// List of records. Null or a non-list becomes empty and items that do not
/// fit the record shape are skipped.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match RawRecord::<Vec<RawRecord<T>>>::deserialize(deserializer)? {
        RawRecord::Record(items) => items.into_iter().filter_map(RawRecord::into_option).collect(),
        RawRecord::Other(_) => Vec::new(),
    })
}

/// Nested record that falls back to its default when null or malformed.
pub fn record<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(RawRecord::deserialize(deserializer)?
        .into_option()
        .unwrap_or_default())
}

/// Optional nested record; null or malformed becomes `None`.
pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(RawRecord::deserialize(deserializer)?.into_option())
}
