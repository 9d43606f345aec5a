//! Merge and reconciliation of the event store layers.
//!
//! Three layers feed the store, in precedence order:
//!
//! 1. built-in seed records, in declaration order
//! 2. an optional external YAML file, merged over the seeds by `id`
//! 3. a contributed record, upserted into the external layer at submit time
//!
//! Load-time merging is a *shallow* merge: only keys literally present in
//! the override entry overwrite the base record. The contribution path is
//! a *full replace* by `id`. The two behaviors are deliberately distinct
//! and both are pinned by tests.
//!
//! Malformed external input never aborts a load. Problems degrade to "no
//! contribution from this source" and are reported as [`LoadWarning`]
//! values alongside the result.

use crate::model::EventRecord;
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// A non-fatal problem found while reading the external layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The external text did not parse as YAML at all.
    UnparsableText(String),
    /// The top level parsed but is not a sequence of mappings.
    NotASequence,
    /// An entry is not a mapping.
    EntryNotAMapping { index: usize },
    /// An entry has no string `id` key.
    EntryMissingId { index: usize },
    /// An entry carried an `id` but its fields do not fit the schema.
    EntryInvalid { index: usize, id: String, reason: String },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnparsableText(reason) => write!(f, "external file is not valid YAML: {reason}"),
            Self::NotASequence => write!(f, "external file is not a sequence; ignoring it"),
            Self::EntryNotAMapping { index } => {
                write!(f, "entry {index} is not a mapping; skipped")
            }
            Self::EntryMissingId { index } => write!(f, "entry {index} has no id; skipped"),
            Self::EntryInvalid { index, id, reason } => {
                write!(f, "entry {index} ('{id}') does not fit the schema: {reason}")
            }
        }
    }
}

/// The merged store plus any diagnostics from the external layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    /// Merged records, sorted ascending by year (stable on ties).
    pub events: Vec<EventRecord>,
    pub warnings: Vec<LoadWarning>,
}

/// Merge the external layer over the built-in records and sort by year.
///
/// Seeds enter in declaration order. External entries are walked in file
/// order: an entry whose `id` matches an existing record shallow-merges
/// over it *in place* (keeping the record's original position); an unseen
/// `id` appends. The final stable year sort therefore preserves insertion
/// order on ties.
#[must_use]
pub fn load(builtin: Vec<EventRecord>, external_text: Option<&str>) -> Loaded {
    let mut events = builtin;
    let mut warnings = Vec::new();
    let mut index: HashMap<String, usize> = events
        .iter()
        .enumerate()
        .map(|(pos, event)| (event.id.clone(), pos))
        .collect();

    if let Some(text) = external_text {
        merge_external(text, &mut events, &mut index, &mut warnings);
    }

    for warning in &warnings {
        warn!("{warning}");
    }

    sort_by_year(&mut events);
    Loaded { events, warnings }
}

fn merge_external(
    text: &str,
    events: &mut Vec<EventRecord>,
    index: &mut HashMap<String, usize>,
    warnings: &mut Vec<LoadWarning>,
) {
    let parsed: serde_yaml::Value = match serde_yaml::from_str(text) {
        Ok(value) => value,
        Err(err) => {
            warnings.push(LoadWarning::UnparsableText(err.to_string()));
            return;
        }
    };

    let entries = match parsed {
        // An empty file parses as null: no contribution, no warning.
        serde_yaml::Value::Null => return,
        serde_yaml::Value::Sequence(entries) => entries,
        _ => {
            warnings.push(LoadWarning::NotASequence);
            return;
        }
    };

    for (entry_index, entry) in entries.into_iter().enumerate() {
        let Some(over) = as_json_object(&entry) else {
            warnings.push(LoadWarning::EntryNotAMapping { index: entry_index });
            continue;
        };

        let Some(id) = over.get("id").and_then(JsonValue::as_str).map(String::from) else {
            warnings.push(LoadWarning::EntryMissingId { index: entry_index });
            continue;
        };

        if let Some(&pos) = index.get(&id) {
            match merge_over(&events[pos], &over) {
                Ok(merged) => events[pos] = merged,
                Err(reason) => warnings.push(LoadWarning::EntryInvalid {
                    index: entry_index,
                    id,
                    reason,
                }),
            }
        } else {
            match serde_json::from_value::<EventRecord>(JsonValue::Object(over)) {
                Ok(record) => {
                    index.insert(id, events.len());
                    events.push(record);
                }
                Err(err) => warnings.push(LoadWarning::EntryInvalid {
                    index: entry_index,
                    id,
                    reason: err.to_string(),
                }),
            }
        }
    }
}

/// Shallow-merge an override mapping over an existing record.
///
/// Only keys literally present in the override (and non-null) overwrite;
/// everything else keeps the base record's value. Top-level replace only,
/// never a deep merge.
fn merge_over(base: &EventRecord, over: &JsonMap<String, JsonValue>) -> Result<EventRecord, String> {
    let JsonValue::Object(mut merged) =
        serde_json::to_value(base).map_err(|err| err.to_string())?
    else {
        return Err("record did not serialize to a mapping".to_string());
    };

    for (key, value) in over {
        if !value.is_null() {
            merged.insert(key.clone(), value.clone());
        }
    }

    serde_json::from_value(JsonValue::Object(merged)).map_err(|err| err.to_string())
}

fn as_json_object(entry: &serde_yaml::Value) -> Option<JsonMap<String, JsonValue>> {
    if !entry.is_mapping() {
        return None;
    }
    match serde_json::to_value(entry) {
        Ok(JsonValue::Object(mapping)) => Some(mapping),
        _ => None,
    }
}

/// Insert or replace a record by `id`: full top-level replace, NOT a
/// shallow merge. The caller re-derives the sorted view.
pub fn upsert(events: &mut Vec<EventRecord>, record: EventRecord) {
    if let Some(existing) = events.iter_mut().find(|event| event.id == record.id) {
        *existing = record;
    } else {
        events.push(record);
    }
}

/// Stable ascending year sort; ties keep their current relative order.
pub fn sort_by_year(events: &mut [EventRecord]) {
    events.sort_by_key(|event| event.year);
}

/// Upsert a contributed record into the raw external layer and
/// re-serialize it.
///
/// Entries in the existing text are preserved verbatim (a partial override
/// entry stays partial); only the matching entry is replaced, or the new
/// record appended. The persisted file keeps file order; the year sort
/// happens at load time.
///
/// # Errors
///
/// Only serialization of the merged sequence can fail; malformed existing
/// text degrades to an empty layer with a [`LoadWarning`].
pub fn merge_into_text(
    existing_text: Option<&str>,
    record: &EventRecord,
) -> Result<(String, Vec<LoadWarning>), serde_yaml::Error> {
    let mut warnings = Vec::new();
    let mut entries: Vec<serde_yaml::Value> = match existing_text {
        None => Vec::new(),
        Some(text) => match serde_yaml::from_str::<serde_yaml::Value>(text) {
            Ok(serde_yaml::Value::Sequence(entries)) => entries,
            Ok(serde_yaml::Value::Null) => Vec::new(),
            Ok(_) => {
                warnings.push(LoadWarning::NotASequence);
                Vec::new()
            }
            Err(err) => {
                warnings.push(LoadWarning::UnparsableText(err.to_string()));
                Vec::new()
            }
        },
    };

    let new_entry = serde_yaml::to_value(record)?;
    let existing_pos = entries.iter().position(|entry| {
        entry.get("id").and_then(serde_yaml::Value::as_str) == Some(record.id.as_str())
    });

    match existing_pos {
        Some(pos) => entries[pos] = new_entry,
        None => entries.push(new_entry),
    }

    let text = serde_yaml::to_string(&serde_yaml::Value::Sequence(entries))?;
    Ok((text, warnings))
}

/// Find the year present in the store closest to `target`.
///
/// Ties resolve to the earlier (first-seen) year. An empty store yields
/// `None`: "no data", never a minimum over an empty sequence.
#[must_use]
pub fn nearest_year(events: &[EventRecord], target: i32) -> Option<i32> {
    events
        .iter()
        .map(|event| event.year)
        .min_by_key(|year| (i64::from(*year) - i64::from(target)).abs())
}

/// Look up one record by identifier.
#[must_use]
pub fn find_by_id<'a>(events: &'a [EventRecord], id: &str) -> Option<&'a EventRecord> {
    events.iter().find(|event| event.id == id)
}
