//! Free-text search and field filters over schema-less records.
//!
//! Search only ever looks at text and text-list values. Filters fall back to
//! exact equality for every other kind of value.

use crate::record::{Record, Value};
use std::borrow::Borrow;
use std::collections::BTreeMap;

/// Field name to filter value. Entries holding `Null` or empty text are ignored.
pub type FilterMap = BTreeMap<String, Value>;

fn contains_lowercase(value: &Value, needle: &str) -> bool {
    match value {
        Value::Text(s) => s.to_lowercase().contains(needle),
        Value::List(items) => items.iter().any(|s| s.to_lowercase().contains(needle)),
        _ => false,
    }
}

fn matches_lowered_term(record: &Record, needle: &str, fields: Option<&[&str]>) -> bool {
    match fields {
        Some(fields) => fields
            .iter()
            .any(|field| contains_lowercase(record.get(field), needle)),
        None => record.values().any(|value| contains_lowercase(value, needle)),
    }
}

/// Case-insensitive substring search across `fields`, or every field when
/// `fields` is `None`. An empty term matches everything.
pub fn matches_search(record: &Record, term: &str, fields: Option<&[&str]>) -> bool {
    if term.is_empty() {
        return true;
    }
    matches_lowered_term(record, &term.to_lowercase(), fields)
}

/// Standalone search helper. Works on owned records or on references.
pub fn search<R>(items: &[R], term: &str, fields: Option<&[&str]>) -> Vec<R>
where
    R: Borrow<Record> + Clone,
{
    if term.is_empty() {
        return items.to_vec();
    }
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|item| {
            let record: &Record = (*item).borrow();
            matches_lowered_term(record, &needle, fields)
        })
        .cloned()
        .collect()
}

pub fn is_active_filter(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Text(s) => !s.is_empty(),
        _ => true,
    }
}

/// A single filter entry. Text and text-list fields match by case-insensitive
/// substring, everything else by strict equality.
pub fn matches_filter(record: &Record, field: &str, filter_value: &Value) -> bool {
    if !is_active_filter(filter_value) {
        return true;
    }
    match record.get(field) {
        field_value @ (Value::Text(_) | Value::List(_)) => {
            let needle = filter_value.to_display_string().to_lowercase();
            contains_lowercase(field_value, &needle)
        }
        field_value => field_value == filter_value,
    }
}

pub fn matches_filters(record: &Record, filters: &FilterMap) -> bool {
    filters
        .iter()
        .all(|(field, value)| matches_filter(record, field, value))
}

/// Indices of `items` that pass both the search term and every filter, in
/// input order.
pub(crate) fn filter_indices(items: &[Record], term: &str, filters: &FilterMap) -> Vec<usize> {
    let needle = term.to_lowercase();
    items
        .iter()
        .enumerate()
        .filter(|(_, record)| needle.is_empty() || matches_lowered_term(record, &needle, None))
        .filter(|(_, record)| matches_filters(record, filters))
        .map(|(index, _)| index)
        .collect()
}
