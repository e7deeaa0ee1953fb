use crate::error::PageError;
use serde::Serialize;
use std::collections::BTreeMap;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

static NULL: Value = Value::Null;

/// A single field value inside a [`Record`].
///
/// Absent fields and explicit nulls are the same case: [`Record::get`] returns
/// `Value::Null` for both.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(#[serde(with = "time::serde::rfc3339")] OffsetDateTime),
    List(Vec<String>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// String form used by the mixed-type sort fallback and by text filters
    /// that were given a non-text filter value.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::Text(s) => s.clone(),
            Value::Date(d) => d.format(&Rfc3339).unwrap_or_default(),
            Value::List(items) => items.join(","),
        }
    }

    fn from_json_field(field: &str, raw: &serde_json::Value) -> Result<Value, PageError> {
        match raw {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number).ok_or_else(|| {
                PageError::InvalidRecord(format!("Field '{}' holds an unrepresentable number", field))
            }),
            serde_json::Value::String(s) => Ok(Value::Text(s.clone())),
            serde_json::Value::Array(elements) => elements
                .iter()
                .map(|element| match element {
                    serde_json::Value::String(s) => Ok(s.clone()),
                    serde_json::Value::Null => Ok("null".to_string()),
                    serde_json::Value::Bool(b) => Ok(b.to_string()),
                    serde_json::Value::Number(n) => {
                        Ok(n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()))
                    }
                    _ => Err(PageError::InvalidRecord(format!(
                        "Field '{}' contains a nested array or object",
                        field
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            serde_json::Value::Object(_) => Err(PageError::InvalidRecord(format!(
                "Field '{}' is a nested object",
                field
            ))),
        }
    }

    fn date_from_json_field(field: &str, raw: &serde_json::Value) -> Result<Value, PageError> {
        match raw {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::String(s) => OffsetDateTime::parse(s, &Rfc3339)
                .map(Value::Date)
                .map_err(|e| {
                    PageError::InvalidRecord(format!("Field '{}' is not an RFC 3339 date: {}", field, e))
                }),
            other => Err(PageError::InvalidRecord(format!(
                "Field '{}' should hold an RFC 3339 date string, found {}",
                field, other
            ))),
        }
    }
}

fn format_number(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else {
        n.to_string()
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<OffsetDateTime> for Value {
    fn from(d: OffsetDateTime) -> Self {
        Value::Date(d)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::List(items.into_iter().map(String::from).collect())
    }
}

/// One schema-less item of a pageable collection.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for literals and tests.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> &Value {
        self.fields.get(field).unwrap_or(&NULL)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert a JSON object into a record. String fields named in
    /// `date_fields` are parsed as RFC 3339 timestamps.
    pub fn from_json<S: AsRef<str>>(
        value: &serde_json::Value,
        date_fields: &[S],
    ) -> Result<Record, PageError> {
        let object = value.as_object().ok_or_else(|| {
            PageError::InvalidRecord(format!("Expected a JSON object, found {}", value))
        })?;

        let mut record = Record::new();
        for (field, raw) in object {
            let parsed = if date_fields.iter().any(|d| d.as_ref() == field.as_str()) {
                Value::date_from_json_field(field, raw)?
            } else {
                Value::from_json_field(field, raw)?
            };
            record.fields.insert(field.clone(), parsed);
        }
        Ok(record)
    }
}

/// Parse a JSON document whose top level is an array of objects.
pub fn records_from_json_str<S: AsRef<str>>(
    text: &str,
    date_fields: &[S],
) -> Result<Vec<Record>, PageError> {
    let document: serde_json::Value = serde_json::from_str(text)?;
    let elements = document.as_array().ok_or_else(|| {
        PageError::InvalidRecord("Top-level JSON value must be an array of records".to_string())
    })?;

    let records = elements
        .iter()
        .map(|element| Record::from_json(element, date_fields))
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!(
        "Loaded {} records ({} date fields)",
        records.len(),
        date_fields.len()
    );
    Ok(records)
}
