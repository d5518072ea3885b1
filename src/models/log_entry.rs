//! Behavior log entry and its wire form

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::LogError;

/// Body of `POST /api/log-behavior` as received.
///
/// Every field is optional here so that an absent key, a `null` and an
/// empty string all end up as the same missing-field answer. Numbers and
/// booleans are taken as their text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogBehaviorRequest {
    #[serde(default, deserialize_with = "scalar_text")]
    pub student: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub end_time: Option<String>,
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        other => Err(de::Error::invalid_type(
            de::Unexpected::Other(if other.is_array() { "array" } else { "object" }),
            &"a string, number or boolean",
        )),
    }
}

/// One tracked interval for one student.
///
/// A `LogEntry` can only be built with all four fields present and
/// non-empty, so it is serialized but never deserialized directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    student: String,
    date: String,
    start_time: String,
    end_time: String,
}

impl LogEntry {
    pub fn new(
        student: impl Into<String>,
        date: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Result<Self, LogError> {
        let entry = Self {
            student: student.into(),
            date: date.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        };

        for (name, value) in [
            ("student", &entry.student),
            ("date", &entry.date),
            ("startTime", &entry.start_time),
            ("endTime", &entry.end_time),
        ] {
            if value.is_empty() {
                return Err(LogError::MissingField(name));
            }
        }

        Ok(entry)
    }

    pub fn student(&self) -> &str {
        &self.student
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    pub fn end_time(&self) -> &str {
        &self.end_time
    }

    /// Spreadsheet row in column order: student, date, start, end
    pub fn into_row(self) -> Vec<String> {
        vec![self.student, self.date, self.start_time, self.end_time]
    }
}

impl TryFrom<LogBehaviorRequest> for LogEntry {
    type Error = LogError;

    fn try_from(request: LogBehaviorRequest) -> Result<Self, Self::Error> {
        LogEntry::new(
            request.student.unwrap_or_default(),
            request.date.unwrap_or_default(),
            request.start_time.unwrap_or_default(),
            request.end_time.unwrap_or_default(),
        )
    }
}
