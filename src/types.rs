use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique identifier for a GitHub repository.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoId {
    /// The owner of the repository (e.g., "rust-lang").
    pub owner: String,
    /// The name of the repository (e.g., "rust").
    pub repo: String,
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// A single scalar cell in a [`MetricRecord`].
///
/// Floats are display-rounded to one decimal place.
#[derive(Clone, Debug, PartialEq)]
pub enum MetricValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Text(s) => f.write_str(s),
            MetricValue::Int(n) => write!(f, "{}", n),
            MetricValue::Float(x) => write!(f, "{:.1}", x),
        }
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::Text(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        MetricValue::Int(value)
    }
}

impl From<u64> for MetricValue {
    fn from(value: u64) -> Self {
        MetricValue::Int(value as i64)
    }
}

impl From<usize> for MetricValue {
    fn from(value: usize) -> Self {
        MetricValue::Int(value as i64)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Float(value)
    }
}

/// An ordered mapping from metric name to scalar value.
///
/// This is the sole output shape of the aggregators; row order is the
/// display order.
#[derive(Clone, Debug)]
pub struct MetricRecord {
    title: String,
    rows: Vec<(String, MetricValue)>,
}

impl MetricRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, name: &str, value: impl Into<MetricValue>) {
        self.rows.push((name.to_string(), value.into()));
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rows(&self) -> &[(String, MetricValue)] {
        &self.rows
    }

    /// Looks up a row by name. Intended for tests and callers that need a
    /// single metric rather than the whole table.
    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.rows
            .iter()
            .find(|(row_name, _)| row_name == name)
            .map(|(_, value)| value)
    }
}
