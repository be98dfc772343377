//! Store-native query model.
//!
//! Backends translate a [`Filter`] into their own query language. The
//! semantics follow document stores: paths are dot-separated, and a path
//! that resolves to an array matches when the array itself or any of its
//! elements equals the operand.

use entitystore_model::Document;
use serde_json::Value;

/// An equality / set-membership query over document fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field at `path` equals `value`.
    Eq { path: String, value: Value },
    /// Field at `path` equals one of `values`.
    In { path: String, values: Vec<Value> },
    /// All filters match. An empty conjunction matches everything.
    And(Vec<Filter>),
}

impl Filter {
    pub fn equals(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn one_of<V: Into<Value>>(path: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Filter::In {
            path: path.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::And(filters.into_iter().collect())
    }

    /// Returns true if `document` satisfies this filter.
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::Eq { path, value } => {
                resolve(document, path).is_some_and(|found| value_matches(found, value))
            }
            Filter::In { path, values } => resolve(document, path)
                .is_some_and(|found| values.iter().any(|value| value_matches(found, value))),
            Filter::And(filters) => filters.iter().all(|f| f.matches(document)),
        }
    }
}

fn resolve<'a>(document: &'a Document, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = document.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn value_matches(found: &Value, operand: &Value) -> bool {
    if found == operand {
        return true;
    }
    match found {
        Value::Array(elements) => elements.iter().any(|element| element == operand),
        _ => false,
    }
}
