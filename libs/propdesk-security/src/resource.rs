use serde::{Deserialize, Serialize};

use crate::value::Value;

/// A concrete record that instance-level checks can inspect.
pub trait Resource {
    /// Subject type the record belongs to, e.g. `Contract`.
    fn subject_type(&self) -> &str;

    /// Read a property by dotted path (`vendor.name`). `None` when the path
    /// does not resolve to a scalar.
    fn property(&self, path: &str) -> Option<Value>;
}

/// A record carried as JSON together with its subject type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JsonRecord {
    pub subject: String,
    pub data: serde_json::Value,
}

impl JsonRecord {
    #[must_use]
    pub fn new(subject: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            subject: subject.into(),
            data,
        }
    }

    /// Raw JSON at a dotted path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&serde_json::Value> {
        path.split('.')
            .try_fold(&self.data, |node, segment| node.get(segment))
    }
}

impl Resource for JsonRecord {
    fn subject_type(&self) -> &str {
        &self.subject
    }

    fn property(&self, path: &str) -> Option<Value> {
        self.get(path).and_then(Value::from_json)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_dotted_paths() {
        let record = JsonRecord::new(
            "Service",
            json!({"name": "Cleaning", "category": {"label": "Facility"}, "tags": ["a"]}),
        );
        assert_eq!(record.subject_type(), "Service");
        assert_eq!(record.property("category.label"), Some(Value::from("Facility")));
        assert_eq!(record.property("category.missing"), None);
        assert_eq!(record.property("tags"), None);
        assert!(record.get("tags").is_some());
    }
}
