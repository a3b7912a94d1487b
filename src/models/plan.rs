use crate::error::{Plan2DslError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root object of a serialized test plan file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDocument {
    /// The version of the plan file format (e.g., "1.0")
    pub version: String,

    /// The root configuration element of the plan
    pub plan: ConfigNode,
}

/// One configuration element of an authored test plan
///
/// Elements form a tree: a plan contains thread groups, thread groups contain
/// samplers, and timers/assertions/config elements attach at any level.
/// Nodes are read-only once loaded; generation never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigNode {
    /// Tag identifying the kind of test element (e.g., "thread_group")
    #[serde(rename = "type")]
    pub element_type: String,

    /// Raw element properties, keyed by stable property names.
    /// Order is preserved as authored.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, PropertyValue>,

    /// Ordered child elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ConfigNode>,
}

/// A raw scalar property value as found in the plan file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl PropertyValue {
    /// Render the raw value as authored, for error reporting and
    /// expression-marker scanning
    pub fn as_text(&self) -> String {
        match self {
            PropertyValue::Bool(b) => b.to_string(),
            PropertyValue::Int(i) => i.to_string(),
            PropertyValue::Float(f) => f.to_string(),
            PropertyValue::Str(s) => s.clone(),
        }
    }
}

impl PlanDocument {
    /// Validate the plan document
    pub fn validate(&self) -> Result<()> {
        if !self.version.starts_with("1.") {
            return Err(Plan2DslError::ValidationError(format!(
                "Unsupported plan file version: {}",
                self.version
            )));
        }

        self.plan.validate()?;

        Ok(())
    }
}

impl ConfigNode {
    /// Validate the element subtree
    pub fn validate(&self) -> Result<()> {
        if self.element_type.is_empty() {
            return Err(Plan2DslError::ValidationError(
                "Element with empty type tag".to_string(),
            ));
        }

        for name in self.properties.keys() {
            if name.is_empty() {
                return Err(Plan2DslError::ValidationError(format!(
                    "Element '{}' has a property with an empty name",
                    self.element_type
                )));
            }
        }

        for child in &self.children {
            child.validate()?;
        }

        Ok(())
    }

    /// Look up a property by name
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(element_type: &str) -> ConfigNode {
        ConfigNode {
            element_type: element_type.to_string(),
            properties: IndexMap::new(),
            children: Vec::new(),
        }
    }

    #[test]
    fn test_validate_accepts_simple_tree() {
        let mut plan = node("test_plan");
        plan.children.push(node("thread_group"));

        let doc = PlanDocument {
            version: "1.0".to_string(),
            plan,
        };

        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_version() {
        let doc = PlanDocument {
            version: "2.0".to_string(),
            plan: node("test_plan"),
        };

        assert!(doc.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_element_type() {
        let mut plan = node("test_plan");
        plan.children.push(node(""));

        let doc = PlanDocument {
            version: "1.0".to_string(),
            plan,
        };

        assert!(doc.validate().is_err());
    }

    #[test]
    fn test_property_value_as_text() {
        assert_eq!(PropertyValue::Int(1500).as_text(), "1500");
        assert_eq!(PropertyValue::Bool(true).as_text(), "true");
        assert_eq!(
            PropertyValue::Str("${BASE_URL}".to_string()).as_text(),
            "${BASE_URL}"
        );
    }
}
