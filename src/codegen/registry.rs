//! Builder registry and dispatch
//!
//! A static catalog of builder descriptors, one or more per configuration
//! element kind. Dispatch is deterministic: among descriptors whose
//! applicability predicate is satisfied, the one consuming the node's
//! property set most closely wins, with registration order as the final
//! tie-break.

use crate::error::{Plan2DslError, Result};
use crate::models::ConfigNode;
use tracing::debug;

use super::context::{ScopeLevel, ScopeRule};
use super::params::{LiteralValue, ParamSpec, ParamType};

/// Static metadata mapping one configuration-element kind to a DSL call
#[derive(Debug)]
pub struct BuilderDescriptor {
    /// Element type tag this descriptor targets
    pub element_type: &'static str,

    /// DSL builder function emitted for the element
    pub function_name: &'static str,

    /// Consumed properties, in call-argument order
    pub params: Vec<ParamSpec>,

    /// Whether this descriptor applies to the node's actual property set
    pub applies: fn(&ConfigNode) -> bool,

    /// Scope behavior of the element kind
    pub scope_rule: ScopeRule,

    /// Recognizes a parameterization with no observable runtime effect.
    /// Receives the fully resolved argument values, defaults included.
    pub noop_when: Option<fn(&[LiteralValue]) -> bool>,

    /// Minimum number of arguments the emitted call must keep, even when
    /// every parameter equals its default
    pub min_args: usize,
}

impl BuilderDescriptor {
    fn consumes(&self, property: &str) -> bool {
        self.params.iter().any(|p| p.property == property)
    }

    fn unused_property_count(&self, node: &ConfigNode) -> usize {
        node.properties
            .keys()
            .filter(|name| !self.consumes(name))
            .count()
    }
}

fn always(_: &ConfigNode) -> bool {
    true
}

/// Read-only catalog of all registered builders
pub struct BuilderRegistry {
    descriptors: Vec<BuilderDescriptor>,
}

impl BuilderRegistry {
    /// The standard element catalog
    pub fn standard() -> Self {
        let mut registry = Self {
            descriptors: Vec::new(),
        };

        registry.register(BuilderDescriptor {
            element_type: "test_plan",
            function_name: "testPlan",
            params: vec![],
            applies: always,
            scope_rule: ScopeRule::Container(ScopeLevel::Plan),
            noop_when: None,
            min_args: 0,
        });

        // Iteration-based thread group; loses to the duration-based
        // descriptor whenever the node carries duration_seconds.
        registry.register(BuilderDescriptor {
            element_type: "thread_group",
            function_name: "threadGroup",
            params: vec![
                ParamSpec::with_default("threads", ParamType::Int, LiteralValue::Int(1)),
                ParamSpec::with_default("iterations", ParamType::Int, LiteralValue::Int(1)),
            ],
            applies: |node| node.property("duration_seconds").is_none(),
            scope_rule: ScopeRule::Container(ScopeLevel::Group),
            noop_when: None,
            min_args: 0,
        });

        registry.register(BuilderDescriptor {
            element_type: "thread_group",
            function_name: "threadGroup",
            params: vec![
                ParamSpec::with_default("threads", ParamType::Int, LiteralValue::Int(1)),
                ParamSpec::required("duration_seconds", ParamType::Int),
            ],
            applies: |node| node.property("duration_seconds").is_some(),
            scope_rule: ScopeRule::Container(ScopeLevel::Group),
            noop_when: None,
            min_args: 0,
        });

        registry.register(BuilderDescriptor {
            element_type: "http_sampler",
            function_name: "httpSampler",
            params: vec![
                ParamSpec::required("url", ParamType::Str),
                ParamSpec::with_default(
                    "method",
                    ParamType::Str,
                    LiteralValue::Str("GET".to_string()),
                ),
                ParamSpec::with_default("body", ParamType::Str, LiteralValue::Str(String::new())),
            ],
            applies: always,
            scope_rule: ScopeRule::Container(ScopeLevel::Sampler),
            noop_when: None,
            min_args: 1,
        });

        // A zero-delay pause never affects the running test.
        registry.register(BuilderDescriptor {
            element_type: "constant_timer",
            function_name: "pause",
            params: vec![ParamSpec::with_default(
                "delay_ms",
                ParamType::Int,
                LiteralValue::Int(0),
            )],
            applies: always,
            scope_rule: ScopeRule::Attachment,
            noop_when: Some(|args| matches!(args, [LiteralValue::Int(0)])),
            min_args: 0,
        });

        registry.register(BuilderDescriptor {
            element_type: "uniform_random_timer",
            function_name: "uniformRandomTimer",
            params: vec![
                ParamSpec::with_default("min_ms", ParamType::Int, LiteralValue::Int(0)),
                ParamSpec::with_default("max_ms", ParamType::Int, LiteralValue::Int(100)),
            ],
            applies: always,
            scope_rule: ScopeRule::Attachment,
            noop_when: None,
            // uniformRandomTimer() with no arguments would be ambiguous with
            // an unconfigured timer, so at least one argument stays.
            min_args: 1,
        });

        registry.register(BuilderDescriptor {
            element_type: "response_assertion",
            function_name: "responseAssertion",
            params: vec![
                ParamSpec::required("pattern", ParamType::Str),
                ParamSpec::with_default("ignore_status", ParamType::Bool, LiteralValue::Bool(false)),
            ],
            applies: always,
            scope_rule: ScopeRule::Attachment,
            noop_when: None,
            min_args: 1,
        });

        registry.register(BuilderDescriptor {
            element_type: "csv_data_set",
            function_name: "csvDataSet",
            params: vec![
                ParamSpec::required("file", ParamType::Str),
                ParamSpec::with_default(
                    "delimiter",
                    ParamType::Str,
                    LiteralValue::Str(",".to_string()),
                ),
            ],
            applies: always,
            scope_rule: ScopeRule::Attachment,
            noop_when: None,
            min_args: 1,
        });

        registry.register(BuilderDescriptor {
            element_type: "http_header",
            function_name: "httpHeader",
            params: vec![
                ParamSpec::required("name", ParamType::Str),
                ParamSpec::required("value", ParamType::Str),
            ],
            applies: always,
            scope_rule: ScopeRule::Attachment,
            noop_when: None,
            min_args: 2,
        });

        registry
    }

    fn register(&mut self, descriptor: BuilderDescriptor) {
        self.descriptors.push(descriptor);
    }

    /// All registered descriptors, in registration order
    pub fn descriptors(&self) -> &[BuilderDescriptor] {
        &self.descriptors
    }

    /// Select the builder for a node.
    ///
    /// Candidates are descriptors targeting the node's element type with a
    /// satisfied applicability predicate; the one leaving the fewest node
    /// properties unused wins, earliest-registered first on ties.
    pub fn select(&self, node: &ConfigNode, path: &str) -> Result<&BuilderDescriptor> {
        let mut best: Option<(&BuilderDescriptor, usize)> = None;

        for descriptor in &self.descriptors {
            if descriptor.element_type != node.element_type || !(descriptor.applies)(node) {
                continue;
            }
            let unused = descriptor.unused_property_count(node);
            match best {
                Some((_, best_unused)) if unused >= best_unused => {}
                _ => best = Some((descriptor, unused)),
            }
        }

        match best {
            Some((descriptor, unused)) => {
                debug!(
                    element_type = node.element_type,
                    function = descriptor.function_name,
                    unused_properties = unused,
                    "selected builder"
                );
                Ok(descriptor)
            }
            None => Err(Plan2DslError::NoBuilderFound {
                path: path.to_string(),
                element_type: node.element_type.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PropertyValue;
    use indexmap::IndexMap;

    fn node_with(element_type: &str, properties: &[(&str, PropertyValue)]) -> ConfigNode {
        ConfigNode {
            element_type: element_type.to_string(),
            properties: properties
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<IndexMap<_, _>>(),
            children: Vec::new(),
        }
    }

    #[test]
    fn test_select_unknown_element_fails() {
        let registry = BuilderRegistry::standard();
        let node = node_with("teleport_sampler", &[]);

        let err = registry.select(&node, "/test_plan/teleport_sampler[0]").unwrap_err();
        let message = err.to_string();
        assert!(
            message.contains("teleport_sampler"),
            "unexpected message: {message}"
        );
    }

    #[test]
    fn test_thread_group_dispatch_prefers_duration_descriptor() {
        let registry = BuilderRegistry::standard();
        let node = node_with(
            "thread_group",
            &[
                ("threads", PropertyValue::Int(10)),
                ("duration_seconds", PropertyValue::Int(60)),
            ],
        );

        let descriptor = registry.select(&node, "/p").unwrap();
        assert!(descriptor.params.iter().any(|p| p.property == "duration_seconds"));
    }

    #[test]
    fn test_thread_group_dispatch_defaults_to_iterations() {
        let registry = BuilderRegistry::standard();
        let node = node_with("thread_group", &[("threads", PropertyValue::Int(10))]);

        let descriptor = registry.select(&node, "/p").unwrap();
        assert!(descriptor.params.iter().any(|p| p.property == "iterations"));
    }

    #[test]
    fn test_dispatch_is_deterministic_across_calls() {
        let registry = BuilderRegistry::standard();
        let node = node_with("thread_group", &[]);

        let first = registry.select(&node, "/p").unwrap();
        let second = registry.select(&node, "/p").unwrap();
        assert!(std::ptr::eq(first, second));
    }
}
