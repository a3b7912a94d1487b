//! Call builder
//!
//! Produces one call node per configuration element: selects a builder
//! descriptor, extracts and prunes parameters, recurses into children, and
//! applies the no-op edge policy.

use crate::error::{Plan2DslError, Result};
use crate::models::ConfigNode;
use tracing::debug;

use super::context::{TraversalContext, chain_or_nest};
use super::params::{self, LiteralValue, ParamValue};
use super::registry::{BuilderDescriptor, BuilderRegistry};
use super::tree::CallNode;

pub struct CallBuilder<'r> {
    registry: &'r BuilderRegistry,
}

impl<'r> CallBuilder<'r> {
    pub fn new(registry: &'r BuilderRegistry) -> Self {
        Self { registry }
    }

    /// Build the call for one element, recursing into its children.
    ///
    /// Fails fast on the first malformed property, unsupported expression,
    /// or unknown element encountered depth-first, left-to-right; no partial
    /// call is ever returned.
    pub fn build(&self, node: &ConfigNode, ctx: &TraversalContext) -> Result<CallNode> {
        let path = ctx.path();
        let descriptor = self.registry.select(node, &path)?;

        let extracted = self.extract_params(node, descriptor, &path)?;
        let resolved = resolve_params(descriptor, &extracted);
        let arguments = prune_trailing_defaults(descriptor, &extracted, &resolved);

        let is_noop = descriptor.noop_when.is_some_and(|no_effect| no_effect(&resolved));
        let mut call = if is_noop {
            debug!(path = %path, function = descriptor.function_name, "element has no runtime effect");
            CallNode::noop(descriptor.function_name)
        } else {
            CallNode::call(descriptor.function_name, arguments)
        };

        for (index, child) in node.children.iter().enumerate() {
            let child_ctx = ctx.descend(&child.element_type, index);
            let child_path = child_ctx.path();
            let child_descriptor = self.registry.select(child, &child_path)?;
            let attachment =
                chain_or_nest(descriptor.scope_rule, child_descriptor.scope_rule, &child_path)?;

            let built = self.build(child, &child_ctx)?;
            if built.is_noop {
                // The omitted call's children keep their structural position
                // under this node.
                call.children.extend(built.children);
            } else {
                call.push_child(built, attachment);
            }
        }

        Ok(call)
    }

    fn extract_params(
        &self,
        node: &ConfigNode,
        descriptor: &BuilderDescriptor,
        path: &str,
    ) -> Result<Vec<ParamValue>> {
        let mut extracted = Vec::with_capacity(descriptor.params.len());
        for spec in &descriptor.params {
            let value = params::extract(node.property(spec.property), spec, path)?;
            if let ParamValue::UnsupportedExpression(raw) = value {
                return Err(Plan2DslError::UnsupportedExpression {
                    path: path.to_string(),
                    element_type: node.element_type.clone(),
                    property: spec.property.to_string(),
                    raw,
                });
            }
            extracted.push(value);
        }
        Ok(extracted)
    }
}

/// Substitute documented defaults for `EqualsDefault` parameters, yielding
/// the fully resolved argument values
fn resolve_params(descriptor: &BuilderDescriptor, extracted: &[ParamValue]) -> Vec<LiteralValue> {
    descriptor
        .params
        .iter()
        .zip(extracted)
        .map(|(spec, value)| match (value, &spec.default) {
            (ParamValue::Literal(literal), _) => literal.clone(),
            (ParamValue::EqualsDefault, Some(default)) => default.clone(),
            (ParamValue::EqualsDefault, None) => {
                unreachable!("extractor never defaults a required parameter")
            }
            (ParamValue::UnsupportedExpression(_), _) => {
                unreachable!("expressions abort the build before resolution")
            }
        })
        .collect()
}

/// Drop the trailing run of default-valued parameters.
///
/// Defaults are positional, so only a trailing run can be omitted without
/// ambiguity; a default-valued parameter followed by a non-default one is
/// emitted explicitly. The descriptor's minimum argument count restores
/// defaults from the left when pruning would leave the call ambiguous.
fn prune_trailing_defaults(
    descriptor: &BuilderDescriptor,
    extracted: &[ParamValue],
    resolved: &[LiteralValue],
) -> Vec<LiteralValue> {
    let mut keep = extracted.len();
    while keep > 0 && extracted[keep - 1] == ParamValue::EqualsDefault {
        keep -= 1;
    }
    if keep < descriptor.min_args {
        keep = descriptor.min_args.min(extracted.len());
    }
    resolved[..keep].to_vec()
}
