//! Code-generation engine
//!
//! Walks a configuration-element tree, matches each node against the builder
//! registry, and produces the call tree the renderer serializes into DSL
//! source. One generation run is a single synchronous depth-first pass; runs
//! share nothing but the read-only registry.

pub mod builder;
pub mod context;
pub mod params;
pub mod registry;
pub mod tree;

pub use builder::CallBuilder;
pub use context::{ScopeLevel, ScopeRule, TraversalContext, chain_or_nest};
pub use params::{LiteralValue, ParamSpec, ParamType, ParamValue};
pub use registry::{BuilderDescriptor, BuilderRegistry};
pub use tree::{CallChild, CallNode, CallTree, ChainDecision};

use crate::error::Result;
use crate::models::ConfigNode;

/// Front door of the engine: owns the registry, produces call trees
pub struct Generator {
    registry: BuilderRegistry,
}

impl Generator {
    pub fn new() -> Self {
        Self {
            registry: BuilderRegistry::standard(),
        }
    }

    pub fn registry(&self) -> &BuilderRegistry {
        &self.registry
    }

    /// Generate the call tree for a loaded plan.
    ///
    /// Either the whole tree is produced or the first error encountered
    /// depth-first is returned; there is no partial output.
    pub fn generate(&self, root: &ConfigNode) -> Result<CallTree> {
        let ctx = TraversalContext::root().descend(&root.element_type, 0);
        let root_call = CallBuilder::new(&self.registry).build(root, &ctx)?;
        Ok(CallTree::new(root_call))
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a call tree with the standard registry
pub fn generate(root: &ConfigNode) -> Result<CallTree> {
    Generator::new().generate(root)
}
