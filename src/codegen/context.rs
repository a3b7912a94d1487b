//! Traversal context
//!
//! Threads ancestor and scope information through the recursive build. Each
//! recursive call receives a new context derived from its parent's; no
//! mutable state is shared across sibling subtrees.

use crate::error::{Plan2DslError, Result};

use super::tree::ChainDecision;

/// Breadth of test-plan elements an element's effect applies to,
/// ordered narrowest to widest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScopeLevel {
    Sampler,
    Group,
    Plan,
}

impl ScopeLevel {
    pub fn name(&self) -> &'static str {
        match self {
            ScopeLevel::Sampler => "sampler",
            ScopeLevel::Group => "group",
            ScopeLevel::Plan => "plan",
        }
    }
}

/// Scope behavior declared by each element kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeRule {
    /// Opens a new scope for its subtree (plan, thread group, sampler)
    Container(ScopeLevel),

    /// Effect is confined to the enclosing scope (timers, assertions,
    /// config elements)
    Attachment,
}

/// Decide how a child call attaches to its structural parent.
///
/// An attachment's reach is never wider than the scope it is declared in, so
/// it chains fluently onto the parent's call. A container introduces a new
/// scope and becomes a trailing argument. Containers must nest strictly
/// narrower; anything else is a structural error in the authored plan.
pub fn chain_or_nest(
    parent: ScopeRule,
    child: ScopeRule,
    child_path: &str,
) -> Result<ChainDecision> {
    match (parent, child) {
        (_, ScopeRule::Attachment) => Ok(ChainDecision::Chained),
        (ScopeRule::Container(parent_level), ScopeRule::Container(child_level)) => {
            if child_level < parent_level {
                Ok(ChainDecision::Nested)
            } else {
                Err(Plan2DslError::ValidationError(format!(
                    "{}-level element at {} cannot contain a {}-level element",
                    parent_level.name(),
                    child_path,
                    child_level.name()
                )))
            }
        }
        (ScopeRule::Attachment, ScopeRule::Container(_)) => {
            Err(Plan2DslError::ValidationError(format!(
                "scoped element at {} cannot be nested under an attachment",
                child_path
            )))
        }
    }
}

/// One ancestor frame of the traversal
#[derive(Debug, Clone)]
pub struct Frame {
    pub element_type: String,
    pub sibling_index: usize,
}

/// Immutable-per-frame stack of ancestors, used for error paths and
/// chaining decisions. Never persisted beyond one generation run.
#[derive(Debug, Clone, Default)]
pub struct TraversalContext {
    frames: Vec<Frame>,
}

impl TraversalContext {
    /// Context above the root element
    pub fn root() -> Self {
        Self::default()
    }

    /// A new context with one more frame; the receiver is left untouched
    pub fn descend(&self, element_type: &str, sibling_index: usize) -> Self {
        let mut frames = self.frames.clone();
        frames.push(Frame {
            element_type: element_type.to_string(),
            sibling_index,
        });
        Self { frames }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Path of the current element, e.g. `/test_plan/thread_group[0]`.
    /// The root frame carries no index; siblings below it do.
    pub fn path(&self) -> String {
        if self.frames.is_empty() {
            return "/".to_string();
        }
        let mut path = String::new();
        for (depth, frame) in self.frames.iter().enumerate() {
            path.push('/');
            path.push_str(&frame.element_type);
            if depth > 0 {
                path.push_str(&format!("[{}]", frame.sibling_index));
            }
        }
        path
    }
}
