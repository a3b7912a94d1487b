//! Generated call tree
//!
//! Pure data structure produced by the call builder and consumed by the
//! renderer. Nodes are append-only during construction and never mutated
//! after their builder invocation returns.

use serde::Serialize;

use super::params::LiteralValue;

/// How a child call attaches to its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChainDecision {
    /// Appended fluently onto the parent's call (`parent(...).child(...)`)
    Chained,

    /// Passed as a trailing argument of the parent's call
    Nested,
}

/// One generated DSL call
#[derive(Debug, Clone, Serialize)]
pub struct CallNode {
    /// Name of the DSL builder function
    pub function_name: String,

    /// Ordered literal arguments (defaults already pruned)
    pub arguments: Vec<LiteralValue>,

    /// Ordered child calls with their attachment decisions
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CallChild>,

    /// Marks a call with no observable runtime effect; the renderer omits
    /// such calls entirely
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_noop: bool,
}

/// A child call together with its attachment decision
#[derive(Debug, Clone, Serialize)]
pub struct CallChild {
    pub node: CallNode,
    pub attachment: ChainDecision,
}

impl CallNode {
    pub fn call(function_name: &str, arguments: Vec<LiteralValue>) -> Self {
        Self {
            function_name: function_name.to_string(),
            arguments,
            children: Vec::new(),
            is_noop: false,
        }
    }

    /// A call recognized as having no runtime effect
    pub fn noop(function_name: &str) -> Self {
        Self {
            function_name: function_name.to_string(),
            arguments: Vec::new(),
            children: Vec::new(),
            is_noop: true,
        }
    }

    pub fn push_child(&mut self, node: CallNode, attachment: ChainDecision) {
        self.children.push(CallChild { node, attachment });
    }

    /// Children attached as trailing arguments, in order
    pub fn nested_children(&self) -> impl Iterator<Item = &CallNode> {
        self.children
            .iter()
            .filter(|c| c.attachment == ChainDecision::Nested)
            .map(|c| &c.node)
    }

    /// Children attached as fluent suffixes, in order
    pub fn chained_children(&self) -> impl Iterator<Item = &CallNode> {
        self.children
            .iter()
            .filter(|c| c.attachment == ChainDecision::Chained)
            .map(|c| &c.node)
    }
}

/// The complete output of one generation run
#[derive(Debug, Clone, Serialize)]
pub struct CallTree {
    pub root: CallNode,
}

impl CallTree {
    pub fn new(root: CallNode) -> Self {
        Self { root }
    }

    /// Visit every call depth-first, parents before children, children in
    /// attachment order
    pub fn visit<F: FnMut(&CallNode)>(&self, mut f: F) {
        fn walk<F: FnMut(&CallNode)>(node: &CallNode, f: &mut F) {
            f(node);
            for child in &node.children {
                walk(&child.node, f);
            }
        }
        walk(&self.root, &mut f);
    }

    /// Total number of calls in the tree, no-ops included
    pub fn call_count(&self) -> usize {
        let mut count = 0;
        self.visit(|_| count += 1);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visit_is_depth_first_in_child_order() {
        let mut root = CallNode::call("testPlan", Vec::new());
        let mut group = CallNode::call("threadGroup", vec![LiteralValue::Int(1)]);
        group.push_child(
            CallNode::call("httpSampler", vec![LiteralValue::Str("http://a".into())]),
            ChainDecision::Nested,
        );
        group.push_child(
            CallNode::call("pause", vec![LiteralValue::Int(1500)]),
            ChainDecision::Chained,
        );
        root.push_child(group, ChainDecision::Nested);

        let tree = CallTree::new(root);
        let mut order = Vec::new();
        tree.visit(|node| order.push(node.function_name.clone()));

        assert_eq!(order, ["testPlan", "threadGroup", "httpSampler", "pause"]);
        assert_eq!(tree.call_count(), 4);
    }

    #[test]
    fn test_child_iterators_split_by_attachment() {
        let mut node = CallNode::call("threadGroup", Vec::new());
        node.push_child(CallNode::call("pause", Vec::new()), ChainDecision::Chained);
        node.push_child(
            CallNode::call("httpSampler", Vec::new()),
            ChainDecision::Nested,
        );

        assert_eq!(node.chained_children().count(), 1);
        assert_eq!(node.nested_children().count(), 1);
    }
}
