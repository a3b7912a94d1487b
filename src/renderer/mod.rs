//! DSL source renderer
//!
//! Serializes a call tree into fluent DSL source text: nested children
//! become trailing arguments, chained children become fluent suffixes, and
//! no-op calls are omitted entirely.

use crate::codegen::{CallNode, CallTree, LiteralValue};

const INDENT: &str = "  ";

/// Reference renderer for the generated call tree
#[derive(Debug, Clone, Default)]
pub struct DslRenderer;

impl DslRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render the call tree as a single DSL expression
    pub fn render(&self, tree: &CallTree) -> String {
        if tree.root.is_noop {
            return String::new();
        }
        self.render_call(&tree.root, 0)
    }

    /// Render the call tree wrapped in the runnable scaffold
    pub fn render_script(&self, tree: &CallTree) -> String {
        let expression = self.render(tree);
        if expression.is_empty() {
            return String::new();
        }
        format!(
            "// Performance test plan generated by plan2dsl\n{}.run()\n",
            expression
        )
    }

    fn render_call(&self, node: &CallNode, indent: usize) -> String {
        let mut rendered = self.render_invocation(node, indent);

        for chained in node.chained_children() {
            if chained.is_noop {
                continue;
            }
            rendered.push('\n');
            rendered.push_str(&INDENT.repeat(indent + 1));
            rendered.push('.');
            rendered.push_str(&self.render_call(chained, indent + 1));
        }

        rendered
    }

    fn render_invocation(&self, node: &CallNode, indent: usize) -> String {
        let args = node
            .arguments
            .iter()
            .map(render_literal)
            .collect::<Vec<_>>()
            .join(", ");

        let nested: Vec<&CallNode> = node.nested_children().filter(|c| !c.is_noop).collect();
        if nested.is_empty() {
            return format!("{}({})", node.function_name, args);
        }

        // Arguments stay on the head line; nested child calls follow one per
        // line as trailing arguments.
        let head = if args.is_empty() {
            format!("{}(", node.function_name)
        } else {
            format!("{}({},", node.function_name, args)
        };

        let inner = INDENT.repeat(indent + 1);
        let children = nested
            .into_iter()
            .map(|child| format!("{inner}{}", self.render_call(child, indent + 1)))
            .collect::<Vec<_>>()
            .join(",\n");

        format!("{}\n{}\n{})", head, children, INDENT.repeat(indent))
    }
}

fn render_literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Str(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
        LiteralValue::Int(i) => i.to_string(),
        LiteralValue::Float(f) => {
            if f.fract() == 0.0 && f.is_finite() {
                format!("{f:.1}")
            } else {
                f.to_string()
            }
        }
        LiteralValue::Bool(b) => b.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::ChainDecision;

    fn call(name: &str, arguments: Vec<LiteralValue>) -> CallNode {
        CallNode::call(name, arguments)
    }

    #[test]
    fn test_render_leaf_call() {
        let tree = CallTree::new(call("pause", vec![LiteralValue::Int(1500)]));
        assert_eq!(DslRenderer::new().render(&tree), "pause(1500)");
    }

    #[test]
    fn test_render_nested_and_chained_children() {
        let mut sampler = call(
            "httpSampler",
            vec![LiteralValue::Str("http://example.com".into())],
        );
        sampler.push_child(
            call("pause", vec![LiteralValue::Int(1500)]),
            ChainDecision::Chained,
        );

        let mut group = call(
            "threadGroup",
            vec![LiteralValue::Int(10), LiteralValue::Int(5)],
        );
        group.push_child(sampler, ChainDecision::Nested);

        let mut plan = call("testPlan", vec![]);
        plan.push_child(group, ChainDecision::Nested);

        let rendered = DslRenderer::new().render(&CallTree::new(plan));
        let expected = "\
testPlan(
  threadGroup(10, 5,
    httpSampler(\"http://example.com\")
      .pause(1500)
  )
)";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_omits_noop_calls() {
        let mut sampler = call(
            "httpSampler",
            vec![LiteralValue::Str("http://example.com".into())],
        );
        sampler.push_child(CallNode::noop("pause"), ChainDecision::Chained);

        let rendered = DslRenderer::new().render(&CallTree::new(sampler));
        assert_eq!(rendered, "httpSampler(\"http://example.com\")");
    }

    #[test]
    fn test_render_sibling_groups_stay_ordered() {
        let mut plan = call("testPlan", vec![]);
        plan.push_child(
            call("threadGroup", vec![LiteralValue::Int(1)]),
            ChainDecision::Nested,
        );
        plan.push_child(
            call("threadGroup", vec![LiteralValue::Int(2)]),
            ChainDecision::Nested,
        );

        let rendered = DslRenderer::new().render(&CallTree::new(plan));
        let first = rendered.find("threadGroup(1)").unwrap();
        let second = rendered.find("threadGroup(2)").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_render_escapes_string_literals() {
        let tree = CallTree::new(call(
            "responseAssertion",
            vec![LiteralValue::Str("say \"hi\"".into())],
        ));
        assert_eq!(
            DslRenderer::new().render(&tree),
            "responseAssertion(\"say \\\"hi\\\"\")"
        );
    }

    #[test]
    fn test_render_script_appends_run() {
        let tree = CallTree::new(call("testPlan", vec![]));
        let script = DslRenderer::new().render_script(&tree);
        assert!(script.starts_with("// Performance test plan generated by plan2dsl\n"));
        assert!(script.ends_with("testPlan().run()\n"));
    }

    #[test]
    fn test_float_literals_keep_a_decimal_point() {
        assert_eq!(render_literal(&LiteralValue::Float(2.0)), "2.0");
        assert_eq!(render_literal(&LiteralValue::Float(1.5)), "1.5");
    }
}
