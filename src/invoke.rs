//! Invoke-expression locator (C5): the innermost containing call, its name,
//! and which argument slot the caret sits in.

use tracing::instrument;

use crate::active_node::ActiveNode;
use crate::ast_schema;
use crate::error::Result;
use crate::graph::{NodeGraph, NodeId, NodeKind, NodePayload};
use crate::position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvokeArguments {
    pub num_arguments: usize,
    pub position_argument_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeExpressionInfo {
    pub xor_node_id: NodeId,
    pub maybe_name: Option<String>,
    pub maybe_arguments: Option<InvokeArguments>,
}

#[instrument(skip(graph, active_node))]
pub fn try_invoke_expression(
    graph: &NodeGraph,
    active_node: &ActiveNode,
) -> Result<Option<InvokeExpressionInfo>> {
    let ancestry = &active_node.ancestry;

    for i in 0..ancestry.len() {
        let node = &ancestry[i];
        if node.kind() != NodeKind::InvokeExpression {
            continue;
        }

        let Some(wrapper) = graph.child_at_attribute_index(
            node.id(),
            ast_schema::INVOKE_EXPRESSION_ARGUMENTS,
            Some(&[NodeKind::ArrayWrapper]),
        )?
        else {
            return Ok(Some(InvokeExpressionInfo {
                xor_node_id: node.id(),
                maybe_name: graph.invoke_expression_name(node.id())?,
                maybe_arguments: None,
            }));
        };

        if let Some(close) = graph.child_at_attribute_index(
            wrapper.id(),
            ast_schema::ARRAY_WRAPPER_CLOSE,
            Some(&[NodeKind::Constant]),
        )? {
            if let Some(ast) = close.as_ast() {
                if position::is_in_token_range(active_node.position, ast.token_range, true, true)
                {
                    // Caret is on the closing paren — outside the call.
                    continue;
                }
            }
        }

        let maybe_content = graph.child_at_attribute_index(
            wrapper.id(),
            ast_schema::ARRAY_WRAPPER_CONTENT,
            None,
        )?;

        let maybe_arguments = match maybe_content {
            None => None,
            Some(content) => {
                let csvs = graph.children(content.id())?;
                let num_arguments = csvs.len();
                let position_argument_index = csvs
                    .iter()
                    .enumerate()
                    .find(|(_, csv)| ancestry[..i].iter().any(|h| h.id() == csv.id()))
                    .map(|(slot, csv)| {
                        let mut index = csv.attribute_index().unwrap_or(slot as u8) as usize;
                        if let Some(ast) = csv.as_ast() {
                            if let NodePayload::Csv {
                                trailing_comma_end: Some(comma_end),
                            } = ast.payload
                            {
                                if position::is_on(active_node.position, comma_end) {
                                    index += 1;
                                }
                            }
                        }
                        index
                    })
                    .unwrap_or(0);
                Some(InvokeArguments {
                    num_arguments,
                    position_argument_index,
                })
            }
        };

        return Ok(Some(InvokeExpressionInfo {
            xor_node_id: node.id(),
            maybe_name: graph.invoke_expression_name(node.id())?,
            maybe_arguments,
        }));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;
    use crate::position::{Position, TokenRange};

    struct Fixture {
        graph: NodeGraph,
        csv0: NodeId,
        invoke_expr: NodeId,
    }

    /// `foo(a, b)` — two csv-wrapped arguments, no trailing comma on either.
    fn build() -> Fixture {
        let mut b = GraphBuilder::new();

        let a = b.ast_identifier("a", 0, 4, Some(0), false);
        let csv0 = b.ast(
            NodeKind::Csv,
            TokenRange::new(Position::new(0, 4), Position::new(0, 6), 4, 6),
            Some(0),
            NodePayload::Csv {
                trailing_comma_end: Some(Position::new(0, 5)),
            },
        );
        b.set_parent(a, csv0);
        b.set_children(csv0, vec![Some(a)]);

        let bee = b.ast_identifier("b", 0, 7, Some(0), false);
        let csv1 = b.ast(
            NodeKind::Csv,
            TokenRange::new(Position::new(0, 7), Position::new(0, 8), 7, 8),
            Some(1),
            NodePayload::Csv {
                trailing_comma_end: None,
            },
        );
        b.set_parent(bee, csv1);
        b.set_children(csv1, vec![Some(bee)]);

        let content = b.ast(
            NodeKind::Other("ArgumentCsvList"),
            TokenRange::new(Position::new(0, 4), Position::new(0, 8), 4, 8),
            Some(ast_schema::ARRAY_WRAPPER_CONTENT),
            NodePayload::None,
        );
        b.set_parent(csv0, content);
        b.set_parent(csv1, content);
        b.set_children(content, vec![Some(csv0), Some(csv1)]);

        let wrapper = b.ast(
            NodeKind::ArrayWrapper,
            TokenRange::new(Position::new(0, 3), Position::new(0, 9), 3, 9),
            Some(ast_schema::INVOKE_EXPRESSION_ARGUMENTS),
            NodePayload::None,
        );
        b.set_parent(content, wrapper);
        b.set_children(wrapper, vec![None, Some(content)]);

        let invoke_expr = b.ast_leaf(NodeKind::InvokeExpression, 0, 0, 0, 9, None);
        b.set_parent(wrapper, invoke_expr);
        b.set_children(invoke_expr, vec![None, Some(wrapper)]);

        Fixture {
            graph: b.build(),
            csv0,
            invoke_expr,
        }
    }

    #[test]
    fn mid_second_argument_reports_its_index() {
        let f = build();

        let content = f
            .graph
            .child_at_attribute_index(f.invoke_expr, ast_schema::INVOKE_EXPRESSION_ARGUMENTS, None)
            .unwrap()
            .unwrap();
        let csv1 = f
            .graph
            .children(content.id())
            .unwrap()
            .into_iter()
            .nth(1)
            .unwrap();
        let bee = f
            .graph
            .child_at_attribute_index(csv1.id(), 0, None)
            .unwrap()
            .unwrap();

        let active = crate::active_node::ActiveNode {
            position: Position::new(0, 8),
            ancestry: f.graph.ancestry(bee.id()).unwrap(),
            maybe_identifier_under_position: None,
        };

        let info = try_invoke_expression(&f.graph, &active).unwrap().unwrap();
        let args = info.maybe_arguments.unwrap();
        assert_eq!(args.num_arguments, 2);
        assert_eq!(args.position_argument_index, 1);
    }

    #[test]
    fn caret_on_trailing_comma_advances_to_next_argument() {
        let f = build();
        let active = crate::active_node::ActiveNode {
            position: Position::new(0, 5),
            ancestry: f.graph.ancestry(f.csv0).unwrap(),
            maybe_identifier_under_position: None,
        };

        let info = try_invoke_expression(&f.graph, &active).unwrap().unwrap();
        let args = info.maybe_arguments.unwrap();
        assert_eq!(args.num_arguments, 2);
        assert_eq!(args.position_argument_index, 1);
    }
}
