use tracing::instrument;

use crate::active_node::ActiveNode;
use crate::ast_schema;
use crate::config::InspectionConfig;
use crate::error::Result;
use crate::graph::{NodeGraph, NodeHandle, NodeId, NodeKind, NodePayload};
use crate::position;

use super::item::ScopeItem;
use super::NodeScope;

#[instrument(skip(graph, active_node, config))]
pub fn try_node_scope(
    graph: &NodeGraph,
    active_node: &ActiveNode,
    config: &InspectionConfig,
) -> Result<NodeScope> {
    let mut scope = NodeScope::new();
    let ancestry = &active_node.ancestry;

    for i in 0..ancestry.len() {
        if let Some(token) = &config.cancellation_token {
            token.check()?;
        }
        let previous = if i > 0 { Some(&ancestry[i - 1]) } else { None };
        contribute(graph, &mut scope, ancestry, i, previous, active_node.position)?;
    }

    Ok(scope)
}

fn contribute(
    graph: &NodeGraph,
    scope: &mut NodeScope,
    ancestry: &[NodeHandle],
    i: usize,
    previous: Option<&NodeHandle>,
    pos: position::Position,
) -> Result<()> {
    let node = &ancestry[i];
    match node.kind() {
        NodeKind::EachExpression => {
            if attribute_index_of(previous) == Some(ast_schema::EACH_EXPRESSION_BODY) {
                scope.insert_if_absent("_", ScopeItem::Each {
                    each_expr_node_id: node.id(),
                });
            }
        }

        NodeKind::FunctionExpression => {
            if attribute_index_of(previous) == Some(ast_schema::FUNCTION_EXPRESSION_BODY) {
                if let Some(params) = graph.child_at_attribute_index(
                    node.id(),
                    ast_schema::FUNCTION_EXPRESSION_PARAMETERS,
                    Some(&[NodeKind::ParameterList]),
                )? {
                    for param in graph.children(params.id())? {
                        add_parameter_to_scope(scope, &param);
                    }
                }
            }
            // attribute_index_of(previous) == Some(FUNCTION_EXPRESSION_PARAMETERS):
            // caret is writing a parameter — contribute nothing.
        }

        NodeKind::Identifier => {
            if is_child_of(graph, node.id(), NodeKind::IdentifierExpression)? {
                return Ok(());
            }
            if i == 0 && caret_strictly_before_start(node, pos) {
                return Ok(());
            }
            if let Some(literal) = identifier_literal(node) {
                scope.insert_if_absent(literal, ScopeItem::Undefined {
                    xor_node_id: node.id(),
                });
            }
        }

        NodeKind::IdentifierExpression => {
            if i == 0 && caret_strictly_before_start(node, pos) {
                return Ok(());
            }
            let maybe_at = graph.child_at_attribute_index(
                node.id(),
                ast_schema::IDENTIFIER_EXPRESSION_INCLUSIVE_CONSTANT,
                Some(&[NodeKind::Constant]),
            )?;
            if let Some(identifier) = graph.child_at_attribute_index(
                node.id(),
                ast_schema::IDENTIFIER_EXPRESSION_IDENTIFIER,
                Some(&[NodeKind::Identifier]),
            )? {
                if let Some(literal) = identifier_literal(&identifier) {
                    let key = if maybe_at.is_some() {
                        format!("@{literal}")
                    } else {
                        literal
                    };
                    scope.insert_if_absent(key, ScopeItem::Undefined {
                        xor_node_id: node.id(),
                    });
                }
            }
        }

        NodeKind::InvokeExpression => {
            // Handled by the invoke-expression locator (C5); no scope
            // contribution here.
        }

        NodeKind::LetExpression => {
            let in_case =
                attribute_index_of(previous) == Some(ast_schema::LET_EXPRESSION_IN_EXPRESSION);
            if let Some(list) = graph.child_at_attribute_index(
                node.id(),
                ast_schema::LET_EXPRESSION_VARIABLE_LIST,
                None,
            )? {
                let elements = csv_elements(graph, list.id())?;
                let caret_kv = elements
                    .iter()
                    .find(|kv| caret_on_value_side(ancestry, kv.id()))
                    .map(|kv| kv.id());
                if in_case || caret_kv.is_some() {
                    for kv in &elements {
                        add_key_value_pair_to_scope(graph, scope, kv, caret_kv)?;
                    }
                }
            }
        }

        NodeKind::RecordExpression | NodeKind::RecordLiteral => {
            if let Some(list) =
                graph.child_at_attribute_index(node.id(), ast_schema::RECORD_CONTENT, None)?
            {
                let elements = csv_elements(graph, list.id())?;
                let caret_kv = elements
                    .iter()
                    .find(|kv| caret_on_value_side(ancestry, kv.id()))
                    .map(|kv| kv.id());
                if let Some(caret_kv) = caret_kv {
                    for kv in &elements {
                        add_key_value_pair_to_scope(graph, scope, kv, Some(caret_kv))?;
                    }
                }
            }
        }

        NodeKind::SectionMember => {
            contribute_section_member(graph, scope, ancestry, node, pos)?;
        }

        _ => {}
    }

    Ok(())
}

fn contribute_section_member(
    graph: &NodeGraph,
    scope: &mut NodeScope,
    ancestry: &[NodeHandle],
    section_member: &NodeHandle,
    pos: position::Position,
) -> Result<()> {
    if let Some(ast) = section_member.as_ast() {
        if let NodePayload::SectionMember {
            trailing_semicolon_end: Some(semicolon_end),
        } = ast.payload
        {
            if position::is_after(pos, semicolon_end, true) {
                return Ok(());
            }
        }
    }

    let Some(name_paired_expression) = graph.child_at_attribute_index(
        section_member.id(),
        ast_schema::SECTION_MEMBER_NAME_PAIRED_EXPRESSION,
        Some(&[NodeKind::KeyValuePair]),
    )?
    else {
        return Ok(());
    };

    if !caret_on_value_side(ancestry, name_paired_expression.id()) {
        return Ok(());
    }

    let Some(parent_section) = graph.parent(section_member.id())? else {
        return Ok(());
    };

    for member in graph.children(parent_section.id())? {
        if member.kind() != NodeKind::SectionMember {
            continue;
        }
        let Some(npe) = graph.child_at_attribute_index(
            member.id(),
            ast_schema::SECTION_MEMBER_NAME_PAIRED_EXPRESSION,
            Some(&[NodeKind::KeyValuePair]),
        )?
        else {
            continue;
        };
        let Some(key) =
            graph.child_at_attribute_index(npe.id(), 0, Some(&[NodeKind::Identifier, NodeKind::GeneralizedIdentifier]))?
        else {
            continue;
        };
        let Some(literal) = identifier_literal(&key) else {
            continue;
        };
        let is_recursive = member.id() == section_member.id();
        scope.insert_if_absent(literal, ScopeItem::SectionMember {
            key_node_id: key.id(),
            is_recursive,
        });
    }

    Ok(())
}

fn add_parameter_to_scope(scope: &mut NodeScope, param: &NodeHandle) {
    if param.kind() != NodeKind::Parameter {
        return;
    }
    let Some(ast) = param.as_ast() else { return };
    if let NodePayload::Parameter {
        name,
        modifiers,
        maybe_type,
    } = &ast.payload
    {
        scope.insert_if_absent(name.clone(), ScopeItem::Parameter {
            modifiers: *modifiers,
            maybe_type: *maybe_type,
            definition_node_id: ast.id,
        });
    }
}

fn add_key_value_pair_to_scope(
    graph: &NodeGraph,
    scope: &mut NodeScope,
    kv: &NodeHandle,
    caret_kv: Option<NodeId>,
) -> Result<()> {
    let Some(key) = graph.child_at_attribute_index(
        kv.id(),
        0,
        Some(&[NodeKind::Identifier, NodeKind::GeneralizedIdentifier]),
    )?
    else {
        return Ok(());
    };
    let Some(literal) = identifier_literal(&key) else {
        return Ok(());
    };
    let value =
        graph.child_at_attribute_index(kv.id(), ast_schema::KEY_VALUE_PAIR_VALUE, None)?;
    let is_recursive = caret_kv == Some(kv.id());
    scope.insert_if_absent(literal, ScopeItem::KeyValuePair {
        key_node_id: key.id(),
        maybe_value_node_id: value.map(|v| v.id()),
        is_recursive,
    });
    Ok(())
}

/// The elements of a CSV-wrapped list: each `Csv`'s attribute-0 child.
pub(crate) fn csv_elements(graph: &NodeGraph, container_id: NodeId) -> Result<Vec<NodeHandle>> {
    let mut out = Vec::new();
    for csv in graph.children(container_id)? {
        if let Some(inner) = graph.child_at_attribute_index(csv.id(), 0, None)? {
            out.push(inner);
        }
    }
    Ok(out)
}

fn caret_on_value_side(ancestry: &[NodeHandle], kv_id: NodeId) -> bool {
    match ancestry.iter().position(|h| h.id() == kv_id) {
        Some(idx) if idx > 0 => {
            ancestry[idx - 1].attribute_index() == Some(ast_schema::KEY_VALUE_PAIR_VALUE)
        }
        _ => false,
    }
}

fn attribute_index_of(handle: Option<&NodeHandle>) -> Option<u8> {
    handle.and_then(|h| h.attribute_index())
}

fn is_child_of(graph: &NodeGraph, id: NodeId, kind: NodeKind) -> Result<bool> {
    Ok(graph.parent(id)?.map(|p| p.kind()) == Some(kind))
}

fn caret_strictly_before_start(node: &NodeHandle, pos: position::Position) -> bool {
    match node {
        NodeHandle::Ast(ast) => position::is_before(pos, ast.token_range.start, false),
        NodeHandle::Context(ctx) => match ctx.maybe_token_start {
            Some(start) => position::is_before(pos, start, false),
            None => false,
        },
    }
}

fn identifier_literal(handle: &NodeHandle) -> Option<String> {
    let ast = handle.as_ast()?;
    match &ast.payload {
        NodePayload::Identifier { literal, .. } => Some(literal.clone()),
        NodePayload::GeneralizedIdentifier { literal } => Some(literal.clone()),
        _ => None,
    }
}
