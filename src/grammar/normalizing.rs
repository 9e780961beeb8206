//! Normalizing
//!
//! Removes every `Maybe` from the AST by expansion. A group with k optional
//! members becomes a `Choice` of its 2^k present/absent variants, so pattern
//! generation only ever joins mandatory elements and can use one whitespace
//! rule everywhere.
//!
//! Given `Group[A Maybe(B) C Maybe(D)]` the variants are, in mask order
//! (first optional member is the most significant bit):
//!
//! ```text
//! 00  Group[A C]
//! 01  Group[A C D]
//! 10  Group[A B C]
//! 11  Group[A B C D]
//! ```

use crate::grammar::error::NormalizeError;
use crate::grammar::parsing::Node;

/// Largest number of optional siblings expanded in one group
pub const MAX_OPTIONAL_SIBLINGS: usize = 16;

/// Rewrite `node` so no `Maybe` remains
pub fn normalize(node: &Node) -> Result<Node, NormalizeError> {
    match node {
        Node::Literal(_)
        | Node::Argument(_)
        | Node::UnqualifiedName
        | Node::QualifiedName
        | Node::Name => Ok(node.clone()),
        Node::Pipe | Node::Maybe(_) => Err(NormalizeError::UnexpectedNode {
            node: node.to_string(),
        }),
        Node::Repeat(inner, delimiter) => Ok(Node::repeat(normalize(inner)?, *delimiter)),
        Node::Group(members) => expand(node, members, Node::Group),
        Node::Choice(members) => expand(node, members, Node::Choice),
        Node::InParens(members) => expand(node, members, Node::InParens),
    }
}

fn normalize_all(members: &[Node]) -> Result<Vec<Node>, NormalizeError> {
    members.iter().map(normalize).collect()
}

/// Expand the optional members of a sequence kind
///
/// `rebuild` recreates the group kind for each variant, so an optional
/// alternative of a `Choice` yields `Choice` variants with and without it.
fn expand(
    node: &Node,
    members: &[Node],
    rebuild: fn(Vec<Node>) -> Node,
) -> Result<Node, NormalizeError> {
    let optional = members.iter().filter(|member| member.is_maybe()).count();
    if optional == 0 {
        return Ok(rebuild(normalize_all(members)?));
    }
    if optional > MAX_OPTIONAL_SIBLINGS {
        return Err(NormalizeError::TooManyOptionals {
            count: optional,
            limit: MAX_OPTIONAL_SIBLINGS,
        });
    }

    // Each member normalized once; variants reuse the results
    let mut slots: Vec<(bool, Node)> = Vec::with_capacity(members.len());
    for member in members {
        match member {
            Node::Maybe(inner) => slots.push((true, normalize(inner)?)),
            other => slots.push((false, normalize(other)?)),
        }
    }

    let count = 1usize << optional;
    log::trace!(
        "expanding {} optional members of {} into {} variants",
        optional,
        node.kind_name(),
        count
    );

    let mut variants = Vec::with_capacity(count);
    for mask in 0..count {
        let mut variant = Vec::with_capacity(members.len());
        let mut bit = optional;
        for (is_optional, member) in &slots {
            if *is_optional {
                bit -= 1;
                if mask & (1 << bit) == 0 {
                    continue;
                }
            }
            variant.push(member.clone());
        }

        if variant.is_empty() {
            return Err(NormalizeError::EmptyVariant {
                group: node.to_string(),
            });
        }
        variants.push(rebuild(variant));
    }

    Ok(Node::Choice(variants))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parsing::{parse_text, Delimiter};
    use std::collections::HashSet;

    fn lit(text: &str) -> Node {
        Node::literal(text)
    }

    #[test]
    fn test_no_optional_members_keeps_kind() {
        let node = Node::Group(vec![lit("A"), lit("B")]);
        assert_eq!(normalize(&node).unwrap(), node);
    }

    #[test]
    fn test_mask_order() {
        let node = Node::Group(vec![
            lit("A"),
            Node::maybe(lit("B")),
            lit("C"),
            Node::maybe(lit("D")),
        ]);
        assert_eq!(
            normalize(&node).unwrap(),
            Node::Choice(vec![
                Node::Group(vec![lit("A"), lit("C")]),
                Node::Group(vec![lit("A"), lit("C"), lit("D")]),
                Node::Group(vec![lit("A"), lit("B"), lit("C")]),
                Node::Group(vec![lit("A"), lit("B"), lit("C"), lit("D")]),
            ])
        );
    }

    #[test]
    fn test_k_optionals_give_two_to_the_k_distinct_variants() {
        for k in 0..6 {
            let mut members = vec![lit("HEAD")];
            for i in 0..k {
                members.push(Node::maybe(lit(&format!("OPT_{}", i))));
            }
            let normalized = normalize(&Node::Group(members)).unwrap();
            match normalized {
                Node::Choice(variants) => {
                    assert_eq!(variants.len(), 1 << k);
                    let distinct: HashSet<_> = variants.iter().collect();
                    assert_eq!(distinct.len(), 1 << k);
                }
                Node::Group(_) => assert_eq!(k, 0),
                other => panic!("unexpected {}", other),
            }
        }
    }

    #[test]
    fn test_nested_optionals_are_expanded() {
        let node = parse_text("A [ B [ C ] ]").unwrap();
        let normalized = normalize(&node).unwrap();
        assert!(!normalized.contains_maybe());
        assert_eq!(
            normalized,
            Node::Choice(vec![
                Node::Group(vec![lit("A")]),
                Node::Group(vec![
                    lit("A"),
                    Node::Choice(vec![
                        Node::Group(vec![lit("B")]),
                        Node::Group(vec![lit("B"), lit("C")]),
                    ])
                ]),
            ])
        );
    }

    #[test]
    fn test_repeat_recurses() {
        let node = Node::repeat(
            Node::Group(vec![lit("TABLE"), Node::maybe(lit("AS"))]),
            Delimiter::Whitespace,
        );
        assert_eq!(
            normalize(&node).unwrap(),
            Node::repeat(
                Node::Choice(vec![
                    Node::Group(vec![lit("TABLE")]),
                    Node::Group(vec![lit("TABLE"), lit("AS")]),
                ]),
                Delimiter::Whitespace
            )
        );
    }

    #[test]
    fn test_empty_variant_fails() {
        let node = parse_text("[ DEFERRABLE ] [ INITIALLY DEFERRED ]").unwrap();
        assert!(matches!(
            normalize(&node).unwrap_err(),
            NormalizeError::EmptyVariant { .. }
        ));
    }

    #[test]
    fn test_empty_parens_variant_fails() {
        let node = Node::InParens(vec![Node::maybe(Node::argument("arguments"))]);
        assert!(matches!(
            normalize(&node).unwrap_err(),
            NormalizeError::EmptyVariant { .. }
        ));
    }

    #[test]
    fn test_literal_empty_parens_are_kept() {
        let node = parse_text("{ ( ) | ( arguments ) }").unwrap();
        assert_eq!(
            normalize(&node).unwrap(),
            Node::Group(vec![Node::Choice(vec![
                Node::InParens(vec![]),
                Node::InParens(vec![Node::argument("arguments")]),
            ])])
        );
    }

    #[test]
    fn test_optional_alternative_expands_the_choice() {
        let node = parse_text("{ A | [ B ] }").unwrap();
        assert_eq!(
            normalize(&node).unwrap(),
            Node::Group(vec![Node::Choice(vec![
                Node::Choice(vec![lit("A")]),
                Node::Choice(vec![lit("A"), lit("B")]),
            ])])
        );
    }

    #[test]
    fn test_lone_optional_alternative_fails() {
        let node = Node::Choice(vec![Node::maybe(lit("A"))]);
        assert!(matches!(
            normalize(&node).unwrap_err(),
            NormalizeError::EmptyVariant { .. }
        ));
    }

    #[test]
    fn test_bare_maybe_fails() {
        assert!(matches!(
            normalize(&Node::maybe(lit("A"))).unwrap_err(),
            NormalizeError::UnexpectedNode { .. }
        ));
        assert!(matches!(
            normalize(&Node::Pipe).unwrap_err(),
            NormalizeError::UnexpectedNode { .. }
        ));
    }

    #[test]
    fn test_too_many_optionals() {
        let members = (0..=MAX_OPTIONAL_SIBLINGS)
            .map(|_| Node::maybe(lit("A")))
            .collect();
        assert_eq!(
            normalize(&Node::Group(members)).unwrap_err(),
            NormalizeError::TooManyOptionals {
                count: MAX_OPTIONAL_SIBLINGS + 1,
                limit: MAX_OPTIONAL_SIBLINGS
            }
        );
    }
}
