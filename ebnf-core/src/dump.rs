//! Plain-text tree dump, one node per line. Diagnostic aid.

use std::fmt::Write;

use crate::ast::{Node, Syntax};

const INDENT: &str = "    ";

/// Dump a syntax tree as an indented text outline.
pub fn dump(syntax: &Syntax) -> String {
    let mut out = String::from("[syntax]\n");
    for rule in &syntax.rules {
        writeln!(out, "{INDENT}[rule='{}']", rule.name).unwrap();
        dump_node(&mut out, &rule.expr, 2);
    }
    out
}

fn dump_node(out: &mut String, node: &Node, depth: usize) {
    let pad = INDENT.repeat(depth);
    match node {
        Node::Identifier(value) | Node::Terminal(value) => {
            writeln!(out, "{pad}[{}='{}']", node.kind_name(), value).unwrap();
        }
        Node::Choice(children) | Node::Sequence(children) => {
            writeln!(out, "{pad}[{}]", node.kind_name()).unwrap();
            for child in children {
                dump_node(out, child, depth + 1);
            }
        }
        Node::Option(child) | Node::Loop(child) => {
            writeln!(out, "{pad}[{}]", node.kind_name()).unwrap();
            dump_node(out, child, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parser::parse_str;

    #[test]
    fn dump_leaf_rule() {
        let syntax = parse_str(r#"{ a = "x" . }"#).unwrap();
        assert_eq!(dump(&syntax), "[syntax]\n    [rule='a']\n        [terminal='x']\n");
    }

    #[test]
    fn dump_nested_tree() {
        let syntax = parse_str("{ a = b | [ c ] . }").unwrap();
        assert_eq!(
            dump(&syntax),
            "[syntax]\n\
             \x20   [rule='a']\n\
             \x20       [choice]\n\
             \x20           [identifier='b']\n\
             \x20           [option]\n\
             \x20               [identifier='c']\n"
        );
    }
}
