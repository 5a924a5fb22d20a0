//! Lossless XML serialization of the syntax tree.
//!
//! The document mirrors the tree one to one: `<syntax>` with `title` and
//! `meta` attributes, `<rule name="...">` children, and nested
//! `<choice>`/`<sequence>`/`<option>`/`<loop>` composites down to
//! `<identifier value="..."/>` and `<terminal value="..."/>` leaves.

use std::fmt::Write;

use crate::ast::{Node, Syntax};

const INDENT: &str = "  ";

/// Serialize a tree to its XML structural format.
pub fn to_xml(syntax: &Syntax) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");

    let mut attributes = String::new();
    if let Some(title) = &syntax.title {
        write!(attributes, " title=\"{}\"", escape(title)).unwrap();
    }
    write!(attributes, " meta=\"{}\"", escape(&syntax.meta)).unwrap();

    if syntax.rules.is_empty() {
        writeln!(out, "<syntax{attributes}/>").unwrap();
        return out;
    }

    writeln!(out, "<syntax{attributes}>").unwrap();
    for rule in &syntax.rules {
        writeln!(out, "{INDENT}<rule name=\"{}\">", escape(&rule.name)).unwrap();
        write_node(&mut out, &rule.expr, 2);
        writeln!(out, "{INDENT}</rule>").unwrap();
    }
    writeln!(out, "</syntax>").unwrap();

    out
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    let pad = INDENT.repeat(depth);
    match node {
        Node::Identifier(value) => {
            writeln!(out, "{pad}<identifier value=\"{}\"/>", escape(value)).unwrap();
        }
        Node::Terminal(value) => {
            writeln!(out, "{pad}<terminal value=\"{}\"/>", escape(value)).unwrap();
        }
        Node::Choice(children) | Node::Sequence(children) => {
            let tag = node.kind_name();
            writeln!(out, "{pad}<{tag}>").unwrap();
            for child in children {
                write_node(out, child, depth + 1);
            }
            writeln!(out, "{pad}</{tag}>").unwrap();
        }
        Node::Option(child) | Node::Loop(child) => {
            let tag = node.kind_name();
            writeln!(out, "{pad}<{tag}>").unwrap();
            write_node(out, child, depth + 1);
            writeln!(out, "{pad}</{tag}>").unwrap();
        }
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
