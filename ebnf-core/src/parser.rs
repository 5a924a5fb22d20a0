//! Recursive-descent parser for the EBNF grammar of grammars:
//!
//! ```text
//! syntax     = [ literal ] "{" { rule } "}" [ literal ] .
//! rule       = identifier ( "=" | ":" | ":==" ) expression ( "." | ";" ) .
//! expression = term { "|" term } .
//! term       = factor { factor } .
//! factor     = identifier | literal
//!            | "(" expression ")" | "[" expression "]" | "{" expression "}" .
//! ```
//!
//! `( ... )` groups are transparent and contribute only their inner
//! expression; single-alternative choices and single-factor sequences are
//! collapsed to their only child.

use crate::ast::{Node, Rule, Syntax};
use crate::error::SyntaxError;
use crate::scanner::{scan, TokenKind, TokenStream};

/// Signature written into `meta` when the grammar has no trailing comment.
pub const META: &str = "ebnf v2.0 https://github.com/ebnf-tools/ebnf mit";

/// Sentinels that end a term; each hands control back to an enclosing
/// construct.
const TERM_STOP: [&str; 7] = [".", ";", "=", "|", ")", "]", "}"];

/// Scan and parse a grammar source in one step.
pub fn parse_str(input: &str) -> Result<Syntax, SyntaxError> {
    parse(&mut TokenStream::new(scan(input)?))
}

/// Parse a complete token stream into a syntax tree.
pub fn parse(tokens: &mut TokenStream) -> Result<Syntax, SyntaxError> {
    let mut title = None;

    if tokens.current().kind == TokenKind::Literal {
        title = Some(tokens.current().unquoted().to_string());
        tokens.advance();
    }

    if !tokens.current().is_operator("{") {
        return Err(SyntaxError::new(
            "Syntax must start with '{'",
            tokens.current().position.clone(),
        ));
    }
    tokens.advance();

    let mut rules = Vec::new();
    while tokens.current().kind == TokenKind::Identifier {
        rules.push(parse_rule(tokens)?);
        tokens.advance();
    }

    if !tokens.current().is_operator("}") {
        return Err(SyntaxError::new(
            "Syntax must end with '}'",
            tokens.current().position.clone(),
        ));
    }
    tokens.advance();

    let meta = match tokens.current().kind {
        TokenKind::EndOfInput => META.to_string(),
        TokenKind::Literal => tokens.current().unquoted().to_string(),
        _ => {
            return Err(SyntaxError::new(
                "Literal expected as syntax comment",
                tokens.current().position.clone(),
            ));
        }
    };

    Ok(Syntax { title, meta, rules })
}

/// On return the current token is the rule terminator; the caller advances
/// past it.
fn parse_rule(tokens: &mut TokenStream) -> Result<Rule, SyntaxError> {
    if tokens.current().kind != TokenKind::Identifier {
        return Err(SyntaxError::new(
            "Production must start with an identifier",
            tokens.current().position.clone(),
        ));
    }
    let name = tokens.current().text.clone();
    tokens.advance();

    if !tokens.current().is_any_operator(&["=", ":", ":=="]) {
        return Err(SyntaxError::new(
            "Identifier must be followed by '='",
            tokens.current().position.clone(),
        ));
    }
    tokens.advance();

    let expr = parse_expression(tokens)?;

    if !tokens.current().is_any_operator(&[".", ";"]) {
        // The scan stopped one token past the omission site; point at the
        // end of the last successfully parsed factor instead.
        return Err(SyntaxError::new(
            "Rule must end with '.' or ';'",
            tokens.look_behind(2).end_position(),
        ));
    }

    Ok(Rule { name, expr })
}

fn parse_expression(tokens: &mut TokenStream) -> Result<Node, SyntaxError> {
    let mut alternatives = vec![parse_term(tokens)?];

    while tokens.current().is_operator("|") {
        tokens.advance();
        alternatives.push(parse_term(tokens)?);
    }

    Ok(Node::choice(alternatives))
}

fn parse_term(tokens: &mut TokenStream) -> Result<Node, SyntaxError> {
    let mut factors = vec![parse_factor(tokens)?];
    tokens.advance();

    while !tokens.current().is_any_operator(&TERM_STOP)
        && tokens.current().kind != TokenKind::EndOfInput
    {
        factors.push(parse_factor(tokens)?);
        tokens.advance();
    }

    Ok(Node::sequence(factors))
}

/// On return the current token is the last token of the factor; the caller
/// advances past it.
fn parse_factor(tokens: &mut TokenStream) -> Result<Node, SyntaxError> {
    let token = tokens.current().clone();

    match token.kind {
        TokenKind::Identifier => Ok(Node::Identifier(token.text)),
        TokenKind::Literal => Ok(Node::Terminal(token.unquoted().to_string())),
        TokenKind::Operator if token.is_operator("(") => {
            tokens.advance();
            let expr = parse_expression(tokens)?;
            if !tokens.current().is_operator(")") {
                return Err(SyntaxError::new(
                    "Group must end with ')'",
                    tokens.current().position.clone(),
                ));
            }
            Ok(expr)
        }
        TokenKind::Operator if token.is_operator("[") => {
            tokens.advance();
            let expr = parse_expression(tokens)?;
            if !tokens.current().is_operator("]") {
                return Err(SyntaxError::new(
                    "Option must end with ']'",
                    tokens.current().position.clone(),
                ));
            }
            Ok(Node::Option(Box::new(expr)))
        }
        TokenKind::Operator if token.is_operator("{") => {
            tokens.advance();
            let expr = parse_expression(tokens)?;
            if !tokens.current().is_operator("}") {
                return Err(SyntaxError::new(
                    "Loop must end with '}'",
                    tokens.current().position.clone(),
                ));
            }
            Ok(Node::Loop(Box::new(expr)))
        }
        _ => Err(SyntaxError::new("Factor expected", token.position)),
    }
}
