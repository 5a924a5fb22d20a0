use ebnf_core::{dump, parse_str, render, to_xml, Config, Node, RasterFormat};
use pretty_assertions::assert_eq;

/// EBNF described in itself, the canonical workout for the whole pipeline.
const EBNF_IN_EBNF: &str = r#"
"EBNF defined in itself."
{
    syntax     = [ title ] "{" { rule } "}" [ comment ] .
    rule       = identifier ( "=" | ":" | ":==" ) expression ( "." | ";" ) .
    expression = term { "|" term } .
    term       = factor { factor } .
    factor     = identifier | literal
               | "[" expression "]"
               | "(" expression ")"
               | "{" expression "}" .
    identifier = character { character } .
    title      = literal .
    comment    = literal .
    literal    = "'" character { character } "'"
               | '"' character { character } '"' .
}
"xis/ebnf-like sample grammar"
"#;

#[test]
fn parse_the_ebnf_grammar_itself() {
    let syntax = parse_str(EBNF_IN_EBNF).unwrap();
    assert_eq!(syntax.title.as_deref(), Some("EBNF defined in itself."));
    assert_eq!(syntax.meta, "xis/ebnf-like sample grammar");

    let names: Vec<&str> = syntax.rules.iter().map(|rule| rule.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "syntax",
            "rule",
            "expression",
            "term",
            "factor",
            "identifier",
            "title",
            "comment",
            "literal",
        ]
    );

    // `factor` is a choice of five alternatives, two of them leaves
    match &syntax.rules[4].expr {
        Node::Choice(alternatives) => assert_eq!(alternatives.len(), 5),
        other => panic!("expected choice, got {other:?}"),
    }
}

#[test]
fn parsing_is_deterministic() {
    let first = parse_str(EBNF_IN_EBNF).unwrap();
    let second = parse_str(EBNF_IN_EBNF).unwrap();
    assert_eq!(first, second);
}

#[test]
fn xml_covers_every_rule() {
    let syntax = parse_str(EBNF_IN_EBNF).unwrap();
    let xml = to_xml(&syntax);
    for rule in &syntax.rules {
        assert!(xml.contains(&format!("<rule name=\"{}\">", rule.name)));
    }
    assert!(xml.contains("<choice>"));
    assert!(xml.contains("<sequence>"));
    assert!(xml.contains("<option>"));
    assert!(xml.contains("<loop>"));
}

#[test]
fn dump_covers_every_rule() {
    let syntax = parse_str(EBNF_IN_EBNF).unwrap();
    let text = dump(&syntax);
    assert!(text.starts_with("[syntax]\n"));
    for rule in &syntax.rules {
        assert!(text.contains(&format!("[rule='{}']", rule.name)));
    }
}

#[test]
fn render_and_encode_all_formats() {
    let syntax = parse_str(EBNF_IN_EBNF).unwrap();
    let canvas = render(&syntax);
    assert!(canvas.width() > 0);
    assert!(canvas.height() > 0);

    let png = canvas.encode(RasterFormat::Png).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let gif = canvas.encode(RasterFormat::Gif).unwrap();
    assert_eq!(&gif[..3], b"GIF");

    let jpg = canvas.encode(RasterFormat::Jpg).unwrap();
    assert_eq!(&jpg[..2], b"\xff\xd8");
}

#[test]
fn render_respects_configured_unit() {
    let syntax = parse_str("{ a = b | c . }").unwrap();
    let compact = ebnf_core::render_with_config(&syntax, &Config::default().with_unit(8));
    let spacious = ebnf_core::render_with_config(&syntax, &Config::default().with_unit(32));
    assert!(compact.width() < spacious.width());
    assert!(compact.height() < spacious.height());
}
