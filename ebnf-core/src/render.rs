//! Railroad diagram renderer.
//!
//! Every node kind is laid out by its own routine which returns a finished
//! sub-canvas; parents compose children bottom-up into the final image. All
//! proportions derive from the configured base unit. Each sub-canvas carries
//! its connector line at `unit` pixels below its top edge with a short stub
//! at both sides, which is what lets parents join children with straight
//! lines.

use crate::ast::{Node, Syntax};
use crate::canvas::{self, Canvas, BLACK, BLUE, GREEN, RED, SILVER};

/// Rendering configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base spacing in pixels.
    pub unit: i32,
    /// Font size index (1-5) into the built-in font table.
    pub font_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit: 16,
            font_size: 4,
        }
    }
}

impl Config {
    pub fn with_unit(mut self, unit: i32) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_font_size(mut self, font_size: usize) -> Self {
        self.font_size = font_size;
        self
    }
}

/// Render a syntax tree with the default configuration.
pub fn render(syntax: &Syntax) -> Canvas {
    render_with_config(syntax, &Config::default())
}

/// Render a syntax tree into a framed diagram canvas.
pub fn render_with_config(syntax: &Syntax, config: &Config) -> Canvas {
    render_syntax(syntax, true, config)
}

fn render_syntax(syntax: &Syntax, ltr: bool, config: &Config) -> Canvas {
    let u = config.unit;
    let size = config.font_size;
    let images: Vec<Canvas> = syntax
        .rules
        .iter()
        .map(|rule| render_node(&rule.expr, ltr, config))
        .collect();

    let mut name_width = 0;
    let mut rule_width = 0;
    let mut h = 5 * u;
    for (rule, image) in syntax.rules.iter().zip(&images) {
        name_width = name_width.max(canvas::text_width(size, &rule.name));
        rule_width = rule_width.max(image.width());
        h += image.height() + 2 * u;
    }

    let title = syntax.title.as_deref().unwrap_or("");
    if title.is_empty() {
        h -= 2 * u;
    }
    if syntax.meta.is_empty() {
        h -= 2 * u;
    }
    h += 10;

    let w = (rule_width + name_width + 3 * u).max(canvas::text_width(1, &syntax.meta) + 2 * u) + 10;
    let mut im = Canvas::new(w as u32, h as u32);
    let mut y = 2 * u;

    if !title.is_empty() {
        im.text(size, u, (2 * u - canvas::text_height(size)) / 2, title, GREEN);
        im.line(5, 2 * u, w - 5, 2 * u, GREEN);
        y += 2 * u;
    }

    for (rule, child) in syntax.rules.iter().zip(&images) {
        im.text(
            size,
            u,
            y - u + (2 * u - canvas::text_height(size)) / 2,
            &rule.name,
            RED,
        );
        im.blit(child, name_width + 2 * u, y);
        im.line(u, y + u, name_width + 2 * u, y + u, BLACK);
        im.line(name_width + 2 * u + child.width() - 1, y + u, w - u, y + u, BLACK);
        im.line(w - u, y + u / 2, w - u, y + 3 * u / 2, BLACK);
        y += 2 * u + child.height();
    }

    im.text(
        1,
        u,
        h - 2 * u + (2 * u - canvas::text_height(1)) / 2,
        &syntax.meta,
        SILVER,
    );
    im.rounded_rect(5, 5, w - 5, h - 5, u / 2, GREEN);

    im
}

fn render_node(node: &Node, ltr: bool, config: &Config) -> Canvas {
    match node {
        Node::Identifier(value) => render_leaf(value, false, config),
        Node::Terminal(value) => render_leaf(value, true, config),
        Node::Sequence(children) => render_sequence(children, ltr, config),
        Node::Choice(children) => render_choice(children, ltr, config),
        Node::Option(child) => render_bypass(child, false, ltr, config),
        Node::Loop(child) => render_bypass(child, true, ltr, config),
    }
}

/// Directional arrowhead with its tip at `(x, y)`.
fn arrow(im: &mut Canvas, x: i32, y: i32, ltr: bool, u: i32) {
    if ltr {
        im.filled_triangle(x - u, y - u / 3, x, y, x - u, y + u / 3, BLACK);
    } else {
        im.filled_triangle(x, y - u / 3, x - u, y, x, y + u / 3, BLACK);
    }
}

/// Identifier and terminal boxes. A terminal whose value is the literal
/// ellipsis `...` is drawn as bare text to signal elided content.
fn render_leaf(text: &str, terminal: bool, config: &Config) -> Canvas {
    let u = config.unit;
    let size = config.font_size;
    let w = canvas::text_width(size, text) + 4 * u;
    let h = 2 * u;
    let mut im = Canvas::new(w as u32, h as u32);
    let text_y = (h - canvas::text_height(size)) / 2;

    if !terminal {
        im.rect(u, 0, w - u - 1, h - 1, BLACK);
        im.text(size, 2 * u, text_y, text, RED);
    } else if text == "..." {
        im.text(size, 2 * u, text_y, text, BLACK);
    } else {
        im.rounded_rect(u, 0, w - u - 1, h - 1, u / 2, BLACK);
        im.text(size, 2 * u, text_y, text, BLUE);
    }

    im.line(0, u, u, u, BLACK);
    im.line(w - u, u, w, u, BLACK);

    im
}

fn render_sequence(children: &[Node], ltr: bool, config: &Config) -> Canvas {
    let u = config.unit;
    let mut inner: Vec<Canvas> = children
        .iter()
        .map(|child| render_node(child, ltr, config))
        .collect();
    if !ltr {
        inner.reverse();
    }

    let w = inner.iter().map(Canvas::width).sum::<i32>() + (inner.len() as i32 - 1) * u;
    let h = inner.iter().map(Canvas::height).max().unwrap_or(0);
    let mut im = Canvas::new(w as u32, h as u32);

    im.blit(&inner[0], 0, 0);
    let mut x = inner[0].width() + u;
    for child in &inner[1..] {
        im.line(x - u - 1, u, x, u, BLACK);
        arrow(&mut im, x, u, ltr, u);
        im.blit(child, x, 0);
        x += child.width() + u;
    }

    im
}

fn render_choice(children: &[Node], ltr: bool, config: &Config) -> Canvas {
    let u = config.unit;
    let inner: Vec<Canvas> = children
        .iter()
        .map(|child| render_node(child, ltr, config))
        .collect();

    let h = inner.iter().map(Canvas::height).sum::<i32>() + (inner.len() as i32 - 1) * u;
    let w = inner.iter().map(Canvas::width).max().unwrap_or(0) + 6 * u;
    let mut im = Canvas::new(w as u32, h as u32);

    // entry and exit stubs above both spines
    im.line(0, u, u, u, BLACK);
    im.line(w - u, u, w, u, BLACK);

    let mut y = 0;
    let mut spine_bottom = u;
    for child in &inner {
        im.line(u, y + u, w - u, y + u, BLACK);
        im.blit(child, 3 * u, y);
        arrow(&mut im, 3 * u, y + u, ltr, u);
        arrow(&mut im, w - 2 * u, y + u, ltr, u);
        spine_bottom = y + u;
        y += child.height() + u;
    }

    im.line(u, u, u, spine_bottom, BLACK);
    im.line(w - u, u, w - u, spine_bottom, BLACK);

    im
}

/// Option and loop share one shape: content centered under a bypass line.
/// For a loop the child is rendered against the enclosing direction and the
/// bypass arrow points backwards, making the top line the repetition
/// back-edge instead of a forward skip.
fn render_bypass(child: &Node, is_loop: bool, ltr: bool, config: &Config) -> Canvas {
    let u = config.unit;
    let inner_ltr = if is_loop { !ltr } else { ltr };
    let inner = render_node(child, inner_ltr, config);

    let w = inner.width() + 6 * u;
    let h = inner.height() + 2 * u;
    let mut im = Canvas::new(w as u32, h as u32);

    im.blit(&inner, 3 * u, 2 * u);
    im.line(0, u, w, u, BLACK);

    if is_loop {
        arrow(&mut im, w / 2 + u / 2, u, !inner_ltr, u);
    } else {
        arrow(&mut im, w / 2 + u / 2, u, inner_ltr, u);
    }
    arrow(&mut im, 3 * u, 3 * u, inner_ltr, u);
    arrow(&mut im, w - 2 * u, 3 * u, inner_ltr, u);

    im.line(u, u, u, 3 * u, BLACK);
    im.line(u, 3 * u, 2 * u, 3 * u, BLACK);
    im.line(w - u, u, w - u, 3 * u, BLACK);
    im.line(w - 3 * u - 1, 3 * u, w - u, 3 * u, BLACK);

    im
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::canvas::{text_width, WHITE};
    use crate::parser::parse_str;

    const UNIT: i32 = 16;

    fn rendered(input: &str) -> Canvas {
        render(&parse_str(input).unwrap())
    }

    fn rule_canvas(input: &str) -> Canvas {
        let syntax = parse_str(input).unwrap();
        render_node(&syntax.rules[0].expr, true, &Config::default())
    }

    #[test]
    fn leaf_dimensions() {
        let im = rule_canvas("{ a = b . }");
        assert_eq!(im.width(), text_width(4, "b") + 4 * UNIT);
        assert_eq!(im.height(), 2 * UNIT);
        // connector stubs at mid-height on both sides
        assert_eq!(im.pixel(0, UNIT), BLACK);
        assert_eq!(im.pixel(im.width() - 1, UNIT), BLACK);
    }

    #[test]
    fn sequence_dimensions() {
        let b = rule_canvas("{ a = b . }");
        let c = rule_canvas("{ a = c . }");
        let im = rule_canvas("{ a = b c . }");
        assert_eq!(im.width(), b.width() + c.width() + UNIT);
        assert_eq!(im.height(), b.height().max(c.height()));
    }

    #[test]
    fn choice_dimensions() {
        let b = rule_canvas("{ a = b . }");
        let c = rule_canvas("{ a = cc . }");
        let im = rule_canvas("{ a = b | cc . }");
        assert_eq!(im.width(), b.width().max(c.width()) + 6 * UNIT);
        assert_eq!(im.height(), b.height() + c.height() + UNIT);
    }

    #[test]
    fn option_adds_bypass_margins() {
        let b = rule_canvas("{ a = b . }");
        let im = rule_canvas("{ a = [ b ] . }");
        assert_eq!(im.width(), b.width() + 6 * UNIT);
        assert_eq!(im.height(), b.height() + 2 * UNIT);
        // the bypass line runs the full width at unit height
        assert_eq!(im.pixel(0, UNIT), BLACK);
        assert_eq!(im.pixel(im.width() - 1, UNIT), BLACK);
    }

    #[test]
    fn loop_has_option_shape() {
        let option = rule_canvas("{ a = [ b ] . }");
        let looped = rule_canvas("{ a = { b } . }");
        assert_eq!(option.width(), looped.width());
        assert_eq!(option.height(), looped.height());
    }

    #[test]
    fn containers_are_size_monotonic() {
        for input in [
            "{ a = b c d . }",
            "{ a = b | c | d . }",
            "{ a = [ b | c ] . }",
            "{ a = { b c } . }",
            "{ a = [ { b | c d } ] . }",
        ] {
            let syntax = parse_str(input).unwrap();
            let parent = render_node(&syntax.rules[0].expr, true, &Config::default());
            for child in direct_children(&syntax.rules[0].expr) {
                let child_canvas = render_node(child, true, &Config::default());
                assert!(parent.width() >= child_canvas.width(), "{input}");
                assert!(parent.height() >= child_canvas.height(), "{input}");
            }
        }
    }

    fn direct_children(node: &Node) -> Vec<&Node> {
        match node {
            Node::Choice(children) | Node::Sequence(children) => children.iter().collect(),
            Node::Option(child) | Node::Loop(child) => vec![child],
            Node::Identifier(_) | Node::Terminal(_) => vec![],
        }
    }

    #[test]
    fn syntax_frame_encloses_rules() {
        let im = rendered(r#""Title." { a = b . } "meta""#);
        let expr = rule_canvas("{ a = b . }");
        let name_width = text_width(4, "a");
        let expected_w =
            (expr.width() + name_width + 3 * UNIT).max(text_width(1, "meta") + 2 * UNIT) + 10;
        // 5u margins + title row + one rule row
        let expected_h = 5 * UNIT + expr.height() + 2 * UNIT + 10;
        assert_eq!(im.width(), expected_w);
        assert_eq!(im.height(), expected_h);
    }

    #[test]
    fn untitled_syntax_is_two_units_shorter() {
        let with_title = rendered(r#""Title." { a = b . }"#);
        let without = rendered("{ a = b . }");
        assert_eq!(with_title.height(), without.height() + 2 * UNIT);
    }

    #[test]
    fn smaller_unit_gives_smaller_diagram() {
        let syntax = parse_str("{ a = [ b ] . }").unwrap();
        let big = render_with_config(&syntax, &Config::default());
        let small = render_with_config(&syntax, &Config::default().with_unit(8));
        assert!(small.width() < big.width());
        assert!(small.height() < big.height());
    }

    #[test]
    fn empty_grammar_still_renders_frame() {
        let im = rendered("{ }");
        assert!(im.width() > 0);
        assert!(im.height() > 0);
        // middle of the frame's top edge
        assert_eq!(im.pixel(im.width() / 2, 5), GREEN);
    }

    #[test]
    fn corners_outside_frame_stay_white() {
        let im = rendered("{ a = b . }");
        assert_eq!(im.pixel(0, 0), WHITE);
        assert_eq!(im.pixel(im.width() - 1, im.height() - 1), WHITE);
    }
}
