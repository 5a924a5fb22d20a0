//! ebnf-core: EBNF core library - A grammar parser and railroad diagram renderer
//!
//! # Example
//!
//! ```
//! use ebnf_core::{parse_str, render};
//!
//! let input = r#"
//! "A demo grammar."
//! {
//!     literal = "'" character { character } "'" .
//! }
//! "#;
//!
//! let syntax = parse_str(input).unwrap();
//! let canvas = render(&syntax);
//! assert!(canvas.width() > 0);
//! ```
//!
//! # Serialization
//!
//! ```
//! use ebnf_core::{parse_str, to_xml};
//!
//! let syntax = parse_str(r#"{ a = b | c . }"#).unwrap();
//! let xml = to_xml(&syntax);
//! assert!(xml.contains("<choice>"));
//! ```

pub mod ast;
pub mod canvas;
pub mod dump;
pub mod error;
pub mod parser;
pub mod render;
pub mod scanner;
pub mod xml;

pub use ast::{Node, Rule, Syntax};
pub use canvas::{Canvas, RasterFormat};
pub use dump::dump;
pub use error::{Position, SyntaxError};
pub use parser::{parse, parse_str, META};
pub use render::{render, render_with_config, Config};
pub use scanner::{scan, scan_file, Token, TokenKind, TokenStream};
pub use xml::to_xml;
