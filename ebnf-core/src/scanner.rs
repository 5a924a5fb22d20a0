//! Character-level scanner producing the token stream consumed by the parser.

use logos::Logos;

use crate::error::{Position, SyntaxError};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"\(\*([^*]|\*+[^*)])*\*+\)")]
enum RawToken {
    #[regex(r"[a-zA-Z][a-zA-Z0-9_-]*")]
    Identifier,

    #[regex(r#""[^"]*""#)]
    #[regex(r"'[^']*'")]
    Literal,

    #[token(":==")]
    #[regex(r"[(){}\[\]=.;|:]")]
    Operator,
}

/// Kind of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Literal,
    Operator,
    EndOfInput,
}

/// A scanned token: kind, raw lexeme and source position.
///
/// Literal lexemes keep their surrounding quotes; [`Token::unquoted`] strips
/// them on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
}

impl Token {
    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// True for an operator token spelled exactly `op`.
    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == op
    }

    pub fn is_any_operator(&self, ops: &[&str]) -> bool {
        ops.iter().any(|op| self.is_operator(op))
    }

    /// The lexeme with its surrounding quotes removed.
    pub fn unquoted(&self) -> &str {
        if self.kind == TokenKind::Literal && self.text.len() >= 2 {
            &self.text[1..self.text.len() - 1]
        } else {
            &self.text
        }
    }

    /// Position just past the end of the lexeme, on the same line.
    pub fn end_position(&self) -> Position {
        let mut position = self.position.clone();
        position.column += self.text.chars().count();
        position
    }
}

/// Scan a grammar source into tokens.
///
/// The returned vector always ends with exactly one `EndOfInput` token.
pub fn scan(input: &str) -> Result<Vec<Token>, SyntaxError> {
    scan_file(input, None)
}

/// Like [`scan`], but stamps every position with a file name.
pub fn scan_file(input: &str, file: Option<&str>) -> Result<Vec<Token>, SyntaxError> {
    let line_starts = line_starts(input);
    let mut lexer = RawToken::lexer(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let position = position_at(&line_starts, lexer.span().start, file);
        let kind = match result {
            Ok(RawToken::Identifier) => TokenKind::Identifier,
            Ok(RawToken::Literal) => TokenKind::Literal,
            Ok(RawToken::Operator) => TokenKind::Operator,
            Err(()) => {
                return Err(SyntaxError::new(
                    format!("Invalid character '{}'", lexer.slice()),
                    position,
                ));
            }
        };
        tokens.push(Token {
            kind,
            text: lexer.slice().to_string(),
            position,
        });
    }

    tokens.push(Token {
        kind: TokenKind::EndOfInput,
        text: String::new(),
        position: position_at(&line_starts, input.len(), file),
    });

    Ok(tokens)
}

fn line_starts(input: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(input.match_indices('\n').map(|(offset, _)| offset + 1))
        .collect()
}

fn position_at(line_starts: &[usize], offset: usize, file: Option<&str>) -> Position {
    let line = line_starts.partition_point(|&start| start <= offset);
    let column = offset - line_starts[line - 1] + 1;
    match file {
        Some(file) => Position::in_file(line, column, file),
        None => Position::new(line, column),
    }
}

/// Cursor over the scanned tokens; the sole surface the parser consumes.
///
/// `current` never runs past the trailing `EndOfInput` token, and
/// [`TokenStream::look_behind`] gives the bounded backwards view needed for
/// end-of-rule error positions.
#[derive(Debug)]
pub struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenStream {
    /// Wraps a token vector as produced by [`scan`].
    pub fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(matches!(
            tokens.last().map(|token| token.kind),
            Some(TokenKind::EndOfInput)
        ));
        Self { tokens, cursor: 0 }
    }

    pub fn current(&self) -> &Token {
        &self.tokens[self.cursor]
    }

    /// Steps to the next token, saturating at `EndOfInput`.
    pub fn advance(&mut self) {
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
    }

    /// Token `offset` positions behind the scan cursor; offset 1 is the
    /// current token, 2 the one consumed just before it. Saturates at the
    /// start of the stream.
    pub fn look_behind(&self, offset: usize) -> &Token {
        &self.tokens[(self.cursor + 1).saturating_sub(offset)]
    }
}
