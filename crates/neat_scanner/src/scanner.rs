//! The neat scanner.
//!
//! Tokens are produced lazily. Each token borrows its lexeme and the
//! whitespace/comment run that follows it straight from the source, so
//! concatenating `text + trailing` of every token (after the preamble)
//! reproduces the input exactly.

use crate::char_codes::*;
use neat_ast::syntax_kind::SyntaxKind;
use neat_ast::types::{Token, TokenFlags};
use neat_core::text::{TextPos, TextSpan};
use neat_diagnostics::{messages, Diagnostic, DiagnosticMessage};

/// Saved scanner state for lookahead.
#[derive(Debug, Clone, Copy)]
pub struct ScannerState<'a> {
    pub pos: usize,
    pub peeked: Option<Token<'a>>,
}

/// The scanner converts neat source text into tokens.
pub struct Scanner<'a> {
    /// Identifier of the file being scanned, used in diagnostics.
    file_name: &'a str,
    /// The source text being scanned.
    text: &'a str,
    /// Current byte position in the text.
    pos: usize,
    /// The token returned by the last `peek`, not yet consumed.
    peeked: Option<Token<'a>>,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source text.
    pub fn new(file_name: &'a str, text: &'a str) -> Self {
        Self {
            file_name,
            text,
            pos: 0,
            peeked: None,
        }
    }

    pub fn file_name(&self) -> &'a str {
        self.file_name
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Scan the whitespace, comments and shebang lines before the first
    /// token. Call this before the first `next()`.
    pub fn scan_preamble(&mut self) -> &'a str {
        debug_assert!(self.pos == 0 && self.peeked.is_none());
        self.scan_trivia()
    }

    /// Build a diagnostic located at `span`.
    pub fn error(&self, span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> Diagnostic {
        Diagnostic::with_location(self.file_name, self.text, span, message, args)
    }

    // ========================================================================
    // Token stream
    // ========================================================================

    /// Consume and return the next token.
    pub fn next(&mut self) -> Result<Token<'a>, Diagnostic> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.scan(),
        }
    }

    /// Return the next token without consuming it.
    pub fn peek(&mut self) -> Result<Token<'a>, Diagnostic> {
        match self.peeked {
            Some(token) => Ok(token),
            None => {
                let token = self.scan()?;
                self.peeked = Some(token);
                Ok(token)
            }
        }
    }

    /// Kind of the next token.
    pub fn peek_kind(&mut self) -> Result<SyntaxKind, Diagnostic> {
        Ok(self.peek()?.kind)
    }

    pub fn save_state(&self) -> ScannerState<'a> {
        ScannerState {
            pos: self.pos,
            peeked: self.peeked,
        }
    }

    pub fn restore_state(&mut self, state: ScannerState<'a>) {
        self.pos = state.pos;
        self.peeked = state.peeked;
    }

    /// Look ahead: save state, call f, restore state and return result.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.save_state();
        let result = f(self);
        self.restore_state(state);
        result
    }

    /// Scan a string or regular expression literal whose opening delimiter
    /// was just consumed as `open`.
    ///
    /// Scanning restarts right after the delimiter, so whatever the generic
    /// scanner took as the delimiter's trailing trivia is read again as
    /// literal content. A `/=` opener contributes its `=` to the body.
    pub fn read_quoted(&mut self, open: Token<'a>) -> Result<Token<'a>, Diagnostic> {
        debug_assert!(open.kind.is_quote() && self.peeked.is_none());
        let start = open.pos as usize;
        let quote = open.text.as_bytes()[0];
        let is_regex = quote == b'/';
        let bytes = self.text.as_bytes();

        let mut pos = start + 1;
        loop {
            match memchr::memchr2(quote, b'\\', &bytes[pos..]) {
                Some(offset) if bytes[pos + offset] == b'\\' => pos += offset + 2,
                Some(offset) => {
                    pos += offset + 1;
                    break;
                }
                None => pos = bytes.len(),
            }
            if pos >= bytes.len() {
                let message = if is_regex {
                    &messages::RUNAWAY_REGULAR_EXPRESSION_LITERAL
                } else {
                    &messages::RUNAWAY_STRING_LITERAL
                };
                return Err(self.error(open.span(), message, &[]));
            }
        }

        let kind = if is_regex {
            while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
                pos += 1;
            }
            SyntaxKind::RegularExpressionLiteral
        } else {
            SyntaxKind::StringLiteral
        };

        self.pos = pos;
        let trailing = self.scan_trivia();
        Ok(Token::new(kind, &self.text[start..pos], open.pos)
            .with_flags(TokenFlags::QUOTED)
            .with_trailing(trailing))
    }

    // ========================================================================
    // Raw scanning
    // ========================================================================

    fn scan(&mut self) -> Result<Token<'a>, Diagnostic> {
        let token = self.scan_token()?;
        let trailing = self.scan_trivia();
        let token = token.with_trailing(trailing);
        self.check_rejected(token)?;
        Ok(token)
    }

    /// Tokens the dialect refuses wherever they appear.
    fn check_rejected(&self, token: Token<'a>) -> Result<(), Diagnostic> {
        match token.kind {
            SyntaxKind::ThisKeyword
            | SyntaxKind::YieldKeyword
            | SyntaxKind::TryKeyword
            | SyntaxKind::CatchKeyword
            | SyntaxKind::FinallyKeyword => Err(self.error(
                token.span(),
                &messages::_0_IS_A_RESERVED_KEYWORD,
                &[token.text],
            )),
            SyntaxKind::EqualsEqualsEqualsToken | SyntaxKind::ExclamationEqualsEqualsToken => {
                Err(self.error(
                    token.span(),
                    &messages::USE_0_INSTEAD_OF_1,
                    &[&token.text[..2], token.text],
                ))
            }
            _ => Ok(()),
        }
    }

    fn scan_token(&mut self) -> Result<Token<'a>, Diagnostic> {
        let start = self.pos;
        let rest = &self.text[start..];
        let Some(ch) = rest.chars().next() else {
            return Ok(Token::new(SyntaxKind::EndOfFileToken, "", start as TextPos));
        };

        let (kind, len) = if ch.is_ascii_digit() {
            (SyntaxKind::NumericLiteral, scan_number(rest))
        } else if let Some((text, kind)) = SyntaxKind::PUNCTUATION
            .iter()
            .find(|(text, _)| rest.starts_with(text))
        {
            (*kind, text.len())
        } else if let Some(kind_len) = scan_word(rest) {
            kind_len
        } else if let Some(kind_len) = scan_pragma(rest) {
            kind_len
        } else {
            return Err(self.error(
                TextSpan::new(start as TextPos, ch.len_utf8() as TextPos),
                &messages::INVALID_TOKEN,
                &[],
            ));
        };

        self.pos = start + len;
        Ok(Token::new(kind, &self.text[start..self.pos], start as TextPos))
    }

    /// Greedily consume whitespace, `//` and `/* */` comments and `#!` lines.
    fn scan_trivia(&mut self) -> &'a str {
        let start = self.pos;
        loop {
            let rest = &self.text[self.pos..];
            let len = if rest.starts_with(char::is_whitespace) {
                rest.find(|c: char| !c.is_whitespace()).unwrap_or(rest.len())
            } else if rest.starts_with("//") {
                rest.find(is_line_break).unwrap_or(rest.len())
            } else if rest.starts_with("/*") {
                match rest[2..].find("*/") {
                    Some(end) => end + 4,
                    None => 0,
                }
            } else if rest.starts_with("#!") && rest[2..].starts_with(|c: char| !is_line_break(c)) {
                rest.find(is_line_break).unwrap_or(rest.len())
            } else {
                0
            };
            if len == 0 {
                break;
            }
            self.pos += len;
        }
        &self.text[start..self.pos]
    }
}

/// `[0-9]+(\.[0-9]+)?`
fn scan_number(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };
    let mut len = digits(0);
    if bytes.get(len) == Some(&b'.') {
        let fraction = digits(len + 1);
        if fraction > 0 {
            len += 1 + fraction;
        }
    }
    len
}

/// A reserved word or identifier at the start of `rest`.
fn scan_word(rest: &str) -> Option<(SyntaxKind, usize)> {
    let word_len = rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len());
    if let Some(kind) = SyntaxKind::from_keyword(&rest[..word_len]) {
        return Some((kind, word_len));
    }

    let mut chars = rest.char_indices();
    match chars.next() {
        Some((_, ch)) if is_identifier_start(ch) => {}
        _ => return None,
    }
    let len = chars
        .find(|(_, c)| !is_identifier_part(*c))
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    Some((SyntaxKind::Identifier, len))
}

/// `#include` or `#declare`, not followed by a word character.
fn scan_pragma(rest: &str) -> Option<(SyntaxKind, usize)> {
    [
        ("#include", SyntaxKind::IncludePragma),
        ("#declare", SyntaxKind::DeclarePragma),
    ]
    .into_iter()
    .find(|(text, _)| {
        rest.starts_with(text) && !rest[text.len()..].starts_with(is_word_char)
    })
    .map(|(text, kind)| (kind, text.len()))
}
