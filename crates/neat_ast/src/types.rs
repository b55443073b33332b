//! Token and flag types shared by the scanner, parser and printer.

use crate::syntax_kind::SyntaxKind;
use neat_core::text::{TextPos, TextSpan};

bitflags::bitflags! {
    /// Flags carried by a scanned token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u8 {
        const NONE  = 0;
        /// The token is a reserved word, so it may still serve as a
        /// property name after `.`.
        const WORD  = 1 << 0;
        /// A string or regex literal produced by `read_quoted`.
        const QUOTED = 1 << 1;
    }
}

/// A scanned token. Borrows its text and trailing trivia from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    /// The literal source text of the lexeme.
    pub text: &'a str,
    /// Byte offset of the lexeme.
    pub pos: TextPos,
    /// Whitespace and comments captured immediately after the lexeme.
    pub trailing: &'a str,
    pub flags: TokenFlags,
}

impl<'a> Token<'a> {
    pub fn new(kind: SyntaxKind, text: &'a str, pos: TextPos) -> Self {
        let flags = if kind.is_keyword() {
            TokenFlags::WORD
        } else {
            TokenFlags::NONE
        };
        Self {
            kind,
            text,
            pos,
            trailing: "",
            flags,
        }
    }

    pub fn with_trailing(mut self, trailing: &'a str) -> Self {
        self.trailing = trailing;
        self
    }

    pub fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[inline]
    pub fn span(&self) -> TextSpan {
        TextSpan::new(self.pos, self.text.len() as TextPos)
    }

    /// Whether this token is a reserved word.
    #[inline]
    pub fn is_word(&self) -> bool {
        self.flags.contains(TokenFlags::WORD)
    }

    /// The token as it appears in an "unexpected ..." message.
    pub fn display_text(&self) -> &'a str {
        if self.text.is_empty() {
            self.kind.describe()
        } else {
            self.text
        }
    }
}
