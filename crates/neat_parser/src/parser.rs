//! The neat parser implementation.
//!
//! A recursive descent parser with one token of lookahead, plus bounded
//! `look_ahead` scans where the grammar needs them (for-in loops and
//! `(list) : alias {` functions). The first error aborts the parse.

use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;
use neat_ast::node::*;
use neat_ast::syntax_kind::SyntaxKind;
use neat_ast::types::Token;
use neat_diagnostics::{messages, Diagnostic, DiagnosticMessage};
use neat_scanner::Scanner;

use crate::precedence::{get_binary_operator_precedence, OperatorPrecedence};

/// Maximum nesting of statements and subexpressions.
///
/// Every statement, and every expression parsed in its own context (an
/// operand, argument, element or parenthesized list), takes one level.
/// Chains of binary operators, calls and member accesses built in a single
/// context do not nest, and neither do `else if` branches. The limit keeps a
/// full compile of the deepest accepted input within a 2 MiB thread stack in
/// unoptimized builds.
pub const MAX_RECURSION_DEPTH: u32 = 40;

type ParseResult<T> = Result<T, Diagnostic>;

/// The parser produces a Program from neat source text.
pub struct Parser<'a> {
    arena: &'a Bump,
    scanner: Scanner<'a>,
    file_name: &'a str,
    source_text: &'a str,
    /// Non-zero while parsing a ternary consequent or a `case` label, where
    /// a `:` after a parenthesized list belongs to the enclosing construct.
    colon_depth: u32,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    recursion_depth: u32,
}

impl<'a> Parser<'a> {
    pub fn new(arena: &'a Bump, file_name: &str, source_text: &str) -> Self {
        let file_name: &'a str = arena.alloc_str(file_name);
        let source_text: &'a str = arena.alloc_str(source_text);
        Self {
            arena,
            scanner: Scanner::new(file_name, source_text),
            file_name,
            source_text,
            colon_depth: 0,
            recursion_depth: 0,
        }
    }

    pub fn parse_program(mut self) -> ParseResult<Program<'a>> {
        let preamble = self.scanner.scan_preamble();
        let statements = self.parse_statements()?;
        let end_of_file_token = self.expect(SyntaxKind::EndOfFileToken)?;
        Ok(Program {
            file_name: self.file_name,
            text: self.source_text,
            preamble,
            statements,
            end_of_file_token,
        })
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    fn next(&mut self) -> ParseResult<Token<'a>> {
        self.scanner.next()
    }

    #[inline]
    fn peek(&mut self) -> ParseResult<Token<'a>> {
        self.scanner.peek()
    }

    #[inline]
    fn peek_kind(&mut self) -> ParseResult<SyntaxKind> {
        self.scanner.peek_kind()
    }

    fn error_at(&self, token: Token<'a>, message: &DiagnosticMessage, args: &[&str]) -> Diagnostic {
        self.scanner.error(token.span(), message, args)
    }

    fn expected(&self, kind: SyntaxKind, found: Token<'a>) -> Diagnostic {
        self.error_at(
            found,
            &messages::EXPECTED_0_INSTEAD_OF_1,
            &[kind.describe(), found.display_text()],
        )
    }

    fn expect(&mut self, kind: SyntaxKind) -> ParseResult<Token<'a>> {
        let token = self.next()?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(self.expected(kind, token))
        }
    }

    /// Fail unless the next token is `kind`, without consuming it.
    fn expect_peek(&mut self, kind: SyntaxKind) -> ParseResult<Token<'a>> {
        let token = self.peek()?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(self.expected(kind, token))
        }
    }

    fn optional(&mut self, kind: SyntaxKind) -> ParseResult<Option<Token<'a>>> {
        if self.peek_kind()? == kind {
            Ok(Some(self.next()?))
        } else {
            Ok(None)
        }
    }

    /// Consume an opening quote and the literal it starts.
    fn parse_quoted(&mut self) -> ParseResult<Token<'a>> {
        let open = self.next()?;
        self.scanner.read_quoted(open)
    }

    fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    fn enter(&mut self) -> ParseResult<()> {
        self.recursion_depth += 1;
        if self.recursion_depth > MAX_RECURSION_DEPTH {
            let token = self.peek()?;
            return Err(self.error_at(token, &messages::NESTED_TOO_DEEPLY, &[]));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.recursion_depth -= 1;
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_statements(&mut self) -> ParseResult<&'a [Stmt<'a>]> {
        let mut statements = BumpVec::new_in(self.arena);
        while self.peek_kind()? != SyntaxKind::EndOfFileToken {
            statements.push(self.parse_statement()?);
        }
        Ok(statements.into_bump_slice())
    }

    fn parse_statement(&mut self) -> ParseResult<Stmt<'a>> {
        self.enter()?;
        let result = self.parse_statement_worker();
        self.leave();
        result
    }

    fn parse_statement_worker(&mut self) -> ParseResult<Stmt<'a>> {
        match self.peek_kind()? {
            SyntaxKind::IfKeyword => Ok(Stmt::If(self.parse_if()?)),
            SyntaxKind::WhileKeyword => Ok(Stmt::While(self.parse_while()?)),
            SyntaxKind::ForKeyword => self.parse_for(),
            SyntaxKind::BreakKeyword => Ok(Stmt::Break(self.parse_jump(SyntaxKind::BreakKeyword)?)),
            SyntaxKind::ContinueKeyword => {
                Ok(Stmt::Continue(self.parse_jump(SyntaxKind::ContinueKeyword)?))
            }
            SyntaxKind::ReturnKeyword => self.parse_return(),
            SyntaxKind::ThrowKeyword => self.parse_throw(),
            SyntaxKind::VarKeyword => self.parse_var_statement(),
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(),
            SyntaxKind::SwitchKeyword => Ok(Stmt::Switch(self.parse_switch()?)),
            SyntaxKind::IncludePragma => Ok(Stmt::Include(self.parse_pragma(false)?)),
            SyntaxKind::DeclarePragma => Ok(Stmt::Declare(self.parse_pragma(true)?)),
            SyntaxKind::OpenBraceToken => Ok(Stmt::Block(self.parse_block()?)),
            SyntaxKind::SemicolonToken => Ok(Stmt::Empty(self.next()?)),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_block(&mut self) -> ParseResult<Block<'a>> {
        let open = self.expect(SyntaxKind::OpenBraceToken)?;
        let mut statements = BumpVec::new_in(self.arena);
        loop {
            match self.peek_kind()? {
                SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken => break,
                _ => statements.push(self.parse_statement()?),
            }
        }
        let close = self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(Block {
            open,
            statements: statements.into_bump_slice(),
            close,
        })
    }

    /// `if` with its `else if` chain, read in a loop and linked from the last
    /// branch back.
    fn parse_if(&mut self) -> ParseResult<IfStmt<'a>> {
        let mut pending = Vec::new();
        let mut last = loop {
            let mut stmt = self.parse_if_branch()?;
            let Some(keyword) = self.optional(SyntaxKind::ElseKeyword)? else {
                break stmt;
            };
            if self.peek_kind()? == SyntaxKind::IfKeyword {
                pending.push((stmt, keyword));
            } else {
                let block = self.parse_block()?;
                stmt.else_clause = Some(ElseClause {
                    keyword,
                    body: ElseBody::Block(block),
                });
                break stmt;
            }
        };
        while let Some((mut outer, keyword)) = pending.pop() {
            outer.else_clause = Some(ElseClause {
                keyword,
                body: ElseBody::If(self.alloc(last)),
            });
            last = outer;
        }
        Ok(last)
    }

    /// `if (test) block`, without its else clause.
    fn parse_if_branch(&mut self) -> ParseResult<IfStmt<'a>> {
        let keyword = self.expect(SyntaxKind::IfKeyword)?;
        let open = self.expect(SyntaxKind::OpenParenToken)?;
        let test = self.parse_expression()?;
        let close = self.expect(SyntaxKind::CloseParenToken)?;
        let then_block = self.parse_block()?;
        Ok(IfStmt {
            keyword,
            open,
            test,
            close,
            then_block,
            else_clause: None,
        })
    }

    fn parse_while(&mut self) -> ParseResult<WhileStmt<'a>> {
        let keyword = self.expect(SyntaxKind::WhileKeyword)?;
        let open = self.expect(SyntaxKind::OpenParenToken)?;
        let test = self.parse_expression()?;
        let close = self.expect(SyntaxKind::CloseParenToken)?;
        let body = self.parse_block()?;
        Ok(WhileStmt {
            keyword,
            open,
            test,
            close,
            body,
        })
    }

    fn parse_for(&mut self) -> ParseResult<Stmt<'a>> {
        let keyword = self.expect(SyntaxKind::ForKeyword)?;
        let open = self.expect(SyntaxKind::OpenParenToken)?;

        let is_for_in = self.scanner.look_ahead(|s| -> ParseResult<bool> {
            let mut token = s.next()?;
            if token.kind == SyntaxKind::VarKeyword {
                token = s.next()?;
            }
            Ok(token.kind == SyntaxKind::Identifier && s.next()?.kind == SyntaxKind::InKeyword)
        });
        let is_for_in = is_for_in.unwrap_or(false);

        if is_for_in {
            let var_keyword = self.optional(SyntaxKind::VarKeyword)?;
            let name = self.expect(SyntaxKind::Identifier)?;
            let in_keyword = self.expect(SyntaxKind::InKeyword)?;
            let object = self.parse_expression()?;
            let close = self.expect(SyntaxKind::CloseParenToken)?;
            let body = self.parse_block()?;
            return Ok(Stmt::ForIn(ForInStmt {
                keyword,
                open,
                var_keyword,
                name,
                in_keyword,
                object,
                close,
                body,
            }));
        }

        let init = if self.peek_kind()? == SyntaxKind::VarKeyword {
            ForInit::Var(self.parse_var_list()?)
        } else {
            ForInit::Exprs(self.parse_expression_list()?)
        };
        let first_semicolon = self.expect(SyntaxKind::SemicolonToken)?;
        let test = self.parse_expression_list()?;
        let second_semicolon = self.expect(SyntaxKind::SemicolonToken)?;
        let update = self.parse_expression_list()?;
        let close = self.expect(SyntaxKind::CloseParenToken)?;
        let body = self.parse_block()?;
        Ok(Stmt::For(ForStmt {
            keyword,
            open,
            init,
            first_semicolon,
            test,
            second_semicolon,
            update,
            close,
            body,
        }))
    }

    /// `break [label];` or `continue [label];`
    fn parse_jump(&mut self, kind: SyntaxKind) -> ParseResult<JumpStmt<'a>> {
        let keyword = self.expect(kind)?;
        let label = self.optional(SyntaxKind::Identifier)?;
        let semicolon = self.expect(SyntaxKind::SemicolonToken)?;
        Ok(JumpStmt {
            keyword,
            label,
            semicolon,
        })
    }

    fn parse_return(&mut self) -> ParseResult<Stmt<'a>> {
        let keyword = self.expect(SyntaxKind::ReturnKeyword)?;
        let value = if self.peek_kind()? == SyntaxKind::SemicolonToken {
            None
        } else {
            Some(self.parse_expression()?)
        };
        let semicolon = self.expect(SyntaxKind::SemicolonToken)?;
        Ok(Stmt::Return(ReturnStmt {
            keyword,
            value,
            semicolon,
        }))
    }

    fn parse_throw(&mut self) -> ParseResult<Stmt<'a>> {
        let keyword = self.expect(SyntaxKind::ThrowKeyword)?;
        let value = self.parse_expression()?;
        let semicolon = self.expect(SyntaxKind::SemicolonToken)?;
        Ok(Stmt::Throw(ThrowStmt {
            keyword,
            value,
            semicolon,
        }))
    }

    fn parse_var_list(&mut self) -> ParseResult<VarList<'a>> {
        let keyword = self.expect(SyntaxKind::VarKeyword)?;
        let mut decls = BumpVec::new_in(self.arena);
        let mut commas = BumpVec::new_in(self.arena);
        loop {
            let name = self.expect(SyntaxKind::Identifier)?;
            let init = match self.optional(SyntaxKind::EqualsToken)? {
                Some(equals) => Some(VarInit {
                    equals,
                    value: self.parse_expression()?,
                }),
                None => None,
            };
            decls.push(VarDecl { name, init });
            match self.optional(SyntaxKind::CommaToken)? {
                Some(comma) => commas.push(comma),
                None => break,
            }
        }
        Ok(VarList {
            keyword,
            decls: decls.into_bump_slice(),
            commas: commas.into_bump_slice(),
        })
    }

    fn parse_var_statement(&mut self) -> ParseResult<Stmt<'a>> {
        let list = self.parse_var_list()?;
        let semicolon = self.expect(SyntaxKind::SemicolonToken)?;
        Ok(Stmt::Var(VarStmt { list, semicolon }))
    }

    fn parse_function_declaration(&mut self) -> ParseResult<Stmt<'a>> {
        let keyword = self.expect(SyntaxKind::FunctionKeyword)?;
        let name = self.expect(SyntaxKind::Identifier)?;
        let function = self.parse_function_rest(Some(keyword), Some(name))?;
        Ok(Stmt::Function(self.alloc(function)))
    }

    fn parse_switch(&mut self) -> ParseResult<SwitchStmt<'a>> {
        let keyword = self.expect(SyntaxKind::SwitchKeyword)?;
        let open = self.expect(SyntaxKind::OpenParenToken)?;
        let discriminant = self.parse_expression()?;
        let close = self.expect(SyntaxKind::CloseParenToken)?;
        let open_brace = self.expect(SyntaxKind::OpenBraceToken)?;

        let mut clauses = BumpVec::new_in(self.arena);
        loop {
            let token = self.peek()?;
            let test = match token.kind {
                SyntaxKind::CloseBraceToken => break,
                SyntaxKind::CaseKeyword => {
                    self.next()?;
                    self.colon_depth += 1;
                    let test = self.parse_expression();
                    self.colon_depth -= 1;
                    Some(test?)
                }
                SyntaxKind::DefaultKeyword => {
                    self.next()?;
                    None
                }
                _ => return Err(self.expected(SyntaxKind::CaseKeyword, token)),
            };
            let colon = self.expect(SyntaxKind::ColonToken)?;
            let mut statements = BumpVec::new_in(self.arena);
            loop {
                match self.peek_kind()? {
                    SyntaxKind::CaseKeyword
                    | SyntaxKind::DefaultKeyword
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::EndOfFileToken => break,
                    _ => statements.push(self.parse_statement()?),
                }
            }
            clauses.push(CaseClause {
                keyword: token,
                test,
                colon,
                statements: statements.into_bump_slice(),
            });
        }

        let close_brace = self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(SwitchStmt {
            keyword,
            open,
            discriminant,
            close,
            open_brace,
            clauses: clauses.into_bump_slice(),
            close_brace,
        })
    }

    /// `#include a, b;` or `#declare a, :group;`
    fn parse_pragma(&mut self, allow_tags: bool) -> ParseResult<Pragma<'a>> {
        let keyword = self.next()?;
        let mut items = BumpVec::new_in(self.arena);
        let mut commas = BumpVec::new_in(self.arena);
        loop {
            let item = match self.optional(SyntaxKind::ColonToken)? {
                Some(colon) if allow_tags => PragmaItem::Tag {
                    colon,
                    name: self.expect(SyntaxKind::Identifier)?,
                },
                Some(colon) => return Err(self.expected(SyntaxKind::Identifier, colon)),
                None => PragmaItem::Name(self.expect(SyntaxKind::Identifier)?),
            };
            items.push(item);
            match self.optional(SyntaxKind::CommaToken)? {
                Some(comma) => commas.push(comma),
                None => break,
            }
        }
        let semicolon = self.expect(SyntaxKind::SemicolonToken)?;
        Ok(Pragma {
            keyword,
            items: items.into_bump_slice(),
            commas: commas.into_bump_slice(),
            semicolon,
        })
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Stmt<'a>> {
        let expr = self.parse_expression()?;
        if let Expr::Ident(label) = expr {
            if let Some(colon) = self.optional(SyntaxKind::ColonToken)? {
                let token = self.peek()?;
                let body = match token.kind {
                    SyntaxKind::WhileKeyword | SyntaxKind::ForKeyword | SyntaxKind::SwitchKeyword => {
                        self.parse_statement()?
                    }
                    _ => return Err(self.error_at(token, &messages::INVALID_LABELED_STATEMENT, &[])),
                };
                return Ok(Stmt::Labeled(LabeledStmt {
                    label,
                    colon,
                    body: self.alloc(body),
                }));
            }
        }
        let semicolon = self.expect(SyntaxKind::SemicolonToken)?;
        Ok(Stmt::Expr(ExprStmt { expr, semicolon }))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Comma-separated expressions, ending before `)`, `]` or `;`.
    fn parse_expression_list(&mut self) -> ParseResult<ExprList<'a>> {
        let mut elements = BumpVec::new_in(self.arena);
        let mut commas = BumpVec::new_in(self.arena);
        loop {
            match self.peek_kind()? {
                SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::SemicolonToken => break,
                _ => {}
            }
            elements.push(self.parse_expression()?);
            match self.optional(SyntaxKind::CommaToken)? {
                Some(comma) => commas.push(comma),
                None => break,
            }
        }
        Ok(ExprList {
            elements: elements.into_bump_slice(),
            commas: commas.into_bump_slice(),
        })
    }

    fn parse_expression(&mut self) -> ParseResult<Expr<'a>> {
        self.parse_binary_expression(OperatorPrecedence::Lowest)
    }

    fn parse_binary_expression(&mut self, min: OperatorPrecedence) -> ParseResult<Expr<'a>> {
        self.enter()?;
        let result = self.parse_binary_expression_worker(min);
        self.leave();
        result
    }

    fn parse_binary_expression_worker(&mut self, min: OperatorPrecedence) -> ParseResult<Expr<'a>> {
        let mut expr = self.parse_primary_expression()?;

        loop {
            let token = self.peek()?;
            if let Some(precedence) = get_binary_operator_precedence(token.kind) {
                let binds = if precedence.is_right_associative() {
                    precedence >= min
                } else {
                    precedence > min
                };
                if !binds {
                    break;
                }
                let operator = self.next()?;
                expr = if operator.kind == SyntaxKind::QuestionToken {
                    self.colon_depth += 1;
                    let when_true = self.parse_expression();
                    self.colon_depth -= 1;
                    let when_true = when_true?;
                    let colon = self.expect(SyntaxKind::ColonToken)?;
                    let when_false = self.parse_binary_expression(precedence)?;
                    Expr::Ternary(TernaryExpr {
                        condition: self.alloc(expr),
                        question: operator,
                        when_true: self.alloc(when_true),
                        colon,
                        when_false: self.alloc(when_false),
                    })
                } else {
                    let right = self.parse_binary_expression(precedence)?;
                    Expr::Binary(BinaryExpr {
                        left: self.alloc(expr),
                        operator,
                        right: self.alloc(right),
                    })
                };
                continue;
            }

            expr = match token.kind {
                SyntaxKind::DotToken => {
                    let dot = self.next()?;
                    let name = self.next()?;
                    if name.kind != SyntaxKind::Identifier && !name.is_word() {
                        return Err(self.expected(SyntaxKind::Identifier, name));
                    }
                    if self.peek_kind()? == SyntaxKind::OpenParenToken {
                        let open = self.next()?;
                        let arguments = self.parse_expression_list()?;
                        let close = self.expect(SyntaxKind::CloseParenToken)?;
                        Expr::Invoke(InvokeExpr {
                            target: self.alloc(expr),
                            dot,
                            name,
                            open,
                            arguments,
                            close,
                        })
                    } else {
                        Expr::Property(PropertyExpr {
                            target: self.alloc(expr),
                            dot,
                            name,
                        })
                    }
                }
                SyntaxKind::OpenParenToken => {
                    let open = self.next()?;
                    let arguments = self.parse_expression_list()?;
                    let close = self.expect(SyntaxKind::CloseParenToken)?;
                    Expr::Call(CallExpr {
                        callee: self.alloc(expr),
                        open,
                        arguments,
                        close,
                    })
                }
                SyntaxKind::OpenBracketToken => {
                    let open = self.next()?;
                    let index = self.parse_expression()?;
                    let close = self.expect(SyntaxKind::CloseBracketToken)?;
                    Expr::Index(IndexExpr {
                        target: self.alloc(expr),
                        open,
                        index: self.alloc(index),
                        close,
                    })
                }
                SyntaxKind::ColonColonToken => {
                    let colons = self.next()?;
                    let name = self.optional(SyntaxKind::Identifier)?;
                    Expr::PrototypeProperty(PrototypePropertyExpr {
                        target: self.alloc(expr),
                        colons,
                        name,
                    })
                }
                SyntaxKind::DotDotDotToken => {
                    let dots = self.next()?;
                    match expr {
                        Expr::Ident(name) => Expr::Yada(YadaExpr { name, dots }),
                        _ => return Err(self.error_at(dots, &messages::UNEXPECTED_0, &["..."])),
                    }
                }
                _ => break,
            };
        }

        Ok(expr)
    }

    fn parse_primary_expression(&mut self) -> ParseResult<Expr<'a>> {
        let token = self.peek()?;
        let expr = match token.kind {
            SyntaxKind::NumericLiteral => Expr::Number(self.next()?),
            SyntaxKind::NullKeyword => Expr::Null(self.next()?),
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => Expr::Bool(self.next()?),
            SyntaxKind::Identifier => Expr::Ident(self.next()?),
            SyntaxKind::DoubleQuoteToken
            | SyntaxKind::SingleQuoteToken
            | SyntaxKind::SlashToken
            | SyntaxKind::SlashEqualsToken => Expr::String(self.parse_quoted()?),
            SyntaxKind::AtToken => Expr::Pass(self.parse_pass()?),
            SyntaxKind::OpenBracketToken => {
                let open = self.next()?;
                let elements = self.parse_expression_list()?;
                let close = self.expect(SyntaxKind::CloseBracketToken)?;
                Expr::Array(ArrayExpr {
                    open,
                    elements,
                    close,
                })
            }
            SyntaxKind::OpenBraceToken => Expr::Object(self.parse_object()?),
            SyntaxKind::NewKeyword => Expr::New(self.parse_new()?),
            SyntaxKind::ExclamationToken
            | SyntaxKind::MinusToken
            | SyntaxKind::PlusToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::DeleteKeyword => {
                let operator = self.next()?;
                let operand = self.parse_binary_expression(OperatorPrecedence::Unary)?;
                Expr::Unary(UnaryExpr {
                    operator,
                    operand: self.alloc(operand),
                })
            }
            SyntaxKind::OpenParenToken => self.parse_parenthesized()?,
            SyntaxKind::MinusGreaterThanToken => {
                let arrow = self.next()?;
                let body = self.parse_expression()?;
                Expr::SimpleArrow(SimpleArrowExpr {
                    arrow,
                    body: self.alloc(body),
                })
            }
            SyntaxKind::FunctionKeyword => {
                let keyword = self.next()?;
                let name = self.optional(SyntaxKind::Identifier)?;
                let function = self.parse_function_rest(Some(keyword), name)?;
                Expr::Function(self.alloc(function))
            }
            _ => return Err(self.error_at(token, &messages::INVALID_EXPRESSION, &[])),
        };
        Ok(expr)
    }

    fn parse_pass(&mut self) -> ParseResult<PassExpr<'a>> {
        let at = self.expect(SyntaxKind::AtToken)?;
        let handler = self.optional(SyntaxKind::Identifier)?;
        Ok(PassExpr { at, handler })
    }

    fn parse_object(&mut self) -> ParseResult<ObjectExpr<'a>> {
        let open = self.expect(SyntaxKind::OpenBraceToken)?;
        let mut properties = BumpVec::new_in(self.arena);
        let mut commas = BumpVec::new_in(self.arena);
        loop {
            let token = self.peek()?;
            let key = match token.kind {
                SyntaxKind::CloseBraceToken => break,
                SyntaxKind::Identifier => self.next()?,
                SyntaxKind::DoubleQuoteToken | SyntaxKind::SingleQuoteToken => self.parse_quoted()?,
                _ => return Err(self.error_at(token, &messages::INVALID_OBJECT_KEY, &[])),
            };
            let colon = self.expect(SyntaxKind::ColonToken)?;
            let value = self.parse_expression()?;
            properties.push(ObjectProperty { key, colon, value });
            match self.optional(SyntaxKind::CommaToken)? {
                Some(comma) => commas.push(comma),
                None => break,
            }
        }
        let close = self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(ObjectExpr {
            open,
            properties: properties.into_bump_slice(),
            commas: commas.into_bump_slice(),
            close,
        })
    }

    /// `new Name(.Name)*(arguments)`
    fn parse_new(&mut self) -> ParseResult<NewExpr<'a>> {
        let keyword = self.expect(SyntaxKind::NewKeyword)?;
        let mut callee = Expr::Ident(self.expect(SyntaxKind::Identifier)?);
        while let Some(dot) = self.optional(SyntaxKind::DotToken)? {
            let name = self.expect(SyntaxKind::Identifier)?;
            callee = Expr::Property(PropertyExpr {
                target: self.alloc(callee),
                dot,
                name,
            });
        }
        let open = self.expect(SyntaxKind::OpenParenToken)?;
        let arguments = self.parse_expression_list()?;
        let close = self.expect(SyntaxKind::CloseParenToken)?;
        Ok(NewExpr {
            keyword,
            callee: self.alloc(callee),
            open,
            arguments,
            close,
        })
    }

    /// A parenthesized list: shorthand function, arrow function or group,
    /// depending on what follows the closing paren.
    fn parse_parenthesized(&mut self) -> ParseResult<Expr<'a>> {
        let open = self.expect(SyntaxKind::OpenParenToken)?;
        let list = self.parse_expression_list()?;
        let close = self.expect(SyntaxKind::CloseParenToken)?;

        let next = self.peek()?;
        match next.kind {
            SyntaxKind::OpenBraceToken => {
                let function = self.finish_function(None, None, open, list, close, None)?;
                return Ok(Expr::Function(self.alloc(function)));
            }
            SyntaxKind::ColonToken if self.colon_depth == 0 || self.at_this_binding() => {
                let this_binding = self.parse_this_binding()?;
                let function = self.finish_function(None, None, open, list, close, this_binding)?;
                return Ok(Expr::Function(self.alloc(function)));
            }
            SyntaxKind::MinusGreaterThanToken => {
                let params = self.to_params(list, next)?;
                let arrow = self.next()?;
                let body = self.parse_expression()?;
                return Ok(Expr::Arrow(ArrowExpr {
                    open,
                    params,
                    close,
                    arrow,
                    body: self.alloc(body),
                }));
            }
            _ => {}
        }

        match list.elements {
            [expr] if !list.has_trailing_comma() => Ok(Expr::Group(GroupExpr {
                open,
                expr: self.alloc(*expr),
                close,
            })),
            _ => Err(self.error_at(
                next,
                &messages::UNEXPECTED_0_AFTER_PARENTHESIZED_LIST,
                &[next.display_text()],
            )),
        }
    }

    /// Whether `: name {` follows.
    fn at_this_binding(&mut self) -> bool {
        self.scanner
            .look_ahead(|s| -> ParseResult<bool> {
                Ok(s.next()?.kind == SyntaxKind::ColonToken
                    && s.next()?.kind == SyntaxKind::Identifier
                    && s.next()?.kind == SyntaxKind::OpenBraceToken)
            })
            .unwrap_or(false)
    }

    fn parse_this_binding(&mut self) -> ParseResult<Option<ThisBinding<'a>>> {
        match self.optional(SyntaxKind::ColonToken)? {
            Some(colon) => {
                let name = self.expect(SyntaxKind::Identifier)?;
                Ok(Some(ThisBinding { colon, name }))
            }
            None => Ok(None),
        }
    }

    /// Parameter list, optional `: alias` and body of a function whose
    /// keyword and name (if any) were already consumed.
    fn parse_function_rest(
        &mut self,
        keyword: Option<Token<'a>>,
        name: Option<Token<'a>>,
    ) -> ParseResult<FunctionNode<'a>> {
        let open = self.expect(SyntaxKind::OpenParenToken)?;
        let list = self.parse_expression_list()?;
        let close = self.expect(SyntaxKind::CloseParenToken)?;
        let this_binding = self.parse_this_binding()?;
        self.finish_function(keyword, name, open, list, close, this_binding)
    }

    fn finish_function(
        &mut self,
        keyword: Option<Token<'a>>,
        name: Option<Token<'a>>,
        open: Token<'a>,
        list: ExprList<'a>,
        close: Token<'a>,
        this_binding: Option<ThisBinding<'a>>,
    ) -> ParseResult<FunctionNode<'a>> {
        let brace = self.expect_peek(SyntaxKind::OpenBraceToken)?;
        let params = self.to_params(list, brace)?;
        // A function body starts a fresh context for ternary and case colons.
        let colon_depth = std::mem::replace(&mut self.colon_depth, 0);
        let body = self.parse_block();
        self.colon_depth = colon_depth;
        Ok(FunctionNode {
            keyword,
            name,
            open,
            params,
            close,
            this_binding,
            body: body?,
        })
    }

    /// Reinterpret an expression list as formal parameters. `next` is the
    /// token that made the list a parameter list, used in the error.
    fn to_params(&self, list: ExprList<'a>, next: Token<'a>) -> ParseResult<ParamList<'a>> {
        let mut params = BumpVec::with_capacity_in(list.len(), self.arena);
        for expr in list.elements {
            let param = match *expr {
                Expr::Ident(name) => Param::Ident(name),
                Expr::Pass(pass) => Param::Pass(pass),
                Expr::Yada(rest) => Param::Rest(rest),
                _ => {
                    return Err(self.error_at(
                        next,
                        &messages::INVALID_FORMAL_PARAMETER_LIST_BEFORE_0,
                        &[next.text],
                    ))
                }
            };
            params.push(param);
        }
        Ok(ParamList {
            params: params.into_bump_slice(),
            commas: list.commas,
        })
    }
}
