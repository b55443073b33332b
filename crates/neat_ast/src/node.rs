//! Syntax tree node definitions.
//!
//! Every node keeps all of its tokens in source order so that the printer can
//! replay the original text. Child nodes are arena-allocated and referenced
//! with the arena lifetime `'a`; all nodes are `Copy`.

use crate::types::Token;

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

// ============================================================================
// Program
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct Program<'a> {
    /// Identifier of the compiled file, used in diagnostics.
    pub file_name: &'a str,
    /// The full source text.
    pub text: &'a str,
    /// Whitespace, comments and shebang before the first token.
    pub preamble: &'a str,
    pub statements: NodeList<'a, Stmt<'a>>,
    pub end_of_file_token: Token<'a>,
}

// ============================================================================
// Lists
// ============================================================================

/// A comma-separated expression list. `commas[i]` follows `elements[i]`;
/// a trailing comma makes both slices the same length.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExprList<'a> {
    pub elements: NodeList<'a, Expr<'a>>,
    pub commas: NodeList<'a, Token<'a>>,
}

impl<'a> ExprList<'a> {
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn has_trailing_comma(&self) -> bool {
        !self.elements.is_empty() && self.commas.len() == self.elements.len()
    }
}

/// A formal parameter.
#[derive(Debug, Clone, Copy)]
pub enum Param<'a> {
    Ident(Token<'a>),
    /// `@` or `@handler`: receives the error argument.
    Pass(PassExpr<'a>),
    /// `name...`: collects the remaining arguments.
    Rest(YadaExpr<'a>),
}

impl<'a> Param<'a> {
    pub fn first_token(&self) -> Token<'a> {
        match self {
            Param::Ident(t) => *t,
            Param::Pass(p) => p.at,
            Param::Rest(r) => r.name,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParamList<'a> {
    pub params: NodeList<'a, Param<'a>>,
    pub commas: NodeList<'a, Token<'a>>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Expr<'a> {
    Number(Token<'a>),
    /// A string or regex literal; the token kind tells them apart.
    String(Token<'a>),
    Null(Token<'a>),
    Bool(Token<'a>),
    Ident(Token<'a>),
    Unary(UnaryExpr<'a>),
    Binary(BinaryExpr<'a>),
    Ternary(TernaryExpr<'a>),
    Call(CallExpr<'a>),
    Invoke(InvokeExpr<'a>),
    Index(IndexExpr<'a>),
    Property(PropertyExpr<'a>),
    PrototypeProperty(PrototypePropertyExpr<'a>),
    New(NewExpr<'a>),
    Array(ArrayExpr<'a>),
    Object(ObjectExpr<'a>),
    Group(GroupExpr<'a>),
    Function(&'a FunctionNode<'a>),
    Arrow(ArrowExpr<'a>),
    SimpleArrow(SimpleArrowExpr<'a>),
    Pass(PassExpr<'a>),
    Yada(YadaExpr<'a>),
}

impl<'a> Expr<'a> {
    /// The operand that comes first in source order: the left side of a
    /// binary or ternary expression, or the target of a call, index or
    /// member access. Chains of these have no length limit.
    pub fn leading_operand(&self) -> Option<&'a Expr<'a>> {
        match self {
            Expr::Binary(e) => Some(e.left),
            Expr::Ternary(e) => Some(e.condition),
            Expr::Call(e) => Some(e.callee),
            Expr::Invoke(e) => Some(e.target),
            Expr::Index(e) => Some(e.target),
            Expr::Property(e) => Some(e.target),
            Expr::PrototypeProperty(e) => Some(e.target),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UnaryExpr<'a> {
    pub operator: Token<'a>,
    pub operand: &'a Expr<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct BinaryExpr<'a> {
    pub left: &'a Expr<'a>,
    pub operator: Token<'a>,
    pub right: &'a Expr<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct TernaryExpr<'a> {
    pub condition: &'a Expr<'a>,
    pub question: Token<'a>,
    pub when_true: &'a Expr<'a>,
    pub colon: Token<'a>,
    pub when_false: &'a Expr<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct CallExpr<'a> {
    pub callee: &'a Expr<'a>,
    pub open: Token<'a>,
    pub arguments: ExprList<'a>,
    pub close: Token<'a>,
}

/// `target.name(arguments)`
#[derive(Debug, Clone, Copy)]
pub struct InvokeExpr<'a> {
    pub target: &'a Expr<'a>,
    pub dot: Token<'a>,
    pub name: Token<'a>,
    pub open: Token<'a>,
    pub arguments: ExprList<'a>,
    pub close: Token<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct IndexExpr<'a> {
    pub target: &'a Expr<'a>,
    pub open: Token<'a>,
    pub index: &'a Expr<'a>,
    pub close: Token<'a>,
}

/// `target.name`; `name` may be a reserved word.
#[derive(Debug, Clone, Copy)]
pub struct PropertyExpr<'a> {
    pub target: &'a Expr<'a>,
    pub dot: Token<'a>,
    pub name: Token<'a>,
}

/// `target::name` or bare `target::`.
#[derive(Debug, Clone, Copy)]
pub struct PrototypePropertyExpr<'a> {
    pub target: &'a Expr<'a>,
    pub colons: Token<'a>,
    pub name: Option<Token<'a>>,
}

/// `new Name(.Name)*(arguments)`; `callee` is an identifier or property chain.
#[derive(Debug, Clone, Copy)]
pub struct NewExpr<'a> {
    pub keyword: Token<'a>,
    pub callee: &'a Expr<'a>,
    pub open: Token<'a>,
    pub arguments: ExprList<'a>,
    pub close: Token<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ArrayExpr<'a> {
    pub open: Token<'a>,
    pub elements: ExprList<'a>,
    pub close: Token<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ObjectProperty<'a> {
    /// An identifier or a quoted string.
    pub key: Token<'a>,
    pub colon: Token<'a>,
    pub value: Expr<'a>,
}

/// `{ key: value, ... }`. `commas[i]` follows `properties[i]`.
#[derive(Debug, Clone, Copy)]
pub struct ObjectExpr<'a> {
    pub open: Token<'a>,
    pub properties: NodeList<'a, ObjectProperty<'a>>,
    pub commas: NodeList<'a, Token<'a>>,
    pub close: Token<'a>,
}

impl<'a> ObjectExpr<'a> {
    pub fn has_trailing_comma(&self) -> bool {
        !self.properties.is_empty() && self.commas.len() == self.properties.len()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GroupExpr<'a> {
    pub open: Token<'a>,
    pub expr: &'a Expr<'a>,
    pub close: Token<'a>,
}

/// `(params) -> body`
#[derive(Debug, Clone, Copy)]
pub struct ArrowExpr<'a> {
    pub open: Token<'a>,
    pub params: ParamList<'a>,
    pub close: Token<'a>,
    pub arrow: Token<'a>,
    pub body: &'a Expr<'a>,
}

/// `-> body`, with an implicit `_` parameter.
#[derive(Debug, Clone, Copy)]
pub struct SimpleArrowExpr<'a> {
    pub arrow: Token<'a>,
    pub body: &'a Expr<'a>,
}

/// `@` or `@handler`.
#[derive(Debug, Clone, Copy)]
pub struct PassExpr<'a> {
    pub at: Token<'a>,
    pub handler: Option<Token<'a>>,
}

/// `name...`
#[derive(Debug, Clone, Copy)]
pub struct YadaExpr<'a> {
    pub name: Token<'a>,
    pub dots: Token<'a>,
}

// ============================================================================
// Functions
// ============================================================================

/// `: alias` after a parameter list, binding `this` to `alias`.
#[derive(Debug, Clone, Copy)]
pub struct ThisBinding<'a> {
    pub colon: Token<'a>,
    pub name: Token<'a>,
}

/// A function declaration or expression.
///
/// The shorthand expression form `(params) { ... }` has no `keyword`.
#[derive(Debug, Clone, Copy)]
pub struct FunctionNode<'a> {
    pub keyword: Option<Token<'a>>,
    pub name: Option<Token<'a>>,
    pub open: Token<'a>,
    pub params: ParamList<'a>,
    pub close: Token<'a>,
    pub this_binding: Option<ThisBinding<'a>>,
    pub body: Block<'a>,
}

impl<'a> FunctionNode<'a> {
    pub fn first_token(&self) -> Token<'a> {
        self.keyword.unwrap_or(self.open)
    }

    pub fn is_shorthand(&self) -> bool {
        self.keyword.is_none()
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Stmt<'a> {
    Expr(ExprStmt<'a>),
    Empty(Token<'a>),
    If(IfStmt<'a>),
    While(WhileStmt<'a>),
    For(ForStmt<'a>),
    ForIn(ForInStmt<'a>),
    Break(JumpStmt<'a>),
    Continue(JumpStmt<'a>),
    Return(ReturnStmt<'a>),
    Throw(ThrowStmt<'a>),
    Var(VarStmt<'a>),
    Function(&'a FunctionNode<'a>),
    Labeled(LabeledStmt<'a>),
    Switch(SwitchStmt<'a>),
    Block(Block<'a>),
    Include(Pragma<'a>),
    Declare(Pragma<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct Block<'a> {
    pub open: Token<'a>,
    pub statements: NodeList<'a, Stmt<'a>>,
    pub close: Token<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ExprStmt<'a> {
    pub expr: Expr<'a>,
    pub semicolon: Token<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct IfStmt<'a> {
    pub keyword: Token<'a>,
    pub open: Token<'a>,
    pub test: Expr<'a>,
    pub close: Token<'a>,
    pub then_block: Block<'a>,
    pub else_clause: Option<ElseClause<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ElseClause<'a> {
    pub keyword: Token<'a>,
    pub body: ElseBody<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum ElseBody<'a> {
    If(&'a IfStmt<'a>),
    Block(Block<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct WhileStmt<'a> {
    pub keyword: Token<'a>,
    pub open: Token<'a>,
    pub test: Expr<'a>,
    pub close: Token<'a>,
    pub body: Block<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum ForInit<'a> {
    Exprs(ExprList<'a>),
    Var(VarList<'a>),
}

/// `for (init; test; update) body`; every clause may be empty.
#[derive(Debug, Clone, Copy)]
pub struct ForStmt<'a> {
    pub keyword: Token<'a>,
    pub open: Token<'a>,
    pub init: ForInit<'a>,
    pub first_semicolon: Token<'a>,
    pub test: ExprList<'a>,
    pub second_semicolon: Token<'a>,
    pub update: ExprList<'a>,
    pub close: Token<'a>,
    pub body: Block<'a>,
}

/// `for ([var] name in object) body`
#[derive(Debug, Clone, Copy)]
pub struct ForInStmt<'a> {
    pub keyword: Token<'a>,
    pub open: Token<'a>,
    pub var_keyword: Option<Token<'a>>,
    pub name: Token<'a>,
    pub in_keyword: Token<'a>,
    pub object: Expr<'a>,
    pub close: Token<'a>,
    pub body: Block<'a>,
}

/// `break [label];` or `continue [label];`
#[derive(Debug, Clone, Copy)]
pub struct JumpStmt<'a> {
    pub keyword: Token<'a>,
    pub label: Option<Token<'a>>,
    pub semicolon: Token<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ReturnStmt<'a> {
    pub keyword: Token<'a>,
    pub value: Option<Expr<'a>>,
    pub semicolon: Token<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ThrowStmt<'a> {
    pub keyword: Token<'a>,
    pub value: Expr<'a>,
    pub semicolon: Token<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct VarInit<'a> {
    pub equals: Token<'a>,
    pub value: Expr<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct VarDecl<'a> {
    pub name: Token<'a>,
    pub init: Option<VarInit<'a>>,
}

/// `var a [= x], b [= y]` without the terminating semicolon.
#[derive(Debug, Clone, Copy)]
pub struct VarList<'a> {
    pub keyword: Token<'a>,
    pub decls: NodeList<'a, VarDecl<'a>>,
    pub commas: NodeList<'a, Token<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct VarStmt<'a> {
    pub list: VarList<'a>,
    pub semicolon: Token<'a>,
}

/// `label: while/for/switch ...`
#[derive(Debug, Clone, Copy)]
pub struct LabeledStmt<'a> {
    pub label: Token<'a>,
    pub colon: Token<'a>,
    pub body: &'a Stmt<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct CaseClause<'a> {
    /// `case` or `default`.
    pub keyword: Token<'a>,
    pub test: Option<Expr<'a>>,
    pub colon: Token<'a>,
    pub statements: NodeList<'a, Stmt<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct SwitchStmt<'a> {
    pub keyword: Token<'a>,
    pub open: Token<'a>,
    pub discriminant: Expr<'a>,
    pub close: Token<'a>,
    pub open_brace: Token<'a>,
    pub clauses: NodeList<'a, CaseClause<'a>>,
    pub close_brace: Token<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum PragmaItem<'a> {
    Name(Token<'a>),
    /// `:group`
    Tag { colon: Token<'a>, name: Token<'a> },
}

/// `#include a, b;` or `#declare a, :group;`
#[derive(Debug, Clone, Copy)]
pub struct Pragma<'a> {
    pub keyword: Token<'a>,
    pub items: NodeList<'a, PragmaItem<'a>>,
    pub commas: NodeList<'a, Token<'a>>,
    pub semicolon: Token<'a>,
}
