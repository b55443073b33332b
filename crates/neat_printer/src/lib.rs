//! neat_printer: Syntax tree to JavaScript text.
//!
//! The printer is not a formatter. It replays every token of the tree as
//! `text + trailing`, so the output keeps the input's layout and line
//! numbers. Only the dialect constructs are rewritten, in place:
//! - `==` / `!=` become `===` / `!==`
//! - `a::b` becomes `a.prototype.b`
//! - a trailing comma in an object literal is dropped
//! - pass, rest and this-binding parameters inject statements after the
//!   body's opening brace
//! - arrow functions become `function` expressions
//! - pragmas become comments
//!
//! Helper bodies required by `#include` are appended at the end.

use neat_ast::helpers::helper_source;
use neat_ast::node::*;
use neat_ast::syntax_kind::SyntaxKind;
use neat_ast::types::Token;

/// Render `program`, then append the body of each helper in `helpers`.
pub fn render<'h>(program: &Program<'_>, helpers: impl IntoIterator<Item = &'h str>) -> String {
    let mut printer = Printer::new();
    printer.print_program(program);
    for source in helpers.into_iter().filter_map(helper_source) {
        printer.write(source);
    }
    printer.finish()
}

/// The printer converts a syntax tree to text.
pub struct Printer {
    output: String,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    pub fn print_program(&mut self, program: &Program<'_>) {
        self.output.reserve(program.text.len());
        self.write(program.preamble);
        self.print_statements(program.statements);
        self.print_token(program.end_of_file_token);
    }

    #[inline]
    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    #[inline]
    fn print_token(&mut self, token: Token<'_>) {
        self.write(token.text);
        self.write(token.trailing);
    }

    fn print_optional_token(&mut self, token: Option<Token<'_>>) {
        if let Some(token) = token {
            self.print_token(token);
        }
    }

    /// Trivia left behind by adjacent tokens that are not printed. Blank
    /// runs collapse to one space; line breaks and comments are kept.
    fn write_gap(&mut self, pieces: &[&str]) {
        let blank = |piece: &&str| piece.bytes().all(|b| b == b' ' || b == b'\t');
        if pieces.iter().all(blank) {
            if pieces.iter().any(|piece| !piece.is_empty()) {
                self.write(" ");
            }
        } else {
            for piece in pieces {
                self.write(piece);
            }
        }
    }

    // ========================================================================
    // Statement printing
    // ========================================================================

    fn print_statements(&mut self, statements: &[Stmt<'_>]) {
        for stmt in statements {
            self.print_statement(stmt);
        }
    }

    fn print_statement(&mut self, stmt: &Stmt<'_>) {
        match stmt {
            Stmt::Expr(s) => {
                self.print_expression(&s.expr);
                self.print_token(s.semicolon);
            }
            Stmt::Empty(t) => self.print_token(*t),
            Stmt::If(s) => self.print_if(s),
            Stmt::While(s) => {
                self.print_token(s.keyword);
                self.print_token(s.open);
                self.print_expression(&s.test);
                self.print_token(s.close);
                self.print_block(&s.body);
            }
            Stmt::For(s) => {
                self.print_token(s.keyword);
                self.print_token(s.open);
                match &s.init {
                    ForInit::Exprs(list) => self.print_expression_list(list),
                    ForInit::Var(list) => self.print_var_list(list),
                }
                self.print_token(s.first_semicolon);
                self.print_expression_list(&s.test);
                self.print_token(s.second_semicolon);
                self.print_expression_list(&s.update);
                self.print_token(s.close);
                self.print_block(&s.body);
            }
            Stmt::ForIn(s) => {
                self.print_token(s.keyword);
                self.print_token(s.open);
                self.print_optional_token(s.var_keyword);
                self.print_token(s.name);
                self.print_token(s.in_keyword);
                self.print_expression(&s.object);
                self.print_token(s.close);
                self.print_block(&s.body);
            }
            Stmt::Break(s) | Stmt::Continue(s) => {
                self.print_token(s.keyword);
                self.print_optional_token(s.label);
                self.print_token(s.semicolon);
            }
            Stmt::Return(s) => {
                self.print_token(s.keyword);
                if let Some(value) = &s.value {
                    self.print_expression(value);
                }
                self.print_token(s.semicolon);
            }
            Stmt::Throw(s) => {
                self.print_token(s.keyword);
                self.print_expression(&s.value);
                self.print_token(s.semicolon);
            }
            Stmt::Var(s) => {
                self.print_var_list(&s.list);
                self.print_token(s.semicolon);
            }
            Stmt::Function(f) => self.print_function(f),
            Stmt::Labeled(s) => {
                self.print_token(s.label);
                self.print_token(s.colon);
                self.print_statement(s.body);
            }
            Stmt::Switch(s) => self.print_switch(s),
            Stmt::Block(b) => self.print_block(b),
            Stmt::Include(p) | Stmt::Declare(p) => self.print_pragma(p),
        }
    }

    fn print_block(&mut self, block: &Block<'_>) {
        self.print_token(block.open);
        self.print_statements(block.statements);
        self.print_token(block.close);
    }

    fn print_if(&mut self, node: &IfStmt<'_>) {
        let mut node = node;
        loop {
            self.print_token(node.keyword);
            self.print_token(node.open);
            self.print_expression(&node.test);
            self.print_token(node.close);
            self.print_block(&node.then_block);
            let Some(clause) = &node.else_clause else {
                return;
            };
            self.print_token(clause.keyword);
            match &clause.body {
                ElseBody::If(inner) => node = inner,
                ElseBody::Block(block) => return self.print_block(block),
            }
        }
    }

    fn print_var_list(&mut self, list: &VarList<'_>) {
        self.print_token(list.keyword);
        for (i, decl) in list.decls.iter().enumerate() {
            self.print_token(decl.name);
            if let Some(init) = &decl.init {
                self.print_token(init.equals);
                self.print_expression(&init.value);
            }
            if let Some(comma) = list.commas.get(i) {
                self.print_token(*comma);
            }
        }
    }

    fn print_switch(&mut self, node: &SwitchStmt<'_>) {
        self.print_token(node.keyword);
        self.print_token(node.open);
        self.print_expression(&node.discriminant);
        self.print_token(node.close);
        self.print_token(node.open_brace);
        for clause in node.clauses {
            self.print_token(clause.keyword);
            if let Some(test) = &clause.test {
                self.print_expression(test);
            }
            self.print_token(clause.colon);
            self.print_statements(clause.statements);
        }
        self.print_token(node.close_brace);
    }

    /// `#include a, b;` becomes `/* #include a, b; */` followed by the
    /// whitespace of every token, so line numbers are unchanged.
    fn print_pragma(&mut self, pragma: &Pragma<'_>) {
        self.write("/* ");
        self.write(pragma.keyword.text);
        self.write(" ");
        for (i, item) in pragma.items.iter().enumerate() {
            match *item {
                PragmaItem::Name(name) => self.write(name.text),
                PragmaItem::Tag { colon, name } => {
                    self.write(colon.text);
                    self.write(name.text);
                }
            }
            if let Some(comma) = pragma.commas.get(i) {
                self.write(comma.text);
                self.write(" ");
            }
        }
        self.write(pragma.semicolon.text);
        self.write(" */");

        self.write(pragma.keyword.trailing);
        for (i, item) in pragma.items.iter().enumerate() {
            match *item {
                PragmaItem::Name(name) => self.write(name.trailing),
                PragmaItem::Tag { colon, name } => {
                    self.write(colon.trailing);
                    self.write(name.trailing);
                }
            }
            if let Some(comma) = pragma.commas.get(i) {
                self.write(comma.trailing);
            }
        }
        self.write(pragma.semicolon.trailing);
    }

    // ========================================================================
    // Function printing
    // ========================================================================

    fn print_function(&mut self, node: &FunctionNode<'_>) {
        match node.keyword {
            Some(keyword) => self.print_token(keyword),
            None => self.write("function "),
        }
        self.print_optional_token(node.name);
        self.print_token(node.open);

        let mut pass: Option<&PassExpr<'_>> = None;
        let mut rest: Option<(usize, Token<'_>)> = None;
        for (i, param) in node.params.params.iter().enumerate() {
            match param {
                Param::Ident(name) => self.print_token(*name),
                Param::Pass(p) => {
                    self.write("__err");
                    self.write(p.handler.unwrap_or(p.at).trailing);
                    pass = Some(p);
                }
                Param::Rest(r) => {
                    self.print_token(r.name);
                    self.write(r.dots.trailing);
                    rest = Some((i, r.name));
                }
            }
            if let Some(comma) = node.params.commas.get(i) {
                self.print_token(*comma);
            }
        }
        match &node.this_binding {
            Some(binding) => {
                self.write(node.close.text);
                self.write_gap(&[
                    node.close.trailing,
                    binding.colon.trailing,
                    binding.name.trailing,
                ]);
            }
            None => self.print_token(node.close),
        }

        let body = &node.body;
        self.write(body.open.text);
        if let Some(pass) = pass {
            match pass.handler {
                Some(handler) => {
                    self.write(" if (__err) { ");
                    self.write(handler.text);
                    self.write("(__err); return; }");
                }
                None => self.write(" if (__err) { throw __err; }"),
            }
        }
        if let Some(binding) = &node.this_binding {
            self.write(" var ");
            self.write(binding.name.text);
            self.write(" = this;");
        }
        if let Some((index, name)) = rest {
            self.write(&format!(
                " {} = [].slice.call(arguments, {});",
                name.text, index
            ));
        }
        self.write(body.open.trailing);
        self.print_statements(body.statements);
        self.print_token(body.close);
    }

    /// `(a, b) -> expr` becomes `function (a, b) {<ws>return expr; }`.
    fn print_arrow(&mut self, node: &ArrowExpr<'_>) {
        self.write("function ");
        self.print_token(node.open);
        for (i, param) in node.params.params.iter().enumerate() {
            self.print_token(param.first_token());
            if let Some(comma) = node.params.commas.get(i) {
                self.print_token(*comma);
            }
        }
        self.print_token(node.close);
        self.write("{");
        self.write(node.arrow.trailing);
        self.write("return ");
        self.print_expression(node.body);
        self.write("; }");
    }

    // ========================================================================
    // Expression printing
    // ========================================================================

    fn print_expression_list(&mut self, list: &ExprList<'_>) {
        for (i, expr) in list.elements.iter().enumerate() {
            self.print_expression(expr);
            if let Some(comma) = list.commas.get(i) {
                self.print_token(*comma);
            }
        }
    }

    /// Print `expr`, walking its chain of leading operands with a loop.
    fn print_expression(&mut self, expr: &Expr<'_>) {
        let mut chain = Vec::new();
        let mut innermost = expr;
        while let Some(operand) = innermost.leading_operand() {
            chain.push(innermost);
            innermost = operand;
        }
        self.print_node(innermost);
        for link in chain.iter().rev() {
            self.print_node(link);
        }
    }

    /// Print everything in `expr` after its leading operand.
    fn print_node(&mut self, expr: &Expr<'_>) {
        match expr {
            Expr::Number(t) | Expr::String(t) | Expr::Null(t) | Expr::Bool(t) | Expr::Ident(t) => {
                self.print_token(*t)
            }
            Expr::Unary(e) => {
                self.print_token(e.operator);
                self.print_expression(e.operand);
            }
            Expr::Binary(e) => {
                match e.operator.kind {
                    SyntaxKind::EqualsEqualsToken | SyntaxKind::ExclamationEqualsToken => {
                        self.write(e.operator.text);
                        self.write("=");
                        self.write(e.operator.trailing);
                    }
                    _ => self.print_token(e.operator),
                }
                self.print_expression(e.right);
            }
            Expr::Ternary(e) => {
                self.print_token(e.question);
                self.print_expression(e.when_true);
                self.print_token(e.colon);
                self.print_expression(e.when_false);
            }
            Expr::Call(e) => {
                self.print_token(e.open);
                self.print_expression_list(&e.arguments);
                self.print_token(e.close);
            }
            Expr::Invoke(e) => {
                self.print_token(e.dot);
                self.print_token(e.name);
                self.print_token(e.open);
                self.print_expression_list(&e.arguments);
                self.print_token(e.close);
            }
            Expr::Index(e) => {
                self.print_token(e.open);
                self.print_expression(e.index);
                self.print_token(e.close);
            }
            Expr::Property(e) => {
                self.print_token(e.dot);
                self.print_token(e.name);
            }
            Expr::PrototypeProperty(e) => {
                self.write(".prototype");
                self.write(e.colons.trailing);
                if let Some(name) = e.name {
                    self.write(".");
                    self.print_token(name);
                }
            }
            Expr::New(e) => {
                self.print_token(e.keyword);
                self.print_expression(e.callee);
                self.print_token(e.open);
                self.print_expression_list(&e.arguments);
                self.print_token(e.close);
            }
            Expr::Array(e) => {
                self.print_token(e.open);
                self.print_expression_list(&e.elements);
                self.print_token(e.close);
            }
            Expr::Object(e) => self.print_object(e),
            Expr::Group(e) => {
                self.print_token(e.open);
                self.print_expression(e.expr);
                self.print_token(e.close);
            }
            Expr::Function(f) => self.print_function(f),
            Expr::Arrow(e) => self.print_arrow(e),
            Expr::SimpleArrow(e) => {
                self.write("function (_) {");
                self.write(e.arrow.trailing);
                self.write("return ");
                self.print_expression(e.body);
                self.write("; }");
            }
            // Rejected by the validator outside parameter lists.
            Expr::Pass(e) => {
                self.print_token(e.at);
                self.print_optional_token(e.handler);
            }
            Expr::Yada(e) => {
                self.print_token(e.name);
                self.print_token(e.dots);
            }
        }
    }

    fn print_object(&mut self, node: &ObjectExpr<'_>) {
        self.print_token(node.open);
        let last = node.properties.len().saturating_sub(1);
        for (i, property) in node.properties.iter().enumerate() {
            self.print_token(property.key);
            self.print_token(property.colon);
            self.print_expression(&property.value);
            if let Some(comma) = node.commas.get(i) {
                if i == last {
                    self.write(comma.trailing);
                } else {
                    self.print_token(*comma);
                }
            }
        }
        self.print_token(node.close);
    }
}
