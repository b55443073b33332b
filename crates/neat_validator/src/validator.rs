//! The validator implementation.
//!
//! Each function or program scope is handled in up to three passes:
//! - pass 0 (program only): apply `#include` and `#declare` pragmas
//! - pass 1: hoist function declarations and `var` names into the scope
//! - pass 2: check every statement and expression
//!
//! The first violation aborts validation.

use crate::scope::Env;
use indexmap::IndexSet;
use neat_ast::declare_tags::declare_group;
use neat_ast::helpers::helper_name;
use neat_ast::node::*;
use neat_ast::types::Token;
use neat_diagnostics::{messages, Diagnostic, DiagnosticMessage};

/// Helpers named by `#include`, in first-inclusion order.
pub type RequiredHelpers = IndexSet<&'static str>;

type ValidateResult<T = ()> = Result<T, Diagnostic>;

/// Validate `program` and return the helpers it includes.
pub fn validate(program: &Program<'_>) -> ValidateResult<RequiredHelpers> {
    Validator::new(program).validate_program()
}

/// Where a statement sits relative to its scope.
#[derive(Debug, Clone, Copy)]
struct Context {
    /// Directly in the program body.
    top_level: bool,
    /// Directly in the program or a function body.
    function_ok: bool,
}

impl Context {
    const PROGRAM: Context = Context {
        top_level: true,
        function_ok: true,
    };
    const FUNCTION_BODY: Context = Context {
        top_level: false,
        function_ok: true,
    };
    const NESTED: Context = Context {
        top_level: false,
        function_ok: false,
    };
}

/// Checks declarations and references of one program.
pub struct Validator<'p, 'a> {
    program: &'p Program<'a>,
    helpers: RequiredHelpers,
}

impl<'p, 'a> Validator<'p, 'a> {
    pub fn new(program: &'p Program<'a>) -> Self {
        Self {
            program,
            helpers: RequiredHelpers::default(),
        }
    }

    pub fn validate_program(mut self) -> ValidateResult<RequiredHelpers> {
        let statements = self.program.statements;
        let mut env = Env::new();
        self.apply_pragmas(&mut env, statements)?;
        self.hoist(&mut env, statements, true)?;
        for stmt in statements {
            self.check_statement(&mut env, stmt, Context::PROGRAM)?;
        }
        Ok(self.helpers)
    }

    fn error(&self, token: Token<'a>, message: &DiagnosticMessage, args: &[&str]) -> Diagnostic {
        Diagnostic::with_location(
            self.program.file_name,
            self.program.text,
            token.span(),
            message,
            args,
        )
    }

    fn declare(&self, env: &mut Env<'a>, name: Token<'a>) -> ValidateResult {
        if env.declare(name.text) {
            Ok(())
        } else {
            Err(self.error(
                name,
                &messages::_0_IS_ALREADY_DECLARED_IN_THIS_SCOPE,
                &[name.text],
            ))
        }
    }

    fn require_declared(&self, env: &Env<'a>, name: Token<'a>) -> ValidateResult {
        if env.contains(name.text) {
            Ok(())
        } else {
            Err(self.error(name, &messages::_0_HAS_NOT_BEEN_DECLARED, &[name.text]))
        }
    }

    // ========================================================================
    // Pass 0: pragmas
    // ========================================================================

    fn apply_pragmas(&mut self, env: &mut Env<'a>, statements: &[Stmt<'a>]) -> ValidateResult {
        for stmt in statements {
            match stmt {
                Stmt::Include(pragma) => {
                    for item in pragma.items {
                        let name = match *item {
                            PragmaItem::Name(name) => name,
                            PragmaItem::Tag { colon, .. } => {
                                return Err(self.error(colon, &messages::UNEXPECTED_0, &[":"]))
                            }
                        };
                        let Some(helper) = helper_name(name.text) else {
                            return Err(self.error(
                                name,
                                &messages::_0_IS_NOT_A_KNOWN_HELPER,
                                &[name.text],
                            ));
                        };
                        env.mark_declared(name.text);
                        self.helpers.insert(helper);
                    }
                }
                Stmt::Declare(pragma) => {
                    for item in pragma.items {
                        match *item {
                            PragmaItem::Name(name) => env.mark_declared(name.text),
                            PragmaItem::Tag { colon, name } => {
                                let Some(group) = declare_group(name.text) else {
                                    return Err(self.error(
                                        colon,
                                        &messages::INVALID_DECLARATION_GROUP_0,
                                        &[name.text],
                                    ));
                                };
                                for global in group {
                                    env.mark_declared(global);
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    // ========================================================================
    // Pass 1: hoisting
    // ========================================================================

    /// Register the names `statements` declare in the current scope.
    /// Function declarations count only when `direct`; `var` names are
    /// collected through every non-function block.
    fn hoist(&self, env: &mut Env<'a>, statements: &[Stmt<'a>], direct: bool) -> ValidateResult {
        for stmt in statements {
            self.hoist_statement(env, stmt, direct)?;
        }
        Ok(())
    }

    fn hoist_statement(&self, env: &mut Env<'a>, stmt: &Stmt<'a>, direct: bool) -> ValidateResult {
        match stmt {
            Stmt::Function(function) if direct => {
                if let Some(name) = function.name {
                    self.declare(env, name)?;
                }
            }
            Stmt::Var(var) => self.hoist_var_list(env, &var.list)?,
            Stmt::If(stmt) => self.hoist_if(env, stmt)?,
            Stmt::While(stmt) => self.hoist(env, stmt.body.statements, false)?,
            Stmt::For(stmt) => {
                if let ForInit::Var(list) = &stmt.init {
                    self.hoist_var_list(env, list)?;
                }
                self.hoist(env, stmt.body.statements, false)?;
            }
            Stmt::ForIn(stmt) => {
                if stmt.var_keyword.is_some() {
                    self.declare(env, stmt.name)?;
                }
                self.hoist(env, stmt.body.statements, false)?;
            }
            Stmt::Labeled(stmt) => self.hoist_statement(env, stmt.body, false)?,
            Stmt::Switch(stmt) => {
                for clause in stmt.clauses {
                    self.hoist(env, clause.statements, false)?;
                }
            }
            Stmt::Block(block) => self.hoist(env, block.statements, false)?,
            _ => {}
        }
        Ok(())
    }

    fn hoist_if(&self, env: &mut Env<'a>, stmt: &IfStmt<'a>) -> ValidateResult {
        let mut stmt = stmt;
        loop {
            self.hoist(env, stmt.then_block.statements, false)?;
            match stmt.else_clause.map(|clause| clause.body) {
                Some(ElseBody::If(inner)) => stmt = inner,
                Some(ElseBody::Block(block)) => return self.hoist(env, block.statements, false),
                None => return Ok(()),
            }
        }
    }

    fn hoist_var_list(&self, env: &mut Env<'a>, list: &VarList<'a>) -> ValidateResult {
        for decl in list.decls {
            self.declare(env, decl.name)?;
        }
        Ok(())
    }

    // ========================================================================
    // Pass 2: statements
    // ========================================================================

    fn check_statements(&mut self, env: &mut Env<'a>, statements: &[Stmt<'a>]) -> ValidateResult {
        for stmt in statements {
            self.check_statement(env, stmt, Context::NESTED)?;
        }
        Ok(())
    }

    fn check_statement(&mut self, env: &mut Env<'a>, stmt: &Stmt<'a>, ctx: Context) -> ValidateResult {
        match stmt {
            Stmt::Expr(stmt) => self.check_expression(env, &stmt.expr),
            Stmt::Empty(_) | Stmt::Break(_) | Stmt::Continue(_) => Ok(()),
            Stmt::If(stmt) => self.check_if(env, stmt),
            Stmt::While(stmt) => {
                self.check_expression(env, &stmt.test)?;
                self.check_statements(env, stmt.body.statements)
            }
            Stmt::For(stmt) => {
                match &stmt.init {
                    ForInit::Var(list) => self.check_var_list(env, list)?,
                    ForInit::Exprs(exprs) => self.check_expressions(env, exprs)?,
                }
                self.check_expressions(env, &stmt.test)?;
                self.check_expressions(env, &stmt.update)?;
                self.check_statements(env, stmt.body.statements)
            }
            Stmt::ForIn(stmt) => {
                if stmt.var_keyword.is_none() {
                    self.require_declared(env, stmt.name)?;
                }
                self.check_expression(env, &stmt.object)?;
                self.check_statements(env, stmt.body.statements)
            }
            Stmt::Return(stmt) => match &stmt.value {
                Some(value) => self.check_expression(env, value),
                None => Ok(()),
            },
            Stmt::Throw(stmt) => self.check_expression(env, &stmt.value),
            Stmt::Var(stmt) => self.check_var_list(env, &stmt.list),
            Stmt::Function(function) => {
                if !ctx.function_ok {
                    return Err(self.error(
                        function.first_token(),
                        &messages::FUNCTIONS_MAY_ONLY_BE_DECLARED_IN_THE_TOP_LEVEL,
                        &[],
                    ));
                }
                self.check_function(env, function, None)
            }
            Stmt::Labeled(stmt) => self.check_statement(env, stmt.body, Context::NESTED),
            Stmt::Switch(stmt) => {
                self.check_expression(env, &stmt.discriminant)?;
                for clause in stmt.clauses {
                    if let Some(test) = &clause.test {
                        self.check_expression(env, test)?;
                    }
                    self.check_statements(env, clause.statements)?;
                }
                Ok(())
            }
            Stmt::Block(block) => self.check_statements(env, block.statements),
            Stmt::Include(pragma) if !ctx.top_level => Err(self.error(
                pragma.keyword,
                &messages::INCLUDE_IS_ONLY_ALLOWED_AT_THE_TOP_LEVEL,
                &[],
            )),
            Stmt::Declare(pragma) if !ctx.top_level => Err(self.error(
                pragma.keyword,
                &messages::DECLARE_IS_ONLY_ALLOWED_AT_THE_TOP_LEVEL,
                &[],
            )),
            Stmt::Include(_) | Stmt::Declare(_) => Ok(()),
        }
    }

    fn check_if(&mut self, env: &mut Env<'a>, stmt: &IfStmt<'a>) -> ValidateResult {
        let mut stmt = stmt;
        loop {
            self.check_expression(env, &stmt.test)?;
            self.check_statements(env, stmt.then_block.statements)?;
            match stmt.else_clause.map(|clause| clause.body) {
                Some(ElseBody::If(inner)) => stmt = inner,
                Some(ElseBody::Block(block)) => return self.check_statements(env, block.statements),
                None => return Ok(()),
            }
        }
    }

    /// Names were hoisted in pass 1; only initializers remain.
    fn check_var_list(&mut self, env: &mut Env<'a>, list: &VarList<'a>) -> ValidateResult {
        for decl in list.decls {
            if let Some(init) = &decl.init {
                self.check_expression(env, &init.value)?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Functions
    // ========================================================================

    /// Check a function body in a fork of `env`. `self_name` is the name of
    /// a named function expression, visible inside its own body.
    fn check_function(
        &mut self,
        env: &Env<'a>,
        function: &FunctionNode<'a>,
        self_name: Option<Token<'a>>,
    ) -> ValidateResult {
        let mut inner = env.fork();
        if let Some(name) = self_name {
            inner.inherit(name.text);
        }
        self.declare_params(env, &mut inner, &function.params)?;
        if let Some(binding) = function.this_binding {
            self.declare(&mut inner, binding.name)?;
        }

        let statements = function.body.statements;
        self.hoist(&mut inner, statements, true)?;
        for stmt in statements {
            self.check_statement(&mut inner, stmt, Context::FUNCTION_BODY)?;
        }
        Ok(())
    }

    /// Bind parameters in `inner`. Pass handlers resolve against `outer`.
    fn declare_params(
        &self,
        outer: &Env<'a>,
        inner: &mut Env<'a>,
        params: &ParamList<'a>,
    ) -> ValidateResult {
        let last = params.params.len().saturating_sub(1);
        for (index, param) in params.params.iter().enumerate() {
            match *param {
                Param::Ident(name) => self.declare(inner, name)?,
                Param::Pass(pass) => {
                    if index != 0 {
                        return Err(self.error(
                            pass.at,
                            &messages::PASS_IS_ONLY_ALLOWED_ON_THE_FIRST_PARAMETER,
                            &[],
                        ));
                    }
                    if let Some(handler) = pass.handler {
                        if !outer.contains(handler.text) {
                            return Err(self.error(
                                pass.at,
                                &messages::_0_HAS_NOT_BEEN_DECLARED,
                                &[handler.text],
                            ));
                        }
                        // Claim the handler so a local declaration cannot hide it.
                        inner.mark_declared(handler.text);
                    }
                }
                Param::Rest(rest) => {
                    if index != last {
                        return Err(self.error(
                            rest.name,
                            &messages::REST_IS_ONLY_ALLOWED_ON_THE_LAST_PARAMETER,
                            &[],
                        ));
                    }
                    self.declare(inner, rest.name)?;
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn check_expressions(&mut self, env: &mut Env<'a>, list: &ExprList<'a>) -> ValidateResult {
        for expr in list.elements {
            self.check_expression(env, expr)?;
        }
        Ok(())
    }

    /// Check `expr`, walking its chain of leading operands with a loop so
    /// long operator and call chains do not recurse.
    fn check_expression(&mut self, env: &mut Env<'a>, expr: &Expr<'a>) -> ValidateResult {
        let mut chain = Vec::new();
        let mut innermost = expr;
        while let Some(operand) = innermost.leading_operand() {
            chain.push(innermost);
            innermost = operand;
        }
        self.check_node(env, innermost)?;
        for link in chain.iter().rev() {
            self.check_node(env, link)?;
        }
        Ok(())
    }

    /// Check everything in `expr` except its leading operand.
    fn check_node(&mut self, env: &mut Env<'a>, expr: &Expr<'a>) -> ValidateResult {
        match expr {
            Expr::Number(_) | Expr::String(_) | Expr::Null(_) | Expr::Bool(_) => Ok(()),
            Expr::Ident(name) => self.require_declared(env, *name),
            Expr::Unary(e) => self.check_expression(env, e.operand),
            Expr::Binary(e) => self.check_expression(env, e.right),
            Expr::Ternary(e) => {
                self.check_expression(env, e.when_true)?;
                self.check_expression(env, e.when_false)
            }
            Expr::Call(e) => self.check_expressions(env, &e.arguments),
            Expr::Invoke(e) => self.check_expressions(env, &e.arguments),
            Expr::Index(e) => self.check_expression(env, e.index),
            Expr::Property(_) | Expr::PrototypeProperty(_) => Ok(()),
            Expr::New(e) => {
                self.check_expression(env, e.callee)?;
                self.check_expressions(env, &e.arguments)
            }
            Expr::Array(e) => self.check_expressions(env, &e.elements),
            Expr::Object(e) => {
                for property in e.properties {
                    self.check_expression(env, &property.value)?;
                }
                Ok(())
            }
            Expr::Group(e) => self.check_expression(env, e.expr),
            Expr::Function(function) => self.check_function(env, function, function.name),
            Expr::Arrow(e) => {
                let mut inner = env.fork();
                for param in e.params.params {
                    match *param {
                        Param::Ident(name) => self.declare(&mut inner, name)?,
                        _ => {
                            return Err(self.error(
                                param.first_token(),
                                &messages::ARROW_FUNCTIONS_CANNOT_HAVE_PASS_OR_REST_PARAMETERS,
                                &[],
                            ))
                        }
                    }
                }
                self.check_expression(&mut inner, e.body)
            }
            Expr::SimpleArrow(e) => {
                let mut inner = env.fork();
                inner.mark_declared("_");
                self.check_expression(&mut inner, e.body)
            }
            Expr::Pass(e) => Err(self.error(e.at, &messages::INVALID_EXPRESSION_BEGINNING_WITH_AT, &[])),
            Expr::Yada(e) => Err(self.error(
                e.name,
                &messages::INVALID_EXPRESSION_ENDING_WITH_ELLIPSIS,
                &[],
            )),
        }
    }
}
