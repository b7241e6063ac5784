//! Scope builder (§4.5), fused with `with`/`eval` tracking (§4.6).
//!
//! A single tree walk that creates one [`Scope`] per function (plus the
//! program scope), attaches declarations to the scope that owns them per
//! JavaScript's function-level `var`/function-declaration hoisting, and
//! marks scopes `uses_with`/`uses_eval` as it goes.

use crate::ast::{
    CaseClause, Expr, ExprKind, ForInTarget, ForInit, FunctionNode, Program, Stmt, StmtKind,
    VariableDeclarator,
};
use crate::scope::{Scope, ScopeArena, ScopeId};

pub fn build_scopes(program: &mut Program) -> ScopeArena {
    let mut builder = ScopeBuilder {
        arena: ScopeArena::new(),
    };
    let program_scope = builder.arena.create(None, true);
    for stmt in &mut program.statements {
        builder.visit_stmt(stmt, program_scope);
    }
    program.scope = Some(program_scope);
    builder.arena
}

struct ScopeBuilder {
    arena: ScopeArena,
}

impl ScopeBuilder {
    fn declare(&mut self, scope: ScopeId, name: &str, node_id: crate::ast::NodeId, kind: DeclKind) {
        let s: &mut Scope = self.arena.get_mut(scope);
        s.declarations.insert(name.to_string(), node_id);
        match kind {
            DeclKind::Function => s.functions.insert(name.to_string(), node_id),
            DeclKind::Parameter => s.parameters.insert(name.to_string(), node_id),
            DeclKind::Variable => s.variables.insert(name.to_string(), node_id),
        }
    }

    /// Declares a `FunctionDeclaration`/named `FunctionExpression`'s own
    /// child scope, its parameters, and recurses into its body. Returns
    /// nothing; `fn_node.scope` is set directly.
    fn enter_function(&mut self, fn_node: &mut FunctionNode, parent: ScopeId) {
        let own_scope = self.arena.create(Some(parent), false);
        for param in &fn_node.params {
            self.declare(own_scope, param, fn_node.id, DeclKind::Parameter);
        }
        for stmt in &mut fn_node.body {
            self.visit_stmt(stmt, own_scope);
        }
        fn_node.scope = Some(own_scope);
    }

    fn visit_stmt(&mut self, stmt: &mut Stmt, cur: ScopeId) {
        match &mut stmt.kind {
            StmtKind::Block(stmts) => {
                for s in stmts {
                    self.visit_stmt(s, cur);
                }
            }
            StmtKind::VariableStatement(decls) => {
                for decl in decls.iter() {
                    self.declare(cur, &decl.name, stmt.id, DeclKind::Variable);
                }
                for decl in decls {
                    self.visit_var_init(decl, cur);
                }
            }
            StmtKind::EmptyStatement => {}
            StmtKind::ExpressionStatement(expr) => self.visit_expr(expr, cur),
            StmtKind::IfStatement {
                cond,
                then_stmt,
                else_stmt,
            } => {
                self.visit_expr(cond, cur);
                self.visit_stmt(then_stmt, cur);
                if let Some(e) = else_stmt {
                    self.visit_stmt(e, cur);
                }
            }
            StmtKind::DoWhileStatement { body, cond } => {
                self.visit_stmt(body, cur);
                self.visit_expr(cond, cur);
            }
            StmtKind::WhileStatement { cond, body } => {
                self.visit_expr(cond, cur);
                self.visit_stmt(body, cur);
            }
            StmtKind::ForStatement {
                init,
                cond,
                next,
                body,
            } => {
                match init {
                    Some(ForInit::VarDecl(decls)) => {
                        for decl in decls.iter() {
                            self.declare(cur, &decl.name, stmt.id, DeclKind::Variable);
                        }
                        for decl in decls {
                            self.visit_var_init(decl, cur);
                        }
                    }
                    Some(ForInit::Expr(e)) => self.visit_expr(e, cur),
                    None => {}
                }
                if let Some(c) = cond {
                    self.visit_expr(c, cur);
                }
                if let Some(n) = next {
                    self.visit_expr(n, cur);
                }
                self.visit_stmt(body, cur);
            }
            StmtKind::ForInStatement {
                each,
                enumerable,
                body,
            } => {
                match each {
                    ForInTarget::VarDecl(decl) => {
                        self.declare(cur, &decl.name, stmt.id, DeclKind::Variable);
                        self.visit_var_init(decl, cur);
                    }
                    ForInTarget::Expr(e) => self.visit_expr(e, cur),
                }
                self.visit_expr(enumerable, cur);
                self.visit_stmt(body, cur);
            }
            StmtKind::ContinueStatement(_) | StmtKind::BreakStatement(_) => {}
            StmtKind::ReturnStatement(expr) => {
                if let Some(e) = expr {
                    self.visit_expr(e, cur);
                }
            }
            StmtKind::WithStatement { expr, stmt: body } => {
                self.arena.mark_uses_with(Some(cur));
                self.visit_expr(expr, cur);
                self.visit_stmt(body, cur);
            }
            StmtKind::SwitchStatement { expr, cases } => {
                self.visit_expr(expr, cur);
                for case in cases {
                    self.visit_case(case, cur);
                }
            }
            StmtKind::LabelledStatement { stmt: inner, .. } => self.visit_stmt(inner, cur),
            StmtKind::Throw(expr) => self.visit_expr(expr, cur),
            StmtKind::TryStatement {
                try_block,
                catch_block,
                finally_block,
                ..
            } => {
                for s in try_block {
                    self.visit_stmt(s, cur);
                }
                if let Some(block) = catch_block {
                    for s in block {
                        self.visit_stmt(s, cur);
                    }
                }
                if let Some(block) = finally_block {
                    for s in block {
                        self.visit_stmt(s, cur);
                    }
                }
            }
            StmtKind::FunctionDeclaration(fn_node) => {
                self.declare(cur, fn_node.name.clone().unwrap_or_default().as_str(), fn_node.id, DeclKind::Function);
                self.enter_function(fn_node, cur);
            }
        }
    }

    fn visit_var_init(&mut self, decl: &mut VariableDeclarator, cur: ScopeId) {
        if let Some(init) = &mut decl.init {
            self.visit_expr(init, cur);
        }
    }

    fn visit_case(&mut self, case: &mut CaseClause, cur: ScopeId) {
        if let Some(label) = &mut case.label {
            self.visit_expr(label, cur);
        }
        for s in &mut case.statements {
            self.visit_stmt(s, cur);
        }
    }

    fn visit_expr(&mut self, expr: &mut Expr, cur: ScopeId) {
        match &mut expr.kind {
            ExprKind::Name(name) => {
                if name == "eval" {
                    self.arena.mark_uses_eval(Some(cur));
                }
            }
            ExprKind::Assignment { target, value, .. } => {
                self.visit_expr(target, cur);
                self.visit_expr(value, cur);
            }
            ExprKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                self.visit_expr(cond, cur);
                self.visit_expr(then_expr, cur);
                self.visit_expr(else_expr, cur);
            }
            ExprKind::BinaryOperation { left, right, .. }
            | ExprKind::CompareOperation { left, right, .. } => {
                self.visit_expr(left, cur);
                self.visit_expr(right, cur);
            }
            ExprKind::UnaryOperation { expr: inner, .. }
            | ExprKind::PrefixCountOperation { expr: inner, .. }
            | ExprKind::PostfixCountOperation { expr: inner, .. }
            | ExprKind::TypeofOperation(inner)
            | ExprKind::DeleteOperation(inner)
            | ExprKind::VoidOperation(inner) => {
                self.visit_expr(inner, cur);
            }
            ExprKind::CallExpression { expr: callee, args } => {
                self.visit_expr(callee, cur);
                for a in args {
                    self.visit_expr(a, cur);
                }
            }
            ExprKind::NewExpression { expr: callee, args } => {
                self.visit_expr(callee, cur);
                if let Some(args) = args {
                    for a in args {
                        self.visit_expr(a, cur);
                    }
                }
            }
            ExprKind::DotProperty { object, .. } => self.visit_expr(object, cur),
            ExprKind::BracketProperty { object, key } => {
                self.visit_expr(object, cur);
                self.visit_expr(key, cur);
            }
            ExprKind::ArrayLiteral(elements) => {
                for el in elements.iter_mut().flatten() {
                    self.visit_expr(el, cur);
                }
            }
            ExprKind::ObjectLiteral(props) => {
                for prop in props {
                    self.visit_expr(&mut prop.value, cur);
                }
            }
            ExprKind::FunctionExpression(fn_node) => {
                if let Some(name) = fn_node.name.clone() {
                    // A named function expression's name is visible only
                    // inside its own scope (§4.5), so we declare it there
                    // after creating the scope rather than in `cur`.
                    let own_scope = self.arena.create(Some(cur), false);
                    self.declare(own_scope, &name, fn_node.id, DeclKind::Function);
                    for param in &fn_node.params {
                        self.declare(own_scope, param, fn_node.id, DeclKind::Parameter);
                    }
                    for stmt in &mut fn_node.body {
                        self.visit_stmt(stmt, own_scope);
                    }
                    fn_node.scope = Some(own_scope);
                } else {
                    self.enter_function(fn_node, cur);
                }
            }
            ExprKind::StringLiteral(_)
            | ExprKind::NumberLiteral(_)
            | ExprKind::RegExpLiteral { .. }
            | ExprKind::This
            | ExprKind::Null
            | ExprKind::True
            | ExprKind::False => {}
        }
    }
}

enum DeclKind {
    Function,
    Parameter,
    Variable,
}
