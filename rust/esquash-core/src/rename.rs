//! Renamer (§4.8): `generate_names` plus the `RenameTransformer` tree walk.

use std::collections::HashSet;

use crate::ast::{
    CaseClause, Expr, ExprKind, ForInTarget, ForInit, FunctionNode, Program, Stmt, StmtKind,
};
use crate::name_gen::NameGenerator;
use crate::scope::{ScopeArena, ScopeId};

/// Runs the renamer over `program` in place. A no-op if `enabled` is false
/// (the `--rename-locals` flag is off).
pub fn rename(program: &mut Program, arena: &mut ScopeArena, enabled: bool) {
    if !enabled {
        return;
    }
    let mut transformer = Renamer { arena };
    let scope = program.scope.expect("program missing scope");
    transformer.generate_names(scope);
    for stmt in &mut program.statements {
        transformer.visit_stmt(stmt, scope);
    }
}

/// Chains from `scope` up toward the program scope looking for the scope
/// that declares `name`, returning its chosen replacement (or the original
/// text, if that scope is protected or the name isn't declared anywhere).
fn get_name(arena: &ScopeArena, mut scope: ScopeId, name: &str) -> String {
    loop {
        let s = arena.get(scope);
        if s.declarations.contains_key(name) {
            return s
                .original_to_new
                .get(name)
                .cloned()
                .unwrap_or_else(|| name.to_string());
        }
        match s.parent {
            Some(parent) => scope = parent,
            None => return name.to_string(),
        }
    }
}

struct Renamer<'a> {
    arena: &'a mut ScopeArena,
}

impl<'a> Renamer<'a> {
    /// §4.8's `generate_names()`: no-op on a protected scope, otherwise
    /// assigns every locally declared name a short replacement, most-
    /// referenced first, avoiding the resolved name of every reference this
    /// scope sees (its own, not-yet-renamed declarations included).
    fn generate_names(&mut self, scope: ScopeId) {
        let eval_local = self.arena.eval_is_local(Some(scope));
        if self.arena.get(scope).is_protected(eval_local) {
            return;
        }

        let mut disallowed: HashSet<String> = HashSet::new();
        let refs: Vec<(String, ScopeId)> = self
            .arena
            .get(scope)
            .references
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        for (name, resolved) in refs {
            disallowed.insert(get_name(self.arena, resolved, &name));
        }

        let mut declared: Vec<(usize, String, u32)> = self
            .arena
            .get(scope)
            .declarations
            .iter()
            .enumerate()
            .map(|(i, (name, _))| {
                let count = self
                    .arena
                    .get(scope)
                    .reference_counts
                    .get(name)
                    .copied()
                    .unwrap_or(0);
                (i, name.to_string(), count)
            })
            .collect();
        // Descending reference count, ties broken by insertion order.
        declared.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));

        let mut gen = NameGenerator::new();
        for (_, name, _) in declared {
            let new_name = loop {
                let candidate = gen.next_name();
                if !disallowed.contains(&candidate) {
                    break candidate;
                }
            };
            let s = self.arena.get_mut(scope);
            s.original_to_new.insert(name.clone(), new_name.clone());
            s.new_to_original.insert(new_name.clone(), name);
            disallowed.insert(new_name);
        }
    }

    fn enter_function(&mut self, fn_node: &mut FunctionNode, own: ScopeId) {
        self.generate_names(own);
        if let Some(name) = &mut fn_node.name {
            *name = get_name(self.arena, own, name);
        }
        for param in &mut fn_node.params {
            *param = get_name(self.arena, own, param);
        }
        for stmt in &mut fn_node.body {
            self.visit_stmt(stmt, own);
        }
    }

    fn visit_stmt(&mut self, stmt: &mut Stmt, cur: ScopeId) {
        match &mut stmt.kind {
            StmtKind::Block(stmts) => {
                for s in stmts {
                    self.visit_stmt(s, cur);
                }
            }
            StmtKind::VariableStatement(decls) => {
                for decl in decls {
                    decl.name = get_name(self.arena, cur, &decl.name);
                    if let Some(init) = &mut decl.init {
                        self.visit_expr(init, cur);
                    }
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
                        for decl in decls {
                            decl.name = get_name(self.arena, cur, &decl.name);
                            if let Some(init) = &mut decl.init {
                                self.visit_expr(init, cur);
                            }
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
                        decl.name = get_name(self.arena, cur, &decl.name);
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
                // `catch (e)` does not get its own scope in this model (the
                // taxonomy has no CatchScope), so `catch_var` is left as-is.
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
                if let Some(name) = &mut fn_node.name {
                    *name = get_name(self.arena, cur, name);
                }
                let own = fn_node.scope.expect("function missing scope");
                self.enter_function(fn_node, own);
            }
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
                *name = get_name(self.arena, cur, name);
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
            | ExprKind::VoidOperation(inner) => self.visit_expr(inner, cur),
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
                let own = fn_node.scope.expect("function expression missing scope");
                self.enter_function(fn_node, own);
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
