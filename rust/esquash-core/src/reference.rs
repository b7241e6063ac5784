//! Reference collector (§4.7).
//!
//! Runs after [`crate::scope_builder`] has attached a [`ScopeId`] to every
//! scoped node. Walks the tree again, and for every `Name` expression
//! records which scope it resolves to, climbing from the name's own scope
//! toward the program scope, recording the resolution at every scope it
//! passes through along the way (not just the one that finally declares
//! it) so an outer scope's rename pass knows about names a nested function
//! still needs to reach (§4.8's `disallowed` set).

use crate::ast::{
    CaseClause, Expr, ExprKind, ForInTarget, ForInit, FunctionNode, Program, Stmt, StmtKind,
};
use crate::scope::{ScopeArena, ScopeId};

pub fn collect_references(program: &Program, arena: &mut ScopeArena) {
    let program_scope = program.scope.expect("program missing scope; scope builder must run first");
    for stmt in &program.statements {
        visit_stmt(stmt, program_scope, arena);
    }
}

/// Climbs from `scope` toward the program scope, returning the first scope
/// that declares `name`, or the program scope if none does (a free/global
/// name).
fn resolve_name(arena: &ScopeArena, mut scope: ScopeId, name: &str) -> ScopeId {
    loop {
        let s = arena.get(scope);
        if s.declarations.contains_key(name) {
            return scope;
        }
        match s.parent {
            Some(parent) => scope = parent,
            None => return scope,
        }
    }
}

fn declare_reference(arena: &mut ScopeArena, mut scope: ScopeId, name: &str) {
    let resolved = resolve_name(arena, scope, name);
    loop {
        arena.get_mut(scope).references.insert(name.to_string(), resolved);
        if arena.get(scope).declarations.contains_key(name) {
            let count = arena.get(scope).reference_counts.get(name).copied().unwrap_or(0);
            arena.get_mut(scope).reference_counts.insert(name.to_string(), count + 1);
            break;
        }
        match arena.get(scope).parent {
            Some(parent) => scope = parent,
            None => break,
        }
    }
}

fn visit_function(fn_node: &FunctionNode, arena: &mut ScopeArena) {
    let own_scope = fn_node.scope.expect("function missing scope; scope builder must run first");
    for stmt in &fn_node.body {
        visit_stmt(stmt, own_scope, arena);
    }
}

fn visit_stmt(stmt: &Stmt, cur: ScopeId, arena: &mut ScopeArena) {
    match &stmt.kind {
        StmtKind::Block(stmts) => {
            for s in stmts {
                visit_stmt(s, cur, arena);
            }
        }
        StmtKind::VariableStatement(decls) => {
            for decl in decls {
                if let Some(init) = &decl.init {
                    visit_expr(init, cur, arena);
                }
            }
        }
        StmtKind::EmptyStatement => {}
        StmtKind::ExpressionStatement(expr) => visit_expr(expr, cur, arena),
        StmtKind::IfStatement {
            cond,
            then_stmt,
            else_stmt,
        } => {
            visit_expr(cond, cur, arena);
            visit_stmt(then_stmt, cur, arena);
            if let Some(e) = else_stmt {
                visit_stmt(e, cur, arena);
            }
        }
        StmtKind::DoWhileStatement { body, cond } => {
            visit_stmt(body, cur, arena);
            visit_expr(cond, cur, arena);
        }
        StmtKind::WhileStatement { cond, body } => {
            visit_expr(cond, cur, arena);
            visit_stmt(body, cur, arena);
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
                        if let Some(init) = &decl.init {
                            visit_expr(init, cur, arena);
                        }
                    }
                }
                Some(ForInit::Expr(e)) => visit_expr(e, cur, arena),
                None => {}
            }
            if let Some(c) = cond {
                visit_expr(c, cur, arena);
            }
            if let Some(n) = next {
                visit_expr(n, cur, arena);
            }
            visit_stmt(body, cur, arena);
        }
        StmtKind::ForInStatement {
            each,
            enumerable,
            body,
        } => {
            if let ForInTarget::Expr(e) = each {
                visit_expr(e, cur, arena);
            }
            visit_expr(enumerable, cur, arena);
            visit_stmt(body, cur, arena);
        }
        StmtKind::ContinueStatement(_) | StmtKind::BreakStatement(_) => {}
        StmtKind::ReturnStatement(expr) => {
            if let Some(e) = expr {
                visit_expr(e, cur, arena);
            }
        }
        StmtKind::WithStatement { expr, stmt: body } => {
            visit_expr(expr, cur, arena);
            visit_stmt(body, cur, arena);
        }
        StmtKind::SwitchStatement { expr, cases } => {
            visit_expr(expr, cur, arena);
            for case in cases {
                visit_case(case, cur, arena);
            }
        }
        StmtKind::LabelledStatement { stmt: inner, .. } => visit_stmt(inner, cur, arena),
        StmtKind::Throw(expr) => visit_expr(expr, cur, arena),
        StmtKind::TryStatement {
            try_block,
            catch_block,
            finally_block,
            ..
        } => {
            for s in try_block {
                visit_stmt(s, cur, arena);
            }
            if let Some(block) = catch_block {
                for s in block {
                    visit_stmt(s, cur, arena);
                }
            }
            if let Some(block) = finally_block {
                for s in block {
                    visit_stmt(s, cur, arena);
                }
            }
        }
        StmtKind::FunctionDeclaration(fn_node) => visit_function(fn_node, arena),
    }
}

fn visit_case(case: &CaseClause, cur: ScopeId, arena: &mut ScopeArena) {
    if let Some(label) = &case.label {
        visit_expr(label, cur, arena);
    }
    for s in &case.statements {
        visit_stmt(s, cur, arena);
    }
}

fn visit_expr(expr: &Expr, cur: ScopeId, arena: &mut ScopeArena) {
    match &expr.kind {
        ExprKind::Name(name) => declare_reference(arena, cur, name),
        ExprKind::Assignment { target, value, .. } => {
            visit_expr(target, cur, arena);
            visit_expr(value, cur, arena);
        }
        ExprKind::Conditional {
            cond,
            then_expr,
            else_expr,
        } => {
            visit_expr(cond, cur, arena);
            visit_expr(then_expr, cur, arena);
            visit_expr(else_expr, cur, arena);
        }
        ExprKind::BinaryOperation { left, right, .. }
        | ExprKind::CompareOperation { left, right, .. } => {
            visit_expr(left, cur, arena);
            visit_expr(right, cur, arena);
        }
        ExprKind::UnaryOperation { expr: inner, .. }
        | ExprKind::PrefixCountOperation { expr: inner, .. }
        | ExprKind::PostfixCountOperation { expr: inner, .. }
        | ExprKind::TypeofOperation(inner)
        | ExprKind::DeleteOperation(inner)
        | ExprKind::VoidOperation(inner) => visit_expr(inner, cur, arena),
        ExprKind::CallExpression { expr: callee, args } => {
            visit_expr(callee, cur, arena);
            for a in args {
                visit_expr(a, cur, arena);
            }
        }
        ExprKind::NewExpression { expr: callee, args } => {
            visit_expr(callee, cur, arena);
            if let Some(args) = args {
                for a in args {
                    visit_expr(a, cur, arena);
                }
            }
        }
        ExprKind::DotProperty { object, .. } => visit_expr(object, cur, arena),
        ExprKind::BracketProperty { object, key } => {
            visit_expr(object, cur, arena);
            visit_expr(key, cur, arena);
        }
        ExprKind::ArrayLiteral(elements) => {
            for el in elements.iter().flatten() {
                visit_expr(el, cur, arena);
            }
        }
        ExprKind::ObjectLiteral(props) => {
            for prop in props {
                visit_expr(&prop.value, cur, arena);
            }
        }
        ExprKind::FunctionExpression(fn_node) => visit_function(fn_node, arena),
        ExprKind::StringLiteral(_)
        | ExprKind::NumberLiteral(_)
        | ExprKind::RegExpLiteral { .. }
        | ExprKind::This
        | ExprKind::Null
        | ExprKind::True
        | ExprKind::False => {}
    }
}
