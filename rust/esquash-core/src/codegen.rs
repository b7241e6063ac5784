//! Code generator (§4.4): walks the renamed AST and emits tokens through a
//! [`crate::sink::TokenSink`].

use std::collections::HashSet;
use std::io::Write;

use crate::ast::{
    AssignOp, BinaryOp, CaseClause, CompareOp, CountOp, Expr, ExprKind, ForInTarget, ForInit,
    FunctionNode, NodeId, Program, PropertyKey, Stmt, StmtKind, UnaryOp, VariableDeclarator,
};
use crate::error::CompileError;
use crate::precedence::{needs_parens, precedence};
use crate::sink::TokenSink;
use crate::token::{Token, TokenKind};

pub fn generate<W: Write>(program: &Program, out: W) -> Result<(), CompileError> {
    let mut gen = CodeGenerator {
        sink: TokenSink::new(out),
        marked_for_parens: HashSet::new(),
    };
    gen.mark_expression_statements(&program.statements);
    for (i, stmt) in program.statements.iter().enumerate() {
        gen.visit_stmt(stmt)?;
        if needs_semicolon(stmt) && i + 1 < program.statements.len() {
            gen.punct(TokenKind::Semicolon, ";")?;
        }
    }
    Ok(())
}

/// §4.4's semicolon rule: does `stmt` need a trailing `;` when followed by
/// another statement?
fn needs_semicolon(stmt: &Stmt) -> bool {
    match &stmt.kind {
        StmtKind::DoWhileStatement { .. }
        | StmtKind::ExpressionStatement(_)
        | StmtKind::ContinueStatement(_)
        | StmtKind::BreakStatement(_)
        | StmtKind::ReturnStatement(_)
        | StmtKind::VariableStatement(_) => true,
        StmtKind::WhileStatement { body, .. }
        | StmtKind::WithStatement { stmt: body, .. }
        | StmtKind::ForStatement { body, .. }
        | StmtKind::ForInStatement { body, .. } => needs_semicolon(body),
        StmtKind::IfStatement {
            then_stmt,
            else_stmt,
            ..
        } => match else_stmt {
            Some(e) => needs_semicolon(e),
            None => needs_semicolon(then_stmt),
        },
        _ => false,
    }
}

struct CodeGenerator<W: Write> {
    sink: TokenSink<W>,
    marked_for_parens: HashSet<NodeId>,
}

impl<W: Write> CodeGenerator<W> {
    fn punct(&mut self, kind: TokenKind, text: &'static str) -> Result<(), CompileError> {
        self.sink.report(Token::punct(kind, text))?;
        Ok(())
    }

    fn keyword(&mut self, kind: TokenKind, text: &'static str) -> Result<(), CompileError> {
        self.sink.report_keyword(Token::punct(kind, text))?;
        Ok(())
    }

    // ---- Expression-statement disambiguation (§4.4) ----

    fn mark_expression_statements(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.mark_stmt(stmt);
        }
    }

    fn mark_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::ExpressionStatement(expr) => self.mark_leftmost(expr),
            StmtKind::Block(stmts) => self.mark_expression_statements(stmts),
            StmtKind::IfStatement {
                then_stmt,
                else_stmt,
                ..
            } => {
                self.mark_stmt(then_stmt);
                if let Some(e) = else_stmt {
                    self.mark_stmt(e);
                }
            }
            StmtKind::DoWhileStatement { body, .. }
            | StmtKind::WhileStatement { body, .. }
            | StmtKind::WithStatement { stmt: body, .. }
            | StmtKind::ForStatement { body, .. }
            | StmtKind::ForInStatement { body, .. } => self.mark_stmt(body),
            StmtKind::SwitchStatement { cases, .. } => {
                for case in cases {
                    self.mark_expression_statements(&case.statements);
                }
            }
            StmtKind::LabelledStatement { stmt: inner, .. } => self.mark_stmt(inner),
            StmtKind::TryStatement {
                try_block,
                catch_block,
                finally_block,
                ..
            } => {
                self.mark_expression_statements(try_block);
                if let Some(b) = catch_block {
                    self.mark_expression_statements(b);
                }
                if let Some(b) = finally_block {
                    self.mark_expression_statements(b);
                }
            }
            StmtKind::FunctionDeclaration(f) => self.mark_expression_statements(&f.body),
            _ => {}
        }
    }

    /// Walks the leftmost descent of `expr`, stopping early if the normal
    /// parenthesization rule will already wrap the child. If the terminus
    /// is a `FunctionExpression` or `ObjectLiteral`, flags its id so its
    /// visitor wraps it in parens.
    fn mark_leftmost(&mut self, expr: &Expr) {
        let mut cur = expr;
        loop {
            let child = match &cur.kind {
                ExprKind::DotProperty { object, .. } | ExprKind::BracketProperty { object, .. } => {
                    object.as_ref()
                }
                ExprKind::PostfixCountOperation { expr: inner, .. }
                | ExprKind::CallExpression { expr: inner, .. } => inner.as_ref(),
                ExprKind::BinaryOperation { left, .. } | ExprKind::CompareOperation { left, .. } => {
                    left.as_ref()
                }
                ExprKind::Assignment { target, .. } => target.as_ref(),
                ExprKind::FunctionExpression(_) | ExprKind::ObjectLiteral(_) => {
                    self.marked_for_parens.insert(cur.id);
                    return;
                }
                _ => return,
            };
            if precedence(&cur.kind) > precedence(&child.kind) {
                return;
            }
            cur = child;
        }
    }

    // ---- Statements ----

    fn visit_stmt(&mut self, stmt: &Stmt) -> Result<(), CompileError> {
        match &stmt.kind {
            StmtKind::Block(stmts) => {
                self.punct(TokenKind::LBrace, "{")?;
                self.visit_stmt_list(stmts)?;
                self.punct(TokenKind::RBrace, "}")?;
            }
            StmtKind::VariableStatement(decls) => self.visit_variable_statement(decls)?,
            StmtKind::EmptyStatement => self.punct(TokenKind::Semicolon, ";")?,
            StmtKind::ExpressionStatement(expr) => self.visit_expr(expr, None)?,
            StmtKind::IfStatement {
                cond,
                then_stmt,
                else_stmt,
            } => {
                self.keyword(TokenKind::If, "if")?;
                self.punct(TokenKind::LParen, "(")?;
                self.visit_expr(cond, None)?;
                self.punct(TokenKind::RParen, ")")?;
                self.visit_stmt(then_stmt)?;
                if let Some(e) = else_stmt {
                    if needs_semicolon(then_stmt) {
                        self.punct(TokenKind::Semicolon, ";")?;
                    }
                    self.keyword(TokenKind::Else, "else")?;
                    self.visit_stmt(e)?;
                }
            }
            StmtKind::DoWhileStatement { body, cond } => {
                self.keyword(TokenKind::Do, "do")?;
                self.visit_stmt(body)?;
                if needs_semicolon(body) {
                    self.punct(TokenKind::Semicolon, ";")?;
                }
                self.keyword(TokenKind::While, "while")?;
                self.punct(TokenKind::LParen, "(")?;
                self.visit_expr(cond, None)?;
                self.punct(TokenKind::RParen, ")")?;
            }
            StmtKind::WhileStatement { cond, body } => {
                self.keyword(TokenKind::While, "while")?;
                self.punct(TokenKind::LParen, "(")?;
                self.visit_expr(cond, None)?;
                self.punct(TokenKind::RParen, ")")?;
                self.visit_stmt(body)?;
            }
            StmtKind::ForStatement {
                init,
                cond,
                next,
                body,
            } => {
                self.keyword(TokenKind::For, "for")?;
                self.punct(TokenKind::LParen, "(")?;
                match init {
                    Some(ForInit::VarDecl(decls)) => {
                        self.keyword(TokenKind::Var, "var")?;
                        self.visit_var_decl_list(decls)?;
                    }
                    Some(ForInit::Expr(e)) => {
                        // §4.4's for(...in...) disambiguation: an `in`
                        // CompareOperation in this position needs parens so
                        // it isn't parsed as a for-in loop.
                        let wrap = matches!(
                            &e.kind,
                            ExprKind::CompareOperation {
                                op: CompareOp::In,
                                ..
                            }
                        );
                        if wrap {
                            self.punct(TokenKind::LParen, "(")?;
                        }
                        self.visit_expr(e, None)?;
                        if wrap {
                            self.punct(TokenKind::RParen, ")")?;
                        }
                    }
                    None => {}
                }
                self.punct(TokenKind::Semicolon, ";")?;
                if let Some(c) = cond {
                    self.visit_expr(c, None)?;
                }
                self.punct(TokenKind::Semicolon, ";")?;
                if let Some(n) = next {
                    self.visit_expr(n, None)?;
                }
                self.punct(TokenKind::RParen, ")")?;
                self.visit_stmt(body)?;
            }
            StmtKind::ForInStatement {
                each,
                enumerable,
                body,
            } => {
                self.keyword(TokenKind::For, "for")?;
                self.punct(TokenKind::LParen, "(")?;
                match each {
                    ForInTarget::VarDecl(decl) => {
                        self.keyword(TokenKind::Var, "var")?;
                        self.visit_var_decl(decl)?;
                    }
                    ForInTarget::Expr(e) => self.visit_expr(e, None)?,
                }
                self.keyword(TokenKind::In, "in")?;
                self.visit_expr(enumerable, None)?;
                self.punct(TokenKind::RParen, ")")?;
                self.visit_stmt(body)?;
            }
            StmtKind::ContinueStatement(target) => {
                self.keyword(TokenKind::Continue, "continue")?;
                if let Some(t) = target {
                    self.sink.report_identifier(Token::new(TokenKind::Identifier, t.clone()))?;
                }
            }
            StmtKind::BreakStatement(target) => {
                self.keyword(TokenKind::Break, "break")?;
                if let Some(t) = target {
                    self.sink.report_identifier(Token::new(TokenKind::Identifier, t.clone()))?;
                }
            }
            StmtKind::ReturnStatement(expr) => {
                self.keyword(TokenKind::Return, "return")?;
                if let Some(e) = expr {
                    self.visit_expr(e, None)?;
                }
            }
            StmtKind::WithStatement { expr, stmt: body } => {
                self.keyword(TokenKind::With, "with")?;
                self.punct(TokenKind::LParen, "(")?;
                self.visit_expr(expr, None)?;
                self.punct(TokenKind::RParen, ")")?;
                self.visit_stmt(body)?;
            }
            StmtKind::SwitchStatement { expr, cases } => {
                self.keyword(TokenKind::Switch, "switch")?;
                self.punct(TokenKind::LParen, "(")?;
                self.visit_expr(expr, None)?;
                self.punct(TokenKind::RParen, ")")?;
                self.punct(TokenKind::LBrace, "{")?;
                for (i, case) in cases.iter().enumerate() {
                    self.visit_case(case)?;
                    if i + 1 < cases.len() {
                        if let Some(last) = case.statements.last() {
                            if needs_semicolon(last) {
                                self.punct(TokenKind::Semicolon, ";")?;
                            }
                        }
                    }
                }
                self.punct(TokenKind::RBrace, "}")?;
            }
            StmtKind::LabelledStatement { label, stmt: inner } => {
                self.sink.report_identifier(Token::new(TokenKind::Identifier, label.clone()))?;
                self.punct(TokenKind::Colon, ":")?;
                self.visit_stmt(inner)?;
            }
            StmtKind::Throw(expr) => {
                self.keyword(TokenKind::Throw, "throw")?;
                self.visit_expr(expr, None)?;
            }
            StmtKind::TryStatement {
                try_block,
                catch_var,
                catch_block,
                finally_block,
            } => {
                self.keyword(TokenKind::Try, "try")?;
                self.punct(TokenKind::LBrace, "{")?;
                self.visit_stmt_list(try_block)?;
                self.punct(TokenKind::RBrace, "}")?;
                if let Some(block) = catch_block {
                    self.keyword(TokenKind::Catch, "catch")?;
                    if let Some(var) = catch_var {
                        self.punct(TokenKind::LParen, "(")?;
                        self.sink.report_identifier(Token::new(TokenKind::Identifier, var.clone()))?;
                        self.punct(TokenKind::RParen, ")")?;
                    }
                    self.punct(TokenKind::LBrace, "{")?;
                    self.visit_stmt_list(block)?;
                    self.punct(TokenKind::RBrace, "}")?;
                }
                if let Some(block) = finally_block {
                    self.keyword(TokenKind::Finally, "finally")?;
                    self.punct(TokenKind::LBrace, "{")?;
                    self.visit_stmt_list(block)?;
                    self.punct(TokenKind::RBrace, "}")?;
                }
            }
            StmtKind::FunctionDeclaration(f) => self.visit_function(f, TokenKind::Function, "function")?,
        }
        Ok(())
    }

    fn visit_stmt_list(&mut self, stmts: &[Stmt]) -> Result<(), CompileError> {
        for (i, stmt) in stmts.iter().enumerate() {
            self.visit_stmt(stmt)?;
            if needs_semicolon(stmt) && i + 1 < stmts.len() {
                self.punct(TokenKind::Semicolon, ";")?;
            }
        }
        Ok(())
    }

    fn visit_case(&mut self, case: &CaseClause) -> Result<(), CompileError> {
        match &case.label {
            Some(expr) => {
                self.keyword(TokenKind::Case, "case")?;
                self.visit_expr(expr, None)?;
            }
            None => {
                self.keyword(TokenKind::Default, "default")?;
            }
        }
        self.punct(TokenKind::Colon, ":")?;
        self.visit_stmt_list(&case.statements)?;
        Ok(())
    }

    fn visit_variable_statement(&mut self, decls: &[VariableDeclarator]) -> Result<(), CompileError> {
        self.keyword(TokenKind::Var, "var")?;
        self.visit_var_decl_list(decls)
    }

    fn visit_var_decl_list(&mut self, decls: &[VariableDeclarator]) -> Result<(), CompileError> {
        for (i, decl) in decls.iter().enumerate() {
            if i > 0 {
                self.punct(TokenKind::Comma, ",")?;
            }
            self.visit_var_decl(decl)?;
        }
        Ok(())
    }

    fn visit_var_decl(&mut self, decl: &VariableDeclarator) -> Result<(), CompileError> {
        self.sink.report_identifier(Token::new(TokenKind::Identifier, decl.name.clone()))?;
        if let Some(init) = &decl.init {
            self.punct(TokenKind::Assign, "=")?;
            self.visit_expr(init, None)?;
        }
        Ok(())
    }

    fn visit_function(
        &mut self,
        f: &FunctionNode,
        kw_kind: TokenKind,
        kw_text: &'static str,
    ) -> Result<(), CompileError> {
        self.keyword(kw_kind, kw_text)?;
        if let Some(name) = &f.name {
            self.sink.report_identifier(Token::new(TokenKind::Identifier, name.clone()))?;
        }
        self.punct(TokenKind::LParen, "(")?;
        for (i, p) in f.params.iter().enumerate() {
            if i > 0 {
                self.punct(TokenKind::Comma, ",")?;
            }
            self.sink.report_identifier(Token::new(TokenKind::Identifier, p.clone()))?;
        }
        self.punct(TokenKind::RParen, ")")?;
        self.punct(TokenKind::LBrace, "{")?;
        self.visit_stmt_list(&f.body)?;
        self.punct(TokenKind::RBrace, "}")?;
        Ok(())
    }

    // ---- Expressions ----

    /// `parent`, when present, is the enclosing expression used for
    /// `maybe_parens`. `None` at the root of a statement.
    fn visit_expr(&mut self, expr: &Expr, parent: Option<&Expr>) -> Result<(), CompileError> {
        let wrap = self.marked_for_parens.contains(&expr.id)
            || match parent {
                Some(p) => self.needs_parens_here(expr, p),
                None => false,
            };
        if wrap {
            self.punct(TokenKind::LParen, "(")?;
        }
        self.visit_expr_inner(expr)?;
        if wrap {
            self.punct(TokenKind::RParen, ")")?;
        }
        Ok(())
    }

    fn needs_parens_here(&self, child: &Expr, parent: &Expr) -> bool {
        let is_left_assoc_rhs = match &parent.kind {
            ExprKind::BinaryOperation { right, .. } | ExprKind::CompareOperation { right, .. } => {
                std::ptr::eq(right.as_ref(), child)
            }
            _ => false,
        };
        needs_parens(&child.kind, &parent.kind, is_left_assoc_rhs)
    }

    fn visit_expr_inner(&mut self, expr: &Expr) -> Result<(), CompileError> {
        match &expr.kind {
            ExprKind::Assignment { target, op, value } => {
                self.visit_expr(target, Some(expr))?;
                self.punct(assign_token(*op), assign_text(*op))?;
                self.visit_expr(value, Some(expr))?;
            }
            ExprKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                self.visit_expr(cond, Some(expr))?;
                self.punct(TokenKind::Question, "?")?;
                self.visit_expr(then_expr, Some(expr))?;
                self.punct(TokenKind::Colon, ":")?;
                self.visit_expr(else_expr, Some(expr))?;
            }
            ExprKind::BinaryOperation { left, op, right } => {
                self.visit_expr(left, Some(expr))?;
                self.sink.report_binary_op(Token::punct(binary_token(*op), binary_text(*op)))?;
                self.visit_expr(right, Some(expr))?;
            }
            ExprKind::CompareOperation { left, op, right } => {
                self.visit_expr(left, Some(expr))?;
                self.sink.report_binary_op(compare_token(*op))?;
                self.visit_expr(right, Some(expr))?;
            }
            ExprKind::UnaryOperation { op, expr: inner } => {
                self.sink.report_unary_op(unary_token(*op))?;
                self.visit_expr(inner, Some(expr))?;
            }
            ExprKind::PrefixCountOperation { op, expr: inner } => {
                self.sink.report_prefix_op(count_token(*op))?;
                self.visit_expr(inner, Some(expr))?;
            }
            ExprKind::PostfixCountOperation { expr: inner, op } => {
                self.visit_expr(inner, Some(expr))?;
                self.sink.report_postfix_op(count_token(*op))?;
            }
            ExprKind::TypeofOperation(inner) => {
                self.keyword(TokenKind::Typeof, "typeof")?;
                self.visit_expr(inner, Some(expr))?;
            }
            ExprKind::DeleteOperation(inner) => {
                self.keyword(TokenKind::Delete, "delete")?;
                self.visit_expr(inner, Some(expr))?;
            }
            ExprKind::VoidOperation(inner) => {
                self.keyword(TokenKind::Void, "void")?;
                self.visit_expr(inner, Some(expr))?;
            }
            ExprKind::CallExpression { expr: callee, args } => {
                self.visit_expr(callee, Some(expr))?;
                self.punct(TokenKind::LParen, "(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        self.punct(TokenKind::Comma, ",")?;
                    }
                    self.visit_expr(a, None)?;
                }
                self.punct(TokenKind::RParen, ")")?;
            }
            ExprKind::NewExpression { expr: callee, args } => {
                self.keyword(TokenKind::New, "new")?;
                self.visit_expr(callee, Some(expr))?;
                if let Some(args) = args {
                    self.punct(TokenKind::LParen, "(")?;
                    for (i, a) in args.iter().enumerate() {
                        if i > 0 {
                            self.punct(TokenKind::Comma, ",")?;
                        }
                        self.visit_expr(a, None)?;
                    }
                    self.punct(TokenKind::RParen, ")")?;
                }
            }
            ExprKind::DotProperty { object, key } => {
                self.visit_expr(object, Some(expr))?;
                self.punct(TokenKind::Dot, ".")?;
                self.sink.report_identifier(Token::new(TokenKind::Identifier, key.clone()))?;
            }
            ExprKind::BracketProperty { object, key } => {
                self.visit_expr(object, Some(expr))?;
                self.punct(TokenKind::LBracket, "[")?;
                self.visit_expr(key, None)?;
                self.punct(TokenKind::RBracket, "]")?;
            }
            ExprKind::ArrayLiteral(elements) => {
                self.punct(TokenKind::LBracket, "[")?;
                for (i, el) in elements.iter().enumerate() {
                    if i > 0 {
                        self.punct(TokenKind::Comma, ",")?;
                    }
                    if let Some(e) = el {
                        self.visit_expr(e, None)?;
                    }
                }
                self.punct(TokenKind::RBracket, "]")?;
            }
            ExprKind::ObjectLiteral(props) => {
                self.punct(TokenKind::LBrace, "{")?;
                for (i, prop) in props.iter().enumerate() {
                    if i > 0 {
                        self.punct(TokenKind::Comma, ",")?;
                    }
                    self.visit_property_key(&prop.name)?;
                    self.punct(TokenKind::Colon, ":")?;
                    self.visit_expr(&prop.value, None)?;
                }
                self.punct(TokenKind::RBrace, "}")?;
            }
            ExprKind::FunctionExpression(f) => self.visit_function(f, TokenKind::Function, "function")?,
            ExprKind::Name(name) => {
                self.sink.report_identifier(Token::new(TokenKind::Identifier, name.clone()))?;
            }
            ExprKind::StringLiteral(text) => {
                self.sink.report_literal(Token::new(TokenKind::String, text.clone()))?;
            }
            ExprKind::NumberLiteral(text) => {
                self.sink.report_number(Token::new(TokenKind::Decimal, text.clone()))?;
            }
            ExprKind::RegExpLiteral { pattern, flags } => {
                let text = match flags {
                    Some(f) => format!("{pattern}{f}"),
                    None => pattern.clone(),
                };
                self.sink.report_regexp(Token::new(TokenKind::Regexp, text))?;
            }
            ExprKind::This => self.keyword(TokenKind::This, "this")?,
            ExprKind::Null => self.keyword(TokenKind::Null, "null")?,
            ExprKind::True => self.keyword(TokenKind::True, "true")?,
            ExprKind::False => self.keyword(TokenKind::False, "false")?,
        }
        Ok(())
    }

    fn visit_property_key(&mut self, key: &PropertyKey) -> Result<(), CompileError> {
        match key {
            PropertyKey::Ident(name) => {
                self.sink.report_identifier(Token::new(TokenKind::Identifier, name.clone()))?
            }
            PropertyKey::String(text) => {
                self.sink.report_literal(Token::new(TokenKind::String, text.clone()))?
            }
            PropertyKey::Number(text) => {
                self.sink.report_number(Token::new(TokenKind::Decimal, text.clone()))?
            }
        }
        Ok(())
    }
}

fn assign_token(op: AssignOp) -> TokenKind {
    match op {
        AssignOp::Assign => TokenKind::Assign,
        AssignOp::Add => TokenKind::AssignAdd,
        AssignOp::Sub => TokenKind::AssignSub,
        AssignOp::Mul => TokenKind::AssignMul,
        AssignOp::Div => TokenKind::AssignDiv,
        AssignOp::Mod => TokenKind::AssignMod,
        AssignOp::BitOr => TokenKind::AssignBitOr,
        AssignOp::BitXor => TokenKind::AssignBitXor,
        AssignOp::BitAnd => TokenKind::AssignBitAnd,
        AssignOp::Lsh => TokenKind::AssignLsh,
        AssignOp::Rsh => TokenKind::AssignRsh,
        AssignOp::Ursh => TokenKind::AssignUrsh,
    }
}

fn assign_text(op: AssignOp) -> &'static str {
    match op {
        AssignOp::Assign => "=",
        AssignOp::Add => "+=",
        AssignOp::Sub => "-=",
        AssignOp::Mul => "*=",
        AssignOp::Div => "/=",
        AssignOp::Mod => "%=",
        AssignOp::BitOr => "|=",
        AssignOp::BitXor => "^=",
        AssignOp::BitAnd => "&=",
        AssignOp::Lsh => "<<=",
        AssignOp::Rsh => ">>=",
        AssignOp::Ursh => ">>>=",
    }
}

fn binary_token(op: BinaryOp) -> TokenKind {
    match op {
        BinaryOp::Comma => TokenKind::Comma,
        BinaryOp::Or => TokenKind::Or,
        BinaryOp::And => TokenKind::And,
        BinaryOp::BitOr => TokenKind::BitOr,
        BinaryOp::BitXor => TokenKind::BitXor,
        BinaryOp::BitAnd => TokenKind::BitAnd,
        BinaryOp::Lsh => TokenKind::Lsh,
        BinaryOp::Rsh => TokenKind::Rsh,
        BinaryOp::Ursh => TokenKind::Ursh,
        BinaryOp::Add => TokenKind::Add,
        BinaryOp::Sub => TokenKind::Sub,
        BinaryOp::Mul => TokenKind::Mul,
        BinaryOp::Div => TokenKind::Div,
        BinaryOp::Mod => TokenKind::Mod,
    }
}

fn binary_text(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Comma => ",",
        BinaryOp::Or => "||",
        BinaryOp::And => "&&",
        BinaryOp::BitOr => "|",
        BinaryOp::BitXor => "^",
        BinaryOp::BitAnd => "&",
        BinaryOp::Lsh => "<<",
        BinaryOp::Rsh => ">>",
        BinaryOp::Ursh => ">>>",
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Mod => "%",
    }
}

fn compare_token(op: CompareOp) -> Token {
    let (kind, text): (TokenKind, &'static str) = match op {
        CompareOp::Eq => (TokenKind::Eq, "=="),
        CompareOp::Ne => (TokenKind::Ne, "!="),
        CompareOp::StrictEq => (TokenKind::StrictEq, "==="),
        CompareOp::StrictNe => (TokenKind::StrictNe, "!=="),
        CompareOp::Lt => (TokenKind::Lt, "<"),
        CompareOp::Gt => (TokenKind::Gt, ">"),
        CompareOp::Le => (TokenKind::Le, "<="),
        CompareOp::Ge => (TokenKind::Ge, ">="),
        CompareOp::Instanceof => (TokenKind::Instanceof, "instanceof"),
        CompareOp::In => (TokenKind::In, "in"),
    };
    Token::punct(kind, text)
}

fn unary_token(op: UnaryOp) -> Token {
    let (kind, text): (TokenKind, &'static str) = match op {
        UnaryOp::Not => (TokenKind::Not, "!"),
        UnaryOp::BitNot => (TokenKind::BitNot, "~"),
        UnaryOp::Plus => (TokenKind::Add, "+"),
        UnaryOp::Minus => (TokenKind::Sub, "-"),
    };
    Token::punct(kind, text)
}

fn count_token(op: CountOp) -> Token {
    match op {
        CountOp::Inc => Token::punct(TokenKind::Inc, "++"),
        CountOp::Dec => Token::punct(TokenKind::Dec, "--"),
    }
}
