//! Frontend adapter (§4.10, ambient): lowers a `resast` tree produced by
//! `ressa` into the closed-set AST of [`crate::ast`].
//!
//! This module is the "external parser" role the distilled spec treats as a
//! black box. It owns the only `ressa`/`resast` dependency in the crate; no
//! other module ever names those types.

use resast::spanned::prelude as r;

use crate::ast::{
    AssignOp, BinaryOp, CaseClause, CompareOp, CountOp, Expr, ExprKind, ForInTarget, ForInit,
    FunctionNode, NodeId, ObjectProperty, Program, PropertyKey, SourceSpan, Stmt, StmtKind,
    UnaryOp, VariableDeclarator,
};
use crate::error::CompileError;

/// Parses `source` and lowers it to our AST. The only entry point this
/// module exposes.
pub fn parse(source: &str) -> Result<Program, CompileError> {
    let mut parser = ressa::Parser::new(source).map_err(|e| CompileError::ParseError {
        message: e.to_string(),
    })?;
    let program = parser.parse().map_err(|e| CompileError::ParseError {
        message: e.to_string(),
    })?;

    let mut lower = Lower { next_id: 0 };
    let parts: &[r::ProgramPart] = match &program {
        r::Program::Mod(parts) | r::Program::Script(parts) => parts,
    };
    let statements = lower.lower_program_parts(parts)?;
    Ok(Program {
        statements,
        scope: None,
    })
}

/// Encodes a `resast` source position as an opaque `SourceSpan`. Nothing
/// past this module inspects the two fields' meaning; they exist so
/// parse-/internal-error diagnostics further up can point at a line.
fn to_span<N: r::Node>(node: &N) -> SourceSpan {
    let loc = node.loc();
    SourceSpan::new(
        ((loc.start.line as usize) << 20) | loc.start.column as usize,
        ((loc.end.line as usize) << 20) | loc.end.column as usize,
    )
}

struct Lower {
    next_id: u32,
}

impl Lower {
    fn fresh_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn stmt(&mut self, span: SourceSpan, kind: StmtKind) -> Stmt {
        Stmt {
            id: self.fresh_id(),
            span,
            kind,
        }
    }

    fn expr(&mut self, span: SourceSpan, kind: ExprKind) -> Expr {
        Expr {
            id: self.fresh_id(),
            span,
            kind,
        }
    }

    fn lower_program_parts(&mut self, parts: &[r::ProgramPart]) -> Result<Vec<Stmt>, CompileError> {
        let mut out = Vec::with_capacity(parts.len());
        for part in parts {
            out.push(self.lower_program_part(part)?);
        }
        Ok(out)
    }

    fn lower_program_part(&mut self, part: &r::ProgramPart) -> Result<Stmt, CompileError> {
        match part {
            r::ProgramPart::Dir(dir) => {
                let span = to_span(dir);
                let text = dir.expr.value.to_string();
                let inner_span = span;
                let lit = self.expr(inner_span, ExprKind::StringLiteral(text));
                Ok(self.stmt(span, StmtKind::ExpressionStatement(Box::new(lit))))
            }
            r::ProgramPart::Decl(decl) => self.lower_decl(decl),
            r::ProgramPart::Stmt(stmt) => self.lower_stmt(stmt),
        }
    }

    fn lower_decl(&mut self, decl: &r::Decl) -> Result<Stmt, CompileError> {
        let span = to_span(decl);
        match decl {
            r::Decl::Variable(_kind, decls) => {
                let mut out = Vec::with_capacity(decls.len());
                for d in decls {
                    out.push(self.lower_var_decl(d)?);
                }
                Ok(self.stmt(span, StmtKind::VariableStatement(out)))
            }
            r::Decl::Function(f) => {
                let fn_node = self.lower_function(f)?;
                Ok(self.stmt(span, StmtKind::FunctionDeclaration(fn_node)))
            }
            other => Err(CompileError::ParseError {
                message: format!("unsupported top-level declaration: {other:?}"),
            }),
        }
    }

    fn lower_var_decl(&mut self, decl: &r::VarDecl) -> Result<VariableDeclarator, CompileError> {
        let name = self.ident_pattern_name(&decl.id)?;
        let init = match &decl.init {
            Some(e) => Some(Box::new(self.lower_expr(e)?)),
            None => None,
        };
        Ok(VariableDeclarator { name, init })
    }

    fn ident_pattern_name(&self, pat: &r::Pat) -> Result<String, CompileError> {
        match pat {
            r::Pat::Identifier(id) => Ok(id.name.to_string()),
            other => Err(CompileError::ParseError {
                message: format!("destructuring patterns are not supported: {other:?}"),
            }),
        }
    }

    fn lower_function(&mut self, f: &r::Function) -> Result<FunctionNode, CompileError> {
        let id = self.fresh_id();
        let name = f.id.as_ref().map(|i| i.name.to_string());
        let mut params = Vec::with_capacity(f.params.len());
        for p in &f.params {
            params.push(self.fn_arg_name(p)?);
        }
        let body = self.lower_program_parts(&f.body.stmts)?;
        Ok(FunctionNode {
            id,
            name,
            params,
            body,
            scope: None,
        })
    }

    fn fn_arg_name(&self, arg: &r::FunctionArg) -> Result<String, CompileError> {
        match arg {
            r::FunctionArg::Pat(p) => self.ident_pattern_name(p),
            r::FunctionArg::Expr(_) => Err(CompileError::ParseError {
                message: "default parameter expressions are not supported".into(),
            }),
        }
    }

    fn lower_stmt(&mut self, stmt: &r::Stmt) -> Result<Stmt, CompileError> {
        let span = to_span(stmt);
        let kind = match stmt {
            r::Stmt::Expr(e) => {
                StmtKind::ExpressionStatement(Box::new(self.lower_expr(e)?))
            }
            r::Stmt::Block(block) => StmtKind::Block(self.lower_program_parts(&block.stmts)?),
            r::Stmt::Empty => StmtKind::EmptyStatement,
            r::Stmt::Debugger => StmtKind::EmptyStatement,
            r::Stmt::With(with) => StmtKind::WithStatement {
                expr: Box::new(self.lower_expr(&with.object)?),
                stmt: Box::new(self.lower_stmt(&with.body)?),
            },
            r::Stmt::Return(e) => {
                let expr = match e {
                    Some(e) => Some(Box::new(self.lower_expr(e)?)),
                    None => None,
                };
                StmtKind::ReturnStatement(expr)
            }
            r::Stmt::Labeled(l) => StmtKind::LabelledStatement {
                label: l.label.name.to_string(),
                stmt: Box::new(self.lower_stmt(&l.body)?),
            },
            r::Stmt::Break(target) => {
                StmtKind::BreakStatement(target.as_ref().map(|i| i.name.to_string()))
            }
            r::Stmt::Continue(target) => {
                StmtKind::ContinueStatement(target.as_ref().map(|i| i.name.to_string()))
            }
            r::Stmt::If(i) => StmtKind::IfStatement {
                cond: Box::new(self.lower_expr(&i.test)?),
                then_stmt: Box::new(self.lower_stmt(&i.consequent)?),
                else_stmt: match &i.alternate {
                    Some(a) => Some(Box::new(self.lower_stmt(a)?)),
                    None => None,
                },
            },
            r::Stmt::Switch(s) => {
                let expr = Box::new(self.lower_expr(&s.discriminant)?);
                let mut cases = Vec::with_capacity(s.cases.len());
                for case in &s.cases {
                    cases.push(self.lower_case(case)?);
                }
                StmtKind::SwitchStatement { expr, cases }
            }
            r::Stmt::Throw(e) => StmtKind::Throw(Box::new(self.lower_expr(e)?)),
            r::Stmt::Try(t) => {
                let try_block = self.lower_program_parts(&t.block.stmts)?;
                let (catch_var, catch_block) = match &t.handler {
                    Some(h) => {
                        let var = match &h.param {
                            Some(p) => Some(self.ident_pattern_name(p)?),
                            None => None,
                        };
                        (var, Some(self.lower_program_parts(&h.body.stmts)?))
                    }
                    None => (None, None),
                };
                let finally_block = match &t.finalizer {
                    Some(f) => Some(self.lower_program_parts(&f.stmts)?),
                    None => None,
                };
                StmtKind::TryStatement {
                    try_block,
                    catch_var,
                    catch_block,
                    finally_block,
                }
            }
            r::Stmt::While(w) => StmtKind::WhileStatement {
                cond: Box::new(self.lower_expr(&w.test)?),
                body: Box::new(self.lower_stmt(&w.body)?),
            },
            r::Stmt::DoWhile(d) => StmtKind::DoWhileStatement {
                body: Box::new(self.lower_stmt(&d.body)?),
                cond: Box::new(self.lower_expr(&d.test)?),
            },
            r::Stmt::For(f) => {
                let init = match &f.init {
                    Some(r::LoopInit::Variable(_kind, decls)) => {
                        let mut out = Vec::with_capacity(decls.len());
                        for d in decls {
                            out.push(self.lower_var_decl(d)?);
                        }
                        Some(ForInit::VarDecl(out))
                    }
                    Some(r::LoopInit::Expr(e)) => {
                        Some(ForInit::Expr(Box::new(self.lower_expr(e)?)))
                    }
                    None => None,
                };
                let cond = match &f.test {
                    Some(e) => Some(Box::new(self.lower_expr(e)?)),
                    None => None,
                };
                let next = match &f.update {
                    Some(e) => Some(Box::new(self.lower_expr(e)?)),
                    None => None,
                };
                StmtKind::ForStatement {
                    init,
                    cond,
                    next,
                    body: Box::new(self.lower_stmt(&f.body)?),
                }
            }
            r::Stmt::ForIn(f) => {
                let each = self.lower_for_in_target(&f.left)?;
                StmtKind::ForInStatement {
                    each,
                    enumerable: Box::new(self.lower_expr(&f.right)?),
                    body: Box::new(self.lower_stmt(&f.body)?),
                }
            }
            // `for...of` has no dedicated node in the closed taxonomy (§3
            // targets ES3/ES5); treated as an enumeration loop over the
            // same right-hand source, matching the nearest-available shape.
            r::Stmt::ForOf(f) => {
                let each = self.lower_for_in_target(&f.left)?;
                StmtKind::ForInStatement {
                    each,
                    enumerable: Box::new(self.lower_expr(&f.right)?),
                    body: Box::new(self.lower_stmt(&f.body)?),
                }
            }
            other => {
                return Err(CompileError::ParseError {
                    message: format!("unsupported statement: {other:?}"),
                })
            }
        };
        Ok(self.stmt(span, kind))
    }

    fn lower_for_in_target(&mut self, left: &r::LoopLeft) -> Result<ForInTarget, CompileError> {
        match left {
            r::LoopLeft::Variable(_kind, decl) => {
                Ok(ForInTarget::VarDecl(self.lower_var_decl(decl)?))
            }
            r::LoopLeft::Pat(p) => Ok(ForInTarget::VarDecl(VariableDeclarator {
                name: self.ident_pattern_name(p)?,
                init: None,
            })),
            r::LoopLeft::Expr(e) => Ok(ForInTarget::Expr(Box::new(self.lower_expr(e)?))),
        }
    }

    fn lower_case(&mut self, case: &r::SwitchCase) -> Result<CaseClause, CompileError> {
        let label = match &case.test {
            Some(e) => Some(Box::new(self.lower_expr(e)?)),
            None => None,
        };
        Ok(CaseClause {
            label,
            statements: self.lower_program_parts(&case.consequent)?,
        })
    }

    fn lower_expr(&mut self, expr: &r::Expr) -> Result<Expr, CompileError> {
        let span = to_span(expr);
        let kind = match expr {
            r::Expr::Ident(id) => ExprKind::Name(id.name.to_string()),
            r::Expr::This(_) => ExprKind::This,
            r::Expr::Literal(lit) => self.lower_literal(lit)?,
            r::Expr::Array(elements) => {
                let mut out = Vec::with_capacity(elements.len());
                for el in elements {
                    out.push(match el {
                        Some(e) => Some(self.lower_expr(e)?),
                        None => None,
                    });
                }
                ExprKind::ArrayLiteral(out)
            }
            r::Expr::Object(obj) => {
                let mut props = Vec::with_capacity(obj.properties.len());
                for prop in &obj.properties {
                    props.push(self.lower_object_property(prop)?);
                }
                ExprKind::ObjectLiteral(props)
            }
            r::Expr::Function(f) => ExprKind::FunctionExpression(self.lower_function(f)?),
            r::Expr::Unary(u) => {
                let inner = Box::new(self.lower_expr(&u.argument)?);
                match u.operator {
                    r::UnaryOperator::Typeof => ExprKind::TypeofOperation(inner),
                    r::UnaryOperator::Delete => ExprKind::DeleteOperation(inner),
                    r::UnaryOperator::Void => ExprKind::VoidOperation(inner),
                    r::UnaryOperator::Not => ExprKind::UnaryOperation {
                        op: UnaryOp::Not,
                        expr: inner,
                    },
                    r::UnaryOperator::Tilde => ExprKind::UnaryOperation {
                        op: UnaryOp::BitNot,
                        expr: inner,
                    },
                    r::UnaryOperator::Plus => ExprKind::UnaryOperation {
                        op: UnaryOp::Plus,
                        expr: inner,
                    },
                    r::UnaryOperator::Minus => ExprKind::UnaryOperation {
                        op: UnaryOp::Minus,
                        expr: inner,
                    },
                }
            }
            r::Expr::Update(u) => {
                let inner = Box::new(self.lower_expr(&u.argument)?);
                let op = match u.operator {
                    r::UpdateOperator::Increment => CountOp::Inc,
                    r::UpdateOperator::Decrement => CountOp::Dec,
                };
                if u.prefix {
                    ExprKind::PrefixCountOperation { op, expr: inner }
                } else {
                    ExprKind::PostfixCountOperation { expr: inner, op }
                }
            }
            r::Expr::Binary(b) => {
                let left = Box::new(self.lower_expr(&b.left)?);
                let right = Box::new(self.lower_expr(&b.right)?);
                if let Some(op) = compare_op(b.operator) {
                    ExprKind::CompareOperation { left, op, right }
                } else {
                    ExprKind::BinaryOperation {
                        left,
                        op: binary_op(b.operator)?,
                        right,
                    }
                }
            }
            r::Expr::Logical(l) => {
                let left = Box::new(self.lower_expr(&l.left)?);
                let right = Box::new(self.lower_expr(&l.right)?);
                let op = match l.operator {
                    r::LogicalOperator::And => BinaryOp::And,
                    r::LogicalOperator::Or => BinaryOp::Or,
                };
                ExprKind::BinaryOperation { left, op, right }
            }
            r::Expr::Assign(a) => {
                let target = Box::new(self.assign_target(&a.left)?);
                let value = Box::new(self.lower_expr(&a.right)?);
                ExprKind::Assignment {
                    target,
                    op: assign_op(a.operator),
                    value,
                }
            }
            r::Expr::Conditional(c) => ExprKind::Conditional {
                cond: Box::new(self.lower_expr(&c.test)?),
                then_expr: Box::new(self.lower_expr(&c.consequent)?),
                else_expr: Box::new(self.lower_expr(&c.alternate)?),
            },
            r::Expr::Call(c) => {
                let callee = Box::new(self.lower_expr(&c.callee)?);
                let mut args = Vec::with_capacity(c.arguments.len());
                for a in &c.arguments {
                    args.push(self.lower_expr(a)?);
                }
                ExprKind::CallExpression { expr: callee, args }
            }
            r::Expr::New(n) => {
                let callee = Box::new(self.lower_expr(&n.callee)?);
                let mut args = Vec::with_capacity(n.arguments.len());
                for a in &n.arguments {
                    args.push(self.lower_expr(a)?);
                }
                ExprKind::NewExpression {
                    expr: callee,
                    args: Some(args),
                }
            }
            r::Expr::Member(m) => {
                let object = Box::new(self.lower_expr(&m.object)?);
                if m.computed {
                    ExprKind::BracketProperty {
                        object,
                        key: Box::new(self.lower_expr(&m.property)?),
                    }
                } else {
                    let key = match m.property.as_ref() {
                        r::Expr::Ident(id) => id.name.to_string(),
                        other => {
                            return Err(CompileError::ParseError {
                                message: format!("non-identifier property key: {other:?}"),
                            })
                        }
                    };
                    ExprKind::DotProperty { object, key }
                }
            }
            r::Expr::Sequence(exprs) => {
                let mut iter = exprs.iter();
                let first = iter
                    .next()
                    .ok_or_else(|| CompileError::ParseError {
                        message: "empty sequence expression".into(),
                    })?;
                let mut acc = self.lower_expr(first)?;
                for e in iter {
                    let right = self.lower_expr(e)?;
                    acc = Expr {
                        id: self.fresh_id(),
                        span,
                        kind: ExprKind::BinaryOperation {
                            left: Box::new(acc),
                            op: BinaryOp::Comma,
                            right: Box::new(right),
                        },
                    };
                }
                return Ok(acc);
            }
            other => {
                return Err(CompileError::ParseError {
                    message: format!("unsupported expression: {other:?}"),
                })
            }
        };
        Ok(self.expr(span, kind))
    }

    fn assign_target(&mut self, pat: &r::AssignLeft) -> Result<Expr, CompileError> {
        match pat {
            r::AssignLeft::Expr(e) => self.lower_expr(e),
            r::AssignLeft::Pat(r::Pat::Identifier(id)) => {
                let span = to_span(id);
                Ok(self.expr(span, ExprKind::Name(id.name.to_string())))
            }
            r::AssignLeft::Pat(other) => Err(CompileError::ParseError {
                message: format!("destructuring assignment target not supported: {other:?}"),
            }),
        }
    }

    fn lower_object_property(&mut self, prop: &r::ObjectProperty) -> Result<ObjectProperty, CompileError> {
        match prop {
            r::ObjectProperty::Property(p) => {
                let name = match &p.key {
                    r::PropertyKey::Ident(id) => PropertyKey::Ident(id.name.to_string()),
                    r::PropertyKey::Lit(r::Literal::String(s)) => {
                        PropertyKey::String(s.to_string())
                    }
                    r::PropertyKey::Lit(r::Literal::Number(n)) => {
                        PropertyKey::Number(n.to_string())
                    }
                    other => {
                        return Err(CompileError::ParseError {
                            message: format!("unsupported property key: {other:?}"),
                        })
                    }
                };
                let value = Box::new(self.lower_expr(&p.value)?);
                Ok(ObjectProperty { name, value })
            }
            r::ObjectProperty::Spread(_) => Err(CompileError::ParseError {
                message: "object spread is not supported".into(),
            }),
        }
    }

    fn lower_literal(&mut self, lit: &r::Literal) -> Result<ExprKind, CompileError> {
        Ok(match lit {
            r::Literal::Null => ExprKind::Null,
            r::Literal::Boolean(true) => ExprKind::True,
            r::Literal::Boolean(false) => ExprKind::False,
            r::Literal::Number(n) => ExprKind::NumberLiteral(n.to_string()),
            r::Literal::String(s) => ExprKind::StringLiteral(s.to_string()),
            r::Literal::RegEx(re) => ExprKind::RegExpLiteral {
                pattern: re.pattern.to_string(),
                flags: if re.flags.is_empty() {
                    None
                } else {
                    Some(re.flags.to_string())
                },
            },
        })
    }
}

fn compare_op(op: r::BinaryOperator) -> Option<CompareOp> {
    Some(match op {
        r::BinaryOperator::Equal => CompareOp::Eq,
        r::BinaryOperator::NotEqual => CompareOp::Ne,
        r::BinaryOperator::StrictEqual => CompareOp::StrictEq,
        r::BinaryOperator::StrictNotEqual => CompareOp::StrictNe,
        r::BinaryOperator::LessThan => CompareOp::Lt,
        r::BinaryOperator::GreaterThan => CompareOp::Gt,
        r::BinaryOperator::LessThanEqual => CompareOp::Le,
        r::BinaryOperator::GreaterThanEqual => CompareOp::Ge,
        r::BinaryOperator::InstanceOf => CompareOp::Instanceof,
        r::BinaryOperator::In => CompareOp::In,
        _ => return None,
    })
}

fn binary_op(op: r::BinaryOperator) -> Result<BinaryOp, CompileError> {
    Ok(match op {
        r::BinaryOperator::Plus => BinaryOp::Add,
        r::BinaryOperator::Minus => BinaryOp::Sub,
        r::BinaryOperator::Times => BinaryOp::Mul,
        r::BinaryOperator::Divide => BinaryOp::Div,
        r::BinaryOperator::Mod => BinaryOp::Mod,
        r::BinaryOperator::Or => BinaryOp::BitOr,
        r::BinaryOperator::XOr => BinaryOp::BitXor,
        r::BinaryOperator::And => BinaryOp::BitAnd,
        r::BinaryOperator::LeftShift => BinaryOp::Lsh,
        r::BinaryOperator::RightShift => BinaryOp::Rsh,
        r::BinaryOperator::UnsignedRightShift => BinaryOp::Ursh,
        other => {
            return Err(CompileError::ParseError {
                message: format!("unsupported binary operator: {other:?}"),
            })
        }
    })
}

fn assign_op(op: r::AssignmentOperator) -> AssignOp {
    match op {
        r::AssignmentOperator::Equal => AssignOp::Assign,
        r::AssignmentOperator::PlusEqual => AssignOp::Add,
        r::AssignmentOperator::MinusEqual => AssignOp::Sub,
        r::AssignmentOperator::TimesEqual => AssignOp::Mul,
        r::AssignmentOperator::DivideEqual => AssignOp::Div,
        r::AssignmentOperator::ModEqual => AssignOp::Mod,
        r::AssignmentOperator::OrEqual => AssignOp::BitOr,
        r::AssignmentOperator::XOrEqual => AssignOp::BitXor,
        r::AssignmentOperator::AndEqual => AssignOp::BitAnd,
        r::AssignmentOperator::LeftShiftEqual => AssignOp::Lsh,
        r::AssignmentOperator::RightShiftEqual => AssignOp::Rsh,
        r::AssignmentOperator::UnsignedRightShiftEqual => AssignOp::Ursh,
    }
}
