//! Node-by-node precedence and parenthesization checks (§4.1).

use esquash_core::ast::{BinaryOp, CompareOp, ExprKind, UnaryOp};
use esquash_core::precedence::{needs_parens, precedence};

fn binop(op: BinaryOp) -> ExprKind {
    ExprKind::BinaryOperation {
        left: dummy(),
        op,
        right: dummy(),
    }
}

fn compareop(op: CompareOp) -> ExprKind {
    ExprKind::CompareOperation {
        left: dummy(),
        op,
        right: dummy(),
    }
}

fn dummy() -> Box<esquash_core::ast::Expr> {
    Box::new(esquash_core::ast::Expr {
        id: esquash_core::ast::NodeId(0),
        span: Default::default(),
        kind: ExprKind::Null,
    })
}

#[test]
fn comma_binds_loosest() {
    assert_eq!(precedence(&binop(BinaryOp::Comma)), 1);
    assert!(precedence(&binop(BinaryOp::Comma)) < precedence(&ExprKind::Conditional {
        cond: dummy(),
        then_expr: dummy(),
        else_expr: dummy(),
    }));
}

#[test]
fn multiplicative_binds_tighter_than_additive() {
    assert!(precedence(&binop(BinaryOp::Mul)) > precedence(&binop(BinaryOp::Add)));
}

#[test]
fn relational_and_equality_are_distinct_tiers() {
    assert!(precedence(&compareop(CompareOp::Lt)) > precedence(&compareop(CompareOp::Eq)));
}

#[test]
fn in_and_instanceof_share_the_relational_tier() {
    assert_eq!(
        precedence(&compareop(CompareOp::In)),
        precedence(&compareop(CompareOp::Instanceof))
    );
    assert_eq!(
        precedence(&compareop(CompareOp::In)),
        precedence(&compareop(CompareOp::Lt))
    );
}

#[test]
fn unary_binds_tighter_than_multiplicative() {
    let unary = ExprKind::UnaryOperation {
        op: UnaryOp::Minus,
        expr: dummy(),
    };
    assert!(precedence(&unary) > precedence(&binop(BinaryOp::Mul)));
}

#[test]
fn call_binds_tighter_than_unary() {
    let call = ExprKind::CallExpression {
        expr: dummy(),
        args: vec![],
    };
    let unary = ExprKind::UnaryOperation {
        op: UnaryOp::Not,
        expr: dummy(),
    };
    assert!(precedence(&call) > precedence(&unary));
}

#[test]
fn left_assoc_rhs_requires_parens_on_equal_precedence() {
    // a - (b - c) != a - b - c
    let child = binop(BinaryOp::Sub);
    let parent = binop(BinaryOp::Sub);
    assert!(needs_parens(&child, &parent, true));
}

#[test]
fn ordinary_slot_does_not_require_parens_on_equal_precedence() {
    // Assignment's RHS is right-associative: a = b = c needs no parens.
    let child = ExprKind::Assignment {
        target: dummy(),
        op: esquash_core::ast::AssignOp::Assign,
        value: dummy(),
    };
    let parent = ExprKind::Assignment {
        target: dummy(),
        op: esquash_core::ast::AssignOp::Assign,
        value: dummy(),
    };
    assert!(!needs_parens(&child, &parent, false));
}

#[test]
fn lower_precedence_child_always_needs_parens() {
    let child = binop(BinaryOp::Comma);
    let parent = binop(BinaryOp::Add);
    assert!(needs_parens(&child, &parent, false));
    assert!(needs_parens(&child, &parent, true));
}
