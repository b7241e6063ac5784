//! The precedence table the code generator consults for parenthesization
//! (§4.1).

use crate::ast::{AssignOp, BinaryOp, CompareOp, ExprKind};

/// `precedence(node)`: a pure function from expression shape to an integer
/// in the table below. Higher binds tighter.
pub fn precedence(expr: &ExprKind) -> i32 {
    match expr {
        ExprKind::BinaryOperation { op: BinaryOp::Comma, .. } => 1,
        ExprKind::Assignment { .. } => 2,
        ExprKind::Conditional { .. } => 3,
        ExprKind::BinaryOperation { op: BinaryOp::Or, .. } => 4,
        ExprKind::BinaryOperation { op: BinaryOp::And, .. } => 5,
        ExprKind::BinaryOperation { op: BinaryOp::BitOr, .. } => 6,
        ExprKind::BinaryOperation { op: BinaryOp::BitXor, .. } => 7,
        ExprKind::BinaryOperation { op: BinaryOp::BitAnd, .. } => 8,
        ExprKind::CompareOperation {
            op: CompareOp::Eq | CompareOp::Ne | CompareOp::StrictEq | CompareOp::StrictNe,
            ..
        } => 9,
        ExprKind::CompareOperation {
            op:
                CompareOp::Lt
                | CompareOp::Gt
                | CompareOp::Le
                | CompareOp::Ge
                | CompareOp::Instanceof
                | CompareOp::In,
            ..
        } => 10,
        ExprKind::BinaryOperation {
            op: BinaryOp::Lsh | BinaryOp::Rsh | BinaryOp::Ursh,
            ..
        } => 11,
        ExprKind::BinaryOperation {
            op: BinaryOp::Add | BinaryOp::Sub,
            ..
        } => 12,
        ExprKind::BinaryOperation {
            op: BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod,
            ..
        } => 13,
        ExprKind::UnaryOperation { .. }
        | ExprKind::TypeofOperation(_)
        | ExprKind::DeleteOperation(_)
        | ExprKind::VoidOperation(_) => 14,
        ExprKind::PrefixCountOperation { .. } | ExprKind::PostfixCountOperation { .. } => 15,
        ExprKind::CallExpression { .. } => 16,
        ExprKind::DotProperty { .. } | ExprKind::BracketProperty { .. } | ExprKind::NewExpression { .. } => 17,
        _ => 20,
    }
}

/// `precedence(node)` for an assignment operator's class; exposed
/// separately since some callers only have the operator, not a full
/// `ExprKind::Assignment`.
pub fn assign_op_precedence(_op: AssignOp) -> i32 {
    2
}

/// Whether `child` (the right-hand operand of a left-associative binary
/// operator, or a `Conditional`'s operand) needs parentheses under `parent`.
///
/// For a left-associative slot, parenthesize iff `precedence(child) <
/// precedence(parent)`. For the *right-hand* side of a left-associative
/// binary operator, parenthesize iff `precedence(child) <= precedence(parent)`
/// (tie still needs parens, since `a - (b - c) != a - b - c`). Assignment's
/// right-hand side is right-associative, so equal precedence needs no parens.
pub fn needs_parens(child: &ExprKind, parent: &ExprKind, is_left_assoc_rhs: bool) -> bool {
    let child_prec = precedence(child);
    let parent_prec = precedence(parent);
    if is_left_assoc_rhs {
        child_prec <= parent_prec
    } else {
        child_prec < parent_prec
    }
}
