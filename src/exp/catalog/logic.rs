// SPDX-License-Identifier: MIT

//! Logical combinators

use crate::exp::ast::Expression;

/// Always true
pub const TRUE: Expression = Expression::Constant(true);
/// Always false
pub const FALSE: Expression = Expression::Constant(false);

pub fn constant(value: bool) -> Expression {
    Expression::Constant(value)
}

/// True if all of `items` are true, evaluated left to right
pub fn and(items: impl IntoIterator<Item = Expression>) -> Expression {
    Expression::And(items.into_iter().collect())
}

/// True if any of `items` is true, evaluated left to right
pub fn or(items: impl IntoIterator<Item = Expression>) -> Expression {
    Expression::Or(items.into_iter().collect())
}

pub fn not(expr: Expression) -> Expression {
    Expression::Not(Box::new(expr))
}

impl std::ops::Not for Expression {
    type Output = Expression;

    fn not(self) -> Expression {
        not(self)
    }
}
