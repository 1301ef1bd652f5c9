// SPDX-License-Identifier: MIT

//! Parse tree compiler
//!
//! Walks the raw [`ParseTree`], resolves literal types and produces an
//! [`Expression`]. Chains of the same logical operator are flattened into a
//! single n-ary `And`/`Or`.

use super::ast::Expression;
use super::catalog::{eq, gt, gte, lt, lte, matches, neq, not};
use super::error::{CompileError, ExpError};
use super::options::ParseOptions;
use super::parse::{parse_tree, ParseTree, Token, TokenKind};

/// Parse and compile source text with default options
///
/// ```
/// use exp_rs::exp::{parse, Map};
///
/// let expr = parse(r#"((foo > 200) || (bar == "x"))"#).unwrap();
/// let m = Map::from([
///     ("foo".to_string(), "124".to_string()),
///     ("bar".to_string(), "x".to_string()),
/// ]);
/// assert!(expr.eval(&m));
/// ```
pub fn parse(source: &str) -> Result<Expression, ExpError> {
    parse_with(source, &ParseOptions::default())
}

/// Parse and compile source text
pub fn parse_with(source: &str, options: &ParseOptions) -> Result<Expression, ExpError> {
    let tree = parse_tree(source, options)?;
    let expr = compile(&tree)?;
    log::debug!("compiled {:?} into {}", source, expr);
    Ok(expr)
}

/// Compile a parse tree into an expression
pub fn compile(tree: &ParseTree) -> Result<Expression, CompileError> {
    let Some(token) = &tree.token else {
        return Err(CompileError::Empty);
    };

    match token.kind {
        TokenKind::Boolean => Ok(Expression::Constant(token.value == "true")),
        TokenKind::And | TokenKind::Or => compile_chain(tree, token.kind),
        TokenKind::Not => Ok(not(compile(child(tree.right.as_deref())?)?)),
        kind if kind.is_comparison() => compile_comparison(tree, token),
        _ => Err(CompileError::NotBoolean {
            found: token.to_string(),
            line: token.line,
            col: token.col,
        }),
    }
}

fn child(node: Option<&ParseTree>) -> Result<&ParseTree, CompileError> {
    node.ok_or(CompileError::Empty)
}

/// Collect the operands of a left-leaning chain of `kind` without recursing
/// down the left spine
fn compile_chain(tree: &ParseTree, kind: TokenKind) -> Result<Expression, CompileError> {
    let mut operands = Vec::new();
    let mut node = tree;
    loop {
        operands.push(child(node.right.as_deref())?);
        let left = child(node.left.as_deref())?;
        if left.kind() == Some(kind) {
            node = left;
        } else {
            operands.push(left);
            break;
        }
    }

    let items = operands
        .into_iter()
        .rev()
        .map(compile)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(match kind {
        TokenKind::And => Expression::And(items),
        _ => Expression::Or(items),
    })
}

/// Leaf operand of a comparison
fn operand<'t>(node: Option<&'t ParseTree>, op: &Token) -> Result<&'t Token, CompileError> {
    let node = child(node)?;
    match &node.token {
        Some(token) if node.is_leaf() && token.kind.is_operand() => Ok(token),
        Some(token) => Err(ambiguous(
            op,
            format!("expected an identifier or literal, found {}", token),
        )),
        None => Err(CompileError::Empty),
    }
}

fn ambiguous(op: &Token, reason: impl Into<String>) -> CompileError {
    CompileError::AmbiguousOperands {
        op: op.value.clone(),
        reason: reason.into(),
        line: op.line,
        col: op.col,
    }
}

fn compile_comparison(tree: &ParseTree, op: &Token) -> Result<Expression, CompileError> {
    let left = operand(tree.left.as_deref(), op)?;
    let right = operand(tree.right.as_deref(), op)?;

    // The key may sit on either side; ordering flips when it is on the right.
    let (key, literal, kind) = match (left.kind, right.kind) {
        (TokenKind::Identifier, TokenKind::Identifier) => {
            return Err(ambiguous(op, "two identifiers"));
        }
        (TokenKind::Identifier, _) => (left, right, op.kind),
        (_, TokenKind::Identifier) => (right, left, op.kind.mirrored()),
        _ => return Err(ambiguous(op, "two literals")),
    };
    let key = key.value.clone();

    if literal.kind == TokenKind::Number {
        let n = parse_number(&literal.value).ok_or_else(|| CompileError::InvalidNumber {
            text: literal.value.clone(),
            line: literal.line,
            col: literal.col,
        })?;
        return Ok(match kind {
            TokenKind::NotEq => neq(key, n),
            TokenKind::Gt => gt(key, n),
            TokenKind::Gte => gte(key, n),
            TokenKind::Lt => lt(key, n),
            TokenKind::Lte => lte(key, n),
            _ => eq(key, n),
        });
    }

    // Strings and booleans only support equality
    if kind.is_ordering() {
        return Err(CompileError::NotNumeric {
            op: op.value.clone(),
            value: literal.value.clone(),
            line: literal.line,
            col: literal.col,
        });
    }
    let value = literal.value.clone();
    Ok(match kind {
        TokenKind::NotEq => not(matches(key, value)),
        _ => matches(key, value),
    })
}

/// `digit+ ('.' digit+)?`
fn parse_number(text: &str) -> Option<f64> {
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    let mut parts = text.split('.');
    let whole = parts.next()?;
    let fraction = parts.next();
    if parts.next().is_some() || !digits(whole) || fraction.is_some_and(|f| !digits(f)) {
        return None;
    }
    text.parse().ok()
}
