//! Expression evaluation
//!
//! Every operator coerces its operands through `cast`, so a compiled
//! expression behaves the same whatever mix of strings, numbers and
//! booleans reaches it.

use super::cast;
use super::context::ExecContext;
use super::errors::ExecError;
use super::lists;
use super::types::{BinaryOp, CastKind, CompareOp, Expr, Val};
use std::cmp::Ordering;

pub fn eval_expr(ctx: &mut ExecContext<'_>, expr: &Expr) -> Result<Val, ExecError> {
    let val = match expr {
        Expr::Lit { v } => v.clone(),

        Expr::Var { name } => ctx.target.variable(name),

        // Outside a procedure an argument reporter reads as 0
        Expr::Arg { index } => ctx
            .thread
            .args()
            .get(*index)
            .cloned()
            .unwrap_or(Val::Num(0.0)),

        Expr::ItemOfList { list, index } => {
            let index = eval_expr(ctx, index)?;
            match ctx.target.list(list) {
                Some(l) => lists::get(l, &index),
                None => Val::Str(String::new()),
            }
        }

        Expr::LengthOfList { list } => {
            let len = ctx.target.list(list).map_or(0, lists::length);
            Val::Num(len as f64)
        }

        Expr::Binary { op, left, right } => {
            let a = cast::to_number(&eval_expr(ctx, left)?);
            let b = cast::to_number(&eval_expr(ctx, right)?);
            Val::Num(match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div => a / b,
                BinaryOp::Mod => cast::floor_mod(a, b),
            })
        }

        Expr::Compare { op, left, right } => {
            let a = eval_expr(ctx, left)?;
            let b = eval_expr(ctx, right)?;
            let expected = match op {
                CompareOp::Eq => Ordering::Equal,
                CompareOp::Lt => Ordering::Less,
                CompareOp::Gt => Ordering::Greater,
            };
            Val::Bool(cast::compare(&a, &b) == expected)
        }

        Expr::And { left, right } => {
            let result = cast::to_boolean(&eval_expr(ctx, left)?)
                && cast::to_boolean(&eval_expr(ctx, right)?);
            Val::Bool(result)
        }

        Expr::Or { left, right } => {
            let result = cast::to_boolean(&eval_expr(ctx, left)?)
                || cast::to_boolean(&eval_expr(ctx, right)?);
            Val::Bool(result)
        }

        Expr::Not { inner } => Val::Bool(!cast::to_boolean(&eval_expr(ctx, inner)?)),

        Expr::Join { left, right } => {
            let mut joined = cast::to_string(&eval_expr(ctx, left)?);
            joined.push_str(&cast::to_string(&eval_expr(ctx, right)?));
            Val::Str(joined)
        }

        Expr::Cast { to, inner } => {
            let v = eval_expr(ctx, inner)?;
            match to {
                CastKind::Number => Val::Num(cast::to_number(&v)),
                CastKind::NotNan => Val::Num(cast::to_not_nan(cast::number(&v))),
                CastKind::Boolean => Val::Bool(cast::to_boolean(&v)),
                CastKind::String => Val::Str(cast::to_string(&v)),
            }
        }

        Expr::IoQuery {
            device,
            method,
            args,
        } => {
            let args = eval_args(ctx, args)?;
            ctx.io.query(device, method, &args)?
        }
    };
    Ok(val)
}

pub fn eval_args(ctx: &mut ExecContext<'_>, args: &[Expr]) -> Result<Vec<Val>, ExecError> {
    args.iter().map(|arg| eval_expr(ctx, arg)).collect()
}
