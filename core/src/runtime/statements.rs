//! Statement execution
//!
//! Runs a fragment body in order until it falls off the end or executes a
//! control transfer, which always ends the fragment.

use super::cast;
use super::context::ExecContext;
use super::control;
use super::errors::ExecError;
use super::expressions::{eval_args, eval_expr};
use super::lists;
use super::types::Stmt;

/// How a statement sequence finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Ran to the end of the sequence
    Next,
    /// A control transfer was executed
    Transferred,
}

pub fn execute_block(ctx: &mut ExecContext<'_>, body: &[Stmt]) -> Result<Flow, ExecError> {
    for stmt in body {
        if execute_stmt(ctx, stmt)? == Flow::Transferred {
            return Ok(Flow::Transferred);
        }
    }
    Ok(Flow::Next)
}

pub fn execute_stmt(ctx: &mut ExecContext<'_>, stmt: &Stmt) -> Result<Flow, ExecError> {
    match stmt {
        Stmt::If {
            test,
            then_s,
            else_s,
        } => {
            let taken = cast::to_boolean(&eval_expr(ctx, test)?);
            let branch = if taken { then_s } else { else_s };
            return execute_block(ctx, branch);
        }

        Stmt::SetVariable { name, value } => {
            let value = eval_expr(ctx, value)?;
            ctx.target.set_variable(name, value);
        }

        Stmt::ChangeVariable { name, by } => {
            let by = cast::to_number(&eval_expr(ctx, by)?);
            let current = cast::to_number(&ctx.target.variable(name));
            ctx.target.set_variable(name, (current + by).into());
        }

        Stmt::AddToList { list, value } => {
            let value = eval_expr(ctx, value)?;
            lists::push(ctx.target.list_mut(list), value);
        }

        Stmt::ReplaceItem { list, index, value } => {
            let index = eval_expr(ctx, index)?;
            let value = eval_expr(ctx, value)?;
            lists::replace(ctx.target.list_mut(list), &index, value);
        }

        Stmt::InsertAt { list, index, value } => {
            let index = eval_expr(ctx, index)?;
            let value = eval_expr(ctx, value)?;
            lists::insert(ctx.target.list_mut(list), &index, value);
        }

        Stmt::DeleteOf { list, index } => {
            let index = eval_expr(ctx, index)?;
            lists::delete_at(ctx.target.list_mut(list), &index);
        }

        Stmt::SetEffect { effect, value } => {
            let value = cast::to_number(&eval_expr(ctx, value)?);
            ctx.target.set_effect(*effect, value);
        }

        Stmt::ChangeEffect { effect, by } => {
            let by = cast::to_number(&eval_expr(ctx, by)?);
            ctx.target.change_effect(*effect, by);
        }

        Stmt::GoToXY { x, y } => {
            let x = cast::to_number(&eval_expr(ctx, x)?);
            let y = cast::to_number(&eval_expr(ctx, y)?);
            ctx.target.set_xy(x, y);
        }

        Stmt::IoCall {
            device,
            method,
            args,
        } => {
            let args = eval_args(ctx, args)?;
            ctx.io.query(device, method, &args)?;
        }

        Stmt::Marker { .. } => {}

        Stmt::Jump { label } => {
            control::jump(ctx, *label)?;
            return Ok(Flow::Transferred);
        }

        Stmt::JumpLazy { label } => {
            control::jump_lazy(ctx, *label)?;
            return Ok(Flow::Transferred);
        }

        Stmt::Call {
            procedure,
            args,
            resume,
        } => {
            let args = eval_args(ctx, args)?;
            control::call(ctx, *procedure, args, *resume)?;
            return Ok(Flow::Transferred);
        }

        Stmt::End => {
            control::end(ctx)?;
            return Ok(Flow::Transferred);
        }

        Stmt::Retire => {
            control::retire(ctx)?;
            return Ok(Flow::Transferred);
        }
    }
    Ok(Flow::Next)
}
