//! Control transfer primitives
//!
//! Compiled fragments move between labeled regions only through these
//! functions. None of them runs the destination: a synchronous transfer
//! queues it as immediate work for the stepper to drain, and a lazy
//! transfer outside warp stores it as the thread's resume point and lets
//! the tick end.

use super::context::ExecContext;
use super::errors::ExecError;
use super::types::{CallFrame, LabelId, ProcedureId, Val};
use tracing::{debug, trace};

/* ===================== Transfers ===================== */

/// Continue at `label` within the current tick
pub fn jump(ctx: &mut ExecContext<'_>, label: LabelId) -> Result<(), ExecError> {
    ensure_live(ctx)?;
    trace!(thread = %ctx.thread.id, %label, "jump");
    ctx.immediate = Some(label);
    Ok(())
}

/// Continue at `label`, yielding to the scheduler first unless in warp
pub fn jump_lazy(ctx: &mut ExecContext<'_>, label: LabelId) -> Result<(), ExecError> {
    if ctx.thread.is_warp() {
        return jump(ctx, label);
    }
    ensure_live(ctx)?;
    trace!(thread = %ctx.thread.id, %label, "yield");
    ctx.thread.fragment = Some(label);
    Ok(())
}

/// Invoke a procedure, resuming at `resume` once it ends
pub fn call(
    ctx: &mut ExecContext<'_>,
    procedure: ProcedureId,
    args: Vec<Val>,
    resume: LabelId,
) -> Result<(), ExecError> {
    ensure_live(ctx)?;
    let def = ctx.thread.program.procedure(procedure)?;
    let label = def.label;
    let warped = def.warp || ctx.thread.is_warp();

    trace!(
        thread = %ctx.thread.id,
        %procedure,
        name = %def.name,
        depth = ctx.thread.call_stack.len() + 1,
        warped,
        "call"
    );

    ctx.thread.call_stack.push(CallFrame {
        args,
        resume,
        warped,
    });
    if warped {
        ctx.thread.warp += 1;
    }
    jump(ctx, label)
}

/// Return from the innermost call, or retire when there is none
pub fn end(ctx: &mut ExecContext<'_>) -> Result<(), ExecError> {
    ensure_live(ctx)?;
    let Some(frame) = ctx.thread.call_stack.pop() else {
        return retire(ctx);
    };
    if frame.warped {
        ctx.thread.warp = ctx.thread.warp.saturating_sub(1);
    }
    trace!(thread = %ctx.thread.id, resume = %frame.resume, "return");
    jump(ctx, frame.resume)
}

/// Finish the thread and notify the sequencer
pub fn retire(ctx: &mut ExecContext<'_>) -> Result<(), ExecError> {
    ensure_live(ctx)?;
    debug!(thread = %ctx.thread.id, target = %ctx.thread.target, "Retiring thread");

    ctx.thread.mark_retired();
    ctx.immediate = None;
    ctx.sequencer.retire_thread(ctx.thread.id);
    Ok(())
}

fn ensure_live(ctx: &ExecContext<'_>) -> Result<(), ExecError> {
    if ctx.thread.is_retired() {
        return Err(ExecError::ThreadRetired(ctx.thread.id));
    }
    Ok(())
}
