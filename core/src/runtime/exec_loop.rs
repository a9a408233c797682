//! Thread stepper
//!
//! `step()` advances one thread by one scheduler tick. It runs the thread's
//! stored fragment, then keeps draining the immediate work queued by
//! synchronous jumps until a fragment stops requesting more. At that point
//! the thread has either yielded (its stored fragment is the resume point)
//! or retired.

use super::context::{ExecContext, StepOutcome};
use super::control;
use super::errors::ExecError;
use super::statements::execute_block;
use super::types::{LabelId, ThreadStatus};
use std::sync::Arc;
use tracing::{debug, warn};

/// Advance the context's thread by one tick
pub fn step(ctx: &mut ExecContext<'_>) -> Result<StepOutcome, ExecError> {
    if ctx.thread.is_retired() {
        return Ok(StepOutcome::Retired);
    }

    let Some(entry) = ctx.thread.fragment else {
        control::retire(ctx)?;
        return Ok(StepOutcome::Retired);
    };

    ctx.thread.status = ThreadStatus::Running;
    ctx.immediate = None;
    run_label(ctx, entry)?;

    let mut transfers = 0usize;
    while let Some(next) = ctx.immediate.take() {
        transfers += 1;
        if ctx.transfer_limit.is_some_and(|limit| transfers > limit) {
            warn!(
                thread = %ctx.thread.id,
                transfers,
                resume = %next,
                "Transfer limit reached, suspending thread"
            );
            ctx.thread.fragment = Some(next);
            break;
        }
        run_label(ctx, next)?;
    }

    let outcome = if ctx.thread.is_retired() {
        StepOutcome::Retired
    } else {
        ctx.thread.status = ThreadStatus::Suspended;
        StepOutcome::Suspended
    };
    debug!(
        thread = %ctx.thread.id,
        transfers,
        warp = ctx.thread.warp,
        ?outcome,
        "Step finished"
    );
    Ok(outcome)
}

/// Resolve a label against the thread's program and run it
fn run_label(ctx: &mut ExecContext<'_>, label: LabelId) -> Result<(), ExecError> {
    let program = Arc::clone(&ctx.thread.program);
    let fragment = program.fragment(label)?;
    execute_block(ctx, &fragment.body)?;
    Ok(())
}
