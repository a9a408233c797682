//! # Runtime - Resumable Fragment Executor
//!
//! Executes compiled block scripts cooperatively, one thread at a time.
//!
//! ## Core Principles
//!
//! 1. **Explicit resumable state**: a thread is a resume label plus a call
//!    stack and a warp depth; nothing is kept on the host stack between ticks
//! 2. **One suspension point**: `jump_lazy` outside warp is the only place a
//!    thread yields to the scheduler
//! 3. **Explicit context**: the thread/target pair a fragment acts on is
//!    passed in an `ExecContext` built fresh for every step
//! 4. **Lazy continuations**: resume fragments are derived from the compiled
//!    IR the first time a suspension point is reached, then cached per label

pub mod cast;
pub mod context;
pub mod continuation;
pub mod control;
pub mod errors;
pub mod exec_loop;
pub mod expressions;
pub mod io;
pub mod lists;
pub mod scheduler;
pub mod statements;
pub mod target;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use context::{ExecContext, RetiredThreads, Sequencer, StepOutcome};
pub use errors::{ExecError, IoError};
pub use exec_loop::step;
pub use io::{ClockDevice, IoDevice, IoRegistry, Timer};
pub use lists::List;
pub use scheduler::{Scheduler, TickReport};
pub use target::{Target, TargetId};
pub use types::{
    Expr, Fragment, LabelEntry, LabelId, MarkerId, ProcedureDef, ProcedureId, Program, Stmt,
    Thread, ThreadId, ThreadStatus, Val,
};
