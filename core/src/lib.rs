pub mod benchmark;
pub mod cli;
pub mod config;
pub mod runtime;

// Re-export the runtime surface
pub use runtime::{
    step, ExecContext, ExecError, Fragment, LabelId, Program, Scheduler, StepOutcome, Target,
    Thread, Val,
};
