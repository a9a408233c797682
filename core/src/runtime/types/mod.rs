//! Type definitions for the runtime
//!
//! - Fragment IR nodes (Stmt, Expr, Fragment)
//! - Runtime values (Val)
//! - Program tables (Program, LabelEntry, ProcedureDef)
//! - Thread state (Thread, CallFrame)

pub mod ast;
pub mod program;
pub mod thread;
pub mod values;

pub use ast::{
    BinaryOp, CastKind, CompareOp, Effect, Expr, Fragment, LabelId, MarkerId, ProcedureId, Stmt,
};
pub use program::{LabelEntry, ProcedureDef, Program, ProgramDef};
pub use thread::{CallFrame, Thread, ThreadId, ThreadStatus};
pub use values::Val;
