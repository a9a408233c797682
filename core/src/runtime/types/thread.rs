//! Thread and call-frame types
//!
//! A thread is one independently scheduled script instance. All of its
//! resumable state is explicit: the label it resumes at, the warp depth and
//! the call stack. Nothing lives on the host stack between ticks.

use super::ast::LabelId;
use super::program::Program;
use super::values::Val;
use crate::runtime::target::TargetId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(pub u64);

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadStatus {
    Running,
    Suspended,
    Retired,
}

/// One outstanding procedure call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallFrame {
    pub args: Vec<Val>,
    /// Label to continue at in the caller once the procedure ends
    pub resume: LabelId,
    /// Whether entering this call incremented the warp depth
    pub warped: bool,
}

#[derive(Debug, Clone)]
pub struct Thread {
    pub id: ThreadId,
    pub target: TargetId,
    pub program: Arc<Program>,
    /// Label run on the next step; `None` means the thread will retire
    pub fragment: Option<LabelId>,
    /// Nonzero while executing atomically
    pub warp: u32,
    pub call_stack: Vec<CallFrame>,
    pub status: ThreadStatus,
}

impl Thread {
    pub fn new(id: ThreadId, target: TargetId, program: Arc<Program>) -> Self {
        let entry = program.entry();
        Thread {
            id,
            target,
            program,
            fragment: Some(entry),
            warp: 0,
            call_stack: Vec::new(),
            status: ThreadStatus::Suspended,
        }
    }

    pub fn is_warp(&self) -> bool {
        self.warp > 0
    }

    pub fn is_retired(&self) -> bool {
        self.status == ThreadStatus::Retired
    }

    /// Move to the terminal state, dropping every resume point
    pub fn mark_retired(&mut self) {
        self.status = ThreadStatus::Retired;
        self.fragment = None;
        self.call_stack.clear();
        self.warp = 0;
    }

    /// Arguments of the innermost outstanding call
    pub fn args(&self) -> &[Val] {
        self.call_stack
            .last()
            .map(|frame| frame.args.as_slice())
            .unwrap_or(&[])
    }
}
