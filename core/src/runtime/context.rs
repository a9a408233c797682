//! Per-step execution context
//!
//! Everything a fragment may touch during one `step` is borrowed here: the
//! thread being stepped, its target, the I/O registry and the sequencer that
//! receives retirement notices. A fresh context is built for every step, so
//! no thread/target binding survives from one step to the next.

use super::io::IoRegistry;
use super::target::Target;
use super::types::{LabelId, Thread, ThreadId};

/// Receives retirement notices from threads
pub trait Sequencer {
    fn retire_thread(&mut self, thread: ThreadId);
}

/// Collects retired thread ids for the scheduler to remove after a tick
#[derive(Debug, Default)]
pub struct RetiredThreads {
    pub ids: Vec<ThreadId>,
}

impl Sequencer for RetiredThreads {
    fn retire_thread(&mut self, thread: ThreadId) {
        self.ids.push(thread);
    }
}

/// Result of stepping a thread once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Waiting for the next tick at its stored fragment
    Suspended,
    /// Finished; must not be stepped again
    Retired,
}

pub struct ExecContext<'a> {
    pub thread: &'a mut Thread,
    pub target: &'a mut Target,
    pub io: &'a mut IoRegistry,
    pub sequencer: &'a mut dyn Sequencer,
    /// Label to run as soon as the current fragment returns
    pub(crate) immediate: Option<LabelId>,
    pub(crate) transfer_limit: Option<usize>,
}

impl<'a> ExecContext<'a> {
    pub fn new(
        thread: &'a mut Thread,
        target: &'a mut Target,
        io: &'a mut IoRegistry,
        sequencer: &'a mut dyn Sequencer,
    ) -> Self {
        ExecContext {
            thread,
            target,
            io,
            sequencer,
            immediate: None,
            transfer_limit: None,
        }
    }

    /// Cap the number of immediate jumps drained in one step
    pub fn with_transfer_limit(mut self, limit: Option<usize>) -> Self {
        self.transfer_limit = limit;
        self
    }

    /// Label queued by the last synchronous jump, if any
    pub fn immediate(&self) -> Option<LabelId> {
        self.immediate
    }
}
