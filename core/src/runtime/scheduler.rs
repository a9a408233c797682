//! Reference scheduler
//!
//! Owns targets, threads and the I/O registry and steps every active thread
//! once per tick, in the order the threads were started. A thread whose step
//! fails with an internal error is retired on the spot; retired threads leave
//! the active set when the tick ends.

use super::context::{ExecContext, RetiredThreads, Sequencer};
use super::errors::ExecError;
use super::exec_loop::step;
use super::io::IoRegistry;
use super::target::{Target, TargetId};
use super::types::{Program, Thread, ThreadId};
use crate::config::SchedulerConfig;
use std::sync::Arc;
use tracing::{debug, error};

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub stepped: usize,
    pub retired: Vec<ThreadId>,
    pub failed: Vec<ThreadId>,
}

#[derive(Debug)]
pub struct Scheduler {
    config: SchedulerConfig,
    targets: Vec<Target>,
    threads: Vec<Thread>,
    io: IoRegistry,
    next_thread_id: u64,
    ticks: u64,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Scheduler {
            config,
            targets: Vec::new(),
            threads: Vec::new(),
            io: IoRegistry::with_builtins(),
            next_thread_id: 1,
            ticks: 0,
        }
    }

    pub fn with_io(mut self, io: IoRegistry) -> Self {
        self.io = io;
        self
    }

    pub fn io_mut(&mut self) -> &mut IoRegistry {
        &mut self.io
    }

    pub fn add_target(&mut self, target: Target) -> TargetId {
        self.targets.push(target);
        TargetId(self.targets.len() - 1)
    }

    pub fn target(&self, id: TargetId) -> Option<&Target> {
        self.targets.get(id.0)
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Start a script on a target; it first runs on the next tick
    pub fn start_script(
        &mut self,
        target: TargetId,
        program: Arc<Program>,
    ) -> Result<ThreadId, ExecError> {
        if self.target(target).is_none() {
            return Err(ExecError::UnknownTarget(target));
        }
        let id = ThreadId(self.next_thread_id);
        self.next_thread_id += 1;
        debug!(thread = %id, %target, "Starting script");
        self.threads.push(Thread::new(id, target, program));
        Ok(id)
    }

    pub fn thread(&self, id: ThreadId) -> Option<&Thread> {
        self.threads.iter().find(|t| t.id == id)
    }

    pub fn active_threads(&self) -> usize {
        self.threads.len()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Step every active thread once
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        let mut retired = RetiredThreads::default();

        for thread in self.threads.iter_mut() {
            let id = thread.id;
            report.stepped += 1;

            let result = match self.targets.get_mut(thread.target.0) {
                Some(target) => {
                    let mut ctx = ExecContext::new(thread, target, &mut self.io, &mut retired)
                        .with_transfer_limit(self.config.max_transfers_per_step);
                    step(&mut ctx)
                }
                None => Err(ExecError::UnknownTarget(thread.target)),
            };

            if let Err(err) = result {
                error!(thread = %id, error = %err, "Thread failed, retiring");
                report.failed.push(id);
                if !thread.is_retired() {
                    thread.mark_retired();
                    retired.retire_thread(id);
                }
            }
        }

        report.retired = retired.ids;
        self.threads.retain(|t| !t.is_retired());
        self.ticks += 1;
        report
    }

    /// Tick until no threads remain or `max_ticks` is reached
    ///
    /// Returns the number of ticks run.
    pub fn run_until_idle(&mut self, max_ticks: u64) -> u64 {
        let mut ran = 0;
        while ran < max_ticks && !self.threads.is_empty() {
            self.tick();
            ran += 1;
        }
        ran
    }
}
