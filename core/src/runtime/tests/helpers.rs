//! Test helpers for runtime tests
//!
//! Small builders for fragment IR and a harness that owns everything a step
//! needs, so tests can drive a single thread without a scheduler.

use crate::runtime::context::{ExecContext, Sequencer, StepOutcome};
use crate::runtime::errors::ExecError;
use crate::runtime::exec_loop::step;
use crate::runtime::io::IoRegistry;
use crate::runtime::target::{Target, TargetId};
use crate::runtime::types::{
    Expr, LabelEntry, LabelId, MarkerId, ProcedureDef, Program, Stmt, Thread, ThreadId, Val,
};
use std::sync::Arc;

/* ===================== Harness ===================== */

/// Sequencer that records every retirement notice it receives
#[derive(Debug, Default)]
pub struct CountingSequencer {
    pub retired: Vec<ThreadId>,
}

impl Sequencer for CountingSequencer {
    fn retire_thread(&mut self, thread: ThreadId) {
        self.retired.push(thread);
    }
}

pub struct Harness {
    pub thread: Thread,
    pub target: Target,
    pub io: IoRegistry,
    pub sequencer: CountingSequencer,
}

impl Harness {
    pub fn new(program: Arc<Program>) -> Self {
        Harness {
            thread: Thread::new(ThreadId(1), TargetId(0), program),
            target: Target::new("Sprite1"),
            io: IoRegistry::with_builtins(),
            sequencer: CountingSequencer::default(),
        }
    }

    pub fn ctx(&mut self) -> ExecContext<'_> {
        ExecContext::new(
            &mut self.thread,
            &mut self.target,
            &mut self.io,
            &mut self.sequencer,
        )
    }

    pub fn step(&mut self) -> Result<StepOutcome, ExecError> {
        let mut ctx = self.ctx();
        step(&mut ctx)
    }

    pub fn step_limited(&mut self, limit: usize) -> Result<StepOutcome, ExecError> {
        let mut ctx = self.ctx().with_transfer_limit(Some(limit));
        step(&mut ctx)
    }

    pub fn var(&self, name: &str) -> Val {
        self.target.variable(name)
    }
}

/* ===================== Builders ===================== */

/// Program with entry label 0
pub fn program(labels: Vec<LabelEntry>, procedures: Vec<ProcedureDef>) -> Arc<Program> {
    Arc::new(Program::new(LabelId(0), labels, procedures))
}

pub fn program_from_json(json: &str) -> Arc<Program> {
    Arc::new(serde_json::from_str(json).expect("Program deserialization failed"))
}

pub fn fragment(body: Vec<Stmt>) -> LabelEntry {
    LabelEntry::Fragment { body }
}

pub fn continuation(source: u32, marker: u32) -> LabelEntry {
    LabelEntry::Continuation {
        source: LabelId(source),
        marker: MarkerId(marker),
    }
}

pub fn procedure(label: u32, warp: bool) -> ProcedureDef {
    ProcedureDef {
        name: format!("proc at {}", label),
        label: LabelId(label),
        warp,
    }
}

pub fn set(name: &str, value: impl Into<Val>) -> Stmt {
    Stmt::SetVariable {
        name: name.to_string(),
        value: Expr::lit(value),
    }
}

pub fn change(name: &str, by: f64) -> Stmt {
    Stmt::ChangeVariable {
        name: name.to_string(),
        by: Expr::lit(by),
    }
}

pub fn var(name: &str) -> Expr {
    Expr::Var {
        name: name.to_string(),
    }
}

pub fn if_else(test: Expr, then_s: Vec<Stmt>, else_s: Vec<Stmt>) -> Stmt {
    Stmt::If {
        test,
        then_s,
        else_s,
    }
}

pub fn jump(label: u32) -> Stmt {
    Stmt::Jump {
        label: LabelId(label),
    }
}

pub fn jump_lazy(label: u32) -> Stmt {
    Stmt::JumpLazy {
        label: LabelId(label),
    }
}

pub fn marker(id: u32) -> Stmt {
    Stmt::Marker { id: MarkerId(id) }
}

pub fn call(procedure: u32, args: Vec<Expr>, resume: u32) -> Stmt {
    Stmt::Call {
        procedure: crate::runtime::types::ProcedureId(procedure),
        args,
        resume: LabelId(resume),
    }
}
