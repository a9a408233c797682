//! Compiled program tables
//!
//! A program is what the compiler front-end hands to the runtime: a jump
//! table of labeled fragments, a procedure table and an entry label. All of
//! it is immutable once built, except for the per-label cache that holds
//! continuations synthesized on first use.

use super::ast::{Fragment, LabelId, MarkerId, ProcedureId};
use crate::runtime::continuation;
use crate::runtime::errors::ExecError;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// One entry of the jump table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum LabelEntry {
    /// A fragment emitted ahead of time by the compiler
    Fragment { body: Vec<super::ast::Stmt> },
    /// The remainder of `source` after `marker`, synthesized lazily
    Continuation { source: LabelId, marker: MarkerId },
}

/// Procedure definition: where it starts and whether it runs atomically
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureDef {
    #[serde(default)]
    pub name: String,
    pub label: LabelId,
    #[serde(default)]
    pub warp: bool,
}

/// Serialized form of a program
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramDef {
    pub entry: LabelId,
    pub labels: Vec<LabelEntry>,
    #[serde(default)]
    pub procedures: Vec<ProcedureDef>,
}

#[derive(Debug, Deserialize)]
#[serde(from = "ProgramDef")]
pub struct Program {
    entry: LabelId,
    labels: Vec<LabelEntry>,
    procedures: Vec<ProcedureDef>,
    resolved: Vec<OnceLock<Arc<Fragment>>>,
}

impl From<ProgramDef> for Program {
    fn from(def: ProgramDef) -> Self {
        Program::new(def.entry, def.labels, def.procedures)
    }
}

impl Program {
    pub fn new(entry: LabelId, labels: Vec<LabelEntry>, procedures: Vec<ProcedureDef>) -> Self {
        let resolved = labels.iter().map(|_| OnceLock::new()).collect();
        Program {
            entry,
            labels,
            procedures,
            resolved,
        }
    }

    pub fn entry(&self) -> LabelId {
        self.entry
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn procedure(&self, id: ProcedureId) -> Result<&ProcedureDef, ExecError> {
        self.procedures
            .get(id.index())
            .ok_or(ExecError::UnknownProcedure(id))
    }

    /// Resolve a label to its executable fragment
    ///
    /// Compiled fragments are returned as-is. Continuation labels are
    /// synthesized from their source fragment the first time they are
    /// resolved and served from the cache afterwards.
    pub fn fragment(&self, label: LabelId) -> Result<Arc<Fragment>, ExecError> {
        self.resolve(label, &mut Vec::new())
    }

    /// `pending` holds the continuation labels whose sources are being
    /// resolved; meeting one of them again means the chain never reaches a
    /// compiled fragment.
    fn resolve(
        &self,
        label: LabelId,
        pending: &mut Vec<LabelId>,
    ) -> Result<Arc<Fragment>, ExecError> {
        let (entry, cell) = self
            .labels
            .get(label.index())
            .zip(self.resolved.get(label.index()))
            .ok_or(ExecError::UnknownLabel(label))?;

        if let Some(fragment) = cell.get() {
            return Ok(Arc::clone(fragment));
        }

        let built = match entry {
            LabelEntry::Fragment { body } => Fragment::new(body.clone()),
            LabelEntry::Continuation { source, marker } => {
                if pending.contains(&label) {
                    return Err(ExecError::ContinuationCycle(label));
                }
                pending.push(label);
                let source_fragment = self.resolve(*source, pending)?;
                pending.pop();
                let synthesized = continuation::synthesize(&source_fragment, *marker).ok_or(
                    ExecError::MissingMarker {
                        source_label: *source,
                        marker: *marker,
                    },
                )?;
                debug!(
                    %label,
                    %source,
                    %marker,
                    statements = synthesized.body.len(),
                    "Synthesized continuation"
                );
                synthesized
            }
        };

        Ok(Arc::clone(cell.get_or_init(|| Arc::new(built))))
    }

    /// Whether a label's fragment has already been built
    pub fn is_resolved(&self, label: LabelId) -> bool {
        self.resolved
            .get(label.index())
            .is_some_and(|cell| cell.get().is_some())
    }
}
