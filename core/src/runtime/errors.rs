//! Runtime error types
//!
//! Everything here is an internal error: well-formed compiler output never
//! produces one. User-level mistakes (bad list indices, unparsable numbers)
//! resolve to default values instead and never reach this type.

use super::target::TargetId;
use super::types::{LabelId, MarkerId, ProcedureId, ThreadId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("unknown procedure {0}")]
    UnknownProcedure(ProcedureId),

    #[error("unknown label {0}")]
    UnknownLabel(LabelId),

    #[error("marker {marker} not found in fragment for label {source_label}")]
    MissingMarker {
        source_label: LabelId,
        marker: MarkerId,
    },

    #[error("continuation label {0} has a cyclic source chain")]
    ContinuationCycle(LabelId),

    #[error("unknown target {0}")]
    UnknownTarget(TargetId),

    #[error("thread {0} is retired")]
    ThreadRetired(ThreadId),

    #[error("unknown I/O device '{0}'")]
    UnknownDevice(String),

    #[error("I/O device '{device}' failed: {source}")]
    Io {
        device: String,
        #[source]
        source: IoError,
    },
}

#[derive(Debug, Error)]
pub enum IoError {
    #[error("unknown method '{0}'")]
    UnknownMethod(String),

    #[error("{0}")]
    Device(String),
}
