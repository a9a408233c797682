//! Continuation synthesis
//!
//! Fragments are compiled once, ahead of time. When a script yields inside
//! nested conditionals, the compiler leaves a `Marker` at the point where it
//! must pick up again and registers a continuation label for it. The first
//! time that label is reached, the runtime derives the continuation here:
//! the code that still has to run after the marker, with every branch that
//! was already decided taken out.
//!
//! ```text
//! if c {            // source fragment
//!     A
//!     yield L1      // JumpLazy L1 + Marker M1
//!     B
//! } else {
//!     C
//! }
//! D
//! ```
//!
//! The continuation for `M1` is `B; D`. Neither `A` (already executed) nor
//! `C` (the branch not taken) can run again.
//!
//! Walking outwards from the marker, each enclosing `If` is settled: the
//! rest of the taken arm is kept, both alternatives are dropped and the
//! statements after the `If` follow. Else-if chains are `If` nodes nested in
//! `else_s` and settle the same way, one level at a time. Conditionals that
//! appear after the marker have not run yet and are copied whole.

use super::types::{Fragment, MarkerId, Stmt};

/// Build the fragment that resumes `source` right after `marker`
///
/// Returns `None` if the marker does not occur in `source`.
pub fn synthesize(source: &Fragment, marker: MarkerId) -> Option<Fragment> {
    let mut body = Vec::new();
    resume_after(&source.body, marker, &mut body)?;
    Some(Fragment::new(body))
}

/// Append what runs after `marker` inside `block` to `out`
///
/// Returns `None` if the marker is not in `block`, otherwise whether the
/// appended code ends with a control transfer (nothing after it can run).
fn resume_after(block: &[Stmt], marker: MarkerId, out: &mut Vec<Stmt>) -> Option<bool> {
    for (i, stmt) in block.iter().enumerate() {
        let found = match stmt {
            Stmt::Marker { id } if *id == marker => Some(false),
            Stmt::If { then_s, else_s, .. } => resume_after(then_s, marker, out)
                .or_else(|| resume_after(else_s, marker, out)),
            _ => None,
        };

        match found {
            Some(true) => return Some(true),
            Some(false) => return Some(copy_reachable(&block[i + 1..], out)),
            None => {}
        }
    }
    None
}

/// Copy statements up to and including the first terminator
fn copy_reachable(stmts: &[Stmt], out: &mut Vec<Stmt>) -> bool {
    for stmt in stmts {
        out.push(stmt.clone());
        if stmt.is_terminator() {
            return true;
        }
    }
    false
}
