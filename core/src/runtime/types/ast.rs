//! Fragment IR node types
//!
//! The compiler front-end emits scripts as trees of these nodes. A fragment
//! is a zero-argument unit of compiled code that acts on the current
//! thread/target context; control leaves a fragment only through one of the
//! transfer statements (`Jump`, `JumpLazy`, `Call`, `End`, `Retire`).

use super::values::Val;
use serde::{Deserialize, Serialize};
use std::fmt;

/* ===================== Identifiers ===================== */

/// Index of an entry in a program's jump table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelId(pub u32);

/// Index of an entry in a program's procedure table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcedureId(pub u32);

/// Resume point left in a fragment where execution may later continue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(pub u32);

impl LabelId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ProcedureId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

impl fmt::Display for ProcedureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{}", self.0)
    }
}

/* ===================== Fragments ===================== */

/// A callable unit of compiled script code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub body: Vec<Stmt>,
}

impl Fragment {
    pub fn new(body: Vec<Stmt>) -> Self {
        Fragment { body }
    }
}

/// Graphic effects a target can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Color,
    Fisheye,
    Whirl,
    Pixelate,
    Mosaic,
    Brightness,
    Ghost,
}

/* ===================== Statements ===================== */

/// Statement IR node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Stmt {
    If {
        test: Expr,
        then_s: Vec<Stmt>,
        #[serde(default)]
        else_s: Vec<Stmt>,
    },
    SetVariable {
        name: String,
        value: Expr,
    },
    ChangeVariable {
        name: String,
        by: Expr,
    },
    AddToList {
        list: String,
        value: Expr,
    },
    ReplaceItem {
        list: String,
        index: Expr,
        value: Expr,
    },
    InsertAt {
        list: String,
        index: Expr,
        value: Expr,
    },
    DeleteOf {
        list: String,
        index: Expr,
    },
    SetEffect {
        effect: Effect,
        value: Expr,
    },
    ChangeEffect {
        effect: Effect,
        by: Expr,
    },
    GoToXY {
        x: Expr,
        y: Expr,
    },
    IoCall {
        device: String,
        method: String,
        #[serde(default)]
        args: Vec<Expr>,
    },
    Jump {
        label: LabelId,
    },
    JumpLazy {
        label: LabelId,
    },
    Call {
        procedure: ProcedureId,
        #[serde(default)]
        args: Vec<Expr>,
        resume: LabelId,
    },
    End,
    Retire,
    Marker {
        id: MarkerId,
    },
}

impl Stmt {
    /// Whether control leaves the fragment after this statement
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Stmt::Jump { .. } | Stmt::JumpLazy { .. } | Stmt::Call { .. } | Stmt::End | Stmt::Retire
        )
    }
}

/* ===================== Expressions ===================== */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Eq,
    Lt,
    Gt,
}

/// Explicit casts the compiler inserts around inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastKind {
    Number,
    NotNan,
    Boolean,
    String,
}

/// Expression IR node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Expr {
    Lit {
        v: Val,
    },
    Var {
        name: String,
    },
    Arg {
        index: usize,
    },
    ItemOfList {
        list: String,
        index: Box<Expr>,
    },
    LengthOfList {
        list: String,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    And {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Or {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Not {
        inner: Box<Expr>,
    },
    Join {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Cast {
        to: CastKind,
        inner: Box<Expr>,
    },
    IoQuery {
        device: String,
        method: String,
        #[serde(default)]
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn lit(v: impl Into<Val>) -> Self {
        Expr::Lit { v: v.into() }
    }
}
