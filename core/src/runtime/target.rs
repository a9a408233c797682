//! Targets: the actors threads run on
//!
//! A target owns the state block implementations mutate: position, graphic
//! effects, variables and lists. Rendering those changes is someone else's
//! job; the runtime only records them.

use super::lists::List;
use super::types::{Effect, Val};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(pub usize);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub effects: BTreeMap<Effect, f64>,
    #[serde(default)]
    pub variables: HashMap<String, Val>,
    #[serde(default)]
    pub lists: HashMap<String, List>,
}

impl Target {
    pub fn new(name: impl Into<String>) -> Self {
        Target {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn effect(&self, effect: Effect) -> f64 {
        self.effects.get(&effect).copied().unwrap_or(0.0)
    }

    pub fn set_effect(&mut self, effect: Effect, value: f64) {
        self.effects.insert(effect, value);
    }

    pub fn change_effect(&mut self, effect: Effect, delta: f64) {
        self.set_effect(effect, self.effect(effect) + delta);
    }

    pub fn set_xy(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Unset variables read as 0
    pub fn variable(&self, name: &str) -> Val {
        self.variables.get(name).cloned().unwrap_or(Val::Num(0.0))
    }

    pub fn set_variable(&mut self, name: &str, value: Val) {
        self.variables.insert(name.to_string(), value);
    }

    pub fn list(&self, name: &str) -> Option<&List> {
        self.lists.get(name)
    }

    /// Look up a list, creating it empty on first use
    pub fn list_mut(&mut self, name: &str) -> &mut List {
        self.lists.entry(name.to_string()).or_default()
    }
}
