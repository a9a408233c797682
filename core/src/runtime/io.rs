//! I/O device registry
//!
//! Fragments reach devices by name and call them by method name with an
//! argument list. Calls are synchronous from the runtime's point of view; a
//! device that needs more time must arrange that on its own.

use super::errors::{ExecError, IoError};
use super::types::Val;
use std::collections::HashMap;
use std::time::Instant;

pub trait IoDevice: Send {
    fn call(&mut self, method: &str, args: &[Val]) -> Result<Val, IoError>;
}

#[derive(Default)]
pub struct IoRegistry {
    devices: HashMap<String, Box<dyn IoDevice>>,
}

impl IoRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in devices installed
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("clock", ClockDevice::new());
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, device: impl IoDevice + 'static) {
        self.devices.insert(name.into(), Box::new(device));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.devices.contains_key(name)
    }

    pub fn query(&mut self, device: &str, method: &str, args: &[Val]) -> Result<Val, ExecError> {
        let dev = self
            .devices
            .get_mut(device)
            .ok_or_else(|| ExecError::UnknownDevice(device.to_string()))?;
        dev.call(method, args).map_err(|source| ExecError::Io {
            device: device.to_string(),
            source,
        })
    }
}

impl std::fmt::Debug for IoRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.devices.keys().collect();
        names.sort();
        f.debug_struct("IoRegistry").field("devices", &names).finish()
    }
}

/* ===================== Built-in devices ===================== */

/// Monotonic stopwatch
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    started: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Timer {
            started: Instant::now(),
        }
    }

    /// Milliseconds since the timer was started
    pub fn time_elapsed(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }
}

/// Project timer exposed to scripts as the `clock` device
#[derive(Debug)]
pub struct ClockDevice {
    timer: Timer,
}

impl ClockDevice {
    pub fn new() -> Self {
        ClockDevice {
            timer: Timer::start(),
        }
    }
}

impl Default for ClockDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl IoDevice for ClockDevice {
    fn call(&mut self, method: &str, _args: &[Val]) -> Result<Val, IoError> {
        match method {
            "projectTimer" => Ok(Val::Num(self.timer.time_elapsed() / 1000.0)),
            "resetProjectTimer" => {
                self.timer = Timer::start();
                Ok(Val::Null)
            }
            other => Err(IoError::UnknownMethod(other.to_string())),
        }
    }
}
