//! Error types for procwarden
//!
//! Every failure in this crate is recoverable. Enumeration errors only ever
//! drop a single record, termination errors are shown to the operator, and
//! configuration errors fall back to defaults.

use std::time::Duration;
use thiserror::Error;

/// Failure while reading a single record during one enumeration pass.
///
/// The pass itself never fails because of these; the record is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnumerationError {
    #[error("access denied (pid={0})")]
    AccessDenied(u32),

    #[error("process no longer exists (pid={0})")]
    NoSuchProcess(u32),

    #[error("process is a zombie (pid={0})")]
    ZombieProcess(u32),
}

impl EnumerationError {
    pub fn pid(&self) -> u32 {
        match self {
            EnumerationError::AccessDenied(pid)
            | EnumerationError::NoSuchProcess(pid)
            | EnumerationError::ZombieProcess(pid) => *pid,
        }
    }
}

/// Failure of a termination request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TerminateError {
    #[error("process no longer exists (pid={0})")]
    NoSuchProcess(u32),

    #[error("access denied (pid={0})")]
    AccessDenied(u32),

    #[error("timeout after {} seconds (pid={pid})", timeout.as_secs_f64())]
    Timeout { pid: u32, timeout: Duration },

    #[error("{message} (pid={pid})")]
    Os { pid: u32, message: String },
}

impl TerminateError {
    pub fn pid(&self) -> u32 {
        match self {
            TerminateError::NoSuchProcess(pid) | TerminateError::AccessDenied(pid) => *pid,
            TerminateError::Timeout { pid, .. } | TerminateError::Os { pid, .. } => *pid,
        }
    }

    /// Short machine-friendly category, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TerminateError::NoSuchProcess(_) => "no_such_process",
            TerminateError::AccessDenied(_) => "access_denied",
            TerminateError::Timeout { .. } => "timeout",
            TerminateError::Os { .. } => "os",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot find home directory")]
    HomeNotFound,

    #[error("Config I/O error: {message}")]
    Io { message: String },

    #[error("Invalid config file format: {message}")]
    InvalidFormat { message: String },
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io {
            message: err.to_string(),
        }
    }
}
