use std::collections::HashMap;
use std::io;

use nix::unistd::{geteuid, Uid, User};
use psutil::process::{processes, Process, ProcessError, Status};
use tracing::{debug, warn};

use super::ProcessTable;
use crate::core::models::ProcessRecord;
use crate::error::{EnumerationError, TerminateError};

pub const DEFAULT_PRIVILEGED_ACCOUNT: &str = "root";

/// Process table backed by `/proc` through psutil.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessTable;

impl SystemProcessTable {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessTable for SystemProcessTable {
    fn enumerate(&self) -> Vec<Result<ProcessRecord, EnumerationError>> {
        let entries = match processes() {
            Ok(entries) => entries,
            Err(err) => {
                warn!("process enumeration failed: {}", err);
                return Vec::new();
            }
        };

        let mut owners = OwnerNames::default();
        entries
            .into_iter()
            .map(|entry| {
                let process = entry.map_err(enumeration_error)?;
                read_record(&process, &mut owners)
            })
            .collect()
    }

    fn terminate(&self, pid: u32) -> Result<(), TerminateError> {
        // pid 0 and negative pids address process groups
        let c_pid = match libc::pid_t::try_from(pid) {
            Ok(c_pid) if c_pid > 0 => c_pid,
            _ => return Err(TerminateError::NoSuchProcess(pid)),
        };

        match send_signal(c_pid, libc::SIGTERM) {
            Ok(()) => {
                debug!(pid, "sent SIGTERM");
                Ok(())
            }
            Err(errno) if errno == libc::ESRCH => Err(TerminateError::NoSuchProcess(pid)),
            Err(errno) if errno == libc::EPERM => Err(TerminateError::AccessDenied(pid)),
            Err(errno) => Err(TerminateError::Os {
                pid,
                message: io::Error::from_raw_os_error(errno).to_string(),
            }),
        }
    }

    fn is_running(&self, pid: u32) -> bool {
        if !process_alive(pid) {
            return false;
        }
        // A zombie has exited; only its parent can reap it.
        match Process::new(pid) {
            Ok(process) => !matches!(process.status(), Ok(Status::Zombie)),
            Err(_) => false,
        }
    }
}

/// Name of the account running this program (effective uid).
pub fn current_user() -> String {
    let uid = geteuid();
    match User::from_uid(uid) {
        Ok(Some(user)) => user.name,
        Ok(None) | Err(_) => std::env::var("USER").unwrap_or_else(|_| uid.to_string()),
    }
}

fn read_record(
    process: &Process,
    owners: &mut OwnerNames,
) -> Result<ProcessRecord, EnumerationError> {
    let pid = process.pid();
    let name = process.name().map_err(enumeration_error)?;
    let owner = match owner_uid(pid) {
        Ok(uid) => uid.map(|uid| owners.resolve(uid)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(EnumerationError::NoSuchProcess(pid));
        }
        Err(_) => None,
    };
    Ok(ProcessRecord::new(pid, name, owner))
}

#[cfg(target_os = "linux")]
fn owner_uid(pid: u32) -> io::Result<Option<u32>> {
    use std::os::unix::fs::MetadataExt;

    let metadata = std::fs::metadata(format!("/proc/{}", pid))?;
    Ok(Some(metadata.uid()))
}

#[cfg(not(target_os = "linux"))]
fn owner_uid(_pid: u32) -> io::Result<Option<u32>> {
    Ok(None)
}

/// uid to account name, memoised for one enumeration pass.
#[derive(Default)]
struct OwnerNames {
    names: HashMap<u32, String>,
}

impl OwnerNames {
    fn resolve(&mut self, uid: u32) -> String {
        self.names
            .entry(uid)
            .or_insert_with(|| match User::from_uid(Uid::from_raw(uid)) {
                Ok(Some(user)) => user.name,
                // No passwd entry: fall back to the numeric id
                Ok(None) | Err(_) => uid.to_string(),
            })
            .clone()
    }
}

fn enumeration_error(err: ProcessError) -> EnumerationError {
    match err {
        ProcessError::NoSuchProcess { pid } => EnumerationError::NoSuchProcess(pid),
        ProcessError::ZombieProcess { pid } => EnumerationError::ZombieProcess(pid),
        ProcessError::AccessDenied { pid } => EnumerationError::AccessDenied(pid),
        ProcessError::PsutilError { pid, .. } => EnumerationError::AccessDenied(pid),
    }
}

/// Check if process exists. EPERM means it exists but belongs to someone else.
fn process_alive(pid: u32) -> bool {
    match libc::pid_t::try_from(pid) {
        Ok(c_pid) if c_pid > 0 => match send_signal(c_pid, 0) {
            Ok(()) => true,
            Err(errno) => errno == libc::EPERM,
        },
        _ => false,
    }
}

/// Encapsulates the unsafe kill call and returns errno on failure
fn send_signal(pid: libc::pid_t, signal: libc::c_int) -> Result<(), libc::c_int> {
    let result = unsafe { libc::kill(pid, signal) };
    if result == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error().raw_os_error().unwrap_or(0))
    }
}
