use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, Signal, System, UpdateKind, Users};
use tracing::debug;

use super::ProcessTable;
use crate::core::models::ProcessRecord;
use crate::error::{EnumerationError, TerminateError};

pub const DEFAULT_PRIVILEGED_ACCOUNT: &str = "SYSTEM";

/// Process table backed by sysinfo.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessTable;

impl SystemProcessTable {
    pub fn new() -> Self {
        Self
    }

    fn system_for(pids: ProcessesToUpdate<'_>) -> System {
        let mut system = System::new();
        system.refresh_processes_specifics(
            pids,
            true,
            ProcessRefreshKind::new().with_user(UpdateKind::Always),
        );
        system
    }
}

impl ProcessTable for SystemProcessTable {
    fn enumerate(&self) -> Vec<Result<ProcessRecord, EnumerationError>> {
        let system = Self::system_for(ProcessesToUpdate::All);
        let users = Users::new_with_refreshed_list();
        system
            .processes()
            .iter()
            .map(|(pid, process)| {
                let owner = process
                    .user_id()
                    .and_then(|uid| users.get_user_by_id(uid))
                    .map(|user| user.name().to_string());
                Ok(ProcessRecord::new(
                    pid.as_u32(),
                    process.name().to_string_lossy().into_owned(),
                    owner,
                ))
            })
            .collect()
    }

    fn terminate(&self, pid: u32) -> Result<(), TerminateError> {
        let sys_pid = Pid::from_u32(pid);
        let system = Self::system_for(ProcessesToUpdate::Some(&[sys_pid]));
        let process = system
            .process(sys_pid)
            .ok_or(TerminateError::NoSuchProcess(pid))?;

        // Windows has no SIGTERM; kill_with returns None and we fall back.
        let sent = process
            .kill_with(Signal::Term)
            .unwrap_or_else(|| process.kill());
        if sent {
            debug!(pid, "termination requested");
            Ok(())
        } else {
            Err(TerminateError::AccessDenied(pid))
        }
    }

    fn is_running(&self, pid: u32) -> bool {
        let sys_pid = Pid::from_u32(pid);
        Self::system_for(ProcessesToUpdate::Some(&[sys_pid]))
            .process(sys_pid)
            .is_some()
    }
}

/// Name of the account running this program.
pub fn current_user() -> String {
    std::env::var("USERNAME").unwrap_or_else(|_| "unknown".to_string())
}
