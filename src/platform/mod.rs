//! OS process table boundary
//!
//! Enumeration, termination and identity resolution live behind the
//! [`ProcessTable`] trait so the view controller never touches the OS
//! directly.
//!
//! Platform strategy:
//! - Unix: psutil for enumeration, libc signals for termination, nix for
//!   user lookups
//! - Windows: sysinfo

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::core::models::ProcessRecord;
use crate::error::{EnumerationError, TerminateError};

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::{current_user, SystemProcessTable, DEFAULT_PRIVILEGED_ACCOUNT};
#[cfg(windows)]
pub use windows::{current_user, SystemProcessTable, DEFAULT_PRIVILEGED_ACCOUNT};

/// Poll interval used while waiting for a terminated process to exit.
pub const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Access to the operating system's process table.
pub trait ProcessTable {
    /// One full enumeration pass. Per-record failures are returned in place.
    fn enumerate(&self) -> Vec<Result<ProcessRecord, EnumerationError>>;

    /// Ask the process to terminate. Does not wait for it to exit.
    fn terminate(&self, pid: u32) -> Result<(), TerminateError>;

    /// Whether the process still exists and has not exited.
    fn is_running(&self, pid: u32) -> bool;
}

impl<T: ProcessTable + ?Sized> ProcessTable for Box<T> {
    fn enumerate(&self) -> Vec<Result<ProcessRecord, EnumerationError>> {
        (**self).enumerate()
    }

    fn terminate(&self, pid: u32) -> Result<(), TerminateError> {
        (**self).terminate(pid)
    }

    fn is_running(&self, pid: u32) -> bool {
        (**self).is_running(pid)
    }
}

/// Take a snapshot, silently dropping records that could not be read.
pub fn snapshot<T: ProcessTable + ?Sized>(table: &T) -> Vec<ProcessRecord> {
    let mut skipped = 0usize;
    let records: Vec<ProcessRecord> = table
        .enumerate()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(record) => Some(record),
            Err(err) => {
                trace!(pid = err.pid(), "skipping process: {}", err);
                skipped += 1;
                None
            }
        })
        .collect();
    debug!(count = records.len(), skipped, "process snapshot taken");
    records
}

/// Block until `pid` is gone or `timeout` elapses.
pub fn wait_for_exit<T: ProcessTable + ?Sized>(
    table: &T,
    pid: u32,
    timeout: Duration,
) -> Result<(), TerminateError> {
    // A timeout too large to represent as an instant waits without bound.
    let deadline = Instant::now().checked_add(timeout);
    loop {
        if !table.is_running(pid) {
            return Ok(());
        }
        let pause = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return Err(TerminateError::Timeout { pid, timeout });
                }
                EXIT_POLL_INTERVAL.min(deadline - now)
            }
            None => EXIT_POLL_INTERVAL,
        };
        thread::sleep(pause);
    }
}

/// Send the termination request and wait for confirmed exit.
pub fn terminate_and_wait<T: ProcessTable + ?Sized>(
    table: &T,
    pid: u32,
    timeout: Duration,
) -> Result<(), TerminateError> {
    table.terminate(pid)?;
    wait_for_exit(table, pid, timeout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct StubTable {
        polls_until_exit: Cell<u32>,
    }

    impl ProcessTable for StubTable {
        fn enumerate(&self) -> Vec<Result<ProcessRecord, EnumerationError>> {
            vec![
                Ok(ProcessRecord::new(1, "init", Some("root".into()))),
                Err(EnumerationError::AccessDenied(2)),
                Err(EnumerationError::NoSuchProcess(3)),
                Ok(ProcessRecord::new(4, "bash", None)),
                Err(EnumerationError::ZombieProcess(5)),
            ]
        }

        fn terminate(&self, _pid: u32) -> Result<(), TerminateError> {
            Ok(())
        }

        fn is_running(&self, _pid: u32) -> bool {
            let left = self.polls_until_exit.get();
            if left == 0 {
                false
            } else {
                self.polls_until_exit.set(left - 1);
                true
            }
        }
    }

    #[test]
    fn snapshot_skips_unreadable_records() {
        let table = StubTable {
            polls_until_exit: Cell::new(0),
        };
        let pids: Vec<u32> = snapshot(&table).iter().map(|r| r.pid).collect();
        assert_eq!(pids, vec![1, 4]);
    }

    #[test]
    fn wait_for_exit_returns_once_process_is_gone() {
        let table = StubTable {
            polls_until_exit: Cell::new(2),
        };
        assert_eq!(wait_for_exit(&table, 10, Duration::from_secs(3)), Ok(()));
    }

    #[test]
    fn wait_for_exit_times_out() {
        let table = StubTable {
            polls_until_exit: Cell::new(u32::MAX),
        };
        let timeout = Duration::from_millis(120);
        assert_eq!(
            terminate_and_wait(&table, 10, timeout),
            Err(TerminateError::Timeout { pid: 10, timeout })
        );
    }

    #[test]
    fn wait_for_exit_accepts_unrepresentable_timeout() {
        let table = StubTable {
            polls_until_exit: Cell::new(1),
        };
        assert_eq!(
            terminate_and_wait(&table, 7, Duration::from_secs(u64::MAX)),
            Ok(())
        );
        assert_eq!(wait_for_exit(&table, 7, Duration::MAX), Ok(()));
    }
}
