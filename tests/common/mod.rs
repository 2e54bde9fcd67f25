//! In-memory process table shared by the integration tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::time::Duration;

use procwarden::{
    EnumerationError, ProcessRecord, ProcessTable, SessionContext, TerminateError,
    ViewController,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Exits as soon as it is asked to terminate
    Exits,
    /// Accepts the signal but keeps running
    IgnoresTerm,
    /// Owned by someone we may not signal
    Protected,
}

#[derive(Debug, Clone)]
struct FakeProcess {
    record: ProcessRecord,
    behavior: Behavior,
}

#[derive(Default)]
pub struct FakeProcessTable {
    processes: RefCell<Vec<FakeProcess>>,
    unreadable: Vec<EnumerationError>,
    enumerations: Cell<usize>,
}

impl FakeProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, pid: u32, name: &str, owner: Option<&str>) -> Self {
        self.with_behavior(pid, name, owner, Behavior::Exits)
    }

    pub fn with_behavior(
        self,
        pid: u32,
        name: &str,
        owner: Option<&str>,
        behavior: Behavior,
    ) -> Self {
        self.processes.borrow_mut().push(FakeProcess {
            record: ProcessRecord::new(pid, name, owner.map(str::to_string)),
            behavior,
        });
        self
    }

    pub fn with_unreadable(mut self, err: EnumerationError) -> Self {
        self.unreadable.push(err);
        self
    }

    /// Simulate a process starting between two passes.
    pub fn spawn(&self, pid: u32, name: &str, owner: Option<&str>) {
        self.processes.borrow_mut().push(FakeProcess {
            record: ProcessRecord::new(pid, name, owner.map(str::to_string)),
            behavior: Behavior::Exits,
        });
    }

    pub fn enumerations(&self) -> usize {
        self.enumerations.get()
    }
}

impl ProcessTable for FakeProcessTable {
    fn enumerate(&self) -> Vec<Result<ProcessRecord, EnumerationError>> {
        self.enumerations.set(self.enumerations.get() + 1);
        let mut entries: Vec<Result<ProcessRecord, EnumerationError>> = self
            .processes
            .borrow()
            .iter()
            .map(|p| Ok(p.record.clone()))
            .collect();
        entries.extend(self.unreadable.iter().cloned().map(Err));
        entries
    }

    fn terminate(&self, pid: u32) -> Result<(), TerminateError> {
        let mut processes = self.processes.borrow_mut();
        let idx = processes
            .iter()
            .position(|p| p.record.pid == pid)
            .ok_or(TerminateError::NoSuchProcess(pid))?;
        match processes[idx].behavior {
            Behavior::Exits => {
                processes.remove(idx);
                Ok(())
            }
            Behavior::IgnoresTerm => Ok(()),
            Behavior::Protected => Err(TerminateError::AccessDenied(pid)),
        }
    }

    fn is_running(&self, pid: u32) -> bool {
        self.processes.borrow().iter().any(|p| p.record.pid == pid)
    }
}

/// The three-process table used throughout: sshd (root), bash (alice),
/// nginx (www-data).
pub fn sample_table() -> FakeProcessTable {
    FakeProcessTable::new()
        .with(1, "sshd", Some("root"))
        .with(2, "bash", Some("alice"))
        .with(3, "nginx", Some("www-data"))
}

pub fn alice() -> SessionContext {
    SessionContext::new("alice", "root")
}

pub fn controller(table: FakeProcessTable) -> ViewController<FakeProcessTable> {
    ViewController::new(table, alice(), Duration::from_millis(200))
}

pub fn names(records: &[ProcessRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}
