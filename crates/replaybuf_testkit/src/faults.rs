//! Fault injection for spill stores.

use replaybuf_storage::{SpillStore, StorageError, StorageResult};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Switches controlling a [`FaultySpillStore`] after it has been moved into
/// a stream.
#[derive(Debug, Default)]
pub struct FaultSwitch {
    fail_append: AtomicBool,
    fail_read: AtomicBool,
    fail_remove: AtomicBool,
}

impl FaultSwitch {
    /// Sets whether appends fail (simulates a full disk).
    pub fn set_fail_append(&self, fail: bool) {
        self.fail_append.store(fail, Ordering::SeqCst);
    }

    /// Sets whether positional reads fail.
    pub fn set_fail_read(&self, fail: bool) {
        self.fail_read.store(fail, Ordering::SeqCst);
    }

    /// Sets whether removal fails.
    pub fn set_fail_remove(&self, fail: bool) {
        self.fail_remove.store(fail, Ordering::SeqCst);
    }

    /// Clears all faults.
    pub fn reset(&self) {
        self.set_fail_append(false);
        self.set_fail_read(false);
        self.set_fail_remove(false);
    }
}

fn simulated(what: &str) -> StorageError {
    StorageError::Io(io::Error::new(
        io::ErrorKind::Other,
        format!("simulated {what} failure"),
    ))
}

/// A spill store wrapper that fails on demand.
#[derive(Debug)]
pub struct FaultySpillStore<B> {
    inner: B,
    switch: Arc<FaultSwitch>,
}

impl<B: SpillStore> FaultySpillStore<B> {
    /// Wraps `inner`, returning the switch that controls it.
    pub fn new(inner: B) -> (Self, Arc<FaultSwitch>) {
        let switch = Arc::new(FaultSwitch::default());
        (
            Self {
                inner,
                switch: Arc::clone(&switch),
            },
            switch,
        )
    }

    /// Returns the wrapped store.
    pub fn inner(&self) -> &B {
        &self.inner
    }
}

impl<B: SpillStore> SpillStore for FaultySpillStore<B> {
    fn append(&mut self, data: &[u8]) -> StorageResult<u64> {
        if self.switch.fail_append.load(Ordering::SeqCst) {
            return Err(simulated("append"));
        }
        self.inner.append(data)
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> StorageResult<()> {
        if self.switch.fail_read.load(Ordering::SeqCst) {
            return Err(simulated("read"));
        }
        self.inner.read_at(offset, buf)
    }

    fn size(&self) -> StorageResult<u64> {
        self.inner.size()
    }

    fn remove(self) -> StorageResult<()> {
        let fail = self.switch.fail_remove.load(Ordering::SeqCst);
        self.inner.remove()?;
        if fail {
            return Err(simulated("remove"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replaybuf_storage::InMemorySpillStore;

    #[test]
    fn faults_toggle() {
        let (mut store, switch) = FaultySpillStore::new(InMemorySpillStore::new());
        store.append(b"ok").unwrap();

        switch.set_fail_append(true);
        assert!(store.append(b"no").is_err());
        assert_eq!(store.size().unwrap(), 2);

        switch.set_fail_read(true);
        let mut buf = [0u8; 2];
        assert!(store.read_at(0, &mut buf).is_err());

        switch.reset();
        store.read_at(0, &mut buf).unwrap();
        assert_eq!(&buf, b"ok");
    }

    #[test]
    fn remove_failure_is_reported() {
        let (store, switch) = FaultySpillStore::new(InMemorySpillStore::new());
        switch.set_fail_remove(true);
        assert!(matches!(store.remove(), Err(StorageError::Io(_))));
    }
}
