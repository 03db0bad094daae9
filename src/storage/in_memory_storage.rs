use super::*;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// In-memory storage for tests. Clones share the same slots, so a test can keep a handle
/// while the code under test owns another one.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
    fail_removes: Rc<Cell<bool>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following write/remove fail with a permission error.
    pub fn test_set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Makes only removes fail, writes keep working.
    pub fn test_set_fail_removes(&self, fail: bool) {
        self.fail_removes.set(fail);
    }

    fn check_writable(&self) -> io::Result<()> {
        if self.fail_writes.get() {
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        } else {
            Ok(())
        }
    }
}

impl Storage for InMemoryStorage {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        check_key(key)?;
        Ok(self.items.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        check_key(key)?;
        self.check_writable()?;
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        check_key(key)?;
        self.check_writable()?;
        if self.fail_removes.get() {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> io::Result<Vec<String>> {
        let mut keys: Vec<_> = self.items.borrow().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
