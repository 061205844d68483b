//! Shared-ownership handle for framework objects.

use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A reference-counted handle to an object.
///
/// Cloning a `SmartPointer` retains the object; dropping one releases it.
/// The object is dropped, and its memory freed, when the last handle goes
/// away.
///
/// The wrapped object performs no synchronization of its own. Holders
/// serialize access through [`read`](Self::read) and [`write`](Self::write):
/// any number of readers, or one writer or resizer.
///
/// Handles are only produced by factories such as
/// [`Factory::create`](crate::Factory::create).
pub struct SmartPointer<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> SmartPointer<T> {
    pub(crate) fn from_object(object: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(object)),
        }
    }

    /// Locks the object for shared reading.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.inner.read()
    }

    /// Locks the object for exclusive writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.inner.write()
    }

    /// Returns the number of live handles to this object.
    pub fn reference_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Returns true if both handles refer to the same object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Takes the object out if this is the only handle.
    ///
    /// Returns the handle unchanged otherwise.
    pub fn try_unwrap(self) -> Result<T, Self> {
        Arc::try_unwrap(self.inner)
            .map(|lock| lock.into_inner())
            .map_err(|inner| Self { inner })
    }
}

impl<T> Clone for SmartPointer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for SmartPointer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmartPointer")
            .field("ptr", &Arc::as_ptr(&self.inner))
            .field("reference_count", &self.reference_count())
            .finish()
    }
}
