//! Process-wide modification time stamps.

use std::sync::atomic::{AtomicU64, Ordering};

static GLOBAL_TIME: AtomicU64 = AtomicU64::new(0);

/// A logical modification time.
///
/// Every call to [`TimeStamp::modified`] draws a fresh value from a single
/// process-wide counter, so stamps taken from different objects are totally
/// ordered. A stamp of `0` has never been modified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeStamp(u64);

impl TimeStamp {
    /// Creates a stamp that has never been modified.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Advances the stamp past every stamp issued so far.
    pub fn modified(&mut self) {
        self.0 = GLOBAL_TIME.fetch_add(1, Ordering::Relaxed) + 1;
    }

    /// Returns the raw time value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zero() {
        assert_eq!(TimeStamp::new().get(), 0);
    }

    #[test]
    fn test_modified_is_monotonic() {
        let mut a = TimeStamp::new();
        let mut b = TimeStamp::new();

        a.modified();
        b.modified();
        assert!(b > a);

        a.modified();
        assert!(a > b);
    }
}
