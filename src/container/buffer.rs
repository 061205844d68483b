//! The buffer container - a shared, resizable, contiguous run of samples.
//!
//! [`BufferContainer`] owns exactly one `Vec<E>` and forwards only the
//! sanctioned operations:
//!
//! - indexing by an [`ElementIdentifier`] (checked, or unchecked via `unsafe`)
//! - `buffer_pointer()` for bulk traversal by trusted consumers
//! - `len()`
//! - `reserve()` / `squeeze()` - the capacity-changing operations
//!
//! # Example
//!
//! ```
//! use samplebuf::BufferContainer;
//!
//! let samples = BufferContainer::<u32, f32>::create();
//! assert_eq!(samples.read().len(), 0);
//!
//! samples.write().reserve(5);
//! samples.write()[2] = 7.0;
//!
//! let guard = samples.read();
//! assert_eq!(guard[2], 7.0);
//! assert_eq!(guard[0], 0.0);
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use super::identifier::{ElementIdentifier, position};
use crate::config::ContainerConfig;
use crate::error::ContainerError;
use crate::object::{Factory, Object, ObjectBase, SmartPointer, object_debug};

const TYPE_NAME: &str = "BufferContainer";

/// A reference-counted, resizable, contiguous buffer of `E` addressed by `I`.
///
/// Instances are created only through the factory functions
/// ([`create`](Self::create) and friends), which hand back a
/// [`SmartPointer`]. Every holder of a clone of that pointer sees the same
/// buffer.
///
/// # Contiguity
///
/// For `0 <= i < len()`, element `i + 1` sits exactly one element width after
/// element `i`. The pair `(buffer_pointer(), len())` describes the whole
/// buffer until the next capacity-changing operation or drop.
///
/// # Capacity-Changing Operations
///
/// [`reserve`](Self::reserve), [`try_reserve`](Self::try_reserve) and
/// [`squeeze`](Self::squeeze) may move or free the allocation. Raw pointers
/// obtained before any of them must be treated as dangling afterwards.
/// Reads and writes never change `len()`.
///
/// # Indexing
///
/// `container[id]` goes through slice indexing and panics when `id` is out of
/// range. The hot path is [`get_unchecked`](Self::get_unchecked) /
/// [`get_unchecked_mut`](Self::get_unchecked_mut), which perform no check in
/// release builds: out-of-range access there is undefined behavior.
pub struct BufferContainer<I, E> {
    object: ObjectBase,
    elements: Vec<E>,
    config: ContainerConfig,
    _identifier: PhantomData<fn() -> I>,
}

impl<I: ElementIdentifier, E> BufferContainer<I, E> {
    pub(crate) fn from_vec(elements: Vec<E>, config: ContainerConfig) -> Self {
        let container = Self {
            object: ObjectBase::new(config.debug()),
            elements,
            config,
            _identifier: PhantomData,
        };
        object_debug!(
            &container,
            type_name = TYPE_NAME,
            len = container.elements.len(),
            capacity = container.elements.capacity(),
            "created container"
        );
        container
    }

    /// Creates an empty container with the default configuration.
    ///
    /// This and the other `create*` functions are the only way to obtain a
    /// container.
    ///
    /// # Example
    ///
    /// ```
    /// use samplebuf::BufferContainer;
    ///
    /// let samples = BufferContainer::<usize, u16>::create();
    /// assert!(samples.read().is_empty());
    /// assert_eq!(samples.reference_count(), 1);
    /// ```
    pub fn create() -> SmartPointer<Self> {
        SmartPointer::from_object(Self::from_vec(Vec::new(), ContainerConfig::default()))
    }

    /// Creates an empty container with a custom configuration.
    ///
    /// # Errors
    ///
    /// - [`ContainerError::InvalidConfig`] if the configuration does not validate
    /// - [`ContainerError::Allocation`] if `initial_capacity` cannot be allocated
    pub fn create_with_config(config: ContainerConfig) -> Result<SmartPointer<Self>, ContainerError> {
        config.validate()?;

        let mut elements = Vec::new();
        elements
            .try_reserve_exact(config.initial_capacity())
            .map_err(|source| ContainerError::Allocation {
                requested: config.initial_capacity(),
                source,
            })?;

        Ok(SmartPointer::from_object(Self::from_vec(elements, config)))
    }

    #[cfg_attr(not(feature = "bytes"), allow(dead_code))]
    pub(crate) fn take_elements(&mut self) -> Vec<E> {
        std::mem::take(&mut self.elements)
    }

    /// Returns the number of elements currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the container holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of elements the current allocation can hold.
    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    /// Returns the configuration this container was created with.
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Returns the element at `id`, or `None` if it is out of range.
    #[inline]
    pub fn get(&self, id: I) -> Option<&E> {
        self.elements.get(id.to_index()?)
    }

    /// Returns the element at `id` mutably, or `None` if it is out of range.
    #[inline]
    pub fn get_mut(&mut self, id: I) -> Option<&mut E> {
        self.elements.get_mut(id.to_index()?)
    }

    /// Writes `value` at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::IndexOutOfRange`] if `id` is past the end and
    /// [`ContainerError::InvalidIdentifier`] if it is negative.
    pub fn set(&mut self, id: I, value: E) -> Result<(), ContainerError> {
        let index = id.to_index().ok_or_else(|| ContainerError::InvalidIdentifier {
            value: format!("{:?}", id),
        })?;
        let len = self.elements.len();
        let slot = self
            .elements
            .get_mut(index)
            .ok_or(ContainerError::IndexOutOfRange { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Returns the element at `id` without a bounds check.
    ///
    /// Debug builds still assert the bound.
    ///
    /// # Safety
    ///
    /// The caller must guarantee `0 <= id < self.len()`.
    #[allow(unsafe_code)]
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, id: I) -> &E {
        let index = id.as_index();
        debug_assert!(index < self.elements.len(), "unchecked index {} out of range", index);
        // SAFETY: the caller guarantees `index < len`.
        unsafe { self.elements.get_unchecked(index) }
    }

    /// Returns the element at `id` mutably without a bounds check.
    ///
    /// Debug builds still assert the bound.
    ///
    /// # Safety
    ///
    /// The caller must guarantee `0 <= id < self.len()`.
    #[allow(unsafe_code)]
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, id: I) -> &mut E {
        let index = id.as_index();
        debug_assert!(index < self.elements.len(), "unchecked index {} out of range", index);
        // SAFETY: the caller guarantees `index < len`.
        unsafe { self.elements.get_unchecked_mut(index) }
    }

    /// Returns a pointer to element 0.
    ///
    /// The pointer may only be dereferenced while `len() > 0`, and only until
    /// the next capacity-changing operation or until the container is dropped.
    /// Offsets `0..len()` from it address every element in order.
    #[inline]
    pub fn buffer_pointer(&mut self) -> *mut E {
        self.elements.as_mut_ptr()
    }

    /// Read-only counterpart of [`buffer_pointer`](Self::buffer_pointer).
    #[inline]
    pub fn buffer_pointer_const(&self) -> *const E {
        self.elements.as_ptr()
    }

    /// Returns the whole buffer as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[E] {
        &self.elements
    }

    /// Returns the whole buffer as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [E] {
        &mut self.elements
    }

    /// Iterates over the elements in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.elements.iter()
    }

    /// Iterates over the identifiers of every element, in index order.
    ///
    /// Stops early if a position is not representable in `I`.
    pub fn ids(&self) -> impl Iterator<Item = I> + use<I, E> {
        (0..self.elements.len()).map_while(I::from_index)
    }

    /// Iterates mutably over the elements in index order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, E> {
        self.elements.iter_mut()
    }

    /// Asks the allocator to drop any capacity beyond `len()`.
    ///
    /// Never changes `len()` or any element. When the container was configured
    /// with `release_on_squeeze = false` the allocation is left as is. Raw
    /// pointers obtained earlier must be treated as dangling either way.
    pub fn squeeze(&mut self) {
        let old_capacity = self.elements.capacity();
        if self.config.release_on_squeeze() {
            self.elements.shrink_to_fit();
        }
        self.modified();

        object_debug!(
            self,
            type_name = TYPE_NAME,
            len = self.elements.len(),
            old_capacity,
            capacity = self.elements.capacity(),
            "squeezed container"
        );
    }

    fn check_growth(&self, num: I) -> Result<usize, ContainerError> {
        let new_len = num.to_index().ok_or_else(|| ContainerError::InvalidIdentifier {
            value: format!("{:?}", num),
        })?;

        if new_len > self.elements.len() && new_len > self.config.max_len() {
            tracing::warn!(
                type_name = TYPE_NAME,
                requested = new_len,
                max = self.config.max_len(),
                "rejected reserve past configured limit"
            );
            return Err(ContainerError::TooLarge {
                requested: new_len,
                max: self.config.max_len(),
            });
        }

        Ok(new_len)
    }
}

impl<I: ElementIdentifier, E: Default> BufferContainer<I, E> {
    /// Creates a container holding `num` default-valued elements.
    ///
    /// # Panics
    ///
    /// Panics if `num` is negative.
    pub fn create_with_len(num: I) -> SmartPointer<Self> {
        let mut elements = Vec::new();
        elements.resize_with(position(num), E::default);
        SmartPointer::from_object(Self::from_vec(elements, ContainerConfig::default()))
    }

    /// Resizes the container to hold exactly `num` elements.
    ///
    /// Despite the name this is a resize, not a capacity hint:
    ///
    /// - elements at positions `num..` are dropped
    /// - elements at positions `..num` that already existed keep their values
    /// - new positions are filled with `E::default()`
    ///
    /// Raw pointers obtained earlier must be treated as dangling.
    ///
    /// # Panics
    ///
    /// Panics if `num` is negative. Allocation failure aborts the process.
    ///
    /// # Example
    ///
    /// ```
    /// use samplebuf::BufferContainer;
    ///
    /// let samples = BufferContainer::<u32, i32>::create_with_len(5);
    /// samples.write()[1] = 9;
    ///
    /// samples.write().reserve(2);
    /// assert_eq!(samples.read().as_slice(), &[0, 9]);
    /// ```
    pub fn reserve(&mut self, num: I) {
        self.resize_to(position(num));
    }

    /// Fallible counterpart of [`reserve`](Self::reserve).
    ///
    /// Same resize semantics, but growth past the configured `max_len` is
    /// rejected and an allocation failure is returned instead of aborting.
    /// Shrinking is never rejected. The container is
    /// unchanged when an error is returned.
    ///
    /// # Errors
    ///
    /// - [`ContainerError::InvalidIdentifier`] if `num` is negative
    /// - [`ContainerError::TooLarge`] if `num` exceeds `max_len`
    /// - [`ContainerError::Allocation`] if the allocator refuses the growth
    pub fn try_reserve(&mut self, num: I) -> Result<(), ContainerError> {
        let new_len = self.check_growth(num)?;

        if let Some(additional) = new_len.checked_sub(self.elements.len()) {
            self.elements
                .try_reserve_exact(additional)
                .map_err(|source| {
                    tracing::warn!(
                        type_name = TYPE_NAME,
                        requested = new_len,
                        "allocator refused reserve"
                    );
                    ContainerError::Allocation {
                        requested: new_len,
                        source,
                    }
                })?;
        }

        self.resize_to(new_len);
        Ok(())
    }

    fn resize_to(&mut self, new_len: usize) {
        let old_len = self.elements.len();
        self.elements.resize_with(new_len, E::default);
        self.modified();

        object_debug!(
            self,
            type_name = TYPE_NAME,
            old_len,
            new_len,
            capacity = self.elements.capacity(),
            "reserved container"
        );
    }
}

impl<I: ElementIdentifier, E: Clone> BufferContainer<I, E> {
    /// Creates a container holding `num` copies of `value`.
    ///
    /// # Panics
    ///
    /// Panics if `num` is negative.
    pub fn create_filled(num: I, value: E) -> SmartPointer<Self> {
        SmartPointer::from_object(Self::from_vec(vec![value; position(num)], ContainerConfig::default()))
    }

    /// Deep-copies this container into a new, independently owned instance.
    ///
    /// The copy keeps the configuration and debug flag and gets a fresh
    /// modification time.
    pub fn duplicate(&self) -> SmartPointer<Self> {
        let config = self.config.with_debug(self.debug());
        SmartPointer::from_object(Self::from_vec(self.elements.clone(), config))
    }

    /// Overwrites every element with `value`.
    pub fn fill(&mut self, value: E) {
        self.elements.fill(value);
        self.modified();
    }
}

impl<I: ElementIdentifier, E> Object for BufferContainer<I, E> {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn base(&self) -> &ObjectBase {
        &self.object
    }

    fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.object
    }
}

impl<I: ElementIdentifier, E: Default> Factory for BufferContainer<I, E> {
    fn create() -> SmartPointer<Self> {
        BufferContainer::create()
    }
}

impl<I: ElementIdentifier, E> Index<I> for BufferContainer<I, E> {
    type Output = E;

    #[inline]
    fn index(&self, id: I) -> &E {
        &self.elements[position(id)]
    }
}

impl<I: ElementIdentifier, E> IndexMut<I> for BufferContainer<I, E> {
    #[inline]
    fn index_mut(&mut self, id: I) -> &mut E {
        &mut self.elements[position(id)]
    }
}

impl<'a, I: ElementIdentifier, E> IntoIterator for &'a BufferContainer<I, E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, I: ElementIdentifier, E> IntoIterator for &'a mut BufferContainer<I, E> {
    type Item = &'a mut E;
    type IntoIter = std::slice::IterMut<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<I, E> fmt::Debug for BufferContainer<I, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(TYPE_NAME)
            .field("len", &self.elements.len())
            .field("capacity", &self.elements.capacity())
            .field("mtime", &self.object.mtime())
            .field("debug", &self.object.debug())
            .finish()
    }
}

impl<I, E> Drop for BufferContainer<I, E> {
    fn drop(&mut self) {
        if self.object.debug() {
            tracing::debug!(
                type_name = TYPE_NAME,
                len = self.elements.len(),
                capacity = self.elements.capacity(),
                "releasing container"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Samples = BufferContainer<u32, i32>;

    #[test]
    fn test_create_is_empty() {
        let samples = Samples::create();
        let guard = samples.read();
        assert_eq!(guard.len(), 0);
        assert!(guard.is_empty());
        assert_eq!(guard.type_name(), "BufferContainer");
        assert!(guard.is_a("Object"));
    }

    #[test]
    fn test_factory_trait_creates_empty() {
        let samples = <Samples as Factory>::create();
        assert!(samples.read().is_empty());
    }

    #[test]
    fn test_reserve_grows_with_defaults() {
        let samples = Samples::create();
        samples.write().reserve(4);
        assert_eq!(samples.read().as_slice(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_reserve_truncates() {
        let samples = Samples::create_filled(4, 3);
        samples.write().reserve(1);
        assert_eq!(samples.read().as_slice(), &[3]);
    }

    #[test]
    fn test_reserve_bumps_mtime() {
        let samples = Samples::create();
        let before = samples.read().mtime();
        samples.write().reserve(2);
        assert!(samples.read().mtime() > before);
    }

    #[test]
    fn test_index_write_keeps_mtime() {
        let samples = Samples::create_with_len(2);
        let before = samples.read().mtime();
        samples.write()[1] = 5;
        assert_eq!(samples.read().mtime(), before);
    }

    #[test]
    fn test_squeeze_releases_capacity() {
        let config = ContainerConfig::default().with_initial_capacity(64);
        let samples = Samples::create_with_config(config).unwrap();
        let mut guard = samples.write();
        assert!(guard.capacity() >= 64);

        guard.reserve(3);
        guard.squeeze();
        assert_eq!(guard.len(), 3);
        assert!(guard.capacity() < 64);
    }

    #[test]
    fn test_squeeze_can_keep_capacity() {
        let config = ContainerConfig::default()
            .with_initial_capacity(64)
            .with_release_on_squeeze(false);
        let samples = Samples::create_with_config(config).unwrap();
        let mut guard = samples.write();
        guard.reserve(3);
        guard.squeeze();
        assert!(guard.capacity() >= 64);
    }

    #[test]
    fn test_try_reserve_limit() {
        let config = ContainerConfig::default().with_max_len(8);
        let samples = Samples::create_with_config(config).unwrap();
        let mut guard = samples.write();

        assert!(guard.try_reserve(8).is_ok());
        assert_eq!(guard.len(), 8);

        let err = guard.try_reserve(9).unwrap_err();
        assert!(matches!(err, ContainerError::TooLarge { requested: 9, max: 8 }));
        assert_eq!(guard.len(), 8);
    }

    #[test]
    fn test_try_reserve_shrinks_past_limit() {
        let config = ContainerConfig::default().with_max_len(4);
        let samples = Samples::create_with_config(config).unwrap();
        let mut guard = samples.write();
        guard.reserve(10);

        assert!(guard.try_reserve(6).is_ok());
        assert_eq!(guard.len(), 6);
        assert!(matches!(
            guard.try_reserve(7),
            Err(ContainerError::TooLarge { requested: 7, max: 4 })
        ));
    }

    #[test]
    fn test_create_with_config_oversized_capacity() {
        let config = ContainerConfig::default().with_initial_capacity(isize::MAX as usize);
        assert!(config.validate().is_ok());

        let err = BufferContainer::<u32, u64>::create_with_config(config).unwrap_err();
        assert!(matches!(err, ContainerError::Allocation { .. }));
    }

    #[test]
    fn test_create_needs_no_default() {
        struct Opaque;

        let samples = BufferContainer::<u32, Opaque>::create();
        assert!(samples.read().is_empty());

        let config = ContainerConfig::default().with_initial_capacity(4);
        let samples = BufferContainer::<u32, Opaque>::create_with_config(config).unwrap();
        assert!(samples.read().capacity() >= 4);
    }

    #[test]
    fn test_ids() {
        let samples = Samples::create_with_len(3);
        let ids: Vec<u32> = samples.read().ids().collect();
        assert_eq!(ids, vec![0, 1, 2]);

        let narrow = BufferContainer::<u8, u8>::from_vec(vec![0; 300], ContainerConfig::default());
        assert_eq!(narrow.ids().count(), 256);
        assert_eq!(narrow.ids().last(), Some(255));
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_last_handle_drop_logs_release() {
        let samples = Samples::create_with_len(3);
        samples.write().set_debug(true);
        let other = samples.clone();

        drop(samples);
        assert!(!logs_contain("releasing container"));

        drop(other);
        assert!(logs_contain("releasing container"));
        assert!(logs_contain("len=3"));
    }

    #[test]
    fn test_try_reserve_allocation_failure() {
        let samples = BufferContainer::<usize, u64>::create();
        let mut guard = samples.write();
        guard.reserve(2);

        let err = guard.try_reserve(usize::MAX / 2).unwrap_err();
        assert!(matches!(err, ContainerError::Allocation { .. }));
        assert_eq!(guard.len(), 2);
    }

    #[test]
    fn test_try_reserve_negative() {
        let samples = BufferContainer::<i64, u8>::create();
        let err = samples.write().try_reserve(-1).unwrap_err();
        assert!(matches!(err, ContainerError::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_checked_access() {
        let samples = Samples::create_with_len(3);
        let mut guard = samples.write();

        assert_eq!(guard.get(2), Some(&0));
        assert_eq!(guard.get(3), None);

        guard.set(1, 4).unwrap();
        assert_eq!(guard[1], 4);
        assert!(matches!(
            guard.set(3, 1),
            Err(ContainerError::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_range_panics() {
        let samples = Samples::create_with_len(2);
        let _ = samples.read()[2];
    }

    #[test]
    #[allow(unsafe_code)]
    fn test_unchecked_access() {
        let samples = Samples::create_with_len(3);
        let mut guard = samples.write();
        unsafe {
            *guard.get_unchecked_mut(2) = 11;
            assert_eq!(*guard.get_unchecked(2), 11);
        }
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_debug_flag_gates_logging() {
        let samples = Samples::create();
        samples.write().reserve(2);
        assert!(!logs_contain("reserved container"));

        samples.write().set_debug(true);
        samples.write().reserve(3);
        assert!(logs_contain("reserved container"));
        assert!(logs_contain("new_len=3"));
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_rejected_reserve_warns() {
        let config = ContainerConfig::default().with_max_len(2);
        let samples = Samples::create_with_config(config).unwrap();
        assert!(samples.write().try_reserve(3).is_err());
        assert!(logs_contain("rejected reserve past configured limit"));
    }

    #[test]
    fn test_duplicate_is_independent() {
        let original = Samples::create_filled(3, 1);
        let copy = original.read().duplicate();

        copy.write()[0] = 9;
        assert_eq!(original.read()[0], 1);
        assert!(!original.ptr_eq(&copy));
    }

    #[test]
    fn test_fill() {
        let samples = Samples::create_with_len(3);
        samples.write().fill(2);
        assert_eq!(samples.read().as_slice(), &[2, 2, 2]);
    }

    #[test]
    fn test_iteration() {
        let samples = Samples::create_filled(3, 1);
        for value in &mut *samples.write() {
            *value += 1;
        }
        let sum: i32 = samples.read().iter().sum();
        assert_eq!(sum, 6);
    }
}
