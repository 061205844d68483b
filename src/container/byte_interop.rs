//! Handoff of byte-sample containers to and from `bytes::Bytes`.

use bytes::Bytes;

use super::buffer::BufferContainer;
use super::identifier::ElementIdentifier;
use crate::config::ContainerConfig;
use crate::object::SmartPointer;

impl<I: ElementIdentifier> BufferContainer<I, u8> {
    /// Creates a container whose elements are the given bytes.
    ///
    /// Reuses the allocation when `bytes` is the unique owner of a
    /// `Vec`-backed buffer.
    ///
    /// # Example
    ///
    /// ```
    /// use bytes::Bytes;
    /// use samplebuf::BufferContainer;
    ///
    /// let samples = BufferContainer::<u32, u8>::create_from_bytes(Bytes::from_static(b"abc"));
    /// assert_eq!(samples.read()[1], b'b');
    /// ```
    pub fn create_from_bytes(bytes: Bytes) -> SmartPointer<Self> {
        SmartPointer::from_object(Self::from_vec(Vec::from(bytes), ContainerConfig::default()))
    }

    /// Copies the current elements into a `Bytes`.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_slice())
    }

    /// Converts the container into a `Bytes` without copying.
    ///
    /// Take the container out of its handle first with
    /// [`SmartPointer::try_unwrap`].
    pub fn into_bytes(mut self) -> Bytes {
        Bytes::from(self.take_elements())
    }
}
