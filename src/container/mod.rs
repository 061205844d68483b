//! The buffer container and its index type.
//!
//! - [`BufferContainer`] - Shared, resizable, contiguous sample buffer
//! - [`ElementIdentifier`] - Integral index types accepted by the container

mod buffer;
mod identifier;

#[cfg(feature = "bytes")]
mod byte_interop;

pub use buffer::BufferContainer;
pub use identifier::ElementIdentifier;
