//! samplebuf
//!
//! Reference-counted, resizable, contiguous sample buffers for Rust.
//!
//! `samplebuf` provides the flat backing store for indexed numeric data, such
//! as image or volume samples, inside a larger processing pipeline:
//!
//! - integer-indexed read/write access
//! - a raw buffer pointer plus length for bulk traversal
//! - `reserve` (exact resize) and `squeeze` (release spare capacity)
//! - shared ownership through a [`SmartPointer`] handed out by a factory
//!
//! The crate intentionally:
//! - does NOT do multi-dimensional indexing
//! - does NOT synchronize inside the container
//! - does NOT serialize or persist buffers
//!
//! # Example
//!
//! ```
//! use samplebuf::{BufferContainer, Object};
//!
//! let samples = BufferContainer::<u32, f32>::create();
//! let consumer = samples.clone();
//! assert_eq!(samples.reference_count(), 2);
//!
//! {
//!     let mut guard = samples.write();
//!     guard.reserve(4);
//!     guard[3] = 1.5;
//! }
//!
//! let guard = consumer.read();
//! assert_eq!(guard.len(), 4);
//! assert_eq!(guard.as_slice(), &[0.0, 0.0, 0.0, 1.5]);
//! assert_eq!(guard.type_name(), "BufferContainer");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod container;
mod error;
mod object;

//
// Public surface
//

pub use config::{ContainerConfig, DEFAULT_MAX_LEN};
pub use container::{BufferContainer, ElementIdentifier};
pub use error::ContainerError;
pub use object::{Factory, OBJECT_TYPE_NAME, Object, ObjectBase, SmartPointer, TimeStamp};
