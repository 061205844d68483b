//! Minimal reference-counted object framework.
//!
//! - [`Object`] - Type identification, modification time and debug flag
//! - [`ObjectBase`] - Embeddable state backing an [`Object`] impl
//! - [`SmartPointer`] - Shared-ownership handle
//! - [`Factory`] - The sole construction path for framework objects
//! - [`TimeStamp`] - Process-wide modification time

mod pointer;
mod time_stamp;

pub use pointer::SmartPointer;
pub use time_stamp::TimeStamp;

/// Emits a `tracing::debug!` event only when the object's debug flag is on.
macro_rules! object_debug {
    ($object:expr, $($arg:tt)+) => {
        if $crate::object::Object::debug($object) {
            tracing::debug!($($arg)+);
        }
    };
}

pub(crate) use object_debug;

/// Name reported by the root of every object hierarchy.
pub const OBJECT_TYPE_NAME: &str = "Object";

/// Capabilities shared by every framework object.
pub trait Object {
    /// Returns the concrete type name.
    fn type_name(&self) -> &'static str;

    /// Returns the name of the immediate parent in the type hierarchy.
    fn superclass_name(&self) -> Option<&'static str> {
        Some(OBJECT_TYPE_NAME)
    }

    /// Returns true if this object is, or specializes, the named type.
    fn is_a(&self, name: &str) -> bool {
        name == self.type_name() || self.superclass_name() == Some(name) || name == OBJECT_TYPE_NAME
    }

    /// Returns the embedded object state.
    fn base(&self) -> &ObjectBase;

    /// Returns the embedded object state mutably.
    fn base_mut(&mut self) -> &mut ObjectBase;

    /// Returns the time of the last modification.
    fn mtime(&self) -> u64 {
        self.base().mtime()
    }

    /// Marks the object as modified.
    fn modified(&mut self) {
        self.base_mut().modified();
    }

    /// Returns the debug flag.
    fn debug(&self) -> bool {
        self.base().debug()
    }

    /// Sets the debug flag.
    fn set_debug(&mut self, debug: bool) {
        self.base_mut().set_debug(debug);
    }
}

/// State embedded in every [`Object`].
#[derive(Debug, Clone, Default)]
pub struct ObjectBase {
    mtime: TimeStamp,
    debug: bool,
}

impl ObjectBase {
    /// Creates object state with the given debug flag, already stamped.
    pub fn new(debug: bool) -> Self {
        let mut mtime = TimeStamp::new();
        mtime.modified();
        Self { mtime, debug }
    }

    /// Returns the time of the last modification.
    pub fn mtime(&self) -> u64 {
        self.mtime.get()
    }

    /// Marks the owner as modified.
    pub fn modified(&mut self) {
        self.mtime.modified();
    }

    /// Returns the debug flag.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Sets the debug flag.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }
}

/// Controlled construction of framework objects.
///
/// Types implementing `Factory` keep their constructors private, so a
/// [`SmartPointer`] from [`create`](Factory::create) is the only way to
/// obtain an instance.
pub trait Factory: Object + Sized {
    /// Creates a new default instance behind a fresh handle.
    fn create() -> SmartPointer<Self>;
}
