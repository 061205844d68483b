//! Integral index types for addressing container elements.

use std::fmt;

/// An integral, totally ordered type used to address container elements.
///
/// Implemented for every primitive integer type. Signed identifiers are
/// accepted so pipelines can keep their native index type, but only
/// non-negative values address an element.
pub trait ElementIdentifier: Copy + Ord + fmt::Debug + Send + Sync + 'static {
    /// Maps the identifier to a buffer position.
    ///
    /// Returns `None` if the value is negative or does not fit in `usize`.
    fn to_index(self) -> Option<usize>;

    /// Maps the identifier to a buffer position with a plain `as` cast.
    ///
    /// Used on the unchecked access path; a negative value wraps.
    fn as_index(self) -> usize;

    /// Maps a buffer position back to an identifier.
    ///
    /// Returns `None` if the position is not representable.
    fn from_index(index: usize) -> Option<Self>;
}

macro_rules! impl_element_identifier {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ElementIdentifier for $ty {
                #[inline(always)]
                fn to_index(self) -> Option<usize> {
                    usize::try_from(self).ok()
                }

                #[inline(always)]
                fn as_index(self) -> usize {
                    self as usize
                }

                #[inline(always)]
                fn from_index(index: usize) -> Option<Self> {
                    <$ty>::try_from(index).ok()
                }
            }
        )*
    };
}

impl_element_identifier!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// Maps `id` to a position, panicking on identifiers that address nothing.
#[inline(always)]
pub(crate) fn position<I: ElementIdentifier>(id: I) -> usize {
    match id.to_index() {
        Some(index) => index,
        None => panic!("element identifier {:?} is not a valid position", id),
    }
}
