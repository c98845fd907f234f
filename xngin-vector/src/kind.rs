//! Element kinds of fixed-width vectors.
use std::fmt::Debug;
use std::mem::size_of;
use xngin_common::byte_repr::ByteRepr;
use xngin_datatype::Typed;

/// FixedWidth is implemented by every element type a
/// fixed-width vector can hold.
pub trait FixedWidth: ByteRepr + Typed {}

impl<T: ByteRepr + Typed> FixedWidth for T {}

/// Integer element kinds which can be converted from and to i64.
pub trait IntKind: FixedWidth {
    /// Convert from i64, truncating high bits if the kind is narrower.
    fn from_i64_truncate(v: i64) -> Self;

    /// Convert to i64. Unsigned 64-bit values above `i64::MAX` wrap.
    fn as_i64(self) -> i64;
}

macro_rules! impl_int_kind {
    ($($ty:ty),+) => {
        $(
            impl IntKind for $ty {
                #[inline]
                fn from_i64_truncate(v: i64) -> Self {
                    v as $ty
                }

                #[inline]
                fn as_i64(self) -> i64 {
                    self as i64
                }
            }
        )+
    };
}

impl_int_kind!(i8, i16, i32, i64, u8, u16, u32, u64);

/// NoOverflow is implemented by unsigned element kinds.
/// It reads the raw bits of a slot as an unsigned number of
/// the next wider type, so the top bit is never taken as sign.
pub trait NoOverflow: FixedWidth {
    type Wide: Copy + PartialEq + Debug;

    /// Read value at given slot of a value buffer, ignoring validity.
    fn get_no_overflow(buffer: &[u8], index: usize) -> Self::Wide;
}

macro_rules! impl_no_overflow {
    ($ty:ty, $signed:ty, $wide:ty) => {
        impl NoOverflow for $ty {
            type Wide = $wide;

            #[inline]
            fn get_no_overflow(buffer: &[u8], index: usize) -> $wide {
                let width = size_of::<$signed>();
                let v = <$signed>::from_bytes(&buffer[index * width..(index + 1) * width]);
                // mask off sign extension
                (v as $wide) & (<$ty>::MAX as $wide)
            }
        }
    };
}

impl_no_overflow!(u8, i8, u16);
impl_no_overflow!(u16, i16, u32);
impl_no_overflow!(u32, i32, u64);
impl_no_overflow!(u64, i64, u128);
