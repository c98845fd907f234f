#[macro_use]
mod macros;
pub mod field;

pub use field::{Field, FieldType};

use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PreciseType {
    /// Integer type.
    /// First argument is byte number.
    /// Second argument is unsigned flag.
    Int(u8, bool),
    /// Floating point type.
    /// Argument is byte number.
    Float(u8),
}

impl PreciseType {
    #[inline]
    pub fn int(bytes: u8, unsigned: bool) -> Self {
        PreciseType::Int(bytes, unsigned)
    }

    #[inline]
    pub fn i8() -> Self {
        Self::int(1, false)
    }

    #[inline]
    pub fn u8() -> Self {
        Self::int(1, true)
    }

    #[inline]
    pub fn i16() -> Self {
        Self::int(2, false)
    }

    #[inline]
    pub fn u16() -> Self {
        Self::int(2, true)
    }

    #[inline]
    pub fn i32() -> Self {
        Self::int(4, false)
    }

    #[inline]
    pub fn u32() -> Self {
        Self::int(4, true)
    }

    #[inline]
    pub fn i64() -> Self {
        Self::int(8, false)
    }

    #[inline]
    pub fn u64() -> Self {
        Self::int(8, true)
    }

    #[inline]
    pub fn f32() -> Self {
        PreciseType::Float(4)
    }

    #[inline]
    pub fn f64() -> Self {
        PreciseType::Float(8)
    }

    /// Returns byte width of single value.
    #[inline]
    pub fn width(&self) -> usize {
        match self {
            PreciseType::Int(bytes, _) | PreciseType::Float(bytes) => *bytes as usize,
        }
    }

    #[inline]
    pub fn is_unsigned(&self) -> bool {
        matches!(self, PreciseType::Int(_, true))
    }

    #[inline]
    pub fn is_float(&self) -> bool {
        matches!(self, PreciseType::Float(_))
    }

    #[inline]
    pub fn to_lower(&self) -> Cow<'_, str> {
        match self {
            PreciseType::Int(bytes, unsigned) => {
                if *unsigned {
                    Cow::Owned(format!("uint({})", bytes))
                } else {
                    Cow::Owned(format!("int({})", bytes))
                }
            }
            PreciseType::Float(bytes) => Cow::Owned(format!("float({})", bytes)),
        }
    }
}

/// Typed binds a native Rust type to its precise type.
pub trait Typed {
    fn pty() -> PreciseType;
}

impl_typed!(i8, PreciseType::Int(1, false));
impl_typed!(u8, PreciseType::Int(1, true));
impl_typed!(i16, PreciseType::Int(2, false));
impl_typed!(u16, PreciseType::Int(2, true));
impl_typed!(i32, PreciseType::Int(4, false));
impl_typed!(u32, PreciseType::Int(4, true));
impl_typed!(i64, PreciseType::Int(8, false));
impl_typed!(u64, PreciseType::Int(8, true));
impl_typed!(f32, PreciseType::Float(4));
impl_typed!(f64, PreciseType::Float(8));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precise_type_width() {
        assert_eq!(1, PreciseType::u8().width());
        assert_eq!(8, PreciseType::u64().width());
        assert_eq!(4, PreciseType::f32().width());
        assert!(PreciseType::u32().is_unsigned());
        assert!(!PreciseType::i32().is_unsigned());
        assert!(PreciseType::f64().is_float());
        assert_eq!(PreciseType::u16(), PreciseType::int(2, true));
        assert_eq!("int(4)", PreciseType::int(4, false).to_lower());
    }

    #[test]
    fn test_typed() {
        assert_eq!(PreciseType::u64(), u64::pty());
        assert_eq!(PreciseType::i16(), i16::pty());
        assert_eq!(PreciseType::f32(), f32::pty());
        assert_eq!("uint(8)", u64::pty().to_lower());
        assert_eq!("float(8)", f64::pty().to_lower());
    }
}
