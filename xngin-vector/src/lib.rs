//! Fixed-width nullable vectors of X-Engine.
//!
//! A vector keeps values of one fixed-width kind in a value buffer,
//! and their validity in a bitmap with one bit per slot.
//! All element kinds share the same generic [`FixedWidthVector`].
//! Buffers can be moved between vectors of the same kind by a
//! [`TransferPair`] without copying values one by one.
pub mod config;
pub mod error;
pub mod fixed;
pub mod holder;
pub mod kind;
pub mod reader;
pub mod transfer;
pub mod vector;

pub use crate::config::VectorConfig;
pub use crate::error::{Error, Result};
pub use crate::fixed::FixedWidthVector;
pub use crate::holder::{Holder, NullableHolder};
pub use crate::kind::{FixedWidth, IntKind, NoOverflow};
pub use crate::reader::FieldReader;
pub use crate::transfer::TransferPair;
pub use crate::vector::ValueVector;
pub use xngin_common::alloc::Allocator;

pub type TinyIntVector = FixedWidthVector<i8>;
pub type SmallIntVector = FixedWidthVector<i16>;
pub type IntVector = FixedWidthVector<i32>;
pub type BigIntVector = FixedWidthVector<i64>;
pub type UInt1Vector = FixedWidthVector<u8>;
pub type UInt2Vector = FixedWidthVector<u16>;
pub type UInt4Vector = FixedWidthVector<u32>;
pub type UInt8Vector = FixedWidthVector<u64>;
pub type Float4Vector = FixedWidthVector<f32>;
pub type Float8Vector = FixedWidthVector<f64>;
