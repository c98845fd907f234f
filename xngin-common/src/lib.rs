//! Common building blocks of X-Engine.
//!
//! Aligned byte arrays charged to an allocator, validity bitmap
//! helpers and byte representation of fixed-width values.
pub mod alloc;
pub mod bitmap;
pub mod byte_repr;
pub mod error;
