use crate::error::Result;
use xngin_common::alloc::Allocator;
use xngin_datatype::{Field, PreciseType};

/// ValueVector is the kind-independent part of a vector.
pub trait ValueVector {
    /// Returns the field this vector is created with.
    fn field(&self) -> &Field;

    #[inline]
    fn name(&self) -> &str {
        self.field().name()
    }

    #[inline]
    fn precise_type(&self) -> PreciseType {
        self.field().ty()
    }

    /// Returns the allocator new buffers are charged to.
    fn allocator(&self) -> &Allocator;

    /// Returns logical number of values.
    fn value_count(&self) -> usize;

    /// Set logical number of values, growing buffers if needed.
    fn set_value_count(&mut self, value_count: usize) -> Result<()>;

    /// Returns number of slots addressable without growing.
    fn value_capacity(&self) -> usize;

    /// Returns number of nulls within value count.
    fn null_count(&self) -> usize;

    /// Returns whether the slot at given index is null.
    fn is_null(&self, index: usize) -> bool;

    /// Returns bytes needed to hold values and validity within
    /// value count.
    fn buffer_size(&self) -> usize;

    /// Release all buffers. Capacity becomes 0.
    fn clear(&mut self);

    /// Zero all buffers and reset value count, keeping capacity.
    fn reset(&mut self);
}
