use crate::error::{Error, Result};
use crate::fixed::FixedWidthVector;
use crate::kind::FixedWidth;
use crate::vector::ValueVector;
use std::borrow::BorrowMut;
use xngin_common::bitmap::copy_bits_range;

/// TransferPair binds a source vector to a destination vector of
/// the same element kind, and moves content from the source to the
/// destination.
///
/// The destination is either owned by the pair, or borrowed from
/// the caller.
pub struct TransferPair<'a, T: FixedWidth, D = FixedWidthVector<T>> {
    from: &'a mut FixedWidthVector<T>,
    to: D,
}

impl<'a, T, D> TransferPair<'a, T, D>
where
    T: FixedWidth,
    D: BorrowMut<FixedWidthVector<T>>,
{
    #[inline]
    pub(crate) fn new(from: &'a mut FixedWidthVector<T>, to: D) -> Self {
        TransferPair { from, to }
    }

    /// Returns the destination vector.
    #[inline]
    pub fn get_to(&self) -> &FixedWidthVector<T> {
        self.to.borrow()
    }

    /// Returns the mutable destination vector.
    #[inline]
    pub fn get_to_mut(&mut self) -> &mut FixedWidthVector<T> {
        self.to.borrow_mut()
    }

    /// Consumes the pair and returns the destination.
    #[inline]
    pub fn into_to(self) -> D {
        self.to
    }

    /// Move all buffers of the source to the destination.
    /// Buffers previously held by the destination are released,
    /// and the source is left empty.
    #[inline]
    pub fn transfer(&mut self) {
        self.from.transfer_to(self.to.borrow_mut());
    }

    /// Copy slots `[start_index, start_index + length)` of the source
    /// to slots `[0, length)` of the destination, replacing its
    /// buffers. Value count of the destination becomes `length`.
    /// The source is untouched.
    pub fn split_and_transfer(&mut self, start_index: usize, length: usize) -> Result<()> {
        let from = &*self.from;
        let end_index = start_index
            .checked_add(length)
            .filter(|end| *end <= from.value_capacity())
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "split range {}+{} exceeds vector capacity {}",
                    start_index,
                    length,
                    from.value_capacity()
                ))
            })?;
        let to = self.to.borrow_mut();
        log::debug!(
            "split slots {}..{} of vector {} to {}",
            start_index,
            end_index,
            from.name(),
            to.name()
        );
        to.allocate_new_with_capacity(length)?;
        let width = from.type_width();
        to.values.as_slice_mut()[..length * width]
            .copy_from_slice(&from.values.as_slice()[start_index * width..end_index * width]);
        copy_bits_range(
            to.validity.as_slice_mut(),
            from.validity.as_slice(),
            start_index..end_index,
        );
        to.value_count = length;
        Ok(())
    }

    /// Copy slot `from_index` of the source to slot `to_index` of
    /// the destination, growing the destination if needed.
    #[inline]
    pub fn copy_value_safe(&mut self, from_index: usize, to_index: usize) -> Result<()> {
        self.to
            .borrow_mut()
            .copy_from_safe(from_index, to_index, &*self.from)
    }
}
