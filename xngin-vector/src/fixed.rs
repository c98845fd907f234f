use crate::config::VectorConfig;
use crate::error::{Error, Result};
use crate::holder::{Holder, NullableHolder};
use crate::kind::{FixedWidth, IntKind, NoOverflow};
use crate::reader::FieldReader;
use crate::transfer::TransferPair;
use crate::vector::ValueVector;
use smallvec::{smallvec, SmallVec};
use std::borrow::BorrowMut;
use std::marker::PhantomData;
use xngin_common::alloc::{Allocator, RawArray};
use xngin_common::bitmap::{
    bitmap_false_count, is_set, set_validity_bit, set_validity_bit_to_one, validity_bytes,
};
use xngin_datatype::{Field, FieldType};

/// FixedWidthVector stores nullable values of one fixed-width kind.
///
/// Values are kept in a value buffer, slot `i` occupies bytes
/// `[i * width, (i + 1) * width)`. A validity buffer keeps one bit
/// per slot, set bit means valid and cleared bit means null.
/// The two buffers always grow together, and the number of
/// addressable slots is the smaller one they can hold.
///
/// Accessors come in two flavors. `set()` and its siblings assume
/// the index is within capacity and panic otherwise. `set_safe()`
/// and its siblings grow both buffers first, preserving content.
/// Newly allocated memory is zeroed, so untouched slots are null.
#[derive(Debug)]
pub struct FixedWidthVector<T: FixedWidth> {
    field: Field,
    config: VectorConfig,
    alloc: Allocator,
    pub(crate) values: RawArray,
    pub(crate) validity: RawArray,
    pub(crate) value_count: usize,
    /// Capacity to double from when growing an empty vector.
    last_capacity: usize,
    _marker: PhantomData<T>,
}

impl<T: FixedWidth> FixedWidthVector<T> {
    /// Create an empty nullable vector with default config.
    #[inline]
    pub fn new(name: impl Into<String>, alloc: Allocator) -> Self {
        Self::with_config(name, alloc, VectorConfig::default())
    }

    /// Create an empty nullable vector with given config.
    #[inline]
    pub fn with_config(name: impl Into<String>, alloc: Allocator, config: VectorConfig) -> Self {
        Self::new_unchecked(name, FieldType::nullable(T::pty()), alloc, config)
    }

    /// Create an empty vector with given field type.
    /// The precise type of field type must match element kind.
    #[inline]
    pub fn with_field_type(
        name: impl Into<String>,
        field_type: FieldType,
        alloc: Allocator,
        config: VectorConfig,
    ) -> Result<Self> {
        if field_type.ty != T::pty() {
            return Err(Error::InvalidArgument(format!(
                "field type {} mismatches vector type {}",
                field_type.ty.to_lower(),
                T::pty().to_lower()
            )));
        }
        Ok(Self::new_unchecked(name, field_type, alloc, config))
    }

    #[inline]
    pub(crate) fn new_unchecked(
        name: impl Into<String>,
        field_type: FieldType,
        alloc: Allocator,
        config: VectorConfig,
    ) -> Self {
        FixedWidthVector {
            field: Field::new(name, field_type),
            values: alloc.empty(),
            validity: alloc.empty(),
            alloc,
            config,
            value_count: 0,
            last_capacity: config.initial_capacity,
            _marker: PhantomData,
        }
    }

    /// Returns the config of this vector.
    #[inline]
    pub fn config(&self) -> &VectorConfig {
        &self.config
    }

    /// Returns byte width of single slot.
    #[inline]
    pub fn type_width(&self) -> usize {
        T::WIDTH
    }

    /// Returns raw bytes of value buffer, including unused capacity.
    #[inline]
    pub fn values(&self) -> &[u8] {
        self.values.as_slice()
    }

    /// Returns raw bytes of validity buffer, including unused capacity.
    #[inline]
    pub fn validity(&self) -> &[u8] {
        self.validity.as_slice()
    }

    /// Returns validity and value bytes covering current value count.
    #[inline]
    pub fn field_buffers(&self) -> SmallVec<[&[u8]; 2]> {
        smallvec![
            &self.validity.as_slice()[..validity_bytes(self.value_count)],
            &self.values.as_slice()[..self.value_count * T::WIDTH],
        ]
    }

    /// Returns a reader bound to this vector.
    #[inline]
    pub fn reader(&self) -> FieldReader<'_, T> {
        FieldReader::new(self)
    }

    /* capacity management */

    /// Set the capacity of the next allocation done by
    /// [`allocate_new`](Self::allocate_new) or by growing
    /// an empty vector.
    #[inline]
    pub fn set_initial_capacity(&mut self, capacity: usize) -> Result<()> {
        self.check_buffer_size(capacity)?;
        self.last_capacity = capacity;
        Ok(())
    }

    /// Allocate buffers with the initial capacity, releasing
    /// current ones.
    #[inline]
    pub fn allocate_new(&mut self) -> Result<()> {
        self.allocate_new_with_capacity(self.last_capacity)
    }

    /// Allocate buffers to hold at least given number of values,
    /// releasing current ones. All slots are null afterwards.
    ///
    /// The vector is untouched if allocation fails.
    pub fn allocate_new_with_capacity(&mut self, capacity: usize) -> Result<()> {
        let (value_bytes, validity_bytes) = self.check_buffer_size(capacity)?;
        let values = self.alloc.allocate(value_bytes)?;
        let validity = self.alloc.allocate(validity_bytes)?;
        self.values = values;
        self.validity = validity;
        self.value_count = 0;
        self.last_capacity = self.value_capacity();
        Ok(())
    }

    /// Double the capacity of both buffers.
    /// An empty vector grows to double of the last capacity it had,
    /// or of the initial capacity.
    pub fn reallocate(&mut self) -> Result<()> {
        let curr = self.value_capacity();
        let base = if curr > 0 {
            curr
        } else if self.last_capacity > 0 {
            self.last_capacity
        } else {
            VectorConfig::DEFAULT_INITIAL_CAPACITY
        };
        let target = base.checked_mul(2).ok_or(Error::CapacityExhausted {
            requested: usize::MAX,
            limit: self.config.max_allocation_bytes,
        })?;
        let (value_bytes, validity_bytes) = self.check_buffer_size(target)?;
        log::debug!(
            "reallocate vector {} from {} to {} slots",
            self.field.name(),
            curr,
            target
        );
        self.values.reallocate(value_bytes)?;
        self.validity.reallocate(validity_bytes)?;
        self.last_capacity = self.value_capacity();
        Ok(())
    }

    /// Make sure slot at given index is addressable.
    #[inline]
    fn handle_safe(&mut self, index: usize) -> Result<()> {
        while index >= self.value_capacity() {
            self.reallocate()?;
        }
        Ok(())
    }

    #[inline]
    fn check_buffer_size(&self, capacity: usize) -> Result<(usize, usize)> {
        let limit = self.config.max_allocation_bytes;
        match capacity.checked_mul(T::WIDTH) {
            Some(value_bytes) if value_bytes <= limit => {
                Ok((value_bytes, validity_bytes(capacity)))
            }
            other => {
                let requested = other.unwrap_or(usize::MAX);
                log::warn!(
                    "vector {} refuses {} slots of {} bytes, limit {} bytes",
                    self.field.name(),
                    capacity,
                    T::WIDTH,
                    limit
                );
                Err(Error::CapacityExhausted { requested, limit })
            }
        }
    }

    /* value retrieval */

    /// Returns 1 if slot at given index is valid, otherwise 0.
    /// Slots beyond capacity are reported as null.
    #[inline]
    pub fn is_set(&self, index: usize) -> u8 {
        if index >= self.value_capacity() {
            return 0;
        }
        is_set(self.validity.as_slice(), index)
    }

    #[inline]
    fn value_at(&self, index: usize) -> T {
        T::from_bytes(&self.values.as_slice()[index * T::WIDTH..(index + 1) * T::WIDTH])
    }

    /// Returns value at given index.
    ///
    /// Fails if the slot is null and null checking is enabled.
    /// With null checking disabled, whatever bytes a null slot
    /// holds are returned.
    #[inline]
    pub fn get(&self, index: usize) -> Result<T> {
        if index >= self.value_capacity() {
            return Err(Error::IndexOutOfBound(format!(
                "{} >= vector capacity {}",
                index,
                self.value_capacity()
            )));
        }
        if self.config.null_checking && is_set(self.validity.as_slice(), index) == 0 {
            return Err(Error::NullValueRead(index));
        }
        Ok(self.value_at(index))
    }

    /// Returns value at given index together with its validity.
    #[inline]
    pub fn get_nullable(&self, index: usize) -> NullableHolder<T> {
        if self.is_set(index) == 0 {
            return NullableHolder::null();
        }
        NullableHolder::new(self.value_at(index))
    }

    /// Returns value at given index, or None if it's null.
    #[inline]
    pub fn get_object(&self, index: usize) -> Option<T> {
        if self.is_set(index) == 0 {
            None
        } else {
            Some(self.value_at(index))
        }
    }

    /* value setters */

    #[inline]
    fn set_value(&mut self, index: usize, value: T) {
        let slot = &mut self.values.as_slice_mut()[index * T::WIDTH..(index + 1) * T::WIDTH];
        value.write_bytes(slot)
    }

    /// Set value at given index and mark it valid.
    ///
    /// # Panics
    ///
    /// Panics if index is not within capacity.
    #[inline]
    pub fn set(&mut self, index: usize, value: T) {
        // value first, so an out-of-capacity index leaves validity untouched
        self.set_value(index, value);
        set_validity_bit_to_one(self.validity.as_slice_mut(), index);
    }

    /// Same as [`set`](Self::set), but grows buffers if index
    /// is not within capacity.
    #[inline]
    pub fn set_safe(&mut self, index: usize, value: T) -> Result<()> {
        self.handle_safe(index)?;
        self.set(index, value);
        Ok(())
    }

    /// Set value at given index if `is_set` is positive,
    /// otherwise set it to null.
    #[inline]
    pub fn set_if(&mut self, index: usize, is_set: i32, value: T) {
        if is_set > 0 {
            self.set(index, value);
        } else {
            set_validity_bit(self.validity.as_slice_mut(), index, 0);
        }
    }

    #[inline]
    pub fn set_if_safe(&mut self, index: usize, is_set: i32, value: T) -> Result<()> {
        self.handle_safe(index)?;
        self.set_if(index, is_set, value);
        Ok(())
    }

    /// Set slot at given index to null.
    /// Value bytes of the slot are left as is.
    #[inline]
    pub fn set_null(&mut self, index: usize) -> Result<()> {
        self.handle_safe(index)?;
        set_validity_bit(self.validity.as_slice_mut(), index, 0);
        Ok(())
    }

    #[inline]
    pub fn set_holder(&mut self, index: usize, holder: &Holder<T>) {
        self.set(index, holder.value);
    }

    #[inline]
    pub fn set_holder_safe(&mut self, index: usize, holder: &Holder<T>) -> Result<()> {
        self.handle_safe(index)?;
        self.set_holder(index, holder);
        Ok(())
    }

    /// Set slot at given index according to the nullable holder.
    /// Negative `is_set` is rejected without touching the slot.
    #[inline]
    pub fn set_nullable_holder(&mut self, index: usize, holder: &NullableHolder<T>) -> Result<()> {
        if holder.is_set < 0 {
            return Err(Error::InvalidArgument(format!(
                "negative is_set {} of holder",
                holder.is_set
            )));
        }
        self.set_if(index, holder.is_set, holder.value);
        Ok(())
    }

    #[inline]
    pub fn set_nullable_holder_safe(
        &mut self,
        index: usize,
        holder: &NullableHolder<T>,
    ) -> Result<()> {
        if holder.is_set < 0 {
            return Err(Error::InvalidArgument(format!(
                "negative is_set {} of holder",
                holder.is_set
            )));
        }
        self.handle_safe(index)?;
        self.set_if(index, holder.is_set, holder.value);
        Ok(())
    }

    /* copy between vectors */

    /// Copy validity and value bytes from slot `from_index` of `from`
    /// to slot `this_index` of this vector.
    ///
    /// Value bytes are copied even if the source slot is null.
    ///
    /// # Panics
    ///
    /// Panics if either index is not within capacity.
    #[inline]
    pub fn copy_from(&mut self, from_index: usize, this_index: usize, from: &FixedWidthVector<T>) {
        let bit = is_set(from.validity.as_slice(), from_index);
        let src = &from.values.as_slice()[from_index * T::WIDTH..(from_index + 1) * T::WIDTH];
        self.values.as_slice_mut()[this_index * T::WIDTH..(this_index + 1) * T::WIDTH]
            .copy_from_slice(src);
        set_validity_bit(self.validity.as_slice_mut(), this_index, bit);
    }

    /// Same as [`copy_from`](Self::copy_from), but grows buffers if
    /// `this_index` is not within capacity.
    #[inline]
    pub fn copy_from_safe(
        &mut self,
        from_index: usize,
        this_index: usize,
        from: &FixedWidthVector<T>,
    ) -> Result<()> {
        self.handle_safe(this_index)?;
        self.copy_from(from_index, this_index, from);
        Ok(())
    }

    /* transfer */

    /// Create a transfer pair whose destination is a new empty vector
    /// with given name and allocator. Field type and config are
    /// inherited from this vector.
    #[inline]
    pub fn get_transfer_pair(
        &mut self,
        name: impl Into<String>,
        alloc: Allocator,
    ) -> TransferPair<'_, T> {
        let to = FixedWidthVector::new_unchecked(name, self.field.field_type(), alloc, self.config);
        TransferPair::new(self, to)
    }

    /// Create a transfer pair with given destination, either owned
    /// or mutably borrowed.
    #[inline]
    pub fn make_transfer_pair<D>(&mut self, to: D) -> TransferPair<'_, T, D>
    where
        D: BorrowMut<FixedWidthVector<T>>,
    {
        TransferPair::new(self, to)
    }

    /// Move both buffers and value count to target, releasing
    /// target's buffers first. This vector is left empty.
    pub(crate) fn transfer_to(&mut self, target: &mut FixedWidthVector<T>) {
        log::debug!(
            "transfer {} slots from vector {} to {}",
            self.value_count,
            self.field.name(),
            target.field.name()
        );
        target.clear();
        let values = std::mem::replace(&mut self.values, self.alloc.empty());
        let validity = std::mem::replace(&mut self.validity, self.alloc.empty());
        target.values = values;
        target.validity = validity;
        target.charge_buffers();
        target.value_count = self.value_count;
        target.last_capacity = target.value_capacity();
        self.clear();
    }

    /// Move accounting of both buffers to this vector's allocator.
    #[inline]
    fn charge_buffers(&mut self) {
        let fit_values = self.values.transfer_accounting(&self.alloc);
        let fit_validity = self.validity.transfer_accounting(&self.alloc);
        if !(fit_values && fit_validity) {
            log::warn!(
                "vector {} holds {} bytes beyond allocator limit {}",
                self.field.name(),
                self.alloc.allocated_bytes(),
                self.alloc.limit()
            );
        }
    }
}

impl<T: NoOverflow> FixedWidthVector<T> {
    /// Read value at given slot of a value buffer as unsigned number
    /// of the next wider type, ignoring validity.
    #[inline]
    pub fn get_no_overflow(buffer: &[u8], index: usize) -> T::Wide {
        T::get_no_overflow(buffer, index)
    }

    /// Returns value at given index as unsigned number of the next
    /// wider type, or None if it's null.
    #[inline]
    pub fn get_object_no_overflow(&self, index: usize) -> Option<T::Wide> {
        if self.is_set(index) == 0 {
            None
        } else {
            Some(T::get_no_overflow(self.values.as_slice(), index))
        }
    }
}

impl<T: IntKind> FixedWidthVector<T> {
    /// Set value at given index, truncating high bits if the kind
    /// is narrower than 64 bits. Grows buffers if needed.
    #[inline]
    pub fn set_with_possible_truncate(&mut self, index: usize, value: i64) -> Result<()> {
        self.set_safe(index, T::from_i64_truncate(value))
    }

    /// Same as [`set_with_possible_truncate`](Self::set_with_possible_truncate),
    /// but index must be within capacity.
    #[inline]
    pub fn set_unsafe_with_possible_truncate(&mut self, index: usize, value: i64) {
        self.set(index, T::from_i64_truncate(value))
    }

    /// Returns value at given index as i64.
    #[inline]
    pub fn get_value_as_long(&self, index: usize) -> Result<i64> {
        self.get(index).map(IntKind::as_i64)
    }

    /// Set a dictionary encoded value at given index.
    /// Grows buffers if needed.
    #[inline]
    pub fn set_encoded_value(&mut self, index: usize, value: i32) -> Result<()> {
        self.set_safe(index, T::from_i64_truncate(value as i64))
    }
}

impl<T: FixedWidth> ValueVector for FixedWidthVector<T> {
    #[inline]
    fn field(&self) -> &Field {
        &self.field
    }

    #[inline]
    fn allocator(&self) -> &Allocator {
        &self.alloc
    }

    #[inline]
    fn value_count(&self) -> usize {
        self.value_count
    }

    #[inline]
    fn set_value_count(&mut self, value_count: usize) -> Result<()> {
        while value_count > self.value_capacity() {
            self.reallocate()?;
        }
        self.value_count = value_count;
        Ok(())
    }

    #[inline]
    fn value_capacity(&self) -> usize {
        usize::min(
            self.values.cap_u8() / T::WIDTH,
            self.validity.cap_u8().saturating_mul(8),
        )
    }

    #[inline]
    fn null_count(&self) -> usize {
        bitmap_false_count(self.validity.as_slice(), self.value_count)
    }

    #[inline]
    fn is_null(&self, index: usize) -> bool {
        self.is_set(index) == 0
    }

    #[inline]
    fn buffer_size(&self) -> usize {
        self.value_count * T::WIDTH + validity_bytes(self.value_count)
    }

    #[inline]
    fn clear(&mut self) {
        self.values = self.alloc.empty();
        self.validity = self.alloc.empty();
        self.value_count = 0;
    }

    #[inline]
    fn reset(&mut self) {
        self.values.zero();
        self.validity.zero();
        self.value_count = 0;
    }
}
