use crate::fixed::FixedWidthVector;
use crate::holder::NullableHolder;
use crate::kind::FixedWidth;
use crate::vector::ValueVector;
use xngin_datatype::Field;

/// FieldReader reads values of one vector by position.
///
/// It is bound to the vector when created and never copies data.
/// As an iterator, it yields values from current position until
/// value count of the vector.
pub struct FieldReader<'a, T: FixedWidth> {
    vector: &'a FixedWidthVector<T>,
    position: usize,
}

impl<'a, T: FixedWidth> FieldReader<'a, T> {
    #[inline]
    pub fn new(vector: &'a FixedWidthVector<T>) -> Self {
        FieldReader {
            vector,
            position: 0,
        }
    }

    #[inline]
    pub fn field(&self) -> &'a Field {
        self.vector.field()
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    /// Returns whether value at current position is valid.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.vector.is_set(self.position) != 0
    }

    #[inline]
    pub fn read(&self) -> NullableHolder<T> {
        self.vector.get_nullable(self.position)
    }

    #[inline]
    pub fn read_object(&self) -> Option<T> {
        self.vector.get_object(self.position)
    }
}

impl<'a, T: FixedWidth> Iterator for FieldReader<'a, T> {
    type Item = Option<T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.vector.value_count() {
            return None;
        }
        let res = self.read_object();
        self.position += 1;
        Some(res)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.vector.value_count().saturating_sub(self.position);
        (n, Some(n))
    }
}

impl<'a, T: FixedWidth> ExactSizeIterator for FieldReader<'a, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use xngin_common::alloc::Allocator;

    #[test]
    fn test_field_reader() {
        let mut vec = FixedWidthVector::<i64>::new("c0", Allocator::unlimited());
        vec.set_safe(0, -3).unwrap();
        vec.set_null(1).unwrap();
        vec.set_safe(2, 7).unwrap();
        vec.set_value_count(3).unwrap();

        let mut reader = vec.reader();
        assert_eq!("c0", reader.field().name());
        assert!(reader.is_set());
        assert_eq!(Some(-3), reader.read_object());
        reader.set_position(1);
        assert!(!reader.is_set());
        assert!(reader.read().is_null());
        reader.set_position(2);
        assert_eq!(NullableHolder::new(7), reader.read());

        reader.set_position(0);
        assert_eq!(3, reader.len());
        let vals: Vec<_> = reader.collect();
        assert_eq!(vec![Some(-3), None, Some(7)], vals);
    }
}
