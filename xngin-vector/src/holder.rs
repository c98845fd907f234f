/// Holder carries a value which is always valid.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Holder<T> {
    pub value: T,
}

impl<T> Holder<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        Holder { value }
    }
}

/// NullableHolder carries a value together with its validity.
///
/// `is_set` greater than 0 means the value is valid, 0 means null.
/// Negative `is_set` is reserved and rejected by setters.
/// The value of a null holder is meaningless.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NullableHolder<T> {
    pub is_set: i32,
    pub value: T,
}

impl<T: Default> NullableHolder<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        NullableHolder { is_set: 1, value }
    }

    #[inline]
    pub fn null() -> Self {
        NullableHolder {
            is_set: 0,
            value: T::default(),
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.is_set <= 0
    }

    #[inline]
    pub fn into_option(self) -> Option<T> {
        if self.is_set > 0 {
            Some(self.value)
        } else {
            None
        }
    }
}

impl<T: Default> From<Option<T>> for NullableHolder<T> {
    #[inline]
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => NullableHolder::new(value),
            None => NullableHolder::null(),
        }
    }
}

impl<T> From<Holder<T>> for NullableHolder<T> {
    #[inline]
    fn from(src: Holder<T>) -> Self {
        NullableHolder {
            is_set: 1,
            value: src.value,
        }
    }
}
