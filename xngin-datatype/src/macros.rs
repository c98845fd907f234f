macro_rules! impl_typed {
    ($ty:ty, $p:expr) => {
        impl $crate::Typed for $ty {
            #[inline]
            fn pty() -> $crate::PreciseType {
                $p
            }
        }
    };
}
