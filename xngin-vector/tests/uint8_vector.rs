use xngin_vector::{
    Allocator, Error, NullableHolder, UInt8Vector, ValueVector, VectorConfig,
};

#[test]
fn test_uint8_vector_scenario() {
    let alloc = Allocator::unlimited();
    let mut vec = UInt8Vector::new("u8", alloc.clone());
    vec.allocate_new_with_capacity(4).unwrap();
    assert_eq!(8, vec.type_width());
    assert_eq!(4, vec.value_capacity());

    vec.set_safe(0, 5).unwrap();
    vec.set_null(1).unwrap();
    vec.set_safe(2, 18446744073709551615).unwrap();

    assert_eq!(NullableHolder::new(5), vec.get_nullable(0));
    assert!(vec.get_nullable(1).is_null());
    assert_eq!(Some(18446744073709551615u128), vec.get_object_no_overflow(2));
    assert_eq!(Some(u64::MAX as u128), vec.get_object_no_overflow(2));
    // untouched capacity defaults to null
    assert!(vec.get_nullable(3).is_null());
    assert_eq!(Err(Error::NullValueRead(1)), vec.get(1));
    assert_eq!(Err(Error::NullValueRead(3)), vec.get(3));

    // growing far beyond capacity keeps lower slots
    vec.set_safe(1 << 16, 77).unwrap();
    assert_eq!(Ok(5), vec.get(0));
    assert!(vec.is_null(1));
    assert_eq!(Ok(u64::MAX), vec.get(2));
    assert_eq!(Ok(77), vec.get(1 << 16));

    drop(vec);
    assert_eq!(0, alloc.allocated_bytes());
}

#[test]
fn test_uint8_vector_transfer_and_split() {
    let alloc = Allocator::new(1 << 20);
    let mut src = UInt8Vector::with_config(
        "src",
        alloc.clone(),
        VectorConfig::new().initial_capacity(16),
    );
    for i in 0..20 {
        if i % 4 == 0 {
            src.set_null(i).unwrap();
        } else {
            src.set_safe(i, i as u64 * 1000).unwrap();
        }
    }
    src.set_value_count(20).unwrap();
    assert_eq!(5, src.null_count());

    let mut split = src.get_transfer_pair("split", alloc.clone());
    split.split_and_transfer(3, 10).unwrap();
    let part = split.into_to();
    assert_eq!(10, part.value_count());
    for k in 0..10 {
        let i = k + 3;
        if i % 4 == 0 {
            assert!(part.is_null(k));
        } else {
            assert_eq!(Some(i as u64 * 1000), part.get_object(k));
        }
    }

    let mut whole = src.get_transfer_pair("whole", alloc.clone());
    whole.transfer();
    let moved = whole.into_to();
    assert_eq!(20, moved.value_count());
    assert_eq!(5, moved.null_count());
    assert_eq!(Some(19000), moved.get_object(19));
    assert_eq!(0, src.value_count());
    assert_eq!(None, src.get_object(19));

    drop(part);
    drop(moved);
    drop(src);
    assert_eq!(0, alloc.allocated_bytes());
}
