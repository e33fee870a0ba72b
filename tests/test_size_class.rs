//! Tests for the size-class resolver - the single source of shift arithmetic

use ibzip::Error;
use ibzip::SizeClass;
use proptest::prelude::*;

const VALID_SIZES: [usize; 5] = [1024, 2048, 4096, 8192, 16384];

#[test]
fn test_round_trip_for_all_classes() {
    for bytes in VALID_SIZES {
        let class = SizeClass::from_physical(bytes).unwrap();
        assert_eq!(class.physical_size(), bytes);
    }
}

#[test]
fn test_shift_codes_follow_doubling_rule() {
    // 1 KiB -> 0, 2 KiB -> 1, 4 KiB -> 2, 8 KiB -> 3
    assert_eq!(SizeClass::Zip1K.shift_size(), Some(0));
    assert_eq!(SizeClass::Zip2K.shift_size(), Some(1));
    assert_eq!(SizeClass::Zip4K.shift_size(), Some(2));
    assert_eq!(SizeClass::Zip8K.shift_size(), Some(3));

    for class in SizeClass::COMPRESSED {
        let shift = class.shift_size().unwrap();
        assert_eq!(1024usize << shift, class.physical_size());
    }
}

#[test]
fn test_full_size_has_no_shift_code() {
    // 16 KiB is represented by a sentinel, never by extending the doubling
    assert_eq!(SizeClass::Full.shift_size(), None);
    assert!(!SizeClass::Full.is_compressed());
}

#[test]
fn test_shift_round_trip() {
    for code in 0u32..=3 {
        let class = SizeClass::from_shift_size(code).unwrap();
        assert_eq!(class.shift_size(), Some(code));
    }
    assert!(SizeClass::from_shift_size(4).is_err());
    assert!(SizeClass::from_shift_size(10).is_err());
    assert!(SizeClass::from_shift_size(u32::MAX).is_err());
}

proptest! {
    #[test]
    fn prop_invalid_sizes_always_rejected(bytes in 0usize..65536) {
        prop_assume!(!VALID_SIZES.contains(&bytes));
        prop_assert_eq!(
            SizeClass::from_physical(bytes),
            Err(Error::InvalidSize(bytes))
        );
    }

    #[test]
    fn prop_round_trip_is_identity(idx in 0usize..5) {
        let bytes = VALID_SIZES[idx];
        let class = SizeClass::from_physical(bytes).unwrap();
        prop_assert_eq!(class.physical_size(), bytes);
    }
}
