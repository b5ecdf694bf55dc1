//! Property tests for the prefix and length invariants of [`PrintBuffer`].

use bprint::PrintBuffer;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Append {
    Raw(Vec<u8>),
    Repeat(u8, usize),
    Formatted(u64, String),
}

impl Append {
    fn apply<const N: usize>(&self, buffer: &mut PrintBuffer<'_, N>, model: &mut Vec<u8>) {
        match self {
            Self::Raw(bytes) => {
                buffer.append_raw(bytes);
                model.extend_from_slice(bytes);
            }
            Self::Repeat(byte, count) => {
                buffer.append_repeated_char(*byte, *count);
                model.extend(std::iter::repeat_n(*byte, *count));
            }
            Self::Formatted(number, text) => {
                buffer.append_formatted(format_args!("{number}:{text}"));
                model.extend_from_slice(format!("{number}:{text}").as_bytes());
            }
        }
    }
}

fn append_strategy() -> impl Strategy<Value = Append> {
    prop_oneof![
        proptest::collection::vec(1u8..=255, 0..48).prop_map(Append::Raw),
        (any::<u8>(), 0usize..64).prop_map(|(byte, count)| Append::Repeat(byte, count)),
        (any::<u64>(), "[a-z ]{0,24}").prop_map(|(number, text)| Append::Formatted(number, text)),
    ]
}

fn check_invariants<const N: usize>(
    buffer: &PrintBuffer<'_, N>,
    model: &[u8],
) -> Result<(), TestCaseError> {
    prop_assert_eq!(buffer.len(), model.len());
    prop_assert!(buffer.capacity() <= buffer.capacity_max());

    let stored = buffer.as_bytes();
    let expected_stored = model.len().min(buffer.capacity().saturating_sub(1));
    prop_assert_eq!(stored, &model[..expected_stored]);
    prop_assert_eq!(buffer.is_complete(), model.len() < buffer.capacity());

    if buffer.capacity() > 0 {
        let with_nul = buffer.as_bytes_with_nul();
        prop_assert_eq!(with_nul.last().copied(), Some(0));
    }
    Ok(())
}

proptest! {
    #[test]
    fn content_is_exact_prefix_under_any_ceiling(
        ceiling in 0usize..256,
        appends in proptest::collection::vec(append_strategy(), 0..16),
    ) {
        let mut buffer = PrintBuffer::<8>::with_inline(0, ceiling);
        let mut model = Vec::new();
        for append in &appends {
            append.apply(&mut buffer, &mut model);
            check_invariants(&buffer, &model)?;
        }
    }

    #[test]
    fn zero_inline_capacity_matches_model(
        ceiling in 2usize..256,
        appends in proptest::collection::vec(append_strategy(), 0..16),
    ) {
        let mut buffer = PrintBuffer::<0>::with_inline(0, ceiling);
        let mut model = Vec::new();
        for append in &appends {
            append.apply(&mut buffer, &mut model);
            check_invariants(&buffer, &model)?;
            if model.len() < ceiling {
                prop_assert_eq!(buffer.as_bytes(), model.as_slice());
            }
        }
    }

    #[test]
    fn external_storage_matches_model(
        size in 0usize..64,
        appends in proptest::collection::vec(append_strategy(), 0..8),
    ) {
        let mut storage = vec![0xaa; size];
        let mut buffer = PrintBuffer::for_buffer(&mut storage);
        let mut model = Vec::new();
        for append in &appends {
            append.apply(&mut buffer, &mut model);
            check_invariants(&buffer, &model)?;
        }
        prop_assert_eq!(buffer.capacity(), size);
    }

    #[test]
    fn finalized_content_equals_stored_prefix(
        ceiling in 2usize..128,
        appends in proptest::collection::vec(append_strategy(), 1..8),
    ) {
        let mut buffer = PrintBuffer::<4>::with_inline(0, ceiling);
        let mut model = Vec::new();
        for append in &appends {
            append.apply(&mut buffer, &mut model);
        }
        let stored = buffer.as_bytes().to_vec();
        let owned = buffer.into_bytes().expect("finalisation succeeds");
        prop_assert_eq!(owned, stored);
    }

    #[test]
    fn clear_restores_an_empty_terminated_buffer(
        appends in proptest::collection::vec(append_strategy(), 0..8),
    ) {
        let mut buffer = PrintBuffer::<4>::with_inline(0, 32);
        let mut model = Vec::new();
        for append in &appends {
            append.apply(&mut buffer, &mut model);
        }
        let capacity = buffer.capacity();
        buffer.clear();
        prop_assert!(buffer.is_empty());
        prop_assert_eq!(buffer.capacity(), capacity);
        prop_assert_eq!(buffer.as_bytes_with_nul(), b"\0".as_slice());
    }
}
