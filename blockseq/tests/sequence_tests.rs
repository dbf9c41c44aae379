//! Integration tests for GrowableSequence

mod common;

use blockseq::prelude::*;
use blockseq::{DEFAULT_GROWTH_BLOCK, DEFAULT_INITIAL_BLOCK, GrowthSettings};
use common::{Captured, stored};

#[test]
fn test_empty_sequence() {
    let seq: GrowableSequence<String> = GrowableSequence::new();
    assert_eq!(seq.len(), 0);
    assert!(seq.is_empty());
    assert!(matches!(
        seq.get(0),
        Err(Error::IndexOutOfRange { index: 0, len: 0 })
    ));
    assert!(seq.to_array().is_empty());
    assert!(seq.to_vec().is_empty());
}

#[test]
fn test_one_entry() {
    let mut seq = GrowableSequence::new();
    seq.push("A".to_string());
    assert_eq!(seq.len(), 1);
    assert!(!seq.is_empty());
    assert_eq!(seq.get(0).unwrap(), "A");
    assert_eq!(&*seq.to_array(), &["A".to_string()]);
}

#[test]
fn test_two_entries() {
    let mut seq = GrowableSequence::new();
    seq.push("A");
    seq.push("B");
    assert_eq!(seq.len(), 2);
    assert_eq!(*seq.get(0).unwrap(), "A");
    assert_eq!(*seq.get(1).unwrap(), "B");
    assert_eq!(&*seq.to_array(), &["A", "B"]);
    assert_eq!(seq[1], "B");
}

#[test]
fn test_illegal_indexes() {
    let seq = GrowableSequence::from(vec!["A", "B"]);
    for index in [2, 3, 8, usize::MAX] {
        assert!(matches!(
            seq.get(index),
            Err(Error::IndexOutOfRange { len: 2, .. })
        ));
    }
}

#[test]
#[should_panic]
fn test_index_operator_panics_out_of_range() {
    let seq = GrowableSequence::from(vec![1u8]);
    let _value: u8 = seq[1];
}

#[test]
fn test_ten_thousand_entries() {
    let mut seq = GrowableSequence::new();
    for i in 1..=10_000u32 {
        seq.push(i);
        assert_eq!(*seq.get(i as usize - 1).unwrap(), i);
        assert_eq!(seq.len(), i as usize);
    }
    // around the initial block and the first growth blocks
    for index in [9, 10, 11, 13, 99, 100, 101, 109, 110, 111] {
        assert_eq!(*seq.get(index).unwrap(), index as u32 + 1);
    }
}

#[test]
fn test_growth_boundary_preserves_elements() {
    let initial = 4;
    let mut seq = GrowableSequence::with_blocks(initial, 3).unwrap();
    for i in 0..=initial {
        seq.push(format!("e{i}"));
    }
    // first block is full
    assert_eq!(seq.capacity(), initial + 1);

    seq.push("after".to_string());
    assert_eq!(seq.capacity(), initial + 1 + 1 + 3);

    for i in 0..=initial {
        assert_eq!(seq.get(i).unwrap(), &format!("e{i}"));
    }
    assert_eq!(seq.get(initial + 1).unwrap(), "after");
}

#[test]
fn test_multiple_growth_boundaries() {
    let mut seq = GrowableSequence::with_block(1).unwrap();
    let mut capacities = vec![];
    for i in 0..50u64 {
        seq.push(i);
        capacities.push(seq.capacity());
    }
    assert_eq!(seq.to_vec(), (0..50).collect::<Vec<_>>());

    // every block adds exactly one spare slot beyond the element that did not fit
    assert_eq!(&capacities[..6], &[2, 2, 4, 4, 6, 6]);
    assert!(capacities.windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn test_default_blocks() {
    let mut seq = GrowableSequence::new();
    seq.push(0u64);
    assert_eq!(seq.capacity(), 1 + DEFAULT_INITIAL_BLOCK);

    seq.append_all((1..=DEFAULT_INITIAL_BLOCK as u64).collect::<Vec<_>>());
    assert_eq!(seq.capacity(), 1 + DEFAULT_INITIAL_BLOCK);

    seq.push(99);
    assert_eq!(
        seq.capacity(),
        1 + DEFAULT_INITIAL_BLOCK + 1 + DEFAULT_GROWTH_BLOCK
    );
}

#[test]
fn test_append_empty_source() {
    let mut seq: GrowableSequence<&str> = GrowableSequence::new();
    assert!(!seq.append_all(Vec::new()));
    assert_eq!(seq.len(), 0);
    assert_eq!(seq.capacity(), 0);
    assert!(seq.get(0).is_err());

    seq.push("A");
    assert!(!seq.append_all(std::iter::empty()));
    assert_eq!(seq.len(), 1);
}

#[test]
fn test_append_source_after_existing() {
    let mut seq = GrowableSequence::new();
    seq.push("Z");
    assert!(seq.append_all(stored()));
    assert_eq!(seq.len(), 5);
    assert_eq!(seq.as_slice(), &["Z", "A", "B", "A", "C"]);
}

#[test]
fn test_append_source_single_reallocation() {
    let mut seq = GrowableSequence::with_blocks(1, 2).unwrap();
    seq.push(0u32);
    seq.push(1);
    assert!(seq.append_all(2..102));
    // one step: 2 live + 100 incoming + 2 spare
    assert_eq!(seq.capacity(), 104);
    assert_eq!(seq.len(), 102);
}

#[test]
fn test_from_source_constructors() {
    let seq = GrowableSequence::from_source(stored());
    assert_eq!(seq.as_slice(), stored().as_slice());
    assert_eq!(seq.capacity(), 4 + DEFAULT_INITIAL_BLOCK);

    let seq = GrowableSequence::from_source_with_block(stored(), 2).unwrap();
    assert_eq!(seq.capacity(), 6);
    assert_eq!(seq.policy(), GrowthPolicy::uniform(2).unwrap());

    let seq = GrowableSequence::from_source_with_blocks(stored(), 1, 50).unwrap();
    assert_eq!(seq.capacity(), 5);

    let seq: GrowableSequence<&str> = GrowableSequence::from_source(Vec::new());
    assert_eq!(seq.capacity(), 0);

    assert!(GrowableSequence::from_source_with_block(stored(), 0).is_err());
    assert!(GrowableSequence::from_source_with_blocks(stored(), 0, 1).is_err());
}

#[test]
fn test_invalid_blocks() {
    for (initial, growth) in [(10, 0), (0, 0), (0, 10)] {
        assert!(matches!(
            GrowableSequence::<u8>::with_blocks(initial, growth),
            Err(Error::InvalidArgument { .. })
        ));
    }
    assert!(matches!(
        GrowableSequence::<u8>::with_block(0),
        Err(Error::InvalidArgument { value: 0, .. })
    ));

    for bad in [i64::MIN, -1, 0] {
        for settings in [
            GrowthSettings {
                initial_block: 10,
                growth_block: bad,
            },
            GrowthSettings {
                initial_block: bad,
                growth_block: bad,
            },
            GrowthSettings {
                initial_block: bad,
                growth_block: 10,
            },
        ] {
            assert!(matches!(
                GrowthPolicy::try_from(settings),
                Err(Error::InvalidArgument { .. })
            ));
        }
    }
}

#[test]
fn test_valid_blocks() {
    for (initial, growth) in [(10, 100), (1, 100), (100, 1000), (2, 5), (10, 10), (100, 10)] {
        let seq = GrowableSequence::<u8>::with_blocks(initial, growth).unwrap();
        assert_eq!(seq.policy().initial_block(), initial);
        assert_eq!(seq.policy().growth_block(), growth);
    }
}

#[test]
fn test_search_empty() {
    let seq: GrowableSequence<&str> = GrowableSequence::new();
    assert_eq!(seq.index_of(&"A"), None);
    assert_eq!(seq.last_index_of(&"A"), None);
    assert!(!seq.contains(&"A"));
    assert!(seq.contains_all(&[]));
    assert!(!seq.contains_all(&["A"]));
}

#[test]
fn test_search_found_and_not_found() {
    let seq = GrowableSequence::from(stored());
    assert_eq!(seq.index_of(&"A"), Some(0));
    assert_eq!(seq.last_index_of(&"A"), Some(2));
    assert_eq!(seq.index_of(&"C"), Some(3));
    assert_eq!(seq.last_index_of(&"B"), Some(1));
    assert_eq!(seq.index_of(&"D"), None);
    assert_eq!(seq.last_index_of(&"D"), None);
    assert!(seq.contains(&"C"));
    assert!(!seq.contains(&"D"));
}

#[test]
fn test_search_uses_value_equality() {
    let seq = GrowableSequence::from(vec![String::from("A"), String::from("B")]);
    let probe = "B".to_string();
    assert_eq!(seq.index_of(&probe), Some(1));
}

#[test]
fn test_contains_all() {
    let seq = GrowableSequence::from(stored());
    assert!(seq.contains_all(&["C", "A"]));
    assert!(!seq.contains_all(&["C", "X"]));
    assert!(seq.try_contains_all(Some(&["B"])).unwrap());
    assert!(!seq.try_contains_all(Some(&["A", "Z"])).unwrap());
    assert!(matches!(
        seq.try_contains_all::<&[&str]>(None),
        Err(Error::NullReference {
            argument: "candidates"
        })
    ));
}

#[test]
fn test_clear() {
    let mut seq = GrowableSequence::from(stored());
    seq.clear();
    assert!(seq.is_empty());
    assert!(seq.get(0).is_err());
    assert_eq!(seq.index_of(&"A"), None);
    seq.push("N");
    assert_eq!(seq.as_slice(), &["N"]);
}

#[test]
fn test_to_array_into_fits_exactly() {
    let seq = GrowableSequence::from(vec!["A", "B"]);
    let mut buffer = [None, None];
    let export = seq.to_array_into(&mut buffer);
    assert!(!export.is_allocated());
    assert_eq!(export.as_slice(), &[Some("A"), Some("B")]);
}

#[test]
fn test_to_array_into_empty_buffer() {
    let seq = GrowableSequence::from(vec!["A", "B"]);
    let mut buffer: [Option<&str>; 0] = [];
    match seq.to_array_into(&mut buffer) {
        ArrayExport::Allocated(fresh) => assert_eq!(&*fresh, &[Some("A"), Some("B")]),
        ArrayExport::Filled(_) => panic!("expected a fresh allocation"),
    }
}

#[test]
fn test_to_array_into_longer_buffer() {
    let seq = GrowableSequence::from(vec!["A", "B"]);
    let mut buffer = [Some("A0"), Some("A1"), Some("A2"), Some("A3"), Some("A4")];
    seq.to_array_into(&mut buffer);
    assert_eq!(buffer, [Some("A"), Some("B"), None, Some("A3"), Some("A4")]);
}

#[test]
fn test_unsupported_operations() {
    let mut seq = GrowableSequence::from(stored());
    let before = seq.clone();

    let results = [
        seq.insert(0, "X").err(),
        seq.remove_at(1).err(),
        seq.remove_item(&"A").err(),
        seq.remove_all(&["A"]).err(),
        seq.retain_all(&["A"]).err(),
        ListMutation::set(&mut seq, 0, "X").err(),
        seq.insert_all(0, vec!["X", "Y"]).err(),
        seq.sub_list(0, 1).err(),
    ];
    let names = [
        "insert",
        "remove_at",
        "remove_item",
        "remove_all",
        "retain_all",
        "set",
        "insert_all",
        "sub_list",
    ];
    for (result, name) in results.into_iter().zip(names) {
        assert!(
            matches!(result, Some(Error::Unsupported { operation }) if operation == name),
            "{name} should be refused"
        );
    }
    assert_eq!(seq, before);
    assert_eq!(seq.capacity(), before.capacity());
}

#[test]
fn test_iteration() {
    let seq = GrowableSequence::from(stored());
    let collected: Vec<_> = seq.iter().copied().collect();
    assert_eq!(collected, stored());

    let mut i = 0;
    for current in &seq {
        assert_eq!(*current, stored()[i]);
        i += 1;
    }
    assert_eq!(i, 4);

    let owned: Vec<_> = seq.into_iter().collect();
    assert_eq!(owned, stored());
}

#[test]
fn test_std_trait_interop() {
    let mut seq: GrowableSequence<u32> = (1..=3).collect();
    seq.extend(vec![4, 5]);
    seq.extend(std::iter::empty());
    assert_eq!(AsRef::<[u32]>::as_ref(&seq), &[1, 2, 3, 4, 5]);

    let from_slice = GrowableSequence::from(&[1u32, 2, 3, 4, 5][..]);
    assert_eq!(from_slice, seq);

    let default: GrowableSequence<u32> = Default::default();
    assert_eq!(default.policy(), GrowthPolicy::default());
}

#[test]
fn test_generic_code_over_live_sequence() {
    fn total<S: LiveSequence<u32>>(seq: &S) -> u32 {
        (0..seq.size()).filter_map(|i| seq.fetch(i).ok()).sum()
    }

    let seq = GrowableSequence::from(vec![1u32, 2, 3]);
    assert_eq!(total(&seq), 6);
    let shared = seq.into_shared();
    assert_eq!(total(&shared), 6);
}

#[test]
fn test_allocations_are_traced() {
    let captured = Captured::default();
    let sink = captured.clone();
    let subscriber = blockseq_core::logger::subscriber("blockseq=trace", move || sink.clone());

    tracing::subscriber::with_default(subscriber, || {
        let mut seq = GrowableSequence::with_blocks(1, 5).unwrap();
        seq.push(0u64);
        seq.push(1);
        // full: 2 live + 1 incoming + 5
        seq.push(2);
        // spare room, no event
        seq.push(3);
    });

    let text = captured.text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2, "{text}");
    assert!(lines[0].contains("TRACE blockseq::sequence: allocating sequence storage capacity=2"));
    assert!(lines[1].contains("growing sequence storage from=2 to=8 live=2"));
}
