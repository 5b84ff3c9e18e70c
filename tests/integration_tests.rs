use skasort::prelude::*;
use rand::Rng;
use skasort::{SortSettings, radix_sort_by_key_with_settings, radix_sort_with_settings};
use std::collections::{BTreeSet, LinkedList, VecDeque};
use std::fmt::Debug;
use std::rc::Rc;

fn all_settings() -> [SortSettings; 3] {
    [
        SortSettings::default(),
        SortSettings::american_flag_only(),
        SortSettings::ska_byte_only(),
    ]
}

/// Sorts `input` with every partitioning policy and checks the result against `slice::sort`.
fn assert_sorts_like_std<T: RadixKey + Ord + Clone + Debug>(input: &[T]) {
    let mut expected = input.to_vec();
    expected.sort();

    for settings in all_settings() {
        let mut actual = input.to_vec();
        radix_sort_with_settings(&mut actual, &settings);
        assert_eq!(actual, expected, "settings: {settings:?}");
    }
}

#[test]
fn test_signed_bytes() {
    let mut data = vec![5i8, -3, 0, 127, -128];
    radix_sort(&mut data);
    assert_eq!(data, vec![-128, -3, 0, 5, 127]);

    assert_sorts_like_std(&[5i8, -3, 0, 127, -128]);
}

#[test]
fn test_floats_with_zeros_and_infinities() {
    let input = vec![0.0f64, -0.0, -1.5, f64::INFINITY, f64::NEG_INFINITY, 2.5];

    for settings in all_settings() {
        let mut data = input.clone();
        radix_sort_with_settings(&mut data, &settings);

        assert_eq!(data[0], f64::NEG_INFINITY);
        assert_eq!(data[1], -1.5);
        // Either zero may come first, they compare equal.
        assert_eq!(data[2], 0.0);
        assert_eq!(data[3], 0.0);
        assert_eq!(data[4], 2.5);
        assert_eq!(data[5], f64::INFINITY);
    }
}

#[test]
fn test_strings_with_prefixes() {
    let mut data = vec!["there", "the", "them", ""];
    radix_sort(&mut data);
    assert_eq!(data, vec!["", "the", "them", "there"]);
}

#[test]
fn test_bool_tuples() {
    let mut data = vec![(true, 5, true), (false, 6, false), (true, 4, false)];
    radix_sort(&mut data);
    assert_eq!(data, vec![(false, 6, false), (true, 4, false), (true, 5, true)]);
}

#[test]
fn test_optional_pairs() {
    let mut data = vec![(None, 4), (Some(5), 2), (None, 3)];
    radix_sort(&mut data);
    assert_eq!(data, vec![(None, 3), (None, 4), (Some(5), 2)]);
}

#[derive(Debug, PartialEq)]
enum Scalar {
    Int(i32),
    Float(f64),
    Str(String),
}

radix_key_enum!(Scalar { Int(i32), Float(f64), Str(String) });

#[test]
fn test_variants_by_alternative_then_payload() {
    let mut data = vec![
        Scalar::Int(5),
        Scalar::Str("foo".to_string()),
        Scalar::Float(1.0),
        Scalar::Int(-1),
    ];
    radix_sort(&mut data);
    assert_eq!(
        data,
        vec![
            Scalar::Int(-1),
            Scalar::Int(5),
            Scalar::Float(1.0),
            Scalar::Str("foo".to_string()),
        ]
    );
}

#[test]
fn test_empty_and_single() {
    let mut empty: Vec<u32> = Vec::new();
    radix_sort(&mut empty);
    assert!(empty.is_empty());

    let mut single = vec![String::from("only")];
    radix_sort(&mut single);
    assert_eq!(single, vec!["only"]);

    for settings in all_settings() {
        let mut single = vec![(1u8, -2i64)];
        radix_sort_with_settings(&mut single, &settings);
        assert_eq!(single, vec![(1, -2)]);
    }
}

#[test]
fn test_integers_of_every_width() {
    let mut rng = rand::rng();

    let input: Vec<u8> = (0..5000).map(|_| rng.random()).collect();
    assert_sorts_like_std(&input);

    let input: Vec<i16> = (0..5000).map(|_| rng.random()).collect();
    assert_sorts_like_std(&input);

    let input: Vec<u32> = (0..5000).map(|_| rng.random_range(0..1000)).collect();
    assert_sorts_like_std(&input);

    let mut input: Vec<i64> = (0..5000).map(|_| rng.random()).collect();
    input.extend([i64::MIN, i64::MAX, 0, -1, 1]);
    assert_sorts_like_std(&input);

    let input: Vec<u128> = (0..3000).map(|_| rng.random::<u128>() >> rng.random_range(0..128)).collect();
    assert_sorts_like_std(&input);

    let input: Vec<i128> = (0..3000).map(|_| rng.random()).collect();
    assert_sorts_like_std(&input);

    let input: Vec<isize> = (0..3000).map(|_| rng.random_range(-5000i64..5000) as isize).collect();
    assert_sorts_like_std(&input);
}

#[test]
fn test_chars_and_bools() {
    let mut rng = rand::rng();

    let mut input: Vec<char> = "the quick brown fox jumps over the lazy dog".chars().collect();
    input.extend(['\u{10FFFF}', '\u{FFFD}', 'é', '\0']);
    input.extend((0..3000).filter_map(|_| char::from_u32(rng.random_range(0..0x11000))));
    assert_sorts_like_std(&input);

    let input: Vec<bool> = (0..3000).map(|_| rng.random()).collect();
    assert_sorts_like_std(&input);
}

#[test]
fn test_random_floats() {
    let mut rng = rand::rng();

    let mut input: Vec<f32> = (0..5000)
        .map(|_| rng.random_range(-1.0e6f32..1.0e6))
        .collect();
    input.extend([
        0.0,
        -0.0,
        f32::MIN,
        f32::MAX,
        f32::MIN_POSITIVE,
        -f32::MIN_POSITIVE,
        f32::EPSILON,
        f32::INFINITY,
        f32::NEG_INFINITY,
        1.0e-40,
        -1.0e-40,
    ]);
    // Values sharing their top bytes exercise the low-bit comparator.
    input.extend((0..500).map(|i| 1.0 + i as f32 * f32::EPSILON));
    input.extend((0..500).map(|i| -1.0 - i as f32 * f32::EPSILON));

    let mut expected = input.clone();
    expected.sort_by(f32::total_cmp);

    for settings in all_settings() {
        let mut actual = input.clone();
        radix_sort_with_settings(&mut actual, &settings);
        // `total_cmp` separates the zeros, `==` does not.
        assert_eq!(actual, expected, "settings: {settings:?}");
    }

    let input: Vec<f64> = (0..5000).map(|_| rng.random_range(-100.0..100.0)).collect();
    let mut expected = input.clone();
    expected.sort_by(f64::total_cmp);
    for settings in all_settings() {
        let mut actual = input.clone();
        radix_sort_with_settings(&mut actual, &settings);
        assert_eq!(actual, expected, "settings: {settings:?}");
    }
}

#[test]
fn test_long_common_prefix() {
    let prefix = "a".repeat(100);
    let mut input = vec![
        format!("{}c", prefix),
        format!("{}a", prefix),
        format!("{}b", prefix),
        prefix.clone(),
    ];
    for i in 0..3000 {
        input.push(format!("{}{}", prefix, i));
    }
    assert_sorts_like_std(&input);

    let mut data = input.clone();
    radix_sort(&mut data);
    assert_eq!(data[0], prefix);
}

#[test]
fn test_prefix_boundary_bytes() {
    // Differences right at, before and after the shared prefix.
    let base = vec![0u8; 16];
    let mut input = Vec::new();
    for position in [0, 7, 8, 9, 15] {
        for value in [1u8, 2, 255] {
            let mut row = base.clone();
            row[position] = value;
            input.push(row);
        }
    }
    input.push(base.clone());
    input.push(base[..8].to_vec());
    input.push(Vec::new());

    let repeated: Vec<Vec<u8>> = input.iter().cycle().take(3000).cloned().collect();
    assert_sorts_like_std(&repeated);
}

#[test]
fn test_tuples_with_strings() {
    let mut rng = rand::rng();
    let words = ["alpha", "beta", "gamma", "delta", ""];

    let input: Vec<(u8, String, i32)> = (0..4000)
        .map(|_| {
            (
                rng.random_range(0..4),
                words[rng.random_range(0..words.len())].to_string(),
                rng.random_range(-50..50),
            )
        })
        .collect();
    assert_sorts_like_std(&input);

    let input: Vec<((bool, char), Option<u16>, ())> = (0..4000)
        .map(|_| {
            (
                (rng.random(), rng.random_range('a'..='e')),
                rng.random_bool(0.3).then(|| rng.random_range(0..10)),
                (),
            )
        })
        .collect();
    assert_sorts_like_std(&input);
}

#[test]
fn test_options() {
    let mut rng = rand::rng();

    let input: Vec<Option<i32>> = (0..5000)
        .map(|_| rng.random_bool(0.5).then(|| rng.random_range(-100..100)))
        .collect();
    assert_sorts_like_std(&input);

    let input: Vec<Option<Option<String>>> = (0..3000)
        .map(|_| match rng.random_range(0..3) {
            0 => None,
            1 => Some(None),
            _ => Some(Some(rng.random_range(0..200).to_string())),
        })
        .collect();
    assert_sorts_like_std(&input);
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Value {
    Empty,
    Int(i64),
    Text(String),
    Flag(bool),
    Nothing,
}

radix_key_enum!(Value { Int(i64), Text(String), Flag(bool), Nothing } vacant Empty);

fn random_value(rng: &mut impl Rng) -> Value {
    match rng.random_range(0..5) {
        0 => Value::Empty,
        1 => Value::Int(rng.random_range(-1000..1000)),
        2 => Value::Text(rng.random_range(0..50).to_string()),
        3 => Value::Flag(rng.random()),
        _ => Value::Nothing,
    }
}

#[test]
fn test_variants() {
    let mut rng = rand::rng();

    let input: Vec<Value> = (0..5000).map(|_| random_value(&mut rng)).collect();
    assert_sorts_like_std(&input);

    let input: Vec<(Value, u8)> = (0..4000)
        .map(|_| (random_value(&mut rng), rng.random_range(0..3)))
        .collect();
    assert_sorts_like_std(&input);

    let input: Vec<Vec<Value>> = (0..2000)
        .map(|_| {
            let len = rng.random_range(0..4);
            (0..len).map(|_| random_value(&mut rng)).collect()
        })
        .collect();
    assert_sorts_like_std(&input);
}

#[test]
fn test_vacant_sorts_first() {
    let mut data = vec![Value::Nothing, Value::Int(3), Value::Empty, Value::Flag(false)];
    radix_sort(&mut data);
    assert_eq!(
        data,
        vec![Value::Empty, Value::Int(3), Value::Flag(false), Value::Nothing]
    );
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Version {
    major: u16,
    minor: u16,
    patch: u32,
    pre: Option<String>,
}

radix_key_struct!(Version { major, minor, patch, pre });

#[test]
fn test_struct_fields_in_order() {
    let mut rng = rand::rng();

    let input: Vec<Version> = (0..4000)
        .map(|_| Version {
            major: rng.random_range(0..3),
            minor: rng.random_range(0..20),
            patch: rng.random_range(0..500),
            pre: rng
                .random_bool(0.2)
                .then(|| format!("rc{}", rng.random_range(0..3))),
        })
        .collect();
    assert_sorts_like_std(&input);
}

#[test]
fn test_nested_sequences() {
    let mut rng = rand::rng();

    let input: Vec<Vec<Vec<u16>>> = (0..2000)
        .map(|_| {
            (0..rng.random_range(0..4))
                .map(|_| (0..rng.random_range(0..4)).map(|_| rng.random_range(0..3)).collect())
                .collect()
        })
        .collect();
    assert_sorts_like_std(&input);

    let input: Vec<[i8; 3]> = (0..3000).map(|_| [rng.random(), rng.random(), rng.random()]).collect();
    assert_sorts_like_std(&input);

    let input: Vec<VecDeque<u32>> = (0..3000)
        .map(|_| {
            let mut deque: VecDeque<u32> = (0..rng.random_range(0..6)).map(|_| rng.random_range(0..4)).collect();
            deque.rotate_left(deque.len() / 2);
            deque
        })
        .collect();
    assert_sorts_like_std(&input);
}

#[test]
fn test_forward_sequences() {
    let mut rng = rand::rng();

    let input: Vec<LinkedList<u8>> = (0..3000)
        .map(|_| (0..rng.random_range(0..6)).map(|_| rng.random_range(0..4)).collect())
        .collect();
    assert_sorts_like_std(&input);

    let input: Vec<BTreeSet<i32>> = (0..3000)
        .map(|_| (0..rng.random_range(0..5)).map(|_| rng.random_range(-5..5)).collect())
        .collect();
    assert_sorts_like_std(&input);
}

#[test]
fn test_forward_sequences_inside_composites() {
    let mut rng = rand::rng();

    // Runs of equal lists are handed back to sort the second field.
    let input: Vec<(LinkedList<u8>, u32)> = (0..3000)
        .map(|_| {
            let list = (0..rng.random_range(0..3)).map(|_| rng.random_range(0..2)).collect();
            (list, rng.random_range(0..100))
        })
        .collect();
    assert_sorts_like_std(&input);

    let input: Vec<(Option<BTreeSet<u8>>, i16)> = (0..3000)
        .map(|_| {
            let set = rng
                .random_bool(0.7)
                .then(|| (0..rng.random_range(0..3)).map(|_| rng.random_range(0..3)).collect());
            (set, rng.random_range(-10..10))
        })
        .collect();
    assert_sorts_like_std(&input);

    let input: Vec<LinkedList<LinkedList<u8>>> = (0..2000)
        .map(|_| {
            (0..rng.random_range(0..3))
                .map(|_| (0..rng.random_range(0..3)).map(|_| rng.random_range(0..2)).collect())
                .collect()
        })
        .collect();
    assert_sorts_like_std(&input);

    let input: Vec<Vec<(LinkedList<u8>, bool)>> = (0..2000)
        .map(|_| {
            (0..rng.random_range(0..3))
                .map(|_| {
                    let list = (0..rng.random_range(0..3)).map(|_| rng.random_range(0..2)).collect();
                    (list, rng.random())
                })
                .collect()
        })
        .collect();
    assert_sorts_like_std(&input);
}

#[test]
fn test_sort_by_key() {
    let mut rng = rand::rng();

    let mut data: Vec<(u64, String)> = (0..5000)
        .map(|i| (rng.random_range(0..1000), format!("payload {i}")))
        .collect();
    let mut expected_payloads: Vec<String> = data.iter().map(|item| item.1.clone()).collect();

    for settings in all_settings() {
        radix_sort_by_key_with_settings(&mut data, &settings, |item| &item.0);
        assert!(data.windows(2).all(|pair| pair[0].0 <= pair[1].0));
    }

    let mut payloads: Vec<String> = data.into_iter().map(|item| item.1).collect();
    payloads.sort();
    expected_payloads.sort();
    assert_eq!(payloads, expected_payloads);
}

#[test]
fn test_sort_by_cached_key() {
    let mut rng = rand::rng();

    let mut data: Vec<u32> = (0..5000).map(|_| rng.random()).collect();
    radix_sort_by_cached_key(&mut data, |value| value.count_ones());
    assert!(
        data.windows(2)
            .all(|pair| pair[0].count_ones() <= pair[1].count_ones())
    );

    // Large elements, small keys.
    let mut data: Vec<[u64; 16]> = (0..3000).map(|_| [rng.random_range(0..100); 16]).collect();
    let mut expected = data.clone();
    expected.sort();
    data.radix_sort_unstable_by_cached_key(|row| row[0]);
    assert_eq!(data, expected);

    let mut data = vec!["b", "C", "a"];
    radix_sort_by_cached_key(&mut data, |word| word.to_ascii_lowercase());
    assert_eq!(data, vec!["a", "b", "C"]);
}

#[test]
fn test_extension_trait() {
    let mut data = vec![3u16, 1, 2];
    data.radix_sort_unstable();
    assert_eq!(data, vec![1, 2, 3]);

    let mut pairs = vec![("x", 2i8), ("y", -1), ("z", 0)];
    pairs.radix_sort_unstable_by_key(|pair| &pair.1);
    assert_eq!(pairs, vec![("y", -1), ("z", 0), ("x", 2)]);

    // Works on subslices too.
    let mut data = vec![9, 8, 7, 6, 5];
    data[1..4].radix_sort_unstable();
    assert_eq!(data, vec![9, 6, 7, 8, 5]);
}

#[test]
fn test_smart_pointers_sort_by_pointee() {
    let mut rng = rand::rng();

    let input: Vec<Box<i32>> = (0..3000).map(|_| Box::new(rng.random_range(-100..100))).collect();
    assert_sorts_like_std(&input);

    let input: Vec<Rc<str>> = (0..3000).map(|_| Rc::from(rng.random_range(0..300).to_string())).collect();
    assert_sorts_like_std(&input);

    let owned: Vec<String> = (0..3000).map(|_| rng.random_range(0..300).to_string()).collect();
    let input: Vec<&String> = owned.iter().collect();
    assert_sorts_like_std(&input);
}

#[test]
fn test_raw_pointers_sort_by_address() {
    let values = vec![0u64; 64];
    let mut pointers: Vec<*const u64> = values.iter().map(|value| value as *const u64).rev().collect();
    pointers.extend(pointers.clone());

    for settings in all_settings() {
        let mut data = pointers.clone();
        radix_sort_with_settings(&mut data, &settings);
        assert!(data.windows(2).all(|pair| pair[0].addr() <= pair[1].addr()));
    }
}

#[test]
fn test_sequence_recursion_limit() {
    let mut rng = rand::rng();
    let settings = SortSettings::builder()
        .with_sequence_recursion_limit(2)
        .build()
        .unwrap();

    let input: Vec<String> = (0..3000)
        .map(|_| {
            (0..rng.random_range(0..10))
                .map(|_| if rng.random() { 'a' } else { 'b' })
                .collect()
        })
        .collect();
    let mut expected = input.clone();
    expected.sort();
    let mut actual = input.clone();
    radix_sort_with_settings(&mut actual, &settings);
    assert_eq!(actual, expected);

    let input: Vec<(LinkedList<u8>, u8)> = (0..3000)
        .map(|_| {
            let list = (0..rng.random_range(0..8)).map(|_| rng.random_range(0..2)).collect();
            (list, rng.random_range(0..3))
        })
        .collect();
    let mut expected = input.clone();
    expected.sort();
    let mut actual = input.clone();
    radix_sort_with_settings(&mut actual, &settings);
    assert_eq!(actual, expected);
}

#[test]
fn test_idempotence() {
    let mut rng = rand::rng();
    let mut data: Vec<(i32, String)> = (0..5000)
        .map(|_| (rng.random_range(-10..10), rng.random_range(0..100).to_string()))
        .collect();

    radix_sort(&mut data);
    let once = data.clone();
    radix_sort(&mut data);
    assert_eq!(data, once);

    let mut reversed: Vec<u32> = (0..5000).rev().collect();
    radix_sort(&mut reversed);
    assert_eq!(reversed, (0..5000).collect::<Vec<u32>>());
}

#[test]
fn test_tagged_values_preserve_multiset() {
    let mut rng = rand::rng();

    // Ties are broken arbitrarily, only the key order and the multiset are checked.
    let input: Vec<(u8, usize)> = (0..5000).map(|i| (rng.random_range(0..8), i)).collect();
    let mut data = input.clone();
    radix_sort_by_key(&mut data, |item| &item.0);

    assert!(data.windows(2).all(|pair| pair[0].0 <= pair[1].0));
    let mut indices: Vec<usize> = data.iter().map(|item| item.1).collect();
    indices.sort();
    assert_eq!(indices, (0..5000).collect::<Vec<usize>>());
    for (key, index) in data {
        assert_eq!(input[index].0, key);
    }
}
