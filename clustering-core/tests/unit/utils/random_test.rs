use super::*;
use crate::helpers::utils::random::FakeRandom;

#[test]
fn can_produce_values_in_closed_int_interval() {
    let random = DefaultRandom::new_with_seed(1);
    let mut seen = [false; 4];

    (0..1000).for_each(|_| {
        let value = random.uniform_int(2, 5);
        assert!((2..=5).contains(&value));
        seen[(value - 2) as usize] = true;
    });

    assert!(seen.iter().all(|&seen| seen));
}

#[test]
fn can_produce_values_in_half_open_real_interval() {
    let random = DefaultRandom::new_with_seed(1);

    (0..1000).for_each(|_| {
        let value = random.uniform_real(-1., 1.);
        assert!((-1. ..1.).contains(&value));
    });

    assert_eq!(random.uniform_real(2., 2.), 2.);
}

#[test]
fn can_repeat_sequence_with_same_seed() {
    let first = DefaultRandom::new_with_seed(42);
    let second = DefaultRandom::new_with_seed(42);

    let first = (0..100).map(|_| first.uniform_int(0, 1000)).collect::<Vec<_>>();
    let second = (0..100).map(|_| second.uniform_int(0, 1000)).collect::<Vec<_>>();

    assert_eq!(first, second);
}

#[test]
fn can_sample_distinct_indices_in_draw_order() {
    // swaps: 0 <-> 3, 1 <-> 1, 2 <-> 4
    let random = FakeRandom::new(vec![3, 1, 4], vec![]);

    let indices = sample_distinct(&random, 5, 3);

    assert_eq!(indices, vec![3, 1, 4]);
}

parameterized_test! {can_sample_distinct_with_default_random, (size, amount), {
    let random = DefaultRandom::new_with_seed(3);

    let mut indices = sample_distinct(&random, size, amount);

    assert_eq!(indices.len(), amount);
    indices.sort_unstable();
    indices.dedup();
    assert_eq!(indices.len(), amount);
    assert!(indices.iter().all(|&idx| idx < size));
}}

can_sample_distinct_with_default_random! {
    case_01_none: (5, 0),
    case_02_one: (5, 1),
    case_03_all: (5, 5),
    case_04_many: (100, 30),
}

#[test]
#[should_panic]
fn can_reject_sampling_more_than_available() {
    sample_distinct(&DefaultRandom::new_repeatable(), 2, 3);
}

#[test]
fn can_get_random_index() {
    let random = FakeRandom::new(vec![2], vec![]);

    assert_eq!(random_index(&random, 3), 2);
}
