//! Property-based tests for permu-umda
//!
//! Uses proptest to verify invariants of the codecs and the univariate model.

use permu_umda::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn permutation_strategy(max_len: usize) -> impl Strategy<Value = Vec<usize>> {
    (0usize..=max_len).prop_flat_map(|n| Just((0..n).collect::<Vec<usize>>()).prop_shuffle())
}

fn config_strategy() -> impl Strategy<Value = CodecConfig> {
    (0usize..8).prop_map(|k| CodecConfig::all()[k])
}

fn order_strategy() -> impl Strategy<Value = SampleOrder> {
    prop_oneof![
        Just(SampleOrder::Left),
        Just(SampleOrder::Right),
        Just(SampleOrder::Random),
    ]
}

fn is_permu(p: &[usize]) -> bool {
    let mut sorted = p.to_vec();
    sorted.sort_unstable();
    sorted.iter().copied().eq(0..p.len())
}

proptest! {
    // ==================== Codec Properties ====================

    #[test]
    fn codec_roundtrip(p in permutation_strategy(60), config in config_strategy()) {
        let v = encode(&p, &config).unwrap();
        prop_assert_eq!(decode(&v, &config).unwrap(), p);
    }

    #[test]
    fn codec_entries_within_position_range(p in permutation_strategy(40), config in config_strategy()) {
        let n = p.len();
        let v = encode(&p, &config).unwrap();
        prop_assert_eq!(v.len(), n);
        for (i, &e) in v.iter().enumerate() {
            let limit = match config.direction {
                Direction::Left => i + 1,
                Direction::Right => n - i,
            };
            prop_assert!(e < limit);
        }
    }

    #[test]
    fn codec_decodes_any_in_range_vector(
        seeds in prop::collection::vec(any::<u32>(), 0..30),
        config in config_strategy()
    ) {
        let n = seeds.len();
        let v: Vec<usize> = seeds
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                let limit = match config.direction {
                    Direction::Left => i + 1,
                    Direction::Right => n - i,
                };
                s as usize % limit
            })
            .collect();
        let p = decode(&v, &config).unwrap();
        prop_assert!(is_permu(&p));
        prop_assert_eq!(encode(&p, &config).unwrap(), v);
    }

    #[test]
    fn inverse_is_involution(p in permutation_strategy(50)) {
        prop_assert_eq!(inverse(&inverse(&p)), p);
    }

    // ==================== Model Properties ====================

    #[test]
    fn learned_rows_are_stochastic(
        population in (1usize..15).prop_flat_map(|n| {
            prop::collection::vec(Just((0..n).collect::<Vec<usize>>()).prop_shuffle(), 1..10)
        })
    ) {
        let mut model = UnivariatePermutationModel::new();
        model.learn(&population).unwrap();
        for row in model.distribution().unwrap() {
            prop_assert!(row.iter().all(|&x| x >= 0.0));
            prop_assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn sample_permu_always_permutation(
        n in 1usize..25,
        pop_size in 1usize..10,
        order in order_strategy(),
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let population: Vec<Vec<usize>> = (0..pop_size)
            .map(|_| Permutation::random(n, &mut rng).into_inner())
            .collect();
        let mut model = UnivariatePermutationModel::new();
        model.learn(&population).unwrap();
        for _ in 0..10 {
            let p = model.sample_permu(order, &mut rng).unwrap();
            prop_assert!(is_permu(&p));
        }
    }

    #[test]
    fn encoded_samples_decode_to_permutations(
        n in 1usize..20,
        config in config_strategy(),
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let codec = PermutationCodec::new(config);
        let population: Vec<Vec<usize>> = (0..8)
            .map(|_| Permutation::random(n, &mut rng).into_inner())
            .collect();
        let mut model = UnivariatePermutationModel::new();
        model.learn(&codec.encode_all(&population).unwrap()).unwrap();
        for _ in 0..10 {
            let v = model.sample(&mut rng).unwrap();
            prop_assert!(is_permu(&codec.decode(&v).unwrap()));
        }
    }

    // ==================== Selection Properties ====================

    #[test]
    fn truncation_selects_best(fitness in prop::collection::vec(-100.0..100.0f64, 1..50)) {
        let selected = TruncationSelection::default().select(&fitness, OptimizationDirection::Minimize);
        let cutoff = fitness[*selected.last().unwrap()];
        for (i, &f) in fitness.iter().enumerate() {
            if !selected.contains(&i) {
                prop_assert!(f >= cutoff);
            }
        }
    }
}

#[test]
fn sample_permu_validity_for_each_order() {
    let mut rng = StdRng::seed_from_u64(2024);
    for n in [1, 4, 10, 30] {
        let population: Vec<Vec<usize>> = (0..20)
            .map(|_| Permutation::random(n, &mut rng).into_inner())
            .collect();
        let mut model = UnivariatePermutationModel::new();
        model.learn(&population).unwrap();

        for order in [SampleOrder::Left, SampleOrder::Right, SampleOrder::Random] {
            for _ in 0..100 {
                let mut p = model.sample_permu(order, &mut rng).unwrap();
                p.sort_unstable();
                assert_eq!(p, (0..n).collect::<Vec<_>>());
            }
        }
    }
}

#[test]
fn documented_codec_scenarios() {
    let left_gt = CodecConfig::new(Sense::GreaterThan, Direction::Left, Representation::Direct);
    assert_eq!(encode(&[2, 1, 0, 4, 3], &left_gt).unwrap(), vec![0, 1, 2, 0, 1]);
    assert_eq!(decode(&[0, 1, 2, 0, 1], &left_gt).unwrap(), vec![2, 1, 0, 4, 3]);

    let right_gt = CodecConfig::new(Sense::GreaterThan, Direction::Right, Representation::Direct);
    assert_eq!(encode(&[1, 4, 2, 3, 0], &right_gt).unwrap(), vec![3, 0, 1, 0, 0]);
}
