use proptest::prelude::*;
use protosoup_core::{AminoAcidChain, Soup, SoupConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn arb_sequence() -> impl Strategy<Value = String> {
    "[ARNDCQEGHILKMFPSTWYV]{1,30}"
}

/// `new` is `old` with exactly one symbol inserted at some position.
fn is_single_insertion(old: &str, new: &str) -> bool {
    if new.len() != old.len() + 1 {
        return false;
    }
    let k = old
        .bytes()
        .zip(new.bytes())
        .position(|(a, b)| a != b)
        .unwrap_or(old.len());
    new[..k] == old[..k] && new[k + 1..] == old[k..]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_generated_chains_respect_length_and_backbone(
        seed in any::<u64>(),
        min in 1usize..10,
        extra in 0usize..10
    ) {
        let max = min + extra;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let chain = AminoAcidChain::generate_random(min, max, &mut rng);

        prop_assert!(chain.len() >= min && chain.len() <= max);
        prop_assert_eq!(chain.atoms().len(), 4 * chain.len());
        prop_assert_eq!(chain.name(), format!("AA{}", chain.len()));
        prop_assert_eq!(chain.energy(), 1.0 + 0.1 * chain.len() as f64);
    }

    #[test]
    fn test_combine_is_exact_concatenation(
        a in arb_sequence(),
        b in arb_sequence(),
        ea in 0.0f64..10.0,
        eb in 0.0f64..10.0
    ) {
        let left = AminoAcidChain::new(a.clone(), ea);
        let right = AminoAcidChain::new(b.clone(), eb);
        let combined = AminoAcidChain::combine(&left, &right);

        prop_assert_eq!(combined.sequence(), format!("{a}{b}"));
        prop_assert_eq!(combined.energy(), ea + eb - 0.5);
    }

    #[test]
    fn test_insertion_adds_exactly_one_symbol(
        sequence in arb_sequence(),
        seed in any::<u64>()
    ) {
        let chain = AminoAcidChain::new(sequence, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mutated = chain.insert(&mut rng);

        prop_assert!(is_single_insertion(chain.sequence(), mutated.sequence()));
        prop_assert_eq!(mutated.energy(), chain.energy());
    }

    #[test]
    fn test_deletion_shrinks_or_noops(
        sequence in arb_sequence(),
        seed in any::<u64>()
    ) {
        let chain = AminoAcidChain::new(sequence, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mutated = chain.delete(&mut rng);

        if chain.len() > 1 {
            prop_assert_eq!(mutated.len(), chain.len() - 1);
        } else {
            prop_assert_eq!(mutated.sequence(), chain.sequence());
        }
    }

    #[test]
    fn test_substitution_preserves_length(
        sequence in arb_sequence(),
        seed in any::<u64>()
    ) {
        let chain = AminoAcidChain::new(sequence, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        prop_assert_eq!(chain.substitute(&mut rng).len(), chain.len());
    }

    #[test]
    fn test_crossover_splits_into_parent_prefix_and_suffix(
        a in arb_sequence(),
        b in arb_sequence(),
        seed in any::<u64>()
    ) {
        let left = AminoAcidChain::new(a.clone(), 2.0);
        let right = AminoAcidChain::new(b.clone(), 4.0);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let child = left.crossover(&right, &mut rng);
        let sequence = child.sequence();

        let splits_cleanly = (0..=sequence.len()).any(|i| {
            a.starts_with(&sequence[..i]) && b.ends_with(&sequence[i..])
        });
        prop_assert!(
            splits_cleanly,
            "child {} is not a prefix of {} plus a suffix of {}",
            sequence, a, b
        );
        prop_assert_eq!(child.energy(), 3.0);
    }

    #[test]
    fn test_movement_stays_in_bounds_for_any_temperature(
        seed in any::<u64>(),
        temperature in 0.0f64..2000.0
    ) {
        let mut config = SoupConfig::default();
        config.world.seed = Some(seed);
        config.world.temperature = temperature;
        let width = f64::from(config.world.width);
        let height = f64::from(config.world.height);

        let mut soup = Soup::new(config).unwrap();
        for _ in 0..25 {
            soup.advance();
        }
        for entity in soup.snapshot_entities() {
            let position = entity.position();
            prop_assert!(position.x >= 0.0 && position.x <= width);
            prop_assert!(position.y >= 0.0 && position.y <= height);
        }
    }

    #[test]
    fn test_resize_rescales_x_by_exact_ratio(
        seed in any::<u64>(),
        new_width in 1u32..2000
    ) {
        let mut config = SoupConfig::default();
        config.world.seed = Some(seed);
        let old_width = config.world.width;

        let mut soup = Soup::new(config).unwrap();
        let before = soup.snapshot_entities();
        soup.set_width(new_width);
        let after = soup.snapshot_entities();

        let ratio = f64::from(new_width) / f64::from(old_width);
        for (old, new) in before.iter().zip(after.iter()) {
            prop_assert!((new.position().x - old.position().x * ratio).abs() < 1e-9);
            prop_assert_eq!(new.position().y, old.position().y);
        }
    }
}
