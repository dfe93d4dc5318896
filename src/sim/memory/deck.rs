//! Card decks and shuffling

use rand::Rng;

use crate::sim::difficulty::Difficulty;

const EASY_SYMBOLS: [&str; 6] = ["■", "□", "▲", "▼", "◆", "◇"];
const MEDIUM_SYMBOLS: [&str; 8] = ["✦", "✧", "✶", "✸", "✹", "✺", "✷", "✴"];
const HARD_SYMBOLS: [&str; 12] = [
    "⌖", "⌬", "⎔", "⎈", "⏣", "⏥", "⌁", "⌂", "⌘", "⎋", "⌗", "⌸",
];

/// Distinct symbols used at a level, one per pair
pub fn symbols_for(difficulty: Difficulty) -> &'static [&'static str] {
    match difficulty {
        Difficulty::Easy => &EASY_SYMBOLS,
        Difficulty::Medium => &MEDIUM_SYMBOLS,
        Difficulty::Hard => &HARD_SYMBOLS,
    }
}

/// Fisher-Yates: walk from the last index down, swapping each slot with a
/// uniformly chosen slot at or before it.
pub fn shuffle<T>(items: &mut [T], rng: &mut impl Rng) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Every symbol twice, shuffled
pub fn build_deck(symbols: &[&'static str], rng: &mut impl Rng) -> Vec<&'static str> {
    let mut deck: Vec<&'static str> = symbols.iter().flat_map(|&s| [s, s]).collect();
    shuffle(&mut deck, rng);
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashMap;

    #[test]
    fn test_symbol_sets_are_distinct() {
        for d in Difficulty::ALL {
            let symbols = symbols_for(d);
            let mut unique = symbols.to_vec();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), symbols.len());
        }
    }

    #[test]
    fn test_shuffle_handles_tiny_slices() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut empty: [u8; 0] = [];
        shuffle(&mut empty, &mut rng);
        let mut one = [7];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, [7]);
    }

    #[test]
    fn test_shuffle_moves_things() {
        let mut rng = Pcg32::seed_from_u64(99);
        let original: Vec<u32> = (0..24).collect();
        let mut items = original.clone();
        shuffle(&mut items, &mut rng);
        assert_ne!(items, original);

        items.sort();
        assert_eq!(items, original);
    }

    proptest! {
        #[test]
        fn prop_deck_is_pairs(seed in any::<u64>(), level in 0usize..3) {
            let difficulty = Difficulty::ALL[level];
            let symbols = symbols_for(difficulty);
            let mut rng = Pcg32::seed_from_u64(seed);
            let deck = build_deck(symbols, &mut rng);

            prop_assert_eq!(deck.len(), symbols.len() * 2);
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for s in &deck {
                *counts.entry(*s).or_default() += 1;
            }
            prop_assert_eq!(counts.len(), symbols.len());
            prop_assert!(counts.values().all(|&c| c == 2));
        }
    }
}
