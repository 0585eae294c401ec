//! Best-combination extraction and comparison, backed by rs_poker.

use crate::game::deck::Card;
use rs_poker::core::{Hand, Rank as RsRank, Rankable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandRank {
    pub rank_value: i32,
    /// Sub-rank within the hand category for proper comparison
    /// (e.g., AAQQ vs AA66 within TwoPair)
    sub_rank: u32,
    pub description: String,
}

/// Equality is hand strength only (rank_value + sub_rank), never the
/// specific suits involved.
impl PartialEq for HandRank {
    fn eq(&self, other: &Self) -> bool {
        self.rank_value == other.rank_value && self.sub_rank == other.sub_rank
    }
}

impl Eq for HandRank {}

impl HandRank {
    pub fn from_hand(hand: &Hand) -> Self {
        let rs_rank = hand.rank();
        let (rank_value, sub_rank, description) = match &rs_rank {
            RsRank::HighCard(v) => (0, *v, "High Card"),
            RsRank::OnePair(v) => (1, *v, "Pair"),
            RsRank::TwoPair(v) => (2, *v, "Two Pair"),
            RsRank::ThreeOfAKind(v) => (3, *v, "Three of a Kind"),
            RsRank::Straight(v) => (4, *v, "Straight"),
            RsRank::Flush(v) => (5, *v, "Flush"),
            RsRank::FullHouse(v) => (6, *v, "Full House"),
            RsRank::FourOfAKind(v) => (7, *v, "Four of a Kind"),
            RsRank::StraightFlush(v) => (8, *v, "Straight Flush"),
        };

        Self {
            rank_value,
            sub_rank,
            description: description.to_string(),
        }
    }
}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank_value
            .cmp(&other.rank_value)
            .then_with(|| self.sub_rank.cmp(&other.sub_rank))
    }
}

/// Evaluates the best 5-card combination from hole cards plus the board.
/// Uses rs_poker's native Rank comparison for ordering within categories.
pub fn best_combination(hole_cards: &[Card], board: &[Card]) -> HandRank {
    let mut all_cards = Vec::new();
    all_cards.extend_from_slice(hole_cards);
    all_cards.extend_from_slice(board);

    let combos = combinations(&all_cards, 5);
    let best_hand = combos
        .into_iter()
        .map(|five_cards| {
            let rs_cards: Vec<rs_poker::core::Card> =
                five_cards.iter().map(|c| c.to_rs_poker()).collect();
            Hand::new_with_cards(rs_cards)
        })
        .max_by_key(|hand| hand.rank());

    match best_hand {
        Some(hand) => HandRank::from_hand(&hand),
        // Fewer than 5 cards cannot happen at showdown; rank as the
        // weakest possible hand instead of panicking.
        None => HandRank {
            rank_value: -1,
            sub_rank: 0,
            description: "Incomplete".to_string(),
        },
    }
}

/// Generate all k-combinations from a slice
fn combinations<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
    if k == 0 {
        return vec![vec![]];
    }
    if items.len() < k {
        return vec![];
    }

    let mut result = Vec::new();
    let first = items[0].clone();
    let rest = &items[1..];

    for mut combo in combinations(rest, k - 1) {
        combo.insert(0, first.clone());
        result.push(combo);
    }
    result.extend(combinations(rest, k));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(defs: &[(u8, u8)]) -> Vec<Card> {
        defs.iter().map(|&(r, s)| Card::new(r, s)).collect()
    }

    #[test]
    fn test_combinations_count() {
        let items: Vec<u8> = (0..7).collect();
        assert_eq!(combinations(&items, 5).len(), 21);
    }

    #[test]
    fn test_straight_beats_three_of_a_kind() {
        let board = cards(&[(4, 0), (5, 1), (6, 2), (12, 3), (2, 0)]);
        let straight = best_combination(&cards(&[(7, 0), (8, 1)]), &board);
        let trips = best_combination(&cards(&[(12, 0), (12, 1)]), &board);
        assert!(straight > trips);
        assert_eq!(straight.description, "Straight");
    }

    #[test]
    fn test_equal_strength_ignores_suits() {
        let board = cards(&[(9, 0), (9, 1), (5, 2), (6, 3), (13, 0)]);
        let a = best_combination(&cards(&[(14, 1), (2, 2)]), &board);
        let b = best_combination(&cards(&[(14, 3), (2, 0)]), &board);
        assert_eq!(a, b);
    }

    #[test]
    fn test_kicker_breaks_pair_tie() {
        let board = cards(&[(9, 0), (9, 1), (5, 2), (6, 3), (13, 0)]);
        let ace_kicker = best_combination(&cards(&[(14, 1), (2, 2)]), &board);
        let queen_kicker = best_combination(&cards(&[(12, 1), (2, 0)]), &board);
        assert!(ace_kicker > queen_kicker);
    }
}
