use crate::domain::model::Card;
use rand::seq::SliceRandom;
use rand::Rng;

/// A shuffled `[1, max]` deck for a single round.
///
/// Values come out in permuted order and are never repeated; once all of
/// them have been drawn every further draw is `None`.
#[derive(Debug)]
pub struct CardDeck {
    cards: Vec<Card>,
}

impl CardDeck {
    pub fn new(max: Card) -> Self {
        Self::shuffled_with(max, &mut rand::thread_rng())
    }

    pub fn shuffled_with<R: Rng + ?Sized>(max: Card, rng: &mut R) -> Self {
        let mut cards: Vec<Card> = (1..=max).collect();
        cards.shuffle(rng);
        Self { cards }
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_draws_every_value_once_then_exhausts() {
        let mut deck = CardDeck::new(100);
        let mut seen = HashSet::new();

        while let Some(card) = deck.draw() {
            assert!((1..=100).contains(&card));
            assert!(seen.insert(card), "card {} drawn twice", card);
        }

        assert_eq!(seen.len(), 100);
        assert!(deck.is_exhausted());
        assert_eq!(deck.draw(), None);
        assert_eq!(deck.draw(), None);
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut a = CardDeck::shuffled_with(100, &mut StdRng::seed_from_u64(42));
        let mut b = CardDeck::shuffled_with(100, &mut StdRng::seed_from_u64(42));
        for _ in 0..100 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn test_fresh_decks_are_shuffled_independently() {
        let order = |deck: &mut CardDeck| (0..100).filter_map(|_| deck.draw()).collect::<Vec<_>>();
        let first = order(&mut CardDeck::new(100));
        let differs = (0..5).any(|_| order(&mut CardDeck::new(100)) != first);
        assert!(differs);
    }

    #[test]
    fn test_zero_sized_deck_is_exhausted() {
        let mut deck = CardDeck::new(0);
        assert_eq!(deck.remaining(), 0);
        assert_eq!(deck.draw(), None);
    }
}
