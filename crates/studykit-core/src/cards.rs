//! Flashcard deck engine.
//!
//! An ordered deck of front/back cards with a study cursor. The card order
//! is persisted write-through; the cursor and flip flag are scoped to the
//! in-memory session and never stored.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, ValidationError};
use crate::store::{keys, KeyValueStore};

/// A front/back study card. Cards are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: String,
    pub front: String,
    pub back: String,
    pub created_at: DateTime<Utc>,
}

/// Counters for the study progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeckStats {
    pub total: usize,
    /// 1-based position of the cursor; 0 on an empty deck.
    pub position: usize,
    pub percent: u32,
}

/// Flashcard deck with write-through persistence.
///
/// Invariant: `0 <= cursor < len` whenever the deck is non-empty.
pub struct Deck<S: KeyValueStore> {
    cards: Vec<Flashcard>,
    cursor: usize,
    flipped: bool,
    store: S,
}

impl<S: KeyValueStore> Deck<S> {
    /// Load the persisted deck, treating absent or malformed data as empty.
    /// The cursor starts at the first card, front showing.
    pub fn load(store: S) -> Result<Self, CoreError> {
        let cards: Vec<Flashcard> = match store.get(keys::FLASHCARDS)? {
            Some(json) => serde_json::from_str(&json).unwrap_or_default(),
            None => Vec::new(),
        };
        Ok(Self {
            cards,
            cursor: 0,
            flipped: false,
            store,
        })
    }

    /// Give the backing store back (for handoff or inspection).
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Card under the cursor, if any.
    pub fn current(&self) -> Option<&Flashcard> {
        self.cards.get(self.cursor)
    }

    /// Append a new card. Both sides are trimmed and must be non-empty.
    pub fn add(&mut self, front: &str, back: &str) -> Result<&Flashcard, CoreError> {
        let front = front.trim();
        let back = back.trim();
        if front.is_empty() {
            return Err(ValidationError::EmptyField { field: "front" }.into());
        }
        if back.is_empty() {
            return Err(ValidationError::EmptyField { field: "back" }.into());
        }
        let was_empty = self.cards.is_empty();
        self.cards.push(Flashcard {
            id: Uuid::new_v4().to_string(),
            front: front.to_string(),
            back: back.to_string(),
            created_at: Utc::now(),
        });
        if was_empty {
            self.cursor = 0;
        }
        self.persist()?;
        let idx = self.cards.len() - 1;
        Ok(&self.cards[idx])
    }

    /// Advance the cursor; no-op at the last card. Always shows the front.
    /// Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        self.flipped = false;
        if self.cursor + 1 < self.cards.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Step the cursor back; no-op at the first card. Always shows the
    /// front. Returns whether the cursor moved.
    pub fn previous(&mut self) -> bool {
        self.flipped = false;
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Toggle between front and back of the current card.
    /// No-op on an empty deck. Returns the new flip state.
    pub fn flip(&mut self) -> bool {
        if self.cards.is_empty() {
            return false;
        }
        self.flipped = !self.flipped;
        self.flipped
    }

    /// Shuffle the deck in place (unbiased Fisher-Yates) and rewind the
    /// cursor to the first card.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), CoreError> {
        self.cards.shuffle(rng);
        self.cursor = 0;
        self.flipped = false;
        self.persist()
    }

    /// Remove one card and return it, clamping the cursor.
    pub fn remove(&mut self, id: &str) -> Result<Flashcard, CoreError> {
        let idx = self
            .cards
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CoreError::NotFound {
                kind: "flashcard",
                id: id.to_string(),
            })?;
        let removed = self.cards.remove(idx);
        if self.cursor >= self.cards.len() {
            self.cursor = self.cards.len().saturating_sub(1);
        }
        self.flipped = false;
        self.persist()?;
        Ok(removed)
    }

    /// Rewind to the first card without changing the order.
    pub fn reset_study(&mut self) {
        self.cursor = 0;
        self.flipped = false;
    }

    /// Empty the deck; returns how many cards went away.
    pub fn delete_all(&mut self) -> Result<usize, CoreError> {
        let removed = self.cards.len();
        self.cards.clear();
        self.cursor = 0;
        self.flipped = false;
        self.persist()?;
        Ok(removed)
    }

    pub fn stats(&self) -> DeckStats {
        let total = self.cards.len();
        let position = if total == 0 { 0 } else { self.cursor + 1 };
        let percent = if total == 0 {
            0
        } else {
            ((position as f64 / total as f64) * 100.0).round() as u32
        };
        DeckStats {
            total,
            position,
            percent,
        }
    }

    fn persist(&mut self) -> Result<(), CoreError> {
        let json = serde_json::to_string(&self.cards)?;
        self.store.set(keys::FLASHCARDS, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn deck() -> Deck<MemoryStore> {
        Deck::load(MemoryStore::new()).unwrap()
    }

    fn seeded(deck: &mut Deck<MemoryStore>, n: usize) {
        for i in 0..n {
            deck.add(&format!("front {i}"), &format!("back {i}")).unwrap();
        }
    }

    #[test]
    fn add_appends_and_sets_cursor_on_first() {
        let mut d = deck();
        d.add("q1", "a1").unwrap();
        assert_eq!(d.cursor(), 0);
        d.add("q2", "a2").unwrap();
        assert_eq!(d.cards()[1].front, "q2");
        assert_eq!(d.cursor(), 0);
    }

    #[test]
    fn add_rejects_blank_sides() {
        let mut d = deck();
        assert!(d.add("", "a").is_err());
        assert!(d.add("q", "   ").is_err());
        assert!(d.is_empty());
    }

    #[test]
    fn navigation_clamps_at_boundaries() {
        let mut d = deck();
        seeded(&mut d, 3);

        assert!(!d.previous());
        assert_eq!(d.cursor(), 0);

        assert!(d.next());
        assert!(d.next());
        assert!(!d.next());
        assert_eq!(d.cursor(), 2);
    }

    #[test]
    fn navigation_resets_flip() {
        let mut d = deck();
        seeded(&mut d, 2);
        d.flip();
        assert!(d.is_flipped());
        d.next();
        assert!(!d.is_flipped());
    }

    #[test]
    fn flip_on_empty_deck_is_noop() {
        let mut d = deck();
        assert!(!d.flip());
        assert!(!d.is_flipped());
    }

    #[test]
    fn shuffle_preserves_cards_and_rewinds() {
        let mut d = deck();
        seeded(&mut d, 10);
        d.next();
        d.next();

        let mut before: Vec<String> = d.cards().iter().map(|c| c.id.clone()).collect();
        let mut rng = Pcg64::seed_from_u64(42);
        d.shuffle(&mut rng).unwrap();

        let mut after: Vec<String> = d.cards().iter().map(|c| c.id.clone()).collect();
        assert_eq!(d.cursor(), 0);
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn remove_clamps_cursor() {
        let mut d = deck();
        seeded(&mut d, 3);
        d.next();
        d.next();
        assert_eq!(d.cursor(), 2);

        let last_id = d.cards()[2].id.clone();
        d.remove(&last_id).unwrap();
        assert_eq!(d.cursor(), 1);

        assert!(matches!(
            d.remove("missing"),
            Err(CoreError::NotFound {
                kind: "flashcard",
                ..
            })
        ));
    }

    #[test]
    fn delete_all_resets() {
        let mut d = deck();
        seeded(&mut d, 4);
        d.next();
        assert_eq!(d.delete_all().unwrap(), 4);
        assert!(d.is_empty());
        assert_eq!(d.cursor(), 0);
        assert!(d.current().is_none());
    }

    #[test]
    fn stats_track_position() {
        let mut d = deck();
        assert_eq!(
            d.stats(),
            DeckStats {
                total: 0,
                position: 0,
                percent: 0
            }
        );
        seeded(&mut d, 4);
        d.next();
        assert_eq!(
            d.stats(),
            DeckStats {
                total: 4,
                position: 2,
                percent: 50
            }
        );
    }

    #[test]
    fn cursor_and_flip_are_not_persisted() {
        let mut d = deck();
        seeded(&mut d, 3);
        d.next();
        d.flip();
        let store = d.into_store();

        let reloaded = Deck::load(store).unwrap();
        assert_eq!(reloaded.cursor(), 0);
        assert!(!reloaded.is_flipped());
        assert_eq!(reloaded.len(), 3);
    }
}
