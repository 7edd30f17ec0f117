//! Property checks over the task list and flashcard deck engines.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use studykit_core::{Deck, MemoryStore, Priority, TaskFilter, TaskList};

fn any_priority() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Medium),
        Just(Priority::High),
    ]
}

proptest! {
    #[test]
    fn add_prepends_exactly_one(
        existing in proptest::collection::vec("[a-z]{1,12}", 0..8),
        text in "[a-z]{1,12}",
        priority in any_priority(),
    ) {
        let mut tasks = TaskList::load(MemoryStore::new()).unwrap();
        for t in &existing {
            tasks.add(t, Priority::Medium).unwrap();
        }
        let before = tasks.filter(TaskFilter::All).len();
        let id = tasks.add(&text, priority).unwrap().id.clone();

        let all = tasks.filter(TaskFilter::All);
        prop_assert_eq!(all.len(), before + 1);
        prop_assert_eq!(&all[0].id, &id);
    }

    #[test]
    fn toggle_twice_restores(
        flags in proptest::collection::vec(any::<bool>(), 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut tasks = TaskList::load(MemoryStore::new()).unwrap();
        for (i, completed) in flags.iter().enumerate() {
            let id = tasks
                .add(&format!("task {i}"), Priority::Medium)
                .unwrap()
                .id
                .clone();
            if *completed {
                tasks.toggle_complete(&id).unwrap();
            }
        }
        let idx = pick.index(tasks.len());
        let id = tasks.tasks()[idx].id.clone();
        let before = tasks.tasks()[idx].completed;

        tasks.toggle_complete(&id).unwrap();
        tasks.toggle_complete(&id).unwrap();
        prop_assert_eq!(tasks.tasks()[idx].completed, before);
    }

    #[test]
    fn clear_completed_preserves_pending(
        flags in proptest::collection::vec(any::<bool>(), 0..12),
    ) {
        let mut tasks = TaskList::load(MemoryStore::new()).unwrap();
        for (i, completed) in flags.iter().enumerate() {
            let id = tasks
                .add(&format!("task {i}"), Priority::Medium)
                .unwrap()
                .id
                .clone();
            if *completed {
                tasks.toggle_complete(&id).unwrap();
            }
        }
        let pending_before: Vec<String> = tasks
            .filter(TaskFilter::Pending)
            .iter()
            .map(|t| t.id.clone())
            .collect();

        tasks.clear_completed().unwrap();

        let remaining: Vec<String> =
            tasks.tasks().iter().map(|t| t.id.clone()).collect();
        prop_assert_eq!(pending_before, remaining);
    }

    #[test]
    fn shuffle_preserves_multiset(n in 0usize..24, seed in any::<u64>()) {
        let mut deck = Deck::load(MemoryStore::new()).unwrap();
        for i in 0..n {
            deck.add(&format!("front {i}"), &format!("back {i}")).unwrap();
        }
        let mut before: Vec<String> =
            deck.cards().iter().map(|c| c.id.clone()).collect();

        let mut rng = Pcg64::seed_from_u64(seed);
        deck.shuffle(&mut rng).unwrap();

        let mut after: Vec<String> =
            deck.cards().iter().map(|c| c.id.clone()).collect();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
        prop_assert_eq!(deck.cursor(), 0);
    }

    #[test]
    fn cursor_stays_in_bounds(
        n in 1usize..10,
        moves in proptest::collection::vec(any::<bool>(), 0..30),
    ) {
        let mut deck = Deck::load(MemoryStore::new()).unwrap();
        for i in 0..n {
            deck.add(&format!("front {i}"), &format!("back {i}")).unwrap();
        }
        for forward in moves {
            if forward {
                deck.next();
            } else {
                deck.previous();
            }
            prop_assert!(deck.cursor() < deck.len());
        }
    }
}
