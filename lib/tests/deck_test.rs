use rand::rngs::StdRng;
use rand::SeedableRng;
use word_scramble::*;

use std::collections::HashSet;
use std::sync::Arc;

fn pack_of(words: &[&str]) -> WordPack {
    WordPack::from_iterator(words.iter())
}

#[test]
fn new_deck_empty_pack() {
    let mut rng = StdRng::seed_from_u64(0);

    assert_eq!(Deck::new(&pack_of(&[]), None, &mut rng), None);
}

#[test]
fn new_deck_is_permutation_with_cursor_at_start() {
    let mut rng = StdRng::seed_from_u64(1);
    let pack = pack_of(&["CAT", "DOG", "EMU", "YAK", "OWL"]);

    let deck = Deck::new(&pack, None, &mut rng).unwrap();

    assert_eq!(deck.cursor(), 0);
    assert_eq!(deck.len(), 5);
    let drawn: HashSet<&Arc<str>> = deck.order().iter().collect();
    let expected: HashSet<&Arc<str>> = pack.iter().collect();
    assert_eq!(drawn, expected);
}

#[test]
fn new_deck_avoids_first() {
    let mut rng = StdRng::seed_from_u64(2);
    let pack = pack_of(&["CAT", "DOG"]);

    for _ in 0..50 {
        let deck = Deck::new(&pack, Some("CAT"), &mut rng).unwrap();
        assert_eq!(deck.current().as_ref(), "DOG");
    }
}

#[test]
fn new_deck_single_word_ignores_avoid_first() {
    let mut rng = StdRng::seed_from_u64(3);

    let deck = Deck::new(&pack_of(&["CAT"]), Some("CAT"), &mut rng).unwrap();

    assert_eq!(deck.current().as_ref(), "CAT");
}

#[test]
fn one_lap_draws_every_word_once() {
    let mut rng = StdRng::seed_from_u64(4);
    let pack = pack_of(&["CAT", "DOG", "EMU", "YAK", "OWL", "ELK"]);
    let mut deck = Deck::new(&pack, None, &mut rng).unwrap();

    let mut lap = vec![Arc::clone(deck.current())];
    for _ in 1..pack.len() {
        lap.push(deck.next_word(&mut rng));
    }

    assert_eq!(deck.cursor(), pack.len() - 1);
    let unique: HashSet<&Arc<str>> = lap.iter().collect();
    assert_eq!(unique.len(), pack.len());
}

#[test]
fn order_is_kept_within_a_lap() {
    let mut rng = StdRng::seed_from_u64(5);
    let pack = pack_of(&["CAT", "DOG", "EMU", "YAK"]);
    let mut deck = Deck::new(&pack, None, &mut rng).unwrap();
    let order: Vec<Arc<str>> = deck.order().to_vec();

    for expected in order.iter().skip(1) {
        assert_eq!(&deck.next_word(&mut rng), expected);
        assert_eq!(deck.order(), &order[..]);
    }
}

#[test]
fn wrap_never_repeats_last_word() {
    let mut rng = StdRng::seed_from_u64(6);
    let pack = pack_of(&["CAT", "DOG", "EMU"]);
    let mut deck = Deck::new(&pack, None, &mut rng).unwrap();

    let mut previous = Arc::clone(deck.current());
    for draw in 1..300 {
        let next = deck.next_word(&mut rng);
        assert_ne!(next, previous, "repeat at draw {}", draw);
        if draw % pack.len() == 0 {
            assert_eq!(deck.cursor(), 0);
        }
        previous = next;
    }
}

#[test]
fn every_lap_is_a_permutation() {
    let mut rng = StdRng::seed_from_u64(7);
    let pack = pack_of(&["CAT", "DOG", "EMU", "YAK"]);
    let mut deck = Deck::new(&pack, None, &mut rng).unwrap();
    // Step to the last slot of the first lap.
    for _ in 1..pack.len() {
        deck.next_word(&mut rng);
    }

    for _ in 0..10 {
        let lap: HashSet<Arc<str>> = (0..pack.len()).map(|_| deck.next_word(&mut rng)).collect();
        assert_eq!(lap.len(), pack.len());
    }
}

#[test]
fn from_parts_accepts_valid_deck() {
    let order: Vec<Arc<str>> = vec![Arc::from("CAT"), Arc::from("DOG")];

    let deck = Deck::from_parts(order.clone(), 1).unwrap();

    assert_eq!(deck.order(), &order[..]);
    assert_eq!(deck.current().as_ref(), "DOG");
}

#[test]
fn from_parts_rejects_broken_decks() {
    let words = |words: &[&str]| -> Vec<Arc<str>> { words.iter().map(|w| Arc::from(*w)).collect() };

    assert_eq!(Deck::from_parts(Vec::new(), 0), Err(DeckError::Empty));
    assert_eq!(
        Deck::from_parts(words(&["CAT", "DOG"]), 7),
        Err(DeckError::CursorOutOfRange { cursor: 7, len: 2 })
    );
    assert_eq!(
        Deck::from_parts(words(&["CAT", "dog"]), 0),
        Err(DeckError::NotNormalized(Arc::from("dog")))
    );
    assert_eq!(
        Deck::from_parts(words(&["CAT", "CAT"]), 0),
        Err(DeckError::Duplicate(Arc::from("CAT")))
    );
}
