use crate::profanity::BannedWords;
use rand::Rng;

/// The number of scrambles tried before giving up and returning the word as-is.
pub const MAX_SHUFFLE_ATTEMPTS: usize = 10;

/// Returns `true` for characters that stay in place when a word is scrambled.
pub fn is_anchor(letter: char) -> bool {
    letter == ' ' || letter == '-'
}

/// Splits `word` on spaces and hyphens, keeping each delimiter as its own token.
///
/// ```
/// use word_scramble::details::split_keeping_anchors;
///
/// assert_eq!(
///     split_keeping_anchors("RED-TAILED HAWK"),
///     vec!["RED", "-", "TAILED", " ", "HAWK"]
/// );
/// ```
pub fn split_keeping_anchors(word: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    for (index, letter) in word.char_indices() {
        if is_anchor(letter) {
            if start < index {
                tokens.push(&word[start..index]);
            }
            let end = index + letter.len_utf8();
            tokens.push(&word[index..end]);
            start = end;
        }
    }
    if start < word.len() {
        tokens.push(&word[start..]);
    }
    tokens
}

/// Returns a uniformly random ordering of all the characters in `token`.
///
/// Each step picks a random remaining character and removes it with swap-with-last-and-pop.
pub fn shuffle_letters<R: Rng + ?Sized>(token: &str, rng: &mut R) -> String {
    let mut remaining: Vec<char> = token.chars().collect();
    let mut shuffled = String::with_capacity(token.len());
    while !remaining.is_empty() {
        let index = rng.gen_range(0..remaining.len());
        shuffled.push(remaining.swap_remove(index));
    }
    shuffled
}

fn shuffle_once<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    split_keeping_anchors(word)
        .into_iter()
        .map(|token| {
            if token.chars().all(is_anchor) {
                token.to_string()
            } else {
                shuffle_letters(token, rng)
            }
        })
        .collect()
}

/// Scrambles `word`, shuffling each space- or hyphen-separated part independently and leaving
/// the delimiters where they are.
///
/// Scrambles that contain a banned term are discarded and retried. If every one of
/// [`MAX_SHUFFLE_ATTEMPTS`] attempts is flagged, the original word is returned unscrambled: the
/// puzzle becomes trivial, but the game keeps going.
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use word_scramble::{scramble, BannedWords};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let scrambled = scramble("SPOTTED TURTLE", &BannedWords::new(), &mut rng);
///
/// assert_eq!(scrambled.len(), "SPOTTED TURTLE".len());
/// assert_eq!(scrambled.find(' '), Some(7));
/// ```
pub fn scramble<R: Rng + ?Sized>(word: &str, banned: &BannedWords, rng: &mut R) -> String {
    for _ in 0..MAX_SHUFFLE_ATTEMPTS {
        let candidate = shuffle_once(word, rng);
        if !banned.is_flagged(&candidate) {
            return candidate;
        }
    }
    log::warn!(
        "No clean scramble of {:?} after {} attempts; showing it unscrambled",
        word,
        MAX_SHUFFLE_ATTEMPTS
    );
    word.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sorted_chars(word: &str) -> Vec<char> {
        let mut chars: Vec<char> = word.chars().collect();
        chars.sort_unstable();
        chars
    }

    #[test]
    fn split_keeping_anchors_single_word() {
        assert_eq!(split_keeping_anchors("CAT"), vec!["CAT"]);
    }

    #[test]
    fn split_keeping_anchors_adjacent_and_edge_delimiters() {
        assert_eq!(
            split_keeping_anchors("-A - B-"),
            vec!["-", "A", " ", "-", " ", "B", "-"]
        );
    }

    #[test]
    fn split_keeping_anchors_empty() {
        assert!(split_keeping_anchors("").is_empty());
    }

    #[test]
    fn shuffle_letters_is_permutation() {
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..50 {
            let shuffled = shuffle_letters("AARDVARK", &mut rng);
            assert_eq!(sorted_chars(&shuffled), sorted_chars("AARDVARK"));
        }
    }

    #[test]
    fn shuffle_letters_single_char_is_unchanged() {
        let mut rng = StdRng::seed_from_u64(2);

        assert_eq!(shuffle_letters("A", &mut rng), "A");
        assert_eq!(shuffle_letters("", &mut rng), "");
    }

    #[test]
    fn shuffle_letters_reaches_every_ordering() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..500 {
            seen.insert(shuffle_letters("ABC", &mut rng));
        }

        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn scramble_keeps_anchor_positions() {
        let mut rng = StdRng::seed_from_u64(4);
        let word = "GREAT CRESTED-GREBE";

        for _ in 0..50 {
            let scrambled = scramble(word, &BannedWords::new(), &mut rng);
            assert_eq!(sorted_chars(&scrambled), sorted_chars(word));
            for (original, shuffled) in word.chars().zip(scrambled.chars()) {
                assert_eq!(is_anchor(original), is_anchor(shuffled));
                if is_anchor(original) {
                    assert_eq!(original, shuffled);
                }
            }
        }
    }

    #[test]
    fn scramble_avoids_banned_substrings() {
        let mut rng = StdRng::seed_from_u64(5);
        let banned = BannedWords::from_iterator(["AB"]);

        for _ in 0..50 {
            let scrambled = scramble("ABC", &banned, &mut rng);
            assert!(!scrambled.contains("AB"), "{}", scrambled);
        }
    }

    #[test]
    fn scramble_falls_back_to_original_when_every_attempt_is_flagged() {
        let mut rng = StdRng::seed_from_u64(6);
        let banned = BannedWords::from_iterator(["O"]);

        assert_eq!(scramble("DOG", &banned, &mut rng), "DOG");
    }
}

#[cfg(all(feature = "unstable", test))]
mod benches {

    extern crate test;

    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test::Bencher;

    #[bench]
    fn bench_shuffle_once_multi_part(b: &mut Bencher) {
        let mut rng = StdRng::seed_from_u64(0);

        b.iter(|| shuffle_once("GREAT CRESTED-GREBE", &mut rng));
    }

    #[bench]
    fn bench_split_keeping_anchors(b: &mut Bencher) {
        b.iter(|| split_keeping_anchors("RED-TAILED HAWK").len());
    }
}
