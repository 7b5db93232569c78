/// Canonicalizes a string for comparison: trims it, upper-cases every letter, and collapses each
/// internal run of whitespace to a single space.
///
/// Every comparison between player input and loaded word lists goes through this function, so
/// that case and incidental spacing never cause a mismatch.
///
/// ```
/// use word_scramble::normalize;
///
/// assert_eq!(normalize("  spotted \t turtle "), "SPOTTED TURTLE");
/// ```
pub fn normalize(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for part in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.extend(part.chars().flat_map(char::to_uppercase));
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_upper_cases() {
        assert_eq!(normalize("  cat\n"), "CAT");
    }

    #[test]
    fn normalize_collapses_internal_whitespace() {
        assert_eq!(normalize("great \t\n  crested   grebe"), "GREAT CRESTED GREBE");
    }

    #[test]
    fn normalize_keeps_hyphens() {
        assert_eq!(normalize("red-tailed hawk"), "RED-TAILED HAWK");
    }

    #[test]
    fn normalize_blank_is_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t \n"), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for word in ["", "cat", " Spotted   turtle ", "ñandú", "x\u{3000}y", "straße"] {
            let once = normalize(word);
            assert_eq!(normalize(&once), once);
        }
    }
}
