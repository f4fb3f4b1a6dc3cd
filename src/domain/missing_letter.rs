//! Per-client "missing letter" fingerprint.

/// Returned when a name contains every letter of the alphabet.
pub const PANGRAM_SENTINEL: char = '-';

/// Returned for an empty name.
pub const EMPTY_NAME_LETTER: char = 'a';

/// Returns the first letter of `a..=z` that does not occur in `name`.
///
/// Matching is ASCII case-insensitive and every other character (digits,
/// punctuation, accented letters) is ignored, so `"José"` contributes only
/// `j`, `o` and `s`. An empty name yields [`EMPTY_NAME_LETTER`] and a name
/// using all 26 letters yields [`PANGRAM_SENTINEL`].
pub fn missing_letter(name: &str) -> char {
    if name.is_empty() {
        return EMPTY_NAME_LETTER;
    }

    let mut seen = [false; 26];
    for byte in name.bytes() {
        let lower = byte.to_ascii_lowercase();
        if lower.is_ascii_lowercase() {
            seen[usize::from(lower - b'a')] = true;
        }
    }

    (b'a'..=b'z')
        .zip(seen)
        .find(|(_, present)| !present)
        .map(|(letter, _)| char::from(letter))
        .unwrap_or(PANGRAM_SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_returns_a() {
        assert_eq!(missing_letter(""), 'a');
    }

    #[test]
    fn full_alphabet_returns_sentinel() {
        assert_eq!(missing_letter("abcdefghijklmnopqrstuvwxyz"), '-');
        assert_eq!(
            missing_letter("The quick brown fox jumps over the lazy dog"),
            '-'
        );
    }

    #[test]
    fn first_gap_is_reported() {
        assert_eq!(missing_letter("bcdefghijklmnopqrstuvwxyz"), 'a');
        assert_eq!(missing_letter("Ana Beatriz"), 'c');
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(missing_letter("ABC"), 'd');
    }

    #[test]
    fn non_letters_are_stripped_not_folded() {
        // 'é' is dropped, so 'e' stays missing.
        assert_eq!(missing_letter("José"), 'a');
        assert_eq!(missing_letter("abcd é"), 'e');
        assert_eq!(missing_letter("1234 !?"), 'a');
    }

    #[test]
    fn result_never_occurs_in_printable_names() {
        let names = [
            "Maria da Silva",
            "John O'Neil",
            "x",
            "Pack my box with five dozen liquor jugs",
            "~!@#$%^&*()_+",
            "AbCdEfGhIjKlMnOpQrStUvWxY",
        ];

        for name in names {
            let letter = missing_letter(name);
            if letter == PANGRAM_SENTINEL {
                continue;
            }
            assert!(letter.is_ascii_lowercase(), "{name:?} -> {letter:?}");
            assert!(
                !name.to_ascii_lowercase().contains(letter),
                "{name:?} contains {letter:?}"
            );
        }
    }
}
