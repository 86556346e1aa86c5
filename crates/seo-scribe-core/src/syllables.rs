//! Heuristic syllable estimation.
//!
//! Counts maximal runs of vowels (`a e i o u y`, case-insensitive). Short
//! words (three characters or fewer) are always one syllable, and every word
//! has at least one.

/// Words at or below this length are treated as a single syllable.
const SHORT_WORD_MAX: usize = 3;

/// Syllable count at or above which a word is considered complex.
pub const COMPLEX_WORD_SYLLABLES: usize = 3;

const fn is_vowel(ch: char) -> bool {
    matches!(ch.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Estimate the number of syllables in a single word token.
///
/// Always returns at least 1. Callers pass non-empty tokens; the tokenizer
/// never produces an empty one.
pub fn estimate_syllables(word: &str) -> usize {
    if word.chars().count() <= SHORT_WORD_MAX {
        return 1;
    }

    let mut groups = 0;
    let mut in_group = false;
    for ch in word.chars() {
        let vowel = is_vowel(ch);
        if vowel && !in_group {
            groups += 1;
        }
        in_group = vowel;
    }

    groups.max(1)
}

/// Whether a word with this many estimated syllables counts as complex.
pub const fn is_complex(syllables: usize) -> bool {
    syllables >= COMPLEX_WORD_SYLLABLES
}
