// Character and token classification used by the non-dictionary units.

// ---------------------------------------------------------------------------
// Character classes
// ---------------------------------------------------------------------------

/// ASCII punctuation: ``!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~``.
#[inline]
pub fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
}

/// Letters of the Latin script.
pub fn is_latin_letter(c: char) -> bool {
    let cp = c as u32;
    c.is_ascii_alphabetic()
        || cp == 0xAA                          // ª
        || cp == 0xBA                          // º
        || (0xC0..=0xD6).contains(&cp)         // À-Ö
        || (0xD8..=0xF6).contains(&cp)         // Ø-ö
        || (0xF8..=0x2AF).contains(&cp)        // ø-ʯ (Latin Extended-A/B, IPA)
        || (0x1D00..=0x1D25).contains(&cp)     // phonetic small capitals
        || (0x1E00..=0x1EFF).contains(&cp)     // Latin Extended Additional
        || (0x2C60..=0x2C7F).contains(&cp)     // Latin Extended-C
        || (0xA722..=0xA7FF).contains(&cp)     // Latin Extended-D
        || (0xFB00..=0xFB06).contains(&cp)     // ligatures ﬀ-ﬆ
        || (0xFF21..=0xFF3A).contains(&cp)     // fullwidth A-Z
        || (0xFF41..=0xFF5A).contains(&cp) // fullwidth a-z
}

// ---------------------------------------------------------------------------
// Token classes
// ---------------------------------------------------------------------------

/// Non-empty and made of ASCII digits only.
pub fn is_numeric(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_digit())
}

/// Non-empty and made of punctuation only.
pub fn is_punctuation_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(is_punctuation)
}

/// Non-empty and made of Latin letters, ASCII digits and punctuation.
pub fn is_latin_word(word: &str) -> bool {
    !word.is_empty()
        && word
            .chars()
            .all(|c| is_latin_letter(c) || c.is_ascii_digit() || is_punctuation(c))
}

/// Kind of a number token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    /// Fits a signed 32-bit integer.
    Integer,
    /// Any other decimal number, including integers too large for 32 bits.
    Real,
}

/// Classify `word` as a number, if it is one.
pub fn number_kind(word: &str) -> Option<NumberKind> {
    if word.is_empty() || word.starts_with('+') {
        return None;
    }
    if word.parse::<i32>().is_ok() {
        return Some(NumberKind::Integer);
    }
    let plausible = word.bytes().any(|b| b.is_ascii_digit())
        && word
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'));
    if plausible && word.parse::<f64>().is_ok() {
        return Some(NumberKind::Real);
    }
    None
}

/// Strip one decimal place of a Roman numeral: `one ten`, `one five`, or
/// an optional `five` followed by up to three `one`s.
fn strip_roman_place(s: &str, one: char, five: char, ten: char) -> &str {
    let mut chars = s.chars();
    if chars.next() == Some(one) {
        if let Some(next) = chars.next() {
            if next == ten || next == five {
                return &s[2..];
            }
        }
    }
    let mut rest = s.strip_prefix(five).unwrap_or(s);
    for _ in 0..3 {
        match rest.strip_prefix(one) {
            Some(r) => rest = r,
            None => break,
        }
    }
    rest
}

/// Upper-case Roman numeral between I and MMMMCMXCIX.
pub fn is_roman_numeral(word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    let mut rest = word;
    for _ in 0..4 {
        match rest.strip_prefix('M') {
            Some(r) => rest = r,
            None => break,
        }
    }
    rest = strip_roman_place(rest, 'C', 'D', 'M');
    rest = strip_roman_place(rest, 'X', 'L', 'C');
    rest = strip_roman_place(rest, 'I', 'V', 'X');
    rest.is_empty()
}

/// Number of characters (Unicode scalar values) in `s`.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of the `n`-th character of `s`, or `s.len()` past the end.
pub fn char_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation() {
        assert!(is_punctuation_word("!?"));
        assert!(is_punctuation_word("..."));
        assert!(!is_punctuation_word("a."));
        assert!(!is_punctuation_word(""));
        assert!(!is_punctuation_word("«»"));
    }

    #[test]
    fn latin_words() {
        assert!(is_latin_word("iphone"));
        assert!(is_latin_word("männer"));
        assert!(is_latin_word("e-mail2"));
        assert!(!is_latin_word("тест"));
        assert!(!is_latin_word("testтест"));
        assert!(!is_latin_word(""));
    }

    #[test]
    fn numbers() {
        assert!(is_numeric("2024"));
        assert!(!is_numeric("-5"));
        assert!(!is_numeric(""));
        assert_eq!(number_kind("-5"), Some(NumberKind::Integer));
        assert_eq!(number_kind("12"), Some(NumberKind::Integer));
        assert_eq!(number_kind("1.5"), Some(NumberKind::Real));
        assert_eq!(number_kind("1e3"), Some(NumberKind::Real));
        assert_eq!(number_kind("99999999999"), Some(NumberKind::Real));
        assert_eq!(number_kind("+5"), None);
        assert_eq!(number_kind("NaN"), None);
        assert_eq!(number_kind("inf"), None);
        assert_eq!(number_kind("1.2.3"), None);
        assert_eq!(number_kind("-"), None);
    }

    #[test]
    fn roman_numerals() {
        for ok in ["I", "IV", "IX", "XL", "MD", "MCMXCIV", "MMMMCMXCIX", "CCCLXXXVIII"] {
            assert!(is_roman_numeral(ok), "{ok}");
        }
        for bad in ["", "IIII", "VX", "IC", "md", "MMMMM", "ABC"] {
            assert!(!is_roman_numeral(bad), "{bad}");
        }
    }

    #[test]
    fn char_offsets() {
        assert_eq!(char_len("ёжик"), 4);
        assert_eq!(char_offset("ёжик", 2), 4);
        assert_eq!(char_offset("ёжик", 4), "ёжик".len());
        assert_eq!(char_offset("ёжик", 9), "ёжик".len());
    }
}
