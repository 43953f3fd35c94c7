//! Edit-distance similarity between two lines
//!
//! Lengths and distances are counted in UTF-16 code units, so a character
//! outside the BMP counts as two.

/// Length of `s` in UTF-16 code units
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Levenshtein distance with unit cost for insert, delete and substitute
///
/// Walks the `(|b|+1) x (|a|+1)` table one row at a time.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<u16> = a.encode_utf16().collect();
    let b: Vec<u16> = b.encode_utf16().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=a.len()).collect();
    let mut curr = vec![0usize; a.len() + 1];

    for (i, &bc) in b.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &ac) in a.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j] + cost) // substitute
                .min(prev[j + 1] + 1) // delete
                .min(curr[j] + 1); // insert
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[a.len()]
}

/// Normalized similarity in `[0, 1]`
///
/// Two empty strings are identical (1.0).
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = utf16_len(a).max(utf16_len(b));
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / longest as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "a",
        "ab",
        "cat",
        "dog",
        "hello world",
        "hello word",
        "    let x = 1;",
        "    let y = 2;",
        "émoji 🎉",
        "emoji 🎊",
        "\t\r",
    ];

    #[test]
    fn test_levenshtein_classic_cases() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("same", "same"), 0);
    }

    #[test]
    fn test_levenshtein_counts_utf16_units() {
        // U+1F389 is a surrogate pair
        assert_eq!(utf16_len("🎉"), 2);
        assert_eq!(levenshtein("🎉", ""), 2);
        // Emojis share the high surrogate, only the low unit differs
        assert_eq!(levenshtein("🎉", "🎊"), 1);
    }

    #[test]
    fn test_levenshtein_symmetric() {
        for a in SAMPLES {
            for b in SAMPLES {
                assert_eq!(levenshtein(a, b), levenshtein(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_similarity_bounds() {
        for a in SAMPLES {
            for b in SAMPLES {
                let s = similarity(a, b);
                assert!((0.0..=1.0).contains(&s), "{a:?} vs {b:?} gave {s}");
            }
            assert_eq!(similarity(a, a), 1.0);
        }
    }

    #[test]
    fn test_similarity_both_empty() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("", "x"), 0.0);
    }

    #[test]
    fn test_similarity_one_char_deleted() {
        let s = similarity("hello world", "hello word");
        assert!((s - (1.0 - 1.0 / 11.0)).abs() < 1e-12);
        assert!(s > 0.9);
    }

    #[test]
    fn test_similarity_disjoint() {
        assert_eq!(similarity("cat", "dog"), 0.0);
    }
}
