//! Keyword extraction from questions
//!
//! Two keyword families are extracted:
//! - ASCII alphanumeric runs, lowercased, as whole-word keywords
//! - CJK ideographs as unigrams plus consecutive-pair bigrams
//!
//! The bigrams compensate for languages without whitespace word
//! boundaries: a single ideograph is rarely a meaningful unit by itself,
//! but a pair often is. The result is deduplicated, preserving first-seen
//! order, so coverage counts distinct keywords.

use std::collections::HashSet;

/// Extracts the deduplicated keyword list for a question
pub fn extract_keywords(question: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut push = |keyword: String, keywords: &mut Vec<String>| {
        if seen.insert(keyword.clone()) {
            keywords.push(keyword);
        }
    };

    // ASCII alphanumeric runs
    let mut current = String::new();
    for ch in question.chars() {
        if ch.is_ascii_alphanumeric() {
            current.push(ch.to_ascii_lowercase());
        } else if !current.is_empty() {
            push(std::mem::take(&mut current), &mut keywords);
        }
    }
    if !current.is_empty() {
        push(current, &mut keywords);
    }

    // CJK unigrams and bigrams over the extracted ideograph sequence
    let cjk: Vec<char> = question.chars().filter(|c| is_cjk(*c)).collect();
    for &ch in &cjk {
        push(ch.to_string(), &mut keywords);
    }
    for pair in cjk.windows(2) {
        push(pair.iter().collect(), &mut keywords);
    }

    keywords
}

/// True for characters in the CJK ideograph ranges
///
/// Covers the unified ideographs block, Extension A, and the
/// compatibility block.
pub fn is_cjk(ch: char) -> bool {
    matches!(
        ch as u32,
        0x4E00..=0x9FFF | 0x3400..=0x4DBF | 0xF900..=0xFAFF
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_words_lowercased() {
        assert_eq!(extract_keywords("Xpark OPENING hours"), vec!["xpark", "opening", "hours"]);
    }

    #[test]
    fn test_ascii_numbers_kept() {
        let keywords = extract_keywords("budget 500");
        assert!(keywords.contains(&"500".to_string()));
    }

    #[test]
    fn test_punctuation_splits_words() {
        assert_eq!(extract_keywords("time,table"), vec!["time", "table"]);
    }

    #[test]
    fn test_cjk_unigrams_and_bigrams() {
        let keywords = extract_keywords("南瓜");
        assert_eq!(keywords, vec!["南", "瓜", "南瓜"]);
    }

    #[test]
    fn test_mixed_script_question() {
        let keywords = extract_keywords("Xpark 時間");
        assert!(keywords.contains(&"xpark".to_string()));
        assert!(keywords.contains(&"時".to_string()));
        assert!(keywords.contains(&"間".to_string()));
        assert!(keywords.contains(&"時間".to_string()));
    }

    #[test]
    fn test_bigrams_span_whitespace_gaps() {
        // Ideographs are extracted as one sequence before pairing
        let keywords = extract_keywords("南瓜 時間");
        assert!(keywords.contains(&"瓜時".to_string()));
    }

    #[test]
    fn test_duplicates_removed_order_preserved() {
        assert_eq!(extract_keywords("go go 南南"), vec!["go", "南", "南南"]);
    }

    #[test]
    fn test_empty_question() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("!?! ...").is_empty());
    }

    #[test]
    fn test_is_cjk_ranges() {
        assert!(is_cjk('南'));
        assert!(is_cjk('瓜'));
        assert!(!is_cjk('a'));
        assert!(!is_cjk('5'));
        // Katakana is outside the ideograph ranges
        assert!(!is_cjk('カ'));
    }
}
