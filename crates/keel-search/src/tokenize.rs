//! Text → terms.
//!
//! Lower-case, remove every character that is neither alphanumeric nor
//! whitespace, split on whitespace, then drop tokens shorter than
//! [`MIN_TOKEN_CHARS`] and English stop words. Passages and queries go
//! through the same function so their vocabularies line up.

/// Tokens with fewer characters than this are discarded.
pub const MIN_TOKEN_CHARS: usize = 2;

/// English stop words, sorted for binary search. Apostrophes are already
/// stripped (`"dont"`, not `"don't"`).
pub const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "almost", "alone", "along", "already",
    "also", "although", "always", "am", "among", "an", "and", "another", "any", "anyhow",
    "anyone", "anything", "anyway", "anywhere", "are", "around", "as", "at", "be", "became",
    "because", "become", "becomes", "been", "before", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "both", "but", "by", "can", "cannot", "could", "did",
    "do", "does", "doing", "done", "dont", "down", "during", "each", "either", "else",
    "elsewhere", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "for", "from", "further", "had", "has", "have", "having",
    "he", "hence", "her", "here", "hers", "herself", "him", "himself", "his", "how",
    "however", "if", "in", "indeed", "into", "is", "it", "its", "itself", "just", "least",
    "less", "may", "me", "meanwhile", "might", "more", "moreover", "most", "mostly", "much",
    "must", "my", "myself", "neither", "never", "nevertheless", "no", "nobody", "none", "nor",
    "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only",
    "onto", "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over",
    "own", "per", "perhaps", "rather", "same", "several", "she", "should", "since", "so",
    "some", "somehow", "someone", "something", "sometimes", "somewhere", "still", "such",
    "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
    "thereby", "therefore", "these", "they", "this", "those", "though", "through",
    "throughout", "thus", "to", "together", "too", "toward", "towards", "under", "until",
    "up", "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever",
    "when", "whence", "whenever", "where", "whereas", "whereby", "wherever", "whether",
    "which", "while", "who", "whoever", "whole", "whom", "whose", "why", "will", "with",
    "within", "without", "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

#[must_use]
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Split `text` into index terms, in order of appearance (duplicates kept).
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn stop_words_are_sorted_and_unique() {
        for pair in STOP_WORDS.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(
            tokenize("Manufacturing, Resilience; and WORKFORCE-training!"),
            vec!["manufacturing", "resilience", "workforcetraining"]
        );
    }

    #[test]
    fn apostrophes_join_words() {
        assert_eq!(tokenize("Region's growth"), vec!["regions", "growth"]);
    }

    #[rstest]
    #[case::stop_words_only("the and of with")]
    #[case::short_tokens("a b c 1 2")]
    #[case::punctuation_only("... --- !!!")]
    #[case::empty("")]
    fn yields_no_terms(#[case] text: &str) {
        assert!(tokenize(text).is_empty());
    }

    #[test]
    fn keeps_duplicates_in_order() {
        assert_eq!(
            tokenize("grants rural grants"),
            vec!["grants", "rural", "grants"]
        );
    }

    #[test]
    fn numbers_survive() {
        assert_eq!(tokenize("CBSA 35620 in 2023"), vec!["cbsa", "35620", "2023"]);
    }
}
