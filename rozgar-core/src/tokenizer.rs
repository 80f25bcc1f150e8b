use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"(?u)\p{L}[\p{L}\p{N}_']*").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a", "an", "and", "any", "are", "as", "at",
            "be", "been", "but", "by",
            "can", "could", "do", "does", "for", "from",
            "had", "has", "have", "he", "her", "his", "how",
            "i", "if", "in", "into", "is", "it", "its",
            "me", "my", "no", "not", "of", "on", "or", "our",
            "she", "so", "some", "than", "that", "the", "their", "them",
            "then", "there", "these", "they", "this", "those", "to",
            "was", "we", "were", "what", "when", "where", "which", "who",
            "will", "with", "would", "you", "your",
        ];
        words.iter().copied().collect()
    };
}

/// Normalize and stem `text` into search terms: NFKC fold, lowercase, word
/// extraction, stopword removal, English stemming. Index build and query
/// must tokenize through this same path or scores drift.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    WORD.find_iter(&normalized)
        .map(|m| m.as_str())
        .filter(|t| !STOPWORDS.contains(t))
        .map(|t| STEMMER.stem(t).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stems_and_case_folds() {
        let terms = tokenize("Training TRAINED trainings");
        assert!(terms.iter().all(|t| t == "train"));
        assert_eq!(terms.len(), 3);
    }

    #[test]
    fn drops_stopwords() {
        let terms = tokenize("how to apply for the scheme");
        assert!(!terms.contains(&"the".to_string()));
        assert!(!terms.contains(&"to".to_string()));
        assert!(terms.contains(&"scheme".to_string()));
    }

    #[test]
    fn normalizes_unicode() {
        // NFKC folds the ﬁ ligature into plain "fi".
        let terms = tokenize("ﬁtter");
        assert_eq!(terms, vec!["fitter".to_string()]);
    }
}
