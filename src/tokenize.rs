//! Word tokenizer shared by the indexer and the query engine.
//!
//! Text is split into runs of alphanumeric characters; underscore counts as
//! a word character so identifiers like `tx_origin` survive as one token.
//! Case is preserved here; the indexer and the query engine both normalize
//! to lower case before comparing terms.

pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_whitespace_and_punctuation() {
        let tokens = tokenize("Reentrancy, guard: modifier!");
        assert_eq!(tokens, vec!["Reentrancy", "guard", "modifier"]);
    }

    #[test]
    fn test_preserves_case() {
        let tokens = tokenize("SWC-107 Reentrancy");
        assert_eq!(tokens, vec!["SWC", "107", "Reentrancy"]);
    }

    #[test]
    fn test_underscore_identifiers_stay_whole() {
        let tokens = tokenize("avoid tx_origin checks");
        assert_eq!(tokens, vec!["avoid", "tx_origin", "checks"]);
    }

    #[test]
    fn test_empty_and_symbol_only_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("--- *** !!!").is_empty());
    }

    #[test]
    fn test_markdown_markup_is_stripped() {
        let tokens = tokenize("**Source URL:** https://swcregistry.io/docs");
        assert_eq!(tokens, vec!["Source", "URL", "https", "swcregistry", "io", "docs"]);
    }
}
