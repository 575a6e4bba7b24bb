//! Unicode-aware tokenizer for lexical scoring.

/// Tokenize text into lowercase terms.
///
/// Every character that is not a Unicode letter, digit or whitespace is
/// replaced by a space, then the text is split on whitespace runs. Empty
/// tokens are dropped. Pure and deterministic; `tokenize("")` is `[]`.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_cyrillic_and_digits() {
        assert_eq!(tokenize("Привет, Мир! 123"), vec!["привет", "мир", "123"]);
    }

    #[test]
    fn tokenize_empty() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn tokenize_idempotent() {
        let once = tokenize("Hello,   world-wide WEB 2.0");
        let twice = tokenize(&once.join(" "));
        assert_eq!(once, twice);
    }
}
