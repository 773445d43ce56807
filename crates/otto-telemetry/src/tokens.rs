//! Token estimation for compression accounting

/// Chars per token for plain prose
const PROSE_CHARS_PER_TOKEN: f64 = 4.0;
/// Chars per token for symbol-dense text (JSON dumps, code, URLs)
const DENSE_CHARS_PER_TOKEN: f64 = 2.5;

/// Estimate BPE token count without a tokenizer.
///
/// Tool output ranges from email prose (~4 chars/token) to JSON and search
/// dumps full of punctuation (~2.5 chars/token); the estimate interpolates
/// between the two by symbol density.
pub fn estimate_tokens(text: &str) -> usize {
    let total = text.chars().count();
    if total == 0 {
        return 0;
    }

    let symbols = text
        .chars()
        .filter(|c| !c.is_alphanumeric() && !c.is_whitespace())
        .count();
    let density = (symbols as f64 / total as f64 * 6.0).min(1.0);
    let chars_per_token =
        PROSE_CHARS_PER_TOKEN - density * (PROSE_CHARS_PER_TOKEN - DENSE_CHARS_PER_TOKEN);

    (total as f64 / chars_per_token).ceil().max(1.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_tokens_empty() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn test_estimate_tokens_short_text_nonzero() {
        assert_eq!(estimate_tokens("a"), 1);
    }

    #[test]
    fn test_estimate_tokens_prose() {
        let prose = "You have three unread emails from Rachel about the quarterly planning meeting next week.";
        let tokens = estimate_tokens(prose);
        // ~88 chars at ~4 chars/token
        assert!((20..=30).contains(&tokens), "Got {}", tokens);
    }

    #[test]
    fn test_estimate_tokens_json_denser_than_prose() {
        let json = r#"{"events":[{"title":"Sync","time":"15:00"},{"title":"1:1","time":"16:30"}]}"#;
        let prose = "events sync at three and one on one at four thirty in the afternoon today ok";
        assert!(estimate_tokens(json) > estimate_tokens(prose));
    }
}
