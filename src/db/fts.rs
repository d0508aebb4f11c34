//! Full Text Search (FTS) utilities for safe query handling.
//!
//! User search input goes into an FTS5 `MATCH` clause, whose query language
//! treats quotes, colons, parentheses and several operators specially. To
//! keep arbitrary input from being parsed as FTS syntax, every token is
//! emitted as a quoted phrase; multiple tokens combine with FTS5's implicit
//! AND, matching the original archive's "all words, any order" behavior.

/// Build an FTS5 MATCH query from raw user input.
///
/// `column` restricts the match to one indexed column (e.g. `title` for
/// title-only search); `None` searches every column of the table.
///
/// Returns an empty string when the input contains no usable tokens, which
/// callers must treat as "no results" rather than passing to MATCH.
#[must_use]
pub fn match_query(input: &str, column: Option<&str>) -> String {
    input
        .split_whitespace()
        .filter_map(|token| {
            // Double quotes are the only character that can escape a quoted
            // phrase; drop them rather than letting them unbalance it.
            let cleaned: String = token.chars().filter(|&c| c != '"').collect();
            if cleaned.is_empty() {
                return None;
            }
            Some(match column {
                Some(col) => format!("{col}:\"{cleaned}\""),
                None => format!("\"{cleaned}\""),
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word() {
        assert_eq!(match_query("rust", None), "\"rust\"");
    }

    #[test]
    fn test_multiple_words_implicit_and() {
        assert_eq!(match_query("rust  web", None), "\"rust\" \"web\"");
    }

    #[test]
    fn test_column_scoped() {
        assert_eq!(
            match_query("rust web", Some("title")),
            "title:\"rust\" title:\"web\""
        );
    }

    #[test]
    fn test_operators_are_neutralized() {
        // AND/OR/NOT and punctuation must come out as plain phrases
        assert_eq!(match_query("a OR b", None), "\"a\" \"OR\" \"b\"");
        assert_eq!(match_query("col:evil", None), "\"col:evil\"");
        assert_eq!(match_query("(boom)", None), "\"(boom)\"");
    }

    #[test]
    fn test_embedded_quotes_are_stripped() {
        assert_eq!(match_query("say \"hi\"", None), "\"say\" \"hi\"");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(match_query("", None), "");
        assert_eq!(match_query("   ", None), "");
        assert_eq!(match_query("\"\"", None), "");
    }
}
