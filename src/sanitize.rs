use regex::Regex;
use std::sync::OnceLock;

fn invalid_chars() -> &'static Regex {
    static INVALID: OnceLock<Regex> = OnceLock::new();
    INVALID.get_or_init(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("static pattern"))
}

fn whitespace_runs() -> &'static Regex {
    static RUNS: OnceLock<Regex> = OnceLock::new();
    RUNS.get_or_init(|| Regex::new(r"\s+").expect("static pattern"))
}

/// Turn a chapter title into something usable as a file name.
///
/// Characters that are invalid on common filesystems become spaces, whitespace
/// runs collapse to one space, and the ends are trimmed. An empty result means
/// the title has nothing usable left.
pub fn sanitize_filename(name: &str) -> String {
    let replaced = invalid_chars().replace_all(name, " ");
    whitespace_runs()
        .replace_all(&replaced, " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORBIDDEN: [char; 9] = ['\\', '/', ':', '"', '*', '?', '<', '>', '|'];

    #[test]
    fn test_replaces_separators_with_single_space() {
        assert_eq!(sanitize_filename("A/B: C"), "A B C");
    }

    #[test]
    fn test_strips_every_forbidden_character() {
        let input = r#"a\b/c:d"e*f?g<h>i|j"#;
        let out = sanitize_filename(input);
        assert!(!out.contains(FORBIDDEN.as_slice()));
        assert_eq!(out, "a b c d e f g h i j");
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "  Chapter 1:   The <Beginning>  ",
            "???",
            "plain",
            "tab\tand\nnewline",
            "",
            "|x|",
        ] {
            let once = sanitize_filename(input);
            assert_eq!(sanitize_filename(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn test_only_forbidden_characters_yields_empty() {
        assert_eq!(sanitize_filename(r#"/\:*?"<>|"#), "");
        assert_eq!(sanitize_filename("   "), "");
    }
}
