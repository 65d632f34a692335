//! Text normalizer applied to every pasted or extracted document before scoring.

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_ENDINGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n?").expect("valid regex"));
static TRAILING_BLANKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+\n").expect("valid regex"));
static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Strips NULs, unifies line endings, drops blanks before newlines,
/// collapses 3+ newlines to 2 and trims. Idempotent.
pub fn normalize(text: &str) -> String {
    let without_nul = text.replace('\u{0000}', "");
    let unified = LINE_ENDINGS.replace_all(&without_nul, "\n");
    let stripped = TRAILING_BLANKS.replace_all(&unified, "\n");
    let collapsed = BLANK_RUNS.replace_all(&stripped, "\n\n");
    collapsed.trim().to_string()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normalize_is_idempotent(text in any::<String>()) {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalize_is_idempotent_on_whitespace_heavy_text(text in r"[a \t\r\n\x00é-]{0,120}") {
            let once = normalize(&text);
            prop_assert!(!once.contains('\r'));
            prop_assert!(!once.contains('\0'));
            prop_assert!(!once.contains("\n\n\n"));
            prop_assert!(!once.contains(" \n") && !once.contains("\t\n"));
            prop_assert_eq!(normalize(&once), once);
        }
    }
}
