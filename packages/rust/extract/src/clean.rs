//! Text cleanup for scraped cell content.
//!
//! Each pass is a `&str -> String` substitution; [`clean_text`] runs them in
//! order until the text stops changing, which makes it idempotent.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static BOILERPLATE_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*(Full Bio|Instagram|Twitter|Opens in a new window).*$").expect("valid regex")
});

/// Label prefixes stripped from cells, applied in order.
static LABEL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\bClass:\s*",
        r"\bHometown:\s*",
        r"\bHigh school:\s*",
        r"\bPrevious College:\s*",
        r"\bPrevious School:\s*",
        r"\bHt\.?:\s*",
        r"\bPos\.?:\s*",
        r"\bMajor:\s*",
        r"^High school:\s*",
        r"^Hometown:\s*",
        r"^No\.?:\s*",
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?i){p}")).expect("valid regex"))
    .collect()
});

/// Normalize whitespace, drop trailing boilerplate and strip field labels.
pub fn clean_text(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = clean_pass(&current);
        // Passes only delete text or canonicalize whitespace, so this terminates.
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Remove label prefixes like `Class:` or `Hometown:`.
pub fn clean_field_labels(text: &str) -> String {
    let mut result = text.to_string();
    for re in LABEL_PATTERNS.iter() {
        result = re.replace_all(&result, "").trim().to_string();
    }
    result
}

fn clean_pass(text: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(text.trim(), " ");
    let trimmed = BOILERPLATE_SUFFIX_RE.replace(&collapsed, "");
    clean_field_labels(&trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(clean_text("  Jane \n\t  Doe  "), "Jane Doe");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn removes_boilerplate_suffixes() {
        assert_eq!(clean_text("Jane Doe Full Bio"), "Jane Doe");
        assert_eq!(clean_text("Jane Doe Instagram @jane"), "Jane Doe");
        assert_eq!(
            clean_text("Jane Doe Twitter Opens in a new window"),
            "Jane Doe"
        );
    }

    #[test]
    fn strips_labels() {
        assert_eq!(clean_text("Hometown: Dallas, TX"), "Dallas, TX");
        assert_eq!(clean_text("class: Junior"), "Junior");
        assert_eq!(clean_text("Ht.: 6-2"), "6-2");
        assert_eq!(clean_text("No: 12"), "12");
        assert_eq!(clean_text("Previous School: Rice"), "Rice");
    }

    #[test]
    fn label_only_in_leading_position_for_number() {
        assert_eq!(clean_text("Jersey No: 12"), "Jersey No: 12");
    }

    #[test]
    fn idempotent_on_tricky_inputs() {
        let inputs = [
            "Full Class: Bio",
            "Class: Hometown: High school: X",
            "  No.:  Class:   7 ",
            "Pos.: OH Full Bio Instagram",
            "Jane\u{a0}Doe",
            "Major: Biology / Class: Sr.",
            "plain text",
            "",
        ];
        for input in inputs {
            let once = clean_text(input);
            assert_eq!(clean_text(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn label_removal_that_exposes_boilerplate_is_cleaned() {
        assert_eq!(clean_text("Full Class: Bio"), "");
    }

    #[test]
    fn clean_field_labels_keeps_unlabelled_text() {
        assert_eq!(clean_field_labels("Dallas, TX"), "Dallas, TX");
        assert_eq!(clean_field_labels("Major: Nursing"), "Nursing");
    }
}
