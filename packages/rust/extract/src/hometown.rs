//! Splitting combined "hometown / high school / previous school" strings.

use std::sync::LazyLock;

use regex::Regex;

/// Substrings that mark a segment as a college rather than a high school.
///
/// Approximate: a high school named "X State High School" is misclassified.
const COLLEGE_INDICATORS: &[&str] = &["University", "College", "State", "Tech", "Institute"];

/// Result of splitting a combined hometown/school string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HometownSchool {
    pub hometown: String,
    pub high_school: String,
    pub previous_school: String,
}

static SOCIAL_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*(Instagram|Twitter|Opens in a new window).*$").expect("valid regex")
});

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Split `City, ST / High School [/ Previous College]` into its parts.
///
/// The first `/` segment is the hometown. The second is a previous school when
/// it looks like a college, otherwise a high school. A third segment is always
/// the previous school. Without a `/`, everything is the hometown.
pub fn parse_hometown_school(text: &str) -> HometownSchool {
    let mut result = HometownSchool::default();
    if text.is_empty() {
        return result;
    }

    let text = SOCIAL_SUFFIX_RE.replace(text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    let text = text.trim();

    if !text.contains('/') {
        result.hometown = text.to_string();
        return result;
    }

    let parts: Vec<&str> = text.split('/').map(str::trim).collect();
    result.hometown = parts[0].to_string();

    if let Some(second) = parts.get(1) {
        if looks_like_college(second) {
            result.previous_school = second.to_string();
        } else {
            result.high_school = second.to_string();
        }
    }

    if let Some(third) = parts.get(2) {
        result.previous_school = third.to_string();
    }

    result
}

fn looks_like_college(segment: &str) -> bool {
    COLLEGE_INDICATORS
        .iter()
        .any(|indicator| segment.contains(indicator))
}
