//! Best-effort extractors for individual roster fields.
//!
//! Each extractor is a pure function from scraped text to a canonical value,
//! returning an empty string when nothing applicable is found.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Jersey number
// ---------------------------------------------------------------------------

/// Ordered jersey patterns; explicit labels beat bare numbers.
static JERSEY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"Jersey Number[:\s]+(\d+)",
        r"#(\d{1,2})\b",
        r"No\.?[:\s]*(\d{1,2})\b",
        r"\b(\d{1,2})\s+[A-Z]",
        r"^\s*(\d{1,2})\s*$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Extract a jersey number from text such as `#12`, `No. 23` or `7 Jane Doe`.
pub fn extract_jersey_number(text: &str) -> String {
    first_capture(&JERSEY_PATTERNS, text)
}

// ---------------------------------------------------------------------------
// Height
// ---------------------------------------------------------------------------

/// Ordered height patterns: imperial (with optional metric), metric, hyphenated, labelled.
static HEIGHT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"(\d+['′]\s*\d+["″']{1,2}(?:\s*/\s*\d+\.\d+m)?)"#,
        r"(\d+\.\d+m)",
        r"(\d+-\d+)",
        r"Height:\s*([^,\n]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Extract a height such as `6'2"`, `6'2" / 1.88m`, `1.88m` or `6-2`.
pub fn extract_height(text: &str) -> String {
    first_capture(&HEIGHT_PATTERNS, text).trim().to_string()
}

// ---------------------------------------------------------------------------
// Position (volleyball)
// ---------------------------------------------------------------------------

static POSITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(S|SETTER|OH|OUTSIDE|OUTSIDE HITTER|MB|MIDDLE|MIDDLE BLOCKER|RS|RIGHT SIDE|RIGHT SIDE HITTER|L|LIBERO|DS|DEFENSIVE SPECIALIST|OPP|OPPOSITE)\b",
    )
    .expect("valid regex")
});

/// Extract a volleyball position and normalize it to `S`, `OH`, `MB`, `RS`, `L` or `DS`.
pub fn extract_position(text: &str) -> String {
    let Some(caps) = POSITION_RE.captures(text.trim()) else {
        return String::new();
    };

    let code = match caps[1].to_uppercase().as_str() {
        "S" | "SETTER" => "S",
        "OH" | "OUTSIDE" | "OUTSIDE HITTER" => "OH",
        "MB" | "MIDDLE" | "MIDDLE BLOCKER" => "MB",
        "RS" | "RIGHT SIDE" | "RIGHT SIDE HITTER" | "OPP" | "OPPOSITE" => "RS",
        "L" | "LIBERO" => "L",
        "DS" | "DEFENSIVE SPECIALIST" => "DS",
        _ => return String::new(),
    };
    code.to_string()
}

// ---------------------------------------------------------------------------
// Academic year
// ---------------------------------------------------------------------------

const ACADEMIC_YEARS: &[(&str, &str)] = &[
    ("Fr", "Freshman"),
    ("Fr.", "Freshman"),
    ("FR", "Freshman"),
    ("So", "Sophomore"),
    ("So.", "Sophomore"),
    ("SO", "Sophomore"),
    ("Jr", "Junior"),
    ("Jr.", "Junior"),
    ("JR", "Junior"),
    ("Sr", "Senior"),
    ("Sr.", "Senior"),
    ("SR", "Senior"),
    ("Gr", "Graduate"),
    ("Gr.", "Graduate"),
    ("GR", "Graduate"),
    ("R-Fr", "Redshirt Freshman"),
    ("R-Fr.", "Redshirt Freshman"),
    ("R-So", "Redshirt Sophomore"),
    ("R-So.", "Redshirt Sophomore"),
    ("R-Jr", "Redshirt Junior"),
    ("R-Jr.", "Redshirt Junior"),
    ("R-Sr", "Redshirt Senior"),
    ("R-Sr.", "Redshirt Senior"),
    ("1st", "Freshman"),
    ("First", "Freshman"),
    ("2nd", "Sophomore"),
    ("Second", "Sophomore"),
    ("3rd", "Junior"),
    ("Third", "Junior"),
    ("4th", "Senior"),
    ("Fourth", "Senior"),
];

/// Expand academic-year abbreviations (`Fr.`, `R-Jr`, `3rd`) to full words.
///
/// Unrecognized input is returned unchanged.
pub fn normalize_academic_year(year_text: &str) -> String {
    let cleaned = year_text.trim();
    if cleaned.is_empty() {
        return String::new();
    }

    ACADEMIC_YEARS
        .iter()
        .find(|(abbr, _)| *abbr == cleaned)
        .map(|(_, full)| (*full).to_string())
        .unwrap_or_else(|| year_text.to_string())
}

fn first_capture(patterns: &[Regex], text: &str) -> String {
    patterns
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jersey_labelled_forms() {
        assert_eq!(extract_jersey_number("Jersey Number: 104"), "104");
        assert_eq!(extract_jersey_number("#7 Jane Doe"), "7");
        assert_eq!(extract_jersey_number("No. 23"), "23");
        assert_eq!(extract_jersey_number("No.5"), "5");
    }

    #[test]
    fn jersey_bare_forms() {
        assert_eq!(extract_jersey_number("12 Jane Doe"), "12");
        assert_eq!(extract_jersey_number("  9  "), "9");
        assert_eq!(extract_jersey_number("9"), "9");
    }

    #[test]
    fn jersey_label_beats_bare_number() {
        assert_eq!(extract_jersey_number("14 Jane Doe #3"), "3");
    }

    #[test]
    fn jersey_no_match() {
        assert_eq!(extract_jersey_number(""), "");
        assert_eq!(extract_jersey_number("Jane Doe"), "");
        assert_eq!(extract_jersey_number("123"), "");
    }

    #[test]
    fn height_imperial_with_metric() {
        assert_eq!(extract_height("6'2\" / 1.88m"), "6'2\" / 1.88m");
        assert_eq!(extract_height("Height 5′11″"), "5′11″");
        assert_eq!(extract_height("6' 0''"), "6' 0''");
    }

    #[test]
    fn height_metric_and_hyphen() {
        assert_eq!(extract_height("1.88m"), "1.88m");
        assert_eq!(extract_height("6-2"), "6-2");
        assert_eq!(extract_height("1.88m (6-2)"), "1.88m");
    }

    #[test]
    fn height_labelled() {
        assert_eq!(extract_height("Height: six feet, Weight: 150"), "six feet");
    }

    #[test]
    fn height_no_match() {
        assert_eq!(extract_height(""), "");
        assert_eq!(extract_height("tall"), "");
    }

    #[test]
    fn position_codes() {
        assert_eq!(extract_position("Outside Hitter"), "OH");
        assert_eq!(extract_position("setter"), "S");
        assert_eq!(extract_position("MIDDLE BLOCKER"), "MB");
        assert_eq!(extract_position("Opposite"), "RS");
        assert_eq!(extract_position("Right Side Hitter"), "RS");
        assert_eq!(extract_position("Libero"), "L");
        assert_eq!(extract_position("Defensive Specialist"), "DS");
        assert_eq!(extract_position(" DS/L "), "DS");
    }

    #[test]
    fn position_no_match() {
        assert_eq!(extract_position("Goalkeeper"), "");
        assert_eq!(extract_position("Guard"), "");
        assert_eq!(extract_position(""), "");
    }

    #[test]
    fn academic_year_abbreviations() {
        assert_eq!(normalize_academic_year("Fr."), "Freshman");
        assert_eq!(normalize_academic_year("JR"), "Junior");
        assert_eq!(normalize_academic_year(" So "), "Sophomore");
        assert_eq!(normalize_academic_year("R-Sr."), "Redshirt Senior");
        assert_eq!(normalize_academic_year("3rd"), "Junior");
        assert_eq!(normalize_academic_year("Fourth"), "Senior");
    }

    #[test]
    fn academic_year_passthrough() {
        assert_eq!(normalize_academic_year("Freshman"), "Freshman");
        assert_eq!(normalize_academic_year("5th"), "5th");
        assert_eq!(normalize_academic_year("Gr. Student"), "Gr. Student");
        assert_eq!(normalize_academic_year(""), "");
    }
}
