//! Column-header normalization for table-based rosters.
//!
//! Sites spell the same column dozens of ways. The mapping below is an
//! enumerated dictionary with exact string matching; a new spelling needs a new
//! entry here.

use std::collections::HashMap;
use std::sync::LazyLock;

use rosters_shared::{Result, RosterError};

/// Canonical roster field a table column maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    Jersey,
    Name,
    AcademicYear,
    Height,
    Position,
    /// Hometown, possibly combined with schools (`City, ST / High School`).
    Town,
    HighSchool,
    PreviousSchool,
}

impl CanonicalField {
    /// Canonical key as used in the mapping table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jersey => "jersey",
            Self::Name => "name",
            Self::AcademicYear => "academic_year",
            Self::Height => "height",
            Self::Position => "position",
            Self::Town => "town",
            Self::HighSchool => "high_school",
            Self::PreviousSchool => "previous_school",
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

use CanonicalField::*;

/// Raw header spelling → canonical field.
pub const HEADER_MAPPINGS: &[(&str, CanonicalField)] = &[
    ("No.", Jersey),
    ("Name", Name),
    ("NAME", Name),
    ("Cl.", AcademicYear),
    ("Pos.", Position),
    ("Ht.", Height),
    ("Hometown/High School", Town),
    ("Hometown/Last School", Town),
    ("Num", Jersey),
    ("Yr", AcademicYear),
    ("Ht", Height),
    ("Hometown", Town),
    ("High School/Previous School", HighSchool),
    ("Pos", Position),
    ("Hometown/Previous School", Town),
    ("Exp.", AcademicYear),
    ("Number", Jersey),
    ("Position", Position),
    ("HT.", Height),
    ("YEAR", AcademicYear),
    ("HOMETOWN", Town),
    ("LAST SCHOOL", HighSchool),
    ("Yr.", AcademicYear),
    ("Hometown/High School/Last School", Town),
    ("Class", AcademicYear),
    ("High school", HighSchool),
    ("Previous College", PreviousSchool),
    ("Cl.-Exp.", AcademicYear),
    ("#", Jersey),
    ("High School", HighSchool),
    ("Hometown / Previous School", Town),
    ("No", Jersey),
    ("Hometown/High School/Previous School", Town),
    ("Hometown / High School / Last College", Town),
    ("Year", AcademicYear),
    ("Height", Height),
    ("Previous School", HighSchool),
    ("Cl", AcademicYear),
    ("Prev. Coll.", PreviousSchool),
    ("Hgt.", Height),
    ("Hometown/ High School", Town),
    ("Hometown/High School (Last School)", Town),
    ("Hometown/High School (Former School)", Town),
    ("Hometown / High School", Town),
    ("YR", AcademicYear),
    ("POS", Position),
    ("HT", Height),
    ("Player", Name),
    ("Hometown/High School/Previous College", Town),
    ("Last School/Hometown", Town),
    ("NO.", Jersey),
    ("YR.", AcademicYear),
    ("POS.", Position),
    ("HIGH SCHOOL", HighSchool),
    ("NO", Jersey),
    ("HOMETOWN/HIGH SCHOOL", Town),
    ("Academic Yr.", AcademicYear),
    ("Full Name", Name),
    ("POSITION", Position),
    ("Hometown / Previous School / High School", Town),
    ("High School / Previous School", HighSchool),
    ("Hometown/High School (Previous School)", Town),
    ("Hometown/Previous School/Club Team", Town),
];

/// Columns that carry no roster field and must be dropped before lookup.
pub const NOISE_COLUMNS: &[&str] = &[
    "Pronounciation",
    "Club Team",
    "Major",
    "MAJOR",
    "Major/Minor",
    "College",
    "Wt.",
    "Ltrs.",
    "Pronouns",
    "Social",
];

static HEADER_INDEX: LazyLock<HashMap<&'static str, CanonicalField>> =
    LazyLock::new(|| HEADER_MAPPINGS.iter().copied().collect());

/// Map one raw header to its canonical field.
///
/// Exact match only; unknown headers are an error because a table with an
/// unrecognized column cannot be interpreted safely.
pub fn normalize_header(raw: &str) -> Result<CanonicalField> {
    HEADER_INDEX
        .get(raw)
        .copied()
        .ok_or_else(|| RosterError::unknown_header(raw))
}

/// Map an ordered header row to canonical fields, preserving order.
pub fn normalize_headers<S: AsRef<str>>(raw: &[S]) -> Result<Vec<CanonicalField>> {
    raw.iter().map(|h| normalize_header(h.as_ref())).collect()
}

/// Whether a header names a known noise column.
pub fn is_noise_column(raw: &str) -> bool {
    NOISE_COLUMNS.contains(&raw)
}

/// Drop empty headers and noise columns.
pub fn filter_headers<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter()
        .map(|h| h.as_ref().trim())
        .filter(|h| !h.is_empty() && !is_noise_column(h))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mapped_header_normalizes() {
        for (raw, field) in HEADER_MAPPINGS {
            assert_eq!(normalize_header(raw).expect(raw), *field, "header {raw:?}");
        }
    }

    #[test]
    fn representative_spellings() {
        assert_eq!(normalize_header("#").unwrap(), Jersey);
        assert_eq!(normalize_header("Cl.-Exp.").unwrap(), AcademicYear);
        assert_eq!(normalize_header("Prev. Coll.").unwrap(), PreviousSchool);
        assert_eq!(normalize_header("Last School/Hometown").unwrap(), Town);
        assert_eq!(normalize_header("Previous School").unwrap(), HighSchool);
    }

    #[test]
    fn unknown_headers_fail() {
        for raw in ["Major", "Pronouns", "name", "Hometown ", "Weight", ""] {
            let err = normalize_header(raw).unwrap_err();
            assert!(
                matches!(err, RosterError::UnknownHeader { ref header } if header == raw),
                "expected unknown header for {raw:?}"
            );
        }
    }

    #[test]
    fn normalize_headers_preserves_order() {
        let row = ["No.", "Name", "Pos.", "Ht.", "Yr.", "Hometown/High School"];
        let fields = normalize_headers(&row).unwrap();
        assert_eq!(
            fields,
            vec![Jersey, Name, Position, Height, AcademicYear, Town]
        );
    }

    #[test]
    fn normalize_headers_fails_on_any_unknown() {
        let row = ["No.", "Name", "Major"];
        assert!(normalize_headers(&row).is_err());
    }

    #[test]
    fn filter_drops_noise_and_blanks() {
        let row = ["No.", "", "Name", "Major", "Pronouns", "Ht.", "Hometown"];
        let filtered = filter_headers(&row);
        assert_eq!(filtered, vec!["No.", "Name", "Ht.", "Hometown"]);
        assert!(normalize_headers(&filtered).is_ok());
    }

    #[test]
    fn canonical_keys() {
        assert_eq!(Town.as_str(), "town");
        assert_eq!(AcademicYear.to_string(), "academic_year");
    }
}
