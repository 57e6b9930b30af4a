//! Field extraction and normalization for scraped roster text.
//!
//! Everything here is a pure function of its input:
//! - [`headers`] — raw column headers → [`CanonicalField`]
//! - [`fields`] — jersey, height, position and academic-year extractors
//! - [`hometown`] — combined hometown/school splitting
//! - [`clean`] — whitespace, boilerplate and label cleanup
//! - [`record`] — [`RawPlayer`] → canonical `Player`

pub mod clean;
pub mod fields;
pub mod headers;
pub mod hometown;
pub mod record;

pub use clean::{clean_field_labels, clean_text};
pub use fields::{extract_height, extract_jersey_number, extract_position, normalize_academic_year};
pub use headers::{
    CanonicalField, HEADER_MAPPINGS, NOISE_COLUMNS, filter_headers, is_noise_column,
    normalize_header, normalize_headers,
};
pub use hometown::{HometownSchool, parse_hometown_school};
pub use record::RawPlayer;
