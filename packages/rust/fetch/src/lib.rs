//! Transports that turn roster URLs into raw documents.
//!
//! This crate provides:
//! - [`HttpFetcher`] — reqwest client with a one-shot `curl` fallback on 403
//! - [`HeadlessBrowser`] — `shot-scraper` rendering and script evaluation
//! - [`decode_lenient_json`] — tolerant decoding of script output

pub mod browser;
pub mod http;
pub mod json;

pub use browser::HeadlessBrowser;
pub use http::{FetchedPage, HttpFetcher, curl_args};
pub use json::decode_lenient_json;
