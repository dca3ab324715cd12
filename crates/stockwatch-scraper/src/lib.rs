//! Forum list-page fetching and news extraction.
//!
//! [`PageClient`] retrieves a target's list page; [`extract_records`] locates
//! the news fragments in it through an ordered set of layout strategies and
//! turns each fragment into a [`stockwatch_core::NewsRecord`].

pub mod clean;
pub mod client;
pub mod error;
pub mod extract;
mod fields;
pub mod locator;

pub use clean::strip_price_moves;
pub use client::PageClient;
pub use error::{FetchError, ParseError};
pub use extract::{extract_fields, extract_records, ExtractOptions, ExtractedFields, Extraction};
pub use locator::LocatedTier;
