//! Text and number formatters shared by ingestion and the renderers.
//!
//! All functions here are total: malformed input degrades to a neutral value
//! (zero, the input unchanged) instead of failing.

pub mod currency;
pub mod dates;
pub mod patterns;
pub mod text;
pub mod words;

pub use currency::{currency_from_str, parse_lenient_decimal, to_currency_string, to_currency_string_opt};
pub use dates::to_display_date;
pub use text::{pdf_safe, placeholder};
pub use words::amount_in_words;
