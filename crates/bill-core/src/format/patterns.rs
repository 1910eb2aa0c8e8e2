//! Common regex patterns for lenient field parsing.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Already-formatted display date: D/M/YYYY with 1-2 digit day and month
    pub static ref DISPLAY_DATE: Regex = Regex::new(
        r"^\d{1,2}/\d{1,2}/\d{4}$"
    ).unwrap();

    // Leading decimal number, read the way a spreadsheet's lenient number parse does
    pub static ref LEADING_NUMBER: Regex = Regex::new(
        r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?"
    ).unwrap();
}
