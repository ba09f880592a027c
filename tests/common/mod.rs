#![allow(dead_code)]

pub use fieldplan_test_utils::builders;
pub use fieldplan_test_utils::init_tracing;

use chrono::NaiveDate;

pub fn day(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("test date must be YYYY-MM-DD")
}
