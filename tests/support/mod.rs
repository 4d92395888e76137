#![allow(dead_code)]

pub mod architecture;
pub mod seed;

use chrono::{NaiveDate, NaiveDateTime};

/// A fixed "now" in the middle of the September-based fiscal year.
pub fn now() -> NaiveDateTime {
    at(2025, 3, 15, 10, 0, 0)
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}
