//! Fiscal-year bid number recognition.
//!
//! Listing titles are free-form; the bid number shows up as `BID NO FY 2025-11`,
//! as a fiscal-year span `2021-2022-23` or as a bare `FY 2023-08`. Rules are
//! tried in that order and the first one matching wins.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref BID_NO: Regex =
        Regex::new(r"(?i)BID NO\.?\s*(?:FY\s*)?([0-9]{4}-[0-9]{1,2})").unwrap();
    static ref FISCAL_SPAN: Regex = Regex::new(r"([0-9]{4})-[0-9]{4}-([0-9]{1,2})").unwrap();
    static ref FISCAL_YEAR: Regex = Regex::new(r"(?i)FY\s*([0-9]{4}-[0-9]{1,2})").unwrap();
    static ref RULES: [(&'static Regex, fn(&Captures) -> String); 3] = [
        (&*BID_NO, fiscal_token),
        (&*FISCAL_SPAN, fiscal_span),
        (&*FISCAL_YEAR, fiscal_token),
    ];
}

fn fiscal_token(caps: &Captures) -> String {
    format!("FY {}", &caps[1])
}

fn fiscal_span(caps: &Captures) -> String {
    format!("FY {}-{}", &caps[1], &caps[2])
}

/// Normalized `FY YYYY-N(N)` identifier found in `title`, if any.
pub fn bid_identifier(title: &str) -> Option<String> {
    RULES
        .iter()
        .find_map(|(re, extract)| re.captures(title).map(|caps| extract(&caps)))
}
