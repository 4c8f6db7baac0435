//! Core domain types: check results and the content inspection behind
//! the built-in checks.

mod markdown;
mod regex_match;
mod report;

pub use markdown::{
    count_specified_tag, specified_tag_greater_than_count, walk, ScanMode, Step, TagScan, DOCUMENT,
};
pub use regex_match::{
    count_phrase, count_regex_matches, greater_than_equal_exacted, regex_greater_than_count,
};
pub use report::{CheckResult, Report};
