//! # Built-in Checks
//!
//! | Name | Requirement |
//! |------|-------------|
//! | `check_ConfirmFileExists` | A file exists in a directory |
//! | `check_CountMarkdownTags` | A markdown tag appears enough times |
//! | `check_MatchFileRegex` | A regular expression matches enough times |

mod confirm_file_exists;
mod count_markdown_tags;
mod match_file_regex;

pub use confirm_file_exists::ConfirmFileExists;
pub use count_markdown_tags::CountMarkdownTags;
pub use match_file_regex::MatchFileRegex;

use crate::plugin::Checker;

type Factory = fn() -> Box<dyn Checker>;

fn new_confirm_file_exists() -> Box<dyn Checker> {
    Box::new(ConfirmFileExists)
}

fn new_count_markdown_tags() -> Box<dyn Checker> {
    Box::new(CountMarkdownTags)
}

fn new_match_file_regex() -> Box<dyn Checker> {
    Box::new(MatchFileRegex)
}

const BUILTINS: &[(&str, Factory)] = &[
    (confirm_file_exists::NAME, new_confirm_file_exists),
    (count_markdown_tags::NAME, new_count_markdown_tags),
    (match_file_regex::NAME, new_match_file_regex),
];

/// Names of the built-in checks
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|(name, _)| *name)
}

/// Creates the built-in check with the given name
pub fn load(name: &str) -> Option<Box<dyn Checker>> {
    BUILTINS
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, factory)| factory())
}
