//! Regular expression match counting

use std::fmt::Display;
use std::fs;
use std::path::Path;

use regex::Regex;

/// Compares a found count with an expected one: equality when `exact`,
/// otherwise at least as many.
pub fn greater_than_equal_exacted<T: PartialOrd>(actual: T, expected: T, exact: bool) -> bool {
    if exact {
        actual == expected
    } else {
        actual >= expected
    }
}

/// Counts the non-overlapping matches of `regex` in `contents`.
///
/// Empty matches count, so a pattern like `(ab)*` matches at every
/// position that does not start a longer match. An empty match directly
/// after a non-empty one counts too, which `find_iter` would skip.
pub fn count_regex_matches(contents: &str, regex: &Regex) -> usize {
    let mut count = 0;
    let mut start = 0;

    while let Some(found) = regex.find_at(contents, start) {
        count += 1;
        if !found.is_empty() {
            start = found.end();
            continue;
        }

        // step over one character after an empty match
        match contents[found.end()..].chars().next() {
            Some(c) => start = found.end() + c.len_utf8(),
            None => break,
        }
    }

    count
}

/// Determines if the matches of `pattern` in `directory/file` meet the
/// expected count, returning the outcome and the count that was found.
///
/// A missing file has no matches; an invalid pattern is an error.
pub fn regex_greater_than_count(
    pattern: &str,
    expected_count: usize,
    file: &str,
    directory: impl AsRef<Path>,
    exact: bool,
) -> Result<(bool, usize), regex::Error> {
    let regex = Regex::new(pattern)?;
    let path = directory.as_ref().join(file);

    let count = match fs::read_to_string(&path) {
        Ok(contents) => count_regex_matches(&contents, &regex),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no contents to match");
            0
        }
    };

    Ok((greater_than_equal_exacted(count, expected_count, exact), count))
}

/// Wording used in check descriptions for a count requirement
pub fn count_phrase(count: impl Display, exact: bool) -> String {
    if exact {
        format!("exactly {}", count)
    } else {
        format!("at least {}", count)
    }
}
