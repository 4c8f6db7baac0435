//! Markdown tag counting
//!
//! Markdown is parsed with pulldown-cmark and walked in document order.
//! Container nodes are visited on entry and on exit, leaf nodes once.
//! Code and HTML blocks are leaves even though pulldown-cmark opens and
//! closes them. Nodes are named with the CommonMark AST names
//! (`paragraph`, `heading`, `emph`, ...), and the whole walk is wrapped
//! in a `document` container.

use std::fs;
use std::path::Path;

use pulldown_cmark::{Event, Parser, Tag};

use super::regex_match::greater_than_equal_exacted;

/// Name of the node wrapping the whole document
pub const DOCUMENT: &str = "document";

/// How a node is visited during the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Enter,
    Exit,
    Leaf,
}

/// Scan mode of the windowed tag search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    #[default]
    Searching,
    InsideWindow,
}

/// Cursor state for one counting call
#[derive(Debug)]
pub struct TagScan<'a> {
    tag: &'a str,
    depth: i64,
    mode: ScanMode,
}

impl<'a> TagScan<'a> {
    pub fn new(tag: &'a str) -> Self {
        Self {
            tag,
            depth: 0,
            mode: ScanMode::Searching,
        }
    }

    /// Current nesting counter
    pub fn depth(&self) -> i64 {
        self.depth
    }

    /// Current scan mode
    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    /// Visits one node. The window checks see the counter as it was
    /// before this node's own entry or exit is applied.
    pub fn visit(&mut self, node: &str, step: Step) {
        let entering = step != Step::Exit;
        match self.mode {
            ScanMode::Searching => {
                if self.depth == 1 && node == self.tag && entering {
                    tracing::trace!(node, "tag window opened");
                    self.mode = ScanMode::InsideWindow;
                }
            }
            ScanMode::InsideWindow => {
                if self.depth == 2 && node == self.tag && !entering {
                    tracing::trace!(node, "tag window closed");
                    self.mode = ScanMode::Searching;
                }
            }
        }

        match step {
            Step::Enter => self.depth += 1,
            Step::Exit => self.depth -= 1,
            Step::Leaf => {}
        }
    }
}

/// CommonMark name of a node pulldown-cmark opens with a start event
fn tag_name(tag: &Tag<'_>) -> &'static str {
    match tag {
        Tag::Paragraph { .. } => "paragraph",
        Tag::Heading { .. } => "heading",
        Tag::BlockQuote { .. } => "block_quote",
        Tag::CodeBlock { .. } => "code_block",
        Tag::HtmlBlock { .. } => "html_block",
        Tag::List { .. } => "list",
        Tag::Item { .. } => "item",
        Tag::Emphasis { .. } => "emph",
        Tag::Strong { .. } => "strong",
        Tag::Link { .. } => "link",
        Tag::Image { .. } => "image",
        _ => "other",
    }
}

/// CommonMark name of a leaf node
fn leaf_name(event: &Event<'_>) -> &'static str {
    match event {
        Event::Text(_) => "text",
        Event::Code(_) => "code",
        Event::Html(_) => "html_block",
        Event::InlineHtml(_) => "html_inline",
        Event::SoftBreak => "softbreak",
        Event::HardBreak => "linebreak",
        Event::Rule => "thematic_break",
        _ => "other",
    }
}

/// Code and HTML blocks hold their literal text and have no children
fn is_leaf_block(tag: &Tag<'_>) -> bool {
    matches!(tag, Tag::CodeBlock { .. } | Tag::HtmlBlock { .. })
}

/// Walks the markdown in document order, yielding every visit
pub fn walk(contents: &str) -> Vec<(&'static str, Step)> {
    let mut visits = vec![(DOCUMENT, Step::Enter)];
    let mut open: Vec<&'static str> = Vec::new();
    // nesting inside a leaf block, whose inner events are its literal
    let mut literal = 0usize;

    for event in Parser::new(contents) {
        match event {
            Event::Start(_) if literal > 0 => literal += 1,
            Event::End(_) if literal > 0 => literal -= 1,
            _ if literal > 0 => {}
            Event::Start(tag) if is_leaf_block(&tag) => {
                literal = 1;
                visits.push((tag_name(&tag), Step::Leaf));
            }
            Event::Start(tag) => {
                let name = tag_name(&tag);
                open.push(name);
                visits.push((name, Step::Enter));
            }
            Event::End(_) => {
                let name = open.pop().unwrap_or("other");
                visits.push((name, Step::Exit));
            }
            other => visits.push((leaf_name(&other), Step::Leaf)),
        }
    }

    visits.push((DOCUMENT, Step::Exit));
    visits
}

/// Counts the specified markdown tag in the contents.
///
/// The returned value is the nesting counter after the full walk, which
/// is the net number of container entries minus exits. The tag window is
/// tracked but does not gate what is counted, so this is zero for any
/// complete document.
pub fn count_specified_tag(contents: &str, tag: &str) -> i64 {
    let mut scan = TagScan::new(tag);
    for (node, step) in walk(contents) {
        scan.visit(node, step);
    }
    scan.depth()
}

/// Determines if the tag count in `directory/file` meets the expected
/// count, returning the outcome and the count that was found.
///
/// A missing file counts as zero tags.
pub fn specified_tag_greater_than_count(
    tag: &str,
    counter: impl Fn(&str, &str) -> i64,
    expected_count: i64,
    file: &str,
    directory: &str,
    exact: bool,
) -> (bool, i64) {
    let path = Path::new(directory).join(file);
    let mut count = 0;
    if path.is_file() {
        match fs::read_to_string(&path) {
            Ok(contents) => count = counter(&contents, tag),
            Err(e) => tracing::debug!(path = %path.display(), error = %e, "unreadable file counted as empty"),
        }
    }

    (greater_than_equal_exacted(count, expected_count, exact), count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn walk_wraps_document() {
        let visits = walk("hello");
        assert_eq!(visits.first(), Some(&(DOCUMENT, Step::Enter)));
        assert_eq!(visits.last(), Some(&(DOCUMENT, Step::Exit)));
        assert!(visits.contains(&("paragraph", Step::Enter)));
        assert!(visits.contains(&("text", Step::Leaf)));
    }

    #[test]
    fn walk_names_inline_nodes() {
        let visits = walk("# Title\n\nSome *soft* and **strong** `code`\n");
        let names: Vec<_> = visits.iter().map(|(n, _)| *n).collect();

        assert!(names.contains(&"heading"));
        assert!(names.contains(&"emph"));
        assert!(names.contains(&"strong"));
        assert!(names.contains(&"code"));
    }

    #[test]
    fn literal_blocks_are_leaves() {
        let visits = walk("```\nlet x = 1;\n```\n\n<div>\nhi\n</div>\n\n---\n");

        assert!(visits.contains(&("code_block", Step::Leaf)));
        assert!(visits.contains(&("html_block", Step::Leaf)));
        assert!(visits.contains(&("thematic_break", Step::Leaf)));
        assert!(!visits.contains(&("text", Step::Leaf)));
        assert!(!visits.contains(&("html", Step::Leaf)));
        assert_eq!(visits.len(), 5);
    }

    #[test]
    fn top_level_leaf_window_never_closes() {
        let mut scan = TagScan::new("code_block");
        for (node, step) in walk("```\ncode\n```\n") {
            scan.visit(node, step);
        }
        assert_eq!(scan.mode(), ScanMode::InsideWindow);
        assert_eq!(scan.depth(), 0);
    }

    #[test]
    fn count_is_net_nesting() {
        let contents = "# One\n\n## Two\n\n*a* and *b*\n";
        assert_eq!(count_specified_tag(contents, "heading"), 0);
        assert_eq!(count_specified_tag(contents, "emph"), 0);
        assert_eq!(count_specified_tag("", "heading"), 0);
    }

    #[test]
    fn window_opens_on_top_level_tag() {
        let mut scan = TagScan::new("paragraph");
        scan.visit(DOCUMENT, Step::Enter);
        assert_eq!(scan.mode(), ScanMode::Searching);

        scan.visit("paragraph", Step::Enter);
        assert_eq!(scan.mode(), ScanMode::InsideWindow);
        assert_eq!(scan.depth(), 2);

        scan.visit("text", Step::Leaf);
        scan.visit("paragraph", Step::Exit);
        assert_eq!(scan.mode(), ScanMode::Searching);
        assert_eq!(scan.depth(), 1);
    }

    #[test]
    fn window_ignores_nested_tag() {
        let mut scan = TagScan::new("emph");
        scan.visit(DOCUMENT, Step::Enter);
        scan.visit("paragraph", Step::Enter);
        scan.visit("emph", Step::Enter);
        assert_eq!(scan.mode(), ScanMode::Searching);
        assert_eq!(scan.depth(), 3);
    }

    #[test]
    fn missing_file_counts_as_zero() {
        let dir = TempDir::new().unwrap();
        let directory = dir.path().to_str().unwrap();

        let (met, count) =
            specified_tag_greater_than_count("heading", count_specified_tag, 1, "missing.md", directory, false);
        assert!(!met);
        assert_eq!(count, 0);

        let (met, _) =
            specified_tag_greater_than_count("heading", count_specified_tag, 0, "missing.md", directory, true);
        assert!(met);
    }

    #[test]
    fn existing_file_uses_counter() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.md"), "# Title\n").unwrap();
        let directory = dir.path().to_str().unwrap();

        let fixed = |_: &str, _: &str| 3;
        assert_eq!(
            specified_tag_greater_than_count("heading", fixed, 2, "README.md", directory, false),
            (true, 3)
        );
        assert_eq!(
            specified_tag_greater_than_count("heading", fixed, 2, "README.md", directory, true),
            (false, 3)
        );
    }

    proptest! {
        #[test]
        fn complete_walk_always_nets_zero(contents in "\\PC{0,200}", tag in "[a-z_]{1,12}") {
            prop_assert_eq!(count_specified_tag(&contents, &tag), 0);
        }
    }
}
