//! Fence-balance checking for Markdown code blocks.
//!
//! A single pass over the lines of a file. Every opening fence must carry a
//! language or path tag, and every block must be closed by a fence of the
//! same character before end of file.

use crate::error::{Violation, ViolationKind};

pub const MISSING_TAG_MESSAGE: &str = "missing language/path tag";

/// Fence delimiter character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceChar {
    Backtick,
    Tilde,
}

/// Classification of a fence line, relative to the state it was seen in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceEvent {
    OpenTagged,
    OpenUntagged,
    Close,
    /// A fence of the other character inside an open block.
    LiteralInsideBlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FenceState {
    Outside,
    InsideBlock { fence_char: FenceChar, open_line: usize },
}

/// Parse a fence line: optional leading whitespace, a run of three or more
/// identical backticks or tildes, then anything.
///
/// Returns the fence character and the trailing content after the run.
#[must_use]
pub fn parse_fence(line: &str) -> Option<(FenceChar, &str)> {
    let trimmed = line.trim_start();
    let (fence_char, byte) = match trimmed.as_bytes().first() {
        Some(b'`') => (FenceChar::Backtick, b'`'),
        Some(b'~') => (FenceChar::Tilde, b'~'),
        _ => return None,
    };

    let run = trimmed.bytes().take_while(|&b| b == byte).count();
    if run >= 3 {
        Some((fence_char, &trimmed[run..]))
    } else {
        None
    }
}

/// Per-file fence state machine.
///
/// Feed lines in order with [`FenceTracker::feed`], then call
/// [`FenceTracker::finish`] to collect violations, including the unclosed
/// block check.
#[derive(Debug)]
pub struct FenceTracker {
    state: FenceState,
    violations: Vec<Violation>,
}

impl Default for FenceTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl FenceTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: FenceState::Outside,
            violations: Vec::new(),
        }
    }

    #[must_use]
    pub fn in_block(&self) -> bool {
        matches!(self.state, FenceState::InsideBlock { .. })
    }

    /// Consume one line. `line_number` is 1-indexed.
    ///
    /// Returns the fence event for fence lines, `None` for everything else.
    pub fn feed(&mut self, line_number: usize, line: &str) -> Option<FenceEvent> {
        let (fence_char, rest) = parse_fence(line)?;

        let event = match self.state {
            FenceState::Outside => {
                self.state = FenceState::InsideBlock {
                    fence_char,
                    open_line: line_number,
                };
                if rest.trim().is_empty() {
                    self.violations.push(Violation::at_line(
                        line_number,
                        ViolationKind::MissingFenceTag,
                        MISSING_TAG_MESSAGE.to_owned(),
                        line.trim_end().to_owned(),
                    ));
                    FenceEvent::OpenUntagged
                } else {
                    FenceEvent::OpenTagged
                }
            }
            FenceState::InsideBlock {
                fence_char: open_char,
                ..
            } => {
                if fence_char == open_char {
                    self.state = FenceState::Outside;
                    FenceEvent::Close
                } else {
                    FenceEvent::LiteralInsideBlock
                }
            }
        };
        Some(event)
    }

    /// End of file. Reports an unclosed block against its opening line.
    #[must_use]
    pub fn finish(mut self) -> Vec<Violation> {
        if let FenceState::InsideBlock { open_line, .. } = self.state {
            self.violations.push(Violation::at_line(
                open_line,
                ViolationKind::UnclosedFence,
                format!("unclosed code block opened at line {open_line}"),
                String::new(),
            ));
        }
        self.violations
    }
}

/// Scan markdown content for untagged and unclosed fences.
#[must_use]
pub fn scan_fences(content: &str) -> Vec<Violation> {
    let mut tracker = FenceTracker::new();
    for (idx, line) in content.lines().enumerate() {
        tracker.feed(idx + 1, line);
    }
    tracker.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(violations: &[Violation]) -> Vec<(usize, ViolationKind)> {
        violations.iter().map(|v| (v.line, v.kind)).collect()
    }

    #[test]
    fn test_parse_fence() {
        assert_eq!(parse_fence("```rust"), Some((FenceChar::Backtick, "rust")));
        assert_eq!(parse_fence("   ~~~~ "), Some((FenceChar::Tilde, " ")));
        assert_eq!(parse_fence("``"), None);
        assert_eq!(parse_fence("text ```"), None);
        assert_eq!(parse_fence("`~`"), None);
    }

    #[test]
    fn test_mixed_characters_are_not_one_run() {
        // The run stops at the first different character, which becomes the tag.
        assert_eq!(
            parse_fence("```~~~"),
            Some((FenceChar::Backtick, "~~~"))
        );
    }

    #[test]
    fn test_tagged_and_closed_blocks_are_clean() {
        let content = "# Title\n\n```rust\nfn main() {}\n```\n\n~~~bash\nls\n~~~\n";
        assert!(scan_fences(content).is_empty());
    }

    #[test]
    fn test_path_tag_counts_as_tag() {
        let content = "```/dev/null/example.rs#L1-10\nlet x = 1;\n```\n";
        assert!(scan_fences(content).is_empty());
    }

    #[test]
    fn test_untagged_opening_is_reported_once() {
        let content = "before\n```\nx\n```\n";
        let violations = scan_fences(content);
        assert_eq!(kinds(&violations), vec![(2, ViolationKind::MissingFenceTag)]);
        assert_eq!(violations[0].message, MISSING_TAG_MESSAGE);
        assert_eq!(violations[0].context, "```");
    }

    #[test]
    fn test_whitespace_only_tag_is_missing() {
        let violations = scan_fences("```   \ncode\n```\n");
        assert_eq!(kinds(&violations), vec![(1, ViolationKind::MissingFenceTag)]);
    }

    #[test]
    fn test_closing_fence_is_never_tag_checked() {
        // Bare closing fence is fine; a closing fence with trailing text still closes.
        let content = "```text\na\n```\n```yaml\nb: 1\n```python\n";
        assert!(scan_fences(content).is_empty());
    }

    #[test]
    fn test_longer_closing_run_closes() {
        let content = "```rust\nlet x = 1;\n````\n";
        assert!(scan_fences(content).is_empty());
    }

    #[test]
    fn test_other_fence_char_is_literal_inside_block() {
        let content = "```markdown\n~~~\nstill inside\n";
        let violations = scan_fences(content);
        assert_eq!(kinds(&violations), vec![(1, ViolationKind::UnclosedFence)]);
        assert_eq!(violations[0].message, "unclosed code block opened at line 1");
    }

    #[test]
    fn test_nested_sample_with_other_char_closes_cleanly() {
        let content = "~~~markdown\n```rust\nfn f() {}\n```\n~~~\n";
        assert!(scan_fences(content).is_empty());
    }

    #[test]
    fn test_untagged_and_unclosed_both_reported() {
        let content = "intro\n\n```\nnever closed\n";
        let violations = scan_fences(content);
        assert_eq!(
            kinds(&violations),
            vec![
                (3, ViolationKind::MissingFenceTag),
                (3, ViolationKind::UnclosedFence),
            ]
        );
    }

    #[test]
    fn test_indented_fence() {
        let content = "- item\n\n    ```toml\n    a = 1\n    ```\n";
        assert!(scan_fences(content).is_empty());
    }

    #[test]
    fn test_tracker_events() {
        let mut tracker = FenceTracker::new();
        assert_eq!(tracker.feed(1, "plain"), None);
        assert_eq!(tracker.feed(2, "```"), Some(FenceEvent::OpenUntagged));
        assert!(tracker.in_block());
        assert_eq!(tracker.feed(3, "~~~"), Some(FenceEvent::LiteralInsideBlock));
        assert_eq!(tracker.feed(4, "`````"), Some(FenceEvent::Close));
        assert!(!tracker.in_block());
        assert_eq!(tracker.feed(5, "~~~sh"), Some(FenceEvent::OpenTagged));
        let violations = tracker.finish();
        assert_eq!(
            kinds(&violations),
            vec![
                (2, ViolationKind::MissingFenceTag),
                (5, ViolationKind::UnclosedFence),
            ]
        );
    }

    #[test]
    fn test_crlf_lines() {
        let content = "```rust\r\nlet a = 1;\r\n```\r\n";
        assert!(scan_fences(content).is_empty());
    }
}
