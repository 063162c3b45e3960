//! Emoji detection in documentation text.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::EmojiRanges;
use crate::error::{Violation, ViolationKind};

static EMOJI_PATTERN_RELAXED: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(concat!(
        "[",
        r"\x{1F300}-\x{1F5FF}", // symbols & pictographs
        r"\x{1F600}-\x{1F64F}", // emoticons
        r"\x{1F680}-\x{1F6FF}", // transport & map
        r"\x{1F1E0}-\x{1F1FF}", // flags
        r"\x{1F900}-\x{1F9FF}", // supplemental symbols & pictographs
        r"\x{1FA70}-\x{1FAFF}", // symbols & pictographs extended-A
        "]+",
    )) {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid emoji regex: {err}"),
    }
});

static EMOJI_PATTERN_STRICT: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(concat!(
        "[",
        r"\x{1F300}-\x{1F5FF}",
        r"\x{1F600}-\x{1F64F}",
        r"\x{1F680}-\x{1F6FF}",
        r"\x{1F1E0}-\x{1F1FF}",
        r"\x{2702}-\x{27B0}", // dingbats
        r"\x{24C2}-\x{1F251}", // enclosed characters and everything up to them
        r"\x{1F900}-\x{1F9FF}",
        r"\x{1FA70}-\x{1FAFF}",
        r"\x{2600}-\x{26FF}", // misc symbols
        r"\x{2300}-\x{23FF}", // misc technical
        "]+",
    )) {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid emoji regex: {err}"),
    }
});

fn pattern_for(ranges: EmojiRanges) -> &'static Regex {
    match ranges {
        EmojiRanges::Relaxed => &EMOJI_PATTERN_RELAXED,
        EmojiRanges::Strict => &EMOJI_PATTERN_STRICT,
    }
}

/// All emoji runs on one line, concatenated in order.
#[must_use]
pub fn find_emoji(line: &str, ranges: EmojiRanges) -> String {
    pattern_for(ranges)
        .find_iter(line)
        .map(|m| m.as_str())
        .collect()
}

/// `U+1F680 U+2705` style listing of the code points in `matched`.
#[must_use]
pub fn codepoints(matched: &str) -> String {
    matched
        .chars()
        .map(|ch| format!("U+{:04X}", u32::from(ch)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Scan text line by line; one violation per line containing emoji.
#[must_use]
pub fn scan_emoji(content: &str, ranges: EmojiRanges) -> Vec<Violation> {
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let matched = find_emoji(line, ranges);
            if matched.is_empty() {
                return None;
            }
            Some(Violation::at_line(
                idx + 1,
                ViolationKind::Emoji,
                format!("emoji {}", codepoints(&matched)),
                line.to_owned(),
            ))
        })
        .collect()
}
