//! Greedy word wrapping over the measured font metrics.

use crate::fonts::{self, Font};

/// One wrapped line. `broke_word` marks a hard character break: the line
/// ends mid-word, so rejoining it with the next line must not insert a
/// space.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub text: String,
    pub broke_word: bool,
}

/// Wraps `text` into lines no wider than `max_width` points.
///
/// Words are split on whitespace and rejoined with single spaces, so
/// concatenating the returned lines word-for-word reproduces the input's
/// word sequence. A single word wider than the column is broken at the
/// character level rather than overflowing.
pub fn wrap(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    wrap_tagged(text, font, size, max_width)
        .into_iter()
        .map(|line| line.text)
        .collect()
}

/// Like [`wrap`], but keeps the word-break marker on each line so callers
/// that cut the line list and rejoin the pieces can restore the original
/// text exactly.
pub fn wrap_tagged(text: &str, font: Font, size: f32, max_width: f32) -> Vec<WrappedLine> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate_width = if current.is_empty() {
            fonts::text_width(word, font, size)
        } else {
            fonts::text_width(&current, font, size)
                + fonts::text_width(" ", font, size)
                + fonts::text_width(word, font, size)
        };

        if candidate_width <= max_width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }

        if !current.is_empty() {
            lines.push(WrappedLine {
                text: std::mem::take(&mut current),
                broke_word: false,
            });
        }

        if fonts::text_width(word, font, size) <= max_width {
            current.push_str(word);
        } else {
            // Word alone exceeds the column: hard-break it.
            break_long_word(word, font, size, max_width, &mut lines, &mut current);
        }
    }

    if !current.is_empty() {
        lines.push(WrappedLine {
            text: current,
            broke_word: false,
        });
    }
    lines
}

/// Rejoins wrapped lines, restoring spaces at word boundaries only.
pub fn rejoin(lines: &[WrappedLine]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        out.push_str(&line.text);
        if !line.broke_word && i + 1 < lines.len() {
            out.push(' ');
        }
    }
    out
}

fn break_long_word(
    word: &str,
    font: Font,
    size: f32,
    max_width: f32,
    lines: &mut Vec<WrappedLine>,
    current: &mut String,
) {
    for c in word.chars() {
        let mut candidate = current.clone();
        candidate.push(c);
        if !current.is_empty() && fonts::text_width(&candidate, font, size) > max_width {
            lines.push(WrappedLine {
                text: std::mem::take(current),
                broke_word: true,
            });
        }
        current.push(c);
    }
}
