use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{FontSpec, TextMeasurer};

/// A category label broken into lines that fit one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrappedLabel {
    pub lines: SmallVec<[String; 2]>,
}

impl WrappedLabel {
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Greedily packs whitespace-separated words into lines no wider than
/// `max_width_px`.
///
/// A word that is wider than the column on its own is never split; it takes a
/// line by itself. Empty or whitespace-only text yields one empty line.
#[must_use]
pub fn wrap_label<M: TextMeasurer + ?Sized>(
    text: &str,
    max_width_px: f64,
    font: &FontSpec,
    measurer: &M,
) -> WrappedLabel {
    let mut lines: SmallVec<[String; 2]> = SmallVec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measurer.measure(&candidate, font) <= max_width_px {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    WrappedLabel { lines }
}

/// Largest line count across `labels`, never below one.
#[must_use]
pub fn max_label_lines(labels: &[WrappedLabel]) -> usize {
    labels
        .iter()
        .map(WrappedLabel::line_count)
        .max()
        .unwrap_or(1)
        .max(1)
}
