//! Per-line classifier for analyzer output.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::blocks::DisplayBlock;

// "1." / "12." at the start of a cleaned line marks a section header.
static SECTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").unwrap());

/// Strip markdown punctuation (`*`, `_`, `#`, backtick) and trim.
fn clean_line(line: &str) -> String {
    line.chars()
        .filter(|c| !matches!(c, '*' | '_' | '#' | '`'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Classify one raw line. Lines that are empty after cleaning yield `None`.
///
/// Rules, in priority order: numbered prefix → section header; leading `-`
/// with a colon → labeled field (label up to the first colon, value the
/// rest); leading `-` → bullet; otherwise paragraph.
fn classify_line(line: &str) -> Option<DisplayBlock> {
    let cleaned = clean_line(line);
    if cleaned.is_empty() {
        return None;
    }

    if let Some(m) = SECTION_RE.find(&cleaned) {
        let title = cleaned[m.end()..].trim().to_string();
        return Some(DisplayBlock::SectionHeader { title });
    }

    if let Some(rest) = cleaned.strip_prefix('-') {
        if let Some((label, value)) = rest.split_once(':') {
            return Some(DisplayBlock::LabeledField {
                label: label.trim().to_string(),
                value: value.trim().to_string(),
            });
        }
        return Some(DisplayBlock::BulletItem { text: rest.trim().to_string() });
    }

    Some(DisplayBlock::Paragraph { text: cleaned })
}

/// Lazily map analysis text to display blocks, one per non-empty line.
///
/// Pure and deterministic: the same text always yields the same sequence.
pub fn format_analysis(text: &str) -> impl Iterator<Item = DisplayBlock> + '_ {
    text.lines().filter_map(classify_line)
}

/// Collect the whole block sequence at once.
pub fn format_blocks(text: &str) -> Vec<DisplayBlock> {
    format_analysis(text).collect()
}
