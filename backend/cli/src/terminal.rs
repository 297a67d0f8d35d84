//! Terminal output utilities: ANSI styling and display-block rendering for
//! the one-shot `analyze` subcommand.

use coinlens_format::DisplayBlock;

// ---------------------------------------------------------------------------
// ANSI Color/Style helpers
// ---------------------------------------------------------------------------

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub const RED: &str = "\x1b[31m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

/// Strip ANSI escape codes from a string.
pub fn strip_ansi(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until 'm'
            for next in chars.by_ref() {
                if next == 'm' { break; }
            }
        } else {
            result.push(c);
        }
    }
    result
}

/// Print a formatted ERROR note.
pub fn note_error(msg: &str) {
    if supports_color() {
        eprintln!("{RED}{BOLD}✗{RESET} {msg}");
    } else {
        eprintln!("ERROR: {msg}");
    }
}

// ---------------------------------------------------------------------------
// Block rendering
// ---------------------------------------------------------------------------

/// Render display blocks as terminal lines: bold headers, cyan field
/// labels, dimmed bullet dashes, plain paragraphs.
pub fn render_blocks(blocks: &[DisplayBlock], color: bool) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            DisplayBlock::SectionHeader { title } => {
                if color {
                    out.push_str(&format!("{BOLD}{title}{RESET}\n"));
                } else {
                    out.push_str(&format!("{title}\n"));
                }
            }
            DisplayBlock::LabeledField { label, value } => {
                if color {
                    out.push_str(&format!("  {CYAN}{label}:{RESET} {value}\n"));
                } else {
                    out.push_str(&format!("  {label}: {value}\n"));
                }
            }
            DisplayBlock::BulletItem { text } => {
                if color {
                    out.push_str(&format!("  {DIM}-{RESET} {text}\n"));
                } else {
                    out.push_str(&format!("  - {text}\n"));
                }
            }
            DisplayBlock::Paragraph { text } => {
                out.push_str(&format!("{text}\n"));
            }
        }
    }
    out
}
