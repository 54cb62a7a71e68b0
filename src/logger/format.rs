//! Log formatting and output with ANSI colors and text wrapping
//!
//! Handles:
//! - Colorized console output with tag and level formatting
//! - Text wrapping at word boundaries
//! - Broken pipe handling for piped commands
//!
//! Log lines go to stderr; stdout carries the descriptor records.

use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stderr, ErrorKind, Write};

/// Log format widths for alignment
const TAG_WIDTH: usize = 10;
const LEVEL_WIDTH: usize = 7;

/// Maximum line length before wrapping
const MAX_LINE_LENGTH: usize = 145;

/// Format and output a log message
pub fn format_and_log(tag: LogTag, level: LogLevel, message: &str, colored: bool) {
    let time = Local::now().format("%H:%M:%S").to_string();

    let tag_str = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    let level_str = format!("{:<width$}", level.as_str(), width = LEVEL_WIDTH);

    let base_line = if colored {
        format!(
            "{} [{}] [{}] ",
            time.dimmed(),
            color_tag(&tag, &tag_str),
            color_level(level, &level_str)
        )
    } else {
        format!("{} [{}] [{}] ", time, tag_str, level_str)
    };

    let prefix_width = strip_ansi_codes(&base_line).chars().count();
    let available_space = if MAX_LINE_LENGTH > prefix_width + 20 {
        MAX_LINE_LENGTH - prefix_width
    } else {
        50
    };

    let chunks = wrap_text(message, available_space);
    print_stderr_safe(&format!("{}{}", base_line, chunks[0]));

    let continuation = " ".repeat(prefix_width);
    for chunk in &chunks[1..] {
        print_stderr_safe(&format!("{}{}", continuation, chunk));
    }
}

fn color_tag(tag: &LogTag, text: &str) -> ColoredString {
    match tag {
        LogTag::System => text.bright_yellow().bold(),
        LogTag::Config => text.bright_white().bold(),
        LogTag::Api => text.bright_purple().bold(),
        LogTag::Snapshot => text.bright_cyan().bold(),
        LogTag::Paginator => text.bright_blue().bold(),
        LogTag::Tags => text.bright_green().bold(),
    }
}

fn color_level(level: LogLevel, text: &str) -> ColoredString {
    match level {
        LogLevel::Error => text.bright_red().bold(),
        LogLevel::Warning => text.bright_yellow(),
        LogLevel::Info => text.normal(),
        LogLevel::Debug => text.dimmed(),
        LogLevel::Verbose => text.dimmed().italic(),
    }
}

/// Write a line to stderr, exiting quietly if the pipe was closed
fn print_stderr_safe(line: &str) {
    let mut handle = stderr().lock();
    if let Err(e) = writeln!(handle, "{}", line).and_then(|_| handle.flush()) {
        if e.kind() == ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
    }
}

/// Remove ANSI color codes from text
fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::new();
    let mut in_escape = false;

    for ch in text.chars() {
        if ch == '\x1b' {
            in_escape = true;
        } else if in_escape && ch == 'm' {
            in_escape = false;
        } else if !in_escape {
            result.push(ch);
        }
    }
    result
}

/// Wrap text at word boundaries, respecting existing newlines
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut result = Vec::new();

    for line in text.split('\n') {
        if line.chars().count() <= max_width {
            result.push(line.to_string());
            continue;
        }

        let mut current_line = String::new();
        for word in line.split_whitespace() {
            let word_len = word.chars().count();
            let current_len = current_line.chars().count();

            if word_len > max_width {
                if !current_line.is_empty() {
                    result.push(std::mem::take(&mut current_line));
                }
                result.extend(break_long_word(word, max_width));
            } else if current_line.is_empty() {
                current_line = word.to_string();
            } else if current_len + word_len + 1 <= max_width {
                current_line.push(' ');
                current_line.push_str(word);
            } else {
                result.push(std::mem::replace(&mut current_line, word.to_string()));
            }
        }

        if !current_line.is_empty() {
            result.push(current_line);
        }
    }

    if result.is_empty() {
        result.push(String::new());
    }

    result
}

/// Break a very long word (URLs, ids) into fixed-width chunks
fn break_long_word(word: &str, max_width: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(max_width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_respects_width() {
        let chunks = wrap_text("alpha beta gamma delta", 11);
        assert_eq!(chunks, vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn test_wrap_text_breaks_long_words() {
        let chunks = wrap_text("0x1234567890abcdef", 8);
        assert_eq!(chunks, vec!["0x123456", "7890abcd", "ef"]);
    }

    #[test]
    fn test_strip_ansi_codes() {
        assert_eq!(strip_ansi_codes("\x1b[1;32mTAGS\x1b[0m"), "TAGS");
    }
}
