//! General message formatting functions for the command line.
//!
//! - Highlight Text (theme colour, not bold)
//! - System message formatting functions that produce the same
//! format messages.

use colored::{Color, Colorize};

use crate::cli::colors::{THEME_TEAL, WARNING_AMBER};

pub fn highlight_argument(argument: &str) -> String {
    //! Highlight a piece of text in the theme colour to make it obvious.

    format!("{}", argument.color(THEME_TEAL))
}

pub fn system_message(source_name: &str, message: String) -> String {
    //! Format a message from `source_name` (like 'system') according to the
    //! command line theme.

    tagged_message(source_name, THEME_TEAL, message)
}

pub fn warning_message(source_name: &str, message: String) -> String {
    tagged_message(source_name, WARNING_AMBER, message)
}

fn tagged_message(source_name: &str, color: Color, message: String) -> String {
    let source_formatted = format!("{:6}", source_name.color(color).bold());

    format!("[{}] {}", source_formatted, message)
}
