//! Colour constants shared by every CLI message.
//!
//! - THEME_TEAL: Main Color
//! - WARNING_AMBER: Warnings and errors

use colored::Color;

pub(crate) const THEME_TEAL: Color = Color::TrueColor {
    r: 38,
    g: 166,
    b: 154,
};

pub(crate) const WARNING_AMBER: Color = Color::TrueColor {
    r: 255,
    g: 179,
    b: 0,
};
