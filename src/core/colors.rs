//! Terminal rendering of symbolic asset colors.
//!
//! The engine only deals in [`AssetColor`] names. This module is the one place
//! they become `colored` terminal colors, for the command-line front end.
//!
//! # Color Scheme
//! - **Black** (no status): the terminal's default foreground, so it stays
//!   readable on dark backgrounds
//! - Every other symbolic color maps to the terminal color of the same name

use crate::core::{
    classifier::color_for,
    git_status::StatusCode,
    state::{Asset, AssetColor},
};
use colored::*;

/// Terminal color for a symbolic color, `None` meaning "leave uncolored"
pub fn terminal_color(color: AssetColor) -> Option<Color> {
    match color {
        AssetColor::Black => None,
        AssetColor::Magenta => Some(Color::Magenta),
        AssetColor::Yellow => Some(Color::Yellow),
        AssetColor::Green => Some(Color::Green),
        AssetColor::Red => Some(Color::Red),
        AssetColor::Blue => Some(Color::Blue),
        AssetColor::Cyan => Some(Color::Cyan),
    }
}

/// Apply the asset color to any text
pub fn paint(text: &str, color: AssetColor) -> ColoredString {
    match terminal_color(color) {
        Some(terminal) => text.color(terminal),
        None => text.normal(),
    }
}

/// One listing line: `[index] name`, the name painted with its color
pub fn format_asset_line(index: usize, asset: &Asset) -> String {
    let index_colored = format!("[{index}]").cyan().bold();
    format!("{index_colored} {}", paint(&asset.name, asset.color))
}

/// Legend line for a status code: `XY  description  color`
pub fn format_legend_line(status: StatusCode) -> String {
    let color = color_for(status);
    format!(
        "{}  {:<10} {}",
        paint(&format!("[{}]", status.as_str()), color),
        status.description(),
        paint(color.as_str(), color)
    )
}
