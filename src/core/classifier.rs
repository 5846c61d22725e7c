//! Status code to display color mapping.

use crate::core::{git_status::StatusCode, state::AssetColor};

/// Map a two-character status code to its display color.
///
/// Total: any code outside the table maps to [`AssetColor::Black`].
pub fn classify(code: &str) -> AssetColor {
    match StatusCode::from_code(code) {
        Some(status) => color_for(status),
        None => AssetColor::Black,
    }
}

pub fn color_for(status: StatusCode) -> AssetColor {
    match status {
        StatusCode::Untracked => AssetColor::Magenta,
        StatusCode::Modified => AssetColor::Yellow,
        StatusCode::Added => AssetColor::Green,
        StatusCode::Deleted => AssetColor::Red,
        StatusCode::Renamed => AssetColor::Blue,
        StatusCode::Copied => AssetColor::Cyan,
        StatusCode::Unmerged => AssetColor::Magenta,
    }
}
