use crate::commands::{list::render_listing, CommandOptions};
use crate::core::{
    browser::AssetBrowser,
    error::{ArtchiveError, Result},
    output::{print_info, print_success},
};
use std::path::PathBuf;

/// Print the selected directory, or select and persist a new one.
pub fn execute_dir(options: &CommandOptions, directory: Option<PathBuf>, json: bool) -> Result<()> {
    let browser = AssetBrowser::new(&options.settings, Some(options.store.clone()));
    browser.restore();

    let directory = match directory {
        Some(directory) => directory,
        None => {
            match browser.directory() {
                Some(current) => println!("{}", current.display()),
                None => print_info("No directory selected. Use: artchive dir <PATH>"),
            }
            return Ok(());
        }
    };

    // Refuse to persist something that can never be listed
    if !directory.is_dir() {
        return Err(ArtchiveError::not_a_directory(directory));
    }
    let directory = directory.canonicalize()?;

    let outcome = match browser.set_directory(&directory)? {
        Some(handle) => handle.wait_timeout(options.settings.recompute_timeout())?,
        None => browser.refresh_and_wait()?,
    };

    if !json {
        print_success(&format!("Selected {}", directory.display()));
    }
    render_listing(&browser, outcome, json)
}
