use crate::commands::CommandOptions;
use crate::core::{
    browser::AssetBrowser,
    colors::format_asset_line,
    error::{ArtchiveError, Result},
    output::{print_info, print_section_header, print_warning},
    scheduler::RecomputeOutcome,
};
use std::path::PathBuf;

/// Recompute and print the listing of `directory`, or of the stored directory
/// when none is given. A directory given here is not persisted.
pub fn execute_list(options: &CommandOptions, directory: Option<PathBuf>, json: bool) -> Result<()> {
    let (browser, outcome) = match directory {
        Some(directory) => {
            let browser = AssetBrowser::new(&options.settings, None);
            let outcome = match browser.set_directory(directory)? {
                Some(handle) => handle.wait_timeout(options.settings.recompute_timeout())?,
                None => browser.refresh_and_wait()?,
            };
            (browser, outcome)
        }
        None => {
            let browser = AssetBrowser::new(&options.settings, Some(options.store.clone()));
            browser.restore();
            let outcome = browser.refresh_and_wait()?;
            (browser, outcome)
        }
    };

    render_listing(&browser, outcome, json)
}

pub(crate) fn render_listing(
    browser: &AssetBrowser,
    outcome: RecomputeOutcome,
    json: bool,
) -> Result<()> {
    let listing = browser.listing();
    log::debug!(
        "Rendering generation {} (requested {})",
        listing.generation,
        outcome.generation()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    let directory = listing
        .directory
        .as_ref()
        .ok_or(ArtchiveError::NoDirectorySelected)?;

    if let RecomputeOutcome::Published {
        status_available: false,
        ..
    } = outcome
    {
        print_warning("No git status available, showing default colors");
    }

    print_section_header(&directory.display().to_string());

    if listing.assets.is_empty() {
        print_info("Directory is empty");
        return Ok(());
    }

    for (index, asset) in listing.assets.iter().enumerate() {
        println!("{}", format_asset_line(index + 1, asset));
    }
    println!();

    Ok(())
}
