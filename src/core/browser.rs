//! The façade a presentation layer talks to.
//!
//! [`AssetBrowser`] owns the selected directory, the persisted path store and
//! the recompute scheduler, and exposes the read accessors a view binds to:
//! [`directory`](AssetBrowser::directory), [`items`](AssetBrowser::items) and
//! [`colors`](AssetBrowser::colors). Observers subscribe to
//! [`ChangeEvent`]s to learn when to re-read.
//!
//! Every error here is soft: it is logged and the browser keeps serving the
//! last good listing.

use crate::core::{
    config::Settings,
    error::{ArtchiveError, Result},
    events::{ChangeEvent, Observers},
    git::GitStatusSource,
    index::AssetIndex,
    scheduler::{RecomputeHandle, RecomputeOutcome, RecomputeScheduler},
    state::{Asset, AssetColor, Listing},
    status_source::StatusSource,
    store::PathStore,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;

#[derive(Debug)]
pub struct AssetBrowser {
    directory: RwLock<Option<PathBuf>>,
    /// Listing behind the last `items()` call, so `colors()` lines up with it
    shown: RwLock<Option<Listing>>,
    store: Option<PathStore>,
    scheduler: RecomputeScheduler,
    timeout: Duration,
}

impl AssetBrowser {
    /// Build a browser backed by git. Nothing is loaded or computed yet.
    pub fn new(settings: &Settings, store: Option<PathStore>) -> Self {
        let source = Arc::new(GitStatusSource::new(settings.git_binary.clone()));
        Self::with_source(settings, store, source)
    }

    pub fn with_source(
        settings: &Settings,
        store: Option<PathStore>,
        source: Arc<dyn StatusSource>,
    ) -> Self {
        let scheduler = RecomputeScheduler::new(
            Arc::new(AssetIndex::new()),
            source,
            Arc::new(Observers::new()),
        )
        .with_coalescing(settings.coalesce_recomputes);

        Self {
            directory: RwLock::new(None),
            shown: RwLock::new(None),
            store,
            scheduler,
            timeout: settings.recompute_timeout(),
        }
    }

    /// Build a browser, restore the persisted directory and start the first
    /// recompute in the background.
    pub fn open(settings: &Settings, store: PathStore) -> Self {
        let browser = Self::new(settings, Some(store));
        if let Some(directory) = browser.restore() {
            if let Err(e) = browser.scheduler.spawn(directory) {
                log::warn!("Could not start initial recompute: {e}");
            }
        }
        browser
    }

    /// Load the persisted directory into memory without persisting or notifying.
    pub fn restore(&self) -> Option<PathBuf> {
        let store = self.store.as_ref()?;
        let restored = match store.load() {
            Ok(directory) => directory,
            Err(e) => {
                log::warn!("Starting without a directory: {e}");
                None
            }
        };

        if let Some(directory) = &restored {
            log::debug!("Restored directory {}", directory.display());
            *self.directory_mut() = Some(directory.clone());
        }
        restored
    }

    fn directory_mut(&self) -> std::sync::RwLockWriteGuard<'_, Option<PathBuf>> {
        self.directory
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn shown_mut(&self) -> std::sync::RwLockWriteGuard<'_, Option<Listing>> {
        self.shown
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn directory(&self) -> Option<PathBuf> {
        self.directory
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Select a new directory.
    ///
    /// A value equal to the current one is a no-op and returns `Ok(None)`.
    /// Otherwise the in-memory value is updated first, then persisted
    /// (failures only logged), observers are told, and a recompute starts.
    pub fn set_directory(&self, directory: impl Into<PathBuf>) -> Result<Option<RecomputeHandle>> {
        let directory = directory.into();
        {
            let mut current = self.directory_mut();
            if current.as_deref() == Some(directory.as_path()) {
                return Ok(None);
            }
            *current = Some(directory.clone());
        }
        *self.shown_mut() = None;

        if let Some(store) = &self.store {
            if let Err(e) = store.save(&directory) {
                log::warn!("Keeping directory in memory only: {e}");
            }
        }

        self.scheduler
            .observers()
            .emit(ChangeEvent::DirectoryChanged(directory.clone()));
        self.scheduler.spawn(directory).map(Some)
    }

    /// Start a fresh recompute of the current directory.
    pub fn refresh(&self) -> Result<RecomputeHandle> {
        let directory = self.directory().ok_or(ArtchiveError::NoDirectorySelected)?;
        self.scheduler.spawn(directory)
    }

    /// Recompute the current directory and wait for it, bounded by the
    /// configured timeout.
    pub fn refresh_and_wait(&self) -> Result<RecomputeOutcome> {
        self.refresh()?.wait_timeout(self.timeout)
    }

    /// Names of the current listing after a fresh recompute.
    ///
    /// If the recompute fails or times out the previous listing is returned.
    pub fn items(&self) -> Vec<String> {
        match self.refresh_and_wait() {
            Ok(_) | Err(ArtchiveError::NoDirectorySelected) => {}
            Err(e) => log::warn!("Serving previous listing: {e}"),
        }

        let listing = self.scheduler.index().listing();
        let names = listing.names();
        *self.shown_mut() = Some(listing);
        names
    }

    /// Colors parallel to the names the last [`items`](Self::items) call
    /// returned, even if a newer listing has been published since. Before any
    /// `items()` call (or after a directory change) this reads the current
    /// listing. Use [`assets`](Self::assets) or [`listing`](Self::listing) to
    /// get names and colors from one snapshot.
    pub fn colors(&self) -> Vec<AssetColor> {
        let shown = self
            .shown
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match shown.as_ref() {
            Some(listing) => listing.colors(),
            None => self.scheduler.index().colors(),
        }
    }

    pub fn assets(&self) -> Vec<Asset> {
        self.scheduler.index().snapshot()
    }

    pub fn listing(&self) -> Listing {
        self.scheduler.index().listing()
    }

    pub fn index(&self) -> &Arc<AssetIndex> {
        self.scheduler.index()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.scheduler.observers().subscribe(callback);
    }

    pub fn store_file(&self) -> Option<&Path> {
        self.store.as_ref().map(PathStore::file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::status_source::StaticStatusSource;
    use crate::core::store::STORE_FILE_NAME;
    use std::fs;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn browser(store: Option<PathStore>, pairs: &[(&str, &str)]) -> AssetBrowser {
        let source = StaticStatusSource::from_pairs(pairs.iter().copied());
        AssetBrowser::with_source(&Settings::default(), store, Arc::new(source))
    }

    fn art_dir(names: &[&str]) -> Result<TempDir> {
        let temp_dir = TempDir::new()?;
        for name in names {
            fs::write(temp_dir.path().join(name), name)?;
        }
        Ok(temp_dir)
    }

    #[test]
    fn test_items_without_directory_is_empty() {
        let browser = browser(None, &[]);
        assert!(browser.directory().is_none());
        assert!(browser.items().is_empty());
        assert!(browser.colors().is_empty());
    }

    #[test]
    fn test_set_directory_persists_notifies_and_recomputes() -> Result<()> {
        let art = art_dir(&["a.txt", "b.txt", "c.txt"])?;
        let config = TempDir::new()?;
        let store = PathStore::with_file(config.path().join(STORE_FILE_NAME));
        let browser = browser(Some(store.clone()), &[("a.txt", "M "), ("c.txt", "??")]);

        let (tx, rx) = mpsc::channel();
        browser.subscribe(move |event| {
            tx.send(event.clone()).unwrap();
        });

        let handle = browser.set_directory(art.path())?.expect("directory changed");
        handle.wait()?;

        assert_eq!(browser.directory().as_deref(), Some(art.path()));
        assert_eq!(store.load()?.as_deref(), Some(art.path()));

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                ChangeEvent::DirectoryChanged(art.path().to_path_buf()),
                ChangeEvent::ListingChanged { generation: 1 },
            ]
        );

        let items = browser.items();
        let colors = browser.colors();
        assert_eq!(items.len(), 3);
        assert_eq!(colors.len(), items.len());
        for (name, color) in items.iter().zip(colors) {
            let expected = match name.as_str() {
                "a.txt" => AssetColor::Yellow,
                "c.txt" => AssetColor::Magenta,
                _ => AssetColor::Black,
            };
            assert_eq!(color, expected, "color of {name}");
        }
        Ok(())
    }

    #[test]
    fn test_colors_stay_parallel_to_items_across_publish() -> Result<()> {
        let art = art_dir(&["a.txt", "b.txt"])?;
        let browser = browser(None, &[("a.txt", "M ")]);
        browser.set_directory(art.path())?.expect("changed").wait()?;

        let items = browser.items();
        // A publish lands between the two reads
        browser
            .index()
            .publish(vec![Asset::new("other.txt", AssetColor::Green)]);
        let colors = browser.colors();

        assert_eq!(colors.len(), items.len());
        for (name, color) in items.iter().zip(colors) {
            let expected = if name == "a.txt" {
                AssetColor::Yellow
            } else {
                AssetColor::Black
            };
            assert_eq!(color, expected, "color of {name}");
        }
        assert_eq!(browser.listing().names(), vec!["other.txt"]);
        Ok(())
    }

    #[test]
    fn test_setting_same_directory_is_noop() -> Result<()> {
        let art = art_dir(&["a.txt"])?;
        let browser = browser(None, &[]);

        browser.set_directory(art.path())?.expect("first change").wait()?;
        assert!(browser.set_directory(art.path())?.is_none());
        Ok(())
    }

    #[test]
    fn test_persist_failure_keeps_in_memory_directory() -> Result<()> {
        let art = art_dir(&["a.txt"])?;
        let blocker = art.path().join("a.txt");
        let store = PathStore::with_file(blocker.join(STORE_FILE_NAME));
        let browser = browser(Some(store), &[]);

        browser.set_directory(art.path())?.expect("changed").wait()?;

        assert_eq!(browser.directory().as_deref(), Some(art.path()));
        assert_eq!(browser.items(), vec!["a.txt"]);
        Ok(())
    }

    #[test]
    fn test_vanished_directory_keeps_previous_listing() -> Result<()> {
        let art = art_dir(&["a.txt"])?;
        let browser = browser(None, &[("a.txt", "D ")]);
        browser.set_directory(art.path())?.expect("changed").wait()?;
        let before = browser.listing();

        let gone = art.path().to_path_buf();
        drop(art);

        let result = browser.refresh_and_wait();
        assert!(matches!(result, Err(ArtchiveError::NotADirectory { path }) if path == gone));
        assert_eq!(browser.listing(), before);
        assert_eq!(browser.items(), vec!["a.txt"]);
        assert_eq!(browser.colors(), vec![AssetColor::Red]);
        Ok(())
    }

    #[test]
    fn test_open_restores_persisted_directory() -> Result<()> {
        let art = art_dir(&["a.txt"])?;
        let config = TempDir::new()?;
        let store = PathStore::with_file(config.path().join(STORE_FILE_NAME));
        store.save(art.path())?;

        let browser = AssetBrowser::open(&Settings::default(), store);

        assert_eq!(browser.directory().as_deref(), Some(art.path()));
        assert_eq!(browser.items(), vec!["a.txt"]);
        Ok(())
    }

    #[test]
    fn test_open_without_persisted_directory() -> Result<()> {
        let config = TempDir::new()?;
        let store = PathStore::with_file(config.path().join("missing.txt"));

        let browser = AssetBrowser::open(&Settings::default(), store);

        assert!(browser.directory().is_none());
        assert!(matches!(
            browser.refresh_and_wait(),
            Err(ArtchiveError::NoDirectorySelected)
        ));
        Ok(())
    }
}
