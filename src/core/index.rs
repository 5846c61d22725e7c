//! The published asset listing and the lock guarding it.
//!
//! [`AssetIndex`] is the only state shared between the recompute workers and
//! readers. Writers replace the whole [`Listing`] under the write lock; readers
//! clone it under the read lock. A reader therefore sees either the old listing
//! or the new one, never a mix.
//!
//! The index also issues generation tokens. Every writer, direct or through a
//! recompute cycle, draws from the same counter, so a token compares correctly
//! against whatever is published.
//!
//! A poisoned lock is recovered rather than propagated: every write is a single
//! assignment of a fully built value, so a panicking holder cannot leave a
//! partial listing behind.

use crate::core::state::{Asset, AssetColor, Listing};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug)]
pub struct AssetIndex {
    published: RwLock<Listing>,
    issued: AtomicU64,
}

impl Default for AssetIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetIndex {
    pub fn new() -> Self {
        Self {
            published: RwLock::new(Listing::empty()),
            issued: AtomicU64::new(0),
        }
    }

    /// Take the next generation token. Tokens are strictly increasing.
    pub fn issue_generation(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Most recently issued token, published or not
    pub fn latest_issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    fn read(&self) -> RwLockReadGuard<'_, Listing> {
        self.published
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Listing> {
        self.published
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace the published assets unconditionally. The last caller wins.
    ///
    /// The listing is stamped with a freshly issued token, so recompute cycles
    /// started earlier can no longer publish over it. Returns that token.
    pub fn publish(&self, assets: Vec<Asset>) -> u64 {
        let mut published = self.write();
        // Issued under the lock: anything already published holds a smaller token
        let generation = self.issue_generation();
        let directory = published.directory.clone();
        *published = Listing {
            generation,
            directory,
            published_at: Utc::now(),
            assets,
        };
        generation
    }

    /// Replace the whole listing unconditionally, stamping it with `generation`
    pub fn replace(&self, generation: u64, directory: Option<PathBuf>, assets: Vec<Asset>) {
        *self.write() = Listing {
            generation,
            directory,
            published_at: Utc::now(),
            assets,
        };
    }

    /// Publish only if `generation` is newer than what is currently published.
    ///
    /// The comparison and the swap happen under one write lock. Returns whether
    /// the listing was applied.
    pub fn publish_generation(
        &self,
        generation: u64,
        directory: Option<PathBuf>,
        assets: Vec<Asset>,
    ) -> bool {
        let mut published = self.write();
        if generation <= published.generation {
            log::debug!(
                "Discarding listing from generation {generation}, generation {} already published",
                published.generation
            );
            return false;
        }

        *published = Listing {
            generation,
            directory,
            published_at: Utc::now(),
            assets,
        };
        true
    }

    /// Consistent copy of the published assets
    pub fn snapshot(&self) -> Vec<Asset> {
        self.read().assets.clone()
    }

    /// Consistent copy of the whole published listing
    pub fn listing(&self) -> Listing {
        self.read().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.read().names()
    }

    pub fn colors(&self) -> Vec<AssetColor> {
        self.read().colors()
    }

    pub fn generation(&self) -> u64 {
        self.read().generation
    }

    pub fn len(&self) -> usize {
        self.read().assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().assets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn assets(names: &[(&str, AssetColor)]) -> Vec<Asset> {
        names
            .iter()
            .map(|(name, color)| Asset::new(*name, *color))
            .collect()
    }

    #[test]
    fn test_new_index_is_empty() {
        let index = AssetIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.generation(), 0);
        assert!(index.listing().directory.is_none());
    }

    #[test]
    fn test_publish_then_snapshot_round_trips() {
        let index = AssetIndex::new();
        let published = assets(&[
            ("a.txt", AssetColor::Yellow),
            ("b.txt", AssetColor::Black),
            ("c.txt", AssetColor::Magenta),
        ]);

        index.publish(published.clone());

        assert_eq!(index.snapshot(), published);
        assert_eq!(index.names(), vec!["a.txt", "b.txt", "c.txt"]);
        assert_eq!(
            index.colors(),
            vec![AssetColor::Yellow, AssetColor::Black, AssetColor::Magenta]
        );
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_publish_replaces_wholesale() {
        let index = AssetIndex::new();
        index.publish(assets(&[("old.txt", AssetColor::Red)]));
        index.publish(assets(&[("new.txt", AssetColor::Green)]));

        assert_eq!(index.snapshot(), assets(&[("new.txt", AssetColor::Green)]));
        assert_eq!(index.generation(), 2);
    }

    #[test]
    fn test_publish_generation_rejects_stale() {
        let index = AssetIndex::new();

        assert!(index.publish_generation(
            5,
            Some(PathBuf::from("/art")),
            assets(&[("new.txt", AssetColor::Green)])
        ));
        assert!(!index.publish_generation(
            3,
            Some(PathBuf::from("/art")),
            assets(&[("stale.txt", AssetColor::Red)])
        ));
        assert!(!index.publish_generation(5, None, Vec::new()));

        let listing = index.listing();
        assert_eq!(listing.generation, 5);
        assert_eq!(listing.directory, Some(PathBuf::from("/art")));
        assert_eq!(listing.assets, assets(&[("new.txt", AssetColor::Green)]));
    }

    #[test]
    fn test_publish_shares_tokens_with_publish_generation() {
        let index = AssetIndex::new();

        let before = index.issue_generation();
        assert_eq!(index.publish(assets(&[("manual.txt", AssetColor::Red)])), 2);
        assert!(!index.publish_generation(before, None, Vec::new()));

        let after = index.issue_generation();
        assert!(index.publish_generation(
            after,
            None,
            assets(&[("fresh.txt", AssetColor::Green)])
        ));
        assert_eq!(index.generation(), 3);
        assert_eq!(index.latest_issued(), 3);
    }

    #[test]
    fn test_readers_never_observe_torn_listing() {
        let index = Arc::new(AssetIndex::new());
        let all_yellow: Vec<Asset> = (0..64)
            .map(|i| Asset::new(format!("file{i}"), AssetColor::Yellow))
            .collect();
        let all_green: Vec<Asset> = (0..64)
            .map(|i| Asset::new(format!("file{i}"), AssetColor::Green))
            .collect();
        index.publish(all_yellow.clone());

        let writer = {
            let index = Arc::clone(&index);
            thread::spawn(move || {
                for round in 0..200 {
                    if round % 2 == 0 {
                        index.publish(all_green.clone());
                    } else {
                        index.publish(all_yellow.clone());
                    }
                }
            })
        };

        for _ in 0..200 {
            let colors = index.colors();
            assert_eq!(colors.len(), 64);
            assert!(colors.iter().all(|c| *c == colors[0]));
        }

        writer.join().expect("writer thread panicked");
    }
}
