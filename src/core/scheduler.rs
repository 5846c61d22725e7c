//! Scan, fetch, merge and publish as one unit of work.
//!
//! [`RecomputeScheduler`] runs a recompute cycle either on the caller's thread
//! ([`RecomputeScheduler::recompute`]) or on a dedicated worker thread
//! ([`RecomputeScheduler::spawn`]). Every call takes a generation token from
//! the [`AssetIndex`] it publishes to, the same counter direct publishes use.
//!
//! # Coalescing
//! With coalescing enabled a cycle whose token is no longer the latest stops
//! early (before the status fetch and again before publishing) and the index
//! refuses listings older than the one it holds. With coalescing disabled every
//! cycle publishes and the last one to take the write lock wins.
//!
//! # Failure handling
//! - Scan failure (`NotADirectory`, `Io`): the cycle aborts, the published
//!   listing is left untouched, the error is returned and logged as a warning
//! - Status failure: logged as a warning, every asset gets the default color

use crate::core::{
    classifier::classify,
    error::{ArtchiveError, Result},
    events::{ChangeEvent, Observers},
    index::AssetIndex,
    scanner,
    state::{Asset, AssetColor, StatusEntry},
    status_source::StatusSource,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomputeOutcome {
    Published {
        generation: u64,
        assets: usize,
        /// False when the status source failed and default colors were used
        status_available: bool,
    },
    /// A newer cycle was requested before this one could publish
    Superseded { generation: u64 },
}

impl RecomputeOutcome {
    pub fn generation(&self) -> u64 {
        match self {
            RecomputeOutcome::Published { generation, .. } => *generation,
            RecomputeOutcome::Superseded { generation } => *generation,
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, RecomputeOutcome::Published { .. })
    }
}

/// Color each scanned name with the first status entry of the same name.
///
/// Output order and length follow `names`; unmatched names are black.
pub fn merge(names: &[String], statuses: &[StatusEntry]) -> Vec<Asset> {
    let mut codes: HashMap<&str, &str> = HashMap::with_capacity(statuses.len());
    for status in statuses {
        codes
            .entry(status.name.as_str())
            .or_insert(status.code.as_str());
    }

    names
        .iter()
        .map(|name| {
            let color = codes
                .get(name.as_str())
                .map(|code| classify(code))
                .unwrap_or(AssetColor::Black);
            Asset::new(name.clone(), color)
        })
        .collect()
}

#[derive(Clone)]
pub struct RecomputeScheduler {
    index: Arc<AssetIndex>,
    source: Arc<dyn StatusSource>,
    observers: Arc<Observers>,
    coalesce: bool,
}

impl std::fmt::Debug for RecomputeScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecomputeScheduler")
            .field("latest", &self.latest_generation())
            .field("coalesce", &self.coalesce)
            .finish()
    }
}

impl RecomputeScheduler {
    pub fn new(
        index: Arc<AssetIndex>,
        source: Arc<dyn StatusSource>,
        observers: Arc<Observers>,
    ) -> Self {
        Self {
            index,
            source,
            observers,
            coalesce: true,
        }
    }

    pub fn with_coalescing(mut self, coalesce: bool) -> Self {
        self.coalesce = coalesce;
        self
    }

    pub fn index(&self) -> &Arc<AssetIndex> {
        &self.index
    }

    pub fn observers(&self) -> &Arc<Observers> {
        &self.observers
    }

    /// Most recently issued generation token
    pub fn latest_generation(&self) -> u64 {
        self.index.latest_issued()
    }

    fn next_generation(&self) -> u64 {
        self.index.issue_generation()
    }

    fn is_superseded(&self, generation: u64) -> bool {
        self.coalesce && generation < self.index.latest_issued()
    }

    /// Run one cycle on the calling thread.
    pub fn recompute(&self, directory: &Path) -> Result<RecomputeOutcome> {
        let generation = self.next_generation();
        self.run(generation, directory)
    }

    /// Run one cycle on a new worker thread.
    pub fn spawn(&self, directory: impl Into<PathBuf>) -> Result<RecomputeHandle> {
        let directory = directory.into();
        let generation = self.next_generation();
        let (sender, receiver) = mpsc::channel();
        let scheduler = self.clone();

        let thread = thread::Builder::new()
            .name(format!("artchive-recompute-{generation}"))
            .spawn(move || {
                let outcome = scheduler.run(generation, &directory);
                // The handle may have been dropped; nobody is waiting then
                let _ = sender.send(outcome);
            })?;

        Ok(RecomputeHandle {
            generation,
            receiver,
            thread: Some(thread),
        })
    }

    fn run(&self, generation: u64, directory: &Path) -> Result<RecomputeOutcome> {
        log::debug!(
            "Recompute generation {generation} for {}",
            directory.display()
        );

        let names = scanner::scan(directory).map_err(|e| {
            log::warn!("Recompute generation {generation} aborted, keeping previous listing: {e}");
            e
        })?;

        if self.is_superseded(generation) {
            log::debug!("Generation {generation} superseded before status fetch");
            return Ok(RecomputeOutcome::Superseded { generation });
        }

        let (statuses, status_available) = match self.source.fetch(directory) {
            Ok(statuses) => (statuses, true),
            Err(e) => {
                log::warn!("No status information for {}: {e}", directory.display());
                (Vec::new(), false)
            }
        };

        let assets = merge(&names, &statuses);
        let count = assets.len();

        if self.is_superseded(generation) {
            log::debug!("Generation {generation} superseded before publish");
            return Ok(RecomputeOutcome::Superseded { generation });
        }

        let directory = Some(directory.to_path_buf());
        if self.coalesce {
            if !self.index.publish_generation(generation, directory, assets) {
                return Ok(RecomputeOutcome::Superseded { generation });
            }
        } else {
            self.index.replace(generation, directory, assets);
        }

        log::debug!("Published generation {generation} with {count} assets");
        self.observers
            .emit(ChangeEvent::ListingChanged { generation });

        Ok(RecomputeOutcome::Published {
            generation,
            assets: count,
            status_available,
        })
    }
}

/// Result slot of a cycle running on a worker thread.
///
/// Dropping the handle detaches the worker; it still finishes and publishes.
#[derive(Debug)]
pub struct RecomputeHandle {
    generation: u64,
    receiver: Receiver<Result<RecomputeOutcome>>,
    thread: Option<JoinHandle<()>>,
}

impl RecomputeHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Block until the worker reports.
    pub fn wait(mut self) -> Result<RecomputeOutcome> {
        let outcome = self
            .receiver
            .recv()
            .map_err(|_| ArtchiveError::RecomputeWorkerFailed)?;
        self.join();
        outcome
    }

    /// Block until the worker reports or `timeout` elapses.
    pub fn wait_timeout(mut self, timeout: Duration) -> Result<RecomputeOutcome> {
        match self.receiver.recv_timeout(timeout) {
            Ok(outcome) => {
                self.join();
                outcome
            }
            Err(RecvTimeoutError::Timeout) => Err(ArtchiveError::RecomputeTimedOut { timeout }),
            Err(RecvTimeoutError::Disconnected) => Err(ArtchiveError::RecomputeWorkerFailed),
        }
    }

    fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
