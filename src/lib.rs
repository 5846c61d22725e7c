//! Artchive - directory asset listings colored by git working-tree status.
//!
//! Given a directory, the engine lists its immediate entries, asks git for the
//! working-tree status of that directory, and publishes an ordered listing in
//! which every entry carries a symbolic color. Recomputation runs off the
//! caller's thread; readers always see a complete listing.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module:
//! - [`AssetBrowser`]: façade holding the selected directory and the listing
//! - [`RecomputeScheduler`], [`AssetIndex`]: the concurrent engine underneath
//! - [`StatusSource`], [`GitStatusSource`]: status input
//! - [`classify`], [`scan`], [`merge`]: the pure building blocks
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    // Engine building blocks
    classify,
    merge,
    parse_porcelain,
    scan,
    // Error handling
    ArtchiveError,
    // Data model
    Asset,
    AssetBrowser,
    AssetColor,
    AssetIndex,
    ChangeEvent,
    GitStatusSource,
    Listing,
    Observers,
    PathStore,
    RecomputeHandle,
    RecomputeOutcome,
    RecomputeScheduler,
    Result,
    Settings,
    StaticStatusSource,
    StatusCode,
    StatusEntry,
    StatusSource,
};
