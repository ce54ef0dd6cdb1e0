// crates/aplatam-core/src/lib.rs

//! # aplatam-core
//!
//! The view controller behind the informal settlements map: it picks which
//! city to show from the page URL, owns the map viewport and keeps it in sync
//! with window resizes and map-surface interaction.
//!
//! ```rust
//! use aplatam_core::prelude::*;
//!
//! let catalog = CityCatalog::bundled()?;
//! let host = MemoryHost::new()
//!     .with_search("?id=sp")
//!     .with_size(WindowSize::new(1280, 800))
//!     .with_navbar(52);
//!
//! let mut controller = ViewportController::new(host.clone(), host.clone());
//! let city = controller.start(catalog.records())?;
//! assert_eq!(city.id, "sp");
//! assert_eq!(controller.viewport().height, Some(748));
//!
//! controller.stop();
//! # Ok::<(), aplatam_core::MapError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod loader;
pub mod location;
pub mod model;
pub mod text;
pub mod traits;
pub mod viewport;

// Re-exports
pub use crate::catalog::{find_by_id, CityCatalog};
pub use crate::config::MapConfig;
pub use crate::controller::{effective_height, ControllerState, MergeOutcome, ViewportController};
pub use crate::error::{MapError, Result};
pub use crate::host::{
    ChromeHeightProvider, HostEnvironment, MemoryHost, NoChrome, ResizeHandler,
    ResizeSubscription, ViewportSink, WindowSize,
};
pub use crate::location::resolve;
pub use crate::model::{CatalogStats, CityRecord, Coordinates};
pub use crate::viewport::{PartialViewport, Viewport, ViewportStore};

pub mod prelude {
    pub use crate::catalog::{find_by_id, CityCatalog};
    pub use crate::config::MapConfig;
    pub use crate::controller::{ControllerState, MergeOutcome, ViewportController};
    pub use crate::error::{MapError, Result};
    pub use crate::host::{
        ChromeHeightProvider, HostEnvironment, MemoryHost, NoChrome, ViewportSink, WindowSize,
    };
    pub use crate::location::resolve;
    pub use crate::model::{CityRecord, Coordinates};
    pub use crate::traits::{CityLookup, NameMatch};
    pub use crate::viewport::{PartialViewport, Viewport};
}
