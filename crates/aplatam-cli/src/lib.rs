//! aplatam-cli
//! ===========
//!
//! Command-line interface for the `aplatam-core` map view controller.
//!
//! This crate primarily provides a binary (`aplatam`). The small library
//! target holds the replay event format so it can be documented and tested
//! outside the binary.
//!
//! Quick start
//! -----------
//!
//! ```text
//! aplatam --help
//! aplatam cities --lang en
//! aplatam resolve "/es/map?id=sp" --width 1280 --height 800 --navbar 52
//! aplatam replay "?id=ba" --events session.json
//! ```
//!
//! For programmatic access use the [`aplatam-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

use aplatam_core::{MemoryHost, MergeOutcome, PartialViewport, ViewportController, WindowSize};
use serde::Deserialize;

/// One step of a recorded map session.
///
/// ```rust
/// use aplatam_cli::ReplayEvent;
///
/// let events: Vec<ReplayEvent> = serde_json::from_str(
///     r#"[{"resize":{"width":800,"height":600}}, {"change":{"zoom":12}}, {"navbar":null}, "stop"]"#,
/// ).unwrap();
/// assert_eq!(events.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayEvent {
    /// The window was resized.
    Resize(WindowSize),
    /// The map surface reported a change.
    Change(PartialViewport),
    /// The navigation bar changed height (`null` removes it).
    Navbar(Option<u32>),
    /// The page unmounted the map.
    Stop,
}

/// Apply `event` the way the browser would deliver it: resizes go through the
/// host's listener, surface changes straight to the controller. A resize
/// reports `Applied` only when the controller actually merged it. Navbar and
/// stop events never merge anything and report [`MergeOutcome::Ignored`].
pub fn apply_event(
    controller: &mut ViewportController<MemoryHost>,
    event: &ReplayEvent,
) -> MergeOutcome {
    match event {
        ReplayEvent::Resize(size) => {
            // The listener swallows the outcome; a merge always bumps the revision.
            let before = controller.revision();
            controller.host().emit_resize(*size);
            if controller.revision() > before {
                MergeOutcome::Applied
            } else {
                MergeOutcome::Ignored
            }
        }
        ReplayEvent::Change(partial) => controller.on_viewport_change(partial),
        ReplayEvent::Navbar(height) => {
            controller.host().set_navbar(*height);
            MergeOutcome::Ignored
        }
        ReplayEvent::Stop => {
            controller.stop();
            MergeOutcome::Ignored
        }
    }
}

/// Build a host for `url` with an optional window size.
pub fn host_for(url: &str, size: Option<WindowSize>, navbar: Option<u32>) -> MemoryHost {
    let host = MemoryHost::new().with_search(url);
    host.set_navbar(navbar);
    match size {
        Some(size) => host.with_size(size),
        None => host,
    }
}
