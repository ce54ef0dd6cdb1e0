// crates/aplatam-core/src/controller.rs

//! # Viewport Controller
//!
//! Picks the initial city from the page URL, seeds the [`ViewportStore`],
//! listens for resizes and funnels map-surface changes through the same
//! merge path.
//!
//! ```text
//! Uninitialized --start()--> Seeded --first resize--> Live --stop()--> TornDown
//! ```
//!
//! Inputs are applied in arrival order, last write wins per field. Nothing is
//! applied before `start()` or after `stop()`. Map-surface changes that arrive
//! while `Seeded` are held and applied right after the first measurement, so
//! no interaction is acted upon at an unmeasured size.

use crate::catalog::find_by_id;
use crate::config::MapConfig;
use crate::error::{MapError, Result};
use crate::host::{ChromeHeightProvider, HostEnvironment, ResizeSubscription, ViewportSink, WindowSize};
use crate::location::{resolve_key, SELECTION_KEY};
use crate::model::CityRecord;
use crate::viewport::{PartialViewport, Viewport, ViewportStore};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Uninitialized,
    /// Center and zoom are known; size is not measured yet.
    Seeded,
    Live,
    TornDown,
}

impl ControllerState {
    fn accepts_input(self) -> bool {
        matches!(self, Self::Seeded | Self::Live)
    }
}

/// What happened to an input handed to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum MergeOutcome {
    Applied,
    /// Held until the first measurement, then applied in arrival order.
    Deferred,
    /// Dropped because the controller is not started or already torn down.
    Ignored,
}

/// Map height once the navigation bar is taken off the window height.
pub fn effective_height(total: u32, chrome: Option<u32>) -> u32 {
    match chrome {
        Some(chrome) => total.saturating_sub(chrome),
        None => total,
    }
}

// State reachable from the resize listener. The listener only holds a `Weak`
// to it, so it can't outlive the controller.
struct Shared {
    state: Cell<ControllerState>,
    store: RefCell<ViewportStore>,
    sinks: RefCell<Vec<Box<dyn ViewportSink>>>,
    chrome: Box<dyn ChromeHeightProvider>,
    // Surface changes received while `Seeded`.
    held: RefCell<Vec<PartialViewport>>,
    // Viewports waiting to reach the sinks, oldest first.
    outbox: RefCell<VecDeque<Viewport>>,
    publishing: Cell<bool>,
}

impl Shared {
    fn apply(&self, partial: &PartialViewport) -> MergeOutcome {
        if !self.state.get().accepts_input() {
            tracing::debug!(state = ?self.state.get(), "viewport input ignored");
            return MergeOutcome::Ignored;
        }
        // Release the store before publishing so a sink may feed back in.
        let snapshot = *self.store.borrow_mut().merge(partial);
        tracing::debug!(?partial, "viewport merged");
        self.publish(snapshot);
        MergeOutcome::Applied
    }

    fn surface_change(&self, partial: &PartialViewport) -> MergeOutcome {
        if self.state.get() == ControllerState::Seeded {
            tracing::debug!(?partial, "surface change held until first measurement");
            self.held.borrow_mut().push(*partial);
            return MergeOutcome::Deferred;
        }
        self.apply(partial)
    }

    fn resize(&self, size: WindowSize) -> MergeOutcome {
        let first = match self.state.get() {
            ControllerState::Seeded => true,
            ControllerState::Live => false,
            state => {
                tracing::debug!(?state, "resize ignored");
                return MergeOutcome::Ignored;
            }
        };
        if first {
            self.state.set(ControllerState::Live);
        }

        let height = effective_height(size.height, self.chrome.chrome_height());
        let outcome = self.apply(&PartialViewport::new().with_size(size.width, height));

        if first {
            let held = std::mem::take(&mut *self.held.borrow_mut());
            for partial in &held {
                let _ = self.apply(partial);
            }
        }
        outcome
    }

    // A sink that feeds a change back re-enters here; the nested call only
    // queues, and the outermost call delivers every viewport in merge order.
    fn publish(&self, viewport: Viewport) {
        self.outbox.borrow_mut().push_back(viewport);
        if self.publishing.replace(true) {
            return;
        }
        loop {
            let next = self.outbox.borrow_mut().pop_front();
            let Some(viewport) = next else { break };
            for sink in self.sinks.borrow().iter() {
                sink.render(&viewport);
            }
        }
        self.publishing.set(false);
    }
}

/// Owns the map viewport for one mounted map.
pub struct ViewportController<H: HostEnvironment> {
    host: H,
    shared: Rc<Shared>,
    subscription: Option<ResizeSubscription>,
    selection_key: String,
}

impl<H: HostEnvironment> ViewportController<H> {
    pub fn new(host: H, chrome: impl ChromeHeightProvider + 'static) -> Self {
        Self {
            host,
            shared: Rc::new(Shared {
                state: Cell::new(ControllerState::Uninitialized),
                store: RefCell::new(ViewportStore::new()),
                sinks: RefCell::new(Vec::new()),
                chrome: Box::new(chrome),
                held: RefCell::new(Vec::new()),
                outbox: RefCell::new(VecDeque::new()),
                publishing: Cell::new(false),
            }),
            subscription: None,
            selection_key: SELECTION_KEY.to_string(),
        }
    }

    pub fn with_config(mut self, config: &MapConfig) -> Self {
        self.selection_key = config.selection_key.clone();
        self
    }

    /// Register a surface that receives every published viewport.
    ///
    /// Must not be called from inside a sink's `render`.
    pub fn add_sink(&self, sink: impl ViewportSink + 'static) {
        self.shared.sinks.borrow_mut().push(Box::new(sink));
    }

    /// Mount: resolve the selection, seed the viewport, start listening for
    /// resizes, and take a first measurement if the host has one.
    ///
    /// Returns the city the map was seeded from. Fails with
    /// [`MapError::EmptyCatalog`] (nothing registered, state unchanged) or
    /// [`MapError::InvalidState`] when called twice.
    pub fn start<'a>(&mut self, records: &'a [CityRecord]) -> Result<&'a CityRecord> {
        if self.shared.state.get() != ControllerState::Uninitialized {
            return Err(MapError::InvalidState("controller can only be started once"));
        }

        let selection = self
            .host
            .location_search()
            .and_then(|search| resolve_key(&search, &self.selection_key));
        let city = find_by_id(records, selection.as_deref())?;

        let seeded = *self
            .shared
            .store
            .borrow_mut()
            .initialize(city.center, city.zoom);
        self.shared.state.set(ControllerState::Seeded);
        tracing::info!(
            city = %city.id,
            requested = ?selection,
            lat = city.center.lat,
            lon = city.center.lon,
            zoom = city.zoom,
            "map seeded"
        );
        self.shared.publish(seeded);

        let weak = Rc::downgrade(&self.shared);
        self.subscription = Some(self.host.subscribe_resize(Box::new(move |size| {
            if let Some(shared) = weak.upgrade() {
                let _ = shared.resize(size);
            }
        })));

        if let Some(size) = self.host.window_size() {
            let _ = self.shared.resize(size);
        }

        Ok(city)
    }

    /// A resize measurement from the host.
    pub fn on_resize(&self, size: WindowSize) -> MergeOutcome {
        self.shared.resize(size)
    }

    /// A change reported by the map surface (pan, zoom, ...).
    ///
    /// Before the first measurement the change is held and reported as
    /// [`MergeOutcome::Deferred`].
    pub fn on_viewport_change(&self, partial: &PartialViewport) -> MergeOutcome {
        self.shared.surface_change(partial)
    }

    /// Unmount: deregister the resize listener and reject further input.
    /// Safe to call more than once.
    pub fn stop(&mut self) {
        if self.shared.state.get() == ControllerState::TornDown {
            return;
        }
        self.shared.state.set(ControllerState::TornDown);
        self.shared.held.borrow_mut().clear();
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        tracing::info!("map controller torn down");
    }

    pub fn state(&self) -> ControllerState {
        self.shared.state.get()
    }

    pub fn viewport(&self) -> Viewport {
        *self.shared.store.borrow().viewport()
    }

    /// Count of applied merges, including the seed.
    pub fn revision(&self) -> u64 {
        self.shared.store.borrow().revision()
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: HostEnvironment> Drop for ViewportController<H> {
    fn drop(&mut self) {
        self.stop();
    }
}
