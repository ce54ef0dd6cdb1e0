// crates/aplatam-core/src/host.rs

//! Capabilities the controller needs from its host.
//!
//! The controller never touches browser globals. Whatever embeds it (a web
//! page, the CLI, a test) supplies the current location, window size, resize
//! events and navigation-bar height through these traits.

use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// A window measurement in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Callback invoked for every resize event.
pub type ResizeHandler = Box<dyn FnMut(WindowSize)>;

/// Handle to a registered resize listener.
///
/// Deregistration runs exactly once: on [`ResizeSubscription::unsubscribe`]
/// or when the handle is dropped, whichever comes first.
#[must_use = "dropping the subscription deregisters the listener"]
pub struct ResizeSubscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl ResizeSubscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release, for hosts that never resize.
    pub fn noop() -> Self {
        Self { release: None }
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for ResizeSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeSubscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Location and window access.
pub trait HostEnvironment {
    /// The current query string (e.g. `?id=ba`), or `None` without a
    /// browsing context.
    fn location_search(&self) -> Option<String>;

    /// The current window size, if it can be measured.
    fn window_size(&self) -> Option<WindowSize>;

    /// Register `handler` for resize events until the returned handle is
    /// released.
    fn subscribe_resize(&self, handler: ResizeHandler) -> ResizeSubscription;
}

/// Rendered height of page chrome (the navigation bar) above the map.
pub trait ChromeHeightProvider {
    /// `None` when no navigation bar is present.
    fn chrome_height(&self) -> Option<u32>;
}

/// No chrome at all: the map gets the full window height.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoChrome;

impl ChromeHeightProvider for NoChrome {
    fn chrome_height(&self) -> Option<u32> {
        None
    }
}

/// The map-rendering surface: receives every viewport change.
pub trait ViewportSink {
    fn render(&self, viewport: &Viewport);
}

impl<F: Fn(&Viewport)> ViewportSink for F {
    fn render(&self, viewport: &Viewport) {
        self(viewport)
    }
}

/// An in-memory host.
///
/// Cloning shares state, so a test can keep one handle to drive events while
/// the controller owns another.
#[derive(Clone, Default)]
pub struct MemoryHost {
    inner: Rc<MemoryHostInner>,
}

#[derive(Default)]
struct MemoryHostInner {
    search: RefCell<Option<String>>,
    size: Cell<Option<WindowSize>>,
    navbar: Cell<Option<u32>>,
    next_id: Cell<u64>,
    listeners: RefCell<BTreeMap<u64, Rc<RefCell<ResizeHandler>>>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(self, search: impl Into<String>) -> Self {
        self.set_search(Some(search.into()));
        self
    }

    pub fn with_size(self, size: WindowSize) -> Self {
        self.inner.size.set(Some(size));
        self
    }

    pub fn with_navbar(self, height: u32) -> Self {
        self.set_navbar(Some(height));
        self
    }

    pub fn set_search(&self, search: Option<String>) {
        *self.inner.search.borrow_mut() = search;
    }

    pub fn set_navbar(&self, height: Option<u32>) {
        self.inner.navbar.set(height);
    }

    /// Update the window size and deliver it to every live listener in
    /// registration order.
    pub fn emit_resize(&self, size: WindowSize) {
        self.inner.size.set(Some(size));
        // Snapshot so a handler may (un)subscribe while we iterate.
        let handlers: Vec<_> = self.inner.listeners.borrow().values().cloned().collect();
        for handler in handlers {
            (&mut *handler.borrow_mut())(size);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

impl HostEnvironment for MemoryHost {
    fn location_search(&self) -> Option<String> {
        self.inner.search.borrow().clone()
    }

    fn window_size(&self) -> Option<WindowSize> {
        self.inner.size.get()
    }

    fn subscribe_resize(&self, handler: ResizeHandler) -> ResizeSubscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .insert(id, Rc::new(RefCell::new(handler)));

        let weak = Rc::downgrade(&self.inner);
        ResizeSubscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.borrow_mut().remove(&id);
            }
        })
    }
}

impl ChromeHeightProvider for MemoryHost {
    fn chrome_height(&self) -> Option<u32> {
        self.inner.navbar.get()
    }
}

impl fmt::Debug for MemoryHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryHost")
            .field("search", &self.inner.search.borrow())
            .field("size", &self.inner.size.get())
            .field("navbar", &self.inner.navbar.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
