// crates/aplatam-wasm/src/host.rs

//! Browser implementations of the controller's host capabilities.

use aplatam_core::{
    ChromeHeightProvider, HostEnvironment, MapConfig, ResizeHandler, ResizeSubscription,
    Viewport, ViewportSink, WindowSize,
};
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// `window.location`, `window.innerWidth/innerHeight` and `resize` events.
///
/// Every accessor degrades to `None` without a browsing context.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebHost;

fn measure(window: &web_sys::Window) -> Option<WindowSize> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(WindowSize::new(width.max(0.0) as u32, height.max(0.0) as u32))
}

impl HostEnvironment for WebHost {
    fn location_search(&self) -> Option<String> {
        web_sys::window()?.location().search().ok()
    }

    fn window_size(&self) -> Option<WindowSize> {
        measure(&web_sys::window()?)
    }

    fn subscribe_resize(&self, mut handler: ResizeHandler) -> ResizeSubscription {
        let Some(window) = web_sys::window() else {
            return ResizeSubscription::noop();
        };

        let measured = window.clone();
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |_e: web_sys::Event| {
            if let Some(size) = measure(&measured) {
                handler(size);
            }
        });

        if window
            .add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
            .is_err()
        {
            web_sys::console::warn_1(&"aplatam: could not register resize listener".into());
            return ResizeSubscription::noop();
        }

        ResizeSubscription::new(move || {
            let _ = window
                .remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref());
            // The closure must stay alive until it is removed from the window.
            drop(callback);
        })
    }
}

/// Height of the first element carrying the navigation bar class.
#[derive(Debug, Clone)]
pub struct NavbarHeight {
    class_name: String,
}

impl NavbarHeight {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
        }
    }

    /// Measures the element named by [`MapConfig::navbar_class`].
    pub fn from_config(config: &MapConfig) -> Self {
        Self::new(config.navbar_class.as_str())
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }
}

impl ChromeHeightProvider for NavbarHeight {
    fn chrome_height(&self) -> Option<u32> {
        let document = web_sys::window()?.document()?;
        let navbar = document
            .get_elements_by_class_name(&self.class_name)
            .item(0)?;
        Some(navbar.client_height().max(0) as u32)
    }
}

/// Forwards every published viewport to a JavaScript callback, typically the
/// map widget's prop setter.
pub struct JsSurface {
    callback: js_sys::Function,
}

impl JsSurface {
    pub fn new(callback: js_sys::Function) -> Self {
        Self { callback }
    }
}

impl ViewportSink for JsSurface {
    fn render(&self, viewport: &Viewport) {
        let value = match to_value(viewport) {
            Ok(value) => value,
            Err(e) => {
                web_sys::console::error_1(&format!("aplatam: viewport not serializable: {e}").into());
                return;
            }
        };
        if let Err(e) = self.callback.call1(&JsValue::NULL, &value) {
            web_sys::console::error_2(&"aplatam: viewport callback failed".into(), &e);
        }
    }
}
