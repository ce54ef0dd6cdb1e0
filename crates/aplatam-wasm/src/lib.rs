//! aplatam-wasm — WebAssembly bindings for aplatam-core
//!
//! This crate runs the map view controller in the browser. It implements the
//! host capabilities with `web-sys` (location, window size, resize events,
//! navigation bar height) and hands every viewport change to a JavaScript
//! callback, which is expected to forward it to the map widget.
//!
//! What it provides
//! ----------------
//! - Automatic panic hook installation on module load
//! - `MapView`: mount/unmount the controller, feed map-widget changes back
//! - Catalog helpers: `get_city_count()`, `list_cities(lang)`,
//!   `resolve_city_id("?id=sp")`
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { MapView } from 'aplatam-wasm';
//!
//! async function main() {
//!   await init();
//!   const view = new MapView(viewport => map.setProps(viewport));
//!   view.start(); // bundled catalog; or view.start(citiesFromGraphQL)
//!   map.on('move', e => view.onViewportChange(e.viewState));
//!   window.addEventListener('pagehide', () => view.stop());
//! }
//! main();
//! ```
//!
//! Notes
//! -----
//! - The bundled catalog is the one shipped in `aplatam-core/data/cities.json`.
//! - Viewport objects have the shape `{latitude, longitude, zoom, width?, height?}`;
//!   `width`/`height` are absent until the first measurement.

mod host;

pub use crate::host::{JsSurface, NavbarHeight, WebHost};

use aplatam_core::prelude::*;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Initializing aplatam map module...".into());
}

/* --------------------------------------------------------------------------
   Map view
-------------------------------------------------------------------------- */

/// Browser settings: defaults, with the navigation bar class overridden by
/// the page when it passes one.
pub fn map_config(navbar_class: Option<String>) -> MapConfig {
    match navbar_class.filter(|c| !c.trim().is_empty()) {
        Some(class) => MapConfig::default().with_navbar_class(class),
        None => MapConfig::default(),
    }
}

/// One mounted map. Drop or `stop()` it when the page goes away.
#[wasm_bindgen]
pub struct MapView {
    controller: ViewportController<WebHost>,
}

#[wasm_bindgen]
impl MapView {
    /// `on_change` receives every viewport; `navbar_class` defaults to `navbar`.
    #[wasm_bindgen(constructor)]
    pub fn new(on_change: js_sys::Function, navbar_class: Option<String>) -> MapView {
        let config = map_config(navbar_class);
        let controller = ViewportController::new(WebHost, NavbarHeight::from_config(&config))
            .with_config(&config);
        controller.add_sink(JsSurface::new(on_change));
        MapView { controller }
    }

    /// Mount the map from `cities` (an array of city records), or from the
    /// bundled catalog when `cities` is `undefined`/`null`.
    ///
    /// Returns the city the map was centered on.
    pub fn start(&mut self, cities: JsValue) -> Result<JsValue, JsError> {
        let catalog = if cities.is_undefined() || cities.is_null() {
            CityCatalog::bundled()?
        } else {
            CityCatalog::from_records(from_value(cities)?)?
        };

        let city = self.controller.start(catalog.records())?;
        web_sys::console::log_1(&format!("Map centered on {}", city.display_name()).into());
        Ok(to_value(city)?)
    }

    /// Feed a change reported by the map widget. Returns `false` when the
    /// view is not running and the change was dropped; a change held until
    /// the first measurement counts as accepted.
    #[wasm_bindgen(js_name = onViewportChange)]
    pub fn on_viewport_change(&self, partial: JsValue) -> Result<bool, JsError> {
        let partial: PartialViewport = from_value(partial)?;
        Ok(self.controller.on_viewport_change(&partial) != MergeOutcome::Ignored)
    }

    pub fn stop(&mut self) {
        self.controller.stop();
    }

    pub fn viewport(&self) -> Result<JsValue, JsError> {
        Ok(to_value(&self.controller.viewport())?)
    }

    pub fn state(&self) -> String {
        format!("{:?}", self.controller.state())
    }
}

/* --------------------------------------------------------------------------
   Catalog helpers
-------------------------------------------------------------------------- */

#[derive(Serialize)]
struct CityListItem<'a> {
    id: &'a str,
    label: String,
    link: String,
}

#[wasm_bindgen]
pub fn get_city_count() -> usize {
    CityCatalog::bundled().map(|c| c.len()).unwrap_or(0)
}

/// City list entries for the bundled catalog: `{id, label, link}` where
/// `link` points at the map page under `lang`.
#[wasm_bindgen]
pub fn list_cities(lang: &str) -> Result<JsValue, JsError> {
    let catalog = CityCatalog::bundled()?;
    let items: Vec<_> = catalog
        .iter()
        .map(|city| CityListItem {
            id: &city.id,
            label: city.display_name(),
            link: city.map_link(lang),
        })
        .collect();
    Ok(to_value(&items)?)
}

/// Id of the city a map page with this query string would show.
#[wasm_bindgen]
pub fn resolve_city_id(query: &str) -> Option<String> {
    let catalog = CityCatalog::bundled().ok()?;
    let selection = resolve(query);
    catalog
        .find_by_id(selection.as_deref())
        .ok()
        .map(|city| city.id.clone())
}
