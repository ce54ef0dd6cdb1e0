// crates/aplatam-core/src/viewport.rs
use crate::model::Coordinates;
use serde::{Deserialize, Serialize};

/// The map's visual window: geographic center, zoom level and pixel size.
///
/// `width`/`height` stay `None` until the host reports a measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl Viewport {
    pub fn center(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// An update naming only the fields it changes.
///
/// Map surfaces report changes as JSON objects such as `{"zoom": 5}`; unknown
/// fields (bearing, pitch, ...) are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialViewport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl PartialViewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_center(mut self, center: Coordinates) -> Self {
        self.latitude = Some(center.lat);
        self.longitude = Some(center.lon);
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_size(self, width: u32, height: u32) -> Self {
        self.with_width(width).with_height(height)
    }

    /// `true` when no field is set; merging it changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Sole owner of the current [`Viewport`].
///
/// The viewport is never replaced wholesale, only merged, so an in-progress
/// drag or zoom isn't clobbered by a resize and vice versa. Every mutation
/// takes `&mut self`; a reader can never observe a half-applied merge.
#[derive(Debug, Clone, Default)]
pub struct ViewportStore {
    viewport: Viewport,
    revision: u64,
}

impl ViewportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed center and zoom from a city. Width and height are left alone.
    pub fn initialize(&mut self, center: Coordinates, zoom: f64) -> &Viewport {
        self.merge(&PartialViewport::new().with_center(center).with_zoom(zoom))
    }

    /// Replace exactly the fields present in `partial`.
    pub fn merge(&mut self, partial: &PartialViewport) -> &Viewport {
        let vp = &mut self.viewport;
        if let Some(latitude) = partial.latitude {
            vp.latitude = latitude;
        }
        if let Some(longitude) = partial.longitude {
            vp.longitude = longitude;
        }
        if let Some(zoom) = partial.zoom {
            vp.zoom = zoom;
        }
        if partial.width.is_some() {
            vp.width = partial.width;
        }
        if partial.height.is_some() {
            vp.height = partial.height;
        }
        if !partial.is_empty() {
            self.revision += 1;
        }
        &self.viewport
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Number of non-empty merges applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Both dimensions have been measured.
    pub fn is_sized(&self) -> bool {
        self.viewport.width.is_some() && self.viewport.height.is_some()
    }
}
