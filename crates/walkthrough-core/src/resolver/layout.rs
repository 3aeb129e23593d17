//! Host layout abstraction.

use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WalkthroughError};

/// Axis-aligned bounding rectangle in viewport pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Read access to the host page's current layout.
///
/// Implementations report post-layout, post-scroll geometry.
pub trait Layout {
    /// Bounding rectangle of the element matching `selector`, if present.
    fn anchor_rect(&self, selector: &str) -> Option<Rect>;

    fn viewport_width(&self) -> f64;
}

/// Fixed selector-to-rectangle map.
///
/// Loadable from JSON:
///
/// ```json
/// { "viewport_width": 1280, "anchors": { "#chart": { "left": 40, "top": 300, "width": 600, "height": 240 } } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StaticLayout {
    pub viewport_width: f64,
    #[serde(default)]
    pub anchors: HashMap<String, Rect>,
}

impl StaticLayout {
    pub fn new(viewport_width: f64) -> Self {
        Self {
            viewport_width,
            anchors: HashMap::new(),
        }
    }

    /// Adds or moves an anchor.
    pub fn with_anchor(mut self, selector: impl Into<String>, rect: Rect) -> Self {
        self.insert(selector, rect);
        self
    }

    pub fn insert(&mut self, selector: impl Into<String>, rect: Rect) {
        self.anchors.insert(selector.into(), rect);
    }

    /// Changes the viewport width, rejecting anything but a positive,
    /// finite pixel count.
    pub fn set_viewport_width(&mut self, width: f64) -> Result<()> {
        self.viewport_width = validate_width(width)?;
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let layout: Self = serde_json::from_str(json)?;
        validate_width(layout.viewport_width)?;
        Ok(layout)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| WalkthroughError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&json)
    }
}

fn validate_width(width: f64) -> Result<f64> {
    if !width.is_finite() || width <= 0.0 {
        return Err(WalkthroughError::invalid_input("viewport_width")
            .with_reason("must be a positive number of pixels"));
    }
    Ok(width)
}

impl Layout for StaticLayout {
    fn anchor_rect(&self, selector: &str) -> Option<Rect> {
        self.anchors.get(selector).copied()
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }
}
