//! Viewport transform: pan offset and zoom scale for one canvas.
//!
//! Screen and canvas space are related by `screen = canvas * scale + translate`.
//! `translate_x` / `translate_y` are in CSS pixels, `scale` is always kept
//! inside [`MIN_SCALE`, `MAX_SCALE`].

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::consts::{MAX_SCALE, MIN_SCALE, PINCH_SMOOTHING, WHEEL_ZOOM_STEP};

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// How a zoom request changes the scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomDelta {
    /// Add a signed amount (buttons, wheel).
    Step(f64),
    /// Multiply by the ratio of successive pinch distances.
    Pinch(f64),
}

/// Pan/zoom state persisted alongside each canvas.
///
/// Reading is lenient field by field: a missing, `null`, or non-numeric
/// value takes its default, and a `null` or non-object transform is the
/// default transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self { translate_x: 0.0, translate_y: 0.0, scale: 1.0 }
    }
}

impl<'de> Deserialize<'de> for Transform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fallback = Self::default();
        let fields = match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Object(fields)) => fields,
            None | Some(Value::Null) => return Ok(fallback),
            Some(other) => {
                warn!(transform = %other, "stored transform is not an object; using default");
                return Ok(fallback);
            }
        };
        let field = |name: &str, default: f64| match fields.get(name) {
            Some(value) => value.as_f64().unwrap_or_else(|| {
                if !value.is_null() {
                    warn!(field = name, %value, "stored transform field is not a number; using default");
                }
                default
            }),
            None => default,
        };
        Ok(Self {
            translate_x: field("translateX", fallback.translate_x),
            translate_y: field("translateY", fallback.translate_y),
            scale: field("scale", fallback.scale),
        })
    }
}

impl Transform {
    /// Shift the view by a screen-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if dx.is_finite() && dy.is_finite() {
            self.translate_x += dx;
            self.translate_y += dy;
        }
    }

    /// Apply a zoom request. With an `anchor` (screen space) the canvas point
    /// under the anchor stays put; without one only the scale changes.
    ///
    /// Non-finite steps and non-positive or non-finite pinch ratios are ignored.
    pub fn zoom(&mut self, delta: ZoomDelta, anchor: Option<Point>) {
        let next = match delta {
            ZoomDelta::Step(step) if step.is_finite() => self.scale + step,
            ZoomDelta::Pinch(ratio) if ratio.is_finite() && ratio > 0.0 => {
                self.scale * ratio * (1.0 + PINCH_SMOOTHING)
            }
            _ => return,
        };
        let next = clamp_scale(next);

        if let Some(anchor) = anchor {
            let pinned = self.screen_to_canvas(anchor);
            self.translate_x = anchor.x - pinned.x * next;
            self.translate_y = anchor.y - pinned.y * next;
        }
        self.scale = next;
    }

    /// Zoom for one wheel tick: scrolling down zooms out, anything else zooms in.
    pub fn wheel(&mut self, delta_y: f64) {
        let step = if delta_y > 0.0 { -WHEEL_ZOOM_STEP } else { WHEEL_ZOOM_STEP };
        self.zoom(ZoomDelta::Step(step), None);
    }

    /// Convert a screen-space point (CSS pixels) to canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.translate_x) / self.scale,
            y: (screen.y - self.translate_y) / self.scale,
        }
    }

    /// Convert a canvas-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.scale + self.translate_x,
            y: canvas.y * self.scale + self.translate_y,
        }
    }

    /// Canvas-space point at the visual center of a viewport of the given size.
    ///
    /// New notes are placed here so they appear in the middle of the screen
    /// whatever the current pan and zoom.
    #[must_use]
    pub fn viewport_center(&self, viewport_width: f64, viewport_height: f64) -> Point {
        self.screen_to_canvas(Point::new(viewport_width / 2.0, viewport_height / 2.0))
    }

    /// Convert a screen-space distance to canvas-space distance.
    #[must_use]
    pub fn screen_dist_to_canvas(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Copy with the scale forced back into range, used on load.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let finite = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        Self {
            translate_x: finite(self.translate_x, 0.0),
            translate_y: finite(self.translate_y, 0.0),
            scale: clamp_scale(finite(self.scale, 1.0)),
        }
    }

    /// CSS `transform` value for the note container.
    #[must_use]
    pub fn css(&self) -> String {
        format!(
            "translate(calc(-50% + {}px), calc(-50% + {}px)) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

fn clamp_scale(scale: f64) -> f64 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}
