// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Viewport and indicator state types.

use serde::{Deserialize, Serialize};

/// Geometry of the pan/zoom viewport, as reported by its owning widget.
///
/// The container is the fixed visible window; the canvas is the zoomed image
/// placed inside (and usually overflowing) it. The widget owns this state;
/// PanSync only reads it and may request a clamped new vertical offset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportState {
    /// Visible container size, in pixels.
    pub container_width: f64,
    pub container_height: f64,
    /// Canvas placement relative to the container origin. A negative
    /// `canvas_top` means the canvas is panned up past the container top.
    pub canvas_left: f64,
    pub canvas_top: f64,
    /// Canvas size at the current zoom scale.
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Zoom scale applied to the source image (canvas size = source size x zoom).
    pub zoom: f64,
}

impl ViewportState {
    /// Whether the state is usable: positive, finite dimensions and zoom.
    pub fn is_valid(&self) -> bool {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        positive(self.container_width)
            && positive(self.container_height)
            && positive(self.canvas_width)
            && positive(self.canvas_height)
            && positive(self.zoom)
            && self.canvas_top.is_finite()
            && self.canvas_left.is_finite()
    }

    /// Legal vertical offset range `(min_top, max_top)` for the canvas:
    /// `[min(0, container_height - canvas_height), 0]`.
    pub fn pan_range(&self) -> (f64, f64) {
        let min_top = (self.container_height - self.canvas_height).min(0.0);
        (min_top, 0.0)
    }
}

/// Fixed geometry of the indicator strip next to the crop viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StripGeometry {
    /// Full strip height, in pixels.
    pub height: f64,
    /// Inset between the strip border and the thumb track, each side.
    pub inset: f64,
    /// Smallest thumb the strip will show, so it stays grabbable on very
    /// tall canvases.
    pub min_thumb: f64,
}

impl StripGeometry {
    pub fn new(height: f64) -> Self {
        Self {
            height,
            inset: 2.0,
            min_thumb: 36.0,
        }
    }
}

/// Indicator presentation state, derived from the viewport on every change.
/// Owned and recomputed by PanSync; it has no independent persistence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorState {
    /// Shown only when the canvas is taller than the container.
    pub visible: bool,
    /// Thumb height, in pixels.
    pub thumb_height: f64,
    /// Thumb top position measured from the strip top, in pixels.
    pub thumb_top: f64,
}

impl IndicatorState {
    pub fn hidden() -> Self {
        Self {
            visible: false,
            thumb_height: 0.0,
            thumb_top: 0.0,
        }
    }
}
