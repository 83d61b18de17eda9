// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pan synchronization — bidirectional mapping between the crop viewport's
// vertical offset and the indicator thumb's position and size.

use tracing::debug;

use crate::viewport::{IndicatorState, StripGeometry, ViewportState};

/// The canvas must overflow the container by more than this before the
/// indicator shows; a sub-pixel overflow is not worth a scrollbar.
const VISIBILITY_SLACK: f64 = 1.0;

/// Keeps an indicator strip consistent with an externally owned pan/zoom
/// viewport.
///
/// The viewport owner funnels every state change (drag, wheel, zoom, crop
/// reshape, resize) through [`on_viewport_changed`](Self::on_viewport_changed),
/// which recomputes the indicator from scratch (last write wins, no queue).
/// User input on the strip goes the other way through
/// [`on_indicator_drag_to`](Self::on_indicator_drag_to), which returns the
/// clamped vertical offset for the owner to apply. The two directions are
/// exact inverses at rest, so repeated round-trips do not drift.
#[derive(Debug, Clone)]
pub struct PanSync {
    strip: StripGeometry,
    viewport: ViewportState,
}

impl PanSync {
    pub fn new(strip: StripGeometry) -> Self {
        Self {
            strip,
            viewport: ViewportState::default(),
        }
    }

    /// Absorb a viewport change and derive the new indicator state.
    ///
    /// A malformed viewport (non-positive dimensions) yields a hidden
    /// indicator rather than an error.
    pub fn on_viewport_changed(&mut self, state: ViewportState) -> IndicatorState {
        self.viewport = state;
        let indicator = self.indicator();
        debug!(
            visible = indicator.visible,
            thumb_height = indicator.thumb_height,
            thumb_top = indicator.thumb_top,
            "Indicator recomputed"
        );
        indicator
    }

    /// The indicator derived from the last seen viewport state.
    pub fn indicator(&self) -> IndicatorState {
        if !self.indicator_applies() {
            return IndicatorState::hidden();
        }
        IndicatorState {
            visible: true,
            thumb_height: self.thumb_height(),
            thumb_top: self.top_to_y(self.viewport.canvas_top),
        }
    }

    /// Map a canvas vertical offset to a thumb top position (0 = strip top).
    ///
    /// The mapping is linear over the legal offset range: offset 0 (canvas
    /// top aligned with the container) puts the thumb at the strip top, the
    /// most negative offset puts it at the strip bottom.
    pub fn top_to_y(&self, canvas_top: f64) -> f64 {
        let (min_top, max_top) = self.viewport.pan_range();
        let usable = self.usable_travel();
        if !self.indicator_applies() || usable <= 0.0 || max_top == min_top {
            return 0.0;
        }
        let t = (canvas_top.clamp(min_top, max_top) - min_top) / (max_top - min_top);
        (1.0 - t) * usable
    }

    /// Map a requested thumb top position to the canvas vertical offset the
    /// viewport owner should apply. Inverse of [`top_to_y`](Self::top_to_y);
    /// the result is clamped to the legal range.
    ///
    /// When the indicator does not apply (canvas fits, or malformed state)
    /// the current offset is returned unchanged.
    pub fn on_indicator_drag_to(&self, position_px: f64) -> f64 {
        let (min_top, max_top) = self.viewport.pan_range();
        let usable = self.usable_travel();
        if !self.indicator_applies() || usable <= 0.0 {
            return self.viewport.canvas_top;
        }
        let t = position_px / usable;
        let top = min_top + (1.0 - t) * (max_top - min_top);
        top.clamp(min_top, max_top)
    }

    /// Pointer-driven drag: center the thumb under the pointer's strip-local
    /// y coordinate, then resolve as a drag request.
    pub fn on_pointer_drag(&self, pointer_y: f64) -> f64 {
        self.on_indicator_drag_to(pointer_y - self.thumb_height() / 2.0)
    }

    /// Wheel scroll over the strip: move relative to the current offset,
    /// clamped to the legal range.
    pub fn on_wheel(&self, delta_y: f64) -> f64 {
        let (min_top, max_top) = self.viewport.pan_range();
        (self.viewport.canvas_top - delta_y).clamp(min_top, max_top)
    }

    /// The strip geometry this instance was built with.
    pub fn strip(&self) -> StripGeometry {
        self.strip
    }

    fn indicator_applies(&self) -> bool {
        self.viewport.is_valid()
            && self.viewport.canvas_height > self.viewport.container_height + VISIBILITY_SLACK
    }

    /// Thumb height: proportional to the visible fraction of the canvas,
    /// never below the configured minimum.
    fn thumb_height(&self) -> f64 {
        let track = self.strip.height - 2.0 * self.strip.inset;
        let ratio = self.viewport.container_height / self.viewport.canvas_height;
        (ratio * track).round().max(self.strip.min_thumb)
    }

    /// Vertical travel available to the thumb top.
    fn usable_travel(&self) -> f64 {
        (self.strip.height - self.thumb_height()).max(0.0)
    }
}
