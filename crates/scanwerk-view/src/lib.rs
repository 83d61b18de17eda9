// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scanwerk-view — Pan synchronization between a zoomable/pannable crop
// viewport and its auxiliary scroll indicator.

pub mod pan_sync;
pub mod viewport;

pub use pan_sync::PanSync;
pub use viewport::{IndicatorState, StripGeometry, ViewportState};
