// Copyright 2026 the Anabatic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame opportunities delivered by backend tick sources.
//!
//! Exhibit hosts provide frame *pacing* but no presentation prediction: the
//! browser's `requestAnimationFrame` hands the callback a timestamp, and the
//! thread-timer backend wakes on a fixed interval. A [`FrameTick`] carries
//! exactly what that model offers — the current host time, a frame counter,
//! and the scene the tick targets.

use crate::time::HostTime;

use core::fmt;

/// Identifies a specific illustration scene (the fleet panorama, a subsystem
/// detail view).
///
/// Backends assign scene IDs to distinguish multiple live scenes. Core code
/// passes them through without interpreting the value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SceneId(pub u32);

impl fmt::Debug for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SceneId({})", self.0)
    }
}

/// A frame opportunity delivered by a backend tick source.
///
/// Backends produce a `FrameTick` each time the scene may be updated. The
/// tick is the *only* time input the core consumes: animators keep the
/// previous tick's `now` to compute elapsed time, and every deadline (slide
/// advance, hold threshold, report debounce) is checked against `now` when a
/// tick arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTick {
    /// Current host time when the tick was generated.
    pub now: HostTime,
    /// Monotonically increasing frame counter.
    pub frame_index: u64,
    /// Which scene this tick is for.
    pub scene: SceneId,
}
