// Copyright 2026 the Anabatic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG rotor surface.
//!
//! Translates [`RotorAnimator`] angles into `transform="rotate(…)"`
//! attributes on live SVG group elements. Targets are registered by element
//! index; an index with no registered target, or whose target has been
//! detached from the document, is skipped silently — unmounted illustrations
//! must never be written to.
//!
//! [`RotorAnimator`]: anabatic_core::rotor::RotorAnimator

use alloc::format;
use alloc::vec::Vec;

use kurbo::Point;
use web_sys::Element;

use anabatic_core::surface::RotorSurface;

/// Maps rotor element indices to live SVG group elements and applies
/// per-frame rotation transforms to them.
///
/// Register a `<g>` element per rotor element with
/// [`register`](Self::register), then pass the surface to
/// [`RotorAnimator::apply`] each frame.
///
/// [`RotorAnimator::apply`]: anabatic_core::rotor::RotorAnimator::apply
#[derive(Default)]
pub struct SvgRotorSurface {
    targets: Vec<Option<Element>>,
}

impl core::fmt::Debug for SvgRotorSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SvgRotorSurface")
            .field("targets_len", &self.targets.len())
            .finish()
    }
}

impl SvgRotorSurface {
    /// Creates a surface with no registered targets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `element` as the render target for rotor element `idx`,
    /// growing the slot table if needed.
    pub fn register(&mut self, idx: usize, element: Element) {
        if self.targets.len() <= idx {
            self.targets.resize_with(idx + 1, || None);
        }
        self.targets[idx] = Some(element);
    }

    /// Removes and returns the target for `idx`, if one was registered.
    pub fn unregister(&mut self, idx: usize) -> Option<Element> {
        self.targets.get_mut(idx)?.take()
    }

    /// Returns the registered target for `idx`, if any.
    #[must_use]
    pub fn target(&self, idx: usize) -> Option<&Element> {
        self.targets.get(idx).and_then(|slot| slot.as_ref())
    }
}

impl RotorSurface for SvgRotorSurface {
    fn apply_rotation(&mut self, element: usize, angle_deg: f64, hub: Point) {
        let Some(Some(target)) = self.targets.get(element) else {
            return;
        };
        // A target that left the document is a dead handle; writing to it
        // would resurrect state the host already tore down.
        if !target.is_connected() {
            return;
        }
        let _ = target.set_attribute(
            "transform",
            &format!("rotate({angle_deg} {} {})", hub.x, hub.y),
        );
    }
}
