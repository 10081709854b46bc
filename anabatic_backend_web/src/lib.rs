// Copyright 2026 the Anabatic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for anabatic.
//!
//! Provides the browser half of the exhibit: a `requestAnimationFrame` tick
//! source ([`raf::RafLoop`]), a [`now`](raf::now) reading of
//! `performance.now()`, and an SVG rotor surface ([`svg::SvgRotorSurface`])
//! that writes rotation transforms onto live SVG group elements.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod raf;
pub mod svg;
