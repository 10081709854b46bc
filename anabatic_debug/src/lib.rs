// Copyright 2026 the Anabatic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for anabatic
//! diagnostics.
//!
//! - [`recorder`] — compact binary event recording and decoding.
//! - [`pretty`] — human-readable trace lines to any `Write` destination.
//! - [`chrome`] — Chrome Trace Event Format JSON export for
//!   `chrome://tracing` / Perfetto.

pub mod chrome;
pub mod pretty;
pub mod recorder;
