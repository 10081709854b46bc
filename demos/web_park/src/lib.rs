// Copyright 2026 the Anabatic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web exhibit: the five-turbine park and story player in the browser.
//!
//! Builds the park SVG, drives it from a [`RafLoop`] at the wind-derived
//! rotor rate, plays a short story with press-to-pause and tap-to-advance,
//! and reports the debounced fleet output with a fire-and-forget `fetch`.
//!
//! Build with: `wasm-pack build --target web demos/web_park`
//!
//! Then serve `demos/web_park/` and open `index.html` in a browser.
//!
//! [`RafLoop`]: anabatic_backend_web::raf::RafLoop

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::format;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, RequestInit};

use anabatic_backend_web::raf::RafLoop;
use anabatic_backend_web::svg::SvgRotorSurface;
use anabatic_core::fleet;
use anabatic_core::physics::{MAX_WIND_MPS, wind_to_rpm};
use anabatic_core::report::{OutputReporter, OutputSink};
use anabatic_core::rotor::RotorAnimator;
use anabatic_core::story::{Slide, StoryPlayer};
use anabatic_core::timing::{FrameTick, SceneId};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const ACCENT: &str = "#00ff41";
const ACCENT_DIM: &str = "rgba(0,255,65,0.5)";
const OUTPUT_ENDPOINT: &str = "/api/turbines/1/output";

/// Blade tip directions at 0°, 120°, and 240°.
const BLADE_DIRECTIONS: [(f64, f64); 3] = [
    (1.0, 0.0),
    (-0.5, 0.866_025_403_784_438_6),
    (-0.5, -0.866_025_403_784_438_6),
];

const STORY: [Slide; 3] = [
    Slide {
        top_text: "A hands-on curriculum in team-based engineering.",
        bottom_text: "Real collaborative experience, before you need it.",
        emoji: "\u{26a1}",
        citation: None,
    },
    Slide {
        top_text: "Day 1: you simulate the full turbine.",
        bottom_text: "See how each component affects the whole.",
        emoji: "\u{1f4bb}",
        citation: None,
    },
    Slide {
        top_text: "Days 2 and 3: your team builds.",
        bottom_text: "Building a small-scale turbine from industrial components.",
        emoji: "\u{1f527}",
        citation: None,
    },
];

/// Fire-and-forget `fetch` PATCH of the fleet output.
struct FetchSink;

impl OutputSink for FetchSink {
    fn send(&mut self, megawatts: f64) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let init = RequestInit::new();
        init.set_method("PATCH");
        init.set_body(&JsValue::from_str(&format!(
            "{{\"current_output_mw\":{megawatts}}}"
        )));
        let promise = window.fetch_with_str_and_init(OUTPUT_ENDPOINT, &init);
        // Swallow delivery failures; there is no retry.
        let noop = Closure::<dyn FnMut(JsValue)>::new(|_| {});
        let _ = promise.catch(&noop);
        noop.forget();
    }
}

/// DOM handles the frame loop and story handlers write into.
struct ExhibitDom {
    top_text: HtmlElement,
    emoji: HtmlElement,
    bottom_text: HtmlElement,
    overlay: HtmlElement,
    readout: HtmlElement,
}

struct Exhibit {
    animator: RotorAnimator,
    surface: SvgRotorSurface,
    player: StoryPlayer,
    reporter: OutputReporter,
    sink: FetchSink,
    dom: ExhibitDom,
}

impl Exhibit {
    fn sync_story(&self) {
        if self.player.is_exhausted() {
            // The sequence is done; return control to the park view.
            let _ = self.dom.overlay.style().set_property("display", "none");
            return;
        }
        let slide = &STORY[self.player.display_index()];
        self.dom.top_text.set_text_content(Some(slide.top_text));
        self.dom.emoji.set_text_content(Some(slide.emoji));
        self.dom.bottom_text.set_text_content(Some(slide.bottom_text));
        let play_state = if self.player.is_running() {
            "running"
        } else {
            "paused"
        };
        let _ = self
            .dom
            .overlay
            .style()
            .set_property("--story-play-state", play_state);
    }
}

/// Entry point — called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().expect("no global window");
    let document = window.document().expect("no document");
    let body = document.body().expect("no body");

    // -- scene -------------------------------------------------------------
    let svg = svg_element(&document, "svg", &[("viewBox", "0 0 430 320")])?;
    let mut surface = SvgRotorSurface::new();
    // Far → near so T-01 draws on top, matching the park's depth order.
    for idx in (0..fleet::TURBINE_COUNT).rev() {
        let blades = build_turbine(&document, &svg, idx)?;
        surface.register(idx, blades);
    }
    body.append_child(&svg)?;

    // -- readout and slider ------------------------------------------------
    let readout: HtmlElement = document.create_element("div")?.unchecked_into();
    style_text(&readout, ACCENT)?;
    body.append_child(&readout)?;

    let wind = Rc::new(Cell::new(0.0_f64));
    let slider: HtmlInputElement = document.create_element("input")?.unchecked_into();
    slider.set_type("range");
    slider.set_min("0");
    slider.set_max(&format!("{MAX_WIND_MPS}"));
    slider.set_step("0.1");
    slider.set_value("0");
    body.append_child(&slider)?;
    {
        let wind = Rc::clone(&wind);
        let slider_handle = slider.clone();
        let on_input = Closure::<dyn FnMut()>::new(move || {
            wind.set(slider_handle.value().parse().unwrap_or(0.0));
        });
        slider.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
        on_input.forget();
    }

    // -- story overlay -----------------------------------------------------
    let overlay: HtmlElement = document.create_element("div")?.unchecked_into();
    let top_text: HtmlElement = document.create_element("p")?.unchecked_into();
    let emoji: HtmlElement = document.create_element("span")?.unchecked_into();
    let bottom_text: HtmlElement = document.create_element("p")?.unchecked_into();
    style_text(&top_text, ACCENT_DIM)?;
    style_text(&bottom_text, ACCENT_DIM)?;
    emoji.style().set_property("font-size", "96px")?;
    overlay.append_child(&top_text)?;
    overlay.append_child(&emoji)?;
    overlay.append_child(&bottom_text)?;
    body.append_child(&overlay)?;

    let now = anabatic_backend_web::raf::now();
    let state = Rc::new(RefCell::new(Exhibit {
        animator: fleet::fleet_animator(),
        surface,
        player: StoryPlayer::new(STORY.len(), now),
        reporter: OutputReporter::new(),
        sink: FetchSink,
        dom: ExhibitDom {
            top_text,
            emoji,
            bottom_text,
            overlay: overlay.clone(),
            readout,
        },
    }));
    state.borrow().sync_story();

    // -- pointer handlers --------------------------------------------------
    {
        let state = Rc::clone(&state);
        let on_down = Closure::<dyn FnMut()>::new(move || {
            let mut s = state.borrow_mut();
            let now = anabatic_backend_web::raf::now();
            s.player.press(now);
        });
        overlay.add_event_listener_with_callback("pointerdown", on_down.as_ref().unchecked_ref())?;
        on_down.forget();
    }
    {
        let state = Rc::clone(&state);
        let on_up = Closure::<dyn FnMut()>::new(move || {
            let mut s = state.borrow_mut();
            let now = anabatic_backend_web::raf::now();
            let _ = s.player.release(now);
            s.sync_story();
        });
        overlay.add_event_listener_with_callback("pointerup", on_up.as_ref().unchecked_ref())?;
        on_up.forget();
    }
    {
        let state = Rc::clone(&state);
        let on_leave = Closure::<dyn FnMut()>::new(move || {
            let mut s = state.borrow_mut();
            let now = anabatic_backend_web::raf::now();
            let _ = s.player.pointer_leave(now);
            s.sync_story();
        });
        overlay
            .add_event_listener_with_callback("pointerleave", on_leave.as_ref().unchecked_ref())?;
        on_leave.forget();
    }

    // -- frame loop --------------------------------------------------------
    let state_cb = Rc::clone(&state);
    let wind_cb = Rc::clone(&wind);
    let raf = RafLoop::new(move |tick| on_tick(&state_cb, &wind_cb, tick), SceneId(0));
    raf.start();

    // Keep the RafLoop alive — there is no graceful shutdown on the web.
    core::mem::forget(raf);

    Ok(())
}

fn on_tick(state: &Rc<RefCell<Exhibit>>, wind: &Rc<Cell<f64>>, tick: FrameTick) {
    let mut s = state.borrow_mut();

    // Rotor: live rate from the slider, applied to the SVG groups.
    let wind_mps = wind.get();
    let rpm = wind_to_rpm(wind_mps);
    let Exhibit {
        ref mut animator,
        ref mut surface,
        ..
    } = *s;
    let _ = animator.step_and_apply(tick.now, rpm, surface);

    // Story: evaluate timers; any transition rewrites the overlay.
    if s.player.on_tick(tick.now).is_some() {
        s.sync_story();
    }

    // Fleet output: debounced fire-and-forget report, hundredth-MW steps.
    let fleet_mw = quantize_hundredths(fleet::fleet_power_mw(wind_mps));
    s.reporter.note(tick.now, fleet_mw);
    let Exhibit {
        ref mut reporter,
        ref mut sink,
        ..
    } = *s;
    let _ = reporter.poll(tick.now, sink);

    let text = format!(
        "Wind: {wind_mps:.1} m/s   Rotor: {rpm:.1} RPM   Fleet: {fleet_mw:.2} MW"
    );
    s.dom.readout.set_text_content(Some(&text));
}

/// Builds one park turbine (tower, hub, blade group) into `svg` and returns
/// the blade group to register as the rotor target.
fn build_turbine(document: &Document, svg: &Element, idx: usize) -> Result<Element, JsValue> {
    let placement = fleet::PLACEMENTS[idx];
    let (x, y) = (placement.hub.x, placement.hub.y);
    let scale = placement.scale;

    let tower = svg_element(
        document,
        "line",
        &[
            ("x1", &format!("{x}")),
            ("y1", &format!("{y}")),
            ("x2", &format!("{x}")),
            ("y2", &format!("{}", y + 120.0 * scale)),
            ("stroke", ACCENT_DIM),
            ("stroke-width", &format!("{}", 2.0 * scale)),
        ],
    )?;
    svg.append_child(&tower)?;

    let hub = svg_element(
        document,
        "circle",
        &[
            ("cx", &format!("{x}")),
            ("cy", &format!("{y}")),
            ("r", &format!("{}", 6.5 * scale)),
            ("fill", "#001800"),
            ("stroke", ACCENT),
        ],
    )?;
    svg.append_child(&hub)?;

    let blades = svg_element(document, "g", &[])?;
    let blade_len = 92.0 * scale;
    for (dx, dy) in BLADE_DIRECTIONS {
        let blade = svg_element(
            document,
            "line",
            &[
                ("x1", &format!("{x}")),
                ("y1", &format!("{y}")),
                ("x2", &format!("{}", x + dx * blade_len)),
                ("y2", &format!("{}", y + dy * blade_len)),
                ("stroke", ACCENT),
                ("stroke-width", &format!("{}", (0.5 * scale).max(0.3))),
            ],
        )?;
        blades.append_child(&blade)?;
    }
    svg.append_child(&blades)?;
    Ok(blades)
}

/// Rounds a non-negative value to hundredths without `std` float rounding.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "fleet output is small and non-negative"
)]
fn quantize_hundredths(value: f64) -> f64 {
    (value * 100.0 + 0.5) as u64 as f64 / 100.0
}

fn svg_element(
    document: &Document,
    name: &str,
    attrs: &[(&str, &str)],
) -> Result<Element, JsValue> {
    let el = document.create_element_ns(Some(SVG_NS), name)?;
    for (key, value) in attrs {
        el.set_attribute(key, value)?;
    }
    Ok(el)
}

fn style_text(el: &HtmlElement, color: &str) -> Result<(), JsValue> {
    let style = el.style();
    style.set_property("color", color)?;
    style.set_property("font-family", "monospace")?;
    style.set_property("text-align", "center")?;
    Ok(())
}
