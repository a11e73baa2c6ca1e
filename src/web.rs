//! Browser glue.
//!
//! The page is expected to provide a `#webgl` container for the canvas and
//! three buttons, `#high`, `#medium` and `#low`, selecting the fan speed.
//! Missing elements are reported and skipped; the fan keeps turning either way.

use std::sync::Arc;

use anyhow::{Context as _, anyhow};
use wasm_bindgen::{JsCast, prelude::*};
use winit::{
    dpi::LogicalSize,
    event_loop::EventLoopProxy,
    platform::web::{WindowAttributesExtWebSys, WindowExtWebSys},
    window::{Window, WindowAttributes},
};

use crate::{controls::Speed, flow::FanEvent};

pub const CONTAINER_ID: &str = "webgl";

pub fn window_attributes(attributes: WindowAttributes) -> WindowAttributes {
    attributes.with_append(false).with_prevent_default(true)
}

/// Mounts the canvas and wires up the DOM listeners for `window`.
pub fn attach(window: &Arc<Window>, proxy: &EventLoopProxy<FanEvent>) {
    if let Err(e) = mount_canvas(window) {
        log::warn!("{:#}", e);
    }
    bind_speed_buttons(proxy);
    bind_resize(window);
    fit_to_viewport(window);
}

fn document() -> anyhow::Result<web_sys::Document> {
    web_sys::window()
        .context("no global window")?
        .document()
        .context("window has no document")
}

fn mount_canvas(window: &Window) -> anyhow::Result<()> {
    let document = document()?;
    let canvas = window.canvas().context("window has no canvas")?;
    let parent: web_sys::Element = match document.get_element_by_id(CONTAINER_ID) {
        Some(container) => container,
        None => {
            log::warn!("#{} not found, appending the canvas to <body>", CONTAINER_ID);
            document.body().context("document has no body")?.into()
        }
    };
    parent
        .append_child(&canvas)
        .map_err(|e| anyhow!("could not mount canvas: {:?}", e))?;
    Ok(())
}

fn bind_speed_buttons(proxy: &EventLoopProxy<FanEvent>) {
    let document = match document() {
        Ok(document) => document,
        Err(e) => {
            log::warn!("{:#}", e);
            return;
        }
    };

    for speed in Speed::ALL {
        let Some(button) = document.get_element_by_id(speed.button_id()) else {
            log::warn!("#{} not found, speed {:?} has no control", speed.button_id(), speed);
            continue;
        };
        let proxy = proxy.clone();
        let on_click = Closure::<dyn FnMut()>::new(move || {
            if proxy.send_event(FanEvent::SetSpeed(speed)).is_err() {
                log::warn!("event loop closed, dropping speed change");
            }
        });
        if let Err(e) =
            button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        {
            log::warn!("could not bind #{}: {:?}", speed.button_id(), e);
        }
        // The listener lives as long as the page.
        on_click.forget();
    }
}

fn fit_to_viewport(window: &Window) {
    let Some(browser) = web_sys::window() else {
        return;
    };
    let width = browser.inner_width().ok().and_then(|w| w.as_f64());
    let height = browser.inner_height().ok().and_then(|h| h.as_f64());
    if let (Some(width), Some(height)) = (width, height) {
        let _ = window.request_inner_size(LogicalSize::new(width, height));
    }
}

fn bind_resize(window: &Arc<Window>) {
    let Some(browser) = web_sys::window() else {
        log::warn!("no global window, resize listener not bound");
        return;
    };
    let window = window.clone();
    let on_resize = Closure::<dyn FnMut()>::new(move || fit_to_viewport(&window));
    if let Err(e) =
        browser.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
    {
        log::warn!("could not bind resize listener: {:?}", e);
    }
    on_resize.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    crate::flow::run().map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}
