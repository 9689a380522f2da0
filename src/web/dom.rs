//! Small DOM helpers shared by the pages

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlElement, Window};

use crate::error::ShelfError;

pub fn window() -> Window {
    web_sys::window().expect("`window` should be available in web context")
}

pub fn document() -> Document {
    window()
        .document()
        .expect("`document` should exist in browser context")
}

pub fn by_id<T: JsCast>(id: &str) -> Option<T> {
    document().get_element_by_id(id)?.dyn_into().ok()
}

pub fn now() -> f64 {
    js_sys::Date::now()
}

/// `location.search`, `?` included
pub fn query_string() -> String {
    window().location().search().unwrap_or_default()
}

pub fn pathname() -> String {
    window().location().pathname().unwrap_or_default()
}

pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

pub fn fetch_error(value: JsValue) -> ShelfError {
    ShelfError::Fetch(js_error_message(&value))
}

pub fn alert(message: &str) {
    let _ = window().alert_with_message(message);
}

pub fn set_text(id: &str, text: &str) {
    if let Some(el) = document().get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_hidden(el: &Element, hidden: bool) {
    let _ = el.class_list().toggle_with_force("hidden", hidden);
}

pub fn set_hidden_id(id: &str, hidden: bool) {
    if let Some(el) = document().get_element_by_id(id) {
        set_hidden(&el, hidden);
    }
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(el) = el.dyn_ref::<HtmlElement>() {
        let _ = el.style().set_property(property, value);
    }
}

pub fn create(tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = document().create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

/// Attach a handler for the lifetime of the page
pub fn listen<E, F>(target: &EventTarget, event: &str, handler: F)
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Like [`listen`] but in the capture phase, for events that do not bubble
pub fn listen_capture<E, F>(target: &EventTarget, event: &str, handler: F)
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    let _ = target.add_event_listener_with_callback_and_bool(
        event,
        closure.as_ref().unchecked_ref(),
        true,
    );
    closure.forget();
}

pub fn request_animation_frame(callback: impl FnOnce() + 'static) {
    let closure = Closure::once(move |_time: f64| callback());
    let _ = window().request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn set_timeout(callback: impl FnOnce() + 'static, delay_ms: f64) {
    let closure = Closure::once(callback);
    let _ = window().set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        delay_ms as i32,
    );
    closure.forget();
}

/// Nearest ancestor (or self) of the event target matching `selector`
pub fn closest(event: &web_sys::Event, selector: &str) -> Option<Element> {
    let target: Element = event.target()?.dyn_into().ok()?;
    target.closest(selector).ok()?
}

pub fn data_attr(el: &Element, name: &str) -> Option<String> {
    el.get_attribute(&format!("data-{name}"))
}
