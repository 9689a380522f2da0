//! Card elements for the carousel and the grids

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlImageElement};

use super::dom;
use crate::carousel::{CardHost, Slot};
use crate::catalog::GameRecord;
use crate::grid::{CardView, GridModel};
use crate::wishlist::Wishlist;

/// `<a class="{class}">` with cover, title, badges and a wish star
pub fn card_element(card: &CardView, class: &str) -> Result<Element, JsValue> {
    let link = dom::create("a", class)?;
    link.set_attribute("href", &card.href)?;
    link.set_attribute("data-id", &card.id)?;

    let cover = dom::create("div", "card-image")?;
    dom::set_style(&cover, "background", card.gradient);
    if let Some(src) = &card.image {
        let img: HtmlImageElement = dom::create("img", "")?.dyn_into()?;
        img.set_src(src);
        img.set_alt(&card.title);
        img.set_attribute("loading", "lazy")?;
        cover.append_child(&img)?;
    } else if let Some(icon) = &card.icon {
        let span = dom::create("span", "card-icon")?;
        span.set_text_content(Some(icon));
        cover.append_child(&span)?;
    }
    link.append_child(&cover)?;

    let content = dom::create("div", "card-content")?;
    let title = dom::create("h2", "")?;
    title.set_text_content(Some(&card.title));
    content.append_child(&title)?;

    let meta = dom::create("div", "meta-info")?;
    for (class, text) in [
        ("badge players", format!("👥 {}인", card.players)),
        ("badge time", format!("⏱️ {}", card.play_time)),
        ("badge difficulty", format!("🔥 {}", card.difficulty)),
    ] {
        let badge = dom::create("span", class)?;
        badge.set_text_content(Some(&text));
        meta.append_child(&badge)?;
    }
    content.append_child(&meta)?;
    link.append_child(&content)?;

    let wish = dom::create("button", "wish-btn")?;
    wish.set_attribute("type", "button")?;
    wish.set_attribute("data-wish", &card.id)?;
    wish.set_text_content(Some(card.wish_symbol()));
    let _ = wish.class_list().toggle_with_force("active", card.wished);
    link.append_child(&wish)?;

    Ok(link)
}

/// Replace a container's children with a grid
pub fn render_grid(container: &Element, grid: &GridModel) {
    container.set_inner_html("");
    match grid {
        GridModel::Empty(message) => {
            if let Ok(p) = dom::create("p", "empty-message") {
                p.set_text_content(Some(message));
                let _ = container.append_child(&p);
            }
        }
        GridModel::Cards(cards) => {
            for card in cards {
                match card_element(card, "card-link") {
                    Ok(el) => {
                        let _ = container.append_child(&el);
                    }
                    Err(e) => log::error!("Card {}: {}", card.id, dom::js_error_message(&e)),
                }
            }
        }
    }
}

/// Refresh every star for `id` below `root`
pub fn update_wish_buttons(root: &Element, id: &str, wished: bool) {
    let selector = format!("[data-wish=\"{}\"]", id.replace('"', "\\\""));
    let Ok(buttons) = root.query_selector_all(&selector) else {
        return;
    };
    for i in 0..buttons.length() {
        if let Some(el) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            el.set_text_content(Some(crate::grid::wish_symbol(wished)));
            let _ = el.class_list().toggle_with_force("active", wished);
        }
    }
}

/// Broken images fall back to the placeholder, then to the gradient behind them
pub fn install_image_fallback(root: &Element, placeholder: String) {
    dom::listen_capture(root, "error", move |event: web_sys::Event| {
        let Some(img) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlImageElement>().ok())
        else {
            return;
        };
        if img.get_attribute("data-fallback").is_none() && !placeholder.is_empty() {
            let _ = img.set_attribute("data-fallback", "1");
            img.set_src(&placeholder);
        } else {
            log::warn!("Image unavailable: {}", img.src());
            img.remove();
        }
    });
}

/// Carousel cards as children of the track element
pub struct DomCardHost {
    track: Element,
    image_dir: String,
    /// Snapshot used for the stars of newly created cards
    pub wishlist: Wishlist,
}

impl DomCardHost {
    pub fn new(track: Element, image_dir: &str, wishlist: Wishlist) -> Self {
        Self {
            track,
            image_dir: image_dir.to_string(),
            wishlist,
        }
    }
}

impl CardHost for DomCardHost {
    type Handle = Element;

    fn create(&mut self, record: &GameRecord) -> Element {
        let view = CardView::new(record, &self.wishlist, &self.image_dir);
        match card_element(&view, "carousel-card") {
            Ok(el) => el,
            Err(e) => {
                log::error!("Card {}: {}", record.id, dom::js_error_message(&e));
                // Bare element keeps the window bookkeeping intact
                dom::document()
                    .create_element("a")
                    .expect("createElement should not fail")
            }
        }
    }

    fn insert_before(&mut self, handle: &Element, before: Option<&Element>) {
        let _ = self
            .track
            .insert_before(handle, before.map(|b| &**b));
    }

    fn remove(&mut self, handle: Element) {
        handle.remove();
    }

    fn set_slot(&mut self, handle: &Element, slot: Slot, index: usize) {
        handle.set_class_name(&format!("carousel-card {}", slot.class_name()));
        let _ = handle.set_attribute("data-index", &index.to_string());
        let _ = handle.set_attribute("aria-hidden", if slot.is_visible() { "false" } else { "true" });
    }
}
