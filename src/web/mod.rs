//! Browser front end
//!
//! One wasm bundle serves three pages. The page is picked from
//! `<body data-page>` or, failing that, the document path.

mod cards;
mod detail;
mod dom;
mod listing;
mod remote;
mod wishlist_page;

use wasm_bindgen::prelude::*;

use crate::config::ShelfConfig;
use crate::consts::LOAD_FAILED;
use crate::links::{LinkParams, without_param};
use crate::persistence::LocalStore;
use crate::wishlist::Wishlist;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Listing,
    Detail,
    Wishlist,
}

impl Page {
    fn current() -> Self {
        let tagged = dom::document()
            .body()
            .and_then(|body| body.get_attribute("data-page"));
        match tagged.as_deref() {
            Some("detail") => return Page::Detail,
            Some("wishlist") => return Page::Wishlist,
            Some("listing") => return Page::Listing,
            _ => {}
        }
        let path = dom::pathname();
        if path.ends_with("detail.html") {
            Page::Detail
        } else if path.ends_with("wishlist.html") {
            Page::Wishlist
        } else {
            Page::Listing
        }
    }
}

/// Adopt a `wished=` list from the address bar, then drop the parameter so
/// a reload does not import it again
fn adopt_shared_wishlist(params: &LinkParams) {
    let Some(ids) = &params.wished else {
        return;
    };
    let store = LocalStore::open();
    Wishlist::load(&store).import_shared(ids.iter().cloned(), &store);

    let url = format!(
        "{}{}",
        dom::pathname(),
        without_param(&dom::query_string(), "wished")
    );
    if let Ok(history) = dom::window().history() {
        if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(&url)) {
            log::warn!("Could not rewrite address: {}", dom::js_error_message(&e));
        }
    }
}

fn show_load_failure() {
    for id in ["game-list", "carousel-track", "status"] {
        if let Some(el) = dom::document().get_element_by_id(id) {
            el.set_inner_html(&format!("<p class=\"load-error\">{LOAD_FAILED}</p>"));
            return;
        }
    }
    dom::alert(LOAD_FAILED);
}

pub async fn run() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    let config = ShelfConfig::load();
    let page = Page::current();
    log::info!("Board Shelf starting ({page:?})");

    let params = LinkParams::parse(&dom::query_string());
    adopt_shared_wishlist(&params);

    let catalog = match remote::Remote::new(&config).fetch_catalog().await {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("Catalog load failed: {e}");
            show_load_failure();
            return;
        }
    };
    log::info!("Catalog ready: {} games", catalog.len());

    match page {
        Page::Listing => listing::run(config, catalog),
        Page::Detail => detail::run(config, catalog),
        Page::Wishlist => wishlist_page::run(config, catalog, &params),
    }
}
