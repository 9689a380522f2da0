//! Wishlist page: wished games, share link, read-only shared view

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Element, HtmlInputElement, MouseEvent};

use super::cards;
use super::dom;
use crate::catalog::Catalog;
use crate::config::ShelfConfig;
use crate::consts::{LINK_COPIED, SHARED_TITLE_SUFFIX};
use crate::grid::wishlist_grid;
use crate::links::{LinkParams, share_url};
use crate::persistence::LocalStore;
use crate::wishlist::Wishlist;

struct WishlistPage {
    catalog: Catalog,
    config: ShelfConfig,
    store: LocalStore,
    wishlist: Wishlist,
    grid: Element,
    read_only: bool,
}

impl WishlistPage {
    fn render(&self) {
        let model = wishlist_grid(&self.catalog, &self.wishlist, &self.config.image_dir);
        cards::render_grid(&self.grid, &model);
        dom::set_text("wishlist-count", &self.wishlist.len().to_string());
    }
}

pub fn run(config: ShelfConfig, catalog: Catalog, params: &LinkParams) {
    let Some(grid) = dom::document().get_element_by_id("game-list") else {
        log::warn!("Wishlist page without a game list");
        return;
    };
    let store = LocalStore::open();
    let wishlist = Wishlist::load(&store);
    let read_only = params.is_shared_view();

    if let Some(name) = &params.name {
        dom::set_text("wishlist-title", &format!("{name}{SHARED_TITLE_SUFFIX}"));
        dom::set_hidden_id("share-section", true);
        let _ = grid.class_list().add_1("read-only");
        log::info!("Viewing shared wishlist of {name}");
    }
    cards::install_image_fallback(&grid, config.placeholder_image.clone());

    let page = Rc::new(RefCell::new(WishlistPage {
        catalog,
        config,
        store,
        wishlist,
        grid: grid.clone(),
        read_only,
    }));
    page.borrow().render();

    {
        let page = page.clone();
        dom::listen(&grid, "click", move |event: MouseEvent| {
            let Some(star) = dom::closest(&event, "[data-wish]") else {
                return;
            };
            event.prevent_default();
            let mut p = page.borrow_mut();
            if p.read_only {
                return;
            }
            if let Some(id) = dom::data_attr(&star, "wish") {
                let WishlistPage { store, wishlist, .. } = &mut *p;
                wishlist.toggle_and_persist(&id, store);
                p.render();
            }
        });
    }

    if let Some(btn) = dom::document().get_element_by_id("btn-share") {
        dom::listen(&btn, "click", move |_event: MouseEvent| {
            let p = page.borrow();
            let location = dom::window().location();
            let base = format!(
                "{}{}",
                location.origin().unwrap_or_default(),
                location.pathname().unwrap_or_default()
            );
            let name = dom::by_id::<HtmlInputElement>("share-name").map(|i| i.value());
            let url = share_url(&base, p.wishlist.ids(), name.as_deref());
            if let Some(output) = dom::by_id::<HtmlInputElement>("share-link") {
                output.set_value(&url);
                output.select();
            }
            let _ = dom::window().prompt_with_message_and_default(LINK_COPIED, &url);
            log::info!("Share link built for {} games", p.wishlist.len());
        });
    }
}
