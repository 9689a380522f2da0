//! Listing pages: filter controls, carousel and/or game grid

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlSelectElement, KeyboardEvent, MouseEvent, PointerEvent};

use super::cards::{self, DomCardHost};
use super::dom;
use crate::carousel::{CarouselWindow, ClickAction, Indicator, NavCommand};
use crate::catalog::Catalog;
use crate::config::ShelfConfig;
use crate::consts::EMPTY_RESULTS;
use crate::filter::FilterCriteria;
use crate::grid::bazaar_grid;
use crate::persistence::LocalStore;
use crate::shelf::Shelf;
use crate::timing::Debouncer;

/// Select controls and the criteria key each one drives
const SELECTS: [(&str, &str); 5] = [
    ("filter-players", "players"),
    ("filter-genre", "genre"),
    ("filter-time", "time"),
    ("filter-difficulty", "difficulty"),
    ("sort-order", "sort"),
];

struct Listing {
    shelf: Shelf<LocalStore>,
    /// Carousel track, when the page has one
    host: Option<DomCardHost>,
    window: CarouselWindow<Element>,
    track: Option<Element>,
    /// Grid container, when the page has one
    grid: Option<Element>,
    search: Debouncer,
}

impl Listing {
    fn render(&mut self) {
        self.render_carousel();
        self.render_grid();
    }

    fn render_carousel(&mut self) {
        let Some(host) = self.host.as_mut() else {
            return;
        };
        host.wishlist = self.shelf.wishlist().clone();
        self.shelf.sync_window(&mut self.window, host);

        if let Some(h) = self.shelf.navigator().highlight(dom::now()) {
            if let Some(card) = self.window.handle_for(&h.id) {
                let _ = card.class_list().add_1("highlight");
            }
        }

        let empty = self.shelf.view().is_empty();
        dom::set_text("carousel-empty", if empty { EMPTY_RESULTS } else { "" });
        dom::set_hidden_id("carousel-empty", !empty);

        if let Some(indicator) = dom::document().get_element_by_id("carousel-indicator") {
            render_indicator(&indicator, &self.shelf.indicator());
        }
        let controls = self.shelf.controls();
        set_disabled("carousel-prev", !controls.prev_enabled);
        set_disabled("carousel-next", !controls.next_enabled);
    }

    fn render_grid(&self) {
        if let Some(grid) = &self.grid {
            let model = bazaar_grid(
                self.shelf.records(),
                self.shelf.wishlist(),
                &self.shelf.config().image_dir,
            );
            cards::render_grid(grid, &model);
        }
    }

    /// Star clicked somewhere on the page
    fn toggle_wish(&mut self, id: &str) {
        let wished = self.shelf.toggle_wishlist(id);
        if self.shelf.criteria().wishlist_only {
            self.render();
            return;
        }
        for root in [&self.track, &self.grid].into_iter().flatten() {
            cards::update_wish_buttons(root, id, wished);
        }
    }

    /// Push criteria into the form controls (after restore or reset)
    fn write_controls(&self) {
        write_controls(self.shelf.criteria());
    }
}

fn set_disabled(id: &str, disabled: bool) {
    if let Some(el) = dom::document().get_element_by_id(id) {
        let _ = if disabled {
            el.set_attribute("disabled", "")
        } else {
            el.remove_attribute("disabled")
        };
    }
}

fn render_indicator(container: &Element, indicator: &Indicator) {
    container.set_inner_html("");
    match indicator {
        Indicator::None => {}
        Indicator::Dots { count, active } => {
            for i in 0..*count {
                let class = if i == *active { "dot active" } else { "dot" };
                if let Ok(dot) = dom::create("span", class) {
                    let _ = dot.set_attribute("data-index", &i.to_string());
                    let _ = container.append_child(&dot);
                }
            }
        }
        Indicator::Label(label) => container.set_text_content(Some(label)),
    }
}

fn write_controls(criteria: &FilterCriteria) {
    let values = [
        criteria.player_count.as_str(),
        criteria.genre.clone().unwrap_or_else(|| "all".to_string()),
        criteria.time.as_str().to_string(),
        criteria.difficulty.as_str().to_string(),
        criteria.sort.as_str().to_string(),
    ];
    for ((id, _), value) in SELECTS.iter().zip(values) {
        if let Some(select) = dom::by_id::<HtmlSelectElement>(id) {
            select.set_value(&value);
        }
    }
    if let Some(input) = dom::by_id::<HtmlInputElement>("search-input") {
        input.set_value(&criteria.search);
    }
    if let Some(input) = dom::by_id::<HtmlInputElement>("filter-wishlist") {
        input.set_checked(criteria.wishlist_only);
    }
}

/// Fill the player and genre selects when the markup leaves them empty
fn populate_options(catalog: &Catalog, config: &ShelfConfig) {
    let add = |select: &HtmlSelectElement, value: &str, label: &str| {
        if let Ok(option) = dom::create("option", "") {
            let _ = option.set_attribute("value", value);
            option.set_text_content(Some(label));
            let _ = select.append_child(&option);
        }
    };
    if let Some(select) = dom::by_id::<HtmlSelectElement>("filter-players") {
        if select.length() == 0 {
            add(&select, "all", "전체 인원");
            for n in 1..config.many_players {
                add(&select, &n.to_string(), &format!("{n}인"));
            }
            let many = config.many_players;
            add(&select, &format!("{many}+"), &format!("{many}인 이상"));
        }
    }
    if let Some(select) = dom::by_id::<HtmlSelectElement>("filter-genre") {
        if select.length() == 0 {
            add(&select, "all", "전체 장르");
            for genre in catalog.genres() {
                add(&select, genre, genre);
            }
        }
    }
}

pub fn run(config: ShelfConfig, catalog: Catalog) {
    populate_options(&catalog, &config);

    let document = dom::document();
    let track = document.get_element_by_id("carousel-track");
    let grid = document.get_element_by_id("game-list");
    let image_dir = config.image_dir.clone();
    let placeholder = config.placeholder_image.clone();
    let search = Debouncer::new(config.search_debounce_ms);

    let seed = dom::now() as u64;
    let mut shelf = Shelf::new(catalog, config, LocalStore::open(), &dom::pathname(), seed);
    let scroll = shelf.restore();

    let host = track
        .clone()
        .map(|t| DomCardHost::new(t, &image_dir, shelf.wishlist().clone()));
    for root in [&track, &grid].into_iter().flatten() {
        cards::install_image_fallback(root, placeholder.clone());
    }

    let listing = Rc::new(RefCell::new(Listing {
        shelf,
        host,
        window: CarouselWindow::new(),
        track: track.clone(),
        grid: grid.clone(),
        search,
    }));
    listing.borrow().write_controls();
    listing.borrow_mut().render();

    if let Some(offset) = scroll {
        dom::request_animation_frame(move || dom::window().scroll_to_with_x_and_y(0.0, offset));
    }

    setup_filter_controls(listing.clone());
    if let Some(track) = &track {
        setup_carousel(track, listing.clone());
    }
    if let Some(grid) = &grid {
        setup_grid(grid, listing.clone());
    }
    setup_page_events(listing);
    log::info!("Listing ready");
}

fn setup_filter_controls(listing: Rc<RefCell<Listing>>) {
    for (id, key) in SELECTS {
        let Some(select) = dom::by_id::<HtmlSelectElement>(id) else {
            continue;
        };
        let listing = listing.clone();
        let target = select.clone();
        dom::listen(&select, "change", move |_event: web_sys::Event| {
            let mut l = listing.borrow_mut();
            if l.shelf.update_criterion(key, &target.value()) {
                l.render();
            }
        });
    }

    // Search: re-filter once typing pauses
    if let Some(input) = dom::by_id::<HtmlInputElement>("search-input") {
        let listing = listing.clone();
        let target = input.clone();
        dom::listen(&input, "input", move |_event: web_sys::Event| {
            let (token, delay) = {
                let mut l = listing.borrow_mut();
                let token = l.search.trigger(dom::now());
                (token, l.search.delay_ms())
            };
            let listing = listing.clone();
            let target = target.clone();
            dom::set_timeout(
                move || {
                    let mut l = listing.borrow_mut();
                    if l.search.fire_token(token) && l.shelf.update_criterion("search", &target.value()) {
                        l.render();
                    }
                },
                delay,
            );
        });
    }

    if let Some(input) = dom::by_id::<HtmlInputElement>("filter-wishlist") {
        let listing = listing.clone();
        let target = input.clone();
        dom::listen(&input, "change", move |_event: web_sys::Event| {
            let value = if target.checked() { "true" } else { "false" };
            let mut l = listing.borrow_mut();
            if l.shelf.update_criterion("wishlist", value) {
                l.render();
            }
        });
    }

    if let Some(btn) = dom::document().get_element_by_id("btn-reset") {
        let listing = listing.clone();
        dom::listen(&btn, "click", move |_event: MouseEvent| {
            let mut l = listing.borrow_mut();
            l.search.cancel();
            l.shelf.reset();
            l.write_controls();
            l.render();
            log::info!("Filters reset");
        });
    }
}

fn setup_carousel(track: &Element, listing: Rc<RefCell<Listing>>) {
    for (id, command) in [("carousel-prev", NavCommand::Prev), ("carousel-next", NavCommand::Next)] {
        if let Some(btn) = dom::document().get_element_by_id(id) {
            let listing = listing.clone();
            dom::listen(&btn, "click", move |_event: MouseEvent| {
                let mut l = listing.borrow_mut();
                if l.shelf.navigate(command, dom::now()) {
                    l.render_carousel();
                }
            });
        }
    }

    // Dots jump straight to their card
    if let Some(indicator) = dom::document().get_element_by_id("carousel-indicator") {
        let listing = listing.clone();
        dom::listen(&indicator, "click", move |event: MouseEvent| {
            let Some(index) = dom::closest(&event, ".dot")
                .and_then(|dot| dom::data_attr(&dot, "index"))
                .and_then(|i| i.parse().ok())
            else {
                return;
            };
            let mut l = listing.borrow_mut();
            if l.shelf.navigate(NavCommand::Jump(index), dom::now()) {
                l.render_carousel();
            }
        });
    }

    if let Some(btn) = dom::document().get_element_by_id("btn-random") {
        let listing = listing.clone();
        dom::listen(&btn, "click", move |_event: MouseEvent| {
            let highlight_ms = {
                let mut l = listing.borrow_mut();
                l.shelf.navigate(NavCommand::Random, dom::now());
                l.render_carousel();
                l.shelf.config().gesture.highlight_ms
            };
            let listing = listing.clone();
            dom::set_timeout(
                move || {
                    let mut l = listing.borrow_mut();
                    if let Some(id) = l.shelf.navigator_mut().expire_highlight(dom::now()) {
                        if let Some(card) = l.window.handle_for(&id) {
                            let _ = card.class_list().remove_1("highlight");
                        }
                    }
                },
                highlight_ms,
            );
        });
    }

    // Drag / swipe
    {
        let listing = listing.clone();
        let track_el = track.clone();
        dom::listen(track, "pointerdown", move |event: PointerEvent| {
            if !event.is_primary() {
                return;
            }
            listing
                .borrow_mut()
                .shelf
                .navigator_mut()
                .drag
                .pointer_down(event.client_x() as f64);
            let _ = track_el.class_list().add_1("dragging");
        });
    }
    {
        let listing = listing.clone();
        let track_el = track.clone();
        dom::listen(track, "pointermove", move |event: PointerEvent| {
            let offset = listing
                .borrow_mut()
                .shelf
                .navigator_mut()
                .drag
                .pointer_move(event.client_x() as f64);
            if let Some(offset) = offset {
                dom::set_style(&track_el, "--drag-offset", &format!("{offset}px"));
            }
        });
    }
    for event_name in ["pointerup", "pointerleave"] {
        let listing = listing.clone();
        let track_el = track.clone();
        dom::listen(track, event_name, move |event: PointerEvent| {
            let mut l = listing.borrow_mut();
            if l.shelf.release(event.client_x() as f64, dom::now()).is_some() {
                dom::set_style(&track_el, "--drag-offset", "0px");
                let _ = track_el.class_list().remove_1("dragging");
                l.render_carousel();
            }
        });
    }
    {
        let listing = listing.clone();
        let track_el = track.clone();
        dom::listen(track, "pointercancel", move |_event: PointerEvent| {
            listing.borrow_mut().shelf.navigator_mut().drag.cancel();
            dom::set_style(&track_el, "--drag-offset", "0px");
            let _ = track_el.class_list().remove_1("dragging");
        });
    }

    // Card clicks: stars toggle, side cards come to the center
    {
        let listing = listing.clone();
        dom::listen(track, "click", move |event: MouseEvent| {
            if let Some(star) = dom::closest(&event, "[data-wish]") {
                event.prevent_default();
                if let Some(id) = dom::data_attr(&star, "wish") {
                    listing.borrow_mut().toggle_wish(&id);
                }
                return;
            }
            let Some(index) = dom::closest(&event, ".carousel-card")
                .and_then(|card| dom::data_attr(&card, "index"))
                .and_then(|i| i.parse().ok())
            else {
                return;
            };
            let mut l = listing.borrow_mut();
            match l.shelf.click(index, dom::now()) {
                ClickAction::Follow => l.shelf.save_view_state(),
                ClickAction::Jump(_) => {
                    event.prevent_default();
                    l.render_carousel();
                }
                ClickAction::Suppress => event.prevent_default(),
            }
        });
    }

    // Arrow keys, unless typing
    {
        let listing = listing.clone();
        dom::listen(&dom::window(), "keydown", move |event: KeyboardEvent| {
            let typing = event
                .target()
                .map(|t| t.has_type::<HtmlInputElement>() || t.has_type::<web_sys::HtmlTextAreaElement>())
                .unwrap_or(false);
            if typing {
                return;
            }
            if let Some(command) = NavCommand::from_key(&event.key()) {
                event.prevent_default();
                let mut l = listing.borrow_mut();
                if l.shelf.navigate(command, dom::now()) {
                    l.render_carousel();
                }
            }
        });
    }
}

fn setup_grid(grid: &Element, listing: Rc<RefCell<Listing>>) {
    dom::listen(grid, "click", move |event: MouseEvent| {
        if let Some(star) = dom::closest(&event, "[data-wish]") {
            event.prevent_default();
            if let Some(id) = dom::data_attr(&star, "wish") {
                listing.borrow_mut().toggle_wish(&id);
            }
        } else if dom::closest(&event, "a").is_some() {
            // Leaving for the detail page
            listing.borrow().shelf.save_view_state();
        }
    });
}

fn setup_page_events(listing: Rc<RefCell<Listing>>) {
    {
        let listing = listing.clone();
        dom::listen(&dom::window(), "scroll", move |_event: web_sys::Event| {
            let offset = dom::window().scroll_y().unwrap_or(0.0);
            if listing.borrow_mut().shelf.record_scroll(offset) {
                let listing = listing.clone();
                dom::request_animation_frame(move || listing.borrow_mut().shelf.flush_scroll());
            }
        });
    }
    dom::listen(&dom::window(), "pagehide", move |_event: web_sys::Event| {
        let mut l = listing.borrow_mut();
        l.shelf.flush_scroll();
        l.shelf.save_view_state();
    });
}
