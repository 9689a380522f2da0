//! Detail page: hero, description, wish star, reviews

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, MouseEvent};

use super::cards;
use super::dom;
use super::remote::Remote;
use crate::catalog::Catalog;
use crate::config::ShelfConfig;
use crate::consts::*;
use crate::detail::{DetailView, GameDetail};
use crate::error::ShelfError;
use crate::grid::wish_symbol;
use crate::links::LinkParams;
use crate::persistence::{LocalStore, PendingEdit, PendingEdits};
use crate::reviews::{NewReview, RatingSummary, Review, verify_delete};
use crate::wishlist::Wishlist;

struct DetailPage {
    game_id: String,
    store: LocalStore,
    wishlist: Wishlist,
    reviews: Vec<Review>,
    remote: Remote,
}

pub fn run(config: ShelfConfig, catalog: Catalog) {
    let store = LocalStore::open();
    let params = LinkParams::parse(&dom::query_string());
    let wishlist = Wishlist::load(&store);

    let detail = match DetailView::build(&catalog, params.id.as_deref(), &wishlist, &config.image_dir) {
        DetailView::Found(detail) => detail,
        DetailView::NotFound => {
            show_not_found();
            return;
        }
    };
    render_detail(&detail, &store);
    if let Some(gallery) = dom::document().get_element_by_id("game-gallery") {
        cards::install_image_fallback(&gallery, config.placeholder_image.clone());
    }

    let page = Rc::new(RefCell::new(DetailPage {
        game_id: detail.id.clone(),
        store,
        wishlist,
        reviews: Vec::new(),
        remote: Remote::new(&config),
    }));
    setup_wish_button(page.clone());
    setup_review_form(page.clone());
    setup_review_list(page.clone());
    setup_best_players_form(page.clone());
    load_reviews(page);
    log::info!("Detail page ready for {}", detail.id);
}

fn show_not_found() {
    if let Some(content) = dom::document().query_selector(".detail-content").ok().flatten() {
        content.set_inner_html("");
        if let Ok(h2) = dom::create("h2", "") {
            h2.set_text_content(Some(NOT_FOUND));
            let _ = content.append_child(&h2);
        }
        if let Ok(p) = dom::create("p", "") {
            p.set_text_content(Some("메인 페이지로 돌아가주세요."));
            let _ = content.append_child(&p);
        }
    }
    if let Some(hero) = hero() {
        dom::set_style(&hero, "display", "none");
    }
}

fn hero() -> Option<Element> {
    dom::document().query_selector(".hero-section").ok().flatten()
}

fn set_chip(id: &str, text: Option<String>) {
    let Some(el) = dom::document().get_element_by_id(id) else {
        return;
    };
    match text {
        Some(text) => {
            el.set_text_content(Some(&text));
            dom::set_style(&el, "display", "inline-block");
        }
        None => dom::set_style(&el, "display", "none"),
    }
}

fn render_detail(detail: &GameDetail, store: &LocalStore) {
    dom::document().set_title(&detail.page_title);
    if let Some(hero) = hero() {
        dom::set_style(&hero, "background", detail.gradient);
    }
    dom::set_text("game-title", &detail.title);
    if let Some(icon) = &detail.icon {
        dom::set_text("game-icon", icon);
    }
    set_chip("game-genre", detail.genre.as_ref().map(|g| format!("🏷️ {g}")));
    set_chip("game-mechanism", detail.mechanism.as_ref().map(|m| format!("⚙️ {m}")));
    dom::set_text("game-players", &format!("👥 {}인", detail.players));
    dom::set_text("game-time", &format!("⏱️ {}", detail.play_time));
    dom::set_text("game-difficulty", &format!("🔥 {}", detail.difficulty));

    let proposed = PendingEdits::load(store)
        .latest_for(&detail.id)
        .map(|e| e.best_players);
    let best = match (detail.best_players, proposed) {
        (Some(n), Some(p)) if p != n => Some(format!("🏆 베스트 {n}인 (제안: {p}인)")),
        (Some(n), _) => Some(format!("🏆 베스트 {n}인")),
        (None, Some(p)) => Some(format!("🏆 제안: {p}인")),
        (None, None) => None,
    };
    set_chip("game-best-players", best);

    if let Some(desc) = dom::document().get_element_by_id("game-description-text") {
        desc.set_inner_html(&detail.description_html);
    }

    if let Some(exp) = dom::document().get_element_by_id("game-expansion") {
        if detail.expansions.is_empty() {
            dom::set_style(&exp, "display", "none");
        } else {
            dom::set_text("game-expansion-text", &detail.expansions.join(", "));
            dom::set_style(&exp, "display", "block");
        }
    }

    if let Some(gallery) = dom::document().get_element_by_id("game-gallery") {
        gallery.set_inner_html("");
        for src in &detail.images {
            if let Ok(img) = dom::create("img", "gallery-image") {
                let _ = img.set_attribute("src", src);
                let _ = img.set_attribute("alt", &detail.title);
                let _ = img.set_attribute("loading", "lazy");
                let _ = gallery.append_child(&img);
            }
        }
        dom::set_hidden(&gallery, detail.images.is_empty());
    }

    set_wish_button(detail.wished);
    dom::set_text("rating-summary", &detail.rating.label());
}

fn set_wish_button(wished: bool) {
    if let Some(btn) = dom::document().get_element_by_id("detail-wish-btn") {
        let label = if wished { "위시리스트에서 빼기" } else { "위시리스트에 담기" };
        btn.set_text_content(Some(&format!("{} {label}", wish_symbol(wished))));
        let _ = btn.class_list().toggle_with_force("active", wished);
    }
}

fn setup_wish_button(page: Rc<RefCell<DetailPage>>) {
    if let Some(btn) = dom::document().get_element_by_id("detail-wish-btn") {
        dom::listen(&btn, "click", move |_event: MouseEvent| {
            let mut p = page.borrow_mut();
            let DetailPage {
                game_id,
                store,
                wishlist,
                ..
            } = &mut *p;
            let wished = wishlist.toggle_and_persist(game_id, store);
            set_wish_button(wished);
        });
    }
}

// === Reviews ===

fn load_reviews(page: Rc<RefCell<DetailPage>>) {
    spawn_local(async move {
        let (remote, game_id) = {
            let p = page.borrow();
            (p.remote.clone(), p.game_id.clone())
        };
        match remote.reviews(&game_id).await {
            Ok(reviews) => {
                render_reviews(&reviews);
                page.borrow_mut().reviews = reviews;
            }
            Err(e) => {
                log::warn!("Reviews unavailable: {e}");
                dom::set_text("review-list", "리뷰를 불러오지 못했습니다.");
            }
        }
    });
}

/// After a write: reload reviews, recompute and store the aggregate
async fn refresh_after_write(page: Rc<RefCell<DetailPage>>) {
    let (remote, game_id) = {
        let p = page.borrow();
        (p.remote.clone(), p.game_id.clone())
    };
    match remote.refresh_rating(&game_id).await {
        Ok((reviews, summary)) => {
            render_reviews(&reviews);
            render_summary(&summary);
            page.borrow_mut().reviews = reviews;
        }
        Err(e) => log::error!("Rating refresh failed for {game_id}: {e}"),
    }
}

fn render_summary(summary: &RatingSummary) {
    dom::set_text("rating-summary", &summary.label());
}

fn format_date(timestamp: f64) -> String {
    js_sys::Date::new(&JsValue::from_f64(timestamp))
        .to_locale_date_string("ko-KR", &JsValue::UNDEFINED)
        .into()
}

fn render_reviews(reviews: &[Review]) {
    let Some(list) = dom::document().get_element_by_id("review-list") else {
        return;
    };
    list.set_inner_html("");
    if reviews.is_empty() {
        list.set_text_content(Some("첫 리뷰를 남겨주세요!"));
        return;
    }
    for review in reviews {
        let Ok(item) = review_item(review) else {
            continue;
        };
        let _ = list.append_child(&item);
    }
}

fn review_item(review: &Review) -> Result<Element, JsValue> {
    let item = dom::create("div", "review-item")?;
    let header = dom::create("div", "review-header")?;
    for (class, text) in [
        ("review-nickname", review.nickname.clone()),
        ("review-rating", format!("⭐ {}/10", review.rating)),
        ("review-date", format_date(review.timestamp)),
    ] {
        let span = dom::create("span", class)?;
        span.set_text_content(Some(&text));
        header.append_child(&span)?;
    }
    if let Some(id) = &review.id {
        let delete = dom::create("button", "review-delete")?;
        delete.set_attribute("type", "button")?;
        delete.set_attribute("data-review-id", id)?;
        delete.set_text_content(Some("삭제"));
        header.append_child(&delete)?;
    }
    item.append_child(&header)?;

    if !review.comment.is_empty() {
        let comment = dom::create("p", "review-comment")?;
        comment.set_text_content(Some(&review.comment));
        item.append_child(&comment)?;
    }
    Ok(item)
}

fn read_form() -> NewReview {
    NewReview {
        nickname: dom::by_id::<HtmlInputElement>("review-nickname")
            .map(|i| i.value())
            .unwrap_or_default(),
        password: dom::by_id::<HtmlInputElement>("review-password")
            .map(|i| i.value())
            .unwrap_or_default(),
        rating: dom::by_id::<HtmlSelectElement>("review-rating")
            .map(|s| s.value())
            .or_else(|| dom::by_id::<HtmlInputElement>("review-rating").map(|i| i.value()))
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0),
        comment: dom::by_id::<HtmlTextAreaElement>("review-comment")
            .map(|t| t.value())
            .unwrap_or_default(),
    }
}

fn clear_form() {
    for id in ["review-nickname", "review-password"] {
        if let Some(input) = dom::by_id::<HtmlInputElement>(id) {
            input.set_value("");
        }
    }
    if let Some(text) = dom::by_id::<HtmlTextAreaElement>("review-comment") {
        text.set_value("");
    }
}

fn setup_review_form(page: Rc<RefCell<DetailPage>>) {
    let Some(btn) = dom::document().get_element_by_id("review-submit") else {
        return;
    };
    dom::listen(&btn, "click", move |event: MouseEvent| {
        event.prevent_default();
        let game_id = page.borrow().game_id.clone();
        let review = match read_form().validate(&game_id, dom::now()) {
            Ok(review) => review,
            Err(ShelfError::InvalidReview(message)) => {
                dom::alert(message);
                return;
            }
            Err(e) => {
                log::warn!("Review rejected: {e}");
                return;
            }
        };
        let page = page.clone();
        spawn_local(async move {
            let remote = page.borrow().remote.clone();
            if let Err(e) = remote.add_review(&review).await {
                log::error!("Review save failed: {e}");
                dom::alert(REVIEW_SAVE_FAILED);
                return;
            }
            clear_form();
            refresh_after_write(page).await;
        });
    });
}

fn setup_review_list(page: Rc<RefCell<DetailPage>>) {
    let Some(list) = dom::document().get_element_by_id("review-list") else {
        return;
    };
    dom::listen(&list, "click", move |event: MouseEvent| {
        let Some(review_id) = dom::closest(&event, "[data-review-id]")
            .and_then(|btn| dom::data_attr(&btn, "review-id"))
        else {
            return;
        };
        let Some(review) = page
            .borrow()
            .reviews
            .iter()
            .find(|r| r.id.as_deref() == Some(review_id.as_str()))
            .cloned()
        else {
            return;
        };
        let Ok(Some(password)) = dom::window().prompt_with_message("비밀번호를 입력하세요") else {
            return;
        };
        if let Err(e) = verify_delete(&review, &password) {
            log::info!("Delete refused for {review_id}: {e}");
            dom::alert(WRONG_PASSWORD);
            return;
        }
        let page = page.clone();
        spawn_local(async move {
            let remote = page.borrow().remote.clone();
            if let Err(e) = remote.delete_review(&review_id).await {
                log::error!("Review delete failed: {e}");
                dom::alert(REVIEW_DELETE_FAILED);
                return;
            }
            refresh_after_write(page).await;
        });
    });
}

// === Best player suggestion ===

fn setup_best_players_form(page: Rc<RefCell<DetailPage>>) {
    let Some(btn) = dom::document().get_element_by_id("best-players-submit") else {
        return;
    };
    dom::listen(&btn, "click", move |event: MouseEvent| {
        event.prevent_default();
        let Some(best_players) = dom::by_id::<HtmlInputElement>("best-players-input")
            .and_then(|i| i.value().trim().parse::<u32>().ok())
            .filter(|n| *n >= 1)
        else {
            dom::alert("1 이상의 숫자를 입력해주세요.");
            return;
        };
        let p = page.borrow();
        PendingEdits::append(
            &p.store,
            PendingEdit {
                id: p.game_id.clone(),
                best_players,
                timestamp: dom::now(),
            },
        );
        set_chip("game-best-players", Some(format!("🏆 제안: {best_players}인")));
        dom::alert("제안이 저장되었습니다.");
    });
}
