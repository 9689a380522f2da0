//! Detail page view model

use crate::catalog::{Catalog, GameRecord, gradient_for, resolve_image};
use crate::consts::SITE_TITLE;
use crate::reviews::RatingSummary;
use crate::wishlist::Wishlist;

#[derive(Debug, Clone, PartialEq)]
pub struct GameDetail {
    pub id: String,
    pub title: String,
    /// Document title
    pub page_title: String,
    pub gradient: &'static str,
    pub images: Vec<String>,
    pub icon: Option<String>,
    pub genre: Option<String>,
    pub mechanism: Option<String>,
    pub players: String,
    pub best_players: Option<u32>,
    pub play_time: String,
    pub difficulty: String,
    /// Stored rich text, rendered as-is
    pub description_html: String,
    pub expansions: Vec<String>,
    pub rating: RatingSummary,
    pub wished: bool,
}

impl GameDetail {
    fn new(record: &GameRecord, wishlist: &Wishlist, image_dir: &str) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            page_title: format!("{} - {}", record.title, SITE_TITLE),
            gradient: gradient_for(&record.id),
            images: record
                .images
                .iter()
                .map(|i| resolve_image(i, image_dir))
                .collect(),
            icon: record.icon.clone(),
            genre: record.genre.clone().filter(|g| !g.is_empty()),
            mechanism: record.mechanism.clone().filter(|m| !m.is_empty()),
            players: record.player_range_label(),
            best_players: record.best_players,
            play_time: record.play_time.clone(),
            difficulty: record.difficulty_label(),
            description_html: record.description.clone(),
            expansions: record.expansions().into_iter().map(str::to_string).collect(),
            rating: RatingSummary::from_record(record),
            wished: wishlist.contains(&record.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Found(Box<GameDetail>),
    /// Missing or unknown id: the page shows a message and hides the hero
    NotFound,
}

impl DetailView {
    pub fn build(catalog: &Catalog, id: Option<&str>, wishlist: &Wishlist, image_dir: &str) -> Self {
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            log::warn!("Detail page opened without an id");
            return DetailView::NotFound;
        };
        match catalog.require(id) {
            Ok(record) => DetailView::Found(Box::new(GameDetail::new(record, wishlist, image_dir))),
            Err(e) => {
                log::warn!("Detail page: {e}");
                DetailView::NotFound
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found() {
        let mut game = GameRecord::new("catan", "Catan");
        game.genre = Some("Strategy".into());
        game.mechanism = Some(String::new());
        game.expansion = Some("Seafarers, Cities & Knights".into());
        game.images = vec!["catan.jpg".into(), "https://x/y.png".into()];
        game.average_rating = Some(8.25);
        game.review_count = Some(4);
        let catalog = Catalog::from_records(vec![game]);

        let DetailView::Found(detail) =
            DetailView::build(&catalog, Some("catan"), &Wishlist::from_ids(["catan"]), "img")
        else {
            panic!("expected detail");
        };
        assert_eq!(detail.page_title, format!("Catan - {SITE_TITLE}"));
        assert_eq!(detail.genre.as_deref(), Some("Strategy"));
        assert_eq!(detail.mechanism, None);
        assert_eq!(detail.expansions, vec!["Seafarers", "Cities & Knights"]);
        assert_eq!(detail.images, vec!["img/catan.jpg", "https://x/y.png"]);
        assert_eq!(detail.rating.count, 4);
        assert!(detail.wished);
    }

    #[test]
    fn test_not_found() {
        let catalog = Catalog::from_records(vec![GameRecord::new("a", "A")]);
        let wishlist = Wishlist::new();
        assert_eq!(DetailView::build(&catalog, None, &wishlist, "img"), DetailView::NotFound);
        assert_eq!(DetailView::build(&catalog, Some(""), &wishlist, "img"), DetailView::NotFound);
        assert_eq!(DetailView::build(&catalog, Some("zz"), &wishlist, "img"), DetailView::NotFound);
    }
}
