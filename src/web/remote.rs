//! Fetch transport for the remote document store

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use super::dom;
use crate::catalog::Catalog;
use crate::config::ShelfConfig;
use crate::error::{Result, ShelfError};
use crate::firestore::{self, Endpoint, ListPage};
use crate::reviews::{RatingSummary, Review, sort_newest_first};

/// Send one request and return the body text
async fn send(method: &str, url: &str, body: Option<&serde_json::Value>) -> Result<String> {
    let init = RequestInit::new();
    init.set_method(method);
    if let Some(body) = body {
        init.set_body(&JsValue::from_str(&body.to_string()));
    }
    let request = Request::new_with_str_and_init(url, &init).map_err(dom::fetch_error)?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(dom::fetch_error)?;
    }

    let response: Response = JsFuture::from(dom::window().fetch_with_request(&request))
        .await
        .map_err(dom::fetch_error)?
        .dyn_into()
        .map_err(dom::fetch_error)?;
    if !response.ok() {
        return Err(ShelfError::Fetch(format!(
            "{method} {url}: HTTP {}",
            response.status()
        )));
    }
    let text = JsFuture::from(response.text().map_err(dom::fetch_error)?)
        .await
        .map_err(dom::fetch_error)?;
    text.as_string()
        .ok_or_else(|| ShelfError::Fetch(format!("{method} {url}: body is not text")))
}

#[derive(Clone)]
pub struct Remote {
    endpoint: Endpoint,
    games: String,
    reviews: String,
}

impl Remote {
    pub fn new(config: &ShelfConfig) -> Self {
        Self {
            endpoint: Endpoint::new(&config.project_id),
            games: config.games_collection.clone(),
            reviews: config.reviews_collection.clone(),
        }
    }

    /// Every game in the collection, following page tokens
    pub async fn fetch_catalog(&self) -> Result<Catalog> {
        let mut records = Vec::new();
        let mut token: Option<String> = None;
        loop {
            let url = self.endpoint.list_url(&self.games, token.as_deref());
            let page = ListPage::parse(&send("GET", &url, None).await?)?;
            records.extend(page.games());
            match page.next_page_token {
                Some(next) if !next.is_empty() => token = Some(next),
                _ => break,
            }
        }
        log::info!("Fetched {} game documents", records.len());
        Ok(Catalog::from_records(records))
    }

    /// Reviews of one game, newest first
    pub async fn reviews(&self, game_id: &str) -> Result<Vec<Review>> {
        let body = firestore::reviews_query(&self.reviews, game_id);
        let json = send("POST", &self.endpoint.query_url(), Some(&body)).await?;
        let mut reviews = firestore::reviews_from_query(&json)?;
        sort_newest_first(&mut reviews);
        Ok(reviews)
    }

    pub async fn add_review(&self, review: &Review) -> Result<()> {
        let body = firestore::review_body(review)?;
        send("POST", &self.endpoint.collection_url(&self.reviews), Some(&body)).await?;
        log::info!("Review added for {}", review.game_id);
        Ok(())
    }

    pub async fn delete_review(&self, review_id: &str) -> Result<()> {
        send("DELETE", &self.endpoint.document_url(&self.reviews, review_id), None).await?;
        log::info!("Review {review_id} deleted");
        Ok(())
    }

    /// Recompute the aggregate from the stored reviews and write it onto
    /// the game document. Last writer wins.
    pub async fn refresh_rating(&self, game_id: &str) -> Result<(Vec<Review>, RatingSummary)> {
        let reviews = self.reviews(game_id).await?;
        let summary = RatingSummary::from_reviews(&reviews);
        let url = self
            .endpoint
            .update_url(&self.games, game_id, &["averageRating", "reviewCount"]);
        send("PATCH", &url, Some(&firestore::rating_body(&summary))).await?;
        Ok((reviews, summary))
    }
}
