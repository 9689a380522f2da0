//! Player reviews and the per-game rating aggregate
//!
//! Reviews live in the remote store; this module only holds the rules:
//! what a valid submission looks like, display order, the aggregate written
//! back onto the game record, and the password check for self-service delete.

use serde::{Deserialize, Serialize};

use crate::catalog::GameRecord;
use crate::error::{Result, ShelfError};

pub const MIN_RATING: u32 = 1;
pub const MAX_RATING: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Remote document id, absent until stored
    #[serde(default, skip_serializing)]
    pub id: Option<String>,
    pub game_id: String,
    pub nickname: String,
    /// Plaintext, only compared for delete confirmation
    pub password: String,
    pub rating: u32,
    #[serde(default)]
    pub comment: String,
    /// Milliseconds since the epoch
    pub timestamp: f64,
}

/// Form input before validation
#[derive(Debug, Clone, Default)]
pub struct NewReview {
    pub nickname: String,
    pub password: String,
    pub rating: u32,
    pub comment: String,
}

impl NewReview {
    pub fn validate(self, game_id: &str, timestamp: f64) -> Result<Review> {
        let nickname = self.nickname.trim();
        if nickname.is_empty() {
            return Err(ShelfError::InvalidReview("닉네임을 입력해주세요."));
        }
        if self.password.is_empty() {
            return Err(ShelfError::InvalidReview("비밀번호를 입력해주세요."));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(ShelfError::InvalidReview("평점은 1점에서 10점 사이여야 합니다."));
        }
        Ok(Review {
            id: None,
            game_id: game_id.to_string(),
            nickname: nickname.to_string(),
            password: self.password,
            rating: self.rating,
            comment: self.comment.trim().to_string(),
            timestamp,
        })
    }
}

/// Newest first
pub fn sort_newest_first(reviews: &mut [Review]) {
    reviews.sort_by(|a, b| b.timestamp.total_cmp(&a.timestamp));
}

/// Delete is allowed only with the password the review was written with
pub fn verify_delete(review: &Review, password: &str) -> Result<()> {
    if review.password == password {
        Ok(())
    } else {
        Err(ShelfError::WrongPassword)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingSummary {
    /// Rounded to one decimal
    pub average: f64,
    pub count: u32,
}

impl RatingSummary {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        if reviews.is_empty() {
            return Self::default();
        }
        let total: u32 = reviews.iter().map(|r| r.rating).sum();
        let average = f64::from(total) / reviews.len() as f64;
        Self {
            average: (average * 10.0).round() / 10.0,
            count: reviews.len() as u32,
        }
    }

    /// Aggregate last written onto the record
    pub fn from_record(record: &GameRecord) -> Self {
        Self {
            average: record.average_rating.unwrap_or(0.0),
            count: record.review_count.unwrap_or(0),
        }
    }

    pub fn label(&self) -> String {
        if self.count == 0 {
            "아직 리뷰가 없습니다".to_string()
        } else {
            format!("⭐ {:.1} ({}명)", self.average, self.count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: u32, timestamp: f64) -> Review {
        Review {
            id: None,
            game_id: "catan".into(),
            nickname: "jae".into(),
            password: "pw".into(),
            rating,
            comment: String::new(),
            timestamp,
        }
    }

    #[test]
    fn test_validate() {
        let ok = NewReview {
            nickname: "  jae ".into(),
            password: "pw".into(),
            rating: 8,
            comment: " fun ".into(),
        }
        .validate("catan", 5.0)
        .unwrap();
        assert_eq!(ok.nickname, "jae");
        assert_eq!(ok.comment, "fun");
        assert_eq!(ok.game_id, "catan");

        let bad = |nickname: &str, password: &str, rating| {
            NewReview {
                nickname: nickname.into(),
                password: password.into(),
                rating,
                comment: String::new(),
            }
            .validate("catan", 0.0)
        };
        assert!(matches!(bad(" ", "pw", 5), Err(ShelfError::InvalidReview(_))));
        assert!(matches!(bad("a", "", 5), Err(ShelfError::InvalidReview(_))));
        assert!(matches!(bad("a", "pw", 0), Err(ShelfError::InvalidReview(_))));
        assert!(matches!(bad("a", "pw", 11), Err(ShelfError::InvalidReview(_))));
        assert!(bad("a", "pw", 10).is_ok());
    }

    #[test]
    fn test_summary_rounds() {
        let reviews = vec![review(7, 1.0), review(8, 2.0), review(8, 3.0)];
        let summary = RatingSummary::from_reviews(&reviews);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average, 7.7);
        assert_eq!(summary.label(), "⭐ 7.7 (3명)");

        let empty = RatingSummary::from_reviews(&[]);
        assert_eq!(empty, RatingSummary::default());

        let mut game = GameRecord::new("catan", "Catan");
        game.average_rating = Some(7.7);
        game.review_count = Some(3);
        assert_eq!(RatingSummary::from_record(&game), summary);
    }

    #[test]
    fn test_newest_first_and_delete() {
        let mut reviews = vec![review(5, 1.0), review(6, 3.0), review(7, 2.0)];
        sort_newest_first(&mut reviews);
        let ratings: Vec<u32> = reviews.iter().map(|r| r.rating).collect();
        assert_eq!(ratings, vec![6, 7, 5]);

        assert!(verify_delete(&reviews[0], "pw").is_ok());
        assert!(matches!(
            verify_delete(&reviews[0], "nope"),
            Err(ShelfError::WrongPassword)
        ));
    }
}
