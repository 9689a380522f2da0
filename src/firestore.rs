//! Remote document store codec
//!
//! The catalog and the reviews live in a cloud document database that is
//! reached through its REST interface. Documents arrive as typed values
//! (`{"stringValue": "..."}`, `{"integerValue": "3"}`, ...). This module turns
//! them into plain JSON so the usual serde models (and their lenient field
//! handling) apply, and builds the request URLs and bodies going the other way.
//! No I/O happens here.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, json};

use crate::catalog::GameRecord;
use crate::error::{Result, ShelfError};
use crate::reviews::{RatingSummary, Review};

const API_ROOT: &str = "https://firestore.googleapis.com/v1";
const PAGE_SIZE: u32 = 300;

/// One typed field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(()),
    BooleanValue(bool),
    /// 64-bit integers travel as strings
    IntegerValue(String),
    DoubleValue(f64),
    StringValue(String),
    TimestampValue(String),
    ReferenceValue(String),
    BytesValue(String),
    GeoPointValue(serde_json::Value),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapValue {
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl Value {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::NullValue(()) => serde_json::Value::Null,
            Value::BooleanValue(b) => serde_json::Value::Bool(*b),
            Value::IntegerValue(s) => match s.parse::<i64>() {
                Ok(n) => serde_json::Value::Number(n.into()),
                Err(_) => serde_json::Value::String(s.clone()),
            },
            Value::DoubleValue(f) => Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::StringValue(s)
            | Value::TimestampValue(s)
            | Value::ReferenceValue(s)
            | Value::BytesValue(s) => serde_json::Value::String(s.clone()),
            Value::GeoPointValue(v) => v.clone(),
            Value::ArrayValue(a) => {
                serde_json::Value::Array(a.values.iter().map(Value::to_json).collect())
            }
            Value::MapValue(m) => serde_json::Value::Object(fields_to_json(&m.fields)),
        }
    }

    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::NullValue(()),
            serde_json::Value::Bool(b) => Value::BooleanValue(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::IntegerValue(i.to_string()),
                None => Value::DoubleValue(n.as_f64().unwrap_or(0.0)),
            },
            serde_json::Value::String(s) => Value::StringValue(s.clone()),
            serde_json::Value::Array(items) => Value::ArrayValue(ArrayValue {
                values: items.iter().map(Value::from_json).collect(),
            }),
            serde_json::Value::Object(map) => Value::MapValue(MapValue {
                fields: fields_from_json(map),
            }),
        }
    }
}

fn fields_to_json(fields: &BTreeMap<String, Value>) -> Map<String, serde_json::Value> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), v.to_json()))
        .collect()
}

fn fields_from_json(map: &Map<String, serde_json::Value>) -> BTreeMap<String, Value> {
    map.iter()
        .map(|(k, v)| (k.clone(), Value::from_json(v)))
        .collect()
}

/// A stored document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Full resource name, ending in the document id
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl Document {
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    /// Fields as plain JSON, with the document id under `"id"`
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = fields_to_json(&self.fields);
        map.insert("id".into(), serde_json::Value::String(self.id().to_string()));
        serde_json::Value::Object(map)
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.to_json())?)
    }
}

/// Body of a list-documents response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage {
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl ListPage {
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Game records on this page; undecodable documents are skipped
    pub fn games(&self) -> Vec<GameRecord> {
        decode_all(&self.documents)
    }
}

#[derive(Debug, Deserialize)]
struct QueryRow {
    #[serde(default)]
    document: Option<Document>,
}

/// Documents from a run-query response (an array of rows, some without a document)
pub fn parse_query(json: &str) -> Result<Vec<Document>> {
    let rows: Vec<QueryRow> = serde_json::from_str(json)?;
    Ok(rows.into_iter().filter_map(|r| r.document).collect())
}

/// Reviews from a run-query response, each carrying its document id
pub fn reviews_from_query(json: &str) -> Result<Vec<Review>> {
    Ok(decode_all(&parse_query(json)?))
}

fn decode_all<T: DeserializeOwned>(documents: &[Document]) -> Vec<T> {
    documents
        .iter()
        .filter_map(|doc| match doc.decode() {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Skipping document {}: {e}", doc.id());
                None
            }
        })
        .collect()
}

/// Request body holding only `fields`
pub fn fields_body<T: Serialize>(value: &T) -> Result<serde_json::Value> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(json!({ "fields": fields_from_json(&map) })),
        other => Err(ShelfError::Remote(format!("expected an object, got {other}"))),
    }
}

pub fn review_body(review: &Review) -> Result<serde_json::Value> {
    fields_body(review)
}

/// Aggregate fields written back to the game document
pub fn rating_body(summary: &RatingSummary) -> serde_json::Value {
    json!({
        "fields": {
            "averageRating": Value::DoubleValue(summary.average),
            "reviewCount": Value::IntegerValue(summary.count.to_string()),
        }
    })
}

/// Reviews of one game, matched on `gameId`
pub fn reviews_query(collection: &str, game_id: &str) -> serde_json::Value {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "where": {
                "fieldFilter": {
                    "field": { "fieldPath": "gameId" },
                    "op": "EQUAL",
                    "value": Value::StringValue(game_id.to_string()),
                }
            }
        }
    })
}

/// URL builder for one project's default database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    project_id: String,
}

impl Endpoint {
    pub fn new(project_id: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
        }
    }

    fn documents_root(&self) -> String {
        format!(
            "{API_ROOT}/projects/{}/databases/(default)/documents",
            self.project_id
        )
    }

    pub fn list_url(&self, collection: &str, page_token: Option<&str>) -> String {
        let mut url = format!(
            "{}/{collection}?pageSize={PAGE_SIZE}",
            self.documents_root()
        );
        if let Some(token) = page_token {
            url.push_str("&pageToken=");
            url.push_str(&urlencoding::encode(token));
        }
        url
    }

    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}/{collection}", self.documents_root())
    }

    pub fn document_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/{collection}/{}",
            self.documents_root(),
            urlencoding::encode(id)
        )
    }

    /// PATCH target touching only `fields`
    pub fn update_url(&self, collection: &str, id: &str, fields: &[&str]) -> String {
        let mask: Vec<String> = fields
            .iter()
            .map(|f| format!("updateMask.fieldPaths={f}"))
            .collect();
        format!("{}?{}", self.document_url(collection, id), mask.join("&"))
    }

    pub fn query_url(&self) -> String {
        format!("{}:runQuery", self.documents_root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "documents": [
            {
                "name": "projects/p/databases/(default)/documents/games/catan",
                "fields": {
                    "title": {"stringValue": "Catan"},
                    "minPlayers": {"integerValue": "3"},
                    "maxPlayers": {"integerValue": "4"},
                    "bestPlayers": {"integerValue": "0"},
                    "difficulty": {"doubleValue": 2.3},
                    "playTime": {"stringValue": "60-90"},
                    "image": {"arrayValue": {"values": [{"stringValue": "catan.jpg"}]}},
                    "genre": {"nullValue": null}
                }
            },
            {
                "name": "projects/p/databases/(default)/documents/games/weird",
                "fields": {"title": {"mapValue": {"fields": {}}}}
            }
        ],
        "nextPageToken": "tok"
    }"#;

    #[test]
    fn test_list_page_to_games() {
        let page = ListPage::parse(PAGE).unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("tok"));
        let games = page.games();
        assert_eq!(games.len(), 1);
        let catan = &games[0];
        assert_eq!(catan.id, "catan");
        assert_eq!(catan.min_players, 3);
        assert_eq!(catan.best_players, None);
        assert_eq!(catan.difficulty, 2.3);
        assert_eq!(catan.images, vec!["catan.jpg"]);
        assert_eq!(catan.genre, None);
    }

    #[test]
    fn test_query_rows() {
        let json = r#"[
            {"document": {
                "name": "projects/p/databases/(default)/documents/reviews/r1",
                "fields": {
                    "gameId": {"stringValue": "catan"},
                    "nickname": {"stringValue": "jae"},
                    "password": {"stringValue": "pw"},
                    "rating": {"integerValue": "9"},
                    "comment": {"stringValue": "great"},
                    "timestamp": {"integerValue": "1700000000000"}
                }
            }, "readTime": "2024-01-01T00:00:00Z"},
            {"readTime": "2024-01-01T00:00:00Z"}
        ]"#;
        let reviews = reviews_from_query(json).unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].id.as_deref(), Some("r1"));
        assert_eq!(reviews[0].rating, 9);
        assert_eq!(reviews[0].timestamp, 1_700_000_000_000.0);
    }

    #[test]
    fn test_review_body_types() {
        let review = Review {
            id: Some("ignored".into()),
            game_id: "catan".into(),
            nickname: "jae".into(),
            password: "pw".into(),
            rating: 7,
            comment: String::new(),
            timestamp: 12.5,
        };
        let body = review_body(&review).unwrap();
        assert_eq!(body["fields"]["rating"], json!({"integerValue": "7"}));
        assert_eq!(body["fields"]["timestamp"], json!({"doubleValue": 12.5}));
        assert_eq!(body["fields"]["gameId"], json!({"stringValue": "catan"}));
        assert!(body["fields"].get("id").is_none());
    }

    #[test]
    fn test_urls() {
        let endpoint = Endpoint::new("proj");
        assert_eq!(
            endpoint.list_url("games", Some("a b")),
            "https://firestore.googleapis.com/v1/projects/proj/databases/(default)/documents/games?pageSize=300&pageToken=a%20b"
        );
        assert_eq!(
            endpoint.update_url("games", "catan", &["averageRating", "reviewCount"]),
            "https://firestore.googleapis.com/v1/projects/proj/databases/(default)/documents/games/catan?updateMask.fieldPaths=averageRating&updateMask.fieldPaths=reviewCount"
        );
        assert!(endpoint.query_url().ends_with("/documents:runQuery"));
    }

    #[test]
    fn test_rating_body() {
        let body = rating_body(&RatingSummary { average: 7.7, count: 3 });
        assert_eq!(body["fields"]["reviewCount"], json!({"integerValue": "3"}));
        assert_eq!(body["fields"]["averageRating"], json!({"doubleValue": 7.7}));
        let query = reviews_query("reviews", "catan");
        assert_eq!(
            query["structuredQuery"]["where"]["fieldFilter"]["value"],
            json!({"stringValue": "catan"})
        );
    }
}
