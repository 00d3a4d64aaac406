//! Client for the third-party movie-metadata API (OMDb).
//!
//! A plain request/response passthrough: free-text title in, poster /
//! genre / year / plot / rating out. The recommendation core has no
//! dependency on this; it only backs the movie-search page.

use crate::error::{AppError, AppResult};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Metadata returned to the caller for one looked-up title.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovieMetadata {
    pub title: String,
    pub year: String,
    pub genre: String,
    pub plot: String,
    pub poster: String,
    /// IMDb rating on a 0-10 scale; None when the upstream has no rating.
    pub imdb_rating: Option<f32>,
}

/// Upstream response shape. OMDb signals misses in-band with
/// `Response: "False"` plus an `Error` message, not with an HTTP status.
#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
}

#[derive(Clone)]
pub struct OmdbClient {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl OmdbClient {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url,
            api_key,
        }
    }

    /// Look up a title. Upstream "not found" maps to `AppError::NotFound`,
    /// transport problems to a gateway error.
    pub async fn lookup(&self, title: &str) -> AppResult<MovieMetadata> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::ExternalApi("OMDb API key not configured".to_string()))?;

        debug!(title, "Looking up movie metadata");
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("t", title), ("apikey", api_key)])
            .send()
            .await?
            .error_for_status()?;

        let body: OmdbResponse = response.json().await?;
        parse_metadata(body, title)
    }
}

fn parse_metadata(body: OmdbResponse, requested_title: &str) -> AppResult<MovieMetadata> {
    if body.response != "True" {
        let reason = body
            .error
            .unwrap_or_else(|| format!("No movie with title '{}'", requested_title));
        return Err(AppError::NotFound(reason));
    }

    let na = |field: Option<String>| field.unwrap_or_else(|| "N/A".to_string());
    Ok(MovieMetadata {
        title: na(body.title),
        year: na(body.year),
        genre: na(body.genre),
        plot: na(body.plot),
        poster: na(body.poster),
        // "N/A" is OMDb's marker for an unrated title.
        imdb_rating: body.imdb_rating.and_then(|r| r.parse().ok()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_successful_response() {
        let body: OmdbResponse = serde_json::from_str(
            r#"{
                "Title": "Toy Story",
                "Year": "1995",
                "Genre": "Animation, Adventure, Comedy",
                "Plot": "A cowboy doll is profoundly threatened.",
                "Poster": "https://example.com/poster.jpg",
                "imdbRating": "8.3",
                "Response": "True"
            }"#,
        )
        .unwrap();

        let metadata = parse_metadata(body, "Toy Story").unwrap();
        assert_eq!(metadata.title, "Toy Story");
        assert_eq!(metadata.imdb_rating, Some(8.3));
    }

    #[test]
    fn test_parse_miss_is_not_found() {
        let body: OmdbResponse = serde_json::from_str(
            r#"{"Response": "False", "Error": "Movie not found!"}"#,
        )
        .unwrap();

        let err = parse_metadata(body, "Nonexistent Film (1900)").unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Movie not found!"));
    }

    #[test]
    fn test_parse_unrated_title() {
        let body: OmdbResponse = serde_json::from_str(
            r#"{"Title": "Obscure", "imdbRating": "N/A", "Response": "True"}"#,
        )
        .unwrap();

        let metadata = parse_metadata(body, "Obscure").unwrap();
        assert_eq!(metadata.imdb_rating, None);
        assert_eq!(metadata.year, "N/A");
    }

    #[tokio::test]
    async fn test_lookup_without_api_key() {
        let client = OmdbClient::new("http://localhost:1".to_string(), None);
        let err = client.lookup("Toy Story").await.unwrap_err();
        assert!(matches!(err, AppError::ExternalApi(_)));
    }
}
