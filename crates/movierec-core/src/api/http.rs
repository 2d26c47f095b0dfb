use std::time::Duration;

use serde::de::DeserializeOwned;

use super::{ApiError, ApiFuture, MovieApi, MovieQuery, RecommendRequest, RecommendResponse};
use crate::{Movie, MovieId, MoviePage};

/// [`MovieApi`] backed by a real HTTP server.
#[derive(Debug, Clone)]
pub struct HttpMovieApi {
    client: reqwest::Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpMovieApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self::with_client(client, base_url, timeout)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, timeout: Option<Duration>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join the configured origin with an absolute API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder, path: &str) -> Result<reqwest::Response, ApiError> {
        let request = match self.timeout {
            Some(t) => request.timeout(t),
            None => request,
        };
        let resp = request.send().await.map_err(|e| ApiError::Transport {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        check_status(resp, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!(path, "GET");
        let resp = self.send(self.client.get(self.url(path)), path).await?;
        decode_json(resp, path).await
    }
}

/// Turn a non-2xx response into [`ApiError::Status`].
pub fn check_status(resp: reqwest::Response, path: &str) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(ApiError::Status {
            path: path.to_string(),
            status: status.as_u16(),
        })
    }
}

async fn decode_json<T: DeserializeOwned>(resp: reqwest::Response, path: &str) -> Result<T, ApiError> {
    let bytes = resp.bytes().await.map_err(|e| ApiError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })
}

impl MovieApi for HttpMovieApi {
    fn list_movies<'a>(&'a self, query: &'a MovieQuery) -> ApiFuture<'a, MoviePage> {
        Box::pin(async move { self.get_json(&query.to_path()).await })
    }

    fn get_movie(&self, id: MovieId) -> ApiFuture<'_, Movie> {
        Box::pin(async move { self.get_json(&format!("/movies/{}", id)).await })
    }

    fn get_poster(&self, id: MovieId) -> ApiFuture<'_, Vec<u8>> {
        Box::pin(async move {
            let path = format!("/movies/{}/poster", id);
            let resp = self.send(self.client.get(self.url(&path)), &path).await?;
            let bytes = resp.bytes().await.map_err(|e| ApiError::Decode {
                path: path.clone(),
                message: e.to_string(),
            })?;
            Ok(bytes.to_vec())
        })
    }

    fn recommend<'a>(&'a self, request: &'a RecommendRequest) -> ApiFuture<'a, RecommendResponse> {
        Box::pin(async move {
            let path = "/recommend";
            tracing::debug!(known = ?request.known_movies, top_k = request.top_k, "POST /recommend");
            let resp = self
                .send(self.client.post(self.url(path)).json(request), path)
                .await?;
            decode_json(resp, path).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let api = HttpMovieApi::new("http://localhost:8000/", None);
        assert_eq!(api.base_url(), "http://localhost:8000");
        assert_eq!(api.url("/movies/3"), "http://localhost:8000/movies/3");
    }

    #[test]
    fn ok_on_200() {
        let http_resp = http::Response::builder().status(200).body("").unwrap();
        let resp = reqwest::Response::from(http_resp);
        assert!(check_status(resp, "/movies/1").is_ok());
    }

    #[test]
    fn status_error_on_404() {
        let http_resp = http::Response::builder().status(404).body("").unwrap();
        let resp = reqwest::Response::from(http_resp);
        let err = check_status(resp, "/movies/1").unwrap_err();
        match err {
            ApiError::Status { path, status } => {
                assert_eq!(path, "/movies/1");
                assert_eq!(status, 404);
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn decodes_movie_page() {
        let body = r#"{"movies": [{"id": 1, "title": "Toy Story", "year": "1995", "genres": "Animation"}], "total": 1, "pages": 1}"#;
        let http_resp = http::Response::builder().status(200).body(body).unwrap();
        let resp = reqwest::Response::from(http_resp);
        let page: MoviePage = decode_json(resp, "/movies").await.unwrap();
        assert_eq!(page.pages, 1);
        assert_eq!(page.movies[0].title, "Toy Story");
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let http_resp = http::Response::builder().status(200).body("{not json").unwrap();
        let resp = reqwest::Response::from(http_resp);
        let err = decode_json::<MoviePage>(resp, "/movies").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }
}
