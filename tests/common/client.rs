//! HTTP client helpers for e2e tests.

use reqwest::{RequestBuilder, Response};
use serde_json::json;

/// Thin wrapper around `reqwest` that targets a [`TestServer`](super::TestServer)
/// and attaches the caller's token. With the passthrough identity source a
/// token is simply the user id string.
pub struct TestClient {
    base_url: String,
    client: reqwest::Client,
    token: Option<String>,
}

impl TestClient {
    /// An unauthenticated client.
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
            token: None,
        }
    }

    /// A client acting as the given user.
    pub fn as_user(base_url: String, user_id: &str) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
            token: Some(user_id.to_owned()),
        }
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn get(&self, path: &str) -> Response {
        self.with_auth(self.client.get(format!("{}{}", self.base_url, path)))
            .send()
            .await
            .expect("request failed")
    }

    async fn post(&self, path: &str, body: Option<serde_json::Value>) -> Response {
        let mut builder = self.client.post(format!("{}{}", self.base_url, path));
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        self.with_auth(builder).send().await.expect("request failed")
    }

    pub async fn home(&self) -> Response {
        self.get("/").await
    }

    pub async fn create_room(&self, body: serde_json::Value) -> Response {
        self.post("/v1/rooms", Some(body)).await
    }

    pub async fn list_rooms(&self) -> Response {
        self.get("/v1/rooms").await
    }

    pub async fn get_room(&self, room_id: &str) -> Response {
        self.get(&format!("/v1/rooms/{}", room_id)).await
    }

    pub async fn join_room(&self, room_id: &str) -> Response {
        self.post(&format!("/v1/rooms/{}/join", room_id), None).await
    }

    pub async fn start_voting(&self, room_id: &str) -> Response {
        self.post(&format!("/v1/rooms/{}/start-voting", room_id), None)
            .await
    }

    pub async fn cast_vote(&self, room_id: &str, item_id: &str, is_like: bool) -> Response {
        self.post(
            "/v1/votes",
            Some(json!({
                "room_id": room_id,
                "item_id": item_id,
                "is_like": is_like,
            })),
        )
        .await
    }

    pub async fn get_results(&self, room_id: &str) -> Response {
        self.get(&format!("/v1/rooms/{}/results", room_id)).await
    }

    pub async fn get_candidates(
        &self,
        room_id: &str,
        skip: Option<usize>,
        limit: Option<usize>,
    ) -> Response {
        let mut path = format!("/v1/rooms/{}/candidates", room_id);
        let mut params = Vec::new();
        if let Some(skip) = skip {
            params.push(format!("skip={}", skip));
        }
        if let Some(limit) = limit {
            params.push(format!("limit={}", limit));
        }
        if !params.is_empty() {
            path = format!("{}?{}", path, params.join("&"));
        }
        self.get(&path).await
    }

    pub async fn handoff(&self, room_id: &str) -> Response {
        self.post(&format!("/v1/rooms/{}/handoff", room_id), None)
            .await
    }

    pub async fn get_permissions(&self, user_id: Option<&str>) -> Response {
        let path = match user_id {
            Some(user_id) => format!("/v1/permissions?user_id={}", user_id),
            None => "/v1/permissions".to_owned(),
        };
        self.get(&path).await
    }

    pub async fn collections(&self) -> Response {
        self.get("/v1/library/collections").await
    }

    pub async fn genres(&self) -> Response {
        self.get("/v1/library/genres").await
    }

    pub async fn parental_ratings(&self) -> Response {
        self.get("/v1/library/parental-ratings").await
    }

    pub async fn access_check(&self, collection_ids: Vec<&str>) -> Response {
        self.post(
            "/v1/library/access-check",
            Some(json!({ "collection_ids": collection_ids })),
        )
        .await
    }

    pub async fn playback_info(&self) -> Response {
        self.get("/v1/playback/info").await
    }
}
