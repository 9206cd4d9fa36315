use reqwest::{Method, Request, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::ApiError;
use super::basic::BasicClient;
use super::client::HttpClient;
use super::types::{
    ChatQuery, ChatResponse, RegisterRequest, TokenResponse, TrendsResponse, UserProfile,
    UserUpdate,
};
use crate::session::Session;

/// Client for the air-quality backend (auth, profile, trends, chat).
pub struct ApiClient<C> {
    base_url: Url,
    http: C,
    // builds requests only; they are sent through `http`
    requests: reqwest::Client,
}

impl ApiClient<BasicClient> {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_client(base_url, BasicClient::new()?)
    }
}

impl<C: HttpClient> ApiClient<C> {
    pub fn with_client(base_url: &str, http: C) -> Result<Self, ApiError> {
        // a trailing slash keeps Url::join from dropping the last path segment
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            base_url,
            http,
            requests: reqwest::Client::new(),
        })
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl {
                url: path.to_string(),
                message: e.to_string(),
            })
    }

    /// `POST /api/auth/register`. The created user is returned as raw JSON.
    #[tracing::instrument(skip(self, body), fields(username = %body.username))]
    pub async fn register(&self, body: &RegisterRequest) -> Result<serde_json::Value, ApiError> {
        let req = self
            .requests
            .post(self.endpoint("api/auth/register")?)
            .json(body)
            .build()?;
        self.send_json("register", req).await
    }

    /// `POST /api/auth/login` with form credentials. Returns a fresh session.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let req = self
            .requests
            .post(self.endpoint("api/auth/login")?)
            .form(&[("username", username), ("password", password)])
            .build()?;

        let token: TokenResponse = self.send_json("login", req).await?;
        debug!(token_type = ?token.token_type, "Login succeeded");
        Ok(Session::create(token.access_token))
    }

    /// `GET /api/users/me`. A 401 invalidates the session.
    pub async fn me(&self, session: &mut Session) -> Result<UserProfile, ApiError> {
        let req = self.authorized(session, Method::GET, "api/users/me")?.build()?;
        self.profile_request(session, req).await
    }

    /// `PUT /api/users/me` with the fields to change. The updated profile
    /// replaces the one cached on the session; a 401 invalidates it.
    #[tracing::instrument(skip_all)]
    pub async fn update_me(
        &self,
        session: &mut Session,
        update: &UserUpdate,
    ) -> Result<UserProfile, ApiError> {
        let req = self
            .authorized(session, Method::PUT, "api/users/me")?
            .json(update)
            .build()?;
        self.profile_request(session, req).await
    }

    async fn profile_request(
        &self,
        session: &mut Session,
        req: Request,
    ) -> Result<UserProfile, ApiError> {
        match self.send_json::<UserProfile>("profile", req).await {
            Ok(user) => {
                session.set_user(user.clone());
                Ok(user)
            }
            Err(e) => {
                if e.status() == Some(StatusCode::UNAUTHORIZED) {
                    warn!("Token rejected, clearing session");
                    session.invalidate();
                }
                Err(e)
            }
        }
    }

    /// `GET /api/data/trends/{zip}`.
    #[tracing::instrument(skip(self, session))]
    pub async fn trends(
        &self,
        session: &Session,
        zip_code: &str,
    ) -> Result<TrendsResponse, ApiError> {
        let path = format!("api/data/trends/{zip_code}");
        let req = self.authorized(session, Method::GET, &path)?.build()?;
        self.send_json("trends", req).await
    }

    /// `POST /chat/`. Public, no session needed.
    #[tracing::instrument(skip(self, query), fields(zip = ?query.zip_code))]
    pub async fn chat(&self, query: &ChatQuery) -> Result<ChatResponse, ApiError> {
        let req = self
            .requests
            .post(self.endpoint("chat/")?)
            .json(query)
            .build()?;
        self.send_json("chat", req).await
    }

    fn authorized(
        &self,
        session: &Session,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder, ApiError> {
        let token = session.token().ok_or(ApiError::NotAuthenticated)?;
        Ok(self
            .requests
            .request(method, self.endpoint(path)?)
            .bearer_auth(token))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        context: &'static str,
        req: Request,
    ) -> Result<T, ApiError> {
        debug!(method = %req.method(), url = %req.url(), "Sending request");
        let response = self.http.execute(req).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                context,
                status,
                message: error_detail(&body),
            });
        }

        Ok(response.json().await?)
    }
}

/// Pulls `detail` out of a JSON error body, falling back to the raw text.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
