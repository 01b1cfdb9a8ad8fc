//! Google Vertex AI client.
//!
//! rig-core has no Vertex backend, so this module carries the minimum needed
//! to talk to the Gemini publisher endpoints on Vertex: service-account
//! credentials, an OAuth2 JWT-bearer token source with an in-memory cache,
//! and the `generateContent` / `predict` REST calls.

use std::path::PathBuf;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::config::Settings;
use crate::constants;
use crate::error::ProviderError;

/// Service-account key fields needed for the JWT-bearer flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl ServiceAccountKey {
    /// Decodes a base64-encoded service-account JSON document.
    pub fn from_base64(encoded: &str) -> Result<Self, ProviderError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| ProviderError::InvalidCredentials(format!("not valid base64: {e}")))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ProviderError::InvalidCredentials(format!("not a service-account JSON: {e}"))
        })
    }

    fn token_uri(&self) -> &str {
        self.token_uri.as_deref().unwrap_or(constants::GOOGLE_TOKEN_URI)
    }
}

/// Where the service-account key comes from.
#[derive(Debug, Clone)]
pub enum VertexAuth {
    /// Decoded from `VERTEX_CREDENTIALS` at startup.
    Inline(ServiceAccountKey),
    /// Read from disk the first time a token is needed.
    KeyFile(PathBuf),
}

impl VertexAuth {
    /// Inline credentials when configured, otherwise the key file.
    ///
    /// # Errors
    ///
    /// Malformed inline credentials fail here so startup fails eagerly.
    pub fn from_settings(settings: &Settings) -> Result<Self, ProviderError> {
        match settings.vertex_credentials.as_deref() {
            Some(encoded) => Ok(Self::Inline(ServiceAccountKey::from_base64(encoded)?)),
            None => Ok(Self::KeyFile(PathBuf::from(
                settings
                    .vertex_key_file
                    .as_deref()
                    .unwrap_or(constants::VERTEX_DEFAULT_KEY_FILE),
            ))),
        }
    }

    async fn key(&self) -> Result<ServiceAccountKey, ProviderError> {
        match self {
            Self::Inline(key) => Ok(key.clone()),
            Self::KeyFile(path) => {
                let contents = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| ProviderError::KeyFile {
                        path: path.clone(),
                        source,
                    })?;
                serde_json::from_str(&contents).map_err(|e| {
                    ProviderError::Auth(format!(
                        "key file {path:?} is not a service-account JSON: {e}"
                    ))
                })
            }
        }
    }
}

/// Supplies bearer tokens for Vertex requests.
#[async_trait::async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String, ProviderError>;
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: i64,
}

/// Mints access tokens from a service-account key and caches them until
/// shortly before they expire.
pub struct ServiceAccountTokenSource {
    auth: VertexAuth,
    http: reqwest::Client,
    cache: Mutex<Option<CachedToken>>,
}

impl ServiceAccountTokenSource {
    pub fn new(auth: VertexAuth, http: reqwest::Client) -> Self {
        Self {
            auth,
            http,
            cache: Mutex::new(None),
        }
    }

    async fn fetch(&self) -> Result<CachedToken, ProviderError> {
        let key = self.auth.key().await?;
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            iss: &key.client_email,
            scope: constants::VERTEX_SCOPE,
            aud: key.token_uri(),
            iat: now,
            exp: now + constants::JWT_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.typ = Some("JWT".to_string());
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| ProviderError::Auth(format!("invalid RSA private key: {e}")))?;
        let assertion = encode(&header, &claims, &signing_key)
            .map_err(|e| ProviderError::Auth(format!("failed to sign JWT: {e}")))?;

        let form = [
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", assertion.as_str()),
        ];
        let resp = self.http.post(key.token_uri()).form(&form).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Auth(format!("token endpoint returned {status}: {body}")));
        }
        let token: TokenResponse = resp.json().await?;
        tracing::debug!(expires_in = token.expires_in, "refreshed vertex access token");

        Ok(CachedToken {
            token: token.access_token,
            expires_at: now + token.expires_in,
        })
    }
}

#[async_trait::async_trait]
impl TokenSource for ServiceAccountTokenSource {
    async fn access_token(&self) -> Result<String, ProviderError> {
        // Held across the fetch so concurrent callers wait for one refresh.
        let mut cache = self.cache.lock().await;
        let now = chrono::Utc::now().timestamp();
        if let Some(cached) = cache.as_ref() {
            if cached.expires_at - constants::TOKEN_REFRESH_MARGIN_SECS > now {
                return Ok(cached.token.clone());
            }
        }
        let fresh = self.fetch().await?;
        let token = fresh.token.clone();
        *cache = Some(fresh);
        Ok(token)
    }
}

/// Client for the Gemini publisher models on Vertex AI.
#[derive(Clone)]
pub struct VertexClient {
    base_url: String,
    http: reqwest::Client,
    tokens: Arc<dyn TokenSource>,
}

impl std::fmt::Debug for VertexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VertexClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Publisher endpoint for a project and location.
pub fn vertex_base_url(project: &str, location: &str) -> String {
    format!(
        "{}/projects/{project}/locations/{location}/publishers/google",
        constants::VERTEX_API_ROOT
    )
}

impl VertexClient {
    pub fn new(
        base_url: impl Into<String>,
        http: reqwest::Client,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            tokens,
        }
    }

    /// Builds the client from settings without touching the network.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidCredentials`] if `VERTEX_CREDENTIALS`
    /// is set but is not base64-encoded service-account JSON.
    pub fn from_settings(settings: &Settings) -> Result<Self, ProviderError> {
        let auth = VertexAuth::from_settings(settings)?;
        let project = settings
            .vertex_project
            .as_deref()
            .unwrap_or(constants::VERTEX_DEFAULT_PROJECT);
        let location = settings
            .vertex_location
            .as_deref()
            .unwrap_or(constants::VERTEX_DEFAULT_LOCATION);
        let http = reqwest::Client::new();
        let tokens = Arc::new(ServiceAccountTokenSource::new(auth, http.clone()));
        Ok(Self::new(vertex_base_url(project, location), http, tokens))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post(&self, model: &str, method: &str, body: &Value) -> Result<Value, ProviderError> {
        let token = self.tokens.access_token().await?;
        let url = format!("{}/models/{}:{}", self.base_url, model, method);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Response(format!("{method} returned {status}: {text}")));
        }
        Ok(resp.json().await?)
    }

    /// Single-turn `generateContent`; returns the concatenated candidate text.
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
        preamble: Option<&str>,
    ) -> Result<String, ProviderError> {
        let mut body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": { "maxOutputTokens": constants::MAX_TOKENS },
        });
        if let Some(sys) = preamble {
            body["systemInstruction"] = json!({ "parts": [{ "text": sys }] });
        }

        let resp: GenerateContentResponse =
            serde_json::from_value(self.post(model, "generateContent", &body).await?)
                .map_err(|e| ProviderError::Response(e.to_string()))?;

        let candidate = resp
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Response("no candidates returned".to_string()))?;
        Ok(candidate
            .content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .join(""))
    }

    /// Text embeddings through `predict`, one vector per input.
    pub async fn embed(
        &self,
        model: &str,
        texts: &[String],
    ) -> Result<Vec<Vec<f64>>, ProviderError> {
        let instances: Vec<Value> = texts.iter().map(|t| json!({ "content": t })).collect();
        let body = json!({ "instances": instances });

        let value = self.post(model, "predict", &body).await?;
        let resp: PredictResponse =
            serde_json::from_value(value).map_err(|e| ProviderError::Response(e.to_string()))?;
        if resp.predictions.len() != texts.len() {
            return Err(ProviderError::Response(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                resp.predictions.len()
            )));
        }
        Ok(resp
            .predictions
            .into_iter()
            .map(|p| p.embeddings.values)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    embeddings: PredictionEmbeddings,
}

#[derive(Debug, Deserialize)]
struct PredictionEmbeddings {
    values: Vec<f64>,
}
