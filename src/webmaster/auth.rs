//! OAuth2 service-account token exchange (JWT bearer grant).

use std::cell::RefCell;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SitemapError;
use crate::webmaster::credentials::ServiceAccountKey;

pub const WEBMASTERS_SCOPE: &str = "https://www.googleapis.com/auth/webmasters";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + TimeDelta::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

/// Issues bearer tokens for one service account, reusing them until shortly before expiry.
pub struct TokenSource {
    client: Client,
    client_email: String,
    token_uri: String,
    scope: String,
    key_id: Option<String>,
    signing_key: EncodingKey,
    cached: RefCell<Option<AccessToken>>,
}

impl TokenSource {
    /// Fails with a configuration error when the private key is not a usable RSA PEM.
    pub fn new(client: Client, key: &ServiceAccountKey, scope: &str) -> Result<Self, SitemapError> {
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| SitemapError::Config(format!("Invalid service account private key: {e}")))?;

        Ok(Self {
            client,
            client_email: key.client_email.clone(),
            token_uri: key.token_uri.clone(),
            scope: scope.to_string(),
            key_id: key.private_key_id.clone(),
            signing_key,
            cached: RefCell::new(None),
        })
    }

    pub fn access_token(&self) -> Result<String, SitemapError> {
        let now = Utc::now();
        if let Some(token) = self.cached.borrow().as_ref() {
            if token.is_fresh(now) {
                return Ok(token.value.clone());
            }
        }

        let token = self.exchange(now)?;
        let value = token.value.clone();
        *self.cached.borrow_mut() = Some(token);
        Ok(value)
    }

    fn assertion(&self, now: DateTime<Utc>) -> Result<String, SitemapError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key_id.clone();

        let iat = now.timestamp();
        let claims = Claims {
            iss: self.client_email.clone(),
            scope: self.scope.clone(),
            aud: self.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        encode(&header, &claims, &self.signing_key)
            .map_err(|e| SitemapError::Api(format!("Failed to sign token assertion: {e}")))
    }

    fn exchange(&self, now: DateTime<Utc>) -> Result<AccessToken, SitemapError> {
        let assertion = self.assertion(now)?;
        debug!("requesting access token for {}", self.client_email);

        let resp = self
            .client
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .map_err(|e| SitemapError::Api(format!("Token request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(SitemapError::Api(format!(
                "Token request failed with status {status}: {}",
                body.trim()
            )));
        }

        let body: TokenResponse = resp
            .json()
            .map_err(|e| SitemapError::Api(format!("Failed to parse token response: {e}")))?;

        let expires_at = expiry(now, body.expires_in)?;
        Ok(AccessToken {
            value: body.access_token,
            expires_at,
        })
    }
}

/// Absolute expiry for a token issued at `now`; a missing lifetime means one hour.
fn expiry(now: DateTime<Utc>, expires_in: Option<i64>) -> Result<DateTime<Utc>, SitemapError> {
    let secs = expires_in.unwrap_or(ASSERTION_LIFETIME_SECS);
    TimeDelta::try_seconds(secs)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| SitemapError::Api(format!("Token response has out-of-range expires_in: {secs}")))
}
