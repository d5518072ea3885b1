//! Google Sheets v4 backend authenticated with a service account

use chrono::Utc;
use futures::future::BoxFuture;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::{Rows, SheetStore, SheetTarget};
use crate::error::StoreError;

pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Service account credentials supplied out-of-band
#[derive(Clone)]
pub struct ServiceAccount {
    pub client_email: String,
    pub private_key: String,
}

impl ServiceAccount {
    /// Build credentials from environment-style values, where the PEM key
    /// usually arrives with its newlines escaped as `\n`
    pub fn new(client_email: impl Into<String>, private_key: &str) -> Self {
        Self {
            client_email: client_email.into(),
            private_key: private_key.replace("\\n", "\n"),
        }
    }
}

impl std::fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .finish()
    }
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
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Option<Vec<Vec<serde_json::Value>>>,
}

#[derive(Debug)]
pub struct GoogleSheetsStore {
    http: Client,
    account: ServiceAccount,
    token_url: String,
    api_base: String,
}

impl GoogleSheetsStore {
    pub fn new(account: ServiceAccount) -> Self {
        Self::with_endpoints(account, DEFAULT_TOKEN_URL, DEFAULT_API_BASE)
    }

    /// Point the store at alternative token and API endpoints
    pub fn with_endpoints(
        account: ServiceAccount,
        token_url: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            account,
            token_url: token_url.into(),
            api_base: api_base.into(),
        }
    }

    /// Signed JWT assertion for the token endpoint
    fn assertion(&self, issued_at: i64) -> Result<String, StoreError> {
        let key = EncodingKey::from_rsa_pem(self.account.private_key.as_bytes())
            .map_err(|e| StoreError::Credentials(e.to_string()))?;
        let claims = Claims {
            iss: &self.account.client_email,
            scope: SPREADSHEETS_SCOPE,
            aud: &self.token_url,
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| StoreError::Credentials(e.to_string()))
    }

    async fn access_token(&self) -> Result<String, StoreError> {
        let assertion = self.assertion(Utc::now().timestamp())?;

        let response = self
            .http
            .post(&self.token_url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(StoreError::Auth(format!("{}: {}", status, text)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Auth(format!("Malformed token response: {}", e)))?;
        Ok(token.access_token)
    }

    /// `{api_base}/{spreadsheet_id}/values/{range}{suffix}` with each
    /// segment percent-encoded
    fn values_url(&self, target: &SheetTarget, suffix: &str) -> Result<Url, StoreError> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| StoreError::Decode(format!("Invalid API base {}: {}", self.api_base, e)))?;
        url.path_segments_mut()
            .map_err(|_| {
                StoreError::Decode(format!("API base cannot carry a path: {}", self.api_base))
            })?
            .pop_if_empty()
            .push(&target.spreadsheet_id)
            .push("values")
            .push(&format!("{}{}", target.range, suffix));
        Ok(url)
    }

    async fn read(&self, target: &SheetTarget) -> Result<Rows, StoreError> {
        let url = self.values_url(target, "")?;
        let token = self.access_token().await?;
        debug!("Reading range {} from {}", target.range, target.spreadsheet_id);

        let response = self.http.get(url).bearer_auth(token).send().await?;
        let response = check_status(response).await?;
        let body: ValueRange = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(body
            .values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    async fn append(&self, target: &SheetTarget, row: Vec<String>) -> Result<(), StoreError> {
        let mut url = self.values_url(target, ":append")?;
        url.query_pairs_mut().append_pair("valueInputOption", "USER_ENTERED");
        let token = self.access_token().await?;
        debug!("Appending row to {} in {}", target.range, target.spreadsheet_id);

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&json!({ "values": [row] }))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Api { status, message })
}

/// Formatted values come back as strings; anything else is rendered as JSON
fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl SheetStore for GoogleSheetsStore {
    fn read_range<'a>(
        &'a self,
        target: &'a SheetTarget,
    ) -> BoxFuture<'a, Result<Rows, StoreError>> {
        Box::pin(self.read(target))
    }

    fn append_row<'a>(
        &'a self,
        target: &'a SheetTarget,
        row: Vec<String>,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(self.append(target, row))
    }
}
