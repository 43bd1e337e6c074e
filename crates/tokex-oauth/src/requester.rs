//! Token endpoint requests.

use std::time::Duration;

use reqwest::header::ACCEPT;
use url::Url;

use crate::error::{OAuthError, Result};
use crate::fields::Field;
use crate::grant::Grant;
use crate::resolver::ResolvedInputs;
use crate::token::TokenResponse;

/// Default timeout for the token request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const TOKEN_PATH: &str = "/oauth/token";

/// Build the token endpoint for an issuer.
///
/// A bare host becomes `https://{issuer}/oauth/token`. An issuer that already
/// names an `http` or `https` scheme is used as the base as given.
pub fn token_endpoint(issuer: &str) -> Result<Url> {
    let trimmed = issuer.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(OAuthError::InvalidIssuer("issuer is empty".to_string()));
    }

    let base = if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&format!("{}{}", base, TOKEN_PATH))
        .map_err(|e| OAuthError::InvalidIssuer(format!("{}: {}", issuer, e)))?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(OAuthError::InvalidIssuer(format!("{}: missing host", issuer)));
    }
    Ok(url)
}

/// A single token request: where to send it and what to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    pub endpoint: Url,
    pub grant: Grant,
}

impl TokenRequest {
    /// Build the request for resolved inputs.
    pub fn from_inputs(inputs: &ResolvedInputs, realm: Option<&str>) -> Result<Self> {
        let issuer = inputs
            .get(Field::Issuer)
            .ok_or(OAuthError::MissingField(Field::Issuer.name()))?;

        Ok(Self {
            endpoint: token_endpoint(issuer)?,
            grant: Grant::from_inputs(inputs, realm)?,
        })
    }
}

/// Performs token requests against a provider.
#[derive(Debug, Clone)]
pub struct TokenRequester {
    http: reqwest::Client,
    timeout: Duration,
}

impl TokenRequester {
    /// Create a requester whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self { http, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send the request once and decode the reply.
    pub async fn request_token(&self, request: &TokenRequest) -> Result<TokenResponse> {
        tracing::info!(
            endpoint = %request.endpoint,
            grant_type = request.grant.grant_type(),
            "Requesting token"
        );

        let response = self
            .http
            .post(request.endpoint.clone())
            .header(ACCEPT, "application/json")
            .form(&request.grant.form())
            .send()
            .await
            .map_err(|e| {
                OAuthError::Transport(format!("Token request to {} failed: {}", request.endpoint, e))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| OAuthError::Transport(format!("Failed to read token response: {}", e)))?;

        tracing::debug!(status = %status, bytes = body.len(), "Token endpoint replied");

        if !status.is_success() {
            return Err(OAuthError::Provider {
                status: status.to_string(),
                body,
            });
        }

        let token = TokenResponse::from_body(&body);
        if !token.has_token() {
            return Err(OAuthError::Provider {
                status: status.to_string(),
                body: format!("response contained no access_token: {}", body),
            });
        }

        Ok(token)
    }
}
