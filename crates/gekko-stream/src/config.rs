//! Connection configuration and upgrade-request construction.

use std::fmt::Write as _;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::tungstenite::http::header::AUTHORIZATION;
use tokio_tungstenite::tungstenite::http::HeaderValue;

use crate::error::ConnectError;

/// Characters escaped when building query strings.
const QUERY_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'&')
    .add(b'=')
    .add(b'+')
    .add(b'?');

/// Where the bearer credential travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialPlacement {
    /// `Authorization: Bearer …` request header.
    #[default]
    Header,
    /// `api_key` query parameter, for endpoints that read it from the URL.
    Query,
}

/// Everything needed to open one event-stream session.
///
/// All knobs are explicit; nothing is read from ambient state at open time.
#[derive(Debug, Clone)]
pub struct ConnectConfig {
    /// `ws://` or `wss://` endpoint.
    pub url: String,
    /// Optional bearer credential.
    pub credential: Option<String>,
    /// How the credential is attached to the request.
    pub placement: CredentialPlacement,
    /// Extra query parameters, e.g. the zone scope.
    pub query: Vec<(String, String)>,
}

impl ConnectConfig {
    /// Config for `url` with no credential and no extra parameters.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            credential: None,
            placement: CredentialPlacement::default(),
            query: Vec::new(),
        }
    }

    /// Final URL with query parameters appended, including the credential
    /// when it is placed in the query.
    pub(crate) fn request_url(&self) -> String {
        let mut pairs: Vec<(&str, &str)> = Vec::new();
        if let (Some(credential), CredentialPlacement::Query) = (&self.credential, self.placement) {
            pairs.push(("api_key", credential));
        }
        for (key, value) in &self.query {
            pairs.push((key, value));
        }
        if pairs.is_empty() {
            return self.url.clone();
        }

        let mut url = self.url.clone();
        for (i, (key, value)) in pairs.iter().enumerate() {
            let sep = if i == 0 && !url.contains('?') { '?' } else { '&' };
            let key = utf8_percent_encode(key, QUERY_ESCAPE);
            let value = utf8_percent_encode(value, QUERY_ESCAPE);
            let _ = write!(url, "{sep}{key}={value}");
        }
        url
    }

    /// Build the upgrade request, attaching a header credential when
    /// configured.
    pub(crate) fn build_request(&self) -> Result<Request, ConnectError> {
        let url = self.request_url();
        let mut request =
            url.as_str()
                .into_client_request()
                .map_err(|error| ConnectError::InvalidUrl {
                    url: self.url.clone(),
                    reason: error.to_string(),
                })?;
        if let (Some(credential), CredentialPlacement::Header) = (&self.credential, self.placement)
        {
            let value = HeaderValue::from_str(&format!("Bearer {credential}"))
                .map_err(|_| ConnectError::InvalidCredential)?;
            let _ = request.headers_mut().insert(AUTHORIZATION, value);
        }
        Ok(request)
    }
}
