//! Main client implementation.

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT_LANGUAGE, AUTHORIZATION, CACHE_CONTROL, CONNECTION,
    USER_AGENT,
};
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::auth::Auth;
use crate::config::ClientConfig;
use crate::error::{ApiError, Error, Result};
use crate::types::{Part, PartKind};

const X_SPAAZA_SESSION_KEY: HeaderName = HeaderName::from_static("x-spaaza-session-key");
const X_SPAAZA_SESSION_USER_ID: HeaderName = HeaderName::from_static("x-spaaza-session-user-id");
const X_SPAAZA_SESSION_USERNAME: HeaderName = HeaderName::from_static("x-spaaza-session-username");
const X_SPAAZA_SESSION_CHAIN_ID: HeaderName = HeaderName::from_static("x-spaaza-session-chain-id");
const X_SPAAZA_MYPRICE_APP_HOSTNAME: HeaderName =
    HeaderName::from_static("x-spaaza-myprice-app-hostname");
const X_SPAAZA_REQUEST: HeaderName = HeaderName::from_static("x-spaaza-request");
const X_SPAAZA_USERCOOKIE: HeaderName = HeaderName::from_static("x-spaaza-usercookie");
const X_SPAAZA_ON_BEHALF_OF: HeaderName = HeaderName::from_static("x-spaaza-on-behalf-of");
const X_SPAAZA_API_VERSION: HeaderName = HeaderName::from_static("x-spaaza-api-version");
const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Spaaza API client.
///
/// Owns the base URL, the per-instance request decorations, and the HTTP
/// transport. All calls go through one dispatch routine that assembles
/// headers from current instance state plus per-call auth and extra
/// headers, encodes at most one body kind, sends the request, and decodes
/// the JSON response envelope.
///
/// # Example
///
/// ```no_run
/// use spaaza_client::SpaazaClient;
///
/// # async fn example() -> spaaza_client::Result<()> {
/// let client = SpaazaClient::builder()
///     .base_url("https://apitest0.spaaza.com")
///     .build()?;
///
/// let response = client.get("status", None, None, None).await?;
/// # Ok(())
/// # }
/// ```
///
/// Cloning is cheap (the transport is shared), but each clone carries its
/// own copy of the decoration settings.
#[derive(Debug, Clone)]
pub struct SpaazaClient {
    /// HTTP transport. Certificate verification is fixed at build time.
    http: reqwest::Client,
    /// Base URL, normalized with a trailing slash.
    base_url: Url,
    /// Per-instance request decorations.
    config: ClientConfig,
}

/// The body of an outgoing request. At most one kind per call.
enum Body {
    Empty,
    /// URL-encoded into the query string.
    Query(Value),
    /// `application/x-www-form-urlencoded`.
    Form(Value),
    /// `application/json`.
    Json(Value),
    /// `multipart/form-data`.
    Multipart(Vec<Part>),
}

impl SpaazaClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Decoration mutators
    // ─────────────────────────────────────────────────────────────────────────

    /// Choose whether server error envelopes are raised as [`Error::Api`]
    /// or returned as data. Off by default.
    pub fn set_throw_api_errors(&mut self, throw: bool) {
        self.config.throw_api_errors = throw;
    }

    /// Set the `User-Agent` header value.
    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.config.user_agent = Some(user_agent.into());
    }

    /// Stop sending a `User-Agent` header.
    pub fn clear_user_agent(&mut self) {
        self.config.user_agent = None;
    }

    /// Set the MyPrice app hostname label.
    pub fn set_myprice_app_hostname(&mut self, hostname: impl Into<String>) {
        self.config.myprice_app_hostname = Some(hostname.into());
    }

    /// Stop sending the MyPrice app hostname label.
    pub fn clear_myprice_app_hostname(&mut self) {
        self.config.myprice_app_hostname = None;
    }

    /// Set the free-form request-details value, sent JSON-serialized as
    /// `X-Spaaza-Request`.
    pub fn set_request_details(&mut self, details: Value) {
        self.config.request_details = Some(details);
    }

    /// Stop sending request details.
    pub fn clear_request_details(&mut self) {
        self.config.request_details = None;
    }

    /// Set the user cookie.
    pub fn set_user_cookie(&mut self, cookie: impl Into<String>) {
        self.config.user_cookie = Some(cookie.into());
    }

    /// Stop sending the user cookie.
    pub fn clear_user_cookie(&mut self) {
        self.config.user_cookie = None;
    }

    /// Set the username this client acts on behalf of.
    pub fn set_on_behalf_of(&mut self, username: impl Into<String>) {
        self.config.on_behalf_of = Some(username.into());
    }

    /// Stop acting on behalf of another user.
    pub fn clear_on_behalf_of(&mut self) {
        self.config.on_behalf_of = None;
    }

    /// Set the locale, sent as `Accept-Language`.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.config.locale = Some(locale.into());
    }

    /// Stop sending a locale.
    pub fn clear_locale(&mut self) {
        self.config.locale = None;
    }

    /// Set the requested API version.
    pub fn set_api_version(&mut self, api_version: impl Into<String>) {
        self.config.api_version = Some(api_version.into());
    }

    /// Stop requesting a specific API version.
    pub fn clear_api_version(&mut self) {
        self.config.api_version = None;
    }

    /// The currently requested API version, if any.
    pub fn api_version(&self) -> Option<&str> {
        self.config.api_version.as_deref()
    }

    /// Set the forwarded-for address of the end client.
    pub fn set_x_forwarded_for(&mut self, address: impl Into<String>) {
        self.config.x_forwarded_for = Some(address.into());
    }

    /// Stop sending a forwarded-for address.
    pub fn clear_x_forwarded_for(&mut self) {
        self.config.x_forwarded_for = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Call surface
    // ─────────────────────────────────────────────────────────────────────────

    /// Do an API GET request. `params` are URL-encoded into the query
    /// string.
    pub async fn get(
        &self,
        path: &str,
        params: Option<Value>,
        auth: Option<&Auth>,
        extra_headers: Option<&HeaderMap>,
    ) -> Result<Value> {
        let body = params.map(Body::Query).unwrap_or(Body::Empty);
        self.request(Method::GET, path, body, auth, extra_headers).await
    }

    /// Do an API POST request with a form-encoded body.
    pub async fn post(
        &self,
        path: &str,
        form_params: Option<Value>,
        auth: Option<&Auth>,
        extra_headers: Option<&HeaderMap>,
    ) -> Result<Value> {
        let body = form_params.map(Body::Form).unwrap_or(Body::Empty);
        self.request(Method::POST, path, body, auth, extra_headers).await
    }

    /// Do an API POST request with a JSON body.
    pub async fn post_json(
        &self,
        path: &str,
        json: Option<Value>,
        auth: Option<&Auth>,
        extra_headers: Option<&HeaderMap>,
    ) -> Result<Value> {
        let body = json.map(Body::Json).unwrap_or(Body::Empty);
        self.request(Method::POST, path, body, auth, extra_headers).await
    }

    /// Do an API PUT request with a JSON body.
    pub async fn put_json(
        &self,
        path: &str,
        json: Option<Value>,
        auth: Option<&Auth>,
        extra_headers: Option<&HeaderMap>,
    ) -> Result<Value> {
        let body = json.map(Body::Json).unwrap_or(Body::Empty);
        self.request(Method::PUT, path, body, auth, extra_headers).await
    }

    /// Do an API multipart POST request, e.g. for file uploads.
    pub async fn post_multipart(
        &self,
        path: &str,
        parts: Vec<Part>,
        auth: Option<&Auth>,
        extra_headers: Option<&HeaderMap>,
    ) -> Result<Value> {
        self.request(Method::POST, path, Body::Multipart(parts), auth, extra_headers)
            .await
    }

    /// Do an API DELETE request with a form-encoded body.
    pub async fn delete(
        &self,
        path: &str,
        form_params: Option<Value>,
        auth: Option<&Auth>,
        extra_headers: Option<&HeaderMap>,
    ) -> Result<Value> {
        let body = form_params.map(Body::Form).unwrap_or(Body::Empty);
        self.request(Method::DELETE, path, body, auth, extra_headers).await
    }

    /// Do an API PUT request with a form-encoded body.
    pub async fn put(
        &self,
        path: &str,
        form_params: Option<Value>,
        auth: Option<&Auth>,
        extra_headers: Option<&HeaderMap>,
    ) -> Result<Value> {
        let body = form_params.map(Body::Form).unwrap_or(Body::Empty);
        self.request(Method::PUT, path, body, auth, extra_headers).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal dispatch
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL for an API path.
    fn url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        self.base_url.join(path).map_err(Error::from)
    }

    /// Send one request and decode the response.
    ///
    /// Client-side HTTP error statuses (4xx) do not abort decoding; the
    /// error body is decoded exactly like a success and handed to envelope
    /// normalization. Only transport failures surface as [`Error::Http`].
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Body,
        auth: Option<&Auth>,
        extra_headers: Option<&HeaderMap>,
    ) -> Result<Value> {
        let url = self.url(path)?;
        let headers = self.headers_for_request(auth, extra_headers)?;

        let mut request = self.http.request(method.clone(), url.clone()).headers(headers);
        request = match body {
            Body::Empty => request,
            Body::Query(params) => request.query(&params),
            Body::Form(params) => request.form(&params),
            Body::Json(json) => request.json(&json),
            Body::Multipart(parts) => request.multipart(multipart_form(parts)?),
        };

        tracing::debug!(method = %method, url = %url, "sending API request");
        let response = request.send().await?;
        let body = response.text().await?;
        self.handle_response(&body)
    }

    /// Assemble the request headers.
    ///
    /// Caller extras come first, then the fixed cache/connection headers,
    /// then auth, then the instance decorations. Later entries overwrite
    /// earlier same-named ones.
    fn headers_for_request(
        &self,
        auth: Option<&Auth>,
        extra_headers: Option<&HeaderMap>,
    ) -> Result<HeaderMap> {
        let mut headers = extra_headers.cloned().unwrap_or_default();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("private"));
        headers.insert(CONNECTION, HeaderValue::from_static("Keep-Alive"));

        match auth {
            Some(Auth::Session(session)) => {
                if let Some(key) = &session.session_key {
                    headers.insert(X_SPAAZA_SESSION_KEY, header_value(key)?);
                }
                if let Some(user_id) = session.user_id {
                    headers.insert(X_SPAAZA_SESSION_USER_ID, header_value(&user_id.to_string())?);
                }
                if let Some(username) = &session.username {
                    headers.insert(X_SPAAZA_SESSION_USERNAME, header_value(username)?);
                }
                if let Some(chain_id) = &session.chain_id {
                    headers.insert(X_SPAAZA_SESSION_CHAIN_ID, header_value(chain_id)?);
                }
            }
            Some(Auth::Bearer(token)) => {
                headers.insert(AUTHORIZATION, header_value(&format!("Bearer {token}"))?);
            }
            None => {}
        }

        if let Some(agent) = non_empty(&self.config.user_agent) {
            headers.insert(USER_AGENT, header_value(agent)?);
        }
        if let Some(hostname) = non_empty(&self.config.myprice_app_hostname) {
            headers.insert(X_SPAAZA_MYPRICE_APP_HOSTNAME, header_value(hostname)?);
        }
        if let Some(details) = &self.config.request_details {
            if has_content(details) {
                headers.insert(X_SPAAZA_REQUEST, header_value(&serde_json::to_string(details)?)?);
            }
        }
        if let Some(cookie) = non_empty(&self.config.user_cookie) {
            headers.insert(X_SPAAZA_USERCOOKIE, header_value(cookie)?);
        }
        if let Some(username) = non_empty(&self.config.on_behalf_of) {
            headers.insert(X_SPAAZA_ON_BEHALF_OF, header_value(username)?);
        }
        if let Some(locale) = non_empty(&self.config.locale) {
            headers.insert(ACCEPT_LANGUAGE, header_value(locale)?);
        }
        if let Some(version) = non_empty(&self.config.api_version) {
            headers.insert(X_SPAAZA_API_VERSION, header_value(version)?);
        }
        if let Some(address) = non_empty(&self.config.x_forwarded_for) {
            headers.insert(X_FORWARDED_FOR, header_value(address)?);
        }

        Ok(headers)
    }

    /// Decode the response body and normalize the envelope.
    ///
    /// Malformed JSON is fatal. With throw-on-error off the full decoded
    /// body is returned whatever its shape. With it on, a non-empty
    /// `error` (legacy singular) or `errors` field raises an [`ApiError`]
    /// built from its first entry, and a clean envelope returns only the
    /// `results` payload.
    fn handle_response(&self, body: &str) -> Result<Value> {
        let decoded: Value = serde_json::from_str(body).map_err(|source| Error::Decode {
            body: body.to_string(),
            source,
        })?;

        if !self.config.throw_api_errors {
            return Ok(decoded);
        }

        let error_field =
            non_empty_field(&decoded, "error").or_else(|| non_empty_field(&decoded, "errors"));
        if let Some(field) = error_field {
            let err = ApiError::from_envelope(field);
            tracing::warn!(code = %err.code(), name = %err.name(), "server reported an API error");
            return Err(err.into());
        }

        Ok(decoded.get("results").cloned().unwrap_or(Value::Null))
    }
}

/// Look up `key` in the decoded body, treating null, `""`, `{}` and `[]`
/// the same as absent.
fn non_empty_field<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    let value = body.get(key)?;
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Object(map) if map.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        _ => Some(value),
    }
}

/// An instance field counts as set only when it holds a non-empty string.
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Empty request-details values emit no header.
fn has_content(details: &Value) -> bool {
    match details {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| Error::Config(format!("header value not representable: {value:?}")))
}

fn multipart_form(parts: Vec<Part>) -> Result<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        let encoded = match part.kind {
            PartKind::Text(value) => reqwest::multipart::Part::text(value),
            PartKind::Bytes {
                data,
                file_name,
                mime_type,
            } => {
                let mut encoded = reqwest::multipart::Part::bytes(data);
                if let Some(file_name) = file_name {
                    encoded = encoded.file_name(file_name);
                }
                if let Some(mime_type) = mime_type {
                    encoded = encoded.mime_str(&mime_type)?;
                }
                encoded
            }
        };
        form = form.part(part.name, encoded);
    }
    Ok(form)
}

/// Builder for creating a [`SpaazaClient`].
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    version_segment: Option<String>,
    verify_certs: bool,
    config: ClientConfig,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            version_segment: None,
            verify_certs: true,
            config: ClientConfig::default(),
        }
    }

    /// Set the base URL, e.g. `https://apitest0.spaaza.com/`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Append an API version segment (e.g. `v1`) to the base URL path.
    pub fn version_segment(mut self, segment: impl Into<String>) -> Self {
        self.version_segment = Some(segment.into());
        self
    }

    /// Whether to verify server TLS certificates. On by default; fixed for
    /// the lifetime of the client.
    pub fn verify_certs(mut self, verify: bool) -> Self {
        self.verify_certs = verify;
        self
    }

    /// Raise server error envelopes as [`Error::Api`] instead of returning
    /// them as data. Off by default.
    pub fn throw_api_errors(mut self, throw: bool) -> Self {
        self.config.throw_api_errors = throw;
        self
    }

    /// Set an initial `User-Agent` value.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<SpaazaClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;

        // Parse and normalize base URL
        let mut base_url = Url::parse(&base_url)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        if let Some(segment) = &self.version_segment {
            base_url = base_url.join(&format!("{}/", segment.trim_matches('/')))?;
        }

        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(!self.verify_certs)
            .build()?;

        Ok(SpaazaClient {
            http,
            base_url,
            config: self.config,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::auth::SessionAuth;

    use super::*;

    fn test_client() -> SpaazaClient {
        ClientBuilder::new()
            .base_url("https://apitest0.spaaza.com")
            .build()
            .unwrap()
    }

    fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
        headers.get(name).map(|value| value.to_str().unwrap())
    }

    #[test]
    fn test_builder_requires_base_url() {
        let result = ClientBuilder::new().build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_normalizes_trailing_slash() {
        let client = test_client();
        assert_eq!(client.base_url().as_str(), "https://apitest0.spaaza.com/");
    }

    #[test]
    fn test_builder_appends_version_segment() {
        let client = ClientBuilder::new()
            .base_url("https://apitest0.spaaza.com")
            .version_segment("v1")
            .build()
            .unwrap();

        let url = client.url("my-price/get-basket").unwrap();
        assert_eq!(url.as_str(), "https://apitest0.spaaza.com/v1/my-price/get-basket");
    }

    #[test]
    fn test_url_building() {
        let client = test_client();

        let url = client.url("my-price/get-basket").unwrap();
        assert_eq!(url.as_str(), "https://apitest0.spaaza.com/my-price/get-basket");

        let url = client.url("/my-price/get-basket").unwrap();
        assert_eq!(url.as_str(), "https://apitest0.spaaza.com/my-price/get-basket");
    }

    #[test]
    fn test_fixed_headers_always_present() {
        let client = test_client();
        let headers = client.headers_for_request(None, None).unwrap();

        assert_eq!(header_str(&headers, "cache-control"), Some("private"));
        assert_eq!(header_str(&headers, "connection"), Some("Keep-Alive"));
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_fixed_headers_overwrite_extras() {
        let client = test_client();
        let mut extras = HeaderMap::new();
        extras.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
        extras.insert("x-custom", HeaderValue::from_static("kept"));

        let headers = client.headers_for_request(None, Some(&extras)).unwrap();
        assert_eq!(header_str(&headers, "cache-control"), Some("private"));
        assert_eq!(header_str(&headers, "x-custom"), Some("kept"));
    }

    #[test]
    fn test_session_auth_partial_fields() {
        let client = test_client();
        let auth = Auth::Session(SessionAuth::new().username("bob"));

        let headers = client.headers_for_request(Some(&auth), None).unwrap();
        assert_eq!(header_str(&headers, "x-spaaza-session-username"), Some("bob"));
        assert!(headers.get("x-spaaza-session-key").is_none());
        assert!(headers.get("x-spaaza-session-user-id").is_none());
        assert!(headers.get("x-spaaza-session-chain-id").is_none());
        assert!(headers.get("authorization").is_none());
    }

    #[test]
    fn test_session_auth_all_fields() {
        let client = test_client();
        let auth = Auth::Session(
            SessionAuth::new()
                .session_key("sk-1")
                .user_id(42)
                .username("bob")
                .chain_id("chain-7"),
        );

        let headers = client.headers_for_request(Some(&auth), None).unwrap();
        assert_eq!(header_str(&headers, "x-spaaza-session-key"), Some("sk-1"));
        assert_eq!(header_str(&headers, "x-spaaza-session-user-id"), Some("42"));
        assert_eq!(header_str(&headers, "x-spaaza-session-username"), Some("bob"));
        assert_eq!(header_str(&headers, "x-spaaza-session-chain-id"), Some("chain-7"));
    }

    #[test]
    fn test_bearer_auth() {
        let client = test_client();
        let auth = Auth::Bearer("tok123".to_string());

        let headers = client.headers_for_request(Some(&auth), None).unwrap();
        assert_eq!(header_str(&headers, "authorization"), Some("Bearer tok123"));
        assert!(headers.get("x-spaaza-session-key").is_none());
        assert!(headers.get("x-spaaza-session-username").is_none());
    }

    #[test]
    fn test_decorations_emit_headers_in_order() {
        let mut client = test_client();
        client.set_user_agent("myprice-app/3.1");
        client.set_myprice_app_hostname("shop.example.com");
        client.set_user_cookie("cookie-1");
        client.set_on_behalf_of("alice");
        client.set_locale("nl-NL");
        client.set_api_version("2.0");
        client.set_x_forwarded_for("203.0.113.9");

        let headers = client.headers_for_request(None, None).unwrap();
        assert_eq!(header_str(&headers, "user-agent"), Some("myprice-app/3.1"));
        assert_eq!(
            header_str(&headers, "x-spaaza-myprice-app-hostname"),
            Some("shop.example.com")
        );
        assert_eq!(header_str(&headers, "x-spaaza-usercookie"), Some("cookie-1"));
        assert_eq!(header_str(&headers, "x-spaaza-on-behalf-of"), Some("alice"));
        assert_eq!(header_str(&headers, "accept-language"), Some("nl-NL"));
        assert_eq!(header_str(&headers, "x-spaaza-api-version"), Some("2.0"));
        assert_eq!(header_str(&headers, "x-forwarded-for"), Some("203.0.113.9"));
    }

    #[test]
    fn test_set_then_clear_restores_no_header() {
        let mut client = test_client();
        client.set_locale("nl-NL");
        client.set_on_behalf_of("alice");
        client.clear_on_behalf_of();

        let headers = client.headers_for_request(None, None).unwrap();
        assert!(headers.get("x-spaaza-on-behalf-of").is_none());
        // Clearing one field leaves the others alone
        assert_eq!(header_str(&headers, "accept-language"), Some("nl-NL"));
    }

    #[test]
    fn test_empty_string_treated_as_unset() {
        let mut client = test_client();
        client.set_locale("");
        client.set_user_agent("");

        let headers = client.headers_for_request(None, None).unwrap();
        assert!(headers.get("accept-language").is_none());
        assert!(headers.get("user-agent").is_none());
    }

    #[test]
    fn test_request_details_serialized_as_json() {
        let mut client = test_client();
        client.set_request_details(json!({"channel": "pos", "till": 3}));

        let headers = client.headers_for_request(None, None).unwrap();
        assert_eq!(
            header_str(&headers, "x-spaaza-request"),
            Some(r#"{"channel":"pos","till":3}"#)
        );
    }

    #[test]
    fn test_empty_request_details_emit_no_header() {
        let mut client = test_client();
        client.set_request_details(json!({}));

        let headers = client.headers_for_request(None, None).unwrap();
        assert!(headers.get("x-spaaza-request").is_none());
    }

    #[test]
    fn test_api_version_getter() {
        let mut client = test_client();
        assert_eq!(client.api_version(), None);
        client.set_api_version("2.0");
        assert_eq!(client.api_version(), Some("2.0"));
        client.clear_api_version();
        assert_eq!(client.api_version(), None);
    }

    #[test]
    fn test_control_characters_rejected_as_config_error() {
        let mut client = test_client();
        client.set_locale("nl\r\nNL");

        let result = client.headers_for_request(None, None);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Envelope normalization
    // ─────────────────────────────────────────────────────────────────────────

    fn throwing_client() -> SpaazaClient {
        ClientBuilder::new()
            .base_url("https://apitest0.spaaza.com")
            .throw_api_errors(true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_results_unwrapped_when_throwing() {
        let client = throwing_client();
        let result = client.handle_response(r#"{"results": {"x": 1}}"#).unwrap();
        assert_eq!(result, json!({"x": 1}));
    }

    #[test]
    fn test_missing_results_returns_null() {
        let client = throwing_client();
        let result = client.handle_response(r#"{"status": "ok"}"#).unwrap();
        assert_eq!(result, Value::Null);
    }

    #[test]
    fn test_errors_map_raised_when_throwing() {
        let client = throwing_client();
        let err = client
            .handle_response(
                r#"{"errors": {"42": {"name": "BadInput", "description": "missing field"}}}"#,
            )
            .unwrap_err();

        let api = err.as_api_error().expect("expected an API error");
        assert_eq!(api.code(), "42");
        assert_eq!(api.name(), "BadInput");
        assert_eq!(api.description(), "missing field");
    }

    #[test]
    fn test_singular_error_shape_raised_when_throwing() {
        let client = throwing_client();
        let err = client
            .handle_response(r#"{"error": {"7": {"name": "Expired", "description": "too late"}}}"#)
            .unwrap_err();

        let api = err.as_api_error().expect("expected an API error");
        assert_eq!(api.code(), "7");
        assert_eq!(api.name(), "Expired");
    }

    #[test]
    fn test_empty_error_fields_do_not_raise() {
        let client = throwing_client();
        let result = client
            .handle_response(r#"{"error": null, "errors": {}, "results": [1, 2]}"#)
            .unwrap();
        assert_eq!(result, json!([1, 2]));
    }

    #[test]
    fn test_envelope_returned_whole_when_not_throwing() {
        let client = test_client();
        let body = r#"{"errors": {"42": {"name": "BadInput", "description": "missing field"}}}"#;
        let result = client.handle_response(body).unwrap();
        assert_eq!(
            result,
            json!({"errors": {"42": {"name": "BadInput", "description": "missing field"}}})
        );
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let client = test_client();
        let err = client.handle_response("<html>bad gateway</html>").unwrap_err();
        match err {
            Error::Decode { body, .. } => assert_eq!(body, "<html>bad gateway</html>"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_is_fatal_even_when_throwing() {
        let client = throwing_client();
        let err = client.handle_response("").unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }
}
