//! Per-instance request decoration settings.

use serde_json::Value;

/// Optional settings applied to every outgoing request.
///
/// Each field maps to one request header (see the header assembly in
/// `client.rs`) and is independently settable and clearable through the
/// client's mutators. Unset and empty values emit no header.
#[derive(Debug, Clone, Default)]
pub(crate) struct ClientConfig {
    /// Convert server error envelopes into `Error::Api` instead of
    /// returning them as data.
    pub(crate) throw_api_errors: bool,
    /// `User-Agent`.
    pub(crate) user_agent: Option<String>,
    /// `X-Spaaza-MyPrice-App-Hostname`.
    pub(crate) myprice_app_hostname: Option<String>,
    /// `X-Spaaza-Request`, JSON-serialized.
    pub(crate) request_details: Option<Value>,
    /// `X-Spaaza-UserCookie`.
    pub(crate) user_cookie: Option<String>,
    /// `X-Spaaza-On-Behalf-Of`.
    pub(crate) on_behalf_of: Option<String>,
    /// `Accept-Language`.
    pub(crate) locale: Option<String>,
    /// `X-Spaaza-API-Version`.
    pub(crate) api_version: Option<String>,
    /// `X-Forwarded-For`.
    pub(crate) x_forwarded_for: Option<String>,
}
