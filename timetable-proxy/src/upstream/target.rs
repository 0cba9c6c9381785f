//! Outbound URL construction.

use std::fmt;

use super::credential::Credential;

/// Query parameter carrying the credential.
pub const CREDENTIAL_PARAM: &str = "serviceKey";

/// A fully assembled upstream URL, including the credential.
///
/// Treat the contents as secret: `Debug` and [`UpstreamUrl::redacted`]
/// mask the credential, and the raw string is only handed to the HTTP
/// client.
#[derive(Clone, PartialEq, Eq)]
pub struct UpstreamUrl {
    url: String,
    /// Byte offset where the credential value starts.
    secret_at: usize,
}

impl UpstreamUrl {
    /// Assemble `base?params&serviceKey=<credential>`.
    ///
    /// Non-secret parameters go through the form encoder; the credential is
    /// appended last in its already-encoded form so it is never re-encoded.
    pub fn build<K, V>(base: &str, params: &[(K, V)], credential: &Credential) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
            .finish();

        let mut url = String::with_capacity(base.len() + query.len() + 64);
        url.push_str(base);
        url.push('?');
        if !query.is_empty() {
            url.push_str(&query);
            url.push('&');
        }
        url.push_str(CREDENTIAL_PARAM);
        url.push('=');
        let secret_at = url.len();
        url.push_str(&credential.encoded());

        Self { url, secret_at }
    }

    /// The URL with the credential value replaced by `***`, safe to log.
    pub fn redacted(&self) -> String {
        format!("{}***", &self.url[..self.secret_at])
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Debug for UpstreamUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UpstreamUrl({})", self.redacted())
    }
}
