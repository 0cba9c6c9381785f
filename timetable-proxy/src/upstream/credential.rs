//! Upstream access credential.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// A `%` followed by two hex digits.
static PERCENT_OCTET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("%[0-9A-Fa-f]{2}").expect("static regex is valid"));

/// Secret access key for an upstream API.
///
/// The raw value is never exposed through `Debug` or `Display`; the only
/// way to read it is [`Credential::encoded`], which yields the form that
/// goes into the query string.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw secret. Empty values are treated as unset.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() { None } else { Some(Self(raw)) }
    }

    /// Whether the raw value is already percent-encoded.
    pub fn is_percent_encoded(&self) -> bool {
        is_percent_encoded(&self.0)
    }

    /// The query-string form of the credential, encoded exactly once.
    pub fn encoded(&self) -> Cow<'_, str> {
        encode_once(&self.0)
    }

    /// Mask every occurrence of the credential, raw or encoded, in `text`.
    pub fn redact(&self, text: &str) -> String {
        let encoded = self.encoded();
        let masked = text.replace(encoded.as_ref(), "***");
        if encoded == self.0.as_str() {
            masked
        } else {
            masked.replace(&self.0, "***")
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Whether `s` contains at least one percent-encoded octet.
pub fn is_percent_encoded(s: &str) -> bool {
    PERCENT_OCTET.is_match(s)
}

/// Percent-encode `s` unless it already contains an encoded octet.
///
/// Output only ever contains unreserved characters and `%XX` escapes, so
/// applying this twice gives the same result as applying it once.
pub fn encode_once(s: &str) -> Cow<'_, str> {
    if is_percent_encoded(s) {
        return Cow::Borrowed(s);
    }
    // form_urlencoded writes a space as `+`; a literal `+` is always escaped,
    // so every `+` here came from a space.
    let encoded: String = url::form_urlencoded::byte_serialize(s.as_bytes()).collect();
    if encoded == s {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(encoded.replace('+', "%20"))
    }
}
