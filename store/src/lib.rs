//! Theory store client for the MoSIS interview.
//!
//! # Architecture
//!
//! - [`TheoryStore`] - the five operations the interview needs from the store
//! - [`HttpTheoryStore`] - blocking HTTP client for the store's interview extension
//! - [`StoreReply`] - a parsed reply, with accessors for the few shapes we read
//! - `RecordingStore` - in-memory store that records calls (feature `test-support`)
//!
//! # Error Handling
//!
//! Every operation returns [`StoreError`] when the call failed, whether the
//! server said so (an element with `class="error"` or a non-success status)
//! or the request never completed. Callers treat both the same way.
//!
//! Calls are synchronous with no retry. The store has no rollback primitive,
//! so declarations accepted before a later failure stay on the server.

mod client;
#[cfg(any(test, feature = "test-support"))]
pub mod recording;
mod reply;

pub use client::HttpTheoryStore;
pub use mosis_types::StoreError;
#[cfg(any(test, feature = "test-support"))]
pub use recording::{RecordingStore, StoreCall};
pub use reply::{Descendants, StoreReply, XmlElement, XmlNode};

use std::time::Duration;

pub const DEFAULT_STORE_URL: &str = "http://localhost:8080";
pub const DEFAULT_EXTENSION: &str = ":interview";
pub const DEFAULT_NAMESPACE: &str = "http://mathhub.info/MitM/smglom/calculus/differentialequations";
pub const DEFAULT_META_THEORY: &str = "http://mathhub.info/MitM/Foundation?Logic";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The operations the interview performs against the theory store.
///
/// Names are resolved against [`TheoryStore::namespace`] unless they are
/// already absolute (see [`mpath`]). Declaration text is sent verbatim.
pub trait TheoryStore {
    fn namespace(&self) -> &str;

    fn create_theory(&self, name: &str) -> Result<StoreReply, StoreError>;

    fn create_view(&self, name: &str, from: &str, to: &str) -> Result<StoreReply, StoreError>;

    fn add_declaration(&self, theory: &str, declaration: &str) -> Result<StoreReply, StoreError>;

    /// Infer the type of `term` in the context of `theory`, rendered as text.
    fn infer_type(&self, theory: &str, term: &str) -> Result<String, StoreError>;

    fn query(&self, name: &str) -> Result<StoreReply, StoreError>;
}

/// Absolute module path of `name`: URLs are kept, anything else becomes
/// `namespace?name`.
#[must_use]
pub fn mpath(namespace: &str, name: &str) -> String {
    if name.starts_with("http://") || name.starts_with("https://") {
        name.to_owned()
    } else {
        format!("{namespace}?{name}")
    }
}

/// Where the store lives and how names are qualified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub base_url: String,
    pub extension: String,
    pub namespace: String,
    pub meta_theory: String,
    /// `None` disables the overall request timeout.
    pub timeout: Option<Duration>,
}

impl StoreSettings {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_STORE_URL.to_owned(),
            extension: DEFAULT_EXTENSION.to_owned(),
            namespace: DEFAULT_NAMESPACE.to_owned(),
            meta_theory: DEFAULT_META_THEORY.to_owned(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mpath_keeps_absolute_names() {
        assert_eq!(
            mpath(DEFAULT_NAMESPACE, "ephdomain"),
            "http://mathhub.info/MitM/smglom/calculus/differentialequations?ephdomain"
        );
        assert_eq!(
            mpath(DEFAULT_NAMESPACE, "http://mathhub.info/MitM/Foundation?Strings"),
            "http://mathhub.info/MitM/Foundation?Strings"
        );
    }
}
