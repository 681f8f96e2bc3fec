//! Request targets: a relative path plus ordered, multi-value parameters.
//!
//! # Design
//! `Params` keeps keys in first-insertion order and each key's values in
//! insertion order, so the encoded query string is deterministic and matches
//! what the caller built. The same type doubles as the field set for
//! form-encoded bodies.

use url::form_urlencoded;

/// Ordered multi-value mapping from key to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, Vec<String>)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to `key`, creating the key at the end if it is new.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
        self
    }

    /// Builder form of [`Params::append`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Every `(key, value)` pair, key-major, in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .flat_map(|(k, values)| values.iter().map(move |v| (k.as_str(), v.as_str())))
    }

    /// `application/x-www-form-urlencoded` encoding without a leading `?`.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.pairs() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Inverse of [`Params::encode`].
    pub fn parse(encoded: &str) -> Self {
        form_urlencoded::parse(encoded.as_bytes()).collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.append(key, value);
        }
        params
    }
}

/// Relative path plus optional query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    path: String,
    params: Params,
}

impl Locator {
    /// `path` is used verbatim and is expected to start with `/`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Params::new(),
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.append(key, value);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Fully qualified target: `prefix + path [+ "?" + query]`.
    pub fn resolve(&self, prefix: &str) -> String {
        if self.params.is_empty() {
            format!("{prefix}{}", self.path)
        } else {
            format!("{prefix}{}?{}", self.path, self.params.encode())
        }
    }
}

/// Escape a value for use inside a single path segment.
pub fn escape_segment(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
