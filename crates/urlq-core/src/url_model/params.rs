//! Order-preserving multi-valued query parameters.

use indexmap::IndexMap;
use std::fmt;

/// Query parameters keyed by name, each holding its values in arrival order.
///
/// Names keep first-insertion order; removing a name does not reorder the
/// rest. Values are stored exactly as they appear on the wire (already
/// percent-encoded) and are never transformed here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: IndexMap<String, Vec<String>>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenizes a raw query string (without the leading `?`).
    ///
    /// Tokens are split on `&`, then on the first `=`. A token without `=`
    /// contributes an empty name and an empty value. Trailing empty tokens
    /// (`a=1&`) are dropped; interior ones (`a=1&&b=2`) are kept. Blank input
    /// yields an empty collection.
    pub fn parse(query: &str) -> Self {
        let mut params = Self::new();
        if query.trim().is_empty() {
            return params;
        }
        let mut tokens: Vec<&str> = query.split('&').collect();
        while tokens.last().is_some_and(|t| t.is_empty()) {
            tokens.pop();
        }
        for token in tokens {
            let (name, value) = token.split_once('=').unwrap_or(("", ""));
            params.append(name, value.to_string());
        }
        params
    }

    /// All values for `name`.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// First value for `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Appends one value, creating the entry at the end if `name` is new.
    pub fn append(&mut self, name: &str, value: String) {
        self.entries.entry(name.to_string()).or_default().push(value);
    }

    /// Appends several values in order.
    pub fn extend<I>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.entries.entry(name.to_string()).or_default().extend(values);
    }

    /// Replaces every value of `name`. An existing entry keeps its position.
    pub fn replace(&mut self, name: &str, values: Vec<String>) {
        match self.entries.get_mut(name) {
            Some(slot) => *slot = values,
            None => {
                self.entries.insert(name.to_string(), values);
            }
        }
    }

    /// Removes `name` and its values, returning them if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.entries.shift_remove(name)
    }

    /// Parameter names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(name, values)` entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Flattened `(name, value)` pairs: names outer, values inner.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(name, values)| {
            values.iter().map(move |v| (name.as_str(), v.as_str()))
        })
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Joins `name=value` pairs with `&`. Empty collection gives `""`.
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        for (name, value) in self.pairs() {
            if !out.is_empty() {
                out.push('&');
            }
            out.push_str(name);
            out.push('=');
            out.push_str(value);
        }
        out
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}
