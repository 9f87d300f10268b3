//! URL model: decomposed URL fields plus an ordered, multi-valued query.
//!
//! A [`ParsedUrl`] is built once from a string, edited in place through the
//! parameter mutators, and written back out with [`fmt::Display`]. Parameter
//! values are kept in their encoded wire form; the charset given at parse
//! time is applied when values are added and when they are read back through
//! the decoding accessors.

mod codec;
mod options;
mod params;
mod split;

pub use codec::Charset;
pub use options::{ParseOptions, Syntax, DEFAULT_CHARSET};
pub use params::QueryParams;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, UrlError};
use codec::{decode_opt, encode_opt};

/// A URL split into its components with an editable query.
///
/// # Examples
///
/// ```
/// use urlq_core::url_model::ParsedUrl;
///
/// let mut url = ParsedUrl::parse("http://host/p?a=1&b=2&a=3").unwrap();
/// assert_eq!(url.raw_params("a").unwrap(), ["1", "3"]);
/// url.update_params("a", &["9"]).unwrap();
/// url.add_param("q", "x y").unwrap();
/// assert_eq!(url.to_string(), "http://host/p?a=9&b=2&q=x+y");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    syntax: Syntax,
    scheme: Option<String>,
    user_info: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    /// Whether the source had a `//` authority, even an empty one (`file:///x`).
    has_authority: bool,
    path: String,
    fragment: Option<String>,
    charset: Option<Charset>,
    params: QueryParams,
}

impl ParsedUrl {
    /// Parses with the generic URI syntax and the default `utf-8` charset.
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with(input, &ParseOptions::default())
    }

    /// Parses with explicit options.
    ///
    /// The charset is validated before the URL itself, so an unsupported
    /// charset is reported even for malformed input.
    pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Self> {
        let charset = options
            .charset
            .as_deref()
            .map(Charset::for_label)
            .transpose()?;

        let parts = split::split(input, options.syntax)?;
        let authority = parts.authority.unwrap_or_default();

        let parsed = Self {
            syntax: options.syntax,
            scheme: parts.scheme.map(str::to_string),
            user_info: authority.user_info.map(str::to_string),
            host: authority.host.map(str::to_string),
            port: authority.port,
            has_authority: parts.authority.is_some(),
            path: parts.path.to_string(),
            fragment: parts.fragment.map(str::to_string),
            charset,
            params: QueryParams::parse(parts.query),
        };
        tracing::debug!(
            url = %input,
            syntax = ?parsed.syntax,
            params = parsed.params.len(),
            "parsed url"
        );
        Ok(parsed)
    }

    pub fn syntax(&self) -> Syntax {
        self.syntax
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn user_info(&self) -> Option<&str> {
        self.user_info.as_deref()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Path including any `;matrix` parameters; empty when the URL has none.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Fragment without the leading `#`. Always `None` for [`Syntax::Protocol`].
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn charset(&self) -> Option<&Charset> {
        self.charset.as_ref()
    }

    /// The underlying parameter collection (encoded values).
    pub fn query_params(&self) -> &QueryParams {
        &self.params
    }

    /// All encoded values of `name`.
    pub fn raw_params(&self, name: &str) -> Option<&[String]> {
        self.params.get(name)
    }

    /// First encoded value of `name`.
    pub fn raw_param(&self, name: &str) -> Option<&str> {
        self.params.first(name)
    }

    /// First value of `name`, decoded with the instance charset.
    pub fn param(&self, name: &str) -> Result<Option<String>> {
        self.raw_param(name)
            .map(|v| decode_opt(self.charset.as_ref(), v))
            .transpose()
    }

    /// All values of `name`, decoded with the instance charset.
    pub fn params(&self, name: &str) -> Result<Option<Vec<String>>> {
        self.raw_params(name)
            .map(|values| {
                values
                    .iter()
                    .map(|v| decode_opt(self.charset.as_ref(), v))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()
    }

    /// First encoded value per name. Ordering is not preserved.
    pub fn simple(&self) -> HashMap<String, String> {
        self.params
            .iter()
            .filter_map(|(name, values)| values.first().map(|v| (name.to_string(), v.clone())))
            .collect()
    }

    /// Encodes `value` and appends it to `name`.
    pub fn add_param(&mut self, name: &str, value: &str) -> Result<()> {
        self.add_params(name, &[value])
    }

    /// Encodes each value and appends them to `name` in order.
    ///
    /// All values are encoded before the collection is touched, so a value
    /// that does not fit the charset leaves the collection unchanged.
    pub fn add_params<S: AsRef<str>>(&mut self, name: &str, values: &[S]) -> Result<()> {
        let encoded = self.encode_all(values)?;
        tracing::trace!(param = name, count = encoded.len(), "add params");
        self.params.extend(name, encoded);
        Ok(())
    }

    /// Replaces every value of `name` with the single encoded `value`.
    pub fn update_param(&mut self, name: &str, value: &str) -> Result<()> {
        self.update_params(name, &[value])
    }

    /// Replaces every value of `name` with the encoded `values`.
    ///
    /// Fails with [`UrlError::InvalidArgument`] when `values` is empty. An
    /// existing name keeps its position; a new name is appended.
    pub fn update_params<S: AsRef<str>>(&mut self, name: &str, values: &[S]) -> Result<()> {
        if values.is_empty() {
            return Err(UrlError::InvalidArgument(
                "values should not be empty".to_string(),
            ));
        }
        let encoded = self.encode_all(values)?;
        tracing::trace!(param = name, count = encoded.len(), "update params");
        self.params.replace(name, encoded);
        Ok(())
    }

    /// Removes `name` and its values. Absent names are ignored.
    pub fn remove_params(&mut self, name: &str) {
        if self.params.remove(name).is_some() {
            tracing::trace!(param = name, "removed params");
        }
    }

    /// Current query string without the leading `?`; `""` when there are no
    /// parameters.
    pub fn query_string(&self) -> String {
        self.params.to_query_string()
    }

    fn encode_all<S: AsRef<str>>(&self, values: &[S]) -> Result<Vec<String>> {
        values
            .iter()
            .map(|v| encode_opt(self.charset.as_ref(), v.as_ref()))
            .collect()
    }
}

impl FromStr for ParsedUrl {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{}:", scheme)?;
        }
        if self.has_authority {
            f.write_str("//")?;
            if let Some(user_info) = &self.user_info {
                write!(f, "{}@", user_info)?;
            }
            if let Some(host) = &self.host {
                f.write_str(host)?;
            }
            if let Some(port) = self.port {
                write!(f, ":{}", port)?;
            }
        }
        f.write_str(&self.path)?;
        // No bare '?' when there is nothing to write.
        let query = self.query_string();
        if !query.is_empty() {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}
