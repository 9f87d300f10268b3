//! `urlq edit <url>` – apply parameter edits and print the new URL.

use anyhow::{Context, Result};
use clap::Args;
use urlq_core::ParsedUrl;

/// Parameter edits, applied as removals, then replacements, then additions.
#[derive(Debug, Clone, Default, Args)]
pub struct EditOps {
    /// Append a value (repeatable).
    #[arg(long = "add", value_name = "NAME=VALUE", value_parser = parse_pair)]
    pub add: Vec<(String, String)>,

    /// Replace all values of NAME (repeat the same NAME to set several values).
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_pair)]
    pub set: Vec<(String, String)>,

    /// Remove NAME and its values (repeatable).
    #[arg(long = "remove", value_name = "NAME")]
    pub remove: Vec<String>,
}

/// Splits `NAME=VALUE` on the first `=`. The value may be empty.
pub(crate) fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got {s:?}"))
}

pub fn run_edit(url: ParsedUrl, ops: &EditOps) -> Result<()> {
    let url = apply(url, ops)?;
    println!("{url}");
    Ok(())
}

pub(crate) fn apply(mut url: ParsedUrl, ops: &EditOps) -> Result<ParsedUrl> {
    for name in &ops.remove {
        url.remove_params(name);
    }

    // Group repeated --set flags so each name is replaced once, in first-seen order.
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for (name, value) in &ops.set {
        match groups.iter_mut().find(|(n, _)| *n == name.as_str()) {
            Some((_, values)) => values.push(value.as_str()),
            None => groups.push((name.as_str(), vec![value.as_str()])),
        }
    }
    for (name, values) in groups {
        url.update_params(name, &values)
            .with_context(|| format!("set {name}"))?;
    }

    for (name, value) in &ops.add {
        url.add_param(name, value)
            .with_context(|| format!("add {name}"))?;
    }
    tracing::debug!(url = %url, "edited url");
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(n: &str, v: &str) -> (String, String) {
        (n.to_string(), v.to_string())
    }

    #[test]
    fn parse_pair_splits_on_first_equals() {
        assert_eq!(parse_pair("a=b=c").unwrap(), pair("a", "b=c"));
        assert_eq!(parse_pair("a=").unwrap(), pair("a", ""));
        assert!(parse_pair("novalue").is_err());
    }

    #[test]
    fn remove_then_set_then_add() {
        let url = ParsedUrl::parse("http://h/p?eee=111&fff=222&fff=333").unwrap();
        let ops = EditOps {
            add: vec![pair("ggg", "444")],
            set: vec![pair("fff", "555")],
            remove: vec!["eee".to_string()],
        };
        let url = apply(url, &ops).unwrap();
        assert_eq!(url.to_string(), "http://h/p?fff=555&ggg=444");
    }

    #[test]
    fn repeated_set_keeps_all_values() {
        let url = ParsedUrl::parse("http://h/?a=1&b=2").unwrap();
        let ops = EditOps {
            set: vec![pair("a", "x"), pair("b", "y"), pair("a", "z")],
            ..EditOps::default()
        };
        let url = apply(url, &ops).unwrap();
        assert_eq!(url.query_string(), "a=x&a=z&b=y");
    }

    #[test]
    fn unencodable_value_is_an_error() {
        let opts = urlq_core::ParseOptions::default().with_charset(Some("iso-8859-1"));
        let url = ParsedUrl::parse_with("http://h/", &opts).unwrap();
        let ops = EditOps {
            add: vec![pair("price", "5€")],
            ..EditOps::default()
        };
        let err = apply(url, &ops).unwrap_err();
        assert!(format!("{err:#}").contains("add price"));
    }
}
