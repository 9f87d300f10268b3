//! `urlq get <url> <name>` – print one parameter.

use anyhow::{bail, Result};
use urlq_core::ParsedUrl;

/// Prints the first value of `name` (or every value with `all`), decoded
/// unless `encoded` is set. A missing parameter is an error; a present one
/// with an empty value prints an empty line.
pub fn run_get(url: &ParsedUrl, name: &str, all: bool, encoded: bool) -> Result<()> {
    if !url.query_params().contains(name) {
        bail!("no parameter named {:?}", name);
    }
    for value in select(url, name, all, encoded)? {
        println!("{value}");
    }
    Ok(())
}

pub(crate) fn select(url: &ParsedUrl, name: &str, all: bool, encoded: bool) -> Result<Vec<String>> {
    let values = match (all, encoded) {
        (true, true) => url.raw_params(name).map(<[String]>::to_vec),
        (true, false) => url.params(name)?,
        (false, true) => url.raw_param(name).map(|v| vec![v.to_string()]),
        (false, false) => url.param(name)?.map(|v| vec![v]),
    };
    Ok(values.unwrap_or_default())
}
