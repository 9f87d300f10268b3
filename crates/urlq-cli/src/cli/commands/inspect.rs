//! `urlq inspect <url>` – show components and parameters.

use anyhow::Result;
use serde::Serialize;
use urlq_core::ParsedUrl;

/// Serializable view of a parsed URL for `--json` output.
#[derive(Debug, Serialize)]
pub(crate) struct UrlReport<'a> {
    pub scheme: Option<&'a str>,
    pub user_info: Option<&'a str>,
    pub host: Option<&'a str>,
    pub port: Option<u16>,
    pub path: &'a str,
    pub fragment: Option<&'a str>,
    pub charset: Option<&'a str>,
    pub params: Vec<ParamReport<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ParamReport<'a> {
    pub name: &'a str,
    pub raw: &'a str,
    /// `None` when the value cannot be decoded with the charset.
    pub decoded: Option<String>,
}

impl<'a> UrlReport<'a> {
    pub fn new(url: &'a ParsedUrl) -> Self {
        let charset = url.charset();
        let params = url
            .query_params()
            .pairs()
            .map(|(name, raw)| ParamReport {
                name,
                raw,
                decoded: match charset {
                    Some(c) => c.decode(raw).ok(),
                    None => Some(raw.to_string()),
                },
            })
            .collect();
        Self {
            scheme: url.scheme(),
            user_info: url.user_info(),
            host: url.host(),
            port: url.port(),
            path: url.path(),
            fragment: url.fragment(),
            charset: charset.map(|c| c.label()),
            params,
        }
    }
}

pub fn run_inspect(url: &ParsedUrl, json: bool) -> Result<()> {
    let report = UrlReport::new(url);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let dash = |v: Option<&str>| v.unwrap_or("-").to_string();
    println!("{:<10} {}", "scheme", dash(report.scheme));
    println!("{:<10} {}", "user-info", dash(report.user_info));
    println!("{:<10} {}", "host", dash(report.host));
    println!(
        "{:<10} {}",
        "port",
        report.port.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string())
    );
    println!("{:<10} {}", "path", report.path);
    println!("{:<10} {}", "fragment", dash(report.fragment));
    println!("{:<10} {}", "charset", report.charset.unwrap_or("(raw)"));
    if report.params.is_empty() {
        println!("No query parameters.");
    } else {
        println!("{:<16} {:<24} {}", "NAME", "RAW", "DECODED");
        for p in &report.params {
            println!(
                "{:<16} {:<24} {}",
                p.name,
                p.raw,
                p.decoded.as_deref().unwrap_or("<undecodable>")
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lists_pairs_in_order() {
        let url = ParsedUrl::parse("https://u@h:8443/p?b=x%20y&a=1&b=100%").unwrap();
        let report = UrlReport::new(&url);
        assert_eq!(report.port, Some(8443));
        assert_eq!(report.user_info, Some("u"));
        let names: Vec<_> = report.params.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["b", "b", "a"]);
        assert_eq!(report.params[0].decoded.as_deref(), Some("x y"));
        assert_eq!(report.params[1].decoded, None);
    }

    #[test]
    fn report_json_shape() {
        let url = ParsedUrl::parse("http://h/p?k=v#top").unwrap();
        let value = serde_json::to_value(UrlReport::new(&url)).unwrap();
        assert_eq!(value["host"], "h");
        assert_eq!(value["fragment"], "top");
        assert_eq!(value["port"], serde_json::Value::Null);
        assert_eq!(value["charset"], "utf-8");
        assert_eq!(value["params"][0]["name"], "k");
        assert_eq!(value["params"][0]["decoded"], "v");
    }
}
