//! `urlq query <url>` – print the query string.

use urlq_core::ParsedUrl;

pub fn run_query(url: &ParsedUrl) {
    println!("{}", url.query_string());
}
