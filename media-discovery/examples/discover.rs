//! Discover UPnP devices and print their responses as JSON for scripting
//!
//! Usage: cargo run -p dlna-browse-discovery --example discover [TIMEOUT_SECS] [SEARCH_TARGET]

use media_discovery::{discover, SsdpConfig};
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct ResponseInfo {
    source: String,
    location: Option<String>,
    server: Option<String>,
    st: Option<String>,
    usn: Option<String>,
}

fn main() {
    let timeout = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(3);
    let search_target = std::env::args()
        .nth(2)
        .unwrap_or_else(|| media_discovery::SEARCH_TARGET_ALL.to_string());

    let config = SsdpConfig {
        search_target,
        timeout: Duration::from_secs(timeout),
        ..Default::default()
    };

    let responses = match discover(&config) {
        Ok(responses) => responses,
        Err(e) => {
            eprintln!("discovery failed: {}", e);
            std::process::exit(1);
        }
    };

    let infos: Vec<ResponseInfo> = responses
        .iter()
        .map(|r| ResponseInfo {
            source: r.source.to_string(),
            location: r.location().map(str::to_string),
            server: r.header("SERVER").map(str::to_string),
            st: r.header("ST").map(str::to_string),
            usn: r.header("USN").map(str::to_string),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&infos).unwrap());
}
