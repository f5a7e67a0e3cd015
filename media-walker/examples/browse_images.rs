//! Walk a DLNA media server's ContentDirectory and print its image tree.
//!
//! Usage: cargo run -p dlna-browse-walker --example browse_images [DESCRIPTION_URL]
//!
//! Without an argument the server is located via SSDP.

use browse_client::{BrowseClient, CONTENT_DIRECTORY};
use media_discovery::{device, SsdpConfig};
use media_walker::{ContentDirectory, TreeWalker, WalkEvent};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let description_url = match std::env::args().nth(1) {
        Some(url) => url,
        None => locate_media_server()?,
    };

    let http = reqwest::blocking::Client::new();
    let description = device::fetch_description(&http, &description_url)?;
    println!("Device: {}", description.friendly_name);
    println!("Manufacturer: {}", description.manufacturer);
    println!("Model: {}", description.model_name);

    let service = description
        .find_service("ContentDirectory")
        .ok_or("no ContentDirectory service on this device")?;
    println!("Control URL: {}\n", service.control_url);

    let base = device::base_url(&description_url).ok_or("description URL has no authority")?;
    let directory = ContentDirectory::new(BrowseClient::new(), base, service.control_url.clone());

    for event in TreeWalker::new(directory) {
        match event? {
            WalkEvent::ContainerEntered {
                depth,
                id,
                title,
                child_count,
            } => {
                println!(
                    "{}[{}] {} ({} children)",
                    "  ".repeat(depth),
                    id,
                    title,
                    child_count
                );
            }
            WalkEvent::ImageFound {
                depth,
                title,
                date,
                resources,
            } => {
                let indent = "  ".repeat(depth);
                println!("{}{}", indent, title);
                if !date.is_empty() {
                    println!("{}  date: {}", indent, date);
                }
                for res in resources {
                    if !res.resolution.is_empty() {
                        println!("{}  resolution: {}", indent, res.resolution);
                    }
                    if !res.size.is_empty() {
                        println!("{}  size: {} bytes", indent, res.size);
                    }
                    println!("{}  url: {}", indent, res.url);
                }
            }
        }
    }

    Ok(())
}

fn locate_media_server() -> Result<String, Box<dyn std::error::Error>> {
    let config = SsdpConfig {
        search_target: CONTENT_DIRECTORY.to_string(),
        ..Default::default()
    };

    let responses = media_discovery::discover(&config)?;
    let location = responses
        .iter()
        .find_map(|r| r.location().map(str::to_string))
        .ok_or("no media server answered discovery")?;

    eprintln!("discovered media server at {}", location);
    Ok(location)
}
