//! UPnP media device discovery.
//!
//! This crate covers the first two stages of the browse pipeline: SSDP
//! M-SEARCH discovery of devices on the local network, and retrieval of
//! the device description XML a responder's LOCATION header points at.
//!
//! # Quick Start
//!
//! ```no_run
//! use media_discovery::{discover, SsdpConfig};
//!
//! let responses = discover(&SsdpConfig::default())?;
//! for response in &responses {
//!     println!("{} -> {:?}", response.source, response.location());
//! }
//! # Ok::<(), media_discovery::DiscoveryError>(())
//! ```
//!
//! # Streaming collection
//!
//! For arrival-order streaming and partial results in the face of socket
//! errors, drive the iterator directly:
//!
//! ```no_run
//! use media_discovery::{SsdpClient, SsdpConfig};
//!
//! let client = SsdpClient::new()?;
//! for response in client.search(&SsdpConfig::default())? {
//!     let response = response?;
//!     println!("{}", response.source);
//! }
//! # Ok::<(), media_discovery::DiscoveryError>(())
//! ```

mod error;
pub mod device;
mod ssdp;

pub use device::{base_url, fetch_description, DeviceDescription, Service, ServiceList};
pub use error::{DiscoveryError, Result};
pub use ssdp::{
    SsdpClient, SsdpConfig, SsdpResponse, SsdpResponses, SEARCH_TARGET_ALL, SSDP_MULTICAST_ADDR,
};

/// One-shot discovery: bind a fresh socket, send a single M-SEARCH, and
/// collect responses in arrival order until the deadline.
///
/// A deadline with no responses is an empty `Vec`, not an error. A socket
/// failure mid-collection propagates; use [`SsdpClient::search`] when the
/// responses received before the failure matter.
pub fn discover(config: &SsdpConfig) -> Result<Vec<SsdpResponse>> {
    let client = SsdpClient::new()?;
    client.search(config)?.collect()
}

/// Sequential discovery across several search targets, each with its own
/// socket and deadline, results concatenated in call order.
pub fn discover_targets(targets: &[&str], config: &SsdpConfig) -> Result<Vec<SsdpResponse>> {
    let mut responses = Vec::new();
    for target in targets {
        let target_config = SsdpConfig {
            search_target: (*target).to_string(),
            ..config.clone()
        };
        responses.extend(discover(&target_config)?);
    }
    Ok(responses)
}
