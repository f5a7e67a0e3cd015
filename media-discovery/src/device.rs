//! Device description retrieval and parsing.
//!
//! A discovered device's LOCATION header points at an XML description
//! listing its services. Parsing is lenient: unknown elements are ignored
//! and absent elements come back zero-valued; only malformed XML fails.

use crate::error::{DiscoveryError, Result};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
struct Root {
    #[serde(default)]
    device: DeviceDescription,
}

/// Parsed UPnP device description.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceDescription {
    pub device_type: String,
    pub friendly_name: String,
    pub manufacturer: String,
    pub model_name: String,
    pub service_list: ServiceList,
}

/// Wrapper for the `serviceList > service` nesting in the description XML
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceList {
    #[serde(rename = "service", default)]
    pub services: Vec<Service>,
}

/// One service advertised by a device.
///
/// The control URL may be relative to the device's base URL or absolute.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    pub service_type: String,
    pub service_id: String,
    #[serde(rename = "controlURL")]
    pub control_url: String,
    #[serde(rename = "eventSubURL")]
    pub event_sub_url: String,
    #[serde(rename = "SCPDURL")]
    pub scpd_url: String,
}

impl DeviceDescription {
    /// Parse a device description document.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::ParseError` when the XML is malformed.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let root: Root = quick_xml::de::from_str(xml).map_err(|e| {
            DiscoveryError::ParseError(format!("failed to parse device description: {}", e))
        })?;

        Ok(root.device)
    }

    /// Services in document order.
    pub fn services(&self) -> &[Service] {
        &self.service_list.services
    }

    /// First service whose type contains the capability substring,
    /// e.g. `"ContentDirectory"`.
    pub fn find_service(&self, capability: &str) -> Option<&Service> {
        self.services()
            .iter()
            .find(|service| service.service_type.contains(capability))
    }
}

/// Fetch and parse a device description with a single GET, buffering the
/// whole body before parsing. No retries; transport failures surface as
/// `NetworkError`.
pub fn fetch_description(
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<DeviceDescription> {
    debug!(url, "fetching device description");

    let response = client.get(url).send().map_err(|e| {
        DiscoveryError::NetworkError(format!("failed to fetch device description: {}", e))
    })?;

    let xml = response
        .text()
        .map_err(|e| DiscoveryError::NetworkError(format!("failed to read response body: {}", e)))?;

    DeviceDescription::from_xml(&xml)
}

/// Scheme-host-port prefix of a URL, for resolving relative control URLs
/// against the description's origin.
///
/// `http://10.0.0.1:64321/DmsDesc.xml` → `http://10.0.0.1:64321`
pub fn base_url(url: &str) -> Option<String> {
    let authority_start = url.find("//")? + 2;
    let end = url[authority_start..]
        .find('/')
        .map(|i| authority_start + i)
        .unwrap_or(url.len());
    Some(url[..end].to_string())
}
