//! SOAP Browse client for UPnP ContentDirectory services.
//!
//! Issues `Browse` actions against a media server's control URL and returns
//! the listing as a parsed [`DidlLite`]. The DIDL-Lite payload arrives
//! XML-escaped inside the SOAP envelope's `Result` element; extraction is a
//! deliberate marker-substring search rather than a nested envelope parse,
//! because the payload is escaped text rather than a child document.

mod error;

pub use error::BrowseError;

use didl_parser::{parse_didl, xml_decode, DidlLite};
use std::time::Duration;
use tracing::debug;
use xmltree::Element;

/// Service type URI for ContentDirectory version 1.
pub const CONTENT_DIRECTORY: &str = "urn:schemas-upnp-org:service:ContentDirectory:1";

const BROWSE_ACTION: &str = "Browse";

const RESULT_OPEN: &str = "<Result>";
const RESULT_CLOSE: &str = "</Result>";

/// Configuration for [`BrowseClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Connect timeout for the HTTP transport
    /// Default: 5 seconds
    pub connect_timeout: Duration,

    /// Read timeout for the HTTP transport
    /// Default: 10 seconds
    pub read_timeout: Duration,

    /// Value of the SOAP `RequestedCount` field. There is no pagination:
    /// listings with more direct children than this are truncated.
    /// Default: 100
    pub requested_count: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(10),
            requested_count: 100,
        }
    }
}

/// A minimal SOAP client for ContentDirectory browsing
#[derive(Debug, Clone)]
pub struct BrowseClient {
    agent: ureq::Agent,
    requested_count: u32,
}

impl BrowseClient {
    /// Create a client with the default configuration
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(config.connect_timeout)
                .timeout_read(config.read_timeout)
                .build(),
            requested_count: config.requested_count,
        }
    }

    /// Browse the direct children of `object_id` on the ContentDirectory
    /// service at `control_url` (resolved against `base_url` when relative).
    ///
    /// Only the first `requested_count` children are returned; there is no
    /// follow-up page request.
    pub fn browse(
        &self,
        base_url: &str,
        control_url: &str,
        object_id: &str,
    ) -> Result<DidlLite, BrowseError> {
        let url = resolve_control_url(base_url, control_url);
        let envelope = browse_envelope(object_id, self.requested_count);
        let soap_action = format!("\"{}#{}\"", CONTENT_DIRECTORY, BROWSE_ACTION);

        debug!(%url, object_id, "sending Browse request");

        let response = match self
            .agent
            .post(&url)
            .set("Content-Type", "text/xml; charset=utf-8")
            .set("SOAPAction", &soap_action)
            .send_string(&envelope)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = response.into_string().unwrap_or_default();
                return Err(match fault_code(&body) {
                    Some(fault) => BrowseError::Fault(fault),
                    None => BrowseError::Network(format!("Browse returned HTTP {}", code)),
                });
            }
            Err(e) => return Err(BrowseError::Network(e.to_string())),
        };

        let body = response
            .into_string()
            .map_err(|e| BrowseError::Network(e.to_string()))?;

        let payload = extract_result(&body).ok_or_else(|| {
            BrowseError::Protocol(format!("Result not found in response: {}", excerpt(&body)))
        })?;

        let didl = parse_didl(&xml_decode::unescape_entities(payload))?;
        debug!(
            object_id,
            containers = didl.containers.len(),
            items = didl.items.len(),
            "Browse response parsed"
        );
        Ok(didl)
    }
}

impl Default for BrowseClient {
    fn default() -> Self {
        Self::new()
    }
}

/// A control URL that already carries a scheme is used as-is; anything else
/// is treated as a path and concatenated onto the base URL.
fn resolve_control_url(base_url: &str, control_url: &str) -> String {
    if control_url.starts_with("http") {
        control_url.to_string()
    } else {
        format!("{}{}", base_url, control_url)
    }
}

fn browse_envelope(object_id: &str, requested_count: u32) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">
  <s:Body>
    <u:{action} xmlns:u="{service}">
      <ObjectID>{object_id}</ObjectID>
      <BrowseFlag>BrowseDirectChildren</BrowseFlag>
      <Filter>*</Filter>
      <StartingIndex>0</StartingIndex>
      <RequestedCount>{requested_count}</RequestedCount>
      <SortCriteria></SortCriteria>
    </u:{action}>
  </s:Body>
</s:Envelope>"#,
        action = BROWSE_ACTION,
        service = CONTENT_DIRECTORY,
        object_id = object_id,
        requested_count = requested_count,
    )
}

/// The substring strictly between the literal `<Result>` and `</Result>`
/// markers, or `None` when either marker is absent.
fn extract_result(body: &str) -> Option<&str> {
    let start = body.find(RESULT_OPEN)? + RESULT_OPEN.len();
    let end = body.find(RESULT_CLOSE)?;
    body.get(start..end)
}

/// Pull a UPnP error code out of a SOAP fault envelope, if the body is one.
fn fault_code(body: &str) -> Option<u16> {
    let envelope = Element::parse(body.as_bytes()).ok()?;
    envelope
        .get_child("Body")?
        .get_child("Fault")?
        .get_child("detail")?
        .get_child("UPnPError")?
        .get_child("errorCode")?
        .get_text()?
        .trim()
        .parse()
        .ok()
}

fn excerpt(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
