//! # didl-parser
//!
//! Typed model and parser for DIDL-Lite, the content listing vocabulary
//! returned by UPnP ContentDirectory `Browse` calls.
//!
//! The parser is lenient: unknown elements are ignored and absent fields
//! come back zero-valued, so listings from loosely conforming media servers
//! still parse. Only malformed XML is an error.
//!
//! ```
//! use didl_parser::parse_didl;
//!
//! let didl = parse_didl(
//!     r#"<DIDL-Lite><container id="64" parentID="0" childCount="2">
//!        <title>Photos</title></container></DIDL-Lite>"#,
//! )?;
//! assert_eq!(didl.containers[0].id, "64");
//! # Ok::<(), didl_parser::ParseError>(())
//! ```

pub mod error;
pub mod xml_decode;

pub use error::{ParseError, ParseResult};

use serde::Deserialize;

/// Parsed result of one Browse call: the direct children of a single
/// container, split into sub-containers and items, each in document order.
///
/// Zero containers and zero items is a valid empty directory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename = "DIDL-Lite")]
pub struct DidlLite {
    #[serde(rename = "container", default)]
    pub containers: Vec<Container>,

    #[serde(rename = "item", default)]
    pub items: Vec<Item>,
}

impl DidlLite {
    /// Parse a DIDL-Lite document. Namespace prefixes are stripped before
    /// deserialization so servers may use any prefix spelling.
    pub fn from_xml(xml: &str) -> ParseResult<Self> {
        let stripped = xml_decode::strip_namespaces(xml);
        quick_xml::de::from_str(&stripped).map_err(|e| ParseError::XmlDeserializationFailed {
            message: e.to_string(),
            content: xml.to_string(),
        })
    }

    /// True when the listing has no children at all.
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty() && self.items.is_empty()
    }
}

/// Parse a DIDL-Lite document into the typed model.
pub fn parse_didl(xml: &str) -> ParseResult<DidlLite> {
    DidlLite::from_xml(xml)
}

/// A browsable sub-directory in a listing.
///
/// `id` is an opaque string, unique within one Browse response, used as the
/// object id of the next Browse request. `child_count` is a server-reported
/// hint; zero means leaf, but a non-zero value is not guaranteed accurate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Container {
    #[serde(rename = "@id", default)]
    pub id: String,

    #[serde(rename = "@parentID", default)]
    pub parent_id: String,

    #[serde(rename = "@childCount", default)]
    pub child_count: u32,

    #[serde(default)]
    pub title: String,

    /// UPnP class string, e.g. `object.container.storageFolder`
    #[serde(default)]
    pub class: String,
}

/// A leaf media object in a listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Item {
    #[serde(rename = "@id", default)]
    pub id: String,

    #[serde(rename = "@parentID", default)]
    pub parent_id: String,

    #[serde(default)]
    pub title: String,

    /// UPnP class string, e.g. `object.item.imageItem.photo`
    #[serde(default)]
    pub class: String,

    /// Capture or publication date; empty when the server omits it
    #[serde(default)]
    pub date: String,

    #[serde(rename = "res", default)]
    pub resources: Vec<Resource>,
}

impl Item {
    /// Case-sensitive substring match on the UPnP class.
    pub fn is_image(&self) -> bool {
        self.class.contains("image")
    }
}

/// One retrievable representation of an item. The element text is the
/// resource URL; `size` stays a string because servers routinely send
/// empty or non-numeric values.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Resource {
    #[serde(rename = "@protocolInfo", default)]
    pub protocol_info: String,

    #[serde(rename = "@size", default)]
    pub size: String,

    #[serde(rename = "@resolution", default)]
    pub resolution: String,

    #[serde(rename = "$value", default)]
    pub url: String,
}
