//! Events emitted while walking a ContentDirectory tree.

use didl_parser::Resource;

/// One display record from the walk.
///
/// `depth` is the nesting level below the walk's starting object (the
/// starting listing's entries are at depth 0).
#[derive(Debug, Clone, PartialEq)]
pub enum WalkEvent {
    /// A container was encountered; when its reported child count is
    /// non-zero, the walker descends into it next
    ContainerEntered {
        depth: usize,
        id: String,
        title: String,
        child_count: u32,
    },

    /// An item with an image class was found
    ImageFound {
        depth: usize,
        title: String,
        /// Empty when the server provided no date
        date: String,
        /// Resources in document order
        resources: Vec<ImageResource>,
    },
}

/// Resource details carried on an image event
#[derive(Debug, Clone, PartialEq)]
pub struct ImageResource {
    pub url: String,
    pub protocol_info: String,
    pub size: String,
    pub resolution: String,
}

impl From<&Resource> for ImageResource {
    fn from(res: &Resource) -> Self {
        Self {
            url: res.url.clone(),
            protocol_info: res.protocol_info.clone(),
            size: res.size.clone(),
            resolution: res.resolution.clone(),
        }
    }
}
