//! Recursive ContentDirectory traversal.
//!
//! Ties a Browse transport to a depth-first walk of the container
//! hierarchy, yielding display records for containers and image items as a
//! lazy iterator.
//!
//! ```no_run
//! use browse_client::BrowseClient;
//! use media_walker::{ContentDirectory, TreeWalker, WalkEvent};
//!
//! let directory = ContentDirectory::new(
//!     BrowseClient::new(),
//!     "http://10.0.0.1:64321",
//!     "/ctl/ContentDir",
//! );
//!
//! for event in TreeWalker::new(directory) {
//!     match event? {
//!         WalkEvent::ContainerEntered { title, .. } => println!("dir  {}", title),
//!         WalkEvent::ImageFound { title, .. } => println!("img  {}", title),
//!     }
//! }
//! # Ok::<(), browse_client::BrowseError>(())
//! ```

mod event;
mod walker;

pub use event::{ImageResource, WalkEvent};
pub use walker::{walk_images, Browse, ContentDirectory, TreeWalker, ROOT_OBJECT_ID};
