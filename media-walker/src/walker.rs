//! Depth-first traversal of a ContentDirectory container hierarchy.

use crate::event::{ImageResource, WalkEvent};
use browse_client::{BrowseClient, BrowseError};
use didl_parser::DidlLite;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Object id of a ContentDirectory root container, per convention.
pub const ROOT_OBJECT_ID: &str = "0";

/// Transport seam between the walker and the Browse client, so traversal
/// logic can be driven without a network.
pub trait Browse {
    fn browse(&self, object_id: &str) -> Result<DidlLite, BrowseError>;
}

/// A ContentDirectory service endpoint: a [`BrowseClient`] bound to the
/// device's base URL and the service's control URL.
#[derive(Debug, Clone)]
pub struct ContentDirectory {
    client: BrowseClient,
    base_url: String,
    control_url: String,
}

impl ContentDirectory {
    pub fn new(
        client: BrowseClient,
        base_url: impl Into<String>,
        control_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            control_url: control_url.into(),
        }
    }
}

impl Browse for ContentDirectory {
    fn browse(&self, object_id: &str) -> Result<DidlLite, BrowseError> {
        self.client
            .browse(&self.base_url, &self.control_url, object_id)
    }
}

struct Frame {
    didl: DidlLite,
    depth: usize,
    container_idx: usize,
    item_idx: usize,
}

/// Lazy depth-first walk over a container hierarchy.
///
/// One Browse call is in flight at a time, strictly sequential. Per
/// listing, containers come first in document order: each yields a
/// [`WalkEvent::ContainerEntered`] and, when its reported child count is
/// non-zero, the walker issues the recursive Browse on the following
/// `next()` call. Items follow in document order, and only those with an
/// image class yield events.
///
/// Object ids already visited in this walk are not descended into again,
/// so a server reporting cyclic container ids terminates instead of
/// recursing forever. A Browse failure yields one final `Err` and ends the
/// walk; events already yielded stand.
pub struct TreeWalker<B: Browse> {
    browser: B,
    root_id: String,
    stack: Vec<Frame>,
    visited: HashSet<String>,
    pending_descent: Option<(String, usize)>,
    started: bool,
    finished: bool,
}

impl<B: Browse> TreeWalker<B> {
    /// Walk from the conventional root container `"0"`.
    pub fn new(browser: B) -> Self {
        Self::from_object(browser, ROOT_OBJECT_ID)
    }

    /// Walk from an arbitrary starting object id.
    pub fn from_object(browser: B, object_id: impl Into<String>) -> Self {
        Self {
            browser,
            root_id: object_id.into(),
            stack: Vec::new(),
            visited: HashSet::new(),
            pending_descent: None,
            started: false,
            finished: false,
        }
    }

    fn descend(&mut self, object_id: &str, depth: usize) -> Result<(), BrowseError> {
        debug!(object_id, depth, "browsing container");
        let didl = self.browser.browse(object_id)?;
        self.stack.push(Frame {
            didl,
            depth,
            container_idx: 0,
            item_idx: 0,
        });
        Ok(())
    }
}

impl<B: Browse> Iterator for TreeWalker<B> {
    type Item = Result<WalkEvent, BrowseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if !self.started {
            self.started = true;
            let root = self.root_id.clone();
            self.visited.insert(root.clone());
            if let Err(e) = self.descend(&root, 0) {
                self.finished = true;
                return Some(Err(e));
            }
        }

        if let Some((id, depth)) = self.pending_descent.take() {
            if let Err(e) = self.descend(&id, depth) {
                self.finished = true;
                return Some(Err(e));
            }
        }

        loop {
            let frame = match self.stack.last_mut() {
                Some(frame) => frame,
                None => {
                    self.finished = true;
                    return None;
                }
            };

            if frame.container_idx < frame.didl.containers.len() {
                let depth = frame.depth;
                let container = frame.didl.containers[frame.container_idx].clone();
                frame.container_idx += 1;

                if container.child_count > 0 {
                    if self.visited.insert(container.id.clone()) {
                        self.pending_descent = Some((container.id.clone(), depth + 1));
                    } else {
                        warn!(id = %container.id, "object id seen before in this walk, skipping branch");
                    }
                }

                return Some(Ok(WalkEvent::ContainerEntered {
                    depth,
                    id: container.id,
                    title: container.title,
                    child_count: container.child_count,
                }));
            }

            if frame.item_idx < frame.didl.items.len() {
                let depth = frame.depth;
                let item = frame.didl.items[frame.item_idx].clone();
                frame.item_idx += 1;

                if !item.is_image() {
                    continue;
                }

                return Some(Ok(WalkEvent::ImageFound {
                    depth,
                    title: item.title,
                    date: item.date,
                    resources: item.resources.iter().map(ImageResource::from).collect(),
                }));
            }

            self.stack.pop();
        }
    }
}

/// Eagerly walk the tree below `object_id` and collect every event.
///
/// The first Browse failure unwinds the whole walk and is returned as the
/// error; use [`TreeWalker`] directly to keep the events collected before
/// the failure.
pub fn walk_images<B: Browse>(browser: B, object_id: &str) -> Result<Vec<WalkEvent>, BrowseError> {
    TreeWalker::from_object(browser, object_id).collect()
}
