//! Persistent context bound to a handler by its ancestors
//!
//! Each `with_group` / `with_attrs` derivation appends one link to an
//! immutable, `Arc`-linked list. Derived handlers share every earlier link
//! with their parent and siblings, so deriving is O(1) and never mutates a
//! chain another handler can see.

use super::attr::Attr;
use super::record::RecordTree;
use super::timestamp::TimestampFormat;
use std::sync::Arc;

/// One derivation step
#[derive(Debug, Clone)]
pub enum ChainLink {
    /// Subsequent links and the record's own attributes nest under this key
    Group(String),
    /// Attributes applied at the current nesting level
    Attrs(Vec<Attr>),
}

#[derive(Debug)]
struct ChainNode {
    link: ChainLink,
    parent: Option<Arc<ChainNode>>,
}

#[derive(Debug, Clone, Default)]
pub struct ContextChain {
    tail: Option<Arc<ChainNode>>,
    len: usize,
}

impl ContextChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// A new chain with `link` appended; `self` is left untouched.
    #[must_use]
    pub fn push(&self, link: ChainLink) -> Self {
        Self {
            tail: Some(Arc::new(ChainNode {
                link,
                parent: self.tail.clone(),
            })),
            len: self.len + 1,
        }
    }

    #[must_use]
    pub fn with_group(&self, name: impl Into<String>) -> Self {
        self.push(ChainLink::Group(name.into()))
    }

    #[must_use]
    pub fn with_attrs(&self, attrs: Vec<Attr>) -> Self {
        self.push(ChainLink::Attrs(attrs))
    }

    /// Links oldest first.
    ///
    /// With `skip_trailing_groups`, group links at the end of the chain are
    /// left out: nothing would ever be inserted under them.
    pub fn links(&self, skip_trailing_groups: bool) -> Vec<&ChainLink> {
        let mut links = Vec::with_capacity(self.len);
        let mut trailing = skip_trailing_groups;
        let mut node = self.tail.as_deref();

        while let Some(current) = node {
            match current.link {
                ChainLink::Group(_) if trailing => {}
                _ => {
                    trailing = false;
                    links.push(&current.link);
                }
            }
            node = current.parent.as_deref();
        }

        links.reverse();
        links
    }

    /// Replay the chain into `root` and return the tree the record's own
    /// attributes belong in.
    pub fn replay<'a>(
        &self,
        root: &'a mut RecordTree,
        skip_trailing_groups: bool,
        time_format: TimestampFormat,
    ) -> &'a mut RecordTree {
        let mut cursor = root;
        for link in self.links(skip_trailing_groups) {
            match link {
                ChainLink::Group(name) => cursor = cursor.subtree_mut(name.as_str()),
                ChainLink::Attrs(attrs) => {
                    for attr in attrs {
                        cursor.append(attr.clone(), time_format);
                    }
                }
            }
        }
        cursor
    }
}
