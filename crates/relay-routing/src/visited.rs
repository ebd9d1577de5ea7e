use std::rc::Rc;

use relay_core::NodeIndex;

#[derive(Debug)]
struct Link {
    node: NodeIndex,
    next: Option<Rc<Link>>,
}

/// Persistent set of nodes visited along one search branch.
///
/// [`with`](VisitedSet::with) prepends in O(1) and shares the tail, so each
/// recursive call extends its parent's set without copying it, and sibling
/// branches never see each other's additions.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    head: Option<Rc<Link>>,
    len: usize,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new set containing everything in `self` plus `node`.
    pub fn with(&self, node: NodeIndex) -> Self {
        Self {
            head: Some(Rc::new(Link {
                node,
                next: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Linear in branch depth.
    pub fn contains(&self, node: NodeIndex) -> bool {
        self.iter().any(|n| n == node)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Most recently added first.
    pub fn iter(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        let mut cursor = self.head.as_deref();
        std::iter::from_fn(move || {
            let link = cursor?;
            cursor = link.next.as_deref();
            Some(link.node)
        })
    }
}
