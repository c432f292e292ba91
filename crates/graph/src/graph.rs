use crate::{edge::Edge, endpoint::EndpointId, param::Param};
use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    rc::{Rc, Weak},
};
use util::collections::set;

/// The connection graph of one context. Cloning a [Graph] shares it.
///
/// The graph stores every outgoing edge of every live node. Nodes and parameters only hold a weak
/// reference back to the graph, so dropping the last [Graph] releases all edges, including cycles.
#[derive(Clone, Default)]
pub struct Graph {
    pub(crate) inner: Rc<RefCell<Inner>>,
}

#[derive(Default)]
pub(crate) struct Inner {
    pub(crate) slots: BTreeMap<EndpointId, Slot>,
}

pub(crate) enum Slot {
    Node(Vec<Edge>),
    Param(Weak<crate::param::Inner>),
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if both handles refer to the same graph.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// The number of live endpoints.
    pub fn len(&self) -> usize {
        self.inner.borrow().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().slots.is_empty()
    }

    /// The total number of edges.
    pub fn num_edges(&self) -> usize {
        self.inner
            .borrow()
            .slots
            .values()
            .map(|slot| match slot {
                Slot::Node(edges) => edges.len(),
                Slot::Param(_) => 0,
            })
            .sum()
    }

    /// Every live parameter, in creation order.
    pub fn params(&self) -> Vec<Param> {
        self.inner
            .borrow()
            .slots
            .values()
            .filter_map(|slot| match slot {
                Slot::Param(param) => param.upgrade().map(|inner| Param { inner }),
                Slot::Node(_) => None,
            })
            .collect()
    }

    pub(crate) fn downgrade(&self) -> Weak<RefCell<Inner>> {
        Rc::downgrade(&self.inner)
    }
}

thread_local! {
    static RELEASED: RefCell<Vec<Slot>> = const { RefCell::new(Vec::new()) };
    static RELEASING: Cell<bool> = const { Cell::new(false) };
}

/// Drop a slot that was removed from its graph.
///
/// Dropping a slot drops its edges, which can release destinations that remove slots of their
/// own. Those are queued and dropped by the outermost call in a loop, so releasing a long chain
/// of endpoints uses constant stack depth.
pub(crate) fn release(slot: Slot) {
    // During thread teardown the queue may be gone. The slot is then dropped in place.
    if RELEASED
        .try_with(|queue| queue.borrow_mut().push(slot))
        .is_err()
    {
        return;
    }
    if !matches!(
        RELEASING.try_with(|releasing| releasing.replace(true)),
        Ok(false)
    ) {
        return;
    }
    while let Some(slot) = RELEASED.with(|queue| queue.borrow_mut().pop()) {
        drop(slot);
    }
    RELEASING.with(|releasing| releasing.set(false));
}

impl Inner {
    pub(crate) fn insert(&mut self, id: EndpointId, slot: Slot) {
        self.slots.insert(id, slot);
    }

    /// Remove an endpoint. The slot is returned so that the caller can drop it (and the edges it
    /// holds) after releasing its borrow of the graph.
    pub(crate) fn remove(&mut self, id: EndpointId) -> Option<Slot> {
        self.slots.remove(&id)
    }

    pub(crate) fn edges(&self, id: EndpointId) -> Option<&[Edge]> {
        match self.slots.get(&id)? {
            Slot::Node(edges) => Some(edges),
            Slot::Param(_) => None,
        }
    }

    pub(crate) fn edges_mut(&mut self, id: EndpointId) -> Option<&mut Vec<Edge>> {
        match self.slots.get_mut(&id)? {
            Slot::Node(edges) => Some(edges),
            Slot::Param(_) => None,
        }
    }

    /// Returns true if `target` is a destination of `source`, or of any endpoint reachable from
    /// it. Each endpoint is expanded at most once, so cycles terminate.
    pub(crate) fn connected_to(&self, source: EndpointId, target: EndpointId) -> bool {
        let mut visited = set::with_capacity(self.slots.len());
        let mut stack = vec![source];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let Some(edges) = self.edges(id) else {
                continue;
            };
            for edge in edges {
                let next = edge.destination.id();
                if next == target {
                    return true;
                }
                if !visited.contains(&next) {
                    stack.push(next);
                }
            }
        }
        false
    }
}
