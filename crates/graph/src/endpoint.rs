use crate::{graph, node::Node, param::Param};
use core::fmt;
use std::{
    cell::RefCell,
    rc::Weak,
    sync::atomic::{AtomicUsize, Ordering},
};

/// Identity of a node or parameter. Never reused within a process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EndpointId(usize);

/// Anything that can be the destination of an edge.
#[derive(Clone)]
pub enum Endpoint {
    Node(Node),
    Param(Param),
}

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

impl EndpointId {
    pub(crate) fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "endpoint #{}", self.0)
    }
}

impl Endpoint {
    pub fn id(&self) -> EndpointId {
        match self {
            Self::Node(node) => node.id(),
            Self::Param(param) => param.id(),
        }
    }

    /// The number of input ports. A parameter has exactly one.
    pub fn number_of_inputs(&self) -> usize {
        match self {
            Self::Node(node) => node.number_of_inputs(),
            Self::Param(_) => 1,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            Self::Param(_) => None,
        }
    }

    pub fn as_param(&self) -> Option<&Param> {
        match self {
            Self::Node(_) => None,
            Self::Param(param) => Some(param),
        }
    }

    pub(crate) fn graph(&self) -> &Weak<RefCell<graph::Inner>> {
        match self {
            Self::Node(node) => &node.inner.graph,
            Self::Param(param) => &param.inner.graph,
        }
    }
}

impl PartialEq for Endpoint {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Endpoint {}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(node) => fmt::Debug::fmt(node, f),
            Self::Param(param) => fmt::Debug::fmt(param, f),
        }
    }
}

impl From<Node> for Endpoint {
    fn from(value: Node) -> Self {
        Self::Node(value)
    }
}

impl From<&Node> for Endpoint {
    fn from(value: &Node) -> Self {
        Self::Node(value.clone())
    }
}

impl From<Param> for Endpoint {
    fn from(value: Param) -> Self {
        Self::Param(value)
    }
}

impl From<&Param> for Endpoint {
    fn from(value: &Param) -> Self {
        Self::Param(value.clone())
    }
}

impl From<&Endpoint> for Endpoint {
    fn from(value: &Endpoint) -> Self {
        value.clone()
    }
}
