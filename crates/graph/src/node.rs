use crate::{
    edge::Edge,
    endpoint::{Endpoint, EndpointId},
    error::{Error, Port, Result},
    graph::{self, Graph, Slot},
};
use core::fmt;
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

/// A handle to a node in a [Graph]. Cloning the handle does not clone the node.
#[derive(Clone)]
pub struct Node {
    pub(crate) inner: Rc<Inner>,
}

pub(crate) struct Inner {
    pub(crate) id: EndpointId,
    pub(crate) options: Options,
    pub(crate) graph: Weak<RefCell<graph::Inner>>,
}

/// The fixed shape of a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub channel_count: usize,
    pub num_inputs: usize,
    pub num_outputs: usize,
    pub channel_count_mode: ChannelCountMode,
    pub channel_interpretation: ChannelInterpretation,
}

/// How the channel count of a node's inputs is computed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ChannelCountMode {
    #[default]
    Max,
    ClampedMax,
    Explicit,
}

/// How channels are mapped when up- or down-mixing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ChannelInterpretation {
    Speakers,
    #[default]
    Discrete,
}

impl Options {
    pub fn new(channel_count: usize, num_inputs: usize, num_outputs: usize) -> Self {
        Self {
            channel_count,
            num_inputs,
            num_outputs,
            channel_count_mode: ChannelCountMode::default(),
            channel_interpretation: ChannelInterpretation::default(),
        }
    }
}

impl ChannelCountMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Max => "max",
            Self::ClampedMax => "clamped-max",
            Self::Explicit => "explicit",
        }
    }
}

impl ChannelInterpretation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Speakers => "speakers",
            Self::Discrete => "discrete",
        }
    }
}

impl Node {
    /// Create a new node in `graph`. The shape is fixed for the lifetime of the node.
    pub fn new(graph: &Graph, options: Options) -> Self {
        let id = EndpointId::next();
        graph.inner.borrow_mut().insert(id, Slot::Node(Vec::new()));
        tracing::debug!(%id, ?options, "created node");
        Self {
            inner: Rc::new(Inner {
                id,
                options,
                graph: graph.downgrade(),
            }),
        }
    }

    pub fn id(&self) -> EndpointId {
        self.inner.id
    }

    pub fn options(&self) -> &Options {
        &self.inner.options
    }

    pub fn channel_count(&self) -> usize {
        self.inner.options.channel_count
    }

    pub fn number_of_inputs(&self) -> usize {
        self.inner.options.num_inputs
    }

    pub fn number_of_outputs(&self) -> usize {
        self.inner.options.num_outputs
    }

    pub fn channel_count_mode(&self) -> ChannelCountMode {
        self.inner.options.channel_count_mode
    }

    pub fn channel_interpretation(&self) -> ChannelInterpretation {
        self.inner.options.channel_interpretation
    }

    /// The graph this node belongs to, if it still exists.
    pub fn graph(&self) -> Option<Graph> {
        self.inner.graph.upgrade().map(|inner| Graph { inner })
    }

    /// Connect output 0 of this node to input 0 of `destination`.
    pub fn connect(&self, destination: impl Into<Endpoint>) -> Result<Endpoint> {
        self.connect_port(destination, 0, 0)
    }

    /// Connect `output` of this node to `input` of `destination`. Connecting an existing edge
    /// again is a no-op. Returns the destination.
    pub fn connect_port(
        &self,
        destination: impl Into<Endpoint>,
        output: usize,
        input: usize,
    ) -> Result<Endpoint> {
        let destination = destination.into();
        if !destination.graph().ptr_eq(&self.inner.graph) {
            return Err(Error::ContextMismatch);
        }
        self.check_ports(&destination, output, input)?;
        let graph = self.inner.graph.upgrade().ok_or(Error::Lifetime)?;
        let mut graph = graph.borrow_mut();
        let edges = graph.edges_mut(self.id()).ok_or(Error::Lifetime)?;
        let target = destination.id();
        if edges.iter().any(|edge| edge.matches(target, output, input)) {
            return Ok(destination);
        }
        edges.push(Edge {
            source: self.id(),
            destination: destination.clone(),
            output,
            input,
        });
        tracing::debug!(source = %self.id(), destination = %target, output, input, "connected");
        Ok(destination)
    }

    /// Remove the edge from output 0 to input 0 of `destination`.
    pub fn disconnect(&self, destination: impl Into<Endpoint>) -> Result<()> {
        self.disconnect_port(destination, 0, 0)
    }

    /// Remove exactly the edge from `output` to `input` of `destination`. Fails with
    /// [Error::InvalidAccess] if there is no such edge.
    pub fn disconnect_port(
        &self,
        destination: impl Into<Endpoint>,
        output: usize,
        input: usize,
    ) -> Result<()> {
        let destination = destination.into();
        self.check_ports(&destination, output, input)?;
        let target = destination.id();
        let graph = self.inner.graph.upgrade().ok_or(Error::Lifetime)?;
        let removed = {
            let mut graph = graph.borrow_mut();
            let edges = graph.edges_mut(self.id()).ok_or(Error::Lifetime)?;
            let index = edges
                .iter()
                .position(|edge| edge.matches(target, output, input))
                .ok_or(Error::InvalidAccess {
                    destination: target,
                    output,
                    input,
                })?;
            edges.remove(index)
        };
        tracing::debug!(source = %self.id(), destination = %target, output, input, "disconnected");

        // The edge may hold the last reference to its destination, which unregisters itself from
        // the graph when dropped.
        drop(removed);
        Ok(())
    }

    /// Remove every outgoing edge. Returns how many were removed.
    pub fn disconnect_all(&self) -> usize {
        let Some(graph) = self.inner.graph.upgrade() else {
            return 0;
        };
        let removed = graph
            .borrow_mut()
            .edges_mut(self.id())
            .map(std::mem::take)
            .unwrap_or_default();
        tracing::debug!(source = %self.id(), count = removed.len(), "disconnected all");
        removed.len()
    }

    /// The destination of every outgoing edge, in the order the edges were added.
    pub fn destinations(&self) -> Vec<Endpoint> {
        self.edges()
            .into_iter()
            .map(|edge| edge.destination)
            .collect()
    }

    /// A snapshot of the outgoing edges, in the order they were added.
    pub fn edges(&self) -> Vec<Edge> {
        let Some(graph) = self.inner.graph.upgrade() else {
            return Vec::new();
        };
        let graph = graph.borrow();
        graph
            .edges(self.id())
            .map(<[Edge]>::to_vec)
            .unwrap_or_default()
    }

    /// Returns true if `target` can be reached from this node by following one or more edges.
    pub fn connected_to(&self, target: impl Into<Endpoint>) -> bool {
        let target = target.into();
        if !target.graph().ptr_eq(&self.inner.graph) {
            return false;
        }
        let Some(graph) = self.inner.graph.upgrade() else {
            return false;
        };
        let graph = graph.borrow();
        graph.connected_to(self.id(), target.id())
    }

    fn check_ports(&self, destination: &Endpoint, output: usize, input: usize) -> Result<()> {
        let num_outputs = self.number_of_outputs();
        if output > num_outputs {
            return Err(Error::IndexSize {
                port: Port::Output,
                index: output,
                count: num_outputs,
            });
        }
        let num_inputs = destination.number_of_inputs();
        if input > num_inputs {
            return Err(Error::IndexSize {
                port: Port::Input,
                index: input,
                count: num_inputs,
            });
        }
        Ok(())
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.inner.id)
            .field("options", &self.inner.options)
            .finish()
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let Some(shared) = self.graph.upgrade() else {
            return;
        };
        let Ok(mut inner) = shared.try_borrow_mut() else {
            tracing::warn!(id = %self.id, "graph is borrowed, node stays registered");
            return;
        };
        let slot = inner.remove(self.id);
        drop(inner);
        if let Some(slot) = slot {
            graph::release(slot);
        }
    }
}
