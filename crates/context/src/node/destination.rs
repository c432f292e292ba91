use graph::{node::Options, Graph, Node};

/// The speaker sink of a context: one input, no outputs.
#[derive(Clone, Debug)]
pub struct Destination {
    pub(crate) node: Node,
}

impl Destination {
    pub(crate) fn new(graph: &Graph, num_channels: usize) -> Self {
        let node = Node::new(graph, Options::new(num_channels, 1, 0));
        Self { node }
    }

    /// The most channels the sink accepts.
    pub fn max_channel_count(&self) -> usize {
        buffer::MAX_CHANNELS
    }
}
