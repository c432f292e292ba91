use crate::endpoint::{Endpoint, EndpointId};

/// A directed connection from `source:output` to `destination:input`.
///
/// The edge holds a strong reference to its destination, so a destination stays alive for as long
/// as something is connected to it.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub source: EndpointId,
    pub destination: Endpoint,
    pub output: usize,
    pub input: usize,
}

impl Edge {
    /// Returns true if this edge has the given (destination, output, input) key.
    pub fn matches(&self, destination: EndpointId, output: usize, input: usize) -> bool {
        self.destination.id() == destination && self.output == output && self.input == input
    }
}
