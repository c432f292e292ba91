//! Connection graph of audio nodes and their parameters.
//!
//! ## Usage
//!
//! ```
//! use patchbay_graph as graph;
//!
//! let graph = graph::Graph::new();
//!
//! // Nodes are created inside a graph and keep a weak reference back to it.
//! let source = graph::Node::new(&graph, graph::node::Options::new(2, 0, 1));
//! let gain = graph::Node::new(&graph, graph::node::Options::new(2, 1, 1));
//! let level = graph::Param::new(&gain, 1.0, 0.0, 1.0);
//!
//! // Edges are stored per source, in insertion order.
//! source.connect(&gain).unwrap();
//! source.connect(&level).unwrap();
//! assert_eq!(source.destinations().len(), 2);
//! assert!(source.connected_to(&level));
//! ```
pub mod edge;
pub mod endpoint;
pub mod error;
pub mod graph;
pub mod node;
pub mod param;

pub use edge::Edge;
pub use endpoint::{Endpoint, EndpointId};
pub use error::{Error, Port, Result};
pub use graph::Graph;
pub use node::Node;
pub use param::Param;
