//! Node kinds. Every kind wraps a [graph::Node] and exposes the connection contract through
//! [AudioNode].
use crate::error::Result;
use graph::{
    node::{ChannelCountMode, ChannelInterpretation},
    Edge, Endpoint, EndpointId, Node,
};

pub mod analyser;
pub mod buffer_source;
pub mod convolver;
pub mod delay;
pub mod destination;
pub mod gain;
pub mod panner;
pub mod script_processor;

pub use analyser::Analyser;
pub use buffer_source::{BufferSource, PlaybackState};
pub use convolver::Convolver;
pub use delay::Delay;
pub use destination::Destination;
pub use gain::Gain;
pub use panner::{DistanceModel, Panner, PanningModel};
pub use script_processor::{AudioProcessingEvent, ScriptProcessor};

pub trait AudioNode {
    fn node(&self) -> &Node;

    fn id(&self) -> EndpointId {
        self.node().id()
    }

    fn channel_count(&self) -> usize {
        self.node().channel_count()
    }

    fn number_of_inputs(&self) -> usize {
        self.node().number_of_inputs()
    }

    fn number_of_outputs(&self) -> usize {
        self.node().number_of_outputs()
    }

    fn channel_count_mode(&self) -> ChannelCountMode {
        self.node().channel_count_mode()
    }

    fn channel_interpretation(&self) -> ChannelInterpretation {
        self.node().channel_interpretation()
    }

    /// Connect output 0 to input 0 of `destination`, returning the destination.
    fn connect(&self, destination: impl Into<Endpoint>) -> Result<Endpoint> {
        Ok(self.node().connect(destination)?)
    }

    fn connect_port(
        &self,
        destination: impl Into<Endpoint>,
        output: usize,
        input: usize,
    ) -> Result<Endpoint> {
        Ok(self.node().connect_port(destination, output, input)?)
    }

    fn disconnect(&self, destination: impl Into<Endpoint>) -> Result<()> {
        Ok(self.node().disconnect(destination)?)
    }

    fn disconnect_port(
        &self,
        destination: impl Into<Endpoint>,
        output: usize,
        input: usize,
    ) -> Result<()> {
        Ok(self.node().disconnect_port(destination, output, input)?)
    }

    fn disconnect_all(&self) -> usize {
        self.node().disconnect_all()
    }

    fn destinations(&self) -> Vec<Endpoint> {
        self.node().destinations()
    }

    fn edges(&self) -> Vec<Edge> {
        self.node().edges()
    }

    fn connected_to(&self, target: impl Into<Endpoint>) -> bool {
        self.node().connected_to(target)
    }
}

impl AudioNode for Node {
    fn node(&self) -> &Node {
        self
    }
}

macro_rules! audio_node {
    ($($kind:ty),* $(,)?) => {
        $(
            impl AudioNode for $kind {
                fn node(&self) -> &Node {
                    &self.node
                }
            }

            impl From<&$kind> for Endpoint {
                fn from(value: &$kind) -> Self {
                    Endpoint::from(&value.node)
                }
            }
        )*
    };
}

audio_node!(
    Analyser,
    BufferSource,
    Convolver,
    Delay,
    Destination,
    Gain,
    Panner,
    ScriptProcessor,
);
