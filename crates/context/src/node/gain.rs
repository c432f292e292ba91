use crate::{context::Context, node::AudioNode};
use graph::{node::Options, Node, Param};

#[derive(Clone, Debug)]
pub struct Gain {
    pub(crate) node: Node,
    gain: Param,
}

impl Gain {
    /// A gain node has as many channels as the context's destination.
    pub fn new(context: &Context) -> Self {
        let channels = context.destination().channel_count();
        let node = context.create_node(Options::new(channels, 1, 1));
        let gain = Param::new(&node, 1.0, f64::NEG_INFINITY, f64::INFINITY);
        Self { node, gain }
    }

    pub fn gain(&self) -> &Param {
        &self.gain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Options;

    #[test]
    fn shape() {
        let context = Context::new(Options {
            num_output_channels: 4,
            ..Options::default()
        })
        .unwrap();
        let gain = context.create_gain();
        assert_eq!(gain.channel_count(), 4);
        assert_eq!((gain.number_of_inputs(), gain.number_of_outputs()), (1, 1));
        assert_eq!(gain.gain().default_value(), 1.0);
        assert_eq!(gain.gain().min_value(), f64::NEG_INFINITY);
        assert_eq!(gain.gain().owner().map(|node| node.id()), Some(gain.id()));
    }

    #[test]
    fn unbounded_gain() {
        let context = Context::new(crate::Options::default()).unwrap();
        let gain = context.create_gain();
        assert_eq!(gain.gain().set_value(-12.5), Ok(-12.5));
        assert_eq!(gain.gain().set_value(1e9), Ok(1e9));
    }
}
