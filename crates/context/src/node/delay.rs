use crate::{
    context::Context,
    error::{Error, Result},
};
use graph::{node::Options, Node, Param};

/// The exclusive upper bound of a delay line's maximum delay time, in seconds.
pub const MAX_DELAY_TIME: f64 = 180.0;

#[derive(Clone, Debug)]
pub struct Delay {
    pub(crate) node: Node,
    delay_time: Param,
    max_delay_time: f64,
}

impl Delay {
    /// Create a delay line whose `delay_time` can reach `max_delay_time` seconds.
    pub fn new(context: &Context, max_delay_time: f64) -> Result<Self> {
        if !(max_delay_time > 0.0 && max_delay_time < MAX_DELAY_TIME) {
            return Err(Error::NotSupported(
                "maximum delay time must be in the open range (0, 180)",
            ));
        }
        let node = context.create_node(Options::new(2, 1, 1));
        let delay_time = Param::new(&node, 0.0, 0.0, max_delay_time);
        Ok(Self {
            node,
            delay_time,
            max_delay_time,
        })
    }

    pub fn delay_time(&self) -> &Param {
        &self.delay_time
    }

    pub fn max_delay_time(&self) -> f64 {
        self.max_delay_time
    }
}
