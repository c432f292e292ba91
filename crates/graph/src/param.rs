use crate::{
    endpoint::EndpointId,
    error::Result,
    graph::{self, Slot},
    node::{self, Node},
};
use automation::{AudioParam, Method, Timeline, Value};
use core::fmt;
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

/// A handle to an automatable parameter owned by a [Node]. Parameters can be the destination of
/// an edge but never a source.
#[derive(Clone)]
pub struct Param {
    pub(crate) inner: Rc<Inner>,
}

pub(crate) struct Inner {
    pub(crate) id: EndpointId,
    pub(crate) owner: Weak<node::Inner>,
    pub(crate) graph: Weak<RefCell<graph::Inner>>,
    pub(crate) automation: RefCell<AudioParam>,
}

impl Param {
    /// Create a parameter owned by `owner`, registered in the owner's graph.
    pub fn new(owner: &Node, default_value: f64, min_value: f64, max_value: f64) -> Self {
        let id = EndpointId::next();
        let graph = owner.inner.graph.clone();
        let inner = Rc::new_cyclic(|weak| {
            if let Some(graph) = graph.upgrade() {
                graph.borrow_mut().insert(id, Slot::Param(weak.clone()));
            }
            Inner {
                id,
                owner: Rc::downgrade(&owner.inner),
                graph,
                automation: RefCell::new(AudioParam::new(default_value, min_value, max_value)),
            }
        });
        tracing::debug!(%id, owner = %owner.id(), default_value, min_value, max_value, "created param");
        Self { inner }
    }

    pub fn id(&self) -> EndpointId {
        self.inner.id
    }

    /// The node this parameter belongs to, if it is still alive.
    pub fn owner(&self) -> Option<Node> {
        self.inner.owner.upgrade().map(|inner| Node { inner })
    }

    pub fn default_value(&self) -> f64 {
        self.inner.automation.borrow().default_value()
    }

    pub fn min_value(&self) -> f64 {
        self.inner.automation.borrow().min_value()
    }

    pub fn max_value(&self) -> f64 {
        self.inner.automation.borrow().max_value()
    }

    pub fn value(&self) -> f64 {
        self.inner.automation.borrow().value()
    }

    /// A copy of the scheduled events.
    pub fn timeline(&self) -> Timeline {
        self.inner.automation.borrow().timeline().clone()
    }

    /// Set the value immediately. Returns the stored, clamped value.
    pub fn set_value(&self, value: f64) -> Result<f64> {
        Ok(self.inner.automation.borrow_mut().set_value(value)?)
    }

    pub fn set_value_at_time(&self, value: f64, time: f64) -> Result<&Self> {
        self.automate(|param| param.set_value_at_time(value, time).map(drop))
    }

    pub fn linear_ramp_to_value_at_time(&self, value: f64, time: f64) -> Result<&Self> {
        self.automate(|param| param.linear_ramp_to_value_at_time(value, time).map(drop))
    }

    pub fn exponential_ramp_to_value_at_time(&self, value: f64, time: f64) -> Result<&Self> {
        self.automate(|param| {
            param
                .exponential_ramp_to_value_at_time(value, time)
                .map(drop)
        })
    }

    pub fn set_target_at_time(&self, target: f64, start: f64, time_constant: f64) -> Result<&Self> {
        self.automate(|param| {
            param
                .set_target_at_time(target, start, time_constant)
                .map(drop)
        })
    }

    pub fn set_value_curve_at_time(
        &self,
        curve: &[f32],
        start: f64,
        duration: f64,
    ) -> Result<&Self> {
        self.automate(|param| {
            param
                .set_value_curve_at_time(curve, start, duration)
                .map(drop)
        })
    }

    pub fn cancel_scheduled_values(&self, time: f64) -> Result<&Self> {
        self.automate(|param| param.cancel_scheduled_values(time).map(drop))
    }

    /// Invoke a method with untyped arguments.
    pub fn call(&self, method: Method, args: &[Value]) -> Result<()> {
        Ok(self.inner.automation.borrow_mut().call(method, args)?)
    }

    /// The value the timeline produces at `time`, without publishing it.
    pub fn evaluate_at(&self, time: f64) -> f64 {
        self.inner.automation.borrow().evaluate_at(time)
    }

    /// Evaluate at `time` and publish the result as the current value.
    pub fn advance(&self, time: f64) -> f64 {
        self.inner.automation.borrow_mut().advance(time)
    }

    pub fn reset(&self) {
        self.inner.automation.borrow_mut().reset();
    }

    fn automate(
        &self,
        f: impl FnOnce(&mut AudioParam) -> automation::Result<()>,
    ) -> Result<&Self> {
        f(&mut self.inner.automation.borrow_mut())?;
        Ok(self)
    }
}

impl PartialEq for Param {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Param {}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let automation = self.inner.automation.borrow();
        f.debug_struct("Param")
            .field("id", &self.inner.id)
            .field("value", &automation.value())
            .field("min_value", &automation.min_value())
            .field("max_value", &automation.max_value())
            .finish()
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let Some(shared) = self.graph.upgrade() else {
            return;
        };
        let Ok(mut inner) = shared.try_borrow_mut() else {
            tracing::warn!(id = %self.id, "graph is borrowed, param stays registered");
            return;
        };
        let slot = inner.remove(self.id);
        drop(inner);
        if let Some(slot) = slot {
            graph::release(slot);
        }
    }
}
