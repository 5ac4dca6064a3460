//! Test-only collaborators and oracles used by unit, behaviour and property
//! tests across the workspace.

use std::convert::Infallible;
use std::io;

use crate::{Density, Instance, InstanceSource, ResultSink, SolveRecord};

/// Build an instance from literal test data.
///
/// # Panics
///
/// Panics when the data is not a valid instance.
#[must_use]
pub fn instance(set: &[u64], target: u64) -> Instance {
    match Instance::new(set.to_vec(), target) {
        Ok(instance) => instance,
        Err(err) => panic!("invalid test instance {set:?}/{target}: {err}"),
    }
}

/// Decide feasibility by enumerating every sub-collection.
///
/// Only suitable for small sets; returns `None` above 24 elements.
#[must_use]
pub fn brute_force_feasible(instance: &Instance) -> Option<bool> {
    let set = instance.set();
    if set.len() > 24 {
        return None;
    }
    let target = u128::from(instance.target());
    let feasible = (0_u32..1 << set.len()).any(|mask| {
        let sum: u128 = set
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, &value)| u128::from(value))
            .sum();
        sum == target
    });
    Some(feasible)
}

/// In-memory `ResultSink` that never fails.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<SolveRecord>,
}

impl MemorySink {
    /// Records captured so far, in arrival order.
    pub fn records(&self) -> &[SolveRecord] {
        &self.records
    }
}

impl ResultSink for MemorySink {
    type Error = Infallible;

    fn record(&mut self, record: &SolveRecord) -> Result<(), Self::Error> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// `ResultSink` that rejects every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingSink;

impl ResultSink for FailingSink {
    type Error = io::Error;

    fn record(&mut self, _record: &SolveRecord) -> Result<(), Self::Error> {
        Err(io::Error::other("sink unavailable"))
    }
}

/// `InstanceSource` cycling through a fixed list.
#[derive(Debug, Clone)]
pub struct FixedSource {
    instances: Vec<Instance>,
    density: Option<Density>,
    next: usize,
}

impl FixedSource {
    /// Cycle through `instances`; an empty list yields the empty instance.
    pub fn new<I>(instances: I) -> Self
    where
        I: IntoIterator<Item = Instance>,
    {
        Self {
            instances: instances.into_iter().collect(),
            density: None,
            next: 0,
        }
    }

    /// Label generated instances with a density.
    #[must_use]
    pub fn with_density(mut self, density: Density) -> Self {
        self.density = Some(density);
        self
    }
}

impl InstanceSource for FixedSource {
    type Error = Infallible;

    fn generate(&mut self) -> Result<Instance, Self::Error> {
        let Some(current) = self.instances.get(self.next).cloned() else {
            return Ok(instance(&[], 0));
        };
        self.next = (self.next + 1) % self.instances.len();
        Ok(current)
    }

    fn density(&self) -> Option<Density> {
        self.density
    }
}
