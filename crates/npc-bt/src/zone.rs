use std::collections::BTreeMap;
use std::time::Duration;

use npc_core::{EntityId, ZoneId};
use tracing::{debug, trace};

use crate::Agent;

/// A set of agents ticked together.
///
/// Agents are visited in ascending entity order. Each update is independent:
/// no agent observes another agent's tree state.
#[derive(Debug)]
pub struct Zone {
    id: ZoneId,
    agents: BTreeMap<EntityId, Agent>,
    ticks: u64,
}

impl Zone {
    pub fn new(id: ZoneId) -> Self {
        Self {
            id,
            agents: BTreeMap::new(),
            ticks: 0,
        }
    }

    pub fn id(&self) -> ZoneId {
        self.id
    }

    /// Register `agent`, returning the agent it replaces (same entity), if any.
    pub fn add_agent(&mut self, mut agent: Agent) -> Option<Agent> {
        agent.set_zone(Some(self.id));
        debug!(zone = %self.id, entity = agent.entity(), "agent added");
        let mut replaced = self.agents.insert(agent.entity(), agent)?;
        replaced.set_zone(None);
        Some(replaced)
    }

    pub fn remove_agent(&mut self, entity: EntityId) -> Option<Agent> {
        let mut agent = self.agents.remove(&entity)?;
        agent.set_zone(None);
        debug!(zone = %self.id, entity, "agent removed");
        Some(agent)
    }

    pub fn agent(&self, entity: EntityId) -> Option<&Agent> {
        self.agents.get(&entity)
    }

    pub fn agent_mut(&mut self, entity: EntityId) -> Option<&mut Agent> {
        self.agents.get_mut(&entity)
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Number of completed zone updates.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Update every agent that is not paused. Returns how many were ticked.
    pub fn update(&mut self, elapsed: Duration) -> usize {
        let mut ticked = 0;
        for agent in self.agents.values_mut().filter(|a| !a.is_paused()) {
            agent.update(elapsed);
            ticked += 1;
        }
        self.ticks += 1;
        trace!(zone = %self.id, tick = self.ticks, ticked, "zone tick");
        ticked
    }
}
