use std::collections::BTreeMap;

use bevy::prelude::*;

use super::error::LayoutError;
use super::graph::{AirportTopology, LayoutDesc};
use super::layouts;
use super::types::AirportKind;

/// All airport layouts known to the simulation.
///
/// Built once at startup; layouts are immutable afterwards and shared by
/// every station of that kind.
#[derive(Resource, Debug)]
pub struct AirportRegistry {
    layouts: BTreeMap<AirportKind, AirportTopology>,
}

impl Default for AirportRegistry {
    fn default() -> Self {
        let mut layouts = BTreeMap::new();
        for desc in [layouts::dummy(), layouts::small(), layouts::heliport()] {
            let topology = AirportTopology::builtin(desc);
            layouts.insert(topology.kind(), topology);
        }
        Self { layouts }
    }
}

impl AirportRegistry {
    pub fn get(&self, kind: AirportKind) -> Option<&AirportTopology> {
        self.layouts.get(&kind)
    }

    /// The holding-pattern topology used when no airport is available.
    pub fn dummy(&self) -> &AirportTopology {
        match self.layouts.get(&AirportKind::Dummy) {
            Some(t) => t,
            None => unreachable!("dummy layout is registered at construction"),
        }
    }

    /// Topology for a kind, falling back to the dummy layout.
    pub fn get_or_dummy(&self, kind: AirportKind) -> &AirportTopology {
        self.get(kind).unwrap_or_else(|| self.dummy())
    }

    /// Register a custom layout after validating it.
    pub fn register(&mut self, desc: LayoutDesc) -> Result<AirportKind, LayoutError> {
        let topology = AirportTopology::from_layout(desc)?;
        topology.validate()?;
        let kind = topology.kind();
        if self.layouts.contains_key(&kind) {
            warn!("replacing airport layout {:?}", kind);
        }
        self.layouts.insert(kind, topology);
        Ok(kind)
    }

    /// Parse and register a layout from JSON.
    pub fn register_json(&mut self, json: &str) -> Result<AirportKind, LayoutError> {
        let desc: LayoutDesc = serde_json::from_str(json)?;
        self.register(desc)
    }

    pub fn kinds(&self) -> impl Iterator<Item = AirportKind> + '_ {
        self.layouts.keys().copied()
    }
}
