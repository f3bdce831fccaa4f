//! Fixed-shape JSON scaffolds written by `gekko generate`.
//!
//! The shapes mirror what the platform loads: a zone definition with empty
//! trigger/action lists, and a flow definition seeded with a single trigger
//! step.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Contents of a `<name>.zone.json` definition file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneScaffold {
    /// Zone identifier, `zone_<name>`.
    pub id: String,
    /// Human-readable name, as given.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Definition schema version.
    pub version: String,
    /// Event types that activate the zone; starts empty.
    pub triggers: Vec<String>,
    /// Actions the zone performs; starts empty.
    pub actions: Vec<String>,
}

impl ZoneScaffold {
    /// Scaffold for a zone called `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            id: format!("zone_{name}"),
            name: name.to_string(),
            description: format!("Automation zone for {name}"),
            version: "1.0.0".to_string(),
            triggers: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// File name the scaffold is written under.
    #[must_use]
    pub fn file_name(name: &str) -> String {
        format!("{}.zone.json", name.to_lowercase())
    }
}

/// One step inside a [`FlowScaffold`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowScaffoldStep {
    /// Step identifier, unique within the flow.
    pub id: String,
    /// Step kind, e.g. `trigger`.
    #[serde(rename = "type")]
    pub step_type: String,
    /// Step configuration; starts empty.
    pub config: Map<String, Value>,
}

/// Contents of a `<name>.flow.json` definition file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowScaffold {
    /// Flow identifier, `flow_<name>`.
    pub id: String,
    /// Human-readable name, as given.
    pub name: String,
    /// Ordered steps; seeded with one trigger step.
    pub steps: Vec<FlowScaffoldStep>,
}

impl FlowScaffold {
    /// Scaffold for a flow called `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            id: format!("flow_{name}"),
            name: name.to_string(),
            steps: vec![FlowScaffoldStep {
                id: "start".to_string(),
                step_type: "trigger".to_string(),
                config: Map::new(),
            }],
        }
    }

    /// File name the scaffold is written under.
    #[must_use]
    pub fn file_name(name: &str) -> String {
        format!("{}.flow.json", name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zone_scaffold_shape() {
        let zone = ZoneScaffold::new("Payments");
        assert_eq!(
            serde_json::to_value(&zone).expect("serializable"),
            json!({
                "id": "zone_Payments",
                "name": "Payments",
                "description": "Automation zone for Payments",
                "version": "1.0.0",
                "triggers": [],
                "actions": []
            })
        );
    }

    #[test]
    fn zone_file_name_is_lowercased() {
        assert_eq!(ZoneScaffold::file_name("Payments"), "payments.zone.json");
    }

    #[test]
    fn flow_scaffold_starts_with_a_trigger_step() {
        let flow = FlowScaffold::new("Refunds");
        assert_eq!(
            serde_json::to_value(&flow).expect("serializable"),
            json!({
                "id": "flow_Refunds",
                "name": "Refunds",
                "steps": [
                    {"id": "start", "type": "trigger", "config": {}}
                ]
            })
        );
    }

    #[test]
    fn flow_file_name_is_lowercased() {
        assert_eq!(FlowScaffold::file_name("ReFunds"), "refunds.flow.json");
    }

    #[test]
    fn scaffolds_round_trip() {
        let zone = ZoneScaffold::new("ops");
        let text = serde_json::to_string_pretty(&zone).expect("serializable");
        let parsed: ZoneScaffold = serde_json::from_str(&text).expect("parseable");
        assert_eq!(parsed, zone);
    }
}
