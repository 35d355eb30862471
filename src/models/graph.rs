use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Risk tier for an exposed service, a pure function of its port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Network,
    Host,
    Service,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphMeta {
    pub cidr: String,
    pub scan_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Present on service nodes only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<Risk>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

/// Node/edge structure describing reachable hosts and services in a
/// scanned range, rooted at a synthetic network node. Built once per
/// scan, immutable afterwards, JSON-serializable for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExposureGraph {
    pub meta: GraphMeta,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

pub const NETWORK_NODE_ID: &str = "network";

impl ExposureGraph {
    pub fn new(cidr: &str) -> Self {
        Self {
            meta: GraphMeta {
                cidr: cidr.to_string(),
                scan_time: Utc::now(),
            },
            nodes: vec![GraphNode {
                id: NETWORK_NODE_ID.to_string(),
                label: cidr.to_string(),
                node_type: NodeType::Network,
                risk: None,
            }],
            edges: Vec::new(),
        }
    }

    /// Add a host node with its network-to-host edge. The edge is appended
    /// before any service edge for that host.
    pub fn add_host(&mut self, host_id: &str) {
        self.nodes.push(GraphNode {
            id: host_id.to_string(),
            label: host_id.to_string(),
            node_type: NodeType::Host,
            risk: None,
        });
        self.edges.push(GraphEdge {
            from: NETWORK_NODE_ID.to_string(),
            to: host_id.to_string(),
        });
    }

    /// Add a service node under an already-added host.
    pub fn add_service(&mut self, host_id: &str, port: u16, risk: Risk) {
        let service_id = format!("{}:{}", host_id, port);
        self.nodes.push(GraphNode {
            id: service_id.clone(),
            label: format!("Port {}", port),
            node_type: NodeType::Service,
            risk: Some(risk),
        });
        self.edges.push(GraphEdge {
            from: host_id.to_string(),
            to: service_id,
        });
    }

    pub fn host_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.node_type == NodeType::Host)
            .count()
    }

    pub fn service_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.node_type == NodeType::Service)
            .count()
    }
}
