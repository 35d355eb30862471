pub mod decision;
pub mod finding;
pub mod graph;
pub mod probe;

pub use decision::{Decision, Exploitable};
pub use finding::Finding;
pub use graph::{ExposureGraph, GraphEdge, GraphMeta, GraphNode, NodeType, Risk};
pub use probe::{ExecutionResult, ProbeProgram};
