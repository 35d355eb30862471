use provex::config::{RiskTiers, ScanConfig};
use provex::models::{NodeType, Risk};
use provex::scanner::ReachabilityScanner;

use tokio::net::TcpListener;

fn config(ports: Vec<u16>) -> ScanConfig {
    ScanConfig {
        approved_ports: ports,
        connect_timeout_ms: 200,
        max_concurrent_hosts: 8,
        ..ScanConfig::default()
    }
}

#[tokio::test]
async fn test_graph_shape_for_single_host_two_services() {
    let a = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let b = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port_a = a.local_addr().unwrap().port();
    let port_b = b.local_addr().unwrap().port();

    let scanner = ReachabilityScanner::new(config(vec![port_a, port_b]));
    let graph = scanner.scan("127.0.0.1/32").await.unwrap();

    // network root + host + two service nodes
    assert_eq!(graph.nodes.len(), 4);
    assert_eq!(graph.host_count(), 1);
    assert_eq!(graph.service_count(), 2);

    // edges appear in discovery order: network->host, then host->service
    assert_eq!(graph.edges.len(), 3);
    assert_eq!(graph.edges[0].from, "network");
    assert_eq!(graph.edges[0].to, "127.0.0.1");
    assert_eq!(graph.edges[1].from, "127.0.0.1");
    assert_eq!(graph.edges[1].to, format!("127.0.0.1:{}", port_a));
    assert_eq!(graph.edges[2].to, format!("127.0.0.1:{}", port_b));

    drop(a);
    drop(b);
}

#[tokio::test]
async fn test_custom_risk_tiers_applied_to_services() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let mut scan = config(vec![port]);
    scan.risk_tiers = RiskTiers {
        high: vec![port],
        medium: vec![],
    };

    let scanner = ReachabilityScanner::new(scan);
    let graph = scanner.scan("127.0.0.1/32").await.unwrap();

    let service = graph
        .nodes
        .iter()
        .find(|n| n.node_type == NodeType::Service)
        .unwrap();
    assert_eq!(service.risk, Some(Risk::High));
    assert_eq!(service.label, format!("Port {}", port));

    drop(listener);
}

#[tokio::test]
async fn test_unreachable_range_yields_root_only() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let scanner = ReachabilityScanner::new(config(vec![port]));
    let graph = scanner.scan("127.0.0.0/30").await.unwrap();

    assert_eq!(graph.nodes.len(), 1);
    assert_eq!(graph.nodes[0].id, "network");
    assert!(graph.edges.is_empty());
    assert_eq!(graph.meta.cidr, "127.0.0.0/30");
}

#[tokio::test]
async fn test_repeated_scan_of_static_range_is_identical() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let scanner = ReachabilityScanner::new(config(vec![port]));
    let first = scanner.scan("127.0.0.1/32").await.unwrap();
    let second = scanner.scan("127.0.0.1/32").await.unwrap();

    assert_eq!(first.nodes, second.nodes);
    assert_eq!(first.edges, second.edges);

    drop(listener);
}

#[tokio::test]
async fn test_serialized_graph_uses_contract_field_names() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let scanner = ReachabilityScanner::new(config(vec![port]));
    let graph = scanner.scan("127.0.0.1/32").await.unwrap();

    let json = serde_json::to_value(&graph).unwrap();
    assert_eq!(json["meta"]["cidr"], "127.0.0.1/32");
    assert_eq!(json["nodes"][0]["type"], "network");
    let host = &json["nodes"][1];
    assert_eq!(host["type"], "host");
    // host nodes carry no risk field
    assert!(host.get("risk").is_none());
    assert_eq!(json["edges"][0]["from"], "network");

    drop(listener);
}
