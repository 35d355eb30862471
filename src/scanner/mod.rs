use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use futures::stream::{self, StreamExt};
use ipnet::IpNet;
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::ScanConfig;
use crate::errors::ProvexError;
use crate::models::{ExposureGraph, Risk};

/// Parse a CIDR expression, mapping failure to `InvalidRange`. Callers
/// that combine a scan with other work check the range up front so a
/// typo cannot discard results produced before the scan starts.
pub fn parse_range(cidr: &str) -> Result<IpNet, ProvexError> {
    cidr.parse()
        .map_err(|e| ProvexError::InvalidRange(format!("{}: {}", cidr, e)))
}

/// Bounded TCP reachability scanner. Probing is read-only: a connect is
/// attempted and the socket is dropped immediately, no data is ever
/// written. Socket errors count as "closed" and never abort the scan.
pub struct ReachabilityScanner {
    config: ScanConfig,
    cancel: CancellationToken,
}

impl ReachabilityScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Scan every usable host address in the CIDR block against the
    /// approved port set and build the exposure graph. Hosts with zero
    /// open approved ports contribute no nodes or edges.
    pub async fn scan(&self, cidr: &str) -> Result<ExposureGraph, ProvexError> {
        let network = parse_range(cidr)?;

        let hosts: Vec<IpAddr> = network.hosts().collect();
        info!(
            cidr,
            hosts = hosts.len(),
            ports = self.config.approved_ports.len(),
            "Starting reachability scan"
        );

        // Bounded worker pool over hosts; `buffered` keeps host order
        // deterministic so repeated scans of an unchanged range yield
        // identical node/edge sets.
        let results: Vec<(IpAddr, Vec<u16>)> = stream::iter(hosts)
            .map(|ip| self.probe_host(ip))
            .buffered(self.config.max_concurrent_hosts.max(1))
            .collect()
            .await;

        let mut graph = ExposureGraph::new(cidr);
        for (ip, open_ports) in results {
            if open_ports.is_empty() {
                continue;
            }
            let host_id = ip.to_string();
            graph.add_host(&host_id);
            for port in open_ports {
                graph.add_service(&host_id, port, self.risk_for_port(port));
            }
        }

        info!(
            cidr,
            reachable_hosts = graph.host_count(),
            services = graph.service_count(),
            "Reachability scan complete"
        );
        Ok(graph)
    }

    async fn probe_host(&self, ip: IpAddr) -> (IpAddr, Vec<u16>) {
        let mut open_ports = Vec::new();
        for &port in &self.config.approved_ports {
            if self.cancel.is_cancelled() {
                break;
            }
            if self.probe_port(SocketAddr::new(ip, port)).await {
                debug!(host = %ip, port, "Port open");
                open_ports.push(port);
            }
        }
        (ip, open_ports)
    }

    /// One connect attempt, capped at the configured timeout. A
    /// successful connect marks the port open even though the stream is
    /// closed immediately; any error or timeout counts as closed.
    async fn probe_port(&self, addr: SocketAddr) -> bool {
        let timeout = Duration::from_millis(self.config.connect_timeout_ms);
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => false,
            result = tokio::time::timeout(timeout, TcpStream::connect(addr)) => {
                matches!(result, Ok(Ok(_)))
            }
        }
    }

    fn risk_for_port(&self, port: u16) -> Risk {
        self.config.risk_for_port(port)
    }
}
