use super::Strategy;
use crate::error::Result;
use crate::graph::{SharedGraph, canonicalize};
use crate::resolver::{DnsResolve, RecordType};
use crate::result::Discovery;
use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

// Hard cap on emitted hosts per target to bound PTR query volume.
const MAX_RESULTS: usize = 5;

/// Reverse-resolves the addresses adjacent to each IPv4 address of the
/// target. Small hosting setups tend to park related machines next to each
/// other in the same /24.
pub struct NeighborScanner {
    dns: Arc<dyn DnsResolve>,
}

impl NeighborScanner {
    pub fn new(dns: Arc<dyn DnsResolve>) -> Self {
        Self { dns }
    }
}

#[async_trait]
impl Strategy for NeighborScanner {
    fn name(&self) -> &'static str {
        "ip_neighbors"
    }

    async fn discover(&self, target: &str, _graph: &SharedGraph) -> Result<Vec<Discovery>> {
        let target = canonicalize(target);
        let mut results = Vec::new();

        'addresses: for addr in self.dns.query(&target, RecordType::A).await {
            let Ok(ip) = addr.parse::<Ipv4Addr>() else {
                continue;
            };
            let octets = ip.octets();

            for offset in [-2i16, -1, 1, 2] {
                let last = octets[3] as i16 + offset;
                // Stay inside the /24.
                let Ok(last) = u8::try_from(last) else {
                    continue;
                };
                let neighbor = Ipv4Addr::new(octets[0], octets[1], octets[2], last);

                for host in self.dns.reverse(IpAddr::V4(neighbor)).await {
                    results.push(
                        Discovery::domain(&host, "PTR", &target)
                            .with_info(format!("neighbor:{}", neighbor)),
                    );
                    if results.len() >= MAX_RESULTS {
                        break 'addresses;
                    }
                }
            }
        }

        Ok(results)
    }
}
