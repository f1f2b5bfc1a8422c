use super::Strategy;
use crate::error::Result;
use crate::graph::{SharedGraph, canonicalize};
use crate::resolver::{DnsResolve, RecordType};
use crate::result::Discovery;
use async_trait::async_trait;
use std::sync::Arc;

/// Resolves the standard record types for a target: A, AAAA, MX, NS, SOA and
/// CNAME. This is the workhorse strategy; everything else is refinement.
pub struct BasicRecords {
    dns: Arc<dyn DnsResolve>,
}

impl BasicRecords {
    pub fn new(dns: Arc<dyn DnsResolve>) -> Self {
        Self { dns }
    }
}

#[async_trait]
impl Strategy for BasicRecords {
    fn name(&self) -> &'static str {
        "basic_records"
    }

    async fn discover(&self, target: &str, _graph: &SharedGraph) -> Result<Vec<Discovery>> {
        let target = canonicalize(target);
        let mut results = Vec::new();

        for ip in self.dns.query(&target, RecordType::A).await {
            results.push(Discovery::ip(&ip, "A", &target));
        }
        for ip in self.dns.query(&target, RecordType::AAAA).await {
            results.push(Discovery::ip(&ip, "AAAA", &target));
        }
        for mx in self.dns.query(&target, RecordType::MX).await {
            // Answer shape is "<priority> <host>".
            let mut parts = mx.split_whitespace();
            if let (Some(priority), Some(host)) = (parts.next(), parts.next()) {
                results.push(
                    Discovery::domain(host, "MX", &target).with_info(format!("pri:{}", priority)),
                );
            }
        }
        for ns in self.dns.query(&target, RecordType::NS).await {
            results.push(Discovery::domain(&ns, "NS", &target));
        }
        for soa in self.dns.query(&target, RecordType::SOA).await {
            // First token of the SOA is the primary name server.
            if let Some(primary) = soa.split_whitespace().next() {
                results.push(Discovery::domain(primary, "SOA", &target));
            }
        }
        for cname in self.dns.query(&target, RecordType::CNAME).await {
            results.push(Discovery::domain(&cname, "CNAME", &target));
        }

        Ok(results)
    }
}
