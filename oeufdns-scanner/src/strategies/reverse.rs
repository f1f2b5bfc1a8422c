use super::Strategy;
use crate::error::Result;
use crate::graph::{SharedGraph, canonicalize};
use crate::resolver::{DnsResolve, RecordType};
use crate::result::Discovery;
use async_trait::async_trait;
use std::net::IpAddr;
use std::sync::Arc;

/// PTR lookups for every address the target resolves to. Reverse zones often
/// name hosts the forward tree never mentions.
pub struct ReverseResolver {
    dns: Arc<dyn DnsResolve>,
}

impl ReverseResolver {
    pub fn new(dns: Arc<dyn DnsResolve>) -> Self {
        Self { dns }
    }
}

#[async_trait]
impl Strategy for ReverseResolver {
    fn name(&self) -> &'static str {
        "reverse_dns"
    }

    async fn discover(&self, target: &str, _graph: &SharedGraph) -> Result<Vec<Discovery>> {
        let target = canonicalize(target);
        let mut results = Vec::new();

        for addr in self.dns.query(&target, RecordType::A).await {
            let Ok(ip) = addr.parse::<IpAddr>() else {
                continue;
            };
            for host in self.dns.reverse(ip).await {
                results.push(
                    Discovery::domain(&host, "PTR", &target).with_info(format!("rev:{}", addr)),
                );
            }
        }

        Ok(results)
    }
}
