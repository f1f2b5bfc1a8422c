use super::Strategy;
use crate::error::Result;
use crate::graph::{SharedGraph, canonicalize};
use crate::resolver::DnsResolve;
use crate::result::Discovery;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

pub fn default_services() -> Vec<String> {
    [
        "_ldap._tcp",
        "_kerberos._tcp",
        "_kerberos._udp",
        "_sip._tcp",
        "_sip._udp",
        "_sips._tcp",
        "_xmpp-client._tcp",
        "_xmpp-server._tcp",
        "_autodiscover._tcp",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Probes a list of well-known SRV service labels under the target and
/// reports each distinct host they point at.
pub struct ServiceScanner {
    dns: Arc<dyn DnsResolve>,
    services: Vec<String>,
}

impl ServiceScanner {
    pub fn new(dns: Arc<dyn DnsResolve>, services: Vec<String>) -> Self {
        Self { dns, services }
    }
}

#[async_trait]
impl Strategy for ServiceScanner {
    fn name(&self) -> &'static str {
        "srv_scan"
    }

    async fn discover(&self, target: &str, _graph: &SharedGraph) -> Result<Vec<Discovery>> {
        let target = canonicalize(target);
        let mut seen: HashSet<String> = HashSet::new();
        let mut results = Vec::new();

        for service in &self.services {
            for record in self.dns.query_srv(service, &target).await {
                let host = canonicalize(&record.target);
                // A root target ("."). means the service is explicitly absent.
                if host.is_empty() || host == target {
                    continue;
                }
                if !seen.insert(format!("{}/{}", service, host)) {
                    continue;
                }
                results.push(
                    Discovery::domain(&host, "SRV", &target)
                        .with_info(format!("{}:{}", service, record.port)),
                );
            }
        }

        Ok(results)
    }
}
