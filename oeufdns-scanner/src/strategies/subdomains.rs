use super::Strategy;
use crate::error::Result;
use crate::graph::{SharedGraph, canonicalize};
use crate::resolver::{DnsResolve, RecordType};
use crate::result::Discovery;
use async_trait::async_trait;
use std::sync::Arc;

pub fn default_wordlist() -> Vec<String> {
    [
        "www", "mail", "api", "dev", "staging", "test", "vpn", "webmail", "smtp", "imap", "ftp",
        "ns1", "ns2", "mx", "admin", "portal", "cdn", "shop", "blog", "docs", "status", "git",
        "gateway", "intranet", "remote",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Tries a word list of common host labels under the target and keeps the
/// ones that resolve (A or CNAME).
pub struct SubdomainEnumerator {
    dns: Arc<dyn DnsResolve>,
    wordlist: Vec<String>,
}

impl SubdomainEnumerator {
    pub fn new(dns: Arc<dyn DnsResolve>, wordlist: Vec<String>) -> Self {
        Self { dns, wordlist }
    }
}

#[async_trait]
impl Strategy for SubdomainEnumerator {
    fn name(&self) -> &'static str {
        "subdomain_enum"
    }

    async fn discover(&self, target: &str, _graph: &SharedGraph) -> Result<Vec<Discovery>> {
        let target = canonicalize(target);
        let mut results = Vec::new();

        for label in &self.wordlist {
            let label = label.trim().to_lowercase();
            if label.is_empty() {
                continue;
            }
            let candidate = format!("{}.{}", label, target);
            let resolves = !self.dns.query(&candidate, RecordType::A).await.is_empty()
                || !self.dns.query(&candidate, RecordType::CNAME).await.is_empty();
            if resolves {
                results.push(Discovery::domain(&candidate, "SUBDOMAIN", &target));
            }
        }

        Ok(results)
    }
}
