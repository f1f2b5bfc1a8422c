use super::Strategy;
use crate::error::Result;
use crate::graph::{SharedGraph, canonicalize};
use crate::resolver::{DnsResolve, RecordType};
use crate::result::Discovery;
use async_trait::async_trait;
use std::sync::Arc;

/// Mines TXT records for related infrastructure: SPF mechanisms on the target
/// itself and DMARC reporting addresses on `_dmarc.<target>`.
///
/// Domains pulled out of SPF/DMARC text are only emitted if they answer an
/// A query, which filters malformed and unrelated tokens.
pub struct TextRecordParser {
    dns: Arc<dyn DnsResolve>,
}

impl TextRecordParser {
    pub fn new(dns: Arc<dyn DnsResolve>) -> Self {
        Self { dns }
    }

    async fn resolvable(&self, domain: &str) -> bool {
        !self.dns.query(domain, RecordType::A).await.is_empty()
    }

    /// Pulls the domain part out of every `rua=`/`ruf=` mailto address in a
    /// DMARC record. Size limits ("!10m") and multiple comma-separated
    /// addresses per tag are handled.
    fn mailto_domains(record: &str) -> Vec<String> {
        let mut domains = Vec::new();
        for tag in record.split(';') {
            let tag = tag.trim();
            let value = match tag.strip_prefix("rua=").or_else(|| tag.strip_prefix("ruf=")) {
                Some(value) => value,
                None => continue,
            };
            for address in value.split(',') {
                if let Some(rest) = address.trim().strip_prefix("mailto:")
                    && let Some(domain) = rest.split('@').nth(1)
                    && let Some(domain) = domain.split('!').next()
                    && !domain.is_empty()
                {
                    domains.push(domain.to_string());
                }
            }
        }
        domains
    }
}

#[async_trait]
impl Strategy for TextRecordParser {
    fn name(&self) -> &'static str {
        "txt_records"
    }

    async fn discover(&self, target: &str, _graph: &SharedGraph) -> Result<Vec<Discovery>> {
        let target = canonicalize(target);
        let mut records = self.dns.query(&target, RecordType::TXT).await;
        records.extend(
            self.dns
                .query(&format!("_dmarc.{}", target), RecordType::TXT)
                .await,
        );

        let mut results = Vec::new();
        for raw in records {
            // Some resolvers hand back the quoted presentation form.
            let record = raw.trim().trim_matches('"').to_lowercase();

            if record.starts_with("v=spf1") {
                for token in record.split_whitespace() {
                    if let Some(addr) = token.strip_prefix("ip4:") {
                        // The mechanism may carry a CIDR suffix.
                        let addr = addr.split('/').next().unwrap_or(addr);
                        if !addr.is_empty() {
                            results.push(Discovery::ip(addr, "TXT", &target).with_info("SPF"));
                        }
                    } else if let Some(domain) = token
                        .strip_prefix("include:")
                        .or_else(|| token.strip_prefix("redirect="))
                    {
                        let domain = canonicalize(domain);
                        if !domain.is_empty() && domain != target && self.resolvable(&domain).await {
                            results.push(Discovery::domain(&domain, "TXT", &target).with_info("SPF"));
                        }
                    }
                }
            } else if record.starts_with("v=dmarc1") {
                for domain in Self::mailto_domains(&record) {
                    let domain = canonicalize(&domain);
                    if !domain.is_empty() && domain != target && self.resolvable(&domain).await {
                        results.push(Discovery::domain(&domain, "TXT", &target).with_info("DMARC"));
                    }
                }
            }
        }

        Ok(results)
    }
}
