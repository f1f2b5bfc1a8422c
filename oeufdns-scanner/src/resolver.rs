use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

use crate::graph::canonicalize;

pub use hickory_resolver::proto::rr::RecordType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SrvRecord {
    pub target: String,
    pub port: u16,
    pub priority: u16,
    pub weight: u16,
}

/// The resolution capability strategies run against. Absent records and
/// transient failures both collapse to an empty result; no error type exists
/// for the expected case of "nothing there".
#[async_trait]
pub trait DnsResolve: Send + Sync {
    /// Resolves `name` for the given record type, stringifying each answer.
    async fn query(&self, name: &str, rtype: RecordType) -> Vec<String>;

    /// PTR lookup for an address.
    async fn reverse(&self, ip: IpAddr) -> Vec<String>;

    /// SRV lookup for `<service>.<domain>`.
    async fn query_srv(&self, service: &str, domain: &str) -> Vec<SrvRecord>;
}

type CacheKey = (String, RecordType);

/// Resolution port backed by hickory-resolver.
///
/// Answers are cached per (canonical name, record type). The cache lock is
/// released across the network call, so two tasks asking for the same name at
/// the same time may both hit the wire; the second write is a no-op.
pub struct DnsClient {
    resolver: TokioAsyncResolver,
    cache: Mutex<HashMap<CacheKey, Arc<Vec<String>>>>,
}

impl DnsClient {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(2))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 1;
        let resolver = TokioAsyncResolver::tokio(ResolverConfig::default(), opts);
        Self {
            resolver,
            cache: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for DnsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolve for DnsClient {
    async fn query(&self, name: &str, rtype: RecordType) -> Vec<String> {
        let key = (canonicalize(name), rtype);
        if let Some(hit) = self.cache.lock().unwrap().get(&key) {
            return hit.as_ref().clone();
        }

        let records: Vec<String> = match self.resolver.lookup(key.0.as_str(), rtype).await {
            Ok(lookup) => lookup.iter().map(|rdata| rdata.to_string()).collect(),
            Err(e) => {
                debug!("lookup {} {} returned nothing: {}", key.0, rtype, e);
                Vec::new()
            }
        };

        self.cache
            .lock()
            .unwrap()
            .insert(key, Arc::new(records.clone()));
        records
    }

    async fn reverse(&self, ip: IpAddr) -> Vec<String> {
        match self.resolver.reverse_lookup(ip).await {
            Ok(lookup) => lookup.iter().map(|ptr| ptr.to_string()).collect(),
            Err(e) => {
                debug!("reverse lookup {} returned nothing: {}", ip, e);
                Vec::new()
            }
        }
    }

    async fn query_srv(&self, service: &str, domain: &str) -> Vec<SrvRecord> {
        let name = format!("{}.{}", service, canonicalize(domain));
        match self.resolver.srv_lookup(name.as_str()).await {
            Ok(lookup) => lookup
                .iter()
                .map(|srv| SrvRecord {
                    target: srv.target().to_string(),
                    port: srv.port(),
                    priority: srv.priority(),
                    weight: srv.weight(),
                })
                .collect(),
            Err(e) => {
                debug!("srv lookup {} returned nothing: {}", name, e);
                Vec::new()
            }
        }
    }
}
