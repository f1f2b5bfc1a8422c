//! Pluggable discovery strategies.
//!
//! Each strategy turns one target name into zero or more [`Discovery`]
//! candidates using the shared resolution port. Strategies are stateless per
//! call and safe to run concurrently against different targets; a failing
//! strategy costs its own results only, never the crawl.

mod basic;
mod neighbors;
mod parent;
mod reverse;
mod srv;
mod subdomains;
mod txt;

pub use basic::BasicRecords;
pub use neighbors::NeighborScanner;
pub use parent::ParentWalker;
pub use reverse::ReverseResolver;
pub use srv::{ServiceScanner, default_services};
pub use subdomains::{SubdomainEnumerator, default_wordlist};
pub use txt::TextRecordParser;

use crate::error::Result;
use crate::graph::SharedGraph;
use crate::resolver::DnsResolve;
use crate::result::Discovery;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait Strategy: Send + Sync {
    /// Stable name used for provenance tagging and logging.
    fn name(&self) -> &'static str;

    /// Produces discovery candidates for `target`. The graph handle gives
    /// read access to what has been found so far; built-in strategies do not
    /// need it, but custom ones may.
    async fn discover(&self, target: &str, graph: &SharedGraph) -> Result<Vec<Discovery>>;
}

/// The full built-in registry with default word and service lists.
pub fn default_strategies(dns: &Arc<dyn DnsResolve>) -> Vec<Arc<dyn Strategy>> {
    vec![
        Arc::new(BasicRecords::new(dns.clone())),
        Arc::new(TextRecordParser::new(dns.clone())),
        Arc::new(ParentWalker::new(dns.clone())),
        Arc::new(ReverseResolver::new(dns.clone())),
        Arc::new(ServiceScanner::new(dns.clone(), default_services())),
        Arc::new(NeighborScanner::new(dns.clone())),
        Arc::new(SubdomainEnumerator::new(dns.clone(), default_wordlist())),
    ]
}
