use super::Strategy;
use crate::error::Result;
use crate::graph::{SharedGraph, canonicalize};
use crate::resolver::{DnsResolve, RecordType};
use crate::result::Discovery;
use async_trait::async_trait;
use std::sync::Arc;

/// Multi-label public suffixes the walker must not treat as zones of the
/// target's owner. Longest match wins; anything not listed is assumed to be a
/// plain single-label TLD.
const MULTI_LABEL_SUFFIXES: &[&str] = &[
    "co.uk", "org.uk", "ac.uk", "gov.uk", "me.uk", "net.uk", "com.au", "net.au", "org.au",
    "edu.au", "gov.au", "co.nz", "net.nz", "org.nz", "co.jp", "or.jp", "ne.jp", "ac.jp",
    "com.br", "net.br", "org.br", "com.mx", "com.ar", "com.cn", "net.cn", "org.cn", "co.in",
    "co.za", "org.za", "co.kr", "github.io", "gitlab.io", "k12.ma.us", "k12.ca.us",
];

/// Walks up the label hierarchy of the target and reports every ancestor that
/// is a delegated zone (has NS records). Targets with two or fewer labels
/// have no ancestors worth reporting.
pub struct ParentWalker {
    dns: Arc<dyn DnsResolve>,
}

impl ParentWalker {
    pub fn new(dns: Arc<dyn DnsResolve>) -> Self {
        Self { dns }
    }

    fn suffix_label_count(labels: &[&str]) -> usize {
        for take in (2..=3).rev() {
            if labels.len() > take {
                let candidate = labels[labels.len() - take..].join(".");
                if MULTI_LABEL_SUFFIXES.contains(&candidate.as_str()) {
                    return take;
                }
            }
        }
        1
    }
}

#[async_trait]
impl Strategy for ParentWalker {
    fn name(&self) -> &'static str {
        "parent_walk"
    }

    async fn discover(&self, target: &str, _graph: &SharedGraph) -> Result<Vec<Discovery>> {
        let target = canonicalize(target);
        let labels: Vec<&str> = target.split('.').collect();
        if labels.len() <= 2 {
            return Ok(Vec::new());
        }

        let suffix = Self::suffix_label_count(&labels);
        let mut results = Vec::new();

        // Drop leading labels one at a time, stopping short of the suffix.
        for start in 1..labels.len().saturating_sub(suffix) {
            let ancestor = labels[start..].join(".");
            if self.dns.query(&ancestor, RecordType::NS).await.is_empty() {
                continue;
            }
            results.push(Discovery::domain(&ancestor, "PARENT", &target).with_info("parent"));
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_label_count_plain_tld() {
        assert_eq!(ParentWalker::suffix_label_count(&["www", "example", "com"]), 1);
    }

    #[test]
    fn test_suffix_label_count_two_label_suffix() {
        assert_eq!(
            ParentWalker::suffix_label_count(&["www", "example", "co", "uk"]),
            2
        );
    }

    #[test]
    fn test_suffix_label_count_three_label_suffix() {
        assert_eq!(
            ParentWalker::suffix_label_count(&["school", "k12", "ma", "us"]),
            3
        );
    }

    #[test]
    fn test_suffix_label_count_never_consumes_whole_name() {
        // "co.uk" itself must not match its own suffix entry.
        assert_eq!(ParentWalker::suffix_label_count(&["co", "uk"]), 1);
    }
}
