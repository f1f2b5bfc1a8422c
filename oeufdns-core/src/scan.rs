use indicatif::{ProgressBar, ProgressStyle};
use oeufdns_scanner::crawler::{Crawler, ProgressCallback};
use oeufdns_scanner::graph::DnsGraph;
use oeufdns_scanner::resolver::{DnsClient, DnsResolve};
use oeufdns_scanner::strategies::{
    BasicRecords, NeighborScanner, ParentWalker, ReverseResolver, ServiceScanner, Strategy,
    SubdomainEnumerator, TextRecordParser, default_services, default_wordlist,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Shared DNS infrastructure that would drown the map in noise if every
/// scan pulled it in. Users can disable or extend this from the CLI.
const DEFAULT_BLACKLIST: &[&str] = &[
    "root-servers.net",
    "gtld-servers.net",
    "doubleclick",
    "googlesyndication",
    "google-analytics",
    "googletagmanager",
    "adservice",
    "amazonses.com",
    "sendgrid.net",
    "mailgun.org",
    "pphosted.com",
    "mimecast.com",
    "akadns.net",
    "edgekey.net",
    "cloudfront.net",
];

pub fn default_blacklist() -> Vec<String> {
    DEFAULT_BLACKLIST.iter().map(|p| p.to_string()).collect()
}

/// Options for configuring a scan
pub struct ScanOptions {
    pub domain: String,
    pub max_depth: usize,
    pub workers: usize,
    pub timeout_secs: u64,
    pub blacklist: Vec<String>,
    pub subdomain_wordlist: Option<Vec<String>>,
    pub srv_services: Option<Vec<String>>,
    pub show_progress: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            domain: String::new(),
            max_depth: 2,
            workers: 5,
            timeout_secs: 2,
            blacklist: default_blacklist(),
            subdomain_wordlist: None,
            srv_services: None,
            show_progress: false,
        }
    }
}

/// Builds the strategy registry for a scan, swapping in user-supplied word
/// and service lists where given.
pub fn build_strategies(dns: &Arc<dyn DnsResolve>, options: &ScanOptions) -> Vec<Arc<dyn Strategy>> {
    let wordlist = options
        .subdomain_wordlist
        .clone()
        .unwrap_or_else(default_wordlist);
    let services = options.srv_services.clone().unwrap_or_else(default_services);

    vec![
        Arc::new(BasicRecords::new(dns.clone())),
        Arc::new(TextRecordParser::new(dns.clone())),
        Arc::new(ParentWalker::new(dns.clone())),
        Arc::new(ReverseResolver::new(dns.clone())),
        Arc::new(ServiceScanner::new(dns.clone(), services)),
        Arc::new(NeighborScanner::new(dns.clone())),
        Arc::new(SubdomainEnumerator::new(dns.clone(), wordlist)),
    ]
}

/// Execute a scan with the given options.
/// Returns the finished graph.
pub async fn execute_scan(options: ScanOptions) -> Result<DnsGraph, String> {
    let dns: Arc<dyn DnsResolve> = Arc::new(DnsClient::with_timeout(Duration::from_secs(
        options.timeout_secs.max(1),
    )));
    let strategies = build_strategies(&dns, &options);

    // Single spinner for overall progress (only if enabled)
    let progress_bar = if options.show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message("Starting DNS map...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let explored_count = Arc::new(AtomicUsize::new(0));
    let progress_callback: ProgressCallback = {
        let pb = progress_bar.clone();
        let count = explored_count.clone();
        Arc::new(move |_worker_id: usize, name: String| {
            let n = count.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(ref pb) = pb {
                pb.set_message(format!("Mapping... {} domains explored (last: {})", n, name));
                pb.tick();
            }
        })
    };

    let crawler = Crawler::new(dns)
        .with_strategies(strategies)
        .with_max_depth(options.max_depth)
        .with_workers(options.workers)
        .with_blacklist(options.blacklist.clone())
        .with_progress_callback(progress_callback);

    let result = crawler
        .crawl(&options.domain)
        .await
        .map_err(|e| e.to_string());

    if let Some(ref pb) = progress_bar {
        let total = explored_count.load(Ordering::Relaxed);
        pb.finish_with_message(format!("Map complete! {} domains explored", total));
    }

    result
}
