use crate::error::{Result, ScanError};
use crate::graph::{DnsGraph, NodeKind, RelationKind, SharedGraph, canonicalize};
use crate::resolver::DnsResolve;
use crate::result::Discovery;
use crate::strategies::{Strategy, default_strategies};
use futures::future::join_all;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// Breadth-first, depth-bounded frontier crawler.
///
/// Each depth level is processed by a bounded pool of workers pulling from a
/// shared queue; the pool is fully drained before the next depth's frontier
/// is computed, since that frontier only exists once every mutation from the
/// current depth has landed.
pub struct Crawler {
    strategies: Vec<Arc<dyn Strategy>>,
    max_depth: usize,
    workers: usize,
    blacklist: Vec<String>,
    progress_callback: Option<ProgressCallback>,
    stop_flag: Option<Arc<AtomicBool>>,
}

impl Crawler {
    pub fn new(dns: Arc<dyn DnsResolve>) -> Self {
        Self {
            strategies: default_strategies(&dns),
            max_depth: 2,
            workers: 5,
            blacklist: Vec::new(),
            progress_callback: None,
            stop_flag: None,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_blacklist(mut self, blacklist: Vec<String>) -> Self {
        self.blacklist = blacklist;
        self
    }

    pub fn with_strategies(mut self, strategies: Vec<Arc<dyn Strategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Cooperative stop: the flag is only checked between depth levels, so
    /// in-flight work always completes and the graph stays consistent.
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }

    pub async fn crawl(&self, root: &str) -> Result<DnsGraph> {
        let root = canonicalize(root);
        if root.is_empty() || !root.contains('.') {
            return Err(ScanError::InvalidDomain(root));
        }

        info!("Starting DNS map of {} with {} workers", root, self.workers);

        let graph: SharedGraph = Arc::new(Mutex::new(DnsGraph::new(&root, self.blacklist.clone())));
        graph.lock().await.add_node(&root, NodeKind::Domain, 0, "root");

        for depth in 0..=self.max_depth {
            if let Some(ref flag) = self.stop_flag
                && flag.load(Ordering::Relaxed)
            {
                info!("Stop requested, ending crawl before depth {}", depth);
                break;
            }

            let frontier = graph.lock().await.unexplored_frontier(depth);
            if frontier.is_empty() {
                // Nodes are only ever created one depth ahead of their
                // discoverer, so nothing deeper can exist either.
                debug!("Depth {}: frontier empty, stopping", depth);
                break;
            }
            info!("Depth {}: exploring {} domains", depth, frontier.len());

            let worker_count = self.workers.min(frontier.len());
            let queue = Arc::new(Mutex::new(VecDeque::from(frontier)));

            let mut handles = Vec::new();
            for worker_id in 0..worker_count {
                let queue = queue.clone();
                let graph = graph.clone();
                let strategies = self.strategies.clone();
                let progress_callback = self.progress_callback.clone();

                handles.push(tokio::spawn(async move {
                    debug!("Worker {} started", worker_id);
                    loop {
                        let name = { queue.lock().await.pop_front() };
                        let Some(name) = name else { break };

                        if let Some(ref callback) = progress_callback {
                            callback(worker_id, name.clone());
                        }
                        Self::explore(&name, depth, &graph, &strategies).await;
                    }
                    debug!("Worker {} finished", worker_id);
                }));
            }

            // Depth barrier: every worker must land before the next frontier
            // is read. A panicked worker loses its remaining queue share but
            // never the crawl.
            for join_result in join_all(handles).await {
                if let Err(e) = join_result {
                    warn!("Worker task failed: {}", e);
                }
            }
        }

        let stats = graph.lock().await.stats();
        info!(
            "Crawl complete: {} domains, {} IPs, {} relations",
            stats.domains, stats.ips, stats.edges
        );

        let graph = Arc::try_unwrap(graph)
            .map_err(|_| ScanError::Other("graph still shared after crawl".to_string()))?;
        Ok(graph.into_inner())
    }

    /// Runs every strategy against one frontier domain and folds the results
    /// into the graph. Strategy failures are logged and cost only their own
    /// results.
    async fn explore(name: &str, depth: usize, graph: &SharedGraph, strategies: &[Arc<dyn Strategy>]) {
        graph.lock().await.mark_explored(name);

        for strategy in strategies {
            match strategy.discover(name, graph).await {
                Ok(discoveries) => {
                    let mut graph = graph.lock().await;
                    for discovery in &discoveries {
                        Self::fold(&mut graph, name, depth, strategy.name(), discovery);
                    }
                }
                Err(e) => {
                    warn!("{} failed on {}: {}", strategy.name(), name, e);
                }
            }
        }
    }

    fn fold(graph: &mut DnsGraph, source: &str, depth: usize, strategy: &str, discovery: &Discovery) {
        let value = canonicalize(&discovery.value);
        // Self-loop suppression; strategies already avoid this, but a second
        // line of defense here keeps the invariant local.
        if value.is_empty() || value == source {
            return;
        }

        let kind = if discovery.is_ip { NodeKind::Ip } else { NodeKind::Domain };
        if graph.add_node(&value, kind, depth + 1, strategy) {
            debug!("  + {} ({})", value, discovery.relation);
        }

        let relation = RelationKind::parse(&discovery.relation).unwrap_or(RelationKind::A);
        graph.add_edge(source, &value, relation, &discovery.info);
    }
}
