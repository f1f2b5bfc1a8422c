use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Graph handle shared between the crawler and its workers. All mutation goes
/// through this single mutex; concurrent workers racing to insert the same
/// name is expected and resolved by the insertion methods returning `false`.
pub type SharedGraph = Arc<Mutex<DnsGraph>>;

/// Lower-cases a name and strips trailing dots. The result is the sole
/// identity key used for nodes, edges and the explored set.
pub fn canonicalize(name: &str) -> String {
    name.trim().to_lowercase().trim_end_matches('.').to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Domain,
    Ip,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Domain => "domain",
            NodeKind::Ip => "ip",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    A,
    Aaaa,
    Mx,
    Cname,
    Ns,
    Txt,
    Soa,
    Srv,
    Ptr,
    Parent,
    Subdomain,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::A => "A",
            RelationKind::Aaaa => "AAAA",
            RelationKind::Mx => "MX",
            RelationKind::Cname => "CNAME",
            RelationKind::Ns => "NS",
            RelationKind::Txt => "TXT",
            RelationKind::Soa => "SOA",
            RelationKind::Srv => "SRV",
            RelationKind::Ptr => "PTR",
            RelationKind::Parent => "parent",
            RelationKind::Subdomain => "subdomain",
        }
    }

    /// Maps a free-form strategy label onto the closed relation set.
    /// Unknown labels are the caller's problem; the crawler falls back to
    /// [`RelationKind::A`] when this returns `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_uppercase().as_str() {
            "A" => Some(RelationKind::A),
            "AAAA" => Some(RelationKind::Aaaa),
            "MX" => Some(RelationKind::Mx),
            "CNAME" => Some(RelationKind::Cname),
            "NS" => Some(RelationKind::Ns),
            "TXT" => Some(RelationKind::Txt),
            "SOA" => Some(RelationKind::Soa),
            "SRV" => Some(RelationKind::Srv),
            "PTR" => Some(RelationKind::Ptr),
            "PARENT" => Some(RelationKind::Parent),
            "SUBDOMAIN" => Some(RelationKind::Subdomain),
            _ => None,
        }
    }
}

/// A discovered domain or address. Depth and strategy are fixed by whoever
/// inserts the node first and never revised afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub depth: usize,
    pub strategy: String,
}

/// A typed relation between two canonical names. Stored directionally
/// (source discovered target) and deduplicated on the full tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub relation: RelationKind,
    pub info: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub domains: usize,
    pub ips: usize,
    pub edges: usize,
}

/// Deduplicated record of everything discovered during one crawl.
///
/// Nodes are keyed by canonical name; admission is gated by the blacklist at
/// insertion time and never re-checked. Edges are never blacklist-gated: a
/// relation pointing at a name that was refused admission simply dangles, and
/// reporting skips edges whose endpoints are not in the node map.
#[derive(Debug)]
pub struct DnsGraph {
    root: String,
    nodes: HashMap<String, Node>,
    order: Vec<String>,
    edges: HashSet<Edge>,
    explored: HashSet<String>,
    blacklist: Vec<String>,
}

impl DnsGraph {
    pub fn new(root: &str, blacklist: Vec<String>) -> Self {
        Self {
            root: canonicalize(root),
            nodes: HashMap::new(),
            order: Vec::new(),
            edges: HashSet::new(),
            explored: HashSet::new(),
            blacklist: blacklist.into_iter().map(|p| p.to_lowercase()).collect(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Inserts a node, returning whether it was admitted. Blacklisted and
    /// duplicate names are ordinary outcomes, not errors: both report `false`.
    pub fn add_node(&mut self, name: &str, kind: NodeKind, depth: usize, strategy: &str) -> bool {
        let key = canonicalize(name);
        if self.blacklist.iter().any(|pattern| key.contains(pattern.as_str())) {
            return false;
        }
        if self.nodes.contains_key(&key) {
            return false;
        }
        self.nodes.insert(
            key.clone(),
            Node {
                name: key.clone(),
                kind,
                depth,
                strategy: strategy.to_string(),
            },
        );
        self.order.push(key);
        true
    }

    /// Records a relation, returning `false` if the exact tuple already exists.
    pub fn add_edge(&mut self, source: &str, target: &str, relation: RelationKind, info: &str) -> bool {
        self.edges.insert(Edge {
            source: canonicalize(source),
            target: canonicalize(target),
            relation,
            info: info.to_string(),
        })
    }

    pub fn mark_explored(&mut self, name: &str) {
        self.explored.insert(canonicalize(name));
    }

    pub fn is_explored(&self, name: &str) -> bool {
        self.explored.contains(&canonicalize(name))
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.nodes.get(&canonicalize(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(&canonicalize(name))
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|key| self.nodes.get(key))
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Domain-kind nodes at the given depth not yet explored, in insertion
    /// order. IP nodes are never explorable and never appear here.
    pub fn unexplored_frontier(&self, depth: usize) -> Vec<String> {
        self.order
            .iter()
            .filter(|key| {
                self.nodes
                    .get(key.as_str())
                    .map(|n| n.kind == NodeKind::Domain && n.depth == depth)
                    .unwrap_or(false)
                    && !self.explored.contains(key.as_str())
            })
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> GraphStats {
        let domains = self.nodes.values().filter(|n| n.kind == NodeKind::Domain).count();
        let ips = self.nodes.values().filter(|n| n.kind == NodeKind::Ip).count();
        GraphStats {
            domains,
            ips,
            edges: self.edges.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_lowercases_and_strips_dots() {
        assert_eq!(canonicalize("WWW.Example.COM."), "www.example.com");
        assert_eq!(canonicalize("example.org"), "example.org");
        assert_eq!(canonicalize("  ns1.example.org.  "), "ns1.example.org");
    }

    #[test]
    fn test_add_node_is_idempotent() {
        let mut graph = DnsGraph::new("example.com", Vec::new());
        assert!(graph.add_node("example.com", NodeKind::Domain, 0, "root"));
        assert!(!graph.add_node("example.com", NodeKind::Domain, 0, "root"));
        assert_eq!(graph.stats().domains, 1);
    }

    #[test]
    fn test_add_node_collides_across_canonical_forms() {
        let mut graph = DnsGraph::new("example.com", Vec::new());
        assert!(graph.add_node("WWW.Example.COM.", NodeKind::Domain, 0, "x"));
        assert!(!graph.add_node("www.example.com", NodeKind::Domain, 1, "y"));

        // First writer wins: depth and strategy stay as inserted.
        let node = graph.get("www.example.com").unwrap();
        assert_eq!(node.depth, 0);
        assert_eq!(node.strategy, "x");
    }

    #[test]
    fn test_blacklist_gates_node_admission() {
        let mut graph = DnsGraph::new("example.com", vec!["evil".to_string()]);
        assert!(!graph.add_node("www.evil.example.com", NodeKind::Domain, 1, "x"));
        assert!(graph.get("www.evil.example.com").is_none());
        assert!(graph.add_node("good.example.com", NodeKind::Domain, 1, "x"));
    }

    #[test]
    fn test_blacklist_matches_case_insensitively() {
        let mut graph = DnsGraph::new("example.com", vec!["EVIL".to_string()]);
        assert!(!graph.add_node("ads.Evil.example.com", NodeKind::Domain, 1, "x"));
    }

    #[test]
    fn test_add_edge_deduplicates_on_full_tuple() {
        let mut graph = DnsGraph::new("a.com", Vec::new());
        assert!(graph.add_edge("a.com", "1.2.3.4", RelationKind::A, ""));
        assert!(!graph.add_edge("a.com", "1.2.3.4", RelationKind::A, ""));
        assert_eq!(graph.stats().edges, 1);

        // A different info string is a different edge.
        assert!(graph.add_edge("a.com", "1.2.3.4", RelationKind::A, "pri:10"));
        assert_eq!(graph.stats().edges, 2);
    }

    #[test]
    fn test_edges_are_not_blacklist_gated() {
        let mut graph = DnsGraph::new("a.com", vec!["evil".to_string()]);
        assert!(graph.add_edge("a.com", "evil.com", RelationKind::Ns, ""));
        assert!(!graph.contains("evil.com"));
    }

    #[test]
    fn test_frontier_filters_kind_depth_and_explored() {
        let mut graph = DnsGraph::new("example.com", Vec::new());
        graph.add_node("example.com", NodeKind::Domain, 0, "root");
        graph.add_node("mail.example.com", NodeKind::Domain, 1, "basic_records");
        graph.add_node("93.184.216.34", NodeKind::Ip, 1, "basic_records");

        assert_eq!(graph.unexplored_frontier(0), vec!["example.com"]);
        // IP nodes never enter the frontier.
        assert_eq!(graph.unexplored_frontier(1), vec!["mail.example.com"]);

        graph.mark_explored("example.com");
        assert!(graph.unexplored_frontier(0).is_empty());
        assert!(graph.is_explored("example.com"));
    }

    #[test]
    fn test_mark_explored_is_idempotent() {
        let mut graph = DnsGraph::new("example.com", Vec::new());
        graph.add_node("example.com", NodeKind::Domain, 0, "root");
        graph.mark_explored("example.com");
        graph.mark_explored("EXAMPLE.COM.");
        assert!(graph.is_explored("example.com"));
    }

    #[test]
    fn test_nodes_iterate_in_insertion_order() {
        let mut graph = DnsGraph::new("example.com", Vec::new());
        graph.add_node("c.example.com", NodeKind::Domain, 0, "x");
        graph.add_node("a.example.com", NodeKind::Domain, 0, "x");
        graph.add_node("b.example.com", NodeKind::Domain, 0, "x");

        let names: Vec<&str> = graph.nodes().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["c.example.com", "a.example.com", "b.example.com"]);
    }

    #[test]
    fn test_relation_kind_parse_round_trips() {
        for kind in [
            RelationKind::A,
            RelationKind::Aaaa,
            RelationKind::Mx,
            RelationKind::Cname,
            RelationKind::Ns,
            RelationKind::Txt,
            RelationKind::Soa,
            RelationKind::Srv,
            RelationKind::Ptr,
            RelationKind::Parent,
            RelationKind::Subdomain,
        ] {
            assert_eq!(RelationKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(RelationKind::parse("bogus"), None);
    }
}
