// Tests for report generation

use oeufdns_core::report::{
    ReportData, ReportFormat, generate_dot_report, generate_json_report, generate_markdown_report,
    generate_text_report, write_report,
};
use oeufdns_scanner::graph::{DnsGraph, NodeKind, RelationKind};

fn sample_graph() -> DnsGraph {
    let mut graph = DnsGraph::new("example.org", Vec::new());
    graph.add_node("example.org", NodeKind::Domain, 0, "root");
    graph.add_node("ns1.example.org", NodeKind::Domain, 1, "basic_records");
    graph.add_node("mail.example.org", NodeKind::Domain, 1, "subdomain_enum");
    graph.add_node("93.184.216.34", NodeKind::Ip, 1, "basic_records");
    graph.add_edge("example.org", "93.184.216.34", RelationKind::A, "");
    graph.add_edge("example.org", "ns1.example.org", RelationKind::Ns, "");
    graph.add_edge("example.org", "mail.example.org", RelationKind::Subdomain, "");
    graph
}

// ============================================================================
// ReportData Tests
// ============================================================================

#[test]
fn test_report_data_sorts_and_groups() {
    let data = ReportData::from_graph(&sample_graph());

    assert_eq!(data.root, "example.org");
    assert_eq!(data.stats.domains, 3);
    assert_eq!(data.stats.ips, 1);
    assert_eq!(data.stats.edges, 3);

    let domain_names: Vec<&str> = data.domains.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(
        domain_names,
        vec!["example.org", "mail.example.org", "ns1.example.org"]
    );

    let relations: Vec<&str> = data.relations.iter().map(|g| g.relation.as_str()).collect();
    assert_eq!(relations, vec!["A", "NS", "subdomain"]);
}

#[test]
fn test_report_data_skips_dangling_edges() {
    let mut graph = DnsGraph::new("example.org", vec!["tracker".to_string()]);
    graph.add_node("example.org", NodeKind::Domain, 0, "root");
    // The target is blacklisted, so only the edge exists.
    graph.add_edge("example.org", "ns1.tracker.net", RelationKind::Ns, "");

    let data = ReportData::from_graph(&graph);
    assert!(data.relations.is_empty());
}

// ============================================================================
// Format Generator Tests
// ============================================================================

#[test]
fn test_text_report_lists_sections() {
    let report = generate_text_report(&sample_graph());

    assert!(report.contains("DNS Map: example.org"));
    assert!(report.contains("3 domains | 1 IPs | 3 relations"));
    assert!(report.contains("DOMAINS"));
    assert!(report.contains("IP ADDRESSES"));
    assert!(report.contains("RELATIONS"));
    assert!(report.contains("ns1.example.org"));
    assert!(report.contains("(basic_records)"));
    assert!(report.contains("93.184.216.34"));
}

#[test]
fn test_text_report_caps_edges_per_relation() {
    let mut graph = DnsGraph::new("example.org", Vec::new());
    graph.add_node("example.org", NodeKind::Domain, 0, "root");
    for i in 0..15 {
        let name = format!("host{}.example.org", i);
        graph.add_node(&name, NodeKind::Domain, 1, "subdomain_enum");
        graph.add_edge("example.org", &name, RelationKind::Subdomain, "");
    }

    let report = generate_text_report(&graph);
    assert!(report.contains("subdomain (15)"));
    assert!(report.contains("... and 5 more"));
}

#[test]
fn test_markdown_report_has_tables() {
    let report = generate_markdown_report(&sample_graph());

    assert!(report.starts_with("# DNS Map: example.org"));
    assert!(report.contains("## Domains"));
    assert!(report.contains("| ns1.example.org | 1 | basic_records |"));
    assert!(report.contains("## IP Addresses"));
    assert!(report.contains("| 93.184.216.34 | 1 | basic_records |"));
    assert!(report.contains("### NS (1)"));
}

#[test]
fn test_dot_report_is_a_digraph() {
    let report = generate_dot_report(&sample_graph());

    assert!(report.starts_with("digraph dnsmap {"));
    assert!(report.trim_end().ends_with('}'));
    // Root gets the highlighted shape.
    assert!(report.contains("\"example.org\" [shape=box, style=\"bold,filled\""));
    assert!(report.contains("\"93.184.216.34\" [shape=box, style=filled"));
    assert!(report.contains("\"example.org\" -> \"ns1.example.org\" [label=\"NS\"];"));
}

#[test]
fn test_json_report_round_trips() {
    let json = generate_json_report(&sample_graph()).unwrap();
    let parsed: ReportData = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.root, "example.org");
    assert_eq!(parsed.stats.edges, 3);
    assert_eq!(parsed.domains.len(), 3);
}

// ============================================================================
// File Writing Tests
// ============================================================================

#[test]
fn test_write_report_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("example_org_dns_report.md");

    let report = generate_markdown_report(&sample_graph());
    write_report(&path, &report).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, report);
}

// ============================================================================
// ReportFormat Tests
// ============================================================================

#[test]
fn test_report_format_from_str() {
    assert!(matches!(ReportFormat::from_str("text"), Some(ReportFormat::Text)));
    assert!(matches!(ReportFormat::from_str("md"), Some(ReportFormat::Markdown)));
    assert!(matches!(ReportFormat::from_str("Markdown"), Some(ReportFormat::Markdown)));
    assert!(matches!(ReportFormat::from_str("graphviz"), Some(ReportFormat::Dot)));
    assert!(matches!(ReportFormat::from_str("json"), Some(ReportFormat::Json)));
    assert!(ReportFormat::from_str("pdf").is_none());
}

#[test]
fn test_report_format_extension() {
    assert_eq!(ReportFormat::Markdown.extension(), "md");
    assert_eq!(ReportFormat::Dot.extension(), "dot");
    assert_eq!(ReportFormat::Json.extension(), "json");
    assert_eq!(ReportFormat::Text.extension(), "txt");
}
