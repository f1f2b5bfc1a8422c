// Report generation from a finished graph

use chrono::Utc;
use colored::Colorize;
use oeufdns_scanner::graph::{DnsGraph, GraphStats, NodeKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

// Edges past this count per relation are summarized, not listed.
const EDGES_SHOWN_PER_RELATION: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Markdown,
    Dot,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            "dot" | "graphviz" => Some(ReportFormat::Dot),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Markdown => "md",
            ReportFormat::Dot => "dot",
            ReportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    pub name: String,
    pub depth: usize,
    pub strategy: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeData {
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub info: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationGroup {
    pub relation: String,
    pub edges: Vec<EdgeData>,
}

/// Serializable snapshot of a finished graph, with nodes sorted by name and
/// edges grouped by relation. Edges whose endpoints were never admitted as
/// nodes (blacklisted targets) are dropped here rather than rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub root: String,
    pub generated_at: String,
    pub stats: GraphStats,
    pub domains: Vec<NodeData>,
    pub ips: Vec<NodeData>,
    pub relations: Vec<RelationGroup>,
}

impl ReportData {
    pub fn from_graph(graph: &DnsGraph) -> Self {
        let mut domains = Vec::new();
        let mut ips = Vec::new();
        for node in graph.nodes() {
            let data = NodeData {
                name: node.name.clone(),
                depth: node.depth,
                strategy: node.strategy.clone(),
            };
            match node.kind {
                NodeKind::Domain => domains.push(data),
                NodeKind::Ip => ips.push(data),
            }
        }
        domains.sort_by(|a, b| a.name.cmp(&b.name));
        ips.sort_by(|a, b| a.name.cmp(&b.name));

        let mut grouped: BTreeMap<&'static str, Vec<EdgeData>> = BTreeMap::new();
        for edge in graph.edges() {
            if !graph.contains(&edge.source) || !graph.contains(&edge.target) {
                continue;
            }
            grouped.entry(edge.relation.as_str()).or_default().push(EdgeData {
                source: edge.source.clone(),
                target: edge.target.clone(),
                info: edge.info.clone(),
            });
        }
        let relations = grouped
            .into_iter()
            .map(|(relation, mut edges)| {
                edges.sort_by(|a, b| a.source.cmp(&b.source).then(a.target.cmp(&b.target)));
                RelationGroup {
                    relation: relation.to_string(),
                    edges,
                }
            })
            .collect();

        Self {
            root: graph.root().to_string(),
            generated_at: Utc::now().to_rfc3339(),
            stats: graph.stats(),
            domains,
            ips,
            relations,
        }
    }
}

pub fn generate_text_report(graph: &DnsGraph) -> String {
    let data = ReportData::from_graph(graph);
    let rule = "=".repeat(63);
    let thin = format!("  {}", "-".repeat(47));
    let mut lines: Vec<String> = Vec::new();

    lines.push(String::new());
    lines.push(format!("{}", rule.cyan().bold()));
    lines.push(format!("{}", format!("  DNS Map: {}", data.root).cyan().bold()));
    lines.push(format!("{}", rule.cyan()));
    lines.push(format!(
        "  {}\n",
        format!(
            "{} domains | {} IPs | {} relations",
            data.stats.domains, data.stats.ips, data.stats.edges
        )
        .white()
    ));

    if !data.domains.is_empty() {
        lines.push(format!("{}", "  DOMAINS".cyan().bold()));
        lines.push(format!("{}", thin.dimmed()));
        for node in &data.domains {
            let provenance = if node.strategy.is_empty() || node.strategy == "root" {
                String::new()
            } else {
                format!(" {}", format!("({})", node.strategy).dimmed())
            };
            lines.push(format!("  {} {}{}", "*".cyan(), node.name, provenance));
        }
        lines.push(String::new());
    }

    if !data.ips.is_empty() {
        lines.push(format!("{}", "  IP ADDRESSES".green().bold()));
        lines.push(format!("{}", thin.dimmed()));
        for node in &data.ips {
            let provenance = if node.strategy.is_empty() {
                String::new()
            } else {
                format!(" {}", format!("({})", node.strategy).dimmed())
            };
            lines.push(format!("  {} {}{}", "*".green(), node.name, provenance));
        }
        lines.push(String::new());
    }

    if !data.relations.is_empty() {
        lines.push(format!("{}", "  RELATIONS".yellow().bold()));
        lines.push(format!("{}", thin.dimmed()));
        for group in &data.relations {
            lines.push(format!(
                "  {} ({})",
                group.relation.yellow(),
                group.edges.len()
            ));
            for edge in group.edges.iter().take(EDGES_SHOWN_PER_RELATION) {
                lines.push(format!(
                    "    {} {} -> {}",
                    "->".dimmed(),
                    edge.source,
                    edge.target
                ));
            }
            if group.edges.len() > EDGES_SHOWN_PER_RELATION {
                lines.push(format!(
                    "    {}",
                    format!("... and {} more", group.edges.len() - EDGES_SHOWN_PER_RELATION)
                        .dimmed()
                ));
            }
        }
        lines.push(String::new());
    }

    lines.push(format!("{}\n", rule.cyan()));
    lines.join("\n")
}

pub fn generate_markdown_report(graph: &DnsGraph) -> String {
    let data = ReportData::from_graph(graph);
    let mut report = String::new();

    report.push_str(&format!("# DNS Map: {}\n\n", data.root));
    report.push_str(&format!("Generated: {}\n\n", data.generated_at));
    report.push_str(&format!(
        "**{} domains | {} IPs | {} relations**\n\n",
        data.stats.domains, data.stats.ips, data.stats.edges
    ));

    if !data.domains.is_empty() {
        report.push_str("## Domains\n\n");
        report.push_str("| Name | Depth | Discovered by |\n|------|-------|---------------|\n");
        for node in &data.domains {
            report.push_str(&format!(
                "| {} | {} | {} |\n",
                node.name, node.depth, node.strategy
            ));
        }
        report.push('\n');
    }

    if !data.ips.is_empty() {
        report.push_str("## IP Addresses\n\n");
        report.push_str("| Address | Depth | Discovered by |\n|---------|-------|---------------|\n");
        for node in &data.ips {
            report.push_str(&format!(
                "| {} | {} | {} |\n",
                node.name, node.depth, node.strategy
            ));
        }
        report.push('\n');
    }

    if !data.relations.is_empty() {
        report.push_str("## Relations\n\n");
        for group in &data.relations {
            report.push_str(&format!("### {} ({})\n\n", group.relation, group.edges.len()));
            report.push_str("| Source | Target | Info |\n|--------|--------|------|\n");
            for edge in &group.edges {
                report.push_str(&format!(
                    "| {} | {} | {} |\n",
                    edge.source, edge.target, edge.info
                ));
            }
            report.push('\n');
        }
    }

    report
}

pub fn generate_dot_report(graph: &DnsGraph) -> String {
    let data = ReportData::from_graph(graph);
    let mut dot = String::new();

    dot.push_str("digraph dnsmap {\n");
    dot.push_str("    rankdir=LR;\n");
    dot.push_str("    node [fontname=\"Helvetica\", fontsize=10];\n");
    dot.push_str("    edge [fontname=\"Helvetica\", fontsize=8];\n\n");

    for node in &data.domains {
        if node.name == data.root {
            dot.push_str(&format!(
                "    \"{}\" [shape=box, style=\"bold,filled\", fillcolor=lightyellow];\n",
                node.name
            ));
        } else {
            dot.push_str(&format!("    \"{}\" [shape=ellipse];\n", node.name));
        }
    }
    for node in &data.ips {
        dot.push_str(&format!(
            "    \"{}\" [shape=box, style=filled, fillcolor=lightgrey];\n",
            node.name
        ));
    }
    dot.push('\n');

    for group in &data.relations {
        for edge in &group.edges {
            dot.push_str(&format!(
                "    \"{}\" -> \"{}\" [label=\"{}\"];\n",
                edge.source, edge.target, group.relation
            ));
        }
    }

    dot.push_str("}\n");
    dot
}

pub fn generate_json_report(graph: &DnsGraph) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ReportData::from_graph(graph))
}

pub fn write_report(path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())
}
