pub mod crawler;
pub mod error;
pub mod graph;
pub mod resolver;
pub mod result;
pub mod strategies;

pub use crawler::Crawler;
pub use error::ScanError;
pub use graph::{DnsGraph, Edge, GraphStats, Node, NodeKind, RelationKind};
pub use resolver::{DnsClient, DnsResolve};
pub use result::Discovery;
