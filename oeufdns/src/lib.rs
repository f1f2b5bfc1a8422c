// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{load_list_from_file, report_file_name};

// Re-export scan and report functionality from oeufdns-core
pub use oeufdns_core::report::{ReportData, ReportFormat};
pub use oeufdns_core::scan::{ScanOptions, default_blacklist, execute_scan};
