pub mod report;
pub mod scan;

pub use report::{ReportData, ReportFormat, write_report};
pub use scan::{ScanOptions, default_blacklist, execute_scan};

use colored::Colorize;

pub fn print_banner() {
    let banner = r#"
                         __      _
   ___   ___  _   _     / _|  __| | _ __   ___
  / _ \ / _ \| | | |   | |_  / _` || '_ \ / __|
 | (_) |  __/| |_| |   |  _|| (_| || | | |\__ \
  \___/ \___| \__,_|   |_|   \__,_||_| |_||___/
"#;
    println!("{}", banner.cyan().bold());
    println!(
        "  {} {}  {}\n",
        "oeufdns".bright_white().bold(),
        env!("CARGO_PKG_VERSION").cyan(),
        "- map the DNS footprint of a domain".dimmed()
    );
}
