use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use oeufdns_core::report::{
    ReportFormat, generate_dot_report, generate_json_report, generate_markdown_report,
    generate_text_report, write_report,
};
use oeufdns_core::scan::{ScanOptions, default_blacklist, execute_scan};
use std::fs;
use std::path::{Path, PathBuf};

/// Load a newline-delimited list file. Blank lines and `#` comments are
/// skipped, entries are lower-cased, and `~` is expanded.
pub fn load_list_from_file(path: &Path) -> Result<Vec<String>> {
    let expanded = shellexpand::tilde(path.to_string_lossy().as_ref()).to_string();
    let content = fs::read_to_string(&expanded)
        .with_context(|| format!("Failed to read list file {}", expanded))?;

    let entries: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_lowercase())
        .collect();

    if entries.is_empty() {
        anyhow::bail!("No entries found in {}", expanded);
    }
    Ok(entries)
}

/// File name written reports land under: dots become underscores.
pub fn report_file_name(domain: &str, format: &ReportFormat) -> String {
    format!("{}_dns_report.{}", domain.replace('.', "_"), format.extension())
}

fn load_optional_list(args: &ArgMatches, id: &str) -> Option<Vec<String>> {
    let path = args.get_one::<PathBuf>(id)?;
    match load_list_from_file(path) {
        Ok(list) => Some(list),
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e);
            std::process::exit(1);
        }
    }
}

fn save_report(domain: &str, format: ReportFormat, content: &str) {
    let file_name = report_file_name(domain, &format);
    match write_report(Path::new(&file_name), content) {
        Ok(()) => println!(
            "{} Report saved: {}",
            "✓".green().bold(),
            file_name.bright_white()
        ),
        Err(e) => eprintln!("{} Failed to write {}: {}", "✗".red(), file_name, e),
    }
}

pub async fn handle_map(sub_matches: &ArgMatches, quiet: bool) {
    let verbose = sub_matches.get_flag("verbose");
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let domain = sub_matches
        .get_one::<String>("DOMAIN")
        .unwrap()
        .trim()
        .to_lowercase();
    if domain.is_empty() || !domain.contains('.') {
        eprintln!("{} Invalid domain '{}'", "✗".red(), domain);
        std::process::exit(1);
    }

    let mut blacklist = if sub_matches.get_flag("no-blacklist") {
        Vec::new()
    } else if let Some(list) = load_optional_list(sub_matches, "blacklist-file") {
        list
    } else {
        default_blacklist()
    };
    if let Some(extra) = sub_matches.get_many::<String>("exclude") {
        blacklist.extend(extra.map(|p| p.trim().to_lowercase()));
    }

    let options = ScanOptions {
        domain: domain.clone(),
        max_depth: *sub_matches.get_one::<usize>("depth").unwrap(),
        workers: *sub_matches.get_one::<usize>("parallel").unwrap(),
        timeout_secs: *sub_matches.get_one::<u64>("timeout").unwrap(),
        blacklist,
        subdomain_wordlist: load_optional_list(sub_matches, "wordlist"),
        srv_services: load_optional_list(sub_matches, "services"),
        show_progress: !quiet,
    };

    let graph = match execute_scan(options).await {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("{} Scan failed: {}", "✗".red(), e);
            std::process::exit(1);
        }
    };

    print!("{}", generate_text_report(&graph));

    if sub_matches.get_flag("markdown") {
        save_report(&domain, ReportFormat::Markdown, &generate_markdown_report(&graph));
    }
    if sub_matches.get_flag("graph") {
        save_report(&domain, ReportFormat::Dot, &generate_dot_report(&graph));
    }
    if sub_matches.get_flag("json") {
        match generate_json_report(&graph) {
            Ok(json) => save_report(&domain, ReportFormat::Json, &json),
            Err(e) => eprintln!("{} Failed to serialize report: {}", "✗".red(), e),
        }
    }
}
