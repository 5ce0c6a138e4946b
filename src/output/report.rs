//! Console summaries of crawl results

use crate::crawler::CrawlReport;
use crate::output::ResultsFile;
use std::path::Path;

/// Formats the one-line result for a single domain
pub fn format_domain_report(report: &CrawlReport) -> String {
    format!(
        "Found {} product URLs for {} in {:.2} seconds ({} pages visited)",
        report.product_urls.len(),
        report.domain,
        report.duration.as_secs_f64(),
        report.visited
    )
}

/// Formats the end-of-run summary
pub fn format_run_summary(results: &ResultsFile, output_path: &Path) -> String {
    let mut out = String::new();

    out.push_str("=== Crawl Summary ===\n\n");
    out.push_str("Domains:\n");
    for (domain, meta) in &results.domain_metadata {
        out.push_str(&format!(
            "  {}: {} products (crawled {}, {:.2}s)\n",
            domain, meta.product_count, meta.crawl_date, meta.duration_seconds
        ));
    }
    out.push('\n');

    out.push_str(&format!(
        "Total product URLs found: {}\n",
        results.total_products()
    ));
    out.push_str(&format!("Results saved to {}\n", output_path.display()));

    out
}

/// Prints the end-of-run summary to stdout
pub fn print_run_summary(results: &ResultsFile, output_path: &Path) {
    print!("{}", format_run_summary(results, output_path));
}
