//! Metric listing command implementation.

use anyhow::Result;
use garp_fundamentals::registry::{available_metrics, metrics_by_category};
use garp_fundamentals::MetricCategory;

const CATEGORIES: [(MetricCategory, &str); 8] = [
    (MetricCategory::Identity, "Identity"),
    (MetricCategory::Price, "Price"),
    (MetricCategory::Earnings, "Earnings"),
    (MetricCategory::Valuation, "Valuation"),
    (MetricCategory::Income, "Income"),
    (MetricCategory::BalanceSheet, "Balance sheet"),
    (MetricCategory::Profitability, "Profitability"),
    (MetricCategory::Solvency, "Solvency"),
];

/// List exported metrics, optionally filtered by category.
pub(crate) fn list_metrics(category: Option<String>, verbose: bool) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Available Metrics                         ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    for (cat, cat_name) in CATEGORIES {
        if let Some(ref filter) = category
            && !cat_name.to_lowercase().contains(&filter.to_lowercase())
        {
            continue;
        }

        let metrics = metrics_by_category(cat);
        if metrics.is_empty() {
            continue;
        }

        println!("{cat_name}: {}", cat.description());
        println!("{}", "-".repeat(60));

        for metric in metrics {
            let scope = match (metric.daily, metric.record) {
                (true, true) => "daily, record",
                (true, false) => "daily",
                (false, true) => "record",
                (false, false) => "-",
            };
            if verbose {
                println!("  {:22} - {} ({scope})", metric.name, metric.description);
            } else {
                println!("  {}", metric.name);
            }
        }
        println!();
    }

    if !verbose {
        println!(
            "{} metrics. Use --verbose for descriptions.\n",
            available_metrics().len()
        );
    }

    Ok(())
}
