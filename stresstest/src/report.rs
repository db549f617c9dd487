//! Printing of benchmark results.

use yansi::Paint;

use crate::summary::Summary;

/// Prints the summary of a benchmark run.
pub fn print_summary(summary: &Summary) {
    println!();
    println!("{}", "## RESULTS".bold());

    print!(
        "{} ({} requests",
        "CREATE:".bold().green(),
        summary.total.bold()
    );
    if summary.failure > 0 {
        print!(
            ", {}",
            format!("{} FAILURES", summary.failure).bold().red()
        );
    }
    println!(")");

    println!(
        "  success rate: {:.2}%",
        (summary.success_rate() * 100.0).bold()
    );
    println!("  total time: {:.2?}", summary.total_time.bold());
    println!(
        "  latency avg: {:.2?}; min: {:.2?}; max: {:.2?}",
        summary.avg_time.bold(),
        summary.min_time,
        summary.max_time
    );
    println!("  {:.2} requests/s", summary.throughput().bold());
}
