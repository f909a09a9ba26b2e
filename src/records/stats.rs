//! Run statistics
//!
//! Counters accumulated by the batch runner and the end-of-run report.

use crate::records::ProfileRecord;

/// Outcome counters for one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Rows or partners processed
    pub total: usize,

    /// Profile pages visited (successfully or not)
    pub visited: usize,

    /// Rows that needed no visit
    pub skipped: usize,

    /// Output rows that have a website
    pub websites_found: usize,

    /// Output rows that have an email
    pub emails_found: usize,

    /// Visits that failed and produced no data
    pub failures: usize,
}

impl RunStatistics {
    /// Recounts the found websites/emails over final output rows
    pub fn count_found(&mut self, records: &[ProfileRecord]) {
        self.websites_found = records.iter().filter(|r| r.website.is_some()).count();
        self.emails_found = records.iter().filter(|r| r.email.is_some()).count();
    }

    /// Percentage of output rows with an email
    pub fn email_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.emails_found as f64 / self.total as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RunStatistics) {
    println!("\nStatistics:");
    println!("  Total partners: {}", stats.total);
    println!("  Profiles visited: {}", stats.visited);
    if stats.skipped > 0 {
        println!("  Rows already complete: {}", stats.skipped);
    }
    println!("  Websites found: {}", stats.websites_found);
    println!(
        "  Emails found: {} ({:.1}%)",
        stats.emails_found,
        stats.email_rate()
    );
    if stats.failures > 0 {
        println!("  Failed visits: {}", stats.failures);
    }
}
