//! Table statistics for tuning and debugging.
//!
//! Compiled with the `stats` feature, and always for tests.

use alloc::vec::Vec;

/// Snapshot of a table's occupancy.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugStats {
    /// Number of live entries.
    pub populated: usize,
    /// Number of slots (open addressing) or buckets (chaining).
    pub capacity: usize,
    /// Slots holding a tombstone. Always zero for chaining tables.
    pub tombstones: usize,
    /// Slots or buckets holding nothing.
    pub empty: usize,
    /// `populated / capacity`.
    pub load_factor: f64,
    /// Estimated bytes held by the table, excluding heap data owned by keys
    /// and values.
    pub total_bytes: usize,
}

impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Table Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor)",
            self.populated,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Slots: {} empty, {} tombstones",
            self.empty, self.tombstones
        );
        println!("Total Allocated: {} bytes", self.total_bytes);
    }
}

/// Counts of entries bucketed by a small integer.
///
/// For open addressing, bin `i` counts entries found after `i` extra probes.
/// For chaining, bin `i` counts buckets holding `i` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeHistogram {
    bins: Vec<usize>,
}

impl ProbeHistogram {
    pub(crate) fn record(&mut self, bin: usize) {
        if self.bins.len() <= bin {
            self.bins.resize(bin + 1, 0);
        }
        self.bins[bin] += 1;
    }

    /// Returns the counts, indexed by bin.
    pub fn bins(&self) -> &[usize] {
        &self.bins
    }

    /// Returns the sum of all bins.
    pub fn total(&self) -> usize {
        self.bins.iter().sum()
    }

    /// Returns the largest non-empty bin, if any.
    pub fn max_bin(&self) -> Option<usize> {
        self.bins.iter().rposition(|&count| count != 0)
    }

    /// Pretty-prints the histogram horizontally using stdout.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let max = self.bins.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!("histogram ({} samples):", self.total());

        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
            let mut bar = "█".repeat(units / 8);
            let partial = match units % 8 {
                1 => Some('▏'),
                2 => Some('▎'),
                3 => Some('▍'),
                4 => Some('▌'),
                5 => Some('▋'),
                6 => Some('▊'),
                7 => Some('▉'),
                _ => None,
            };
            if let Some(ch) = partial {
                bar.push(ch);
            }
            bar
        };

        for (i, &count) in self.bins.iter().enumerate() {
            println!("{:>3} | {} ({})", i, make_bar(count), count);
        }
    }
}
