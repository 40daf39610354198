//! Fill statistics of a [`StrHashTable`].
//!
//! Every distinct word records how many collisions it took to place it. A
//! snapshot at `p` percent full looks at the first `capacity * p / 100` words
//! in insertion order, which is what the table looked like when it was that
//! full. The current physical layout plays no part in it.

use alloc::vec::Vec;
use core::fmt;

use crate::fixed_hash_table::StrHashTable;

const RULE: &str = "------------------------------------------------------";

/// One row of the statistics report
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
    pub percent_full: usize,
    pub current_entries: usize,
    /// Share of words placed in their home bucket, 0 to 100
    pub percent_at_home: f64,
    pub average_collisions: f64,
    pub max_collisions: usize,
}

impl StatsSnapshot {
    fn measure(collisions: &[usize], percent_full: usize) -> Self {
        let current_entries = collisions.len();
        let at_home = collisions.iter().filter(|c| **c == 0).count();
        let total: usize = collisions.iter().sum();
        Self {
            percent_full,
            current_entries,
            percent_at_home: at_home as f64 * 100.0 / current_entries as f64,
            average_collisions: total as f64 / current_entries as f64,
            max_collisions: collisions.iter().copied().max().unwrap_or(0),
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:4} {:10} {:11.1} {:10.2} {:11}",
            self.percent_full,
            self.current_entries,
            self.percent_at_home,
            self.average_collisions,
            self.max_collisions
        )
    }
}

/// Snapshots at `100 / num_snapshots` percent intervals.
///
/// Intervals the table never reached are left out, so a table that is half full
/// yields at most half of the rows.
pub fn snapshots(table: &StrHashTable, num_snapshots: usize) -> Vec<StatsSnapshot> {
    let collisions = table.insertion_collisions();
    (1..=num_snapshots)
        .filter_map(|i| {
            let percent_full = 100 * i / num_snapshots;
            let current_entries = table.capacity() * percent_full / 100;
            if current_entries > 0 && current_entries <= collisions.len() {
                Some(StatsSnapshot::measure(
                    &collisions[..current_entries],
                    percent_full,
                ))
            } else {
                None
            }
        })
        .collect()
}

pub fn write_report<W: fmt::Write>(
    table: &StrHashTable,
    out: &mut W,
    num_snapshots: usize,
) -> fmt::Result {
    writeln!(out, "\n{}\n", table.method())?;
    writeln!(out, "Percent   Current    Percent    Average      Maximum")?;
    writeln!(out, " Full     Entries    At Home   Collisions   Collisions")?;
    writeln!(out, "{}", RULE)?;
    for snapshot in snapshots(table, num_snapshots) {
        writeln!(out, "{}", snapshot)?;
    }
    writeln!(out, "{}\n", RULE)
}
