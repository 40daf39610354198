use std::fmt;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;
use word_htable::{ProbingMethod, TableError};

pub const DEFAULT_TABLE_SIZE: usize = 113;
pub const DEFAULT_SNAPSHOTS: usize = 10;

pub const USAGE: &str = "\
Usage: word_htable [OPTION]... <STDIN>

Perform various operations using a hash table.  By default, words are
read from stdin and added to the hash table, before being printed out
alongside their frequencies to stdout.

-c FILENAME  Check spelling of words in FILENAME using words
             from stdin as dictionary.  Print unknown words to
             stdout, timing info & count to stderr (ignore -p)
-d           Use double hashing (linear probing is the default)
-e           Display entire contents of hash table on stderr
-p           Print stats info instead of frequencies & words
-s SNAPSHOTS Show SNAPSHOTS stats snapshots (if -p is used)
-t TABLESIZE Use the first prime >= TABLESIZE as htable size

-h           Display this message
";

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Usage(#[from] clap::Error),
    #[error("No prime table size at or above {0} fits in memory")]
    TableSize(usize),
    #[error("Cannot open {}: {source}", .path.display())]
    Dictionary { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Formatting failed")]
    Format(#[from] fmt::Error),
}

impl CliError {
    /// Errors caused by a malformed command line, as opposed to a failed run
    pub fn is_usage(&self) -> bool {
        matches!(self, CliError::Usage(_) | CliError::TableSize(_))
    }
}

/// Getopt style flags: `-dp` groups flags, `-s5` and `-s 5` both pass a value
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "word_htable", disable_help_flag = true)]
pub struct Options {
    /// Spell-check this file against the words read from stdin
    #[arg(short = 'c', value_name = "FILENAME")]
    pub check_file: Option<PathBuf>,
    #[arg(short = 'd')]
    pub double_hashing: bool,
    #[arg(short = 'e')]
    pub entire_table: bool,
    #[arg(short = 'p')]
    pub print_stats: bool,
    #[arg(short = 's', value_name = "SNAPSHOTS", default_value_t = DEFAULT_SNAPSHOTS)]
    pub snapshots: usize,
    /// Capacity hint, rounded up to a prime
    #[arg(short = 't', value_name = "TABLESIZE", default_value_t = DEFAULT_TABLE_SIZE)]
    pub table_size: usize,
    #[arg(short = 'h')]
    pub help: bool,
}

impl Options {
    pub fn method(&self) -> ProbingMethod {
        if self.double_hashing {
            ProbingMethod::DoubleHashing
        } else {
            ProbingMethod::LinearProbing
        }
    }
}
