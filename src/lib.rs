//! Fixed-capacity word frequency table using open addressing, with the
//! tooling around it: a word tokenizer, prime table sizing and collision
//! statistics.

extern crate alloc;

pub mod error;
pub mod fixed_hash_table;
pub mod primes;
pub mod stats;
pub mod words;

pub use error::TableError;
pub use fixed_hash_table::{word_hash, HashTable, ProbingMethod, StrHashTable};
