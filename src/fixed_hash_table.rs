use alloc::vec::Vec;
use compact_str::CompactString;
use core::{borrow::Borrow, fmt};
use log::{debug, trace};

use crate::error::{Result, TableError};
use crate::stats;

#[cfg(test)]
use unix_print::unix_println as println;

/// A word frequency table with a fixed number of slots
pub trait HashTable {
    /// Initializes an empty table with exactly `capacity` slots. Capacity is never changed afterwards
    fn new(capacity: usize, method: ProbingMethod) -> Result<Self>
    where
        Self: Sized;

    /// Counts one occurrence of `word`, returning its frequency after the insert.
    /// A frequency of 1 means the word was not in the table before.
    fn insert(&mut self, word: impl Borrow<str>) -> Result<u32>;

    /// Frequency of `word`, 0 if it was never inserted
    fn search(&self, word: impl Borrow<str>) -> u32;

    /// Returns the number of distinct words
    fn len(&self) -> usize;

    /// Returns true when no word was inserted yet
    fn is_empty(&self) -> bool;
}

/// Collision resolution strategy, fixed when the table is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbingMethod {
    /// Always advance one slot
    #[default]
    LinearProbing,
    /// Advance by a per-word step derived from the word hash
    DoubleHashing,
}

impl ProbingMethod {
    /// Probe step for a word with hash `h` in a table of `capacity` slots
    fn step(self, h: u32, capacity: usize) -> usize {
        match self {
            ProbingMethod::LinearProbing => 1,
            ProbingMethod::DoubleHashing => 1 + (h as usize % (capacity - 1)),
        }
    }
}

impl fmt::Display for ProbingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbingMethod::LinearProbing => f.write_str("Linear Probing"),
            ProbingMethod::DoubleHashing => f.write_str("Double Hashing"),
        }
    }
}

/// Polynomial rolling hash over the bytes of `word`.
///
/// Overflow wraps on purpose: bucket placement must be reproducible across platforms.
pub fn word_hash(word: &str) -> u32 {
    word.bytes()
        .fold(0u32, |acc, b| u32::from(b).wrapping_add(acc.wrapping_mul(31)))
}

#[derive(Debug)]
#[repr(u8)]
enum Entry<K, V> {
    Empty,
    /// Occupied contains Key, Value and the index to the insertion statistics
    Occupied(K, V, usize),
}

type SKeyType = CompactString;
type SValueType = u32;

/// Outcome of walking a word's probe sequence
enum Probe {
    Found(usize),
    Vacant { bucket_i: usize, collisions: usize },
    Exhausted,
}

#[derive(Debug)]
pub struct StrHashTable {
    buckets: Vec<Entry<SKeyType, SValueType>>,
    // Collision depth of every distinct word, by insertion order. Buckets keep
    // the index into this vector so the depth of a slot can be found again.
    insertion_collisions: Vec<usize>,
    // the table capacity (cache)
    capacity: usize,
    // Number of distinct words
    size: usize,
    method: ProbingMethod,
}

impl HashTable for StrHashTable {
    fn new(capacity: usize, method: ProbingMethod) -> Result<Self> {
        if capacity < 2 {
            return Err(TableError::InvalidCapacity { capacity });
        }
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, || Entry::Empty);
        debug!("New table with {} slots using {}", capacity, method);
        Ok(Self {
            buckets,
            insertion_collisions: Vec::new(),
            capacity,
            size: 0,
            method,
        })
    }

    fn insert(&mut self, word: impl Borrow<str>) -> Result<u32> {
        let word: &str = word.borrow();
        match self.probe(word) {
            Probe::Found(bucket_i) => match &mut self.buckets[bucket_i] {
                Entry::Occupied(_, count, _) => {
                    *count += 1;
                    Ok(*count)
                }
                Entry::Empty => unreachable!("Probe found a word in an empty bucket"),
            },
            Probe::Vacant {
                bucket_i,
                collisions,
            } => {
                #[cfg(test)]
                println!("Adding {} to bucket {} after {} collisions", word, bucket_i, collisions);
                trace!("{} placed in bucket {} after {} collisions", word, bucket_i, collisions);
                self.insertion_collisions.push(collisions);
                let insertion_i = self.insertion_collisions.len() - 1;
                self.buckets[bucket_i] = Entry::Occupied(word.into(), 1, insertion_i);
                self.size += 1;
                Ok(1)
            }
            Probe::Exhausted => Err(TableError::TableFull {
                capacity: self.capacity,
            }),
        }
    }

    fn search(&self, word: impl Borrow<str>) -> u32 {
        match self.probe(word.borrow()) {
            Probe::Found(bucket_i) => match &self.buckets[bucket_i] {
                Entry::Occupied(_, count, _) => *count,
                Entry::Empty => 0,
            },
            Probe::Vacant { .. } | Probe::Exhausted => 0,
        }
    }

    fn len(&self) -> usize {
        self.size
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StrHashTable {
    // Walks at most `capacity` buckets, so a full table can never loop forever.
    fn probe(&self, word: &str) -> Probe {
        let h = word_hash(word);
        let step = self.method.step(h, self.capacity);
        let mut bucket_i = h as usize % self.capacity;
        for collisions in 0..self.capacity {
            match &self.buckets[bucket_i] {
                Entry::Empty => {
                    return Probe::Vacant {
                        bucket_i,
                        collisions,
                    }
                }
                Entry::Occupied(k, _, _) if k.as_str() == word => return Probe::Found(bucket_i),
                Entry::Occupied(..) => bucket_i = (bucket_i + step) % self.capacity,
            }
        }
        Probe::Exhausted
    }

    pub fn contains(&self, word: impl Borrow<str>) -> bool {
        self.search(word) > 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn method(&self) -> ProbingMethod {
        self.method
    }

    /// Collision depth of every distinct word, in the order the words were first inserted
    pub fn insertion_collisions(&self) -> &[usize] {
        &self.insertion_collisions
    }

    /// Occupied buckets as `(word, frequency)`, in physical slot order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.buckets.iter().filter_map(|entry| match entry {
            Entry::Occupied(k, v, _) => Some((k.as_str(), *v)),
            Entry::Empty => None,
        })
    }

    /// Every bucket in physical order: `Some((word, frequency, collision depth))` or `None` when empty
    pub fn slots(&self) -> impl Iterator<Item = Option<(&str, u32, usize)>> {
        self.buckets.iter().map(|entry| match entry {
            Entry::Occupied(k, v, insertion_i) => {
                Some((k.as_str(), *v, self.insertion_collisions[*insertion_i]))
            }
            Entry::Empty => None,
        })
    }

    /// Writes one `frequency word` line per stored word, in slot order
    pub fn print_all<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        for (word, count) in self.iter() {
            writeln!(out, "{} {}", count, word)?;
        }
        Ok(())
    }

    /// Writes every slot, empty ones included, with its frequency and collision depth
    pub fn print_entire_table<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "  Pos  Freq  Stats  Word")?;
        writeln!(out, "----------------------------------------")?;
        for (pos, slot) in self.slots().enumerate() {
            match slot {
                Some((word, count, depth)) => {
                    writeln!(out, "{:5} {:5} {:5}   {}", pos, count, depth, word)?
                }
                None => writeln!(out, "{:5} {:5} {:5}   ", pos, 0, 0)?,
            }
        }
        Ok(())
    }

    /// Writes the fill statistics report with up to `num_snapshots` rows
    pub fn print_stats<W: fmt::Write>(&self, out: &mut W, num_snapshots: usize) -> fmt::Result {
        stats::write_report(self, out, num_snapshots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    fn table(capacity: usize, method: ProbingMethod) -> StrHashTable {
        StrHashTable::new(capacity, method).unwrap()
    }

    #[test]
    fn test_word_hash() {
        assert_eq!(word_hash(""), 0);
        assert_eq!(word_hash("a"), 97);
        assert_eq!(word_hash("ab"), 98 + 31 * 97);
        // Long words wrap around instead of overflowing
        let long = "z".repeat(64);
        let expected = long
            .bytes()
            .fold(0u64, |acc, b| (b as u64 + 31 * acc) % (1u64 << 32));
        assert_eq!(word_hash(&long) as u64, expected);
    }

    #[test]
    fn test_rejects_tiny_capacity() {
        assert_eq!(
            StrHashTable::new(1, ProbingMethod::DoubleHashing).unwrap_err(),
            TableError::InvalidCapacity { capacity: 1 }
        );
        assert!(StrHashTable::new(0, ProbingMethod::LinearProbing).is_err());
        assert!(StrHashTable::new(2, ProbingMethod::DoubleHashing).is_ok());
    }

    #[test]
    fn test_base_insert() {
        let mut table = table(13, ProbingMethod::LinearProbing);
        assert!(table.is_empty());
        for word in ["the", "quick", "brown", "the", "fox"] {
            table.insert(word).unwrap();
        }

        assert_eq!(table.search("the"), 2);
        assert_eq!(table.search("fox"), 1);
        assert_eq!(table.search("dog"), 0);
        assert_eq!(table.len(), 4);
        assert!(table.contains("quick"));
        assert!(!table.contains("dog"));
    }

    #[test]
    fn test_insert_returns_frequency() {
        let mut table = table(113, ProbingMethod::DoubleHashing);
        assert_eq!(table.insert("hello").unwrap(), 1);
        assert_eq!(table.insert("hello").unwrap(), 2);
        assert_eq!(table.insert("hello").unwrap(), 3);
        assert_eq!(table.search("hello"), 3);
        // Repeats don't add statistics
        assert_eq!(table.insertion_collisions().len(), 1);
    }

    #[test]
    fn test_linear_collision() {
        // "a" = 97 and "n" = 110 share home bucket 6 in 13 slots
        let mut table = table(13, ProbingMethod::LinearProbing);
        table.insert("a").unwrap();
        table.insert("n").unwrap();
        let slots: Vec<_> = table.slots().collect();
        assert_eq!(slots[6], Some(("a", 1, 0)));
        assert_eq!(slots[7], Some(("n", 1, 1)));
        assert_eq!(table.insertion_collisions(), &[0, 1]);
    }

    #[test]
    fn test_double_hashing_collision() {
        // step for "n" is 1 + 110 % 12 = 3, so it lands three buckets past "a"
        let mut table = table(13, ProbingMethod::DoubleHashing);
        table.insert("a").unwrap();
        table.insert("n").unwrap();
        let slots: Vec<_> = table.slots().collect();
        assert_eq!(slots[6], Some(("a", 1, 0)));
        assert_eq!(slots[9], Some(("n", 1, 1)));
        assert_eq!(slots[7], None);
        assert_eq!(table.search("n"), 1);
    }

    #[test]
    fn test_probe_wraps_around() {
        // "c" = 99 and "h" = 104 both start at the last bucket of 5
        let mut table = table(5, ProbingMethod::LinearProbing);
        table.insert("c").unwrap();
        table.insert("h").unwrap();
        let slots: Vec<_> = table.slots().collect();
        assert_eq!(slots[4], Some(("c", 1, 0)));
        assert_eq!(slots[0], Some(("h", 1, 1)));
    }

    #[test]
    fn test_full_table() {
        for method in [ProbingMethod::LinearProbing, ProbingMethod::DoubleHashing] {
            let mut table = table(7, method);
            for word in ["a", "b", "c", "d", "e", "f"] {
                table.insert(word).unwrap();
            }
            // One free slot left: a new word still fits
            assert_eq!(table.insert("g").unwrap(), 1);
            assert_eq!(table.len(), 7);
            // Existing words can still be counted
            assert_eq!(table.insert("a").unwrap(), 2);
            // But a new one can't
            assert_eq!(
                table.insert("zebra").unwrap_err(),
                TableError::TableFull { capacity: 7 }
            );
            assert_eq!(table.len(), 7);
            assert_eq!(table.insertion_collisions().len(), 7);
            assert_eq!(table.search("zebra"), 0);
            assert_eq!(table.search("g"), 1);
        }
    }

    #[test]
    fn test_methods_agree_on_frequencies() {
        let text = "it was the best of times it was the worst of times \
                    it was the age of wisdom it was the age of foolishness";
        let mut linear = table(31, ProbingMethod::LinearProbing);
        let mut double = table(31, ProbingMethod::DoubleHashing);
        for word in text.split_whitespace() {
            linear.insert(word).unwrap();
            double.insert(word).unwrap();
        }
        assert_eq!(linear.len(), double.len());
        for word in text.split_whitespace() {
            let expected = text.split_whitespace().filter(|w| *w == word).count() as u32;
            assert_eq!(linear.search(word), expected);
            assert_eq!(double.search(word), expected);
        }
    }

    #[test]
    fn test_print_all() {
        let mut table = table(13, ProbingMethod::LinearProbing);
        table.insert("a").unwrap();
        table.insert("n").unwrap();
        table.insert("a").unwrap();

        let mut out = String::new();
        table.print_all(&mut out).unwrap();
        assert_eq!(out, "2 a\n1 n\n");

        let mut again = String::new();
        table.print_all(&mut again).unwrap();
        assert_eq!(out, again);
    }

    #[test]
    fn test_print_entire_table() {
        let mut table = table(3, ProbingMethod::LinearProbing);
        // "a" = 97 % 3 = 1, "d" = 100 % 3 = 1 -> bucket 2
        table.insert("a").unwrap();
        table.insert("d").unwrap();

        let mut out = String::new();
        table.print_entire_table(&mut out).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "  Pos  Freq  Stats  Word");
        assert_eq!(lines[2], "    0     0     0   ");
        assert_eq!(lines[3], "    1     1     0   a");
        assert_eq!(lines[4], "    2     1     1   d");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_method_label() {
        use alloc::string::ToString;
        assert_eq!(ProbingMethod::LinearProbing.to_string(), "Linear Probing");
        assert_eq!(ProbingMethod::DoubleHashing.to_string(), "Double Hashing");
        assert_eq!(ProbingMethod::default(), ProbingMethod::LinearProbing);
    }
}
