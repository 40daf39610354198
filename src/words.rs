//! Lazy word tokenizer.
//!
//! A word is a run of ASCII letters and digits, lowercased. Apostrophes inside
//! a word are dropped so that "don't" reads as "dont"; any other byte ends the
//! word.

use compact_str::CompactString;
use log::warn;
use std::io::{self, Bytes, Read};
use std::iter::Peekable;

/// Longest word handed to the table, in bytes
pub const MAX_WORD_LEN: usize = 255;

pub struct Words<R: Read> {
    bytes: Peekable<Bytes<R>>,
    max_len: usize,
}

impl<R: Read> Words<R> {
    pub fn new(reader: R) -> Self {
        Self::with_limit(reader, MAX_WORD_LEN)
    }

    /// Words longer than `max_len` bytes are cut, the remainder starts the next word
    pub fn with_limit(reader: R, max_len: usize) -> Self {
        Self {
            bytes: reader.bytes().peekable(),
            max_len: max_len.max(1),
        }
    }
}

impl<R: Read> Iterator for Words<R> {
    type Item = io::Result<CompactString>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut word = CompactString::default();
        // Skip to the start of the next word
        loop {
            match self.bytes.next()? {
                Ok(b) if b.is_ascii_alphanumeric() => {
                    word.push(b.to_ascii_lowercase() as char);
                    break;
                }
                Ok(_) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        while word.len() < self.max_len {
            match self.bytes.next() {
                Some(Ok(b)) if b.is_ascii_alphanumeric() => word.push(b.to_ascii_lowercase() as char),
                Some(Ok(b'\'')) => continue,
                Some(Ok(_)) | None => return Some(Ok(word)),
                Some(Err(e)) => return Some(Err(e)),
            }
        }
        if matches!(self.bytes.peek(), Some(Ok(b)) if b.is_ascii_alphanumeric() || *b == b'\'') {
            warn!("Word longer than {} bytes cut to {}", self.max_len, word);
        }
        Some(Ok(word))
    }
}
