use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Invalid table capacity {capacity}, at least 2 slots are required")]
    InvalidCapacity { capacity: usize },
    #[error("Could not insert. All {capacity} slots are occupied")]
    TableFull { capacity: usize },
}

pub type Result<T> = core::result::Result<T, TableError>;
