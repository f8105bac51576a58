use thiserror::Error;

use crate::constant_pool::Tag;

#[derive(Error, Debug)]
pub enum ClassFileError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error("Invalid magic identifier: 0x{0:08X}")]
    BadMagicNumber(u32),
    #[error("Truncated input: {needed} more byte(s) needed at offset {offset}")]
    TruncatedInput { offset: u64, needed: usize },
    #[error("Unknown constant pool tag: {0}")]
    UnknownConstantTag(u8),
    #[error("Invalid constant pool index: #{0}")]
    InvalidConstantIndex(u16),
    #[error("Reference cycle detected while resolving constant pool index #{0}")]
    ReferenceCycleDetected(u16),
    #[error("Expected {expected} at constant pool index #{index}, found {found}")]
    UnexpectedConstantPoolEntry {
        index: u16,
        expected: Tag,
        found: Tag,
    },
}
