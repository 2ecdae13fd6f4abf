//! The dispatch table: symbol → opcode, with a description per entry.
//!
//! Entries are keyed by the symbol's byte value and placed by open
//! addressing with linear probing. The standard table is built once on
//! first use and is read-only afterwards.

use std::borrow::Cow;
use std::sync::OnceLock;

use crate::error::DispatchError;
use crate::opcode::{Opcode, ALL_OPCODES};

/// Slot count of the standard table. Prime, and well above the 32 opcodes.
pub const STANDARD_CAPACITY: usize = 127;

/// One registered opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchEntry {
    pub symbol: u8,
    pub opcode: Opcode,
    pub description: &'static str,
}

/// An open-addressed table mapping symbols to opcodes.
#[derive(Debug, Clone)]
pub struct DispatchTable {
    slots: Vec<Option<DispatchEntry>>,
    len: usize,
}

impl DispatchTable {
    /// Create an empty table with `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            len: 0,
        }
    }

    /// The process-wide table holding every opcode.
    pub fn standard() -> &'static DispatchTable {
        static TABLE: OnceLock<DispatchTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            let mut table = DispatchTable::with_capacity(STANDARD_CAPACITY);
            for &opcode in &ALL_OPCODES {
                // 32 distinct symbols always fit in 127 slots.
                if let Err(e) = table.register(opcode.symbol(), opcode, opcode.description()) {
                    unreachable!("standard dispatch table rejected {opcode:?}: {e}");
                }
            }
            table
        })
    }

    /// Place `opcode` under `symbol`.
    pub fn register(
        &mut self,
        symbol: u8,
        opcode: Opcode,
        description: &'static str,
    ) -> Result<(), DispatchError> {
        if self.lookup(symbol).is_some() {
            return Err(DispatchError::Duplicate { symbol });
        }

        let capacity = self.slots.len();
        let full = DispatchError::TableFull { symbol, capacity };
        if capacity == 0 {
            return Err(full);
        }

        let origin = self.home(symbol);
        let mut index = origin;
        while self.slots[index].is_some() {
            index = (index + 1) % capacity;
            if index == origin {
                return Err(full);
            }
        }

        self.slots[index] = Some(DispatchEntry {
            symbol,
            opcode,
            description,
        });
        self.len += 1;
        Ok(())
    }

    /// The opcode registered under `symbol`, if any.
    pub fn lookup(&self, symbol: u8) -> Option<Opcode> {
        self.entry(symbol).map(|entry| entry.opcode)
    }

    /// The full entry registered under `symbol`, if any.
    ///
    /// Probing stops at a match, at an empty slot, or after one full cycle.
    pub fn entry(&self, symbol: u8) -> Option<&DispatchEntry> {
        let capacity = self.slots.len();
        if capacity == 0 {
            return None;
        }

        let origin = self.home(symbol);
        let mut index = origin;
        while let Some(entry) = &self.slots[index] {
            if entry.symbol == symbol {
                return Some(entry);
            }
            index = (index + 1) % capacity;
            if index == origin {
                break;
            }
        }
        None
    }

    /// Describe any byte. Never fails.
    ///
    /// Registered symbols return their fixed description. Other 7-bit bytes
    /// are described as skipped no-ops, and bytes above 127 as invalid.
    pub fn describe(&self, byte: u8) -> Cow<'static, str> {
        if let Some(entry) = self.entry(byte) {
            return Cow::Borrowed(entry.description);
        }

        if byte > 127 {
            Cow::Owned(format!(
                "invalid character: ASCII {byte} (outside valid 7-bit ASCII range)"
            ))
        } else if byte.is_ascii_graphic() || byte == b' ' {
            Cow::Owned(format!(
                "no operation (character '{}' skipped)",
                byte as char
            ))
        } else {
            Cow::Owned(format!("no operation (character ASCII {byte} skipped)"))
        }
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Registered entries sorted by symbol.
    pub fn entries(&self) -> Vec<DispatchEntry> {
        let mut entries: Vec<DispatchEntry> = self.slots.iter().flatten().copied().collect();
        entries.sort_by_key(|entry| entry.symbol);
        entries
    }

    fn home(&self, symbol: u8) -> usize {
        symbol as usize % self.slots.len()
    }
}
