// src/id.rs
use crate::core::types::RecordId;
use uuid::Uuid;

/// Source of record identifiers. Implementations must not repeat an id;
/// the engine does not check.
pub trait IdGenerator {
    fn next_id(&mut self) -> RecordId;
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> RecordId {
        Uuid::new_v4()
    }
}

/// Hands out `1, 2, 3, ...` as UUIDs. Handy when ids must be reproducible.
#[derive(Debug, Default, Clone)]
pub struct SequentialIdGenerator {
    last: u128,
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> RecordId {
        self.last += 1;
        Uuid::from_u128(self.last)
    }
}
