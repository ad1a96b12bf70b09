//! Identifier generators.

use crate::todo::{domain::TodoId, ports::IdGenerator};
use std::sync::atomic::{AtomicU64, Ordering};

/// Generates 16-character lowercase hexadecimal identifiers from random
/// UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn new_id(&self) -> TodoId {
        let simple = uuid::Uuid::new_v4().simple().to_string();
        let short: String = simple.chars().take(16).collect();
        TodoId::from_generated(short)
    }
}

/// Generates `t000001`, `t000002`, ... for reproducible output.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Creates a generator whose first identifier is `t000001`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn new_id(&self) -> TodoId {
        let value = self.next.fetch_add(1, Ordering::Relaxed).saturating_add(1);
        TodoId::from_generated(format!("t{value:06}"))
    }
}
