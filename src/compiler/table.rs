//! Insertion-ordered fingerprint → payload mapping.

use std::collections::HashMap;

/// One distinct fingerprint and the payload currently assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Slot {
    pub(crate) fingerprint: u32,
    /// Lookup key of the entry that produced `payload`, kept for diagnostics.
    pub(crate) key: String,
    /// Encoded target including the terminator.
    pub(crate) payload: Vec<u8>,
}

/// Outcome of [`FingerprintTable::insert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Insertion {
    /// The fingerprint was not present yet.
    New,
    /// The fingerprint existed; its payload was replaced in place.
    Replaced { previous_key: String },
}

/// Ordered list of slots plus a fingerprint → position index.
///
/// Re-inserting a fingerprint overwrites the payload but keeps the slot where the
/// fingerprint was first seen.
#[derive(Debug, Clone, Default)]
pub(crate) struct FingerprintTable {
    /// Slots in first-insertion order.
    slots: Vec<Slot>,
    /// Position of each fingerprint in `slots`.
    positions: HashMap<u32, usize>,
}

impl FingerprintTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, fingerprint: u32, key: String, payload: Vec<u8>) -> Insertion {
        if let Some(slot) =
            self.positions.get(&fingerprint).and_then(|&position| self.slots.get_mut(position))
        {
            let previous_key = std::mem::replace(&mut slot.key, key);
            slot.payload = payload;
            return Insertion::Replaced { previous_key };
        }

        self.positions.insert(fingerprint, self.slots.len());
        self.slots.push(Slot { fingerprint, key, payload });
        Insertion::New
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn into_slots(self) -> Vec<Slot> {
        self.slots
    }
}
