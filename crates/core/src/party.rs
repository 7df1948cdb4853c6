//! Polymorphic party reference for sub-ledger attribution.

use serde::{Deserialize, Serialize};

use crate::id::PartyId;

/// Party referenced by a journal line (customer/vendor/employee), or none.
///
/// A tagged union instead of a loose `(type, uuid)` pair, so callers
/// branching on party kind get compile-time exhaustiveness.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum PartyRef {
    #[default]
    None,
    Customer(PartyId),
    Vendor(PartyId),
    Employee(PartyId),
}

impl PartyRef {
    pub fn party_id(&self) -> Option<PartyId> {
        match *self {
            PartyRef::None => None,
            PartyRef::Customer(id) | PartyRef::Vendor(id) | PartyRef::Employee(id) => Some(id),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, PartyRef::None)
    }
}
