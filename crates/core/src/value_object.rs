//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**; they have no
/// identity of their own. `Money { amount, currency }` is a value object; an
/// `Account` with an `AccountId` is an entity. To "modify" a value object,
/// construct a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
