//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two prices of
/// `10.00` are the same price regardless of where they came from. To "modify"
/// one, build a new one through its validating constructor.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
