//! Domain identifiers (strongly-typed IDs).
//!
//! レコードストア側の ID は数値（u64）です。
//! Phantom type パターンで `PolicyId` と `CarId` を別の型として扱い、
//! 実装は `Id<T>` 一つに集約しています。

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックス（"policy-", "car-"）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// serde では素の数値としてシリアライズされます（`42`）。
/// Display だけがプレフィックス付き（`policy-42`）です。
#[repr(transparent)]
pub struct Id<T: IdMarker> {
    value: u64,
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub const fn new(value: u64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub fn get(&self) -> u64 {
        self.value
    }
}

// derive だと `T: Clone` などの境界が付いてしまうので手で実装する
impl<T: IdMarker> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: IdMarker> Copy for Id<T> {}

impl<T: IdMarker> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: IdMarker> Eq for Id<T> {}

impl<T: IdMarker> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: IdMarker> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T: IdMarker> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T: IdMarker> From<u64> for Id<T> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<T: IdMarker> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.value)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.value)
    }
}

impl<T: IdMarker> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.value)
    }
}

impl<'de, T: IdMarker> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::new)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Policy のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PolicyMarker {}

impl IdMarker for PolicyMarker {
    fn prefix() -> &'static str {
        "policy-"
    }
}

/// Car のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CarMarker {}

impl IdMarker for CarMarker {
    fn prefix() -> &'static str {
        "car-"
    }
}

/// Identifier of an insurance policy.
pub type PolicyId = Id<PolicyMarker>;

/// Identifier of the car a policy covers.
pub type CarId = Id<CarMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_type_prefix() {
        assert_eq!(PolicyId::new(42).to_string(), "policy-42");
        assert_eq!(CarId::new(7).to_string(), "car-7");

        // let _: PolicyId = CarId::new(7); // <- does not compile
    }

    #[test]
    fn markers_are_distinct_from_record_types() {
        // domain::Policy はレコード、ここにあるのはマーカーだけ
        assert_eq!(PolicyMarker::prefix(), "policy-");
        assert_eq!(CarMarker::prefix(), "car-");
        let _: Id<PolicyMarker> = PolicyId::new(1);
    }

    #[test]
    fn ids_serialize_as_bare_numbers() {
        let id = PolicyId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let back: PolicyId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn phantom_data_does_not_consume_memory() {
        use std::mem::size_of;

        assert_eq!(size_of::<PolicyId>(), size_of::<u64>());
        assert_eq!(size_of::<CarId>(), size_of::<u64>());
    }
}
