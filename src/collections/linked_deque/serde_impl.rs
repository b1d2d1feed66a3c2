//! Serde support: a deque (de)serializes as a sequence, front to back.

use super::LinkedDeque;
use crate::alloc::NodeAlloc;
use core::fmt;
use core::marker::PhantomData;
use serde::de::{Deserialize, Deserializer, Error, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};

impl<T: Serialize, A: NodeAlloc> Serialize for LinkedDeque<T, A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self)
    }
}

struct DequeVisitor<T, A> {
    _marker: PhantomData<fn() -> (T, A)>,
}

impl<'de, T, A> Visitor<'de> for DequeVisitor<T, A>
where
    T: Deserialize<'de>,
    A: NodeAlloc + Default,
{
    type Value = LinkedDeque<T, A>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence")
    }

    fn visit_seq<S: SeqAccess<'de>>(self, mut seq: S) -> Result<Self::Value, S::Error> {
        let mut deque = LinkedDeque::new_in(A::default());
        while let Some(value) = seq.next_element()? {
            deque.append(value).map_err(S::Error::custom)?;
        }
        Ok(deque)
    }
}

/// Deserializes into a deque with a default-constructed allocator.
/// Allocation failure is reported as a custom deserialization error.
impl<'de, T, A> Deserialize<'de> for LinkedDeque<T, A>
where
    T: Deserialize<'de>,
    A: NodeAlloc + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(DequeVisitor {
            _marker: PhantomData,
        })
    }
}
