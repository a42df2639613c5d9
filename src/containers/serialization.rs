//! Serde support: both containers serialize as an ordered sequence.
//!
//! Deserializing feeds the elements through `insert`, so a [`SortedSet`]
//! built from a sequence with repeated keys keeps the first of each.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{SortedSet, SortedTree};
use crate::compare::Compare;

fn serialize_sequence<'a, T, I, S>(len: usize, values: I, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
    S: Serializer,
{
    let mut sequence = serializer.serialize_seq(Some(len))?;
    for value in values {
        sequence.serialize_element(value)?;
    }
    sequence.end()
}

struct SequenceVisitor<Container, T> {
    marker: PhantomData<fn() -> (Container, T)>,
}

impl<Container, T> SequenceVisitor<Container, T> {
    const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<'de, Container, T> Visitor<'de> for SequenceVisitor<Container, T>
where
    Container: Default + Extend<T>,
    T: Deserialize<'de>,
{
    type Value = Container;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut container = Container::default();
        while let Some(value) = access.next_element::<T>()? {
            container.extend(std::iter::once(value));
        }
        Ok(container)
    }
}

impl<T: Serialize, C> Serialize for SortedTree<T, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_sequence(self.len(), self, serializer)
    }
}

impl<'de, T, C> Deserialize<'de> for SortedTree<T, C>
where
    T: Deserialize<'de>,
    C: Compare<T> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SequenceVisitor::<Self, T>::new())
    }
}

impl<T: Serialize, C> Serialize for SortedSet<T, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_sequence(self.len(), self, serializer)
    }
}

impl<'de, T, C> Deserialize<'de> for SortedSet<T, C>
where
    T: Deserialize<'de>,
    C: Compare<T> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SequenceVisitor::<Self, T>::new())
    }
}
