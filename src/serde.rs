use bytemuck::Pod;
use core::marker::PhantomData;
use serde_core::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{SeqAccess, Visitor},
    ser::SerializeSeq,
};

use crate::{Backend, GrowthPolicy, Podder};

// Upper bound on the capacity trusted from a sequence length hint.
const MAX_PREALLOC: usize = 4096;

impl<T: Pod + Serialize, P: GrowthPolicy, A: Backend> Serialize for Podder<T, P, A> {
    /// Serialize a `Podder` as a sequence.
    ///
    /// The format is identical whether the elements are inline or on the heap.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

impl<'de, T, P, A> Deserialize<'de> for Podder<T, P, A>
where
    T: Pod + Deserialize<'de>,
    P: GrowthPolicy,
    A: Backend,
{
    /// Deserialize a `Podder` from a sequence.
    ///
    /// A sequence that fits inline produces a small `Podder`.
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PodderVisitor<T, P, A> {
            _marker: PhantomData<fn() -> (T, P, A)>,
        }

        impl<'de, T, P, A> Visitor<'de> for PodderVisitor<T, P, A>
        where
            T: Pod + Deserialize<'de>,
            P: GrowthPolicy,
            A: Backend,
        {
            type Value = Podder<T, P, A>;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a sequence")
            }

            fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
            where
                S: SeqAccess<'de>,
            {
                let mut vec = match seq.size_hint() {
                    Some(hint) => Podder::with_capacity(core::cmp::min(hint, MAX_PREALLOC)),
                    None => Podder::new(),
                };

                while let Some(element) = seq.next_element()? {
                    vec.push_back(element);
                }

                Ok(vec)
            }
        }

        deserializer.deserialize_seq(PodderVisitor {
            _marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{Model, Podder, podder};

    #[test]
    fn small_json() {
        let v: Podder<i32> = podder![1, 2, 3];
        let s = serde_json::to_string(&v).unwrap();
        assert_eq!(s, "[1,2,3]");
        let r: Podder<i32> = serde_json::from_str(&s).unwrap();
        assert_eq!(r, [1, 2, 3]);
    }

    #[test]
    fn medium_json() {
        let v: Podder<u16> = (0..100).collect();
        let s = serde_json::to_string(&v).unwrap();
        let r: Podder<u16> = serde_json::from_str(&s).unwrap();
        assert_eq!(r.model(), Model::Medium);
        assert_eq!(r, v);
    }
}
