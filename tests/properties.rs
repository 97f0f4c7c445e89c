mod property_based {
    #![cfg(not(miri))]

    use podder::{Model, Podder, growth::Additive};
    use proptest::prelude::*;

    type Words = Podder<u32>;

    #[derive(Debug, Clone)]
    enum Op {
        Insert(usize, u32),
        InsertN(usize, u8, u32),
        Erase(usize),
        PushBack(u32),
        PopFront,
        PopBack,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (any::<usize>(), any::<u32>()).prop_map(|(i, v)| Op::Insert(i, v)),
            (any::<usize>(), 0u8..12, any::<u32>()).prop_map(|(i, n, v)| Op::InsertN(i, n, v)),
            any::<usize>().prop_map(Op::Erase),
            any::<u32>().prop_map(Op::PushBack),
            Just(Op::PopFront),
            Just(Op::PopBack),
        ]
    }

    fn apply<P: podder::GrowthPolicy>(v: &mut Podder<u32, P>, model: &mut Vec<u32>, op: Op) {
        match op {
            Op::Insert(i, x) => {
                let i = i % (model.len() + 1);
                v.insert(i, x);
                model.insert(i, x);
            }
            Op::InsertN(i, n, x) => {
                let i = i % (model.len() + 1);
                v.insert_n(i, n as usize, x);
                for _ in 0..n {
                    model.insert(i, x);
                }
            }
            Op::Erase(i) => {
                if !model.is_empty() {
                    let i = i % model.len();
                    v.erase(i);
                    model.remove(i);
                }
            }
            Op::PushBack(x) => {
                v.push_back(x);
                model.push(x);
            }
            Op::PopFront => {
                assert_eq!(v.pop_front_get(), (!model.is_empty()).then(|| model.remove(0)));
            }
            Op::PopBack => {
                v.pop_back();
                model.pop();
            }
        }
    }

    proptest::proptest! {
        #[test]
        /// Constructing from `n` elements reads back the same elements, inline iff they fit.
        fn construct_and_read_back(n in 0..=4 * Words::inline_capacity(), seed: u32) {
            let values: Vec<u32> = (0..n as u32).map(|i| i.wrapping_mul(seed)).collect();
            let small = n <= Words::inline_capacity();

            let from_slice = Words::from_slice(&values);
            let from_iter = Words::from_exact_iter(values.iter().copied());
            prop_assert_eq!(from_slice.as_slice(), values.as_slice());
            prop_assert_eq!(from_iter.as_slice(), values.as_slice());
            prop_assert_eq!(from_slice.is_small(), small);
            prop_assert_eq!(from_iter.model(), if small { Model::Small } else { Model::Medium });
        }

        #[test]
        /// Inserts and erases behave like `Vec` across the inline/heap boundary.
        fn matches_vec_model(ops in proptest::collection::vec(op(), 0..64)) {
            let mut v = Words::new();
            let mut model = Vec::new();
            for op in ops {
                apply(&mut v, &mut model, op);
                prop_assert_eq!(v.len(), model.len());
                prop_assert!(v.len() <= v.capacity());
            }
            prop_assert_eq!(v.as_slice(), model.as_slice());
        }

        #[test]
        /// A tiny additive step relocates on almost every insert without losing elements.
        fn matches_vec_model_with_additive_growth(ops in proptest::collection::vec(op(), 0..64)) {
            let mut v: Podder<u32, Additive<1>> = Podder::new();
            let mut model = Vec::new();
            for op in ops {
                apply(&mut v, &mut model, op);
            }
            prop_assert_eq!(v.as_slice(), model.as_slice());
        }

        #[test]
        /// Assignment replaces the content in both directions of the boundary.
        fn assign_round_trip(first in proptest::collection::vec(any::<u32>(), 0..40),
                             second in proptest::collection::vec(any::<u32>(), 0..40)) {
            let mut v = Words::from_slice(&first);
            v.assign_from_slice(&second);
            prop_assert_eq!(v.as_slice(), second.as_slice());
            prop_assert_eq!(v.is_small(), second.len() <= Words::inline_capacity());

            v.assign_iter(first.iter().copied());
            prop_assert_eq!(v.as_slice(), first.as_slice());

            let clone = v.clone();
            prop_assert_eq!(clone.capacity(), first.len().max(Words::inline_capacity()));
            prop_assert_eq!(clone, v);
        }

        #[test]
        /// Unordered erase removes exactly the matching elements.
        fn unordered_erase_keeps_the_multiset(values in proptest::collection::vec(0u32..4, 0..40), target in 0u32..4) {
            let mut v = Words::from_slice(&values);
            let removed = v.unordered_erase(&target);

            let mut expected: Vec<u32> = values.iter().copied().filter(|&x| x != target).collect();
            let mut actual = v.into_vec();
            expected.sort_unstable();
            actual.sort_unstable();
            prop_assert_eq!(removed, values.len() - expected.len());
            prop_assert_eq!(actual, expected);
        }
    }
}
