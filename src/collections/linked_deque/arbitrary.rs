//! `proptest` strategies for deques, behind the `proptest` feature.

use super::LinkedDeque;
use proptest::collection::{vec, SizeRange};
use proptest::prelude::*;

impl<T: Arbitrary + 'static> Arbitrary for LinkedDeque<T> {
    type Parameters = (SizeRange, T::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with((size, params): Self::Parameters) -> Self::Strategy {
        vec(any_with::<T>(params), size)
            .prop_map(|items| items.into_iter().collect::<LinkedDeque<T>>())
            .boxed()
    }
}
