use commitment::Element;
use proptest::{
    arbitrary::{any, Arbitrary},
    collection::vec,
    strategy::{BoxedStrategy, Strategy},
};

use crate::{AppendLog, SparseMap};

/// Clear every bit of `element` from `bits` upwards
fn truncate(element: Element, bits: usize) -> Element {
    match u8::try_from(bits) {
        Ok(bits) => element - ((element >> bits) << bits),
        Err(_) => element,
    }
}

impl<const DEPTH: usize> Arbitrary for SparseMap<DEPTH> {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        vec(any::<(Element, Element)>(), 0..20)
            .prop_map(|entries| {
                let mut map = Self::new();

                for (key, value) in entries {
                    let key = truncate(key, DEPTH - 1);
                    map.set(key, value).expect("truncated keys always fit");
                }

                map
            })
            .boxed()
    }
}

impl<const DEPTH: usize> Arbitrary for AppendLog<DEPTH> {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        let max = usize::try_from(Self::capacity()).unwrap_or(usize::MAX).min(64);

        vec(any::<Element>(), 0..=max)
            .prop_map(|values| {
                let mut log = Self::new();

                for value in values {
                    log.append(value).expect("length is bounded by capacity");
                }

                log
            })
            .boxed()
    }
}
