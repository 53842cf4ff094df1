//! Property-based tests: the deque against a `Vec` model, and polynomial identities.

use proptest::prelude::*;

use crate::BlockDeque;

/// Where each insertion lands, as a fraction of the current length.
#[derive(Clone, Copy, Debug)]
enum Spot {
    Front,
    Back,
    Ratio(u16),
}

impl Spot {
    fn index(self, len: usize) -> usize {
        match self {
            Spot::Front => 0,
            Spot::Back => len,
            Spot::Ratio(r) => len * r as usize / u16::MAX as usize,
        }
    }
}

fn spot() -> impl Strategy<Value = Spot> {
    prop_oneof![
        Just(Spot::Front),
        Just(Spot::Back),
        any::<u16>().prop_map(Spot::Ratio),
    ]
}

/// Replays `spots` against a deque and a `Vec`, checking order after each step.
fn replay<T>(spots: &[Spot], make: impl Fn(usize) -> T) -> Result<(), TestCaseError>
where
    T: Clone + PartialEq + core::fmt::Debug,
{
    let mut deque = BlockDeque::new();
    let mut model = Vec::new();
    for (step, s) in spots.iter().enumerate() {
        let index = s.index(model.len());
        let at = deque.insert(deque.begin() + index as isize, make(step));
        model.insert(index, make(step));

        prop_assert_eq!(deque.resolve(at), Some(&model[index]));
        prop_assert_eq!(deque.len(), model.len());
        let cap = deque.map_capacity();
        prop_assert!(cap.is_power_of_two());
        prop_assert!(deque.len() <= cap * deque.block_capacity());
        prop_assert!(deque.begin().offset() < cap * deque.block_capacity());
    }
    prop_assert!(deque.iter().eq(model.iter()));
    prop_assert!(deque.iter().rev().eq(model.iter().rev()));
    Ok(())
}

proptest! {
    #[test]
    fn deque_matches_vec_u8(spots in proptest::collection::vec(spot(), 0..400)) {
        replay(&spots, |i| i as u8)?;
    }

    #[test]
    fn deque_matches_vec_u16(spots in proptest::collection::vec(spot(), 0..400)) {
        replay(&spots, |i| i as u16)?;
    }

    #[test]
    fn deque_matches_vec_u32(spots in proptest::collection::vec(spot(), 0..300)) {
        replay(&spots, |i| i as u32)?;
    }

    #[test]
    fn deque_matches_vec_u64(spots in proptest::collection::vec(spot(), 0..300)) {
        replay(&spots, |i| i as u64)?;
    }

    #[test]
    fn deque_matches_vec_strings(spots in proptest::collection::vec(spot(), 0..200)) {
        replay(&spots, |i| i.to_string())?;
    }

    #[test]
    fn deque_clear_then_reuse(
        first in proptest::collection::vec(spot(), 1..150),
        second in proptest::collection::vec(spot(), 1..150),
    ) {
        let mut deque: BlockDeque<u32> = BlockDeque::new();
        for (i, s) in first.iter().enumerate() {
            deque.insert(deque.begin() + s.index(deque.len()) as isize, i as u32);
        }
        deque.clear();
        prop_assert_eq!(deque.len(), 0);
        prop_assert_eq!(deque.map_capacity(), 0);

        let mut fresh: BlockDeque<u32> = BlockDeque::new();
        for (i, s) in second.iter().enumerate() {
            deque.insert(deque.begin() + s.index(deque.len()) as isize, i as u32);
            fresh.insert(fresh.begin() + s.index(fresh.len()) as isize, i as u32);
            prop_assert_eq!(deque.map_capacity(), fresh.map_capacity());
        }
        prop_assert_eq!(deque, fresh);
    }

    #[test]
    fn deque_appends_keep_positions(prefix in proptest::collection::vec(spot(), 0..100), extra in 1usize..400) {
        let mut deque: BlockDeque<u16> = BlockDeque::new();
        for (i, s) in prefix.iter().enumerate() {
            deque.insert(deque.begin() + s.index(deque.len()) as isize, i as u16);
        }
        let snapshot: Vec<(crate::Position, u16)> = (0..deque.len())
            .map(|i| (deque.begin() + i as isize, deque[i]))
            .collect();
        for v in 0..extra {
            deque.push_back(v as u16);
        }
        for (pos, value) in snapshot {
            prop_assert_eq!(deque.resolve(pos), Some(&value));
        }
    }

    #[test]
    fn deque_prepends_keep_positions(prefix in proptest::collection::vec(spot(), 1..200), extra in 1usize..200) {
        let mut deque: BlockDeque<u8> = BlockDeque::new();
        for (i, s) in prefix.iter().enumerate() {
            deque.insert(deque.begin() + s.index(deque.len()) as isize, i as u8);
        }
        for v in 0..extra {
            let snapshot: Vec<(crate::Position, u8)> = (0..deque.len())
                .map(|i| (deque.begin() + i as isize, deque[i]))
                .collect();
            let old_end = deque.end();
            deque.push_front(v as u8);
            for (pos, value) in snapshot {
                prop_assert_eq!(deque.resolve(pos), Some(&value));
            }
            prop_assert_eq!(deque.index_of(old_end), Ok(deque.len()));
        }
    }
}

#[cfg(feature = "polynomial")]
mod polynomial {
    use proptest::prelude::*;

    use crate::{BlockDeque, Polynomial, Term};

    type Poly = Polynomial<BlockDeque<Term>>;

    fn small_poly() -> impl Strategy<Value = Poly> {
        proptest::collection::vec((-20i64..20, 0u32..8), 0..6)
            .prop_map(|terms| Poly::from_terms(terms.into_iter().map(|(c, e)| Term::new(c, e))))
    }

    proptest! {
        #[test]
        fn poly_add_commutative(a in small_poly(), b in small_poly()) {
            let mut ab = a.clone();
            ab += &b;
            let mut ba = b.clone();
            ba += &a;
            prop_assert_eq!(ab, ba);
        }

        #[test]
        fn poly_sub_self_is_zero(a in small_poly()) {
            let mut d = a.clone();
            d -= &a;
            prop_assert!(d.is_zero());
        }

        #[test]
        fn poly_mul_commutative(a in small_poly(), b in small_poly()) {
            prop_assert_eq!(&a * &b, &b * &a);
        }

        #[test]
        fn poly_distributive(a in small_poly(), b in small_poly(), c in small_poly()) {
            let mut bc = b.clone();
            bc += &c;
            let left = &a * &bc;
            let mut right = &a * &b;
            right += &(&a * &c);
            prop_assert_eq!(left, right);
        }

        #[test]
        fn poly_sqrt_of_square(a in small_poly()) {
            // The root is only unique up to sign: normalise to a positive leading term.
            let a = match a.leading() {
                Some(t) if t.coef < 0 => -&a,
                _ => a,
            };
            let square = &a * &a;
            prop_assert_eq!(square.sqrt(), Ok(a));
        }

        #[test]
        fn poly_terms_canonical(a in small_poly()) {
            let terms: Vec<Term> = a.terms().collect();
            prop_assert!(terms.iter().all(|t| t.coef != 0));
            prop_assert!(terms.windows(2).all(|w| w[0].expon > w[1].expon));
        }
    }
}
