use crate::model::Multiplicity;

/// Walks the positional slots of a parser, one slot per positional token.
///
/// The declared arguments are viewed as a lazy sequence of slots:
/// `SpecificCount { count: n, .. }` yields `n` slots, `AllThatFollow` yields the same slot forever.
/// Each slot is identified by the index of its argument declaration.
#[derive(Debug)]
pub(crate) struct ArgumentCursor {
    multiplicities: Vec<Multiplicity>,
    position: usize,
    issued: usize,
}

impl ArgumentCursor {
    pub(crate) fn new(multiplicities: Vec<Multiplicity>) -> Self {
        Self {
            multiplicities,
            position: 0,
            issued: 0,
        }
    }

    /// Move to the next slot, returning the argument index it belongs to.
    /// `None` once every finite slot has been issued.
    pub(crate) fn advance(&mut self) -> Option<usize> {
        while let Some(multiplicity) = self.multiplicities.get(self.position) {
            match multiplicity {
                Multiplicity::SpecificCount { count, .. } => {
                    if self.issued < *count {
                        self.issued += 1;
                        return Some(self.position);
                    }

                    self.position += 1;
                    self.issued = 0;
                }
                Multiplicity::AllThatFollow { .. } => {
                    return Some(self.position);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    fn drain(cursor: &mut ArgumentCursor, limit: usize) -> Vec<Option<usize>> {
        (0..limit).map(|_| cursor.advance()).collect()
    }

    #[test]
    fn empty() {
        let mut cursor = ArgumentCursor::new(Vec::default());
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.advance(), None);
    }

    #[rstest]
    #[case(vec![Multiplicity::SpecificCount { count: 1, required: true }], vec![Some(0), None, None])]
    #[case(
        vec![
            Multiplicity::SpecificCount { count: 2, required: true },
            Multiplicity::SpecificCount { count: 1, required: false },
        ],
        vec![Some(0), Some(0), Some(1), None]
    )]
    #[case(
        vec![
            Multiplicity::SpecificCount { count: 1, required: true },
            Multiplicity::AllThatFollow { minimum: 0 },
        ],
        vec![Some(0), Some(1), Some(1), Some(1), Some(1)]
    )]
    #[case(vec![Multiplicity::AllThatFollow { minimum: 3 }], vec![Some(0), Some(0), Some(0)])]
    fn advance(#[case] multiplicities: Vec<Multiplicity>, #[case] expected: Vec<Option<usize>>) {
        let mut cursor = ArgumentCursor::new(multiplicities);
        assert_eq!(drain(&mut cursor, expected.len()), expected);
    }

    #[test]
    fn advance_random_specific_counts() {
        for _ in 0..100 {
            let counts: Vec<usize> = (0..thread_rng().gen_range(0..5))
                .map(|_| thread_rng().gen_range(1..5))
                .collect();
            let total: usize = counts.iter().sum();
            let mut cursor = ArgumentCursor::new(
                counts
                    .iter()
                    .map(|count| Multiplicity::SpecificCount {
                        count: *count,
                        required: true,
                    })
                    .collect(),
            );
            let expected: Vec<usize> = counts
                .iter()
                .enumerate()
                .flat_map(|(index, count)| std::iter::repeat(index).take(*count))
                .collect();

            let issued: Vec<usize> = std::iter::from_fn(|| cursor.advance()).collect();

            assert_eq!(issued.len(), total);
            assert_eq!(issued, expected);
        }
    }

    #[test]
    fn advance_never_replays() {
        for _ in 0..100 {
            let multiplicity: Multiplicity = thread_rng().gen();
            let mut cursor = ArgumentCursor::new(vec![multiplicity]);
            let slots = drain(&mut cursor, 20);

            match multiplicity {
                Multiplicity::SpecificCount { count, .. } => {
                    assert!(slots[..count].iter().all(|s| s == &Some(0)));
                    assert!(slots[count..].iter().all(|s| s.is_none()));
                }
                Multiplicity::AllThatFollow { .. } => {
                    assert!(slots.iter().all(|s| s == &Some(0)));
                }
            }
        }
    }
}
