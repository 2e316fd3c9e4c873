use crate::catalog::MoveCatalog;
use crate::piles::PileBank;
use crate::types::Move;

/// Two-stage human input for the current turn: a pile, then a subtrahend.
///
/// Picking another pile keeps an earlier subtrahend, which may no longer fit.
/// The session re-validates the pair when it is committed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pile: Option<usize>,
    subtrahend: Option<u32>,
}

impl Selection {
    pub fn pile(&self) -> Option<usize> {
        self.pile
    }

    pub fn subtrahend(&self) -> Option<u32> {
        self.subtrahend
    }

    pub fn select_pile(&mut self, index: usize) {
        self.pile = Some(index);
    }

    /// Records `value` if it is in the catalog and fits the selected pile right now.
    /// Returns `false` and keeps the previous state otherwise.
    pub fn select_subtrahend(&mut self, value: u32, catalog: &MoveCatalog, piles: &PileBank) -> bool {
        let Some(coins) = self.pile.and_then(|index| piles.get(index)) else {
            return false;
        };
        if !catalog.contains(value) || value > coins {
            return false;
        }
        self.subtrahend = Some(value);
        true
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_complete(&self) -> bool {
        self.pile.is_some() && self.subtrahend.is_some()
    }

    pub fn as_move(&self) -> Option<Move> {
        Some(Move::new(self.pile?, self.subtrahend?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (MoveCatalog, PileBank) {
        (
            MoveCatalog::new([2, 3, 5]).unwrap(),
            PileBank::from_values([4, 6, 1]),
        )
    }

    #[test]
    fn subtrahend_requires_a_selected_pile() {
        let (catalog, piles) = fixture();
        let mut selection = Selection::default();

        assert!(!selection.select_subtrahend(2, &catalog, &piles));
        assert_eq!(selection, Selection::default());
    }

    #[test]
    fn complete_after_pile_then_fitting_subtrahend() {
        let (catalog, piles) = fixture();
        let mut selection = Selection::default();

        selection.select_pile(1);
        assert!(!selection.is_complete());
        assert!(selection.select_subtrahend(5, &catalog, &piles));

        assert!(selection.is_complete());
        assert_eq!(selection.as_move(), Some(Move::new(1, 5)));
    }

    #[test]
    fn rejected_subtrahend_keeps_prior_choice() {
        let (catalog, piles) = fixture();
        let mut selection = Selection::default();
        selection.select_pile(0);
        assert!(selection.select_subtrahend(3, &catalog, &piles));

        assert!(!selection.select_subtrahend(5, &catalog, &piles));
        assert!(!selection.select_subtrahend(4, &catalog, &piles));
        assert_eq!(selection.subtrahend(), Some(3));
    }

    #[test]
    fn reselecting_pile_keeps_subtrahend() {
        let (catalog, piles) = fixture();
        let mut selection = Selection::default();
        selection.select_pile(0);
        assert!(selection.select_subtrahend(3, &catalog, &piles));

        selection.select_pile(2);

        assert_eq!(selection.as_move(), Some(Move::new(2, 3)));
    }

    #[test]
    fn clear_unsets_both_fields() {
        let (catalog, piles) = fixture();
        let mut selection = Selection::default();
        selection.select_pile(1);
        selection.select_subtrahend(2, &catalog, &piles);

        selection.clear();

        assert_eq!(selection.pile(), None);
        assert_eq!(selection.subtrahend(), None);
        assert!(!selection.is_complete());
    }
}
