//! CarouselState: index arithmetic and the transition lock.
//!
//! No clocks live here. The engine decides when a transition has settled
//! and calls [`CarouselState::finish_transition`].

use super::transform::{
    ItemTransform, TransformStyle, circular_offset, item_transform,
};
use super::types::Direction;
use crate::error::{Result, ShowcaseError};

/// Result of an `advance` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Moved { from: usize, to: usize },
    /// A transition is still settling; the request was dropped.
    Debounced,
    /// Single-item carousel; advancing wraps to the same item.
    Unchanged,
}

impl AdvanceOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, AdvanceOutcome::Moved { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselState {
    len: usize,
    active_index: usize,
    is_transitioning: bool,
    auto_advance_enabled: bool,
}

impl CarouselState {
    /// Build state for `len` items. Empty carousels are rejected; a
    /// single-item carousel always starts (and stays) at index 0.
    pub fn new(
        len: usize,
        start_index: usize,
        auto_advance_enabled: bool,
    ) -> Result<Self> {
        if len == 0 {
            return Err(ShowcaseError::InvalidConfiguration(
                "a carousel requires at least one item".to_string(),
            ));
        }
        let active_index = if len == 1 { 0 } else { start_index };
        if active_index >= len {
            return Err(ShowcaseError::InvalidConfiguration(format!(
                "start index {start_index} is out of range for {len} items"
            )));
        }
        Ok(Self {
            len,
            active_index,
            is_transitioning: false,
            auto_advance_enabled,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; an empty carousel cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    pub fn auto_advance_enabled(&self) -> bool {
        self.auto_advance_enabled
    }

    pub fn set_auto_advance(&mut self, enabled: bool) {
        self.auto_advance_enabled = enabled;
    }

    /// Step one item in `direction`, wrapping around the track. Dropped while
    /// a previous transition is settling.
    pub fn advance(&mut self, direction: Direction) -> AdvanceOutcome {
        if self.is_transitioning {
            return AdvanceOutcome::Debounced;
        }
        if self.len == 1 {
            return AdvanceOutcome::Unchanged;
        }
        let from = self.active_index;
        let n = self.len as isize;
        let to = (from as isize + direction.step() + n).rem_euclid(n) as usize;
        self.active_index = to;
        self.is_transitioning = true;
        AdvanceOutcome::Moved { from, to }
    }

    /// Release the transition lock. Returns whether a transition was open.
    pub fn finish_transition(&mut self) -> bool {
        std::mem::replace(&mut self.is_transitioning, false)
    }

    pub fn offset_of(&self, index: usize) -> isize {
        circular_offset(index, self.active_index, self.len)
    }

    pub fn is_active(&self, index: usize) -> bool {
        index < self.len && self.offset_of(index) == 0
    }

    pub fn transform(
        &self,
        index: usize,
        style: &TransformStyle,
    ) -> ItemTransform {
        item_transform(index, self.active_index, self.len, style)
    }

    pub fn transforms(&self, style: &TransformStyle) -> Vec<ItemTransform> {
        (0..self.len).map(|index| self.transform(index, style)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_carousel_is_rejected() {
        assert!(matches!(
            CarouselState::new(0, 0, true),
            Err(ShowcaseError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn start_index_must_be_in_range() {
        assert!(CarouselState::new(3, 3, true).is_err());
        assert_eq!(CarouselState::new(3, 2, true).unwrap().active_index(), 2);
    }

    #[test]
    fn single_item_is_static() {
        let mut state = CarouselState::new(1, 1, true).unwrap();
        assert_eq!(state.active_index(), 0);
        for direction in [Direction::Forward, Direction::Backward] {
            assert_eq!(state.advance(direction), AdvanceOutcome::Unchanged);
        }
        assert!(!state.is_transitioning());
        assert!(state.is_active(0));
    }

    #[test]
    fn advance_wraps_in_both_directions() {
        let mut state = CarouselState::new(5, 4, true).unwrap();
        assert_eq!(
            state.advance(Direction::Forward),
            AdvanceOutcome::Moved { from: 4, to: 0 }
        );
        state.finish_transition();
        assert_eq!(
            state.advance(Direction::Backward),
            AdvanceOutcome::Moved { from: 0, to: 4 }
        );
    }

    #[test]
    fn advance_while_transitioning_is_dropped() {
        let mut state = CarouselState::new(5, 1, true).unwrap();
        assert!(state.advance(Direction::Forward).is_moved());
        for _ in 0..4 {
            for direction in [Direction::Forward, Direction::Backward] {
                assert_eq!(state.advance(direction), AdvanceOutcome::Debounced);
            }
        }
        assert_eq!(state.active_index(), 2);
        assert!(state.finish_transition());
        assert!(!state.finish_transition());
    }

    #[test]
    fn forward_then_backward_restores_every_start() {
        for len in 1..=7usize {
            for start in 0..len {
                let mut state = CarouselState::new(len, start, false).unwrap();
                state.advance(Direction::Forward);
                state.finish_transition();
                state.advance(Direction::Backward);
                state.finish_transition();
                assert_eq!(
                    state.active_index(),
                    start,
                    "len {len} start {start}"
                );
            }
        }
    }

    #[test]
    fn exactly_one_item_is_active() {
        let state = CarouselState::new(6, 5, true).unwrap();
        let transforms = state.transforms(&TransformStyle::default());
        assert_eq!(transforms.iter().filter(|t| t.is_active).count(), 1);
        assert!(transforms[5].is_active);
    }
}
