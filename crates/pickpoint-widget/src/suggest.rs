//! Suggestion dropdown state and keyboard navigation.

use crate::map::GeoCandidate;

/// Keyboard inputs the dropdown understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestKey {
    Down,
    Up,
    Enter,
    Escape,
}

/// What the widget should do after a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestAction {
    /// Nothing beyond the highlight change.
    None,
    /// A candidate was committed; pan or fit the map to it.
    Select(GeoCandidate),
    /// The dropdown was dismissed.
    Dismiss,
}

/// Candidate list plus the highlighted index, if any.
#[derive(Debug, Default)]
pub struct SuggestDropdown {
    candidates: Vec<GeoCandidate>,
    highlighted: Option<usize>,
}

impl SuggestDropdown {
    /// Replaces the candidate list and resets the highlight.
    pub fn set_candidates(&mut self, candidates: Vec<GeoCandidate>) {
        self.candidates = candidates;
        self.highlighted = None;
    }

    pub fn clear(&mut self) {
        self.candidates.clear();
        self.highlighted = None;
    }

    #[must_use]
    pub fn candidates(&self) -> &[GeoCandidate] {
        &self.candidates
    }

    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Applies a key press.
    ///
    /// Down/Up move the highlight clamped to `[0, len - 1]`; Enter commits
    /// the highlighted candidate, or the first one when nothing is
    /// highlighted; Escape clears the list. Key presses on an empty list
    /// do nothing (Escape still dismisses).
    pub fn handle_key(&mut self, key: SuggestKey) -> SuggestAction {
        match key {
            SuggestKey::Down => {
                if !self.candidates.is_empty() {
                    let next = self.highlighted.map_or(0, |i| i + 1);
                    self.highlighted = Some(next.min(self.candidates.len() - 1));
                }
                SuggestAction::None
            }
            SuggestKey::Up => {
                if !self.candidates.is_empty() {
                    let prev = self.highlighted.map_or(0, |i| i.saturating_sub(1));
                    self.highlighted = Some(prev);
                }
                SuggestAction::None
            }
            SuggestKey::Enter => {
                if self.candidates.is_empty() {
                    return SuggestAction::None;
                }
                let index = self.highlighted.unwrap_or(0);
                let chosen = self.candidates[index].clone();
                self.clear();
                SuggestAction::Select(chosen)
            }
            SuggestKey::Escape => {
                self.clear();
                SuggestAction::Dismiss
            }
        }
    }
}
