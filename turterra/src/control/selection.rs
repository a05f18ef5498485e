use turterra_types::RegionSlug;

/// Currently selected region.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Nothing is selected; the region list is shown.
    #[default]
    NoneSelected,
    /// The region is selected and its details are shown.
    RegionSelected(RegionSlug),
}

impl Selection {
    /// Slug of the selected region.
    pub fn slug(&self) -> Option<&RegionSlug> {
        match self {
            Selection::NoneSelected => None,
            Selection::RegionSelected(slug) => Some(slug),
        }
    }

    /// Returns true if the region with the given slug is selected.
    pub fn is_selected(&self, slug: &str) -> bool {
        self.slug().is_some_and(|selected| selected.as_str() == slug)
    }
}

/// Generation number of a selection.
///
/// Every selection change issues a new ticket. Work started for a selection (fetching its
/// sub-regions, for example) checks after every await that its ticket is still current, and
/// drops its result otherwise.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectionTicket(u64);

/// Selection together with the ticket counter.
#[derive(Debug, Default, Clone)]
pub struct SelectionState {
    selection: Selection,
    generation: u64,
}

impl SelectionState {
    /// Current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selects a region and returns the ticket of this selection. Tickets of all previous
    /// selections become stale.
    pub fn begin(&mut self, slug: RegionSlug) -> SelectionTicket {
        self.generation += 1;
        self.selection = Selection::RegionSelected(slug);
        SelectionTicket(self.generation)
    }

    /// Clears the selection. Tickets of all previous selections become stale.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.selection = Selection::NoneSelected;
    }

    /// Returns true if no selection change happened since the ticket was issued.
    pub fn is_current(&self, ticket: SelectionTicket) -> bool {
        ticket.0 == self.generation
    }
}

#[cfg(test)]
mod tests {
    use turterra_types::normalize;

    use super::*;

    #[test]
    fn tickets_go_stale() {
        let mut state = SelectionState::default();
        assert_eq!(state.selection(), &Selection::NoneSelected);

        let first = state.begin(normalize("Mexico"));
        assert!(state.is_current(first));
        assert!(state.selection().is_selected("mexico"));

        let second = state.begin(normalize("Belize"));
        assert!(second > first);
        assert!(!state.is_current(first));
        assert!(state.is_current(second));

        state.clear();
        assert!(!state.is_current(second));
        assert_eq!(state.selection().slug(), None);
    }

    #[test]
    fn reselecting_issues_new_ticket() {
        let mut state = SelectionState::default();
        let first = state.begin(normalize("Peru"));
        let second = state.begin(normalize("Peru"));

        assert_ne!(first, second);
        assert!(state.is_current(second));
    }
}
