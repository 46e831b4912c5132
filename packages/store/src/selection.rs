//! # Map / listing selection synchronizer
//!
//! The map widget, its marker set, and the listing panel all render the same
//! collection of locations and share a single highlighted one. [`Selection`] owns
//! that relation (the displayed set plus at most one selected [`PlaceId`]) so the
//! two views never hold their own copy of it.
//!
//! ## Rules
//!
//! - The selected id, when present, is always a member of the displayed set.
//!   Clicks on ids outside the set are ignored.
//! - [`replace`](Selection::replace) swaps the whole set and clears the selection
//!   before the new set becomes current.
//! - A marker click selects and asks the panel to scroll the matching row into
//!   view. Markers that came from a saved list only carry what the list stored, so
//!   the click also asks for the full record by id.
//! - A listing click selects and asks the map to open the matching popup.
//! - Detail lookups merge into the set in place and never move the selection.
//!
//! The requests to the views come back as [`Effect`]s for the caller to perform.

use crate::models::{ListId, Location, PlaceId};

/// Where the displayed locations came from.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DisplaySource {
    #[default]
    Empty,
    Search,
    List(ListId),
}

/// One-shot instruction for a view, produced by a selection change.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Bring the listing row for this place into view in the panel.
    ScrollListingIntoView(PlaceId),
    /// Open the popup of this place's marker on the map.
    OpenMarkerPopup(PlaceId),
    /// Fetch the full record for this place and merge it with `DetailResolved`.
    ResolveDetail(PlaceId),
}

/// Displayed locations and the single selected place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    source: DisplaySource,
    locations: Vec<Location>,
    selected: Option<PlaceId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> &DisplaySource {
        &self.source
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn selected_id(&self) -> Option<&PlaceId> {
        self.selected.as_ref()
    }

    /// The selected location, resolved against the displayed set.
    pub fn selected(&self) -> Option<&Location> {
        let id = self.selected.as_ref()?;
        self.find(id)
    }

    pub fn is_selected(&self, place_id: &PlaceId) -> bool {
        self.selected.as_ref() == Some(place_id)
    }

    pub fn contains(&self, place_id: &PlaceId) -> bool {
        self.find(place_id).is_some()
    }

    fn find(&self, place_id: &PlaceId) -> Option<&Location> {
        self.locations.iter().find(|l| &l.place_id == place_id)
    }

    /// Replace the displayed set. The selection is dropped first.
    pub fn replace(&mut self, source: DisplaySource, locations: Vec<Location>) {
        self.selected = None;
        self.source = source;
        self.locations = locations;
    }

    /// Show nothing on the map or in the panel.
    pub fn clear(&mut self) {
        self.replace(DisplaySource::Empty, Vec::new());
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Marker clicked on the map.
    pub fn select_from_map(&mut self, place_id: &PlaceId) -> Vec<Effect> {
        if !self.contains(place_id) {
            return Vec::new();
        }
        self.selected = Some(place_id.clone());
        let mut effects = vec![Effect::ScrollListingIntoView(place_id.clone())];
        if matches!(self.source, DisplaySource::List(_)) {
            effects.push(Effect::ResolveDetail(place_id.clone()));
        }
        effects
    }

    /// Row clicked in the listing panel.
    pub fn select_from_listing(&mut self, place_id: &PlaceId) -> Vec<Effect> {
        if !self.contains(place_id) {
            return Vec::new();
        }
        self.selected = Some(place_id.clone());
        vec![Effect::OpenMarkerPopup(place_id.clone())]
    }

    /// Merge a full record fetched by id. Unknown places are ignored.
    pub fn merge_detail(&mut self, detail: Location) -> bool {
        match self
            .locations
            .iter_mut()
            .find(|l| l.place_id == detail.place_id)
        {
            Some(slot) => {
                *slot = detail;
                true
            }
            None => false,
        }
    }

    /// Drop one place from the set, deselecting it if it was selected.
    pub fn remove(&mut self, place_id: &PlaceId) -> bool {
        let before = self.locations.len();
        self.locations.retain(|l| &l.place_id != place_id);
        if self.selected.as_ref() == Some(place_id) {
            self.selected = None;
        }
        self.locations.len() != before
    }
}
