//! Performing the view [`Effect`]s the reducer hands back.

use store::{Effect, PlaceId};

/// DOM id of the listing row for `place_id`.
pub fn listing_dom_id(place_id: &PlaceId) -> String {
    let safe: String = place_id
        .as_str()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    format!("listing-{safe}")
}

pub fn apply_effects(effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::ScrollListingIntoView(place_id) => scroll_into_view(&listing_dom_id(place_id)),
            // The map draws the popup for whatever is selected.
            Effect::OpenMarkerPopup(place_id) => tracing::trace!(place = %place_id, "Popup opened"),
            Effect::ResolveDetail(place_id) => {
                tracing::debug!(place = %place_id, "Detail lookup left to the client")
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn scroll_into_view(dom_id: &str) {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(dom_id));
    match element {
        Some(element) => element.scroll_into_view(),
        None => tracing::debug!(dom_id, "No listing row to scroll to"),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn scroll_into_view(dom_id: &str) {
    tracing::trace!(dom_id, "Scroll requested");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_dom_id_is_attribute_safe() {
        assert_eq!(listing_dom_id(&PlaceId::new("abc_123")), "listing-abc_123");
        assert_eq!(
            listing_dom_id(&PlaceId::new("51a9:f0/x y")),
            "listing-51a9-f0-x-y"
        );
    }
}
