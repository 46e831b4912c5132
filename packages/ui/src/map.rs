//! # Map view
//!
//! Renders the displayed locations as markers around the current [`Viewport`].
//! Tiles are not drawn; markers are placed with an equirectangular projection of
//! the visible area so the relative layout of the results is kept.
//!
//! Panning moves the viewport (and therefore where the next search looks) but
//! never changes the marker set. Clicking a marker goes through
//! [`api::Client::select_marker`]; the listing scrolls at once and details for
//! list places are fetched afterwards.

use dioxus::prelude::*;
use store::{Action, Location, StateHandle, Viewport};

use crate::client::{use_client, use_config};
use crate::effects::apply_effects;
use crate::icons::{FaArrowDown, FaArrowLeft, FaArrowRight, FaArrowUp, FaMinus, FaPlus};
use crate::state::{use_app_store, AppStore};
use crate::Icon;

/// Logical size of the map canvas in pixels.
pub const MAP_WIDTH: f64 = 800.0;
pub const MAP_HEIGHT: f64 = 600.0;

const TILE_SIZE: f64 = 256.0;
const MIN_ZOOM: u8 = 2;
const MAX_ZOOM: u8 = 18;
/// Fraction of the canvas one pan button press moves.
const PAN_FRACTION: f64 = 0.25;

/// Degrees-to-pixels mapping of the visible area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub center: Viewport,
    pub zoom: u8,
    pub width: f64,
    pub height: f64,
}

impl Projection {
    pub fn new(center: Viewport, zoom: u8) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
        }
    }

    pub fn pixels_per_degree(&self) -> f64 {
        TILE_SIZE * 2f64.powi(i32::from(self.zoom)) / 360.0
    }

    /// Canvas position of a coordinate; the centre maps to the middle of the canvas.
    pub fn project(&self, lat: f64, long: f64) -> (f64, f64) {
        let scale = self.pixels_per_degree();
        let x = self.width / 2.0 + (long - self.center.long) * scale;
        let y = self.height / 2.0 - (lat - self.center.lat) * scale;
        (x, y)
    }

    pub fn is_visible(&self, (x, y): (f64, f64)) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }

    /// The viewport after dragging the map by `dx`/`dy` pixels (east/south positive).
    pub fn panned(&self, dx: f64, dy: f64) -> Viewport {
        let scale = self.pixels_per_degree();
        let lat = (self.center.lat - dy / scale).clamp(-85.0, 85.0);
        let mut long = self.center.long + dx / scale;
        if long > 180.0 {
            long -= 360.0;
        } else if long < -180.0 {
            long += 360.0;
        }
        Viewport::new(lat, long)
    }
}

fn pan_by(mut store: AppStore, zoom: u8, dx: f64, dy: f64) {
    let center = store.read(|s| s.viewport);
    let viewport = Projection::new(center, zoom).panned(dx, dy);
    store.dispatch(Action::ViewportChanged(viewport));
}

#[component]
pub fn MapView() -> Element {
    let store = use_app_store();
    let config = use_config();
    let mut zoom = use_signal(|| config.map.zoom);
    let state = store.signal();

    let (projection, markers, selected) = {
        let snapshot = state.read();
        let projection = Projection::new(snapshot.viewport, zoom());
        let markers: Vec<(Location, (f64, f64), bool)> = snapshot
            .selection
            .locations()
            .iter()
            .map(|l| {
                (
                    l.clone(),
                    projection.project(l.latitude, l.longitude),
                    snapshot.selection.is_selected(&l.place_id),
                )
            })
            .filter(|(_, pos, _)| projection.is_visible(*pos))
            .collect();
        let selected = snapshot.selection.selected().cloned();
        (projection, markers, selected)
    };

    let step_x = MAP_WIDTH * PAN_FRACTION;
    let step_y = MAP_HEIGHT * PAN_FRACTION;

    rsx! {
        div {
            class: "map",
            div {
                class: "map-canvas",
                for (location, (x, y), is_selected) in markers {
                    Marker {
                        key: "{location.place_id}",
                        location: location,
                        left: x / MAP_WIDTH * 100.0,
                        top: y / MAP_HEIGHT * 100.0,
                        selected: is_selected,
                    }
                }
                if let Some(location) = selected {
                    MarkerPopup { location: location, projection: projection }
                }
            }
            div {
                class: "map-controls",
                button { title: "Pan north", onclick: move |_| pan_by(store, zoom(), 0.0, -step_y),
                    Icon { icon: FaArrowUp, width: 14, height: 14 }
                }
                button { title: "Pan west", onclick: move |_| pan_by(store, zoom(), -step_x, 0.0),
                    Icon { icon: FaArrowLeft, width: 14, height: 14 }
                }
                button { title: "Pan east", onclick: move |_| pan_by(store, zoom(), step_x, 0.0),
                    Icon { icon: FaArrowRight, width: 14, height: 14 }
                }
                button { title: "Pan south", onclick: move |_| pan_by(store, zoom(), 0.0, step_y),
                    Icon { icon: FaArrowDown, width: 14, height: 14 }
                }
                button { title: "Zoom in", onclick: move |_| zoom.set((zoom() + 1).min(MAX_ZOOM)),
                    Icon { icon: FaPlus, width: 14, height: 14 }
                }
                button { title: "Zoom out", onclick: move |_| zoom.set(zoom().saturating_sub(1).max(MIN_ZOOM)),
                    Icon { icon: FaMinus, width: 14, height: 14 }
                }
            }
        }
    }
}

#[component]
fn Marker(location: Location, left: f64, top: f64, selected: bool) -> Element {
    let mut store = use_app_store();
    let client = use_client();
    let place_id = location.place_id.clone();

    let onclick = move |_| {
        let client = client.clone();
        let effects = client.select_marker(&mut store, &place_id);
        apply_effects(&effects);
        spawn(async move {
            client.resolve_effects(&mut store, &effects).await;
        });
    };

    rsx! {
        button {
            class: if selected { "marker marker--selected" } else { "marker" },
            style: "left: {left:.3}%; top: {top:.3}%;",
            title: "{location.name}",
            onclick: onclick,
        }
    }
}

#[component]
fn MarkerPopup(location: Location, projection: Projection) -> Element {
    let (x, y) = projection.project(location.latitude, location.longitude);
    if !projection.is_visible((x, y)) {
        return rsx! {};
    }
    let left = x / MAP_WIDTH * 100.0;
    let top = y / MAP_HEIGHT * 100.0;

    rsx! {
        div {
            class: "marker-popup",
            style: "left: {left:.3}%; top: {top:.3}%;",
            strong { "{location.name}" }
            if let Some(category) = location.category_label() {
                span { class: "marker-popup-category", "{category}" }
            }
            if !location.address.is_empty() {
                span { class: "marker-popup-address", "{location.address}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_projects_to_middle() {
        let center = Viewport::new(40.7685, -73.9822);
        let projection = Projection::new(center, 12);
        let (x, y) = projection.project(center.lat, center.long);
        assert!((x - MAP_WIDTH / 2.0).abs() < 1e-9);
        assert!((y - MAP_HEIGHT / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_north_east_is_up_right() {
        let projection = Projection::new(Viewport::new(0.0, 0.0), 10);
        let (x, y) = projection.project(0.01, 0.01);
        assert!(x > MAP_WIDTH / 2.0);
        assert!(y < MAP_HEIGHT / 2.0);
    }

    #[test]
    fn test_far_places_are_not_visible() {
        let projection = Projection::new(Viewport::new(40.77, -73.98), 12);
        let london = projection.project(51.5, -0.12);
        assert!(!projection.is_visible(london));
        let nearby = projection.project(40.771, -73.981);
        assert!(projection.is_visible(nearby));
    }

    #[test]
    fn test_pan_round_trip_and_bounds() {
        let projection = Projection::new(Viewport::new(10.0, 20.0), 8);
        let moved = projection.panned(200.0, -150.0);
        assert!(moved.long > 20.0);
        assert!(moved.lat > 10.0);

        let back = Projection::new(moved, 8).panned(-200.0, 150.0);
        assert!((back.lat - 10.0).abs() < 1e-9);
        assert!((back.long - 20.0).abs() < 1e-9);

        let edge = Projection::new(Viewport::new(84.0, 179.9), 2).panned(400.0, -10_000.0);
        assert_eq!(edge.lat, 85.0);
        assert!(edge.long < 0.0);
    }

    #[test]
    fn test_zoom_is_clamped() {
        assert_eq!(Projection::new(Viewport::default(), 0).zoom, MIN_ZOOM);
        assert_eq!(Projection::new(Viewport::default(), 30).zoom, MAX_ZOOM);
        let near = Projection::new(Viewport::default(), 13).pixels_per_degree();
        let far = Projection::new(Viewport::default(), 12).pixels_per_degree();
        assert!((near / far - 2.0).abs() < 1e-9);
    }
}
