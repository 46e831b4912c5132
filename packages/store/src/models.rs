//! # Domain models for places, lists and users
//!
//! Defines the data structures exchanged with the Waypoint backend. Every type is
//! `Serialize + Deserialize` so it can be decoded straight from the REST responses
//! and re-sent as request bodies (a [`Location`] is posted back verbatim when it is
//! added to a list).
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | The authenticated account: identifier and username. |
//! | [`Location`] | A point of interest from a search or a saved list, keyed by its [`PlaceId`]. |
//! | [`List`] | A user-owned, ordered collection of locations. Summaries from `GET /lists` carry no locations. |
//! | [`ListStatus`] | Whether one location is a member of one list (the membership dropdown rows). |
//! | [`Viewport`] | The map centre, independent of any location. |
//!
//! ## Identifiers
//!
//! The backend emits list and user ids as JSON numbers while route parameters and
//! older responses carry them as strings. [`ListId`] accepts both and canonicalises
//! numeric ids to their decimal form, so `"007"`, `"7"` and `7` compare equal.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Name of the default list for favourite places.
pub const FAVORITES: &str = "Favorites";
/// Name of the default list for places the user plans to visit.
pub const PLANNED: &str = "Planned";

/// Stable place identifier issued by the geocoding provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(String);

impl PlaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlaceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier of a user list, always held in canonical string form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ListId(String);

impl ListId {
    /// Build a list id, trimming whitespace and normalising numeric ids.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        match trimmed.parse::<u64>() {
            Ok(n) => Self(n.to_string()),
            Err(_) => Self(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<u64> for ListId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for ListId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(ListId::new(string_or_number(deserializer)?))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

/// Accept either a JSON number or a JSON string, yielding a string.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The authenticated account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub username: String,
}

/// A point of interest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub place_id: PlaceId,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Location {
    /// Human-readable category label, e.g. `"catering.cafe.coffee_shop"` → `"Coffee Shop"`.
    pub fn category_label(&self) -> Option<String> {
        self.category.as_deref().and_then(pretty_category)
    }
}

/// Render the last segment of a dotted category with words title-cased.
pub fn pretty_category(raw: &str) -> Option<String> {
    let last = raw.rsplit('.').next()?.trim();
    if last.is_empty() {
        return None;
    }
    let words: Vec<String> = last
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    Some(words.join(" "))
}

/// A user-owned list of locations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub id: ListId,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub locations: Vec<Location>,
}

impl List {
    pub fn contains(&self, place_id: &PlaceId) -> bool {
        self.locations.iter().any(|l| &l.place_id == place_id)
    }
}

/// Membership of one location in one list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListStatus {
    pub id: ListId,
    pub name: String,
    pub added: bool,
}

/// Centre of the map view.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub lat: f64,
    pub long: f64,
}

impl Viewport {
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            lat: 40.7685,
            long: -73.9822,
        }
    }
}
