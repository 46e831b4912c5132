//! Legacy favourites/planned endpoints (`/userlist`).
//!
//! Older deployments store saved places as flat entries tagged with a list
//! type instead of user-named lists. These calls are kept on [`HttpClient`] so
//! such a backend can still be read and migrated.

use serde::{Deserialize, Serialize};
use store::{Location, PlaceId};

use crate::error::ApiError;
use crate::http::HttpClient;

/// One category attached to a legacy entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyCategory {
    pub name: String,
}

/// A saved place in the legacy format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub location_id: String,
    pub location_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub categories: Vec<LegacyCategory>,
    pub lat: f64,
    pub long: f64,
    /// `"favorites"` or `"planned"`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl LegacyEntry {
    /// Build an entry for `location` in the legacy list `kind`.
    pub fn from_location(location: &Location, kind: &str) -> Self {
        Self {
            id: None,
            location_id: location.place_id.to_string(),
            location_name: location.name.clone(),
            address: Some(location.address.clone()),
            categories: location
                .category
                .iter()
                .map(|c| LegacyCategory { name: c.clone() })
                .collect(),
            lat: location.latitude,
            long: location.longitude,
            kind: kind.to_string(),
        }
    }

    pub fn to_location(&self) -> Location {
        Location {
            name: self.location_name.clone(),
            address: self.address.clone().unwrap_or_default(),
            latitude: self.lat,
            longitude: self.long,
            place_id: PlaceId::new(self.location_id.clone()),
            category: self.categories.first().map(|c| c.name.clone()),
            score: None,
        }
    }
}

impl HttpClient {
    /// `GET /userlist`
    pub async fn legacy_entries(&self) -> Result<Vec<LegacyEntry>, ApiError> {
        self.send_json(self.get(&["userlist"])?).await
    }

    /// `GET /userlist/categories`
    pub async fn legacy_categories(&self) -> Result<Vec<String>, ApiError> {
        self.send_json(self.get(&["userlist", "categories"])?).await
    }

    /// `POST /userlist/`
    pub async fn legacy_add(&self, entry: &LegacyEntry) -> Result<(), ApiError> {
        self.send_empty(self.post(&["userlist", ""])?.json(entry))
            .await
    }

    /// `DELETE /userlist/{id}`
    pub async fn legacy_remove(&self, id: i64) -> Result<(), ApiError> {
        let id = id.to_string();
        self.send_empty(self.delete(&["userlist", id.as_str()])?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_from_location() {
        let location = Location {
            name: "Cafe".to_string(),
            address: "2 Elm St".to_string(),
            latitude: 1.0,
            longitude: 2.0,
            place_id: PlaceId::new("p9"),
            category: Some("catering.cafe".to_string()),
            score: Some(0.9),
        };
        let entry = LegacyEntry::from_location(&location, "favorites");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "favorites");
        assert_eq!(json["location_id"], "p9");
        assert!(json.get("id").is_none());

        let back = entry.to_location();
        assert_eq!(back.place_id, location.place_id);
        assert_eq!(back.category, location.category);
        assert!(back.score.is_none());
    }
}
