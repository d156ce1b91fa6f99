use crate::{
    error::FetchError,
    model::{Coordinates, ResolvedLocation},
    provider::WeatherApi,
};

/// Only the best geocoding match is ever used.
const MATCH_LIMIT: u8 = 1;

/// Outcome of turning a search or a tapped point into a location.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(ResolvedLocation),
    NotFound,
    TransportError(String),
}

impl Resolution {
    /// Presentation view: "not found" and "could not ask" look the same.
    pub fn into_location(self) -> Option<ResolvedLocation> {
        match self {
            Resolution::Found(location) => Some(location),
            Resolution::NotFound | Resolution::TransportError(_) => None,
        }
    }

    pub fn location(&self) -> Option<&ResolvedLocation> {
        match self {
            Resolution::Found(location) => Some(location),
            _ => None,
        }
    }
}

pub async fn resolve_by_name(api: &dyn WeatherApi, text: &str) -> Resolution {
    let query = text.trim();
    if query.is_empty() {
        tracing::debug!("Empty location query");
        return Resolution::NotFound;
    }

    let result = api.geocode(query, MATCH_LIMIT).await;
    first_match(result, query)
}

pub async fn resolve_by_coordinates(api: &dyn WeatherApi, at: Coordinates) -> Resolution {
    let result = api.reverse_geocode(at, MATCH_LIMIT).await;
    first_match(result, &format!("{}, {}", at.latitude, at.longitude))
}

fn first_match(result: Result<Vec<ResolvedLocation>, FetchError>, query: &str) -> Resolution {
    match result {
        Ok(found) => match found.into_iter().next() {
            Some(location) => {
                tracing::info!(
                    query = %query,
                    location = %location.display_name(),
                    "Resolved location"
                );
                Resolution::Found(location)
            }
            None => {
                tracing::info!(query = %query, "No location found");
                Resolution::NotFound
            }
        },
        Err(err) => {
            tracing::warn!(query = %query, error = %err, "Geocoding failed");
            Resolution::TransportError(err.to_string())
        }
    }
}
