//! Data types for Firstrun
//!
//! This module contains the core data structures used throughout the library:
//! the output episode record and the in-memory view of a series as fetched
//! from the provider.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{FirstrunError, Result};

/// Date format used by the provider for broadcast dates
pub(crate) const AIR_DATE_FORMAT: &str = "%Y-%m-%d";

/// A single qualifying broadcast, as emitted in the output feed
///
/// Field order is the serialized key order. `airdate` is the raw provider
/// date string with a fixed midnight-UTC suffix, so the value round-trips
/// byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Display name of the show, as enumerated in the configuration
    pub series: String,
    /// Season number, the maximum known for the show
    pub season: u32,
    /// Episode title
    pub title: String,
    /// Episode number within the season
    pub number: u32,
    /// Broadcast date rendered as `YYYY-MM-DDT00:00:00Z`
    pub airdate: String,
}

/// Episodes of one season, keyed by episode number
pub type SeasonEpisodes = BTreeMap<u32, AiredEpisode>;

/// A series as known to the provider: its identifier, display name,
/// and episodes grouped by season number
#[derive(Debug, Clone, Default)]
pub struct Series {
    /// Provider identifier of the series
    pub id: u32,
    /// Display name reported by the provider
    pub name: String,
    /// Seasons keyed by season number
    pub seasons: BTreeMap<u32, SeasonEpisodes>,
}

impl Series {
    /// Return the most recent season and its number.
    ///
    /// The most recent season is the maximum key among the known seasons.
    /// Returns `None` when the provider lists no episodes at all.
    pub fn latest_season(&self) -> Option<(u32, &SeasonEpisodes)> {
        self.seasons
            .last_key_value()
            .map(|(number, episodes)| (*number, episodes))
    }
}

/// Attribute bag for one episode as reported by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AiredEpisode {
    /// Episode title, if the provider reported one
    pub name: Option<String>,
    /// Raw broadcast date string, possibly empty
    pub first_aired: Option<String>,
}

impl AiredEpisode {
    /// Parse the broadcast date from the raw `firstAired` value.
    ///
    /// # Returns
    /// * `Ok(Some(date))` when the field holds a `YYYY-MM-DD` date
    /// * `Ok(None)` when the field is absent or empty
    ///
    /// # Errors
    /// `FirstrunError::InvalidAirDate` when the field is present but not
    /// a valid `YYYY-MM-DD` date.
    pub fn airdate(&self) -> Result<Option<NaiveDate>> {
        match self.first_aired.as_deref() {
            Some(raw) if !raw.is_empty() => {
                let date = NaiveDate::parse_from_str(raw, AIR_DATE_FORMAT)
                    .map_err(|_| FirstrunError::InvalidAirDate(raw.to_string()))?;
                Ok(Some(date))
            }
            _ => Ok(None),
        }
    }
}
