//! Series lookup against the TheTVDB JSON API
//!
//! This module maps the provider's wire format onto the library's domain
//! types: it resolves a series by name, walks the paged episode list, and
//! groups the flat records into seasons keyed by episode number.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::client::TvdbClient;
use crate::error::{FirstrunError, Result};
use crate::types::{AiredEpisode, SeasonEpisodes, Series};

/// Source of series data, keyed by display name
///
/// Lookup is modeled as a result: a name that does not resolve yields
/// `Ok(None)` rather than an error, so callers can treat unknown shows
/// as an expected condition and reserve errors for genuine faults.
#[async_trait]
pub trait SeriesSource {
    /// Look up a series by display name.
    ///
    /// # Returns
    /// * `Ok(Some(series))` with the seasons the provider knows about
    /// * `Ok(None)` when the name does not resolve to any series
    ///
    /// # Errors
    /// Any transport or decoding fault.
    async fn series(&self, name: &str) -> Result<Option<Series>>;
}

/// Search response wrapper
#[derive(Debug, Deserialize)]
struct SearchResponse {
    data: Vec<SearchRecord>,
}

/// One series hit from the search endpoint
#[derive(Debug, Deserialize)]
struct SearchRecord {
    id: u32,
    #[serde(rename = "seriesName")]
    series_name: String,
}

/// One page of the episode list
#[derive(Debug, Deserialize)]
struct EpisodePage {
    #[serde(default)]
    links: PageLinks,
    #[serde(default)]
    data: Vec<EpisodeRecord>,
}

/// Pagination links attached to an episode page
#[derive(Debug, Default, Deserialize)]
struct PageLinks {
    next: Option<u32>,
}

/// One episode as reported by the episodes endpoint
#[derive(Debug, Deserialize)]
struct EpisodeRecord {
    #[serde(rename = "airedSeason")]
    aired_season: Option<Numeric>,
    #[serde(rename = "airedEpisodeNumber")]
    aired_episode_number: Option<Numeric>,
    #[serde(rename = "episodeName")]
    episode_name: Option<String>,
    #[serde(rename = "firstAired")]
    first_aired: Option<String>,
}

/// Numeric field that some feeds serialize as a JSON string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(u32),
    Text(String),
}

impl Numeric {
    /// Coerce to an integer; a non-numeric string is a decode fault.
    fn to_u32(&self) -> Result<u32> {
        match self {
            Numeric::Number(value) => Ok(*value),
            Numeric::Text(raw) => raw
                .trim()
                .parse()
                .map_err(|_| FirstrunError::Decode(format!("non-numeric value: {:?}", raw))),
        }
    }
}

/// Group flat episode records into seasons keyed by episode number.
///
/// Records lacking a season or episode number cannot be keyed and are
/// skipped.
fn group_seasons(records: Vec<EpisodeRecord>) -> Result<BTreeMap<u32, SeasonEpisodes>> {
    let mut seasons: BTreeMap<u32, SeasonEpisodes> = BTreeMap::new();

    for record in records {
        let (Some(season), Some(number)) = (
            record.aired_season.as_ref(),
            record.aired_episode_number.as_ref(),
        ) else {
            debug!("skipping episode record without season or number");
            continue;
        };

        let season_number = season.to_u32()?;
        let episode_number = number.to_u32()?;

        seasons.entry(season_number).or_default().insert(
            episode_number,
            AiredEpisode {
                name: record.episode_name,
                first_aired: record.first_aired,
            },
        );
    }

    Ok(seasons)
}

/// Series source backed by the TheTVDB JSON API
///
/// # Example
/// ```no_run
/// use firstrun_core::{SeriesSource, TvdbClient, TvdbProvider};
///
/// # async fn example() -> Result<(), firstrun_core::FirstrunError> {
/// let client = TvdbClient::connect().await?;
/// let provider = TvdbProvider::new(client);
///
/// if let Some(series) = provider.series("Castle").await? {
///     println!("{} has {} seasons", series.name, series.seasons.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct TvdbProvider {
    client: TvdbClient,
}

impl TvdbProvider {
    /// Create a provider over a connected client.
    pub fn new(client: TvdbClient) -> Self {
        Self { client }
    }

    /// Resolve a series name to its first search hit.
    ///
    /// A 404 from the search endpoint means no series matched.
    async fn search(&self, name: &str) -> Result<Option<SearchRecord>> {
        let response: SearchResponse = match self
            .client
            .get_json("/search/series", &[("name", name.to_string())])
            .await
        {
            Ok(response) => response,
            Err(FirstrunError::NotFound(_)) => return Ok(None),
            Err(err) => return Err(err),
        };

        Ok(response.data.into_iter().next())
    }

    /// Fetch every page of the episode list for a series.
    ///
    /// A 404 here means the series has no episode list at all.
    async fn fetch_episodes(&self, series_id: u32) -> Result<Vec<EpisodeRecord>> {
        let path = format!("/series/{}/episodes", series_id);
        let mut records = Vec::new();
        let mut page = 1u32;

        loop {
            let response: EpisodePage = match self
                .client
                .get_json(&path, &[("page", page.to_string())])
                .await
            {
                Ok(response) => response,
                Err(FirstrunError::NotFound(_)) => break,
                Err(err) => return Err(err),
            };

            records.extend(response.data);

            match response.links.next {
                Some(next) => page = next,
                None => break,
            }
        }

        Ok(records)
    }
}

#[async_trait]
impl SeriesSource for TvdbProvider {
    async fn series(&self, name: &str) -> Result<Option<Series>> {
        let Some(found) = self.search(name).await? else {
            return Ok(None);
        };
        debug!(id = found.id, series = %found.series_name, "resolved series");

        let records = self.fetch_episodes(found.id).await?;
        let seasons = group_seasons(records)?;
        debug!(
            id = found.id,
            seasons = seasons.len(),
            "grouped episode list"
        );

        Ok(Some(Series {
            id: found.id,
            name: found.series_name,
            seasons,
        }))
    }
}
