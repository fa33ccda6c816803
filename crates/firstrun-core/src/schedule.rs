//! Recently-aired episode scan and schedule assembly
//!
//! This module holds the filtering logic: walk the newest season of a
//! series in descending episode order, keep episodes aired on or after a
//! cutoff date, and stop at the first episode that is older or has no
//! resolvable date. The `Schedule` type runs that scan across the whole
//! show list and owns the serialized output.

use std::collections::BTreeMap;
use std::io;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{FirstrunError, Result};
use crate::provider::SeriesSource;
use crate::types::{Episode, Series};

/// Collect episodes of the newest season aired on or after `cutoff`.
///
/// Episodes are scanned in descending episode-number order and returned
/// most recent first. The scan halts at the first episode whose date is
/// older than the cutoff or cannot be resolved; later (lower-numbered)
/// episodes are never considered, even when they would qualify on their
/// own.
///
/// # Arguments
/// * `series_name` - Display name carried into the emitted records
/// * `series` - Series data as returned by a [`SeriesSource`]
/// * `cutoff` - Inclusive lower bound on broadcast dates
///
/// # Returns
/// Qualifying episodes, most recent first. A series with no seasons
/// contributes no records.
///
/// # Errors
/// * `FirstrunError::InvalidAirDate` - an episode in the scan carries a
///   malformed date
/// * `FirstrunError::AttributeNotFound` - a qualifying episode has no
///   title
pub fn recent_episodes(
    series_name: &str,
    series: &Series,
    cutoff: NaiveDate,
) -> Result<Vec<Episode>> {
    let Some((season_number, episodes)) = series.latest_season() else {
        return Ok(Vec::new());
    };

    let mut found = Vec::new();
    for (&number, episode) in episodes.iter().rev() {
        match episode.airdate()? {
            Some(date) if date >= cutoff => {}
            _ => break,
        }

        let title = episode.name.clone().ok_or_else(|| {
            FirstrunError::AttributeNotFound(format!(
                "episodeName for {} S{:02}E{:02}",
                series_name, season_number, number
            ))
        })?;
        // airdate() resolved above, so the raw field is present
        let aired = episode.first_aired.clone().unwrap_or_default();

        found.push(Episode {
            series: series_name.to_string(),
            season: season_number,
            title,
            number,
            airdate: format!("{}T00:00:00Z", aired),
        });
    }

    Ok(found)
}

/// One run's accumulated output: qualifying episode records in emission
/// order, plus the show names that did not resolve
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    /// Qualifying episodes, grouped per series in enumeration order,
    /// most recent first within each series
    pub episodes: Vec<Episode>,
    /// Show names the provider could not resolve, in enumeration order
    pub missing: Vec<String>,
}

impl Schedule {
    /// Run the scan for every show in `shows`, in order.
    ///
    /// Shows are processed strictly sequentially. A show that does not
    /// resolve is recorded in [`Schedule::missing`] and contributes no
    /// records; any other fault aborts the build.
    ///
    /// # Arguments
    /// * `source` - Series data source
    /// * `shows` - Ordered show names to query
    /// * `cutoff` - Inclusive lower bound on broadcast dates
    ///
    /// # Errors
    /// Any fault from the source or the scan.
    pub async fn build<S: SeriesSource>(
        source: &S,
        shows: &[String],
        cutoff: NaiveDate,
    ) -> Result<Self> {
        let mut schedule = Schedule::default();

        for name in shows {
            match source.series(name).await? {
                Some(series) => {
                    let found = recent_episodes(name, &series, cutoff)?;
                    debug!(series = %name, count = found.len(), "collected recent episodes");
                    schedule.episodes.extend(found);
                }
                None => {
                    debug!(series = %name, "series did not resolve");
                    schedule.missing.push(name.clone());
                }
            }
        }

        Ok(schedule)
    }

    /// Write the episode records as a single compact JSON array.
    ///
    /// The whole schedule is serialized in one write with no trailing
    /// newline.
    ///
    /// # Errors
    /// `FirstrunError::Output` when serialization or the underlying
    /// write fails.
    pub fn write_json<W: io::Write>(&self, out: W) -> Result<()> {
        serde_json::to_writer(out, &self.episodes)?;
        Ok(())
    }

    /// Write one diagnostic line per unresolved show name.
    pub fn report_missing<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        for name in &self.missing {
            writeln!(out, "{}: Show not found", name)?;
        }
        Ok(())
    }

    /// Group the records by series name, preserving each group's
    /// emission order.
    pub fn by_series(&self) -> BTreeMap<&str, Vec<&Episode>> {
        let mut groups: BTreeMap<&str, Vec<&Episode>> = BTreeMap::new();
        for episode in &self.episodes {
            groups
                .entry(episode.series.as_str())
                .or_default()
                .push(episode);
        }
        groups
    }
}
