//! The extraction loop.
//!
//! Candidates are tried strictly in the order given, one at a time, up to
//! `max_attempts`. Each attempt opens its granule, reads what it needs and
//! drops the handle before the next candidate is touched. The first
//! validated value wins; every earlier failure is kept as a diagnostic.

use std::sync::Arc;

use aq_common::{GridPoint, PollutantKind, TimeRange};
use chrono::{DateTime, Utc};
use metrics::counter;
use tempo_parser::{locate, resolve, DataFile, VariableCatalog};
use tracing::{debug, info, warn};

use crate::collaborators::{Credential, GranuleOpener, GranuleQuery, GranuleRef, GranuleSearch};
use crate::config::ExtractorConfig;
use crate::error::{ExtractError, Result};
use crate::nearest::{nearest, GridMatch};
use crate::result::{
    AttemptDiagnostic, AttemptFailure, ExtractedValue, ExtractionResult, UnavailableReason,
};

/// Point extractor over a granule opener.
pub struct Extractor<O> {
    opener: O,
    credential: Arc<dyn Credential>,
    catalog: VariableCatalog,
    config: ExtractorConfig,
}

impl<O: GranuleOpener> Extractor<O> {
    /// Create an extractor with the built-in variable catalog.
    pub fn new(opener: O, credential: Arc<dyn Credential>, config: ExtractorConfig) -> Result<Self> {
        config.validate().map_err(ExtractError::config)?;
        Ok(Self {
            opener,
            credential,
            catalog: VariableCatalog::builtin(),
            config,
        })
    }

    /// Replace the variable catalog.
    pub fn with_catalog(mut self, catalog: VariableCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &VariableCatalog {
        &self.catalog
    }

    /// Extract the value nearest `target` from the first usable candidate.
    pub fn extract(
        &self,
        candidates: &[GranuleRef],
        target: &GridPoint,
        pollutant: &PollutantKind,
    ) -> ExtractionResult {
        if !self.authorized() {
            return ExtractionResult::unavailable(UnavailableReason::NotAuthenticated);
        }
        if candidates.is_empty() {
            debug!(pollutant = %pollutant, "No candidate granules");
            return ExtractionResult::unavailable(UnavailableReason::NoCandidates);
        }

        let mut misses = Vec::new();

        for granule in candidates.iter().take(self.config.max_attempts) {
            counter!("extraction_attempts_total", "pollutant" => pollutant.metric_label())
                .increment(1);

            match self.attempt(granule, target, pollutant) {
                Ok(value) => {
                    counter!("extraction_success_total", "pollutant" => pollutant.metric_label())
                        .increment(1);
                    info!(
                        file = %granule.id,
                        pollutant = %pollutant,
                        variable = %value.variable,
                        value = value.value,
                        unit = %value.unit,
                        prior_misses = misses.len(),
                        "Extracted value"
                    );
                    return ExtractionResult::Success { value, misses };
                }
                Err(failure) => {
                    counter!("extraction_failures_total", "reason" => failure.reason())
                        .increment(1);
                    warn!(
                        file = %granule.id,
                        pollutant = %pollutant,
                        reason = failure.reason(),
                        error = %failure,
                        "Candidate granule yielded no value"
                    );
                    misses.push(AttemptDiagnostic {
                        source: granule.id.clone(),
                        failure,
                    });
                }
            }
        }

        if candidates.len() > self.config.max_attempts {
            debug!(
                skipped = candidates.len() - self.config.max_attempts,
                "Attempt cap reached"
            );
        }

        ExtractionResult::Unavailable {
            reason: UnavailableReason::ExhaustedCandidates,
            attempts: misses,
        }
    }

    /// Like [`extract`](Self::extract), validating raw coordinates first.
    /// Nothing is opened when they are out of range.
    pub fn extract_at(
        &self,
        latitude: f64,
        longitude: f64,
        candidates: &[GranuleRef],
        pollutant: &PollutantKind,
    ) -> Result<ExtractionResult> {
        let target = GridPoint::new(latitude, longitude)?;
        Ok(self.extract(candidates, &target, pollutant))
    }

    /// Search for candidates around `target` in the configured window ending
    /// at `end`, then extract.
    pub fn search_and_extract<S: GranuleSearch + ?Sized>(
        &self,
        search: &S,
        target: &GridPoint,
        pollutant: &PollutantKind,
        end: DateTime<Utc>,
    ) -> ExtractionResult {
        if !self.authorized() {
            return ExtractionResult::unavailable(UnavailableReason::NotAuthenticated);
        }

        let query = GranuleQuery::around(
            target,
            pollutant,
            self.config.search_window_degrees,
            TimeRange::trailing_days(end, self.config.search_days),
        );

        match search.search(&query) {
            Ok(candidates) => {
                debug!(
                    pollutant = %pollutant,
                    bbox = %query.bbox.to_search_string(),
                    found = candidates.len(),
                    "Granule search complete"
                );
                self.extract(&candidates, target, pollutant)
            }
            Err(message) => {
                counter!("extraction_failures_total", "reason" => "search_failed").increment(1);
                warn!(pollutant = %pollutant, error = %message, "Granule search failed");
                ExtractionResult::unavailable(UnavailableReason::SearchFailed { message })
            }
        }
    }

    fn authorized(&self) -> bool {
        if self.config.require_credentials && !self.credential.is_valid() {
            counter!("extraction_failures_total", "reason" => "not_authenticated").increment(1);
            warn!("Credentials are required but not valid, skipping extraction");
            return false;
        }
        true
    }

    /// One candidate, start to finish. The granule is dropped on return.
    fn attempt(
        &self,
        granule: &GranuleRef,
        target: &GridPoint,
        pollutant: &PollutantKind,
    ) -> std::result::Result<ExtractedValue, AttemptFailure> {
        let file = self
            .opener
            .open(granule)
            .map_err(|e| AttemptFailure::OpenFailed {
                message: e.to_string(),
            })?;

        let layout = resolve(&file)?;
        debug!(file = %granule.id, layout = %layout.kind, "Resolved layout");

        let located = locate(&file, &layout, pollutant, &self.catalog)?;

        let coords = &layout.coordinates;
        let latitude = file.read_array(&coords.container, &coords.latitude)?;
        let longitude = file.read_array(&coords.container, &coords.longitude)?;
        let matched = nearest(&latitude, &longitude, target)?;

        let index = data_index(&located.info.shape, &matched)?;
        let raw = file.read_value(&located.container, located.name(), &index)?;

        let converted = self
            .config
            .conversion
            .validate_and_convert_with_fill(raw, pollutant, located.info.fill_value)
            .map_err(|rejected| AttemptFailure::InvalidValue {
                variable: located.name().to_string(),
                raw,
                rejected,
            })?;

        Ok(ExtractedValue {
            value: converted.value,
            unit: converted.unit,
            variable: located.info.name,
            native_units: located.info.units,
            raw_value: raw,
            source: granule.id.clone(),
            layout: layout.kind,
            row: matched.row,
            col: matched.col,
            geometry: matched.geometry,
            distance_degrees: matched.distance,
        })
    }
}

/// Index into a data variable for a matched cell. The trailing two
/// dimensions must be the coordinate grid; leading dimensions take index 0.
fn data_index(shape: &[usize], matched: &GridMatch) -> std::result::Result<Vec<usize>, AttemptFailure> {
    let n = shape.len();
    if n < 2 || shape[n - 2] != matched.rows || shape[n - 1] != matched.cols {
        return Err(AttemptFailure::CoordinateMismatch {
            message: format!(
                "data shape {:?} does not end in the coordinate grid {}x{}",
                shape, matched.rows, matched.cols
            ),
        });
    }
    let mut index = vec![0; n];
    index[n - 2] = matched.row;
    index[n - 1] = matched.col;
    Ok(index)
}
