//! Shared helpers for extraction integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use point_extractor::{
    Extractor, ExtractorConfig, GranuleOpener, GranuleQuery, GranuleRef, GranuleSearch,
    StaticCredential,
};
use tempo_parser::{MemoryGranule, NetCdfError, NetCdfResult};

/// Opens in-memory granules by location and records every open.
#[derive(Default)]
pub struct FixtureOpener {
    granules: HashMap<String, MemoryGranule>,
    opened: Rc<RefCell<Vec<String>>>,
}

impl FixtureOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, granule: MemoryGranule) -> Self {
        use tempo_parser::DataFile;
        self.granules.insert(granule.source().to_string(), granule);
        self
    }

    /// Shared log of opened locations, readable after the opener moves.
    pub fn open_log(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.opened)
    }
}

impl GranuleOpener for FixtureOpener {
    type Granule = MemoryGranule;

    fn open(&self, granule: &GranuleRef) -> NetCdfResult<MemoryGranule> {
        self.opened.borrow_mut().push(granule.location.clone());
        self.granules
            .get(&granule.location)
            .cloned()
            .ok_or_else(|| NetCdfError::OpenFailed {
                path: granule.location.clone(),
                message: "not an HDF5 file".to_string(),
            })
    }
}

/// Returns a fixed answer and records every query it receives.
pub struct RecordingSearch {
    answer: Result<Vec<GranuleRef>, String>,
    queries: RefCell<Vec<GranuleQuery>>,
}

impl RecordingSearch {
    pub fn found(granules: Vec<GranuleRef>) -> Self {
        Self {
            answer: Ok(granules),
            queries: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            answer: Err(message.to_string()),
            queries: RefCell::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<GranuleQuery> {
        self.queries.borrow().clone()
    }
}

impl GranuleSearch for RecordingSearch {
    fn search(&self, query: &GranuleQuery) -> Result<Vec<GranuleRef>, String> {
        self.queries.borrow_mut().push(query.clone());
        self.answer.clone()
    }
}

pub fn refs(names: &[&str]) -> Vec<GranuleRef> {
    names.iter().map(|n| GranuleRef::local(*n)).collect()
}

pub fn extractor(opener: FixtureOpener) -> Extractor<FixtureOpener> {
    extractor_with(opener, ExtractorConfig::default(), true)
}

pub fn extractor_with(
    opener: FixtureOpener,
    config: ExtractorConfig,
    credential_valid: bool,
) -> Extractor<FixtureOpener> {
    Extractor::new(opener, Arc::new(StaticCredential(credential_valid)), config)
        .expect("valid test config")
}
