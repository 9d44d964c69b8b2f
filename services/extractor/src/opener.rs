//! Local-file granule access.

use point_extractor::{GranuleOpener, GranuleRef};
use tempo_parser::{NetCdfGranule, NetCdfResult};

/// Opens granules already on local disk. `GranuleRef::location` is the path.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileOpener;

impl GranuleOpener for LocalFileOpener {
    type Granule = NetCdfGranule;

    fn open(&self, granule: &GranuleRef) -> NetCdfResult<NetCdfGranule> {
        NetCdfGranule::open(&granule.location)
    }
}
