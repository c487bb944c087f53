use std::sync::Arc;

use log::{debug, info, warn};

use crate::config::ViewerConfig;
use crate::data::loader::{check_content_type, ingest, parse_csv};
use crate::data::model::{AxisColumns, Dataset};
use crate::data::range::{self, AxisRange, AxisRanges};
use crate::error::Result;
use crate::geometry::controls::RegionDomains;
use crate::geometry::polygon::{self, Polygon, PolygonParams};
use crate::geometry::region::{self, ClassifiedSet, SquareRegion};
use crate::upload::{Upload, UploadSlot, UploadTicket};

// ---------------------------------------------------------------------------
// Dependency graph
// ---------------------------------------------------------------------------

/// Inputs of the dataflow graph; only these are ever set from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Dataset,
    PolygonParams,
    Region,
}

/// Derived artifacts and the inputs each one reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Derived {
    Ranges,
    Polygon,
    Classified,
}

impl Derived {
    const ALL: [Derived; 3] = [Derived::Ranges, Derived::Polygon, Derived::Classified];

    /// Ranges deliberately do not read the region: moving the region must
    /// never move the bounds of its own sliders.
    fn inputs(self) -> &'static [Input] {
        match self {
            Derived::Ranges => &[Input::Dataset],
            Derived::Polygon => &[Input::PolygonParams],
            Derived::Classified => &[Input::Dataset, Input::Region],
        }
    }
}

/// How often each derived artifact has been rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecomputeCounts {
    pub ranges: usize,
    pub polygon: usize,
    pub classified: usize,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Immutable view handed to the presentation layer. Later state changes never
/// alter a snapshot already taken.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub dataset: Option<Arc<Dataset>>,
    /// Increments on every successful load; 0 before the first.
    pub generation: u64,
    pub axes: AxisColumns,
    pub polygon_params: PolygonParams,
    pub polygon: Arc<Polygon>,
    pub region: SquareRegion,
    pub classified: Arc<ClassifiedSet>,
    pub ranges: AxisRanges,
    pub region_domains: RegionDomains,
    pub status_message: Option<String>,
    pub loading: bool,
}

impl Snapshot {
    /// Header set of the current dataset, empty when nothing is loaded.
    pub fn headers(&self) -> &[String] {
        self.dataset
            .as_deref()
            .map(|ds| ds.headers.as_slice())
            .unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Owns the dataset and the overlay parameters, and keeps every derived
/// artifact in step with them. All mutation goes through the methods below,
/// each of which either fully applies or leaves the state untouched.
pub struct AppState {
    config: ViewerConfig,

    // -- inputs --
    dataset: Option<Arc<Dataset>>,
    generation: u64,
    polygon_params: PolygonParams,
    region: SquareRegion,

    // -- derived --
    ranges: AxisRanges,
    polygon: Arc<Polygon>,
    classified: Arc<ClassifiedSet>,

    uploads: UploadSlot,
    status_message: Option<String>,
    counts: RecomputeCounts,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl AppState {
    /// State with no dataset, overlays taken from `config`. Parameters that
    /// fail validation fall back to their defaults.
    pub fn new(mut config: ViewerConfig) -> Self {
        if let Err(e) = config.validate_axes() {
            warn!("Config axes rejected, using default: {e}");
            config.axes = AxisColumns::default();
        }
        if let Err(e) = config.validate_default_range() {
            warn!("Config default range rejected, using default: {e}");
            config.default_range = AxisRange::default();
        }
        let polygon_params = match config.polygon.validate() {
            Ok(()) => config.polygon,
            Err(e) => {
                warn!("Config polygon rejected, using default: {e}");
                PolygonParams::default()
            }
        };
        let region = match config.region.validate() {
            Ok(()) => config.region,
            Err(e) => {
                warn!("Config region rejected, using default: {e}");
                SquareRegion::default()
            }
        };
        let ranges = AxisRanges {
            x: config.default_range,
            y: config.default_range,
        };

        let mut state = Self {
            config,
            dataset: None,
            generation: 0,
            polygon_params,
            region,
            ranges,
            polygon: Arc::new(Polygon::default()),
            classified: Arc::new(ClassifiedSet::default()),
            uploads: UploadSlot::default(),
            status_message: None,
            counts: RecomputeCounts::default(),
        };
        for node in Derived::ALL {
            state.recompute(node);
        }
        state.counts = RecomputeCounts::default();
        state
    }

    // -- inputs --

    /// Parse `raw_text` and, on success, replace the dataset. On failure the
    /// previous dataset and everything derived from it stay as they were.
    pub fn load_dataset(&mut self, raw_text: &str) -> Result<()> {
        let parsed = parse_csv(raw_text);
        self.apply_load(parsed)
    }

    /// Like [`AppState::load_dataset`] but with the content-type check.
    pub fn load_upload(&mut self, upload: &Upload) -> Result<()> {
        let parsed = ingest(&upload.file_name, upload.mime.as_deref(), &upload.text);
        let result = self.apply_load(parsed);
        if result.is_ok() {
            info!("Loaded '{}'", upload.file_name);
        }
        result
    }

    pub fn set_polygon_params(&mut self, params: PolygonParams) -> Result<()> {
        if let Err(e) = params.validate() {
            warn!("Rejected polygon parameters: {e}");
            return Err(e);
        }
        self.polygon_params = params;
        self.propagate(Input::PolygonParams);
        Ok(())
    }

    pub fn set_region(&mut self, region: SquareRegion) -> Result<()> {
        if let Err(e) = region.validate() {
            warn!("Rejected region: {e}");
            return Err(e);
        }
        self.region = region;
        self.propagate(Input::Region);
        Ok(())
    }

    // -- uploads --

    /// Register a new file read; any read still in flight is superseded.
    pub fn begin_upload(&mut self) -> UploadTicket {
        self.uploads.begin()
    }

    /// Content-type check for a picked file, done before any bytes are read.
    /// On rejection no upload is started and any read in flight is kept.
    pub fn begin_file_upload(&mut self, file_name: &str) -> Result<UploadTicket> {
        if let Err(e) = check_content_type(file_name, None) {
            warn!("Rejected upload: {e}");
            self.status_message = Some(format!("Error: {e}"));
            return Err(e);
        }
        Ok(self.begin_upload())
    }

    /// Deliver the raw bytes of a finished read. Returns `None` when the
    /// ticket was superseded, in which case nothing changes. Undecodable bytes
    /// are reported as an unsupported file type and leave the dataset untouched.
    pub fn complete_upload_bytes(
        &mut self,
        ticket: UploadTicket,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Option<Result<()>> {
        let bytes = self.uploads.finish(ticket, bytes)?;
        Some(match Upload::from_bytes(file_name, None, bytes) {
            Ok(upload) => self.load_upload(&upload),
            Err(e) => self.apply_load(Err(e)),
        })
    }

    /// The read itself failed (I/O). Recorded only if the ticket is current.
    pub fn fail_upload(&mut self, ticket: UploadTicket, message: String) {
        if let Some(message) = self.uploads.finish(ticket, message) {
            warn!("Upload failed: {message}");
            self.status_message = Some(message);
        }
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    // -- outputs --

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            dataset: self.dataset.clone(),
            generation: self.generation,
            axes: self.config.axes.clone(),
            polygon_params: self.polygon_params,
            polygon: Arc::clone(&self.polygon),
            region: self.region,
            classified: Arc::clone(&self.classified),
            ranges: self.ranges,
            region_domains: RegionDomains::from_ranges(self.ranges.x, self.ranges.y),
            status_message: self.status_message.clone(),
            loading: self.uploads.is_pending(),
        }
    }

    pub fn recompute_counts(&self) -> RecomputeCounts {
        self.counts
    }

    // -- internals --

    fn apply_load(&mut self, parsed: Result<Dataset>) -> Result<()> {
        match parsed {
            Ok(dataset) => {
                info!(
                    "Loaded {} records with columns {:?}",
                    dataset.len(),
                    dataset.headers
                );
                for column in [&self.config.axes.x, &self.config.axes.y] {
                    if !dataset.has_column(column) {
                        warn!("Dataset has no '{column}' column; nothing will be plotted");
                    }
                }
                self.dataset = Some(Arc::new(dataset));
                self.generation += 1;
                self.status_message = None;
                self.propagate(Input::Dataset);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load dataset: {e}");
                self.status_message = Some(format!("Error: {e}"));
                Err(e)
            }
        }
    }

    fn propagate(&mut self, changed: Input) {
        for node in Derived::ALL {
            if node.inputs().contains(&changed) {
                self.recompute(node);
            }
        }
    }

    fn recompute(&mut self, node: Derived) {
        debug!("Recomputing {node:?}");
        match node {
            Derived::Ranges => {
                self.ranges = match &self.dataset {
                    Some(ds) => range::estimate(ds, &self.config.axes, self.config.default_range),
                    None => AxisRanges {
                        x: self.config.default_range,
                        y: self.config.default_range,
                    },
                };
                self.counts.ranges += 1;
            }
            Derived::Polygon => {
                // Params are validated before they are stored.
                self.polygon = Arc::new(polygon::generate(&self.polygon_params).unwrap_or_default());
                self.counts.polygon += 1;
            }
            Derived::Classified => {
                self.classified = Arc::new(match &self.dataset {
                    Some(ds) => region::classify(ds, &self.region, &self.config.axes),
                    None => ClassifiedSet::default(),
                });
                self.counts.classified += 1;
            }
        }
    }
}
