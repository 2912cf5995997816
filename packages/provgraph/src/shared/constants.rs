//! Centralized configuration constants
//!
//! Configuration defaults are read from here so that tuning happens in one
//! place.

/// Sentinel identifiers of the dataset pseudo-analysis
pub mod sentinel {
    /// Analysis uuid (and workflow uuid) owning root-level nodes
    pub const DATASET_UUID: &str = "dataset";

    /// Display name used when no workflow definition exists
    pub const DATASET_LABEL: &str = "dataset";

    /// Name given to node records without one
    pub const UNDEFINED_NAME: &str = "undefined";
}

/// Grid cell geometry
pub mod layout {
    /// Width of one grid cell (workflow node)
    pub const CELL_WIDTH: f64 = 35.0;

    /// Height of one grid cell (workflow node)
    pub const CELL_HEIGHT: f64 = 21.0;

    /// Node glyph radius
    pub const NODE_RADIUS: f64 = 7.0;

    /// Offset separating equal barycenter values inside one analysis
    pub const BARYCENTER_EPSILON: f64 = 0.01;

    /// Divisor applied to the subanalysis row when ordering the leftmost column
    pub const LEFT_COLUMN_ROW_DIVISOR: f64 = 10.0;
}

/// Degree-of-interest thresholds and defaults
pub mod doi {
    /// Default weight of each of the five components
    pub const DEFAULT_WEIGHT: f64 = 0.2;

    /// Filtered component for nodes outside the filter result
    pub const UNFILTERED_VALUE: f64 = 0.5;

    /// Layer expands at or above this score
    pub const LAYER_EXPAND: f64 = 0.25;

    /// Analysis expands at or above this score
    pub const ANALYSIS_EXPAND: f64 = 0.5;

    /// Analysis collapses into its layer below this score
    pub const ANALYSIS_COLLAPSE: f64 = 0.25;

    /// Sibling analyses stay exaggerated at or above this score
    pub const EXAGGERATE: f64 = 0.25;

    /// Leaf nodes fold into their subanalysis below this maximum score
    pub const LEAF_COLLAPSE: f64 = 0.75;

    /// Subanalysis expands at or above this score
    pub const SUBANALYSIS_EXPAND: f64 = 0.75;

    /// Subanalyses collapse when their siblings' maximum falls below this
    pub const SUBANALYSIS_COLLAPSE: f64 = 0.5;
}

/// API reference prefixes stripped from raw node records
pub mod api {
    pub const STUDY_PREFIX: &str = "/api/v1/study/";
    pub const ASSAY_PREFIX: &str = "/api/v1/assay/";
    pub const NODE_PREFIX: &str = "/api/v1/node/";
}
