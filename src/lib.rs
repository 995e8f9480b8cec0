//! Data-synchronization and drill-down core for a monitoring and risk
//! dashboard.
//!
//! Two mechanisms live here. [`binding::MetricBinding`] keeps per-widget
//! metric fetches synchronized with the externally-owned time window,
//! including reset-on-teardown and discarding of results that arrive after
//! deactivation. [`drilldown::DrillDownController`] navigates between the
//! overview, category list, and single-coordinate analysis views, tracking a
//! dimension coordinate and filtering the loaded dataset into a flat chart
//! series.
//!
//! Everything downstream of the derived data (chart widgets, routing,
//! styling) and everything upstream of the fetch intents (network transport,
//! retries, auth) belongs to external collaborators behind the
//! [`binding::MetricDispatch`] and [`drilldown::AnalysisFetch`] traits.

pub mod binding;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod drilldown;
pub mod error;
pub mod palette;
pub mod payload;
pub mod series;
pub mod store;
pub mod window;

pub use binding::{MetricBinding, MetricDispatch, MetricSpec};
pub use config::Config;
pub use dataset::{AnalysisDataset, Dimension, DimensionCoordinate};
pub use drilldown::{AnalysisFetch, AnalysisType, DrillDownController, HazardCategory, View};
pub use error::Error;
pub use palette::color_for;
pub use payload::RawSeriesPayload;
pub use series::{ChartPoint, CategoryPoint, Unit};
pub use store::MetricStore;
pub use window::{TimeWindow, WindowReader};
