use ringlog::*;
use serde::{Deserialize, Serialize};

use crate::dataset::{snap, AnalysisDataset, DimensionCoordinate};
use crate::error::Error;
use crate::series::{self, CategoryPoint};

/// One analysis type offered by a hazard category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisType {
    pub name: String,
    pub title: String,
    pub href: String,
}

/// A hazard category with the analysis types it offers. A category with no
/// analysis types is valid and shows an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardCategory {
    pub mnemonic: String,
    pub description: String,
    pub analysis_types: Vec<AnalysisType>,
}

/// Outward analysis fetch intents. Results arrive later as events
/// ([`DrillDownController::dataset_loaded`]); nothing here blocks on them.
pub trait AnalysisFetch {
    fn fetch_analysis(&self, href: &str, is_back_navigation: bool);
    fn fetch_ancillary(&self, id: &str);
}

/// The three drill-down views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Overview,
    CategoryList,
    AnalysisData,
}

/// Navigation state machine over the drill-down views.
///
/// Owns the loaded dataset and the dimension coordinate exclusively; exactly
/// one controller instance is active at a time. Navigating back keeps both the
/// category selection and the dataset; resource cleanup, if any, belongs to
/// the fetch collaborator.
pub struct DrillDownController<F: AnalysisFetch> {
    fetch: F,
    view: View,
    category: Option<HazardCategory>,
    analysis: Option<AnalysisType>,
    dataset: Option<AnalysisDataset>,
    coordinate: Option<DimensionCoordinate>,
}

impl<F: AnalysisFetch> DrillDownController<F> {
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            view: View::Overview,
            category: None,
            analysis: None,
            dataset: None,
            coordinate: None,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn category(&self) -> Option<&HazardCategory> {
        self.category.as_ref()
    }

    pub fn dataset(&self) -> Option<&AnalysisDataset> {
        self.dataset.as_ref()
    }

    pub fn coordinate(&self) -> Option<DimensionCoordinate> {
        self.coordinate
    }

    /// Enter the category list for `category`.
    pub fn select_category(&mut self, category: HazardCategory) {
        info!("selected category {}", category.mnemonic);
        self.category = Some(category);
        self.view = View::CategoryList;
    }

    /// Analysis types offered by the current category.
    pub fn analysis_types(&self) -> &[AnalysisType] {
        self.category
            .as_ref()
            .map_or(&[], |c| c.analysis_types.as_slice())
    }

    /// Choose an analysis type, dispatching the dataset fetch. The view moves
    /// once the dataset arrives through [`Self::dataset_loaded`].
    pub fn select_analysis(&mut self, analysis: AnalysisType) {
        info!("selected analysis {}", analysis.name);
        self.fetch.fetch_analysis(&analysis.href, false);
        self.analysis = Some(analysis);
    }

    /// Dataset fetch completion event.
    ///
    /// Only moves the view out of the category list, and only for a dataset
    /// belonging to a chosen analysis type. A dataset without an identifying
    /// name, or without dimensions, leaves the view where it is.
    pub fn dataset_loaded(&mut self, dataset: AnalysisDataset) {
        if self.view != View::CategoryList || self.analysis.is_none() {
            debug!("ignoring dataset outside an analysis selection");
            return;
        }

        if !dataset.is_loaded() || dataset.dimensions.is_empty() {
            debug!("ignoring dataset without name or dimensions");
            return;
        }

        self.coordinate = Some(DimensionCoordinate::new(
            dataset.first_variable_dimension(),
        ));
        self.dataset = Some(dataset);
        self.view = View::AnalysisData;
    }

    /// Back from the analysis view to the category list. The category
    /// selection survives and the prior list is re-requested, mirroring the
    /// forward navigation's fetch with the back flag set.
    pub fn back(&mut self) {
        if self.view != View::AnalysisData {
            return;
        }

        if let Some(analysis) = &self.analysis {
            self.fetch.fetch_analysis(&analysis.href, true);
        }

        self.view = View::CategoryList;
    }

    /// Whether a slider is offered: only when the varying dimension has more
    /// than one value. With a single value the coordinate is fixed and only
    /// the label is shown.
    pub fn slider_enabled(&self) -> bool {
        match (&self.dataset, &self.coordinate) {
            (Some(dataset), Some(coord)) => dataset.dimensions[coord.dim()].values.len() > 1,
            _ => false,
        }
    }

    /// Move the coordinate to a discrete index. Out-of-range input fails fast.
    pub fn set_dim_index(&mut self, idx: usize) {
        let (Some(dataset), Some(coord)) = (self.dataset.as_ref(), self.coordinate.as_mut())
        else {
            return;
        };

        coord.set_index(dataset, idx);
    }

    /// Move the coordinate from a continuous slider position.
    pub fn slider_moved(&mut self, position: f64) {
        self.set_dim_index(snap(position));
    }

    /// Label of the selected coordinate value.
    pub fn resolved_label(&self) -> Option<&str> {
        match (&self.dataset, &self.coordinate) {
            (Some(dataset), Some(coord)) => Some(coord.resolved_label(dataset)),
            _ => None,
        }
    }

    /// Header for the analysis view: dimension name plus selected value.
    pub fn header(&self) -> Option<String> {
        match (&self.dataset, &self.coordinate) {
            (Some(dataset), Some(coord)) => Some(coord.header(dataset)),
            _ => None,
        }
    }

    /// Chart series for the current coordinate: the dataset filtered to the
    /// selected value of the varying dimension, with points named by the other
    /// dimension. Empty when no dataset is loaded.
    pub fn chart_data(&self) -> Result<Vec<CategoryPoint>, Error> {
        let (Some(dataset), Some(coord)) = (&self.dataset, &self.coordinate) else {
            return Ok(Vec::new());
        };

        let dim = if coord.dim() == 0 { 1 } else { 0 };

        series::filter_rows(&dataset.rows, dim, coord.resolved_label(dataset))
    }

    /// Dispatch the further-resource fetch for the ancillary detail view.
    pub fn request_ancillary(&self, id: &str) {
        debug!("requesting ancillary resource {id}");
        self.fetch.fetch_ancillary(id);
    }
}
