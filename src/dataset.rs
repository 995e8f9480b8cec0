use serde::{Deserialize, Serialize};

/// One discrete dimension of an analysis dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub values: Vec<String>,
}

/// A multi-dimensional categorical analysis dataset.
///
/// Each row carries one value per dimension followed by the measurement, and
/// every dimension value in a row is a member of the matching dimension's
/// value list. A dataset counts as loaded once its identifying `name` is
/// present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDataset {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub unit_of_measure: String,
    pub dimensions: Vec<Dimension>,
    pub rows: Vec<Vec<String>>,
}

impl AnalysisDataset {
    pub fn is_loaded(&self) -> bool {
        !self.name.is_empty()
    }

    /// Index of the first dimension with more than one value, the one a fresh
    /// coordinate varies along. Falls back to dimension zero.
    pub fn first_variable_dimension(&self) -> usize {
        self.dimensions
            .iter()
            .position(|d| d.values.len() > 1)
            .unwrap_or(0)
    }
}

/// The selected position within the varying dimension of a dataset.
///
/// `dim1` is fixed at construction and selects which dimension varies; the
/// index moves only through [`Self::set_index`]. Out-of-range input is a
/// contract violation and fails fast rather than clamping, so a slider that
/// desynchronized from the dataset surfaces immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionCoordinate {
    dim1: usize,
    dim1_idx: usize,
}

impl DimensionCoordinate {
    pub fn new(dim1: usize) -> Self {
        Self { dim1, dim1_idx: 0 }
    }

    pub fn dim(&self) -> usize {
        self.dim1
    }

    pub fn index(&self) -> usize {
        self.dim1_idx
    }

    pub fn set_index(&mut self, dataset: &AnalysisDataset, idx: usize) {
        let len = dataset
            .dimensions
            .get(self.dim1)
            .map_or(0, |d| d.values.len());

        assert!(
            idx < len,
            "dimension index {idx} out of range for {len} values"
        );

        self.dim1_idx = idx;
    }

    /// Label of the currently selected value.
    pub fn resolved_label<'a>(&self, dataset: &'a AnalysisDataset) -> &'a str {
        &dataset.dimensions[self.dim1].values[self.dim1_idx]
    }

    /// Header line for the coordinate: dimension name plus selected value.
    pub fn header(&self, dataset: &AnalysisDataset) -> String {
        format!(
            "{} {}",
            dataset.dimensions[self.dim1].name,
            self.resolved_label(dataset)
        )
    }
}

/// Round a continuous slider position to the nearest discrete index.
pub fn snap(position: f64) -> usize {
    position.round().max(0.0) as usize
}

/// Shorten a dimension value for slider pip display: first token only,
/// truncated past eight characters. Display only, the stored coordinate is
/// untouched.
pub fn pip_label(value: &str) -> String {
    let token = value.split(' ').next().unwrap_or("");

    if token.chars().count() > 8 {
        let truncated: String = token.chars().take(8).collect();
        format!("{truncated}...")
    } else {
        token.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> AnalysisDataset {
        AnalysisDataset {
            name: "impact".to_string(),
            dimensions: vec![
                Dimension {
                    name: "Scenario".to_string(),
                    values: vec!["Baseline".to_string()],
                },
                Dimension {
                    name: "Round Period".to_string(),
                    values: vec!["10".to_string(), "20".to_string(), "50".to_string()],
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_first_variable_dimension() {
        assert_eq!(dataset().first_variable_dimension(), 1);

        let single = AnalysisDataset {
            dimensions: vec![Dimension {
                name: "Scenario".to_string(),
                values: vec!["Baseline".to_string()],
            }],
            ..Default::default()
        };
        assert_eq!(single.first_variable_dimension(), 0);
    }

    #[test]
    fn test_set_index_in_range() {
        let ds = dataset();
        let mut coord = DimensionCoordinate::new(1);

        coord.set_index(&ds, 2);
        assert_eq!(coord.index(), 2);
        assert_eq!(coord.resolved_label(&ds), "50");
        assert_eq!(coord.header(&ds), "Round Period 50");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_set_index_out_of_range_fails_fast() {
        let ds = dataset();
        let mut coord = DimensionCoordinate::new(1);
        coord.set_index(&ds, 3);
    }

    #[test]
    fn test_snap() {
        assert_eq!(snap(0.0), 0);
        assert_eq!(snap(1.4), 1);
        assert_eq!(snap(1.6), 2);
        assert_eq!(snap(-0.4), 0);
    }

    #[test]
    fn test_pip_label() {
        assert_eq!(pip_label("10"), "10");
        assert_eq!(pip_label("Baseline"), "Baseline");
        assert_eq!(pip_label("Continental scale"), "Continen...");
        assert_eq!(pip_label("one two three"), "one");
    }
}
