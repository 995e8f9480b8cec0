use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::binding::{MetricBinding, MetricDispatch, MetricSpec};
use crate::series::Unit;
use crate::store::MetricStore;

/// Fixed metric set a status widget keeps synchronized with the time window.
#[derive(Debug, Clone)]
pub struct WidgetDefinition {
    pub title: &'static str,
    pub metrics: Vec<MetricSpec>,
}

impl WidgetDefinition {
    /// Build the binding for this widget.
    pub fn binding<D: MetricDispatch>(
        &self,
        dispatch: D,
        store: Arc<MetricStore>,
    ) -> MetricBinding<D> {
        MetricBinding::new(self.metrics.clone(), dispatch, store)
    }
}

/// Service status widget: CPU and memory trend charts over the full window.
pub fn service_status() -> WidgetDefinition {
    WidgetDefinition {
        title: "Service status",
        metrics: vec![
            MetricSpec {
                name: "cpu_usage".to_string(),
                unit: Unit::Percentage,
                interval_bucketed: false,
            },
            MetricSpec {
                name: "memory_used".to_string(),
                unit: Unit::Megabytes,
                interval_bucketed: false,
            },
        ],
    }
}

/// Host status widget: instantaneous CPU and memory gauges. These metrics are
/// interval-bucketed, so fetches carry the window interval.
pub fn host_status() -> WidgetDefinition {
    WidgetDefinition {
        title: "Host status",
        metrics: vec![
            MetricSpec {
                name: "cpu_average".to_string(),
                unit: Unit::Percentage,
                interval_bucketed: true,
            },
            MetricSpec {
                name: "memory_average".to_string(),
                unit: Unit::Megabytes,
                interval_bucketed: true,
            },
        ],
    }
}

/// All widgets, in display order.
pub static WIDGETS: Lazy<Vec<WidgetDefinition>> =
    Lazy::new(|| vec![service_status(), host_status()]);
