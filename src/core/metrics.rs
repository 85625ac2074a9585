use crate::domain::model::{count_by_value, LocationCount, Metrics, RefinedView, Table, TourResults};
use std::collections::HashSet;

/// Derives the metrics panel from whatever was loaded.
///
/// `tours` is `None` only when the JSON artifact was not loaded, which
/// counts as zero tours. Without the refined table both table-derived
/// metrics are unavailable.
pub fn derive_metrics(tours: Option<&TourResults>, refined: Option<&Table>) -> Metrics {
    let view = refined.map(RefinedView::new);

    let metrics = Metrics {
        total_tours: tours.map(TourResults::total).unwrap_or(0),
        city_count: view.as_ref().and_then(city_count),
        average_price: view.as_ref().and_then(average_price),
    };

    tracing::debug!("Derived metrics: {:?}", metrics);
    metrics
}

fn city_count(view: &RefinedView<'_>) -> Option<usize> {
    let distinct: HashSet<String> = view.locations()?.collect();
    Some(distinct.len())
}

fn average_price(view: &RefinedView<'_>) -> Option<f64> {
    let (sum, count) = view
        .prices()?
        .fold((0.0_f64, 0_usize), |(sum, count), price| (sum + price, count + 1));

    let mean = sum / count as f64;
    (count > 0 && mean.is_finite()).then_some(mean)
}

/// Most frequent locations, or `None` if the table has no location column.
pub fn top_locations(refined: &Table, limit: usize) -> Option<Vec<LocationCount>> {
    let view = RefinedView::new(refined);
    let mut counts = count_by_value(view.locations()?);
    counts.truncate(limit);
    Some(counts)
}

pub fn format_count(value: Option<usize>, placeholder: &str) -> String {
    value.map_or_else(|| placeholder.to_string(), |v| v.to_string())
}

pub fn format_price(value: Option<f64>, currency: &str, placeholder: &str) -> String {
    value.map_or_else(|| placeholder.to_string(), |v| format!("{}{:.2}", currency, v))
}
