//! Explorer: one filter session from selection to working dataset
//!
//! Owns the registry, the row source and the engines, and turns a confirmed
//! [`FilterSelection`] into a [`WorkingDataset`]. Statistics and raw-row
//! browsing then run against that dataset until the next selection.

use crate::app::services::aggregation::AggregationEngine;
use crate::app::services::dataset_registry::DatasetRegistry;
use crate::app::services::filter_engine::FilterEngine;
use crate::app::services::loader::{LoadReport, TripLoader};
use crate::app::services::row_browser::RowBrowser;
use crate::app::services::trip_source::{CsvTripSource, TripSource};
use crate::config::BikeshareConfig;
use crate::error::Result;
use crate::models::{FilterSelection, OptionalColumn, WorkingDataset};
use std::collections::BTreeSet;
use tracing::info;

pub struct Explorer<S: TripSource> {
    registry: DatasetRegistry,
    source: S,
    filter: FilterEngine,
    aggregation: AggregationEngine,
    browser: RowBrowser,
}

impl Explorer<CsvTripSource> {
    /// Explorer reading the configured CSV exports
    pub fn from_config(config: &BikeshareConfig) -> Result<Self> {
        let registry = DatasetRegistry::from_config(config)?;
        Ok(Self::new(registry, CsvTripSource::new(), config.page_size))
    }
}

impl<S: TripSource> Explorer<S> {
    pub fn new(registry: DatasetRegistry, source: S, page_size: usize) -> Self {
        let calendar = registry.calendar().clone();
        Self {
            registry,
            source,
            filter: FilterEngine::new(calendar.clone()),
            aggregation: AggregationEngine::new(calendar),
            browser: RowBrowser::new(page_size),
        }
    }

    pub fn registry(&self) -> &DatasetRegistry {
        &self.registry
    }

    pub fn aggregation(&self) -> &AggregationEngine {
        &self.aggregation
    }

    pub fn browser(&self) -> &RowBrowser {
        &self.browser
    }

    /// Load, normalize and filter the rows for a selection
    ///
    /// # Returns
    ///
    /// The working dataset and the load report for the selected cities
    pub fn prepare(&self, selection: &FilterSelection) -> Result<(WorkingDataset, LoadReport)> {
        let loader = TripLoader::new(&self.registry, &self.source);
        let (rows, report) = loader.load(&selection.cities)?;
        let filtered = self.filter.apply(rows, selection)?;

        let declared = self
            .registry
            .optional_columns_for(selection.cities.values().iter().map(String::as_str))?;
        let optional_columns: BTreeSet<OptionalColumn> = declared
            .into_iter()
            .filter(|column| filtered.get_column_index(column.column_name()).is_some())
            .collect();

        let cities = selection
            .cities
            .values()
            .iter()
            .map(|key| {
                self.registry
                    .get(key)
                    .map(|source| source.display_name().to_string())
            })
            .collect::<Result<Vec<String>>>()?;

        info!(
            "Working dataset for {}: {} of {} trips match",
            cities.join(", "),
            filtered.height(),
            report.total_rows
        );

        Ok((
            WorkingDataset::new(filtered, cities, optional_columns),
            report,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::trip_source::InMemoryTripSource;
    use crate::models::Selection;
    use polars::prelude::*;

    fn frame(stations: &[&str], with_demographics: bool) -> DataFrame {
        let n = stations.len();
        let mut df = df!(
            "Start Time" => vec!["2017-06-21 08:36:34"; n],
            "End Time" => vec!["2017-06-21 08:44:43"; n],
            "Trip Duration" => vec![489.0; n],
            "Start Station" => stations.to_vec(),
            "End Station" => stations.to_vec(),
            "User Type" => vec!["Subscriber"; n]
        )
        .unwrap();
        if with_demographics {
            df.with_column(Series::new("Gender".into(), vec!["Male"; n]))
                .unwrap();
            df.with_column(Series::new("Birth Year".into(), vec![1990.0; n]))
                .unwrap();
        }
        df
    }

    fn explorer() -> Explorer<InMemoryTripSource> {
        let registry = DatasetRegistry::from_config(&BikeshareConfig::default()).unwrap();
        let source = InMemoryTripSource::new()
            .with_frame("chicago", frame(&["A", "B"], true))
            .with_frame("washington", frame(&["C"], false));
        Explorer::new(registry, source, 5)
    }

    fn selection(explorer: &Explorer<InMemoryTripSource>, cities: &[&str]) -> FilterSelection {
        let everything = FilterSelection::everything(explorer.registry()).unwrap();
        let cities = Selection::from_values(cities.iter().map(|c| c.to_string()).collect()).unwrap();
        FilterSelection::new(cities, everything.months, everything.weekdays, explorer.registry())
            .unwrap()
    }

    #[test]
    fn test_prepare_single_city() {
        let explorer = explorer();
        let (working, report) = explorer
            .prepare(&selection(&explorer, &["chicago"]))
            .unwrap();

        assert_eq!(working.height(), 2);
        assert_eq!(report.total_rows, 2);
        assert_eq!(working.cities().to_vec(), vec!["Chicago".to_string()]);
        assert!(working.has_column(OptionalColumn::Gender));
        assert!(working.has_column(OptionalColumn::BirthYear));
    }

    #[test]
    fn test_washington_has_no_demographics() {
        let explorer = explorer();
        let (working, _) = explorer
            .prepare(&selection(&explorer, &["washington"]))
            .unwrap();

        assert!(!working.has_column(OptionalColumn::Gender));
        assert!(!working.has_column(OptionalColumn::BirthYear));
    }

    #[test]
    fn test_mixed_cities_keep_demographics() {
        let explorer = explorer();
        let (working, report) = explorer
            .prepare(&selection(&explorer, &["washington", "chicago"]))
            .unwrap();

        assert_eq!(working.height(), 3);
        assert_eq!(report.sources.len(), 2);
        assert_eq!(working.city_label(), "Washington, Chicago");
        assert!(working.has_column(OptionalColumn::Gender));
    }
}
