// Domain layer - stats shapes, dataset building and chart documents
pub mod builder;
pub mod chart;
pub mod dashboard;
pub mod dataset;
pub mod metric;
pub mod preferences;
pub mod query;
pub mod reading;
pub mod timeframe;
