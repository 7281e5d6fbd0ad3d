//! File-backed road network sources

mod csv_provider;
mod raw_types;

pub use csv_provider::CsvNetworkProvider;
