//! Delimited file reading for the statistics engine
//!
//! Opens input files, drops the configured number of leading lines, splits
//! the remainder into records with the `csv` crate and feeds every record
//! to a fresh [`ColumnAggregator`](crate::ColumnAggregator).
//!
//! ## Usage
//!
//! ```rust
//! use bfbs::{CsvStatsReader, StatsConfig};
//!
//! # fn example() -> bfbs::Result<()> {
//! let reader = CsvStatsReader::new(StatsConfig::default())?;
//! let stats = reader.process_reader("inline", "1,2\n3,4\n5,6\n".as_bytes())?;
//!
//! assert_eq!(stats.record_at(0)?.count, 3);
//! assert_eq!(stats.record_at(1)?.sum, 12);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod reader;

pub use reader::CsvStatsReader;
