pub mod bar;
pub mod historical_data;
pub mod indicator_series;

pub use bar::{Bar, BarBuilder, Series};
pub use historical_data::HistoricalRow;
pub use indicator_series::{IndicatorPoint, IndicatorSeries};
