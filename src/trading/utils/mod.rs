pub mod ticker;

pub use ticker::{collect_tickers, format_ticker};
