use std::collections::BTreeSet;

const NSE_KEYWORDS: [&str; 10] = [
    "HDFC", "RELI", "ITC", "LICI", "NIFTY", "BANK", "SGB", "GOLDBEES", "SILVER", "TATVA",
];

/// 规范化股票代码，NSE 股票补全 `.NS` 后缀
///
/// Symbols already carrying an exchange suffix (`.NS`/`.BO`), currency pairs
/// (`INR=X`) and indices (`^NSEI`) are returned as-is after trim + uppercase.
pub fn format_ticker(ticker: &str) -> String {
    let ticker = ticker.trim().to_uppercase();
    let has_suffix = ticker.ends_with(".NS") || ticker.ends_with(".BO");
    if has_suffix || ticker.contains('=') || ticker.starts_with('^') {
        return ticker;
    }
    let looks_nse = NSE_KEYWORDS.iter().any(|k| ticker.contains(k)) || ticker.len() < 10;
    if looks_nse {
        format!("{}.NS", ticker)
    } else {
        ticker
    }
}

/// Sorted, de-duplicated union of watchlist and portfolio tickers. Blank
/// entries are dropped; case and surrounding whitespace are normalised.
pub fn collect_tickers<'a, W, P>(watchlist: W, portfolio: P) -> Vec<String>
where
    W: IntoIterator<Item = &'a str>,
    P: IntoIterator<Item = &'a str>,
{
    watchlist
        .into_iter()
        .chain(portfolio)
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
