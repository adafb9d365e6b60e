use anyhow::Result;

use crate::services::market_clock::MarketClock;

pub fn show_market_status(json: bool) -> Result<()> {
    let snapshot = MarketClock::now();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", snapshot);
    }
    Ok(())
}
