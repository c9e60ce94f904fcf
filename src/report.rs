// Plain-text rendering of a cycle's analysis
use crate::analyzer::AnalysisSummary;
use crate::model::AssetRecord;
use crate::utils::group_thousands;
use chrono::{DateTime, Utc};
use std::fmt::Write;

pub fn render_summary(summary: &AnalysisSummary<'_>, at: DateTime<Utc>) -> String {
    let mut out = String::new();
    // writeln! into a String cannot fail
    let _ = writeln!(out, "Analysis ({}, {} assets):", at.format("%Y-%m-%d %H:%M:%S UTC"), summary.record_count);

    let _ = writeln!(out, "  Top {} by Market Cap:", summary.top_by_market_cap.len());
    for (rank, record) in summary.top_by_market_cap.iter().enumerate() {
        let _ = writeln!(
            out,
            "    {}. {:<20} {:<8} {:>22}",
            rank + 1,
            record.name,
            record.symbol,
            record.market_cap.map(|c| group_thousands(c, 0)).unwrap_or_default()
        );
    }

    let average = summary
        .average_price
        .map(|p| group_thousands(p, 2))
        .unwrap_or_else(|| "no data".to_string());
    let _ = writeln!(out, "  Average Price: {}", average);
    let _ = writeln!(out, "  Highest 24h Change: {}", describe_change(summary.highest_24h_change));
    let _ = writeln!(out, "  Lowest 24h Change: {}", describe_change(summary.lowest_24h_change));
    out
}

fn describe_change(record: Option<&AssetRecord>) -> String {
    match record.and_then(|r| r.price_change_percentage_24h.map(|c| (r, c))) {
        Some((r, change)) => format!("{} {:+.2}%", r, change),
        None => "no data".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{Analyzer, AnalyzerImpl};
    use crate::parser::{MarketParser, Parser};
    use chrono::TimeZone;

    #[test]
    fn renders_all_sections() {
        let records = MarketParser::new()
            .parse(
                r#"[
                {"name":"Bitcoin","symbol":"btc","current_price":60000,"market_cap":1.2e12,"price_change_percentage_24h":"2.5"},
                {"name":"Ether","symbol":"eth","current_price":3000,"market_cap":4e11,"price_change_percentage_24h":"-1.0"},
                {"name":"Coin3","symbol":"c3","current_price":1,"market_cap":1e9,"price_change_percentage_24h":"bad"}
            ]"#,
            )
            .unwrap();
        let summary = AnalyzerImpl::new(5).analyze(&records).unwrap();
        let at = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();

        let text = render_summary(&summary, at);
        assert!(text.starts_with("Analysis (2026-10-17 12:00:00 UTC, 3 assets):"));
        assert!(text.contains("Top 3 by Market Cap:"));
        assert!(text.contains("1,200,000,000,000"));
        assert!(text.contains("Average Price: 20,333.67"));
        assert!(text.contains("Highest 24h Change: Bitcoin (BTC) +2.50%"));
        assert!(text.contains("Lowest 24h Change: Ether (ETH) -1.00%"));
        assert!(!text.contains("Coin3 (C3)"));
    }

    #[test]
    fn missing_changes_render_as_no_data() {
        let records = MarketParser::new()
            .parse(r#"[{"name":"Coin3","symbol":"c3","current_price":1,"market_cap":1e9,"price_change_percentage_24h":null}]"#)
            .unwrap();
        let summary = AnalyzerImpl::new(5).analyze(&records).unwrap();
        let text = render_summary(&summary, Utc::now());
        assert!(text.contains("Highest 24h Change: no data"));
        assert!(text.contains("Lowest 24h Change: no data"));
    }
}
