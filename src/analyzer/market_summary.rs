use crate::analyzer::ranking::Ranking;
use crate::model::{AnalysisError, AssetRecord};

/// Trait defining the interface for a market snapshot analyzer.
pub trait Analyzer {
    fn analyze<'a>(&self, records: &'a [AssetRecord]) -> Result<AnalysisSummary<'a>, AnalysisError>;
}

/// Summary statistics for one cycle. Borrows from the cycle's records.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary<'a> {
    pub record_count: usize,
    /// Largest market caps first; upstream order among equal caps.
    pub top_by_market_cap: Vec<&'a AssetRecord>,
    /// `None` when no record has a numeric price.
    pub average_price: Option<f64>,
    /// `None` when no record has a coercible 24h change.
    pub highest_24h_change: Option<&'a AssetRecord>,
    pub lowest_24h_change: Option<&'a AssetRecord>,
}

pub struct AnalyzerImpl {
    top_n: usize,
}

impl AnalyzerImpl {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }
}

impl Analyzer for AnalyzerImpl {
    fn analyze<'a>(&self, records: &'a [AssetRecord]) -> Result<AnalysisSummary<'a>, AnalysisError> {
        if records.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        Ok(AnalysisSummary {
            record_count: records.len(),
            top_by_market_cap: Ranking::top_n_by(records, self.top_n, |r| r.market_cap),
            average_price: Ranking::mean_by(records, |r| r.current_price),
            highest_24h_change: Ranking::max_by(records, |r| r.price_change_percentage_24h),
            lowest_24h_change: Ranking::min_by(records, |r| r.price_change_percentage_24h),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{MarketParser, Parser};

    fn three_coins() -> Vec<AssetRecord> {
        MarketParser::new()
            .parse(
                r#"[
                {"name":"Bitcoin","symbol":"btc","current_price":60000,"market_cap":1.2e12,"price_change_percentage_24h":"2.5"},
                {"name":"Ether","symbol":"eth","current_price":3000,"market_cap":4e11,"price_change_percentage_24h":"-1.0"},
                {"name":"Coin3","symbol":"c3","current_price":1,"market_cap":1e9,"price_change_percentage_24h":"bad"}
            ]"#,
            )
            .unwrap()
    }

    #[test]
    fn three_coin_scenario() {
        let records = three_coins();
        let summary = AnalyzerImpl::new(5).analyze(&records).unwrap();

        let top: Vec<&str> = summary.top_by_market_cap.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(top, ["Bitcoin", "Ether", "Coin3"]);

        let avg = summary.average_price.unwrap();
        assert!((avg - 20333.666_666).abs() < 1e-3);
        assert_eq!(format!("{:.2}", avg), "20333.67");

        let high = summary.highest_24h_change.unwrap();
        assert_eq!(high.name, "Bitcoin");
        assert_eq!(high.price_change_percentage_24h, Some(2.5));

        let low = summary.lowest_24h_change.unwrap();
        assert_eq!(low.name, "Ether");
        assert_eq!(low.price_change_percentage_24h, Some(-1.0));
    }

    #[test]
    fn top_n_is_capped() {
        let records = three_coins();
        let summary = AnalyzerImpl::new(2).analyze(&records).unwrap();
        assert_eq!(summary.top_by_market_cap.len(), 2);
        assert_eq!(summary.record_count, 3);
    }

    #[test]
    fn single_record_average_is_exact() {
        let records = three_coins();
        let summary = AnalyzerImpl::new(5).analyze(&records[1..2]).unwrap();
        assert_eq!(summary.average_price, Some(3000.0));
    }

    #[test]
    fn all_missing_changes_give_no_extremes() {
        let records = three_coins();
        let summary = AnalyzerImpl::new(5).analyze(&records[2..]).unwrap();
        assert!(summary.highest_24h_change.is_none());
        assert!(summary.lowest_24h_change.is_none());
        // still ranked by cap
        assert_eq!(summary.top_by_market_cap.len(), 1);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(AnalyzerImpl::new(5).analyze(&[]), Err(AnalysisError::EmptyInput));
    }
}
