use crate::model::AssetRecord;

pub struct Ranking;

impl Ranking {
    /// The `n` records with the largest `key`, descending. Records without a
    /// value are skipped; ties keep input order.
    pub fn top_n_by<'a, F>(records: &'a [AssetRecord], n: usize, key: F) -> Vec<&'a AssetRecord>
    where
        F: Fn(&AssetRecord) -> Option<f64>,
    {
        let mut ranked: Vec<(f64, &AssetRecord)> = records
            .iter()
            .filter_map(|r| key(r).map(|v| (v, r)))
            .collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        ranked.into_iter().take(n).map(|(_, r)| r).collect()
    }

    /// Unweighted mean over the records that carry a value.
    pub fn mean_by<F>(records: &[AssetRecord], key: F) -> Option<f64>
    where
        F: Fn(&AssetRecord) -> Option<f64>,
    {
        let values: Vec<f64> = records.iter().filter_map(key).collect();
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// First record holding the maximum value.
    pub fn max_by<'a, F>(records: &'a [AssetRecord], key: F) -> Option<&'a AssetRecord>
    where
        F: Fn(&AssetRecord) -> Option<f64>,
    {
        Self::extreme_by(records, key, |candidate, best| candidate > best)
    }

    /// First record holding the minimum value.
    pub fn min_by<'a, F>(records: &'a [AssetRecord], key: F) -> Option<&'a AssetRecord>
    where
        F: Fn(&AssetRecord) -> Option<f64>,
    {
        Self::extreme_by(records, key, |candidate, best| candidate < best)
    }

    fn extreme_by<'a, F, B>(records: &'a [AssetRecord], key: F, beats: B) -> Option<&'a AssetRecord>
    where
        F: Fn(&AssetRecord) -> Option<f64>,
        B: Fn(f64, f64) -> bool,
    {
        let mut best: Option<(f64, &AssetRecord)> = None;
        for record in records {
            let Some(value) = key(record) else { continue };
            match best {
                Some((current, _)) if !beats(value, current) => {}
                _ => best = Some((value, record)),
            }
        }
        best.map(|(_, r)| r)
    }
}
