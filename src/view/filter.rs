use crate::report::UncoveredBin;

/// Bins whose `"{covergroup} {coverpoint} {bin}"` contains `query`,
/// ignoring case. An empty query keeps every row.
pub fn filter<'a>(bins: &'a [UncoveredBin], query: &str) -> Vec<&'a UncoveredBin> {
    if query.is_empty() {
        return bins.iter().collect();
    }
    let needle = query.to_lowercase();
    bins.iter()
        .filter(|bin| bin.search_text().to_lowercase().contains(&needle))
        .collect()
}
