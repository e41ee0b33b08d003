//! Static table of divisional charts and their API endpoints

use serde::Serialize;
use thiserror::Error;

/// One selectable chart and the endpoint path serving it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    pub id: &'static str,
    pub endpoint: &'static str,
    /// Part of the selection used when none is given
    pub default_selected: bool,
}

const fn chart(id: &'static str, endpoint: &'static str, default_selected: bool) -> ChartSpec {
    ChartSpec {
        id,
        endpoint,
        default_selected,
    }
}

pub const CHARTS: &[ChartSpec] = &[
    chart("D1 (Rasi Chart)", "planets", true),
    chart("Planets Extended Info", "planets/extended", true),
    chart("D2 (Hora Chart)", "d2-chart-info", false),
    chart("D3 (Drekkana Chart)", "d3-chart-info", false),
    chart("D4 (Chaturthamsa Chart)", "d4-chart-info", false),
    chart("D5 (Panchamsa Chart)", "d5-chart-info", false),
    chart("D6 (Shasthamsa Chart)", "d6-chart-info", false),
    chart("D7 (Saptamsa Chart)", "d7-chart-info", false),
    chart("D8 (Ashtamsa Chart)", "d8-chart-info", false),
    chart("D9 (Navamsa Chart)", "navamsa-chart-info", true),
    chart("D10 (Dasamsa Chart)", "d10-chart-info", true),
    chart("D11 (Rudramsa Chart)", "d11-chart-info", false),
    chart("D12 (Dwadasamsa Chart)", "d12-chart-info", false),
    chart("D16 (Shodasamsa Chart)", "d16-chart-info", false),
    chart("D20 (Vimsamsa Chart)", "d20-chart-info", false),
    chart("D24 (Siddhamsa Chart)", "d24-chart-info", false),
    chart("D27 (Nakshatramsa Chart)", "d27-chart-info", false),
    chart("D30 (Trimsamsa Chart)", "d30-chart-info", false),
    chart("D40 (Khavedamsa Chart)", "d40-chart-info", false),
    chart("D45 (Akshavedamsa Chart)", "d45-chart-info", false),
    chart("D60 (Shashtyamsa Chart)", "d60-chart-info", false),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("unknown chart: {0}")]
    UnknownChart(String),
    #[error("Select at least one chart.")]
    Empty,
}

/// Look up a chart by full identifier, short code (`D9`) or endpoint path
pub fn find(query: &str) -> Option<&'static ChartSpec> {
    let query = query.trim();
    CHARTS
        .iter()
        .find(|c| c.id == query)
        .or_else(|| {
            CHARTS.iter().find(|c| {
                c.endpoint.eq_ignore_ascii_case(query)
                    || short_code(c).is_some_and(|code| code.eq_ignore_ascii_case(query))
            })
        })
}

/// `D9` for `D9 (Navamsa Chart)`; `None` for charts without a D-number
fn short_code(chart: &ChartSpec) -> Option<&'static str> {
    let code = chart.id.split_whitespace().next()?;
    let digits = code.strip_prefix('D')?;
    (!digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())).then_some(code)
}

pub fn endpoint_for(id: &str) -> Option<&'static str> {
    CHARTS.iter().find(|c| c.id == id).map(|c| c.endpoint)
}

pub fn default_selection() -> Vec<&'static ChartSpec> {
    CHARTS.iter().filter(|c| c.default_selected).collect()
}

/// Resolve user-supplied chart names, keeping their order and dropping repeats
pub fn resolve_selection<S: AsRef<str>>(
    queries: &[S],
) -> Result<Vec<&'static ChartSpec>, SelectionError> {
    let mut selected: Vec<&'static ChartSpec> = Vec::with_capacity(queries.len());

    for query in queries {
        let query = query.as_ref();
        let chart = find(query).ok_or_else(|| SelectionError::UnknownChart(query.to_string()))?;
        if !selected.iter().any(|c| c.id == chart.id) {
            selected.push(chart);
        }
    }

    if selected.is_empty() {
        return Err(SelectionError::Empty);
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_unique_ids_and_endpoints() {
        assert_eq!(CHARTS.len(), 21);
        for (i, a) in CHARTS.iter().enumerate() {
            for b in &CHARTS[i + 1..] {
                assert_ne!(a.id, b.id);
                assert_ne!(a.endpoint, b.endpoint);
            }
        }
    }

    #[test]
    fn test_endpoint_lookup() {
        assert_eq!(endpoint_for("D9 (Navamsa Chart)"), Some("navamsa-chart-info"));
        assert_eq!(endpoint_for("Planets Extended Info"), Some("planets/extended"));
        assert_eq!(endpoint_for("D9"), None);
    }

    #[test]
    fn test_find_accepts_short_codes_and_endpoints() {
        assert_eq!(find("d9").map(|c| c.id), Some("D9 (Navamsa Chart)"));
        assert_eq!(find("D1").map(|c| c.id), Some("D1 (Rasi Chart)"));
        assert_eq!(find("planets/extended").map(|c| c.id), Some("Planets Extended Info"));
        assert_eq!(find("D10 (Dasamsa Chart)").map(|c| c.endpoint), Some("d10-chart-info"));
        assert!(find("D13").is_none());
    }

    #[test]
    fn test_default_selection_matches_flags() {
        let ids: Vec<_> = default_selection().iter().map(|c| c.id).collect();
        assert_eq!(
            ids,
            vec![
                "D1 (Rasi Chart)",
                "Planets Extended Info",
                "D9 (Navamsa Chart)",
                "D10 (Dasamsa Chart)"
            ]
        );
    }

    #[test]
    fn test_resolve_keeps_input_order_and_drops_repeats() {
        let selected = resolve_selection(&["D60", "D2", "d60", "D1 (Rasi Chart)"]).unwrap();
        let ids: Vec<_> = selected.iter().map(|c| c.id).collect();
        assert_eq!(
            ids,
            vec!["D60 (Shashtyamsa Chart)", "D2 (Hora Chart)", "D1 (Rasi Chart)"]
        );
    }

    #[test]
    fn test_resolve_rejects_unknown_and_empty() {
        assert_eq!(
            resolve_selection(&["D99"]),
            Err(SelectionError::UnknownChart("D99".to_string()))
        );
        assert_eq!(resolve_selection::<&str>(&[]), Err(SelectionError::Empty));
    }
}
