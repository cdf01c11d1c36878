//! Measurement result domain types

use serde::{Deserialize, Serialize};

/// Header aliases per field, localized name first. The first header present
/// in the artifact wins.
pub const ADDRESS_COLUMNS: &[&str] = &["IP 地址", "ip"];
pub const THROUGHPUT_COLUMNS: &[&str] = &["下载速度(MB/s)", "speed"];
pub const LATENCY_COLUMNS: &[&str] = &["平均延迟", "latency"];
pub const REGION_COLUMNS: &[&str] = &["地区码", "region"];
pub const LOSS_COLUMNS: &[&str] = &["丢包率", "loss"];

/// One measured endpoint, normalized to a fixed schema
///
/// Columns missing from a given artifact version are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultRow {
    #[serde(rename = "ip")]
    pub address: String,
    #[serde(rename = "speed")]
    pub throughput: String,
    pub latency: String,
    #[serde(rename = "region")]
    pub region_code: String,
    #[serde(rename = "loss")]
    pub loss_rate: String,
}

impl ResultRow {
    /// Projects one record of the results table onto the fixed schema
    ///
    /// `headers` and `cells` are positional; a record shorter than the header
    /// row yields empty strings for the missing cells.
    pub fn from_record(headers: &[String], cells: &[String]) -> Self {
        let pick = |aliases: &[&str]| -> String {
            aliases
                .iter()
                .find_map(|alias| headers.iter().position(|h| h.trim() == *alias))
                .and_then(|idx| cells.get(idx))
                .map(|cell| cell.trim().to_string())
                .unwrap_or_default()
        };

        Self {
            address: pick(ADDRESS_COLUMNS),
            throughput: pick(THROUGHPUT_COLUMNS),
            latency: pick(LATENCY_COLUMNS),
            region_code: pick(REGION_COLUMNS),
            loss_rate: pick(LOSS_COLUMNS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_localized_headers() {
        let headers = strings(&["IP 地址", "已发送", "丢包率", "平均延迟", "下载速度(MB/s)", "地区码"]);
        let cells = strings(&["104.16.1.1", "4", "0.00", "120.5", "18.2", "HKG"]);

        let row = ResultRow::from_record(&headers, &cells);
        assert_eq!(row.address, "104.16.1.1");
        assert_eq!(row.throughput, "18.2");
        assert_eq!(row.latency, "120.5");
        assert_eq!(row.region_code, "HKG");
        assert_eq!(row.loss_rate, "0.00");
    }

    #[test]
    fn test_english_fallback_and_missing_columns() {
        let headers = strings(&["ip", "speed", "latency"]);
        let cells = strings(&["1.1.1.1", "9.9", "80"]);

        let row = ResultRow::from_record(&headers, &cells);
        assert_eq!(row.address, "1.1.1.1");
        assert_eq!(row.throughput, "9.9");
        assert_eq!(row.latency, "80");
        assert_eq!(row.region_code, "");
        assert_eq!(row.loss_rate, "");
    }

    #[test]
    fn test_localized_header_wins_over_english() {
        let headers = strings(&["ip", "IP 地址"]);
        let cells = strings(&["english", "localized"]);

        assert_eq!(ResultRow::from_record(&headers, &cells).address, "localized");
    }

    #[test]
    fn test_short_record() {
        let headers = strings(&["ip", "speed", "region"]);
        let cells = strings(&["2.2.2.2"]);

        let row = ResultRow::from_record(&headers, &cells);
        assert_eq!(row.address, "2.2.2.2");
        assert_eq!(row.throughput, "");
        assert_eq!(row.region_code, "");
    }

    #[test]
    fn test_serializes_with_dashboard_keys() {
        let row = ResultRow {
            address: "a".into(),
            throughput: "b".into(),
            latency: "c".into(),
            region_code: "d".into(),
            loss_rate: "e".into(),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"ip": "a", "speed": "b", "latency": "c", "region": "d", "loss": "e"})
        );
    }
}
