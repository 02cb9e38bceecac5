use crate::domain::model::{BatchSummary, TrackingResult};
use std::fmt;

pub const COLUMNS: [&str; 4] = [
    "tracking_id",
    "status_description",
    "shipper_countryCode",
    "consignee_countryCode",
];

const ABSENT: &str = "None";

fn cells(row: &TrackingResult) -> [&str; 4] {
    [
        row.tracking_id.as_str(),
        row.status_description.as_deref().unwrap_or(ABSENT),
        row.shipper_country.as_deref().unwrap_or(ABSENT),
        row.consignee_country.as_deref().unwrap_or(ABSENT),
    ]
}

/// 以對齊欄位的文字表格呈現結果：第一欄為列索引，其餘欄位靠右
pub fn render_table(summary: &BatchSummary) -> String {
    if summary.is_empty() {
        return "Empty summary (no rows)".to_string();
    }

    let rows: Vec<[&str; 4]> = summary.rows().iter().map(cells).collect();

    let index_width = (rows.len() - 1).to_string().len();
    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);

    let mut header = " ".repeat(index_width);
    for (column, width) in COLUMNS.iter().zip(widths.iter()) {
        header.push_str(&format!("  {:>width$}", column, width = *width));
    }
    lines.push(header);

    for (index, row) in rows.iter().enumerate() {
        let mut line = format!("{:<width$}", index, width = index_width);
        for (cell, width) in row.iter().zip(widths.iter()) {
            line.push_str(&format!("  {:>width$}", cell, width = *width));
        }
        lines.push(line);
    }

    lines.join("\n")
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_table(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_with(rows: Vec<TrackingResult>) -> BatchSummary {
        let mut summary = BatchSummary::new();
        for row in rows {
            summary.push_row(row);
        }
        summary
    }

    #[test]
    fn test_render_empty_summary() {
        assert_eq!(render_table(&BatchSummary::new()), "Empty summary (no rows)");
    }

    #[test]
    fn test_render_aligned_table() {
        let summary = summary_with(vec![
            TrackingResult {
                tracking_id: "122816215025810".to_string(),
                status_description: Some("In transit".to_string()),
                shipper_country: Some("US".to_string()),
                consignee_country: Some("CA".to_string()),
            },
            TrackingResult::bare("020207021381215"),
        ]);

        let table = summary.to_string();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "       tracking_id  status_description  shipper_countryCode  consignee_countryCode"
        );
        assert_eq!(
            lines[1],
            "0  122816215025810          In transit                   US                     CA"
        );
        assert_eq!(
            lines[2],
            "1  020207021381215                None                 None                   None"
        );
        // 每一列寬度一致
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }

    #[test]
    fn test_index_column_grows_with_row_count() {
        let rows = (0..11)
            .map(|i| TrackingResult::bare(&format!("ID{}", i)))
            .collect();
        let table = render_table(&summary_with(rows));
        let last = table.lines().last().unwrap();

        assert!(last.starts_with("10  "));
        assert!(table.lines().nth(1).unwrap().starts_with("0   "));
    }
}
