use crate::core::report::COLUMNS;
use crate::domain::model::{BatchSummary, Carrier, TrackingResult};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, TrackError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    carrier: Carrier,
    generated_at: String,
    rows: &'a [TrackingResult],
    failed: &'a [String],
}

/// 將批次結果寫出為 CSV / JSON 檔案
pub struct SummaryExporter<S: Storage> {
    storage: S,
    formats: Vec<ExportFormat>,
}

impl<S: Storage> SummaryExporter<S> {
    pub fn new(storage: S, formats: Vec<ExportFormat>) -> Self {
        Self { storage, formats }
    }

    pub fn filename(carrier: Carrier, format: ExportFormat, generated_at: DateTime<Utc>) -> String {
        format!(
            "tracking_summary_{}_{}.{}",
            carrier.slug(),
            generated_at.format("%Y%m%d_%H%M%S"),
            format.extension()
        )
    }

    /// 回傳寫出的檔名，順序與設定的格式一致
    pub async fn export(
        &self,
        carrier: Carrier,
        summary: &BatchSummary,
        generated_at: DateTime<Utc>,
    ) -> Result<Vec<String>> {
        let mut written = Vec::with_capacity(self.formats.len());

        for format in &self.formats {
            let data = match format {
                ExportFormat::Csv => to_csv(summary)?,
                ExportFormat::Json => to_json(carrier, summary, generated_at)?,
            };

            let filename = Self::filename(carrier, *format, generated_at);
            tracing::debug!("💾 Writing {} ({} bytes)", filename, data.len());
            self.storage.write_file(&filename, &data).await?;
            written.push(filename);
        }

        tracing::info!("💾 Exported summary to {} file(s)", written.len());
        Ok(written)
    }
}

pub fn to_csv(summary: &BatchSummary) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    // 即使沒有資料也輸出標題列
    writer.write_record(COLUMNS)?;
    for row in summary.rows() {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| TrackError::IoError(std::io::Error::new(std::io::ErrorKind::Other, e.to_string())))
}

pub fn to_json(
    carrier: Carrier,
    summary: &BatchSummary,
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>> {
    let document = ExportDocument {
        carrier,
        generated_at: generated_at.to_rfc3339(),
        rows: summary.rows(),
        failed: summary.failed(),
    };
    Ok(serde_json::to_vec_pretty(&document)?)
}
