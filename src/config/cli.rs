use super::TrackerConfig;
use crate::core::export::ExportFormat;
use crate::domain::model::{Carrier, FedExEnvironment};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "carrier-track")]
#[command(about = "Look up shipment status from carrier tracking APIs")]
pub struct CliConfig {
    #[arg(long, value_enum)]
    pub carrier: Carrier,

    #[arg(help = "Tracking numbers to look up, in order")]
    pub tracking_ids: Vec<String>,

    #[arg(long, help = "CSV file with a tracking_id column, or one id per line")]
    pub input_file: Option<String>,

    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Seconds to wait between lookups")]
    pub delay_seconds: Option<u64>,

    #[arg(long, help = "Request timeout in seconds")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Use the FedEx production environment")]
    pub production: bool,

    #[arg(long, help = "Directory for the exported summary")]
    pub output_path: Option<String>,

    #[arg(long, value_enum, value_delimiter = ',')]
    pub formats: Vec<ExportFormat>,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 命令列參數優先於設定檔與環境變數
    pub fn apply_overrides(&self, config: &mut TrackerConfig) {
        if let Some(delay) = self.delay_seconds {
            config.batch.delay_seconds = delay;
        }
        if let Some(timeout) = self.timeout_seconds {
            config.dhl.timeout_seconds = timeout;
            config.fedex.timeout_seconds = timeout;
        }
        if self.production {
            config.fedex.environment = FedExEnvironment::Production;
        }
        if let Some(path) = &self.output_path {
            config.output.output_path = Some(path.clone());
        }
        if !self.formats.is_empty() {
            config.output.formats = self.formats.clone();
        }
        if config.output.output_path.is_some() && config.output.formats.is_empty() {
            config.output.formats = vec![ExportFormat::Csv];
        }
    }
}
