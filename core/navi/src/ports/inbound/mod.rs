//! Inbound ポート: ドライバ（CLI）がパイプラインを呼び出すインターフェース

use common::error::Error;

use crate::domain::PipelineConfig;
use crate::usecase::pipeline::RunReport;

/// 取得 → 抽出 → マージ → 保存 → 描画 を 1 回実行する
pub trait RunPipeline: Send + Sync {
    fn run(&self, config: &PipelineConfig) -> Result<RunReport, Error>;
}
