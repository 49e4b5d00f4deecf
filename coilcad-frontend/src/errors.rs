use std::path::PathBuf;

use thiserror::Error;

use coilcad_engine::errors::EngineError;
use coilcad_io::IoError;

#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("盘管参数校验失败，共 {} 项：{}", issues.len(), issues.join("; "))]
    InvalidParameters { issues: Vec<String> },
    #[error("无法创建输出目录 {path:?}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("导出图纸失败: {0}")]
    Export(#[from] IoError),
}

impl From<EngineError> for FrontendError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidParameters { issues } => FrontendError::InvalidParameters { issues },
        }
    }
}
