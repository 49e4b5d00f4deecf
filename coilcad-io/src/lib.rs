use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use coilcad_core::drawing::SheetLayout;

mod dxf;
mod sheet;
mod svg;

pub use dxf::DxfFacade;
pub use sheet::{SheetEntity, Shape, TextAlign, TextItem, sheet_entities};
pub use svg::SvgFacade;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to write file {path:?}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialise sheet: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 把整张图纸写入目标文件。实现者只负责格式，不做任何几何计算。
pub trait SheetExporter {
    fn export(&self, layout: &SheetLayout, path: &Path) -> Result<(), IoError>;
}

/// 以 JSON 形式原样输出 `SheetLayout`，便于下游程序或回归比对。
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFacade;

impl JsonFacade {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, layout: &SheetLayout) -> Result<String, IoError> {
        Ok(serde_json::to_string_pretty(layout)?)
    }
}

impl SheetExporter for JsonFacade {
    fn export(&self, layout: &SheetLayout, path: &Path) -> Result<(), IoError> {
        let data = self.render(layout)?;
        write_file(path, &data)
    }
}

pub(crate) fn write_file(path: &Path, data: &str) -> Result<(), IoError> {
    fs::write(path, data).map_err(|source| IoError::WriteError {
        path: path.to_path_buf(),
        source,
    })
}
