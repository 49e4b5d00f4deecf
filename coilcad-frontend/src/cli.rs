use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use coilcad_config::{AppConfig, ExportFormat};
use coilcad_core::drawing::{DimensionStyle, SheetLayout};
use coilcad_core::params::CoilParameters;
use coilcad_engine::errors::EngineError;
use coilcad_engine::{LayoutOptions, generate_checked};
use coilcad_io::{DxfFacade, JsonFacade, SheetExporter, SvgFacade};

use crate::errors::FrontendError;
use crate::output::{output_dir_from_env, resolve_output_path};

/// 一次出图请求。
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub params: CoilParameters,
    /// 为空时使用配置中的格式。
    pub format: Option<ExportFormat>,
    pub output: Option<PathBuf>,
    /// 只校验并打印概要，不写文件。
    pub check_only: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Checked,
    Exported { path: PathBuf, format: ExportFormat },
}

/// 校验 → 布局 → 打印概要 → 导出。
pub fn run(request: &RunRequest, config: &AppConfig) -> Result<RunOutcome, FrontendError> {
    let layout = generate_checked(&request.params, &layout_options(config)).inspect_err(|err| {
        let EngineError::InvalidParameters { issues } = err;
        for issue in issues {
            warn!(issue = %issue, "参数不合法");
        }
    })?;
    for line in summary_lines(&layout) {
        println!("{line}");
    }

    if request.check_only {
        info!("仅校验模式，跳过导出");
        return Ok(RunOutcome::Checked);
    }

    let format = request.format.unwrap_or(config.export.format);
    let path = resolve_output_path(
        request.output.as_deref(),
        &config.export.output_dir,
        output_dir_from_env(),
        &layout.title_block.drawing_title,
        format,
    );
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| FrontendError::OutputDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    exporter_for(format, config.drafting.dimension).export(&layout, &path)?;
    info!(path = %path.display(), %format, "图纸已导出");
    Ok(RunOutcome::Exported { path, format })
}

pub fn layout_options(config: &AppConfig) -> LayoutOptions {
    LayoutOptions {
        view_gap: config.drafting.view_gap,
        dimension_style: config.drafting.dimension,
        company: config.title_block.clone(),
    }
}

pub fn exporter_for(format: ExportFormat, style: DimensionStyle) -> Box<dyn SheetExporter> {
    match format {
        ExportFormat::Dxf => Box::new(DxfFacade::with_style(style)),
        ExportFormat::Svg => Box::new(SvgFacade::with_style(style)),
        ExportFormat::Json => Box::new(JsonFacade::new()),
    }
}

/// 图纸概要：图名与各视图的位置、外框尺寸、图元与尺寸数量。
pub fn summary_lines(layout: &SheetLayout) -> Vec<String> {
    let mut lines = vec![format!("图名：{}", layout.title_block.drawing_title)];
    for view in &layout.views {
        let outer = view.geometry.outer_rect();
        lines.push(format!(
            "  - {}: 偏移=({:.1}, {:.1}), 外框={:.1} x {:.1}, 图元={}, 尺寸={}",
            view.label,
            view.offset.x(),
            view.offset.y(),
            outer.width,
            outer.height,
            view.geometry.primitives().len(),
            view.dimensions.len()
        ));
    }
    lines.push(format!(
        "技术要求 {} 行，标题栏位于 ({:.1}, {:.1})",
        layout.notes.notes_lines.len() + layout.notes.footer_lines.len(),
        layout.title_block_offset.x(),
        layout.title_block_offset.y()
    ));
    lines
}
