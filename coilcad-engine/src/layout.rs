//! 图纸布局（第三角投影）：
//!
//! ```text
//!                          TOP
//!     HEADER SIDE  |  FRONT  |  RETURN END SIDE
//!     NOTE:                     TITLE BLOCK
//! ```
//!
//! 俯视图与主视图左对齐；下排三视图自左向右累加宽度与间隔。

use tracing::info;

use coilcad_core::drawing::{
    CompanyInfo, DimensionStyle, SheetLayout, ViewDescriptor, ViewGeometry, ViewKind,
};
use coilcad_core::geometry::Vector2;
use coilcad_core::params::{self, CoilParameters};

use crate::dimension::DimensionEngine;
use crate::errors::EngineError;
use crate::notes;
use crate::views;

pub const DEFAULT_VIEW_GAP: f64 = 80.0;

/// 布局可调项。
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub view_gap: f64,
    pub dimension_style: DimensionStyle,
    pub company: CompanyInfo,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            view_gap: DEFAULT_VIEW_GAP,
            dimension_style: DimensionStyle::default(),
            company: CompanyInfo::default(),
        }
    }
}

/// 使用默认选项生成整张图纸。调用前应先确认 [`params::validate`] 返回空列表。
pub fn generate_layout(params: &CoilParameters) -> SheetLayout {
    generate_layout_with(params, &LayoutOptions::default())
}

/// 先校验再生成；存在任何违规时返回完整的问题列表。
pub fn generate_checked(
    params: &CoilParameters,
    options: &LayoutOptions,
) -> Result<SheetLayout, EngineError> {
    let issues = params::validate(params);
    if !issues.is_empty() {
        return Err(EngineError::InvalidParameters { issues });
    }
    Ok(generate_layout_with(params, options))
}

pub fn generate_layout_with(params: &CoilParameters, options: &LayoutOptions) -> SheetLayout {
    let engine = DimensionEngine::new(options.dimension_style);
    let gap = options.view_gap;

    let top = views::generate(ViewKind::Top, params);
    let header = views::generate(ViewKind::HeaderSide, params);
    let front = views::generate(ViewKind::Front, params);
    let return_end = views::generate(ViewKind::ReturnEnd, params);

    let top_h = top.outer_rect().height;
    let header_w = header.outer_rect().width;
    let front_w = front.outer_rect().width;
    let tallest = [&header, &front, &return_end]
        .iter()
        .map(|geometry| geometry.outer_rect().height)
        .fold(f64::NEG_INFINITY, f64::max);

    let bottom_y = top_h + gap;
    let header_x = 0.0;
    let front_x = header_w + gap;
    let return_x = front_x + front_w + gap;
    let notes_y = bottom_y + tallest + gap / 2.0;

    let views = vec![
        describe(&engine, top, Vector2::new(front_x, 0.0)),
        describe(&engine, header, Vector2::new(header_x, bottom_y)),
        describe(&engine, front, Vector2::new(front_x, bottom_y)),
        describe(&engine, return_end, Vector2::new(return_x, bottom_y)),
    ];

    info!(
        title = %params.drawing_title(),
        front_x,
        return_x,
        bottom_y,
        notes_y,
        "图纸布局已生成"
    );

    SheetLayout {
        views,
        notes: notes::notes(params),
        title_block: notes::title_block(params, &options.company),
        notes_offset: Vector2::new(header_x, notes_y),
        title_block_offset: Vector2::new(return_x, notes_y),
    }
}

fn describe(engine: &DimensionEngine, geometry: ViewGeometry, offset: Vector2) -> ViewDescriptor {
    let dimensions = engine.for_view(&geometry);
    ViewDescriptor {
        label: geometry.kind().label().to_string(),
        offset,
        geometry,
        dimensions,
    }
}
