//! 换热器盘管的参数模型与校验。
//!
//! 图名模板：`管径 x FL x FH x NR x TPR x FPI x NC - 接管侧`，
//! 例如 `5/8"x1330FLx1400FHx6Rx35TPRx13FPIx35NC - LHS`。

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// 进出水接管所在的一侧。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ConnectionSide {
    #[default]
    #[serde(rename = "LHS")]
    Lhs,
    #[serde(rename = "RHS")]
    Rhs,
}

impl ConnectionSide {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionSide::Lhs => "LHS",
            ConnectionSide::Rhs => "RHS",
        }
    }
}

impl fmt::Display for ConnectionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown connection side `{0}`, expected LHS or RHS")]
pub struct ParseSideError(pub String);

impl FromStr for ConnectionSide {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LHS" => Ok(ConnectionSide::Lhs),
            "RHS" => Ok(ConnectionSide::Rhs),
            _ => Err(ParseSideError(s.to_string())),
        }
    }
}

/// 一台盘管的全部尺寸输入（毫米）。每次出图视为不可变快照，任何组件都不修改它。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoilParameters {
    /// FL
    pub fin_length: f64,
    /// FH
    pub fin_height: f64,

    /// NR，沿厚度方向的管排数。
    pub no_of_rows: u32,
    /// TPR，沿高度方向每排的管数。
    pub tubes_per_row: u32,

    /// 仅用于显示的英制管径，例如 `5/8`。
    pub tube_od_inch: String,
    pub tube_diameter: f64,

    pub fpi: u32,
    /// NC
    pub no_of_circuits: u32,

    /// 翅片顶边到最上一根管中心的距离。
    pub top_plate: f64,
    /// 翅片底边到最下一根管中心的距离。
    pub bottom_plate: f64,

    pub casing_left: f64,
    pub casing_right: f64,
    pub casing_top: f64,
    pub casing_bottom: f64,
    pub casing_thickness: f64,

    pub coil_depth: f64,
    pub header_depth: f64,
    pub return_depth: f64,

    pub connection_side: ConnectionSide,
    /// 俯视图中接管伸出机壳的长度。
    pub connection_extension: f64,
    /// 俯视图中 IN/OUT 接管的中心距。
    pub connection_vertical_gap: f64,

    pub top_header_block_length: f64,
    pub top_return_extension: f64,
    pub top_right_step: f64,
    pub top_pipe_fitting_outer_offset: f64,
    pub top_pipe_fitting_inner_offset: f64,
    pub top_pipe_stub_center_offset: f64,
    pub top_pipe_stub_spacing: f64,

    /// 主视图左侧参考尺寸在底板距离之上追加的长度。
    pub front_left_reference_extra: f64,

    pub fin_material: String,
    pub fin_thickness: f64,
    pub tube_wall_thickness: f64,
}

impl Default for CoilParameters {
    fn default() -> Self {
        Self {
            fin_length: 1330.0,
            fin_height: 1400.0,
            no_of_rows: 6,
            tubes_per_row: 35,
            tube_od_inch: "5/8".to_string(),
            tube_diameter: 15.875,
            fpi: 13,
            no_of_circuits: 35,
            top_plate: 65.0,
            bottom_plate: 35.0,
            casing_left: 35.0,
            casing_right: 65.0,
            casing_top: 15.0,
            casing_bottom: 15.0,
            casing_thickness: 1.5,
            coil_depth: 207.6,
            header_depth: 320.0,
            return_depth: 320.0,
            connection_side: ConnectionSide::Lhs,
            connection_extension: 170.0,
            connection_vertical_gap: 75.0,
            top_header_block_length: 180.0,
            top_return_extension: 145.0,
            top_right_step: 12.0,
            top_pipe_fitting_outer_offset: 50.0,
            top_pipe_fitting_inner_offset: 25.0,
            top_pipe_stub_center_offset: 50.0,
            top_pipe_stub_spacing: 12.0,
            front_left_reference_extra: 150.0,
            fin_material: "Plain Aluminium".to_string(),
            fin_thickness: 0.11,
            tube_wall_thickness: 0.4,
        }
    }
}

impl CoilParameters {
    #[inline]
    pub fn casing_width(&self) -> f64 {
        self.casing_left + self.fin_length + self.casing_right
    }

    #[inline]
    pub fn casing_height(&self) -> f64 {
        self.casing_bottom + self.fin_height + self.casing_top
    }

    /// VP = 可用高度 / (TPR - 1)；TPR ≤ 1 时为 0。
    pub fn vertical_pitch(&self) -> f64 {
        if self.tubes_per_row <= 1 {
            return 0.0;
        }
        (self.fin_height - self.top_plate - self.bottom_plate) / f64::from(self.tubes_per_row - 1)
    }

    /// 管排之间沿厚度方向的间距；NR ≤ 1 时为 0。
    pub fn row_pitch(&self) -> f64 {
        if self.no_of_rows <= 1 {
            return 0.0;
        }
        self.coil_depth / f64::from(self.no_of_rows)
    }

    /// 侧视图高度 = TPR × VP + 顶板 + 底板。
    ///
    /// 与 [`casing_height`](Self::casing_height) 独立计算，两者不保证一致。
    pub fn side_view_height(&self) -> f64 {
        f64::from(self.tubes_per_row) * self.vertical_pitch() + self.top_plate + self.bottom_plate
    }

    /// 俯视图中盘管芯体在集管深度内居中后，上下各留出的余量。
    #[inline]
    pub fn depth_margin(&self) -> f64 {
        (self.header_depth - self.coil_depth) / 2.0
    }

    #[inline]
    pub fn tube_radius(&self) -> f64 {
        self.tube_diameter / 2.0
    }

    pub fn drawing_title(&self) -> String {
        format!(
            "{}\"x{:.0}FLx{:.0}FHx{}Rx{}TPRx{}FPIx{}NC - {}",
            self.tube_od_inch,
            self.fin_length,
            self.fin_height,
            self.no_of_rows,
            self.tubes_per_row,
            self.fpi,
            self.no_of_circuits,
            self.connection_side
        )
    }

    /// 必须严格为正的尺寸字段，顺序即报告顺序。
    fn positive_fields(&self) -> [(&'static str, f64); 20] {
        [
            ("fin_length", self.fin_length),
            ("fin_height", self.fin_height),
            ("tube_diameter", self.tube_diameter),
            ("casing_top", self.casing_top),
            ("casing_bottom", self.casing_bottom),
            ("casing_left", self.casing_left),
            ("casing_right", self.casing_right),
            ("casing_thickness", self.casing_thickness),
            ("coil_depth", self.coil_depth),
            ("header_depth", self.header_depth),
            ("connection_extension", self.connection_extension),
            ("connection_vertical_gap", self.connection_vertical_gap),
            ("top_header_block_length", self.top_header_block_length),
            ("top_return_extension", self.top_return_extension),
            ("top_right_step", self.top_right_step),
            (
                "top_pipe_fitting_outer_offset",
                self.top_pipe_fitting_outer_offset,
            ),
            (
                "top_pipe_fitting_inner_offset",
                self.top_pipe_fitting_inner_offset,
            ),
            ("top_pipe_stub_center_offset", self.top_pipe_stub_center_offset),
            ("top_pipe_stub_spacing", self.top_pipe_stub_spacing),
            ("front_left_reference_extra", self.front_left_reference_extra),
        ]
    }

    fn count_fields(&self) -> [(&'static str, u32); 3] {
        [
            ("no_of_rows", self.no_of_rows),
            ("tubes_per_row", self.tubes_per_row),
            ("fpi", self.fpi),
        ]
    }

    /// 逐条检查全部约束，不在第一处失败时停止。
    pub fn issues(&self) -> Vec<ParameterIssue> {
        let mut issues = Vec::new();
        for (field, value) in self.positive_fields() {
            // NaN 同样视为非正数。
            if !(value > 0.0) {
                issues.push(ParameterIssue::NotPositive { field });
            }
        }
        for (field, value) in self.count_fields() {
            if value < 1 {
                issues.push(ParameterIssue::BelowOne { field });
            }
        }
        if self.top_plate + self.bottom_plate >= self.fin_height {
            issues.push(ParameterIssue::PlatesExceedFinHeight);
        }
        issues
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.issues().is_empty()
    }
}

/// 单条参数违规。`Display` 即面向用户的提示文字。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParameterIssue {
    #[error("{field} must be positive")]
    NotPositive { field: &'static str },
    #[error("{field} must be >= 1")]
    BelowOne { field: &'static str },
    #[error("Top plate + Bottom plate must be < Fin Height")]
    PlatesExceedFinHeight,
}

impl ParameterIssue {
    /// 违规所涉及的字段名；板距约束涉及多个字段时返回 `None`。
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ParameterIssue::NotPositive { field } | ParameterIssue::BelowOne { field } => {
                Some(field)
            }
            ParameterIssue::PlatesExceedFinHeight => None,
        }
    }
}

/// 返回每条违规的提示文字；空列表表示参数可用于出图。
pub fn validate(params: &CoilParameters) -> Vec<String> {
    params
        .issues()
        .iter()
        .map(ToString::to_string)
        .collect()
}
