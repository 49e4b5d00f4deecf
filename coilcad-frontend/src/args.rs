use clap::Args;

use coilcad_core::params::{CoilParameters, ConnectionSide};

/// 逐项覆盖默认盘管参数的命令行选项；未给出的字段保持默认值。
#[derive(Debug, Clone, Default, Args)]
#[command(next_help_heading = "盘管参数")]
pub struct ParameterArgs {
    /// 翅片长度 FL（mm）
    #[arg(long, value_name = "MM")]
    pub fin_length: Option<f64>,
    /// 翅片高度 FH（mm）
    #[arg(long, value_name = "MM")]
    pub fin_height: Option<f64>,
    /// 管排数 NR
    #[arg(long = "rows", value_name = "N")]
    pub no_of_rows: Option<u32>,
    /// 每排管数 TPR
    #[arg(long, value_name = "N")]
    pub tubes_per_row: Option<u32>,
    /// 英制管径，仅用于图名与技术要求，例如 5/8
    #[arg(long = "tube-od", value_name = "INCH")]
    pub tube_od_inch: Option<String>,
    #[arg(long, value_name = "MM")]
    pub tube_diameter: Option<f64>,
    /// 每英寸翅片数
    #[arg(long, value_name = "N")]
    pub fpi: Option<u32>,
    /// 回路数 NC
    #[arg(long = "circuits", value_name = "N")]
    pub no_of_circuits: Option<u32>,
    #[arg(long, value_name = "MM")]
    pub top_plate: Option<f64>,
    #[arg(long, value_name = "MM")]
    pub bottom_plate: Option<f64>,
    #[arg(long, value_name = "MM")]
    pub casing_left: Option<f64>,
    #[arg(long, value_name = "MM")]
    pub casing_right: Option<f64>,
    #[arg(long, value_name = "MM")]
    pub casing_top: Option<f64>,
    #[arg(long, value_name = "MM")]
    pub casing_bottom: Option<f64>,
    #[arg(long, value_name = "MM")]
    pub casing_thickness: Option<f64>,
    #[arg(long, value_name = "MM")]
    pub coil_depth: Option<f64>,
    #[arg(long, value_name = "MM")]
    pub header_depth: Option<f64>,
    #[arg(long, value_name = "MM")]
    pub return_depth: Option<f64>,
    /// 接管侧：LHS 或 RHS
    #[arg(long = "side", value_name = "LHS|RHS")]
    pub connection_side: Option<ConnectionSide>,
    #[arg(long, value_name = "MM")]
    pub connection_extension: Option<f64>,
    #[arg(long, value_name = "MM")]
    pub connection_vertical_gap: Option<f64>,
    #[arg(long, value_name = "MM")]
    pub top_header_block_length: Option<f64>,
    #[arg(long, value_name = "MM")]
    pub top_return_extension: Option<f64>,
    #[arg(long, value_name = "MM")]
    pub top_right_step: Option<f64>,
    #[arg(long, value_name = "MM")]
    pub top_pipe_fitting_outer_offset: Option<f64>,
    #[arg(long, value_name = "MM")]
    pub top_pipe_fitting_inner_offset: Option<f64>,
    #[arg(long, value_name = "MM")]
    pub top_pipe_stub_center_offset: Option<f64>,
    #[arg(long, value_name = "MM")]
    pub top_pipe_stub_spacing: Option<f64>,
    #[arg(long, value_name = "MM")]
    pub front_left_reference_extra: Option<f64>,
    #[arg(long, value_name = "TEXT")]
    pub fin_material: Option<String>,
    #[arg(long, value_name = "MM")]
    pub fin_thickness: Option<f64>,
    #[arg(long, value_name = "MM")]
    pub tube_wall_thickness: Option<f64>,
}

macro_rules! override_fields {
    ($args:expr, $params:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$args.$field {
                $params.$field = value.clone();
            }
        )+
    };
}

impl ParameterArgs {
    /// 在默认参数上应用全部覆盖项。
    pub fn to_parameters(&self) -> CoilParameters {
        let mut params = CoilParameters::default();
        self.apply(&mut params);
        params
    }

    pub fn apply(&self, params: &mut CoilParameters) {
        override_fields!(self, params;
            fin_length,
            fin_height,
            no_of_rows,
            tubes_per_row,
            tube_od_inch,
            tube_diameter,
            fpi,
            no_of_circuits,
            top_plate,
            bottom_plate,
            casing_left,
            casing_right,
            casing_top,
            casing_bottom,
            casing_thickness,
            coil_depth,
            header_depth,
            return_depth,
            connection_side,
            connection_extension,
            connection_vertical_gap,
            top_header_block_length,
            top_return_extension,
            top_right_step,
            top_pipe_fitting_outer_offset,
            top_pipe_fitting_inner_offset,
            top_pipe_stub_center_offset,
            top_pipe_stub_spacing,
            front_left_reference_extra,
            fin_material,
            fin_thickness,
            tube_wall_thickness,
        );
    }
}
