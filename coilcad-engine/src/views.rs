//! 四个视图的几何生成。每个函数都是参数记录的纯函数：相同输入产生逐位相同的输出。
//!
//! 主视图、集管侧、回弯侧以外框左下角为原点、Y 轴向上；
//! 俯视图以机壳左上角为原点、Y 轴向下。

use tracing::debug;

use coilcad_core::drawing::{
    ConnectionPipe, FrontGeometry, SideGeometry, TopGeometry, ViewGeometry, ViewKind,
};
use coilcad_core::geometry::{Arc, Circle, Label, Rect, Segment};
use coilcad_core::params::{CoilParameters, ConnectionSide};

const MM_PER_INCH: f64 = 25.4;
/// 示意翅片线的目标数量，实际条数在此附近。
const REPRESENTATIVE_FIN_LINES: usize = 40;

/// 按视图种类分派到对应的生成函数。
pub fn generate(kind: ViewKind, params: &CoilParameters) -> ViewGeometry {
    match kind {
        ViewKind::Front => ViewGeometry::Front(front_view(params)),
        ViewKind::HeaderSide => ViewGeometry::HeaderSide(header_side_view(params)),
        ViewKind::ReturnEnd => ViewGeometry::ReturnEnd(return_end_view(params)),
        ViewKind::Top => ViewGeometry::Top(top_view(params)),
    }
}

/// 主视图：机壳外框、翅片区与示意翅片线。
///
/// 翅片线只是抽样示意，并非真实片数：每隔 `max(1, 片数 / 40)` 片画一条。
pub fn front_view(params: &CoilParameters) -> FrontGeometry {
    let outer = Rect::new(0.0, 0.0, params.casing_width(), params.casing_height());
    let fin_rect = Rect::new(
        params.casing_left,
        params.casing_bottom,
        params.fin_length,
        params.fin_height,
    );

    let spacing = MM_PER_INCH / f64::from(params.fpi);
    let fin_count = representative_count(params.fin_height, spacing);
    let step = (fin_count / REPRESENTATIVE_FIN_LINES).max(1);
    let fin_top = fin_rect.max_y();
    let fin_lines: Vec<Segment> = (0..fin_count)
        .step_by(step)
        .map(|i| fin_rect.y() + i as f64 * spacing)
        .filter(|&y| y < fin_top)
        .map(|y| Segment::new(fin_rect.x(), y, fin_rect.max_x(), y))
        .collect();

    debug!(fin_count, drawn = fin_lines.len(), "主视图翅片线已生成");

    FrontGeometry {
        outer,
        fin_rect,
        fin_lines,
        params: params.clone(),
    }
}

/// `floor(height / spacing)`，非有限或非正结果按 0 处理。
fn representative_count(height: f64, spacing: f64) -> usize {
    let count = (height / spacing).floor();
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

/// 集管侧视图：管孔板与错列管孔。
pub fn header_side_view(params: &CoilParameters) -> SideGeometry {
    side_view(params, params.header_depth, RowOrder::Forward)
}

/// 回弯侧视图：仅镜像各排的 X 位置，Y 方向错列规则与集管侧完全相同。
pub fn return_end_view(params: &CoilParameters) -> SideGeometry {
    side_view(params, params.return_depth, RowOrder::Mirrored)
}

#[derive(Debug, Clone, Copy)]
enum RowOrder {
    Forward,
    Mirrored,
}

fn side_view(params: &CoilParameters, depth: f64, order: RowOrder) -> SideGeometry {
    let vp = params.vertical_pitch();
    let rp = params.row_pitch();
    let rows = params.no_of_rows;
    let tubes_per_row = params.tubes_per_row;
    let tube_r = params.tube_radius();

    let height = params.side_view_height();
    let outer = Rect::new(0.0, 0.0, depth, height);

    let bottom_y = params.bottom_plate;
    let top_y = height - params.top_plate;
    let plate_lines = vec![
        Segment::new(0.0, bottom_y, depth, bottom_y),
        Segment::new(0.0, top_y, depth, top_y),
    ];

    let grid_w = rp * f64::from(rows);
    let grid_h = f64::from(tubes_per_row) * vp;
    let grid = Rect::new((depth - grid_w) / 2.0, bottom_y, grid_w, grid_h);

    let mut tubes = Vec::with_capacity(rows as usize * tubes_per_row as usize);
    for row in 0..rows {
        let along = rp / 2.0 + f64::from(row) * rp;
        let cx = match order {
            RowOrder::Forward => grid.x() + along,
            RowOrder::Mirrored => grid.x() + grid_w - along,
        };
        let y_start = grid.y() + stagger_start(row, vp);
        for t in 0..tubes_per_row {
            tubes.push(Circle::new(cx, y_start + f64::from(t) * vp, tube_r));
        }
    }

    debug!(?order, tubes = tubes.len(), height, "侧视图管孔已生成");

    SideGeometry {
        outer,
        grid,
        plate_lines,
        tubes,
        params: params.clone(),
    }
}

/// 错列起点：偶数排 VP/4，奇数排 3·VP/4。
#[inline]
fn stagger_start(row: u32, vp: f64) -> f64 {
    if row % 2 == 0 {
        vp / 4.0
    } else {
        3.0 * vp / 4.0
    }
}

/// 接管标签距离管端的水平间隔：(IN, OUT)。
fn label_gaps(side: ConnectionSide) -> (f64, f64) {
    match side {
        ConnectionSide::Lhs => (20.0, 25.0),
        ConnectionSide::Rhs => (15.0, 15.0),
    }
}

/// 俯视图：机壳、集管块、芯体区、管排线、接管、回弯组件与右上角台阶。
pub fn top_view(params: &CoilParameters) -> TopGeometry {
    let cw = params.casing_width();
    let hd = params.header_depth;
    let cd = params.coil_depth;
    let rp = params.row_pitch();
    let tube_r = params.tube_radius();

    let margin = params.depth_margin();
    let pipe_ext = params.connection_extension;
    let pipe_gap = params.connection_vertical_gap;
    let header_block_len = params.top_header_block_length.min(cw);
    let return_ext = params.top_return_extension;
    let top_right_step = params.top_right_step;

    let outer = Rect::new(0.0, 0.0, cw, hd);
    let header_block = Rect::new(0.0, margin, header_block_len, cd);
    let fin_rect = Rect::new(params.casing_left, margin, params.fin_length, cd);

    let zone_lines = vec![
        Segment::new(header_block_len, margin, cw, margin),
        Segment::new(header_block_len, margin + cd, cw, margin + cd),
    ];

    let row_centre = |row: u32| margin + rp / 2.0 + f64::from(row) * rp;
    let mut tube_lines = Vec::with_capacity(params.no_of_rows as usize * 2);
    for row in 0..params.no_of_rows {
        let yc = row_centre(row);
        tube_lines.push(Segment::new(header_block_len, yc - tube_r, cw, yc - tube_r));
        tube_lines.push(Segment::new(header_block_len, yc + tube_r, cw, yc + tube_r));
    }

    // 以 LHS 坐标描述接管，RHS 经 x ↦ CW - x 镜像得到。
    let side = params.connection_side;
    let place_x = |x: f64| match side {
        ConnectionSide::Lhs => x,
        ConnectionSide::Rhs => cw - x,
    };
    let (in_gap, out_gap) = label_gaps(side);
    let y_centre = hd / 2.0;

    let mut pipes = Vec::with_capacity(2);
    let mut pipe_fittings = Vec::with_capacity(4);
    let mut pipe_stubs = Vec::with_capacity(4);
    for (text, y, label_gap) in [
        ("IN", y_centre - pipe_gap / 2.0, in_gap),
        ("OUT", y_centre + pipe_gap / 2.0, out_gap),
    ] {
        let (start, end) = match side {
            ConnectionSide::Lhs => (-pipe_ext, header_block_len),
            ConnectionSide::Rhs => (cw - header_block_len, cw + pipe_ext),
        };
        let label_x = match side {
            ConnectionSide::Lhs => -pipe_ext - label_gap,
            ConnectionSide::Rhs => cw + pipe_ext + label_gap,
        };
        pipes.push(ConnectionPipe {
            line: Segment::new(start, y, end, y),
            label: Label::new(label_x, y, text, 0.0),
        });

        pipe_fittings.push(Circle::new(
            place_x(-pipe_ext + params.top_pipe_fitting_outer_offset),
            y,
            tube_r,
        ));
        pipe_fittings.push(Circle::new(
            place_x(header_block_len - params.top_pipe_fitting_inner_offset),
            y,
            tube_r,
        ));

        let stub_centre = -pipe_ext + params.top_pipe_stub_center_offset;
        for dx in [-params.top_pipe_stub_spacing / 2.0, params.top_pipe_stub_spacing / 2.0] {
            let x = place_x(stub_centre + dx);
            pipe_stubs.push(Segment::new(x, y - tube_r, x, y + tube_r));
        }
    }

    let return_rect = Rect::new(cw, margin, return_ext, cd);

    // 每两排配一个回弯；奇数排时最后一排不画。
    let bend_x = cw + params.casing_right;
    let bend_arcs: Vec<Arc> = (0..params.no_of_rows.saturating_sub(1))
        .step_by(2)
        .map(|row| {
            let y1 = row_centre(row);
            let y2 = row_centre(row + 1);
            Arc::new(bend_x, (y1 + y2) / 2.0, (y2 - y1) / 2.0, -90.0, 180.0)
        })
        .collect();

    let step_rect = Rect::new(cw, 0.0, top_right_step, margin);

    debug!(
        side = %side,
        tube_lines = tube_lines.len(),
        bend_arcs = bend_arcs.len(),
        "俯视图几何已生成"
    );

    TopGeometry {
        outer,
        header_block,
        fin_rect,
        zone_lines,
        tube_lines,
        pipes,
        pipe_fittings,
        pipe_stubs,
        return_rect,
        bend_arcs,
        step_rect,
        pipe_extension: pipe_ext,
        return_extension: return_ext,
        margin,
        total_width: pipe_ext + cw + return_ext,
        header_block_length: header_block_len,
        pipe_gap,
        top_right_step,
        params: params.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn front_outer_and_fin_rects() {
        let params = CoilParameters::default();
        let front = front_view(&params);
        assert_eq!(front.outer, Rect::new(0.0, 0.0, 1430.0, 1430.0));
        assert_eq!(front.fin_rect, Rect::new(35.0, 15.0, 1330.0, 1400.0));
    }

    #[test]
    fn front_fin_lines_are_subsampled() {
        let params = CoilParameters::default();
        let front = front_view(&params);
        // 1400 / (25.4 / 13) = 716 片，步长 17，共 43 条。
        assert_eq!(front.fin_lines.len(), 43);
        let spacing = 25.4 / 13.0;
        assert!(approx(front.fin_lines[0].start.y(), 15.0));
        assert!(approx(front.fin_lines[1].start.y(), 15.0 + 17.0 * spacing));
        for line in &front.fin_lines {
            assert!(approx(line.start.x(), 35.0));
            assert!(approx(line.end.x(), 1365.0));
            assert!(line.start.y() < 1415.0);
        }
    }

    #[test]
    fn dense_fins_stay_near_forty_lines() {
        for fpi in [4_u32, 13, 20, 32] {
            let params = CoilParameters {
                fpi,
                ..CoilParameters::default()
            };
            let count = front_view(&params).fin_lines.len();
            assert!((39..=80).contains(&count), "fpi={fpi} count={count}");
        }
    }

    #[test]
    fn zero_fpi_degrades_to_no_fin_lines() {
        let params = CoilParameters {
            fpi: 0,
            ..CoilParameters::default()
        };
        assert!(front_view(&params).fin_lines.is_empty());
    }

    #[test]
    fn side_view_height_is_independent_of_casing_height() {
        let params = CoilParameters::default();
        let header = header_side_view(&params);
        assert!((header.outer.height - 1438.235).abs() < 0.01);
        assert!(approx(front_view(&params).outer.height, 1430.0));
        assert!(approx(header.outer.width, 320.0));
    }

    #[test]
    fn tube_count_matches_grid() {
        for (rows, tpr) in [(1_u32, 1_u32), (2, 10), (5, 7), (6, 35)] {
            let params = CoilParameters {
                no_of_rows: rows,
                tubes_per_row: tpr,
                ..CoilParameters::default()
            };
            let expected = (rows * tpr) as usize;
            assert_eq!(header_side_view(&params).tubes.len(), expected);
            assert_eq!(return_end_view(&params).tubes.len(), expected);
        }
    }

    #[test]
    fn grid_is_centred_and_based_on_bottom_plate() {
        let params = CoilParameters::default();
        let header = header_side_view(&params);
        assert!(approx(header.grid.width, 207.6));
        assert!(approx(header.grid.x(), 56.2));
        assert!(approx(header.grid.y(), 35.0));
        assert!(approx(header.grid.height, 35.0 * params.vertical_pitch()));
        assert!(approx(header.plate_lines[0].start.y(), 35.0));
        assert!(approx(header.plate_lines[1].start.y(), header.outer.height - 65.0));
    }

    #[test]
    fn stagger_parity_offsets_by_half_pitch() {
        let params = CoilParameters::default();
        let vp = params.vertical_pitch();
        let tpr = params.tubes_per_row as usize;
        let header = header_side_view(&params);
        let even_start = header.tubes[0].center.y();
        let odd_start = header.tubes[tpr].center.y();
        assert!(approx(even_start, 35.0 + vp / 4.0));
        assert!(approx(odd_start - even_start, vp / 2.0));
        assert!(approx(header.tubes[1].center.y() - even_start, vp));
    }

    #[test]
    fn return_view_mirrors_row_x_only() {
        let params = CoilParameters::default();
        let tpr = params.tubes_per_row as usize;
        let header = header_side_view(&params);
        let ret = return_end_view(&params);
        let grid = header.grid;
        for row in 0..params.no_of_rows as usize {
            let header_tube = header.tubes[row * tpr];
            let return_tube = ret.tubes[row * tpr];
            let within = header_tube.center.x() - grid.x();
            assert!(approx(return_tube.center.x(), grid.x() + grid.width - within));
            assert!(approx(return_tube.center.y(), header_tube.center.y()));
        }
    }

    #[test]
    fn top_view_core_rects() {
        let params = CoilParameters::default();
        let top = top_view(&params);
        assert_eq!(top.outer, Rect::new(0.0, 0.0, 1430.0, 320.0));
        assert!(approx(top.margin, 56.2));
        assert!(approx(top.header_block.width, 180.0));
        assert!(approx(top.fin_rect.x(), 35.0));
        assert!(approx(top.return_rect.x(), 1430.0));
        assert!(approx(top.return_rect.width, 145.0));
        assert!(approx(top.total_width, 1745.0));
        assert_eq!(top.step_rect, Rect::new(1430.0, 0.0, 12.0, top.margin));
        assert_eq!(top.zone_lines.len(), 2);
        assert_eq!(top.tube_lines.len(), 12);
    }

    #[test]
    fn header_block_is_clipped_to_casing() {
        let params = CoilParameters {
            top_header_block_length: 5000.0,
            ..CoilParameters::default()
        };
        let top = top_view(&params);
        assert!(approx(top.header_block.width, params.casing_width()));
        assert!(approx(top.header_block_length, params.casing_width()));
    }

    #[test]
    fn tube_lines_bracket_each_row() {
        let params = CoilParameters::default();
        let top = top_view(&params);
        let r = params.tube_radius();
        let first_centre = top.margin + params.row_pitch() / 2.0;
        assert!(approx(top.tube_lines[0].start.y(), first_centre - r));
        assert!(approx(top.tube_lines[1].start.y(), first_centre + r));
        assert!(approx(top.tube_lines[0].start.x(), 180.0));
        assert!(approx(top.tube_lines[0].end.x(), 1430.0));
    }

    #[test]
    fn lhs_pipes_sit_left_of_casing() {
        let params = CoilParameters::default();
        let top = top_view(&params);
        assert_eq!(top.pipes.len(), 2);
        let pipe_in = &top.pipes[0];
        assert_eq!(pipe_in.label.text, "IN");
        assert_eq!(pipe_in.line, Segment::new(-170.0, 122.5, 180.0, 122.5));
        assert!(approx(pipe_in.label.position.x(), -190.0));
        let pipe_out = &top.pipes[1];
        assert_eq!(pipe_out.label.text, "OUT");
        assert!(approx(pipe_out.line.start.y(), 197.5));
        assert!(approx(pipe_out.label.position.x(), -195.0));

        assert_eq!(top.pipe_fittings.len(), 4);
        assert!(approx(top.pipe_fittings[0].center.x(), -120.0));
        assert!(approx(top.pipe_fittings[1].center.x(), 155.0));
        assert_eq!(top.pipe_stubs.len(), 4);
        assert!(approx(top.pipe_stubs[0].start.x(), -126.0));
        assert!(approx(top.pipe_stubs[1].start.x(), -114.0));
    }

    #[test]
    fn rhs_pipes_mirror_lhs_geometry() {
        let lhs = top_view(&CoilParameters::default());
        let rhs = top_view(&CoilParameters {
            connection_side: ConnectionSide::Rhs,
            ..CoilParameters::default()
        });
        let cw = 1430.0;
        for (l, r) in lhs.pipes.iter().zip(&rhs.pipes) {
            assert!(approx(r.line.start.x(), cw - l.line.end.x()));
            assert!(approx(r.line.end.x(), cw - l.line.start.x()));
            assert!(approx(r.line.start.y(), l.line.start.y()));
            assert_eq!(r.label.text, l.label.text);
            assert!(approx(r.label.position.x(), cw + 170.0 + 15.0));
        }
        for (l, r) in lhs.pipe_fittings.iter().zip(&rhs.pipe_fittings) {
            assert!(approx(r.center.x(), cw - l.center.x()));
        }
        for (l, r) in lhs.pipe_stubs.iter().zip(&rhs.pipe_stubs) {
            assert!(approx(r.start.x(), cw - l.start.x()));
            assert!(approx(r.start.y(), l.start.y()));
        }
        assert_eq!(lhs.return_rect, rhs.return_rect);
    }

    #[test]
    fn bend_arcs_pair_rows() {
        let params = CoilParameters::default();
        let top = top_view(&params);
        assert_eq!(top.bend_arcs.len(), 3);
        let arc = top.bend_arcs[0];
        let rp = params.row_pitch();
        assert!(approx(arc.center.x(), 1430.0 + 65.0));
        assert!(approx(arc.center.y(), top.margin + rp));
        assert!(approx(arc.radius, rp / 2.0));
        assert!(approx(arc.start_angle_deg, -90.0));
        assert!(approx(arc.span_deg, 180.0));
    }

    #[test]
    fn odd_row_count_leaves_last_row_unpaired() {
        for (rows, arcs) in [(0_u32, 0_usize), (1, 0), (3, 1), (5, 2), (7, 3)] {
            let params = CoilParameters {
                no_of_rows: rows,
                ..CoilParameters::default()
            };
            assert_eq!(top_view(&params).bend_arcs.len(), arcs, "rows={rows}");
        }
    }

    #[test]
    fn generators_are_deterministic() {
        let params = CoilParameters::default();
        for kind in [
            ViewKind::Front,
            ViewKind::HeaderSide,
            ViewKind::ReturnEnd,
            ViewKind::Top,
        ] {
            let first = generate(kind, &params);
            let second = generate(kind, &params);
            assert_eq!(first, second);
            assert_eq!(first.kind(), kind);
            assert_eq!(first.params(), &params);
        }
    }
}
