//! 线性尺寸标注。
//!
//! 引擎只按调用方给出的偏移量绘制，不做自动避让；多排尺寸通过逐排增大偏移量实现。
//! 偏移量的符号决定尺寸线所在一侧：水平尺寸正值在 +Y 一侧，竖直尺寸正值在 +X 一侧。

use tracing::debug;

use coilcad_core::drawing::{
    Arrow, Dimension, DimensionStyle, FrontGeometry, SideGeometry, TopGeometry, ViewGeometry,
};
use coilcad_core::geometry::{Label, Point2, Segment};

/// 无状态的尺寸生成器，仅持有绘制常量。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DimensionEngine {
    style: DimensionStyle,
}

#[inline]
fn side_sign(offset: f64) -> f64 {
    if offset < 0.0 { -1.0 } else { 1.0 }
}

impl DimensionEngine {
    pub fn new(style: DimensionStyle) -> Self {
        Self { style }
    }

    #[inline]
    pub fn style(&self) -> &DimensionStyle {
        &self.style
    }

    /// 参见 [`DimensionStyle::arrowhead`]。
    #[inline]
    pub fn arrowhead(&self, tip: Point2, angle_deg: f64) -> [Segment; 2] {
        self.style.arrowhead(tip, angle_deg)
    }

    /// 水平尺寸。`text` 为空时使用 `|dx|` 保留一位小数。
    pub fn horizontal(&self, p1: Point2, p2: Point2, offset: f64, text: Option<&str>) -> Dimension {
        let text = text.map_or_else(|| format!("{:.1}", (p2.x() - p1.x()).abs()), str::to_owned);
        let sign = side_sign(offset);
        let dim_y = p1.y() + offset;
        let gap = sign * self.style.extension_gap;
        let overrun = sign * self.style.extension_overrun;

        Dimension {
            lines: vec![
                Segment::new(p1.x(), p1.y() + gap, p1.x(), dim_y + overrun),
                Segment::new(p2.x(), p2.y() + gap, p2.x(), dim_y + overrun),
                Segment::new(p1.x(), dim_y, p2.x(), dim_y),
            ],
            arrows: vec![
                Arrow {
                    tip: Point2::new(p1.x(), dim_y),
                    angle_deg: 0.0,
                },
                Arrow {
                    tip: Point2::new(p2.x(), dim_y),
                    angle_deg: 180.0,
                },
            ],
            labels: vec![Label::new((p1.x() + p2.x()) / 2.0, dim_y, text, 0.0)],
        }
    }

    /// 竖直尺寸。`text` 为空时使用 `|dy|` 保留一位小数，文字旋转 90°。
    pub fn vertical(&self, p1: Point2, p2: Point2, offset: f64, text: Option<&str>) -> Dimension {
        let text = text.map_or_else(|| format!("{:.1}", (p2.y() - p1.y()).abs()), str::to_owned);
        let sign = side_sign(offset);
        let dim_x = p1.x() + offset;
        let gap = sign * self.style.extension_gap;
        let overrun = sign * self.style.extension_overrun;

        Dimension {
            lines: vec![
                Segment::new(p1.x() + gap, p1.y(), dim_x + overrun, p1.y()),
                Segment::new(p2.x() + gap, p2.y(), dim_x + overrun, p2.y()),
                Segment::new(dim_x, p1.y(), dim_x, p2.y()),
            ],
            arrows: vec![
                Arrow {
                    tip: Point2::new(dim_x, p1.y()),
                    angle_deg: 90.0,
                },
                Arrow {
                    tip: Point2::new(dim_x, p2.y()),
                    angle_deg: 270.0,
                },
            ],
            labels: vec![Label::new(dim_x, (p1.y() + p2.y()) / 2.0, text, 90.0)],
        }
    }

    /// 按视图种类生成整套尺寸。
    pub fn for_view(&self, geometry: &ViewGeometry) -> Vec<Dimension> {
        let dims = match geometry {
            ViewGeometry::Front(front) => self.front(front),
            ViewGeometry::HeaderSide(side) => self.header_side(side),
            ViewGeometry::ReturnEnd(side) => self.return_end(side),
            ViewGeometry::Top(top) => self.top(top),
        };
        debug!(view = geometry.kind().label(), count = dims.len(), "尺寸标注已生成");
        dims
    }

    /// 主视图：下方 FL、机壳宽与左右余量；右侧 FH、机壳高与上下余量；
    /// 左侧参考尺寸；翅片区中心的 FPI 文字。
    pub fn front(&self, geo: &FrontGeometry) -> Vec<Dimension> {
        let p = &geo.params;
        let outer = geo.outer;
        let fin = geo.fin_rect;
        let (ox, oy, ow, oh) = (outer.x(), outer.y(), outer.width, outer.height);
        let (fx, fy, fw, fh) = (fin.x(), fin.y(), fin.width, fin.height);
        let right = ox + ow;
        let reference = p.bottom_plate + p.front_left_reference_extra;

        vec![
            self.horizontal(
                Point2::new(fx, oy),
                Point2::new(fx + fw, oy),
                -25.0,
                Some(&format!("{fw:.0} (FL)")),
            ),
            self.horizontal(
                Point2::new(ox, oy),
                Point2::new(right, oy),
                -40.0,
                Some(&format!("{ow:.0}")),
            ),
            self.horizontal(
                Point2::new(ox, oy),
                Point2::new(fx, oy),
                -12.0,
                Some(&format!("{:.0}", p.casing_left)),
            ),
            self.horizontal(
                Point2::new(fx + fw, oy),
                Point2::new(right, oy),
                -12.0,
                Some(&format!("{:.0}", p.casing_right)),
            ),
            self.vertical(
                Point2::new(right, fy),
                Point2::new(right, fy + fh),
                25.0,
                Some(&format!("{fh:.0} (FH)")),
            ),
            self.vertical(
                Point2::new(right, oy),
                Point2::new(right, oy + oh),
                40.0,
                Some(&format!("{oh:.0}")),
            ),
            self.vertical(
                Point2::new(right, oy),
                Point2::new(right, fy),
                12.0,
                Some(&format!("{:.0}", p.casing_bottom)),
            ),
            self.vertical(
                Point2::new(right, fy + fh),
                Point2::new(right, oy + oh),
                12.0,
                Some(&format!("{:.0}", p.casing_top)),
            ),
            self.vertical(
                Point2::new(ox, fy),
                Point2::new(ox, fy + reference),
                -15.0,
                Some(&format!("{reference:.0}")),
            ),
            Dimension::text_only(Label::new(
                fx + fw / 2.0,
                fy + fh / 2.0,
                format!("{} FPI", p.fpi),
                0.0,
            )),
        ]
    }

    /// 集管侧视图。
    pub fn header_side(&self, geo: &SideGeometry) -> Vec<Dimension> {
        self.side(geo)
    }

    /// 回弯侧视图，与集管侧使用同一组尺寸。
    pub fn return_end(&self, geo: &SideGeometry) -> Vec<Dimension> {
        self.side(geo)
    }

    /// 侧视图：下方深度与管阵宽；右侧总高与上下板距；左侧管阵高。
    fn side(&self, geo: &SideGeometry) -> Vec<Dimension> {
        let p = &geo.params;
        let outer = geo.outer;
        let grid = geo.grid;
        let (ox, oy, ow, oh) = (outer.x(), outer.y(), outer.width, outer.height);
        let (ix, iy, iw, ih) = (grid.x(), grid.y(), grid.width, grid.height);
        let right = ox + ow;

        vec![
            self.horizontal(
                Point2::new(ox, oy),
                Point2::new(right, oy),
                -25.0,
                Some(&format!("{ow:.0}")),
            ),
            self.vertical(
                Point2::new(right, oy),
                Point2::new(right, oy + oh),
                35.0,
                Some(&format!("{oh:.1}")),
            ),
            self.vertical(
                Point2::new(right, oy),
                Point2::new(right, iy),
                12.0,
                Some(&format!("{:.0}", p.bottom_plate)),
            ),
            self.vertical(
                Point2::new(right, iy + ih),
                Point2::new(right, oy + oh),
                12.0,
                Some(&format!("{:.0}", p.top_plate)),
            ),
            self.horizontal(
                Point2::new(ix, oy),
                Point2::new(ix + iw, oy),
                -40.0,
                Some(&format!("{iw:.1}")),
            ),
            self.vertical(
                Point2::new(ox, iy),
                Point2::new(ox, iy + ih),
                -20.0,
                Some(&format!("{ih:.1}")),
            ),
        ]
    }

    /// 俯视图（Y 轴向下）：机壳下方五排叠放的水平尺寸，上方接管段尺寸，
    /// 左侧芯体厚度与接管间距，右侧总深、上下余量与台阶。
    pub fn top(&self, geo: &TopGeometry) -> Vec<Dimension> {
        let p = &geo.params;
        let outer = geo.outer;
        let fin = geo.fin_rect;
        let (ox, oy, ow, oh) = (outer.x(), outer.y(), outer.width, outer.height);
        let (fx, fy, fw, fh) = (fin.x(), fin.y(), fin.width, fin.height);
        let pipe_ext = geo.pipe_extension;
        let return_ext = geo.return_extension;
        let block = geo.header_block_length;
        let margin = geo.margin;
        let btm = oy + oh;
        let far_right = ox + ow + return_ext;

        let h = |x1: f64, y1: f64, x2: f64, y2: f64, offset: f64, text: String| {
            self.horizontal(Point2::new(x1, y1), Point2::new(x2, y2), offset, Some(&text))
        };
        let v = |x1: f64, y1: f64, x2: f64, y2: f64, offset: f64, text: String| {
            self.vertical(Point2::new(x1, y1), Point2::new(x2, y2), offset, Some(&text))
        };

        let pipe_y_in = oh / 2.0 - geo.pipe_gap / 2.0;
        let pipe_y_out = oh / 2.0 + geo.pipe_gap / 2.0;

        vec![
            // 下方第一排：左余量 | FL | 右余量
            h(ox, btm, fx, btm, 12.0, format!("{:.0}", p.casing_left)),
            h(fx, btm, fx + fw, btm, 25.0, format!("{fw:.0} (FL)")),
            h(fx + fw, btm, ox + ow, btm, 12.0, format!("{:.0}", p.casing_right)),
            h(ox, btm, ox + ow, btm, 40.0, format!("{ow:.0}")),
            h(-pipe_ext, btm, ox, btm, 55.0, format!("{pipe_ext:.0}")),
            h(ox, btm, far_right, btm, 70.0, format!("{:.0}", ow + return_ext)),
            h(-pipe_ext, btm, far_right, btm, 85.0, format!("{:.0}", geo.total_width)),
            // 机壳上方：接管段
            h(-pipe_ext, oy, ox + block, oy, -15.0, format!("{:.0}", pipe_ext + block)),
            h(-pipe_ext, oy, ox, oy, -28.0, format!("{pipe_ext:.0}")),
            h(ox, oy, ox + block, oy, -28.0, format!("{block:.0}")),
            // 左侧
            v(ox + block, fy, ox + block, fy + fh, -15.0, format!("{:.1}", p.coil_depth)),
            v(
                -pipe_ext - 5.0,
                pipe_y_in,
                -pipe_ext - 5.0,
                pipe_y_out,
                -10.0,
                format!("{:.0}", geo.pipe_gap),
            ),
            // 右侧
            v(far_right, oy, far_right, oy + oh, 25.0, format!("{oh:.0}")),
            v(ox + ow, oy, ox + ow, fy, 12.0, format!("{margin:.1}")),
            v(ox + ow, fy + fh, ox + ow, oy + oh, 12.0, format!("{margin:.1}")),
            v(
                far_right,
                oy,
                far_right,
                oy + geo.top_right_step,
                12.0,
                format!("{:.0}", geo.top_right_step),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views;
    use coilcad_core::params::CoilParameters;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn horizontal_below_builds_extension_lines_outward() {
        let engine = DimensionEngine::default();
        let dim = engine.horizontal(Point2::new(0.0, 0.0), Point2::new(100.0, 0.0), -25.0, None);
        assert_eq!(dim.lines.len(), 3);
        assert_eq!(dim.lines[0], Segment::new(0.0, -2.0, 0.0, -28.0));
        assert_eq!(dim.lines[1], Segment::new(100.0, -2.0, 100.0, -28.0));
        assert_eq!(dim.dimension_line(), Some(&Segment::new(0.0, -25.0, 100.0, -25.0)));
        assert_eq!(dim.arrows[0].angle_deg, 0.0);
        assert_eq!(dim.arrows[1].angle_deg, 180.0);
        assert_eq!(dim.arrows[1].tip, Point2::new(100.0, -25.0));
        assert_eq!(dim.labels[0], Label::new(50.0, -25.0, "100.0", 0.0));
    }

    #[test]
    fn horizontal_above_uses_positive_offset() {
        let engine = DimensionEngine::default();
        let dim = engine.horizontal(Point2::new(10.0, 5.0), Point2::new(-2.3, 5.0), 15.0, None);
        assert_eq!(dim.lines[0], Segment::new(10.0, 7.0, 10.0, 23.0));
        assert!(approx(dim.labels[0].position.y(), 20.0));
        assert_eq!(dim.labels[0].text, "12.3");
    }

    #[test]
    fn vertical_right_and_left() {
        let engine = DimensionEngine::default();
        let right = engine.vertical(Point2::new(50.0, 0.0), Point2::new(50.0, 38.24), 12.0, None);
        assert_eq!(right.lines[0], Segment::new(52.0, 0.0, 65.0, 0.0));
        assert_eq!(right.lines[2], Segment::new(62.0, 0.0, 62.0, 38.24));
        assert_eq!(right.arrows[0].angle_deg, 90.0);
        assert_eq!(right.arrows[1].angle_deg, 270.0);
        assert_eq!(right.labels[0].rotation_deg, 90.0);
        assert_eq!(right.labels[0].text, "38.2");

        let left = engine.vertical(Point2::new(0.0, 0.0), Point2::new(0.0, 10.0), -20.0, Some("X"));
        assert_eq!(left.lines[0], Segment::new(-2.0, 0.0, -23.0, 0.0));
        assert_eq!(left.labels[0], Label::new(-20.0, 5.0, "X", 90.0));
    }

    #[test]
    fn style_constants_flow_into_lines() {
        let engine = DimensionEngine::new(DimensionStyle {
            extension_gap: 1.0,
            extension_overrun: 5.0,
            ..DimensionStyle::default()
        });
        let dim = engine.horizontal(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), -10.0, None);
        assert_eq!(dim.lines[0], Segment::new(0.0, -1.0, 0.0, -15.0));
        assert_eq!(engine.style().extension_overrun, 5.0);
    }

    #[test]
    fn same_input_same_output() {
        let engine = DimensionEngine::default();
        let params = CoilParameters::default();
        for kind in [
            coilcad_core::drawing::ViewKind::Front,
            coilcad_core::drawing::ViewKind::HeaderSide,
            coilcad_core::drawing::ViewKind::ReturnEnd,
            coilcad_core::drawing::ViewKind::Top,
        ] {
            let geometry = views::generate(kind, &params);
            assert_eq!(engine.for_view(&geometry), engine.for_view(&geometry));
        }
    }

    #[test]
    fn front_dimension_set() {
        let engine = DimensionEngine::default();
        let front = views::front_view(&CoilParameters::default());
        let dims = engine.front(&front);
        assert_eq!(dims.len(), 10);
        let texts: Vec<&str> = dims.iter().map(|d| d.labels[0].text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "1330 (FL)",
                "1430",
                "35",
                "65",
                "1400 (FH)",
                "1430",
                "15",
                "15",
                "185",
                "13 FPI"
            ]
        );
        let fpi = &dims[9];
        assert!(fpi.lines.is_empty() && fpi.arrows.is_empty());
        assert_eq!(fpi.labels[0].position, Point2::new(700.0, 715.0));
        // 参考尺寸画在左侧。
        assert!(approx(dims[8].lines[2].start.x(), -15.0));
        // FL 尺寸画在下方。
        assert!(approx(dims[0].lines[2].start.y(), -25.0));
    }

    #[test]
    fn side_dimension_set() {
        let engine = DimensionEngine::default();
        let params = CoilParameters::default();
        let header = views::header_side_view(&params);
        let dims = engine.header_side(&header);
        assert_eq!(dims.len(), 6);
        let texts: Vec<&str> = dims.iter().map(|d| d.labels[0].text.as_str()).collect();
        assert_eq!(texts, vec!["320", "1438.2", "35", "65", "207.6", "1338.2"]);
        let ret = views::return_end_view(&params);
        assert_eq!(engine.return_end(&ret).len(), 6);
    }

    #[test]
    fn top_dimension_rows_stack_outside_casing() {
        let engine = DimensionEngine::default();
        let top = views::top_view(&CoilParameters::default());
        let dims = engine.top(&top);
        assert_eq!(dims.len(), 16);
        let texts: Vec<&str> = dims.iter().map(|d| d.labels[0].text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "35", "1330 (FL)", "65", "1430", "170", "1575", "1745", "350", "170", "180",
                "207.6", "75", "320", "56.2", "56.2", "12"
            ]
        );
        // 下方各排位于机壳之下（Y 向下坐标系中 y > 320）。
        for dim in &dims[..7] {
            assert!(dim.lines[2].start.y() > 320.0);
        }
        // 上方各排位于机壳之上。
        for dim in &dims[7..10] {
            assert!(dim.lines[2].start.y() < 0.0);
        }
        assert!(approx(dims[6].lines[2].start.y(), 405.0));
        assert!(approx(dims[6].lines[2].start.x(), -170.0));
        assert!(approx(dims[6].lines[2].end.x(), 1575.0));
    }
}
