//! 出图记录：视图几何、尺寸标注、注释与整张图纸布局。
//!
//! 这些类型只承载坐标数据，不含任何绘制逻辑；生成由 `coilcad-engine` 负责，
//! 消费者（导出器、预览）只读取。

use serde::{Deserialize, Serialize};

use crate::geometry::{Arc, Bounds2D, Circle, Label, Point2, Rect, Segment, Vector2};
use crate::params::CoilParameters;

/// 四个正交视图。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewKind {
    Top,
    HeaderSide,
    Front,
    ReturnEnd,
}

impl ViewKind {
    /// 图纸上显示的视图名称。
    pub fn label(self) -> &'static str {
        match self {
            ViewKind::Top => "TOP",
            ViewKind::HeaderSide => "HEADER SIDE",
            ViewKind::Front => "FRONT",
            ViewKind::ReturnEnd => "RETURN END SIDE",
        }
    }
}

/// 图层划分，导出器据此设置颜色与线型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Casing,
    Coil,
    Tubes,
    Bends,
    Fins,
    Plates,
    Dims,
    Labels,
    Notes,
    Pipes,
    TitleBlock,
}

impl Layer {
    pub const ALL: [Layer; 11] = [
        Layer::Casing,
        Layer::Coil,
        Layer::Tubes,
        Layer::Bends,
        Layer::Fins,
        Layer::Plates,
        Layer::Dims,
        Layer::Labels,
        Layer::Notes,
        Layer::Pipes,
        Layer::TitleBlock,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Layer::Casing => "CASING",
            Layer::Coil => "COIL",
            Layer::Tubes => "TUBES",
            Layer::Bends => "BENDS",
            Layer::Fins => "FINS",
            Layer::Plates => "PLATES",
            Layer::Dims => "DIMS",
            Layer::Labels => "LABELS",
            Layer::Notes => "NOTES",
            Layer::Pipes => "PIPES",
            Layer::TitleBlock => "TITLEBLOCK",
        }
    }

    /// AutoCAD 颜色索引（ACI）。
    pub fn color_index(self) -> i16 {
        match self {
            Layer::Casing => 1,
            Layer::Coil => 7,
            Layer::Tubes => 3,
            Layer::Bends => 6,
            Layer::Fins => 8,
            Layer::Plates => 5,
            Layer::Dims => 4,
            Layer::Labels | Layer::Notes => 2,
            Layer::Pipes => 7,
            Layer::TitleBlock => 7,
        }
    }
}

/// 图元种类的闭合集合。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Rect(Rect),
    Segment(Segment),
    Circle(Circle),
    Arc(Arc),
    Label(Label),
}

impl Primitive {
    pub fn translate(&self, offset: Vector2) -> Primitive {
        match self {
            Primitive::Rect(rect) => Primitive::Rect(rect.translate(offset)),
            Primitive::Segment(segment) => Primitive::Segment(segment.translate(offset)),
            Primitive::Circle(circle) => Primitive::Circle(circle.translate(offset)),
            Primitive::Arc(arc) => Primitive::Arc(arc.translate(offset)),
            Primitive::Label(label) => Primitive::Label(label.translate(offset)),
        }
    }

    /// 几何范围；圆弧按整圆估算，文字退化为插入点。
    pub fn bounds(&self) -> Bounds2D {
        let mut bounds = Bounds2D::empty();
        match self {
            Primitive::Rect(rect) => bounds.include_bounds(&rect.bounds()),
            Primitive::Segment(segment) => {
                bounds.include_point(segment.start);
                bounds.include_point(segment.end);
            }
            Primitive::Circle(Circle { center, radius })
            | Primitive::Arc(Arc { center, radius, .. }) => {
                let r = radius.abs();
                bounds.include_point(Point2::new(center.x() - r, center.y() - r));
                bounds.include_point(Point2::new(center.x() + r, center.y() + r));
            }
            Primitive::Label(label) => bounds.include_point(label.position),
        }
        bounds
    }
}

/// 主视图：机壳、翅片区与示意翅片线。原点在机壳左下角，Y 轴向上。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrontGeometry {
    pub outer: Rect,
    pub fin_rect: Rect,
    pub fin_lines: Vec<Segment>,
    pub params: CoilParameters,
}

/// 集管侧 / 回弯侧视图共用的记录：管孔板与错列管孔。原点在左下角，Y 轴向上。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideGeometry {
    pub outer: Rect,
    /// 管阵外框（宽 = RP × NR，高 = TPR × VP）。
    pub grid: Rect,
    /// 底板线与顶板线。
    pub plate_lines: Vec<Segment>,
    pub tubes: Vec<Circle>,
    pub params: CoilParameters,
}

/// 俯视图中的一根接管。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionPipe {
    pub line: Segment,
    pub label: Label,
}

/// 俯视图。原点在机壳左上角，Y 轴向下。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopGeometry {
    pub outer: Rect,
    pub header_block: Rect,
    pub fin_rect: Rect,
    pub zone_lines: Vec<Segment>,
    pub tube_lines: Vec<Segment>,
    pub pipes: Vec<ConnectionPipe>,
    pub pipe_fittings: Vec<Circle>,
    pub pipe_stubs: Vec<Segment>,
    pub return_rect: Rect,
    pub bend_arcs: Vec<Arc>,
    pub step_rect: Rect,
    /// 供尺寸引擎使用的派生量。
    pub pipe_extension: f64,
    pub return_extension: f64,
    pub margin: f64,
    pub total_width: f64,
    pub header_block_length: f64,
    pub pipe_gap: f64,
    pub top_right_step: f64,
    pub params: CoilParameters,
}

/// 单个视图的几何记录。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ViewGeometry {
    Front(FrontGeometry),
    HeaderSide(SideGeometry),
    ReturnEnd(SideGeometry),
    Top(TopGeometry),
}

impl ViewGeometry {
    pub fn kind(&self) -> ViewKind {
        match self {
            ViewGeometry::Front(_) => ViewKind::Front,
            ViewGeometry::HeaderSide(_) => ViewKind::HeaderSide,
            ViewGeometry::ReturnEnd(_) => ViewKind::ReturnEnd,
            ViewGeometry::Top(_) => ViewKind::Top,
        }
    }

    pub fn outer_rect(&self) -> Rect {
        match self {
            ViewGeometry::Front(front) => front.outer,
            ViewGeometry::HeaderSide(side) | ViewGeometry::ReturnEnd(side) => side.outer,
            ViewGeometry::Top(top) => top.outer,
        }
    }

    pub fn params(&self) -> &CoilParameters {
        match self {
            ViewGeometry::Front(front) => &front.params,
            ViewGeometry::HeaderSide(side) | ViewGeometry::ReturnEnd(side) => &side.params,
            ViewGeometry::Top(top) => &top.params,
        }
    }

    /// 按图层展开为扁平图元列表，顺序固定，便于导出器逐一输出。
    pub fn primitives(&self) -> Vec<(Layer, Primitive)> {
        let mut out = Vec::new();
        match self {
            ViewGeometry::Front(front) => {
                out.push((Layer::Casing, Primitive::Rect(front.outer)));
                out.push((Layer::Coil, Primitive::Rect(front.fin_rect)));
                push_segments(&mut out, Layer::Fins, &front.fin_lines);
            }
            ViewGeometry::HeaderSide(side) | ViewGeometry::ReturnEnd(side) => {
                out.push((Layer::Casing, Primitive::Rect(side.outer)));
                out.push((Layer::Coil, Primitive::Rect(side.grid)));
                push_segments(&mut out, Layer::Plates, &side.plate_lines);
                out.extend(
                    side.tubes
                        .iter()
                        .map(|tube| (Layer::Tubes, Primitive::Circle(*tube))),
                );
            }
            ViewGeometry::Top(top) => {
                out.push((Layer::Casing, Primitive::Rect(top.outer)));
                out.push((Layer::Coil, Primitive::Rect(top.fin_rect)));
                out.push((Layer::Casing, Primitive::Rect(top.header_block)));
                push_segments(&mut out, Layer::Tubes, &top.tube_lines);
                push_segments(&mut out, Layer::Plates, &top.zone_lines);
                out.extend(
                    top.bend_arcs
                        .iter()
                        .map(|arc| (Layer::Bends, Primitive::Arc(*arc))),
                );
                for pipe in &top.pipes {
                    out.push((Layer::Pipes, Primitive::Segment(pipe.line)));
                    out.push((Layer::Labels, Primitive::Label(pipe.label.clone())));
                }
                out.extend(
                    top.pipe_fittings
                        .iter()
                        .map(|fitting| (Layer::Pipes, Primitive::Circle(*fitting))),
                );
                push_segments(&mut out, Layer::Pipes, &top.pipe_stubs);
                out.push((Layer::Casing, Primitive::Rect(top.return_rect)));
                out.push((Layer::Casing, Primitive::Rect(top.step_rect)));
            }
        }
        out
    }
}

fn push_segments(out: &mut Vec<(Layer, Primitive)>, layer: Layer, segments: &[Segment]) {
    out.extend(
        segments
            .iter()
            .map(|segment| (layer, Primitive::Segment(*segment))),
    );
}

/// 尺寸线端部箭头：尖端位置与指向角（度）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub tip: Point2,
    pub angle_deg: f64,
}

/// 一条线性尺寸。`lines` 依次为两条尺寸界线与一条尺寸线。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub lines: Vec<Segment>,
    pub arrows: Vec<Arrow>,
    pub labels: Vec<Label>,
}

impl Dimension {
    /// 仅含文字、不带任何线条的标注。
    pub fn text_only(label: Label) -> Self {
        Self {
            lines: Vec::new(),
            arrows: Vec::new(),
            labels: vec![label],
        }
    }

    /// 尺寸线本身（若存在）。
    pub fn dimension_line(&self) -> Option<&Segment> {
        self.lines.get(2)
    }
}

/// 尺寸绘制常量，默认值与出图模板一致。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionStyle {
    pub arrow_length: f64,
    pub arrow_half_angle_deg: f64,
    pub extension_gap: f64,
    pub extension_overrun: f64,
}

impl Default for DimensionStyle {
    fn default() -> Self {
        Self {
            arrow_length: 3.0,
            arrow_half_angle_deg: 25.0,
            extension_gap: 2.0,
            extension_overrun: 3.0,
        }
    }
}

impl DimensionStyle {
    /// 开口 V 形箭头：自尖端沿反方向 ±半角各引出一条定长线段，先 + 后 -。
    pub fn arrowhead(&self, tip: Point2, angle_deg: f64) -> [Segment; 2] {
        let angle = angle_deg.to_radians();
        let half = self.arrow_half_angle_deg.to_radians();
        [1.0_f64, -1.0].map(|sign| {
            let dx = -self.arrow_length * (angle + sign * half).cos();
            let dy = -self.arrow_length * (angle + sign * half).sin();
            Segment::new(tip.x(), tip.y(), tip.x() + dx, tip.y() + dy)
        })
    }
}

/// 图纸左下方的技术要求。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notes {
    pub notes_lines: Vec<String>,
    pub footer_lines: Vec<String>,
}

/// 标题栏中的公司信息与固定栏目，可由配置覆盖。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub company_name: String,
    pub company_sub: String,
    pub company_tag: String,
    pub scale: String,
    pub qty: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        Self {
            company_name: "alpine coils".to_string(),
            company_sub: "industry l.l.c".to_string(),
            company_tag: "air cooling experts".to_string(),
            scale: "NTS".to_string(),
            qty: "1 NO.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleBlock {
    pub company_name: String,
    pub company_sub: String,
    pub company_tag: String,
    pub drawing_title: String,
    pub scale: String,
    pub qty: String,
}

/// 视图在图纸上的描述：名称、全局偏移、几何与尺寸。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewDescriptor {
    pub label: String,
    pub offset: Vector2,
    pub geometry: ViewGeometry,
    pub dimensions: Vec<Dimension>,
}

impl ViewDescriptor {
    #[inline]
    pub fn kind(&self) -> ViewKind {
        self.geometry.kind()
    }

    /// 视图外框平移到图纸坐标后的包围盒（不含尺寸标注）。
    pub fn sheet_bounds(&self) -> Bounds2D {
        self.geometry.outer_rect().bounds().translated(self.offset)
    }
}

/// 最终交付给导出器的整张图纸。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetLayout {
    pub views: Vec<ViewDescriptor>,
    pub notes: Notes,
    pub title_block: TitleBlock,
    pub notes_offset: Vector2,
    pub title_block_offset: Vector2,
}

impl SheetLayout {
    pub fn view(&self, kind: ViewKind) -> Option<&ViewDescriptor> {
        self.views.iter().find(|view| view.kind() == kind)
    }

    /// 所有视图外框的并集。
    pub fn views_bounds(&self) -> Bounds2D {
        let mut bounds = Bounds2D::empty();
        for view in &self.views {
            bounds.include_bounds(&view.sheet_bounds());
        }
        bounds
    }
}
