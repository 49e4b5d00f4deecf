//! 把 `SheetLayout` 展开为图纸坐标下、带图层的扁平图元序列。
//!
//! 各导出器共享这一步，保证 DXF 与 SVG 中的内容逐一对应。坐标按原样输出，不做 Y 轴翻转。

use serde::Serialize;

use coilcad_core::drawing::{
    DimensionStyle, Layer, Notes, Primitive, SheetLayout, TitleBlock, ViewDescriptor,
};
use coilcad_core::geometry::{Arc, Bounds2D, Circle, Label, Point2, Rect, Segment, Vector2};

const GEOMETRY_TEXT_HEIGHT: f64 = 3.5;
const DIMENSION_TEXT_HEIGHT: f64 = 2.5;
const VIEW_LABEL_HEIGHT: f64 = 5.0;
const VIEW_LABEL_CLEARANCE: f64 = 15.0;

const NOTE_LINE_SPACING: f64 = 8.0;
const NOTE_HEADING_HEIGHT: f64 = 4.0;
const NOTE_TEXT_HEIGHT: f64 = 3.0;
const FOOTER_LINE_SPACING: f64 = 6.0;
const FOOTER_GAP: f64 = 10.0;
const FOOTER_TEXT_HEIGHT: f64 = 2.5;

const TITLE_BLOCK_WIDTH: f64 = 350.0;
const TITLE_BLOCK_HEIGHT: f64 = 80.0;
const TITLE_COMPANY_WIDTH: f64 = 150.0;
const TITLE_CAPTION_HEIGHT: f64 = 2.5;
const TITLE_VALUE_HEIGHT: f64 = 3.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    /// 插入点位于文字中心。
    Center,
    /// 插入点位于文字左端基线。
    Left,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextItem {
    pub label: Label,
    pub height: f64,
    pub align: TextAlign,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Shape {
    Rect(Rect),
    Segment(Segment),
    Circle(Circle),
    Arc(Arc),
    Text(TextItem),
}

impl Shape {
    pub fn bounds(&self) -> Bounds2D {
        match self {
            Shape::Rect(rect) => Primitive::Rect(*rect).bounds(),
            Shape::Segment(segment) => Primitive::Segment(*segment).bounds(),
            Shape::Circle(circle) => Primitive::Circle(*circle).bounds(),
            Shape::Arc(arc) => Primitive::Arc(*arc).bounds(),
            Shape::Text(text) => {
                let mut bounds = Bounds2D::empty();
                bounds.include_point(text.label.position);
                bounds
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetEntity {
    pub layer: Layer,
    pub shape: Shape,
}

impl SheetEntity {
    fn new(layer: Layer, shape: Shape) -> Self {
        Self { layer, shape }
    }

    fn text(layer: Layer, label: Label, height: f64, align: TextAlign) -> Self {
        Self::new(
            layer,
            Shape::Text(TextItem {
                label,
                height,
                align,
            }),
        )
    }
}

/// 展开整张图纸：各视图几何与尺寸、视图名称、技术要求与标题栏。
pub fn sheet_entities(layout: &SheetLayout, style: &DimensionStyle) -> Vec<SheetEntity> {
    let mut out = Vec::new();
    for view in &layout.views {
        push_view(&mut out, view, style);
    }
    push_notes(&mut out, &layout.notes, layout.notes_offset);
    push_title_block(&mut out, &layout.title_block, layout.title_block_offset);
    out
}

fn push_view(out: &mut Vec<SheetEntity>, view: &ViewDescriptor, style: &DimensionStyle) {
    let offset = view.offset;
    for (layer, primitive) in view.geometry.primitives() {
        let shape = match primitive.translate(offset) {
            Primitive::Rect(rect) => Shape::Rect(rect),
            Primitive::Segment(segment) => Shape::Segment(segment),
            Primitive::Circle(circle) => Shape::Circle(circle),
            Primitive::Arc(arc) => Shape::Arc(arc),
            Primitive::Label(label) => Shape::Text(TextItem {
                label,
                height: GEOMETRY_TEXT_HEIGHT,
                align: TextAlign::Center,
            }),
        };
        out.push(SheetEntity::new(layer, shape));
    }

    for dimension in &view.dimensions {
        out.extend(
            dimension
                .lines
                .iter()
                .map(|line| SheetEntity::new(Layer::Dims, Shape::Segment(line.translate(offset)))),
        );
        for arrow in &dimension.arrows {
            let tip = arrow.tip.translate(offset);
            out.extend(
                style
                    .arrowhead(tip, arrow.angle_deg)
                    .into_iter()
                    .map(|leg| SheetEntity::new(Layer::Dims, Shape::Segment(leg))),
            );
        }
        out.extend(dimension.labels.iter().map(|label| {
            SheetEntity::text(
                Layer::Dims,
                label.translate(offset),
                DIMENSION_TEXT_HEIGHT,
                TextAlign::Center,
            )
        }));
    }

    let bounds = view.sheet_bounds();
    out.push(SheetEntity::text(
        Layer::Labels,
        Label::new(
            bounds.center().x(),
            bounds.max().y() + VIEW_LABEL_CLEARANCE,
            view.label.clone(),
            0.0,
        ),
        VIEW_LABEL_HEIGHT,
        TextAlign::Center,
    ));
}

fn push_notes(out: &mut Vec<SheetEntity>, notes: &Notes, offset: Vector2) {
    let origin = Point2::new(offset.x(), offset.y());
    for (i, line) in notes.notes_lines.iter().enumerate() {
        let height = if i == 0 {
            NOTE_HEADING_HEIGHT
        } else {
            NOTE_TEXT_HEIGHT
        };
        out.push(SheetEntity::text(
            Layer::Notes,
            Label::new(
                origin.x(),
                origin.y() + i as f64 * NOTE_LINE_SPACING,
                line.clone(),
                0.0,
            ),
            height,
            TextAlign::Left,
        ));
    }

    let notes_height = notes.notes_lines.len() as f64 * NOTE_LINE_SPACING;
    let footer_y = origin.y() + notes_height + FOOTER_GAP;
    for (i, line) in notes.footer_lines.iter().enumerate() {
        out.push(SheetEntity::text(
            Layer::Notes,
            Label::new(
                origin.x(),
                footer_y + i as f64 * FOOTER_LINE_SPACING,
                line.clone(),
                0.0,
            ),
            FOOTER_TEXT_HEIGHT,
            TextAlign::Left,
        ));
    }
}

/// 标题栏 350 × 80：
///
/// ```text
/// +-----------+----------------------+  0
/// | 公司名称   | DRAWING TITLE        |
/// | 副标题/标语 | <图名>               |
/// +-----------+-----+----------------+ 40
/// | SCALE           | QTY            |
/// +-----------------+----------------+ 60
/// | NTS             | 1 NO.          |
/// +-----------------+----------------+ 80
/// ```
fn push_title_block(out: &mut Vec<SheetEntity>, block: &TitleBlock, offset: Vector2) {
    let (x, y) = (offset.x(), offset.y());
    let w = TITLE_BLOCK_WIDTH;
    let h = TITLE_BLOCK_HEIGHT;
    let split = TITLE_COMPANY_WIDTH;
    let half = w / 2.0;

    out.push(SheetEntity::new(
        Layer::TitleBlock,
        Shape::Rect(Rect::new(x, y, w, h)),
    ));
    for divider in [
        Segment::new(x + split, y, x + split, y + 40.0),
        Segment::new(x, y + 40.0, x + w, y + 40.0),
        Segment::new(x, y + 60.0, x + w, y + 60.0),
        Segment::new(x + half, y + 40.0, x + half, y + h),
    ] {
        out.push(SheetEntity::new(Layer::TitleBlock, Shape::Segment(divider)));
    }

    let company_x = x + split / 2.0;
    let title_x = x + split + 5.0;
    let cells = [
        (company_x, y + 12.0, &block.company_name, 5.0, TextAlign::Center),
        (company_x, y + 22.0, &block.company_sub, TITLE_VALUE_HEIGHT, TextAlign::Center),
        (company_x, y + 32.0, &block.company_tag, TITLE_CAPTION_HEIGHT, TextAlign::Center),
        (title_x, y + 24.0, &block.drawing_title, TITLE_VALUE_HEIGHT, TextAlign::Left),
        (x + half / 2.0, y + 70.0, &block.scale, TITLE_VALUE_HEIGHT, TextAlign::Center),
        (x + half + half / 2.0, y + 70.0, &block.qty, TITLE_VALUE_HEIGHT, TextAlign::Center),
    ];
    for (cx, cy, text, height, align) in cells {
        out.push(SheetEntity::text(
            Layer::TitleBlock,
            Label::new(cx, cy, text.clone(), 0.0),
            height,
            align,
        ));
    }

    for (cx, cy, caption) in [
        (title_x, y + 8.0, "DRAWING TITLE"),
        (x + 5.0, y + 50.0, "SCALE"),
        (x + half + 5.0, y + 50.0, "QTY"),
    ] {
        out.push(SheetEntity::text(
            Layer::TitleBlock,
            Label::new(cx, cy, caption, 0.0),
            TITLE_CAPTION_HEIGHT,
            TextAlign::Left,
        ));
    }
}

/// 全部图元的包围盒。
pub(crate) fn entities_bounds(entities: &[SheetEntity]) -> Bounds2D {
    let mut bounds = Bounds2D::empty();
    for entity in entities {
        bounds.include_bounds(&entity.shape.bounds());
    }
    bounds
}
