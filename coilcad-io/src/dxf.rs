//! ASCII DXF R12（AC1009）写出。只用到 R12 的基本实体，便于各类 CAD 软件打开。

use std::fmt::Display;
use std::path::Path;

use coilcad_core::drawing::{DimensionStyle, Layer, SheetLayout};
use coilcad_core::geometry::{Arc, Circle, Rect, Segment};

use crate::sheet::{Shape, SheetEntity, TextAlign, TextItem, sheet_entities};
use crate::{IoError, SheetExporter, write_file};

#[derive(Debug, Default, Clone, Copy)]
pub struct DxfFacade {
    style: DimensionStyle,
}

impl DxfFacade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: DimensionStyle) -> Self {
        Self { style }
    }

    pub fn render(&self, layout: &SheetLayout) -> String {
        let entities = sheet_entities(layout, &self.style);
        let mut writer = DxfWriter::default();
        writer.header();
        writer.layer_table();
        writer.section("ENTITIES");
        for entity in &entities {
            writer.entity(entity);
        }
        writer.end_section();
        writer.pair(0, "EOF");
        writer.finish()
    }
}

impl SheetExporter for DxfFacade {
    fn export(&self, layout: &SheetLayout, path: &Path) -> Result<(), IoError> {
        write_file(path, &self.render(layout))
    }
}

#[derive(Default)]
struct DxfWriter {
    out: String,
}

impl DxfWriter {
    fn finish(self) -> String {
        self.out
    }

    fn pair(&mut self, code: i32, value: impl Display) {
        self.out.push_str(&format!("{code:>3}\n{value}\n"));
    }

    fn coord(&mut self, code: i32, value: f64) {
        self.pair(code, format!("{value:.6}"));
    }

    fn point(&mut self, base: i32, x: f64, y: f64) {
        self.coord(base, x);
        self.coord(base + 10, y);
        self.coord(base + 20, 0.0);
    }

    fn section(&mut self, name: &str) {
        self.pair(0, "SECTION");
        self.pair(2, name);
    }

    fn end_section(&mut self) {
        self.pair(0, "ENDSEC");
    }

    fn header(&mut self) {
        self.section("HEADER");
        self.pair(9, "$ACADVER");
        self.pair(1, "AC1009");
        self.pair(9, "$DWGCODEPAGE");
        self.pair(3, "ANSI_1252");
        self.end_section();
    }

    fn layer_table(&mut self) {
        self.section("TABLES");
        self.pair(0, "TABLE");
        self.pair(2, "LAYER");
        self.pair(70, Layer::ALL.len());
        for layer in Layer::ALL {
            self.pair(0, "LAYER");
            self.pair(2, layer.name());
            self.pair(70, 0);
            self.pair(62, layer.color_index());
            self.pair(6, "CONTINUOUS");
        }
        self.pair(0, "ENDTAB");
        self.end_section();
    }

    fn entity(&mut self, entity: &SheetEntity) {
        let layer = entity.layer.name();
        match &entity.shape {
            Shape::Rect(rect) => self.rect(layer, rect),
            Shape::Segment(segment) => self.line(layer, segment),
            Shape::Circle(circle) => self.circle(layer, circle),
            Shape::Arc(arc) => self.arc(layer, arc),
            Shape::Text(text) => self.text(layer, text),
        }
    }

    fn line(&mut self, layer: &str, segment: &Segment) {
        self.pair(0, "LINE");
        self.pair(8, layer);
        self.point(10, segment.start.x(), segment.start.y());
        self.point(11, segment.end.x(), segment.end.y());
    }

    fn circle(&mut self, layer: &str, circle: &Circle) {
        self.pair(0, "CIRCLE");
        self.pair(8, layer);
        self.point(10, circle.center.x(), circle.center.y());
        self.coord(40, circle.radius);
    }

    /// DXF 圆弧总是逆时针，从 50 组码走到 51 组码；负跨度需先交换起止角。
    fn arc(&mut self, layer: &str, arc: &Arc) {
        let (start, end) = if arc.span_deg >= 0.0 {
            (arc.start_angle_deg, arc.end_angle_deg())
        } else {
            (arc.end_angle_deg(), arc.start_angle_deg)
        };
        self.pair(0, "ARC");
        self.pair(8, layer);
        self.point(10, arc.center.x(), arc.center.y());
        self.coord(40, arc.radius);
        self.coord(50, start.rem_euclid(360.0));
        self.coord(51, end.rem_euclid(360.0));
    }

    fn text(&mut self, layer: &str, text: &TextItem) {
        let position = text.label.position;
        self.pair(0, "TEXT");
        self.pair(8, layer);
        self.point(10, position.x(), position.y());
        self.coord(40, text.height);
        self.pair(1, encode_text(&text.label.text));
        if text.label.rotation_deg != 0.0 {
            self.coord(50, text.label.rotation_deg);
        }
        if text.align == TextAlign::Center {
            // 水平居中、垂直居中，对齐点与插入点相同。
            self.pair(72, 1);
            self.point(11, position.x(), position.y());
            self.pair(73, 2);
        }
    }

    /// 矩形写为闭合的旧式 POLYLINE。
    fn rect(&mut self, layer: &str, rect: &Rect) {
        self.pair(0, "POLYLINE");
        self.pair(8, layer);
        self.pair(66, 1);
        self.point(10, 0.0, 0.0);
        self.pair(70, 1);
        for corner in rect.corners() {
            self.pair(0, "VERTEX");
            self.pair(8, layer);
            self.point(10, corner.x(), corner.y());
        }
        self.pair(0, "SEQEND");
        self.pair(8, layer);
    }
}

/// 文字值只能占一行且只含 ASCII：换行折成空格，常用符号写作 `%%` 控制码，
/// 其余非 ASCII 字符写作 `\U+XXXX`。
fn encode_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(' ');
            }
            '\n' => out.push(' '),
            '\u{b1}' => out.push_str("%%p"),
            '\u{b0}' => out.push_str("%%d"),
            '\u{d8}' | '\u{f8}' | '\u{2300}' => out.push_str("%%c"),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            c if c.is_ascii() => out.push(' '),
            c => out.push_str(&format!("\\U+{:04X}", u32::from(c))),
        }
    }
    out
}
