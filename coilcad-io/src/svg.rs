//! 独立 SVG 输出，viewBox 贴合全部图元并留出页边。

use std::path::Path;

use coilcad_core::drawing::{DimensionStyle, Layer, SheetLayout};
use coilcad_core::geometry::Arc;

use crate::sheet::{Shape, SheetEntity, TextAlign, entities_bounds, sheet_entities};
use crate::{IoError, SheetExporter, write_file};

const PAGE_MARGIN: f64 = 20.0;
const STROKE_WIDTH: f64 = 0.5;

#[derive(Debug, Default, Clone, Copy)]
pub struct SvgFacade {
    style: DimensionStyle,
}

impl SvgFacade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: DimensionStyle) -> Self {
        Self { style }
    }

    pub fn render(&self, layout: &SheetLayout) -> String {
        let entities = sheet_entities(layout, &self.style);
        let bounds = entities_bounds(&entities);
        let (min_x, min_y, width, height) = if bounds.is_empty() {
            (0.0, 0.0, 1.0, 1.0)
        } else {
            (
                bounds.min().x() - PAGE_MARGIN,
                bounds.min().y() - PAGE_MARGIN,
                bounds.width() + 2.0 * PAGE_MARGIN,
                bounds.height() + 2.0 * PAGE_MARGIN,
            )
        };

        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\" width=\"{}mm\" height=\"{}mm\">\n",
            num(min_x),
            num(min_y),
            num(width),
            num(height),
            num(width),
            num(height)
        ));
        out.push_str(&format!(
            "<title>{}</title>\n",
            escape(&layout.title_block.drawing_title)
        ));

        for layer in Layer::ALL {
            let members: Vec<&SheetEntity> =
                entities.iter().filter(|e| e.layer == layer).collect();
            if members.is_empty() {
                continue;
            }
            let colour = layer_colour(layer);
            out.push_str(&format!(
                "<g id=\"{}\" stroke=\"{colour}\" stroke-width=\"{STROKE_WIDTH}\" fill=\"none\">\n",
                layer.name()
            ));
            for entity in members {
                out.push_str(&element(&entity.shape, colour));
                out.push('\n');
            }
            out.push_str("</g>\n");
        }
        out.push_str("</svg>\n");
        out
    }
}

impl SheetExporter for SvgFacade {
    fn export(&self, layout: &SheetLayout, path: &Path) -> Result<(), IoError> {
        write_file(path, &self.render(layout))
    }
}

fn element(shape: &Shape, colour: &str) -> String {
    match shape {
        Shape::Rect(rect) => format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/>",
            num(rect.x()),
            num(rect.y()),
            num(rect.width),
            num(rect.height)
        ),
        Shape::Segment(segment) => format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"/>",
            num(segment.start.x()),
            num(segment.start.y()),
            num(segment.end.x()),
            num(segment.end.y())
        ),
        Shape::Circle(circle) => format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"/>",
            num(circle.center.x()),
            num(circle.center.y()),
            num(circle.radius)
        ),
        Shape::Arc(arc) => arc_element(arc),
        Shape::Text(text) => {
            let position = text.label.position;
            let anchor = match text.align {
                TextAlign::Center => "middle",
                TextAlign::Left => "start",
            };
            let baseline = match text.align {
                TextAlign::Center => " dominant-baseline=\"middle\"",
                TextAlign::Left => "",
            };
            let rotation = if text.label.rotation_deg != 0.0 {
                format!(
                    " transform=\"rotate({} {} {})\"",
                    num(-text.label.rotation_deg),
                    num(position.x()),
                    num(position.y())
                )
            } else {
                String::new()
            };
            format!(
                "<text x=\"{}\" y=\"{}\" font-size=\"{}\" font-family=\"sans-serif\" text-anchor=\"{anchor}\"{baseline} stroke=\"none\" fill=\"{colour}\"{rotation}>{}</text>",
                num(position.x()),
                num(position.y()),
                num(text.height),
                escape(&text.label.text)
            )
        }
    }
}

/// 圆弧转为路径；跨度达到整圆时退化为 `<circle>`。
fn arc_element(arc: &Arc) -> String {
    if arc.span_deg.abs() >= 360.0 {
        return format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"/>",
            num(arc.center.x()),
            num(arc.center.y()),
            num(arc.radius)
        );
    }
    let start = arc.point_at_deg(arc.start_angle_deg);
    let end = arc.point_at_deg(arc.end_angle_deg());
    let large_arc = u8::from(arc.span_deg.abs() > 180.0);
    let sweep = u8::from(arc.span_deg > 0.0);
    format!(
        "<path d=\"M {} {} A {} {} 0 {large_arc} {sweep} {} {}\"/>",
        num(start.x()),
        num(start.y()),
        num(arc.radius),
        num(arc.radius),
        num(end.x()),
        num(end.y())
    )
}

fn layer_colour(layer: Layer) -> &'static str {
    match layer.color_index() {
        1 => "#d32f2f",
        2 => "#b8860b",
        3 => "#2e7d32",
        4 => "#00838f",
        5 => "#1565c0",
        6 => "#8e24aa",
        8 => "#808080",
        _ => "#000000",
    }
}

/// 保留三位小数并去掉多余的零。
fn num(value: f64) -> String {
    let text = format!("{value:.3}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
