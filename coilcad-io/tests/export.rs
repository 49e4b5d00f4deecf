use std::collections::BTreeMap;
use std::fs;

use coilcad_core::drawing::{DimensionStyle, Layer, SheetLayout};
use coilcad_core::params::CoilParameters;
use coilcad_engine::generate_layout;
use coilcad_io::{
    DxfFacade, IoError, JsonFacade, Shape, SheetExporter, SvgFacade, sheet_entities,
};
use serde_json::Value;

fn default_layout() -> SheetLayout {
    generate_layout(&CoilParameters::default())
}

/// 读回 DXF 的 (组码, 值) 序列。
fn read_pairs(source: &str) -> Vec<(i32, String)> {
    let lines: Vec<&str> = source.lines().collect();
    assert_eq!(lines.len() % 2, 0, "组码与值必须成对出现");
    lines
        .chunks(2)
        .map(|pair| {
            let code = pair[0].trim().parse::<i32>().expect("group code");
            (code, pair[1].to_string())
        })
        .collect()
}

fn entity_counts(pairs: &[(i32, String)]) -> BTreeMap<String, usize> {
    let mut in_entities = false;
    let mut counts = BTreeMap::new();
    for window in pairs.windows(2) {
        let (code, value) = &window[0];
        if *code == 2 && value == "ENTITIES" {
            in_entities = true;
        }
        if in_entities && *code == 0 && value != "ENDSEC" && value != "EOF" {
            *counts.entry(value.clone()).or_insert(0) += 1;
        }
    }
    counts
}

#[test]
fn dxf_has_r12_header_layers_and_entities() {
    let layout = default_layout();
    let text = DxfFacade::new().render(&layout);
    let pairs = read_pairs(&text);

    assert_eq!(pairs[0], (0, "SECTION".to_string()));
    assert!(pairs.contains(&(1, "AC1009".to_string())));
    assert_eq!(pairs.last(), Some(&(0, "EOF".to_string())));

    let layer_names: Vec<&str> = pairs
        .windows(2)
        .filter(|w| w[0] == (0, "LAYER".to_string()) && w[1].0 == 2)
        .map(|w| w[1].1.as_str())
        .collect();
    let expected: Vec<&str> = Layer::ALL.iter().map(|layer| layer.name()).collect();
    assert_eq!(layer_names, expected);

    let entities = sheet_entities(&layout, &DimensionStyle::default());
    let counts = entity_counts(&pairs);
    let expect = |pred: fn(&Shape) -> bool| entities.iter().filter(|e| pred(&e.shape)).count();
    assert_eq!(counts["LINE"], expect(|s| matches!(s, Shape::Segment(_))));
    assert_eq!(counts["CIRCLE"], expect(|s| matches!(s, Shape::Circle(_))));
    assert_eq!(counts["ARC"], 3);
    assert_eq!(counts["TEXT"], expect(|s| matches!(s, Shape::Text(_))));
    assert_eq!(counts["POLYLINE"], expect(|s| matches!(s, Shape::Rect(_))));
    assert_eq!(counts["VERTEX"], 4 * counts["POLYLINE"]);
    assert_eq!(counts["SEQEND"], counts["POLYLINE"]);
}

#[test]
fn dxf_text_contains_title_and_dimension_values() {
    let text = DxfFacade::new().render(&default_layout());
    for needle in [
        "5/8\"x1330FLx1400FHx6Rx35TPRx13FPIx35NC - LHS",
        "1330 (FL)",
        "1400 (FH)",
        "13 FPI",
        "RETURN END SIDE",
        "THIRD ANGLE PROJECTION",
        "alpine coils",
    ] {
        assert!(text.contains(needle), "missing {needle}");
    }
}

#[test]
fn multi_line_inputs_keep_group_codes_paired() {
    let params = CoilParameters {
        fin_material: "Plain\nAluminium".to_string(),
        ..CoilParameters::default()
    };
    let mut layout = generate_layout(&params);
    layout.title_block.company_name = "alpine\r\ncoils".to_string();
    let pairs = read_pairs(&DxfFacade::new().render(&layout));

    assert_eq!(pairs.last(), Some(&(0, "EOF".to_string())));
    let texts: Vec<&str> = pairs
        .iter()
        .filter(|(code, _)| *code == 1)
        .map(|(_, value)| value.as_str())
        .collect();
    assert!(texts.contains(
        &"1. FIN MATERIAL SHOULD BE PLAIN ALUMINIUM (0.11MM THICKNESS) & WITHOUT ANY COATING."
    ));
    assert!(texts.contains(&"alpine coils"));
}

#[test]
fn default_dxf_is_plain_ascii() {
    let text = DxfFacade::new().render(&default_layout());
    assert!(text.bytes().all(|b| b <= 0x7f));
    assert!(text.contains("GENERAL TOLERANCE : %%p2MM"));
    assert!(text.contains("$DWGCODEPAGE\n  3\nANSI_1252"));
}

#[test]
fn sheet_has_one_label_per_view() {
    let layout = default_layout();
    let entities = sheet_entities(&layout, &DimensionStyle::default());
    let labels: Vec<&str> = entities
        .iter()
        .filter(|e| e.layer == Layer::Labels)
        .filter_map(|e| match &e.shape {
            Shape::Text(text) => Some(text.label.text.as_str()),
            _ => None,
        })
        .filter(|text| text.contains(' ') || *text == "TOP" || *text == "FRONT")
        .collect();
    assert_eq!(labels, vec!["TOP", "HEADER SIDE", "FRONT", "RETURN END SIDE"]);
}

#[test]
fn exporters_write_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let layout = default_layout();

    let dxf_path = dir.path().join("coil.dxf");
    DxfFacade::new().export(&layout, &dxf_path).expect("dxf");
    assert!(fs::read_to_string(&dxf_path).unwrap().ends_with("EOF\n"));

    let svg_path = dir.path().join("coil.svg");
    SvgFacade::new().export(&layout, &svg_path).expect("svg");
    let svg = fs::read_to_string(&svg_path).unwrap();
    assert!(svg.contains("<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\""));
    assert!(svg.contains("<g id=\"BENDS\""));
    assert!(svg.contains("5/8&quot;x1330FL"));
    assert_eq!(svg.matches("<path ").count(), 3);
    assert!(svg.trim_end().ends_with("</svg>"));

    let json_path = dir.path().join("coil.json");
    JsonFacade::new().export(&layout, &json_path).expect("json");
    let value: Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value["views"].as_array().map(Vec::len), Some(4));
    assert_eq!(value["views"][2]["label"], "FRONT");
    assert_eq!(
        value["title_block"]["drawing_title"],
        "5/8\"x1330FLx1400FHx6Rx35TPRx13FPIx35NC - LHS"
    );
}

#[test]
fn svg_escapes_company_markup() {
    let mut layout = default_layout();
    layout.title_block.company_name = "A&B <coils>".to_string();
    let svg = SvgFacade::new().render(&layout);
    assert!(svg.contains("A&amp;B &lt;coils&gt;"));
    assert!(!svg.contains("A&B"));
}

#[test]
fn missing_directory_reports_write_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing").join("coil.dxf");
    let err = DxfFacade::new()
        .export(&default_layout(), &path)
        .unwrap_err();
    match err {
        IoError::WriteError { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("unexpected error: {other}"),
    }
}
