use coilcad_core::drawing::{CompanyInfo, Notes, TitleBlock};
use coilcad_core::params::CoilParameters;

const FOOTER_LINES: [&str; 4] = [
    "ALL DIMENSIONS ARE IN MM,",
    "UNLESS OTHERWISE SPECIFIED.",
    "GENERAL TOLERANCE : \u{b1}2MM",
    "THIRD ANGLE PROJECTION",
];

/// 技术要求：材料与壁厚说明，以及固定的页脚。
pub fn notes(params: &CoilParameters) -> Notes {
    Notes {
        notes_lines: vec![
            "NOTE:".to_string(),
            format!(
                "1. FIN MATERIAL SHOULD BE {} ({}MM THICKNESS) & WITHOUT ANY COATING.",
                params.fin_material.to_uppercase(),
                decimal(params.fin_thickness)
            ),
            format!(
                "2. CASING MATERIAL SHOULD BE G.I. - {}MM THICKNESS.",
                decimal(params.casing_thickness)
            ),
            format!(
                "3. {}\" COPPER TUBE WALL THICKNESS SHOULD BE {} MM.",
                params.tube_od_inch,
                decimal(params.tube_wall_thickness)
            ),
        ],
        footer_lines: FOOTER_LINES.iter().map(|line| line.to_string()).collect(),
    }
}

/// 厚度一律带小数位：`2.0` 写作 `2.0` 而不是 `2`。
fn decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

pub fn title_block(params: &CoilParameters, company: &CompanyInfo) -> TitleBlock {
    TitleBlock {
        company_name: company.company_name.clone(),
        company_sub: company.company_sub.clone(),
        company_tag: company.company_tag.clone(),
        drawing_title: params.drawing_title(),
        scale: company.scale.clone(),
        qty: company.qty.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notes_reflect_manufacturing_fields() {
        let notes = notes(&CoilParameters::default());
        assert_eq!(notes.notes_lines[0], "NOTE:");
        assert_eq!(
            notes.notes_lines[1],
            "1. FIN MATERIAL SHOULD BE PLAIN ALUMINIUM (0.11MM THICKNESS) & WITHOUT ANY COATING."
        );
        assert_eq!(
            notes.notes_lines[2],
            "2. CASING MATERIAL SHOULD BE G.I. - 1.5MM THICKNESS."
        );
        assert_eq!(
            notes.notes_lines[3],
            "3. 5/8\" COPPER TUBE WALL THICKNESS SHOULD BE 0.4 MM."
        );
        assert_eq!(notes.footer_lines.len(), 4);
        assert_eq!(notes.footer_lines[2], "GENERAL TOLERANCE : ±2MM");
    }

    #[test]
    fn whole_thicknesses_keep_one_decimal() {
        let params = CoilParameters {
            casing_thickness: 2.0,
            fin_thickness: 1.0,
            tube_wall_thickness: 0.35,
            ..CoilParameters::default()
        };
        let notes = notes(&params);
        assert!(notes.notes_lines[1].contains("(1.0MM THICKNESS)"));
        assert_eq!(
            notes.notes_lines[2],
            "2. CASING MATERIAL SHOULD BE G.I. - 2.0MM THICKNESS."
        );
        assert!(notes.notes_lines[3].ends_with("SHOULD BE 0.35 MM."));
    }

    #[test]
    fn title_block_carries_drawing_title() {
        let params = CoilParameters::default();
        let block = title_block(&params, &CompanyInfo::default());
        assert_eq!(block.drawing_title, params.drawing_title());
        assert_eq!(block.company_name, "alpine coils");
        assert_eq!(block.scale, "NTS");
        assert_eq!(block.qty, "1 NO.");
    }
}
