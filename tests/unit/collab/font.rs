use super::*;

/// Glyph source with a single square glyph for 'a'.
struct Boxes;

impl GlyphSource for Boxes {
    fn metrics(&self, scaling: FontScaling) -> MsdfResult<FontMetrics> {
        let k = scaling.factor(1000);
        Ok(FontMetrics {
            em_size: 1000.0 * k,
            ascender_y: 800.0 * k,
            descender_y: -200.0 * k,
            line_height: 1200.0 * k,
            ..FontMetrics::default()
        })
    }

    fn whitespace_advances(&self, scaling: FontScaling) -> MsdfResult<(f64, f64)> {
        let k = scaling.factor(1000);
        Ok((250.0 * k, 1000.0 * k))
    }

    fn glyph_count(&self) -> u32 {
        1
    }

    fn glyph_index(&self, c: char) -> Option<u32> {
        (c == 'a').then_some(0)
    }

    fn load_glyph(&self, glyph: GlyphRef, scaling: FontScaling) -> MsdfResult<(Shape, f64)> {
        if glyph != GlyphRef::Char('a') && glyph != GlyphRef::Index(0) {
            return Err(MsdfError::font("unknown glyph"));
        }
        let k = scaling.factor(1000);
        let shape = crate::collab::path::parse_svg_path("M0,0 L500,0 L500,500 L0,500 Z", 0.0)?;
        Ok((shape, 600.0 * k))
    }

    fn kerning(&self, _left: GlyphRef, _right: GlyphRef, _scaling: FontScaling) -> MsdfResult<f64> {
        Ok(0.0)
    }
}

#[test]
fn scaling_factors() {
    assert_eq!(FontScaling::None.factor(2048), 1.0);
    assert_eq!(FontScaling::EmNormalized.factor(2048), 1.0 / 2048.0);
    assert_eq!(FontScaling::Legacy.factor(2048), 1.0 / 64.0);
    assert_eq!(FontScaling::EmNormalized.factor(0), 1.0);
}

#[test]
fn glyph_sources_report_in_the_requested_scale() {
    let font = Boxes;
    let m = font.metrics(FontScaling::EmNormalized).unwrap();
    assert!((m.em_size - 1.0).abs() < 1e-12);
    assert!((m.descender_y + 0.2).abs() < 1e-12);
    let (_, advance) = font.load_glyph('a'.into(), FontScaling::None).unwrap();
    assert_eq!(advance, 600.0);
    assert!(font.load_glyph(GlyphRef::Index(3), FontScaling::None).is_err());
}

#[test]
fn variation_defaults_to_unavailable() {
    let mut font = Boxes;
    assert!(font.variation_axes().is_empty());
    assert!(matches!(
        font.set_variation("wght", 700.0),
        Err(MsdfError::Unavailable(_))
    ));
}

#[cfg(feature = "ttf")]
#[test]
fn garbage_bytes_are_a_font_error() {
    assert!(matches!(
        TtfFont::from_bytes(vec![0u8; 16], 0),
        Err(MsdfError::Font(_))
    ));
    assert!(matches!(
        TtfFont::open("/definitely/not/here.ttf"),
        Err(MsdfError::Other(_))
    ));
}
