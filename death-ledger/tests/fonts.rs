//! The written fonts, read back with our own reader and with ttf-parser

use death_ledger::{
    assets,
    config::BuildConfig,
    outline::coverage,
    pipeline,
    store::GlyphStore,
    Style,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use sfnt_types::{compute_checksum, Tag, CHECKSUM_MAGIC};
use sfnt_write::directory::{verify_checksum_adjustment, TableDirectory};
use ttf_parser::{name_id, Face, GlyphId, OutlineBuilder};

fn font_bytes(style: Style) -> Vec<u8> {
    let config = BuildConfig::default();
    let mut artifacts = pipeline::check(&config).unwrap();
    artifacts
        .swap_remove(&assets::font_file_name(&config, style))
        .unwrap()
}

#[derive(Default)]
struct ContourCounter {
    contours: usize,
    segments: usize,
}

impl OutlineBuilder for ContourCounter {
    fn move_to(&mut self, _x: f32, _y: f32) {}
    fn line_to(&mut self, _x: f32, _y: f32) {
        self.segments += 1;
    }
    fn quad_to(&mut self, _x1: f32, _y1: f32, _x: f32, _y: f32) {
        self.segments += 1;
    }
    fn curve_to(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32, _x: f32, _y: f32) {
        self.segments += 1;
    }
    fn close(&mut self) {
        self.contours += 1;
    }
}

#[rstest]
#[case(Style::Regular)]
#[case(Style::Bold)]
#[case(Style::Italic)]
#[case(Style::BoldItalic)]
fn every_codepoint_is_mapped(#[case] style: Style) {
    let bytes = font_bytes(style);
    let face = Face::parse(&bytes, 0).unwrap();
    assert_eq!(face.number_of_glyphs(), 96);
    for (i, cp) in coverage().enumerate() {
        let gid = face.glyph_index(cp).unwrap();
        assert_eq!(gid, GlyphId(i as u16 + 1), "{cp:?}");
        assert!(face.glyph_hor_advance(gid).unwrap() > 0, "{cp:?}");
    }
    assert_eq!(face.glyph_index('\u{7f}'), None);
    assert_eq!(face.glyph_index('\u{e9}'), None);
}

#[rstest]
#[case(Style::Regular, false, false)]
#[case(Style::Bold, true, false)]
#[case(Style::Italic, false, true)]
#[case(Style::BoldItalic, true, true)]
fn style_is_declared(#[case] style: Style, #[case] bold: bool, #[case] italic: bool) {
    let bytes = font_bytes(style);
    let face = Face::parse(&bytes, 0).unwrap();
    assert_eq!(face.is_bold(), bold);
    assert_eq!(face.is_italic(), italic);
    let postscript_name = face
        .names()
        .into_iter()
        .filter(|name| name.name_id == name_id::POST_SCRIPT_NAME)
        .find_map(|name| name.to_string());
    assert_eq!(
        postscript_name,
        Some(format!("DeathLedger-{}", style.postscript_suffix()))
    );
}

#[test]
fn outlines_decode() {
    let bytes = font_bytes(Style::Regular);
    let face = Face::parse(&bytes, 0).unwrap();
    let store = GlyphStore::authored(&BuildConfig::default().metrics);

    let mut space = ContourCounter::default();
    assert!(face
        .outline_glyph(face.glyph_index(' ').unwrap(), &mut space)
        .is_none());

    for cp in ['A', 'g', '0', '%', '~'] {
        let mut counter = ContourCounter::default();
        let bbox = face
            .outline_glyph(face.glyph_index(cp).unwrap(), &mut counter)
            .unwrap();
        assert_eq!(counter.contours, store.get(cp).unwrap().contours.len(), "{cp:?}");
        assert!(counter.segments >= 2 * counter.contours);
        assert!(bbox.width() > 0 && bbox.height() > 0);
    }

    // .notdef keeps its outline
    let mut notdef = ContourCounter::default();
    assert!(face.outline_glyph(GlyphId(0), &mut notdef).is_some());
    assert_eq!(notdef.contours, store.notdef().contours.len());
}

#[test]
fn advances_match_the_outlines() {
    let config = BuildConfig::default();
    let regular = GlyphStore::authored(&config.metrics)
        .outline_set()
        .unwrap();
    for style in Style::ALL {
        let set = death_ledger::transform::derive(&regular, style, &config.style).unwrap();
        let bytes = font_bytes(style);
        let face = Face::parse(&bytes, 0).unwrap();
        for (cp, glyph) in set.iter().filter_map(|(cp, g)| Some((cp?, g))) {
            let gid = face.glyph_index(cp).unwrap();
            assert_eq!(
                face.glyph_hor_advance(gid).map(i32::from),
                Some(glyph.advance),
                "{style} {cp:?}"
            );
        }
    }
}

#[test]
fn bold_is_heavier_and_italic_leans() {
    let regular = font_bytes(Style::Regular);
    let bold = font_bytes(Style::Bold);
    let italic = font_bytes(Style::Italic);
    let regular = Face::parse(&regular, 0).unwrap();
    let bold = Face::parse(&bold, 0).unwrap();
    let italic = Face::parse(&italic, 0).unwrap();

    let h = regular.glyph_index('H').unwrap();
    let bbox = |face: &Face| face.glyph_bounding_box(h).unwrap();
    assert!(bbox(&bold).width() > bbox(&regular).width());
    assert_eq!(bbox(&italic).y_max, bbox(&regular).y_max);
    // the tops of the stems move right by about 700 * tan(11 degrees)
    assert!(bbox(&italic).x_max > bbox(&regular).x_max + 100);
}

#[rstest]
#[case(Style::Regular)]
#[case(Style::BoldItalic)]
fn directory_round_trips(#[case] style: Style) {
    let bytes = font_bytes(style);
    let directory = TableDirectory::read(&bytes).unwrap();
    assert_eq!(directory.num_tables(), 10);
    assert_eq!(
        (
            directory.search_range,
            directory.entry_selector,
            directory.range_shift
        ),
        (128, 3, 32)
    );

    let mut end = 12 + 16 * directory.table_records.len();
    let mut previous: Option<Tag> = None;
    for record in &directory.table_records {
        // sorted, 4-byte aligned and contiguous
        assert!(previous.map_or(true, |tag| tag < record.tag));
        previous = Some(record.tag);
        assert_eq!(record.offset % 4, 0);
        assert_eq!(record.offset as usize, end);
        end = (record.offset + record.length) as usize;
        end += (4 - end % 4) % 4;

        let data = directory.table_data(&bytes, record.tag).unwrap();
        assert_eq!(data.len(), record.length as usize);
        if record.tag != Tag::new(b"head") {
            assert_eq!(compute_checksum(data), record.checksum, "{}", record.tag);
        }
    }
    assert_eq!(end, bytes.len());
    assert_eq!(compute_checksum(&bytes), CHECKSUM_MAGIC);
    assert!(verify_checksum_adjustment(&bytes).is_ok());
}

#[test]
fn head_checksum_excludes_the_adjustment() {
    let bytes = font_bytes(Style::Italic);
    let directory = TableDirectory::read(&bytes).unwrap();
    let record = directory.record(Tag::new(b"head")).unwrap();
    let mut head = directory.table_data(&bytes, record.tag).unwrap().to_vec();
    let adjustment = u32::from_be_bytes([head[8], head[9], head[10], head[11]]);
    assert_ne!(adjustment, 0);
    head[8..12].fill(0);
    assert_eq!(compute_checksum(&head), record.checksum);
}

#[test]
fn fonts_differ_between_styles() {
    let fonts: Vec<_> = Style::ALL.into_iter().map(font_bytes).collect();
    for (i, a) in fonts.iter().enumerate() {
        for b in &fonts[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
