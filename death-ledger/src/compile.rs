//! Compiling an outline set into TrueType tables

use std::collections::{BTreeMap, HashMap};

use kurbo::{BezPath, CubicBez, PathEl, Point};
use sfnt_types::{compute_checksum, Fixed, GlyphId, Tag};
use sfnt_write::{
    compile_table,
    directory::TableDirectory,
    tables::{
        cmap::Cmap,
        glyf::{GlyfLocaBuilder, MalformedPath, SimpleGlyph},
        head::{Head, MacStyle},
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        maxp::Maxp,
        name::{name_id, Name, NameRecord},
        os2::{Os2, SelectionFlags, UNICODE_RANGE_BASIC_LATIN},
        post::Post,
    },
    FontBuilder, FontWrite, OtRound, TopLevelTable, Validate,
};

use crate::{
    config::BuildConfig,
    error::{Degeneracy, Error},
    outline::{OutlineSet, FIRST_CHAR, LAST_CHAR},
    style::Style,
};

/// Cubic segments are approximated by quadratics to within this distance.
const CUBIC_ACCURACY: f64 = 0.5;

const VERSION_STRING: &str = "Version 1.000";
const UNIQUE_ID_VERSION: &str = "1.000";

// 'OS/2' and 'post' values on the 1000-unit grid, scaled to the em
const SUBSCRIPT_SIZE: (f64, f64) = (650.0, 700.0);
const SUBSCRIPT_Y_OFFSET: f64 = 140.0;
const SUPERSCRIPT_SIZE: (f64, f64) = (650.0, 700.0);
const SUPERSCRIPT_Y_OFFSET: f64 = 350.0;
const STRIKEOUT_SIZE: f64 = 50.0;
const STRIKEOUT_POSITION: f64 = 280.0;
const UNDERLINE_POSITION: f64 = -90.0;
const UNDERLINE_THICKNESS: f64 = 55.0;

const PANOSE: [u8; 10] = [2, 0, 6, 3, 5, 4, 5, 2, 3, 4];
/// Bit 0 of `ulCodePageRange1`: Latin 1.
const CODE_PAGE_LATIN_1: u32 = 1;
const WIDTH_CLASS_NORMAL: u16 = 5;

/// One compiled top-level table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledTable {
    pub tag: Tag,
    pub data: Vec<u8>,
    /// The checksum of `data`; for 'head' this is computed with the
    /// checksum adjustment zeroed, which is how it is compiled.
    pub checksum: u32,
}

/// The compiled tables of one style, ready to be written.
#[derive(Clone, Debug)]
pub struct CompiledFont {
    style: Style,
    tables: BTreeMap<Tag, CompiledTable>,
}

/// Tables shared between the styles of one run.
///
/// Tables that depend only on inputs the styles have in common are compiled
/// once and reused.
#[derive(Debug, Default)]
pub struct TableCache {
    tables: HashMap<CacheKey, CompiledTable>,
    hits: usize,
}

/// Everything a cached table is compiled from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum CacheKey {
    Cmap(Vec<(char, GlyphId)>),
    Post {
        italic_angle: Fixed,
        underline_position: i16,
        underline_thickness: i16,
    },
}

/// A glyph ready for 'glyf', with its metrics checked.
struct CompiledGlyph {
    outline: SimpleGlyph,
    advance: u16,
}

impl CompiledTable {
    /// Validate and compile `table`.
    pub fn compile<T>(table: &T) -> Result<Self, Error>
    where
        T: FontWrite + Validate + TopLevelTable,
    {
        let data = compile_table(table)?;
        Ok(CompiledTable::new(T::TAG, data))
    }

    pub fn new(tag: Tag, data: Vec<u8>) -> Self {
        let checksum = compute_checksum(&data);
        CompiledTable {
            tag,
            data,
            checksum,
        }
    }

    /// The unpadded length of the table data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl CompiledFont {
    pub fn style(&self) -> Style {
        self.style
    }

    pub fn table(&self, tag: Tag) -> Option<&CompiledTable> {
        self.tables.get(&tag)
    }

    /// The tables, in tag order.
    pub fn tables(&self) -> impl Iterator<Item = &CompiledTable> + '_ {
        self.tables.values()
    }

    fn builder(&self) -> FontBuilder<'_> {
        let mut builder = FontBuilder::new();
        for table in self.tables.values() {
            builder.add_raw(table.tag, table.data.as_slice());
        }
        builder
    }

    /// The table directory the font will be written with.
    pub fn directory(&self) -> TableDirectory {
        self.builder().table_directory()
    }

    /// Serialize the font: offset table, table records, then the padded
    /// tables, with the checksum adjustment patched into 'head'.
    pub fn into_bytes(self) -> Vec<u8> {
        let bytes = self.builder().build();
        log::debug!("{}: wrote {} bytes", self.style, bytes.len());
        bytes
    }
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of times a table was reused instead of compiled.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// The number of distinct tables held.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    fn get_or_compile(
        &mut self,
        key: CacheKey,
        compile: impl FnOnce() -> Result<CompiledTable, Error>,
    ) -> Result<CompiledTable, Error> {
        if let Some(table) = self.tables.get(&key) {
            self.hits += 1;
            log::debug!("reusing compiled '{}'", table.tag);
            return Ok(table.clone());
        }
        let table = compile()?;
        self.tables.insert(key, table.clone());
        Ok(table)
    }
}

/// Compile one style into its ten tables.
pub fn compile_font(
    set: &OutlineSet,
    config: &BuildConfig,
    cache: &mut TableCache,
) -> Result<CompiledFont, Error> {
    let style = set.style();
    let metrics = set.metrics();
    let fit = Fit { style };

    let mut glyphs = Vec::with_capacity(set.num_glyphs());
    let mut glyf_builder = GlyfLocaBuilder::new();
    for (codepoint, glyph) in set.iter() {
        let outline = simple_glyph(style, codepoint, &glyph.to_bezpath())?;
        let points = outline.num_points();
        if points > u16::MAX as usize || outline.contours().len() > i16::MAX as usize {
            return Err(Error::GlyphTooComplex {
                style,
                codepoint,
                points,
            });
        }
        add_to_glyf(&mut glyf_builder, style, codepoint, &outline)?;
        let advance = fit.glyph(codepoint, "advance width", glyph.advance as i64)?;
        glyphs.push(CompiledGlyph { outline, advance });
    }
    let (glyf, loca, loca_format) = glyf_builder.build();
    let num_glyphs: u16 = fit.global("numGlyphs", glyphs.len() as i64)?;

    let inked = || glyphs.iter().filter(|g| !g.outline.contours().is_empty());
    let bbox = inked()
        .map(|g| g.outline.bbox)
        .reduce(|acc, bbox| acc.union(bbox))
        .unwrap_or_default();
    let min_left_side_bearing = inked()
        .map(|g| g.outline.bbox.x_min)
        .min()
        .unwrap_or_default();
    let min_right_side_bearing = inked()
        .map(|g| g.advance as i64 - g.outline.bbox.x_max as i64)
        .min()
        .unwrap_or_default();
    let x_max_extent = inked()
        .map(|g| g.outline.bbox.x_max)
        .max()
        .unwrap_or_default();
    let advance_width_max = glyphs.iter().map(|g| g.advance).max().unwrap_or_default();
    let average_advance: i32 = (glyphs.iter().map(|g| g.advance as f64).sum::<f64>()
        / glyphs.len() as f64)
        .ot_round();

    let ascender: i16 = fit.global("ascender", metrics.ascender as i64)?;
    let descender: i16 = fit.global("descender", metrics.descender as i64)?;
    let line_gap: i16 = fit.global("line gap", metrics.line_gap as i64)?;
    let upm = metrics.units_per_em;
    let scale = metrics.scale();
    let scaled = |value: f64| -> i16 { (value * scale).ot_round() };

    let hmtx = Hmtx::new(
        glyphs
            .iter()
            .map(|g| {
                // the bbox of an empty glyph is all zeros
                LongMetric::new(g.advance, g.outline.bbox.x_min)
            })
            .collect(),
        Vec::new(),
    );

    let (caret_slope_rise, caret_slope_run) = if style.is_italic() {
        let run: i32 = (upm as f64 * config.style.italic_slope()).ot_round();
        (
            fit.global("caret slope rise", upm as i64)?,
            fit.global("caret slope run", run as i64)?,
        )
    } else {
        (1, 0)
    };
    let hhea = Hhea {
        ascender,
        descender,
        line_gap,
        advance_width_max,
        min_left_side_bearing,
        min_right_side_bearing: fit.global("minRightSideBearing", min_right_side_bearing)?,
        x_max_extent,
        caret_slope_rise,
        caret_slope_run,
        caret_offset: 0,
        number_of_h_metrics: num_glyphs,
    };

    let mut mac_style = MacStyle::empty();
    mac_style.set(MacStyle::BOLD, style.is_bold());
    mac_style.set(MacStyle::ITALIC, style.is_italic());
    let timestamp = config.head_timestamp()?;
    let head = Head {
        units_per_em: upm,
        created: timestamp,
        modified: timestamp,
        x_min: bbox.x_min,
        y_min: bbox.y_min,
        x_max: bbox.x_max,
        y_max: bbox.y_max,
        mac_style,
        lowest_rec_ppem: 8,
        font_direction_hint: 2,
        index_to_loc_format: loca_format.index_to_loc_format(),
        ..Default::default()
    };

    let maxp = Maxp {
        max_points: fit.global(
            "maxPoints",
            glyphs.iter().map(|g| g.outline.num_points()).max().unwrap_or(0) as i64,
        )?,
        max_contours: fit.global(
            "maxContours",
            glyphs
                .iter()
                .map(|g| g.outline.contours().len())
                .max()
                .unwrap_or(0) as i64,
        )?,
        ..Maxp::new(num_glyphs)
    };

    let mut fs_selection = SelectionFlags::empty();
    fs_selection.set(SelectionFlags::BOLD, style.is_bold());
    fs_selection.set(SelectionFlags::ITALIC, style.is_italic());
    if fs_selection.is_empty() {
        fs_selection = SelectionFlags::REGULAR;
    }
    let os2 = Os2 {
        x_avg_char_width: fit.global("xAvgCharWidth", average_advance as i64)?,
        us_weight_class: style.weight_class(),
        us_width_class: WIDTH_CLASS_NORMAL,
        fs_type: 0,
        y_subscript_x_size: scaled(SUBSCRIPT_SIZE.0),
        y_subscript_y_size: scaled(SUBSCRIPT_SIZE.1),
        y_subscript_x_offset: 0,
        y_subscript_y_offset: scaled(SUBSCRIPT_Y_OFFSET),
        y_superscript_x_size: scaled(SUPERSCRIPT_SIZE.0),
        y_superscript_y_size: scaled(SUPERSCRIPT_SIZE.1),
        y_superscript_x_offset: 0,
        y_superscript_y_offset: scaled(SUPERSCRIPT_Y_OFFSET),
        y_strikeout_size: scaled(STRIKEOUT_SIZE),
        y_strikeout_position: scaled(STRIKEOUT_POSITION),
        s_family_class: 0,
        panose_10: PANOSE,
        ul_unicode_range_1: UNICODE_RANGE_BASIC_LATIN,
        ach_vend_id: config.vendor_tag()?,
        fs_selection,
        us_first_char_index: FIRST_CHAR as u16,
        us_last_char_index: LAST_CHAR as u16,
        s_typo_ascender: ascender,
        s_typo_descender: descender,
        s_typo_line_gap: line_gap,
        us_win_ascent: fit.global("usWinAscent", metrics.ascender.max(0) as i64)?,
        us_win_descent: fit.global("usWinDescent", (-metrics.descender).max(0) as i64)?,
        ul_code_page_range_1: CODE_PAGE_LATIN_1,
        sx_height: fit.global("x-height", metrics.x_height as i64)?,
        s_cap_height: fit.global("cap height", metrics.cap_height as i64)?,
        us_default_char: 0,
        us_break_char: ' ' as u16,
        ..Default::default()
    };

    let mappings: Vec<(char, GlyphId)> = set
        .codepoints()
        .zip(1u16..)
        .map(|(cp, gid)| (cp, GlyphId::new(gid)))
        .collect();
    let cmap = cache.get_or_compile(CacheKey::Cmap(mappings.clone()), || {
        CompiledTable::compile(&Cmap::from_mappings(mappings)?)
    })?;

    let italic_angle = if style.is_italic() {
        Fixed::from_f64(-config.style.italic_angle)
    } else {
        Fixed::ZERO
    };
    let (underline_position, underline_thickness) =
        (scaled(UNDERLINE_POSITION), scaled(UNDERLINE_THICKNESS));
    let post = cache.get_or_compile(
        CacheKey::Post {
            italic_angle,
            underline_position,
            underline_thickness,
        },
        || {
            CompiledTable::compile(&Post::new(
                italic_angle,
                underline_position,
                underline_thickness,
            ))
        },
    )?;

    let tables = [
        CompiledTable::compile(&os2)?,
        cmap,
        CompiledTable::compile(&glyf)?,
        CompiledTable::compile(&head)?,
        CompiledTable::compile(&hhea)?,
        CompiledTable::compile(&hmtx)?,
        CompiledTable::compile(&loca)?,
        CompiledTable::compile(&maxp)?,
        CompiledTable::compile(&name_table(config, style))?,
        post,
    ];
    log::info!(
        "{style}: compiled {num_glyphs} glyphs into {} tables",
        tables.len()
    );
    Ok(CompiledFont {
        style,
        tables: tables.into_iter().map(|t| (t.tag, t)).collect(),
    })
}

fn name_table(config: &BuildConfig, style: Style) -> Name {
    let family = config.family_name.as_str();
    let subfamily = style.subfamily_name();
    let postscript_name = format!("{}-{}", config.postscript_family(), style.postscript_suffix());
    Name::new(vec![
        NameRecord::windows_english(name_id::FAMILY_NAME, family),
        NameRecord::windows_english(name_id::SUBFAMILY_NAME, subfamily),
        NameRecord::windows_english(
            name_id::UNIQUE_ID,
            format!("{UNIQUE_ID_VERSION};{};{postscript_name}", config.vendor_id),
        ),
        NameRecord::windows_english(name_id::FULL_NAME, format!("{family} {subfamily}")),
        NameRecord::windows_english(name_id::VERSION_STRING, VERSION_STRING),
        NameRecord::windows_english(name_id::POSTSCRIPT_NAME, postscript_name),
    ])
}

/// Quantize an outline into a simple glyph.
fn simple_glyph(
    style: Style,
    codepoint: Option<char>,
    path: &BezPath,
) -> Result<SimpleGlyph, Error> {
    SimpleGlyph::from_bezpath(&to_quadratics(path)).map_err(|e| match e {
        MalformedPath::CoordinateOverflow(value) => Error::MetricOverflow {
            style,
            codepoint,
            field: "coordinate",
            value,
        },
        other => Error::DegenerateOutline {
            style,
            codepoint,
            reason: Degeneracy::Malformed(format!("{other:?}")),
        },
    })
}

fn add_to_glyf(
    builder: &mut GlyfLocaBuilder,
    style: Style,
    codepoint: Option<char>,
    outline: &SimpleGlyph,
) -> Result<(), Error> {
    builder
        .add_glyph(outline)
        .map(|_| ())
        .map_err(|source| Error::InvalidGlyph {
            style,
            codepoint,
            source,
        })
}

/// Replace every cubic segment of `path` with quadratics.
fn to_quadratics(path: &BezPath) -> BezPath {
    let mut out = BezPath::new();
    let mut start = Point::ZERO;
    let mut last = Point::ZERO;
    for el in path.elements() {
        match *el {
            PathEl::CurveTo(p1, p2, p3) => {
                for (_, _, quad) in CubicBez::new(last, p1, p2, p3).to_quads(CUBIC_ACCURACY) {
                    out.quad_to(quad.p1, quad.p2);
                }
                last = p3;
                continue;
            }
            PathEl::MoveTo(pt) => {
                start = pt;
                last = pt;
            }
            PathEl::LineTo(pt) | PathEl::QuadTo(_, pt) => last = pt,
            PathEl::ClosePath => last = start,
        }
        out.push(*el);
    }
    out
}

/// Range checks that report the style a value overflowed in.
struct Fit {
    style: Style,
}

impl Fit {
    fn global<T: TryFrom<i64>>(&self, field: &'static str, value: i64) -> Result<T, Error> {
        self.check(None, field, value)
    }

    fn glyph<T: TryFrom<i64>>(
        &self,
        codepoint: Option<char>,
        field: &'static str,
        value: i64,
    ) -> Result<T, Error> {
        self.check(codepoint, field, value)
    }

    fn check<T: TryFrom<i64>>(
        &self,
        codepoint: Option<char>,
        field: &'static str,
        value: i64,
    ) -> Result<T, Error> {
        T::try_from(value).map_err(|_| Error::MetricOverflow {
            style: self.style,
            codepoint,
            field,
            value: value as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use sfnt_types::LongDateTime;
    use sfnt_write::tables::{glyf::Glyf, loca::Loca};

    use super::*;
    use crate::{
        config::FontMetrics,
        outline::{CodepointGlyph, Contour},
        store::GlyphStore,
        transform,
    };

    fn regular() -> OutlineSet {
        GlyphStore::authored(&FontMetrics::default())
            .outline_set()
            .unwrap()
    }

    fn compile(style: Style) -> CompiledFont {
        let config = BuildConfig::default();
        let set = transform::derive(&regular(), style, &config.style).unwrap();
        compile_font(&set, &config, &mut TableCache::new()).unwrap()
    }

    fn be_u16(data: &[u8], pos: usize) -> u16 {
        u16::from_be_bytes([data[pos], data[pos + 1]])
    }

    fn be_i16(data: &[u8], pos: usize) -> i16 {
        i16::from_be_bytes([data[pos], data[pos + 1]])
    }

    #[test]
    fn tables_in_tag_order() {
        let font = compile(Style::Regular);
        let tags: Vec<_> = font.tables().map(|t| t.tag.to_string()).collect();
        assert_eq!(
            tags,
            ["OS/2", "cmap", "glyf", "head", "hhea", "hmtx", "loca", "maxp", "name", "post"]
        );
        for table in font.tables() {
            assert_eq!(table.checksum, compute_checksum(&table.data));
        }
    }

    #[test]
    fn glyph_ids_follow_codepoints() {
        let font = compile(Style::Regular);
        let cmap = Cmap::read(&font.table(Cmap::TAG).unwrap().data).unwrap();
        assert_eq!(cmap.map_codepoint(' '), Some(GlyphId::new(1)));
        assert_eq!(cmap.map_codepoint('A'), Some(GlyphId::new(34)));
        assert_eq!(cmap.map_codepoint('~'), Some(GlyphId::new(95)));
        assert_eq!(cmap.map_codepoint('\u{7f}'), None);

        let maxp = &font.table(Maxp::TAG).unwrap().data;
        assert_eq!(be_u16(maxp, 4), 96);
        let hhea = &font.table(Hhea::TAG).unwrap().data;
        assert_eq!(be_u16(hhea, 34), 96);
        // one long metric per glyph
        assert_eq!(font.table(Hmtx::TAG).unwrap().len(), 96 * 4);
        assert!(!font.table(Loca::TAG).unwrap().is_empty());
        assert!(!font.table(Glyf::TAG).unwrap().is_empty());
    }

    #[rstest]
    #[case(Style::Regular, 0, 0x40, 400)]
    #[case(Style::Bold, 1, 0x20, 700)]
    #[case(Style::Italic, 2, 0x01, 400)]
    #[case(Style::BoldItalic, 3, 0x21, 700)]
    fn style_bits(
        #[case] style: Style,
        #[case] mac_style: u16,
        #[case] fs_selection: u16,
        #[case] weight: u16,
    ) {
        let font = compile(style);
        let head = &font.table(Head::TAG).unwrap().data;
        assert_eq!(be_u16(head, 44), mac_style);
        assert_eq!(be_u16(head, 16), 0x000B);
        assert_eq!(be_u16(head, 18), 1000);
        let os2 = &font.table(Os2::TAG).unwrap().data;
        assert_eq!(be_u16(os2, 0), 4);
        assert_eq!(be_u16(os2, 4), weight);
        assert_eq!(be_u16(os2, 62), fs_selection);
        assert_eq!(&os2[58..62], b"NONE");
    }

    #[test]
    fn italic_caret_and_angle() {
        let upright = compile(Style::Bold);
        let hhea = &upright.table(Hhea::TAG).unwrap().data;
        assert_eq!((be_i16(hhea, 18), be_i16(hhea, 20)), (1, 0));
        let post = &upright.table(Post::TAG).unwrap().data;
        assert_eq!(&post[4..8], &[0, 0, 0, 0]);

        let italic = compile(Style::BoldItalic);
        let hhea = &italic.table(Hhea::TAG).unwrap().data;
        // round(1000 * tan(11 degrees))
        assert_eq!((be_i16(hhea, 18), be_i16(hhea, 20)), (1000, 194));
        let post = &italic.table(Post::TAG).unwrap().data;
        assert_eq!(&post[4..8], &Fixed::from_f64(-11.0).to_be_bytes());
        assert_eq!(be_i16(post, 8), -90);
        assert_eq!(be_i16(post, 10), 55);
    }

    #[test]
    fn timestamps_are_pinned() {
        let font = compile(Style::Regular);
        let head = &font.table(Head::TAG).unwrap().data;
        let expected = LongDateTime::new(3_786_912_000).to_be_bytes();
        assert_eq!(&head[20..28], &expected);
        assert_eq!(&head[28..36], &expected);
    }

    #[test]
    fn name_records() {
        let config = BuildConfig::default();
        let name = name_table(&config, Style::BoldItalic);
        let strings: Vec<_> = name
            .name_record
            .iter()
            .map(|r| (r.name_id, r.string.as_str()))
            .collect();
        assert_eq!(
            strings,
            [
                (1, "Death Ledger"),
                (2, "Bold Italic"),
                (3, "1.000;NONE;DeathLedger-BoldItalic"),
                (4, "Death Ledger Bold Italic"),
                (5, "Version 1.000"),
                (6, "DeathLedger-BoldItalic"),
            ]
        );
    }

    #[test]
    fn metrics_match_outlines() {
        let set = regular();
        let font = compile_font(&set, &BuildConfig::default(), &mut TableCache::new()).unwrap();
        let hmtx = &font.table(Hmtx::TAG).unwrap().data;
        // glyph 34 is 'A'
        let a = set.get('A').unwrap();
        assert_eq!(be_u16(hmtx, 34 * 4) as i32, a.advance);
        let lsb = be_i16(hmtx, 34 * 4 + 2) as f64;
        assert!((lsb - a.left_side_bearing()).abs() <= 1.0);
        // the space has no outline
        assert_eq!(be_u16(hmtx, 4), 280);
        assert_eq!(be_i16(hmtx, 6), 0);
    }

    #[test]
    fn cache_shares_tables_across_styles() {
        let config = BuildConfig::default();
        let regular = regular();
        let mut cache = TableCache::new();
        let fonts: Vec<_> = Style::ALL
            .into_iter()
            .map(|style| {
                let set = transform::derive(&regular, style, &config.style).unwrap();
                compile_font(&set, &config, &mut cache).unwrap()
            })
            .collect();
        // one cmap, and a post for each italic angle
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.hits(), 5);
        assert_eq!(fonts[0].table(Cmap::TAG), fonts[3].table(Cmap::TAG));
        assert_ne!(fonts[0].table(Post::TAG), fonts[2].table(Post::TAG));
    }

    #[test]
    fn cubics_become_quadratics() {
        let mut path = BezPath::new();
        path.move_to((100.0, 0.0));
        path.curve_to((100.0, 300.0), (400.0, 300.0), (400.0, 0.0));
        path.close_path();
        let quads = to_quadratics(&path);
        assert!(quads
            .elements()
            .iter()
            .all(|el| !matches!(el, PathEl::CurveTo(..))));
        assert!(matches!(quads.elements().last(), Some(PathEl::ClosePath)));

        let mut store = GlyphStore::authored(&FontMetrics::default());
        store.insert('c', CodepointGlyph::new(500, vec![Contour::from_path(path)]));
        let set = store.outline_set().unwrap();
        assert!(compile_font(&set, &BuildConfig::default(), &mut TableCache::new()).is_ok());
    }

    #[test]
    fn oversized_metrics_overflow() {
        let mut config = BuildConfig::default();
        config.metrics.ascender = 40_000;
        let set = GlyphStore::authored(&config.metrics).outline_set().unwrap();
        let err = compile_font(&set, &config, &mut TableCache::new()).unwrap_err();
        assert!(
            matches!(
                err,
                Error::MetricOverflow {
                    style: Style::Regular,
                    codepoint: None,
                    field: "ascender",
                    ..
                }
            ),
            "{err}"
        );
    }

    #[test]
    fn oversized_coordinates_overflow() {
        let mut store = GlyphStore::authored(&FontMetrics::default());
        let far = [
            Point::new(0.0, 0.0),
            Point::new(0.0, 100.0),
            Point::new(40_000.0, 0.0),
        ];
        store.insert('x', CodepointGlyph::new(600, vec![Contour::from_polygon(&far)]));
        let set = store.outline_set().unwrap();
        let err = compile_font(&set, &BuildConfig::default(), &mut TableCache::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::MetricOverflow {
                codepoint: Some('x'),
                field: "coordinate",
                ..
            }
        ));
    }

    #[test]
    fn glyph_validation_errors_are_kept() {
        // 17,000 squares, more points than a glyph can hold
        let mut path = BezPath::new();
        for i in 0..17_000 {
            let x = (i % 100) as f64 * 4.0;
            let y = (i / 100) as f64 * 4.0;
            path.move_to((x, y));
            path.line_to((x, y + 2.0));
            path.line_to((x + 2.0, y + 2.0));
            path.line_to((x + 2.0, y));
            path.close_path();
        }
        let outline = SimpleGlyph::from_bezpath(&path).unwrap();
        let err = add_to_glyf(
            &mut GlyfLocaBuilder::new(),
            Style::Bold,
            Some('#'),
            &outline,
        )
        .unwrap_err();
        assert!(
            matches!(
                err,
                Error::InvalidGlyph {
                    style: Style::Bold,
                    codepoint: Some('#'),
                    ..
                }
            ),
            "{err}"
        );
        let message = err.to_string();
        assert!(message.starts_with("Bold: glyph U+0023 '#' failed validation:"), "{message}");
        assert!(message.contains("too many points (68000)"), "{message}");
    }

    #[test]
    fn unrepresentable_timestamp_is_an_error() {
        let config = BuildConfig {
            timestamp: i64::MAX,
            ..Default::default()
        };
        let err = compile_font(&regular(), &config, &mut TableCache::new()).unwrap_err();
        assert!(matches!(err, Error::Config(_)), "{err}");
    }

    #[test]
    fn negative_advance_overflows() {
        let mut store = GlyphStore::authored(&FontMetrics::default());
        store.insert('-', CodepointGlyph::new(-5, Vec::new()));
        let set = store.outline_set().unwrap();
        let err = compile_font(&set, &BuildConfig::default(), &mut TableCache::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Regular: advance width of -5 does not fit in its field (glyph U+002D '-')"
        );
    }
}
