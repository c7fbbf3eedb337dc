//! Built-in thread palettes.

/// Name of the palette used when nothing else is configured.
pub const DEFAULT_PALETTE: &str = "stitch";

/// Names accepted by [`Palette::builtin`](super::Palette::builtin).
pub const BUILTIN_PALETTES: &[&str] = &["stitch", "dmc-basic"];

type Entry = (&'static str, u8, u8, u8);

/// A built-in palette: colour entries plus optional chart symbols, matched
/// to entries by position.
#[derive(Clone, Copy)]
pub(super) struct Table {
    pub entries: &'static [Entry],
    pub symbols: &'static [char],
}

pub(super) const DEFAULT_TABLE: Table = Table {
    entries: STITCH,
    symbols: &[],
};

/// General-purpose stitching palette: contour black first, then skin tones,
/// neutrals, blues, golds, greens, pinks/red and browns.
const STITCH: &[Entry] = &[
    ("Black-310", 0, 0, 0),
    ("Skin-Light", 255, 220, 177),
    ("Skin-Medium", 241, 194, 125),
    ("Skin-Dark", 210, 150, 90),
    ("White", 255, 255, 255),
    ("Gray-Light", 230, 230, 230),
    ("Gray-Medium", 150, 150, 150),
    ("Blue-Light", 135, 206, 250),
    ("Blue-Medium", 70, 130, 180),
    ("Blue-Dark", 30, 70, 120),
    ("Gold-Bright", 255, 223, 0),
    ("Gold-Medium", 218, 165, 32),
    ("Gold-Dark", 184, 134, 11),
    ("Green-Light", 144, 238, 144),
    ("Green-Medium", 60, 179, 113),
    ("Pink-Light", 255, 182, 193),
    ("Pink-Medium", 255, 105, 180),
    ("Red-Dark", 220, 20, 60),
    ("Brown-Light", 139, 90, 43),
    ("Brown-Medium", 101, 67, 33),
    ("Brown-Dark", 70, 40, 20),
];

/// Common DMC floss colours.
const DMC_BASIC: &[Entry] = &[
    ("White", 0xFF, 0xFF, 0xFF),
    ("Ecru", 0xF0, 0xE6, 0x8C),
    ("Light Yellow", 0xFF, 0xFF, 0x99),
    ("Yellow", 0xFF, 0xFF, 0x00),
    ("Light Orange", 0xFF, 0xB3, 0x47),
    ("Orange", 0xFF, 0xA5, 0x00),
    ("Light Coral", 0xF0, 0x80, 0x80),
    ("Coral", 0xFF, 0x7F, 0x50),
    ("Pink", 0xFF, 0xC0, 0xCB),
    ("Light Pink", 0xFF, 0xB6, 0xC1),
    ("Red", 0xFF, 0x00, 0x00),
    ("Dark Red", 0x8B, 0x00, 0x00),
    ("Light Blue", 0xAD, 0xD8, 0xE6),
    ("Blue", 0x00, 0x00, 0xFF),
    ("Dark Blue", 0x00, 0x00, 0x8B),
    ("Navy", 0x00, 0x00, 0x80),
    ("Light Green", 0x90, 0xEE, 0x90),
    ("Green", 0x00, 0x80, 0x00),
    ("Dark Green", 0x00, 0x64, 0x00),
    ("Purple", 0x80, 0x00, 0x80),
    ("Light Purple", 0xDD, 0xA0, 0xDD),
    ("Brown", 0xA5, 0x2A, 0x2A),
    ("Light Brown", 0xD2, 0xB4, 0x8C),
    ("Gray", 0x80, 0x80, 0x80),
    ("Light Gray", 0xD3, 0xD3, 0xD3),
    ("Dark Gray", 0xA9, 0xA9, 0xA9),
    ("Black", 0x00, 0x00, 0x00),
];

/// Chart symbols for [`DMC_BASIC`], in the same order.
const DMC_SYMBOLS: &[char] = &[
    '□', '○', '△', '▲', '◇', '◆', '☆', '★', '♡', '♥', '●', '■', '◯', '▼', '▽', '◀', '▶',
    '◈', '◉', '♦', '♢', '▣', '▤', '▥', '▦', '▧', '█',
];

pub(super) fn lookup(name: &str) -> Option<Table> {
    match name.trim().to_ascii_lowercase().as_str() {
        "stitch" => Some(DEFAULT_TABLE),
        "dmc-basic" | "dmc" => Some(Table {
            entries: DMC_BASIC,
            symbols: DMC_SYMBOLS,
        }),
        _ => None,
    }
}
