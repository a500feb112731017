//! Static glyph-width tables for the two standard PDF fonts the report uses.
//!
//! Widths come from the Adobe core-font AFM files, in thousandths of an em.
//! Tables cover ASCII 0x20..=0x7E (95 printable characters); index = (char as usize) - 32,
//! plus the WinAnsi punctuation block at 0x80..=0x9F (curly quotes, dashes, ellipsis, euro).
//! Anything else is measured at `fallback_width`.

// ────────────────────────────────────────────────────────────────────────────
// Font enum
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    /// PostScript name written into the font dictionary.
    pub fn base_name(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Key under the page resources' `/Font` dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }

    fn table(self) -> &'static FontMetricTable {
        match self {
            Font::Helvetica => &HELVETICA_TABLE,
            Font::HelveticaBold => &HELVETICA_BOLD_TABLE,
        }
    }

    /// Rendered width of `s` in points at `size_pt`.
    pub fn measure(self, s: &str, size_pt: f32) -> f32 {
        self.table().measure_em(s) * size_pt
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WinAnsi encoding
// ────────────────────────────────────────────────────────────────────────────

/// Characters WinAnsiEncoding places at 0x80..=0x9F, where Latin-1 has control codes.
/// `FontMetricTable::extras` is indexed in the same order.
const WIN_ANSI_EXTRAS: [(char, u8); 27] = [
    ('\u{20AC}', 0x80), // €
    ('\u{201A}', 0x82), // ‚
    ('\u{0192}', 0x83), // ƒ
    ('\u{201E}', 0x84), // „
    ('\u{2026}', 0x85), // …
    ('\u{2020}', 0x86), // †
    ('\u{2021}', 0x87), // ‡
    ('\u{02C6}', 0x88), // ˆ
    ('\u{2030}', 0x89), // ‰
    ('\u{0160}', 0x8A), // Š
    ('\u{2039}', 0x8B), // ‹
    ('\u{0152}', 0x8C), // Œ
    ('\u{017D}', 0x8E), // Ž
    ('\u{2018}', 0x91), // ‘
    ('\u{2019}', 0x92), // ’
    ('\u{201C}', 0x93), // “
    ('\u{201D}', 0x94), // ”
    ('\u{2022}', 0x95), // •
    ('\u{2013}', 0x96), // –
    ('\u{2014}', 0x97), // —
    ('\u{02DC}', 0x98), // ˜
    ('\u{2122}', 0x99), // ™
    ('\u{0161}', 0x9A), // š
    ('\u{203A}', 0x9B), // ›
    ('\u{0153}', 0x9C), // œ
    ('\u{017E}', 0x9E), // ž
    ('\u{0178}', 0x9F), // Ÿ
];

fn extras_index(c: char) -> Option<usize> {
    WIN_ANSI_EXTRAS.iter().position(|(ch, _)| *ch == c)
}

/// Single WinAnsi byte for `c`, or `None` if the encoding has no slot for it.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    match u32::from(c) {
        code @ (0x20..=0x7E | 0xA0..=0xFF) => Some(code as u8),
        _ => extras_index(c).map(|i| WIN_ANSI_EXTRAS[i].1),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Metric table
// ────────────────────────────────────────────────────────────────────────────

pub struct FontMetricTable {
    widths: [u16; 95],
    /// Widths for `WIN_ANSI_EXTRAS`, same order.
    extras: [u16; 27],
    fallback_width: u16,
}

impl FontMetricTable {
    /// Width of a string in em units.
    pub fn measure_em(&self, s: &str) -> f32 {
        let thousandths: u32 = s
            .chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    u32::from(self.widths[code - 32])
                } else if let Some(i) = extras_index(c) {
                    u32::from(self.extras[i])
                } else {
                    u32::from(self.fallback_width)
                }
            })
            .sum();
        thousandths as f32 / 1000.0
    }
}

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    #[rustfmt::skip]
    extras: [
        // €    ‚    ƒ    „    …     †    ‡    ˆ    ‰     Š    ‹    Œ     Ž
        556, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 611,
        // ‘    ’    “    ”    •    –    —     ˜    ™     š    ›    œ    ž    Ÿ
        222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 500, 667,
    ],
    fallback_width: 556,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    #[rustfmt::skip]
    extras: [
        // €    ‚    ƒ    „    …     †    ‡    ˆ    ‰     Š    ‹    Œ     Ž
        556, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 611,
        // ‘    ’    “    ”    •    –    —     ˜    ™     š    ›    œ    ž    Ÿ
        278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 500, 667,
    ],
    fallback_width: 611,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_width() {
        let w = Font::Helvetica.measure(" ", 10.0);
        assert!((w - 2.78).abs() < 0.001, "width was {w}");
    }

    #[test]
    fn test_bold_is_wider() {
        let text = "Performance Metrics";
        assert!(Font::HelveticaBold.measure(text, 12.0) > Font::Helvetica.measure(text, 12.0));
    }

    #[test]
    fn test_non_ascii_uses_fallback() {
        let w = Font::Helvetica.measure("é", 1.0);
        assert!((w - 0.556).abs() < 0.001);
    }

    #[test]
    fn test_typographic_punctuation_has_real_widths() {
        // ’ is narrower than the fallback; — and … are a full em.
        assert!((Font::Helvetica.measure("\u{2019}", 1.0) - 0.222).abs() < 0.001);
        assert!((Font::Helvetica.measure("\u{2014}", 1.0) - 1.0).abs() < 0.001);
        assert!((Font::HelveticaBold.measure("\u{2026}", 1.0) - 1.0).abs() < 0.001);
        assert!((Font::HelveticaBold.measure("\u{201C}", 1.0) - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_win_ansi_punctuation_block() {
        assert_eq!(win_ansi_byte('\u{2019}'), Some(0x92));
        assert_eq!(win_ansi_byte('\u{201C}'), Some(0x93));
        assert_eq!(win_ansi_byte('\u{2013}'), Some(0x96));
        assert_eq!(win_ansi_byte('\u{20AC}'), Some(0x80));
        assert_eq!(win_ansi_byte('é'), Some(0xE9));
        assert_eq!(win_ansi_byte('\u{0085}'), None);
        assert_eq!(win_ansi_byte('日'), None);
    }

    #[test]
    fn test_width_scales_with_size() {
        let small = Font::Helvetica.measure("Attention", 10.0);
        let large = Font::Helvetica.measure("Attention", 20.0);
        assert!((large - 2.0 * small).abs() < 0.01);
    }
}
