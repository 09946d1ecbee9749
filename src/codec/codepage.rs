//! Single-byte code pages used by legacy clipboard text
//!
//! `CF_TEXT` is stored in the ANSI code page (Windows-1252 on Western
//! systems) and `CF_OEMTEXT` in the OEM code page (CP437).

/// Decode Windows-1252 bytes
pub fn decode_windows1252(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| windows1252_to_char(b)).collect()
}

/// Decode CP437 bytes
pub fn decode_cp437(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| cp437_to_char(b)).collect()
}

/// Map a Windows-1252 byte to its character
pub fn windows1252_to_char(b: u8) -> char {
    if b < 128 {
        return b as char;
    }
    // 160-255 coincide with Latin-1
    if b >= 160 {
        return char::from(b);
    }

    match b {
        128 => '€',
        130 => '‚',
        131 => 'ƒ',
        132 => '„',
        133 => '…',
        134 => '†',
        135 => '‡',
        136 => 'ˆ',
        137 => '‰',
        138 => 'Š',
        139 => '‹',
        140 => 'Œ',
        142 => 'Ž',
        145 => '\u{2018}',
        146 => '\u{2019}',
        147 => '\u{201C}',
        148 => '\u{201D}',
        149 => '•',
        150 => '–',
        151 => '—',
        152 => '˜',
        153 => '™',
        154 => 'š',
        155 => '›',
        156 => 'œ',
        158 => 'ž',
        159 => 'Ÿ',
        // 129, 141, 143, 144, 157 are unassigned
        _ => '?',
    }
}

/// Map a CP437 byte to its character
pub fn cp437_to_char(b: u8) -> char {
    const CP437_HIGH: [char; 128] = [
        'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å', 'É', 'æ', 'Æ', 'ô', 'ö', 'ò',
        'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ', 'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½',
        '¼', '¡', '«', '»', '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐', '└', '┴',
        '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧', '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫',
        '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀', 'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ',
        'ε', '∩', '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{00A0}',
    ];

    match b {
        0..=126 => b as char,
        127 => '⌂',
        _ => CP437_HIGH[(b - 128) as usize],
    }
}
