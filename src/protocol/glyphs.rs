//! ASCII glyph table for the 4-digit 7-segment display
//!
//! Fixed mapping from the restricted set of displayable characters to the
//! code bytes the DIGITS-ASCII command (164) expects. The table is
//! case-sensitive: the device documents lowercase letters only (their codes
//! happen to be the uppercase ASCII values). Characters outside the set are
//! rejected, never silently substituted.

/// Character to glyph code, exactly as the OI documents it.
///
/// This table is the single definition shared by encoding and validation.
pub const GLYPH_TABLE: &[(char, u8)] = &[
    (' ', 32),
    ('!', 33),
    ('"', 34),
    ('#', 35),
    ('%', 37),
    ('&', 38),
    ('\'', 39),
    (',', 44),
    ('-', 45),
    ('.', 46),
    ('/', 47),
    ('0', 48),
    ('1', 49),
    ('2', 50),
    ('3', 51),
    ('4', 52),
    ('5', 53),
    ('6', 54),
    ('7', 55),
    ('8', 56),
    ('9', 57),
    (':', 58),
    (';', 59),
    ('=', 61),
    ('?', 63),
    ('a', 65),
    ('b', 66),
    ('c', 67),
    ('d', 68),
    ('e', 69),
    ('f', 70),
    ('g', 71),
    ('h', 72),
    ('i', 73),
    ('j', 74),
    ('k', 75),
    ('l', 76),
    ('m', 77),
    ('n', 78),
    ('o', 79),
    ('p', 80),
    ('q', 81),
    ('r', 82),
    ('s', 83),
    ('t', 84),
    ('u', 85),
    ('v', 86),
    ('w', 87),
    ('x', 88),
    ('y', 89),
    ('z', 90),
    ('[', 91),
    ('\\', 92),
    (']', 93),
    ('^', 94),
    ('_', 95),
    ('`', 96),
    ('{', 123),
    ('}', 125),
    ('~', 126),
];

/// Look up the glyph code for a character, or `None` if it is not displayable
pub fn glyph_code(c: char) -> Option<u8> {
    GLYPH_TABLE
        .iter()
        .find(|&&(ch, _)| ch == c)
        .map(|&(_, code)| code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_letters_map_to_uppercase_codes() {
        assert_eq!(glyph_code('a'), Some(65));
        assert_eq!(glyph_code('z'), Some(90));
        assert_eq!(glyph_code('h'), Some(72));
    }

    #[test]
    fn test_digits_and_punctuation() {
        assert_eq!(glyph_code('0'), Some(48));
        assert_eq!(glyph_code('9'), Some(57));
        assert_eq!(glyph_code('-'), Some(45));
        assert_eq!(glyph_code(' '), Some(32));
    }

    #[test]
    fn test_unsupported_characters() {
        // Uppercase is not in the table - lookup is case-sensitive
        assert_eq!(glyph_code('A'), None);
        assert_eq!(glyph_code('('), None);
        assert_eq!(glyph_code('$'), None);
        assert_eq!(glyph_code('\n'), None);
    }
}
