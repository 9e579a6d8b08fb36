//! Advance widths of the standard Helvetica face, in 1/1000 em, for the
//! printable ASCII range. Anything else is measured as an average glyph.

const FIRST: u8 = b' ';

#[rustfmt::skip]
const WIDTHS: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

const FALLBACK: u16 = 556;

/// Helvetica-Bold runs roughly this much wider than the regular face.
const BOLD_FACTOR: f64 = 1.06;

fn advance(c: char) -> u16 {
    match u8::try_from(c) {
        Ok(b) if (FIRST..=b'~').contains(&b) => WIDTHS[(b - FIRST) as usize],
        _ => FALLBACK,
    }
}

/// Width of `text` set at `size` units.
pub fn text_width(text: &str, size: f64, bold: bool) -> f64 {
    let em: u32 = text.chars().map(|c| advance(c) as u32).sum();
    let width = em as f64 * size / 1000.0;
    if bold {
        width * BOLD_FACTOR
    } else {
        width
    }
}

/// Bytes for a base-14 font string; characters outside ASCII become `?`.
pub fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c as u8 } else { b'?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_share_one_width() {
        assert_eq!(text_width("0123456789", 10.0, false), 55.6);
    }

    #[test]
    fn table_lines_up_with_ascii() {
        assert_eq!(advance('A'), 667);
        assert_eq!(advance('W'), 944);
        assert_eq!(advance('a'), 556);
        assert_eq!(advance('i'), 222);
        assert_eq!(advance('~'), 584);
        assert_eq!(advance('é'), FALLBACK);
    }

    #[test]
    fn bold_is_wider() {
        assert!(text_width("Mean", 12.0, true) > text_width("Mean", 12.0, false));
    }

    #[test]
    fn encode_replaces_non_ascii() {
        assert_eq!(encode("64 bits"), b"64 bits".to_vec());
        assert_eq!(encode("≈5.7"), b"?5.7".to_vec());
    }
}
