//! Helvetica-Bold advance widths and WinAnsi encoding.
//!
//! Helvetica-Bold is one of the 14 standard PDF fonts, so nothing is embedded:
//! the page references it by name and the text is encoded as WinAnsi bytes.
//! Widths are the Adobe AFM values in 1/1000 em.

use crate::error::RenderCause;

/// Widths for WinAnsi codes 0x20..=0x7E.
const ASCII_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, // space ! " # $ % & '
    333, 333, 389, 584, 278, 333, 278, 278, // ( ) * + , - . /
    556, 556, 556, 556, 556, 556, 556, 556, // 0-7
    556, 556, 333, 333, 584, 584, 584, 611, // 8 9 : ; < = > ?
    975, 722, 722, 722, 722, 667, 611, 778, // @ A-G
    722, 278, 556, 722, 611, 833, 722, 778, // H-O
    667, 778, 722, 667, 611, 722, 667, 944, // P-W
    667, 667, 611, 333, 278, 333, 584, 556, // X Y Z [ \ ] ^ _
    333, 556, 611, 556, 611, 556, 333, 611, // ` a-g
    611, 278, 278, 556, 278, 889, 611, 611, // h-o
    611, 611, 389, 556, 333, 611, 556, 778, // p-w
    556, 556, 500, 389, 280, 389, 584, // x y z { | } ~
];

/// Widths for WinAnsi codes 0xC0..=0xFF (Latin-1 letters).
const LATIN1_WIDTHS: [u16; 64] = [
    722, 722, 722, 722, 722, 722, 1000, 722, // À-Å Æ Ç
    667, 667, 667, 667, 278, 278, 278, 278, // È-Ë Ì-Ï
    722, 722, 778, 778, 778, 778, 778, 584, // Ð Ñ Ò-Ö ×
    778, 722, 722, 722, 722, 667, 667, 611, // Ø Ù-Ü Ý Þ ß
    556, 556, 556, 556, 556, 556, 889, 556, // à-å æ ç
    556, 556, 556, 556, 278, 278, 278, 278, // è-ë ì-ï
    611, 611, 611, 611, 611, 611, 611, 584, // ð ñ ò-ö ÷
    611, 611, 611, 611, 611, 556, 611, 556, // ø ù-ü ý þ ÿ
];

/// WinAnsi code and width for `ch`, if Helvetica-Bold can draw it.
pub fn glyph(ch: char) -> Option<(u8, u16)> {
    let code = ch as u32;
    match code {
        0x20..=0x7E => Some((code as u8, ASCII_WIDTHS[(code - 0x20) as usize])),
        0xA0 => Some((0xA0, 278)),
        0xC0..=0xFF => Some((code as u8, LATIN1_WIDTHS[(code - 0xC0) as usize])),
        _ => win_ansi_extra(ch),
    }
}

/// Characters WinAnsi places in 0x80..=0x9F.
fn win_ansi_extra(ch: char) -> Option<(u8, u16)> {
    let entry = match ch {
        '\u{2018}' => (0x91, 278),
        '\u{2019}' => (0x92, 278),
        '\u{2013}' => (0x96, 556),
        '\u{2014}' => (0x97, 1000),
        '\u{0160}' => (0x8A, 667),
        '\u{0152}' => (0x8C, 1000),
        '\u{017D}' => (0x8E, 611),
        '\u{0178}' => (0x9F, 667),
        _ => return None,
    };
    Some(entry)
}

/// Encode `text` as WinAnsi bytes and return its width at `font_size`.
///
/// Fails on the first character with no glyph.
pub fn encode_and_measure(text: &str, font_size: f32) -> Result<(Vec<u8>, f32), RenderCause> {
    let mut bytes = Vec::with_capacity(text.len());
    let mut units: u32 = 0;
    for ch in text.chars() {
        let (code, width) = glyph(ch).ok_or(RenderCause::UnsupportedGlyph { ch })?;
        bytes.push(code);
        units += u32::from(width);
    }
    Ok((bytes, units as f32 * font_size / 1000.0))
}
