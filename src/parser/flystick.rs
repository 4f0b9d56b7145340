//! Parser for Flystick lines.
//!
//! Wire shape:
//!
//! ```text
//! 6df2 <calibrated> <count> [id qu nbt nan][x y z][r0 .. r8][btn .. analog ..] ...
//! ```
//!
//! The first integer is the controller's calibrated Flystick count and is
//! not used; the second is the number of entities in the line. Buttons
//! are packed 32 per integer token, LSB first, followed by the analog
//! values. Four sections are consumed per Flystick even when the device
//! has neither buttons nor analogs (the input section is then empty).

use std::collections::BTreeMap;

use crate::core::constants::BUTTONS_PER_WORD;
use crate::core::{excerpt, ParseError};
use crate::model::{Body, Flystick};

use super::body::{parse_location, parse_rotation};
use super::tokenizer::{parse_button_word, parse_f32, parse_i32, sections, token};

/// Sections per Flystick entity: meta, location, rotation, inputs.
const SECTIONS_PER_FLYSTICK: usize = 4;

/// Parse a `6df2` line into Flysticks keyed by wire ID.
pub fn parse_flysticks(line: &str) -> Result<(i32, BTreeMap<i32, Flystick>), ParseError> {
    let mut split = line.splitn(4, ' ');
    let _prefix = split.next();
    let _calibrated = split.next().ok_or(ParseError::MissingTokens {
        expected: 2,
        excerpt: excerpt(line),
    })?;
    let count_tok = split.next().ok_or(ParseError::MissingTokens {
        expected: 3,
        excerpt: excerpt(line),
    })?;
    let count = parse_i32(count_tok, line)?;
    if count <= 0 {
        return Ok((0, BTreeMap::new()));
    }

    let rest = split.next().ok_or(ParseError::MissingTokens {
        expected: 4,
        excerpt: excerpt(line),
    })?;
    let blocks = sections(rest);

    // Sections are indexed rather than chunked: a trailing empty input
    // section ("[]") is swallowed by the bracket trim, so the last
    // Flystick of a line may legitimately be one section short.
    let section = |idx: usize| -> Result<&str, ParseError> {
        blocks.get(idx).copied().ok_or(ParseError::SectionCount {
            expected: idx + 1,
            found: blocks.len(),
            excerpt: excerpt(line),
        })
    };

    let mut flysticks = BTreeMap::new();
    let mut blk = 0;
    for _ in 0..count {
        let m: Vec<&str> = section(blk)?.split(' ').collect();
        let id = parse_i32(token(&m, 0, line)?, line)?;
        let quality = parse_f32(token(&m, 1, line)?, line)?;
        let num_buttons = parse_i32(token(&m, 2, line)?, line)?.max(0) as usize;
        let num_analogs = parse_i32(token(&m, 3, line)?, line)?.max(0) as usize;

        let body = Body::new(
            id,
            quality,
            parse_location(section(blk + 1)?, line)?,
            parse_rotation(section(blk + 2)?, line)?,
        );

        let (buttons, analogs) = if num_buttons > 0 || num_analogs > 0 {
            parse_inputs(section(blk + 3)?, num_buttons, num_analogs, line)?
        } else {
            (Vec::new(), Vec::new())
        };
        blk += SECTIONS_PER_FLYSTICK;

        flysticks.insert(id, Flystick::new(body, buttons, analogs));
    }
    Ok((count, flysticks))
}

/// Decode the input section: packed button words, then analog values.
fn parse_inputs(
    section: &str,
    num_buttons: usize,
    num_analogs: usize,
    line: &str,
) -> Result<(Vec<bool>, Vec<f32>), ParseError> {
    let tokens: Vec<&str> = section.split(' ').collect();

    let button_words = num_buttons.div_ceil(BUTTONS_PER_WORD);
    let mut buttons = Vec::with_capacity(num_buttons);
    'words: for slot in 0..button_words {
        let mut word = parse_button_word(token(&tokens, slot, line)?, line)?;
        for _ in 0..BUTTONS_PER_WORD {
            buttons.push(word & 0x01 != 0);
            if buttons.len() == num_buttons {
                break 'words;
            }
            word >>= 1;
        }
    }

    let mut analogs = Vec::with_capacity(num_analogs);
    for i in 0..num_analogs {
        analogs.push(parse_f32(token(&tokens, button_words + i, line)?, line)?);
    }
    Ok((buttons, analogs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_decode_lsb_first() {
        // Bits 0 and 9 set out of 10 buttons: 2^0 + 2^9 = 513.
        let line = "6df2 1 1 [0 1.0 10 0][0 0 0][1 0 0 0 1 0 0 0 1][513]";
        let (count, sticks) = parse_flysticks(line).unwrap();
        assert_eq!(count, 1);
        let f = &sticks[&0];
        assert_eq!(f.num_buttons(), 10);
        for i in 0..10 {
            assert_eq!(f.button(i), Some(i == 0 || i == 9), "button {i}");
        }
    }

    #[test]
    fn more_than_32_buttons_span_two_words() {
        // 34 buttons: word 0 has bit 31, word 1 has bit 1 (button 33).
        let word0 = (1u32 << 31).to_string();
        let line =
            format!("6df2 1 1 [0 1.0 34 0][0 0 0][1 0 0 0 1 0 0 0 1][{word0} 2]");
        let (_, sticks) = parse_flysticks(&line).unwrap();
        let f = &sticks[&0];
        assert_eq!(f.button(31), Some(true));
        assert_eq!(f.button(32), Some(false));
        assert_eq!(f.button(33), Some(true));
        assert_eq!(f.button(0), Some(false));
    }

    #[test]
    fn analogs_follow_button_words() {
        let line = "6df2 1 1 [1 0.9 2 3][0 0 0][1 0 0 0 1 0 0 0 1][3 0.5 -1.0 0.25]";
        let (_, sticks) = parse_flysticks(line).unwrap();
        let f = &sticks[&1];
        assert_eq!(f.button(0), Some(true));
        assert_eq!(f.button(1), Some(true));
        assert_eq!(f.analogs(), &[0.5, -1.0, 0.25]);
    }

    #[test]
    fn no_inputs_still_consumes_four_sections() {
        let line = "6df2 1 2 [0 1.0 0 0][0 0 0][1 0 0 0 1 0 0 0 1][] \
                    [1 1.0 0 0][9 9 9][1 0 0 0 1 0 0 0 1][]";
        let (count, sticks) = parse_flysticks(line).unwrap();
        assert_eq!(count, 2);
        assert_eq!(sticks[&1].body.loc, [9.0, 9.0, 9.0]);
        assert_eq!(sticks[&0].num_buttons(), 0);
    }

    #[test]
    fn zero_count_is_empty() {
        let (count, sticks) = parse_flysticks("6df2 2 0").unwrap();
        assert_eq!(count, 0);
        assert!(sticks.is_empty());
    }

    #[test]
    fn untracked_flystick_keeps_inputs() {
        // A hidden Flystick still reports button state, quality -1.
        let line = "6df2 1 1 [0 -1.0 2 0][0 0 0][1 0 0 0 1 0 0 0 1][2]";
        let (_, sticks) = parse_flysticks(line).unwrap();
        let f = &sticks[&0];
        assert!(!f.body.is_tracked());
        assert_eq!(f.button(1), Some(true));
    }
}
