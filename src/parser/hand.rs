//! Parser for fingertracking hand lines.
//!
//! Wire shape:
//!
//! ```text
//! gl <count> [id qu lr nf][x y z][r0 .. r8] ([x y z][r0 .. r8][ro lo a_om lm a_mi li]){nf} ...
//! ```
//!
//! Each hand declares its finger count `nf` in the meta section and is
//! followed by three sections per finger: local location, local rotation,
//! and the six geometry scalars. The reported hand count is the last wire
//! ID plus one, matching the controller's numbering.

use std::collections::BTreeMap;

use crate::core::{excerpt, ParseError};
use crate::model::{Body, Finger, Hand, HandSide};

use super::body::{parse_location, parse_rotation};
use super::tokenizer::{parse_f32, parse_i32, sections, token};

/// Fixed sections per hand before its fingers: meta, location, rotation.
const HAND_HEAD_SECTIONS: usize = 3;

/// Sections per finger: location, rotation, geometry.
const SECTIONS_PER_FINGER: usize = 3;

/// Parse a `gl` line into hands keyed by wire ID.
pub fn parse_hands(line: &str) -> Result<(i32, BTreeMap<i32, Hand>), ParseError> {
    let mut split = line.splitn(3, ' ');
    let _prefix = split.next();
    let count_tok = split.next().ok_or(ParseError::MissingTokens {
        expected: 2,
        excerpt: excerpt(line),
    })?;
    let count = parse_i32(count_tok, line)?;
    if count <= 0 {
        return Ok((0, BTreeMap::new()));
    }

    let rest = split.next().ok_or(ParseError::MissingTokens {
        expected: 3,
        excerpt: excerpt(line),
    })?;
    let blocks = sections(rest);

    let mut hands = BTreeMap::new();
    let mut blk = 0;
    let mut last_id = -1;
    for _ in 0..count {
        if blocks.len() < blk + HAND_HEAD_SECTIONS {
            return Err(ParseError::SectionCount {
                expected: blk + HAND_HEAD_SECTIONS,
                found: blocks.len(),
                excerpt: excerpt(line),
            });
        }
        let m: Vec<&str> = blocks[blk].split(' ').collect();
        let id = parse_i32(token(&m, 0, line)?, line)?;
        let quality = parse_f32(token(&m, 1, line)?, line)?;
        let side = HandSide::from(parse_i32(token(&m, 2, line)?, line)?);
        let num_fingers = parse_i32(token(&m, 3, line)?, line)?.max(0) as usize;

        let body = Body::new(
            id,
            quality,
            parse_location(blocks[blk + 1], line)?,
            parse_rotation(blocks[blk + 2], line)?,
        );
        blk += HAND_HEAD_SECTIONS;

        let needed = blk + num_fingers * SECTIONS_PER_FINGER;
        if blocks.len() < needed {
            return Err(ParseError::SectionCount {
                expected: needed,
                found: blocks.len(),
                excerpt: excerpt(line),
            });
        }

        let mut fingers = Vec::with_capacity(num_fingers);
        for fi in 0..num_fingers {
            fingers.push(parse_finger(
                fi as i32,
                quality,
                &blocks[blk..blk + SECTIONS_PER_FINGER],
                line,
            )?);
            blk += SECTIONS_PER_FINGER;
        }

        last_id = id;
        hands.insert(id, Hand::new(body, side, fingers));
    }

    Ok((last_id + 1, hands))
}

fn parse_finger(
    index: i32,
    quality: f32,
    blocks: &[&str],
    line: &str,
) -> Result<Finger, ParseError> {
    let body = Body::new(
        index,
        quality,
        parse_location(blocks[0], line)?,
        parse_rotation(blocks[1], line)?,
    );
    let g: Vec<&str> = blocks[2].split(' ').collect();
    Ok(Finger {
        body,
        tip_radius: parse_f32(token(&g, 0, line)?, line)?,
        length_outer: parse_f32(token(&g, 1, line)?, line)?,
        angle_outer_middle: parse_f32(token(&g, 2, line)?, line)?,
        length_middle: parse_f32(token(&g, 3, line)?, line)?,
        angle_middle_inner: parse_f32(token(&g, 4, line)?, line)?,
        length_inner: parse_f32(token(&g, 5, line)?, line)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::finger_index;

    const IDENT: &str = "1 0 0 0 1 0 0 0 1";

    fn hand_line() -> String {
        format!(
            "gl 1 [0 0.9 1 2][10 20 30][{IDENT}]\
             [1 2 3][{IDENT}][8.5 40.0 10.0 30.0 5.0 25.0]\
             [4 5 6][{IDENT}][9.0 45.0 12.0 32.0 6.0 28.0]"
        )
    }

    #[test]
    fn hand_with_two_fingers() {
        let (num, hands) = parse_hands(&hand_line()).unwrap();
        assert_eq!(num, 1);
        let hand = &hands[&0];
        assert_eq!(hand.side, HandSide::Right);
        assert_eq!(hand.body.loc, [10.0, 20.0, 30.0]);
        assert_eq!(hand.fingers.len(), 2);

        let thumb = hand.finger(finger_index::THUMB).unwrap();
        assert_eq!(thumb.body.loc, [1.0, 2.0, 3.0]);
        assert_eq!(thumb.tip_radius, 8.5);
        assert_eq!(thumb.length_outer, 40.0);
        assert_eq!(thumb.angle_outer_middle, 10.0);
        assert_eq!(thumb.length_middle, 30.0);
        assert_eq!(thumb.angle_middle_inner, 5.0);
        assert_eq!(thumb.length_inner, 25.0);

        let index = hand.finger(finger_index::INDEX).unwrap();
        assert_eq!(index.body.loc, [4.0, 5.0, 6.0]);
        // Finger quality is inherited from the hand.
        assert!((index.body.quality - 0.9).abs() < 1e-6);
    }

    #[test]
    fn reported_count_is_last_id_plus_one() {
        let line = format!(
            "gl 1 [4 0.9 0 0][0 0 0][{IDENT}]"
        );
        let (num, hands) = parse_hands(&line).unwrap();
        assert_eq!(num, 5);
        assert_eq!(hands[&4].side, HandSide::Left);
        assert!(hands[&4].fingers.is_empty());
    }

    #[test]
    fn zero_hands_is_empty() {
        let (num, hands) = parse_hands("gl 0").unwrap();
        assert_eq!(num, 0);
        assert!(hands.is_empty());
    }

    #[test]
    fn truncated_finger_sections_fail() {
        let line = format!("gl 1 [0 0.9 0 3][0 0 0][{IDENT}][1 2 3][{IDENT}]");
        assert!(matches!(
            parse_hands(&line),
            Err(ParseError::SectionCount { .. })
        ));
    }
}
