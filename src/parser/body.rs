//! Parser for standard body and measurement tool lines.
//!
//! Wire shape (`6d` and, structurally identical, `6dmt2`):
//!
//! ```text
//! 6d <count> [id qu][x y z][r0 .. r8] [id qu][x y z][r0 .. r8] ...
//! ```

use std::collections::BTreeMap;

use crate::core::{excerpt, ParseError};
use crate::model::{Body, MeasurementTool, Rotation};

use super::tokenizer::{parse_f32, parse_i32, sections, token};

/// Sections per body entity: meta, location, rotation.
const SECTIONS_PER_BODY: usize = 3;

/// Parse a `6d` line into bodies keyed by wire ID.
///
/// Returns the declared entity count alongside the map; a count of zero
/// or less yields an empty map, not an error.
pub fn parse_bodies(line: &str) -> Result<(i32, BTreeMap<i32, Body>), ParseError> {
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
    let needed = count as usize * SECTIONS_PER_BODY;
    if blocks.len() < needed {
        return Err(ParseError::SectionCount {
            expected: needed,
            found: blocks.len(),
            excerpt: excerpt(line),
        });
    }

    let mut bodies = BTreeMap::new();
    for chunk in blocks.chunks_exact(SECTIONS_PER_BODY).take(count as usize) {
        let body = parse_pose_sections(chunk[0], chunk[1], chunk[2], line)?;
        bodies.insert(body.id, body);
    }
    Ok((count, bodies))
}

/// Parse a `6dmt2` line into measurement tools keyed by wire ID.
pub fn parse_measurement_tools(
    line: &str,
) -> Result<(i32, BTreeMap<i32, MeasurementTool>), ParseError> {
    let (count, bodies) = parse_bodies(line)?;
    let tools = bodies
        .into_values()
        .map(|body| (body.id, MeasurementTool::new(body)))
        .collect();
    Ok((count, tools))
}

/// Parse the common meta/location/rotation section triple into a body.
pub(super) fn parse_pose_sections(
    meta: &str,
    loc: &str,
    rot: &str,
    line: &str,
) -> Result<Body, ParseError> {
    let m: Vec<&str> = meta.split(' ').collect();
    let id = parse_i32(token(&m, 0, line)?, line)?;
    let quality = parse_f32(token(&m, 1, line)?, line)?;
    Ok(Body::new(
        id,
        quality,
        parse_location(loc, line)?,
        parse_rotation(rot, line)?,
    ))
}

/// Parse an `x y z` section.
pub(super) fn parse_location(section: &str, line: &str) -> Result<[f32; 3], ParseError> {
    let s: Vec<&str> = section.split(' ').collect();
    Ok([
        parse_f32(token(&s, 0, line)?, line)?,
        parse_f32(token(&s, 1, line)?, line)?,
        parse_f32(token(&s, 2, line)?, line)?,
    ])
}

/// Parse an `r0 .. r8` section into the column-major matrix.
pub(super) fn parse_rotation(section: &str, line: &str) -> Result<Rotation, ParseError> {
    let r: Vec<&str> = section.split(' ').collect();
    let mut m = [0.0f32; 9];
    for (i, slot) in m.iter_mut().enumerate() {
        *slot = parse_f32(token(&r, i, line)?, line)?;
    }
    Ok(Rotation(m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Quat;

    #[test]
    fn single_identity_body() {
        let line = "6d 1 [0 0.98][100.0 200.0 300.0][1 0 0 0 1 0 0 0 1]";
        let (count, bodies) = parse_bodies(line).unwrap();
        assert_eq!(count, 1);
        assert_eq!(bodies.len(), 1);

        let body = &bodies[&0];
        assert_eq!(body.id, 0);
        assert!((body.quality - 0.98).abs() < 1e-6);
        assert_eq!(body.loc, [100.0, 200.0, 300.0]);
        assert_eq!(body.quat(), Quat::IDENTITY);
    }

    #[test]
    fn two_bodies_with_sparse_ids() {
        let line = "6d 2 [3 1.0][1 2 3][1 0 0 0 1 0 0 0 1] [7 0.5][4 5 6][1 0 0 0 1 0 0 0 1]";
        let (count, bodies) = parse_bodies(line).unwrap();
        assert_eq!(count, 2);
        assert_eq!(bodies.keys().copied().collect::<Vec<_>>(), vec![3, 7]);
        assert_eq!(bodies[&7].loc, [4.0, 5.0, 6.0]);
    }

    #[test]
    fn zero_count_is_empty_not_error() {
        let (count, bodies) = parse_bodies("6d 0").unwrap();
        assert_eq!(count, 0);
        assert!(bodies.is_empty());
    }

    #[test]
    fn rotation_is_stored_column_major() {
        // 90 degrees about Z, columns transmitted first.
        let line = "6d 1 [0 1.0][0 0 0][0 1 0 -1 0 0 0 0 1]";
        let (_, bodies) = parse_bodies(line).unwrap();
        let rot = bodies[&0].rot;
        assert_eq!(rot.at(1, 0), 1.0);
        assert_eq!(rot.at(0, 1), -1.0);
    }

    #[test]
    fn malformed_number_is_reported_with_excerpt() {
        let line = "6d 1 [0 abc][0 0 0][1 0 0 0 1 0 0 0 1]";
        let err = parse_bodies(line).unwrap_err();
        match err {
            ParseError::MalformedNumber { token, excerpt } => {
                assert_eq!(token, "abc");
                assert_eq!(excerpt, "6d 1 [");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn short_section_list_is_section_count_error() {
        let line = "6d 2 [0 1.0][0 0 0][1 0 0 0 1 0 0 0 1]";
        assert!(matches!(
            parse_bodies(line),
            Err(ParseError::SectionCount {
                expected: 6,
                found: 3,
                ..
            })
        ));
    }

    #[test]
    fn measurement_tools_share_the_body_grammar() {
        let line = "6dmt2 1 [2 0.75][10 20 30][1 0 0 0 1 0 0 0 1]";
        let (count, tools) = parse_measurement_tools(line).unwrap();
        assert_eq!(count, 1);
        assert_eq!(tools[&2].body.loc, [10.0, 20.0, 30.0]);
    }
}
