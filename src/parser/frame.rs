//! Frame assembler: one datagram in, one [`Frame`] out.

use tracing::warn;

use crate::core::constants::{
    PREFIX_BODY, PREFIX_BODY_CAL, PREFIX_FLYSTICK, PREFIX_FRAME_COUNTER, PREFIX_HAND,
    PREFIX_HAND_CAL, PREFIX_MEASUREMENT_TOOL, PREFIX_TIMESTAMP, PREFIX_TIMESTAMP_HIRES,
};
use crate::core::ParseError;
use crate::model::{Frame, SplitTimestamp};

use super::body::{parse_bodies, parse_measurement_tools};
use super::flystick::parse_flysticks;
use super::hand::parse_hands;
use super::scalar::{
    parse_calibrated_count, parse_frame_counter, parse_timestamp, parse_timestamp_hires,
};

/// Assembles datagrams into frames, dispatching each line by its prefix.
///
/// The only state carried between datagrams is the remembered calibrated
/// body and hand counts: the controller sends the `6dcal`/`glcal` lines
/// periodically, not per datagram, while entity lines arrive every
/// datagram. Between calibration lines the reported count only ever
/// rises (running maximum); an explicit calibration line re-baselines it,
/// up or down. Counts start at 0, the first received value establishes
/// the baseline.
///
/// A malformed line is recorded and skipped; it never invalidates the
/// contributions of the other lines in the same datagram. Unknown line
/// prefixes are ignored for forward compatibility.
#[derive(Debug, Default)]
pub struct Parser {
    num_bodies: i32,
    num_hands: i32,
    errors: Vec<ParseError>,
}

impl Parser {
    /// Create a parser with zeroed calibrated counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one datagram's raw bytes.
    ///
    /// Fails only when the datagram is not text at all; individual bad
    /// lines are skipped and recorded instead.
    pub fn parse_datagram(&mut self, datagram: &[u8]) -> Result<Frame, ParseError> {
        let text = std::str::from_utf8(datagram).map_err(|_| ParseError::NotAscii)?;
        Ok(self.parse(text))
    }

    /// Parse one datagram already decoded to text.
    pub fn parse(&mut self, packet: &str) -> Frame {
        self.errors.clear();
        let mut frame = Frame::default();

        let mut cal_bodies: Option<i32> = None;
        let mut cal_hands: Option<i32> = None;

        for line in packet.split(['\r', '\n']).filter(|l| !l.is_empty()) {
            if let Err(err) = self.parse_line(line, &mut frame, &mut cal_bodies, &mut cal_hands) {
                warn!(%err, "skipping malformed line");
                self.errors.push(err);
            }
        }

        frame.num_bodies = Self::reconcile(&mut self.num_bodies, cal_bodies, frame.num_bodies);
        frame.num_hands = Self::reconcile(&mut self.num_hands, cal_hands, frame.num_hands);

        frame
    }

    /// Parse errors recorded by the most recent `parse` call.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    fn parse_line(
        &mut self,
        line: &str,
        frame: &mut Frame,
        cal_bodies: &mut Option<i32>,
        cal_hands: &mut Option<i32>,
    ) -> Result<(), ParseError> {
        if line.starts_with(PREFIX_FRAME_COUNTER) {
            frame.frame_counter = parse_frame_counter(line)?;
        } else if line.starts_with(PREFIX_TIMESTAMP) {
            frame.timestamp = parse_timestamp(line)?;
        } else if line.starts_with(PREFIX_TIMESTAMP_HIRES) {
            let ts = parse_timestamp_hires(line)?;
            frame.timestamp = ts.seconds;
            frame.hires_timestamp = Some(SplitTimestamp {
                sec: ts.sec,
                usec: ts.usec,
            });
            frame.latency_usec = ts.latency_usec;
        } else if line.starts_with(PREFIX_BODY_CAL) {
            *cal_bodies = Some(parse_calibrated_count(line)?);
        } else if line.starts_with(PREFIX_FLYSTICK) {
            (frame.num_flysticks, frame.flysticks) = parse_flysticks(line)?;
        } else if line.starts_with(PREFIX_MEASUREMENT_TOOL) {
            (frame.num_measurement_tools, frame.measurement_tools) =
                parse_measurement_tools(line)?;
        } else if line.starts_with(PREFIX_BODY) {
            (frame.num_bodies, frame.bodies) = parse_bodies(line)?;
        } else if line.starts_with(PREFIX_HAND_CAL) {
            *cal_hands = Some(parse_calibrated_count(line)?);
        } else if line.starts_with(PREFIX_HAND) {
            (frame.num_hands, frame.hands) = parse_hands(line)?;
        }
        // Unknown prefixes: newer controllers send line types this
        // client does not know; ignore them.
        Ok(())
    }

    /// Merge this datagram's reported count with the carried one.
    fn reconcile(remembered: &mut i32, calibrated: Option<i32>, reported: i32) -> i32 {
        match calibrated {
            Some(cal) => {
                *remembered = cal;
                cal
            }
            None => {
                *remembered = (*remembered).max(reported);
                *remembered
            }
        }
    }
}
