//! One per-datagram snapshot of everything the controller reported.

use std::collections::BTreeMap;

use super::{Body, Flystick, Hand, MeasurementTool};

/// Seconds/microseconds split of a high-resolution timestamp line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitTimestamp {
    /// Integer seconds part.
    pub sec: u32,
    /// Microseconds part.
    pub usec: u32,
}

/// One frame of tracking data.
///
/// Every collection is always present; "nothing reported" is an empty
/// map, never an absent one. A missing ID means "not currently tracked",
/// not "does not exist" — the `num_*` fields carry the calibrated counts,
/// which may exceed the number of entities actually visible this frame.
///
/// A frame is immutable once assembled; every received datagram produces
/// an entirely new `Frame` tree, so sharing one across threads needs no
/// locking.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Frame counter as sent by the controller; wraps per device.
    pub frame_counter: u32,
    /// Timestamp in seconds; `-1.0` means not present.
    pub timestamp: f64,
    /// High-resolution timestamp, if sent. `Some` even when both parts
    /// happen to be zero.
    pub hires_timestamp: Option<SplitTimestamp>,
    /// Measurement latency in microseconds, if sent.
    pub latency_usec: u32,

    /// Standard bodies by wire ID.
    pub bodies: BTreeMap<i32, Body>,
    /// Number of calibrated standard bodies, as far as known.
    pub num_bodies: i32,

    /// Flysticks by wire ID.
    pub flysticks: BTreeMap<i32, Flystick>,
    /// Number of Flysticks reported in the current datagram.
    pub num_flysticks: i32,

    /// Measurement tools by wire ID.
    pub measurement_tools: BTreeMap<i32, MeasurementTool>,
    /// Number of measurement tools reported in the current datagram.
    pub num_measurement_tools: i32,

    /// Fingertracking hands by wire ID.
    pub hands: BTreeMap<i32, Hand>,
    /// Number of calibrated hands, as far as known.
    pub num_hands: i32,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            frame_counter: 0,
            timestamp: -1.0,
            hires_timestamp: None,
            latency_usec: 0,
            bodies: BTreeMap::new(),
            num_bodies: 0,
            flysticks: BTreeMap::new(),
            num_flysticks: 0,
            measurement_tools: BTreeMap::new(),
            num_measurement_tools: 0,
            hands: BTreeMap::new(),
            num_hands: 0,
        }
    }
}

impl Frame {
    /// Standard body with the given wire ID, if tracked this frame.
    pub fn body(&self, id: i32) -> Option<&Body> {
        self.bodies.get(&id)
    }

    /// Flystick with the given wire ID, if tracked this frame.
    pub fn flystick(&self, id: i32) -> Option<&Flystick> {
        self.flysticks.get(&id)
    }

    /// Measurement tool with the given wire ID, if tracked this frame.
    pub fn measurement_tool(&self, id: i32) -> Option<&MeasurementTool> {
        self.measurement_tools.get(&id)
    }

    /// Fingertracking hand with the given wire ID, if tracked this frame.
    pub fn hand(&self, id: i32) -> Option<&Hand> {
        self.hands.get(&id)
    }

    /// Whether the high-resolution timestamp fields were sent.
    pub fn has_hires_timestamp(&self) -> bool {
        self.hires_timestamp.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_frame_has_sentinel_timestamp_and_empty_maps() {
        let frame = Frame::default();
        assert_eq!(frame.timestamp, -1.0);
        assert!(frame.bodies.is_empty());
        assert!(frame.body(0).is_none());
        assert!(!frame.has_hires_timestamp());
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn frame_is_shareable_across_threads() {
        assert_send_sync::<Frame>();
    }
}
