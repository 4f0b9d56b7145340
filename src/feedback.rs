//! DTRACK Protocol - Feedback Command Encoder
//!
//! Formats the outbound actuator commands as NUL-terminated ASCII. Two
//! command families exist: tactile fingertracking feedback (`tfb`) and
//! Flystick actuator feedback (`ffb`). Encoding is pure; the transport
//! layer sends the bytes to the controller's feedback port.

/// Encode a tactile feedback command for one hand.
///
/// One `[hand finger 1.0 strength]` group is emitted per entry of
/// `strengths`, finger indices in reporting order. Strengths are clamped
/// to `[0.0, 1.0]`.
///
/// Wire form: `tfb <n> [<handId> <fingerIndex> 1.0 <strength>]...\0`
pub fn tactile(hand_id: i32, strengths: &[f32]) -> Vec<u8> {
    let mut cmd = format!("tfb {}", strengths.len());
    for (finger, strength) in strengths.iter().enumerate() {
        let strength = strength.clamp(0.0, 1.0);
        cmd.push_str(&format!(" [{hand_id} {finger} 1.0 {strength:.3}]"));
    }
    terminate(cmd)
}

/// Encode a command that stops tactile feedback on every finger.
pub fn tactile_stop(hand_id: i32, num_fingers: usize) -> Vec<u8> {
    tactile(hand_id, &vec![0.0; num_fingers])
}

/// Encode a Flystick beep.
///
/// Wire form: `ffb 1 [<id> <durationMs> <frequencyHz> 0 0][]\0`
pub fn flystick_beep(flystick_id: i32, duration_ms: f32, frequency_hz: f32) -> Vec<u8> {
    terminate(format!(
        "ffb 1 [{} {} {} 0 0][]",
        flystick_id, duration_ms as i32, frequency_hz as i32
    ))
}

/// Encode a Flystick vibration with a device-defined pattern.
///
/// Wire form: `ffb 1 [<id> 0 0 <pattern> 0][]\0`
pub fn flystick_vibrate(flystick_id: i32, pattern: u32) -> Vec<u8> {
    terminate(format!("ffb 1 [{flystick_id} 0 0 {pattern} 0][]"))
}

fn terminate(mut cmd: String) -> Vec<u8> {
    cmd.push('\0');
    cmd.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tactile_command_bytes() {
        let cmd = tactile(0, &[0.0, 0.5, 1.0]);
        assert_eq!(
            cmd,
            b"tfb 3 [0 0 1.0 0.000] [0 1 1.0 0.500] [0 2 1.0 1.000]\0"
        );
    }

    #[test]
    fn tactile_strength_is_clamped() {
        let cmd = tactile(1, &[1.5, -0.25]);
        assert_eq!(cmd, b"tfb 2 [1 0 1.0 1.000] [1 1 1.0 0.000]\0");
    }

    #[test]
    fn tactile_stop_zeroes_every_finger() {
        assert_eq!(tactile_stop(0, 2), b"tfb 2 [0 0 1.0 0.000] [0 1 1.0 0.000]\0");
    }

    #[test]
    fn beep_truncates_to_integers() {
        let cmd = flystick_beep(2, 500.9, 4000.2);
        assert_eq!(cmd, b"ffb 1 [2 500 4000 0 0][]\0");
    }

    #[test]
    fn vibrate_uses_pattern_slot() {
        let cmd = flystick_vibrate(0, 3);
        assert_eq!(cmd, b"ffb 1 [0 0 0 3 0][]\0");
    }

    #[test]
    fn commands_are_nul_terminated_ascii() {
        for cmd in [tactile(0, &[0.3]), flystick_beep(1, 100.0, 2000.0)] {
            assert_eq!(*cmd.last().unwrap(), 0);
            assert!(cmd.is_ascii());
        }
    }
}
