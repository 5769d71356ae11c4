use crate::prelude::*;

/// The human-facing fields of a timecode: sign plus unsigned hours, minutes, seconds, frames and bits.
///
/// The text form writes a leading sign followed by these unsigned fields, so the
/// sign is kept apart from the magnitude here even though a [`Timecode`] stores
/// a single signed tick count.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimecodeFields {
    /// True if the position is before zero
    pub negative: bool,
    /// Hours, unbounded
    pub hours: u32,
    /// Minutes (0-59)
    pub minutes: u8,
    /// Seconds (0-59)
    pub seconds: u8,
    /// Frame within the second, below the nominal frames per second
    pub frames: u32,
    /// Sub-frame bit (0-79)
    pub bits: u8,
}

impl TimecodeFields {
    /// Positive fields with zero bits
    pub const fn new(hours: u32, minutes: u8, seconds: u8, frames: u32) -> Self {
        Self {
            negative: false,
            hours,
            minutes,
            seconds,
            frames,
            bits: 0,
        }
    }

    /// Same fields with the given sub-frame bit
    pub const fn with_bits(mut self, bits: u8) -> Self {
        self.bits = bits;
        self
    }

    /// Same fields with the given sign
    pub const fn with_negative(mut self, negative: bool) -> Self {
        self.negative = negative;
        self
    }

    /// True if every field is in range for `framerate` and the label is not
    /// skipped by drop-frame counting.
    pub fn is_valid_for(&self, framerate: &Framerate) -> bool {
        self.minutes < 60
            && self.seconds < 60
            && self.frames < framerate.frames_per_second()
            && (self.bits as u32) < BITS_PER_FRAME
            && !is_dropped_label(framerate, self.minutes, self.seconds, self.frames)
    }
}

/// True if drop-frame counting never displays this minute/second/frame label.
pub(crate) const fn is_dropped_label(
    framerate: &Framerate,
    minutes: u8,
    seconds: u8,
    frames: u32,
) -> bool {
    let dropped = framerate.dropped_frames_per_minute();
    dropped > 0 && seconds == 0 && frames < dropped && minutes % 10 != 0
}

/// Carry over-range fields upward and advance dropped labels to the first
/// displayed frame of their minute.
pub(crate) fn normalize(fields: TimecodeFields, framerate: &Framerate) -> TimecodeResult<TimecodeFields> {
    let fps = framerate.frames_per_second() as u64;

    let total_bits = fields.frames as u64 * BITS_PER_FRAME as u64 + fields.bits as u64;
    let frames = total_bits / BITS_PER_FRAME as u64;
    let bits = (total_bits % BITS_PER_FRAME as u64) as u8;

    let total_seconds = fields.seconds as u64 + frames / fps;
    let total_minutes = fields.minutes as u64 + total_seconds / 60;
    let hours = u32::try_from(fields.hours as u64 + total_minutes / 60)
        .map_err(|_| TimecodeError::TickOverflow)?;

    let mut normalized = TimecodeFields {
        negative: fields.negative,
        hours,
        minutes: (total_minutes % 60) as u8,
        seconds: (total_seconds % 60) as u8,
        frames: (frames % fps) as u32,
        bits,
    };
    if is_dropped_label(
        framerate,
        normalized.minutes,
        normalized.seconds,
        normalized.frames,
    ) {
        normalized.frames = framerate.dropped_frames_per_minute();
    }
    Ok(normalized)
}

/// Absolute frame count of an in-range, non-dropped label.
const fn label_to_frame_count(fields: &TimecodeFields, framerate: &Framerate) -> i128 {
    let fps = framerate.frames_per_second() as i128;
    let total_seconds =
        fields.hours as i128 * 3600 + fields.minutes as i128 * 60 + fields.seconds as i128;
    let nominal = total_seconds * fps + fields.frames as i128;

    let dropped = framerate.dropped_frames_per_minute() as i128;
    let total_minutes = fields.hours as i128 * 60 + fields.minutes as i128;
    nominal - dropped * (total_minutes - total_minutes / 10)
}

/// Maps an absolute frame count back onto the nominal label count.
const fn frame_count_to_label(frame_count: u64, framerate: &Framerate) -> u64 {
    let dropped = framerate.dropped_frames_per_minute() as u64;
    if dropped == 0 {
        return frame_count;
    }
    let fps = framerate.frames_per_second() as u64;
    let per_ten_minutes = fps * 600 - dropped * 9;
    let per_minute = fps * 60 - dropped;

    let tens = frame_count / per_ten_minutes;
    let rest = frame_count % per_ten_minutes;
    if rest > dropped {
        frame_count + dropped * 9 * tens + dropped * ((rest - dropped) / per_minute)
    } else {
        frame_count + dropped * 9 * tens
    }
}

/// Common ticks for a field set, normalizing it first.
pub(crate) fn fields_to_ticks(fields: TimecodeFields, framerate: &Framerate) -> TimecodeResult<i64> {
    let fields = normalize(fields, framerate)?;
    let frame_count = label_to_frame_count(&fields, framerate);
    let total_bits = frame_count * BITS_PER_FRAME as i128 + fields.bits as i128;
    let magnitude = total_bits * framerate.common_ticks_per_bit() as i128;
    let signed = if fields.negative { -magnitude } else { magnitude };
    i64::try_from(signed).map_err(|_| TimecodeError::TickOverflow)
}

/// Derive the displayed fields of a tick count.
///
/// Ticks finer than one bit are not visible in the fields.
pub(crate) const fn ticks_to_fields(ticks: i64, framerate: &Framerate) -> TimecodeFields {
    let magnitude = ticks.unsigned_abs();
    let total_bits = magnitude / framerate.common_ticks_per_bit() as u64;
    let frame_count = total_bits / BITS_PER_FRAME as u64;
    let bits = (total_bits % BITS_PER_FRAME as u64) as u8;

    let label = frame_count_to_label(frame_count, framerate);
    let fps = framerate.frames_per_second() as u64;
    let total_seconds = label / fps;

    TimecodeFields {
        negative: ticks < 0,
        hours: (total_seconds / 3600) as u32,
        minutes: ((total_seconds / 60) % 60) as u8,
        seconds: (total_seconds % 60) as u8,
        frames: (label % fps) as u32,
        bits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn round_trip(framerate: Framerate, fields: TimecodeFields) {
        let ticks = fields_to_ticks(fields, &framerate).unwrap();
        assert_eq!(ticks_to_fields(ticks, &framerate), fields, "at {framerate}");
    }

    #[test]
    fn non_drop_round_trip() {
        for framerate in [Framerate::FPS_24, Framerate::FPS_25, Framerate::FPS_29_97] {
            let last = framerate.frames_per_second() - 1;
            round_trip(framerate, TimecodeFields::new(0, 0, 0, 0));
            round_trip(framerate, TimecodeFields::new(1, 2, 3, 4).with_bits(5));
            round_trip(framerate, TimecodeFields::new(23, 59, 59, last).with_bits(79));
            round_trip(
                framerate,
                TimecodeFields::new(0, 0, 1, 1).with_negative(true),
            );
        }
    }

    #[test]
    fn drop_frame_round_trip_at_minute_boundaries() {
        let framerate = Framerate::FPS_29_97_DROP;
        for minutes in 0..60u8 {
            let first = if minutes % 10 == 0 { 0 } else { 2 };
            round_trip(framerate, TimecodeFields::new(0, minutes, 0, first));
            round_trip(framerate, TimecodeFields::new(1, minutes, 0, first + 1));
            round_trip(framerate, TimecodeFields::new(0, minutes, 59, 29).with_bits(40));
        }
    }

    #[test]
    fn drop_frame_counts() {
        let framerate = Framerate::FPS_29_97_DROP;
        let ticks_per_frame = framerate.common_ticks_per_frame();
        let count = |fields| fields_to_ticks(fields, &framerate).unwrap() / ticks_per_frame;

        assert_eq!(count(TimecodeFields::new(0, 0, 59, 29)), 1799);
        assert_eq!(count(TimecodeFields::new(0, 1, 0, 2)), 1800);
        assert_eq!(count(TimecodeFields::new(0, 10, 0, 0)), 17982);
        assert_eq!(count(TimecodeFields::new(1, 0, 0, 0)), 107892);
    }

    #[test]
    fn dropped_labels_are_advanced() {
        let framerate = Framerate::FPS_29_97_DROP;
        for frames in [0, 1] {
            let ticks = fields_to_ticks(TimecodeFields::new(0, 1, 0, frames), &framerate).unwrap();
            assert_eq!(
                ticks_to_fields(ticks, &framerate),
                TimecodeFields::new(0, 1, 0, 2)
            );
        }
        let ticks = fields_to_ticks(TimecodeFields::new(0, 10, 0, 0), &framerate).unwrap();
        assert_eq!(
            ticks_to_fields(ticks, &framerate),
            TimecodeFields::new(0, 10, 0, 0)
        );
    }

    #[test]
    fn over_range_fields_carry() {
        let framerate = Framerate::FPS_24;
        let normalized = normalize(
            TimecodeFields {
                negative: false,
                hours: 0,
                minutes: 59,
                seconds: 59,
                frames: 24,
                bits: 80,
            },
            &framerate,
        )
        .unwrap();
        assert_eq!(normalized, TimecodeFields::new(1, 0, 0, 1));
    }

    #[test]
    fn validity() {
        assert!(TimecodeFields::new(0, 10, 0, 0).is_valid_for(&Framerate::FPS_29_97_DROP));
        assert!(!TimecodeFields::new(0, 1, 0, 0).is_valid_for(&Framerate::FPS_29_97_DROP));
        assert!(!TimecodeFields::new(0, 1, 0, 1).is_valid_for(&Framerate::FPS_29_97_DROP));
        assert!(TimecodeFields::new(0, 1, 0, 0).is_valid_for(&Framerate::FPS_29_97));
        assert!(!TimecodeFields::new(0, 0, 0, 24).is_valid_for(&Framerate::FPS_24));
        assert!(!TimecodeFields::new(0, 0, 0, 0).with_bits(80).is_valid_for(&Framerate::FPS_24));
    }

    #[test]
    fn overflow_is_explicit() {
        let huge = TimecodeFields::new(u32::MAX, 0, 0, 0);
        assert_eq!(
            fields_to_ticks(huge, &Framerate::FPS_30),
            Err(TimecodeError::TickOverflow)
        );
    }
}
