#![doc = r#"
The [`Timecode`] value type

# Common ticks

A timecode stores exactly one number: a signed count of common ticks from zero,
where one second of nominal time is [`COMMON_TICKS_PER_SECOND`] ticks. Every
human-facing field (hours, minutes, seconds, frames, bits) is derived from that
count and the framerate on demand.

Because the tick base divides evenly into every supported frame and sub-frame
bit, frame-accurate arithmetic never touches floating point. Real elapsed
seconds are the only place video speed enters, as a `1001/1000` factor.
"#]

mod convert;
pub use convert::*;

mod fields;
pub use fields::*;
pub(crate) use fields::{fields_to_ticks, is_dropped_label, ticks_to_fields};

use core::cmp::Ordering;

use crate::prelude::*;

#[doc = r#"
An absolute time position at a given [`Framerate`].

Timecodes are small `Copy` values. Every "setter" returns a new timecode whose
ticks were recomputed from the complete field set.

# Example
```rust
# use timecode::prelude::*;
let tc = Timecode::new(Framerate::FPS_25, TimecodeFields::new(1, 0, 0, 0)).unwrap();

assert_eq!(tc.frames_from_zero(), 90_000);
assert_eq!(tc.seconds_from_zero(), 3600.);

let later = tc.with_frames(12).unwrap();
assert_eq!(later.frames_from_timecode(&tc), Ok(12));
```
"#]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timecode {
    ticks: i64,
    framerate: Framerate,
}

impl Timecode {
    /// Build a timecode from its fields.
    ///
    /// Over-range fields carry into the next larger field, and a label skipped by
    /// drop-frame counting is advanced to the first displayed frame of that minute.
    /// Use [`TimecodeFields::is_valid_for`] or [`Timecode::parse`] when such input
    /// should be rejected instead.
    ///
    /// # Errors
    /// [`TimecodeError::TickOverflow`] if the position does not fit in 64 bits of ticks.
    pub fn new(framerate: Framerate, fields: TimecodeFields) -> TimecodeResult<Self> {
        let ticks = fields_to_ticks(fields, &framerate)?;
        Ok(Self { ticks, framerate })
    }

    /// Build a timecode from a real rate slot.
    ///
    /// # Errors
    /// [`TimecodeError::InvalidFramerateConversion`] if `rate` is a marker.
    pub fn with_rate(rate: Rate, fields: TimecodeFields) -> TimecodeResult<Self> {
        Self::new(rate.framerate()?, fields)
    }

    /// A timecode at an absolute tick count
    pub const fn from_common_ticks(ticks: i64, framerate: Framerate) -> Self {
        Self { ticks, framerate }
    }

    /// `00:00:00:00` at the framerate
    pub const fn zero(framerate: Framerate) -> Self {
        Self::from_common_ticks(0, framerate)
    }

    /// The framerate used to derive fields
    #[inline]
    pub const fn framerate(&self) -> Framerate {
        self.framerate
    }

    /// All displayed fields
    pub const fn fields(&self) -> TimecodeFields {
        ticks_to_fields(self.ticks, &self.framerate)
    }

    /// True if the position is before zero
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.ticks < 0
    }

    /// Unsigned hours
    pub const fn hours(&self) -> u32 {
        self.fields().hours
    }

    /// Unsigned minutes
    pub const fn minutes(&self) -> u8 {
        self.fields().minutes
    }

    /// Unsigned seconds
    pub const fn seconds(&self) -> u8 {
        self.fields().seconds
    }

    /// Unsigned frames
    pub const fn frames(&self) -> u32 {
        self.fields().frames
    }

    /// Unsigned sub-frame bits
    pub const fn bits(&self) -> u8 {
        self.fields().bits
    }

    /// Signed common ticks from zero. This is the only stored state.
    #[inline]
    pub const fn common_ticks_from_zero(&self) -> i64 {
        self.ticks
    }

    /// Signed sub-frame bits from zero, truncated toward zero
    pub const fn bits_from_zero(&self) -> i64 {
        self.ticks / self.framerate.common_ticks_per_bit()
    }

    /// Signed frames from zero, truncated toward zero
    pub const fn frames_from_zero(&self) -> i64 {
        self.ticks / self.framerate.common_ticks_per_frame()
    }

    /// Real elapsed seconds from zero.
    ///
    /// At video speed the nominal time is stretched by `1001/1000`.
    pub fn seconds_from_zero(&self) -> f64 {
        self.ticks as f64 / COMMON_TICKS_PER_SECOND as f64 * self.framerate.speed_factor()
    }

    /// Same framerate, new tick count
    pub const fn with_common_ticks_from_zero(&self, ticks: i64) -> Self {
        Self::from_common_ticks(ticks, self.framerate)
    }

    /// Same framerate, positioned at a bit count.
    ///
    /// # Errors
    /// [`TimecodeError::TickOverflow`]
    pub fn with_bits_from_zero(&self, bits: i64) -> TimecodeResult<Self> {
        bits.checked_mul(self.framerate.common_ticks_per_bit())
            .map(|ticks| self.with_common_ticks_from_zero(ticks))
            .ok_or(TimecodeError::TickOverflow)
    }

    /// Same framerate, positioned at a frame count.
    ///
    /// # Errors
    /// [`TimecodeError::TickOverflow`]
    pub fn with_frames_from_zero(&self, frames: i64) -> TimecodeResult<Self> {
        frames
            .checked_mul(self.framerate.common_ticks_per_frame())
            .map(|ticks| self.with_common_ticks_from_zero(ticks))
            .ok_or(TimecodeError::TickOverflow)
    }

    /// Same framerate, positioned at a real elapsed time, rounded to the nearest tick.
    ///
    /// # Errors
    /// [`TimecodeError::TickOverflow`] for non-finite or out of range seconds.
    pub fn with_seconds_from_zero(&self, seconds: f64) -> TimecodeResult<Self> {
        let ticks = seconds / self.framerate.speed_factor() * COMMON_TICKS_PER_SECOND as f64;
        round_to_ticks(ticks).map(|ticks| self.with_common_ticks_from_zero(ticks))
    }

    fn with_fields(&self, fields: TimecodeFields) -> TimecodeResult<Self> {
        Self::new(self.framerate, fields)
    }

    /// Same timecode with a different sign
    pub fn with_negative(&self, negative: bool) -> TimecodeResult<Self> {
        self.with_fields(self.fields().with_negative(negative))
    }

    /// Same timecode with different hours
    pub fn with_hours(&self, hours: u32) -> TimecodeResult<Self> {
        self.with_fields(TimecodeFields {
            hours,
            ..self.fields()
        })
    }

    /// Same timecode with different minutes
    pub fn with_minutes(&self, minutes: u8) -> TimecodeResult<Self> {
        self.with_fields(TimecodeFields {
            minutes,
            ..self.fields()
        })
    }

    /// Same timecode with different seconds
    pub fn with_seconds(&self, seconds: u8) -> TimecodeResult<Self> {
        self.with_fields(TimecodeFields {
            seconds,
            ..self.fields()
        })
    }

    /// Same timecode with different frames
    pub fn with_frames(&self, frames: u32) -> TimecodeResult<Self> {
        self.with_fields(TimecodeFields {
            frames,
            ..self.fields()
        })
    }

    /// Same timecode with different sub-frame bits
    pub fn with_bits(&self, bits: u8) -> TimecodeResult<Self> {
        self.with_fields(TimecodeFields {
            bits,
            ..self.fields()
        })
    }

    /// Move by a signed number of frames.
    ///
    /// # Errors
    /// [`TimecodeError::TickOverflow`]
    pub fn checked_add_frames(&self, frames: i64) -> TimecodeResult<Self> {
        frames
            .checked_mul(self.framerate.common_ticks_per_frame())
            .and_then(|delta| self.ticks.checked_add(delta))
            .map(|ticks| self.with_common_ticks_from_zero(ticks))
            .ok_or(TimecodeError::TickOverflow)
    }

    /// Move by a signed amount of real time, which may be a fractional number of frames.
    ///
    /// # Errors
    /// [`TimecodeError::TickOverflow`]
    pub fn checked_add_seconds(&self, seconds: f64) -> TimecodeResult<Self> {
        let delta = seconds / self.framerate.speed_factor() * COMMON_TICKS_PER_SECOND as f64;
        let delta = round_to_ticks(delta)?;
        self.ticks
            .checked_add(delta)
            .map(|ticks| self.with_common_ticks_from_zero(ticks))
            .ok_or(TimecodeError::TickOverflow)
    }

    fn require_equivalent(&self, other: &Timecode) -> TimecodeResult<()> {
        if self.framerate.is_equivalent(&other.framerate) {
            Ok(())
        } else {
            Err(TimecodeError::IncompatibleFramerate {
                left: self.framerate,
                right: other.framerate,
            })
        }
    }

    /// Signed frames from `other` to `self`.
    ///
    /// # Errors
    /// [`TimecodeError::IncompatibleFramerate`] unless the framerates are equivalent.
    pub fn frames_from_timecode(&self, other: &Timecode) -> TimecodeResult<i64> {
        self.require_equivalent(other)?;
        Ok(self.frames_from_zero() - other.frames_from_zero())
    }

    /// Signed real seconds from `other` to `self`.
    ///
    /// # Errors
    /// [`TimecodeError::IncompatibleFramerate`] unless the framerates are equivalent.
    pub fn seconds_from_timecode(&self, other: &Timecode) -> TimecodeResult<f64> {
        self.require_equivalent(other)?;
        Ok(self.seconds_from_zero() - other.seconds_from_zero())
    }

    /// Order by absolute position only. Framerates need not match.
    pub fn compare(&self, other: &Timecode) -> Ordering {
        self.ticks.cmp(&other.ticks)
    }
}

/// Round half away from zero into the tick range.
pub(crate) fn round_to_ticks(value: f64) -> TimecodeResult<i64> {
    // i64::MAX is not exactly representable; 2^63 is the first value past it
    const LIMIT: f64 = 9_223_372_036_854_775_808.;
    if !value.is_finite() || value >= LIMIT || value < -LIMIT {
        return Err(TimecodeError::TickOverflow);
    }
    let rounded = if value >= 0. { value + 0.5 } else { value - 0.5 };
    Ok(rounded as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tc(framerate: Framerate, h: u32, m: u8, s: u8, f: u32) -> Timecode {
        Timecode::new(framerate, TimecodeFields::new(h, m, s, f)).unwrap()
    }

    #[test]
    fn timing_accessors() {
        let one_hour = tc(Framerate::FPS_24, 1, 0, 0, 0);
        assert_eq!(one_hour.frames_from_zero(), 86_400);
        assert_eq!(one_hour.bits_from_zero(), 86_400 * 80);
        assert_eq!(one_hour.common_ticks_from_zero(), 3600 * COMMON_TICKS_PER_SECOND);
        assert_eq!(one_hour.seconds_from_zero(), 3600.);

        let ntsc = tc(Framerate::FPS_29_97, 1, 0, 0, 0);
        assert!((ntsc.seconds_from_zero() - 3603.6).abs() < 1e-9);
    }

    #[test]
    fn negative_positions() {
        let minus_one = Timecode::zero(Framerate::FPS_25)
            .with_frames_from_zero(-1)
            .unwrap();
        assert!(minus_one.is_negative());
        assert_eq!(
            minus_one.fields(),
            TimecodeFields::new(0, 0, 0, 1).with_negative(true)
        );
        assert_eq!(minus_one.frames_from_zero(), -1);

        let flipped = minus_one.with_negative(false).unwrap();
        assert_eq!(flipped.frames_from_zero(), 1);
    }

    #[test]
    fn field_setters_recompute_ticks() {
        let start = tc(Framerate::FPS_30, 0, 0, 10, 5);
        assert_eq!(start.with_hours(2).unwrap().hours(), 2);
        assert_eq!(start.with_minutes(7).unwrap().minutes(), 7);
        assert_eq!(start.with_seconds(59).unwrap().seconds(), 59);
        assert_eq!(start.with_bits(33).unwrap().bits(), 33);
        assert_eq!(start.with_frames(29).unwrap().frames_from_zero(), 329);
    }

    #[test]
    fn drop_frame_setter_skips_dropped_labels() {
        let start = tc(Framerate::FPS_29_97_DROP, 0, 0, 0, 0);
        let moved = start.with_minutes(1).unwrap();
        assert_eq!(moved.fields(), TimecodeFields::new(0, 1, 0, 2));

        let tenth = start.with_minutes(10).unwrap();
        assert_eq!(tenth.fields(), TimecodeFields::new(0, 10, 0, 0));
    }

    #[test]
    fn adding_frames_crosses_drop_boundary() {
        let before = tc(Framerate::FPS_29_97_DROP, 0, 0, 59, 29);
        let after = before.checked_add_frames(1).unwrap();
        assert_eq!(after.fields(), TimecodeFields::new(0, 1, 0, 2));
        assert_eq!(after.frames_from_timecode(&before), Ok(1));
    }

    #[test]
    fn adding_seconds() {
        let start = tc(Framerate::FPS_25, 0, 0, 0, 0);
        let later = start.checked_add_seconds(30.).unwrap();
        assert_eq!(later.fields(), TimecodeFields::new(0, 0, 30, 0));
        let earlier = later.checked_add_seconds(-0.04).unwrap();
        assert_eq!(earlier.fields(), TimecodeFields::new(0, 0, 29, 24));
    }

    #[test]
    fn incompatible_differences() {
        let a = tc(Framerate::FPS_25, 0, 0, 1, 0);
        let b = tc(Framerate::FPS_24, 0, 0, 1, 0);
        assert_eq!(
            a.frames_from_timecode(&b),
            Err(TimecodeError::IncompatibleFramerate {
                left: Framerate::FPS_25,
                right: Framerate::FPS_24
            })
        );
        assert!(a.seconds_from_timecode(&b).is_err());

        let video = tc(Framerate::FPS_29_97_DROP, 0, 0, 2, 0);
        let film = tc(Framerate::FPS_30_DROP, 0, 0, 1, 0);
        assert_eq!(video.frames_from_timecode(&film), Ok(30));
    }

    #[test]
    fn compare_ignores_framerate() {
        let a = tc(Framerate::FPS_25, 0, 0, 1, 0);
        let b = tc(Framerate::FPS_24, 0, 0, 1, 0);
        assert_eq!(a.compare(&b), Ordering::Equal);
        assert_eq!(
            a.compare(&b.checked_add_frames(1).unwrap()),
            Ordering::Less
        );
    }

    #[test]
    fn seconds_setter_rejects_non_finite() {
        let start = Timecode::zero(Framerate::FPS_24);
        assert_eq!(
            start.with_seconds_from_zero(f64::NAN),
            Err(TimecodeError::TickOverflow)
        );
        assert_eq!(
            start.with_seconds_from_zero(1e30),
            Err(TimecodeError::TickOverflow)
        );
        assert_eq!(
            start.with_seconds_from_zero(1.5).unwrap().common_ticks_from_zero(),
            72_000_000
        );
    }

    #[test]
    fn frame_overflow_is_explicit() {
        let start = Timecode::zero(Framerate::FPS_24);
        assert_eq!(
            start.with_frames_from_zero(i64::MAX),
            Err(TimecodeError::TickOverflow)
        );
        let near_end = Timecode::from_common_ticks(i64::MAX - 1, Framerate::FPS_24);
        assert_eq!(
            near_end.checked_add_frames(1),
            Err(TimecodeError::TickOverflow)
        );
    }
}
