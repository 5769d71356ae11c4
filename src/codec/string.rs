#![doc = r#"
Text form of a [`Timecode`]

```text
[-]HH:MM:SS:FF          plain
[-]HH:MM:SS:FF:BB       with bits
[-]HH:MM:SS:FF:BB @ R   with bits and framerate (output only)
```

Every field is zero padded to two digits. Hours grow past two digits when
needed, and the frames field is as wide as the largest frame number of the
framerate. The sign appears only for negative positions.

Parsing is strict: out of range or overlong fields and labels skipped by
drop-frame counting are rejected, never clamped. A `;` is accepted anywhere a `:` is, since
drop-frame timecode is commonly written `HH:MM:SS;FF`.
"#]

use core::fmt;

use crate::{prelude::*, timecode::is_dropped_label};

/// Which text form to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimecodeFormat {
    /// `HH:MM:SS:FF`
    #[default]
    Plain,
    /// `HH:MM:SS:FF:BB`
    WithBits,
    /// `HH:MM:SS:FF:BB @ 29.97 drop`
    WithBitsAndFramerate,
}

/// Helper struct for printing a [`Timecode`] in a chosen [`TimecodeFormat`].
///
/// Returned by [`Timecode::display`].
pub struct TimecodeDisplay<'a> {
    timecode: &'a Timecode,
    format: TimecodeFormat,
}

impl Timecode {
    /// Returns an object that implements [`Display`](fmt::Display) for the chosen form.
    ///
    /// ```rust
    /// # use timecode::prelude::*;
    /// let tc = Timecode::new(
    ///     Framerate::FPS_29_97_DROP,
    ///     TimecodeFields::new(1, 2, 3, 4).with_bits(5).with_negative(true),
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(tc.to_string(), "-01:02:03:04");
    /// assert_eq!(tc.display(TimecodeFormat::WithBits).to_string(), "-01:02:03:04:05");
    /// assert_eq!(
    ///     tc.display(TimecodeFormat::WithBitsAndFramerate).to_string(),
    ///     "-01:02:03:04:05 @ 29.97 drop"
    /// );
    /// ```
    pub fn display(&self, format: TimecodeFormat) -> TimecodeDisplay<'_> {
        TimecodeDisplay {
            timecode: self,
            format,
        }
    }

    /// Parse the plain or with-bits text form at a framerate.
    ///
    /// # Errors
    /// - [`TimecodeError::InvalidFramerateConversion`] if `rate` is a marker
    /// - [`TimecodeError::MalformedTimecodeString`] for anything that is not a valid label at the rate
    /// - [`TimecodeError::TickOverflow`] for hours beyond the tick range
    pub fn parse(text: &str, rate: impl Into<Rate>) -> TimecodeResult<Self> {
        let framerate = rate.into().framerate()?;
        let fields = parse_fields(text, &framerate).inspect_err(|e| {
            tracing::debug!(text, %framerate, error = %e, "rejected timecode string");
        })?;
        Timecode::new(framerate, fields)
    }

    /// [`Timecode::parse`] with `None` standing in for the invalid timecode.
    ///
    /// ```rust
    /// # use timecode::prelude::*;
    /// let rate = Framerate::FPS_29_97_DROP;
    /// assert!(Timecode::parse_or_invalid("00:10:00:00", rate).is_some());
    /// assert_eq!(Timecode::parse_or_invalid("00:11:00:00", rate), None);
    /// assert_eq!(Timecode::parse_or_invalid("00:00:00:00", Rate::Invalid), None);
    /// ```
    pub fn parse_or_invalid(text: &str, rate: impl Into<Rate>) -> Option<Self> {
        Self::parse(text, rate).ok()
    }
}

fn frame_digits(framerate: &Framerate) -> usize {
    let mut largest = framerate.frames_per_second().saturating_sub(1);
    let mut digits = 1;
    while largest >= 10 {
        largest /= 10;
        digits += 1;
    }
    digits.max(2)
}

impl fmt::Display for TimecodeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let framerate = self.timecode.framerate();
        let fields = self.timecode.fields();
        if fields.negative {
            write!(f, "-")?;
        }
        write!(
            f,
            "{:02}:{:02}:{:02}:{:0width$}",
            fields.hours,
            fields.minutes,
            fields.seconds,
            fields.frames,
            width = frame_digits(&framerate)
        )?;
        match self.format {
            TimecodeFormat::Plain => Ok(()),
            TimecodeFormat::WithBits => write!(f, ":{:02}", fields.bits),
            TimecodeFormat::WithBitsAndFramerate => {
                write!(f, ":{:02} @ {}", fields.bits, framerate)
            }
        }
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display(TimecodeFormat::Plain).fmt(f)
    }
}

fn parse_number(text: &str, field: TimecodeField) -> Result<u32, TimecodeStringError> {
    if text.is_empty() {
        return Err(TimecodeStringError::NotNumeric(field));
    }
    text.bytes().try_fold(0u32, |value, byte| {
        if !byte.is_ascii_digit() {
            return Err(TimecodeStringError::NotNumeric(field));
        }
        value
            .checked_mul(10)
            .and_then(|v| v.checked_add((byte - b'0') as u32))
            .ok_or(TimecodeStringError::TooManyDigits(field))
    })
}

fn bounded(value: u32, limit: u32, field: TimecodeField) -> Result<u32, TimecodeStringError> {
    if value < limit {
        Ok(value)
    } else {
        Err(TimecodeStringError::OutOfRange { field, value })
    }
}

fn parse_fields(text: &str, framerate: &Framerate) -> Result<TimecodeFields, TimecodeStringError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TimecodeStringError::Empty);
    }
    let (negative, unsigned) = match text.as_bytes()[0] {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let mut parts: [&str; 5] = [""; 5];
    let mut count = 0;
    for part in unsigned.split([':', ';']) {
        if count < parts.len() {
            parts[count] = part;
        }
        count += 1;
    }
    if !(4..=5).contains(&count) {
        return Err(TimecodeStringError::FieldCount(count));
    }

    use TimecodeField::*;
    let hours = parse_number(parts[0], Hours)?;
    let minutes = bounded(parse_number(parts[1], Minutes)?, 60, Minutes)? as u8;
    let seconds = bounded(parse_number(parts[2], Seconds)?, 60, Seconds)? as u8;
    let frames = bounded(
        parse_number(parts[3], Frames)?,
        framerate.frames_per_second(),
        Frames,
    )?;
    let bits = if count == 5 {
        bounded(parse_number(parts[4], Bits)?, BITS_PER_FRAME, Bits)? as u8
    } else {
        0
    };

    if is_dropped_label(framerate, minutes, seconds, frames) {
        return Err(TimecodeStringError::DroppedFrame { minutes, frames });
    }

    Ok(TimecodeFields {
        negative,
        hours,
        minutes,
        seconds,
        frames,
        bits,
    })
}
