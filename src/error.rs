use thiserror::Error;

use crate::prelude::Framerate;

#[doc = r#"
A set of errors that can occur while building, converting or encoding a [`Timecode`](crate::prelude::Timecode)

Every variant is local and recoverable. Nothing in this crate panics on bad input.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimecodeError {
    /// The index is not one of the canonical framerate indices
    #[error("Unknown framerate index {0}")]
    UnknownFramerateIndex(u32),
    /// The frames per second cannot be represented exactly in common ticks
    #[error("Unsupported frames per second: {0}")]
    UnsupportedFramesPerSecond(u32),
    /// The framerate is not one of the canonical rates and has no interchange index
    #[error("Framerate {0} has no interchange index")]
    NonCanonicalFramerate(Framerate),
    /// The invalid or wildcard framerate marker was used where a real rate is required
    #[error("Cannot convert to or from a framerate marker")]
    InvalidFramerateConversion,
    /// Two timecodes did not share an equivalent framerate
    #[error("Incompatible framerates: {left} and {right}")]
    IncompatibleFramerate {
        /// The framerate of the receiver
        left: Framerate,
        /// The framerate of the other operand
        right: Framerate,
    },
    /// A timecode string could not be parsed
    #[error("Malformed timecode string: {0}")]
    MalformedTimecodeString(#[from] TimecodeStringError),
    /// An LTC word could not be decoded
    #[error("Malformed LTC word: {0}")]
    MalformedLtcWord(#[from] LtcWordError),
    /// The framerate cannot be carried by an LTC word
    #[error("Framerate cannot be encoded as LTC")]
    InvalidFramerateForLtc,
    /// The position does not fit in 64 bits of common ticks
    #[error("Timecode overflowed the common tick counter")]
    TickOverflow,
}

/// The reason a timecode string was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimecodeStringError {
    /// The string has no content
    #[error("empty string")]
    Empty,
    /// Wrong number of `:` separated fields
    #[error("expected 4 or 5 fields, found {0}")]
    FieldCount(usize),
    /// A field had no digits, or a non digit character
    #[error("the {0} field is not a number")]
    NotNumeric(TimecodeField),
    /// A field has more digits than fit in 32 bits
    #[error("the {0} field is too long")]
    TooManyDigits(TimecodeField),
    /// A field is too large for the framerate
    #[error("the {field} field is out of range ({value})")]
    OutOfRange {
        /// Which field
        field: TimecodeField,
        /// The value that was read
        value: u32,
    },
    /// The frame label is skipped by drop-frame counting
    #[error("frame {frames} of minute {minutes} is dropped")]
    DroppedFrame {
        /// Minute of the rejected label
        minutes: u8,
        /// Frame of the rejected label
        frames: u32,
    },
}

/// The reason an LTC word was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LtcWordError {
    /// A binary coded decimal digit was greater than 9 or its tens digit was too large
    #[error("the {field} field is out of range ({value})")]
    OutOfRange {
        /// Which field
        field: TimecodeField,
        /// The decoded value
        value: u32,
    },
    /// The frame label is skipped by drop-frame counting
    #[error("frame {frames} of minute {minutes} is dropped")]
    DroppedFrame {
        /// Minute of the rejected label
        minutes: u8,
        /// Frame of the rejected label
        frames: u32,
    },
}

/// Identifies one of the human-facing timecode fields in an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimecodeField {
    #[allow(missing_docs)]
    Hours,
    #[allow(missing_docs)]
    Minutes,
    #[allow(missing_docs)]
    Seconds,
    #[allow(missing_docs)]
    Frames,
    /// The sub-frame bit count
    Bits,
}

impl core::fmt::Display for TimecodeField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use TimecodeField::*;
        match self {
            Hours => write!(f, "hours"),
            Minutes => write!(f, "minutes"),
            Seconds => write!(f, "seconds"),
            Frames => write!(f, "frames"),
            Bits => write!(f, "bits"),
        }
    }
}

/// The result type of every fallible operation in this crate (see [`TimecodeError`])
pub type TimecodeResult<T> = Result<T, TimecodeError>;

#[test]
fn nested_errors_convert() {
    use pretty_assertions::assert_eq;
    let err: TimecodeError = TimecodeStringError::Empty.into();
    assert_eq!(
        err,
        TimecodeError::MalformedTimecodeString(TimecodeStringError::Empty)
    );

    let err: TimecodeError = LtcWordError::OutOfRange {
        field: TimecodeField::Frames,
        value: 12,
    }
    .into();
    assert!(matches!(err, TimecodeError::MalformedLtcWord(_)));
}
