#![doc = r#"
Longitudinal Timecode (LTC) words

# What is LTC?

LTC carries timecode as an audio signal, one 80 bit frame per video frame,
biphase-mark encoded. The last 16 bits of each frame are a fixed sync word;
the first 64 bits are the payload handled here.

# Layout

Bit `n` of the `u64` is LTC bit `n`, so bit 0 is transmitted first. Every
number is binary coded decimal, least significant bit first.

```text
 0- 3 frame units      4- 7 user bits 1     8- 9 frame tens     10 drop frame
11    colour frame    12-15 user bits 2    16-19 second units
20-23 user bits 3     24-26 second tens    27    flag           28-31 user bits 4
32-35 minute units    36-39 user bits 5    40-42 minute tens    43    flag
44-47 user bits 6     48-51 hour units     52-55 user bits 7    56-57 hour tens
58    flag            59    flag           60-63 user bits 8
```

The four flag bits are assigned differently at 25 fps:

| Bit | 25 fps              | all other rates     |
|-----|---------------------|---------------------|
| 27  | binary group flag 0 | polarity correction |
| 43  | binary group flag 2 | binary group flag 0 |
| 58  | binary group flag 1 | binary group flag 1 |
| 59  | polarity correction | binary group flag 2 |

The polarity correction bit is computed on encode so that the complete 80 bit
frame, sync word included, holds an even number of zeros. Every frame then
starts on the same signal polarity.
"#]

use crate::{prelude::*, timecode::is_dropped_label};

/// Ones in the 16 bit sync word `0011 1111 1111 1101`.
const SYNC_WORD_ONES: u32 = 13;

/// The largest frames per second whose frame numbers fit in two tens bits.
const MAX_LTC_FRAMES_PER_SECOND: u32 = 40;

const FRAME_UNITS: u32 = 0;
const FRAME_TENS: u32 = 8;
const DROP_FRAME: u32 = 10;
const COLOR_FRAME: u32 = 11;
const SECOND_UNITS: u32 = 16;
const SECOND_TENS: u32 = 24;
const MINUTE_UNITS: u32 = 32;
const MINUTE_TENS: u32 = 40;
const HOUR_UNITS: u32 = 48;
const HOUR_TENS: u32 = 56;

/// Positions of (polarity, BGF0, BGF1, BGF2)
const fn flag_positions(framerate: &Framerate) -> (u32, u32, u32, u32) {
    if framerate.frames_per_second() == 25 {
        (59, 27, 58, 43)
    } else {
        (27, 43, 58, 59)
    }
}

/// The three binary group flags, which describe how the user bits are used.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LtcFlags {
    /// Binary group flag 0
    pub bgf0: bool,
    /// Binary group flag 1
    pub bgf1: bool,
    /// Binary group flag 2
    pub bgf2: bool,
}

#[doc = r#"
The decoded content of one LTC frame, excluding the sync word.

# Example
```rust
# use timecode::prelude::*;
let frame = LtcFrame {
    hours: 10,
    minutes: 20,
    seconds: 30,
    frames: 12,
    ..Default::default()
};
let word = frame.encode(Framerate::FPS_25).unwrap();

assert_eq!(word & 0xF, 2); // frame units
assert_eq!((word >> 8) & 0x3, 1); // frame tens
assert_eq!(LtcFrame::decode(word, Framerate::FPS_25), Ok(frame));
```
"#]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LtcFrame {
    /// Hours (0-23)
    pub hours: u8,
    /// Minutes (0-59)
    pub minutes: u8,
    /// Seconds (0-59)
    pub seconds: u8,
    /// Frames, below the nominal frames per second
    pub frames: u8,
    /// Drop-frame labelling flag (bit 10)
    pub drop_frame: bool,
    /// Colour frame flag (bit 11)
    pub color_frame: bool,
    /// The eight 4 bit user groups. Group `n` (1-8) is `(user_bits >> (4 * (n - 1))) & 0xF`.
    pub user_bits: u32,
    /// Binary group flags
    pub flags: LtcFlags,
}

const fn put(word: &mut u64, shift: u32, value: u64) {
    *word |= value << shift;
}

const fn get(word: u64, shift: u32, width: u32) -> u8 {
    ((word >> shift) & ((1 << width) - 1)) as u8
}

const fn user_group_shift(group: u32) -> u32 {
    4 + 8 * group
}

fn ltc_framerate(rate: Rate) -> TimecodeResult<Framerate> {
    let framerate = rate
        .framerate()
        .map_err(|_| TimecodeError::InvalidFramerateForLtc)?;
    if framerate.frames_per_second() > MAX_LTC_FRAMES_PER_SECOND {
        return Err(TimecodeError::InvalidFramerateForLtc);
    }
    Ok(framerate)
}

/// Split into (tens, units), rejecting anything `decode` would refuse.
fn bcd(value: u8, limit: u32, field: TimecodeField) -> TimecodeResult<(u64, u64)> {
    if value as u32 >= limit {
        return Err(LtcWordError::OutOfRange {
            field,
            value: value as u32,
        }
        .into());
    }
    Ok(((value / 10) as u64, (value % 10) as u64))
}

/// A set drop frame bit means drop-frame labels, whatever the flag on `framerate`.
fn check_not_dropped(framerate: &Framerate, minutes: u8, seconds: u8, frames: u8) -> TimecodeResult<()> {
    let labelled = Framerate::new(framerate.frames_per_second(), framerate.video_speed(), true)?;
    if is_dropped_label(&labelled, minutes, seconds, frames as u32) {
        return Err(LtcWordError::DroppedFrame {
            minutes,
            frames: frames as u32,
        }
        .into());
    }
    Ok(())
}

impl LtcFrame {
    /// Pack this frame into the 64 LTC payload bits.
    ///
    /// # Errors
    /// - [`TimecodeError::InvalidFramerateForLtc`] for a marker or a rate above 40 fps
    /// - [`TimecodeError::MalformedLtcWord`] for a field out of range at the rate,
    ///   or a label skipped by drop-frame counting
    pub fn encode(&self, rate: impl Into<Rate>) -> TimecodeResult<u64> {
        let framerate = ltc_framerate(rate.into())?;
        use TimecodeField::*;
        let (frame_tens, frame_units) = bcd(self.frames, framerate.frames_per_second(), Frames)?;
        let (second_tens, second_units) = bcd(self.seconds, 60, Seconds)?;
        let (minute_tens, minute_units) = bcd(self.minutes, 60, Minutes)?;
        let (hour_tens, hour_units) = bcd(self.hours, 24, Hours)?;
        if self.drop_frame {
            check_not_dropped(&framerate, self.minutes, self.seconds, self.frames)?;
        }

        let mut word = 0;
        put(&mut word, FRAME_UNITS, frame_units);
        put(&mut word, FRAME_TENS, frame_tens);
        put(&mut word, DROP_FRAME, self.drop_frame as u64);
        put(&mut word, COLOR_FRAME, self.color_frame as u64);
        put(&mut word, SECOND_UNITS, second_units);
        put(&mut word, SECOND_TENS, second_tens);
        put(&mut word, MINUTE_UNITS, minute_units);
        put(&mut word, MINUTE_TENS, minute_tens);
        put(&mut word, HOUR_UNITS, hour_units);
        put(&mut word, HOUR_TENS, hour_tens);

        for group in 0..8 {
            let nibble = (self.user_bits >> (4 * group)) & 0xF;
            put(&mut word, user_group_shift(group), nibble as u64);
        }

        let (polarity, bgf0, bgf1, bgf2) = flag_positions(&framerate);
        put(&mut word, bgf0, self.flags.bgf0 as u64);
        put(&mut word, bgf1, self.flags.bgf1 as u64);
        put(&mut word, bgf2, self.flags.bgf2 as u64);

        if (word.count_ones() + SYNC_WORD_ONES) % 2 == 1 {
            put(&mut word, polarity, 1);
        }
        Ok(word)
    }

    /// Unpack 64 LTC payload bits.
    ///
    /// The polarity correction bit is ignored. `rate` decides where the binary
    /// group flags live and bounds the frame number.
    ///
    /// # Errors
    /// - [`TimecodeError::InvalidFramerateForLtc`] for a marker or a rate above 40 fps
    /// - [`TimecodeError::MalformedLtcWord`] for digits out of range or a dropped label
    pub fn decode(word: u64, rate: impl Into<Rate>) -> TimecodeResult<Self> {
        let framerate = ltc_framerate(rate.into())?;
        Self::decode_fields(word, &framerate).inspect_err(|e| {
            tracing::debug!(word, %framerate, error = %e, "rejected LTC word");
        })
    }

    fn decode_fields(word: u64, framerate: &Framerate) -> TimecodeResult<Self> {
        use TimecodeField::*;
        let digits = |tens_shift, tens_width, units_shift, limit: u32, field| {
            let tens = get(word, tens_shift, tens_width);
            let units = get(word, units_shift, 4);
            let value = tens as u32 * 10 + units as u32;
            if units > 9 || value >= limit {
                Err(LtcWordError::OutOfRange { field, value })
            } else {
                Ok(value as u8)
            }
        };
        let frames = digits(FRAME_TENS, 2, FRAME_UNITS, framerate.frames_per_second(), Frames)?;
        let seconds = digits(SECOND_TENS, 3, SECOND_UNITS, 60, Seconds)?;
        let minutes = digits(MINUTE_TENS, 3, MINUTE_UNITS, 60, Minutes)?;
        let hours = digits(HOUR_TENS, 2, HOUR_UNITS, 24, Hours)?;

        let drop_frame = get(word, DROP_FRAME, 1) == 1;
        if drop_frame {
            check_not_dropped(framerate, minutes, seconds, frames)?;
        }

        let user_bits = (0..8).fold(0u32, |bits, group| {
            bits | (get(word, user_group_shift(group), 4) as u32) << (4 * group)
        });
        let (_, bgf0, bgf1, bgf2) = flag_positions(framerate);

        Ok(Self {
            hours,
            minutes,
            seconds,
            frames,
            drop_frame,
            color_frame: get(word, COLOR_FRAME, 1) == 1,
            user_bits,
            flags: LtcFlags {
                bgf0: get(word, bgf0, 1) == 1,
                bgf1: get(word, bgf1, 1) == 1,
                bgf2: get(word, bgf2, 1) == 1,
            },
        })
    }
}

/// Frames in one 24 hour day
const fn frames_per_day(framerate: &Framerate) -> i64 {
    let fps = framerate.frames_per_second() as i64;
    let dropped = framerate.dropped_frames_per_minute() as i64;
    (fps * 600 - dropped * 9) * 144
}

impl Timecode {
    /// The LTC frame for this position, with no user bits or flags set.
    ///
    /// LTC carries no sign and only counts to 23 hours, so the position is
    /// wrapped onto a 24 hour day. Negative positions count back from midnight.
    ///
    /// # Errors
    /// [`TimecodeError::InvalidFramerateForLtc`] above 40 fps.
    pub fn to_ltc_frame(&self) -> TimecodeResult<LtcFrame> {
        let framerate = ltc_framerate(self.framerate().into())?;
        let day = self.frames_from_zero().rem_euclid(frames_per_day(&framerate));
        let fields = Timecode::zero(framerate).with_frames_from_zero(day)?.fields();
        Ok(LtcFrame {
            hours: fields.hours as u8,
            minutes: fields.minutes,
            seconds: fields.seconds,
            frames: fields.frames as u8,
            drop_frame: framerate.drop_frame(),
            ..Default::default()
        })
    }

    /// The 64 bit LTC payload for this position. The 16 bit sync word is not included.
    ///
    /// # Errors
    /// [`TimecodeError::InvalidFramerateForLtc`] above 40 fps.
    pub fn ltc_representation(&self) -> TimecodeResult<u64> {
        self.to_ltc_frame()?.encode(self.framerate())
    }

    /// Read a timecode back out of an LTC payload.
    ///
    /// # Errors
    /// - [`TimecodeError::InvalidFramerateForLtc`] for a marker or a rate above 40 fps
    /// - [`TimecodeError::MalformedLtcWord`] if the word does not decode
    /// - [`TimecodeError::IncompatibleFramerate`] if the word's drop frame flag
    ///   disagrees with `rate`
    pub fn from_ltc(word: u64, rate: impl Into<Rate>) -> TimecodeResult<Self> {
        let framerate = ltc_framerate(rate.into())?;
        let frame = LtcFrame::decode(word, framerate)?;
        if frame.drop_frame != framerate.drop_frame() {
            return Err(TimecodeError::IncompatibleFramerate {
                left: framerate,
                right: Framerate::new(
                    framerate.frames_per_second(),
                    framerate.video_speed(),
                    frame.drop_frame,
                )?,
            });
        }
        Timecode::new(
            framerate,
            TimecodeFields::new(
                frame.hours as u32,
                frame.minutes,
                frame.seconds,
                frame.frames as u32,
            ),
        )
    }
}
