#![doc = r#"
Framerates for timecode

# What is a framerate here?

A timecode framerate is more than a number of frames per second. Three
properties decide how a position is labelled and how it maps onto real time:

1. **Frames per second** - the nominal integer rate used to number frames (24, 25, 30...)
2. **Video speed** - whether the nominal rate is slowed by `1000/1001`
   (30 becomes 29.97, 24 becomes 23.976, 25 becomes 24.975)
3. **Drop frame** - NTSC labelling that skips frame numbers `00` and `01`
   at the start of every minute not divisible by ten

Video speed only changes how long a frame lasts on the wall clock. Two rates
that differ only in video speed produce identical LTC and MTC bit patterns,
which is why [`Framerate::is_equivalent`] ignores it.

# Canonical rates

| Rate          | fps | video speed | drop | index |
|---------------|-----|-------------|------|-------|
| 24            | 24  | no          | no   | 0     |
| 25            | 25  | no          | no   | 1     |
| 30 drop       | 30  | no          | yes  | 2     |
| 30            | 30  | no          | no   | 3     |
| 29.97         | 30  | yes         | no   | 4     |
| 29.97 drop    | 30  | yes         | yes  | 5     |
| 23.976        | 24  | yes         | no   | 11    |
| 24.975        | 25  | yes         | no   | 12    |
"#]

mod index;
pub use index::*;

use core::fmt;

use crate::prelude::*;

/// Common ticks per second of absolute time.
///
/// `48,000,000` is evenly divisible by every supported rate times
/// [`BITS_PER_FRAME`], so ticks-per-frame and ticks-per-bit are always integers.
pub const COMMON_TICKS_PER_SECOND: i64 = 48_000_000;

/// The sub-frame resolution of a timecode, one per LTC bit cell.
pub const BITS_PER_FRAME: u32 = 80;

/// A frame rate family: nominal frames per second, video speed and drop frame.
///
/// Derived `PartialEq` is full equality. Use [`Framerate::is_equivalent`] when
/// only the encoded timecode labels matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawFramerate")
)]
pub struct Framerate {
    frames_per_second: u32,
    video_speed: bool,
    drop_frame: bool,
}

impl Framerate {
    /// 24 fps film
    pub const FPS_24: Self = Self::new_unchecked(24, false, false);
    /// 23.976 fps, 24 at video speed
    pub const FPS_23_976: Self = Self::new_unchecked(24, true, false);
    /// 25 fps PAL/SECAM
    pub const FPS_25: Self = Self::new_unchecked(25, false, false);
    /// 24.975 fps, 25 at video speed
    pub const FPS_24_975: Self = Self::new_unchecked(25, true, false);
    /// 29.97 fps non-drop
    pub const FPS_29_97: Self = Self::new_unchecked(30, true, false);
    /// 29.97 fps drop-frame
    pub const FPS_29_97_DROP: Self = Self::new_unchecked(30, true, true);
    /// 30 fps non-drop
    pub const FPS_30: Self = Self::new_unchecked(30, false, false);
    /// 30 fps with drop-frame labels
    pub const FPS_30_DROP: Self = Self::new_unchecked(30, false, true);

    /// Create a framerate.
    ///
    /// The drop frame flag is stored for any rate, but only rates that are a
    /// multiple of 30 actually skip labels.
    ///
    /// # Errors
    /// [`TimecodeError::UnsupportedFramesPerSecond`] if `frames_per_second` is zero
    /// or does not evenly divide the common tick base down to the bit.
    pub const fn new(
        frames_per_second: u32,
        video_speed: bool,
        drop_frame: bool,
    ) -> TimecodeResult<Self> {
        let ticks_per_second_per_bit = COMMON_TICKS_PER_SECOND as u32 / BITS_PER_FRAME;
        if frames_per_second == 0 || ticks_per_second_per_bit % frames_per_second != 0 {
            return Err(TimecodeError::UnsupportedFramesPerSecond(frames_per_second));
        }
        Ok(Self::new_unchecked(
            frames_per_second,
            video_speed,
            drop_frame,
        ))
    }

    const fn new_unchecked(frames_per_second: u32, video_speed: bool, drop_frame: bool) -> Self {
        Self {
            frames_per_second,
            video_speed,
            drop_frame,
        }
    }

    /// Look up a canonical framerate by its interchange index.
    ///
    /// # Errors
    /// [`TimecodeError::UnknownFramerateIndex`] for non-canonical indices.
    pub fn for_index(index: u32) -> TimecodeResult<Self> {
        FramerateIndex::from_raw(index).map(FramerateIndex::framerate)
    }

    /// The interchange index, if this is one of the canonical eight rates
    pub fn index(&self) -> Option<FramerateIndex> {
        FramerateIndex::of(self)
    }

    /// The nominal frames per second used for labelling
    #[inline]
    pub const fn frames_per_second(&self) -> u32 {
        self.frames_per_second
    }

    /// True if the rate runs at `1000/1001` of nominal speed
    #[inline]
    pub const fn video_speed(&self) -> bool {
        self.video_speed
    }

    /// True if the rate uses drop-frame labels
    #[inline]
    pub const fn drop_frame(&self) -> bool {
        self.drop_frame
    }

    /// Frame labels skipped at the start of each minute not divisible by ten.
    ///
    /// Two at 30 fps, four at 60 fps, zero for non-drop rates and for drop
    /// flagged rates that are not a multiple of 30.
    pub const fn dropped_frames_per_minute(&self) -> u32 {
        if self.drop_frame && self.frames_per_second % 30 == 0 {
            self.frames_per_second / 15
        } else {
            0
        }
    }

    /// Common ticks in one sub-frame bit
    #[inline]
    pub const fn common_ticks_per_bit(&self) -> i64 {
        COMMON_TICKS_PER_SECOND / (self.frames_per_second as i64 * BITS_PER_FRAME as i64)
    }

    /// Common ticks in one frame
    #[inline]
    pub const fn common_ticks_per_frame(&self) -> i64 {
        self.common_ticks_per_bit() * BITS_PER_FRAME as i64
    }

    /// True if the frames per second and drop frame flag match.
    ///
    /// Equivalent rates produce identical LTC and MTC data. Video speed is ignored.
    pub const fn is_equivalent(&self, other: &Framerate) -> bool {
        self.frames_per_second == other.frames_per_second && self.drop_frame == other.drop_frame
    }

    /// True if all three properties match. Same as `==`.
    ///
    /// More often than not, [`Framerate::is_equivalent`] is what you want.
    pub const fn is_equal(&self, other: &Framerate) -> bool {
        self.is_equivalent(other) && self.video_speed == other.video_speed
    }

    /// Real seconds per nominal second: `1001/1000` at video speed, else `1`.
    pub const fn speed_factor(&self) -> f64 {
        if self.video_speed { 1001. / 1000. } else { 1. }
    }

    /// The real frame rate in frames per wall clock second.
    ///
    /// ```rust
    /// # use timecode::prelude::*;
    /// assert!((Framerate::FPS_29_97.as_f64() - 29.97).abs() < 0.001);
    /// ```
    pub const fn as_f64(&self) -> f64 {
        self.frames_per_second as f64 / self.speed_factor()
    }
}

/// Unchecked wire form, validated through [`Framerate::new`] on the way in
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawFramerate {
    frames_per_second: u32,
    video_speed: bool,
    drop_frame: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<RawFramerate> for Framerate {
    type Error = TimecodeError;

    fn try_from(raw: RawFramerate) -> Result<Self, Self::Error> {
        Framerate::new(raw.frames_per_second, raw.video_speed, raw.drop_frame)
    }
}

impl Default for Framerate {
    fn default() -> Self {
        Self::FPS_30
    }
}

impl fmt::Display for Framerate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.video_speed {
            // thousandths of a frame, rounded
            let milli = (self.frames_per_second as u64 * 1_000_000 + 500) / 1001;
            let whole = milli / 1000;
            let mut frac = milli % 1000;
            if frac == 0 {
                write!(f, "{whole}")?;
            } else {
                let mut digits: usize = 3;
                while frac % 10 == 0 {
                    frac /= 10;
                    digits -= 1;
                }
                write!(f, "{whole}.{frac:0digits$}")?;
            }
        } else {
            write!(f, "{}", self.frames_per_second)?;
        }
        if self.drop_frame {
            write!(f, " drop")?;
        }
        Ok(())
    }
}

#[doc = r#"
A framerate slot that may hold one of the two markers instead of a real rate.

[`Rate::Invalid`] is a safe default to propagate when a rate cannot be determined.
[`Rate::Any`] is a wildcard that accepts every real rate. Neither can be used to
derive fields or perform conversions.

# Example
```rust
# use timecode::prelude::*;
let any = Rate::Any;
assert!(any.accepts(&Framerate::FPS_25));
assert!(any.framerate().is_err());

let ntsc = Rate::from(Framerate::FPS_29_97_DROP);
assert!(ntsc.accepts(&Framerate::FPS_30_DROP));
assert!(!ntsc.accepts(&Framerate::FPS_29_97));
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rate {
    /// A real framerate
    Valid(Framerate),
    /// No usable framerate
    #[default]
    Invalid,
    /// Any framerate will do
    Any,
}

impl Rate {
    /// True if this is the invalid marker
    #[inline]
    pub const fn is_invalid_marker(&self) -> bool {
        matches!(self, Self::Invalid)
    }

    /// True if this is the wildcard marker
    #[inline]
    pub const fn is_any_marker(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Returns the real framerate.
    ///
    /// # Errors
    /// [`TimecodeError::InvalidFramerateConversion`] for either marker.
    pub const fn framerate(&self) -> TimecodeResult<Framerate> {
        match self {
            Self::Valid(framerate) => Ok(*framerate),
            Self::Invalid | Self::Any => Err(TimecodeError::InvalidFramerateConversion),
        }
    }

    /// True if `framerate` satisfies this slot.
    ///
    /// The wildcard accepts everything, a real rate accepts equivalent rates,
    /// and the invalid marker accepts nothing.
    pub const fn accepts(&self, framerate: &Framerate) -> bool {
        match self {
            Self::Valid(own) => own.is_equivalent(framerate),
            Self::Any => true,
            Self::Invalid => false,
        }
    }

    /// Look up a canonical rate by index, yielding the invalid marker for unknown indices.
    pub fn for_index_or_invalid(index: u32) -> Self {
        Framerate::for_index(index).map_or(Self::Invalid, Self::Valid)
    }
}

impl From<Framerate> for Rate {
    fn from(value: Framerate) -> Self {
        Self::Valid(value)
    }
}

impl From<FramerateIndex> for Rate {
    fn from(value: FramerateIndex) -> Self {
        Self::Valid(value.framerate())
    }
}

#[test]
fn ticks_per_bit_are_exact() {
    use pretty_assertions::assert_eq;
    for index in FramerateIndex::all() {
        let rate = index.framerate();
        let per_bit = rate.common_ticks_per_bit();
        assert_eq!(
            per_bit * rate.frames_per_second() as i64 * BITS_PER_FRAME as i64,
            COMMON_TICKS_PER_SECOND
        );
    }
    assert_eq!(Framerate::FPS_24.common_ticks_per_bit(), 25_000);
    assert_eq!(Framerate::FPS_25.common_ticks_per_bit(), 24_000);
    assert_eq!(Framerate::FPS_30.common_ticks_per_bit(), 20_000);
}

#[test]
fn unsupported_rates() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        Framerate::new(0, false, false),
        Err(TimecodeError::UnsupportedFramesPerSecond(0))
    );
    assert_eq!(
        Framerate::new(7, false, false),
        Err(TimecodeError::UnsupportedFramesPerSecond(7))
    );
    assert!(Framerate::new(60, true, true).is_ok());
    assert!(Framerate::new(48, false, false).is_ok());
}

#[test]
fn equivalence_ignores_video_speed() {
    let film = Framerate::new(30, false, true).unwrap();
    let video = Framerate::new(30, true, true).unwrap();
    assert!(film.is_equivalent(&video));
    assert!(!film.is_equal(&video));
    assert_ne!(film, video);
    assert!(!Framerate::FPS_29_97.is_equivalent(&Framerate::FPS_29_97_DROP));
}

#[test]
fn drop_flag_is_stored_off_rate() {
    use pretty_assertions::assert_eq;
    let odd = Framerate::new(25, false, true).unwrap();
    assert!(odd.drop_frame());
    assert_eq!(odd.dropped_frames_per_minute(), 0);
    assert_eq!(Framerate::FPS_29_97_DROP.dropped_frames_per_minute(), 2);
    assert_eq!(
        Framerate::new(60, true, true)
            .unwrap()
            .dropped_frames_per_minute(),
        4
    );
}

#[test]
fn display_descriptor() {
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;
    assert_eq!(Framerate::FPS_24.to_string(), "24");
    assert_eq!(Framerate::FPS_23_976.to_string(), "23.976");
    assert_eq!(Framerate::FPS_24_975.to_string(), "24.975");
    assert_eq!(Framerate::FPS_29_97.to_string(), "29.97");
    assert_eq!(Framerate::FPS_29_97_DROP.to_string(), "29.97 drop");
    assert_eq!(Framerate::FPS_30_DROP.to_string(), "30 drop");
}

#[cfg(feature = "serde")]
#[test]
fn deserialize_validates() {
    use pretty_assertions::assert_eq;
    let parsed: Framerate = serde_json::from_str(
        r#"{"frames_per_second":30,"video_speed":true,"drop_frame":true}"#,
    )
    .unwrap();
    assert_eq!(parsed, Framerate::FPS_29_97_DROP);
    assert_eq!(
        serde_json::to_string(&Framerate::FPS_25).unwrap(),
        r#"{"frames_per_second":25,"video_speed":false,"drop_frame":false}"#
    );

    for fps in [0, 7] {
        let json =
            alloc::format!(r#"{{"frames_per_second":{fps},"video_speed":false,"drop_frame":false}}"#);
        assert!(serde_json::from_str::<Framerate>(&json).is_err(), "{fps} fps");
        let rate = alloc::format!(r#"{{"Valid":{json}}}"#);
        assert!(serde_json::from_str::<Rate>(&rate).is_err(), "{fps} fps");
    }
}

#[test]
fn markers() {
    use pretty_assertions::assert_eq;
    assert!(Rate::Invalid.is_invalid_marker());
    assert!(Rate::Any.is_any_marker());
    assert!(!Rate::Invalid.accepts(&Framerate::FPS_24));
    assert_eq!(
        Rate::Invalid.framerate(),
        Err(TimecodeError::InvalidFramerateConversion)
    );
    assert_eq!(Rate::for_index_or_invalid(9), Rate::Invalid);
    assert_eq!(
        Rate::for_index_or_invalid(5),
        Rate::Valid(Framerate::FPS_29_97_DROP)
    );
}
