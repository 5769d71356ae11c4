#![doc = r#"
Bridge to the SMPTE time structure of a platform audio clock

Audio clock APIs describe their position with a small C structure holding
signed hours, minutes, seconds and frames, a subframe count over a divisor, and
a type code naming the framerate. The type codes share their numbering with
[`FramerateIndex`], so only the eight canonical rates can cross this bridge.
"#]

use crate::prelude::*;

/// The structure carries meaningful values
pub const SMPTE_TIME_VALID: u32 = 1 << 0;
/// The clock was running when the structure was filled
pub const SMPTE_TIME_RUNNING: u32 = 1 << 1;

/// Mirror of the platform SMPTE time structure
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteTime {
    /// Fraction of a frame, in units of `1 / subframe_divisor`
    pub subframes: i16,
    /// Subframes per frame
    pub subframe_divisor: i16,
    /// Free running counter, not interpreted here
    pub counter: u32,
    /// The framerate type code
    pub smpte_type: u32,
    /// [`SMPTE_TIME_VALID`] and [`SMPTE_TIME_RUNNING`]
    pub flags: u32,
    #[allow(missing_docs)]
    pub hours: i16,
    #[allow(missing_docs)]
    pub minutes: i16,
    #[allow(missing_docs)]
    pub seconds: i16,
    #[allow(missing_docs)]
    pub frames: i16,
}

impl Framerate {
    /// The canonical framerate for a platform SMPTE type code.
    ///
    /// # Errors
    /// [`TimecodeError::UnknownFramerateIndex`] for any code without a canonical rate.
    pub fn for_smpte_type(smpte_type: u32) -> TimecodeResult<Self> {
        Self::for_index(smpte_type)
    }

    /// The platform SMPTE type code of this framerate.
    ///
    /// # Errors
    /// [`TimecodeError::NonCanonicalFramerate`] unless this is one of the eight canonical rates.
    pub fn smpte_type(&self) -> TimecodeResult<u32> {
        self.index()
            .map(FramerateIndex::value)
            .ok_or(TimecodeError::NonCanonicalFramerate(*self))
    }
}

impl Timecode {
    /// Build a timecode from a platform SMPTE time.
    ///
    /// A negative value in any field makes the whole timecode negative. Subframes
    /// are rescaled onto the 80 bits of a frame, rounding down.
    ///
    /// # Errors
    /// - [`TimecodeError::UnknownFramerateIndex`] for an unknown type code
    /// - [`TimecodeError::TickOverflow`]
    pub fn from_smpte_time(smpte: &SmpteTime) -> TimecodeResult<Self> {
        let framerate = Framerate::for_smpte_type(smpte.smpte_type)?;
        let negative = [
            smpte.hours,
            smpte.minutes,
            smpte.seconds,
            smpte.frames,
            smpte.subframes,
        ]
        .iter()
        .any(|field| *field < 0);

        let total_bits = match smpte.subframe_divisor {
            divisor if divisor > 0 => {
                smpte.subframes.unsigned_abs() as u32 * BITS_PER_FRAME / divisor as u32
            }
            _ => 0,
        };

        // platform fields are unbounded, carry them before narrowing
        let total_seconds = smpte.hours.unsigned_abs() as u64 * 3600
            + smpte.minutes.unsigned_abs() as u64 * 60
            + smpte.seconds.unsigned_abs() as u64;
        let fields = TimecodeFields {
            negative,
            hours: u32::try_from(total_seconds / 3600).map_err(|_| TimecodeError::TickOverflow)?,
            minutes: (total_seconds / 60 % 60) as u8,
            seconds: (total_seconds % 60) as u8,
            frames: smpte.frames.unsigned_abs() as u32 + total_bits / BITS_PER_FRAME,
            bits: (total_bits % BITS_PER_FRAME) as u8,
        };
        Timecode::new(framerate, fields)
    }

    /// Export as a platform SMPTE time with subframes counted in bits.
    ///
    /// Negative timecodes have every field negated.
    ///
    /// # Errors
    /// - [`TimecodeError::NonCanonicalFramerate`] for a rate with no type code
    /// - [`TimecodeError::TickOverflow`] if the hours do not fit the platform field
    pub fn to_smpte_time(&self) -> TimecodeResult<SmpteTime> {
        let smpte_type = self.framerate().smpte_type()?;
        let fields = self.fields();
        let sign = if fields.negative { -1 } else { 1 };
        let hours = i16::try_from(fields.hours).map_err(|_| TimecodeError::TickOverflow)?;
        Ok(SmpteTime {
            subframes: sign * fields.bits as i16,
            subframe_divisor: BITS_PER_FRAME as i16,
            counter: 0,
            smpte_type,
            flags: SMPTE_TIME_VALID,
            hours: sign * hours,
            minutes: sign * fields.minutes as i16,
            seconds: sign * fields.seconds as i16,
            frames: sign * fields.frames as i16,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn type_codes_match_indices() {
        for index in FramerateIndex::all() {
            let framerate = index.framerate();
            assert_eq!(framerate.smpte_type(), Ok(index.value()));
            assert_eq!(Framerate::for_smpte_type(index.value()), Ok(framerate));
        }
        assert_eq!(
            Framerate::for_smpte_type(6),
            Err(TimecodeError::UnknownFramerateIndex(6))
        );
        let odd = Framerate::new(48, false, false).unwrap();
        assert_eq!(
            odd.smpte_type(),
            Err(TimecodeError::NonCanonicalFramerate(odd))
        );
    }

    #[test]
    fn export_and_import() {
        let tc = Timecode::new(
            Framerate::FPS_29_97_DROP,
            TimecodeFields::new(1, 2, 3, 4).with_bits(40),
        )
        .unwrap();
        let smpte = tc.to_smpte_time().unwrap();
        assert_eq!(
            smpte,
            SmpteTime {
                subframes: 40,
                subframe_divisor: 80,
                counter: 0,
                smpte_type: 5,
                flags: SMPTE_TIME_VALID,
                hours: 1,
                minutes: 2,
                seconds: 3,
                frames: 4,
            }
        );
        assert_eq!(Timecode::from_smpte_time(&smpte), Ok(tc));
    }

    #[test]
    fn negative_round_trip() {
        let tc = Timecode::new(
            Framerate::FPS_25,
            TimecodeFields::new(0, 0, 2, 3).with_negative(true),
        )
        .unwrap();
        let smpte = tc.to_smpte_time().unwrap();
        assert_eq!((smpte.hours, smpte.seconds, smpte.frames), (0, -2, -3));
        assert_eq!(Timecode::from_smpte_time(&smpte), Ok(tc));
    }

    #[test]
    fn carries_wide_platform_fields() {
        let smpte = SmpteTime {
            minutes: 300,
            smpte_type: 0,
            ..Default::default()
        };
        let tc = Timecode::from_smpte_time(&smpte).unwrap();
        assert_eq!(tc.fields(), TimecodeFields::new(5, 0, 0, 0));

        let smpte = SmpteTime {
            hours: -1,
            minutes: -61,
            seconds: -3_700,
            frames: -30,
            smpte_type: 1,
            ..Default::default()
        };
        let tc = Timecode::from_smpte_time(&smpte).unwrap();
        assert_eq!(
            tc.fields(),
            TimecodeFields::new(3, 2, 41, 5).with_negative(true)
        );
    }

    #[test]
    fn rescales_subframes() {
        let smpte = SmpteTime {
            subframes: 50,
            subframe_divisor: 100,
            smpte_type: 0,
            frames: 1,
            ..Default::default()
        };
        let tc = Timecode::from_smpte_time(&smpte).unwrap();
        assert_eq!(tc.fields(), TimecodeFields::new(0, 0, 0, 1).with_bits(40));
    }
}
