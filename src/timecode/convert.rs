use crate::prelude::*;

#[doc = r#"
How a [`Timecode`] keeps its meaning when it moves to another [`Framerate`].

Converting `01:00:00:00` at 24 fps to 29.97 non-drop:

| Method                           | Preserved            | Result           |
|----------------------------------|----------------------|------------------|
| `PreservingNumericalValues`      | the digits           | `01:00:00:00`    |
| `PreservingFrameCountFromZero`   | 86,400 frames        | `00:48:00:00`    |
| `PreservingRealTimeFromZero`     | 3,600 real seconds   | `00:59:56:12`    |
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConversionMethod {
    /// Reinterpret the hours, minutes, seconds, frames and bits verbatim at the new rate
    PreservingNumericalValues,
    /// Keep the whole frame count from zero. Sub-frame bits are dropped.
    PreservingFrameCountFromZero,
    /// Keep the real elapsed time from zero, rounded to the nearest bit of the new rate
    PreservingRealTimeFromZero,
}

impl Timecode {
    /// Returns this timecode re-expressed at `target`.
    ///
    /// # Errors
    /// - [`TimecodeError::InvalidFramerateConversion`] if `target` is a marker
    /// - [`TimecodeError::TickOverflow`] if the result does not fit in 64 bits of ticks
    pub fn converted_to(
        &self,
        target: impl Into<Rate>,
        method: ConversionMethod,
    ) -> TimecodeResult<Timecode> {
        let target = target.into().framerate().inspect_err(|_| {
            tracing::debug!(from = %self.framerate(), ?method, "refused conversion to a framerate marker");
        })?;
        let source = self.framerate();

        let ticks = match method {
            ConversionMethod::PreservingNumericalValues => {
                return Timecode::new(target, self.fields());
            }
            ConversionMethod::PreservingFrameCountFromZero => self
                .frames_from_zero()
                .checked_mul(target.common_ticks_per_frame())
                .ok_or(TimecodeError::TickOverflow)?,
            ConversionMethod::PreservingRealTimeFromZero => {
                real_time_ticks(self.common_ticks_from_zero(), &source, &target)?
            }
        };
        tracing::trace!(from = %source, to = %target, ?method, ticks, "converted timecode");
        Ok(Timecode::from_common_ticks(ticks, target))
    }

    /// [`Timecode::converted_to`] with `None` standing in for the invalid timecode,
    /// so a failed conversion can be carried along a per-frame path.
    pub fn converted_or_invalid(
        &self,
        target: impl Into<Rate>,
        method: ConversionMethod,
    ) -> Option<Timecode> {
        self.converted_to(target, method).ok()
    }

    /// Converts this timecode in place. On error it is left untouched.
    ///
    /// # Errors
    /// See [`Timecode::converted_to`].
    pub fn convert_to(
        &mut self,
        target: impl Into<Rate>,
        method: ConversionMethod,
    ) -> TimecodeResult<()> {
        *self = self.converted_to(target, method)?;
        Ok(())
    }
}

/// Rescale nominal ticks so that real time is kept, snapping to the nearest target bit.
fn real_time_ticks(ticks: i64, source: &Framerate, target: &Framerate) -> TimecodeResult<i64> {
    let speed = |framerate: &Framerate| if framerate.video_speed() { 1001 } else { 1000 };
    let per_bit = target.common_ticks_per_bit() as i128;

    let numerator = ticks as i128 * speed(source);
    let denominator = speed(target) * per_bit;
    let bits = div_round(numerator, denominator);
    i64::try_from(bits * per_bit).map_err(|_| TimecodeError::TickOverflow)
}

/// Division rounding half away from zero. `denominator` is positive.
fn div_round(numerator: i128, denominator: i128) -> i128 {
    let half = denominator / 2;
    if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    }
}
