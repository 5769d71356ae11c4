#![doc = r#"
Wire forms of a [`Timecode`](crate::prelude::Timecode)

- [`string`]: the human readable `HH:MM:SS:FF` family
- [`ltc`]: the 64 bit Longitudinal Timecode payload
- [`smpte_time`]: the platform audio clock SMPTE structure
"#]

pub mod ltc;
pub use ltc::{LtcFlags, LtcFrame};

pub mod string;
pub use string::{TimecodeDisplay, TimecodeFormat};

pub mod smpte_time;
pub use smpte_time::*;
