#![warn(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]
#![doc = r#"
SMPTE/EBU timecode designed for humans

`timecode` models absolute time positions at broadcast and film framerates,
converts them exactly between rates, and reads and writes them as text and as
Longitudinal Timecode (LTC) words.

# Overview

- [`Framerate`](prelude::Framerate): frames per second, video speed and drop frame,
  plus the eight canonical rates and their interchange indices
- [`Rate`](prelude::Rate): a framerate slot that may hold the invalid or wildcard marker
- [`Timecode`](prelude::Timecode): a signed count of common ticks at a framerate, from
  which hours, minutes, seconds, frames and sub-frame bits are derived
- [`codec`]: the `HH:MM:SS:FF` text form, the 64 bit LTC payload, and the platform
  audio clock SMPTE structure

# Example
```rust
use timecode::prelude::*;

let tc = Timecode::parse("01:00:00:00", Framerate::FPS_24).unwrap();

let by_frames = tc
    .converted_to(Framerate::FPS_29_97, ConversionMethod::PreservingFrameCountFromZero)
    .unwrap();
assert_eq!(by_frames.to_string(), "00:48:00:00");

let by_time = tc
    .converted_to(Framerate::FPS_29_97, ConversionMethod::PreservingRealTimeFromZero)
    .unwrap();
assert_eq!(by_time.to_string(), "00:59:56:12");
```

# Logging

Rejected input and conversions are reported through [`tracing`] at `debug` and
`trace` level. Install a subscriber in your application to see them.
"#]

extern crate alloc;

pub mod codec;

mod error;
pub use error::*;

pub mod framerate;

pub mod timecode;

/// Commonly used types
pub mod prelude {
    pub use crate::{
        codec::{LtcFlags, LtcFrame, SmpteTime, TimecodeDisplay, TimecodeFormat},
        error::*,
        framerate::{
            BITS_PER_FRAME, COMMON_TICKS_PER_SECOND, Framerate, FramerateIndex, Rate,
        },
        timecode::{ConversionMethod, Timecode, TimecodeFields},
    };
}
