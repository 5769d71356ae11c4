use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::prelude::*;

/// The stable interchange index of a canonical [`Framerate`]
///
/// The numbering matches the platform SMPTE time type codes
/// (`0` = 24 fps, `1` = 25 fps, `2` = 30 drop, `3` = 30, `4` = 29.97,
/// `5` = 29.97 drop, `11` = 23.976). 24.975 fps has no platform
/// equivalent and takes the unused code `12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum FramerateIndex {
    /// 24 fps film
    Fps24 = 0,
    /// 25 fps PAL/SECAM
    Fps25 = 1,
    /// 30 fps with drop-frame labels (film speed)
    Fps30Drop = 2,
    /// 30 fps
    Fps30 = 3,
    /// 29.97 fps non-drop
    Fps29_97 = 4,
    /// 29.97 fps drop-frame
    Fps29_97Drop = 5,
    /// 23.976 fps (24 at video speed)
    Fps23_976 = 11,
    /// 24.975 fps (25 at video speed)
    Fps24_975 = 12,
}

/// Every canonical framerate, in index order.
static CANONICAL: [(FramerateIndex, Framerate); 8] = [
    (FramerateIndex::Fps24, Framerate::FPS_24),
    (FramerateIndex::Fps25, Framerate::FPS_25),
    (FramerateIndex::Fps30Drop, Framerate::FPS_30_DROP),
    (FramerateIndex::Fps30, Framerate::FPS_30),
    (FramerateIndex::Fps29_97, Framerate::FPS_29_97),
    (FramerateIndex::Fps29_97Drop, Framerate::FPS_29_97_DROP),
    (FramerateIndex::Fps23_976, Framerate::FPS_23_976),
    (FramerateIndex::Fps24_975, Framerate::FPS_24_975),
];

impl FramerateIndex {
    /// Returns all canonical indices
    pub fn all() -> [FramerateIndex; 8] {
        core::array::from_fn(|i| CANONICAL[i].0)
    }

    /// Look up an index from its raw value.
    ///
    /// # Errors
    /// [`TimecodeError::UnknownFramerateIndex`] for anything outside
    /// `{0, 1, 2, 3, 4, 5, 11, 12}`.
    pub fn from_raw(index: u32) -> TimecodeResult<Self> {
        Self::try_from(index).map_err(|e| TimecodeError::UnknownFramerateIndex(e.number))
    }

    /// The raw interchange value
    pub fn value(self) -> u32 {
        self.into()
    }

    /// The canonical framerate at this index
    pub const fn framerate(self) -> Framerate {
        use FramerateIndex::*;
        match self {
            Fps24 => Framerate::FPS_24,
            Fps25 => Framerate::FPS_25,
            Fps30Drop => Framerate::FPS_30_DROP,
            Fps30 => Framerate::FPS_30,
            Fps29_97 => Framerate::FPS_29_97,
            Fps29_97Drop => Framerate::FPS_29_97_DROP,
            Fps23_976 => Framerate::FPS_23_976,
            Fps24_975 => Framerate::FPS_24_975,
        }
    }

    /// The index of a framerate, if it is one of the canonical eight.
    ///
    /// This is full equality: 30 fps film speed and 29.97 have different indices.
    pub fn of(framerate: &Framerate) -> Option<Self> {
        CANONICAL
            .iter()
            .find(|(_, canonical)| canonical == framerate)
            .map(|(index, _)| *index)
    }
}

impl From<FramerateIndex> for Framerate {
    fn from(value: FramerateIndex) -> Self {
        value.framerate()
    }
}

#[test]
fn index_table_is_bidirectional() {
    use pretty_assertions::assert_eq;
    for index in FramerateIndex::all() {
        let framerate = index.framerate();
        assert_eq!(FramerateIndex::of(&framerate), Some(index));
        assert_eq!(FramerateIndex::from_raw(index.value()), Ok(index));
    }
}

#[test]
fn unknown_indices() {
    use pretty_assertions::assert_eq;
    for raw in [6, 7, 8, 9, 10, 13, 255, u32::MAX] {
        assert_eq!(
            FramerateIndex::from_raw(raw),
            Err(TimecodeError::UnknownFramerateIndex(raw))
        );
    }
}
