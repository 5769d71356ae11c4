use pretty_assertions::assert_eq;
use timecode::prelude::*;

/// Every canonical rate plus a couple of non-canonical ones
fn framerates() -> Vec<Framerate> {
    let mut rates: Vec<Framerate> = FramerateIndex::all()
        .into_iter()
        .map(FramerateIndex::framerate)
        .collect();
    rates.push(Framerate::new(60, true, true).unwrap());
    rates.push(Framerate::new(25, false, true).unwrap());
    rates
}

#[test]
fn fields_round_trip_through_ticks() {
    for framerate in framerates() {
        let zero = Timecode::zero(framerate);
        // a stride coprime with every frame count walks through all frame numbers
        for frames in (0..26 * 3600 * 60).step_by(997) {
            let tc = zero.with_frames_from_zero(frames).unwrap();
            let fields = tc.fields();
            assert!(fields.is_valid_for(&framerate), "{fields:?} at {framerate}");

            let rebuilt = Timecode::new(framerate, fields).unwrap();
            assert_eq!(rebuilt, tc, "at {framerate}");
        }
    }
}

#[test]
fn every_drop_frame_label_in_twenty_minutes() {
    let framerate = Framerate::FPS_29_97_DROP;
    let zero = Timecode::zero(framerate);
    let mut previous: Option<TimecodeFields> = None;
    for frames in 0..2 * 17_982 {
        let tc = zero.with_frames_from_zero(frames).unwrap();
        let fields = tc.fields();
        assert!(fields.is_valid_for(&framerate));
        assert_eq!(Timecode::new(framerate, fields).unwrap(), tc);

        if let Some(previous) = previous {
            let skipped = previous.seconds == 59 && previous.frames == 29;
            if skipped && fields.minutes % 10 != 0 {
                assert_eq!(fields.frames, 2, "{previous:?} -> {fields:?}");
            }
        }
        previous = Some(fields);
    }
}

#[test]
fn format_then_parse() {
    for framerate in framerates() {
        let zero = Timecode::zero(framerate);
        for bits in (-40 * 3600 * 80 * 60..40 * 3600 * 80 * 60).step_by(7_919_993) {
            let tc = zero.with_bits_from_zero(bits).unwrap();

            let with_bits = tc.display(TimecodeFormat::WithBits).to_string();
            let parsed = Timecode::parse(&with_bits, framerate).unwrap();
            assert_eq!(parsed.fields(), tc.fields(), "{with_bits} at {framerate}");

            let plain = tc.with_bits(0).unwrap();
            let parsed = Timecode::parse(&plain.to_string(), framerate).unwrap();
            assert_eq!(parsed, plain);
        }
    }
}

#[test]
fn framerate_suffix_is_output_only() {
    let tc = Timecode::parse("00:10:00:00", Framerate::FPS_29_97_DROP).unwrap();
    let text = tc.display(TimecodeFormat::WithBitsAndFramerate).to_string();
    assert_eq!(text, "00:10:00:00:00 @ 29.97 drop");
    assert!(Timecode::parse(&text, Framerate::FPS_29_97_DROP).is_err());
}
