use pretty_assertions::assert_eq;
use timecode::prelude::*;

#[test]
fn skipped_labels_are_rejected() {
    for minute in 0..60u8 {
        for frame in 0..2u32 {
            let text = format!("00:{minute:02}:00:{frame:02}");
            let result = Timecode::parse(&text, Framerate::FPS_29_97_DROP);
            if minute % 10 == 0 {
                assert!(result.is_ok(), "{text} should be valid");
            } else {
                assert_eq!(
                    result,
                    Err(TimecodeError::MalformedTimecodeString(
                        TimecodeStringError::DroppedFrame {
                            minutes: minute,
                            frames: frame
                        }
                    )),
                    "{text} should be dropped"
                );
            }
        }
    }
}

#[test]
fn film_speed_drop_frame_also_skips() {
    assert!(Timecode::parse("00:01:00:00", Framerate::FPS_30_DROP).is_err());
    assert!(Timecode::parse("00:01:00:02", Framerate::FPS_30_DROP).is_ok());
}

#[test]
fn drop_frame_tracks_real_time() {
    // ten minutes of drop-frame labels is almost exactly ten minutes of 29.97 video
    let ten_minutes = Timecode::parse("00:10:00:00", Framerate::FPS_29_97_DROP).unwrap();
    assert_eq!(ten_minutes.frames_from_zero(), 17_982);
    assert!((ten_minutes.seconds_from_zero() - 600.).abs() < 0.001);

    let one_hour = Timecode::parse("01:00:00:00", Framerate::FPS_29_97_DROP).unwrap();
    assert_eq!(one_hour.frames_from_zero(), 107_892);
    assert!((one_hour.seconds_from_zero() - 3600.).abs() < 0.004);
}

#[test]
fn stepping_over_a_minute_boundary() {
    let rate = Framerate::FPS_29_97_DROP;
    let last = Timecode::parse("00:00:59:29", rate).unwrap();
    let next = last.checked_add_frames(1).unwrap();
    assert_eq!(next.to_string(), "00:01:00:02");
    assert_eq!(next.checked_add_frames(-1).unwrap(), last);

    let ninth = Timecode::parse("00:09:59:29", rate).unwrap();
    assert_eq!(ninth.checked_add_frames(1).unwrap().to_string(), "00:10:00:00");
}

#[test]
fn sixty_drop_skips_four() {
    let rate = Framerate::new(60, true, true).unwrap();
    assert!(Timecode::parse("00:01:00:03", rate).is_err());
    let last = Timecode::parse("00:00:59:59", rate).unwrap();
    assert_eq!(last.checked_add_frames(1).unwrap().to_string(), "00:01:00:04");
}
