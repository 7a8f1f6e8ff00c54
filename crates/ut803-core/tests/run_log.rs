use std::time::{Duration, Instant};

use ut803_core::{FRAME_LEN, RunLogger, decode_frame};

/// Raw records as the meter sends them: every sample twice, runs of one
/// measurement kind, the odd garbage line in between.
const CAPTURE: &[(&[u8], u64)] = &[
    (b"41234;00:\r\n", 0),
    (b"41234;00:\r\n", 10),
    (b"41235;00:\r\n", 600),
    (b"41235;00:\r\n", 610),
    (b"\r\n", 900),
    (b"010003002\r\n", 1200),
    (b"010003002\r\n", 1210),
    (b"41234;0x8\r\n", 1500),
    (b"020003002\r\n", 1800),
];

#[test]
fn capture_replay_produces_exact_log() {
    let t0 = Instant::now();
    let mut logger = RunLogger::new(Vec::new());

    for &(record, millis) in CAPTURE {
        if record.len() != FRAME_LEN {
            continue;
        }
        let Ok(reading) = decode_frame(record) else {
            continue;
        };
        logger
            .log(&reading, t0 + Duration::from_millis(millis))
            .expect("write sample");
    }

    let out = String::from_utf8(logger.finish().expect("finish")).expect("utf8");
    assert_eq!(
        out,
        "# initial flags: autorange, dc\n\
         #time(s)\tvoltage(V)\toverload\n\
         0.0\t123.4\t0\n\
         0.6\t123.5\t0\n\
         \n\
         # initial flags: autorange\n\
         #time(s)\tresistance(Ohm)\toverload\n\
         0.0\t100\t0\n\
         0.6\t200\t0\n"
    );
}
