//! Run-grouped TSV logging with duplicate suppression.
//!
//! The meter emits every sample twice in quick succession, so accepted
//! samples are debounced by wall-clock time. Samples are grouped into runs
//! of one measurement kind; each run gets a header and its own time base.
//! Time is injected so the logger is deterministic under test.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::{MeasurementKind, Reading};

/// Repeats arriving less than this after the last accepted sample are
/// dropped.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(50);

struct Run {
    kind: MeasurementKind,
    started: Instant,
    last_accepted: Option<f64>,
}

/// Writes readings as a tab-separated stream, one header per contiguous
/// run of a measurement kind.
///
/// Output format per run:
/// `# initial flags: <active flags>` and `#time(s)\t<kind>(<unit>)\toverload`,
/// then `<elapsed:.1>\t<value>\t<0|1>` data lines. The sink is flushed
/// after every accepted sample so an interrupt cannot lose the tail.
pub struct RunLogger<W: Write> {
    out: W,
    run: Option<Run>,
    debounce: Duration,
}

impl<W: Write> RunLogger<W> {
    pub fn new(out: W) -> Self {
        Self::with_debounce(out, DEBOUNCE_WINDOW)
    }

    pub fn with_debounce(out: W, debounce: Duration) -> Self {
        Self {
            out,
            run: None,
            debounce,
        }
    }

    /// Log one reading observed at `now`. Returns whether the sample was
    /// accepted; suppressed duplicates write nothing.
    pub fn log(&mut self, reading: &Reading, now: Instant) -> io::Result<bool> {
        let run = match &mut self.run {
            Some(run) if run.kind == reading.kind => run,
            run => {
                if run.is_some() {
                    self.out.write_all(b"\n")?;
                }
                write!(
                    self.out,
                    "# initial flags: {}\n#time(s)\t{}({})\toverload\n",
                    reading.flags.active().join(", "),
                    reading.kind,
                    reading.unit,
                )?;
                run.insert(Run {
                    kind: reading.kind,
                    started: now,
                    last_accepted: None,
                })
            }
        };

        let elapsed = now.duration_since(run.started).as_secs_f64();
        if let Some(last) = run.last_accepted {
            if elapsed - last < self.debounce.as_secs_f64() {
                return Ok(false);
            }
        }
        run.last_accepted = Some(elapsed);

        writeln!(
            self.out,
            "{:.1}\t{}\t{}",
            elapsed,
            reading.value,
            u8::from(reading.flags.overload),
        )?;
        self.out.flush()?;
        Ok(true)
    }

    /// Flush and hand back the sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StatusFlags;

    fn voltage(value: f64) -> Reading {
        Reading {
            value,
            unit: "V".to_string(),
            kind: MeasurementKind::Voltage,
            flags: StatusFlags {
                dc: true,
                autorange: true,
                ..StatusFlags::default()
            },
        }
    }

    fn resistance(value: f64) -> Reading {
        Reading {
            value,
            unit: "Ohm".to_string(),
            kind: MeasurementKind::Resistance,
            flags: StatusFlags::default(),
        }
    }

    #[test]
    fn first_sample_writes_header_and_line() {
        let mut logger = RunLogger::new(Vec::new());
        let t0 = Instant::now();
        assert!(logger.log(&voltage(123.4), t0).expect("log"));

        let out = String::from_utf8(logger.finish().expect("finish")).expect("utf8");
        assert_eq!(
            out,
            "# initial flags: autorange, dc\n#time(s)\tvoltage(V)\toverload\n0.0\t123.4\t0\n"
        );
    }

    #[test]
    fn duplicate_within_window_is_suppressed() {
        let mut logger = RunLogger::new(Vec::new());
        let t0 = Instant::now();
        assert!(logger.log(&voltage(1.0), t0).expect("log"));
        assert!(
            !logger
                .log(&voltage(1.0), t0 + Duration::from_millis(20))
                .expect("log")
        );
        assert!(
            logger
                .log(&voltage(1.0), t0 + Duration::from_millis(120))
                .expect("log")
        );

        let out = String::from_utf8(logger.finish().expect("finish")).expect("utf8");
        let data_lines: Vec<_> = out.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(data_lines, vec!["0.0\t1\t0", "0.1\t1\t0"]);
    }

    #[test]
    fn kind_change_starts_a_new_run_with_fresh_time_base() {
        let mut logger = RunLogger::new(Vec::new());
        let t0 = Instant::now();
        assert!(logger.log(&voltage(1.0), t0).expect("log"));
        assert!(
            logger
                .log(&resistance(470.0), t0 + Duration::from_secs(5))
                .expect("log")
        );

        let out = String::from_utf8(logger.finish().expect("finish")).expect("utf8");
        assert_eq!(
            out,
            "# initial flags: autorange, dc\n\
             #time(s)\tvoltage(V)\toverload\n\
             0.0\t1\t0\n\
             \n\
             # initial flags: \n\
             #time(s)\tresistance(Ohm)\toverload\n\
             0.0\t470\t0\n"
        );
    }

    #[test]
    fn kind_change_resets_the_debounce() {
        let mut logger = RunLogger::new(Vec::new());
        let t0 = Instant::now();
        assert!(logger.log(&voltage(1.0), t0).expect("log"));
        // A new run accepts immediately even though the previous sample
        // was just written.
        assert!(
            logger
                .log(&resistance(470.0), t0 + Duration::from_millis(10))
                .expect("log")
        );
    }

    #[test]
    fn overload_column_tracks_the_flag() {
        let mut reading = voltage(0.0);
        reading.flags.overload = true;

        let mut logger = RunLogger::new(Vec::new());
        assert!(logger.log(&reading, Instant::now()).expect("log"));
        let out = String::from_utf8(logger.finish().expect("finish")).expect("utf8");
        assert!(out.ends_with("0.0\t0\t1\n"));
    }
}
