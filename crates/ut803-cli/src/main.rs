use std::fs::File;
use std::io::{self, Write};
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use ut803_core::{FRAME_LEN, FrameSource, Reading, RunLogger, SerialFrameSource, decode_frame};

#[derive(Parser, Debug)]
#[command(name = "ut803")]
#[command(version)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (", env!("UT803_BUILD_COMMIT"), " ", env!("UT803_BUILD_DATE"), ")"
))]
#[command(
    about = "Record and monitor measurements from a UNI-T UT803 multimeter over a serial connection.",
    long_about = None,
    after_help = "Examples:\n  ut803 /dev/ttyUSB0 readings.tsv\n  ut803 /dev/ttyUSB0 - --monitor\n  ut803 /dev/ttyUSB0 readings.tsv --delay 5"
)]
struct Cli {
    /// Serial port the multimeter is connected to
    port: String,

    /// Output file; use - for stdout
    output: String,

    /// Sleep between accepted samples for this many seconds
    #[arg(short, long, value_name = "SECONDS")]
    delay: Option<u64>,

    /// Display a live line with the current value and device status
    #[arg(short, long)]
    monitor: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cmd_record(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_record(cli: Cli) -> Result<(), CliError> {
    let mut source = SerialFrameSource::open(&cli.port).map_err(|err| {
        CliError::new(
            format!("failed to open serial port {}: {err}", cli.port),
            Some("check the device path and your permissions".to_string()),
        )
    })?;

    let out = open_output(&cli.output)?;
    let mut logger = RunLogger::new(out);

    loop {
        let record = match source.next_frame() {
            Ok(Some(record)) => record,
            // Nothing complete yet; the meter sends a couple of frames a
            // second, so just keep waiting.
            Ok(None) => continue,
            Err(err) => {
                return Err(CliError::new(
                    format!("serial read failed: {err}"),
                    Some("check the meter is on and the cable is seated".to_string()),
                ));
            }
        };

        if record.len() != FRAME_LEN {
            continue;
        }
        // Malformed frames are noise on the wire; drop them and keep the
        // session alive.
        let Ok(reading) = decode_frame(&record) else {
            continue;
        };

        let accepted = logger
            .log(&reading, Instant::now())
            .with_context(|| format!("failed to write to {}", cli.output))?;
        if !accepted {
            continue;
        }

        if cli.monitor {
            print_monitor(&reading);
        }
        if let Some(seconds) = cli.delay {
            thread::sleep(Duration::from_secs(seconds));
        }
    }
}

fn open_output(output: &str) -> Result<Box<dyn Write>, CliError> {
    if output == "-" {
        return Ok(Box::new(io::stdout()));
    }
    let file = File::create(output).map_err(|err| {
        CliError::new(
            format!("failed to create output file {output}: {err}"),
            Some("use - to write to stdout".to_string()),
        )
    })?;
    Ok(Box::new(file))
}

fn print_monitor(reading: &Reading) {
    let (value, unit) = ut803_core::format::scale_for_display(reading.value, &reading.unit);
    eprint!(
        "\r\x1b[0K{}: {:.2} {}, flags: {}",
        reading.kind,
        value,
        unit,
        reading.flags.active().join(" "),
    );
    let _ = io::stderr().flush();
}
