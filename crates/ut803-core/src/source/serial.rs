use std::io::{self, Read};
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

use super::{FrameSource, SourceError};

const BAUD_RATE: u32 = 19_200;
const READ_TIMEOUT: Duration = Duration::from_secs(2);

/// Reads newline-terminated records from the meter's serial port.
///
/// The line discipline is fixed by the device: 19200 baud, 7 data bits,
/// odd parity, 1 stop bit, software flow control. Records are returned
/// with their terminator, so a well-formed frame is exactly 11 bytes.
pub struct SerialFrameSource {
    port: Box<dyn SerialPort>,
    pending: Vec<u8>,
}

impl SerialFrameSource {
    pub fn open(path: &str) -> Result<Self, SourceError> {
        let mut port = serialport::new(path, BAUD_RATE)
            .data_bits(DataBits::Seven)
            .parity(Parity::Odd)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::Software)
            .timeout(READ_TIMEOUT)
            .open()?;

        // The meter's RS-232 level shifter is powered from the handshake
        // lines: DTR high, RTS low.
        port.write_data_terminal_ready(true)?;
        port.write_request_to_send(false)?;

        Ok(Self {
            port,
            pending: Vec::new(),
        })
    }
}

impl FrameSource for SerialFrameSource {
    fn next_frame(&mut self) -> Result<Option<Vec<u8>>, SourceError> {
        loop {
            if let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = self.pending.drain(..=pos).collect();
                return Ok(Some(line));
            }

            let mut chunk = [0u8; 64];
            match self.port.read(&mut chunk) {
                Ok(0) => return Ok(None),
                Ok(n) => self.pending.extend_from_slice(&chunk[..n]),
                Err(err) if err.kind() == io::ErrorKind::TimedOut => return Ok(None),
                Err(err) => return Err(SourceError::Io(err)),
            }
        }
    }
}
