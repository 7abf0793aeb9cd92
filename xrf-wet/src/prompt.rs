//! Console prompt for a single decimal number.

use std::io::{BufRead, Write};

use crate::error::{InputError, InputResult};

/// Message shown after input that does not parse as a number.
pub const INVALID_INPUT: &str = "Invalid input. Please enter a number.";

/// Prompt until a line parses as `f64`.
///
/// There is no retry limit. Surrounding whitespace is ignored, as are
/// underscores between digits (`1_000`). A line that is not valid UTF-8 is
/// rejected like any other non-number. Returns [`InputError::Closed`] if the
/// input ends first.
///
/// # Example
/// ```
/// use std::io::Cursor;
/// use xrfwet::prompt::read_fraction;
///
/// let mut out = Vec::new();
/// let m = read_fraction(Cursor::new("abc\n0.75\n"), &mut out, "Moisture: ").unwrap();
/// assert_eq!(m, 0.75);
/// ```
pub fn read_fraction<R: BufRead, W: Write>(mut input: R, mut output: W, prompt: &str) -> InputResult<f64> {
    let mut buf = Vec::new();

    loop {
        write!(output, "{}", prompt)?;
        output.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Err(InputError::Closed);
        }

        match std::str::from_utf8(&buf).ok().and_then(parse_number) {
            Some(value) => return Ok(value),
            None => writeln!(output, "{}", INVALID_INPUT)?,
        }
    }
}

/// Parse a decimal number, allowing single underscores between digits.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if !text.contains('_') {
        return text.parse().ok();
    }

    let bytes = text.as_bytes();
    let mut digits = String::with_capacity(text.len());
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'_' {
            let before = i > 0 && bytes[i - 1].is_ascii_digit();
            let after = bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
            if !(before && after) {
                return None;
            }
        } else {
            digits.push(b as char);
        }
    }
    digits.parse().ok()
}
