use crate::{error::TimecodeError, unit::DefaultUnit};

/// Characters that may appear in a position token.
const TOKEN_CHARS: &str = "0123456789:.ts";

/// Reads sample positions written either as a time, `[[hh:]mm:]ss[.frac][t]`,
/// or as a raw frame count, `N[s]`.
///
/// Times are converted to frames at the rate passed to each call, so the same
/// `Timecode` can dry-run a position with a placeholder rate of `0.0` and parse
/// it for real once the stream rate is known.
///
/// # Example
/// ```
/// use timecode::{DefaultUnit, Timecode};
///
/// let tc = Timecode::new(DefaultUnit::Seconds);
/// assert_eq!(tc.parse_position(44100.0, "1:30").unwrap(), 90 * 44100);
/// assert_eq!(tc.parse_position(44100.0, "512s").unwrap(), 512);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timecode {
    unit: DefaultUnit,
}

impl Timecode {
    pub const fn new(unit: DefaultUnit) -> Self {
        Self { unit }
    }

    /// Bare numbers are seconds.
    pub const fn seconds() -> Self {
        Self::new(DefaultUnit::Seconds)
    }

    /// Bare numbers are frame counts.
    pub const fn samples() -> Self {
        Self::new(DefaultUnit::Samples)
    }

    pub const fn unit(&self) -> DefaultUnit {
        self.unit
    }

    /// Parses the longest valid prefix of `text` into a frame count at `rate`
    /// and returns it together with the unconsumed remainder.
    pub fn parse_samples<'t>(
        &self,
        rate: f64,
        text: &'t str,
    ) -> Result<(u64, &'t str), TimecodeError> {
        let text = text.trim_start_matches(' ');
        if text.is_empty() {
            return Err(TimecodeError::Empty);
        }

        let token_len = text
            .find(|c: char| !TOKEN_CHARS.contains(c))
            .unwrap_or(text.len());
        let token = &text[..token_len];
        if token.is_empty() {
            return Err(invalid(text));
        }

        let is_time = token.contains([':', '.']) || token.ends_with('t');
        let is_samples = !is_time && token.ends_with('s');

        if is_time || (self.unit == DefaultUnit::Seconds && !is_samples) {
            parse_time(rate, text)
        } else {
            parse_count(text)
        }
    }

    /// Like [`Timecode::parse_samples`], but the whole text must be consumed.
    pub fn parse_position(&self, rate: f64, text: &str) -> Result<u64, TimecodeError> {
        let (frames, rest) = self.parse_samples(rate, text)?;
        if rest.is_empty() {
            Ok(frames)
        } else {
            Err(TimecodeError::TrailingCharacters {
                rest: rest.to_owned(),
            })
        }
    }
}

fn invalid(text: &str) -> TimecodeError {
    TimecodeError::InvalidNumber {
        text: text.to_owned(),
    }
}

fn overflow(text: &str) -> TimecodeError {
    TimecodeError::Overflow {
        text: text.to_owned(),
    }
}

fn split_digits(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text.split_at(end)
}

fn parse_time(rate: f64, text: &str) -> Result<(u64, &str), TimecodeError> {
    let mut rest = text;
    let mut whole_seconds: u64 = 0;

    // hh:mm:ss, mm:ss or ss; a leading '.' means no whole part at all
    if !rest.starts_with('.') {
        for field in 0..3 {
            let (digits, after) = split_digits(rest);
            if digits.is_empty() {
                return Err(invalid(text));
            }
            let value: u64 = digits.parse().map_err(|_| overflow(text))?;
            whole_seconds = whole_seconds
                .checked_mul(60)
                .and_then(|acc| acc.checked_add(value))
                .ok_or_else(|| overflow(text))?;
            rest = after;

            match rest.strip_prefix(':') {
                Some(after_colon) if field < 2 => rest = after_colon,
                _ => break,
            }
        }
    }

    let mut fraction = 0.0;
    if let Some(after_dot) = rest.strip_prefix('.') {
        let (digits, after) = split_digits(after_dot);
        if digits.is_empty() {
            return Err(invalid(text));
        }
        fraction = format!("0.{digits}")
            .parse::<f64>()
            .map_err(|_| invalid(text))?;
        rest = after;
    }

    let frames = rate.mul_add(whole_seconds as f64 + fraction, 0.5).floor();
    if !(0.0..u64::MAX as f64).contains(&frames) {
        return Err(overflow(text));
    }

    Ok((frames as u64, rest.strip_prefix('t').unwrap_or(rest)))
}

fn parse_count(text: &str) -> Result<(u64, &str), TimecodeError> {
    let (digits, rest) = split_digits(text);
    if digits.is_empty() {
        return Err(invalid(text));
    }
    let frames = digits.parse().map_err(|_| overflow(text))?;
    Ok((frames, rest.strip_prefix('s').unwrap_or(rest)))
}
