use log::debug;

use crate::{
    error::TrimError,
    position::{Anchor, PositionParser, TrimConfig},
    signal::SignalInfo,
    units::Frames,
};

/// Outcome of resolving a [`TrimConfig`] against a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A single position at zero: nothing is discarded, so the filter can be
    /// left out of the chain.
    PassThrough,
    /// Absolute, non-decreasing frame offsets in argument order.
    Positions(Vec<Frames>),
}

/// Converts every marker to an absolute frame offset and validates the result.
pub fn resolve<P>(
    config: &TrimConfig,
    signal: &SignalInfo,
    parser: &P,
) -> Result<Resolution, TrimError>
where
    P: PositionParser + ?Sized,
{
    if signal.channels == 0 {
        return Err(TrimError::NoChannels);
    }
    if config.uses_end() && signal.length.is_none() {
        return Err(TrimError::LengthRequired);
    }
    if let Some(length) = signal
        .length
        .filter(|length| length.checked_to_scalars(signal.channels).is_none())
    {
        return Err(TrimError::LengthOverflow {
            length: length.get(),
        });
    }

    let mut last_seen = Frames::ZERO;
    let mut positions = Vec::with_capacity(config.markers().len());

    for (index, marker) in config.markers().iter().enumerate() {
        let position = index + 1;
        let value = parser
            .parse(signal.rate, marker.text())
            .map(Frames)
            .map_err(|source| TrimError::InvalidPosition {
                position,
                text: marker.text().to_owned(),
                source,
            })?;

        let resolved = match marker.anchor() {
            Anchor::FromStart => value,
            Anchor::FromPrevious => last_seen
                .checked_add(value)
                .ok_or(TrimError::PositionOverflow { position })?,
            Anchor::FromEnd => {
                let length = signal.length.ok_or(TrimError::LengthRequired)?;
                if value > length {
                    return Err(TrimError::PositionBeforeStart { position });
                }
                value.until(length)
            }
        };

        // the filter counts in samples across all channels
        if resolved.checked_to_scalars(signal.channels).is_none() {
            return Err(TrimError::PositionOverflow { position });
        }

        debug!("position {position} at {}", resolved.get());
        last_seen = resolved;
        positions.push(resolved);
    }

    if let Some(index) = positions.windows(2).position(|pair| pair[1] < pair[0]) {
        return Err(TrimError::MarkersOutOfOrder {
            position: index + 2,
        });
    }

    if let Some(length) = signal.length {
        if let Some(&first) = positions.first().filter(|&&first| first > length) {
            return Err(TrimError::StartBeyondEnd {
                offset: first.get(),
                length: length.get(),
            });
        }
        if let Some(&last) = positions.last().filter(|&&last| last > length) {
            return Err(TrimError::EndBeyondEnd {
                offset: last.get(),
                length: length.get(),
            });
        }
    }

    if positions == [Frames::ZERO] {
        return Ok(Resolution::PassThrough);
    }

    Ok(Resolution::Positions(positions))
}

/// Number of frames the positions keep from a stream of `length` frames.
///
/// Pairs of positions bound the kept spans. With an odd count the last span
/// runs to the end of the stream, so it is only known if `length` is.
pub fn output_length(positions: &[Frames], length: Option<Frames>) -> Option<Frames> {
    let closed: u64 = positions
        .chunks_exact(2)
        .map(|span| span[0].until(span[1]).get())
        .sum();

    match positions.chunks_exact(2).remainder() {
        [open] => length.map(|length| Frames(closed + open.until(length).get())),
        _ => Some(Frames(closed)),
    }
}
