use crate::{error::TrimError, position::PositionParser};

/// Rate used to check position syntax before the stream rate is known.
const PLACEHOLDER_RATE: f64 = 0.0;

/// What a position's value is counted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// `=pos`: from the start of the audio
    FromStart,
    /// `pos`: from the previous position (the start, for the first one)
    FromPrevious,
    /// `-pos`: back from the end of the audio
    FromEnd,
}

impl Anchor {
    /// Splits the anchor prefix off a position argument.
    pub fn split(arg: &str) -> (Self, &str) {
        if let Some(rest) = arg.strip_prefix('=') {
            (Self::FromStart, rest)
        } else if let Some(rest) = arg.strip_prefix('-') {
            (Self::FromEnd, rest)
        } else {
            (Self::FromPrevious, arg)
        }
    }
}

/// One position argument, kept as text until the stream rate is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    text: String,
    anchor: Anchor,
}

impl Marker {
    pub fn new(anchor: Anchor, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            anchor,
        }
    }

    pub fn from_arg(arg: &str) -> Self {
        let (anchor, text) = Anchor::split(arg);
        Self::new(anchor, text)
    }

    /// The position body, without its anchor prefix.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }
}

/// Syntax-checked trim positions, ready to be resolved against a stream.
///
/// Positions alternate between "discard up to here" and "keep up to here",
/// starting with discard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrimConfig {
    markers: Vec<Marker>,
    uses_end: bool,
}

impl TrimConfig {
    pub fn parse<I, S, P>(args: I, parser: &P) -> Result<Self, TrimError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        P: PositionParser + ?Sized,
    {
        let markers = args
            .into_iter()
            .enumerate()
            .map(|(index, arg)| {
                let marker = Marker::from_arg(arg.as_ref());
                parser
                    .parse(PLACEHOLDER_RATE, marker.text())
                    .map_err(|source| TrimError::InvalidSyntax {
                        position: index + 1,
                        text: marker.text().to_owned(),
                        source,
                    })?;
                Ok(marker)
            })
            .collect::<Result<Vec<_>, TrimError>>()?;

        Ok(Self::from_markers(markers))
    }

    /// Builds a config from already-split markers without checking syntax.
    pub fn from_markers(markers: Vec<Marker>) -> Self {
        let uses_end = markers
            .iter()
            .any(|marker| marker.anchor() == Anchor::FromEnd);
        Self { markers, uses_end }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Whether any position counts back from the end, which needs a known length.
    pub fn uses_end(&self) -> bool {
        self.uses_end
    }
}

#[cfg(test)]
mod marker_tests {
    use timecode::Timecode;

    use super::*;

    #[test]
    fn test_anchor_prefixes() {
        assert_eq!(Anchor::split("=1.5"), (Anchor::FromStart, "1.5"));
        assert_eq!(Anchor::split("-10s"), (Anchor::FromEnd, "10s"));
        assert_eq!(Anchor::split("0:30"), (Anchor::FromPrevious, "0:30"));
    }

    #[test]
    fn test_only_the_first_prefix_is_an_anchor() {
        let marker = Marker::from_arg("=-5");
        assert_eq!(marker.anchor(), Anchor::FromStart);
        assert_eq!(marker.text(), "-5");
    }

    #[test]
    fn test_parse_keeps_order_and_text() {
        let config = TrimConfig::parse(["=10s", "5s", "-2s"], &Timecode::seconds()).unwrap();

        assert_eq!(
            config.markers(),
            &[
                Marker::new(Anchor::FromStart, "10s"),
                Marker::new(Anchor::FromPrevious, "5s"),
                Marker::new(Anchor::FromEnd, "2s"),
            ]
        );
        assert!(config.uses_end());
    }

    #[test]
    fn test_uses_end_only_with_end_anchor() {
        let config = TrimConfig::parse(["=1", "2"], &Timecode::seconds()).unwrap();
        assert!(!config.uses_end());
    }

    #[test]
    fn test_empty_argument_list_is_valid() {
        let config = TrimConfig::parse(Vec::<String>::new(), &Timecode::seconds()).unwrap();
        assert!(config.markers().is_empty());
    }

    #[test]
    fn test_syntax_error_names_the_position() {
        let err = TrimConfig::parse(["1", "=2", "3x"], &Timecode::seconds()).unwrap_err();
        match err {
            TrimError::InvalidSyntax { position, text, .. } => {
                assert_eq!(position, 3);
                assert_eq!(text, "3x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bare_prefix_is_a_syntax_error() {
        let err = TrimConfig::parse(["-"], &Timecode::seconds()).unwrap_err();
        assert!(matches!(err, TrimError::InvalidSyntax { position: 1, .. }));
    }
}
