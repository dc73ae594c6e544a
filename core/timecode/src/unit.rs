/// How a bare number (no `s`/`t` suffix, no `:` or `.`) is read.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DefaultUnit {
    /// `90` means ninety seconds
    #[default]
    Seconds,
    /// `90` means ninety sample frames
    Samples,
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_seconds_is_the_default() {
        assert_eq!(DefaultUnit::default(), DefaultUnit::Seconds);
    }
}
