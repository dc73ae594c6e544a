/// Whether frames currently being read are dropped or copied to the output.
///
/// Every position crossed flips the mode; audio before the first position is
/// always dropped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Skipping,
    Keeping,
}

impl Mode {
    pub const fn toggled(self) -> Self {
        match self {
            Mode::Skipping => Mode::Keeping,
            Mode::Keeping => Mode::Skipping,
        }
    }

    pub const fn is_keeping(self) -> bool {
        matches!(self, Mode::Keeping)
    }
}
