pub mod error;
pub mod parse;
pub mod unit;

pub use error::TimecodeError;
pub use parse::Timecode;
pub use unit::DefaultUnit;
