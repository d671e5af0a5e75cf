mod color;
mod enums;
mod style;

pub use color::{Color, ColorOp, Rgb};
pub use enums::{Border, Cursor, Direction, Overflow, Size, TextStyle, UserSelect};
pub use style::Style;
