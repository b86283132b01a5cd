mod flags;
mod key;
mod layout;
mod properties;
mod stats;

pub use flags::*;
pub use key::*;
pub use layout::*;
pub use properties::*;
pub use stats::*;
