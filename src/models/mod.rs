pub mod intent;
pub mod slot_filler;

pub use self::intent::*;
pub use self::slot_filler::*;
