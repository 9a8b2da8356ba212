mod compute;
mod records;

pub use compute::*;
pub use records::*;
