pub mod array;
pub use array::Array;

pub mod set;
pub use set::Set;
