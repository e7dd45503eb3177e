pub mod convert;
pub mod input;
