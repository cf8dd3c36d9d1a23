pub mod convert;
pub mod show;
