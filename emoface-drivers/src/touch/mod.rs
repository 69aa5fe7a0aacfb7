//! Touch pad drivers

pub mod pad;

pub use pad::TouchPad;
