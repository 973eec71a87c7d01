mod collector;

pub use collector::*;
