// Domain layer: value types and the randomness port. No I/O here.

pub mod model;
pub mod ports;
