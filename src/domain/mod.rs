// Domain layer: command results, download outcomes and ports (interfaces).

pub mod model;
pub mod ports;
