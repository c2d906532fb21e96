// Domain layer: the structured view and the ports the core depends on.

pub mod model;
pub mod ports;
