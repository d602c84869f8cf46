// Domain layer: ingredient models and the ports the client depends on.

pub mod model;
pub mod ports;
