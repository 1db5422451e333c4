// Domain layer: calculation rule, form state and ports. No I/O here.

pub mod calculator;
pub mod form;
pub mod model;
pub mod ports;
