// Domain layer: pricing records and the discount code port. No I/O here.

pub mod model;
pub mod ports;
