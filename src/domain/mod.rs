// Domain layer: entities, report values and the output port. No registry logic here.

pub mod model;
pub mod ports;
pub mod report;
