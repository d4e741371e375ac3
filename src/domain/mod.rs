// Domain layer: core models, the fixed Prinex template and ports (interfaces).

pub mod model;
pub mod ports;
pub mod schema;
