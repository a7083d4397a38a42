// Domain layer: document models, ports (interfaces) and the text services that
// run between extraction and rendering. Nothing here touches the filesystem.

pub mod model;
pub mod ports;

pub mod services;
