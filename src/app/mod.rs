// Application layer: concrete input/output channels around the core session.

pub mod console;
pub mod pipelines;
