// Outreach: placeholder rendering and the sequential send loop.

pub mod dispatcher;
pub mod render;
