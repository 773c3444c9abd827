// Dashboard container: per-session view state and the flows that mutate it.
// Gateway calls go through `crate::gateway::Gateway`; state updates are the
// pure functions in `state`.

pub mod handlers;
pub mod profile;
pub mod settings;
pub mod state;
pub mod templates;
pub mod upload;
pub mod view;
