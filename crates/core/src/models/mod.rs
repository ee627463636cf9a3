pub mod allocation;
pub mod history;
pub(crate) mod json;
pub mod recommendation;
pub mod session;
pub mod settings;
pub mod snapshot;
pub mod view;
