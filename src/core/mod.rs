pub mod logging;
pub mod refresh;
pub mod settings;
