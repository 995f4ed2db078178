pub mod ctx;
pub mod settings;
pub mod utils;
pub mod view;
