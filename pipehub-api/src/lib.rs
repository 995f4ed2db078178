mod inner;
pub mod model;
mod session;

pub use inner::{Ack, Fetched, Reissued, API};
pub use session::Session;

pub use reqwest;
pub use serde_json;
