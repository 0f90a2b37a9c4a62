pub mod session;

pub use session::SessionKey;
