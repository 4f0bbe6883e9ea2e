//! Service layer module
//!
//! The request pipeline: validation, encoding, transport and decoding,
//! composed by the engine into one operation per endpoint

pub mod context;
pub mod decoder;
pub mod encoder;
pub mod endpoints;
pub mod engine;
pub mod transport;
pub mod validation;

pub use context::RequestContext;
pub use encoder::{Encoding, FilePart, FormField, FormValue, Payload};
pub use engine::{Endpoint, Engine};
pub use transport::Transport;
