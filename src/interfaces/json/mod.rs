//! JSON wire shapes: channel requests and responses, and the JSON Lines
//! command format read by the batch CLI.

pub mod command_reader;
pub mod request;
pub mod response;

pub use request::ChannelRequest;
pub use response::ChannelResponse;
