pub mod initialize;
pub mod create_stream;
pub mod approve_stream;
pub mod distribute;
pub mod emit_stream_quote;

pub use initialize::*;
pub use create_stream::*;
pub use approve_stream::*;
pub use distribute::*;
pub use emit_stream_quote::*;
