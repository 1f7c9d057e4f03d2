pub mod payment_stream;
pub mod program_authority;
pub mod treasury;

pub use payment_stream::*;
pub use program_authority::*;
pub use treasury::*;
