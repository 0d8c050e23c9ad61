//! OAuth 2.0 client-credential configuration, access tokens, token sources, and the bearer
//! transport that attaches tokens to outgoing requests.

pub mod bearer;
pub mod credentials;
pub mod source;
pub mod token;

pub use bearer::*;
pub use credentials::*;
pub use source::*;
pub use token::*;
