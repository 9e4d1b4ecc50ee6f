//! Double-submit-cookie CSRF protection.
//!
//! Every eligible response gets a fresh signed token, both as a cookie and as a
//! response header. State-changing requests must echo the token back in the header;
//! the header token must verify (signature + expiry) and equal the cookie token.

pub mod context;
pub mod decision;
pub mod duration;
pub mod error;
pub mod guard;
pub mod issuer;
pub mod options;
pub mod token;
pub mod verifier;

pub use context::RequestContext;
pub use decision::Decision;
pub use error::{Carrier, CsrfError, TokenError};
pub use guard::{CsrfGuard, CsrfOutcome};
pub use issuer::IssuedToken;
pub use options::{CsrfConfig, CsrfOptions};
