//! Framework-agnostic entry point: one call per request.
//!
//! ```text
//! START -> exempt? -> DONE
//! START -> DECIDE -> VERIFY? -> CREATE? -> DONE | REJECTED
//! ```

use tracing::debug;

use crate::csrf::context::RequestContext;
use crate::csrf::decision::{Decision, decide};
use crate::csrf::error::CsrfError;
use crate::csrf::issuer::{IssuedToken, issue_at};
use crate::csrf::options::{CsrfConfig, CsrfOptions};
use crate::csrf::token::{TokenCodec, unix_now};
use crate::csrf::verifier::verify_at;

#[derive(Debug)]
pub enum CsrfOutcome {
    /// Let the request through; attach `issued` to the response if present.
    Allow { issued: Option<IssuedToken> },
    /// Stop the request. A rejected response carries no new token.
    Reject { reason: CsrfError },
}

#[derive(Debug, Clone)]
pub struct CsrfGuard {
    config: CsrfConfig,
    codec: TokenCodec,
}

impl CsrfGuard {
    /// Validate the options and build the guard. Fails without a secret.
    pub fn new(options: CsrfOptions) -> Result<Self, CsrfError> {
        let config = options.validate()?;
        let codec = TokenCodec::new(config.secret(), config.expires_in());
        Ok(Self { config, codec })
    }

    pub fn config(&self) -> &CsrfConfig {
        &self.config
    }

    pub fn decide(&self, ctx: &RequestContext) -> Decision {
        decide(ctx, &self.config)
    }

    pub fn evaluate(&self, ctx: &RequestContext) -> CsrfOutcome {
        self.evaluate_at(ctx, unix_now())
    }

    /// Same as `evaluate` with an explicit clock (Unix seconds).
    pub fn evaluate_at(&self, ctx: &RequestContext, now: i64) -> CsrfOutcome {
        let decision = self.decide(ctx);
        debug!(
            method = ctx.method(),
            path = ctx.path(),
            do_create = decision.do_create,
            do_verify = decision.do_verify,
            "csrf decision"
        );

        if decision.do_verify
            && let Err(reason) = verify_at(ctx, &self.config, &self.codec, now)
        {
            return CsrfOutcome::Reject { reason };
        }

        if !decision.do_create {
            return CsrfOutcome::Allow { issued: None };
        }

        match issue_at(&self.config, &self.codec, now) {
            Ok(issued) => CsrfOutcome::Allow {
                issued: Some(issued),
            },
            Err(reason) => CsrfOutcome::Reject { reason },
        }
    }
}
