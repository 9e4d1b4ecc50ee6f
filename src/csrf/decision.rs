use crate::csrf::context::RequestContext;
use crate::csrf::options::CsrfConfig;

/// Methods the guard never touches: CORS preflight and TRACE.
pub const EXEMPT_METHODS: [&str; 2] = ["OPTIONS", "TRACE"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub do_create: bool,
    pub do_verify: bool,
}

impl Decision {
    pub const SKIP_ALL: Self = Self {
        do_create: false,
        do_verify: false,
    };
}

pub fn is_exempt_method(method: &str) -> bool {
    EXEMPT_METHODS.iter().any(|m| m.eq_ignore_ascii_case(method))
}

/// Decide which stages run for this request.
///
/// Each hook is called at most once. `skip_verify` is not consulted for safe methods.
pub fn decide(ctx: &RequestContext, config: &CsrfConfig) -> Decision {
    if is_exempt_method(ctx.method()) {
        return Decision::SKIP_ALL;
    }

    if config.should_skip(ctx) {
        return Decision::SKIP_ALL;
    }

    let do_create = !config.skip_create(ctx);
    let do_verify = !config.is_safe_method(ctx.method()) && !config.skip_verify(ctx);

    Decision {
        do_create,
        do_verify,
    }
}
