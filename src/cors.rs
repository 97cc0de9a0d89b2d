use anyhow::{bail, Context, Result};
use axum::{
    extract::Request,
    http::{header, HeaderName, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    Router,
};
use std::fmt;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Either every value or an explicit list of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowList<T> {
    Any,
    List(Vec<T>),
}

impl<T> AllowList<T> {
    pub fn is_any(&self) -> bool {
        matches!(self, AllowList::Any)
    }

    /// Parses `*` or a comma-separated list. Blank entries are skipped.
    /// `*` must be the only entry.
    pub fn parse<F>(raw: &str, parse_item: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<T>,
    {
        let items: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect();

        match items.as_slice() {
            ["*"] => Ok(AllowList::Any),
            _ if items.contains(&"*") => {
                bail!("'*' cannot be combined with other entries")
            }
            _ => items
                .into_iter()
                .map(parse_item)
                .collect::<Result<Vec<_>>>()
                .map(AllowList::List),
        }
    }
}

impl<T: fmt::Debug> fmt::Display for AllowList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllowList::Any => write!(f, "*"),
            AllowList::List(items) if items.is_empty() => write!(f, "(none)"),
            AllowList::List(items) => write!(f, "{:?}", items),
        }
    }
}

/// Cross-origin policy applied to every response.
///
/// `Default` allows no cross-origin reader at all. Wider access has to be
/// configured explicitly, see [`CorsConfig::permissive`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: AllowList<HeaderValue>,
    pub allow_credentials: bool,
    pub allowed_methods: AllowList<Method>,
    pub allowed_headers: AllowList<HeaderName>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        CorsConfig {
            allowed_origins: AllowList::List(Vec::new()),
            allow_credentials: false,
            allowed_methods: AllowList::List(vec![Method::GET]),
            allowed_headers: AllowList::List(Vec::new()),
        }
    }
}

impl CorsConfig {
    /// Any origin, method and header, with credentials. Development only.
    pub fn permissive() -> Self {
        CorsConfig {
            allowed_origins: AllowList::Any,
            allow_credentials: true,
            allowed_methods: AllowList::Any,
            allowed_headers: AllowList::Any,
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_any()
    }

    /// Wraps `router` with this policy.
    ///
    /// With credentials and any origin, cookie-less requests get a literal
    /// `Access-Control-Allow-Origin: *`; requests carrying a cookie and
    /// preflights get their own origin back.
    pub fn apply(&self, router: Router) -> Router {
        let router = router.layer(self.layer());

        if self.allows_any_origin() && self.allow_credentials {
            router.layer(middleware::from_fn(wildcard_origin_without_cookie))
        } else {
            router
        }
    }

    /// Builds the tower-http layer for this policy.
    ///
    /// `CorsLayer` panics when `*` is combined with credentials, so with
    /// credentials enabled wildcards mirror the request instead.
    pub fn layer(&self) -> CorsLayer {
        let mirror = self.allow_credentials;

        let origin = match &self.allowed_origins {
            AllowList::Any if mirror => AllowOrigin::mirror_request(),
            AllowList::Any => AllowOrigin::any(),
            AllowList::List(origins) => AllowOrigin::list(origins.clone()),
        };

        let methods = match &self.allowed_methods {
            AllowList::Any if mirror => AllowMethods::mirror_request(),
            AllowList::Any => AllowMethods::any(),
            AllowList::List(methods) => AllowMethods::list(methods.clone()),
        };

        let headers = match &self.allowed_headers {
            AllowList::Any if mirror => AllowHeaders::mirror_request(),
            AllowList::Any => AllowHeaders::any(),
            AllowList::List(headers) => AllowHeaders::list(headers.clone()),
        };

        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(self.allow_credentials)
    }
}

fn is_preflight(request: &Request) -> bool {
    request.method() == Method::OPTIONS
        && request
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

/// Replaces a mirrored origin with `*` unless the request sent a cookie or
/// is a preflight.
async fn wildcard_origin_without_cookie(request: Request, next: Next) -> Response {
    let keep_origin = request.headers().contains_key(header::COOKIE) || is_preflight(&request);

    let mut response = next.run(request).await;

    if !keep_origin {
        if let Some(origin) = response
            .headers_mut()
            .get_mut(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        {
            *origin = HeaderValue::from_static("*");
        }
    }

    response
}

pub fn parse_origins(raw: &str) -> Result<AllowList<HeaderValue>> {
    AllowList::parse(raw, |origin| {
        HeaderValue::from_str(origin).with_context(|| format!("invalid origin '{}'", origin))
    })
}

pub fn parse_methods(raw: &str) -> Result<AllowList<Method>> {
    AllowList::parse(raw, |method| {
        Method::from_bytes(method.to_ascii_uppercase().as_bytes())
            .with_context(|| format!("invalid HTTP method '{}'", method))
    })
}

pub fn parse_headers(raw: &str) -> Result<AllowList<HeaderName>> {
    AllowList::parse(raw, |header| {
        HeaderName::from_bytes(header.as_bytes())
            .with_context(|| format!("invalid header name '{}'", header))
    })
}
