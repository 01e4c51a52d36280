use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Method;
use rocket::{Request, Response};

const ALLOWED_METHODS: &str = "GET,HEAD,PUT,PATCH,POST,DELETE";

/// Permissive CORS: every origin may call the API, and a preflight is granted
/// whatever request headers it asks for.
pub struct Cors;

impl Cors {
    fn preflight(request: &Request<'_>, response: &mut Response<'_>) {
        response.set_raw_header("Access-Control-Allow-Methods", ALLOWED_METHODS);
        if let Some(requested) = request.headers().get_one("Access-Control-Request-Headers") {
            response.set_raw_header("Access-Control-Allow-Headers", requested.to_string());
            response.adjoin_raw_header("Vary", "Access-Control-Request-Headers");
        }
    }
}

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "CORS",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_raw_header("Access-Control-Allow-Origin", "*");
        if request.method() == Method::Options {
            Self::preflight(request, response);
        }
    }
}
