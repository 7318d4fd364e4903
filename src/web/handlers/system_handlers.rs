// src/web/handlers/system_handlers.rs
use askama::Template;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::Request;

use crate::app_log;
use crate::render::html::ErrorPage;

pub async fn health_handler() -> &'static str {
    app_log!(trace, "Health check");
    "OK"
}

/// Error page for catchers, logged with the failing path.
pub fn error_page_handler(status: Status, request: &Request<'_>) -> RawHtml<String> {
    app_log!(warn, "{} {} -> {}", request.method(), request.uri(), status.code);

    let message = match status.code {
        400 => "The request could not be understood.",
        404 => "The page you are looking for does not exist.",
        413 => "The upload is too large.",
        422 => "The form was incomplete. Select resumes and enter a job description.",
        _ => "Something went wrong while processing your request. Try again in a few moments.",
    };
    let page = ErrorPage {
        code: status.code,
        message,
    };
    match page.render() {
        Ok(body) => RawHtml(body),
        Err(e) => {
            app_log!(error, "Failed to render error page: {}", e);
            RawHtml(message.to_string())
        }
    }
}
