//! SDK error mapping
//!
//! Any failure that carries an HTTP response becomes
//! [`Error::RequestFailure`] with that response's status; everything else
//! (dispatch, timeout, construction) becomes [`Error::Transport`].

use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use bkt_core::Error;

/// Convert an SDK error without losing its status code
pub fn map_sdk_error<E>(err: SdkError<E, HttpResponse>) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let Some(status) = err.raw_response().map(|r| r.status().as_u16()) else {
        return Error::Transport(Box::new(err));
    };

    let service = err.as_service_error();
    let code = service.and_then(|e| e.code()).map(str::to_string);
    let message = match service.and_then(|e| e.message()) {
        Some(message) => message.to_string(),
        None => DisplayErrorContext(&err).to_string(),
    };
    Error::request_failure(status, code, message)
}
