//! Response decoding
//!
//! Turns a [`RawResponse`] into a typed payload, an explicit absence, or a
//! classified [`HetznerError`]. 401 and 422 have a uniform payload shape, so
//! they are classified here for every operation by [`intercept_error_status`],
//! which the transport applies to each response it hands back.

use serde::de::DeserializeOwned;

use crate::error::{HetznerError, Result};
use crate::http_client::RawResponse;
use crate::types::{ErrorMessage, UnprocessableEntityBody};
use crate::utils::log_sanitizer::truncate_for_log;

pub(crate) const STATUS_OK: u16 = 200;
pub(crate) const STATUS_UNAUTHORIZED: u16 = 401;
pub(crate) const STATUS_NOT_FOUND: u16 = 404;
pub(crate) const STATUS_UNPROCESSABLE_ENTITY: u16 = 422;

/// Classify 401 and 422, pass every other response through.
pub(crate) fn intercept_error_status(operation: &str, response: RawResponse) -> Result<RawResponse> {
    match response.status {
        STATUS_UNAUTHORIZED => {
            let message = match serde_json::from_str::<ErrorMessage>(&response.body) {
                Ok(body) => body.message,
                Err(e) => {
                    log::warn!("[{operation}] 401 body is not the expected JSON: {e}");
                    response.body.trim().to_string()
                }
            };
            Err(HetznerError::Unauthorized {
                operation: operation.to_string(),
                message,
            })
        }
        STATUS_UNPROCESSABLE_ENTITY => {
            let message = match serde_json::from_str::<UnprocessableEntityBody>(&response.body) {
                Ok(body) => body.error.message,
                Err(e) => {
                    log::warn!("[{operation}] 422 body is not the expected JSON: {e}");
                    response.body.trim().to_string()
                }
            };
            Err(HetznerError::UnprocessableEntity {
                operation: operation.to_string(),
                message,
            })
        }
        _ => Ok(response),
    }
}

/// Decode a 200 response into `T`. Any other status is unhandled.
pub(crate) fn decode<T>(operation: &str, response: &RawResponse) -> Result<T>
where
    T: DeserializeOwned,
{
    if response.status != STATUS_OK {
        return Err(unhandled(operation, response.status));
    }
    parse_json(operation, &response.body)
}

/// Like [`decode`], but a 404 is an explicit absence instead of an error.
pub(crate) fn decode_optional<T>(operation: &str, response: &RawResponse) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    if response.status == STATUS_NOT_FOUND {
        log::debug!("[{operation}] Not found");
        return Ok(None);
    }
    decode(operation, response).map(Some)
}

/// Accept a bodiless 200, e.g. the answer to a delete.
pub(crate) fn expect_ok(operation: &str, response: &RawResponse) -> Result<()> {
    if response.status == STATUS_OK {
        Ok(())
    } else {
        Err(unhandled(operation, response.status))
    }
}

fn unhandled(operation: &str, status: u16) -> HetznerError {
    log::error!("[{operation}] HTTP status {status} unhandled");
    HetznerError::UnhandledStatus {
        operation: operation.to_string(),
        status,
    }
}

/// Parse a JSON body, logging a truncated copy when it does not fit `T`.
pub(crate) fn parse_json<T>(operation: &str, body: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("[{operation}] JSON parse failed: {e}");
        log::error!("[{operation}] Raw response: {}", truncate_for_log(body));
        HetznerError::ParseError {
            operation: operation.to_string(),
            detail: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Zone, ZoneEnvelope};

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.to_string(),
            retry_after: None,
        }
    }

    #[test]
    fn unauthorized_message_is_verbatim() {
        let result = intercept_error_status(
            "get zone 1",
            response(401, r#"{"message":"Invalid authentication credentials"}"#),
        );
        assert!(
            matches!(
                &result,
                Err(HetznerError::Unauthorized { message, .. })
                    if message == "Invalid authentication credentials"
            ),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn unprocessable_entity_message_is_verbatim() {
        let result = intercept_error_status(
            "create zone",
            response(422, r#"{"error":{"message":"422 : invalid TLD"}}"#),
        );
        assert!(
            matches!(
                &result,
                Err(HetznerError::UnprocessableEntity { message, .. })
                    if message == "422 : invalid TLD"
            ),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn non_json_error_body_falls_back_to_raw_text() {
        let result = intercept_error_status("get zone 1", response(401, " Unauthorized\n"));
        assert!(
            matches!(
                &result,
                Err(HetznerError::Unauthorized { message, .. }) if message == "Unauthorized"
            ),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn other_statuses_pass_through() {
        for status in [200, 404, 500] {
            let result = intercept_error_status("op", response(status, "{}"));
            assert!(matches!(result, Ok(r) if r.status == status));
        }
    }

    #[test]
    fn decode_ok_envelope() {
        let result: Result<ZoneEnvelope> = decode(
            "get zone 1",
            &response(200, r#"{"zone":{"id":"1","name":"example.com","ttl":60}}"#),
        );
        let envelope = result.unwrap();
        assert_eq!(
            envelope.zone,
            Zone {
                id: "1".to_string(),
                name: "example.com".to_string(),
                ttl: 60,
            }
        );
    }

    #[test]
    fn decode_malformed_body_is_parse_error() {
        let result: Result<ZoneEnvelope> = decode("get zone 1", &response(200, "not json"));
        assert!(matches!(result, Err(HetznerError::ParseError { .. })));
    }

    #[test]
    fn decode_unexpected_shape_is_parse_error() {
        let result: Result<ZoneEnvelope> = decode("get zone 1", &response(200, r#"{"zones":[]}"#));
        assert!(matches!(result, Err(HetznerError::ParseError { .. })));
    }

    #[test]
    fn decode_other_status_is_unhandled() {
        let result: Result<ZoneEnvelope> = decode("get zone 1", &response(403, "{}"));
        assert!(matches!(
            result,
            Err(HetznerError::UnhandledStatus { status: 403, .. })
        ));
    }

    #[test]
    fn decode_optional_not_found_is_none() {
        let result: Result<Option<ZoneEnvelope>> =
            decode_optional("get zone 1", &response(404, r#"{"message":"zone not found"}"#));
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn expect_ok_rejects_other_statuses() {
        assert!(expect_ok("delete zone 1", &response(200, "")).is_ok());
        assert!(matches!(
            expect_ok("delete zone 1", &response(404, "")),
            Err(HetznerError::UnhandledStatus { status: 404, .. })
        ));
    }
}
