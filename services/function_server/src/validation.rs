//! Request validation performed before a body reaches the decoder

use hyper::body::HttpBody;
use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{Body, HeaderMap, Method, StatusCode};
use statefun_config::CONTENT_TYPE as OCTET_STREAM;
use thiserror::Error;

/// Reasons a request is refused without running any function
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestRejection {
    #[error("method {0} not allowed, batches must be POSTed")]
    MethodNotAllowed(Method),

    #[error("unsupported content type {0:?}, expected application/octet-stream")]
    UnsupportedMediaType(Option<String>),

    #[error("request body is empty")]
    EmptyBody,

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: u64 },

    #[error("failed to read request body: {0}")]
    BodyRead(String),
}

impl RequestRejection {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestRejection::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            RequestRejection::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RequestRejection::EmptyBody | RequestRejection::BodyRead(_) => StatusCode::BAD_REQUEST,
            RequestRejection::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

pub fn validate_method(method: &Method) -> Result<(), RequestRejection> {
    if *method == Method::POST {
        Ok(())
    } else {
        Err(RequestRejection::MethodNotAllowed(method.clone()))
    }
}

/// Accept `application/octet-stream` in any case, with or without parameters
pub fn validate_content_type(headers: &HeaderMap) -> Result<(), RequestRejection> {
    let Some(value) = headers.get(CONTENT_TYPE) else {
        return Err(RequestRejection::UnsupportedMediaType(None));
    };

    let raw = value
        .to_str()
        .map_err(|_| RequestRejection::UnsupportedMediaType(None))?;
    let media_type = raw.split(';').next().unwrap_or_default().trim();

    if media_type.eq_ignore_ascii_case(OCTET_STREAM) {
        Ok(())
    } else {
        Err(RequestRejection::UnsupportedMediaType(Some(raw.to_string())))
    }
}

/// Read the whole body, refusing it as soon as it is known to exceed `limit`
pub async fn read_body(
    headers: &HeaderMap,
    mut body: Body,
    limit: u64,
) -> Result<Vec<u8>, RequestRejection> {
    let declared = headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok());
    if declared.is_some_and(|length| length > limit) {
        return Err(RequestRejection::PayloadTooLarge { limit });
    }

    let mut bytes = Vec::with_capacity(declared.unwrap_or(0).min(limit) as usize);
    while let Some(chunk) = body.data().await {
        let chunk = chunk.map_err(|e| RequestRejection::BodyRead(e.to_string()))?;
        if (bytes.len() + chunk.len()) as u64 > limit {
            return Err(RequestRejection::PayloadTooLarge { limit });
        }
        bytes.extend_from_slice(&chunk);
    }

    if bytes.is_empty() {
        return Err(RequestRejection::EmptyBody);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::HeaderValue;

    fn headers_with_content_type(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_only_post_is_accepted() {
        assert!(validate_method(&Method::POST).is_ok());
        for method in [Method::GET, Method::PUT, Method::DELETE] {
            let rejection = validate_method(&method).unwrap_err();
            assert_eq!(rejection.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        }
    }

    #[test]
    fn test_content_type_matching() {
        assert!(validate_content_type(&headers_with_content_type("application/octet-stream")).is_ok());
        assert!(validate_content_type(&headers_with_content_type("Application/Octet-Stream")).is_ok());
        assert!(validate_content_type(&headers_with_content_type(
            "application/octet-stream; charset=binary"
        ))
        .is_ok());

        let rejection =
            validate_content_type(&headers_with_content_type("application/json")).unwrap_err();
        assert_eq!(
            rejection,
            RequestRejection::UnsupportedMediaType(Some("application/json".to_string()))
        );
        assert_eq!(rejection.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        assert_eq!(
            validate_content_type(&HeaderMap::new()).unwrap_err(),
            RequestRejection::UnsupportedMediaType(None)
        );
    }

    #[tokio::test]
    async fn test_read_body() {
        let bytes = read_body(&HeaderMap::new(), Body::from("abc"), 16).await.unwrap();
        assert_eq!(bytes, b"abc");
    }

    #[tokio::test]
    async fn test_empty_body_is_rejected() {
        let rejection = read_body(&HeaderMap::new(), Body::empty(), 16).await.unwrap_err();
        assert_eq!(rejection, RequestRejection::EmptyBody);
        assert_eq!(rejection.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let rejection = read_body(&HeaderMap::new(), Body::from(vec![0u8; 17]), 16)
            .await
            .unwrap_err();
        assert_eq!(rejection, RequestRejection::PayloadTooLarge { limit: 16 });

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("1000"));
        let rejection = read_body(&headers, Body::from("abc"), 16).await.unwrap_err();
        assert_eq!(rejection.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
