// HTTP response utilities for JSON+Brotli encoding
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Response, StatusCode},
};
use serde::Serialize;
use tokio::io::AsyncReadExt;

/// Whether the client advertised Brotli in `accept-encoding` with a non-zero quality
pub fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT_ENCODING)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(','))
        .any(|coding| {
            let mut params = coding.split(';').map(str::trim);
            let name = params.next().unwrap_or_default();
            name.eq_ignore_ascii_case("br") && quality(params) > 0.0
        })
}

/// `q=` parameter of one coding; missing or unparseable means 1
fn quality<'a>(mut params: impl Iterator<Item = &'a str>) -> f32 {
    params
        .find_map(|p| p.strip_prefix("q=").or_else(|| p.strip_prefix("Q=")))
        .and_then(|q| q.trim().parse::<f32>().ok())
        .unwrap_or(1.0)
}

pub async fn brotli_compress(bytes: Vec<u8>) -> std::io::Result<Vec<u8>> {
    let cursor = std::io::Cursor::new(bytes);
    let mut encoder = BrotliEncoder::new(cursor);
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed).await?;
    Ok(compressed)
}

/// Serialize a value to JSON with optional Brotli compression
pub async fn json_response<T: Serialize>(
    data: &T,
    compress: bool,
) -> Result<Response<Body>, StatusCode> {
    let json_bytes = serde_json::to_vec(data).map_err(|e| {
        tracing::error!("JSON serialization error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let (body_bytes, content_encoding) = if compress {
        let original = json_bytes.len();
        let compressed = brotli_compress(json_bytes).await.map_err(|e| {
            tracing::error!("Brotli compression error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        tracing::debug!(
            "Compressed: {} → {} bytes ({:.1}% reduction)",
            original,
            compressed.len(),
            (1.0 - compressed.len() as f64 / original.max(1) as f64) * 100.0
        );
        (compressed, Some("br"))
    } else {
        tracing::debug!("Sending uncompressed: {} bytes", json_bytes.len());
        (json_bytes, None)
    };

    let mut response_builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, HeaderValue::from(body_bytes.len()));

    if let Some(encoding) = content_encoding {
        response_builder = response_builder.header(header::CONTENT_ENCODING, encoding);
    }

    response_builder
        .body(Body::from(body_bytes))
        .map_err(|e| {
            tracing::error!("Response build error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// Uncompressed `{"error": message}` body with the given status
pub fn error_response(status: StatusCode, message: &str) -> Response<Body> {
    let body = serde_json::json!({ "error": message }).to_string();

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use async_compression::tokio::bufread::BrotliDecoder;

    pub async fn brotli_decompress(bytes: &[u8]) -> Vec<u8> {
        let mut decoder = BrotliDecoder::new(std::io::Cursor::new(bytes.to_vec()));
        let mut out = Vec::new();
        decoder.read_to_end(&mut out).await.unwrap();
        out
    }

    pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[test]
    fn test_accepts_brotli() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_brotli(&headers));

        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate, br"));
        assert!(accepts_brotli(&headers));

        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip"));
        assert!(!accepts_brotli(&headers));
    }

    #[test]
    fn test_brotli_quality_values() {
        let accepts = |value: &'static str| {
            let mut headers = HeaderMap::new();
            headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static(value));
            accepts_brotli(&headers)
        };

        assert!(!accepts("gzip, br;q=0"));
        assert!(!accepts("br; q=0.0, gzip;q=1"));
        assert!(accepts("gzip;q=1.0, br;q=0.5"));
        assert!(accepts("BR"));
        assert!(!accepts("brotli-ish, identity"));
    }

    #[tokio::test]
    async fn test_plain_json_response() {
        let data = serde_json::json!({ "title": "Natal", "scores": [0.9, 0.85] });
        let response = json_response(&data, false).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::CONTENT_ENCODING).is_none());

        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body, data);
    }

    #[tokio::test]
    async fn test_brotli_json_response() {
        let data = serde_json::json!({ "categories": ["Norte", "Nordeste", "Centro-Oeste", "Sudeste", "Sul"] });
        let response = json_response(&data, true).await.unwrap();

        assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");
        let compressed = body_bytes(response).await;
        let body: serde_json::Value = serde_json::from_slice(&brotli_decompress(&compressed).await).unwrap();
        assert_eq!(body, data);
    }

    #[tokio::test]
    async fn test_error_response() {
        let response = error_response(StatusCode::NOT_FOUND, "unknown tab: weather");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["error"], "unknown tab: weather");
    }
}
