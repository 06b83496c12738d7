// Chunked JSON streaming utilities
use crate::infrastructure::http_response::brotli_compress;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;
use serde::Serialize;

/// Create a chunked streaming response of length-prefixed JSON messages
pub fn chunked_json_stream<S, T>(stream: S, compress: bool) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = T> + Send + 'static,
    T: Serialize + Send + 'static,
{
    let byte_stream = stream.then(move |msg| serialize_chunk(msg, compress));

    let body = Body::from_stream(byte_stream);

    // Chunks are compressed one by one, so no Content-Encoding on the response;
    // a client that decoded the HTTP stream would break the length framing.
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::TRANSFER_ENCODING, "chunked")
        .body(body)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Serialize one message to a chunk: 4-byte big-endian length, then the payload
pub async fn serialize_chunk<T: Serialize>(msg: T, compress: bool) -> Result<Bytes, std::io::Error> {
    let buffer = serde_json::to_vec(&msg).map_err(std::io::Error::other)?;

    let payload = if compress {
        brotli_compress(buffer).await?
    } else {
        buffer
    };

    let length = u32::try_from(payload.len()).map_err(std::io::Error::other)?;
    let mut chunk = BytesMut::with_capacity(4 + payload.len());
    chunk.put_u32(length);
    chunk.put_slice(&payload);

    Ok(chunk.freeze())
}

/// Helper to create a streaming response from a message stream
pub fn stream_response<S, T>(stream: S, compress: bool) -> impl IntoResponse
where
    S: Stream<Item = T> + Send + 'static,
    T: Serialize + Send + 'static,
{
    match chunked_json_stream(stream, compress) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Split a buffer of length-prefixed chunks back into payloads.
#[cfg(test)]
pub fn split_chunks(mut buf: &[u8]) -> Vec<Vec<u8>> {
    use bytes::Buf;

    let mut payloads = Vec::new();
    while buf.remaining() >= 4 {
        let length = buf.get_u32() as usize;
        payloads.push(buf[..length].to_vec());
        buf.advance(length);
    }
    payloads
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_response::tests::{body_bytes, brotli_decompress};

    #[tokio::test]
    async fn test_chunk_is_length_prefixed() {
        let chunk = serialize_chunk(serde_json::json!({ "type": "complete" }), false).await.unwrap();

        let length = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as usize;
        assert_eq!(length, chunk.len() - 4);
        assert_eq!(&chunk[4..], br#"{"type":"complete"}"#);
    }

    #[tokio::test]
    async fn test_stream_round_trip() {
        let messages = vec![serde_json::json!({ "n": 1 }), serde_json::json!({ "n": 2 })];
        let response = chunked_json_stream(futures::stream::iter(messages.clone()), true).unwrap();
        assert!(response.headers().get(header::CONTENT_ENCODING).is_none());

        let body = body_bytes(response).await;
        let mut decoded = Vec::new();
        for payload in split_chunks(&body) {
            let json = brotli_decompress(&payload).await;
            decoded.push(serde_json::from_slice::<serde_json::Value>(&json).unwrap());
        }
        assert_eq!(decoded, messages);
    }
}
