//! Mapping from raw websocket frames to gateway requests.

use axum::extract::ws::Message;

use crate::error::GatewayError;

/// What the connection loop should do with one inbound frame.
#[derive(Debug)]
pub enum Inbound {
    /// A request body to dispatch, or the reason it could not be read.
    Request(Result<String, GatewayError>),
    /// The peer closed the connection.
    Close,
    /// Control frame handled by the transport (ping/pong).
    Ignore,
}

impl From<Message> for Inbound {
    fn from(msg: Message) -> Self {
        match msg {
            Message::Text(text) => Self::Request(Ok(text.as_str().to_owned())),
            Message::Binary(bytes) => Self::Request(
                String::from_utf8(bytes.to_vec())
                    .map_err(|e| GatewayError::MalformedRequest(e.to_string())),
            ),
            Message::Close(_) => Self::Close,
            Message::Ping(_) | Message::Pong(_) => Self::Ignore,
        }
    }
}

/// Builds the outbound frame for a handled request.
///
/// Tool output is sent verbatim; failures become a structured error frame.
#[must_use]
pub fn response_frame(result: &Result<String, GatewayError>) -> Message {
    match result {
        Ok(text) => Message::text(text.as_str()),
        Err(err) => Message::text(err.to_frame()),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use axum::body::Bytes;

    use super::*;

    #[test]
    fn text_frame_is_request() {
        let inbound = Inbound::from(Message::text(r#"{"type":"randomization"}"#));
        let Inbound::Request(Ok(body)) = inbound else {
            panic!("expected request, got {inbound:?}");
        };
        assert_eq!(body, r#"{"type":"randomization"}"#);
    }

    #[test]
    fn utf8_binary_frame_is_request() {
        let inbound = Inbound::from(Message::Binary(Bytes::from_static(b"{}")));
        assert!(matches!(inbound, Inbound::Request(Ok(ref body)) if body == "{}"));
    }

    #[test]
    fn invalid_utf8_binary_is_malformed() {
        let inbound = Inbound::from(Message::Binary(Bytes::from_static(&[0xff, 0xfe])));
        assert!(matches!(
            inbound,
            Inbound::Request(Err(GatewayError::MalformedRequest(_)))
        ));
    }

    #[test]
    fn close_and_ping() {
        assert!(matches!(Inbound::from(Message::Close(None)), Inbound::Close));
        assert!(matches!(
            Inbound::from(Message::Ping(Bytes::new())),
            Inbound::Ignore
        ));
    }

    #[test]
    fn error_becomes_error_frame() {
        let frame = response_frame(&Err(GatewayError::UnrecognizedRequestType(None)));
        let Message::Text(text) = frame else {
            panic!("expected text frame");
        };
        assert!(text.as_str().contains("\"code\":1002"));
    }

    #[test]
    fn output_is_verbatim() {
        let frame = response_frame(&Ok("not even json".to_string()));
        let Message::Text(text) = frame else {
            panic!("expected text frame");
        };
        assert_eq!(text.as_str(), "not even json");
    }
}
