//! Text codec for the chat channel (Socket.IO v4 over Engine.IO v4).
//!
//! SYSTEM CONTEXT
//! ==============
//! The analysis backend exposes its assistant over Socket.IO. Front-ends open
//! a plain WebSocket at `/socket.io/?EIO=4&transport=websocket` and speak the
//! two nested text framings directly:
//!
//! - Engine.IO: one leading digit (`0` open, `1` close, `2` ping, `3` pong,
//!   `4` message, `5` upgrade, `6` noop) followed by the payload.
//! - Socket.IO, inside an Engine.IO message: one digit (`0` connect,
//!   `1` disconnect, `2` event, `3` ack, `4` connect error), an optional
//!   `/namespace,` prefix, an optional numeric ack id, then JSON.
//!
//! DESIGN
//! ======
//! Both layers are modeled as enums with `encode_*`/`decode_*` pairs. Callers
//! that only care about the chat exchange use [`read_channel_event`], which
//! folds both layers into the handful of outcomes a chat loop reacts to.
//! Binary attachments are not supported; they are rejected as unknown types.

#[cfg(test)]
#[path = "socket_test.rs"]
mod socket_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event the client emits for each chat message.
pub const USER_MESSAGE_EVENT: &str = "user_message";
/// Event the backend emits for each assistant reply.
pub const RESPONSE_MESSAGE_EVENT: &str = "response_message";
/// Path and query of the WebSocket transport.
pub const SOCKET_PATH: &str = "socket.io/";
pub const SOCKET_QUERY: &str = "EIO=4&transport=websocket";

const DEFAULT_NAMESPACE: &str = "/";

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("empty packet")]
    Empty,
    #[error("unknown engine packet type {0:?}")]
    UnknownEngineType(char),
    #[error("unknown socket packet type {0:?}")]
    UnknownSocketType(char),
    #[error("malformed packet: {0}")]
    Malformed(&'static str),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid socket url: {0}")]
    InvalidUrl(String),
}

/// Payload of the Engine.IO `open` packet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    pub ping_interval: u64,
    pub ping_timeout: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_payload: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping(String),
    Pong(String),
    Message(String),
    Upgrade,
    Noop,
}

/// # Errors
///
/// Fails on an empty frame, an unknown type digit, or an `open` packet whose
/// handshake is not valid JSON.
pub fn decode_engine(text: &str) -> Result<EnginePacket, CodecError> {
    let mut chars = text.chars();
    let kind = chars.next().ok_or(CodecError::Empty)?;
    let rest = chars.as_str();
    match kind {
        '0' => Ok(EnginePacket::Open(serde_json::from_str(rest)?)),
        '1' => Ok(EnginePacket::Close),
        '2' => Ok(EnginePacket::Ping(rest.to_owned())),
        '3' => Ok(EnginePacket::Pong(rest.to_owned())),
        '4' => Ok(EnginePacket::Message(rest.to_owned())),
        '5' => Ok(EnginePacket::Upgrade),
        '6' => Ok(EnginePacket::Noop),
        other => Err(CodecError::UnknownEngineType(other)),
    }
}

/// # Errors
///
/// Fails only if an `open` handshake cannot be serialized.
pub fn encode_engine(packet: &EnginePacket) -> Result<String, CodecError> {
    Ok(match packet {
        EnginePacket::Open(handshake) => format!("0{}", serde_json::to_string(handshake)?),
        EnginePacket::Close => "1".to_owned(),
        EnginePacket::Ping(data) => format!("2{data}"),
        EnginePacket::Pong(data) => format!("3{data}"),
        EnginePacket::Message(data) => format!("4{data}"),
        EnginePacket::Upgrade => "5".to_owned(),
        EnginePacket::Noop => "6".to_owned(),
    })
}

#[derive(Clone, Debug, PartialEq)]
pub enum SocketPacket {
    Connect {
        namespace: String,
        data: Option<Value>,
    },
    Disconnect {
        namespace: String,
    },
    Event {
        namespace: String,
        ack: Option<u64>,
        name: String,
        args: Vec<Value>,
    },
    Ack {
        namespace: String,
        id: u64,
        args: Vec<Value>,
    },
    ConnectError {
        namespace: String,
        message: String,
    },
}

impl SocketPacket {
    /// Event on the default namespace without an ack id.
    #[must_use]
    pub fn event(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self::Event {
            namespace: DEFAULT_NAMESPACE.to_owned(),
            ack: None,
            name: name.into(),
            args,
        }
    }
}

/// Decode the payload of an Engine.IO `message` packet.
///
/// # Errors
///
/// Fails on an empty payload, an unknown or binary type digit, bad JSON, or
/// an event whose first array element is not a string name.
pub fn decode_socket(payload: &str) -> Result<SocketPacket, CodecError> {
    let mut chars = payload.chars();
    let kind = chars.next().ok_or(CodecError::Empty)?;
    let mut rest = chars.as_str();

    let mut namespace = DEFAULT_NAMESPACE.to_owned();
    if rest.starts_with('/') {
        let (ns, tail) = match rest.split_once(',') {
            Some((ns, tail)) => (ns, tail),
            None => (rest, ""),
        };
        ns.clone_into(&mut namespace);
        rest = tail;
    }

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    let ack = if digits > 0 {
        Some(
            rest[..digits]
                .parse::<u64>()
                .map_err(|_| CodecError::Malformed("ack id"))?,
        )
    } else {
        None
    };
    rest = &rest[digits..];

    match kind {
        '0' => {
            let data = if rest.is_empty() {
                None
            } else {
                Some(serde_json::from_str(rest)?)
            };
            Ok(SocketPacket::Connect { namespace, data })
        }
        '1' => Ok(SocketPacket::Disconnect { namespace }),
        '2' => {
            let mut args: Vec<Value> = serde_json::from_str(rest)?;
            if args.is_empty() {
                return Err(CodecError::Malformed("event without name"));
            }
            let Value::String(name) = args.remove(0) else {
                return Err(CodecError::Malformed("event name is not a string"));
            };
            Ok(SocketPacket::Event {
                namespace,
                ack,
                name,
                args,
            })
        }
        '3' => {
            let id = ack.ok_or(CodecError::Malformed("ack without id"))?;
            let args: Vec<Value> = serde_json::from_str(rest)?;
            Ok(SocketPacket::Ack { namespace, id, args })
        }
        '4' => {
            let message = match serde_json::from_str::<Value>(rest)? {
                Value::String(message) => message,
                Value::Object(map) => map
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned(),
                other => other.to_string(),
            };
            Ok(SocketPacket::ConnectError { namespace, message })
        }
        other => Err(CodecError::UnknownSocketType(other)),
    }
}

fn push_namespace(out: &mut String, namespace: &str) {
    if namespace != DEFAULT_NAMESPACE {
        out.push_str(namespace);
        out.push(',');
    }
}

/// Encode a packet as the payload of an Engine.IO `message`.
///
/// # Errors
///
/// Fails if an argument cannot be serialized.
pub fn encode_socket(packet: &SocketPacket) -> Result<String, CodecError> {
    let mut out = String::new();
    match packet {
        SocketPacket::Connect { namespace, data } => {
            out.push('0');
            push_namespace(&mut out, namespace);
            if let Some(data) = data {
                out.push_str(&serde_json::to_string(data)?);
            }
        }
        SocketPacket::Disconnect { namespace } => {
            out.push('1');
            push_namespace(&mut out, namespace);
        }
        SocketPacket::Event {
            namespace,
            ack,
            name,
            args,
        } => {
            out.push('2');
            push_namespace(&mut out, namespace);
            if let Some(id) = ack {
                out.push_str(&id.to_string());
            }
            let mut array = Vec::with_capacity(args.len() + 1);
            array.push(Value::String(name.clone()));
            array.extend(args.iter().cloned());
            out.push_str(&serde_json::to_string(&array)?);
        }
        SocketPacket::Ack { namespace, id, args } => {
            out.push('3');
            push_namespace(&mut out, namespace);
            out.push_str(&id.to_string());
            out.push_str(&serde_json::to_string(args)?);
        }
        SocketPacket::ConnectError { namespace, message } => {
            out.push('4');
            push_namespace(&mut out, namespace);
            out.push_str(&serde_json::to_string(&serde_json::json!({ "message": message }))?);
        }
    }
    Ok(out)
}

/// Body of a `user_message` event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMessage {
    pub message: String,
    #[serde(rename = "sendUserActions")]
    pub send_user_actions: bool,
}

/// Body of a `response_message` event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMessage {
    pub data: String,
}

/// What a chat loop needs to react to for one incoming frame.
#[derive(Clone, Debug, PartialEq)]
pub enum ChannelEvent {
    /// Transport open; the caller should send [`connect_packet`].
    Open(Handshake),
    /// Server heartbeat; the caller should answer with [`pong_packet`].
    Ping(String),
    Connected,
    Response(ResponseMessage),
    /// Any other event, passed through untouched.
    Event { name: String, args: Vec<Value> },
    ConnectError(String),
    Disconnected,
    Noop,
}

/// Decode one WebSocket text frame into a [`ChannelEvent`].
///
/// # Errors
///
/// Propagates codec failures, and rejects a `response_message` whose first
/// argument is missing or not `{data: string}`.
pub fn read_channel_event(text: &str) -> Result<ChannelEvent, CodecError> {
    let payload = match decode_engine(text)? {
        EnginePacket::Open(handshake) => return Ok(ChannelEvent::Open(handshake)),
        EnginePacket::Ping(data) => return Ok(ChannelEvent::Ping(data)),
        EnginePacket::Close => return Ok(ChannelEvent::Disconnected),
        EnginePacket::Pong(_) | EnginePacket::Upgrade | EnginePacket::Noop => {
            return Ok(ChannelEvent::Noop);
        }
        EnginePacket::Message(payload) => payload,
    };

    Ok(match decode_socket(&payload)? {
        SocketPacket::Connect { .. } => ChannelEvent::Connected,
        SocketPacket::Disconnect { .. } => ChannelEvent::Disconnected,
        SocketPacket::ConnectError { message, .. } => ChannelEvent::ConnectError(message),
        SocketPacket::Ack { .. } => ChannelEvent::Noop,
        SocketPacket::Event { name, mut args, .. } => {
            if name == RESPONSE_MESSAGE_EVENT {
                if args.is_empty() {
                    return Err(CodecError::Malformed("response without body"));
                }
                ChannelEvent::Response(serde_json::from_value(args.remove(0))?)
            } else {
                ChannelEvent::Event { name, args }
            }
        }
    })
}

/// Frame that joins the default namespace after the transport opens.
#[must_use]
pub fn connect_packet() -> String {
    "40".to_owned()
}

/// Heartbeat reply echoing the ping payload.
#[must_use]
pub fn pong_packet(data: &str) -> String {
    format!("3{data}")
}

/// Full WebSocket frame for one chat message.
///
/// # Errors
///
/// Fails only if the message cannot be serialized.
pub fn user_message_packet(message: &UserMessage) -> Result<String, CodecError> {
    let packet = SocketPacket::event(USER_MESSAGE_EVENT, vec![serde_json::to_value(message)?]);
    encode_engine(&EnginePacket::Message(encode_socket(&packet)?))
}

fn websocket_url(base: &str) -> Result<url::Url, CodecError> {
    let mut url = url::Url::parse(base).map_err(|e| CodecError::InvalidUrl(format!("{base}: {e}")))?;
    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => return Err(CodecError::InvalidUrl(format!("{base}: unsupported scheme {other}"))),
    };
    url.set_scheme(scheme)
        .map_err(|()| CodecError::InvalidUrl(base.to_owned()))?;
    Ok(url)
}

/// Map an `http`/`https` base URL onto `ws`/`wss`, leaving the path alone.
///
/// # Errors
///
/// Returns [`CodecError::InvalidUrl`] for unparsable URLs and other schemes.
pub fn websocket_base(base: &str) -> Result<String, CodecError> {
    websocket_url(base).map(String::from)
}

/// Turn a backend base URL into the Socket.IO WebSocket endpoint.
///
/// `http` maps to `ws` and `https` to `wss`; `ws`/`wss` are kept. Any base
/// path is preserved in front of `/socket.io/`.
///
/// # Errors
///
/// Returns [`CodecError::InvalidUrl`] for unparsable URLs and other schemes.
pub fn socket_endpoint(base: &str) -> Result<String, CodecError> {
    let mut url = websocket_url(base)?;
    let prefix = url.path().trim_end_matches('/').to_owned();
    url.set_path(&format!("{prefix}/{SOCKET_PATH}"));
    url.set_query(Some(SOCKET_QUERY));
    url.set_fragment(None);
    Ok(url.into())
}
