//! JSON-RPC 2.0 envelope used by the A2A task endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{message::Role, task::TaskSendParams};

/// The only method the task endpoint dispatches
pub const TASKS_SEND: &str = "tasks/send";

/// Standard JSON-RPC 2.0 error codes
pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

fn jsonrpc_version() -> String {
    "2.0".to_string()
}

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcRequest {
    #[serde(default = "jsonrpc_version")]
    pub jsonrpc: String,

    /// Correlation token, echoed back in the response
    pub id: Value,

    /// Method discriminator
    pub method: String,

    #[serde(default)]
    pub params: Value,
}

impl JsonRpcRequest {
    /// Create a request for `method` with the given correlation id
    pub fn new(id: impl Into<Value>, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: jsonrpc_version(),
            id: id.into(),
            method: method.into(),
            params,
        }
    }
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(error_codes::INVALID_REQUEST, message)
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            error_codes::METHOD_NOT_FOUND,
            format!("Unsupported A2A method: {}", method),
        )
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(error_codes::INVALID_PARAMS, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(error_codes::INTERNAL_ERROR, message)
    }
}

/// JSON-RPC 2.0 response envelope
///
/// Carries exactly one of `result` or `error`. The constructors are the only way to build
/// one, and decoding rejects envelopes with both or neither.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawJsonRpcResponse")]
pub struct JsonRpcResponse {
    pub jsonrpc: String,

    /// The request id, or `null` when it could not be recovered
    pub id: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Create a success response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: jsonrpc_version(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: jsonrpc_version(),
            id,
            result: None,
            error: Some(error),
        }
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    pub fn error_object(&self) -> Option<&JsonRpcError> {
        self.error.as_ref()
    }

    /// Split the envelope into its success payload or error object
    pub fn into_result(self) -> Result<Value, JsonRpcError> {
        match (self.result, self.error) {
            (_, Some(error)) => Err(error),
            (Some(result), None) => Ok(result),
            // unreachable through the constructors or deserialization
            (None, None) => Err(JsonRpcError::internal("Response carries neither result nor error")),
        }
    }
}

#[derive(Deserialize)]
struct RawJsonRpcResponse {
    #[serde(default = "jsonrpc_version")]
    jsonrpc: String,
    #[serde(default)]
    id: Value,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

impl TryFrom<RawJsonRpcResponse> for JsonRpcResponse {
    type Error = String;

    fn try_from(raw: RawJsonRpcResponse) -> Result<Self, Self::Error> {
        match (&raw.result, &raw.error) {
            (Some(_), Some(_)) => Err("JSON-RPC response has both 'result' and 'error'".into()),
            (None, None) => Err("JSON-RPC response missing 'result' field".into()),
            _ => Ok(Self {
                jsonrpc: raw.jsonrpc,
                id: raw.id,
                result: raw.result,
                error: raw.error,
            }),
        }
    }
}

/// A validated inbound call on the task endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum A2ACall {
    /// `tasks/send`: submit a task and wait for the reply
    SendTask { id: Value, params: TaskSendParams },
}

impl A2ACall {
    pub fn id(&self) -> &Value {
        match self {
            A2ACall::SendTask { id, .. } => id,
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            A2ACall::SendTask { .. } => TASKS_SEND,
        }
    }

    /// Validate a decoded JSON body against the known methods
    ///
    /// On failure the returned id is the request's own id when it was present, `null`
    /// otherwise.
    pub fn parse(body: Value) -> Result<Self, (Value, JsonRpcError)> {
        let Value::Object(mut object) = body else {
            return Err((
                Value::Null,
                JsonRpcError::invalid_request("Request must be a JSON object"),
            ));
        };

        let id = object.remove("id").unwrap_or(Value::Null);
        let method = match object.remove("method") {
            Some(Value::String(method)) => method,
            _ => {
                return Err((
                    id,
                    JsonRpcError::invalid_request("Request is missing a string 'method'"),
                ))
            }
        };

        match method.as_str() {
            TASKS_SEND => {
                let params = object.remove("params").unwrap_or(Value::Null);
                match serde_json::from_value::<TaskSendParams>(params) {
                    Ok(params) if params.message.role != Role::User => Err((
                        id,
                        JsonRpcError::invalid_params("Submitted message must have the user role"),
                    )),
                    Ok(params) => Ok(A2ACall::SendTask { id, params }),
                    Err(e) => Err((
                        id,
                        JsonRpcError::invalid_params(format!("Invalid params: {}", e)),
                    )),
                }
            }
            other => Err((id, JsonRpcError::method_not_found(other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn send_body(id: Value) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tasks/send",
            "params": {
                "id": "task-1",
                "sessionId": "session-1",
                "message": {"role": "user", "parts": [{"type": "text", "text": "hi"}]}
            }
        })
    }

    #[test]
    fn test_parse_send_task() {
        let call = A2ACall::parse(send_body(json!("req-1"))).unwrap();
        assert_eq!(call.id(), &json!("req-1"));
        assert_eq!(call.method(), TASKS_SEND);

        let A2ACall::SendTask { params, .. } = call;
        assert_eq!(params.id, "task-1");
        assert_eq!(params.session_id, "session-1");
    }

    #[test]
    fn test_parse_accepts_numeric_id_without_version() {
        let mut body = send_body(json!(7));
        body.as_object_mut().unwrap().remove("jsonrpc");

        let call = A2ACall::parse(body).unwrap();
        assert_eq!(call.id(), &json!(7));
    }

    #[test]
    fn test_parse_unknown_method_keeps_id() {
        let body = json!({"id": "t1", "method": "tasks/unknown", "params": {}});
        let (id, error) = A2ACall::parse(body).unwrap_err();

        assert_eq!(id, json!("t1"));
        assert_eq!(error.code, error_codes::METHOD_NOT_FOUND);
        assert!(error.message.contains("tasks/unknown"));
    }

    #[test]
    fn test_parse_bad_params() {
        let body = json!({"id": "t2", "method": "tasks/send", "params": {"id": "x"}});
        let (id, error) = A2ACall::parse(body).unwrap_err();

        assert_eq!(id, json!("t2"));
        assert_eq!(error.code, error_codes::INVALID_PARAMS);
    }

    #[test]
    fn test_parse_rejects_agent_message() {
        let mut body = send_body(json!("t4"));
        body["params"]["message"]["role"] = json!("agent");

        let (id, error) = A2ACall::parse(body).unwrap_err();

        assert_eq!(id, json!("t4"));
        assert_eq!(error.code, error_codes::INVALID_PARAMS);
    }

    #[test]
    fn test_parse_missing_method() {
        let (id, error) = A2ACall::parse(json!({"id": "t3"})).unwrap_err();
        assert_eq!(id, json!("t3"));
        assert_eq!(error.code, error_codes::INVALID_REQUEST);

        let (id, error) = A2ACall::parse(json!([1, 2, 3])).unwrap_err();
        assert_eq!(id, Value::Null);
        assert_eq!(error.code, error_codes::INVALID_REQUEST);
    }

    #[test]
    fn test_response_serialization_is_exclusive() {
        let ok = serde_json::to_value(JsonRpcResponse::success(json!("1"), json!({"a": 1}))).unwrap();
        assert_eq!(ok["result"], json!({"a": 1}));
        assert!(ok.get("error").is_none());

        let err = serde_json::to_value(JsonRpcResponse::error(
            Value::Null,
            JsonRpcError::internal("boom"),
        ))
        .unwrap();
        assert!(err.get("result").is_none());
        assert_eq!(err["id"], Value::Null);
        assert_eq!(err["error"]["code"], error_codes::INTERNAL_ERROR);
    }

    #[test]
    fn test_response_decode_rejects_both_or_neither() {
        let both = r#"{"id":"1","result":{},"error":{"code":1,"message":"x"}}"#;
        assert!(serde_json::from_str::<JsonRpcResponse>(both).is_err());

        let neither = r#"{"jsonrpc":"2.0","id":"1"}"#;
        assert!(serde_json::from_str::<JsonRpcResponse>(neither).is_err());

        let error = r#"{"id":"1","error":{"code":-32601,"message":"nope"}}"#;
        let response: JsonRpcResponse = serde_json::from_str(error).unwrap();
        assert_eq!(response.into_result().unwrap_err().code, -32601);
    }
}
