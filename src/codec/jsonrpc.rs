//! JSON-RPC 2.0 codec for the A2A task endpoint
//!
//! Task submissions travel as `tasks/send` JSON-RPC requests. Discovery is a plain GET
//! whose body is the raw agent card, not a JSON-RPC envelope.

use bytes::Bytes;

use crate::{
    codec::{error_for_status, Codec},
    protocol::{
        agent::AgentCard,
        error::A2AError,
        jsonrpc::{JsonRpcRequest, JsonRpcResponse, TASKS_SEND},
        operation::A2AOperation,
        task::Task,
    },
    service::response::A2AResponse,
    transport::TransportResponse,
};

/// JSON-RPC 2.0 codec for the A2A HTTP binding
#[derive(Debug, Clone, Default)]
pub struct JsonRpcCodec;

impl JsonRpcCodec {
    /// Create a new JSON-RPC codec
    pub fn new() -> Self {
        Self
    }

    /// Decode a `tasks/send` answer
    ///
    /// Only a 2xx answer is a protocol answer from the handler: a result is the task and an
    /// error is the handler's failure. A 4xx error means the agent rejected the request.
    /// Anything else (5xx, or a result under a failure status) did not come from a working
    /// agent and is reported as a transport problem.
    fn decode_task(
        response: &TransportResponse,
        request_id: &str,
    ) -> Result<A2AResponse, A2AError> {
        let envelope: JsonRpcResponse = match serde_json::from_slice(&response.body) {
            Ok(envelope) => envelope,
            Err(_) if !response.is_success() => return Err(error_for_status(response)),
            Err(e) => {
                return Err(A2AError::MalformedResponse(format!(
                    "Failed to parse JSON-RPC response: {}",
                    e
                )))
            }
        };

        // a rejection may carry a null id when the agent could not read ours
        let id_matches = envelope.id.as_str() == Some(request_id)
            || (envelope.id.is_null() && !response.is_success());
        if !id_matches {
            return Err(A2AError::MalformedResponse(format!(
                "Response id {} does not match request id {}",
                envelope.id, request_id
            )));
        }

        let status = response.status;
        match envelope.into_result() {
            Ok(result) if response.is_success() => {
                let task: Task = serde_json::from_value(result).map_err(|e| {
                    A2AError::Protocol(format!("JSON-RPC result is not a task: {}", e))
                })?;
                Ok(A2AResponse::Task(Box::new(task)))
            }
            Ok(_) => Err(A2AError::MalformedResponse(format!(
                "HTTP {status} response carries a result"
            ))),
            Err(error) if response.is_success() => Err(A2AError::Task {
                source: error.into(),
            }),
            Err(error) if response.is_client_error() => Err(A2AError::Rejected(error)),
            Err(error) => Err(A2AError::Transport(format!(
                "HTTP {status}: {}",
                error.message
            ))),
        }
    }
}

impl Codec for JsonRpcCodec {
    fn encode_request(
        &self,
        operation: &A2AOperation,
        request_id: &str,
    ) -> Result<Bytes, A2AError> {
        match operation {
            A2AOperation::SendTask(params) => {
                let request =
                    JsonRpcRequest::new(request_id, TASKS_SEND, serde_json::to_value(params)?);
                Ok(Bytes::from(serde_json::to_vec(&request)?))
            }
            A2AOperation::DiscoverAgent => Ok(Bytes::new()),
        }
    }

    fn decode_response(
        &self,
        response: &TransportResponse,
        operation: &A2AOperation,
        request_id: &str,
    ) -> Result<A2AResponse, A2AError> {
        match operation {
            A2AOperation::SendTask(_) => Self::decode_task(response, request_id),
            A2AOperation::DiscoverAgent => {
                if !response.is_success() {
                    return Err(error_for_status(response));
                }
                let card = AgentCard::from_slice(&response.body)?;
                Ok(A2AResponse::AgentCard(Box::new(card)))
            }
        }
    }

    fn content_type(&self) -> &str {
        "application/json"
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::protocol::{jsonrpc::error_codes, message::Message, task::TaskSendParams};

    use super::*;

    const REQ: &str = "req-1";

    fn send_task() -> A2AOperation {
        A2AOperation::SendTask(TaskSendParams::new("task-1", "session-1", Message::user("Hello")))
    }

    fn response(status: u16, body: Value) -> TransportResponse {
        TransportResponse::new(status).body(serde_json::to_vec(&body).unwrap())
    }

    fn task_result() -> Value {
        json!({
            "id": "task-1",
            "sessionId": "session-1",
            "history": [
                {"role": "user", "parts": [{"type": "text", "text": "Hello"}]},
                {"role": "agent", "parts": [{"type": "text", "text": "Hi"}]}
            ]
        })
    }

    fn decode(resp: &TransportResponse) -> Result<A2AResponse, A2AError> {
        JsonRpcCodec::new().decode_response(resp, &send_task(), REQ)
    }

    #[test]
    fn test_encode_send_task() {
        let bytes = JsonRpcCodec::new().encode_request(&send_task(), REQ).unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["method"], "tasks/send");
        assert_eq!(json["id"], REQ);
        assert_eq!(json["params"]["id"], "task-1");
        assert_eq!(json["params"]["sessionId"], "session-1");
        assert_eq!(json["params"]["message"]["parts"][0]["type"], "text");
    }

    #[test]
    fn test_discover_has_no_body() {
        let bytes = JsonRpcCodec::new()
            .encode_request(&A2AOperation::DiscoverAgent, REQ)
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_decode_success_response() {
        let resp = response(200, json!({"jsonrpc": "2.0", "id": REQ, "result": task_result()}));

        let task = decode(&resp).unwrap().into_task().unwrap();
        assert_eq!(task.id, "task-1");
        assert_eq!(task.history.len(), 2);
    }

    #[test]
    fn test_decode_rejects_mismatched_id() {
        let resp = response(200, json!({"jsonrpc": "2.0", "id": "req-2", "result": task_result()}));
        let err = decode(&resp).unwrap_err();
        assert!(matches!(err, A2AError::MalformedResponse(m) if m.contains("req-2")));

        let resp = response(200, json!({"jsonrpc": "2.0", "id": null, "result": task_result()}));
        assert!(matches!(decode(&resp).unwrap_err(), A2AError::MalformedResponse(_)));

        let resp = response(
            200,
            json!({"id": "req-2", "error": {"code": -32603, "message": "tool failed"}}),
        );
        assert!(matches!(decode(&resp).unwrap_err(), A2AError::MalformedResponse(_)));
    }

    #[test]
    fn test_decode_handler_error() {
        let resp = response(
            200,
            json!({"id": REQ, "error": {"code": -32603, "message": "tool failed"}}),
        );

        match decode(&resp).unwrap_err() {
            A2AError::Task { source } => {
                assert_eq!(source.code, error_codes::INTERNAL_ERROR);
                assert_eq!(source.message, "tool failed");
            }
            other => panic!("Expected Task error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejected_request() {
        let resp = response(
            400,
            json!({"id": null, "error": {"code": -32600, "message": "Invalid request"}}),
        );
        let err = decode(&resp).unwrap_err();
        assert!(matches!(err, A2AError::Rejected(e) if e.code == error_codes::INVALID_REQUEST));

        let resp = response(
            400,
            json!({"id": REQ, "error": {"code": -32602, "message": "Invalid params"}}),
        );
        let err = decode(&resp).unwrap_err();
        assert!(matches!(err, A2AError::Rejected(e) if e.code == error_codes::INVALID_PARAMS));
    }

    #[test]
    fn test_decode_server_error_is_transport() {
        let resp = response(
            500,
            json!({"id": REQ, "error": {"code": -32603, "message": "proxy exploded"}}),
        );
        let err = decode(&resp).unwrap_err();
        assert!(matches!(&err, A2AError::Transport(m) if m.contains("500")));
        assert!(err.is_transport());
        assert!(err.rpc_error().is_none());
    }

    #[test]
    fn test_decode_result_under_failure_status() {
        let resp = response(502, json!({"jsonrpc": "2.0", "id": REQ, "result": task_result()}));
        let err = decode(&resp).unwrap_err();
        assert!(matches!(err, A2AError::MalformedResponse(_)));

        let resp = response(404, json!({"jsonrpc": "2.0", "id": REQ, "result": task_result()}));
        assert!(decode(&resp).unwrap_err().is_transport());
    }

    #[test]
    fn test_decode_non_json_body() {
        let resp = TransportResponse::new(200).body("<html>oops</html>");
        let err = decode(&resp).unwrap_err();
        assert!(matches!(err, A2AError::MalformedResponse(_)));
        assert!(err.is_transport());

        let resp = TransportResponse::new(503).body("unavailable");
        assert!(decode(&resp).unwrap_err().is_transport());
    }

    #[test]
    fn test_decode_agent_card() {
        let resp = response(
            200,
            json!({
                "name": "SearchAgent",
                "description": "Searches the web",
                "url": "http://localhost:10001/",
                "version": "1.0.0",
                "capabilities": {"streaming": false},
                "skills": []
            }),
        );

        let card = JsonRpcCodec::new()
            .decode_response(&resp, &A2AOperation::DiscoverAgent, REQ)
            .unwrap()
            .into_agent_card()
            .unwrap();
        assert_eq!(card.name, "SearchAgent");

        let missing = response(200, json!({"name": "SearchAgent"}));
        let err = JsonRpcCodec::new()
            .decode_response(&missing, &A2AOperation::DiscoverAgent, REQ)
            .unwrap_err();
        assert!(matches!(err, A2AError::Validation(_)));
    }

    #[test]
    fn test_content_type() {
        assert_eq!(JsonRpcCodec::new().content_type(), "application/json");
    }
}
