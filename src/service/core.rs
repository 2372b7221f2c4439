//! Core A2A protocol service implementation

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use tower_service::Service;

use crate::{
    codec::Codec,
    protocol::error::A2AError,
    service::{A2ARequest, A2AResponse},
    transport::{Transport, TransportRequest},
};

/// Core A2A protocol service that wraps a transport
///
/// This service implements the Tower `Service` trait: it encodes the operation with the
/// codec, executes it over the transport within the request timeout and decodes the answer.
pub struct A2AProtocolService<T> {
    transport: T,
    codec: Arc<dyn Codec>,
}

impl<T> A2AProtocolService<T>
where
    T: Transport,
{
    /// Create a new A2A protocol service
    ///
    /// # Arguments
    ///
    /// * `transport` - The underlying transport implementation
    /// * `codec` - The codec for serialization/deserialization
    pub fn new(transport: T, codec: Arc<dyn Codec>) -> Self {
        Self { transport, codec }
    }

    /// Build a transport request from an A2A operation
    fn build_transport_request(
        req: &A2ARequest,
        codec: &dyn Codec,
    ) -> Result<TransportRequest, A2AError> {
        let endpoint = req.operation.endpoint();
        let method = req.operation.method();

        let mut transport_req = TransportRequest::new(endpoint, method)
            .header("Accept", codec.content_type());

        for (name, value) in &req.context.headers {
            transport_req = transport_req.header(name.clone(), value.clone());
        }

        let body = codec.encode_request(&req.operation, &req.context.request_id)?;
        if !body.is_empty() {
            transport_req = transport_req
                .header("Content-Type", codec.content_type())
                .body(body);
        }

        Ok(transport_req)
    }
}

impl<T> Service<A2ARequest> for A2AProtocolService<T>
where
    T: Transport + Clone,
{
    type Response = A2AResponse;
    type Error = A2AError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.transport.poll_ready(cx)
    }

    fn call(&mut self, req: A2ARequest) -> Self::Future {
        let transport = self.transport.clone();
        let codec = self.codec.clone();

        Box::pin(async move {
            let transport_req = Self::build_transport_request(&req, codec.as_ref())?;

            let transport_resp = match req.context.timeout {
                Some(timeout) => tokio::time::timeout(timeout, transport.execute(transport_req))
                    .await
                    .map_err(|_| A2AError::Timeout)??,
                None => transport.execute(transport_req).await?,
            };

            codec.decode_response(&transport_resp, &req.operation, &req.context.request_id)
        })
    }
}

impl<T> Clone for A2AProtocolService<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            codec: self.codec.clone(),
        }
    }
}
