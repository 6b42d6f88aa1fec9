use linkhash_core::{ShortKey, Shortener, ShortenerError};
use linkhash_proto_schema::v1 as proto;
use linkhash_proto_schema::v1::shortener_service_server::ShortenerService as ShortenerRpc;
use std::sync::Arc;
use tonic::{Request, Response, Status};
use tracing::error;

pub use linkhash_proto_schema::v1::shortener_service_server::ShortenerServiceServer;

/// gRPC adapter exposing a [`Shortener`] as `shortener.v1.ShortenerService`.
#[derive(Clone)]
pub struct ShortenerGrpcServer {
    shortener: Arc<dyn Shortener>,
}

impl ShortenerGrpcServer {
    pub fn new(shortener: Arc<dyn Shortener>) -> Self {
        Self { shortener }
    }

    /// Wraps the adapter into the tonic service ready to be mounted.
    pub fn into_service(self) -> ShortenerServiceServer<Self> {
        ShortenerServiceServer::new(self)
    }
}

#[tonic::async_trait]
impl ShortenerRpc for ShortenerGrpcServer {
    async fn shorten(
        &self,
        request: Request<proto::ShortenRequest>,
    ) -> Result<Response<proto::ShortenResponse>, Status> {
        let url = request.into_inner().url;

        let shortened = self.shortener.shorten(&url).await.map_err(to_status)?;

        Ok(Response::new(shortened.into()))
    }

    async fn resolve(
        &self,
        request: Request<proto::ResolveRequest>,
    ) -> Result<Response<proto::ResolveResponse>, Status> {
        let key = ShortKey::new(request.into_inner().key)
            .map_err(|e| to_status(ShortenerError::from(e)))?;

        let url = self.shortener.resolve(&key).await.map_err(to_status)?;

        Ok(Response::new(proto::ResolveResponse { url }))
    }
}

/// Maps shortener failures onto gRPC status codes.
pub fn to_status(err: ShortenerError) -> Status {
    match err {
        ShortenerError::InvalidArgument(message) => Status::invalid_argument(message),
        ShortenerError::NotFound(key) => Status::not_found(format!("short key not found: {key}")),
        err @ ShortenerError::KeySpaceExhausted { .. } => {
            error!(error = %err, "shorten gave up");
            Status::resource_exhausted(err.to_string())
        }
        ShortenerError::StorageUnavailable(message) => {
            error!(error = %message, "storage failure");
            Status::unavailable(message)
        }
    }
}
