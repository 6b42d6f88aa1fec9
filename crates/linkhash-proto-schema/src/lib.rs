pub mod shortener {
    pub mod v1 {
        use linkhash_core::Shortened;

        tonic::include_proto!("shortener.v1");

        impl From<Shortened> for ShortenResponse {
            fn from(value: Shortened) -> Self {
                Self {
                    message: value.message().to_owned(),
                    key: value.key.as_str().to_owned(),
                    created: value.created,
                }
            }
        }
    }
}

pub mod v1 {
    pub use crate::shortener::v1::*;
}
