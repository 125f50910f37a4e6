use crate::core::errors::Result;

/// Port for the durable bearer token, the only state kept between runs.
pub trait TokenStore: Send + Sync {
    /// The persisted token, if any.
    fn load(&self) -> Result<Option<String>>;

    fn save(&self, token: &str) -> Result<()>;

    /// Remove the persisted token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;
}
