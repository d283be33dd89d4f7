pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("lineage graph contains an edge with a missing endpoint: {edge_id}")]
    MissingEndpoint { edge_id: String },
}
