mod product;

pub use product::ProductRepository;

/// Base trait for storage backends.
///
/// The associated error type is surfaced unchanged by every repository
/// operation; callers log it and map it to their own failure responses.
pub trait Repository {
    /// The error type for underlying operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Verify that the backing store is reachable.
    fn check_connection(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// The state an application hands to its transport layer.
///
/// This is the seam between a concrete deployment (which picks a storage
/// backend) and the generic HTTP handlers.
pub trait Application {
    /// The storage backend
    type Repository: ProductRepository;

    /// Get a handle to the storage backend.
    fn database(&self) -> &Self::Repository;
}
