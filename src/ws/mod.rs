pub mod registry;
pub mod directory;
pub mod docstore;

pub use registry::ConnectionRegistry;
pub use directory::RoomDirectory;
pub use docstore::DocumentStore;
