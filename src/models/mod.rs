pub mod location;
pub mod sku;

// Re-export only the types we actually use
pub use location::{LocationChange, LocationKind, LocationSets};
pub use sku::{GenerateRequest, GeneratedSku, NewSkuRequest, SkuRecord, UpdateSkuRequest};
