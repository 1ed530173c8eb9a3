//! Enhanced request extractors with improved error handling and validation.

pub mod enhanced_json;
pub mod enhanced_multipart;
pub mod validated_json;

pub use self::enhanced_json::Json;
pub use self::enhanced_multipart::Multipart;
pub use self::validated_json::ValidateJson;
