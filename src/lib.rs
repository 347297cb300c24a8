//! JSON Schema class-model discovery.
//!
//! This library walks JSON Schema documents and incrementally builds a
//! class-based object model: concepts (classes), properties, enumerations,
//! associations, inheritance, and validation constraints expressed as OCL
//! strings. Forward references are handled by deferred-resolution records
//! resolved once the whole input batch has been analyzed, so documents may
//! reference each other in any order; a reference that never resolves
//! degrades to the well-known `Unknown` placeholder concept instead of
//! failing.
//!
//! # Example
//!
//! ```
//! use jsonschema_model::Analyzer;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "id": "http://example.com/article/schema.json",
//!     "type": "object",
//!     "properties": {
//!         "title": { "type": "string" },
//!         "rating": { "type": "integer", "minimum": 0 }
//!     },
//!     "required": ["title"]
//! });
//!
//! let mut analyzer = Analyzer::new("docs");
//! analyzer.analyze_value(&schema).unwrap();
//! let model = analyzer.finish();
//!
//! let concept = model.concept_named("article").unwrap();
//! assert_eq!(concept.properties.len(), 2);
//! assert_eq!(concept.property("title").unwrap().lower, 1);
//! assert_eq!(
//!     concept.constraint("article-rating-minimumConstraint").unwrap().body,
//!     "self.rating >= 0"
//! );
//! ```
//!
//! # Supported subset
//!
//! The engine covers a defined subset of JSON Schema: object schemas,
//! `definitions`, `allOf` (superclass via `$ref`, own properties), `enum`,
//! string/integer/number/boolean properties with their validation keywords,
//! inline nested objects, and `$ref` associations. Everything else is
//! recognized but silently skipped, never an error.

mod analyzer;
mod error;
mod loader;
mod model;
mod uri;

pub use analyzer::{analyze, Analyzer};
pub use error::{AnalyzeError, UriError};
pub use loader::{collect_input_files, load_document};
pub use model::{
    Aggregation, Association, AssociationEnd, Cardinality, Concept, ConceptId, Constraint,
    Enumeration, EnumerationId, Model, PrimitiveId, PrimitiveKind, PrimitiveType, Property,
    TypeRef, CONSTRAINT_LANGUAGE,
};
pub use uri::SchemaUri;
