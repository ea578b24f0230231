//! Datatype restriction cache and literal validation for RDF vocabulary
//! editing.
//!
//! Literal editors need to know, per datatype IRI, whether a datatype is
//! numeric, whether it can be validated at all, and whether a concrete
//! value satisfies its constraining facets or enumeration. Built-in XSD/OWL
//! classification tables answer most of that; restrictions on user-defined
//! datatypes are fetched from the vocabulary service and held in a
//! project-scoped cache that is invalidated by resource-rename events.
//!
//! # Example
//!
//! ```rust,ignore
//! use datatype_facets::{DatatypeValidator, HttpRestrictionSource, SourceConfig, xsd};
//! use oxigraph::model::Literal;
//! use std::sync::Arc;
//!
//! let source = HttpRestrictionSource::new(SourceConfig::new(base_url, project))?;
//! let validator = Arc::new(DatatypeValidator::new(Arc::new(source)));
//! validator.init_datatype_restrictions().await?;
//!
//! let int = xsd::xsd("int");
//! assert!(validator.is_numeric_type(&int));
//! assert!(validator.is_valid(&Literal::new_typed_literal("42", int.clone()), &int));
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod model;
pub mod source;
pub mod validator;
pub mod xsd;

pub use cache::{CacheStats, RestrictionCache};
pub use config::SourceConfig;
pub use error::DatatypeError;
pub use events::{RenameEvent, spawn_rename_listener};
pub use logging::{LogFormat, init_logging};
pub use model::{
    ConstrainingFacets, FacetsRestriction, Restriction, RestrictionMap, compile_restrictions,
};
pub use source::{HttpRestrictionSource, RestrictionSource};
pub use validator::DatatypeValidator;
