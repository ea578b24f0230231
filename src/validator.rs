//! Datatype classification and literal validation.
//!
//! `DatatypeValidator` answers, for a datatype IRI, whether it is numeric,
//! whether it is validable at all, what its effective facets or enumeration
//! are, and whether a concrete literal satisfies them. Built-in tables are
//! consulted before the per-project restriction cache; an empty or not yet
//! populated cache degrades to "no restriction", never to an error.

use crate::cache::RestrictionCache;
use crate::error::DatatypeError;
use crate::model::{ConstrainingFacets, FacetsRestriction, Restriction};
use crate::source::RestrictionSource;
use crate::xsd;
use oxigraph::model::{Literal, NamedNode};
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, warn};

type FacetResolver = fn(&DatatypeValidator, &NamedNode) -> Option<FacetsRestriction>;

/// Resolution order for effective facets. First hit wins; user-defined
/// restrictions never shadow the standard tables.
static FACET_RESOLVERS: [FacetResolver; 3] = [
    standard_facets,
    non_standard_facets,
    user_defined_facets,
];

fn standard_facets(_: &DatatypeValidator, datatype: &NamedNode) -> Option<FacetsRestriction> {
    xsd::STANDARD_FACETS.get(datatype).cloned()
}

fn non_standard_facets(_: &DatatypeValidator, datatype: &NamedNode) -> Option<FacetsRestriction> {
    xsd::NON_STANDARD_FACETS.get(datatype).cloned()
}

fn user_defined_facets(
    validator: &DatatypeValidator,
    datatype: &NamedNode,
) -> Option<FacetsRestriction> {
    match validator.cache.get(datatype) {
        Some(Restriction::Facets(facets)) => Some(facets),
        _ => None,
    }
}

pub struct DatatypeValidator {
    source: Arc<dyn RestrictionSource>,
    cache: RestrictionCache,
}

impl DatatypeValidator {
    pub fn new(source: Arc<dyn RestrictionSource>) -> Self {
        Self {
            source,
            cache: RestrictionCache::new(),
        }
    }

    pub fn cache(&self) -> &RestrictionCache {
        &self.cache
    }

    /// Fetch the restriction map of the active project and replace the
    /// cache with it. Must run once after project activation and again
    /// after any restriction edit. On failure the previous cache is left
    /// untouched and the error propagates for user notification.
    pub async fn init_datatype_restrictions(&self) -> Result<(), DatatypeError> {
        let map = self.source.fetch_restrictions().await?;
        debug!(entries = map.len(), "replacing datatype restriction cache");
        self.cache.replace(map);
        Ok(())
    }

    /// True for the built-in numeric datatypes and for user-defined
    /// datatypes whose facet restriction narrows a built-in numeric base.
    /// Pure cache read; never fetches.
    pub fn is_numeric_type(&self, datatype: &NamedNode) -> bool {
        if xsd::NUMERIC_DATATYPES.contains(datatype) {
            return true;
        }
        match self.cache.get(datatype) {
            Some(Restriction::Facets(facets)) => xsd::NUMERIC_DATATYPES.contains(&facets.base),
            _ => false,
        }
    }

    /// Whether any validation rule exists for the datatype. Checked in
    /// order, short-circuiting: numeric, inherently validable, non-empty
    /// facets, enumeration. Editors must accept values of non-validable
    /// datatypes unconditionally.
    pub fn is_validable_type(&self, datatype: &NamedNode) -> bool {
        if self.is_numeric_type(datatype) {
            return true;
        }
        if xsd::INHERENTLY_VALIDABLE.contains(datatype) {
            return true;
        }
        if self
            .facets(datatype)
            .is_some_and(|restriction| !restriction.facets.is_empty())
        {
            return true;
        }
        self.enumeration(datatype).is_some()
    }

    /// Effective facets of the datatype, resolved through the standard
    /// table, the non-standard table and the user-defined map in that
    /// order.
    pub fn facets(&self, datatype: &NamedNode) -> Option<FacetsRestriction> {
        FACET_RESOLVERS
            .iter()
            .find_map(|resolver| resolver(self, datatype))
    }

    /// Enumeration of admissible values, from the user-defined map only.
    pub fn enumeration(&self, datatype: &NamedNode) -> Option<Vec<Literal>> {
        match self.cache.get(datatype) {
            Some(Restriction::Enumeration(values)) => Some(values),
            _ => None,
        }
    }

    /// Whether `value` satisfies the constraints of `datatype`. Facet and
    /// enumeration checks are independent; when both apply, both must
    /// pass. A datatype with neither is trivially valid here; callers
    /// gate on [`is_validable_type`](Self::is_validable_type) where
    /// non-validation should mean "accept anything".
    pub fn is_valid(&self, value: &Literal, datatype: &NamedNode) -> bool {
        if xsd::INHERENTLY_VALIDABLE.contains(datatype) && value.value().trim().is_empty() {
            return false;
        }
        if let Some(restriction) = self.facets(datatype) {
            if !check_facets(&restriction.facets, value.value()) {
                return false;
            }
        }
        if let Some(allowed) = self.enumeration(datatype) {
            if !allowed.contains(value) {
                return false;
            }
        }
        true
    }
}

/// Check a lexical form against one facet record. The pattern is matched
/// fully anchored; each bound is checked independently. A stored pattern
/// that no longer compiles is inconclusive: the pattern check is skipped
/// with a warning instead of failing the value or the caller.
fn check_facets(facets: &ConstrainingFacets, lexical: &str) -> bool {
    if let Some(pattern) = &facets.pattern {
        match Regex::new(&format!("^(?:{pattern})$")) {
            Ok(regex) => {
                if !regex.is_match(lexical) {
                    return false;
                }
            }
            Err(err) => {
                warn!(%pattern, %err, "stored facet pattern does not compile, skipping pattern check");
            }
        }
    }

    // Bounds are comparisons on the parsed number; a lexical form that is
    // not numeric trips no bound (the pattern facet is the lexical gate).
    if let Ok(value) = lexical.parse::<f64>() {
        if let Some(bound) = facets.max_exclusive {
            if value >= bound {
                return false;
            }
        }
        if let Some(bound) = facets.max_inclusive {
            if value > bound {
                return false;
            }
        }
        if let Some(bound) = facets.min_exclusive {
            if value <= bound {
                return false;
            }
        }
        if let Some(bound) = facets.min_inclusive {
            if value < bound {
                return false;
            }
        }
    }

    true
}
