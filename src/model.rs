//! Restriction data model and the wire payload of the remote service.
//!
//! A datatype restriction is either a facet record narrowing a base
//! datatype (bounds and a pattern) or an enumeration of the only admissible
//! literal values. The wire DTOs mirror the JSON the vocabulary service
//! returns; [`compile_restrictions`] converts a payload into the internal
//! model, skipping malformed entries instead of poisoning the whole map.

use crate::error::DatatypeError;
use indexmap::IndexMap;
use oxigraph::model::{Literal, NamedNode};
use regex::Regex;
use serde::Deserialize;
use tracing::warn;

/// Restriction map for one project: datatype IRI to its restriction.
pub type RestrictionMap = IndexMap<NamedNode, Restriction>;

// =============================================================================
// Constraining Facets
// =============================================================================

/// Facets narrowing the lexical space of a datatype.
///
/// Per bound direction at most one of the exclusive/inclusive variants may
/// be set; `pattern` is a regular expression source that is anchored at
/// validation time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstrainingFacets {
    pub min_exclusive: Option<f64>,
    pub min_inclusive: Option<f64>,
    pub max_exclusive: Option<f64>,
    pub max_inclusive: Option<f64>,
    pub pattern: Option<String>,
}

impl ConstrainingFacets {
    /// True when no bound and no pattern is populated.
    pub fn is_empty(&self) -> bool {
        self.min_exclusive.is_none()
            && self.min_inclusive.is_none()
            && self.max_exclusive.is_none()
            && self.max_inclusive.is_none()
            && self.pattern.is_none()
    }

    /// Definition-time checks: bound exclusivity per direction and pattern
    /// syntax. Restriction editors must reject definitions failing here, so
    /// that validation never meets a conflicting bound pair or a pattern
    /// that does not compile.
    pub fn validate(&self) -> Result<(), DatatypeError> {
        if self.min_exclusive.is_some() && self.min_inclusive.is_some() {
            return Err(DatatypeError::InvalidFacets(
                "minExclusive and minInclusive are both set".into(),
            ));
        }
        if self.max_exclusive.is_some() && self.max_inclusive.is_some() {
            return Err(DatatypeError::InvalidFacets(
                "maxExclusive and maxInclusive are both set".into(),
            ));
        }
        if let Some(pattern) = &self.pattern {
            Regex::new(pattern).map_err(|err| DatatypeError::InvalidPattern {
                pattern: pattern.clone(),
                reason: err.to_string(),
            })?;
        }
        Ok(())
    }
}

/// A facet record together with the base datatype it narrows.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetsRestriction {
    /// The datatype whose lexical space the facets narrow.
    pub base: NamedNode,
    pub facets: ConstrainingFacets,
}

/// Restriction of a single datatype: facets or an enumeration, never both
/// within one definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Restriction {
    Facets(FacetsRestriction),
    Enumeration(Vec<Literal>),
}

impl Restriction {
    pub fn facets(&self) -> Option<&FacetsRestriction> {
        match self {
            Restriction::Facets(facets) => Some(facets),
            Restriction::Enumeration(_) => None,
        }
    }

    pub fn enumeration(&self) -> Option<&[Literal]> {
        match self {
            Restriction::Facets(_) => None,
            Restriction::Enumeration(values) => Some(values),
        }
    }
}

// =============================================================================
// Wire Payload
// =============================================================================

/// Top-level response of the restriction endpoint.
#[derive(Debug, Deserialize)]
pub struct RestrictionsDto {
    #[serde(default)]
    pub restrictions: IndexMap<String, RestrictionDto>,
}

/// One restriction entry as serialized by the service.
#[derive(Debug, Deserialize)]
pub struct RestrictionDto {
    #[serde(default)]
    pub facets: Option<FacetsDto>,
    #[serde(default)]
    pub enumeration: Option<Vec<LiteralDto>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetsDto {
    pub base: String,
    #[serde(default)]
    pub min_exclusive: Option<f64>,
    #[serde(default)]
    pub min_inclusive: Option<f64>,
    #[serde(default)]
    pub max_exclusive: Option<f64>,
    #[serde(default)]
    pub max_inclusive: Option<f64>,
    #[serde(default)]
    pub pattern: Option<String>,
}

/// Literal as serialized by the service: lexical form plus an optional
/// language tag or datatype IRI.
#[derive(Debug, Deserialize)]
pub struct LiteralDto {
    pub value: String,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub datatype: Option<String>,
}

impl LiteralDto {
    fn into_literal(self) -> Result<Literal, DatatypeError> {
        if let Some(lang) = self.lang {
            return Literal::new_language_tagged_literal(self.value, &lang).map_err(|err| {
                DatatypeError::Decode(format!("invalid language tag {lang:?}: {err}"))
            });
        }
        if let Some(datatype) = self.datatype {
            let datatype = parse_iri(&datatype)?;
            return Ok(Literal::new_typed_literal(self.value, datatype));
        }
        Ok(Literal::new_simple_literal(self.value))
    }
}

impl FacetsDto {
    fn into_restriction(self) -> Result<FacetsRestriction, DatatypeError> {
        let base = parse_iri(&self.base)?;
        let facets = ConstrainingFacets {
            min_exclusive: self.min_exclusive,
            min_inclusive: self.min_inclusive,
            max_exclusive: self.max_exclusive,
            max_inclusive: self.max_inclusive,
            pattern: self.pattern,
        };
        facets.validate()?;
        Ok(FacetsRestriction { base, facets })
    }
}

fn parse_iri(iri: &str) -> Result<NamedNode, DatatypeError> {
    NamedNode::new(iri).map_err(|err| DatatypeError::InvalidIri {
        iri: iri.to_string(),
        reason: err.to_string(),
    })
}

/// Compile a wire payload into the internal restriction map.
///
/// Entries that do not survive definition-time checks (unparseable IRIs,
/// conflicting bounds, broken patterns, enumerations with invalid literals)
/// are dropped with a warning; the rest of the map stays usable.
pub fn compile_restrictions(dto: RestrictionsDto) -> RestrictionMap {
    let mut map = RestrictionMap::with_capacity(dto.restrictions.len());
    for (iri, entry) in dto.restrictions {
        let datatype = match parse_iri(&iri) {
            Ok(node) => node,
            Err(err) => {
                warn!(%iri, %err, "skipping restriction with invalid datatype IRI");
                continue;
            }
        };
        let restriction = match (entry.facets, entry.enumeration) {
            (Some(facets), None) => match facets.into_restriction() {
                Ok(restriction) => Restriction::Facets(restriction),
                Err(err) => {
                    warn!(datatype = %datatype, %err, "skipping facet restriction");
                    continue;
                }
            },
            (None, Some(values)) => {
                match values
                    .into_iter()
                    .map(LiteralDto::into_literal)
                    .collect::<Result<Vec<_>, _>>()
                {
                    Ok(literals) => Restriction::Enumeration(literals),
                    Err(err) => {
                        warn!(datatype = %datatype, %err, "skipping enumeration restriction");
                        continue;
                    }
                }
            }
            (Some(_), Some(_)) => {
                warn!(datatype = %datatype, "skipping restriction declaring both facets and enumeration");
                continue;
            }
            (None, None) => {
                warn!(datatype = %datatype, "skipping empty restriction entry");
                continue;
            }
        };
        map.insert(datatype, restriction);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn dto(json: serde_json::Value) -> RestrictionsDto {
        serde_json::from_value(json).expect("payload deserializes")
    }

    #[test]
    fn test_facets_empty() {
        assert!(ConstrainingFacets::default().is_empty());
        let facets = ConstrainingFacets {
            pattern: Some("[0-9]+".into()),
            ..Default::default()
        };
        assert!(!facets.is_empty());
    }

    #[test]
    fn test_validate_rejects_conflicting_bounds() {
        let facets = ConstrainingFacets {
            min_exclusive: Some(0.0),
            min_inclusive: Some(1.0),
            ..Default::default()
        };
        assert_matches!(facets.validate(), Err(DatatypeError::InvalidFacets(_)));

        let facets = ConstrainingFacets {
            max_exclusive: Some(10.0),
            max_inclusive: Some(10.0),
            ..Default::default()
        };
        assert_matches!(facets.validate(), Err(DatatypeError::InvalidFacets(_)));
    }

    #[test]
    fn test_validate_rejects_broken_pattern() {
        let facets = ConstrainingFacets {
            pattern: Some("[0-9".into()),
            ..Default::default()
        };
        assert_matches!(facets.validate(), Err(DatatypeError::InvalidPattern { .. }));
    }

    #[test]
    fn test_compile_full_payload() {
        let payload = dto(serde_json::json!({
            "restrictions": {
                "http://example.org/dt/percentage": {
                    "facets": {
                        "base": "http://www.w3.org/2001/XMLSchema#integer",
                        "minInclusive": 0,
                        "maxInclusive": 100
                    }
                },
                "http://example.org/dt/color": {
                    "enumeration": [
                        { "value": "red" },
                        { "value": "rouge", "lang": "fr" },
                        { "value": "blue", "datatype": "http://www.w3.org/2001/XMLSchema#string" }
                    ]
                }
            }
        }));
        let map = compile_restrictions(payload);
        assert_eq!(map.len(), 2);

        let percentage = NamedNode::new("http://example.org/dt/percentage").unwrap();
        let facets = map[&percentage].facets().expect("facet restriction");
        assert_eq!(facets.facets.min_inclusive, Some(0.0));
        assert_eq!(facets.facets.max_inclusive, Some(100.0));

        let color = NamedNode::new("http://example.org/dt/color").unwrap();
        let values = map[&color].enumeration().expect("enumeration restriction");
        assert_eq!(values.len(), 3);
        assert_eq!(values[1].language(), Some("fr"));
    }

    #[test]
    fn test_compile_skips_malformed_entries() {
        let payload = dto(serde_json::json!({
            "restrictions": {
                "not an iri": {
                    "facets": { "base": "http://www.w3.org/2001/XMLSchema#integer" }
                },
                "http://example.org/dt/broken-pattern": {
                    "facets": {
                        "base": "http://www.w3.org/2001/XMLSchema#string",
                        "pattern": "[0-9"
                    }
                },
                "http://example.org/dt/both": {
                    "facets": { "base": "http://www.w3.org/2001/XMLSchema#integer" },
                    "enumeration": [ { "value": "1" } ]
                },
                "http://example.org/dt/ok": {
                    "facets": {
                        "base": "http://www.w3.org/2001/XMLSchema#integer",
                        "minExclusive": 0
                    }
                }
            }
        }));
        let map = compile_restrictions(payload);
        assert_eq!(map.len(), 1);
        let ok = NamedNode::new("http://example.org/dt/ok").unwrap();
        assert!(map.contains_key(&ok));
    }

    #[test]
    fn test_literal_equality_is_structural() {
        let plain = Literal::new_simple_literal("red");
        let tagged = Literal::new_language_tagged_literal("red", "en").unwrap();
        let typed = Literal::new_typed_literal(
            "red",
            NamedNode::new("http://example.org/dt/color").unwrap(),
        );
        assert_ne!(plain, tagged);
        assert_ne!(plain, typed);
        assert_eq!(plain, Literal::new_simple_literal("red"));
    }
}
