//! Built-in datatype classification tables.
//!
//! Static, process-wide tables: the XSD built-in datatypes, the numeric
//! subset, the subset validable without any facet lookup, and the canonical
//! facet sets of the well-known XSD/OWL datatypes. User-defined overrides
//! never shadow these tables; resolution always consults them first.

use crate::model::{ConstrainingFacets, FacetsRestriction};
use once_cell::sync::Lazy;
use oxigraph::model::NamedNode;
use std::collections::{HashMap, HashSet};

pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";
pub const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// Canonical pattern of the XSD integer family.
const INTEGER_PATTERN: &str = "[\\-+]?[0-9]+";
/// Canonical pattern of xsd:decimal.
const DECIMAL_PATTERN: &str = "(\\+|-)?([0-9]+(\\.[0-9]*)?|\\.[0-9]+)";
/// Canonical pattern of xsd:float and xsd:double.
const FLOAT_PATTERN: &str =
    "(\\+|-)?([0-9]+(\\.[0-9]*)?|\\.[0-9]+)([Ee](\\+|-)?[0-9]+)?|(\\+|-)?INF|NaN";
/// Lexical space of owl:rational: an optionally signed numerator with an
/// optional positive denominator.
const RATIONAL_PATTERN: &str = "[\\-+]?[0-9]+(/[1-9][0-9]*)?";

pub fn xsd(local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("{XSD_NS}{local}"))
}

pub fn owl(local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("{OWL_NS}{local}"))
}

pub fn rdf(local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("{RDF_NS}{local}"))
}

// =============================================================================
// Classification Sets
// =============================================================================

/// Every XSD built-in datatype.
pub static BUILTIN_DATATYPES: Lazy<HashSet<NamedNode>> = Lazy::new(|| {
    [
        "anyURI",
        "base64Binary",
        "boolean",
        "byte",
        "date",
        "dateTime",
        "dateTimeStamp",
        "dayTimeDuration",
        "decimal",
        "double",
        "duration",
        "float",
        "gDay",
        "gMonth",
        "gMonthDay",
        "gYear",
        "gYearMonth",
        "hexBinary",
        "int",
        "integer",
        "language",
        "long",
        "Name",
        "NCName",
        "negativeInteger",
        "NMTOKEN",
        "nonNegativeInteger",
        "nonPositiveInteger",
        "normalizedString",
        "positiveInteger",
        "short",
        "string",
        "time",
        "token",
        "unsignedByte",
        "unsignedInt",
        "unsignedLong",
        "unsignedShort",
        "yearMonthDuration",
    ]
    .into_iter()
    .map(xsd)
    .collect()
});

/// The integer/decimal family.
pub static NUMERIC_DATATYPES: Lazy<HashSet<NamedNode>> = Lazy::new(|| {
    [
        "byte",
        "decimal",
        "double",
        "float",
        "int",
        "integer",
        "long",
        "negativeInteger",
        "nonNegativeInteger",
        "nonPositiveInteger",
        "positiveInteger",
        "short",
        "unsignedByte",
        "unsignedInt",
        "unsignedLong",
        "unsignedShort",
    ]
    .into_iter()
    .map(xsd)
    .collect()
});

/// Datatypes validable without consulting any facet table: any present,
/// non-empty lexical form is accepted.
pub static INHERENTLY_VALIDABLE: Lazy<HashSet<NamedNode>> = Lazy::new(|| {
    let mut set: HashSet<NamedNode> = ["boolean", "date", "dateTime", "string", "time"]
        .into_iter()
        .map(xsd)
        .collect();
    set.insert(rdf("langString"));
    set
});

// =============================================================================
// Canonical Facet Tables
// =============================================================================

fn facets(
    base: NamedNode,
    min_inclusive: Option<f64>,
    max_inclusive: Option<f64>,
    pattern: &str,
) -> FacetsRestriction {
    FacetsRestriction {
        base,
        facets: ConstrainingFacets {
            min_exclusive: None,
            min_inclusive,
            max_exclusive: None,
            max_inclusive,
            pattern: Some(pattern.to_string()),
        },
    }
}

/// Facet sets of the well-known XSD datatypes, keyed by datatype IRI. The
/// `base` of each entry follows the XSD derivation hierarchy.
pub static STANDARD_FACETS: Lazy<HashMap<NamedNode, FacetsRestriction>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert(
        xsd("integer"),
        facets(xsd("decimal"), None, None, INTEGER_PATTERN),
    );
    table.insert(
        xsd("long"),
        facets(
            xsd("integer"),
            Some(-9_223_372_036_854_775_808.0),
            Some(9_223_372_036_854_775_807.0),
            INTEGER_PATTERN,
        ),
    );
    table.insert(
        xsd("int"),
        facets(
            xsd("long"),
            Some(-2_147_483_648.0),
            Some(2_147_483_647.0),
            INTEGER_PATTERN,
        ),
    );
    table.insert(
        xsd("short"),
        facets(xsd("int"), Some(-32_768.0), Some(32_767.0), INTEGER_PATTERN),
    );
    table.insert(
        xsd("byte"),
        facets(xsd("short"), Some(-128.0), Some(127.0), INTEGER_PATTERN),
    );
    table.insert(
        xsd("nonNegativeInteger"),
        facets(xsd("integer"), Some(0.0), None, INTEGER_PATTERN),
    );
    table.insert(
        xsd("positiveInteger"),
        facets(xsd("nonNegativeInteger"), Some(1.0), None, INTEGER_PATTERN),
    );
    table.insert(
        xsd("nonPositiveInteger"),
        facets(xsd("integer"), None, Some(0.0), INTEGER_PATTERN),
    );
    table.insert(
        xsd("negativeInteger"),
        facets(xsd("nonPositiveInteger"), None, Some(-1.0), INTEGER_PATTERN),
    );
    table.insert(
        xsd("unsignedLong"),
        facets(
            xsd("nonNegativeInteger"),
            Some(0.0),
            Some(18_446_744_073_709_551_615.0),
            INTEGER_PATTERN,
        ),
    );
    table.insert(
        xsd("unsignedInt"),
        facets(
            xsd("unsignedLong"),
            Some(0.0),
            Some(4_294_967_295.0),
            INTEGER_PATTERN,
        ),
    );
    table.insert(
        xsd("unsignedShort"),
        facets(
            xsd("unsignedInt"),
            Some(0.0),
            Some(65_535.0),
            INTEGER_PATTERN,
        ),
    );
    table.insert(
        xsd("unsignedByte"),
        facets(
            xsd("unsignedShort"),
            Some(0.0),
            Some(255.0),
            INTEGER_PATTERN,
        ),
    );
    table.insert(
        xsd("decimal"),
        facets(xsd("decimal"), None, None, DECIMAL_PATTERN),
    );
    table.insert(
        xsd("float"),
        facets(xsd("float"), None, None, FLOAT_PATTERN),
    );
    table.insert(
        xsd("double"),
        facets(xsd("double"), None, None, FLOAT_PATTERN),
    );
    table.insert(
        xsd("language"),
        facets(
            xsd("string"),
            None,
            None,
            "[a-zA-Z]{1,8}(-[a-zA-Z0-9]{1,8})*",
        ),
    );
    table
});

/// Facet sets of well-known non-XSD datatypes.
pub static NON_STANDARD_FACETS: Lazy<HashMap<NamedNode, FacetsRestriction>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert(
        owl("rational"),
        facets(xsd("decimal"), None, None, RATIONAL_PATTERN),
    );
    table
});
