//! ISG header schemas.
//!
//! A static registry describing, per format version, every header field's
//! keyword(s), value kind and numeric format. Declaration order is the
//! on-disk header order.
//!
//! Schemas are built once per version and shared read-only; each carries a
//! precomputed keyword lookup so header lines resolve to a field in constant
//! time, aliases included.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pattern::{CoordUnit, FormatSpec, NumberPattern};
use crate::version::IsgVersion;

/// Stable identifier of a header field across versions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FieldSlug {
    ModelName,
    ModelYear,
    ModelType,
    DataType,
    DataUnits,
    DataFormat,
    DataOrdering,
    RefEllipsoid,
    RefFrame,
    HeightDatum,
    TideSystem,
    CoordType,
    CoordUnits,
    MapProjection,
    EpsgCode,
    LatMin,
    LatMax,
    LonMin,
    LonMax,
    DeltaLat,
    DeltaLon,
    Nrows,
    Ncols,
    Nodata,
    CreationDate,
    IsgFormat,
}

impl FieldSlug {
    /// The six slugs that make up a grid's bounds.
    pub const BOUNDS: [FieldSlug; 6] = [
        FieldSlug::LatMin,
        FieldSlug::LatMax,
        FieldSlug::LonMin,
        FieldSlug::LonMax,
        FieldSlug::DeltaLat,
        FieldSlug::DeltaLon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ModelName => "model_name",
            Self::ModelYear => "model_year",
            Self::ModelType => "model_type",
            Self::DataType => "data_type",
            Self::DataUnits => "data_units",
            Self::DataFormat => "data_format",
            Self::DataOrdering => "data_ordering",
            Self::RefEllipsoid => "ref_ellipsoid",
            Self::RefFrame => "ref_frame",
            Self::HeightDatum => "height_datum",
            Self::TideSystem => "tide_system",
            Self::CoordType => "coord_type",
            Self::CoordUnits => "coord_units",
            Self::MapProjection => "map_projection",
            Self::EpsgCode => "epsg_code",
            Self::LatMin => "lat_min",
            Self::LatMax => "lat_max",
            Self::LonMin => "lon_min",
            Self::LonMax => "lon_max",
            Self::DeltaLat => "delta_lat",
            Self::DeltaLon => "delta_lon",
            Self::Nrows => "nrows",
            Self::Ncols => "ncols",
            Self::Nodata => "nodata",
            Self::CreationDate => "creation_date",
            Self::IsgFormat => "isg_format",
        }
    }

    pub fn is_bound(&self) -> bool {
        Self::BOUNDS.contains(self)
    }
}

impl std::fmt::Display for FieldSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a field is written with `=` (numeric) or `:` (textual).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Numeric,
    Textual,
}

impl ValueKind {
    /// Delimiter between keyword and value.
    pub fn delimiter(&self) -> char {
        match self {
            Self::Numeric => '=',
            Self::Textual => ':',
        }
    }
}

/// Header keyword of a field: one spelling, or a set of equivalent aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Single(&'static str),
    /// First entry is the preferred spelling.
    Alias(&'static [&'static str]),
}

impl Keyword {
    /// Preferred spelling used when no alias was seen in the source.
    pub fn primary(&self) -> &'static str {
        match self {
            Keyword::Single(k) => k,
            Keyword::Alias(all) => all[0],
        }
    }

    /// Every accepted spelling.
    pub fn spellings(&self) -> &[&'static str] {
        match self {
            Keyword::Single(k) => std::slice::from_ref(k),
            Keyword::Alias(all) => all,
        }
    }

    /// Check if `candidate` is one of the accepted spellings.
    pub fn accepts(&self, candidate: &str) -> bool {
        self.spellings().iter().any(|k| *k == candidate)
    }
}

/// Immutable description of one header field in one or more versions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub slug: FieldSlug,
    pub keyword: Keyword,
    pub kind: ValueKind,
    pub format: FormatSpec,
    pub versions: &'static [IsgVersion],
}

// ============================================================================
// Registry
// ============================================================================

use IsgVersion::{V1_0, V1_01, V2_0};

const ALL: &[IsgVersion] = &[V1_0, V1_01, V2_0];
const LEGACY: &[IsgVersion] = &[V1_0, V1_01];
const ONLY_1_0: &[IsgVersion] = &[V1_0];
const ONLY_1_01: &[IsgVersion] = &[V1_01];
const ONLY_2_0: &[IsgVersion] = &[V2_0];
const V1_0_AND_2_0: &[IsgVersion] = &[V1_0, V2_0];

const DMS_COMPONENTS: FormatSpec = FormatSpec::Sexagesimal([
    NumberPattern::integer(4),
    NumberPattern::zero_padded(2),
    NumberPattern::zero_padded(2),
]);

static BOUND_BY_UNIT: [(CoordUnit, FormatSpec); 4] = [
    (CoordUnit::Dms, DMS_COMPONENTS),
    (CoordUnit::Deg, FormatSpec::Fixed(NumberPattern::fixed(11, 6))),
    (CoordUnit::Meters, FormatSpec::Fixed(NumberPattern::fixed(11, 3))),
    (CoordUnit::Feet, FormatSpec::Fixed(NumberPattern::fixed(11, 3))),
];

const fn textual(
    slug: FieldSlug,
    keyword: &'static str,
    versions: &'static [IsgVersion],
) -> FieldSpec {
    FieldSpec {
        slug,
        keyword: Keyword::Single(keyword),
        kind: ValueKind::Textual,
        format: FormatSpec::Verbatim,
        versions,
    }
}

const fn numeric(
    slug: FieldSlug,
    keyword: Keyword,
    format: FormatSpec,
    versions: &'static [IsgVersion],
) -> FieldSpec {
    FieldSpec {
        slug,
        keyword,
        kind: ValueKind::Numeric,
        format,
        versions,
    }
}

/// The three entries (1.0, 1.01, 2.0) of one bound field.
macro_rules! bound_fields {
    ($slug:expr, $legacy:literal, $aliases:expr) => {
        [
            numeric(
                $slug,
                Keyword::Single($legacy),
                FormatSpec::Fixed(NumberPattern::fixed(10, 4)),
                ONLY_1_0,
            ),
            numeric(
                $slug,
                Keyword::Single($legacy),
                FormatSpec::Fixed(NumberPattern::fixed(18, 12)),
                ONLY_1_01,
            ),
            numeric(
                $slug,
                Keyword::Alias($aliases),
                FormatSpec::ByUnit(&BOUND_BY_UNIT),
                ONLY_2_0,
            ),
        ]
    };
}

static LAT_MIN: [FieldSpec; 3] = bound_fields!(FieldSlug::LatMin, "lat min", &["lat min", "north min"]);
static LAT_MAX: [FieldSpec; 3] = bound_fields!(FieldSlug::LatMax, "lat max", &["lat max", "north max"]);
static LON_MIN: [FieldSpec; 3] = bound_fields!(FieldSlug::LonMin, "lon min", &["lon min", "east min"]);
static LON_MAX: [FieldSpec; 3] = bound_fields!(FieldSlug::LonMax, "lon max", &["lon max", "east max"]);
static DELTA_LAT: [FieldSpec; 3] =
    bound_fields!(FieldSlug::DeltaLat, "delta lat", &["delta lat", "delta north"]);
static DELTA_LON: [FieldSpec; 3] =
    bound_fields!(FieldSlug::DeltaLon, "delta lon", &["delta lon", "delta east"]);

static DESCRIPTIVE: [FieldSpec; 17] = [
    textual(FieldSlug::ModelName, "model name", ALL),
    textual(FieldSlug::ModelYear, "model year", ONLY_2_0),
    textual(FieldSlug::ModelType, "model type", ALL),
    textual(FieldSlug::DataType, "data type", ONLY_2_0),
    textual(FieldSlug::DataUnits, "units", LEGACY),
    textual(FieldSlug::DataUnits, "data units", ONLY_2_0),
    textual(FieldSlug::DataFormat, "data format", ONLY_2_0),
    textual(FieldSlug::DataOrdering, "data ordering", ONLY_2_0),
    textual(FieldSlug::RefEllipsoid, "reference", LEGACY),
    textual(FieldSlug::RefEllipsoid, "ref ellipsoid", ONLY_2_0),
    textual(FieldSlug::RefFrame, "ref frame", ONLY_2_0),
    textual(FieldSlug::HeightDatum, "height datum", ONLY_2_0),
    textual(FieldSlug::TideSystem, "tide system", ONLY_2_0),
    textual(FieldSlug::CoordType, "coord type", ONLY_2_0),
    textual(FieldSlug::CoordUnits, "coord units", ONLY_2_0),
    textual(FieldSlug::MapProjection, "map projection", ONLY_2_0),
    textual(FieldSlug::EpsgCode, "EPSG code", ONLY_2_0),
];

static TRAILER: [FieldSpec; 9] = [
    numeric(
        FieldSlug::Nrows,
        Keyword::Single("nrows"),
        FormatSpec::Fixed(NumberPattern::integer(10)),
        V1_0_AND_2_0,
    ),
    numeric(
        FieldSlug::Nrows,
        Keyword::Single("nrows"),
        FormatSpec::Fixed(NumberPattern::integer(18)),
        ONLY_1_01,
    ),
    numeric(
        FieldSlug::Ncols,
        Keyword::Single("ncols"),
        FormatSpec::Fixed(NumberPattern::integer(10)),
        V1_0_AND_2_0,
    ),
    numeric(
        FieldSlug::Ncols,
        Keyword::Single("ncols"),
        FormatSpec::Fixed(NumberPattern::integer(18)),
        ONLY_1_01,
    ),
    numeric(
        FieldSlug::Nodata,
        Keyword::Single("nodata"),
        FormatSpec::Fixed(NumberPattern::fixed(10, 4)),
        V1_0_AND_2_0,
    ),
    numeric(
        FieldSlug::Nodata,
        Keyword::Single("nodata"),
        FormatSpec::Fixed(NumberPattern::fixed(18, 4)),
        ONLY_1_01,
    ),
    numeric(
        FieldSlug::CreationDate,
        Keyword::Single("creation date"),
        FormatSpec::Verbatim,
        ONLY_2_0,
    ),
    numeric(
        FieldSlug::IsgFormat,
        Keyword::Single("ISG format"),
        FormatSpec::Fixed(NumberPattern::fixed(10, 1)),
        V1_0_AND_2_0,
    ),
    numeric(
        FieldSlug::IsgFormat,
        Keyword::Single("ISG format"),
        FormatSpec::Fixed(NumberPattern::fixed(10, 2)),
        ONLY_1_01,
    ),
];

/// Every field entry in on-disk declaration order.
fn registry() -> impl Iterator<Item = &'static FieldSpec> {
    DESCRIPTIVE
        .iter()
        .chain(LAT_MIN.iter())
        .chain(LAT_MAX.iter())
        .chain(LON_MIN.iter())
        .chain(LON_MAX.iter())
        .chain(DELTA_LAT.iter())
        .chain(DELTA_LON.iter())
        .chain(TRAILER.iter())
}

// ============================================================================
// Per-version schema
// ============================================================================

/// Ordered header schema for one ISG version.
#[derive(Debug)]
pub struct FormatSchema {
    version: IsgVersion,
    fields: Vec<&'static FieldSpec>,
    by_keyword: HashMap<&'static str, usize>,
}

static SCHEMA_1_0: Lazy<FormatSchema> = Lazy::new(|| FormatSchema::build(V1_0));
static SCHEMA_1_01: Lazy<FormatSchema> = Lazy::new(|| FormatSchema::build(V1_01));
static SCHEMA_2_0: Lazy<FormatSchema> = Lazy::new(|| FormatSchema::build(V2_0));

impl FormatSchema {
    fn build(version: IsgVersion) -> Self {
        let fields: Vec<&'static FieldSpec> = registry()
            .filter(|spec| spec.versions.contains(&version))
            .collect();

        let mut by_keyword = HashMap::new();
        for (index, spec) in fields.iter().enumerate() {
            for keyword in spec.keyword.spellings() {
                by_keyword.insert(*keyword, index);
            }
        }

        Self {
            version,
            fields,
            by_keyword,
        }
    }

    /// Schema for a known version.
    pub fn for_version(version: IsgVersion) -> &'static FormatSchema {
        match version {
            V1_0 => &SCHEMA_1_0,
            V1_01 => &SCHEMA_1_01,
            V2_0 => &SCHEMA_2_0,
        }
    }

    /// Ordered field specs for a version string.
    ///
    /// Fails with `UnknownVersion` when the string names no supported version.
    pub fn fields_for(version: &str) -> Result<&'static [&'static FieldSpec]> {
        let version = IsgVersion::parse(version)?;
        Ok(Self::for_version(version).fields())
    }

    pub fn version(&self) -> IsgVersion {
        self.version
    }

    /// Field specs in on-disk order.
    pub fn fields(&self) -> &[&'static FieldSpec] {
        &self.fields
    }

    /// Spec of a slug in this version, if the version has it.
    pub fn field(&self, slug: FieldSlug) -> Option<&'static FieldSpec> {
        self.fields.iter().copied().find(|spec| spec.slug == slug)
    }

    /// Resolve a header keyword (any alias) to its field.
    pub fn resolve_keyword(&self, keyword: &str) -> Option<&'static FieldSpec> {
        self.by_keyword.get(keyword).map(|&index| self.fields[index])
    }

    /// Width of the keyword column: the longest preferred keyword, at least 1.
    pub fn keyword_width(&self) -> usize {
        self.fields
            .iter()
            .map(|spec| spec.keyword.primary().chars().count())
            .max()
            .unwrap_or(0)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_counts() {
        assert_eq!(FormatSchema::for_version(V1_0).fields().len(), 14);
        assert_eq!(FormatSchema::for_version(V1_01).fields().len(), 14);
        assert_eq!(FormatSchema::for_version(V2_0).fields().len(), 26);
    }

    #[test]
    fn test_declaration_order() {
        let slugs: Vec<FieldSlug> = FormatSchema::for_version(V1_01)
            .fields()
            .iter()
            .map(|spec| spec.slug)
            .collect();
        assert_eq!(
            slugs,
            vec![
                FieldSlug::ModelName,
                FieldSlug::ModelType,
                FieldSlug::DataUnits,
                FieldSlug::RefEllipsoid,
                FieldSlug::LatMin,
                FieldSlug::LatMax,
                FieldSlug::LonMin,
                FieldSlug::LonMax,
                FieldSlug::DeltaLat,
                FieldSlug::DeltaLon,
                FieldSlug::Nrows,
                FieldSlug::Ncols,
                FieldSlug::Nodata,
                FieldSlug::IsgFormat,
            ]
        );
    }

    #[test]
    fn test_every_slug_once_per_version() {
        for version in IsgVersion::ALL {
            let schema = FormatSchema::for_version(version);
            let mut seen = std::collections::HashSet::new();
            for spec in schema.fields() {
                assert!(seen.insert(spec.slug), "{} duplicated in {}", spec.slug, version);
            }
        }
    }

    #[test]
    fn test_alias_lookup() {
        let schema = FormatSchema::for_version(V2_0);
        assert_eq!(schema.resolve_keyword("north min").unwrap().slug, FieldSlug::LatMin);
        assert_eq!(schema.resolve_keyword("lat min").unwrap().slug, FieldSlug::LatMin);
        assert_eq!(schema.resolve_keyword("delta east").unwrap().slug, FieldSlug::DeltaLon);
        assert!(schema.resolve_keyword("units").is_none());

        let legacy = FormatSchema::for_version(V1_01);
        assert_eq!(legacy.resolve_keyword("units").unwrap().slug, FieldSlug::DataUnits);
        assert!(legacy.resolve_keyword("north min").is_none());
    }

    #[test]
    fn test_keyword_width() {
        assert_eq!(FormatSchema::for_version(V2_0).keyword_width(), "map projection".len());
        assert_eq!(FormatSchema::for_version(V1_01).keyword_width(), "model name".len());
    }

    #[test]
    fn test_fields_for_unknown_version() {
        assert!(FormatSchema::fields_for("1.5").is_err());
        assert_eq!(FormatSchema::fields_for("2.0").unwrap().len(), 26);
    }
}
