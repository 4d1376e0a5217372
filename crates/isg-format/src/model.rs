//! In-memory geoid grid model.

use std::collections::BTreeMap;
use std::path::Path;

use isg_common::{is_nodata, DataOrdering, Extent, GridBounds, NODATA};
use serde::Serialize;
use tracing::{debug, warn};

use crate::dms::dms_to_deg;
use crate::error::{IsgError, Result};
use crate::header::{self, HeaderField, ParsedDocument};
use crate::orientation;
use crate::pattern::CoordUnit;
use crate::schema::{FieldSlug, FormatSchema};
use crate::version::IsgVersion;

/// Identification and extent of a model, bounds in decimal degrees.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MainHeaderValues {
    pub model_name: Option<String>,
    pub model_type: Option<String>,
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
    pub delta_lat: f64,
    pub delta_lon: f64,
}

/// A parsed, normalized geoid grid.
///
/// `bounds` are cell centers in decimal degrees and `data` is stored north to
/// south, west to east, whatever the source file declared. Data, bounds and
/// the dimension fields only change together through [`GridModel::resize`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridModel {
    version: IsgVersion,
    comment_lines: Vec<String>,
    fields: BTreeMap<FieldSlug, HeaderField>,
    bounds: GridBounds,
    data: Vec<Vec<f64>>,
    is_subset: bool,
    orientation: DataOrdering,
    unmatched_lines: Vec<String>,
}

impl GridModel {
    /// Parse and normalize an ISG document.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_document(header::parse(text)?)
    }

    /// Read, parse and normalize an ISG file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = text.len(), "Read ISG file");
        Self::parse(&text)
    }

    /// Derive canonical bounds and orientation from a parsed document.
    pub fn from_document(document: ParsedDocument) -> Result<Self> {
        let ParsedDocument {
            version,
            comment_lines,
            mut fields,
            mut data,
            unmatched_lines,
        } = document;

        let bounds = derive_bounds(version, &fields)?;

        let orientation = if version.has_ordering_field() {
            let declared = match fields.get(&FieldSlug::DataOrdering) {
                Some(field) => DataOrdering::from_phrase(&field.value).unwrap_or_else(|| {
                    warn!(ordering = %field.value, "Unknown data ordering, assuming canonical");
                    DataOrdering::NorthToSouthWestToEast
                }),
                None => DataOrdering::NorthToSouthWestToEast,
            };
            let canonical = orientation::normalize(&mut data, declared);
            if let Some(field) = fields.get_mut(&FieldSlug::DataOrdering) {
                field.value = canonical.as_phrase().to_string();
            }
            canonical
        } else {
            DataOrdering::NorthToSouthWestToEast
        };

        Ok(Self {
            version,
            comment_lines,
            fields,
            bounds,
            data,
            is_subset: false,
            orientation,
            unmatched_lines,
        })
    }

    /// Build a model directly from a grid.
    ///
    /// Only the name, bounds, dimensions and no-data value are populated;
    /// every other header field is written with its default.
    pub fn from_grid(
        version: IsgVersion,
        model_name: &str,
        bounds: GridBounds,
        data: Vec<Vec<f64>>,
    ) -> Self {
        let mut model = Self {
            version,
            comment_lines: Vec::new(),
            fields: BTreeMap::new(),
            bounds,
            data: Vec::new(),
            is_subset: false,
            orientation: DataOrdering::NorthToSouthWestToEast,
            unmatched_lines: Vec::new(),
        };
        model.put_field(FieldSlug::ModelName, model_name.to_string());
        model.put_field(FieldSlug::Nodata, format!("{:.4}", NODATA));
        model.put_field(FieldSlug::IsgFormat, version.as_str().to_string());
        model.resize(data, bounds);
        model
    }

    pub fn version(&self) -> IsgVersion {
        self.version
    }

    /// Raw lines preceding the header.
    pub fn comment_lines(&self) -> &[String] {
        &self.comment_lines
    }

    pub fn fields(&self) -> &BTreeMap<FieldSlug, HeaderField> {
        &self.fields
    }

    pub fn field(&self, slug: FieldSlug) -> Option<&HeaderField> {
        self.fields.get(&slug)
    }

    /// Stored text of a field.
    pub fn field_value(&self, slug: FieldSlug) -> Option<&str> {
        self.fields.get(&slug).map(|field| field.value.as_str())
    }

    pub fn bounds(&self) -> &GridBounds {
        &self.bounds
    }

    pub fn data(&self) -> &[Vec<f64>] {
        &self.data
    }

    pub fn is_subset(&self) -> bool {
        self.is_subset
    }

    pub fn orientation(&self) -> DataOrdering {
        self.orientation
    }

    /// Header lines that matched no known field.
    pub fn unmatched_lines(&self) -> &[String] {
        &self.unmatched_lines
    }

    /// Declared coordinate units, if any are recognised.
    pub fn coord_units(&self) -> Option<CoordUnit> {
        self.field_value(FieldSlug::CoordUnits)
            .and_then(CoordUnit::from_header)
    }

    /// Row count declared in the header.
    pub fn nrows(&self) -> Result<usize> {
        self.dimension(FieldSlug::Nrows)
    }

    /// Column count declared in the header.
    pub fn ncols(&self) -> Result<usize> {
        self.dimension(FieldSlug::Ncols)
    }

    fn dimension(&self, slug: FieldSlug) -> Result<usize> {
        let text = self
            .field_value(slug)
            .ok_or(IsgError::MissingField(slug.as_str()))?;
        text.trim()
            .parse::<usize>()
            .map_err(|_| IsgError::invalid_field(slug.as_str(), text))
    }

    /// Check that the data matrix matches the declared dimensions.
    pub fn check_dimensions(&self) -> Result<()> {
        let expected_rows = self.nrows()?;
        let expected_cols = self.ncols()?;
        let rows = self.data.len();

        let mismatch = |cols: usize| IsgError::DimensionMismatch {
            expected_rows,
            expected_cols,
            rows,
            cols,
        };

        if rows != expected_rows {
            let cols = self.data.first().map(Vec::len).unwrap_or(0);
            return Err(mismatch(cols));
        }
        if let Some(row) = self.data.iter().find(|row| row.len() != expected_cols) {
            return Err(mismatch(row.len()));
        }
        Ok(())
    }

    pub fn value_at(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Latitude and longitude of a cell center.
    pub fn coord_at(&self, row: usize, col: usize) -> (f64, f64) {
        let nrows = self.data.len();
        let ncols = self.data.first().map(Vec::len).unwrap_or(0);
        let (dlat, dlon) = self.bounds.effective_spacing(nrows, ncols);

        let lat = self.bounds.lat_max - dlat * row as f64;
        let lon = self.bounds.lon_min + dlon * col as f64;
        (lat, lon)
    }

    /// Non-sentinel samples in row-major order.
    pub fn valid_samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.data
            .iter()
            .flat_map(|row| row.iter().copied())
            .filter(|v| !is_nodata(*v))
    }

    pub fn main_header_values(&self) -> MainHeaderValues {
        MainHeaderValues {
            model_name: self.field_value(FieldSlug::ModelName).map(str::to_string),
            model_type: self.field_value(FieldSlug::ModelType).map(str::to_string),
            lat_min: self.bounds.lat_min,
            lat_max: self.bounds.lat_max,
            lon_min: self.bounds.lon_min,
            lon_max: self.bounds.lon_max,
            delta_lat: self.bounds.delta_lat,
            delta_lon: self.bounds.delta_lon,
        }
    }

    /// Override the four extents, keeping spacing and data.
    pub fn set_bounds(&mut self, extent: Extent) {
        self.bounds = self.bounds.with_extent(extent);
        self.sync_bound_fields();
    }

    /// Replace data and bounds together, updating dimension and bound fields.
    pub fn resize(&mut self, data: Vec<Vec<f64>>, bounds: GridBounds) {
        let nrows = data.len();
        let ncols = data.first().map(Vec::len).unwrap_or(0);

        self.data = data;
        self.bounds = bounds;
        self.put_field(FieldSlug::Nrows, nrows.to_string());
        self.put_field(FieldSlug::Ncols, ncols.to_string());
        self.sync_bound_fields();
        debug!(nrows, ncols, "Resized grid model");
    }

    /// Flag the model as derived from a larger one.
    pub fn mark_subset(&mut self) {
        self.is_subset = true;
    }

    /// Render as an ISG document of `target` version.
    pub fn to_isg_string(&self, target: IsgVersion, generator: &str) -> String {
        header::write(self, target, generator)
    }

    /// Rewrite the six bound fields from canonical bounds, in this model's
    /// on-disk convention.
    fn sync_bound_fields(&mut self) {
        let disk = if self.version.stores_cell_edges() {
            self.bounds.centers_to_edges()
        } else {
            self.bounds
        };
        let values = [
            disk.lat_min,
            disk.lat_max,
            disk.lon_min,
            disk.lon_max,
            disk.delta_lat,
            disk.delta_lon,
        ];
        for (slug, value) in FieldSlug::BOUNDS.into_iter().zip(values) {
            self.put_field(slug, value.to_string());
        }
    }

    fn put_field(&mut self, slug: FieldSlug, value: String) {
        if let Some(field) = self.fields.get_mut(&slug) {
            field.value = value;
            return;
        }
        if let Some(spec) = FormatSchema::for_version(self.version).field(slug) {
            self.fields.insert(
                slug,
                HeaderField {
                    keyword: spec.keyword.primary().to_string(),
                    kind: spec.kind,
                    format: spec.format,
                    value,
                },
            );
        }
    }
}

impl std::str::FromStr for GridModel {
    type Err = IsgError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Read the six bound fields as decimal degrees and move legacy edge bounds
/// to cell centers.
fn derive_bounds(
    version: IsgVersion,
    fields: &BTreeMap<FieldSlug, HeaderField>,
) -> Result<GridBounds> {
    let dms = version == IsgVersion::V2_0
        && fields
            .get(&FieldSlug::CoordUnits)
            .and_then(|field| CoordUnit::from_header(&field.value))
            == Some(CoordUnit::Dms);

    let mut values = [0.0; 6];
    for (slot, slug) in values.iter_mut().zip(FieldSlug::BOUNDS) {
        let field = fields
            .get(&slug)
            .ok_or(IsgError::MissingField(slug.as_str()))?;
        *slot = if dms {
            dms_to_deg(&field.value)?
        } else {
            field
                .value
                .trim()
                .parse::<f64>()
                .map_err(|_| IsgError::invalid_field(slug.as_str(), field.value.as_str()))?
        };
    }

    let [lat_min, lat_max, lon_min, lon_max, delta_lat, delta_lon] = values;
    let bounds = GridBounds::new(lat_min, lat_max, lon_min, lon_max, delta_lat, delta_lon);

    if version.stores_cell_edges() {
        Ok(bounds.edges_to_centers())
    } else {
        Ok(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_2x3() -> GridModel {
        GridModel::from_grid(
            IsgVersion::V2_0,
            "UNIT",
            GridBounds::new(10.0, 11.0, 20.0, 22.0, 1.0, 1.0),
            vec![vec![1.0, 2.0, 3.0], vec![4.0, NODATA, 6.0]],
        )
    }

    #[test]
    fn test_from_grid_sets_dimensions() {
        let model = grid_2x3();
        assert_eq!(model.nrows().unwrap(), 2);
        assert_eq!(model.ncols().unwrap(), 3);
        assert!(model.check_dimensions().is_ok());
        assert_eq!(model.field_value(FieldSlug::LatMin), Some("10"));
    }

    #[test]
    fn test_coord_at_uses_effective_spacing() {
        let model = grid_2x3();
        let (lat, lon) = model.coord_at(0, 0);
        assert!((lat - 11.0).abs() < 1e-12);
        assert!((lon - 20.0).abs() < 1e-12);

        let (lat, lon) = model.coord_at(1, 2);
        assert!((lat - 10.0).abs() < 1e-12);
        assert!((lon - 22.0).abs() < 1e-12);
    }

    #[test]
    fn test_valid_samples_skip_sentinels() {
        let model = grid_2x3();
        let samples: Vec<f64> = model.valid_samples().collect();
        assert_eq!(samples, vec![1.0, 2.0, 3.0, 4.0, 6.0]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut model = grid_2x3();
        model.data[1].pop();
        assert!(matches!(
            model.check_dimensions(),
            Err(IsgError::DimensionMismatch {
                expected_rows: 2,
                expected_cols: 3,
                rows: 2,
                cols: 2
            })
        ));
    }

    #[test]
    fn test_legacy_fields_store_edges() {
        let model = GridModel::from_grid(
            IsgVersion::V1_01,
            "LEGACY",
            GridBounds::new(10.25, 11.25, 0.0, 1.0, 0.5, 1.0),
            vec![vec![0.0; 2]; 3],
        );
        assert_eq!(model.field_value(FieldSlug::LatMin), Some("10"));
        assert_eq!(model.field_value(FieldSlug::LatMax), Some("11.5"));
        assert_eq!(model.field_value(FieldSlug::LonMin), Some("-0.5"));
    }

    #[test]
    fn test_set_bounds_keeps_spacing() {
        let mut model = grid_2x3();
        model.set_bounds(Extent::new(0.0, 1.0, 5.0, 7.0));
        assert_eq!(model.bounds().delta_lat, 1.0);
        assert_eq!(model.bounds().lat_max, 1.0);
        assert_eq!(model.field_value(FieldSlug::LonMax), Some("7"));
    }

    #[test]
    fn test_main_header_values() {
        let values = grid_2x3().main_header_values();
        assert_eq!(values.model_name.as_deref(), Some("UNIT"));
        assert_eq!(values.model_type, None);
        assert_eq!(values.lon_max, 22.0);
    }
}
