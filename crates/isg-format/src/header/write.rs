use chrono::{Local, NaiveDate};
use isg_common::{DataOrdering, GridBounds};
use tracing::{debug, warn};

use super::{BANNER_PREFIX, BEGIN_OF_HEAD, END_OF_HEAD};
use crate::dms::{deg_to_dms, Dms};
use crate::model::GridModel;
use crate::pattern::{CoordUnit, FormatSpec, NumberPattern};
use crate::schema::{FieldSlug, FieldSpec, FormatSchema, ValueKind};
use crate::version::IsgVersion;

const PLACEHOLDER: &str = "---";
const DATE_FORMAT: &str = "%d/%m/%Y";
const DATA_PATTERN: NumberPattern = NumberPattern::fixed(10, 4);

/// Render one data row: every value width 10 with 4 decimals, each followed
/// by a space.
pub fn render_data_row(row: &[f64]) -> String {
    let mut line = String::with_capacity(row.len() * 11);
    for value in row {
        line.push_str(&DATA_PATTERN.render_float(*value));
        line.push(' ');
    }
    line
}

/// Render `model` as an ISG document of version `target`.
pub fn write(model: &GridModel, target: IsgVersion, generator: &str) -> String {
    write_with_date(model, target, generator, Local::now().date_naive())
}

/// Like [`write`] with an explicit date for stamped creation dates.
pub fn write_with_date(
    model: &GridModel,
    target: IsgVersion,
    generator: &str,
    today: NaiveDate,
) -> String {
    let schema = FormatSchema::for_version(target);
    let width = schema.keyword_width();
    let writer = FieldWriter {
        model,
        target,
        disk_bounds: if target.stores_cell_edges() {
            model.bounds().centers_to_edges()
        } else {
            *model.bounds()
        },
        unit: model.coord_units().unwrap_or(CoordUnit::Deg),
        today: today.format(DATE_FORMAT).to_string(),
    };

    let mut out = String::new();
    for line in model.comment_lines() {
        out.push_str(line);
        out.push('\n');
    }
    if !ends_with_banner(model.comment_lines()) {
        out.push_str(BANNER_PREFIX);
        out.push_str(generator);
        out.push_str("\n\n");
    }
    out.push_str(BEGIN_OF_HEAD);
    out.push('\n');

    for spec in schema.fields() {
        let keyword = match model.field(spec.slug) {
            Some(field) if spec.keyword.accepts(&field.keyword) => field.keyword.as_str(),
            _ => spec.keyword.primary(),
        };
        let delimiter = match spec.kind {
            ValueKind::Numeric => " = ",
            ValueKind::Textual => " : ",
        };
        out.push_str(&format!(
            "{:<width$}{}{}\n",
            keyword,
            delimiter,
            writer.render(spec)
        ));
    }

    out.push_str(END_OF_HEAD);
    out.push('\n');
    for row in model.data() {
        out.push_str(&render_data_row(row));
        out.push('\n');
    }

    debug!(
        version = %target,
        fields = schema.fields().len(),
        rows = model.data().len(),
        "Rendered ISG document"
    );
    out
}

/// True when the last two comment lines are a banner and a blank line.
fn ends_with_banner(comment_lines: &[String]) -> bool {
    match comment_lines {
        [.., banner, blank] => banner.starts_with(BANNER_PREFIX) && blank.trim().is_empty(),
        _ => false,
    }
}

struct FieldWriter<'a> {
    model: &'a GridModel,
    target: IsgVersion,
    disk_bounds: GridBounds,
    unit: CoordUnit,
    today: String,
}

impl FieldWriter<'_> {
    fn render(&self, spec: &FieldSpec) -> String {
        let stored = self.model.field(spec.slug).map(|field| field.value.as_str());

        match spec.slug {
            FieldSlug::IsgFormat => return self.render_version(spec),
            FieldSlug::CreationDate => {
                return match stored {
                    Some(value) if !self.model.is_subset() => format!(" {}", value),
                    _ => format!(" {}", self.today),
                };
            }
            FieldSlug::ModelName if self.model.is_subset() => {
                return format!("{} subset", stored.unwrap_or(PLACEHOLDER));
            }
            slug if slug.is_bound() => return self.render_bound(spec, stored),
            _ => {}
        }

        let Some(value) = stored else {
            return default_value(spec.slug).to_string();
        };

        match spec.format {
            FormatSpec::Fixed(pattern) => pattern
                .render_text(spec.slug.as_str(), value)
                .unwrap_or_else(|err| {
                    warn!(error = %err, "Writing header value unformatted");
                    value.to_string()
                }),
            _ => value.to_string(),
        }
    }

    fn render_version(&self, spec: &FieldSpec) -> String {
        match spec.format {
            FormatSpec::Fixed(pattern) => pattern
                .render_text(spec.slug.as_str(), self.target.as_str())
                .unwrap_or_else(|_| self.target.as_str().to_string()),
            _ => self.target.as_str().to_string(),
        }
    }

    fn render_bound(&self, spec: &FieldSpec, stored: Option<&str>) -> String {
        let value = bound_value(&self.disk_bounds, spec.slug);

        match spec.format.resolve(Some(self.unit)) {
            Some(FormatSpec::Fixed(pattern)) => pattern.render_float(value),
            Some(FormatSpec::Sexagesimal(patterns)) => {
                // Stored DMS text is exact; decimal bounds were rounded.
                let dms = stored
                    .and_then(|text| Dms::parse(text).ok())
                    .filter(|dms| (dms.to_degrees() - value).abs() < 1e-6)
                    .unwrap_or_else(|| deg_to_dms(value));
                let rendered = dms.render(&patterns);
                match rendered.strip_prefix(' ') {
                    Some(rest) => rest.to_string(),
                    None => rendered,
                }
            }
            _ => {
                warn!(
                    field = %spec.slug,
                    unit = self.unit.as_str(),
                    "No pattern for coordinate unit, writing raw value"
                );
                stored.map(str::to_string).unwrap_or_else(|| value.to_string())
            }
        }
    }
}

fn bound_value(bounds: &GridBounds, slug: FieldSlug) -> f64 {
    match slug {
        FieldSlug::LatMin => bounds.lat_min,
        FieldSlug::LatMax => bounds.lat_max,
        FieldSlug::LonMin => bounds.lon_min,
        FieldSlug::LonMax => bounds.lon_max,
        FieldSlug::DeltaLat => bounds.delta_lat,
        _ => bounds.delta_lon,
    }
}

fn default_value(slug: FieldSlug) -> &'static str {
    match slug {
        FieldSlug::DataFormat => "grid",
        FieldSlug::DataOrdering => DataOrdering::NorthToSouthWestToEast.as_phrase(),
        FieldSlug::CoordType => "geodetic",
        FieldSlug::CoordUnits => CoordUnit::Deg.as_str(),
        _ => PLACEHOLDER,
    }
}
