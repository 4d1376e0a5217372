//! Packed binary grid.
//!
//! ```text
//!   0  name           [u8; 9]   zero padded
//!   9  magic          i16       0
//!  11  file size      u32       0
//!  15  reserved       i8 x 2
//!  17  gap            71 bytes  zero
//!  88  reserved       f64 x 2
//! 104  lat min        f64       radians
//! 112  lon min        f64
//! 120  lat max        f64
//! 128  lon max        f64
//! 136  delta lon      f64
//! 144  delta lat      f64
//! 152  reserved       u8
//! 153  mean           f32       over valid samples
//! 157  ncols          u32
//! 161  nvals          u32       every sample, sentinels included
//! 165  body           i16 per valid sample, round((v - mean) * 1000)
//! ```
//!
//! All multi-byte values are little-endian. Sentinel samples are skipped in
//! the body, so positions cannot be recovered when sentinels are scattered.

use std::io::Write;

use bytes::{Buf, BufMut, BytesMut};
use isg_common::is_nodata;
use isg_format::{FieldSlug, GridModel};
use tracing::debug;

use super::Exporter;
use crate::error::{ExportError, Result};
use crate::format::OutputFormat;

/// Encoded header size in bytes.
pub const GEM_HEADER_LEN: usize = 165;

const NAME_LEN: usize = 9;
const GAP_LEN: usize = 71;
const DEVIATION_SCALE: f64 = 1000.0;

/// Header record of a packed binary grid. Angles are in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct GemHeader {
    pub name: [u8; NAME_LEN],
    pub lat_min: f64,
    pub lon_min: f64,
    pub lat_max: f64,
    pub lon_max: f64,
    pub delta_lon: f64,
    pub delta_lat: f64,
    pub mean: f32,
    pub ncols: u32,
    pub nvals: u32,
}

impl GemHeader {
    /// Name bytes truncated or zero padded to the fixed field width.
    pub fn name_field(name: &str) -> [u8; NAME_LEN] {
        let mut field = [0u8; NAME_LEN];
        let bytes = name.as_bytes();
        let len = bytes.len().min(NAME_LEN);
        field[..len].copy_from_slice(&bytes[..len]);
        field
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.reserve(GEM_HEADER_LEN);
        buf.put_slice(&self.name);
        buf.put_i16_le(0);
        buf.put_u32_le(0);
        buf.put_i8(0);
        buf.put_i8(0);
        buf.put_bytes(0, GAP_LEN);

        buf.put_f64_le(0.0);
        buf.put_f64_le(0.0);
        buf.put_f64_le(self.lat_min);
        buf.put_f64_le(self.lon_min);
        buf.put_f64_le(self.lat_max);
        buf.put_f64_le(self.lon_max);
        buf.put_f64_le(self.delta_lon);
        buf.put_f64_le(self.delta_lat);
        buf.put_u8(0);
        buf.put_f32_le(self.mean);
        buf.put_u32_le(self.ncols);
        buf.put_u32_le(self.nvals);
    }

    /// Decode a header from the start of `bytes`.
    pub fn decode(mut bytes: &[u8]) -> Option<Self> {
        if bytes.len() < GEM_HEADER_LEN {
            return None;
        }
        let mut name = [0u8; NAME_LEN];
        bytes.copy_to_slice(&mut name);
        bytes.advance(2 + 4 + 1 + 1 + GAP_LEN + 16);

        let lat_min = bytes.get_f64_le();
        let lon_min = bytes.get_f64_le();
        let lat_max = bytes.get_f64_le();
        let lon_max = bytes.get_f64_le();
        let delta_lon = bytes.get_f64_le();
        let delta_lat = bytes.get_f64_le();
        bytes.advance(1);
        let mean = bytes.get_f32_le();
        let ncols = bytes.get_u32_le();
        let nvals = bytes.get_u32_le();

        Some(Self {
            name,
            lat_min,
            lon_min,
            lat_max,
            lon_max,
            delta_lon,
            delta_lat,
            mean,
            ncols,
            nvals,
        })
    }
}

/// Packed binary grid exporter.
#[derive(Debug, Clone, Copy, Default)]
pub struct GemExporter;

impl GemExporter {
    /// Encode the header and body of `model`.
    pub fn encode(model: &GridModel) -> Result<BytesMut> {
        let (sum, count) = model
            .valid_samples()
            .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
        if count == 0 {
            return Err(ExportError::EmptyGrid);
        }
        let mean = sum / count as f64;

        let nvals: usize = model.data().iter().map(Vec::len).sum();
        let bounds = model.bounds();
        let header = GemHeader {
            name: GemHeader::name_field(model.field_value(FieldSlug::ModelName).unwrap_or("")),
            lat_min: bounds.lat_min.to_radians(),
            lon_min: bounds.lon_min.to_radians(),
            lat_max: bounds.lat_max.to_radians(),
            lon_max: bounds.lon_max.to_radians(),
            delta_lon: bounds.delta_lon.to_radians(),
            delta_lat: bounds.delta_lat.to_radians(),
            mean: mean as f32,
            ncols: model.ncols()? as u32,
            nvals: nvals as u32,
        };

        let mut buf = BytesMut::with_capacity(GEM_HEADER_LEN + count * 2);
        header.encode(&mut buf);

        for (row, values) in model.data().iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                if is_nodata(*value) {
                    continue;
                }
                let deviation = ((value - mean) * DEVIATION_SCALE).round();
                if deviation < i16::MIN as f64 || deviation > i16::MAX as f64 {
                    return Err(ExportError::PackedOverflow {
                        row,
                        col,
                        value: *value,
                    });
                }
                buf.put_i16_le(deviation as i16);
            }
        }

        debug!(mean, packed = count, nvals, "Encoded packed grid");
        Ok(buf)
    }
}

impl Exporter for GemExporter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Gem
    }

    fn export(&self, model: &GridModel, out: &mut dyn Write) -> Result<()> {
        let buf = Self::encode(model)?;
        out.write_all(&buf)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isg_common::GridBounds;
    use isg_format::IsgVersion;

    fn model(data: Vec<Vec<f64>>) -> GridModel {
        let bounds = GridBounds::new(45.0, 46.0, 8.0, 9.0, 1.0, 1.0);
        GridModel::from_grid(IsgVersion::V2_0, "GEOID-TEST-MODEL", bounds, data)
    }

    #[test]
    fn test_header_layout() {
        let header = GemHeader {
            name: GemHeader::name_field("ABC"),
            lat_min: 1.0,
            lon_min: 2.0,
            lat_max: 3.0,
            lon_max: 4.0,
            delta_lon: 5.0,
            delta_lat: 6.0,
            mean: 0.5,
            ncols: 7,
            nvals: 8,
        };
        let mut buf = BytesMut::new();
        header.encode(&mut buf);

        assert_eq!(buf.len(), GEM_HEADER_LEN);
        assert_eq!(&buf[..9], b"ABC\0\0\0\0\0\0");
        assert!(buf[9..104].iter().all(|b| *b == 0));
        assert_eq!(&buf[104..112], &1.0f64.to_le_bytes());
        assert_eq!(&buf[136..144], &5.0f64.to_le_bytes());
        assert_eq!(buf[152], 0);
        assert_eq!(&buf[153..157], &0.5f32.to_le_bytes());
        assert_eq!(&buf[157..161], &7u32.to_le_bytes());
        assert_eq!(&buf[161..165], &8u32.to_le_bytes());

        assert_eq!(GemHeader::decode(&buf).unwrap(), header);
    }

    #[test]
    fn test_decode_short_buffer() {
        assert!(GemHeader::decode(&[0u8; 100]).is_none());
    }

    #[test]
    fn test_name_is_truncated() {
        assert_eq!(&GemHeader::name_field("GEOID-TEST-MODEL"), b"GEOID-TES");
    }

    #[test]
    fn test_body_skips_sentinel() {
        let model = model(vec![vec![1.0, -9999.0], vec![3.0, 4.0]]);
        let buf = GemExporter::encode(&model).unwrap();
        assert_eq!(buf.len(), GEM_HEADER_LEN + 3 * 2);

        let header = GemHeader::decode(&buf).unwrap();
        assert!((header.mean - 8.0f32 / 3.0).abs() < 1e-6);
        assert_eq!(header.ncols, 2);
        assert_eq!(header.nvals, 4);
        assert!((header.lat_min - 45.0f64.to_radians()).abs() < 1e-15);

        let mut body = &buf[GEM_HEADER_LEN..];
        let packed: Vec<i16> = (0..3).map(|_| body.get_i16_le()).collect();
        assert_eq!(packed, vec![-1667, 333, 1333]);
    }

    #[test]
    fn test_all_sentinels_is_empty_grid() {
        let model = model(vec![vec![-9999.0, -9999.0], vec![-9999.0, -9999.0]]);
        assert!(matches!(
            GemExporter::encode(&model),
            Err(ExportError::EmptyGrid)
        ));
    }

    #[test]
    fn test_overflow_reports_position() {
        let model = model(vec![vec![0.0, 0.0], vec![0.0, 50.0]]);
        match GemExporter::encode(&model) {
            Err(ExportError::PackedOverflow { row, col, .. }) => {
                assert_eq!((row, col), (1, 1));
            }
            other => panic!("expected overflow, got {:?}", other.map(|b| b.len())),
        }
    }
}
