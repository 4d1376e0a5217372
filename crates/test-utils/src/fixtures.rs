//! Sample ISG documents for every supported version.
//!
//! Each document is laid out exactly as the workspace writer renders it, so
//! tests can compare written output line for line. Expected canonical
//! values are exported next to each document.

/// Comment lines placed before every sample header.
pub const COMMENTS: &[&str] = &[
    "Synthetic geoid model for unit tests",
    "Values in metres, sentinel marks one missing cell",
];

/// Canonical data of the 2x3 ISG 1.0 sample.
pub const ISG_1_0_DATA: [[f64; 3]; 2] = [[1.0, 2.0, 3.0], [4.0, -9999.0, 6.0]];

/// Canonical data of the 3x2 ISG 1.01 sample.
pub const ISG_1_01_DATA: [[f64; 2]; 3] = [[1.0, 2.0], [3.0, -9999.0], [5.0, 6.0]];

/// Canonical data of the 3x3 ISG 2.0 samples.
pub const ISG_2_0_DATA: [[f64; 3]; 3] = [
    [1.0, 2.0, 3.0],
    [4.0, -9999.0, 6.0],
    [7.0, 8.0, 9.0],
];

const BEGIN: &str = "begin_of_head ================================================";
const END: &str = "end_of_head ==================================================";

const HEADER_1_0: &[&str] = &[
    "model name : TEST-10",
    "model type : gravimetric",
    "units      : meters",
    "reference  : GRS80",
    "lat min    =    44.0000",
    "lat max    =    46.0000",
    "lon min    =     8.0000",
    "lon max    =    11.0000",
    "delta lat  =     1.0000",
    "delta lon  =     1.0000",
    "nrows      =          2",
    "ncols      =          3",
    "nodata     = -9999.0000",
    "ISG format =        1.0",
];

const HEADER_1_01: &[&str] = &[
    "model name : TEST-101",
    "model type : gravimetric",
    "units      : meters",
    "reference  : GRS80",
    "lat min    =    10.000000000000",
    "lat max    =    11.500000000000",
    "lon min    =    20.000000000000",
    "lon max    =    21.000000000000",
    "delta lat  =     0.500000000000",
    "delta lon  =     0.500000000000",
    "nrows      =                  3",
    "ncols      =                  2",
    "nodata     =         -9999.0000",
    "ISG format =       1.01",
];

const DESCRIPTIVE_2_0: &[&str] = &[
    "model name     : TEST-20",
    "model year     : 2020",
    "model type     : gravimetric",
    "data type      : geoid",
    "data units     : meters",
    "data format    : grid",
    "data ordering  : N-to-S, W-to-E",
    "ref ellipsoid  : GRS80",
    "ref frame      : ITRF2014",
    "height datum   : ---",
    "tide system    : tide-free",
    "coord type     : geodetic",
];

const MAP_2_0: &[&str] = &["map projection : ---", "EPSG code      : 7912"];

const BOUNDS_2_0_DEG: &[&str] = &[
    "lat min        =   40.000000",
    "lat max        =   41.000000",
    "lon min        =   10.000000",
    "lon max        =   12.000000",
    "delta lat      =    0.500000",
    "delta lon      =    1.000000",
];

const BOUNDS_2_0_DMS: &[&str] = &[
    "lat min        =  45°00'00\"",
    "lat max        =  45°01'00\"",
    "lon min        =   9°00'00\"",
    "lon max        =   9°02'00\"",
    "delta lat      =   0°00'30\"",
    "delta lon      =   0°01'00\"",
];

const BOUNDS_2_0_ALIAS: &[&str] = &[
    "north min      =   40.000000",
    "north max      =   41.000000",
    "east min       =   10.000000",
    "east max       =   12.000000",
    "delta north    =    0.500000",
    "delta east     =    1.000000",
];

const TRAILER_2_0: &[&str] = &[
    "nrows          =          3",
    "ncols          =          3",
    "nodata         = -9999.0000",
    "creation date  =  30/06/2020",
    "ISG format     =        2.0",
];

/// One data line as the writer renders it.
pub fn data_row(values: &[f64]) -> String {
    values.iter().map(|v| format!("{:10.4} ", v)).collect()
}

fn document<R: AsRef<[f64]>>(header: &[&str], rows: &[R]) -> String {
    let mut lines: Vec<String> = COMMENTS.iter().map(|s| s.to_string()).collect();
    lines.push(BEGIN.to_string());
    lines.extend(header.iter().map(|s| s.to_string()));
    lines.push(END.to_string());
    lines.extend(rows.iter().map(|row| data_row(row.as_ref())));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn header_2_0(ordering: &str, units: &str, bounds: &[&str]) -> Vec<String> {
    let mut header: Vec<String> = DESCRIPTIVE_2_0
        .iter()
        .map(|line| {
            if line.starts_with("data ordering") {
                format!("data ordering  : {}", ordering)
            } else {
                line.to_string()
            }
        })
        .collect();
    header.push(format!("coord units    : {}", units));
    header.extend(MAP_2_0.iter().map(|s| s.to_string()));
    header.extend(bounds.iter().map(|s| s.to_string()));
    header.extend(TRAILER_2_0.iter().map(|s| s.to_string()));
    header
}

fn borrowed(lines: &[String]) -> Vec<&str> {
    lines.iter().map(String::as_str).collect()
}

/// ISG 1.0 sample: 2x3 grid, edges 44..46 N, 8..11 E, 1 degree spacing.
pub fn isg_1_0() -> String {
    document(HEADER_1_0, &ISG_1_0_DATA[..])
}

/// ISG 1.01 sample: 3x2 grid, edges 10..11.5 N, 20..21 E, 0.5 degree spacing.
pub fn isg_1_01() -> String {
    document(HEADER_1_01, &ISG_1_01_DATA[..])
}

/// ISG 2.0 sample in decimal degrees: 3x3 grid, centers 40..41 N, 10..12 E.
pub fn isg_2_0() -> String {
    isg_2_0_ordered("N-to-S, W-to-E")
}

/// ISG 2.0 sample whose data block is stored in the given ordering.
///
/// The canonical grid is always [`ISG_2_0_DATA`]; only the on-disk order
/// changes with `ordering`.
pub fn isg_2_0_ordered(ordering: &str) -> String {
    let mut rows: Vec<Vec<f64>> = ISG_2_0_DATA.iter().map(|r| r.to_vec()).collect();
    if ordering.starts_with("S-to-N") {
        rows.reverse();
    }
    if ordering.ends_with("E-to-W") {
        for row in rows.iter_mut() {
            row.reverse();
        }
    }
    let header = header_2_0(ordering, "deg", BOUNDS_2_0_DEG);
    document(&borrowed(&header), &rows[..])
}

/// ISG 2.0 sample with DMS bounds: 45°00'..45°01' N, 9°00'..9°02' E.
pub fn isg_2_0_dms() -> String {
    let header = header_2_0("N-to-S, W-to-E", "dms", BOUNDS_2_0_DMS);
    document(&borrowed(&header), &ISG_2_0_DATA[..])
}

/// ISG 2.0 sample using the `north`/`east` keyword aliases.
pub fn isg_2_0_alias() -> String {
    let header = header_2_0("N-to-S, W-to-E", "deg", BOUNDS_2_0_ALIAS);
    document(&borrowed(&header), &ISG_2_0_DATA[..])
}

/// ISG 2.0 sample with one header line no schema knows.
pub fn isg_2_0_with_unknown_field() -> String {
    isg_2_0().replace(
        "EPSG code      : 7912\n",
        "EPSG code      : 7912\nprocessing centre : somewhere\n",
    )
}

/// Every data ordering phrase.
pub const ORDERINGS: [&str; 4] = [
    "N-to-S, W-to-E",
    "N-to-S, E-to-W",
    "S-to-N, W-to-E",
    "S-to-N, E-to-W",
];
