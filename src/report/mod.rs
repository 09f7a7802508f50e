//! Tabular export of filtered analysis results.
//!
//! External reporting collaborators consume the filtered (filter, result)
//! rows as CSV; catenary quantities are derived per row from the solved
//! tension and the span's attachment spacing.

use std::io::Write;

use serde::Serialize;
use thiserror::Error;

use crate::analysis::FilteredResult;
use crate::catenary::Catenary3d;
use crate::types::Vector3d;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct ResultRecord<'a> {
    weathercase: &'a str,
    condition: &'a str,
    catenary_constant: f64,
    tension_horizontal: f64,
    tension_horizontal_core: f64,
    tension_horizontal_shell: f64,
    tension_support_max: f64,
    sag: f64,
    length: f64,
    length_unloaded: f64,
    swing_angle: f64,
}

/// Write one CSV row per filtered result, in filter order
pub fn write_results_csv<W: Write>(
    writer: W,
    spacing_attachments: Vector3d,
    rows: &[FilteredResult],
) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        let result = row.result;
        let catenary = Catenary3d::new(
            result.tension_horizontal,
            result.weight_unit,
            spacing_attachments,
        );
        csv_writer.serialize(ResultRecord {
            weathercase: &result.weathercase,
            condition: result.condition.as_str(),
            catenary_constant: catenary.constant(),
            tension_horizontal: result.tension_horizontal,
            tension_horizontal_core: result.tension_horizontal_core,
            tension_horizontal_shell: result.tension_horizontal_shell,
            tension_support_max: catenary.tension_max(),
            sag: catenary.sag(),
            length: catenary.length(),
            length_unloaded: result.length_unloaded,
            swing_angle: catenary.swing_angle(),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
