//! CSV Export for the Training Step

use std::io::Write;

use csv::Writer;

use crate::features::{FeatureSet, FEATURE_COLUMNS};

impl FeatureSet {
    /// Write the feature table with a header row
    pub fn write_features_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = Writer::from_writer(writer);
        wtr.write_record(FEATURE_COLUMNS)?;
        for row in &self.rows {
            wtr.write_record(row.values.iter().map(|v| v.to_string()))?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write the target vector as a single `target` column
    pub fn write_target_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = Writer::from_writer(writer);
        wtr.write_record(["target"])?;
        for label in &self.target {
            wtr.write_record([label.to_string()])?;
        }
        wtr.flush()?;
        Ok(())
    }
}
