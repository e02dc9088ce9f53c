//! Power feature assembly.

use ppa_common::DesignKey;
use ppa_cost::{AreaFeatures, PowerFeatures, AREA_VECTOR_LEN};
use std::path::Path;

use crate::error::{FlowError, FlowErrorKind, InDesign};
use crate::vectors::{read_scalar, read_vector_exact, write_vector};

/// Extends the area vector of `key` with switching activity and writes
/// `{stem}_vec_pwr.json` to `out_dir`.
///
/// The area vector is read from `feature_dir`; the toggle-rate sum and
/// average are read from `{design}_tc_sum_all.json` and
/// `{design}_tc_avr_all.json` in `toggle_dir`. `module_power` is the
/// module-level prediction appended last.
pub fn run_power(
    feature_dir: &Path,
    toggle_dir: &Path,
    out_dir: &Path,
    key: &DesignKey,
    module_power: f64,
) -> Result<PowerFeatures, FlowError> {
    let area_path = feature_dir.join(key.area_vector_file());
    let area_vec = read_vector_exact(&area_path, AREA_VECTOR_LEN).in_design(&key.design)?;
    let area = AreaFeatures::from_slice(&area_vec)
        .ok_or_else(|| {
            FlowError::new(
                key.design.as_str(),
                FlowErrorKind::VectorLength {
                    path: area_path.clone(),
                    expected: AREA_VECTOR_LEN,
                    found: area_vec.len(),
                },
            )
        })?;

    let features = PowerFeatures {
        area,
        toggle_rate_sum: read_scalar(&toggle_dir.join(key.toggle_sum_file()))
            .in_design(&key.design)?,
        toggle_rate_avg: read_scalar(&toggle_dir.join(key.toggle_avg_file()))
            .in_design(&key.design)?,
        module_power,
    };

    // The area prefix is written back exactly as read.
    let mut vector = area_vec;
    vector.extend([features.toggle_rate_sum, features.toggle_rate_avg, module_power]);
    write_vector(&out_dir.join(key.power_vector_file()), &vector).in_design(&key.design)?;
    Ok(features)
}
