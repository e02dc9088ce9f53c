//! Fixed-order feature records.

use serde::{Deserialize, Serialize};

/// Length of the area feature vector.
pub const AREA_VECTOR_LEN: usize = 14;

/// Length of the power feature vector.
pub const POWER_VECTOR_LEN: usize = AREA_VECTOR_LEN + 3;

/// Structural and cost features of one design.
///
/// Area and power sub-totals are already rounded to whole library units and
/// the totals are sums of the rounded parts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaFeatures {
    /// Register bits.
    pub seq_bits: u64,
    /// Sum of register fan-in degrees.
    pub fanout_sum: u64,
    /// Port bits.
    pub io_bits: u64,
    /// `And` operator instances.
    pub and_count: u64,
    /// `Or` operator instances.
    pub or_count: u64,
    /// `Unot`/`Ulnot` operator instances.
    pub not_count: u64,
    /// `Xor` operator instances.
    pub xor_count: u64,
    /// `Cond`/`Mux` operator instances.
    pub mux_count: u64,
    /// Combinational operator bits. Not part of the vector form.
    #[serde(default)]
    pub comb_bits: u64,
    /// Register area.
    pub seq_area: f64,
    /// Combinational area.
    pub comb_area: f64,
    /// `seq_area + comb_area`.
    pub total_area: f64,
    /// Static power.
    pub static_power: f64,
    /// Dynamic power.
    pub dynamic_power: f64,
    /// `static_power + dynamic_power`.
    pub total_power: f64,
}

impl AreaFeatures {
    /// The 14-element vector in interface order.
    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.seq_bits as f64,
            self.fanout_sum as f64,
            self.io_bits as f64,
            self.and_count as f64,
            self.or_count as f64,
            self.not_count as f64,
            self.xor_count as f64,
            self.mux_count as f64,
            self.seq_area,
            self.comb_area,
            self.total_area,
            self.static_power,
            self.dynamic_power,
            self.total_power,
        ]
    }

    /// Rebuilds the record from its vector form.
    ///
    /// Returns `None` unless `v` has exactly [`AREA_VECTOR_LEN`] elements.
    /// Counts are truncated toward zero; `comb_bits` is not recoverable and
    /// reads as zero.
    pub fn from_slice(v: &[f64]) -> Option<Self> {
        let v: &[f64; AREA_VECTOR_LEN] = v.try_into().ok()?;
        Some(Self {
            seq_bits: v[0] as u64,
            fanout_sum: v[1] as u64,
            io_bits: v[2] as u64,
            and_count: v[3] as u64,
            or_count: v[4] as u64,
            not_count: v[5] as u64,
            xor_count: v[6] as u64,
            mux_count: v[7] as u64,
            comb_bits: 0,
            seq_area: v[8],
            comb_area: v[9],
            total_area: v[10],
            static_power: v[11],
            dynamic_power: v[12],
            total_power: v[13],
        })
    }
}

/// Area features extended with switching activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerFeatures {
    /// The structural and cost features.
    pub area: AreaFeatures,
    /// Sum of per-signal toggle rates.
    pub toggle_rate_sum: f64,
    /// Average per-signal toggle rate.
    pub toggle_rate_avg: f64,
    /// Module-level predicted power.
    pub module_power: f64,
}

impl PowerFeatures {
    /// The 17-element vector: area vector, then toggle sum, toggle average
    /// and module power.
    pub fn to_vec(&self) -> Vec<f64> {
        let mut v = self.area.to_vec();
        v.extend([self.toggle_rate_sum, self.toggle_rate_avg, self.module_power]);
        v
    }
}
