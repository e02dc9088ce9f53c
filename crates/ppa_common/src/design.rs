//! Per-design artifact naming.

use std::fmt;

/// Identifies one design's artifacts: `{design}_{cmd}`.
///
/// `cmd` names the front-end that produced the graph (for example `sog` for
/// the technology-mapped simple operator graph, `rtlil` for the RTL netlist).
/// Every persisted file and feature vector for the design is named from
/// this key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DesignKey {
    /// The design (top module) name.
    pub design: String,
    /// The graph flavour, e.g. `sog`.
    pub cmd: String,
}

impl DesignKey {
    /// Creates a key for `design` built with `cmd`.
    pub fn new(design: impl Into<String>, cmd: impl Into<String>) -> Self {
        Self {
            design: design.into(),
            cmd: cmd.into(),
        }
    }

    /// The shared file stem, `{design}_{cmd}`.
    pub fn stem(&self) -> String {
        format!("{}_{}", self.design, self.cmd)
    }

    /// File name of the persisted adjacency structure.
    pub fn adjacency_file(&self) -> String {
        format!("{}.graph.bin", self.stem())
    }

    /// File name of the persisted node registry.
    pub fn registry_file(&self) -> String {
        format!("{}_node_dict.bin", self.stem())
    }

    /// File name of the 14-element area feature vector.
    pub fn area_vector_file(&self) -> String {
        format!("{}_vec_area.json", self.stem())
    }

    /// File name of the `[WNS, TNS]` timing vector.
    pub fn timing_vector_file(&self) -> String {
        format!("{}_vec_timing.json", self.stem())
    }

    /// File name of the power feature vector.
    pub fn power_vector_file(&self) -> String {
        format!("{}_vec_pwr.json", self.stem())
    }

    /// File name of the Graphviz rendering.
    pub fn dot_file(&self) -> String {
        format!("{}.dot", self.stem())
    }

    /// File name of the toggle-rate sum, keyed by design only.
    pub fn toggle_sum_file(&self) -> String {
        format!("{}_tc_sum_all.json", self.design)
    }

    /// File name of the toggle-rate average, keyed by design only.
    pub fn toggle_avg_file(&self) -> String {
        format!("{}_tc_avr_all.json", self.design)
    }

    /// File name of a slack list: the predicted population on input, the
    /// single calibrated value on output.
    pub fn slack_file(&self) -> String {
        format!("{}_rf.json", self.design)
    }

    /// File name of the `[p10, p50, p90]` calibrated spread.
    pub fn slack_spread_file(&self) -> String {
        format!("{}_rf_mul.json", self.design)
    }

    /// File name of the reference timing report.
    pub fn reference_report_file(&self) -> String {
        format!("{}.rpt", self.design)
    }
}

impl fmt::Display for DesignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stem())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        let key = DesignKey::new("uart_tx", "sog");
        assert_eq!(key.stem(), "uart_tx_sog");
        assert_eq!(key.adjacency_file(), "uart_tx_sog.graph.bin");
        assert_eq!(key.registry_file(), "uart_tx_sog_node_dict.bin");
        assert_eq!(key.area_vector_file(), "uart_tx_sog_vec_area.json");
        assert_eq!(key.timing_vector_file(), "uart_tx_sog_vec_timing.json");
        assert_eq!(key.power_vector_file(), "uart_tx_sog_vec_pwr.json");
        assert_eq!(key.dot_file(), "uart_tx_sog.dot");
        assert_eq!(key.toggle_sum_file(), "uart_tx_tc_sum_all.json");
        assert_eq!(key.toggle_avg_file(), "uart_tx_tc_avr_all.json");
        assert_eq!(key.slack_file(), "uart_tx_rf.json");
        assert_eq!(key.slack_spread_file(), "uart_tx_rf_mul.json");
        assert_eq!(key.reference_report_file(), "uart_tx.rpt");
        assert_eq!(key.to_string(), "uart_tx_sog");
    }
}
