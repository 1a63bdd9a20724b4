//! Operator-facing progress reporting.

/// Receives one human-readable line per pipeline step.
///
/// Sinks observe the run; they never influence control flow.
pub trait StatusSink {
    fn append(&mut self, line: &str);
}

impl StatusSink for Vec<String> {
    fn append(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_collects_lines_in_order() {
        let mut lines: Vec<String> = Vec::new();
        let sink: &mut dyn StatusSink = &mut lines;
        sink.append("first");
        sink.append("second");
        assert_eq!(lines, vec!["first", "second"]);
    }
}
