use super::model::Trace;

/// Prefix of generated trace labels.
pub const LABEL_PREFIX: &str = "Spectral Response";

/// Imported traces of one session, in import order.
///
/// Labels are numbered from 1 and never reused until [`clear`](Self::clear)
/// resets the counter.
#[derive(Debug, Clone, Default)]
pub struct TraceCollection {
    entries: Vec<(String, Trace)>,
    counter: usize,
}

impl TraceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a trace and return its generated label.
    pub fn insert(&mut self, trace: Trace) -> String {
        self.counter += 1;
        let label = format!("{LABEL_PREFIX} {}", self.counter);
        self.entries.push((label.clone(), trace));
        label
    }

    pub fn get(&self, label: &str) -> Option<&Trace> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, t)| t)
    }

    /// Position of `label` in import order.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.entries.iter().position(|(l, _)| l == label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Trace)> + '_ {
        self.entries.iter().map(|(l, t)| (l.as_str(), t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every trace and restart numbering at 1.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.counter = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(power: f64) -> Trace {
        Trace::from_samples(vec![(1500.0, power)]).unwrap()
    }

    #[test]
    fn test_labels_are_sequential() {
        let mut traces = TraceCollection::new();
        assert_eq!(traces.insert(trace(-1.0)), "Spectral Response 1");
        assert_eq!(traces.insert(trace(-2.0)), "Spectral Response 2");

        let labels: Vec<_> = traces.labels().collect();
        assert_eq!(labels, vec!["Spectral Response 1", "Spectral Response 2"]);
        assert_eq!(traces.get("Spectral Response 2"), Some(&trace(-2.0)));
        assert_eq!(traces.position("Spectral Response 2"), Some(1));
        assert!(traces.get("Spectral Response 3").is_none());
    }

    #[test]
    fn test_clear_resets_numbering() {
        let mut traces = TraceCollection::new();
        traces.insert(trace(-1.0));
        traces.insert(trace(-2.0));

        traces.clear();
        assert!(traces.is_empty());
        assert_eq!(traces.insert(trace(-3.0)), "Spectral Response 1");
        assert_eq!(traces.len(), 1);
    }
}
