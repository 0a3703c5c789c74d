//! Fresh temporary and label names

use crate::{Label, Temp};

/// Monotonic counters for temporaries and labels
///
/// One instance per lowering run; the two counters are independent.
#[derive(Debug, Default)]
pub struct NameGen {
    next_temp: u32,
    next_label: u32,
}

impl NameGen {
    /// Both counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates `t0`, `t1`, ...
    pub fn new_temp(&mut self) -> Temp {
        let temp = Temp(self.next_temp);
        self.next_temp += 1;
        temp
    }

    /// Allocates `L0`, `L1`, ...
    pub fn new_label(&mut self) -> Label {
        let label = Label::Block(self.next_label);
        self.next_label += 1;
        label
    }

    /// Number of temporaries handed out so far
    pub fn temps_allocated(&self) -> u32 {
        self.next_temp
    }

    /// Number of labels handed out so far
    pub fn labels_allocated(&self) -> u32 {
        self.next_label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_independent() {
        let mut names = NameGen::new();
        assert_eq!(names.new_temp(), Temp(0));
        assert_eq!(names.new_label(), Label::Block(0));
        assert_eq!(names.new_temp(), Temp(1));
        assert_eq!(names.new_temp(), Temp(2));
        assert_eq!(names.new_label(), Label::Block(1));
        assert_eq!(names.temps_allocated(), 3);
        assert_eq!(names.labels_allocated(), 2);
    }
}
