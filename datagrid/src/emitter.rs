/// Enforces the mount-set contract while indexes are pushed to a sink.
///
/// - Indexes at or past `total_size` are dropped.
/// - Repeats of the previous index are dropped.
/// - Out-of-order indexes are dropped (and debug-asserted).
pub struct MountEmitter<'a> {
    total_size: usize,
    last: Option<usize>,
    sink: &'a mut dyn FnMut(usize),
}

impl<'a> MountEmitter<'a> {
    pub fn new(total_size: usize, sink: &'a mut dyn FnMut(usize)) -> Self {
        Self {
            total_size,
            last: None,
            sink,
        }
    }

    pub fn last(&self) -> Option<usize> {
        self.last
    }

    pub fn emit(&mut self, index: usize) {
        if index >= self.total_size {
            gwarn!(
                index,
                total_size = self.total_size,
                "MountEmitter: out-of-bounds index"
            );
            return;
        }

        if let Some(prev) = self.last {
            if index == prev {
                return;
            }
            if index < prev {
                gwarn!(
                    prev,
                    next = index,
                    "MountEmitter: indexes must be emitted in ascending order"
                );
                debug_assert!(
                    index > prev,
                    "MountEmitter: indexes must be emitted in ascending order (prev={prev}, next={index})"
                );
                return;
            }
        }

        self.last = Some(index);
        (self.sink)(index);
    }

    /// Emits `start..=end`, clamped to the collection.
    pub fn emit_span(&mut self, start: usize, end: usize) {
        let Some(last) = self.total_size.checked_sub(1) else {
            return;
        };
        let end = end.min(last);
        if start > end {
            return;
        }
        for i in start..=end {
            self.emit(i);
        }
    }
}
