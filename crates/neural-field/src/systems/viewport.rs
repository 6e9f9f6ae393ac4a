/// Pending size waiting out the debounce interval.
#[derive(Debug, Clone, Copy)]
struct Pending {
    size: (u32, u32),
    since_ms: f64,
}

/// Turns container-size notifications into field rebuilds.
///
/// The first size ever seen applies immediately. Later sizes apply once no
/// new notification arrived for `debounce_ms`, and only if they differ
/// from the current size.
#[derive(Debug, Clone)]
pub struct ViewportAdapter {
    current: Option<(u32, u32)>,
    pending: Option<Pending>,
    debounce_ms: f64,
}

impl ViewportAdapter {
    pub fn new(debounce_ms: f64) -> Self {
        Self {
            current: None,
            pending: None,
            debounce_ms: debounce_ms.max(0.0),
        }
    }

    /// Record a size reported by the host at `now_ms`.
    pub fn notify(&mut self, width: u32, height: u32, now_ms: f64) {
        self.pending = Some(Pending {
            size: (width, height),
            since_ms: now_ms,
        });
    }

    /// Returns the size to rebuild for, if one is due at `now_ms`.
    pub fn poll(&mut self, now_ms: f64) -> Option<(u32, u32)> {
        let pending = self.pending?;
        if self.current.is_some() && now_ms - pending.since_ms < self.debounce_ms {
            return None;
        }
        self.pending = None;

        if self.current == Some(pending.size) {
            return None;
        }
        log::debug!("viewport {:?} -> {:?}", self.current, pending.size);
        self.current = Some(pending.size);
        Some(pending.size)
    }

    /// Size the field was last built for.
    pub fn current(&self) -> Option<(u32, u32)> {
        self.current
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
