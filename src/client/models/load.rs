/// Render state shared by every screen that fetches data.
///
/// Exactly one variant holds at a time, so a screen can never show a spinner
/// and an error together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Failed(String),
    Empty,
    Ready,
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    /// `Ready` or `Empty` depending on whether anything came back.
    pub fn settled(is_empty: bool) -> Self {
        if is_empty { LoadStatus::Empty } else { LoadStatus::Ready }
    }
}

/// Monotonic request stamp; responses carrying an older stamp are stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generation(u64);

impl Generation {
    pub fn next(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, stamp: u64) -> bool {
        self.0 == stamp
    }

    /// Makes every stamp handed out so far stale without starting a load.
    pub fn invalidate(&mut self) {
        self.0 += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidate_retires_outstanding_stamps() {
        let mut g = Generation::default();
        let first = g.next();
        g.invalidate();
        assert!(!g.is_current(first));
        let second = g.next();
        assert!(second > first + 1);
        assert!(g.is_current(second));
    }
}
