//! 進捗通知
//!
//! 長時間の分解処理で UI などへ進捗を伝えるための協調オブジェクト。
//! 制御フローには影響しない。

use tracing::info;

/// Receives the current position whenever it changes
pub trait ProgressIndicator {
    fn expose(&mut self, current: u64, limit: u64);
}

impl<P: ProgressIndicator + ?Sized> ProgressIndicator for Box<P> {
    fn expose(&mut self, current: u64, limit: u64) {
        (**self).expose(current, limit)
    }
}

/// Counter clamped to a limit, forwarding changes to an indicator
#[derive(Debug, Clone)]
pub struct Progress<P> {
    limit: u64,
    current: u64,
    indicator: P,
}

impl<P: ProgressIndicator> Progress<P> {
    pub fn new(indicator: P) -> Self {
        Self {
            limit: 0,
            current: 0,
            indicator,
        }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn indicator(&self) -> &P {
        &self.indicator
    }

    /// Set a new limit and restart from zero
    pub fn set_limit(&mut self, limit: u64) {
        self.limit = limit;
        self.current = 0;
        self.indicator.expose(self.current, self.limit);
    }

    pub fn set_indicator(&mut self, value: u64) {
        let value = value.min(self.limit);
        if self.current != value {
            self.current = value;
            self.indicator.expose(self.current, self.limit);
        }
    }

    pub fn inc_indicator(&mut self, delta: u64) {
        if delta != 0 {
            self.current = self.current.saturating_add(delta).min(self.limit);
            self.indicator.expose(self.current, self.limit);
        }
    }

    pub fn reset(&mut self) {
        self.set_indicator(0);
    }
}

/// Reports progress through `tracing`, once per percent
#[derive(Debug, Clone, Default)]
pub struct TracingProgress {
    label: String,
    last_percent: Option<u64>,
}

impl TracingProgress {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            last_percent: None,
        }
    }
}

impl ProgressIndicator for TracingProgress {
    fn expose(&mut self, current: u64, limit: u64) {
        let percent = if limit == 0 { 100 } else { current * 100 / limit };
        if self.last_percent != Some(percent) {
            self.last_percent = Some(percent);
            info!("{}: {}/{} ({}%)", self.label, current, limit, percent);
        }
    }
}
