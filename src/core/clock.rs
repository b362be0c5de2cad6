//! 시간 소스 추상화
//!
//! 토큰 발급 시각, 만료 판정, KeyStore TTL 계산이 모두 같은 시계를 보도록
//! `Clock` trait 으로 주입합니다. 운영에서는 [`SystemClock`], 테스트에서는
//! [`ManualClock`]으로 시간 경과를 흉내냅니다.

use std::sync::atomic::{AtomicI64, Ordering};
use chrono::{DateTime, Duration, TimeZone, Utc};

/// 현재 시각을 제공하는 시계
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// 시스템 시계 (`Utc::now()`)
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 수동으로 진행시키는 시계
///
/// 밀리초 단위 Unix timestamp 를 원자적으로 보관하므로
/// 여러 컴포넌트가 `Arc`로 공유해도 안전합니다.
///
/// ```rust,ignore
/// let clock = ManualClock::starting_at(Utc::now());
/// clock.advance(Duration::seconds(2));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            millis: AtomicI64::new(start.timestamp_millis()),
        }
    }

    /// 주어진 시간만큼 시계를 앞으로 이동합니다.
    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.millis.load(Ordering::SeqCst);
        Utc.timestamp_millis_opt(millis)
            .single()
            .unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let clock = ManualClock::starting_at(start);

        assert_eq!(clock.now(), start);

        clock.advance(Duration::milliseconds(2500));
        assert_eq!(clock.now(), start + Duration::milliseconds(2500));
    }

    #[test]
    fn test_system_clock_is_close_to_utc_now() {
        let diff = Utc::now() - SystemClock.now();
        assert!(diff.num_seconds().abs() < 5);
    }
}
