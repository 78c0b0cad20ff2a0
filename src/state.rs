use crate::{
    config::Config,
    service::{AttendanceTracker, Dashboard, EmployeeRegistry},
    store::{AttendanceStore, EmployeeStore},
};
use actix_governor::{
    GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web::Data;
use std::sync::Arc;

pub type LimiterConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Components shared by every worker, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub api_prefix: String,
    pub registry: Data<EmployeeRegistry>,
    pub tracker: Data<AttendanceTracker>,
    pub dashboard: Data<Dashboard>,
    pub limiter: Option<LimiterConfig>,
}

impl AppState {
    pub fn new<S>(store: Arc<S>, config: &Config) -> Self
    where
        S: EmployeeStore + AttendanceStore + 'static,
    {
        let employees: Arc<dyn EmployeeStore> = store.clone();
        let attendance: Arc<dyn AttendanceStore> = store;

        Self {
            api_prefix: config.api_prefix.clone(),
            registry: Data::new(EmployeeRegistry::new(employees.clone())),
            tracker: Data::new(AttendanceTracker::new(
                employees.clone(),
                attendance.clone(),
            )),
            dashboard: Data::new(Dashboard::new(employees, attendance)),
            limiter: build_limiter(config.rate_api_per_min),
        }
    }
}

/// Per-peer limiter shared by all workers; `None` when the rate is 0.
fn build_limiter(requests_per_min: u32) -> Option<LimiterConfig> {
    if requests_per_min == 0 {
        return None;
    }
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate_disables_limiting() {
        assert!(build_limiter(0).is_none());
        assert!(build_limiter(120).is_some());
        assert!(build_limiter(1_000_000).is_some());
    }
}
