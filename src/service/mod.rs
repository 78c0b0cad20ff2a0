pub mod attendance;
pub mod dashboard;
pub mod registry;

pub use attendance::AttendanceTracker;
pub use dashboard::Dashboard;
pub use registry::EmployeeRegistry;
