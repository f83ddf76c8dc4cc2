//! Application services orchestrating record intake, lifecycle, and
//! read-side aggregation.

mod dashboard;
mod events;
mod tasks;

pub use dashboard::{
    CalendarEntry, CalendarSource, DashboardError, DashboardResult, DashboardService,
    DashboardSummary, EventHighlight, StatusTally, TaskHighlight,
};
pub use events::{
    CreateEventRequest, EditEventRequest, EventLifecycleService, EventServiceError,
    EventServiceResult,
};
pub use tasks::{
    CreateTaskRequest, EditTaskRequest, TaskLifecycleService, TaskServiceError, TaskServiceResult,
};
