// Application state for HTTP handlers
use crate::application::chart_service::ChartService;
use crate::application::entry_service::EntryService;
use crate::application::streaming_service::StreamingDashboardService;

#[derive(Clone)]
pub struct AppState {
    pub chart_service: ChartService,
    pub entry_service: EntryService,
    pub streaming_service: StreamingDashboardService,
    pub default_max_entries: Option<usize>,
}
