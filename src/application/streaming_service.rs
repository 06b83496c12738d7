// Streaming dashboard service - Progressive loading, one message per tab
use crate::application::dashboard_service::DashboardService;
use crate::domain::dashboard::{Dashboard, Tab, TabView};
use futures::stream::Stream;
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamMessage {
    Skeleton { dashboard: Dashboard },
    Tab { tab: TabView },
    Complete { tab_count: usize, duration_ms: u64 },
}

#[derive(Clone)]
pub struct StreamingDashboardService {
    dashboard_service: DashboardService,
}

impl StreamingDashboardService {
    pub fn new(dashboard_service: DashboardService) -> Self {
        Self { dashboard_service }
    }

    /// Skeleton first, then every tab with its default selection, then completion.
    /// A tab that fails to build is skipped and left out of the count.
    pub fn stream_dashboard(&self) -> impl Stream<Item = StreamMessage> + Send + use<> {
        let service = self.dashboard_service.clone();

        async_stream::stream! {
            let start_time = Instant::now();

            let dashboard = match service.get_dashboard().await {
                Ok(dashboard) => dashboard,
                Err(e) => {
                    tracing::error!("Error building dashboard skeleton: {}", e);
                    return;
                }
            };
            yield StreamMessage::Skeleton { dashboard };

            let mut tab_count = 0;
            for tab in Tab::ALL {
                match service.get_tab(tab.slug(), None, None).await {
                    Ok(view) => {
                        tab_count += 1;
                        yield StreamMessage::Tab { tab: view };
                    }
                    Err(e) => {
                        tracing::warn!("Skipping tab {} in stream: {}", tab.slug(), e);
                    }
                }
            }

            let duration_ms = start_time.elapsed().as_millis() as u64;
            tracing::debug!("Streamed {} tabs in {}ms", tab_count, duration_ms);
            yield StreamMessage::Complete { tab_count, duration_ms };
        }
    }
}
