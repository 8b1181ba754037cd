use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use shared_http::ApiClient;
use shared_models::error::ApiError;

use crate::models::{Slot, SlotRangeQuery, SlotsByDay};

pub struct SlotService {
    api: Arc<ApiClient>,
}

impl SlotService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// A provider's slots over a date range, grouped by day.
    pub async fn by_range(&self, query: &SlotRangeQuery) -> Result<SlotsByDay, ApiError> {
        debug!("Fetching slot range for provider {}", query.provider);
        self.api
            .get_with_query("/slot/range/", &query.to_query())
            .await
    }

    /// Free slots on a given day, optionally narrowed to a provider or hospital.
    pub async fn free(
        &self,
        date: NaiveDate,
        provider: Option<i64>,
        hospital: Option<i64>,
    ) -> Result<Vec<Slot>, ApiError> {
        debug!("Fetching free slots on {}", date);
        let mut query = vec![("date".to_string(), date.to_string())];
        if let Some(provider) = provider {
            query.push(("provider".to_string(), provider.to_string()));
        }
        if let Some(hospital) = hospital {
            query.push(("hospital".to_string(), hospital.to_string()));
        }
        self.api.get_with_query("/slot/free/", &query).await
    }
}
