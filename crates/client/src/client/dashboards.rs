//! Dashboard API methods for [`LogsClient`].

use crate::client::LogsClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{Dashboard, DashboardJson};

impl LogsClient {
    /// Create a dashboard on the selected instance.
    pub async fn create_dashboard(&mut self, dashboard: &Dashboard) -> Result<Dashboard> {
        let base_url = self.require_base_url()?;
        crate::retry_call!(
            self,
            __token,
            endpoints::create_dashboard(
                &self.http,
                &base_url,
                &__token,
                dashboard,
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }

    /// Create a dashboard and return the undecoded response body.
    pub async fn create_dashboard_json(&mut self, dashboard: &Dashboard) -> Result<DashboardJson> {
        let base_url = self.require_base_url()?;
        crate::retry_call!(
            self,
            __token,
            endpoints::create_dashboard_json(
                &self.http,
                &base_url,
                &__token,
                dashboard,
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }

    /// Fetch a dashboard by id.
    pub async fn get_dashboard(&mut self, dashboard_id: &str) -> Result<Dashboard> {
        let base_url = self.require_base_url()?;
        crate::retry_call!(
            self,
            __token,
            endpoints::get_dashboard(
                &self.http,
                &base_url,
                &__token,
                dashboard_id,
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }

    /// Fetch a dashboard by id as raw JSON.
    pub async fn get_dashboard_json(&mut self, dashboard_id: &str) -> Result<DashboardJson> {
        let base_url = self.require_base_url()?;
        crate::retry_call!(
            self,
            __token,
            endpoints::get_dashboard_json(
                &self.http,
                &base_url,
                &__token,
                dashboard_id,
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }

    /// Replace a dashboard's full definition.
    pub async fn replace_dashboard(
        &mut self,
        dashboard_id: &str,
        dashboard: &Dashboard,
    ) -> Result<Dashboard> {
        let base_url = self.require_base_url()?;
        crate::retry_call!(
            self,
            __token,
            endpoints::replace_dashboard(
                &self.http,
                &base_url,
                &__token,
                dashboard_id,
                dashboard,
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }

    /// Delete a dashboard by id.
    pub async fn delete_dashboard(&mut self, dashboard_id: &str) -> Result<()> {
        let base_url = self.require_base_url()?;
        crate::retry_call!(
            self,
            __token,
            endpoints::delete_dashboard(
                &self.http,
                &base_url,
                &__token,
                dashboard_id,
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }
}
