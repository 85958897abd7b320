//! Lifecycle of the `ibm_logs_dashboard` resource.
//!
//! Each entry point validates and converts the flat configuration with the
//! schema-driven codec, issues one API call through [`LogsClient`] and reads
//! the result back into state. Retries live in the client; nothing here
//! repeats a request.
//!
//! # Invariants
//! - The resource id is always `region/instance_id/dashboard_id`
//! - A 404 on read removes the resource from state instead of failing
//! - Configuration errors stop an operation before any request is sent
//! - Responses are mapped from their raw JSON, so unknown variants surface as
//!   conversion errors instead of being dropped by typed decoding
//! - Once a create request succeeds the id is kept, even if reading back fails

use cloudlogs_client::{ClientError, LogsClient, models::Dashboard};
use cloudlogs_config::EndpointType;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::codec::{FlatMap, expand_typed, flatten};
use crate::error::{ConversionError, Operation, ResourceError, ResourceErrorKind, Result};
use crate::id::ResourceId;
use crate::schema::ResourceSchema;
use crate::schema::dashboard::dashboard_schema;
use crate::state::{ResourceData, changed_attributes};
use crate::validate::{Diagnostics, validate};

/// What applying a configuration would do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Create,
    Update { changed: Vec<&'static str> },
    /// Attributes that cannot change in place differ from state.
    Replace { changed: Vec<&'static str> },
    NoOp,
}

/// The dashboard resource, holding its schema table.
#[derive(Debug, Clone)]
pub struct DashboardResource {
    schema: ResourceSchema,
}

fn is_not_found(error: &ClientError) -> bool {
    error.status() == Some(404)
}

impl DashboardResource {
    pub fn new() -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            schema: dashboard_schema()?,
        })
    }

    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    pub fn validate(&self, config: &FlatMap) -> Diagnostics {
        validate(&self.schema.root, config)
    }

    fn error(&self, operation: Operation, kind: ResourceErrorKind) -> ResourceError {
        ResourceError::new(self.schema.type_name, operation, kind)
    }

    fn check(&self, operation: Operation, config: &FlatMap) -> Result<()> {
        let diagnostics = self.validate(config);
        for warning in diagnostics.warnings() {
            warn!(path = %warning.path, "{}", warning.summary);
        }
        if diagnostics.has_errors() {
            return Err(self.error(operation, ResourceErrorKind::Validation(diagnostics)));
        }
        Ok(())
    }

    /// Build the request payload from a flat configuration.
    pub fn expand(&self, config: &FlatMap) -> std::result::Result<Dashboard, ConversionError> {
        expand_typed(&self.schema.root, config, "")
    }

    fn parse_id(&self, operation: Operation, data: &ResourceData) -> Result<ResourceId> {
        let raw = data.id().ok_or_else(|| {
            self.error(
                operation,
                ResourceErrorKind::InvalidState("resource has no id in state".to_string()),
            )
        })?;
        raw.parse()
            .map_err(|e| self.error(operation, ResourceErrorKind::InvalidId(e)))
    }

    fn endpoint_type(&self, operation: Operation, attributes: &FlatMap) -> Result<Option<EndpointType>> {
        match attributes.get("endpoint_type").and_then(Value::as_str) {
            Some(raw) => raw.parse().map(Some).map_err(|e: String| {
                self.error(operation, ResourceErrorKind::InvalidState(format!("endpoint_type {e}")))
            }),
            None => Ok(None),
        }
    }

    /// Decide what applying `config` over `prior` would do.
    pub fn plan(&self, prior: Option<&ResourceData>, config: &FlatMap) -> Result<Plan> {
        self.check(Operation::Plan, config)?;
        let Some(prior) = prior.filter(|prior| prior.exists()) else {
            return Ok(Plan::Create);
        };

        let root = &self.schema.root;
        let replace: Vec<&'static str> = changed_attributes(root, prior.attributes(), config, true)
            .into_iter()
            .filter(|name| root.attribute(name).is_some_and(|attr| attr.force_new))
            .collect();
        if !replace.is_empty() {
            return Ok(Plan::Replace { changed: replace });
        }

        let changed = changed_attributes(root, prior.attributes(), config, false);
        if changed.is_empty() {
            Ok(Plan::NoOp)
        } else {
            Ok(Plan::Update { changed })
        }
    }

    /// Create the dashboard described by `config` and read it back into `data`.
    ///
    /// `data` carries the new id as soon as the API has accepted the create,
    /// so a failed read-back still leaves the caller with something to save.
    pub async fn create(
        &self,
        client: &mut LogsClient,
        config: &FlatMap,
        data: &mut ResourceData,
    ) -> Result<()> {
        let operation = Operation::Create;
        self.check(operation, config)?;
        let dashboard = self
            .expand(config)
            .map_err(|e| self.error(operation, ResourceErrorKind::BuildRequest(e)))?;

        let instance_id = config
            .get("instance_id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let region = config
            .get("region")
            .and_then(Value::as_str)
            .unwrap_or(client.region())
            .to_string();
        let endpoint_type = self.endpoint_type(operation, config)?;
        client.use_instance(&instance_id, Some(&region), endpoint_type);

        info!(instance_id = %instance_id, region = %region, name = %dashboard.name, "Creating dashboard");
        let created = client
            .create_dashboard_json(&dashboard)
            .await
            .map_err(|e| self.error(operation, ResourceErrorKind::Client(e)))?;
        let dashboard_id = created
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                self.error(
                    operation,
                    ResourceErrorKind::InvalidState(
                        "create response carried no dashboard id".to_string(),
                    ),
                )
            })?;

        *data = ResourceData::from_config(config.clone());
        data.set_id(ResourceId::new(region, instance_id, dashboard_id).to_string());
        self.read_into(operation, client, data).await
    }

    /// Refresh `data` from the API. A missing dashboard clears the state.
    pub async fn read(&self, client: &mut LogsClient, data: &mut ResourceData) -> Result<()> {
        self.read_into(Operation::Read, client, data).await
    }

    async fn read_into(
        &self,
        operation: Operation,
        client: &mut LogsClient,
        data: &mut ResourceData,
    ) -> Result<()> {
        let id = self.parse_id(operation, data)?;
        let endpoint_type = self.endpoint_type(operation, data.attributes())?;
        client.use_instance(&id.instance_id, Some(&id.region), endpoint_type);

        debug!(id = %id, "Reading dashboard");
        let body = match client.get_dashboard_json(&id.dashboard_id).await {
            Ok(body) => body,
            Err(e) if is_not_found(&e) => {
                warn!(id = %id, "Dashboard not found, removing it from state");
                data.clear();
                return Ok(());
            }
            Err(e) => return Err(self.error(operation, ResourceErrorKind::Client(e))),
        };

        let mut attributes = flatten(&self.schema.root, &body, "")
            .map_err(|e| self.error(operation, ResourceErrorKind::ReadResponse(e)))?;
        attributes.insert("dashboard_id".into(), Value::String(id.dashboard_id.clone()));
        attributes.insert("instance_id".into(), Value::String(id.instance_id.clone()));
        attributes.insert("region".into(), Value::String(id.region.clone()));
        if let Some(endpoint_type) = endpoint_type {
            attributes.insert("endpoint_type".into(), Value::String(endpoint_type.to_string()));
        }
        data.replace_attributes(attributes);
        Ok(())
    }

    /// Replace the dashboard when tracked attributes changed, then read it back.
    pub async fn update(
        &self,
        client: &mut LogsClient,
        prior: &ResourceData,
        config: &FlatMap,
    ) -> Result<ResourceData> {
        let operation = Operation::Update;
        let id = self.parse_id(operation, prior)?;
        let mut data = ResourceData::from_config(config.clone());
        data.set_id(id.to_string());

        let changed = changed_attributes(&self.schema.root, prior.attributes(), config, false);
        if changed.is_empty() {
            debug!(id = %id, "No tracked attribute changed, skipping replace");
        } else {
            self.check(operation, config)?;
            let dashboard = self
                .expand(config)
                .map_err(|e| self.error(operation, ResourceErrorKind::BuildRequest(e)))?;
            let endpoint_type = self.endpoint_type(operation, config)?;
            client.use_instance(&id.instance_id, Some(&id.region), endpoint_type);

            info!(id = %id, changed = ?changed, "Replacing dashboard");
            client
                .replace_dashboard(&id.dashboard_id, &dashboard)
                .await
                .map_err(|e| self.error(operation, ResourceErrorKind::Client(e)))?;
        }

        self.read_into(operation, client, &mut data).await?;
        Ok(data)
    }

    /// Delete the dashboard and clear the state.
    pub async fn delete(&self, client: &mut LogsClient, data: &mut ResourceData) -> Result<()> {
        let operation = Operation::Delete;
        let id = self.parse_id(operation, data)?;
        let endpoint_type = self.endpoint_type(operation, data.attributes())?;
        client.use_instance(&id.instance_id, Some(&id.region), endpoint_type);

        info!(id = %id, "Deleting dashboard");
        match client.delete_dashboard(&id.dashboard_id).await {
            Ok(()) => {}
            Err(e) if is_not_found(&e) => {
                debug!(id = %id, "Dashboard already gone");
            }
            Err(e) => return Err(self.error(operation, ResourceErrorKind::Client(e))),
        }
        data.clear();
        Ok(())
    }

    /// Adopt an existing dashboard by composite id.
    pub async fn import(&self, client: &mut LogsClient, id: &str) -> Result<ResourceData> {
        let operation = Operation::Import;
        let parsed: ResourceId = id
            .parse()
            .map_err(|e| self.error(operation, ResourceErrorKind::InvalidId(e)))?;

        let mut data = ResourceData::default();
        data.set_id(parsed.to_string());
        self.read_into(operation, client, &mut data).await?;
        if !data.exists() {
            return Err(self.error(
                operation,
                ResourceErrorKind::NotFound(format!("dashboard {id}")),
            ));
        }
        Ok(data)
    }
}
