//! EC2 instance lookup.

use aws_sdk_ec2::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_ec2::operation::describe_instances::DescribeInstancesOutput;
use aws_sdk_ec2::types::Instance;
use tracing::debug;

use backup_report_core::{InstanceDescriptor, InstanceDirectory, InstanceId, LookupError};

/// Error code EC2 returns for ids that do not (or no longer) exist.
const NOT_FOUND_CODE: &str = "InvalidInstanceID.NotFound";

#[derive(Debug, Clone)]
pub struct AwsInstanceDirectory {
    client: aws_sdk_ec2::Client,
}

impl AwsInstanceDirectory {
    pub fn new(client: aws_sdk_ec2::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl InstanceDirectory for AwsInstanceDirectory {
    async fn describe_instance(&self, id: &InstanceId) -> Result<InstanceDescriptor, LookupError> {
        let output = self
            .client
            .describe_instances()
            .instance_ids(id.as_str())
            .send()
            .await
            .map_err(|e| {
                let message = e
                    .message()
                    .map(str::to_string)
                    .unwrap_or_else(|| DisplayErrorContext(&e).to_string());
                lookup_error(e.code(), message, id)
            })?;

        let instance = first_instance(&output).ok_or_else(|| {
            debug!(instance_id = %id, "describe returned no reservations");
            LookupError::NotFound(id.clone())
        })?;

        Ok(to_descriptor(id, instance))
    }
}

/// Classify a describe failure: only the not-found code lets the run skip the job.
fn lookup_error(code: Option<&str>, message: String, id: &InstanceId) -> LookupError {
    if code == Some(NOT_FOUND_CODE) {
        LookupError::NotFound(id.clone())
    } else {
        LookupError::Service(message)
    }
}

fn first_instance(output: &DescribeInstancesOutput) -> Option<&Instance> {
    output.reservations().iter().flat_map(|r| r.instances()).next()
}

fn to_descriptor(requested: &InstanceId, instance: &Instance) -> InstanceDescriptor {
    let id = instance
        .instance_id()
        .map(InstanceId::new)
        .unwrap_or_else(|| requested.clone());
    let pairs = instance
        .tags()
        .iter()
        .filter_map(|t| Some((t.key()?, t.value().unwrap_or_default())));
    InstanceDescriptor::from_pairs(id, pairs)
}
