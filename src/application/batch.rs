use super::gateway::ChannelGateway;
use crate::domain::payment::PaymentId;
use crate::error::{PaymentError, Result};
use crate::interfaces::json::ChannelResponse;
use crate::interfaces::json::command_reader::{Command, Operation};
use std::collections::HashMap;

/// Runs batch commands against a gateway, remembering the ids of labelled
/// creates so later lines can refer to them as `@label`.
pub struct BatchRunner {
    gateway: ChannelGateway,
    labels: HashMap<String, PaymentId>,
}

impl BatchRunner {
    pub fn new(gateway: ChannelGateway) -> Self {
        Self {
            gateway,
            labels: HashMap::new(),
        }
    }

    pub fn gateway(&self) -> &ChannelGateway {
        &self.gateway
    }

    pub async fn run(&mut self, command: Command) -> Result<ChannelResponse> {
        let Command {
            op,
            channel,
            id,
            label,
            request,
        } = command;

        match op {
            Operation::Create => {
                let response = self.gateway.create(channel, request).await?;
                if let Some(label) = label {
                    self.labels.insert(label, response.id.clone());
                }
                Ok(response)
            }
            Operation::Get => {
                let id = self.resolve(id)?;
                self.gateway.read(channel, &id).await
            }
            Operation::Update => {
                let id = self.resolve(id)?;
                self.gateway.update(channel, &id, request).await
            }
            Operation::Delete => {
                let id = self.resolve(id)?;
                self.gateway.delete(channel, &id).await
            }
        }
    }

    fn resolve(&self, id: Option<String>) -> Result<PaymentId> {
        let id = id.ok_or_else(|| PaymentError::validation("id is required"))?;
        match id.strip_prefix('@') {
            Some(label) => self
                .labels
                .get(label)
                .cloned()
                .ok_or_else(|| PaymentError::validation(format!("unknown label '@{label}'"))),
            None => Ok(PaymentId::from(id)),
        }
    }
}
