use std::sync::Arc;

use clap::Parser;
use enumset::EnumSet;
use reqwest::Url;

use crate::{
    api::{BillingService, rest},
    core::role::{Capability, Role},
    prelude::*,
};

/// Billing service connection and the caller's role.
#[derive(Parser)]
pub struct SessionArgs {
    /// Billing API base URL, for example: `https://billing.example.com/api`.
    #[clap(long = "api-base-url", env = "BILLING_API_BASE_URL")]
    base_url: Url,

    /// Bearer token.
    #[clap(long = "api-token", env = "BILLING_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[clap(long = "api-timeout", env = "BILLING_API_TIMEOUT", default_value = "10s")]
    timeout: humantime::Duration,

    #[clap(long, env = "BILLING_ROLE", value_enum, default_value_t = Role::default())]
    role: Role,
}

impl SessionArgs {
    pub fn connect(&self) -> Result<Arc<dyn BillingService>> {
        let api = rest::Api::new(self.base_url.clone(), self.token.as_deref(), self.timeout.into())?;
        Ok(Arc::new(api))
    }

    pub fn capabilities(&self) -> EnumSet<Capability> {
        self.role.capabilities()
    }
}
