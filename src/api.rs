mod billing_service;
pub mod models;
pub mod rest;

#[cfg(test)]
pub mod stub;

pub use self::billing_service::BillingService;
