//! Quotation Pricing Engine for guard-staffing services
//!
//! This crate prices staffing quotations: from a net salary, shift pattern,
//! region, headcount and uniform selection it derives the fully-loaded
//! monthly cost per guard and the client-facing sale price, combining
//! statutory labor benefits, employer social-security contributions,
//! progressive income tax and historical uniform prices.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
