//! Consumer side of the flag API: admin panel and form page composition.

pub mod admin;
pub mod error;
pub mod gateway;
pub mod page;

pub use self::{
    admin::{AdminPanel, ToggleOutcome},
    error::{GatewayError, PageError},
    gateway::{FlagGateway, HttpFlagGateway},
    page::{FormPage, compose_form_page},
};
