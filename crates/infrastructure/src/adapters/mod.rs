//! Adapter implementations of application ports.

mod reqwest_lists_api;

pub use reqwest_lists_api::{APPLICATION_NAME_HEADER, ReqwestListsApi};
