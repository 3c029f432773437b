// Request and response objects exposed through the OpenAPI service
pub mod access;
pub mod common;
pub mod regions;
pub mod settings;
pub mod sppg;
