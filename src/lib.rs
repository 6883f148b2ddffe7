pub mod catalog;
pub mod clock;
pub mod manager;
pub mod model;
pub mod observability;
pub mod present;
pub mod shell;
pub mod store;
