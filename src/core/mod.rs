pub mod listing;
pub mod message;
pub mod negotiator;
pub mod offer;
pub mod reply;
