//! Display models for CLI output

pub mod display;

pub use display::{
    AgentDisplay, MessageDisplay, SessionDisplay, SourceDisplay, UsageDisplay, UserDisplay,
};
