//! Ports - interfaces between the application layer and adapters.

mod event_publisher;

pub use event_publisher::SessionEventPublisher;
