pub mod push_connector;
pub mod rest_client;

pub use push_connector::{PushConnection, PushConnector, PushSink, TransportEvent};
pub use rest_client::RestClient;
