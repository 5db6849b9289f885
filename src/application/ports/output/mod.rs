pub mod store_port;
pub mod transport_port;
