pub mod entrypoint;
pub mod error;
pub mod model {
    pub mod internal;
}
pub mod service {
    pub mod match_engine;
    pub mod match_thread;
}
