pub mod model {
    pub mod game;
    pub mod messages;
}
pub mod utility;
