pub mod animation;
pub mod config;
pub mod events;
pub mod layout;
pub mod preview;
pub mod rotator;

pub mod sys {
    pub mod runtime;
}
