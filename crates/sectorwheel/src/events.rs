use std::time::Duration;

#[derive(Debug, Clone)]
pub enum WheelEvent {
    Frame(Duration),
    Detach,
}
