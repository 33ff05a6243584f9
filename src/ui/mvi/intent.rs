/// Something that happened: a key press, a navigation, a finished request.
pub trait Intent: Send + 'static {}
