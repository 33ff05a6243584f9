/// State owned by one reducer.
///
/// `Default` lets the owner `mem::take` it for the duration of a reduce.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
